use hexfall_core::Command;
use hexfall_engine::{CancelToken, Game};
use hexfall_eval::{EvalWeights, GameScorer, HeuristicScorer};
use log::{debug, trace};

use crate::{apply_placement, Solver};

/// Exhaustive lookahead: tries every placement of the next `depth + 1`
/// units and plays the first placement of the best line.
pub struct DfsSolver<S = HeuristicScorer> {
    pub depth: usize,
    pub scorer: S,
}

impl DfsSolver {
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            scorer: HeuristicScorer::new(EvalWeights::duralmin()),
        }
    }
}

impl<S: GameScorer> DfsSolver<S> {
    pub fn with_scorer(depth: usize, scorer: S) -> Self {
        Self { depth, scorer }
    }

    /// Best reachable score from `game`, and the commands of its first
    /// placement. `None` when there is nothing to place.
    fn search(
        &self,
        game: &Game<'_>,
        depth: usize,
        cancel: &CancelToken,
    ) -> Option<(i64, Vec<Command>)> {
        let mut best: Option<(i64, Vec<Command>)> = None;

        for result in game.reachable_placements_with(cancel) {
            if cancel.should_stop() && best.is_some() {
                break;
            }
            let (next, finished) = apply_placement(game, &result);
            let score = if finished {
                self.scorer.score(&next, true)
            } else if depth == 0 {
                self.scorer.score(&next, false)
            } else {
                match self.search(&next, depth - 1, cancel) {
                    Some((score, _)) => score,
                    None => self.scorer.score(&next, false),
                }
            };

            if best.as_ref().map_or(true, |(s, _)| score > *s) {
                trace!("depth {depth}: {} -> {score}", result.location);
                best = Some((score, result.commands));
            }
        }
        best
    }
}

impl<S: GameScorer> Solver for DfsSolver<S> {
    fn next_commands(&mut self, game: &Game<'_>, cancel: &CancelToken) -> Vec<Command> {
        match self.search(game, self.depth, cancel) {
            Some((score, commands)) => {
                debug!("dfs depth {}: score {score}", self.depth);
                commands
            }
            None => Vec::new(),
        }
    }
}
