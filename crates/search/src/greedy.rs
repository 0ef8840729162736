use hexfall_core::Command;
use hexfall_engine::{CancelToken, Game};
use hexfall_eval::{GameScorer, HeuristicScorer};
use log::debug;

use crate::{apply_placement, Solver};

/// Picks the placement with the best immediate score. Ties keep the
/// earliest placement found.
pub struct GreedySolver<S = HeuristicScorer> {
    pub scorer: S,
}

impl<S: GameScorer> GreedySolver<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }
}

impl Default for GreedySolver {
    fn default() -> Self {
        Self {
            scorer: HeuristicScorer::default(),
        }
    }
}

impl<S: GameScorer> Solver for GreedySolver<S> {
    fn next_commands(&mut self, game: &Game<'_>, cancel: &CancelToken) -> Vec<Command> {
        let mut best: Option<(i64, Vec<Command>)> = None;
        for result in game.reachable_placements_with(cancel) {
            let (next, finished) = apply_placement(game, &result);
            let score = self.scorer.score(&next, finished);
            if best.as_ref().map_or(true, |(s, _)| score > *s) {
                best = Some((score, result.commands));
            }
        }

        match best {
            Some((score, commands)) => {
                debug!("greedy: {} commands, score {score}", commands.len());
                commands
            }
            None => Vec::new(),
        }
    }
}
