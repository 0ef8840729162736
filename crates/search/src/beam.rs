use hexfall_core::Command;
use hexfall_engine::{CancelToken, Game};
use hexfall_eval::{EvalWeights, GameScorer, HeuristicScorer};
use log::debug;

use crate::{apply_placement, Solver};

/// Width-bounded lookahead for one unit: every ply expands the kept games
/// by all their placements and keeps the best `width`.
pub struct BeamSearch<S = HeuristicScorer> {
    pub width: usize,
    pub depth: usize,
    pub scorer: S,
}

impl BeamSearch {
    pub fn new(width: usize, depth: usize) -> Self {
        Self::with_scorer(width, depth, HeuristicScorer::new(EvalWeights::kamineko()))
    }
}

impl Default for BeamSearch {
    fn default() -> Self {
        Self::new(20, 2)
    }
}

#[derive(Clone)]
struct BeamNode<'a> {
    game: Game<'a>,
    finished: bool,
    score: i64,
    first: Vec<Command>,
}

impl<S: GameScorer> BeamSearch<S> {
    pub fn with_scorer(width: usize, depth: usize, scorer: S) -> Self {
        Self {
            width: width.max(1),
            depth,
            scorer,
        }
    }

    /// Every placement of every kept game. Games that are over, or have
    /// nowhere to go, carry over unchanged.
    fn expand<'a>(&self, nodes: &[BeamNode<'a>], cancel: &CancelToken) -> Vec<BeamNode<'a>> {
        let mut next_nodes = Vec::new();
        for node in nodes {
            let results = if node.finished {
                Vec::new()
            } else {
                node.game.reachable_placements_with(cancel)
            };
            if results.is_empty() {
                next_nodes.push(node.clone());
                continue;
            }
            for result in results {
                let (game, finished) = apply_placement(&node.game, &result);
                let score = self.scorer.score(&game, finished);
                let first = if node.first.is_empty() {
                    result.commands
                } else {
                    node.first.clone()
                };
                next_nodes.push(BeamNode {
                    game,
                    finished,
                    score,
                    first,
                });
            }
        }
        next_nodes
    }
}

impl<S: GameScorer> Solver for BeamSearch<S> {
    fn next_commands(&mut self, game: &Game<'_>, cancel: &CancelToken) -> Vec<Command> {
        let mut nodes = vec![BeamNode {
            game: game.clone(),
            finished: game.is_finished(),
            score: 0,
            first: Vec::new(),
        }];
        let mut best = Vec::new();

        for ply in 0..=self.depth {
            let mut next_nodes = self.expand(&nodes, cancel);
            if next_nodes.is_empty() {
                break;
            }
            // Stable, so equal scores keep discovery order.
            next_nodes.sort_by(|a, b| b.score.cmp(&a.score));
            debug!(
                "beam ply {ply}: {} -> {} (keep {})",
                nodes.len(),
                next_nodes.len(),
                self.width
            );
            next_nodes.truncate(self.width);
            nodes = next_nodes;
            best.clone_from(&nodes[0].first);

            if cancel.should_stop() {
                break;
            }
        }
        best
    }
}
