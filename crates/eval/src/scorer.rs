//! Heuristic scoring of game states.

use hexfall_engine::Game;
use log::trace;

use crate::features::Features;

/// Penalty per unit of each board feature. Subtracted from the game score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalWeights {
    pub height_diff: i64,
    pub height_sq: i64,
    pub shade: i64,
    pub shade_depth: i64,
    pub block: i64,
    pub hole: i64,
    pub unreachable: i64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self::kamineko()
    }
}

impl EvalWeights {
    /// Flat surface with no covered cells.
    pub fn kamineko() -> Self {
        Self {
            height_diff: 100,
            height_sq: 0,
            shade: 2000,
            shade_depth: 0,
            block: 0,
            hole: 0,
            unreachable: 0,
        }
    }

    /// Also keeps the stack low and dislikes deep cavities.
    pub fn osaka() -> Self {
        Self {
            height_diff: 100,
            height_sq: 10,
            shade: 1800,
            shade_depth: 1,
            block: 20,
            hole: 0,
            unreachable: 0,
        }
    }

    /// Holes instead of shade.
    pub fn duralmin() -> Self {
        Self {
            height_diff: 100,
            height_sq: 0,
            shade: 0,
            shade_depth: 0,
            block: 0,
            hole: 2000,
            unreachable: 0,
        }
    }

    /// Kamineko that also pays for empty cells sealed off from the top.
    pub fn yasaka() -> Self {
        Self {
            unreachable: 2000,
            ..Self::kamineko()
        }
    }

    pub fn penalty(&self, features: &Features) -> i64 {
        features.height_diff * self.height_diff
            + features.height_sq * self.height_sq
            + features.shade * self.shade
            + features.shade_depth * self.shade_depth
            + features.block * self.block
            + features.holes * self.hole
            + features.unreachable * self.unreachable
    }
}

/// Scores a game state for search. Higher is better.
pub trait GameScorer {
    /// `finished` is true when the game ended on the way to this state.
    fn score(&self, game: &Game<'_>, finished: bool) -> i64;
}

/// Floor for a game that is over: its score minus twice the worst penalty
/// any board of this size could carry.
pub fn min_score(game: &Game<'_>) -> i64 {
    let height = game.board().height() as i64;
    let width = game.board().width() as i64;
    game.score() - 2 * (height * width * height * 100 + height * width * 2000)
}

/// Game score minus the weighted board penalty.
#[derive(Clone, Debug, Default)]
pub struct HeuristicScorer {
    pub weights: EvalWeights,
}

impl HeuristicScorer {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }
}

impl GameScorer for HeuristicScorer {
    fn score(&self, game: &Game<'_>, finished: bool) -> i64 {
        if finished {
            return min_score(game);
        }
        let features = Features::of(game.board());
        let result = game.score() - self.weights.penalty(&features);
        trace!("{features} score:{} total:{result}", game.score());
        result
    }
}

impl<S: GameScorer + ?Sized> GameScorer for &S {
    fn score(&self, game: &Game<'_>, finished: bool) -> i64 {
        (**self).score(game, finished)
    }
}

impl<S: GameScorer + ?Sized> GameScorer for Box<S> {
    fn score(&self, game: &Game<'_>, finished: bool) -> i64 {
        (**self).score(game, finished)
    }
}
