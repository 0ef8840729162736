//! hexfall eval crate - board features and heuristics for game states.

mod features;
mod reachability;
mod scorer;

pub use features::{height_line, height_penalty, Features};
pub use reachability::{
    dot_reachability_from_top, dot_reachability_map, reachability_map_by_any_hands,
};
pub use scorer::{min_score, EvalWeights, GameScorer, HeuristicScorer};
