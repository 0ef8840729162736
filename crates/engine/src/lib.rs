//! hexfall-engine - game rules and simulation for the hex-grid puzzle.
//!
//! Provides problem loading, the unit source, the game state machine,
//! scoring, and the reachable-placement search every solver builds on.

pub mod cancel;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod placement_index;
pub mod problem;
pub mod rng;
pub mod scoring;

pub use cancel::CancelToken;
pub use game::Game;
pub use movegen::{lock_command, next_location, reachable_placements, SearchResult};
pub use placement_index::{PlacementIndex, PlacementSet};
pub use problem::{GameData, LoadError, Problem, Spawn, UnitRecord};
pub use rng::SourceRng;
pub use scoring::{move_score, parse_phrase_list, power_count, power_score};
