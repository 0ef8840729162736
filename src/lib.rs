//! hexfall - solver harness for the hex-grid falling-block puzzle.
//!
//! Reads problems, plays every requested seed with a chosen strategy,
//! and writes solutions as JSON records. Also replays and scores
//! existing solutions.

pub mod harness;
pub mod output;
pub mod replay;

pub use harness::{run_session, solve_problem, SolveOptions, SolverKind};
pub use output::{read_problem, read_records, write_placements, write_record, OutputRecord};
pub use replay::{replay_solution, Replay, ReplayError, DEFAULT_PHRASES};
