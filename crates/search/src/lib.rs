//! hexfall search crate - move selection over reachable placements.
//!
//! A [`Solver`] picks the commands for one falling unit. A [`Session`] owns
//! a whole game and improves its answer one step at a time;
//! [`PieceByPiece`] turns any solver into a session.

mod beam;
mod game_beam;
mod greedy;
mod line_target;
mod lookahead;
mod session;

pub use beam::BeamSearch;
pub use game_beam::GameBeam;
pub use greedy::GreedySolver;
pub use line_target::LineTargetSolver;
pub use lookahead::DfsSolver;
pub use session::PieceByPiece;

use hexfall_core::Command;
use hexfall_engine::{CancelToken, Game, SearchResult};

/// Chooses where the falling unit goes.
pub trait Solver {
    /// Commands for the falling unit, ending with the one that locks it.
    /// Empty when there is nothing to play.
    fn next_commands(&mut self, game: &Game<'_>, cancel: &CancelToken) -> Vec<Command>;
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn next_commands(&mut self, game: &Game<'_>, cancel: &CancelToken) -> Vec<Command> {
        (**self).next_commands(game, cancel)
    }
}

/// Plays one game incrementally, keeping a best answer between steps.
pub trait Session<'a> {
    /// Start over on `game`.
    fn add_game(&mut self, game: Game<'a>);

    /// Advance one step. Returns true once the best answer is final.
    fn next(&mut self, cancel: &CancelToken) -> bool;

    /// Commands of the best answer so far.
    fn best_commands(&self) -> &[Command];

    /// Game score of the best answer so far.
    fn best_score(&self) -> i64;
}

/// Apply a placement to a copy of `game`. The flag is true when the game
/// is over afterwards.
pub fn apply_placement<'a>(game: &Game<'a>, result: &SearchResult<'a>) -> (Game<'a>, bool) {
    let mut next = game.clone();
    let finished = !next.run_sequence(&result.commands);
    (next, finished)
}
