use hexfall_core::Command;
use hexfall_engine::{CancelToken, Game};
use log::debug;

use crate::{Session, Solver};

/// Plays a game one unit per step with a per-unit [`Solver`].
pub struct PieceByPiece<'a, S> {
    solver: S,
    game: Option<Game<'a>>,
    commands: Vec<Command>,
}

impl<'a, S: Solver> PieceByPiece<'a, S> {
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            game: None,
            commands: Vec::new(),
        }
    }
}

impl<'a, S> PieceByPiece<'a, S> {
    /// The game as played so far.
    pub fn game(&self) -> Option<&Game<'a>> {
        self.game.as_ref()
    }
}

impl<'a, S: Solver> Session<'a> for PieceByPiece<'a, S> {
    fn add_game(&mut self, game: Game<'a>) {
        self.game = Some(game);
        self.commands.clear();
    }

    fn next(&mut self, cancel: &CancelToken) -> bool {
        let Some(game) = self.game.as_mut() else {
            return true;
        };
        if game.is_finished() {
            return true;
        }

        let commands = self.solver.next_commands(game, cancel);
        if commands.is_empty() {
            debug!("no placement for unit {}", game.spawned_count());
            return true;
        }
        for command in commands {
            self.commands.push(command);
            if !game.run(command) {
                return true;
            }
        }
        game.is_finished()
    }

    fn best_commands(&self) -> &[Command] {
        &self.commands
    }

    fn best_score(&self) -> i64 {
        self.game.as_ref().map_or(0, Game::score)
    }
}
