//! Replaying solutions to score them.

use hexfall_core::{parse_commands, Command, ParseError};
use hexfall_engine::{power_count, power_score, Game, GameData, LoadError};
use log::debug;
use thiserror::Error;

/// Phrases scored when none are given.
pub const DEFAULT_PHRASES: &str = "ei!,r'lyeh,yuggoth,ia! ia!,necronomicon";

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("invalid solution: {0}")]
    Parse(#[from] ParseError),
}

/// Outcome of replaying one solution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Replay {
    /// Points from locking units, zero on error.
    pub move_score: i64,
    /// Phrase bonus, zero on error.
    pub power_score: i64,
    pub power_count: usize,
    pub finished: bool,
    /// An illegal move, or a command after the game was over.
    pub error: bool,
}

impl Replay {
    pub fn score(&self) -> i64 {
        self.move_score + self.power_score
    }
}

/// Replay `solution` on the game seeded with `seed`.
pub fn replay_solution(
    data: &GameData,
    seed: u32,
    solution: &str,
    phrases: &[String],
) -> Result<Replay, ReplayError> {
    data.seed_index_of(seed)?;
    let commands = parse_commands(solution)?;
    Ok(replay_commands(data, seed, &commands, solution, phrases))
}

/// Replay already-parsed commands. `text` is the solution as written, which
/// is what phrases are matched against.
pub fn replay_commands(
    data: &GameData,
    seed: u32,
    commands: &[Command],
    text: &str,
    phrases: &[String],
) -> Replay {
    let mut game = Game::with_seed(data, seed);
    let mut finished = false;
    let mut error = false;
    for (i, &command) in commands.iter().enumerate() {
        if finished {
            debug!("command {i} ({command}) after the game ended");
            error = true;
            break;
        }
        if !game.run(command) {
            finished = true;
        }
    }
    error |= game.is_error();

    if error {
        return Replay {
            finished,
            error,
            ..Replay::default()
        };
    }
    Replay {
        move_score: game.score(),
        power_score: power_score(text, phrases),
        power_count: power_count(text, phrases),
        finished: finished || game.is_finished(),
        error,
    }
}
