//! The game state machine: spawning, moving, locking and scoring units.

use hexfall_core::{Board, Command, HexPoint, UnitLocation};
use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::cancel::CancelToken;
use crate::movegen::{self, SearchResult};
use crate::problem::{GameData, LoadError};
use crate::rng::SourceRng;
use crate::scoring::move_score;

/// One game of a problem, played with one source seed.
///
/// Once `is_finished()` is set every further [`Game::run`] fails without
/// touching the state. `is_error()` additionally marks an illegal command
/// sequence, in which case the score is zero.
#[derive(Clone, Debug)]
pub struct Game<'a> {
    data: &'a GameData,
    board: Board,
    rng: SourceRng,
    spawned: usize,
    unit_index: usize,
    current: Option<UnitLocation<'a>>,
    history: FxHashSet<(HexPoint, u8)>,
    score: i64,
    prev_cleared: u32,
    finished: bool,
    error: bool,
}

impl<'a> Game<'a> {
    /// Start a game with the seed at `seed_index` of the source seeds.
    pub fn new(data: &'a GameData, seed_index: usize) -> Result<Self, LoadError> {
        Ok(Self::with_seed(data, data.seed(seed_index)?))
    }

    /// Start a game with an arbitrary seed.
    pub fn with_seed(data: &'a GameData, seed: u32) -> Self {
        let mut game = Self {
            data,
            board: data.board().clone(),
            rng: SourceRng::new(seed),
            spawned: 0,
            unit_index: 0,
            current: None,
            history: FxHashSet::default(),
            score: 0,
            prev_cleared: 0,
            finished: false,
            error: false,
        };
        game.init();
        game
    }

    /// Reset to the initial board and spawn the first unit.
    pub fn init(&mut self) {
        self.board = self.data.board().clone();
        self.rng = SourceRng::new(self.rng.seed());
        self.spawned = 0;
        self.unit_index = 0;
        self.current = None;
        self.history.clear();
        self.score = 0;
        self.prev_cleared = 0;
        self.finished = false;
        self.error = false;
        self.spawn_new_unit();
    }

    /// Bring in the next unit from the source. Returns false, and finishes
    /// the game, when the source is exhausted or the spawn is blocked.
    fn spawn_new_unit(&mut self) -> bool {
        self.current = None;
        self.history.clear();
        if self.spawned >= self.data.source_length() {
            debug!("source exhausted after {} units, score {}", self.spawned, self.score);
            self.finished = true;
            return false;
        }

        let value = self.rng.next_value();
        self.unit_index = value as usize % self.data.units().len();
        self.spawned += 1;

        let loc = self.data.spawn_location(self.unit_index);
        if self.board.is_conflicting(&loc) {
            debug!("spawn {} blocked, score {}", self.spawned, self.score);
            self.finished = true;
            return false;
        }
        trace!("spawned unit {} at {}", self.unit_index, loc);
        self.history.insert((loc.pivot(), loc.angle()));
        self.current = Some(loc);
        true
    }

    /// Apply one command.
    ///
    /// Moving into a conflict locks the unit where it is and spawns the next
    /// one. Revisiting a placement of the same unit is illegal: the game
    /// ends with an error and a zero score. Returns false whenever the game
    /// is over afterwards, including a lock that leaves no unit to spawn.
    pub fn run(&mut self, command: Command) -> bool {
        if self.finished || self.error {
            return false;
        }
        if command == Command::Ignored {
            return true;
        }
        let Some(current) = self.current else {
            return false;
        };

        let next = movegen::next_location(&current, command);
        if self.history.contains(&(next.pivot(), next.angle())) {
            debug!("placement {next} revisited by {command}");
            self.error = true;
            self.finished = true;
            self.score = 0;
            return false;
        }

        if self.board.is_conflicting(&next) {
            self.lock(current);
            return self.spawn_new_unit();
        }

        self.history.insert((next.pivot(), next.angle()));
        self.current = Some(next);
        true
    }

    /// Apply commands in order, stopping at the first failure.
    pub fn run_sequence(&mut self, commands: &[Command]) -> bool {
        commands.iter().all(|&command| self.run(command))
    }

    fn lock(&mut self, loc: UnitLocation<'a>) {
        let cleared = self.board.lock(&loc);
        let gained = move_score(loc.unit().len(), cleared, self.prev_cleared);
        self.score += gained;
        self.prev_cleared = cleared;
        trace!("locked {loc}: {cleared} lines, +{gained}");
    }

    /// Placement `loc` would move to under `command`.
    pub fn next_location(&self, loc: &UnitLocation<'a>, command: Command) -> UnitLocation<'a> {
        movegen::next_location(loc, command)
    }

    /// Whether `command` would lock `loc` on the current board.
    pub fn is_lockable_by(&self, loc: &UnitLocation<'a>, command: Command) -> bool {
        self.board.is_conflicting(&movegen::next_location(loc, command))
    }

    /// Rows that locking `loc` now would clear.
    pub fn lock_preview(&self, loc: &UnitLocation<'a>) -> u32 {
        self.board.lock_preview(loc)
    }

    /// Every placement the current unit can still reach and lock in.
    pub fn reachable_placements(&self) -> Vec<SearchResult<'a>> {
        self.reachable_placements_with(&CancelToken::new())
    }

    pub fn reachable_placements_with(&self, cancel: &CancelToken) -> Vec<SearchResult<'a>> {
        let Some(current) = self.current else {
            return Vec::new();
        };
        if self.finished {
            return Vec::new();
        }
        let index = &self.data.spawns()[self.unit_index].index;
        movegen::reachable_placements(
            &self.board,
            current,
            index,
            self.history.iter().copied(),
            cancel,
        )
    }

    pub fn data(&self) -> &'a GameData {
        self.data
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    #[inline]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Lines cleared by the most recent lock.
    pub fn prev_cleared(&self) -> u32 {
        self.prev_cleared
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// The falling unit, if any.
    pub fn current(&self) -> Option<UnitLocation<'a>> {
        self.current
    }

    /// Template index of the falling unit.
    pub fn current_unit(&self) -> Option<usize> {
        self.current.map(|_| self.unit_index)
    }

    pub fn spawned_count(&self) -> usize {
        self.spawned
    }

    /// Units still to come after the falling one.
    pub fn remaining_units(&self) -> usize {
        self.data.source_length().saturating_sub(self.spawned)
    }
}

impl std::fmt::Display for Game<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let members: Vec<HexPoint> = self
            .current
            .map(|loc| loc.members().collect())
            .unwrap_or_default();
        let pivot = self.current.map(|loc| loc.pivot());

        writeln!(
            f,
            "score {} spawned {}/{}{}",
            self.score,
            self.spawned,
            self.data.source_length(),
            if self.error {
                " (error)"
            } else if self.finished {
                " (finished)"
            } else {
                ""
            }
        )?;
        for y in 0..self.board.height() {
            if y % 2 == 1 {
                write!(f, " ")?;
            }
            for x in 0..self.board.width() {
                let p = HexPoint::new(x as i32, y as i32);
                let c = if members.contains(&p) {
                    '@'
                } else if pivot == Some(p) {
                    '+'
                } else if self.board.get(x, y) {
                    '*'
                } else {
                    '.'
                };
                if x > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{c}")?;
            }
            if y + 1 < self.board.height() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Problem, UnitRecord};
    use hexfall_core::parse_commands;

    fn problem(
        width: usize,
        height: usize,
        units: Vec<UnitRecord>,
        filled: Vec<HexPoint>,
        source_length: usize,
    ) -> GameData {
        GameData::load(&Problem {
            id: 1,
            units,
            width,
            height,
            filled,
            source_length,
            source_seeds: vec![0, 17],
        })
        .expect("valid problem")
    }

    fn dot() -> UnitRecord {
        UnitRecord {
            members: vec![HexPoint::new(0, 0)],
            pivot: HexPoint::new(0, 0),
        }
    }

    fn domino() -> UnitRecord {
        UnitRecord {
            members: vec![HexPoint::new(0, 0), HexPoint::new(1, 0)],
            pivot: HexPoint::new(0, 0),
        }
    }

    #[test]
    fn test_single_line_clear_scores_101() {
        let data = problem(2, 3, vec![dot()], vec![HexPoint::new(0, 2)], 1);
        let mut game = Game::new(&data, 0).expect("seed exists");
        assert_eq!(
            game.current().map(|loc| loc.pivot()),
            Some(HexPoint::new(0, 0))
        );

        // (0, 0) -> (0, 1) -> (1, 2), then the floor locks it.
        let commands = [Command::SouthEast, Command::SouthEast];
        assert!(game.run_sequence(&commands));
        let loc = game.current().expect("falling");
        assert_eq!(loc.pivot(), HexPoint::new(1, 2));
        assert_eq!(game.lock_preview(&loc), 1);
        assert!(game.is_lockable_by(&loc, Command::SouthEast));

        // The source holds a single unit, so this lock ends the game.
        assert!(!game.run(Command::SouthEast));
        assert_eq!(game.score(), 101);
        assert_eq!(game.prev_cleared(), 1);
        assert_eq!(game.board().filled_count(), 0);
        assert!(game.is_finished());
        assert!(!game.is_error());
    }

    #[test]
    fn test_full_rotation_is_an_error() {
        let data = problem(5, 5, vec![domino()], vec![], 2);
        let mut game = Game::new(&data, 0).expect("seed exists");

        // Drop the first domino straight to the floor.
        let drop = [Command::SouthEast; 5];
        assert!(game.run_sequence(&drop));
        assert_eq!(game.score(), 2);
        assert_eq!(game.spawned_count(), 2);

        assert!(game.run_sequence(&[Command::SouthEast, Command::SouthEast]));
        for _ in 0..5 {
            assert!(game.run(Command::RotateClockwise));
        }
        assert!(!game.run(Command::RotateClockwise));
        assert!(game.is_error());
        assert!(game.is_finished());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_blocked_spawn_finishes_without_error() {
        let row: Vec<HexPoint> = (0..3).map(|x| HexPoint::new(x, 0)).collect();
        let data = problem(3, 3, vec![dot()], row, 5);
        let mut game = Game::new(&data, 0).expect("seed exists");
        assert!(game.is_finished());
        assert!(!game.is_error());
        assert_eq!(game.score(), 0);
        assert!(game.current().is_none());
        assert!(game.reachable_placements().is_empty());
        assert!(!game.run(Command::West));
    }

    #[test]
    fn test_ignored_is_a_noop() {
        let data = problem(4, 4, vec![dot()], vec![], 3);
        let mut game = Game::new(&data, 1).expect("seed exists");
        let before = game.current();
        assert!(game.run(Command::Ignored));
        assert_eq!(game.current(), before);
    }

    #[test]
    fn test_finished_game_rejects_commands() {
        let data = problem(2, 2, vec![dot()], vec![], 1);
        let mut game = Game::new(&data, 0).expect("seed exists");
        // SouthWest from (0, 0) leaves the board and locks.
        while !game.is_finished() {
            assert!(game.run(Command::SouthWest) || game.is_finished());
        }
        let score = game.score();
        assert!(!game.run(Command::East));
        assert!(!game.run(Command::Ignored));
        assert_eq!(game.score(), score);
    }

    #[test]
    fn test_replay_is_deterministic() {
        let data = problem(6, 8, vec![dot(), domino()], vec![HexPoint::new(2, 7)], 6);
        let commands = parse_commands("lalalaplaalbbbblllllllaaaaaaa").expect("valid");
        let mut a = Game::new(&data, 1).expect("seed exists");
        let mut b = Game::new(&data, 1).expect("seed exists");
        a.run_sequence(&commands);
        b.run_sequence(&commands);
        assert_eq!(a.score(), b.score());
        assert_eq!(a.board(), b.board());
        assert_eq!(a.is_finished(), b.is_finished());
        assert_eq!(a.spawned_count(), b.spawned_count());
    }

    #[test]
    fn test_init_restarts_game() {
        let data = problem(4, 4, vec![dot()], vec![], 3);
        let mut game = Game::new(&data, 1).expect("seed exists");
        let fresh = game.clone();
        game.run_sequence(&[Command::SouthEast; 4]);
        assert!(game.spawned_count() > 1);
        game.init();
        assert_eq!(game.spawned_count(), 1);
        assert_eq!(game.current(), fresh.current());
        assert_eq!(game.board(), fresh.board());
    }

    #[test]
    fn test_reachable_paths_lock_when_replayed() {
        let data = problem(5, 6, vec![domino()], vec![HexPoint::new(1, 5)], 2);
        let game = Game::new(&data, 0).expect("seed exists");
        let results = game.reachable_placements();
        assert!(!results.is_empty());
        for result in results {
            let mut copy = game.clone();
            let ok = copy.run_sequence(&result.commands);
            assert!(ok || copy.is_finished());
            assert_eq!(copy.spawned_count(), 2);
            assert!(!copy.is_error());
        }
    }

    #[test]
    fn test_display_marks_falling_unit() {
        let data = problem(3, 2, vec![dot()], vec![HexPoint::new(0, 1)], 1);
        let game = Game::new(&data, 0).expect("seed exists");
        let text = game.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], ". @ .");
        assert_eq!(lines[2], " * . .");
    }
}
