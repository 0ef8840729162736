use hexfall_core::{Board, Command};
use hexfall_engine::{CancelToken, Game, SearchResult};
use hexfall_eval::reachability_map_by_any_hands;
use log::{debug, trace};

use crate::Solver;

/// Rule-based solver that works on one row at a time.
///
/// Clears a row whenever some placement can. Otherwise it picks the fullest
/// row whose empty cells some unit can still fill, and plays into that row
/// while covering as few cells above it as possible, nearest a wall first.
/// Failing that, it plays as low as it can, nearest a wall.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineTargetSolver;

impl LineTargetSolver {
    pub fn new() -> Self {
        Self
    }
}

fn wall_distance(board: &Board, x: i32) -> i32 {
    x.min(board.width() as i32 - 1 - x)
}

/// The fullest row every empty cell of which is in `reachable`. The top
/// one wins ties.
fn target_row(board: &Board, reachable: &Board) -> Option<usize> {
    let mut target = None;
    let mut best_fill = None;
    for y in 0..board.height() {
        let fill = board.row_fill(y);
        let covered = (0..board.width()).filter(|&x| reachable.get(x, y)).count();
        if fill + covered != board.width() {
            continue;
        }
        if best_fill.map_or(true, |best| fill > best) {
            target = Some(y);
            best_fill = Some(fill);
        }
    }
    target
}

/// The placement touching `target` with the fewest cells above it, then the
/// smallest wall distance within `target`. `None` if nothing touches it.
fn into_row(board: &Board, target: usize, results: &[SearchResult<'_>]) -> Option<usize> {
    let target = target as i32;
    let mut best: Option<((usize, i32), usize)> = None;
    for (i, result) in results.iter().enumerate() {
        let mut above = 0;
        let mut distance = None;
        for m in result.location.members() {
            if m.y < target {
                above += 1;
            } else if m.y == target {
                let d = wall_distance(board, m.x);
                distance = Some(distance.map_or(d, |current: i32| current.min(d)));
            }
        }
        let Some(distance) = distance else { continue };
        let key = (above, distance);
        if best.as_ref().map_or(true, |(best_key, _)| key < *best_key) {
            best = Some((key, i));
        }
    }
    best.map(|(_, i)| i)
}

/// The placement with the lowest member, then the smallest wall distance.
fn lowest(board: &Board, results: &[SearchResult<'_>]) -> Option<usize> {
    let mut best: Option<((i32, i32), usize)> = None;
    for (i, result) in results.iter().enumerate() {
        for m in result.location.members() {
            let key = (m.y, -wall_distance(board, m.x));
            if best.as_ref().map_or(true, |(best_key, _)| key > *best_key) {
                best = Some((key, i));
            }
        }
    }
    best.map(|(_, i)| i)
}

impl Solver for LineTargetSolver {
    fn next_commands(&mut self, game: &Game<'_>, cancel: &CancelToken) -> Vec<Command> {
        let mut results = game.reachable_placements_with(cancel);
        if results.is_empty() {
            return Vec::new();
        }

        if let Some(i) = results
            .iter()
            .position(|result| game.lock_preview(&result.location) > 0)
        {
            debug!("line target: clear at {}", results[i].location);
            return results.swap_remove(i).commands;
        }

        let board = game.board();
        let reachable = reachability_map_by_any_hands(game);
        trace!("reachable by any unit:\n{reachable}");
        let target = target_row(board, &reachable);
        debug!("line target: row {target:?}");

        let choice = target
            .and_then(|y| into_row(board, y, &results))
            .or_else(|| lowest(board, &results));
        match choice {
            Some(i) => results.swap_remove(i).commands,
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexfall_engine::GameData;

    fn dot_problem(width: usize, height: usize, filled: &str) -> GameData {
        GameData::from_json(&format!(
            r#"{{
                "id": 0, "width": {width}, "height": {height}, "filled": [{filled}],
                "units": [{{"members": [{{"x": 0, "y": 0}}], "pivot": {{"x": 0, "y": 0}}}}],
                "sourceLength": 2, "sourceSeeds": [0]
            }}"#
        ))
        .expect("valid problem")
    }

    #[test]
    fn test_clears_a_row_when_it_can() {
        let data = dot_problem(3, 3, r#"{"x": 0, "y": 2}, {"x": 2, "y": 2}"#);
        let mut game = Game::new(&data, 0).expect("seed exists");
        let commands = LineTargetSolver::new().next_commands(&game, &CancelToken::new());
        game.run_sequence(&commands);
        assert_eq!(game.score(), 101);
    }

    #[test]
    fn test_fills_the_fullest_row_it_can_complete() {
        // Row 4 has (1, 4) sealed under (0, 3) and (1, 3), so it cannot be
        // completed even though its (3, 4) is the lowest reachable cell.
        // Row 3 can: both of its empty cells are open.
        let data = dot_problem(
            4,
            5,
            r#"{"x": 0, "y": 4}, {"x": 2, "y": 4}, {"x": 0, "y": 3}, {"x": 1, "y": 3}"#,
        );
        let game = Game::new(&data, 0).expect("seed exists");
        let reachable = reachability_map_by_any_hands(&game);
        assert!(!reachable.get(1, 4));
        assert!(reachable.get(3, 4));
        assert_eq!(target_row(game.board(), &reachable), Some(3));

        let commands = LineTargetSolver::new().next_commands(&game, &CancelToken::new());
        let mut played = game.clone();
        played.run_sequence(&commands);
        assert!(played.board().get(3, 3));
        assert!(!played.board().get(3, 4));
    }

    #[test]
    fn test_falls_back_to_the_lowest_placement() {
        let data = dot_problem(4, 5, "");
        let game = Game::new(&data, 0).expect("seed exists");
        let results = game.reachable_placements();
        // On an empty board the fallback goes to the floor by a wall.
        let i = lowest(game.board(), &results).expect("placements exist");
        let m = results[i].location.members().next().expect("one member");
        assert_eq!(m.y, 4);
        assert!(m.x == 0 || m.x == 3);
    }

    #[test]
    fn test_finished_game_yields_nothing() {
        let data = dot_problem(2, 2, r#"{"x": 0, "y": 0}, {"x": 1, "y": 0}"#);
        let game = Game::new(&data, 0).expect("seed exists");
        assert!(LineTargetSolver::new()
            .next_commands(&game, &CancelToken::new())
            .is_empty());
    }
}
