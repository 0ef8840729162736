//! Reachable-placement generation for the falling unit.

use std::collections::VecDeque;

use hexfall_core::{Board, Command, HexPoint, UnitLocation};

use crate::cancel::CancelToken;
use crate::placement_index::{PlacementIndex, PlacementSet};

/// A placement where the unit can come to rest, and the commands that get
/// it there from the start placement. The last command is the one that
/// locks it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult<'a> {
    pub location: UnitLocation<'a>,
    pub commands: Vec<Command>,
}

/// Placement after applying `command`. `Ignored` leaves it unchanged.
pub fn next_location<'a>(loc: &UnitLocation<'a>, command: Command) -> UnitLocation<'a> {
    let mut next = *loc;
    match command {
        Command::East => next.move_east(),
        Command::West => next.move_west(),
        Command::SouthEast => next.move_south_east(),
        Command::SouthWest => next.move_south_west(),
        Command::RotateClockwise => next.rotate_cw(),
        Command::RotateCounterClockwise => next.rotate_ccw(),
        Command::Ignored => {}
    }
    next
}

/// First command, in [`Command::MOVES`] order, that would lock `loc`.
pub fn lock_command(board: &Board, loc: &UnitLocation<'_>) -> Option<Command> {
    Command::MOVES
        .into_iter()
        .find(|&command| board.is_conflicting(&next_location(loc, command)))
}

#[derive(Clone, Copy)]
struct Node<'a> {
    loc: UnitLocation<'a>,
    parent: usize,
    command: Command,
}

const ROOT: usize = usize::MAX;

/// Breadth-first search over every placement reachable from `start`.
///
/// `visited` holds `(pivot, angle)` pairs the unit has already occupied;
/// they are never entered again. Each reachable placement is reported at
/// most once, with the shortest command path found to it. Returns early
/// with what it has if `cancel` asks to stop.
pub fn reachable_placements<'a>(
    board: &Board,
    start: UnitLocation<'a>,
    index: &PlacementIndex,
    visited: impl IntoIterator<Item = (HexPoint, u8)>,
    cancel: &CancelToken,
) -> Vec<SearchResult<'a>> {
    let mut results = Vec::new();
    let mut seen = PlacementSet::new(*index);
    for (pivot, angle) in visited {
        seen.insert(&UnitLocation::new(start.unit(), pivot, angle));
    }
    seen.insert(&start);

    if let Some(command) = lock_command(board, &start) {
        results.push(SearchResult {
            location: start,
            commands: vec![command],
        });
    }

    let mut nodes = vec![Node {
        loc: start,
        parent: ROOT,
        command: Command::Ignored,
    }];
    let mut queue = VecDeque::new();
    queue.push_back(0usize);

    while let Some(id) = queue.pop_front() {
        if cancel.should_stop() {
            break;
        }
        let loc = nodes[id].loc;
        for command in Command::MOVES {
            let next = next_location(&loc, command);
            if board.is_conflicting(&next) || !seen.insert(&next) {
                continue;
            }
            let next_id = nodes.len();
            nodes.push(Node {
                loc: next,
                parent: id,
                command,
            });
            queue.push_back(next_id);

            if let Some(lock) = lock_command(board, &next) {
                let mut commands = path_to(&nodes, next_id);
                commands.push(lock);
                results.push(SearchResult {
                    location: next,
                    commands,
                });
            }
        }
    }

    results
}

fn path_to(nodes: &[Node<'_>], mut id: usize) -> Vec<Command> {
    let mut path = Vec::new();
    while nodes[id].parent != ROOT {
        path.push(nodes[id].command);
        id = nodes[id].parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexfall_core::Unit;

    fn dot() -> Unit {
        Unit::new(HexPoint::new(0, 0), vec![HexPoint::new(0, 0)])
    }

    fn search<'a>(board: &Board, start: UnitLocation<'a>) -> Vec<SearchResult<'a>> {
        let index = PlacementIndex::new(start.unit(), board.width(), board.height());
        reachable_placements(board, start, &index, [], &CancelToken::new())
    }

    #[test]
    fn test_next_location_moves_pivot() {
        let unit = dot();
        let loc = UnitLocation::new(&unit, HexPoint::new(2, 2), 0);
        assert_eq!(
            next_location(&loc, Command::SouthEast).pivot(),
            HexPoint::new(2, 3)
        );
        assert_eq!(
            next_location(&loc, Command::SouthWest).pivot(),
            HexPoint::new(1, 3)
        );
        assert_eq!(next_location(&loc, Command::Ignored), loc);
    }

    #[test]
    fn test_lock_command_prefers_move_order() {
        let unit = dot();
        let board = Board::new(3, 3);
        // Against the east wall, East is the first locking command.
        let east_edge = UnitLocation::new(&unit, HexPoint::new(2, 0), 0);
        assert_eq!(lock_command(&board, &east_edge), Some(Command::East));
        // A lone dot can never be locked by rotating.
        let centre = UnitLocation::new(&unit, HexPoint::new(1, 1), 0);
        assert_eq!(lock_command(&board, &centre), None);
    }

    #[test]
    fn test_every_cell_reachable_on_open_board() {
        let unit = dot();
        let board = Board::new(3, 3);
        let start = UnitLocation::new(&unit, HexPoint::new(1, 0), 0);
        let results = search(&board, start);

        // Row 0 cannot be left northwards, so only (1, 0) and (1, 1) have
        // all four neighbours free.
        assert_eq!(results.len(), 7);
        assert!(results
            .iter()
            .all(|r| r.location.pivot() != HexPoint::new(1, 1)
                && r.location.pivot() != HexPoint::new(1, 0)));
    }

    #[test]
    fn test_start_is_reported_first_when_lockable() {
        let unit = dot();
        let board = Board::new(3, 3);
        let start = UnitLocation::new(&unit, HexPoint::new(0, 0), 0);
        let results = search(&board, start);
        assert_eq!(results[0].location, start);
        assert_eq!(results[0].commands.len(), 1);
    }

    #[test]
    fn test_paths_replay_to_their_placement() {
        let unit = Unit::new(
            HexPoint::new(0, 0),
            vec![HexPoint::new(0, 0), HexPoint::new(1, 0)],
        );
        let board = Board::with_filled(6, 6, &[HexPoint::new(0, 5), HexPoint::new(3, 4)]);
        let start = UnitLocation::new(&unit, HexPoint::new(2, 0), 0);
        for result in search(&board, start) {
            let (lock, path) = result.commands.split_last().expect("lock command");
            let mut loc = start;
            for &command in path {
                loc = next_location(&loc, command);
                assert!(!board.is_conflicting(&loc));
            }
            assert_eq!(loc, result.location);
            assert!(board.is_conflicting(&next_location(&loc, *lock)));
        }
    }

    #[test]
    fn test_results_are_unique_and_legal() {
        let unit = Unit::new(
            HexPoint::new(1, 0),
            vec![HexPoint::new(0, 0), HexPoint::new(1, 0), HexPoint::new(2, 0)],
        );
        let board = Board::with_filled(7, 7, &[HexPoint::new(3, 6), HexPoint::new(4, 5)]);
        let start = UnitLocation::new(&unit, HexPoint::new(3, 0), 0);
        let results = search(&board, start);
        assert!(!results.is_empty());
        for (i, a) in results.iter().enumerate() {
            assert!(!board.is_conflicting(&a.location));
            for b in &results[i + 1..] {
                assert_ne!(a.location, b.location);
            }
        }
    }

    #[test]
    fn test_visited_placements_are_not_entered() {
        let unit = dot();
        let board = Board::new(3, 3);
        let start = UnitLocation::new(&unit, HexPoint::new(1, 1), 0);
        let index = PlacementIndex::new(&unit, 3, 3);
        let visited = [(HexPoint::new(2, 1), 0)];
        let results =
            reachable_placements(&board, start, &index, visited, &CancelToken::new());
        assert!(!results.is_empty());
        for result in &results {
            assert_ne!(result.location.pivot(), HexPoint::new(2, 1));
            let mut loc = start;
            for &command in &result.commands[..result.commands.len() - 1] {
                loc = next_location(&loc, command);
                assert_ne!(loc.pivot(), HexPoint::new(2, 1));
            }
        }
    }

    #[test]
    fn test_cancelled_search_stops_at_first_pop() {
        let unit = dot();
        let board = Board::new(5, 5);
        let start = UnitLocation::new(&unit, HexPoint::new(4, 0), 0);
        let index = PlacementIndex::new(&unit, 5, 5);
        let cancel = CancelToken::new();
        cancel.request_stop();
        let results = reachable_placements(&board, start, &index, [], &cancel);
        // Only the immediately lockable start survives.
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].location, start);
    }
}
