//! Which empty cells can still be filled.

use std::collections::VecDeque;

use hexfall_core::{Board, HexPoint};
use hexfall_engine::{reachable_placements, CancelToken, Game};

/// Cells a single-cell unit could reach: a flood fill over the six hex
/// neighbours through empty cells, seeded with the empty cells of row 0.
pub fn dot_reachability_map(board: &Board) -> Board {
    let mut reached = Board::new(board.width(), board.height());
    let mut queue = VecDeque::new();
    for x in 0..board.width() {
        if !board.get(x, 0) {
            reached.set(x, 0, true);
            queue.push_back(HexPoint::new(x as i32, 0));
        }
    }

    while let Some(p) = queue.pop_front() {
        for n in p.neighbors() {
            if board.in_bounds(n) && !board.get_point(n) && !reached.get_point(n) {
                reached.set(n.x as usize, n.y as usize, true);
                queue.push_back(n);
            }
        }
    }
    reached
}

/// Number of empty cells reachable from the top of the board.
pub fn dot_reachability_from_top(board: &Board) -> usize {
    dot_reachability_map(board).filled_count()
}

/// Union of the cells covered by any lockable placement of any template,
/// each entering from its spawn on the game's current board.
pub fn reachability_map_by_any_hands(game: &Game<'_>) -> Board {
    let board = game.board();
    let data = game.data();
    let cancel = CancelToken::new();
    let mut reached = Board::new(board.width(), board.height());

    for (i, spawn) in data.spawns().iter().enumerate() {
        let start = data.spawn_location(i);
        if board.is_conflicting(&start) {
            continue;
        }
        for result in reachable_placements(board, start, &spawn.index, [], &cancel) {
            for m in result.location.members() {
                if !reached.get_point(m) {
                    reached.set(m.x as usize, m.y as usize, true);
                }
            }
        }
    }
    reached
}
