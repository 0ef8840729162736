//! perft - counts the leaves of the placement tree, for movegen verification

use rayon::prelude::*;

use crate::game::Game;

/// Number of distinct lock sequences `depth` units deep. A game that
/// finishes early counts as a single leaf.
pub fn perft(game: &Game<'_>, depth: u32) -> u64 {
    if depth == 0 || game.is_finished() {
        return 1;
    }

    let mut total = 0;
    for result in game.reachable_placements() {
        let mut next = game.clone();
        if next.run_sequence(&result.commands) || next.is_finished() {
            total += perft(&next, depth - 1);
        }
    }
    total
}

/// Parallel perft - splits the first unit's placements across threads
pub fn perft_parallel(game: &Game<'_>, depth: u32) -> u64 {
    if depth <= 1 || game.is_finished() {
        return perft(game, depth);
    }

    game.reachable_placements()
        .par_iter()
        .map(|result| {
            let mut next = game.clone();
            if next.run_sequence(&result.commands) || next.is_finished() {
                perft(&next, depth - 1)
            } else {
                0
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::GameData;

    const DOT_3X3: &str = r#"{
        "id": 0, "width": 3, "height": 3, "filled": [],
        "units": [{"members": [{"x": 0, "y": 0}], "pivot": {"x": 0, "y": 0}}],
        "sourceLength": 4, "sourceSeeds": [0]
    }"#;

    #[test]
    fn test_depth_0_returns_1() {
        let data = GameData::from_json(DOT_3X3).expect("valid problem");
        let game = Game::new(&data, 0).expect("seed exists");
        assert_eq!(perft(&game, 0), 1);
    }

    #[test]
    fn test_depth_1_counts_lockable_cells() {
        let data = GameData::from_json(DOT_3X3).expect("valid problem");
        let game = Game::new(&data, 0).expect("seed exists");
        // Every cell but the two centre-column cells of rows 0 and 1.
        assert_eq!(perft(&game, 1), 7);
    }

    #[test]
    fn test_parallel_matches_baseline() {
        let data = GameData::from_json(DOT_3X3).expect("valid problem");
        let game = Game::new(&data, 0).expect("seed exists");
        for depth in 1..=3 {
            assert_eq!(perft_parallel(&game, depth), perft(&game, depth));
        }
    }
}
