//! Board features shared by the heuristic scorers.

use hexfall_core::{Board, HeightProfile};

use crate::reachability::dot_reachability_from_top;

/// Raw feature counts of one board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Features {
    /// Sum of squared top differences between adjacent columns.
    pub height_diff: i64,
    /// Sum of squared column heights.
    pub height_sq: i64,
    /// Empty cells at or below each column's top.
    pub shade: i64,
    /// Empty cells weighted by the square of their depth under the top.
    pub shade_depth: i64,
    /// Filled cells at or below each column's top.
    pub block: i64,
    /// Empty cells strictly below each column's top.
    pub holes: i64,
    /// Empty cells no path from the top row reaches.
    pub unreachable: i64,
}

impl Features {
    pub fn of(board: &Board) -> Self {
        let profile = HeightProfile::new(board);
        let mut features = Self {
            height_diff: profile.roughness(),
            height_sq: profile.squared_heights(),
            ..Self::default()
        };

        for x in 0..board.width() {
            let top = profile.top(x);
            for y in top..board.height() {
                if board.get(x, y) {
                    features.block += 1;
                    continue;
                }
                let depth = (y - top) as i64;
                features.shade += 1;
                features.shade_depth += depth * depth;
                if y > top {
                    features.holes += 1;
                }
            }
        }

        let empty = board.width() * board.height() - board.filled_count();
        features.unreachable = (empty - dot_reachability_from_top(board)) as i64;
        features
    }
}

impl std::fmt::Display for Features {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "height_diff:{} height_sq:{} shade:{}({}) block:{} holes:{} unreachable:{}",
            self.height_diff,
            self.height_sq,
            self.shade,
            self.shade_depth,
            self.block,
            self.holes,
            self.unreachable
        )
    }
}

/// First occupied row of every column, `board.height()` for empty ones.
pub fn height_line(board: &Board) -> Vec<usize> {
    HeightProfile::new(board).tops().to_vec()
}

/// Sum of squared differences between adjacent entries of a height line.
pub fn height_penalty(line: &[usize]) -> i64 {
    line.windows(2)
        .map(|w| {
            let diff = w[0] as i64 - w[1] as i64;
            diff * diff
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexfall_core::HexPoint;

    #[test]
    fn test_empty_board_has_no_features() {
        let board = Board::new(5, 5);
        assert_eq!(Features::of(&board), Features::default());
        assert_eq!(height_line(&board), vec![5; 5]);
    }

    #[test]
    fn test_covered_cells_are_shade() {
        // Column 1: filled at row 2, empty at 3 and 4.
        let board = Board::with_filled(3, 5, &[HexPoint::new(1, 2), HexPoint::new(2, 4)]);
        let features = Features::of(&board);
        assert_eq!(features.shade, 2);
        assert_eq!(features.holes, 2);
        assert_eq!(features.shade_depth, 1 + 4);
        assert_eq!(features.block, 2);
    }

    #[test]
    fn test_height_penalty_matches_profile() {
        let board = Board::with_filled(4, 6, &[HexPoint::new(1, 4), HexPoint::new(3, 2)]);
        let line = height_line(&board);
        assert_eq!(line, vec![6, 4, 6, 2]);
        assert_eq!(height_penalty(&line), 4 + 4 + 16);
        assert_eq!(Features::of(&board).height_diff, height_penalty(&line));
    }

    #[test]
    fn test_sealed_pocket_is_unreachable() {
        // (1, 4) is boxed in by (0, 4), (2, 4), (0, 3) and (1, 3).
        let open = Board::with_filled(
            4,
            5,
            &[HexPoint::new(0, 4), HexPoint::new(2, 4), HexPoint::new(0, 3)],
        );
        assert_eq!(Features::of(&open).unreachable, 0);

        let mut sealed = open.clone();
        sealed.set(1, 3, true);
        assert_eq!(Features::of(&sealed).unreachable, 1);
    }
}
