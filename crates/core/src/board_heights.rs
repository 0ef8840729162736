//! Column height profile for fast evaluation

use crate::Board;

/// Per-column top rows of a board.
///
/// `top(x)` is the first occupied row of column `x`, or `board.height()`
/// when the column is empty. Smaller means taller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightProfile {
    tops: Vec<usize>,
    board_height: usize,
}

impl HeightProfile {
    pub fn new(board: &Board) -> Self {
        let tops = (0..board.width())
            .map(|x| Self::compute_top(board, x))
            .collect();
        Self {
            tops,
            board_height: board.height(),
        }
    }

    fn compute_top(board: &Board, x: usize) -> usize {
        (0..board.height())
            .find(|&y| board.get(x, y))
            .unwrap_or(board.height())
    }

    #[inline(always)]
    pub fn top(&self, x: usize) -> usize {
        self.tops[x]
    }

    /// Stack height of column `x`, counted from the floor.
    #[inline(always)]
    pub fn height(&self, x: usize) -> usize {
        self.board_height - self.tops[x]
    }

    pub fn max_height(&self) -> usize {
        (0..self.tops.len())
            .map(|x| self.height(x))
            .max()
            .unwrap_or(0)
    }

    /// Sum of squared top differences between adjacent columns.
    pub fn roughness(&self) -> i64 {
        self.tops
            .windows(2)
            .map(|w| {
                let diff = w[0] as i64 - w[1] as i64;
                diff * diff
            })
            .sum()
    }

    /// Sum of squared column heights.
    pub fn squared_heights(&self) -> i64 {
        (0..self.tops.len())
            .map(|x| {
                let h = self.height(x) as i64;
                h * h
            })
            .sum()
    }

    #[inline(always)]
    pub fn tops(&self) -> &[usize] {
        &self.tops
    }
}
