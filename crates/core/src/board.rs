//! board representation - flat row-major cells plus per-row fill counts
//! row counts are maintained on every set so full-row checks are O(1)

use smallvec::SmallVec;

use crate::{HexPoint, UnitLocation};

/// Hex board. Row 0 is the top; gravity pulls towards larger row indices.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    row_fill: Vec<u32>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
            row_fill: vec![0; height],
        }
    }

    /// Board with the given cells pre-filled. Out-of-range cells are skipped.
    pub fn with_filled(width: usize, height: usize, filled: &[HexPoint]) -> Self {
        let mut board = Self::new(width, height);
        for cell in filled {
            if board.in_bounds(*cell) {
                board.set(cell.x as usize, cell.y as usize, true);
            }
        }
        board
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn in_bounds(&self, p: HexPoint) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    /// Out-of-range points read as empty.
    #[inline]
    pub fn get_point(&self, p: HexPoint) -> bool {
        self.in_bounds(p) && self.get(p.x as usize, p.y as usize)
    }

    pub fn set(&mut self, x: usize, y: usize, filled: bool) {
        let cell = &mut self.cells[y * self.width + x];
        if *cell != filled {
            *cell = filled;
            if filled {
                self.row_fill[y] += 1;
            } else {
                self.row_fill[y] -= 1;
            }
        }
    }

    #[inline]
    pub fn row_fill(&self, y: usize) -> usize {
        self.row_fill[y] as usize
    }

    #[inline]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row_fill[y] as usize == self.width
    }

    pub fn filled_count(&self) -> usize {
        self.row_fill.iter().map(|&n| n as usize).sum()
    }

    /// True if any member is off the board or on an occupied cell.
    pub fn is_conflicting(&self, loc: &UnitLocation<'_>) -> bool {
        loc.members().any(|p| !self.in_bounds(p) || self.get(p.x as usize, p.y as usize))
    }

    /// Commit `loc` and clear full rows. Returns the number of rows cleared.
    ///
    /// `loc` must not conflict with the board.
    pub fn lock(&mut self, loc: &UnitLocation<'_>) -> u32 {
        for p in loc.members() {
            debug_assert!(self.in_bounds(p), "locking out of bounds at {p}");
            self.set(p.x as usize, p.y as usize, true);
        }
        self.clear_full_rows()
    }

    /// Rows `lock(loc)` would clear, without touching the board.
    pub fn lock_preview(&self, loc: &UnitLocation<'_>) -> u32 {
        let mut covered: SmallVec<[(usize, u32); 8]> = SmallVec::new();
        for p in loc.members() {
            if !self.in_bounds(p) {
                continue;
            }
            let y = p.y as usize;
            match covered.iter_mut().find(|(row, _)| *row == y) {
                Some((_, count)) => *count += 1,
                None => covered.push((y, 1)),
            }
        }

        let mut cleared = 0;
        for y in 0..self.height {
            let extra = covered
                .iter()
                .find(|(row, _)| *row == y)
                .map_or(0, |&(_, count)| count);
            if (self.row_fill[y] + extra) as usize == self.width {
                cleared += 1;
            }
        }
        cleared
    }

    /// Remove every full row, dropping the rows above it. Returns rows removed.
    pub fn clear_lines(&mut self) -> u32 {
        self.clear_full_rows()
    }

    fn clear_full_rows(&mut self) -> u32 {
        let width = self.width;
        let mut write = self.height;
        for read in (0..self.height).rev() {
            if self.row_fill[read] as usize == width {
                continue;
            }
            write -= 1;
            if write != read {
                self.cells
                    .copy_within(read * width..(read + 1) * width, write * width);
                self.row_fill[write] = self.row_fill[read];
            }
        }
        let cleared = write;
        self.cells[..cleared * width].fill(false);
        self.row_fill[..cleared].fill(0);
        cleared as u32
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.height {
            if y & 1 == 1 {
                write!(f, " ")?;
            }
            for x in 0..self.width {
                write!(f, "{}", if self.get(x, y) { '*' } else { '.' })?;
                if x + 1 < self.width {
                    write!(f, " ")?;
                }
            }
            if y + 1 < self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
