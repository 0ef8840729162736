//! Dense indexing of placements for visited tables.

use hexfall_core::{HexPoint, Unit, UnitLocation};

/// Maps `(pivot, angle)` of one template on one board to a dense index.
///
/// The pivot range is the board widened by `margin` on every side, where
/// `margin` exceeds the template's reach. Any placement whose members all
/// lie on the board therefore has an index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementIndex {
    margin: i32,
    cols: i32,
    rows: i32,
    order: u8,
}

impl PlacementIndex {
    pub fn new(unit: &Unit, width: usize, height: usize) -> Self {
        // +1 for the row-parity skew, +1 spare.
        let margin = unit.reach() + 2;
        Self {
            margin,
            cols: width as i32 + 2 * margin,
            rows: height as i32 + 2 * margin,
            order: unit.order(),
        }
    }

    #[inline]
    pub fn margin(&self) -> i32 {
        self.margin
    }

    /// Size of a table covering every index.
    pub fn len(&self) -> usize {
        self.cols as usize * self.rows as usize * self.order as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `None` when the pivot lies outside the widened board.
    #[inline]
    pub fn index(&self, pivot: HexPoint, angle: u8) -> Option<usize> {
        let col = pivot.x + self.margin;
        let row = pivot.y + self.margin;
        if col < 0 || row < 0 || col >= self.cols || row >= self.rows {
            return None;
        }
        let cell = col as usize * self.rows as usize + row as usize;
        Some(cell * self.order as usize + (angle % self.order) as usize)
    }

    #[inline]
    pub fn of(&self, loc: &UnitLocation<'_>) -> Option<usize> {
        self.index(loc.pivot(), loc.angle())
    }
}

/// Visited table over a [`PlacementIndex`].
#[derive(Clone, Debug)]
pub struct PlacementSet {
    index: PlacementIndex,
    seen: Vec<bool>,
}

impl PlacementSet {
    pub fn new(index: PlacementIndex) -> Self {
        Self {
            index,
            seen: vec![false; index.len()],
        }
    }

    /// Mark `loc`; true if it was not marked before. Unindexable placements
    /// are never inserted.
    pub fn insert(&mut self, loc: &UnitLocation<'_>) -> bool {
        match self.index.of(loc) {
            Some(i) if !self.seen[i] => {
                self.seen[i] = true;
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, loc: &UnitLocation<'_>) -> bool {
        self.index.of(loc).is_some_and(|i| self.seen[i])
    }
}
