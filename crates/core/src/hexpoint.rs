//! Offset-coordinate hex points.
//!
//! Odd rows are shifted half a cell to the east, so the neighbours of a cell
//! depend on the parity of its row. Rotations go through cube coordinates.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A cell position `(x, y)` where `y` is the row (growing downwards).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub struct HexPoint {
    pub x: i32,
    pub y: i32,
}

impl HexPoint {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    #[inline(always)]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    fn is_odd_row(self) -> bool {
        self.y & 1 == 1
    }

    pub fn east(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    pub fn west(self) -> Self {
        Self::new(self.x - 1, self.y)
    }

    pub fn south_east(self) -> Self {
        if self.is_odd_row() {
            Self::new(self.x + 1, self.y + 1)
        } else {
            Self::new(self.x, self.y + 1)
        }
    }

    pub fn south_west(self) -> Self {
        if self.is_odd_row() {
            Self::new(self.x, self.y + 1)
        } else {
            Self::new(self.x - 1, self.y + 1)
        }
    }

    pub fn north_east(self) -> Self {
        if self.is_odd_row() {
            Self::new(self.x + 1, self.y - 1)
        } else {
            Self::new(self.x, self.y - 1)
        }
    }

    pub fn north_west(self) -> Self {
        if self.is_odd_row() {
            Self::new(self.x, self.y - 1)
        } else {
            Self::new(self.x - 1, self.y - 1)
        }
    }

    /// The six neighbours, clockwise starting from east.
    pub fn neighbors(self) -> [Self; 6] {
        [
            self.east(),
            self.south_east(),
            self.south_west(),
            self.west(),
            self.north_west(),
            self.north_east(),
        ]
    }

    /// Rotate 60 degrees clockwise around the origin.
    pub fn rotate_cw(self) -> Self {
        let (cx, cy, cz) = self.to_cube();
        Self::from_cube(-cz, -cx, -cy)
    }

    /// Rotate 60 degrees counter-clockwise around the origin.
    pub fn rotate_ccw(self) -> Self {
        let (cx, cy, cz) = self.to_cube();
        Self::from_cube(-cy, -cz, -cx)
    }

    /// Translate as if `pivot` moved to the origin.
    pub fn translate_to_origin(self, pivot: Self) -> Self {
        let mut moved = self - pivot;
        moved.x -= pivot.y & moved.y & 1;
        moved
    }

    /// Translate as if the origin moved to `pivot`.
    pub fn translate_from_origin(self, pivot: Self) -> Self {
        let mut moved = self + pivot;
        moved.x += pivot.y & self.y & 1;
        moved
    }

    pub fn rotate_cw_around(self, pivot: Self) -> Self {
        self.translate_to_origin(pivot)
            .rotate_cw()
            .translate_from_origin(pivot)
    }

    pub fn rotate_ccw_around(self, pivot: Self) -> Self {
        self.translate_to_origin(pivot)
            .rotate_ccw()
            .translate_from_origin(pivot)
    }

    // (x - (y - (y & 1)) / 2) is exact: the numerator is always even.
    #[inline]
    fn to_cube(self) -> (i32, i32, i32) {
        let cx = self.x - (self.y - (self.y & 1)) / 2;
        let cz = self.y;
        (cx, -cx - cz, cz)
    }

    #[inline]
    fn from_cube(cx: i32, _cy: i32, cz: i32) -> Self {
        Self::new(cx + (cz - (cz & 1)) / 2, cz)
    }
}

/// Canonical order: row first, then column.
impl Ord for HexPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for HexPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for HexPoint {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for HexPoint {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl AddAssign for HexPoint {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl SubAssign for HexPoint {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl std::fmt::Display for HexPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> HexPoint {
        HexPoint::new(x, y)
    }

    #[test]
    fn test_rotate_around_origin() {
        assert_eq!(p(2, 0).rotate_cw(), p(1, 2));
        assert_eq!(p(1, 2).rotate_ccw(), p(2, 0));
        assert_eq!(p(2, 2).rotate_cw(), p(-1, 3));
        assert_eq!(p(-1, -1).rotate_cw(), p(0, -1));
    }

    #[test]
    fn test_rotate_around_pivot() {
        assert_eq!(p(4, 5).rotate_cw_around(p(2, 4)), p(2, 7));
        assert_eq!(p(4, 5).rotate_cw_around(p(2, 3)), p(2, 6));
    }

    #[test]
    fn test_rotate_ring_even_pivot() {
        let pivot = p(2, 2);
        let ring = [p(1, 1), p(2, 1), p(3, 2), p(2, 3), p(1, 3), p(1, 2)];
        for i in 0..ring.len() {
            assert_eq!(ring[i].rotate_cw_around(pivot), ring[(i + 1) % 6]);
        }
        let outer = [p(1, 0), p(3, 0), p(4, 2), p(3, 4), p(1, 4), p(0, 2)];
        for i in 0..outer.len() {
            assert_eq!(outer[i].rotate_cw_around(pivot), outer[(i + 1) % 6]);
        }
    }

    #[test]
    fn test_rotate_ring_odd_pivot() {
        let pivot = p(2, 3);
        let ring = [p(2, 2), p(3, 2), p(3, 3), p(3, 4), p(2, 4), p(1, 3)];
        for i in 0..ring.len() {
            assert_eq!(ring[i].rotate_cw_around(pivot), ring[(i + 1) % 6]);
        }
        let outer = [p(2, 1), p(4, 2), p(4, 4), p(2, 5), p(1, 4), p(1, 2)];
        for i in 0..outer.len() {
            assert_eq!(outer[i].rotate_cw_around(pivot), outer[(i + 1) % 6]);
        }
    }

    #[test]
    fn test_neighbors_even_and_odd_rows() {
        assert_eq!(p(2, 2).south_east(), p(2, 3));
        assert_eq!(p(2, 2).south_west(), p(1, 3));
        assert_eq!(p(2, 3).south_east(), p(3, 4));
        assert_eq!(p(2, 3).south_west(), p(2, 4));
        assert_eq!(p(2, 2).north_west(), p(1, 1));
        assert_eq!(p(2, 3).north_east(), p(3, 2));
    }

    #[test]
    fn test_moves_are_inverse() {
        for y in -3..4 {
            for x in -3..4 {
                let q = p(x, y);
                assert_eq!(q.east().west(), q);
                assert_eq!(q.south_east().north_west(), q);
                assert_eq!(q.south_west().north_east(), q);
            }
        }
    }

    #[test]
    fn test_canonical_order() {
        let mut points = vec![p(3, 1), p(0, 2), p(1, 1), p(5, 0)];
        points.sort();
        assert_eq!(points, vec![p(5, 0), p(1, 1), p(3, 1), p(0, 2)]);
    }
}
