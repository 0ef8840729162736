//! Piece templates and their placements on the board.

use crate::HexPoint;

/// A piece template: member offsets relative to the pivot at the origin.
///
/// Members are kept in canonical (row, column) order, and the offsets for
/// every distinct rotation are precomputed so that a placement never has to
/// own or rotate a member list itself.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Unit {
    members: Vec<HexPoint>,
    order: u8,
    rotations: Vec<Vec<HexPoint>>,
}

impl Unit {
    /// Build a template from absolute `members` around `pivot`.
    pub fn new(pivot: HexPoint, members: Vec<HexPoint>) -> Self {
        let mut members: Vec<HexPoint> = members
            .into_iter()
            .map(|member| member.translate_to_origin(pivot))
            .collect();
        members.sort();

        let order = rotation_order(&members);
        let mut rotations = Vec::with_capacity(order as usize);
        let mut rotated = members.clone();
        for _ in 0..order {
            rotations.push(rotated.clone());
            for point in &mut rotated {
                *point = point.rotate_cw();
            }
        }

        Self {
            members,
            order,
            rotations,
        }
    }

    /// Origin-relative members in canonical order.
    #[inline]
    pub fn members(&self) -> &[HexPoint] {
        &self.members
    }

    /// Rotational period: 1, 2, 3 or 6.
    #[inline]
    pub fn order(&self) -> u8 {
        self.order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Origin-relative members after `angle` clockwise steps.
    #[inline]
    pub fn rotated(&self, angle: u8) -> &[HexPoint] {
        &self.rotations[(angle % self.order) as usize]
    }

    /// Largest |dx| or |dy| of any member over every rotation.
    pub fn reach(&self) -> i32 {
        self.rotations
            .iter()
            .flatten()
            .map(|p| p.x.abs().max(p.y.abs()))
            .max()
            .unwrap_or(0)
    }
}

// Members must be sorted and origin-centred.
fn rotation_order(members: &[HexPoint]) -> u8 {
    let mut moved = members.to_vec();
    for i in 0..3u8 {
        for point in &mut moved {
            *point = point.rotate_ccw();
        }
        moved.sort();
        if moved == members {
            return i + 1;
        }
    }
    6
}

/// A placement of a [`Unit`]: pivot position plus rotation index.
///
/// Cheap to copy; the shape stays with the template.
#[derive(Clone, Copy, Debug)]
pub struct UnitLocation<'a> {
    unit: &'a Unit,
    pivot: HexPoint,
    angle: u8,
}

impl<'a> UnitLocation<'a> {
    pub fn new(unit: &'a Unit, pivot: HexPoint, angle: u8) -> Self {
        Self {
            unit,
            pivot,
            angle: angle % unit.order(),
        }
    }

    #[inline]
    pub fn unit(&self) -> &'a Unit {
        self.unit
    }

    #[inline]
    pub fn pivot(&self) -> HexPoint {
        self.pivot
    }

    #[inline]
    pub fn angle(&self) -> u8 {
        self.angle
    }

    /// Occupied cells, computed on each call.
    pub fn members(&self) -> impl Iterator<Item = HexPoint> + 'a {
        let pivot = self.pivot;
        self.unit
            .rotated(self.angle)
            .iter()
            .map(move |offset| offset.translate_from_origin(pivot))
    }

    pub fn shift(&mut self, dx: i32) {
        self.pivot.x += dx;
    }

    pub fn move_east(&mut self) {
        self.pivot = self.pivot.east();
    }

    pub fn move_west(&mut self) {
        self.pivot = self.pivot.west();
    }

    pub fn move_south_east(&mut self) {
        self.pivot = self.pivot.south_east();
    }

    pub fn move_south_west(&mut self) {
        self.pivot = self.pivot.south_west();
    }

    pub fn rotate_cw(&mut self) {
        self.angle = (self.angle + 1) % self.unit.order();
    }

    pub fn rotate_ccw(&mut self) {
        let order = self.unit.order();
        self.angle = (self.angle + order - 1) % order;
    }
}

impl PartialEq for UnitLocation<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.unit, other.unit)
            && self.pivot == other.pivot
            && self.angle == other.angle
    }
}

impl Eq for UnitLocation<'_> {}

impl std::fmt::Display for UnitLocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.pivot, self.angle)
    }
}
