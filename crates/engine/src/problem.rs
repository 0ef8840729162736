//! Problem records and the immutable per-problem game data.

use hexfall_core::{Board, HexPoint, Unit, UnitLocation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::placement_index::PlacementIndex;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub members: Vec<HexPoint>,
    pub pivot: HexPoint,
}

/// A problem file as published: units, board, and the source description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: i64,
    pub units: Vec<UnitRecord>,
    pub width: usize,
    pub height: usize,
    pub filled: Vec<HexPoint>,
    pub source_length: usize,
    pub source_seeds: Vec<u32>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed problem: {0}")]
    Json(#[from] serde_json::Error),
    #[error("problem has no units")]
    NoUnits,
    #[error("unit {0} has no members")]
    EmptyUnit(usize),
    #[error("invalid board size {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("filled cell {0} is outside the board")]
    FilledOutOfBounds(HexPoint),
    #[error("seed index {index} out of range ({count} seeds)")]
    SeedIndexOutOfRange { index: usize, count: usize },
    #[error("seed {0} is not in the source seeds")]
    UnknownSeed(u32),
}

/// Where a template enters the board, and how its placements are indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawn {
    pub pivot: HexPoint,
    pub index: PlacementIndex,
}

/// Everything about a problem that does not change while playing it.
#[derive(Clone, Debug)]
pub struct GameData {
    id: i64,
    units: Vec<Unit>,
    spawns: Vec<Spawn>,
    board: Board,
    source_length: usize,
    source_seeds: Vec<u32>,
}

impl GameData {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let problem: Problem = serde_json::from_str(json)?;
        Self::load(&problem)
    }

    pub fn load(problem: &Problem) -> Result<Self, LoadError> {
        let (width, height) = (problem.width, problem.height);
        if width == 0 || height == 0 {
            return Err(LoadError::InvalidDimensions { width, height });
        }
        if problem.units.is_empty() {
            return Err(LoadError::NoUnits);
        }

        let board = Board::new(width, height);
        if let Some(cell) = problem.filled.iter().find(|cell| !board.in_bounds(**cell)) {
            return Err(LoadError::FilledOutOfBounds(*cell));
        }
        let board = Board::with_filled(width, height, &problem.filled);

        let mut units = Vec::with_capacity(problem.units.len());
        let mut spawns = Vec::with_capacity(problem.units.len());
        for (i, record) in problem.units.iter().enumerate() {
            if record.members.is_empty() {
                return Err(LoadError::EmptyUnit(i));
            }
            let unit = Unit::new(record.pivot, record.members.clone());
            spawns.push(Spawn {
                pivot: spawn_pivot(&unit, width),
                index: PlacementIndex::new(&unit, width, height),
            });
            units.push(unit);
        }

        Ok(Self {
            id: problem.id,
            units,
            spawns,
            board,
            source_length: problem.source_length,
            source_seeds: problem.source_seeds.clone(),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn spawns(&self) -> &[Spawn] {
        &self.spawns
    }

    /// The initial board of every game.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn source_length(&self) -> usize {
        self.source_length
    }

    pub fn source_seeds(&self) -> &[u32] {
        &self.source_seeds
    }

    pub fn seed(&self, index: usize) -> Result<u32, LoadError> {
        self.source_seeds
            .get(index)
            .copied()
            .ok_or(LoadError::SeedIndexOutOfRange {
                index,
                count: self.source_seeds.len(),
            })
    }

    pub fn seed_index_of(&self, seed: u32) -> Result<usize, LoadError> {
        self.source_seeds
            .iter()
            .position(|&s| s == seed)
            .ok_or(LoadError::UnknownSeed(seed))
    }

    /// Placement of template `unit` as it enters the board.
    pub fn spawn_location(&self, unit: usize) -> UnitLocation<'_> {
        UnitLocation::new(&self.units[unit], self.spawns[unit].pivot, 0)
    }
}

/// Pivot that puts the template's top member on row 0, centred with the
/// leftover columns rounded towards the left.
fn spawn_pivot(unit: &Unit, width: usize) -> HexPoint {
    let top = unit.members().iter().map(|m| m.y).min().unwrap_or(0);
    let mut pivot = HexPoint::new(0, -top);

    let placed = UnitLocation::new(unit, pivot, 0);
    let min_x = placed.members().map(|m| m.x).min().unwrap_or(0);
    let max_x = placed.members().map(|m| m.x).max().unwrap_or(0);
    let unit_width = max_x - min_x + 1;
    let left = (width as i32 - unit_width).div_euclid(2);
    pivot.x += left - min_x;
    pivot
}

impl std::fmt::Display for GameData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Units:")?;
        for (i, unit) in self.units.iter().enumerate() {
            write!(f, " [{i}]: order {} spawn {} [", unit.order(), self.spawns[i].pivot)?;
            for (j, member) in unit.members().iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{member}")?;
            }
            writeln!(f, "]")?;
        }
        writeln!(f, "Board:\n{}", self.board)?;
        writeln!(f, "SourceLength: {}", self.source_length)?;
        write!(f, "SourceSeeds: {:?}", self.source_seeds)
    }
}
