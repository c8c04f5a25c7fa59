//! Cell geometry — integer grid coordinates, footprint sizes, and rects.
//!
//! Coordinates use the x/z plane convention (y would be vertical layers,
//! which this subsystem does not model).  All types are small `Copy` values.

use std::fmt;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// One grid cell.  Signed so rects near the map origin never underflow.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    #[inline]
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The cell `dx`/`dz` steps away.
    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Cell {
        Cell { x: self.x + dx, z: self.z + dz }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

// ── Size ──────────────────────────────────────────────────────────────────────

/// Footprint extents of an agent class, in cells.  Both extents are ≥ 1;
/// `Size::unit()` is the common single-cell case.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub x: u16,
    pub z: u16,
}

impl Size {
    #[inline]
    pub fn new(x: u16, z: u16) -> Self {
        debug_assert!(x >= 1 && z >= 1, "footprint extents must be >= 1");
        Self { x, z }
    }

    /// The 1×1 footprint.
    #[inline]
    pub fn unit() -> Self {
        Self { x: 1, z: 1 }
    }

    #[inline]
    pub fn area(self) -> u32 {
        self.x as u32 * self.z as u32
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.z)
    }
}

// ── Rot ───────────────────────────────────────────────────────────────────────

/// Facing of a placed agent.  East/West swap the footprint extents.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rot {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rot {
    /// `size` as seen from this facing — x/z extents swap for East/West.
    #[inline]
    pub fn rotated(self, size: Size) -> Size {
        match self {
            Rot::North | Rot::South => size,
            Rot::East | Rot::West => Size { x: size.z, z: size.x },
        }
    }
}

// ── CellRect ──────────────────────────────────────────────────────────────────

/// An inclusive axis-aligned rectangle of cells.  `min <= max` on both axes
/// by construction, so a rect always contains at least one cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRect {
    pub min: Cell,
    pub max: Cell,
}

impl CellRect {
    /// A single-cell rect.
    #[inline]
    pub fn single(cell: Cell) -> Self {
        Self { min: cell, max: cell }
    }

    /// The cells occupied by an agent at `center` with the given footprint
    /// and facing.
    ///
    /// Even extents cannot center exactly on one cell; the extra cell goes
    /// toward `max` (min gets the smaller half), so a 2×2 footprint at (0,0)
    /// spans (0,0)..(1,1).  Every caller that draws, claims, or path-checks
    /// a footprint must go through this one function so they all agree.
    pub fn footprint(center: Cell, size: Size, rot: Rot) -> Self {
        let s = rot.rotated(size);
        let min = Cell {
            x: center.x - (s.x as i32 - 1) / 2,
            z: center.z - (s.z as i32 - 1) / 2,
        };
        let max = Cell {
            x: min.x + s.x as i32 - 1,
            z: min.z + s.z as i32 - 1,
        };
        Self { min, max }
    }

    #[inline]
    pub fn width(self) -> u32 {
        (self.max.x - self.min.x + 1) as u32
    }

    #[inline]
    pub fn depth(self) -> u32 {
        (self.max.z - self.min.z + 1) as u32
    }

    #[inline]
    pub fn area(self) -> u32 {
        self.width() * self.depth()
    }

    #[inline]
    pub fn contains(self, cell: Cell) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.z >= self.min.z && cell.z <= self.max.z
    }

    /// `true` if the two rects share at least one cell.
    #[inline]
    pub fn overlaps(self, other: CellRect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Iterate every cell in the rect, row-major (z outer, x inner).
    pub fn iter(self) -> impl Iterator<Item = Cell> {
        (self.min.z..=self.max.z)
            .flat_map(move |z| (self.min.x..=self.max.x).map(move |x| Cell { x, z }))
    }
}

impl fmt::Display for CellRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.min, self.max)
    }
}
