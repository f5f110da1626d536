//! Integer pixel geometry for laid-out flow diagrams.
//!
//! # Overview
//!
//! - [`Position`] - The top-left canvas coordinate assigned to a node
//! - [`GridSize`] - A validated grid unit that coordinates are snapped to
//!
//! # Coordinate System
//!
//! Waymark uses the same coordinate system as the canvas it feeds:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Coordinates are whole pixels. Every coordinate leaving the engine is a
//! multiple of the configured [`GridSize`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 2D canvas position in whole pixels.
///
/// # Examples
///
/// ```
/// # use waymark_core::geometry::{GridSize, Position};
/// let grid = GridSize::new(8).unwrap();
/// let position = Position::new(101, 45).snapped(grid);
///
/// assert_eq!(position, Position::new(104, 48));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position with the specified coordinates
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the y-coordinate
    pub fn y(self) -> i32 {
        self.y
    }

    /// Returns this position with both coordinates snapped to `grid`.
    pub fn snapped(self, grid: GridSize) -> Self {
        Self {
            x: grid.snap(self.x),
            y: grid.snap(self.y),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Errors produced when constructing geometry values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("grid size must be positive, got {0}")]
    NonPositiveGrid(i32),
}

/// A positive grid unit in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize(i32);

impl GridSize {
    /// The grid unit used by the diagram canvas.
    pub const DEFAULT: GridSize = GridSize(8);

    /// Creates a grid size, rejecting zero and negative units.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositiveGrid`] if `unit <= 0`.
    pub fn new(unit: i32) -> Result<Self, GeometryError> {
        if unit <= 0 {
            return Err(GeometryError::NonPositiveGrid(unit));
        }
        Ok(Self(unit))
    }

    /// Returns the grid unit in pixels.
    pub fn unit(self) -> i32 {
        self.0
    }

    /// Rounds `value` to the nearest multiple of the grid unit.
    ///
    /// Values exactly halfway between two grid lines round towards
    /// positive infinity, so the result does not depend on the sign of the
    /// canvas origin.
    ///
    /// ```
    /// # use waymark_core::geometry::GridSize;
    /// let grid = GridSize::DEFAULT;
    /// assert_eq!(grid.snap(100), 104);
    /// assert_eq!(grid.snap(99), 96);
    /// assert_eq!(grid.snap(-4), 0);
    /// assert_eq!(grid.snap(-5), -8);
    /// ```
    pub fn snap(self, value: i32) -> i32 {
        let remainder = value.rem_euclid(self.0);
        let floor = value - remainder;
        if remainder * 2 >= self.0 {
            floor + self.0
        } else {
            floor
        }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_rejects_non_positive_units() {
        assert_eq!(GridSize::new(0), Err(GeometryError::NonPositiveGrid(0)));
        assert_eq!(GridSize::new(-8), Err(GeometryError::NonPositiveGrid(-8)));
        assert_eq!(GridSize::new(8).map(GridSize::unit), Ok(8));
    }

    #[test]
    fn test_snap_keeps_grid_values() {
        let grid = GridSize::DEFAULT;
        for value in [-16, -8, 0, 8, 192, 384] {
            assert_eq!(grid.snap(value), value);
        }
    }

    #[test]
    fn test_snap_rounds_half_up() {
        let grid = GridSize::DEFAULT;
        assert_eq!(grid.snap(4), 8);
        assert_eq!(grid.snap(3), 0);
        assert_eq!(grid.snap(236), 240);
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(-192, 104).to_string(), "(-192, 104)");
    }
}
