//! Board representation and unit types.
//!
//! Contains the grid geometry, the position-to-unit board index, and the
//! unit data model shared by every resolution step.

pub mod grid;
pub mod unit;

pub use grid::{BoardIndex, Grid, Pos};
pub use unit::{Faction, Tier, Unit};
