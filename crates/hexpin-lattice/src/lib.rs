//! Hexpin Lattice
//!
//! Hexagonal fuel-assembly pin lattice with two independent numberings and
//! angular/radial value interpolation.
//!
//! # Lattice
//!
//! Ring 0 is a single center pin; ring r > 0 holds 6r pins on a circle of
//! radius `pitch * r`. A lattice of R rings (center included) holds
//! `1 + 3R(R-1)` pins: 1, 7, 19, 37, ...
//!
//! # Numberings
//!
//! - **Spiral ids** `0..N`: ring by ring outward, by position within a ring.
//! - **Raster ids** `1..=N`: physical rows top to bottom, left to right
//!   within a row. Derived purely from coordinates with a row tolerance.
//!
//! # Interpolation
//!
//! A strategy writes a value into every pin from a handful of control
//! values: three-point (center peak, outer peak, outer minimum) or
//! seven-point (center peak and six hexagon vertices).
//!
//! # Usage
//!
//! ```
//! use hexpin_lattice::{ControlValues, PinAssignment, StrategyKind};
//!
//! let mut assignment = PinAssignment::from_total_pins(10, 1.0).unwrap();
//! assert_eq!(assignment.grid().len(), 19);
//!
//! let controls = ControlValues::new().with("center_peak", 120.0);
//! assignment.select_strategy(StrategyKind::ThreePoint, &controls).unwrap();
//! assignment.assign_values().unwrap();
//!
//! let records = assignment.records().unwrap();
//! assert_eq!(records[0].value, Some(120.0));
//! ```

mod assignment;
mod controls;
mod error;
mod grid;
mod interpolation;
mod pin;
mod point;
mod raster;
mod sizer;
mod spiral;

pub use assignment::{AssignmentConfig, Layout, PinAssignment};
pub use controls::ControlValues;
pub use error::{ConfigurationError, Error, Result, StrategyError};
pub use grid::{GridConfig, HexagonalGrid};
pub use interpolation::{Interpolation, InterpolationStrategy, SevenPoint, StrategyKind, ThreePoint};
pub use pin::{IdMapping, Pin, PinRecord};
pub use point::Point;
pub use raster::{group_rows, raster_order, RasterId, RowTolerance};
pub use sizer::{size_for_pins, LatticeSize};
pub use spiral::{
    checked_total_pins, checked_total_pins_through, pins_in_ring, spiral_id_of, spiral_order,
    total_pins, total_pins_through, SpiralId,
};

/// Default raster row tolerance (six decimal places)
pub const DEFAULT_ROW_EPSILON: f64 = 1e-6;

/// Largest ring count a grid will generate (50,319,361 pins)
pub const MAX_RINGS: u64 = 4096;

/// First raster id (top-left pin)
pub const FIRST_RASTER_ID: u64 = 1;

/// Default center peak for both strategies
pub const DEFAULT_CENTER_PEAK: f64 = 100.0;

/// Default three-point outer value on the reference axis
pub const DEFAULT_OUTER_PEAK: f64 = 80.0;

/// Default three-point outer value opposite the reference axis
pub const DEFAULT_OUTER_MIN: f64 = 60.0;

/// Seven-point padding value for missing vertices
pub const DEFAULT_VERTEX_VALUE: f64 = 80.0;

/// Hexagon vertices read by the seven-point strategy
pub const VERTEX_COUNT: usize = 6;

// Six 60° sectors cover the full turn
const _: () = assert!(VERTEX_COUNT * 60 == 360);
