//! Hexagonal pin lattice generation and indexing.
//!
//! Ring 0 is a single pin at the origin. Ring r (1 ≤ r < rings) holds 6r
//! pins on a circle of radius `pitch * r`, pin `pos` at angle
//!
//! ```text
//! θ = 2π·pos/(6r) + π/6
//! ```
//!
//! The π/6 rotation puts a hexagon vertex, not an edge midpoint, on the
//! reference axis. Every pin depends only on (ring, position, pitch), so
//! regenerating always reproduces the same coordinates.

use std::f64::consts::{FRAC_PI_6, TAU};

use crate::error::{ConfigurationError, Error, Result, StrategyError};
use crate::interpolation::InterpolationStrategy;
use crate::raster::{raster_order, RasterId, RowTolerance};
use crate::spiral::{pins_in_ring, spiral_order, total_pins, SpiralId};
use crate::{IdMapping, Pin, PinRecord, Point, FIRST_RASTER_ID, MAX_RINGS};

/// Parameters that fully determine a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Number of rings, counting the center pin as ring 0
    pub rings: u64,
    /// Center-to-center spacing of adjacent rings
    pub pitch: f64,
    /// Vertical tolerance for raster row grouping
    #[cfg_attr(feature = "serde", serde(default))]
    pub row_tolerance: RowTolerance,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rings: 5,
            pitch: 1.0,
            row_tolerance: RowTolerance::default(),
        }
    }
}

impl GridConfig {
    /// Check ring count (`1..=MAX_RINGS`) and pitch.
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        if !(1..=MAX_RINGS).contains(&self.rings) {
            return Err(ConfigurationError::InvalidRingCount { rings: self.rings });
        }
        if !(self.pitch.is_finite() && self.pitch > 0.0) {
            return Err(ConfigurationError::InvalidPitch { pitch: self.pitch });
        }
        Ok(())
    }
}

/// The full pin collection of one lattice.
#[derive(Debug, Clone)]
pub struct HexagonalGrid {
    config: GridConfig,
    pins: Vec<Pin>,
}

impl HexagonalGrid {
    /// Create an empty grid for `rings` rings at `pitch`.
    ///
    /// Call [`generate`](Self::generate) to populate it.
    pub fn new(rings: u64, pitch: f64) -> std::result::Result<Self, ConfigurationError> {
        Self::with_config(GridConfig {
            rings,
            pitch,
            ..GridConfig::default()
        })
    }

    /// Create an empty grid from a full configuration.
    pub fn with_config(config: GridConfig) -> std::result::Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            config,
            pins: Vec::new(),
        })
    }

    /// Create, generate and assign both numberings in one call.
    pub fn build(config: GridConfig) -> std::result::Result<Self, ConfigurationError> {
        let mut grid = Self::with_config(config)?;
        grid.index();
        Ok(grid)
    }

    /// Populate the pins. Replaces any earlier pins, ids and values.
    pub fn generate(&mut self) {
        let rings = self.config.rings;
        let pitch = self.config.pitch;

        let mut pins = Vec::with_capacity(total_pins(rings) as usize);
        pins.push(Pin::new(0, 0, Point::ORIGIN));

        for ring in 1..rings {
            let count = pins_in_ring(ring);
            let radius = pitch * ring as f64;
            for pos in 0..count {
                let theta = TAU * pos as f64 / count as f64 + FRAC_PI_6;
                pins.push(Pin::new(ring, pos, Point::polar(radius, theta)));
            }
        }

        self.pins = pins;
    }

    /// Assign spiral ids `0..N` in (ring, position) order.
    pub fn assign_spiral_ids(&mut self) {
        let order = spiral_order(&self.pins);
        for (id, i) in order.into_iter().enumerate() {
            self.pins[i].set_spiral_id(SpiralId(id as u64));
        }
    }

    /// Assign raster ids `1..=N` in row-major order.
    pub fn assign_raster_ids(&mut self) {
        let points: Vec<Point> = self.pins.iter().map(Pin::coordinates).collect();
        let order = raster_order(&points, self.config.row_tolerance);
        for (offset, i) in order.into_iter().enumerate() {
            self.pins[i].set_raster_id(RasterId(FIRST_RASTER_ID + offset as u64));
        }
    }

    /// Generate and assign both numberings.
    pub fn index(&mut self) {
        self.generate();
        self.assign_spiral_ids();
        self.assign_raster_ids();
    }

    /// Run an interpolation strategy over every pin.
    ///
    /// On error no pin value has changed.
    pub fn interpolate<S>(&mut self, strategy: &S) -> std::result::Result<(), StrategyError>
    where
        S: InterpolationStrategy + ?Sized,
    {
        strategy.interpolate(&mut self.pins)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn rings(&self) -> u64 {
        self.config.rings
    }

    pub fn pitch(&self) -> f64 {
        self.config.pitch
    }

    /// Pins in generation order.
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Outermost ring present (0 for a center-only or empty grid).
    pub fn max_ring(&self) -> u64 {
        self.pins.iter().map(Pin::ring).max().unwrap_or(0)
    }

    pub fn pin_by_spiral_id(&self, id: SpiralId) -> Option<&Pin> {
        self.pins.iter().find(|p| p.spiral_id() == Some(id))
    }

    pub fn pin_by_raster_id(&self, id: RasterId) -> Option<&Pin> {
        self.pins.iter().find(|p| p.raster_id() == Some(id))
    }

    /// One record per pin, in spiral order.
    pub fn records(&self) -> Result<Vec<PinRecord>> {
        let mut records = self
            .pins
            .iter()
            .map(|pin| {
                if pin.spiral_id().is_none() {
                    return Err(Error::Unindexed { labeling: "spiral" });
                }
                pin.record().ok_or(Error::Unindexed { labeling: "raster" })
            })
            .collect::<Result<Vec<_>>>()?;
        records.sort_by_key(|r| r.spiral_id);
        Ok(records)
    }

    /// Spiral to raster id translation for every pin, in spiral order.
    pub fn id_mapping(&self) -> Result<Vec<IdMapping>> {
        Ok(self.records()?.iter().map(IdMapping::from).collect())
    }
}
