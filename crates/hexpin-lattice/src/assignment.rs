//! End-to-end pin assignment.
//!
//! Stages run strictly in order: size the lattice (when a total pin count
//! was requested), generate, assign spiral ids, assign raster ids, then
//! interpolate values once a strategy is selected. Every stage rewrites its
//! whole output, so re-running any of them is safe.

use tracing::{debug, info, warn};

use crate::error::{ConfigurationError, Result, StrategyError};
use crate::{
    size_for_pins, ControlValues, GridConfig, HexagonalGrid, IdMapping, Interpolation,
    InterpolationStrategy, LatticeSize, PinRecord, RowTolerance, StrategyKind,
};

/// How the lattice size is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Layout {
    /// Ring count, center included
    Rings(u64),
    /// Minimum total pin count, rounded up to whole rings
    TotalPins(i64),
}

impl Default for Layout {
    fn default() -> Self {
        Self::Rings(5)
    }
}

/// Everything needed to run the pipeline without interaction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssignmentConfig {
    pub layout: Layout,
    pub pitch: f64,
    pub row_tolerance: RowTolerance,
    pub strategy: Option<StrategyKind>,
    pub controls: ControlValues,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            pitch: 1.0,
            row_tolerance: RowTolerance::default(),
            strategy: None,
            controls: ControlValues::default(),
        }
    }
}

impl AssignmentConfig {
    /// Defaults overlaid with `HEXPIN_*` environment variables.
    ///
    /// - `HEXPIN_RINGS`: ring count
    /// - `HEXPIN_TOTAL_PINS`: total pin count (wins over `HEXPIN_RINGS`)
    /// - `HEXPIN_PITCH`: pin pitch
    /// - `HEXPIN_ROW_EPSILON`: raster row tolerance
    ///
    /// Values that do not parse are skipped with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(rings) = env_parse::<u64>("HEXPIN_RINGS") {
            config.layout = Layout::Rings(rings);
        }
        if let Some(total) = env_parse::<i64>("HEXPIN_TOTAL_PINS") {
            config.layout = Layout::TotalPins(total);
        }
        if let Some(pitch) = env_parse::<f64>("HEXPIN_PITCH") {
            config.pitch = pitch;
        }
        if let Some(epsilon) = env_parse::<f64>("HEXPIN_ROW_EPSILON") {
            match RowTolerance::new(epsilon) {
                Ok(tolerance) => config.row_tolerance = tolerance,
                Err(e) => warn!("ignoring HEXPIN_ROW_EPSILON: {}", e),
            }
        }

        config
    }

    /// Resolve the layout into a grid configuration.
    ///
    /// Returns the sizing report when the layout was a total pin count.
    pub fn grid_config(&self) -> std::result::Result<(GridConfig, Option<LatticeSize>), ConfigurationError> {
        let (rings, sizing) = match self.layout {
            Layout::Rings(rings) => (rings, None),
            Layout::TotalPins(requested) => {
                let size = size_for_pins(requested);
                if size.is_degenerate() {
                    return Err(ConfigurationError::NonPositivePinCount { requested });
                }
                (size.rings, Some(size))
            }
        };

        let config = GridConfig {
            rings,
            pitch: self.pitch,
            row_tolerance: self.row_tolerance,
        };
        config.validate()?;
        Ok((config, sizing))
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable environment value");
            None
        }
    }
}

/// A fully indexed lattice plus the selected interpolation strategy.
#[derive(Debug, Clone)]
pub struct PinAssignment {
    grid: HexagonalGrid,
    sizing: Option<LatticeSize>,
    strategy: Option<Interpolation>,
}

impl PinAssignment {
    /// Build and index a lattice. No strategy is selected yet.
    pub fn new(config: &AssignmentConfig) -> Result<Self> {
        let (grid_config, sizing) = config.grid_config()?;

        if let Some(size) = sizing {
            if size.is_exact() {
                debug!(requested = size.requested, rings = size.rings, "sized lattice");
            } else {
                info!(
                    requested = size.requested,
                    rings = size.rings,
                    actual_pins = size.actual_pins,
                    "lattice holds {} more pins than requested",
                    size.overshoot()
                );
            }
        }

        let mut grid = HexagonalGrid::with_config(grid_config)?;
        grid.generate();
        debug!(rings = grid.rings(), pins = grid.len(), "generated lattice");
        grid.assign_spiral_ids();
        grid.assign_raster_ids();
        debug!(pins = grid.len(), "assigned spiral and raster ids");

        Ok(Self {
            grid,
            sizing,
            strategy: None,
        })
    }

    /// Lattice of `rings` rings at `pitch`.
    pub fn from_rings(rings: u64, pitch: f64) -> Result<Self> {
        Self::new(&AssignmentConfig {
            layout: Layout::Rings(rings),
            pitch,
            ..AssignmentConfig::default()
        })
    }

    /// Smallest lattice holding `total_pins` pins at `pitch`.
    pub fn from_total_pins(total_pins: i64, pitch: f64) -> Result<Self> {
        Self::new(&AssignmentConfig {
            layout: Layout::TotalPins(total_pins),
            pitch,
            ..AssignmentConfig::default()
        })
    }

    /// Run the whole pipeline: build, index and, when the configuration
    /// names a strategy, assign values.
    pub fn run(config: &AssignmentConfig) -> Result<Self> {
        let mut assignment = Self::new(config)?;
        if let Some(kind) = config.strategy {
            assignment.select_strategy(kind, &config.controls)?;
            assignment.assign_values()?;
        }
        Ok(assignment)
    }

    /// Select a strategy by kind, building it from named control values.
    ///
    /// On error the previous selection is kept.
    pub fn select_strategy(
        &mut self,
        kind: StrategyKind,
        controls: &ControlValues,
    ) -> std::result::Result<(), StrategyError> {
        self.strategy = Some(kind.build(controls)?);
        Ok(())
    }

    /// Select an already configured strategy.
    pub fn set_strategy(&mut self, strategy: impl Into<Interpolation>) {
        self.strategy = Some(strategy.into());
    }

    pub fn strategy(&self) -> Option<&Interpolation> {
        self.strategy.as_ref()
    }

    /// Interpolate a value into every pin with the selected strategy.
    pub fn assign_values(&mut self) -> std::result::Result<(), StrategyError> {
        let strategy = self.strategy.as_ref().ok_or(StrategyError::NotSelected)?;
        self.grid.interpolate(strategy)?;
        debug!(strategy = strategy.name(), pins = self.grid.len(), "assigned values");
        Ok(())
    }

    pub fn grid(&self) -> &HexagonalGrid {
        &self.grid
    }

    /// Sizing report when built from a total pin count.
    pub fn sizing(&self) -> Option<&LatticeSize> {
        self.sizing.as_ref()
    }

    /// One record per pin, in spiral order.
    pub fn records(&self) -> Result<Vec<PinRecord>> {
        self.grid.records()
    }

    /// Spiral to raster id translation, in spiral order.
    pub fn id_mapping(&self) -> Result<Vec<IdMapping>> {
        self.grid.id_mapping()
    }
}
