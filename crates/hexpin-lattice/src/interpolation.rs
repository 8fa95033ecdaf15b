//! Per-pin value interpolation.
//!
//! Both strategies share one radial law. The center pin takes
//! `center_peak`; any other pin gets an angular blend `b` of the outer
//! control values and then
//!
//! ```text
//! value = center_peak + (b - center_peak) * ring / max_ring
//! ```
//!
//! where `max_ring` is the outermost ring present. A center-only lattice
//! has `max_ring == 0`, and every pin takes `center_peak`.
//!
//! - **Three-point**: `b = outer_min + (outer_peak - outer_min) * (1 + cos θ) / 2`,
//!   peaking along the reference axis and bottoming out opposite it.
//! - **Seven-point**: six vertex values at 0°, 60°, ..., 300°; `b` is the
//!   linear blend of the two vertices bracketing the pin's angle.

use std::str::FromStr;

use crate::error::StrategyError;
use crate::{
    ControlValues, Pin, DEFAULT_CENTER_PEAK, DEFAULT_OUTER_MIN, DEFAULT_OUTER_PEAK,
    DEFAULT_VERTEX_VALUE, VERTEX_COUNT,
};

/// Writes a value into every pin.
///
/// Implementations never reorder, add or remove pins, and only touch the
/// value. When an error is returned no pin has been modified.
pub trait InterpolationStrategy {
    /// Short strategy name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Assign a value to every pin.
    fn interpolate(&self, pins: &mut [Pin]) -> Result<(), StrategyError>;
}

/// Shared radial pass: center pins take `center_peak`, others
/// `center_peak + (blend(pin) - center_peak) * ring_ratio`.
fn apply_radial<F>(pins: &mut [Pin], center_peak: f64, blend: F)
where
    F: Fn(&Pin) -> f64,
{
    let max_ring = pins.iter().map(Pin::ring).max().unwrap_or(0);

    for pin in pins.iter_mut() {
        if pin.is_center() || max_ring == 0 {
            pin.set_value(center_peak);
            continue;
        }
        let ring_ratio = pin.ring() as f64 / max_ring as f64;
        let value = blend(pin);
        pin.set_value(center_peak + (value - center_peak) * ring_ratio);
    }
}

fn ensure_finite(name: &str, value: f64) -> Result<(), StrategyError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StrategyError::NonFiniteControl {
            name: name.to_string(),
            value,
        })
    }
}

/// Center peak plus a cosine-shaped outer profile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreePoint {
    pub center_peak: f64,
    /// Outer value along the reference axis (θ = 0)
    pub outer_peak: f64,
    /// Outer value opposite the reference axis (θ = π)
    pub outer_min: f64,
}

impl Default for ThreePoint {
    fn default() -> Self {
        Self {
            center_peak: DEFAULT_CENTER_PEAK,
            outer_peak: DEFAULT_OUTER_PEAK,
            outer_min: DEFAULT_OUTER_MIN,
        }
    }
}

impl ThreePoint {
    pub fn new(center_peak: f64, outer_peak: f64, outer_min: f64) -> Self {
        Self {
            center_peak,
            outer_peak,
            outer_min,
        }
    }

    /// Value of a non-center pin at angle `theta` (radians, `[0, 2π)`).
    pub fn value_at(&self, theta: f64, ring_ratio: f64) -> f64 {
        self.center_peak + (self.outer_blend(theta) - self.center_peak) * ring_ratio
    }

    fn validate(&self) -> Result<(), StrategyError> {
        ensure_finite(ControlValues::CENTER_PEAK, self.center_peak)?;
        ensure_finite(ControlValues::OUTER_PEAK, self.outer_peak)?;
        ensure_finite(ControlValues::OUTER_MIN, self.outer_min)
    }

    fn outer_blend(&self, theta: f64) -> f64 {
        let angle_factor = (1.0 + theta.cos()) / 2.0;
        self.outer_min + (self.outer_peak - self.outer_min) * angle_factor
    }
}

impl InterpolationStrategy for ThreePoint {
    fn name(&self) -> &'static str {
        StrategyKind::ThreePoint.as_str()
    }

    fn interpolate(&self, pins: &mut [Pin]) -> Result<(), StrategyError> {
        self.validate()?;
        apply_radial(pins, self.center_peak, |pin| {
            self.outer_blend(pin.coordinates().angle())
        });
        Ok(())
    }
}

/// Center peak plus six hexagon vertex values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SevenPoint {
    pub center_peak: f64,
    /// Vertex values at 0°, 60°, ..., 300°
    pub vertex_values: [f64; VERTEX_COUNT],
}

impl Default for SevenPoint {
    fn default() -> Self {
        Self {
            center_peak: DEFAULT_CENTER_PEAK,
            vertex_values: [DEFAULT_VERTEX_VALUE; VERTEX_COUNT],
        }
    }
}

impl SevenPoint {
    /// Build from any number of vertex values.
    ///
    /// Short lists are padded with the default vertex value, long lists are
    /// truncated to the first six.
    pub fn new(center_peak: f64, vertex_values: &[f64]) -> Self {
        if vertex_values.len() != VERTEX_COUNT {
            tracing::warn!(
                supplied = vertex_values.len(),
                expected = VERTEX_COUNT,
                "vertex value count adjusted (padding with {})",
                DEFAULT_VERTEX_VALUE
            );
        }

        let mut vertices = [DEFAULT_VERTEX_VALUE; VERTEX_COUNT];
        for (slot, &value) in vertices.iter_mut().zip(vertex_values) {
            *slot = value;
        }

        Self {
            center_peak,
            vertex_values: vertices,
        }
    }

    /// Value of a non-center pin at `degrees` (`[0, 360)`).
    pub fn value_at(&self, degrees: f64, ring_ratio: f64) -> f64 {
        let vertex_blend = self.vertex_blend(degrees);
        self.center_peak + (vertex_blend - self.center_peak) * ring_ratio
    }

    fn vertex_blend(&self, degrees: f64) -> f64 {
        let sector = ((degrees / 60.0) as usize).min(VERTEX_COUNT - 1);
        let next = (sector + 1) % VERTEX_COUNT;
        let frac = (degrees - 60.0 * sector as f64) / 60.0;

        let (a, b) = (self.vertex_values[sector], self.vertex_values[next]);
        a + (b - a) * frac
    }

    fn validate(&self) -> Result<(), StrategyError> {
        ensure_finite(ControlValues::CENTER_PEAK, self.center_peak)?;
        for (i, &value) in self.vertex_values.iter().enumerate() {
            ensure_finite(&format!("{}[{}]", ControlValues::VERTEX_VALUES, i), value)?;
        }
        Ok(())
    }
}

impl InterpolationStrategy for SevenPoint {
    fn name(&self) -> &'static str {
        StrategyKind::SevenPoint.as_str()
    }

    fn interpolate(&self, pins: &mut [Pin]) -> Result<(), StrategyError> {
        self.validate()?;
        apply_radial(pins, self.center_peak, |pin| {
            self.vertex_blend(pin.coordinates().angle_degrees())
        });
        Ok(())
    }
}

/// Strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrategyKind {
    ThreePoint,
    SevenPoint,
}

impl StrategyKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ThreePoint => "three_point",
            Self::SevenPoint => "seven_point",
        }
    }

    /// Build the selected strategy from named control values.
    pub fn build(&self, controls: &ControlValues) -> Result<Interpolation, StrategyError> {
        match self {
            Self::ThreePoint => controls.three_point().map(Interpolation::ThreePoint),
            Self::SevenPoint => controls.seven_point().map(Interpolation::SevenPoint),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "three_point" | "3" => Ok(Self::ThreePoint),
            "seven_point" | "7" => Ok(Self::SevenPoint),
            _ => Err(StrategyError::UnknownStrategy(s.to_string())),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured strategy of either kind.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "strategy", rename_all = "snake_case"))]
pub enum Interpolation {
    ThreePoint(ThreePoint),
    SevenPoint(SevenPoint),
}

impl Interpolation {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::ThreePoint(_) => StrategyKind::ThreePoint,
            Self::SevenPoint(_) => StrategyKind::SevenPoint,
        }
    }
}

impl InterpolationStrategy for Interpolation {
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    fn interpolate(&self, pins: &mut [Pin]) -> Result<(), StrategyError> {
        match self {
            Self::ThreePoint(strategy) => strategy.interpolate(pins),
            Self::SevenPoint(strategy) => strategy.interpolate(pins),
        }
    }
}

impl From<ThreePoint> for Interpolation {
    fn from(strategy: ThreePoint) -> Self {
        Self::ThreePoint(strategy)
    }
}

impl From<SevenPoint> for Interpolation {
    fn from(strategy: SevenPoint) -> Self {
        Self::SevenPoint(strategy)
    }
}
