//! Named control values supplied by callers.
//!
//! Scalars are looked up by name (`center_peak`, `outer_peak`,
//! `outer_min`); missing names fall back to the crate defaults. The
//! seven-point strategy additionally reads the `vertex_values` list.

use std::collections::BTreeMap;

use crate::error::StrategyError;
use crate::interpolation::{SevenPoint, StrategyKind, ThreePoint};
use crate::{
    DEFAULT_CENTER_PEAK, DEFAULT_OUTER_MIN, DEFAULT_OUTER_PEAK, DEFAULT_VERTEX_VALUE, VERTEX_COUNT,
};

/// Control values for one interpolation run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlValues {
    #[cfg_attr(feature = "serde", serde(flatten))]
    scalars: BTreeMap<String, f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    vertex_values: Option<Vec<f64>>,
}

impl ControlValues {
    pub const CENTER_PEAK: &'static str = "center_peak";
    pub const OUTER_PEAK: &'static str = "outer_peak";
    pub const OUTER_MIN: &'static str = "outer_min";
    pub const VERTEX_VALUES: &'static str = "vertex_values";

    pub fn new() -> Self {
        Self::default()
    }

    /// Set a named scalar.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Set the hexagon vertex values.
    pub fn with_vertices(mut self, values: impl Into<Vec<f64>>) -> Self {
        self.vertex_values = Some(values.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.scalars.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.scalars.get(name).copied()
    }

    pub fn vertex_values(&self) -> Option<&[f64]> {
        self.vertex_values.as_deref()
    }

    /// Reject names the strategy does not read.
    fn check_names(&self, kind: StrategyKind, known: &[&str]) -> Result<(), StrategyError> {
        match self.scalars.keys().find(|name| !known.contains(&name.as_str())) {
            Some(name) => Err(StrategyError::UnknownControl {
                strategy: kind.as_str(),
                name: name.clone(),
            }),
            None => Ok(()),
        }
    }

    fn scalar(&self, name: &str, default: f64) -> Result<f64, StrategyError> {
        let value = self.get(name).unwrap_or(default);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(StrategyError::NonFiniteControl {
                name: name.to_string(),
                value,
            })
        }
    }

    /// Three-point parameters, defaults filled in.
    pub fn three_point(&self) -> Result<ThreePoint, StrategyError> {
        let kind = StrategyKind::ThreePoint;
        self.check_names(kind, &[Self::CENTER_PEAK, Self::OUTER_PEAK, Self::OUTER_MIN])?;
        if self.vertex_values.is_some() {
            return Err(StrategyError::UnexpectedVertexValues {
                strategy: kind.as_str(),
            });
        }

        Ok(ThreePoint::new(
            self.scalar(Self::CENTER_PEAK, DEFAULT_CENTER_PEAK)?,
            self.scalar(Self::OUTER_PEAK, DEFAULT_OUTER_PEAK)?,
            self.scalar(Self::OUTER_MIN, DEFAULT_OUTER_MIN)?,
        ))
    }

    /// Seven-point parameters; the vertex list is padded or truncated to six.
    pub fn seven_point(&self) -> Result<SevenPoint, StrategyError> {
        self.check_names(StrategyKind::SevenPoint, &[Self::CENTER_PEAK])?;
        let center_peak = self.scalar(Self::CENTER_PEAK, DEFAULT_CENTER_PEAK)?;

        let vertices = self.vertex_values.as_deref().unwrap_or(&[]);
        // Only the first six survive truncation
        let kept = &vertices[..vertices.len().min(VERTEX_COUNT)];
        if let Some((i, &value)) = kept.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(StrategyError::NonFiniteControl {
                name: format!("{}[{}]", Self::VERTEX_VALUES, i),
                value,
            });
        }

        if vertices.is_empty() {
            return Ok(SevenPoint::new(center_peak, &[DEFAULT_VERTEX_VALUE; VERTEX_COUNT]));
        }
        Ok(SevenPoint::new(center_peak, vertices))
    }
}
