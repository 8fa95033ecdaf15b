//! Raster ("subchannel") numbering: rows top to bottom, left to right.
//!
//! The order is derived from coordinates alone. Pins on one physical row
//! can carry y values that differ by trigonometric rounding error, so rows
//! are formed with a tolerance: pins are walked in descending `y` and a new
//! row starts once a pin sits more than `epsilon` below the first pin of the
//! current row. Within a row pins are ordered by ascending `x`; equal `x`
//! falls back to input (generation) order.

use std::cmp::Ordering;

use crate::error::ConfigurationError;
use crate::{Point, DEFAULT_ROW_EPSILON, FIRST_RASTER_ID};

/// A raster id - the pin's 1-based index in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RasterId(pub u64);

impl RasterId {
    /// Top-left pin.
    pub const FIRST: Self = Self(FIRST_RASTER_ID);

    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for RasterId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for RasterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum vertical spread of pins treated as one row.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct RowTolerance(f64);

impl RowTolerance {
    /// Create a tolerance. `epsilon` must be positive and finite.
    pub fn new(epsilon: f64) -> Result<Self, ConfigurationError> {
        if epsilon.is_finite() && epsilon > 0.0 {
            Ok(Self(epsilon))
        } else {
            Err(ConfigurationError::InvalidRowTolerance { epsilon })
        }
    }

    /// Tolerance matching rounding to `digits` decimal places.
    pub fn from_decimal_digits(digits: u8) -> Self {
        Self(10f64.powi(-i32::from(digits)))
    }

    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.0
    }
}

impl Default for RowTolerance {
    fn default() -> Self {
        Self(DEFAULT_ROW_EPSILON)
    }
}

impl TryFrom<f64> for RowTolerance {
    type Error = ConfigurationError;

    fn try_from(epsilon: f64) -> Result<Self, Self::Error> {
        Self::new(epsilon)
    }
}

impl From<RowTolerance> for f64 {
    fn from(tolerance: RowTolerance) -> Self {
        tolerance.0
    }
}

/// Group point indices into rows, top row first, each row left to right.
pub fn group_rows(points: &[Point], tolerance: RowTolerance) -> Vec<Vec<usize>> {
    let y = |i: usize| points[i].y;
    let x = |i: usize| points[i].x;

    let mut by_height: Vec<usize> = (0..points.len()).collect();
    by_height.sort_by(|&a, &b| y(b).total_cmp(&y(a)).then(a.cmp(&b)));

    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut anchor = f64::INFINITY;
    for i in by_height {
        match rows.last_mut() {
            Some(row) if anchor - y(i) <= tolerance.epsilon() => row.push(i),
            _ => {
                anchor = y(i);
                rows.push(vec![i]);
            }
        }
    }

    for row in &mut rows {
        row.sort_by(|&a, &b| match x(a).total_cmp(&x(b)) {
            Ordering::Equal => a.cmp(&b),
            unequal => unequal,
        });
    }
    rows
}

/// Point indices in raster order.
pub fn raster_order(points: &[Point], tolerance: RowTolerance) -> Vec<usize> {
    group_rows(points, tolerance).into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points_at(points: &[(f64, f64)]) -> Vec<Point> {
        points.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn tolerance_rejects_bad_epsilon() {
        assert!(RowTolerance::new(1e-9).is_ok());
        for bad in [0.0, -1e-6, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(RowTolerance::new(bad), Err(ConfigurationError::InvalidRowTolerance { .. })),
                "epsilon {} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn decimal_digits_match_default() {
        assert_eq!(RowTolerance::from_decimal_digits(6).epsilon(), 1e-6);
        assert_eq!(RowTolerance::default().epsilon(), DEFAULT_ROW_EPSILON);
    }

    #[test]
    fn rows_run_top_to_bottom_left_to_right() {
        let points = points_at(&[(0.0, 0.0), (1.0, 1.0), (-1.0, 1.0), (0.5, -1.0), (-0.5, -1.0)]);
        let rows = group_rows(&points, RowTolerance::default());
        assert_eq!(rows, vec![vec![2, 1], vec![0], vec![4, 3]]);
        assert_eq!(raster_order(&points, RowTolerance::default()), vec![2, 1, 0, 4, 3]);
    }

    #[test]
    fn jitter_below_tolerance_stays_in_one_row() {
        // Right pin sits slightly higher than the left one
        let points = points_at(&[(-1.0, 0.5), (1.0, 0.5 + 4e-7), (0.0, 0.5 - 3e-7)]);
        let rows = group_rows(&points, RowTolerance::default());
        assert_eq!(rows, vec![vec![0, 2, 1]]);
    }

    #[test]
    fn jitter_straddling_a_rounding_boundary_stays_in_one_row() {
        // 0.4999996e-6 and 0.5000004e-6 round to different sixth decimals
        let points = points_at(&[(2.0, 0.499_999_6e-6), (1.0, 0.500_000_4e-6)]);
        let rows = group_rows(&points, RowTolerance::default());
        assert_eq!(rows, vec![vec![1, 0]]);
    }

    #[test]
    fn gaps_above_tolerance_split_rows() {
        let points = points_at(&[(0.0, 0.0), (1.0, -2e-6)]);
        let rows = group_rows(&points, RowTolerance::default());
        assert_eq!(rows, vec![vec![0], vec![1]]);

        let loose = RowTolerance::new(1e-3).unwrap();
        assert_eq!(group_rows(&points, loose), vec![vec![0, 1]]);
    }

    #[test]
    fn equal_x_keeps_input_order() {
        let points = points_at(&[(1.0, 0.0), (1.0, 1e-9), (0.0, 0.0)]);
        let order = raster_order(&points, RowTolerance::default());
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn empty_and_single_pin() {
        assert!(group_rows(&[], RowTolerance::default()).is_empty());

        let points = points_at(&[(0.0, 0.0)]);
        assert_eq!(group_rows(&points, RowTolerance::default()), vec![vec![0]]);
    }
}
