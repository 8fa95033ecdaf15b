//! Cartesian pin locations.
//!
//! Pins are placed in polar form (ring radius and angle) and stored as
//! Cartesian `(x, y)`. The angle helpers here are shared by the raster
//! ordering and both interpolation laws, so they normalize atan2 the same
//! way everywhere: `[-π, π]` is folded into `[0, 2π)` by adding `2π` to
//! negative angles.

use std::f64::consts::TAU;

/// A position in the lattice plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Origin of the lattice (the center pin).
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a point from polar form.
    #[inline]
    pub fn polar(radius: f64, theta: f64) -> Self {
        Self {
            x: radius * theta.cos(),
            y: radius * theta.sin(),
        }
    }

    /// Polar angle in `[0, 2π)` measured from the positive x axis.
    ///
    /// The origin reports 0. Adding `2π` to a tiny negative angle can round
    /// up to exactly `2π`; that case wraps back to 0.
    pub fn angle(&self) -> f64 {
        let theta = self.y.atan2(self.x);
        if theta >= 0.0 {
            return theta;
        }
        let folded = theta + TAU;
        if folded >= TAU {
            0.0
        } else {
            folded
        }
    }

    /// Polar angle in degrees, in `[0, 360)`.
    pub fn angle_degrees(&self) -> f64 {
        let degrees = self.angle().to_degrees();
        if degrees >= 360.0 {
            degrees - 360.0
        } else {
            degrees
        }
    }

    /// Distance from the origin.
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, PI};

    #[test]
    fn origin_is_zero() {
        let origin = Point::ORIGIN;
        assert_eq!(origin.x, 0.0);
        assert_eq!(origin.y, 0.0);
        assert_eq!(origin.radius(), 0.0);
        assert_eq!(origin.angle(), 0.0);
    }

    #[test]
    fn polar_places_on_circle() {
        for k in 0..12 {
            let theta = FRAC_PI_6 * k as f64;
            let p = Point::polar(2.5, theta);
            assert!((p.radius() - 2.5).abs() < 1e-12, "k = {}", k);
        }
    }

    #[test]
    fn angle_is_normalized() {
        assert_eq!(Point::new(1.0, 0.0).angle(), 0.0);
        assert!((Point::new(0.0, 1.0).angle() - FRAC_PI_2).abs() < 1e-15);
        assert!((Point::new(-1.0, 0.0).angle() - PI).abs() < 1e-15);
        assert!((Point::new(0.0, -1.0).angle() - 3.0 * FRAC_PI_2).abs() < 1e-15);

        for k in 0..360 {
            let p = Point::polar(1.0, (k as f64).to_radians());
            let a = p.angle();
            assert!((0.0..TAU).contains(&a), "angle {} out of range for k = {}", a, k);
        }
    }

    #[test]
    fn degrees_never_reach_full_turn() {
        // atan2 of a tiny negative y is a tiny negative angle
        let p = Point::new(1.0, -1e-300);
        assert_eq!(p.angle(), 0.0);
        let d = p.angle_degrees();
        assert!((0.0..360.0).contains(&d), "degrees {} out of range", d);
    }

    #[test]
    fn display_is_fixed_precision() {
        assert_eq!(Point::new(1.0, -0.5).to_string(), "(1.000000, -0.500000)");
    }
}
