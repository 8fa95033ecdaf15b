//! Ring count for a requested total pin count.
//!
//! Ring granularity is coarse (1, 7, 19, 37, ... pins for 1, 2, 3, 4
//! rings), so the smallest lattice holding the request usually overshoots
//! it. The overshoot is reported, not treated as an error.

use crate::spiral::total_pins;

/// Outcome of sizing a lattice for a requested pin count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeSize {
    /// Pin count the caller asked for
    pub requested: i64,
    /// Smallest ring count holding at least `requested` pins (0 if degenerate)
    pub rings: u64,
    /// Pins the lattice actually holds
    pub actual_pins: u64,
}

impl LatticeSize {
    /// Non-positive request: empty lattice, ignored by callers.
    pub fn is_degenerate(&self) -> bool {
        self.requested <= 0
    }

    /// Pins beyond the request.
    pub fn overshoot(&self) -> u64 {
        if self.is_degenerate() {
            return 0;
        }
        self.actual_pins - self.requested as u64
    }

    pub fn is_exact(&self) -> bool {
        !self.is_degenerate() && self.overshoot() == 0
    }
}

/// Smallest ring count whose lattice holds at least `requested` pins.
///
/// Non-positive requests yield 0 rings and 0 pins.
pub fn size_for_pins(requested: i64) -> LatticeSize {
    if requested <= 0 {
        return LatticeSize {
            requested,
            rings: 0,
            actual_pins: 0,
        };
    }

    let target = requested as u64;

    // 1 + 3R(R-1) >= target  =>  R ≈ sqrt(target / 3); start just below and walk up
    let mut rings = (((target as f64) / 3.0).sqrt() as u64).max(1);
    while rings > 1 && total_pins(rings - 1) >= target {
        rings -= 1;
    }
    while total_pins(rings) < target {
        rings += 1;
    }

    LatticeSize {
        requested,
        rings,
        actual_pins: total_pins(rings),
    }
}
