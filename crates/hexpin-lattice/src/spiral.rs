//! Spiral numbering: outward ring by ring, counter-clockwise within a ring.
//!
//! Ring 0 is the center pin. Ring r > 0 holds 6r pins at positions
//! `0..6r`. Spiral ids run `0, 1, 2, ...` in `(ring, position)` order, which
//! is exactly the order the grid generates pins in:
//!
//! - Ring 0: id 0
//! - Ring 1: ids 1-6
//! - Ring 2: ids 7-18
//! - Ring n: ids from `total_pins_through(n-1)` to `total_pins_through(n) - 1`

use crate::Pin;

/// A spiral id - the pin's index in ring-then-position order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpiralId(pub u64);

impl SpiralId {
    /// The center pin.
    pub const CENTER: Self = Self(0);

    /// Create from raw id.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Ring this id falls in.
    pub fn ring(&self) -> u64 {
        if self.0 == 0 {
            return 0;
        }

        // Binary search for the first ring whose cumulative total exceeds the id.
        // Probes stay at or below LAST_COUNTABLE_RING so the totals never overflow.
        let mut low = 1u64;
        let mut high = (((self.0 as f64).sqrt() as u64) + 2).min(LAST_COUNTABLE_RING + 1);

        while low < high {
            let mid = (low + high) / 2;
            if total_pins_through(mid) <= self.0 {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        low
    }

    /// Position within the ring (0 to 6n-1 for ring n > 0).
    pub fn position(&self) -> u64 {
        let ring = self.ring();
        if ring == 0 {
            return 0;
        }
        self.0 - total_pins_through(ring - 1)
    }
}

impl From<u64> for SpiralId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<SpiralId> for u64 {
    fn from(value: SpiralId) -> Self {
        value.0
    }
}

impl std::fmt::Display for SpiralId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of pins in ring n.
///
/// - Ring 0: 1 pin (center)
/// - Ring n > 0: 6n pins
#[inline]
pub const fn pins_in_ring(ring: u64) -> u64 {
    if ring == 0 {
        1
    } else {
        6 * ring
    }
}

/// Outermost ring whose cumulative pin total fits in a `u64`.
const LAST_COUNTABLE_RING: u64 = 2_479_700_524;

/// Total pins through ring n (inclusive), or `None` if it overflows `u64`.
///
/// Formula: 1 + 3n(n+1)
#[inline]
pub const fn checked_total_pins_through(ring: u64) -> Option<u64> {
    let next = match ring.checked_add(1) {
        Some(next) => next,
        None => return None,
    };
    let product = match ring.checked_mul(next) {
        Some(product) => product,
        None => return None,
    };
    match product.checked_mul(3) {
        Some(tripled) => tripled.checked_add(1),
        None => None,
    }
}

/// Total pins through ring n (inclusive), saturating at `u64::MAX`.
#[inline]
pub const fn total_pins_through(ring: u64) -> u64 {
    match checked_total_pins_through(ring) {
        Some(total) => total,
        None => u64::MAX,
    }
}

/// Total pins in a lattice of `rings` rings, counting the center as one ring,
/// or `None` if it overflows `u64`.
///
/// Formula: 1 + 3R(R-1), so 1, 7, 19, 37 for R = 1, 2, 3, 4. Zero rings is
/// the empty lattice.
#[inline]
pub const fn checked_total_pins(rings: u64) -> Option<u64> {
    if rings == 0 {
        Some(0)
    } else {
        checked_total_pins_through(rings - 1)
    }
}

/// Total pins in a lattice of `rings` rings, saturating at `u64::MAX`.
#[inline]
pub const fn total_pins(rings: u64) -> u64 {
    match checked_total_pins(rings) {
        Some(total) => total,
        None => u64::MAX,
    }
}

/// Spiral id of the pin at `position` in `ring`.
///
/// Returns `None` when the position does not exist in that ring.
pub fn spiral_id_of(ring: u64, position: u64) -> Option<SpiralId> {
    if position >= pins_in_ring(ring) {
        return None;
    }
    let base = if ring == 0 { 0 } else { total_pins_through(ring - 1) };
    Some(SpiralId(base + position))
}

/// Pin indices in spiral order: ascending `(ring, position)`.
///
/// `(ring, position)` pairs are unique, so the order has no ties.
pub fn spiral_order(pins: &[Pin]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..pins.len()).collect();
    order.sort_by_key(|&i| (pins[i].ring(), pins[i].position()));
    order
}
