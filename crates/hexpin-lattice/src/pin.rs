//! Pin positions and the records handed to exporters.

use crate::{Point, RasterId, SpiralId};

/// One rod position in the lattice.
///
/// Ring, position and coordinates are fixed when the grid generates the
/// pin. The two ids are written by the grid's indexing passes and the value
/// by an interpolation strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    ring: u64,
    position: u64,
    coordinates: Point,
    spiral_id: Option<SpiralId>,
    raster_id: Option<RasterId>,
    value: Option<f64>,
}

impl Pin {
    pub(crate) fn new(ring: u64, position: u64, coordinates: Point) -> Self {
        Self {
            ring,
            position,
            coordinates,
            spiral_id: None,
            raster_id: None,
            value: None,
        }
    }

    /// Ring number (0 = center).
    #[inline]
    pub fn ring(&self) -> u64 {
        self.ring
    }

    /// Index within the ring.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    #[inline]
    pub fn coordinates(&self) -> Point {
        self.coordinates
    }

    #[inline]
    pub fn is_center(&self) -> bool {
        self.ring == 0
    }

    #[inline]
    pub fn spiral_id(&self) -> Option<SpiralId> {
        self.spiral_id
    }

    #[inline]
    pub fn raster_id(&self) -> Option<RasterId> {
        self.raster_id
    }

    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Overwrite the interpolated value.
    #[inline]
    pub fn set_value(&mut self, value: f64) {
        self.value = Some(value);
    }

    pub(crate) fn set_spiral_id(&mut self, id: SpiralId) {
        self.spiral_id = Some(id);
    }

    pub(crate) fn set_raster_id(&mut self, id: RasterId) {
        self.raster_id = Some(id);
    }

    /// Flat record for exporters. `None` until both ids are assigned.
    pub fn record(&self) -> Option<PinRecord> {
        Some(PinRecord {
            spiral_id: self.spiral_id?.value(),
            raster_id: self.raster_id?.value(),
            ring: self.ring,
            position: self.position,
            x: self.coordinates.x,
            y: self.coordinates.y,
            value: self.value,
        })
    }
}

impl std::fmt::Display for Pin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pin(ring={}, pos={}, at {}", self.ring, self.position, self.coordinates)?;
        if let Some(id) = self.spiral_id {
            write!(f, ", spiral={}", id)?;
        }
        if let Some(id) = self.raster_id {
            write!(f, ", raster={}", id)?;
        }
        if let Some(value) = self.value {
            write!(f, ", value={:.4}", value)?;
        }
        write!(f, ")")
    }
}

/// Everything an exporter may know about a pin.
///
/// Column order matches the tabular export: spiral id, raster id, ring,
/// position, x, y, value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinRecord {
    pub spiral_id: u64,
    pub raster_id: u64,
    pub ring: u64,
    pub position: u64,
    pub x: f64,
    pub y: f64,
    pub value: Option<f64>,
}

/// Translation between the two numberings for one pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdMapping {
    pub spiral_id: u64,
    pub raster_id: u64,
}

impl From<&PinRecord> for IdMapping {
    fn from(record: &PinRecord) -> Self {
        Self {
            spiral_id: record.spiral_id,
            raster_id: record.raster_id,
        }
    }
}
