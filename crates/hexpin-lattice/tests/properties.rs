//! Property tests for lattice numbering, row grouping and interpolation.

use std::collections::BTreeSet;

use hexpin_lattice::{
    group_rows, size_for_pins, total_pins, ControlValues, GridConfig, HexagonalGrid, PinAssignment,
    Point, RowTolerance, SevenPoint, StrategyKind, ThreePoint,
};
use proptest::prelude::*;

fn indexed(rings: u64, pitch: f64) -> HexagonalGrid {
    HexagonalGrid::build(GridConfig {
        rings,
        pitch,
        ..GridConfig::default()
    })
    .unwrap()
}

proptest! {
    #[test]
    fn spiral_ids_are_a_permutation(rings in 1u64..25, pitch in 0.1f64..20.0) {
        let grid = indexed(rings, pitch);
        let n = grid.len() as u64;
        prop_assert_eq!(n, total_pins(rings));

        let ids: BTreeSet<u64> = grid.pins().iter().map(|p| p.spiral_id().unwrap().value()).collect();
        prop_assert_eq!(ids.len() as u64, n);
        prop_assert_eq!(ids.into_iter().collect::<Vec<_>>(), (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn raster_ids_are_a_permutation(rings in 1u64..25, pitch in 0.1f64..20.0) {
        let grid = indexed(rings, pitch);
        let n = grid.len() as u64;

        let ids: BTreeSet<u64> = grid.pins().iter().map(|p| p.raster_id().unwrap().value()).collect();
        prop_assert_eq!(ids.len() as u64, n);
        prop_assert_eq!(ids.into_iter().collect::<Vec<_>>(), (1..=n).collect::<Vec<_>>());
    }

    #[test]
    fn numbering_is_independent_of_assignment_order(rings in 1u64..12) {
        let mut a = HexagonalGrid::new(rings, 1.0).unwrap();
        a.generate();
        a.assign_spiral_ids();
        a.assign_raster_ids();

        let mut b = HexagonalGrid::new(rings, 1.0).unwrap();
        b.generate();
        b.assign_raster_ids();
        b.assign_spiral_ids();

        prop_assert_eq!(a.pins(), b.pins());
    }

    #[test]
    fn sub_tolerance_jitter_never_splits_a_row(
        xs in prop::collection::vec(-100.0f64..100.0, 2..12),
        jitter in prop::collection::vec(-4e-7f64..4e-7, 12),
        base in -10.0f64..10.0,
    ) {
        // One row whose y values wobble by less than the tolerance
        let points: Vec<Point> = xs.iter().zip(&jitter).map(|(&x, &j)| Point::new(x, base + j)).collect();
        let rows = group_rows(&points, RowTolerance::default());
        prop_assert_eq!(rows.len(), 1);
        prop_assert_eq!(rows[0].len(), points.len());

        let row_x: Vec<f64> = rows[0].iter().map(|&i| points[i].x).collect();
        prop_assert!(row_x.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn equal_vertices_ignore_angle(rings in 2u64..15, v in -500.0f64..500.0, center in -500.0f64..500.0) {
        let mut grid = indexed(rings, 1.0);
        grid.interpolate(&SevenPoint::new(center, &[v; 6])).unwrap();

        let max_ring = grid.max_ring() as f64;
        for pin in grid.pins() {
            let expected = if pin.is_center() {
                center
            } else {
                center + (v - center) * (pin.ring() as f64 / max_ring)
            };
            prop_assert_eq!(pin.value().unwrap(), expected);
        }
    }

    #[test]
    fn three_point_stays_within_control_range(
        rings in 1u64..12,
        center in 0.0f64..200.0,
        peak in 0.0f64..200.0,
        min in 0.0f64..200.0,
    ) {
        let mut grid = indexed(rings, 1.0);
        grid.interpolate(&ThreePoint::new(center, peak, min)).unwrap();

        let lo = center.min(peak).min(min) - 1e-9;
        let hi = center.max(peak).max(min) + 1e-9;
        for pin in grid.pins() {
            let value = pin.value().unwrap();
            prop_assert!(lo <= value && value <= hi, "value {} outside [{}, {}]", value, lo, hi);
        }
    }

    #[test]
    fn sizer_is_minimal(requested in 1i64..200_000) {
        let size = size_for_pins(requested);
        prop_assert!(size.actual_pins >= requested as u64);
        prop_assert_eq!(size.actual_pins, total_pins(size.rings));
        prop_assert!(size.rings == 1 || total_pins(size.rings - 1) < requested as u64);
    }
}

#[test]
fn total_pin_counts_by_ring() {
    for (rings, expected) in [(1, 1), (2, 7), (3, 19), (4, 37)] {
        assert_eq!(indexed(rings, 1.0).len(), expected);
    }
}

#[test]
fn pipeline_from_total_pin_count() {
    let mut assignment = PinAssignment::from_total_pins(10, 1.0).unwrap();
    assert_eq!(assignment.sizing().unwrap().rings, 3);

    assignment
        .select_strategy(StrategyKind::ThreePoint, &ControlValues::new())
        .unwrap();
    assignment.assign_values().unwrap();

    let records = assignment.records().unwrap();
    assert_eq!(records.len(), 19);
    assert_eq!(records[0].value, Some(100.0));
    assert!(records.iter().all(|r| r.value.is_some()));
}
