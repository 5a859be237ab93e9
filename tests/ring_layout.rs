//! Host-level tests for ring geometry.

use logo_lights::ring_layout::{
    ARC_MIDDLES, ARC_STARTS, Arc, COLUMN_COUNT, LED_COUNT, PAD_POSITIONS, ROW_COUNT, arc_of,
    column_of, constrain_index, offset_index, positions_in_column, positions_in_row, ring_index, ring_offset,
    row_of, wrap_position,
};

#[test]
fn constrain_index_is_idempotent_across_wraps() {
    for index in -500..500 {
        let wrapped = constrain_index(index, LED_COUNT);
        assert!(wrapped < LED_COUNT);
        assert_eq!(constrain_index(i32::try_from(wrapped).unwrap(), LED_COUNT), wrapped);
        assert_eq!(constrain_index(index + 72, LED_COUNT), wrapped);
    }
}

#[test]
fn ring_index_wraps_negative_offsets() {
    assert_eq!(ring_index(-1), 71);
    assert_eq!(ring_index(72), 0);
    assert_eq!(ring_index(-72), 0);
    assert_eq!(ring_index(145), 1);
}

#[test]
fn ring_offset_steps_both_ways() {
    assert_eq!(ring_offset(0, -1), 71);
    assert_eq!(ring_offset(71, 1), 0);
    assert_eq!(ring_offset(10, -20), 62);
    assert_eq!(ring_offset(80, 0), 8);
}

#[test]
fn offset_index_wraps_within_any_limit() {
    assert_eq!(offset_index(29, 1, COLUMN_COUNT), 0);
    assert_eq!(offset_index(0, -1, COLUMN_COUNT), 29);
    assert_eq!(offset_index(28, 2, COLUMN_COUNT), 0);
    assert_eq!(offset_index(0, -2, COLUMN_COUNT), 28);
    assert_eq!(offset_index(15, 0, 16), 15);
    assert_eq!(offset_index(15, 1, 16), 0);
    assert_eq!(offset_index(usize::MAX, 0, LED_COUNT), usize::MAX % LED_COUNT);
    assert_eq!(offset_index(3, i32::MIN, 4), 3);
}

#[test]
fn wrap_position_folds_out_of_range_positions() {
    assert_eq!(wrap_position(0), 0);
    assert_eq!(wrap_position(71), 71);
    assert_eq!(wrap_position(72), 0);
    assert_eq!(wrap_position(150), 6);
}

#[test]
fn arcs_cover_the_ring_in_order() {
    assert_eq!(ARC_STARTS, [0, 8, 38, 44]);
    assert_eq!(ARC_MIDDLES, [4, 23, 41, 58]);
    assert_eq!(arc_of(0), Arc::Right);
    assert_eq!(arc_of(7), Arc::Right);
    assert_eq!(arc_of(8), Arc::Bottom);
    assert_eq!(arc_of(37), Arc::Bottom);
    assert_eq!(arc_of(38), Arc::Left);
    assert_eq!(arc_of(43), Arc::Left);
    assert_eq!(arc_of(44), Arc::Top);
    assert_eq!(arc_of(71), Arc::Top);
    assert_eq!(Arc::Bottom.start(), 8);
    assert_eq!(Arc::Top.middle(), 58);
    for position in PAD_POSITIONS {
        assert!(matches!(arc_of(position), Arc::Left | Arc::Top));
    }
}

#[test]
fn rows_follow_each_arc() {
    assert_eq!(row_of(0), 7);
    assert_eq!(row_of(7), 0);
    assert_eq!(row_of(20), 0);
    assert_eq!(row_of(38), 0);
    assert_eq!(row_of(43), 5);
    assert_eq!(row_of(60), 7);
}

#[test]
fn columns_follow_each_arc() {
    assert_eq!(column_of(3), 29);
    assert_eq!(column_of(8), 29);
    assert_eq!(column_of(37), 0);
    assert_eq!(column_of(40), 0);
    assert_eq!(column_of(44), 1);
    assert_eq!(column_of(71), 28);
}

#[test]
fn every_position_is_on_the_grid() {
    for position in 0..LED_COUNT {
        assert!(row_of(position) < ROW_COUNT);
        assert!(column_of(position) < COLUMN_COUNT);
    }
}

#[test]
fn row_and_column_lookups_invert_the_geometry() {
    let mut seen = [0_usize; LED_COUNT];
    for row in 0..ROW_COUNT {
        for position in positions_in_row(row) {
            assert_eq!(row_of(position), row);
            seen[position] += 1;
        }
    }
    assert!(seen.iter().all(|&count| count == 1));

    let edge: Vec<usize> = positions_in_column(0).collect();
    assert_eq!(edge, vec![37, 38, 39, 40, 41, 42, 43]);
    assert_eq!(positions_in_column(COLUMN_COUNT).count(), 0);
    assert_eq!(positions_in_row(ROW_COUNT).count(), 0);
}
