//! Fixed geometry of the logo ring.
//!
//! The 72 LEDs run around the logo in one loop. Each ring position also shows one
//! sample of an 8-row by 30-column grid, so row and column profiles can be painted
//! onto the ring:
//!
//! ```text
//!          top row: positions 44..72 show columns 1..=28 (row 7)
//!        +--------------------------------------------+
//!  left  |                                            | right
//!  38..44|                                            | 0..8
//!  rows  |                                            | rows
//!  0..=5 |                                            | 7..=0
//!        +--------------------------------------------+
//!          bottom row: positions 8..38 show columns 29..=0 (row 0)
//! ```
//!
//! All index arithmetic wraps through [`constrain_index`].

/// Number of LEDs on the ring.
pub const LED_COUNT: usize = 72;
/// [`LED_COUNT`] for signed ring arithmetic.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap, reason = "72 fits in i32")]
pub const RING_LENGTH: i32 = LED_COUNT as i32;
/// Rows of the virtual grid shown by the ring.
pub const ROW_COUNT: usize = 8;
/// Columns of the virtual grid shown by the ring.
pub const COLUMN_COUNT: usize = 30;

/// First ring position of each arc, in [`Arc`] order.
pub const ARC_STARTS: [usize; 4] = [0, 8, 38, 44];
/// Middle ring position of each arc, in [`Arc`] order.
pub const ARC_MIDDLES: [usize; 4] = [4, 23, 41, 58];
/// Ring positions next to the four touch pads.
pub const PAD_POSITIONS: [usize; 4] = [44, 42, 40, 38];

/// One of the four straight runs of the ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Arc {
    /// Positions `0..8`, running down the right side.
    Right,
    /// Positions `8..38`, running right to left along the bottom.
    Bottom,
    /// Positions `38..44`, running up the left side.
    Left,
    /// Positions `44..72`, running left to right along the top.
    Top,
}

impl Arc {
    /// First ring position of this arc.
    #[must_use]
    #[expect(clippy::indexing_slicing, reason = "ARC_STARTS has one entry per variant")]
    pub const fn start(self) -> usize {
        ARC_STARTS[self as usize]
    }

    /// Middle ring position of this arc.
    #[must_use]
    #[expect(clippy::indexing_slicing, reason = "ARC_MIDDLES has one entry per variant")]
    pub const fn middle(self) -> usize {
        ARC_MIDDLES[self as usize]
    }
}

/// Wrap a signed index into `0..limit`, in either direction.
///
/// ```rust
/// use logo_lights::ring_layout::constrain_index;
///
/// assert_eq!(constrain_index(-1, 72), 71);
/// assert_eq!(constrain_index(72, 72), 0);
/// assert_eq!(constrain_index(-145, 72), 71);
/// ```
///
/// # Panics
///
/// Panics if `limit` is zero or does not fit in `i32`.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    reason = "limit is asserted to fit in i32 and rem_euclid is never negative"
)]
pub const fn constrain_index(index: i32, limit: usize) -> usize {
    assert!(limit > 0 && limit <= i32::MAX as usize, "limit must fit in i32");
    index.rem_euclid(limit as i32) as usize
}

/// The index `delta` steps away from `index`, wrapping within `0..limit`.
///
/// # Panics
///
/// Panics if `limit` is zero or does not fit in `i32`.
#[must_use]
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "limit is asserted nonzero, so index % limit fits in i32"
)]
pub const fn offset_index(index: usize, delta: i32, limit: usize) -> usize {
    assert!(limit > 0 && limit <= i32::MAX as usize, "limit must fit in i32");
    let index = (index % limit) as i32;
    constrain_index(index.wrapping_add(delta), limit)
}

/// Wrap a signed ring offset into `0..LED_COUNT`.
#[must_use]
pub const fn ring_index(index: i32) -> usize {
    constrain_index(index, LED_COUNT)
}

/// A ring position folded back onto the ring.
#[must_use]
pub const fn wrap_position(position: usize) -> usize {
    offset_index(position, 0, LED_COUNT)
}

/// The ring position `delta` steps away from `position`, wrapping both ways.
#[must_use]
pub const fn ring_offset(position: usize, delta: i32) -> usize {
    offset_index(position, delta, LED_COUNT)
}

/// The arc a ring position belongs to. Positions past the end wrap.
#[must_use]
pub const fn arc_of(position: usize) -> Arc {
    let position = wrap_position(position);
    if position < ARC_STARTS[1] {
        Arc::Right
    } else if position < ARC_STARTS[2] {
        Arc::Bottom
    } else if position < ARC_STARTS[3] {
        Arc::Left
    } else {
        Arc::Top
    }
}

/// The grid row a ring position displays.
#[must_use]
#[expect(
    clippy::arithmetic_side_effects,
    reason = "each arm only sees positions inside its own arc"
)]
pub const fn row_of(position: usize) -> usize {
    let position = wrap_position(position);
    match arc_of(position) {
        Arc::Right => ROW_COUNT - 1 - position,
        Arc::Bottom => 0,
        Arc::Left => position - ARC_STARTS[2],
        Arc::Top => ROW_COUNT - 1,
    }
}

/// The grid column a ring position displays.
#[must_use]
#[expect(
    clippy::arithmetic_side_effects,
    reason = "each arm only sees positions inside its own arc"
)]
pub const fn column_of(position: usize) -> usize {
    let position = wrap_position(position);
    match arc_of(position) {
        Arc::Right => COLUMN_COUNT - 1,
        Arc::Bottom => COLUMN_COUNT - 1 - (position - ARC_STARTS[1]),
        Arc::Left => 0,
        // The top row is two LEDs short, so it starts one column in.
        Arc::Top => position + 1 - ARC_STARTS[3],
    }
}

/// Ring positions that display `row`. Empty when `row` is off the grid.
pub fn positions_in_row(row: usize) -> impl Iterator<Item = usize> {
    (0..LED_COUNT).filter(move |&position| row_of(position) == row)
}

/// Ring positions that display `column`. Empty when `column` is off the grid.
pub fn positions_in_column(column: usize) -> impl Iterator<Item = usize> {
    (0..LED_COUNT).filter(move |&position| column_of(position) == column)
}
