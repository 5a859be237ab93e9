//! Ring position to LED driver channel wiring.
//!
//! Chip 0 drives the top row and the upper right corner; chip 1 drives everything
//! from the lower right side around to the upper left.

use crate::ring_layout::{LED_COUNT, wrap_position};

pub const DRIVER_COUNT: usize = 2;
pub const CHANNELS_PER_DRIVER: usize = 36;

// First ring positions of the three wiring runs.
const CHIP1_RUN_START: usize = 6;
const CHIP0_TOP_RUN_START: usize = 42;
// Chip 0 channel that the first ring position is wired to.
const CHIP0_CORNER_CHANNEL: usize = 30;

/// One output of one driver chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverChannel {
    pub chip: usize,
    pub channel: usize,
}

/// Driver chip and channel wired to a ring position. Positions past the end wrap.
#[must_use]
#[expect(
    clippy::arithmetic_side_effects,
    reason = "each run only sees positions inside its own range"
)]
pub const fn ring_position_to_channel(position: usize) -> DriverChannel {
    let position = wrap_position(position);
    if position < CHIP1_RUN_START {
        DriverChannel {
            chip: 0,
            channel: CHIP0_CORNER_CHANNEL + position,
        }
    } else if position < CHIP0_TOP_RUN_START {
        DriverChannel {
            chip: 1,
            channel: position - CHIP1_RUN_START,
        }
    } else {
        DriverChannel {
            chip: 0,
            channel: position - CHIP0_TOP_RUN_START,
        }
    }
}

/// Scatter a ring duty buffer into one duty array per driver chip.
#[must_use]
pub fn split_duties(duty: &[u8; LED_COUNT]) -> [[u8; CHANNELS_PER_DRIVER]; DRIVER_COUNT] {
    let mut chips = [[0; CHANNELS_PER_DRIVER]; DRIVER_COUNT];
    for (position, &value) in duty.iter().enumerate() {
        let DriverChannel { chip, channel } = ring_position_to_channel(position);
        if let Some(slot) = chips.get_mut(chip).and_then(|chip| chip.get_mut(channel)) {
            *slot = value;
        }
    }
    chips
}
