//! The per-LED frame buffer and the primitives effects paint with.
//!
//! A [`Frame`] keeps two parallel buffers. The gamma buffer holds perceptual steps in
//! `0..=63`; the duty buffer holds the PWM duty that is uploaded to the drivers. Gamma
//! paints write the gamma buffer and then [`Frame::flush_gamma`] recomputes every duty.
//! Duty paints skip the table and write duty directly.

use crate::gamma::{MAX_GAMMA, gamma_to_duty};
use crate::ring_layout::{
    COLUMN_COUNT, LED_COUNT, ROW_COUNT, column_of, ring_index, row_of, wrap_position,
};

/// Which buffer a paint writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Domain {
    /// Perceptual steps, flushed through the gamma table.
    #[default]
    Gamma,
    /// Raw PWM duty.
    Duty,
}

/// Direction of travel around the ring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Content moves toward higher ring positions.
    #[default]
    Clockwise,
    /// Content moves toward lower ring positions.
    CounterClockwise,
}

impl Rotation {
    #[must_use]
    pub const fn from_clockwise(clockwise: bool) -> Self {
        if clockwise { Self::Clockwise } else { Self::CounterClockwise }
    }

    /// `+1` for clockwise, `-1` for counter-clockwise.
    #[must_use]
    pub const fn step(self) -> i32 {
        match self {
            Self::Clockwise => 1,
            Self::CounterClockwise => -1,
        }
    }
}

/// Gamma and duty buffers for every LED on the ring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    gamma: [u8; LED_COUNT],
    duty: [u8; LED_COUNT],
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// A dark frame.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            gamma: [0; LED_COUNT],
            duty: [0; LED_COUNT],
        }
    }

    #[must_use]
    pub const fn gamma(&self) -> &[u8; LED_COUNT] {
        &self.gamma
    }

    #[must_use]
    pub const fn duty(&self) -> &[u8; LED_COUNT] {
        &self.duty
    }

    /// Gamma step at a ring position. Positions past the end wrap.
    #[must_use]
    #[expect(clippy::indexing_slicing, reason = "wrapped positions are in bounds")]
    pub const fn gamma_at(&self, position: usize) -> u8 {
        self.gamma[wrap_position(position)]
    }

    /// Duty at a ring position. Positions past the end wrap.
    #[must_use]
    #[expect(clippy::indexing_slicing, reason = "wrapped positions are in bounds")]
    pub const fn duty_at(&self, position: usize) -> u8 {
        self.duty[wrap_position(position)]
    }

    /// Write one gamma step without flushing. Positions past the end wrap.
    pub fn set_gamma(&mut self, position: usize, level: u8) {
        if let Some(slot) = self.gamma.get_mut(wrap_position(position)) {
            *slot = level;
        }
    }

    /// Write one duty value directly. Positions past the end wrap.
    pub fn set_duty(&mut self, position: usize, duty: u8) {
        if let Some(slot) = self.duty.get_mut(wrap_position(position)) {
            *slot = duty;
        }
    }

    /// Paint every LED with the same value.
    pub fn set_uniform(&mut self, level: u8, domain: Domain) {
        match domain {
            Domain::Gamma => {
                self.gamma = [level; LED_COUNT];
                self.flush_gamma();
            }
            Domain::Duty => self.duty = [level; LED_COUNT],
        }
    }

    /// Project a bottom-to-top row profile onto the ring.
    #[expect(clippy::indexing_slicing, reason = "row_of stays inside the grid")]
    pub fn paint_rows(&mut self, rows: &[u8; ROW_COUNT], domain: Domain) {
        self.paint_with(domain, |position| rows[row_of(position)]);
    }

    /// Project a left-to-right column profile onto the ring.
    #[expect(clippy::indexing_slicing, reason = "column_of stays inside the grid")]
    pub fn paint_columns(&mut self, columns: &[u8; COLUMN_COUNT], domain: Domain) {
        self.paint_with(domain, |position| columns[column_of(position)]);
    }

    fn paint_with(&mut self, domain: Domain, level_at: impl Fn(usize) -> u8) {
        let target = match domain {
            Domain::Gamma => &mut self.gamma,
            Domain::Duty => &mut self.duty,
        };
        for (position, slot) in target.iter_mut().enumerate() {
            *slot = level_at(position);
        }
        if domain == Domain::Gamma {
            self.flush_gamma();
        }
    }

    /// Clamp every gamma step to [`MAX_GAMMA`] and recompute its duty.
    pub fn flush_gamma(&mut self) {
        for (level, duty) in self.gamma.iter_mut().zip(self.duty.iter_mut()) {
            *level = (*level).min(MAX_GAMMA);
            *duty = gamma_to_duty(*level);
        }
    }

    /// Shift both buffers `amount` positions around the ring.
    ///
    /// Clockwise moves the LED at position `p` to `p + amount`. An amount that wraps
    /// to zero leaves the frame untouched.
    #[expect(clippy::arithmetic_side_effects, reason = "amount is in 1..LED_COUNT")]
    pub fn rotate(&mut self, amount: i32, rotation: Rotation) {
        let amount = ring_index(amount);
        if amount == 0 {
            return;
        }
        let source_step = match rotation {
            Rotation::Clockwise => LED_COUNT - amount,
            Rotation::CounterClockwise => amount,
        };
        self.gamma.rotate_left(source_step);
        self.duty.rotate_left(source_step);
    }

    /// Invert brightness in one domain. Gamma inversion flushes.
    pub fn invert(&mut self, domain: Domain) {
        match domain {
            Domain::Gamma => {
                for level in &mut self.gamma {
                    *level = MAX_GAMMA.saturating_sub(*level);
                }
                self.flush_gamma();
            }
            Domain::Duty => {
                for duty in &mut self.duty {
                    *duty = u8::MAX.saturating_sub(*duty);
                }
            }
        }
    }
}
