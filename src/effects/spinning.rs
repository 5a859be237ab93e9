use embassy_time::{Duration, Instant};

use crate::frame::{Domain, Frame, Rotation};
use crate::pacing::{Pace, Pacing, split_period};
use crate::ring_layout::{LED_COUNT, RING_LENGTH, ring_offset};

const BASE_LEVEL: u8 = 10;
const BUMP_COUNT: usize = 2;
const BUMP_SPACING: usize = LED_COUNT / BUMP_COUNT;
#[expect(clippy::cast_possible_truncation, reason = "LED_COUNT is 72")]
const STEPS_PER_TURN: u32 = LED_COUNT as u32;
// Crest first; the last stage matches the base so the tails blend in.
const STAGES: [u8; 9] = [63, 55, 50, 45, 40, 35, 25, 20, BASE_LEVEL];

/// Two bright bumps chase each other around the ring.
#[derive(Clone, Debug, Default)]
pub struct Spinning {
    pace: Pace,
    rotation: i32,
}

impl Spinning {
    /// Each bump travels the whole ring once per `period`.
    ///
    /// The rotation accumulates, so flipping `rotation` mid-spin reverses smoothly.
    pub fn render(&mut self, frame: &mut Frame, now: Instant, period: Duration, rotation: Rotation) {
        let step = split_period(period, STEPS_PER_TURN);
        match self.pace.check(step, now) {
            Pacing::NotDue => return,
            Pacing::Reset => self.rotation = 0,
            Pacing::Advance => {}
        }

        frame.set_uniform(BASE_LEVEL, Domain::Gamma);
        for base in (0..LED_COUNT).step_by(BUMP_SPACING).take(BUMP_COUNT) {
            for (offset, &level) in (0_i32..).zip(STAGES.iter()) {
                frame.set_gamma(ring_offset(base, offset), level);
                frame.set_gamma(ring_offset(base, offset.wrapping_neg()), level);
            }
        }
        frame.rotate(self.rotation, Rotation::Clockwise);
        self.rotation = self.rotation.wrapping_add(rotation.step()).rem_euclid(RING_LENGTH);
        frame.flush_gamma();
    }
}
