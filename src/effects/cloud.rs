use embassy_time::{Duration, Instant};
use rand::RngCore;

use super::{pick_distinct, random_increment, random_walk};
use crate::frame::{Domain, Frame};
use crate::pacing::{Pace, Pacing};
use crate::ring_layout::LED_COUNT;

pub const MIN_LEVEL: u8 = 10;
pub const MAX_LEVEL: u8 = 60;
const RESET_LEVEL: u8 = (MIN_LEVEL + MAX_LEVEL) / 2;
const MAX_INCREMENT: u8 = 6;
const TARGETS_PER_STEP: usize = 12;

/// Random drifting brightness, like a lava lamp.
#[derive(Clone, Debug, Default)]
pub struct Cloud {
    pace: Pace,
}

impl Cloud {
    /// Nudge twelve distinct LEDs every `step`.
    pub fn render<R: RngCore>(&mut self, frame: &mut Frame, now: Instant, step: Duration, rng: &mut R) {
        match self.pace.check(step, now) {
            Pacing::NotDue => return,
            Pacing::Reset => {
                frame.set_uniform(RESET_LEVEL, Domain::Gamma);
                return;
            }
            Pacing::Advance => {}
        }

        let targets = pick_distinct::<R, TARGETS_PER_STEP>(rng, LED_COUNT);
        for (position, increase) in targets {
            let increment = random_increment(rng, MAX_INCREMENT);
            let level = random_walk(frame.gamma_at(position), increase, increment, MIN_LEVEL, MAX_LEVEL);
            frame.set_gamma(position, level);
        }
        frame.flush_gamma();
    }
}
