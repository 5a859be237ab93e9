use embassy_time::{Duration, Instant};

use crate::frame::{Domain, Frame};
use crate::gamma::MAX_GAMMA;
use crate::pacing::{Pace, Pacing, split_period};

// One step per level, up and back down.
const STEPS_PER_CYCLE: u32 = 2 * MAX_GAMMA as u32;

/// The whole ring fades up to full and back down.
#[derive(Clone, Debug, Default)]
pub struct Breathing {
    pace: Pace,
    level: u8,
    falling: bool,
}

impl Breathing {
    /// One full up-and-down cycle takes `period`.
    pub fn render(&mut self, frame: &mut Frame, now: Instant, period: Duration) {
        let step = split_period(period, STEPS_PER_CYCLE);
        match self.pace.check(step, now) {
            Pacing::NotDue => return,
            Pacing::Reset => {
                self.level = 0;
                self.falling = false;
            }
            Pacing::Advance => self.advance(),
        }
        frame.set_uniform(self.level, Domain::Gamma);
    }

    // Each extreme is held for one step while the direction flips.
    fn advance(&mut self) {
        if self.falling {
            if self.level == 0 {
                self.falling = false;
            } else {
                self.level = self.level.saturating_sub(1);
            }
        } else if self.level >= MAX_GAMMA {
            self.level = MAX_GAMMA;
            self.falling = true;
        } else {
            self.level = self.level.saturating_add(1);
        }
    }

    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }
}
