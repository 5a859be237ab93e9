//! Two bumps of light that wander around the ring on their own.
//!
//! A resting bump occasionally sets off on an excursion of up to twenty single-LED
//! steps at a random pace. When bumps meet, the nearer crest keeps its gradient and
//! the farther one's tail is cut short.

use embassy_time::{Duration, Instant};
use rand::{Rng, RngCore};

use super::chance;
use crate::frame::{Domain, Frame};
use crate::pacing::{NEVER, Pace, Pacing, later};
use crate::ring_layout::{LED_COUNT, ring_offset};
use crate::{BUMPS_MOVE_PROBABILITY, BUMPS_STEP};

const BASE_LEVEL: u8 = 10;
const BUMP_COUNT: usize = 2;
const BUMP_SPACING: usize = LED_COUNT / BUMP_COUNT;
const STAGES: [u8; 5] = [63, 55, 35, 20, BASE_LEVEL];
const MIN_MOVE_PERIOD_MS: u64 = 10;
const MAX_MOVE_PERIOD_MS: u64 = 50;
const MAX_EXCURSION_STEPS: u32 = 20;

/// Timing and odds of the bumps effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BumpsConfig {
    pub step: Duration,
    /// Chance out of 256, per resting bump per step, that an excursion starts.
    pub probability: u8,
}

impl BumpsConfig {
    pub const DEFAULT: Self = Self {
        step: BUMPS_STEP,
        probability: BUMPS_MOVE_PROBABILITY,
    };
}

impl Default for BumpsConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bump {
    location: usize,
    move_at: Instant,
    move_period: Duration,
    direction: i32,
    steps_remaining: u32,
}

impl Bump {
    const fn resting(location: usize) -> Self {
        Self {
            location,
            move_at: NEVER,
            move_period: Duration::from_millis(MAX_MOVE_PERIOD_MS),
            direction: 0,
            steps_remaining: 0,
        }
    }

    fn update<R: RngCore>(&mut self, now: Instant, probability: u8, rng: &mut R) {
        if self.steps_remaining > 0 {
            if now > self.move_at {
                self.location = ring_offset(self.location, self.direction);
                self.steps_remaining = self.steps_remaining.saturating_sub(1);
                self.move_at = later(now, self.move_period);
            }
            return;
        }

        if !chance(rng, probability) {
            return;
        }
        self.steps_remaining = rng.gen_range(1..=MAX_EXCURSION_STEPS);
        self.direction = if rng.gen_bool(0.5) { 1 } else { -1 };
        self.move_period = Duration::from_millis(rng.gen_range(MIN_MOVE_PERIOD_MS..MAX_MOVE_PERIOD_MS));
        self.move_at = later(now, self.move_period);
    }
}

#[derive(Clone, Debug)]
pub struct Bumps {
    pace: Pace,
    bumps: [Bump; BUMP_COUNT],
}

impl Default for Bumps {
    fn default() -> Self {
        Self {
            pace: Pace::default(),
            bumps: Self::spread(),
        }
    }
}

impl Bumps {
    const fn spread() -> [Bump; BUMP_COUNT] {
        [Bump::resting(0), Bump::resting(BUMP_SPACING)]
    }

    pub fn render<R: RngCore>(
        &mut self,
        frame: &mut Frame,
        now: Instant,
        config: &BumpsConfig,
        rng: &mut R,
    ) {
        match self.pace.check(config.step, now) {
            Pacing::NotDue => return,
            // A reset still draws this tick.
            Pacing::Reset => self.bumps = Self::spread(),
            Pacing::Advance => {}
        }

        frame.set_uniform(BASE_LEVEL, Domain::Gamma);
        for bump in &mut self.bumps {
            bump.update(now, config.probability, rng);
        }

        let locations = self.locations();
        for &location in &locations {
            paint_crest(frame, location, &locations);
        }
        frame.flush_gamma();
    }

    /// Current crest positions.
    #[must_use]
    pub fn locations(&self) -> [usize; BUMP_COUNT] {
        self.bumps.map(|bump| bump.location)
    }
}

// Paint the crest, then each gradient stage outward while no other bump sits within
// the next `offset` positions beyond it on that side.
#[expect(clippy::arithmetic_side_effects, reason = "stage offsets are below 5")]
fn paint_crest(frame: &mut Frame, location: usize, locations: &[usize]) {
    let mut forward_dominant = true;
    let mut backward_dominant = true;
    for (offset, &level) in (0_i32..).zip(STAGES.iter()) {
        if offset == 0 {
            frame.set_gamma(location, level);
            continue;
        }
        let forward = ring_offset(location, offset);
        let backward = ring_offset(location, -offset);
        for scan in 0..offset {
            forward_dominant &= !locations.contains(&ring_offset(forward, scan));
            backward_dominant &= !locations.contains(&ring_offset(backward, -scan));
        }
        if forward_dominant {
            frame.set_gamma(forward, level);
        }
        if backward_dominant {
            frame.set_gamma(backward, level);
        }
    }
}
