//! Cloud-style drifting columns with occasional column swaps, like a tracking glitch.

use embassy_time::{Duration, Instant};
use rand::{Rng, RngCore};

use super::{chance, pick_distinct, random_increment, random_walk};
use crate::frame::{Domain, Frame};
use crate::pacing::{Pace, Pacing, later};
use crate::ring_layout::{COLUMN_COUNT, offset_index};
use crate::{
    TRACKING_STEP, TRACKING_SWAP_DURATION, TRACKING_SWAP_PROBABILITY, TRACKING_SWAP_WIDTH,
};

pub const MIN_LEVEL: u8 = 10;
pub const MAX_LEVEL: u8 = 60;
const RESET_LEVEL: u8 = (MIN_LEVEL + MAX_LEVEL) / 2;
const MAX_INCREMENT: u8 = 3;
const TARGETS_PER_STEP: usize = 4;
const SWAP_SLOTS: usize = 3;
// Give up placing a swap after this many colliding draws.
const PLACEMENT_ATTEMPTS: usize = 32;

/// Timing and odds of the tracking effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackingConfig {
    pub step: Duration,
    pub swap_duration: Duration,
    /// Signed distance from a swapped column to its partner.
    pub swap_width: i32,
    /// Chance out of 256, per idle slot per step, that a swap starts.
    pub probability: u8,
}

impl TrackingConfig {
    pub const DEFAULT: Self = Self {
        step: TRACKING_STEP,
        swap_duration: TRACKING_SWAP_DURATION,
        swap_width: TRACKING_SWAP_WIDTH,
        probability: TRACKING_SWAP_PROBABILITY,
    };
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Swap {
    enabled: bool,
    ends_at: Option<Instant>,
    location: usize,
}

#[derive(Clone, Debug)]
pub struct Tracking {
    pace: Pace,
    columns: [u8; COLUMN_COUNT],
    swaps: [Swap; SWAP_SLOTS],
}

impl Default for Tracking {
    fn default() -> Self {
        Self {
            pace: Pace::default(),
            columns: [RESET_LEVEL; COLUMN_COUNT],
            swaps: [Swap::default(); SWAP_SLOTS],
        }
    }
}

impl Tracking {
    pub fn render<R: RngCore>(
        &mut self,
        frame: &mut Frame,
        now: Instant,
        config: &TrackingConfig,
        rng: &mut R,
    ) {
        match self.pace.check(config.step, now) {
            Pacing::NotDue => return,
            Pacing::Reset => {
                *self = Self {
                    pace: self.pace,
                    ..Self::default()
                };
                frame.paint_columns(&self.columns, Domain::Gamma);
                return;
            }
            Pacing::Advance => {}
        }

        let targets = pick_distinct::<R, TARGETS_PER_STEP>(rng, COLUMN_COUNT);
        for (column, increase) in targets {
            let increment = random_increment(rng, MAX_INCREMENT);
            if let Some(level) = self.columns.get_mut(column) {
                *level = random_walk(*level, increase, increment, MIN_LEVEL, MAX_LEVEL);
            }
        }

        for slot in 0..SWAP_SLOTS {
            self.service_swap(slot, now, config, rng);
        }

        frame.paint_columns(&self.columns, Domain::Gamma);
    }

    fn service_swap<R: RngCore>(
        &mut self,
        slot: usize,
        now: Instant,
        config: &TrackingConfig,
        rng: &mut R,
    ) {
        let Some(&swap) = self.swaps.get(slot) else {
            return;
        };
        if swap.enabled {
            if swap.ends_at.is_some_and(|ends_at| now > ends_at) {
                self.swap_columns(swap.location, config.swap_width);
                self.set_swap(slot, Swap::default());
            }
            return;
        }

        if !chance(rng, config.probability) {
            return;
        }
        let Some(location) = self.place_swap(slot, config.swap_width, rng) else {
            return;
        };
        self.swap_columns(location, config.swap_width);
        self.set_swap(
            slot,
            Swap {
                enabled: true,
                ends_at: Some(later(now, config.swap_duration)),
                location,
            },
        );
    }

    // A new swap may not start on another active swap's columns.
    fn place_swap<R: RngCore>(&self, slot: usize, width: i32, rng: &mut R) -> Option<usize> {
        (0..PLACEMENT_ATTEMPTS)
            .map(|_| rng.gen_range(0..COLUMN_COUNT))
            .find(|&location| {
                self.swaps.iter().enumerate().all(|(other, swap)| {
                    other == slot
                        || !swap.enabled
                        || (location != swap.location && location != partner_of(swap.location, width))
                })
            })
    }

    fn swap_columns(&mut self, location: usize, width: i32) {
        let location = offset_index(location, 0, COLUMN_COUNT);
        self.columns.swap(location, partner_of(location, width));
    }

    fn set_swap(&mut self, slot: usize, swap: Swap) {
        if let Some(entry) = self.swaps.get_mut(slot) {
            *entry = swap;
        }
    }

    /// Column levels as last painted, swaps included.
    #[must_use]
    pub const fn columns(&self) -> &[u8; COLUMN_COUNT] {
        &self.columns
    }

    /// Number of swaps currently in effect.
    #[must_use]
    pub fn active_swaps(&self) -> usize {
        self.swaps.iter().filter(|swap| swap.enabled).count()
    }
}

fn partner_of(location: usize, width: i32) -> usize {
    offset_index(location, width, COLUMN_COUNT)
}

#[cfg(test)]
mod tests {
    use embassy_time::{Duration, Instant};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::{COLUMN_COUNT, Swap, Tracking, TrackingConfig, partner_of};

    const START: Instant = Instant::from_millis(1_000);

    fn distinct_columns() -> Tracking {
        Tracking {
            columns: core::array::from_fn(|column| u8::try_from(column).unwrap_or(u8::MAX)),
            ..Tracking::default()
        }
    }

    fn start_swap(tracking: &mut Tracking, now: Instant, config: &TrackingConfig, rng: &mut SmallRng) -> Swap {
        (0..64)
            .find_map(|_| {
                tracking.service_swap(0, now, config, rng);
                tracking.swaps[0].enabled.then_some(tracking.swaps[0])
            })
            .expect("a swap starts at 255/256 odds")
    }

    #[test]
    fn a_swap_holds_for_its_duration_then_reverts_and_is_replaced() {
        let config = TrackingConfig {
            probability: 255,
            ..TrackingConfig::DEFAULT
        };
        let mut tracking = distinct_columns();
        let original = tracking.columns;
        let mut rng = SmallRng::seed_from_u64(11);

        let swap = start_swap(&mut tracking, START, &config, &mut rng);
        let partner = partner_of(swap.location, config.swap_width);
        assert_ne!(swap.location, partner);
        assert_eq!(tracking.columns[swap.location], original[partner]);
        assert_eq!(tracking.columns[partner], original[swap.location]);
        assert_eq!(tracking.active_swaps(), 1);

        let ends_at = swap.ends_at.expect("an active swap has an end");
        assert_eq!(ends_at, START + config.swap_duration);

        tracking.service_swap(0, ends_at, &config, &mut rng);
        assert_eq!(tracking.swaps[0], swap);
        assert_eq!(tracking.columns[swap.location], original[partner]);

        let after = ends_at + Duration::from_millis(1);
        tracking.service_swap(0, after, &config, &mut rng);
        assert_eq!(tracking.columns, original);
        assert_eq!(tracking.swaps[0], Swap::default());
        assert_eq!(tracking.active_swaps(), 0);

        let next = start_swap(&mut tracking, after, &config, &mut rng);
        assert_eq!(next.ends_at, Some(after + config.swap_duration));
        assert_ne!(tracking.columns, original);
    }

    #[test]
    fn swaps_wrap_around_the_last_column() {
        let mut tracking = distinct_columns();
        tracking.swap_columns(COLUMN_COUNT - 1, 2);
        assert_eq!(tracking.columns[COLUMN_COUNT - 1], 1);
        assert_eq!(tracking.columns[1], 35);
        tracking.swap_columns(0, -2);
        assert_eq!(tracking.columns[0], 34);
        assert_eq!(tracking.columns[COLUMN_COUNT - 2], 0);
    }
}
