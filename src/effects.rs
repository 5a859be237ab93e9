//! The animated lighting effects.
//!
//! Every effect is a plain state struct whose `render` method paints a [`Frame`](crate::Frame)
//! when its [`Pace`](crate::pacing::Pace) says it is due and leaves the frame alone
//! otherwise. `Default` is the never-run state. The [`Animator`](crate::Animator)
//! owns one of each and picks which one renders.

pub mod audio_level;
pub mod breathing;
pub mod bumps;
pub mod cloud;
pub mod spectrum_display;
pub mod spinning;
pub mod tracking;
pub mod volume;
pub mod wave;

use heapless::Vec;
use rand::{Rng, RngCore};

use crate::ring_layout::offset_index;

pub use audio_level::{AudioBalance, AudioUniform};
pub use breathing::Breathing;
pub use bumps::{Bumps, BumpsConfig};
pub use cloud::Cloud;
pub use spectrum_display::{HorizontalSpectrum, SplitSpectrum, SplitSpectrumSpin};
pub use spinning::Spinning;
pub use tracking::{Tracking, TrackingConfig};
pub use volume::{HorizontalSplitVolume, HorizontalVolume, VerticalVolume};
pub use wave::{HorizontalWave, VerticalWave};

/// Which way a lane-based effect travels across rows or columns.
///
/// `Ascending` runs bottom to top for rows and left to right for columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Heading {
    #[default]
    Ascending,
    Descending,
}

impl Heading {
    /// The user preference toggle picks the heading; `true` is the default direction.
    #[must_use]
    pub const fn from_user_control(user_control: bool) -> Self {
        if user_control { Self::Ascending } else { Self::Descending }
    }

    /// `+1` for ascending, `-1` for descending.
    #[must_use]
    pub const fn step(self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }

    /// Lane after `lane` in this heading, wrapping within `lanes`.
    ///
    /// # Panics
    ///
    /// Panics if `lanes` is zero.
    #[must_use]
    pub const fn next_lane(self, lane: usize, lanes: usize) -> usize {
        offset_index(lane, self.step(), lanes)
    }
}

/// `COUNT` distinct targets in `0..limit`, each with a random direction. Fewer when
/// `limit` is smaller than `COUNT`.
pub(crate) fn pick_distinct<R: RngCore, const COUNT: usize>(
    rng: &mut R,
    limit: usize,
) -> Vec<(usize, bool), COUNT> {
    let wanted = COUNT.min(limit);
    let mut picks = Vec::new();
    while picks.len() < wanted {
        let target = rng.gen_range(0..limit);
        if picks.iter().any(|&(picked, _)| picked == target) {
            continue;
        }
        if picks.push((target, rng.gen_bool(0.5))).is_err() {
            break;
        }
    }
    picks
}

/// Uniform step size in `1..=max`.
pub(crate) fn random_increment<R: RngCore>(rng: &mut R, max: u8) -> u8 {
    rng.gen_range(1..=max.max(1))
}

/// True with a chance of `probability` out of 256.
pub(crate) fn chance<R: RngCore>(rng: &mut R, probability: u8) -> bool {
    rng.gen_ratio(u32::from(probability), 256)
}

/// Move `level` up or down by `increment`, landing inside `[min, max]`.
pub(crate) fn random_walk(level: u8, increase: bool, increment: u8, min: u8, max: u8) -> u8 {
    let level = level.clamp(min, max);
    let moved = if increase {
        level.saturating_add(increment)
    } else {
        level.saturating_sub(increment)
    };
    moved.clamp(min, max)
}
