//! Volume meters with falling peak markers.

use embassy_time::{Duration, Instant};

use super::Heading;
use crate::audio::AudioFrame;
use crate::frame::{Domain, Frame};
use crate::gamma::MAX_GAMMA;
use crate::pacing::{NEVER, Pace, later};
use crate::ring_layout::{COLUMN_COUNT, ROW_COUNT};

const PEAK_LEVEL: u8 = MAX_GAMMA;
const BASE_LEVEL: u8 = 10;

const VERTICAL_GAIN: f32 = 8.0;
const VERTICAL_FALL_PERIOD: Duration = Duration::from_millis(200);
const HORIZONTAL_GAIN: f32 = 8.0;
const HORIZONTAL_FALL_PERIOD: Duration = Duration::from_millis(100);
const SPLIT_GAIN: f32 = 4.0;
const SPLIT_FALL_PERIOD: Duration = Duration::from_millis(150);
const HALF_COLUMNS: usize = COLUMN_COUNT / 2;

/// A bar `level` cells long, in cells of `0..N`.
///
/// Whole cells are lit at the peak level and the partial cell gets the matching share
/// of the way from base to peak. Returns the cells and the number of whole cells.
#[must_use]
pub fn bar_levels<const N: usize>(level: f32) -> ([u8; N], usize) {
    #[expect(clippy::cast_precision_loss, reason = "small cell counts")]
    let level = if level.is_nan() { 0.0 } else { level.clamp(0.0, N as f32) };
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "level is in [0, N]"
    )]
    let full = level as usize;
    #[expect(clippy::cast_precision_loss, reason = "small cell counts")]
    let fraction = level - full as f32;

    let mut cells = [BASE_LEVEL; N];
    for cell in cells.iter_mut().take(full) {
        *cell = PEAK_LEVEL;
    }
    if let Some(cell) = cells.get_mut(full) {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "fraction is in [0, 1)"
        )]
        let lift = (f32::from(PEAK_LEVEL.saturating_sub(BASE_LEVEL)) * fraction) as u8;
        *cell = BASE_LEVEL.saturating_add(lift);
    }
    (cells, full)
}

/// A peak marker that drops one cell per fall period unless the bar pushes it up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeakHold {
    location: usize,
    falls_at: Instant,
}

impl PeakHold {
    #[must_use]
    pub const fn new(location: usize) -> Self {
        Self {
            location,
            falls_at: NEVER,
        }
    }

    /// Move the marker for a bar of `full` whole cells and return its cell.
    pub fn update(&mut self, full: usize, cells: usize, fall_period: Duration, now: Instant) -> usize {
        if now > self.falls_at {
            self.falls_at = later(now, fall_period);
            self.location = self.location.saturating_sub(1);
        } else if full >= self.location {
            self.location = full.saturating_add(1).min(cells.saturating_sub(1));
            self.falls_at = later(now, fall_period);
        }
        self.location
    }

    #[must_use]
    pub const fn location(&self) -> usize {
        self.location
    }
}

fn meter<const N: usize>(
    peak: &mut PeakHold,
    level: f32,
    fall_period: Duration,
    now: Instant,
) -> [u8; N] {
    let (mut cells, full) = bar_levels::<N>(level);
    let marker = peak.update(full, N, fall_period, now);
    if let Some(cell) = cells.get_mut(marker) {
        *cell = PEAK_LEVEL;
    }
    cells
}

/// Overall loudness as a bar up (or down) the rows.
#[derive(Clone, Debug)]
pub struct VerticalVolume {
    pace: Pace,
    peak: PeakHold,
}

impl Default for VerticalVolume {
    fn default() -> Self {
        Self {
            pace: Pace::default(),
            peak: PeakHold::new(ROW_COUNT - 1),
        }
    }
}

impl VerticalVolume {
    /// `Ascending` fills from the bottom.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        now: Instant,
        step: Duration,
        audio: &AudioFrame,
        heading: Heading,
    ) {
        if !self.pace.tick(step, now) {
            return;
        }
        #[expect(clippy::cast_precision_loss, reason = "small row count")]
        let level = audio.combined_rms().min(1.0) * ROW_COUNT as f32 * VERTICAL_GAIN;
        let mut rows = meter::<ROW_COUNT>(&mut self.peak, level, VERTICAL_FALL_PERIOD, now);
        if heading == Heading::Descending {
            rows.reverse();
        }
        frame.paint_rows(&rows, Domain::Gamma);
    }

    #[must_use]
    pub const fn peak(&self) -> &PeakHold {
        &self.peak
    }
}

/// Overall loudness as a bar across the columns.
#[derive(Clone, Debug)]
pub struct HorizontalVolume {
    pace: Pace,
    peak: PeakHold,
}

impl Default for HorizontalVolume {
    fn default() -> Self {
        Self {
            pace: Pace::default(),
            peak: PeakHold::new(COLUMN_COUNT - 1),
        }
    }
}

impl HorizontalVolume {
    /// `Ascending` fills from the left.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        now: Instant,
        step: Duration,
        audio: &AudioFrame,
        heading: Heading,
    ) {
        if !self.pace.tick(step, now) {
            return;
        }
        #[expect(clippy::cast_precision_loss, reason = "small column count")]
        let level = audio.combined_rms().min(1.0) * COLUMN_COUNT as f32 * HORIZONTAL_GAIN;
        let mut columns = meter::<COLUMN_COUNT>(&mut self.peak, level, HORIZONTAL_FALL_PERIOD, now);
        if heading == Heading::Descending {
            columns.reverse();
        }
        frame.paint_columns(&columns, Domain::Gamma);
    }

    #[must_use]
    pub const fn peak(&self) -> &PeakHold {
        &self.peak
    }
}

/// Left channel grows leftward and right channel rightward from the centre columns.
#[derive(Clone, Debug)]
pub struct HorizontalSplitVolume {
    pace: Pace,
    peaks: [PeakHold; 2],
}

impl Default for HorizontalSplitVolume {
    fn default() -> Self {
        Self {
            pace: Pace::default(),
            peaks: [PeakHold::new(HALF_COLUMNS - 1); 2],
        }
    }
}

impl HorizontalSplitVolume {
    pub fn render(&mut self, frame: &mut Frame, now: Instant, step: Duration, audio: &AudioFrame) {
        if !self.pace.tick(step, now) {
            return;
        }
        let [left_peak, right_peak] = &mut self.peaks;
        let left = meter::<HALF_COLUMNS>(left_peak, split_level(audio.left_rms), SPLIT_FALL_PERIOD, now);
        let right = meter::<HALF_COLUMNS>(right_peak, split_level(audio.right_rms), SPLIT_FALL_PERIOD, now);

        let mut columns = [BASE_LEVEL; COLUMN_COUNT];
        let (left_half, right_half) = columns.split_at_mut(HALF_COLUMNS);
        for (column, level) in left_half.iter_mut().rev().zip(left.iter()) {
            *column = *level;
        }
        for (column, level) in right_half.iter_mut().zip(right.iter()) {
            *column = *level;
        }
        frame.paint_columns(&columns, Domain::Gamma);
    }

    /// Peak cells of the left and right halves, counted outward from the centre.
    #[must_use]
    pub fn peaks(&self) -> [usize; 2] {
        self.peaks.map(|peak| peak.location())
    }
}

#[expect(clippy::cast_precision_loss, reason = "small column count")]
fn split_level(rms: f32) -> f32 {
    rms.min(1.0) * COLUMN_COUNT as f32 * SPLIT_GAIN
}
