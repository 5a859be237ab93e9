//! Frequency spectrum visualizations.

use embassy_time::{Duration, Instant};

use super::Heading;
use crate::audio::{AudioFrame, TRIMMED_BINS, trim_spectra};
use crate::frame::{Domain, Frame, Rotation};
use crate::gamma::gamma_from_unit;
use crate::pacing::Pace;
use crate::ring_layout::{Arc, COLUMN_COUNT, RING_LENGTH, ring_offset};

// Both channels are summed, so halve to stay in unit range.
const HORIZONTAL_GAIN: f32 = 0.5;
const SPLIT_GAIN: f32 = 1.0;

/// Summed spectrum as a bar graph across the columns.
#[derive(Clone, Debug, Default)]
pub struct HorizontalSpectrum {
    pace: Pace,
}

impl HorizontalSpectrum {
    /// `Ascending` puts the lowest frequencies on the left. The top six trimmed bins
    /// have no column and are dropped.
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
        let (left, right) = trim_spectra(audio);
        let mut columns = [0; COLUMN_COUNT];
        for (level, (&left, &right)) in columns.iter_mut().zip(left.iter().zip(right.iter())) {
            *level = gamma_from_unit(HORIZONTAL_GAIN * (left + right));
        }
        if heading == Heading::Descending {
            columns.reverse();
        }
        frame.paint_columns(&columns, Domain::Gamma);
    }
}

/// Paint each channel's trimmed spectrum around half of the ring.
///
/// With `Ascending` both spectra start at the bottom middle, left channel running
/// clockwise. Otherwise they start at the top middle with the channels swapped.
#[expect(clippy::arithmetic_side_effects, reason = "bin offsets are below 36")]
pub fn paint_split_spectrum(frame: &mut Frame, audio: &AudioFrame, heading: Heading) {
    let (left, right) = trim_spectra(audio);
    let (base, left_clockwise) = match heading {
        Heading::Ascending => (Arc::Bottom.middle(), true),
        Heading::Descending => (Arc::Top.middle(), false),
    };
    for (bin, (&left, &right)) in (0_i32..).zip(left.iter().zip(right.iter())) {
        let clockwise = ring_offset(base, bin + 1);
        let counter_clockwise = ring_offset(base, -bin);
        let (left_position, right_position) = if left_clockwise {
            (clockwise, counter_clockwise)
        } else {
            (counter_clockwise, clockwise)
        };
        frame.set_gamma(left_position, gamma_from_unit(SPLIT_GAIN * left));
        frame.set_gamma(right_position, gamma_from_unit(SPLIT_GAIN * right));
    }
    frame.flush_gamma();
}

const _: () = assert!(2 * TRIMMED_BINS == crate::ring_layout::LED_COUNT);

/// Left and right spectra mirrored around the ring.
#[derive(Clone, Debug, Default)]
pub struct SplitSpectrum {
    pace: Pace,
}

impl SplitSpectrum {
    pub fn render(
        &mut self,
        frame: &mut Frame,
        now: Instant,
        step: Duration,
        audio: &AudioFrame,
        heading: Heading,
    ) {
        if self.pace.tick(step, now) {
            paint_split_spectrum(frame, audio, heading);
        }
    }
}

/// The split spectrum, slowly turning.
#[derive(Clone, Debug, Default)]
pub struct SplitSpectrumSpin {
    pace: Pace,
    rotation: i32,
}

impl SplitSpectrumSpin {
    pub fn render(
        &mut self,
        frame: &mut Frame,
        now: Instant,
        step: Duration,
        audio: &AudioFrame,
        rotation: Rotation,
    ) {
        if !self.pace.tick(step, now) {
            return;
        }
        paint_split_spectrum(frame, audio, Heading::Ascending);
        frame.rotate(self.rotation, Rotation::Clockwise);
        self.rotation = self.rotation.wrapping_add(rotation.step()).rem_euclid(RING_LENGTH);
    }
}
