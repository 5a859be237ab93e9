//! Raw ADC samples in, [`AudioFrame`] out.
//!
//! Each channel is normalized around the ADC midpoint, measured for RMS, shaped with a
//! Hamming window and run through a 128-point real FFT. The 64 magnitudes are
//! log-scaled into `[0, 1]`.

use core::f32::consts::PI;

use embassy_time::Duration;
use libm::{cosf, log10f, sqrtf};
use microfft::real::rfft_128;

use crate::audio::{AudioFrame, SPECTRUM_BINS};

/// Samples per channel per analysis window.
pub const SAMPLE_COUNT: usize = 128;
/// Per-channel sampling rate.
pub const SAMPLE_RATE_HZ: u32 = 25_641;
/// Spacing between sample pairs at [`SAMPLE_RATE_HZ`].
pub const SAMPLE_PERIOD: Duration = Duration::from_micros(39);

const ADC_MIDPOINT: f32 = 2048.0;
#[expect(clippy::cast_precision_loss, reason = "128 is exact in f32")]
const SAMPLE_COUNT_F32: f32 = SAMPLE_COUNT as f32;
#[expect(clippy::cast_precision_loss, reason = "127 is exact in f32")]
const WINDOW_SPAN: f32 = (SAMPLE_COUNT - 1) as f32;
// log10 of the quietest magnitude that still lights anything.
const DECIBEL_FLOOR: f32 = 1.5;

/// Magnitudes and loudness of one channel.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelAnalysis {
    pub magnitudes: [f32; SPECTRUM_BINS],
    pub rms: f32,
}

/// Analyze one window of each channel.
#[must_use]
pub fn analyze(left: &[u16; SAMPLE_COUNT], right: &[u16; SAMPLE_COUNT]) -> AudioFrame {
    let left = analyze_channel(left);
    let right = analyze_channel(right);
    AudioFrame {
        left: left.magnitudes,
        right: right.magnitudes,
        left_rms: left.rms,
        right_rms: right.rms,
    }
}

/// Analyze one window of 12-bit samples.
#[must_use]
pub fn analyze_channel(samples: &[u16; SAMPLE_COUNT]) -> ChannelAnalysis {
    let mut window = [0.0; SAMPLE_COUNT];
    let mut sum_of_squares = 0.0;
    for (index, (&sample, value)) in samples.iter().zip(window.iter_mut()).enumerate() {
        let centered = f32::from(sample) / ADC_MIDPOINT - 1.0;
        sum_of_squares += centered * centered;
        *value = centered * hamming(index);
    }
    let rms = sqrtf(sum_of_squares / SAMPLE_COUNT_F32);

    let spectrum = rfft_128(&mut window);
    // The real FFT packs the Nyquist term into the imaginary part of the DC bin.
    spectrum[0].im = 0.0;

    let mut magnitudes = [0.0; SPECTRUM_BINS];
    for (magnitude, bin) in magnitudes.iter_mut().zip(spectrum.iter()) {
        *magnitude = normalize_magnitude(sqrtf(bin.norm_sqr()));
    }
    ChannelAnalysis { magnitudes, rms }
}

/// Log-scale a raw FFT magnitude into `[0, 1]`. Zero stays zero.
#[must_use]
pub fn normalize_magnitude(magnitude: f32) -> f32 {
    if magnitude.is_nan() || magnitude <= 0.0 {
        return 0.0;
    }
    ((log10f(magnitude) + DECIBEL_FLOOR) / DECIBEL_FLOOR).clamp(0.0, 1.0)
}

#[expect(clippy::cast_precision_loss, reason = "index is below 128")]
fn hamming(index: usize) -> f32 {
    let phase = 2.0 * PI * index as f32 / WINDOW_SPAN;
    0.54 - 0.46 * cosf(phase)
}
