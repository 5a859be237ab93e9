//! The audio input contract and spectrum decimation.

use libm::sqrtf;

/// Magnitude bins per channel in an [`AudioFrame`].
pub const SPECTRUM_BINS: usize = 64;
/// Bins per channel after [`trim_spectrum`].
pub const TRIMMED_BINS: usize = 36;
/// Low bins copied verbatim by [`trim_spectrum`]; the rest are decimated by two.
pub const PRESERVED_LOW_BINS: usize = 8;

/// One analysis window of stereo audio. Every value is in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioFrame {
    /// Normalized magnitudes of the left channel, lowest frequency first.
    pub left: [f32; SPECTRUM_BINS],
    /// Normalized magnitudes of the right channel, lowest frequency first.
    pub right: [f32; SPECTRUM_BINS],
    pub left_rms: f32,
    pub right_rms: f32,
}

impl AudioFrame {
    /// No sound on either channel.
    pub const SILENT: Self = Self {
        left: [0.0; SPECTRUM_BINS],
        right: [0.0; SPECTRUM_BINS],
        left_rms: 0.0,
        right_rms: 0.0,
    };

    /// Loudness of both channels together.
    #[must_use]
    pub fn combined_rms(&self) -> f32 {
        combined_rms(self.left_rms, self.right_rms)
    }
}

impl Default for AudioFrame {
    fn default() -> Self {
        Self::SILENT
    }
}

/// Root mean square of two channel levels.
///
/// ```rust
/// let rms = logo_lights::audio::combined_rms(0.6, 0.8);
/// assert!((rms - 0.7071).abs() < 1e-4);
/// ```
#[must_use]
pub fn combined_rms(left: f32, right: f32) -> f32 {
    sqrtf((left * left + right * right) / 2.0)
}

/// Keep the low bins and every other bin above them.
///
/// Output slot `i` reads input `i` for `i < 8` and input `8 + 2 * (i - 8)` above.
#[must_use]
pub fn trim_spectrum(spectrum: &[f32; SPECTRUM_BINS]) -> [f32; TRIMMED_BINS] {
    let (low, high) = spectrum.split_at(PRESERVED_LOW_BINS);
    let mut trimmed = [0.0; TRIMMED_BINS];
    for (out, &value) in trimmed.iter_mut().zip(low.iter().chain(high.iter().step_by(2))) {
        *out = value;
    }
    trimmed
}

const _: () = assert!(PRESERVED_LOW_BINS + (SPECTRUM_BINS - PRESERVED_LOW_BINS) / 2 == TRIMMED_BINS);

/// [`trim_spectrum`] applied to both channels, left first.
#[must_use]
pub fn trim_spectra(audio: &AudioFrame) -> ([f32; TRIMMED_BINS], [f32; TRIMMED_BINS]) {
    (trim_spectrum(&audio.left), trim_spectrum(&audio.right))
}
