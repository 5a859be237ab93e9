//! Host-level tests for the audio contract and spectrum trimming.

use logo_lights::AudioFrame;
use logo_lights::audio::{SPECTRUM_BINS, TRIMMED_BINS, combined_rms, trim_spectra, trim_spectrum};

fn numbered() -> [f32; SPECTRUM_BINS] {
    let mut spectrum = [0.0; SPECTRUM_BINS];
    for (bin, value) in spectrum.iter_mut().enumerate() {
        *value = f32::from(u8::try_from(bin).unwrap());
    }
    spectrum
}

#[test]
fn combined_rms_matches_the_quadratic_mean() {
    assert!((combined_rms(0.6, 0.8) - 0.707_106_8).abs() < 1e-4);
    assert!(combined_rms(0.0, 0.0).abs() < f32::EPSILON);
    assert!((combined_rms(1.0, 1.0) - 1.0).abs() < 1e-6);
}

#[test]
fn silent_frame_is_all_zero() {
    let silent = AudioFrame::default();
    assert_eq!(silent, AudioFrame::SILENT);
    assert!(silent.left.iter().chain(silent.right.iter()).all(|&bin| bin == 0.0));
    assert!(silent.combined_rms().abs() < f32::EPSILON);
}

#[test]
fn trim_keeps_low_bins_and_decimates_the_rest() {
    let trimmed = trim_spectrum(&numbered());
    assert_eq!(trimmed.len(), TRIMMED_BINS);
    for (slot, &value) in trimmed.iter().enumerate().take(8) {
        assert_eq!(value, f32::from(u8::try_from(slot).unwrap()));
    }
    assert_eq!(trimmed[8], 8.0);
    assert_eq!(trimmed[9], 10.0);
    assert_eq!(trimmed[20], 32.0);
    assert_eq!(trimmed[35], 62.0);
}

#[test]
fn trim_spectra_keeps_channels_apart() {
    let mut audio = AudioFrame::SILENT;
    audio.left = numbered();
    audio.right[10] = 0.5;
    let (left, right) = trim_spectra(&audio);
    assert_eq!(left, trim_spectrum(&numbered()));
    assert_eq!(right[9], 0.5);
    assert_eq!(right.iter().filter(|&&bin| bin != 0.0).count(), 1);
}
