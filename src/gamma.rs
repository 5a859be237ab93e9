//! Perceptual brightness steps and their PWM duty values.

/// Number of perceptual brightness steps.
pub const GAMMA_LEVELS: usize = 64;
/// Brightest perceptual step.
pub const MAX_GAMMA: u8 = 63;

const GAMMA_SCALE: f32 = 64.0;

/// PWM duty for each perceptual step. Strictly increasing from off to full.
pub const GAMMA_TABLE: [u8; GAMMA_LEVELS] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0b, 0x0d, 0x0f, 0x11, 0x13, 0x16,
    0x1a, 0x1c, 0x1d, 0x1f, 0x22, 0x25, 0x28, 0x2e, 0x34, 0x38, 0x3c, 0x40, 0x44, 0x48, 0x4b, 0x4f,
    0x55, 0x5a, 0x5f, 0x64, 0x69, 0x6d, 0x72, 0x77, 0x7d, 0x80, 0x88, 0x8d, 0x94, 0x9a, 0xa0, 0xa7,
    0xac, 0xb0, 0xb9, 0xbf, 0xc6, 0xcb, 0xcf, 0xd6, 0xe1, 0xe9, 0xed, 0xf1, 0xf6, 0xfa, 0xfe, 0xff,
];

/// Duty for a perceptual step, clamping steps above [`MAX_GAMMA`].
#[must_use]
#[expect(clippy::indexing_slicing, reason = "level is clamped to the last table entry")]
pub const fn gamma_to_duty(level: u8) -> u8 {
    let level = if level > MAX_GAMMA { MAX_GAMMA } else { level };
    GAMMA_TABLE[level as usize]
}

/// Perceptual step for a unit-range intensity.
///
/// Values at or above 1.0 map to the top step and negative values (or NaN) map to 0.
#[must_use]
pub fn gamma_from_unit(value: f32) -> u8 {
    let value = if value >= 1.0 { 0.999 } else { value };
    if value.is_nan() || value < 0.0 {
        return 0;
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is in [0, 1), so the product is in [0, 64)"
    )]
    let level = (value * GAMMA_SCALE) as u8;
    level
}
