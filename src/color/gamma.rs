//! Perceptual gamma correction for 8-bit channel values.

const GAMMA: f32 = 2.6;

/// Gamma-correct an 8-bit value with a 2.6 curve.
///
/// `0` and `255` map to themselves; low values collapse towards zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn gamma8(value: u8) -> u8 {
    let normalized = f32::from(value) / 255.0;
    let corrected = libm::powf(normalized, GAMMA) * 255.0 + 0.5;
    corrected.clamp(0.0, 255.0) as u8
}
