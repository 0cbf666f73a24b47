//! Microphone-reactive brightness
//!
//! Runs in the ADC completion interrupt. Each sample becomes a candidate
//! brightness per strip, and each strip moves three quarters of the way from
//! its current brightness towards its candidate. The main loop picks the
//! result up through the "brightness changed" flag.

use tinyrand::{RandRange, Seeded, StdRand};

use crate::config::{MAX_BRIGHTNESS, REACTIVE_BONUS_MIN, REACTIVE_BONUS_SPAN, REACTIVE_FLOOR};
use crate::hardware::AdcControl;
use crate::shared::SharedState;
use crate::strip::StripId;

/// Target brightness for each strip derived from one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidates {
    pub wide: u8,
    pub narrow: u8,
}

/// Raise silent samples to the reactive floor
pub const fn floor_sample(sample: u8) -> u8 {
    if sample > REACTIVE_FLOOR {
        sample
    } else {
        REACTIVE_FLOOR
    }
}

/// Candidates for an already floored sample.
///
/// `bonus` is only added to the wide strip when the sample is above the
/// floor, and the sum wraps at the maximum brightness.
#[allow(clippy::cast_possible_truncation)]
pub const fn candidates(floored: u8, bonus: u8) -> Candidates {
    let bonus = if floored > REACTIVE_FLOOR { bonus as u16 } else { 0 };
    let wide = (floored as u16 + bonus) % MAX_BRIGHTNESS as u16;
    Candidates {
        wide: wide as u8,
        narrow: floored,
    }
}

/// Move three quarters of the way from `current` to `candidate`.
///
/// The distance moved is rounded down in both directions, and the result
/// wraps at the maximum brightness. Truncating `current - 0.75 * diff` as a
/// float would land one lower on some decreases (100 toward 19 gives 39, here
/// 40).
#[allow(clippy::cast_possible_truncation)]
pub const fn smooth_toward(current: u8, candidate: u8) -> u8 {
    let current = current as u16;
    let candidate = candidate as u16;
    let next = if candidate > current {
        current + (candidate - current) * 3 / 4
    } else {
        current - (current - candidate) * 3 / 4
    };
    (next % MAX_BRIGHTNESS as u16) as u8
}

/// ADC completion handler state
pub struct AdcSampler<R = StdRand> {
    rng: R,
}

impl AdcSampler<StdRand> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRand::seed(seed))
    }
}

impl<R: RandRange<u16>> AdcSampler<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Random brightness bonus for the wide strip
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_bonus(&mut self) -> u8 {
        self.rng
            .next_range(REACTIVE_BONUS_MIN..REACTIVE_BONUS_MIN + REACTIVE_BONUS_SPAN) as u8
    }

    /// ADC interrupt: read the finished conversion and apply it
    pub fn on_conversion_complete<A: AdcControl>(&mut self, adc: &mut A, shared: &SharedState) {
        let sample = adc.read_sample();
        self.apply_sample(sample, shared);
    }

    /// Smooth both strips towards `sample` and notify the main loop.
    pub fn apply_sample(&mut self, sample: u8, shared: &SharedState) -> Candidates {
        let bonus = self.next_bonus();
        let targets = candidates(floor_sample(sample), bonus);

        for (strip, candidate) in [(StripId::Wide, targets.wide), (StripId::Narrow, targets.narrow)] {
            let current = shared.reactive_brightness(strip);
            shared.set_reactive_brightness(strip, smooth_toward(current, candidate));
        }

        shared.raise_brightness_changed();
        targets
    }
}
