//! Firmware constants and boot configuration.
//!
//! Timer periods are kept as [`Duration`]s and turned into 16-bit compare
//! values for a prescaled counter by [`TimerConfig::compare_ticks`].

use embassy_time::Duration;

use crate::mode::{LightMode, ModeState};
use crate::strip::StripParameters;

/// Number of pixels on each ring
pub const NUM_PIXELS: usize = 7;

pub const MAX_BRIGHTNESS: u8 = 250;
pub const MIN_BRIGHTNESS: u8 = 0;

/// Brightness step used at or below [`BRIGHTNESS_STEP_THRESHOLD`]
pub const SMALL_BRIGHTNESS_STEP: u8 = 10;
/// Brightness step used above [`BRIGHTNESS_STEP_THRESHOLD`]
pub const LARGE_BRIGHTNESS_STEP: u8 = 25;
/// Changes below this level are perceived better, so they use the small step
pub const BRIGHTNESS_STEP_THRESHOLD: u8 = 50;

pub const SATURATION_WHITE: u8 = 0;
pub const SATURATION_COLOR: u8 = 255;
pub const VALUE_COLOR: u8 = 255;

pub const MAX_HUE: u16 = u16::MAX;
pub const HUE_RED: u16 = 0;
pub const HUE_STEP: u16 = MAX_HUE / 10;
/// Hue advance applied on every twinkle tick to strips with rainbow enabled
pub const HUE_TWINKLE_STEP: u16 = MAX_HUE / 500;
/// Number of distinct hues reachable by a random colour pick
pub const RANDOM_COLOR_SLOTS: u16 = 10;

/// Lowest reactive brightness; silence never blacks the strips out
pub const REACTIVE_FLOOR: u8 = 10;
/// Smallest random bonus added to the wide strip above the floor
pub const REACTIVE_BONUS_MIN: u16 = 10;
/// Width of the random bonus range
pub const REACTIVE_BONUS_SPAN: u16 = 30;

pub const DEFAULT_BRIGHTNESS: u8 = 30;

pub const TWINKLE_PERIOD: Duration = Duration::from_millis(250);
pub const MUSIC_CAPTURE_PERIOD: Duration = Duration::from_millis(100);

/// How long the reverse sensors stay gated after a reverse edge
pub const SENSOR_WINDOW: Duration = Duration::from_millis(10_000);
/// Overflow period of an 8-bit counter at 16 MHz with a 1/1024 prescaler
pub const SENSOR_OVERFLOW_PERIOD: Duration = Duration::from_micros(16_384);

/// Number of overflow ticks covering [`SENSOR_WINDOW`]
#[allow(clippy::cast_possible_truncation)]
pub const SENSOR_OVERFLOW_THRESHOLD: u16 =
    (SENSOR_WINDOW.as_micros() / SENSOR_OVERFLOW_PERIOD.as_micros()) as u16;

/// Clock settings of the shared 16-bit compare timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub cpu_hz: u32,
    pub prescaler: u32,
    pub twinkle_period: Duration,
    pub music_period: Duration,
}

impl TimerConfig {
    /// 16 MHz core clock with a 1/256 prescaler.
    pub const DEFAULT: Self = Self {
        cpu_hz: 16_000_000,
        prescaler: 256,
        twinkle_period: TWINKLE_PERIOD,
        music_period: MUSIC_CAPTURE_PERIOD,
    };

    /// Compare value matching `period`.
    ///
    /// Integer division happens in the same order as the firmware computes
    /// it (ticks per millisecond first), and the result saturates at the
    /// counter width.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn compare_ticks(&self, period: Duration) -> u16 {
        let ticks_per_ms = (self.cpu_hz / self.prescaler / 1000) as u64;
        let ticks = ticks_per_ms * period.as_millis();
        if ticks > u16::MAX as u64 {
            u16::MAX
        } else {
            ticks as u16
        }
    }

    pub const fn twinkle_compare(&self) -> u16 {
        self.compare_ticks(self.twinkle_period)
    }

    pub const fn music_compare(&self) -> u16 {
        self.compare_ticks(self.music_period)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Boot configuration of the light engine
#[derive(Debug, Clone)]
pub struct LightEngineConfig {
    pub wide: StripParameters,
    pub narrow: StripParameters,
    pub modes: ModeState,
    pub timer: TimerConfig,
    /// Seed for random colour picks
    pub seed: u64,
}

impl Default for LightEngineConfig {
    fn default() -> Self {
        Self {
            wide: StripParameters::default(),
            narrow: StripParameters::default(),
            modes: ModeState::new(LightMode::Nothing),
            timer: TimerConfig::DEFAULT,
            seed: 0x5eed,
        }
    }
}
