//! Per-strip runtime parameters and the command arithmetic applied to them.

use crate::color::Hsv16;
use crate::config::{
    BRIGHTNESS_STEP_THRESHOLD, DEFAULT_BRIGHTNESS, HUE_RED, HUE_STEP, LARGE_BRIGHTNESS_STEP,
    MAX_BRIGHTNESS, MIN_BRIGHTNESS, SATURATION_COLOR, SATURATION_WHITE, SMALL_BRIGHTNESS_STEP,
    VALUE_COLOR,
};
use crate::mode::Direction;

/// One of the two LED strips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StripId {
    Wide = 0,
    Narrow = 1,
}

impl StripId {
    pub const ALL: [Self; 2] = [Self::Wide, Self::Narrow];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Which strips brightness and colour commands apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Wide,
    Narrow,
    Both,
}

impl Selection {
    pub const fn includes(self, strip: StripId) -> bool {
        match self {
            Self::Both => true,
            Self::Wide => matches!(strip, StripId::Wide),
            Self::Narrow => matches!(strip, StripId::Narrow),
        }
    }
}

/// Runtime parameters of one strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripParameters {
    /// 0 is white, 255 is fully coloured
    pub saturation: u8,
    /// 0..=250
    pub brightness: u8,
    /// Brightness to restore when music mode ends
    pub saved_brightness: u8,
    pub hue: u16,
    /// Colour and brightness commands only apply when set
    pub selected: bool,
    /// Hue cycles on every twinkle tick when set
    pub rainbow: bool,
    /// Strip joins the twinkle ring animation when set
    pub twinkle: bool,
}

impl Default for StripParameters {
    fn default() -> Self {
        Self {
            saturation: SATURATION_WHITE,
            brightness: DEFAULT_BRIGHTNESS,
            saved_brightness: DEFAULT_BRIGHTNESS,
            hue: HUE_RED,
            selected: true,
            rainbow: false,
            twinkle: false,
        }
    }
}

impl StripParameters {
    /// Full-value colour of the strip
    pub const fn color(&self) -> Hsv16 {
        self.color_with_value(VALUE_COLOR)
    }

    pub const fn color_with_value(&self, val: u8) -> Hsv16 {
        Hsv16 {
            hue: self.hue,
            sat: self.saturation,
            val,
        }
    }

    /// Step the brightness in `direction`, clamped to `0..=250`.
    pub fn step_brightness(&mut self, direction: Direction) {
        let step = brightness_step(self.brightness, direction);
        self.brightness = match direction {
            Direction::Increase => self.brightness.saturating_add(step).min(MAX_BRIGHTNESS),
            Direction::Decrease => self.brightness.saturating_sub(step).max(MIN_BRIGHTNESS),
        };
    }

    /// Shift the hue by one colour step and force full saturation.
    pub fn step_color(&mut self, direction: Direction) {
        self.hue = match direction {
            Direction::Increase => self.hue.wrapping_add(HUE_STEP),
            Direction::Decrease => self.hue.wrapping_sub(HUE_STEP),
        };
        self.saturation = SATURATION_COLOR;
    }

    pub fn set_hue(&mut self, hue: u16) {
        self.hue = hue;
        self.saturation = SATURATION_COLOR;
    }

    pub fn set_white(&mut self) {
        self.saturation = SATURATION_WHITE;
    }

    pub fn advance_hue(&mut self, step: u16) {
        self.hue = self.hue.wrapping_add(step);
    }
}

/// Step size for a brightness change from `brightness` in `direction`.
///
/// At exactly the threshold, decreasing takes the small step while
/// increasing takes the large one.
pub const fn brightness_step(brightness: u8, direction: Direction) -> u8 {
    if brightness < BRIGHTNESS_STEP_THRESHOLD {
        SMALL_BRIGHTNESS_STEP
    } else if brightness > BRIGHTNESS_STEP_THRESHOLD {
        LARGE_BRIGHTNESS_STEP
    } else {
        match direction {
            Direction::Decrease => SMALL_BRIGHTNESS_STEP,
            Direction::Increase => LARGE_BRIGHTNESS_STEP,
        }
    }
}

/// Parameters of both strips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strips {
    pub wide: StripParameters,
    pub narrow: StripParameters,
}

impl Strips {
    pub const fn new(wide: StripParameters, narrow: StripParameters) -> Self {
        Self { wide, narrow }
    }

    pub const fn get(&self, strip: StripId) -> &StripParameters {
        match strip {
            StripId::Wide => &self.wide,
            StripId::Narrow => &self.narrow,
        }
    }

    pub fn get_mut(&mut self, strip: StripId) -> &mut StripParameters {
        match strip {
            StripId::Wide => &mut self.wide,
            StripId::Narrow => &mut self.narrow,
        }
    }

    /// Apply `f` to every strip whose selection flag is set
    pub fn for_each_selected(&mut self, mut f: impl FnMut(&mut StripParameters)) {
        for strip in [&mut self.wide, &mut self.narrow] {
            if strip.selected {
                f(strip);
            }
        }
    }

    pub fn select(&mut self, selection: Selection) {
        self.wide.selected = selection.includes(StripId::Wide);
        self.narrow.selected = selection.includes(StripId::Narrow);
    }

    pub fn save_brightness(&mut self) {
        self.wide.saved_brightness = self.wide.brightness;
        self.narrow.saved_brightness = self.narrow.brightness;
    }

    pub fn restore_brightness(&mut self) {
        self.wide.brightness = self.wide.saved_brightness;
        self.narrow.brightness = self.narrow.saved_brightness;
    }
}
