use crate::color::Rgb;

/// Colour with a 16-bit hue circle
///
/// `smart_leds::hsv::Hsv` only has 256 hue steps, which is too coarse for
/// the slow rainbow rotation, so pixels are described with this type and
/// converted by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsv16 {
    pub hue: u16,
    pub sat: u8,
    pub val: u8,
}

/// Hue steps on the colour wheel (six sectors of 255)
const WHEEL_STEPS: u32 = 1530;

/// Convert a 16-bit hue colour to RGB.
///
/// The hue circle is rescaled to 1530 wheel steps, then saturation and value
/// are applied with `(x + 1)` multipliers so that 255 maps to unity.
#[allow(clippy::cast_possible_truncation)]
pub fn hsv16_to_rgb(color: Hsv16) -> Rgb {
    let wheel = (u32::from(color.hue) * WHEEL_STEPS + 32_768) >> 16;
    let (r, g, b) = wheel_rgb(wheel);

    let s1 = u32::from(color.sat) + 1;
    let s2 = 255 - u32::from(color.sat);
    let v1 = u32::from(color.val) + 1;
    let scale = |c: u32| -> u8 { (((((c * s1) >> 8) + s2) * v1) >> 8) as u8 };

    Rgb {
        r: scale(r),
        g: scale(g),
        b: scale(b),
    }
}

/// Fully saturated channel values for a wheel position
const fn wheel_rgb(wheel: u32) -> (u32, u32, u32) {
    if wheel < 510 {
        // red to green
        if wheel < 255 {
            (255, wheel, 0)
        } else {
            (510 - wheel, 255, 0)
        }
    } else if wheel < 1020 {
        // green to blue
        if wheel < 765 {
            (0, 255, wheel - 510)
        } else {
            (0, 1020 - wheel, 255)
        }
    } else if wheel < WHEEL_STEPS {
        // blue to red
        if wheel < 1275 {
            (wheel - 1020, 0, 255)
        } else {
            (255, 0, WHEEL_STEPS - wheel)
        }
    } else {
        (255, 0, 0)
    }
}
