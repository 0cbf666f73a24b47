//! [`StripDriver`] adapter for `smart-leds` writers.

use smart_leds::{SmartLedsWrite, brightness};

use crate::StripDriver;
use crate::color::{Hsv16, Rgb, hsv16_to_rgb};

/// Buffered strip of `N` pixels on top of any `smart-leds` writer
///
/// Pixels are converted to RGB when they are set; brightness is applied
/// when the frame is committed.
pub struct SmartLedsStrip<W, const N: usize> {
    writer: W,
    frame: [Rgb; N],
    brightness: u8,
}

impl<W, const N: usize> SmartLedsStrip<W, N>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            frame: [Rgb::default(); N],
            brightness: 255,
        }
    }

    /// Buffered frame, before brightness scaling
    pub fn frame(&self) -> &[Rgb; N] {
        &self.frame
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W, const N: usize> StripDriver for SmartLedsStrip<W, N>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    type Error = W::Error;

    fn clear(&mut self) {
        self.frame = [Rgb::default(); N];
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn set_pixel(&mut self, index: usize, color: Hsv16) {
        if let Some(pixel) = self.frame.get_mut(index) {
            *pixel = hsv16_to_rgb(color);
        }
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.writer
            .write(brightness(self.frame.iter().copied(), self.brightness))
    }
}
