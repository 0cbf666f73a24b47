mod gamma;
mod hsv16;

pub use gamma::gamma8;
pub use hsv16::{Hsv16, hsv16_to_rgb};
use smart_leds::RGB8;

pub type Rgb = RGB8;
