#![no_std]

pub mod arbiter;
pub mod color;
pub mod config;
pub mod driver;
pub mod engine;
pub mod hardware;
pub mod ir;
pub mod keymap;
pub mod mode;
pub mod reverse_sensor;
pub mod sampler;
pub mod shared;
pub mod strip;
pub mod twinkle;

pub use arbiter::{ChannelChange, Reconciliation, ResourceArbiter};
pub use config::{LightEngineConfig, TimerConfig};
pub use driver::SmartLedsStrip;
pub use engine::LightEngine;
pub use hardware::{AdcControl, CompareTimer, OverflowTimer, TimerChannel};
pub use ir::{IrDecoder, IrFlags, IrFrame, Level};
pub use keymap::{Action, RemoteButton};
pub use mode::{Direction, LightMode, ModeState};
pub use reverse_sensor::ReverseSensorTimer;
pub use sampler::AdcSampler;
pub use shared::{Flag, SharedCell, SharedState};
pub use strip::{Selection, StripId, StripParameters, Strips};
pub use twinkle::TwinkleRing;

pub use color::{Hsv16, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED strip driver
///
/// Implement this trait to support different strip hardware. The driver
/// owns the pixel buffer, the HSV conversion and the global brightness
/// scale; the light engine only describes pixels.
pub trait StripDriver {
    /// Error returned when pushing a frame fails
    type Error;

    /// Set every pixel of the buffered frame to black
    fn clear(&mut self);

    /// Set the global brightness scale applied on commit
    fn set_brightness(&mut self, brightness: u8);

    /// Set a single buffered pixel
    fn set_pixel(&mut self, index: usize, color: Hsv16);

    /// Gamma-correct a value channel
    fn gamma8(&self, value: u8) -> u8 {
        color::gamma8(value)
    }

    /// Push the buffered frame to the strip
    fn commit(&mut self) -> Result<(), Self::Error>;
}
