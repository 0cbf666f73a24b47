//! Hardware control surface consumed by the core.
//!
//! Implemented per target; the core never touches registers. Every method
//! is called from inside a critical section whenever it reconfigures a
//! timer, so an interrupt never observes a half-configured peripheral.

/// Compare channel of the shared 16-bit timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerChannel {
    /// Channel A, advances the twinkle animation
    Twinkle,
    /// Channel B, triggers microphone conversions
    Music,
}

/// Compare channels sharing one counter
///
/// Disarming a channel only masks its interrupt. Implementations must not
/// reset or reconfigure the counter, the other channel may still rely on it.
pub trait CompareTimer {
    /// Set the channel's compare value and unmask its interrupt
    fn arm(&mut self, channel: TimerChannel, compare: u16);

    /// Mask the channel's interrupt
    fn disarm(&mut self, channel: TimerChannel);
}

/// Analog sampler fed by the microphone
pub trait AdcControl {
    fn enable(&mut self);

    fn disable(&mut self);

    /// Start a single conversion; completion raises the ADC interrupt
    fn start_conversion(&mut self);

    /// Read the 8-bit result of the last conversion
    fn read_sample(&mut self) -> u8;
}

/// Free-running overflow timer of the reverse-sensor variant
pub trait OverflowTimer {
    fn arm_overflow(&mut self);

    fn disarm_overflow(&mut self);

    fn is_overflow_armed(&self) -> bool;
}

/// Channel B compare match: kick off a microphone conversion
pub fn on_music_compare<A: AdcControl>(adc: &mut A) {
    adc.start_conversion();
}
