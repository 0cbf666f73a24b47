//! State shared between interrupt handlers and the main loop.
//!
//! Every field has exactly one writer context. Interrupt handlers raise
//! flags and write the fields they own; the main loop clears the flags once
//! it has consumed them. Each access is a short critical section around a
//! `Cell`, so a `SharedState` can live in a `static`.

use core::cell::Cell;

use critical_section::Mutex;

use crate::ir::IrFrame;
use crate::strip::{StripId, Strips};

/// Event flag raised from interrupt context and cleared by its consumer
pub struct Flag {
    inner: Mutex<Cell<bool>>,
}

impl Flag {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(false)),
        }
    }

    pub fn raise(&self) {
        critical_section::with(|cs| self.inner.borrow(cs).set(true));
    }

    /// Clear the flag, returning whether it was raised.
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).replace(false))
    }

    pub fn is_raised(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }
}

impl Default for Flag {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-writer value readable from any context
pub struct SharedCell<T: Copy> {
    inner: Mutex<Cell<T>>,
}

impl<T: Copy> SharedCell<T> {
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(Cell::new(value)),
        }
    }

    pub fn get(&self) -> T {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }

    pub fn set(&self, value: T) {
        critical_section::with(|cs| self.inner.borrow(cs).set(value));
    }
}

/// Mailbox between the interrupt handlers and the main loop
///
/// | field                 | writer                                   |
/// |-----------------------|------------------------------------------|
/// | `command`             | IR decoder callback                      |
/// | `mode_change`         | IR callback / main loop                  |
/// | `twinkle_advance`     | channel A / main loop                    |
/// | `brightness_changed`  | ADC sampler / main loop                  |
/// | `reactive_brightness` | ADC sampler / main loop, ADC ISR masked  |
pub struct SharedState {
    command: SharedCell<u8>,
    mode_change: Flag,
    twinkle_advance: Flag,
    brightness_changed: Flag,
    reactive_brightness: [SharedCell<u8>; 2],
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            command: SharedCell::new(0),
            mode_change: Flag::new(),
            twinkle_advance: Flag::new(),
            brightness_changed: Flag::new(),
            reactive_brightness: [SharedCell::new(0), SharedCell::new(0)],
        }
    }

    /// Decoder callback: latch the command and ask the main loop to decode
    /// it.
    pub fn on_ir_frame(&self, frame: IrFrame) {
        self.command.set(frame.command);
        self.mode_change.raise();
    }

    /// Channel A compare match: advance the twinkle ring
    pub fn on_twinkle_compare(&self) {
        self.twinkle_advance.raise();
    }

    /// Last latched command byte
    pub fn command(&self) -> u8 {
        self.command.get()
    }

    /// Consume a pending command
    pub fn take_command(&self) -> Option<u8> {
        self.mode_change.take().then(|| self.command.get())
    }

    pub fn take_twinkle_advance(&self) -> bool {
        self.twinkle_advance.take()
    }

    pub fn take_brightness_changed(&self) -> bool {
        self.brightness_changed.take()
    }

    pub fn mode_change_pending(&self) -> bool {
        self.mode_change.is_raised()
    }

    pub(crate) fn raise_brightness_changed(&self) {
        self.brightness_changed.raise();
    }

    /// Smoothed brightness last written by the ADC sampler
    pub fn reactive_brightness(&self, strip: StripId) -> u8 {
        self.reactive_brightness[strip.index()].get()
    }

    pub(crate) fn set_reactive_brightness(&self, strip: StripId, brightness: u8) {
        self.reactive_brightness[strip.index()].set(brightness);
    }

    /// Hand the strips' brightness to the sampler before it starts running.
    ///
    /// Only valid while the ADC is disabled, so the sampler is not a
    /// concurrent writer.
    pub fn seed_reactive_brightness(&self, strips: &Strips) {
        for strip in StripId::ALL {
            self.set_reactive_brightness(strip, strips.get(strip).brightness);
        }
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
