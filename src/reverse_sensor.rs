//! Reverse-signal sensor timer
//!
//! A reverse edge powers the parking sensors and starts counting overflows
//! of a free-running timer. Once the counter reaches its threshold the timer
//! interrupt is masked again until the next edge.
//!
//! Both handlers run in interrupt context; firmware keeps the timer in a
//! `critical_section::Mutex<RefCell<_>>` and reads [`signal_power`] from the
//! main loop to drive the sensor supply pin.
//!
//! [`signal_power`]: ReverseSensorTimer::signal_power

use crate::config::SENSOR_OVERFLOW_THRESHOLD;
use crate::hardware::OverflowTimer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseSensorTimer {
    counter: u16,
    threshold: u16,
    signal_power: bool,
}

impl ReverseSensorTimer {
    pub const fn new() -> Self {
        Self::with_threshold(SENSOR_OVERFLOW_THRESHOLD)
    }

    pub const fn with_threshold(threshold: u16) -> Self {
        Self {
            counter: 0,
            threshold,
            signal_power: false,
        }
    }

    pub const fn counter(&self) -> u16 {
        self.counter
    }

    pub const fn threshold(&self) -> u16 {
        self.threshold
    }

    /// Sensor supply should be energized
    pub const fn signal_power(&self) -> bool {
        self.signal_power
    }

    /// Reverse edge: restart the window and power the sensors.
    ///
    /// Arming is skipped when the overflow interrupt is already running.
    pub fn on_reverse_edge<T: OverflowTimer>(&mut self, timer: &mut T) {
        self.counter = 0;
        self.signal_power = true;
        critical_section::with(|_| {
            if !timer.is_overflow_armed() {
                timer.arm_overflow();
            }
        });
    }

    /// Overflow tick: count towards the threshold.
    ///
    /// Reaching the threshold asserts sensor power, matching the installed
    /// firmware, and masks the overflow interrupt.
    pub fn on_overflow<T: OverflowTimer>(&mut self, timer: &mut T) {
        if self.counter >= self.threshold {
            return;
        }
        self.counter += 1;
        if self.counter >= self.threshold {
            self.signal_power = true;
            critical_section::with(|_| timer.disarm_overflow());
        }
    }
}

impl Default for ReverseSensorTimer {
    fn default() -> Self {
        Self::new()
    }
}
