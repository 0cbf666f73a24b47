//! Shared timer and ADC arbitration
//!
//! One compare timer serves two light modes: channel A paces the twinkle
//! animation and channel B paces microphone conversions. The arbiter enables
//! each channel (and the ADC) exactly while its mode is active. It only acts
//! on transition edges and remembers what it armed, so reconciling the same
//! mode pair again changes nothing.

#[cfg(feature = "log")]
use esp_println::println;

use crate::config::TimerConfig;
use crate::hardware::{AdcControl, CompareTimer, TimerChannel};
use crate::mode::{LightMode, ModeState};
use crate::strip::Strips;

/// What happened to a channel during a reconcile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelChange {
    Unchanged,
    Armed,
    Disarmed,
}

/// Outcome of [`ResourceArbiter::reconcile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub twinkle: ChannelChange,
    pub music: ChannelChange,
}

impl Reconciliation {
    pub const NONE: Self = Self {
        twinkle: ChannelChange::Unchanged,
        music: ChannelChange::Unchanged,
    };

    pub fn is_noop(&self) -> bool {
        *self == Self::NONE
    }
}

#[derive(Debug, Clone)]
pub struct ResourceArbiter {
    twinkle_compare: u16,
    music_compare: u16,
    twinkle_armed: bool,
    music_armed: bool,
}

impl ResourceArbiter {
    pub const fn new(timer: &TimerConfig) -> Self {
        Self {
            twinkle_compare: timer.twinkle_compare(),
            music_compare: timer.music_compare(),
            twinkle_armed: false,
            music_armed: false,
        }
    }

    pub const fn twinkle_armed(&self) -> bool {
        self.twinkle_armed
    }

    pub const fn music_armed(&self) -> bool {
        self.music_armed
    }

    /// Put both channels and the ADC into the disarmed state.
    ///
    /// Call once at boot, before the first reconcile.
    pub fn init<H>(&mut self, hw: &mut H)
    where
        H: CompareTimer + AdcControl,
    {
        critical_section::with(|_| {
            hw.disarm(TimerChannel::Twinkle);
            hw.disarm(TimerChannel::Music);
            hw.disable();
        });
        self.twinkle_armed = false;
        self.music_armed = false;
    }

    /// Align channel and ADC enablement with `modes`.
    ///
    /// Entering music saves each strip's brightness; leaving it restores
    /// that brightness after the ADC is off.
    pub fn reconcile<H>(&mut self, modes: ModeState, strips: &mut Strips, hw: &mut H) -> Reconciliation
    where
        H: CompareTimer + AdcControl,
    {
        let reconciliation = Reconciliation {
            twinkle: self.reconcile_twinkle(modes, hw),
            music: self.reconcile_music(modes, strips, hw),
        };

        #[cfg(feature = "log")]
        if !reconciliation.is_noop() {
            println!(
                "[ResourceArbiter.reconcile] {:?} -> {:?}: twinkle {:?}, music {:?}",
                modes.previous(),
                modes.current(),
                reconciliation.twinkle,
                reconciliation.music
            );
        }

        reconciliation
    }

    fn reconcile_twinkle<H: CompareTimer>(&mut self, modes: ModeState, hw: &mut H) -> ChannelChange {
        if modes.entered(LightMode::Twinkle) && !self.twinkle_armed {
            let compare = self.twinkle_compare;
            critical_section::with(|_| hw.arm(TimerChannel::Twinkle, compare));
            self.twinkle_armed = true;
            return ChannelChange::Armed;
        }

        if modes.left(LightMode::Twinkle) && self.twinkle_armed {
            critical_section::with(|_| hw.disarm(TimerChannel::Twinkle));
            self.twinkle_armed = false;
            return ChannelChange::Disarmed;
        }

        ChannelChange::Unchanged
    }

    fn reconcile_music<H>(&mut self, modes: ModeState, strips: &mut Strips, hw: &mut H) -> ChannelChange
    where
        H: CompareTimer + AdcControl,
    {
        if modes.entered(LightMode::Music) && !self.music_armed {
            strips.save_brightness();
            let compare = self.music_compare;
            critical_section::with(|_| {
                hw.arm(TimerChannel::Music, compare);
                hw.enable();
            });
            self.music_armed = true;
            return ChannelChange::Armed;
        }

        if modes.left(LightMode::Music) && self.music_armed {
            critical_section::with(|_| {
                hw.disarm(TimerChannel::Music);
                hw.disable();
            });
            strips.restore_brightness();
            self.music_armed = false;
            return ChannelChange::Disarmed;
        }

        ChannelChange::Unchanged
    }
}

impl Default for ResourceArbiter {
    fn default() -> Self {
        Self::new(&TimerConfig::DEFAULT)
    }
}
