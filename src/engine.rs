//! Light mode engine - the main loop side of the system
//!
//! Owns both strip drivers and every parameter that only the main loop
//! writes (mode pair, hue, saturation, selection, animation cursor).
//! Interrupt handlers talk to it exclusively through [`SharedState`].

use tinyrand::{RandRange, Seeded, StdRand};

#[cfg(feature = "log")]
use esp_println::println;

use crate::StripDriver;
use crate::arbiter::{Reconciliation, ResourceArbiter};
use crate::config::{HUE_STEP, HUE_TWINKLE_STEP, LightEngineConfig, RANDOM_COLOR_SLOTS};
use crate::hardware::{AdcControl, CompareTimer};
use crate::keymap::Action;
use crate::mode::{LightMode, ModeState};
use crate::shared::SharedState;
use crate::strip::{StripId, StripParameters, Strips};
use crate::twinkle::TwinkleRing;

/// Light engine driving two strips of `N` pixels
pub struct LightEngine<D, const N: usize> {
    wide: D,
    narrow: D,
    strips: Strips,
    modes: ModeState,
    twinkle: TwinkleRing<N>,
    arbiter: ResourceArbiter,
    rng: StdRand,
}

impl<D: StripDriver, const N: usize> LightEngine<D, N> {
    pub fn new(wide: D, narrow: D, config: &LightEngineConfig) -> Self {
        Self {
            wide,
            narrow,
            strips: Strips::new(config.wide, config.narrow),
            modes: config.modes,
            twinkle: TwinkleRing::new(),
            arbiter: ResourceArbiter::new(&config.timer),
            rng: StdRand::seed(config.seed),
        }
    }

    /// Put the shared timer and the ADC into a known state
    pub fn init<H>(&mut self, hw: &mut H)
    where
        H: CompareTimer + AdcControl,
    {
        self.arbiter.init(hw);
    }

    pub const fn strips(&self) -> &Strips {
        &self.strips
    }

    pub const fn modes(&self) -> ModeState {
        self.modes
    }

    pub const fn twinkle(&self) -> &TwinkleRing<N> {
        &self.twinkle
    }

    pub const fn arbiter(&self) -> &ResourceArbiter {
        &self.arbiter
    }

    pub const fn driver(&self, strip: StripId) -> &D {
        match strip {
            StripId::Wide => &self.wide,
            StripId::Narrow => &self.narrow,
        }
    }

    /// One main loop iteration.
    ///
    /// Each flag is consumed independently. A pending command is decoded
    /// first, then the active mode is rendered. Flags raised for a mode that
    /// is no longer active are dropped.
    pub fn poll<H>(&mut self, shared: &SharedState, hw: &mut H) -> Result<(), D::Error>
    where
        H: CompareTimer + AdcControl,
    {
        if let Some(code) = shared.take_command() {
            self.dispatch(code, shared, hw);
        }

        let advance = shared.take_twinkle_advance();
        let brightness_changed = shared.take_brightness_changed();

        match self.modes.current() {
            LightMode::Static => self.render_static(),
            LightMode::Twinkle if advance => self.twinkle_tick(),
            LightMode::Music if brightness_changed => self.apply_reactive_brightness(shared),
            LightMode::Twinkle | LightMode::Music | LightMode::Nothing => Ok(()),
        }
    }

    /// Decode a command byte and apply it.
    ///
    /// Unknown codes are ignored and return `None`.
    pub fn dispatch<H>(&mut self, code: u8, shared: &SharedState, hw: &mut H) -> Option<Reconciliation>
    where
        H: CompareTimer + AdcControl,
    {
        let Some(action) = Action::from_code(code) else {
            #[cfg(feature = "log")]
            println!("[LightEngine.dispatch] ignoring unknown command {}", code);
            return None;
        };

        #[cfg(feature = "log")]
        println!("[LightEngine.dispatch] command {} -> {:?}", code, action);

        Some(self.apply(action, shared, hw))
    }

    /// Apply a resolved action, then reconcile timer and ADC usage.
    pub fn apply<H>(&mut self, action: Action, shared: &SharedState, hw: &mut H) -> Reconciliation
    where
        H: CompareTimer + AdcControl,
    {
        match action {
            Action::SelectMode(mode) => self.modes.select(mode),
            Action::Brightness(direction) => {
                self.strips.for_each_selected(|strip| strip.step_brightness(direction));
                if self.modes.current() == LightMode::Music {
                    self.hand_brightness_to_sampler(shared);
                }
            }
            Action::Color(direction) => {
                self.strips.for_each_selected(|strip| strip.step_color(direction));
            }
            Action::Select(selection) => self.strips.select(selection),
            Action::ToggleRainbow => {
                self.strips.for_each_selected(|strip| strip.rainbow = !strip.rainbow);
            }
            Action::ToggleTwinkle => self.strips.wide.twinkle = !self.strips.wide.twinkle,
            Action::White => self.strips.for_each_selected(StripParameters::set_white),
            Action::RandomColor => {
                let hue = self.random_hue();
                self.strips.for_each_selected(|strip| strip.set_hue(hue));
            }
        }

        if action.promotes_idle() {
            self.modes.promote_from_idle();
        }

        self.reconcile(shared, hw)
    }

    /// Align timer channels and the ADC with the current mode pair.
    ///
    /// Safe to call any number of times; only transition edges act.
    pub fn reconcile<H>(&mut self, shared: &SharedState, hw: &mut H) -> Reconciliation
    where
        H: CompareTimer + AdcControl,
    {
        if self.modes.entered(LightMode::Music) && !self.arbiter.music_armed() {
            // ADC is still off, the sampler cannot be writing yet
            shared.seed_reactive_brightness(&self.strips);
        }
        self.arbiter.reconcile(self.modes, &mut self.strips, hw)
    }

    /// Flat colour at the strip's brightness on every pixel of both strips
    pub fn render_static(&mut self) -> Result<(), D::Error> {
        draw_flat::<D, N>(&mut self.wide, &self.strips.wide);
        draw_flat::<D, N>(&mut self.narrow, &self.strips.narrow);
        self.wide.commit()?;
        self.narrow.commit()
    }

    /// Advance the ring by one pixel and draw it
    pub fn twinkle_tick(&mut self) -> Result<(), D::Error> {
        self.twinkle.advance();
        self.render_twinkle()
    }

    /// Draw the gradient at the current ring offset, then rotate the hue of
    /// rainbow strips.
    pub fn render_twinkle(&mut self) -> Result<(), D::Error> {
        let wide = self.strips.wide;
        let narrow = self.strips.narrow;

        self.wide.set_brightness(wide.brightness);
        self.narrow.set_brightness(narrow.brightness);

        for index in 0..N {
            let pixel = self.twinkle.pixel(index);
            let value = TwinkleRing::<N>::gradient_value(index);

            let gamma = self.narrow.gamma8(value);
            self.narrow.set_pixel(pixel, narrow.color_with_value(gamma));

            if wide.twinkle {
                let gamma = self.wide.gamma8(value);
                self.wide.set_pixel(pixel, wide.color_with_value(gamma));
            } else {
                self.wide.set_pixel(index, wide.color());
            }
        }

        self.wide.commit()?;
        self.narrow.commit()?;

        for strip in [&mut self.strips.wide, &mut self.strips.narrow] {
            if strip.rainbow {
                strip.advance_hue(HUE_TWINKLE_STEP);
            }
        }
        Ok(())
    }

    /// Take the sampler's smoothed brightness and redraw
    pub fn apply_reactive_brightness(&mut self, shared: &SharedState) -> Result<(), D::Error> {
        for strip in StripId::ALL {
            self.strips.get_mut(strip).brightness = shared.reactive_brightness(strip);
        }
        self.render_static()
    }

    /// Move the sampler's smoothing origin to the stepped brightness.
    ///
    /// Runs with interrupts masked so the ADC handler cannot write the cells
    /// in between.
    fn hand_brightness_to_sampler(&self, shared: &SharedState) {
        critical_section::with(|_| {
            for strip in StripId::ALL {
                let params = self.strips.get(strip);
                if params.selected {
                    shared.set_reactive_brightness(strip, params.brightness);
                }
            }
        });
    }

    fn random_hue(&mut self) -> u16 {
        let slot = self.rng.next_range(0..RANDOM_COLOR_SLOTS);
        slot * HUE_STEP
    }
}

fn draw_flat<D: StripDriver, const N: usize>(driver: &mut D, params: &StripParameters) {
    driver.clear();
    driver.set_brightness(params.brightness);
    let color = params.color();
    for index in 0..N {
        driver.set_pixel(index, color);
    }
}
