//! Light mode state machine
//!
//! The mode pair is a plain value so transition edges can be checked without
//! touching any hardware.

/// Light mode of both strips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightMode {
    /// Both strips show a flat colour
    Static,
    /// Narrow ring (and optionally the wide one) runs the gradient animation
    Twinkle,
    /// Brightness follows the microphone
    Music,
    /// Boot state, nothing is rendered
    Nothing,
}

/// Direction of a brightness or colour change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

/// Previous and current light mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeState {
    previous: LightMode,
    current: LightMode,
}

impl ModeState {
    /// Both halves of the pair start at `mode`
    pub const fn new(mode: LightMode) -> Self {
        Self {
            previous: mode,
            current: mode,
        }
    }

    /// Build an explicit pair
    pub const fn from_pair(previous: LightMode, current: LightMode) -> Self {
        Self { previous, current }
    }

    pub const fn previous(self) -> LightMode {
        self.previous
    }

    pub const fn current(self) -> LightMode {
        self.current
    }

    /// Switch to `mode`, remembering the mode that was active before.
    pub fn select(&mut self, mode: LightMode) {
        self.previous = self.current;
        self.current = mode;
    }

    /// Leave the idle boot state after the first brightness or colour
    /// command.
    ///
    /// Only `current` changes; the previous mode is left as it was.
    /// Returns `true` if a promotion happened.
    pub fn promote_from_idle(&mut self) -> bool {
        if self.current == LightMode::Nothing {
            self.current = LightMode::Static;
            return true;
        }
        false
    }

    /// `mode` is current but was not active before
    pub fn entered(self, mode: LightMode) -> bool {
        self.current == mode && self.previous != mode
    }

    /// `mode` was active before but is not current
    pub fn left(self, mode: LightMode) -> bool {
        self.previous == mode && self.current != mode
    }
}

impl Default for ModeState {
    fn default() -> Self {
        Self::new(LightMode::Nothing)
    }
}
