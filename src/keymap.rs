//! Remote control key map.
//!
//! # Button layout
//!
//! ```text
//!   [ 1 ][ 2 ][ 3 ]   69, 70, 71   wide only, narrow only, both
//!   [ 4 ][ 5 ][ 6 ]   68, 64, 67   twinkle, music, -
//!   [ 7 ][ 8 ][ 9 ]    7, 21,  9   rainbow, wide twinkle, random colour
//!   [ * ][ 0 ][ # ]   22, 25, 13   -, white, -
//!        [ ^ ]             24      brightness up
//!   [ < ][OK ][ > ]   8, 28, 90    colour down, static, colour up
//!        [ v ]             82      brightness down
//! ```

use crate::mode::{Direction, LightMode};
use crate::strip::Selection;

const IR_1: u8 = 69;
const IR_2: u8 = 70;
const IR_3: u8 = 71;
const IR_4: u8 = 68;
const IR_5: u8 = 64;
const IR_6: u8 = 67;
const IR_7: u8 = 7;
const IR_8: u8 = 21;
const IR_9: u8 = 9;
const IR_STAR: u8 = 22;
const IR_0: u8 = 25;
const IR_HASHTAG: u8 = 13;
const IR_UP: u8 = 24;
const IR_LEFT: u8 = 8;
const IR_OK: u8 = 28;
const IR_RIGHT: u8 = 90;
const IR_DOWN: u8 = 82;

/// Buttons of the remote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RemoteButton {
    One = IR_1,
    Two = IR_2,
    Three = IR_3,
    Four = IR_4,
    Five = IR_5,
    Six = IR_6,
    Seven = IR_7,
    Eight = IR_8,
    Nine = IR_9,
    Star = IR_STAR,
    Zero = IR_0,
    Hashtag = IR_HASHTAG,
    Up = IR_UP,
    Left = IR_LEFT,
    Ok = IR_OK,
    Right = IR_RIGHT,
    Down = IR_DOWN,
}

impl RemoteButton {
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            IR_1 => Self::One,
            IR_2 => Self::Two,
            IR_3 => Self::Three,
            IR_4 => Self::Four,
            IR_5 => Self::Five,
            IR_6 => Self::Six,
            IR_7 => Self::Seven,
            IR_8 => Self::Eight,
            IR_9 => Self::Nine,
            IR_STAR => Self::Star,
            IR_0 => Self::Zero,
            IR_HASHTAG => Self::Hashtag,
            IR_UP => Self::Up,
            IR_LEFT => Self::Left,
            IR_OK => Self::Ok,
            IR_RIGHT => Self::Right,
            IR_DOWN => Self::Down,
            _ => return None,
        })
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Action bound to this button, if any
    pub const fn action(self) -> Option<Action> {
        Some(match self {
            Self::One => Action::Select(Selection::Wide),
            Self::Two => Action::Select(Selection::Narrow),
            Self::Three => Action::Select(Selection::Both),
            Self::Four => Action::SelectMode(LightMode::Twinkle),
            Self::Five => Action::SelectMode(LightMode::Music),
            Self::Seven => Action::ToggleRainbow,
            Self::Eight => Action::ToggleTwinkle,
            Self::Nine => Action::RandomColor,
            Self::Zero => Action::White,
            Self::Up => Action::Brightness(Direction::Increase),
            Self::Down => Action::Brightness(Direction::Decrease),
            Self::Right => Action::Color(Direction::Increase),
            Self::Left => Action::Color(Direction::Decrease),
            Self::Ok => Action::SelectMode(LightMode::Static),
            Self::Six | Self::Star | Self::Hashtag => return None,
        })
    }
}

/// Resolved remote command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectMode(LightMode),
    Brightness(Direction),
    Color(Direction),
    /// Choose which strips brightness and colour commands apply to
    Select(Selection),
    /// Toggle hue cycling on the selected strips
    ToggleRainbow,
    /// Toggle whether the wide strip joins the twinkle ring
    ToggleTwinkle,
    /// Switch the selected strips to white
    White,
    /// Pick one of ten hues for the selected strips
    RandomColor,
}

impl Action {
    /// Resolve a decoded command byte
    pub fn from_code(code: u8) -> Option<Self> {
        RemoteButton::from_code(code)?.action()
    }

    /// Actions that leave the idle boot state
    pub const fn promotes_idle(self) -> bool {
        matches!(
            self,
            Self::Brightness(_) | Self::Color(_) | Self::White | Self::RandomColor
        )
    }
}
