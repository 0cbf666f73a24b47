//! Pulse-distance infrared decoder
//!
//! Driven from the edge interrupt of the receiver pin. The receiver output
//! is active low, so a falling edge starts a mark and the time elapsed since
//! the previous edge is the length of the space that just ended; a rising
//! edge ends a mark.
//!
//! ```text
//!  ____                   _________     _     ___     _      ...   _
//!      |_________________|         |___| |___|   |___| |___      |_| |____
//!       header mark 9ms   space 4.5ms  0       1        0    ...  stop
//! ```
//!
//! Every duration is checked against a percentage window around its nominal
//! length, 25 % for the header and 50 % for data bits. A duration outside its
//! window drops the frame and the decoder waits for the next header. A frame
//! is accepted after 32 data bits followed by a valid stop mark.

pub mod timing;

use embassy_time::Instant;

use timing::{
    BIT_MARK_US, FRAME_BITS, HEADER_MARK_US, HEADER_SPACE_US, ONE_THRESHOLD_US, REPEAT_SPACE_US,
    RESYNC_SPACE_US, is_data_space, within_25_percent, within_50_percent,
};

/// Level of the receiver output after an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Carrier detected, a mark has started
    Low,
    /// Carrier gone, a space has started
    High,
}

/// Frame flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IrFlags(u8);

impl IrFlags {
    pub const EMPTY: Self = Self(0);
    /// Frame is a repeat of the previous one (button held)
    pub const IS_REPEAT: Self = Self(1 << 0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_repeat(self) -> bool {
        self.0 & Self::IS_REPEAT.0 != 0
    }
}

/// A decoded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrFrame {
    pub address: u8,
    pub command: u8,
    pub flags: IrFlags,
    /// Complete data word, least significant bit received first
    pub raw: u32,
}

impl IrFrame {
    #[allow(clippy::cast_possible_truncation)]
    const fn from_raw(raw: u32, flags: IrFlags) -> Self {
        Self {
            address: raw as u8,
            command: (raw >> 16) as u8,
            flags,
            raw,
        }
    }

    /// Inverted address byte as transmitted (not validated)
    #[allow(clippy::cast_possible_truncation)]
    pub const fn address_complement(&self) -> u8 {
        (self.raw >> 8) as u8
    }

    /// Inverted command byte as transmitted (not validated)
    #[allow(clippy::cast_possible_truncation)]
    pub const fn command_complement(&self) -> u8 {
        (self.raw >> 24) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    WaitingForStartMark,
    WaitingForStartSpace,
    WaitingForFirstDataMark,
    WaitingForDataMark,
    WaitingForDataSpace,
}

/// Infrared frame decoder
#[derive(Debug, Clone)]
pub struct IrDecoder {
    state: DecoderState,
    bit_counter: u8,
    raw: u32,
    mask: u32,
    last_change: Instant,
    flags: IrFlags,
    /// Word of the last emitted frame, replayed by repeat frames
    last_word: Option<u32>,
}

impl IrDecoder {
    pub const fn new() -> Self {
        Self {
            state: DecoderState::WaitingForStartMark,
            bit_counter: 0,
            raw: 0,
            mask: 1,
            last_change: Instant::from_ticks(0),
            flags: IrFlags::EMPTY,
            last_word: None,
        }
    }

    pub const fn state(&self) -> DecoderState {
        self.state
    }

    /// Number of data bits collected for the current frame
    pub const fn bit_counter(&self) -> u8 {
        self.bit_counter
    }

    /// Feed an edge observed at `now`.
    ///
    /// Returns the decoded frame when this edge completes one.
    pub fn on_level_change(&mut self, level: Level, now: Instant) -> Option<IrFrame> {
        let elapsed = now.saturating_duration_since(self.last_change).as_micros();
        self.last_change = now;
        self.advance(level, u32::try_from(elapsed).unwrap_or(u32::MAX))
    }

    /// Advance the state machine by one edge.
    ///
    /// `elapsed_us` is the time since the previous edge. After a frame is
    /// emitted the decoder is back in its initial state.
    pub fn advance(&mut self, level: Level, elapsed_us: u32) -> Option<IrFrame> {
        let mut frame = None;
        self.state = match level {
            Level::Low => self.on_mark_start(elapsed_us),
            Level::High => {
                let (state, completed) = self.on_mark_end(elapsed_us);
                frame = completed;
                state
            }
        };
        frame
    }

    /// `space_us` is the space that just ended
    fn on_mark_start(&mut self, space_us: u32) -> DecoderState {
        let state = if space_us > RESYNC_SPACE_US {
            DecoderState::WaitingForStartMark
        } else {
            self.state
        };

        match state {
            DecoderState::WaitingForStartMark => {
                self.flags = IrFlags::EMPTY;
                DecoderState::WaitingForStartSpace
            }
            DecoderState::WaitingForFirstDataMark => {
                if within_25_percent(space_us, HEADER_SPACE_US) {
                    self.bit_counter = 0;
                    self.raw = 0;
                    self.mask = 1;
                    self.last_word = None;
                    DecoderState::WaitingForDataSpace
                } else if let (true, Some(word)) =
                    (within_25_percent(space_us, REPEAT_SPACE_US), self.last_word)
                {
                    // Replay the last emitted word, only its stop mark follows
                    self.raw = word;
                    self.bit_counter = FRAME_BITS;
                    self.flags = IrFlags::IS_REPEAT;
                    DecoderState::WaitingForDataSpace
                } else {
                    DecoderState::WaitingForStartMark
                }
            }
            DecoderState::WaitingForDataMark => {
                if is_data_space(space_us) {
                    if space_us >= ONE_THRESHOLD_US {
                        self.raw |= self.mask;
                    }
                    self.mask <<= 1;
                    self.bit_counter += 1;
                    DecoderState::WaitingForDataSpace
                } else {
                    DecoderState::WaitingForStartMark
                }
            }
            DecoderState::WaitingForStartSpace | DecoderState::WaitingForDataSpace => {
                DecoderState::WaitingForStartMark
            }
        }
    }

    /// `mark_us` is the mark that just ended
    fn on_mark_end(&mut self, mark_us: u32) -> (DecoderState, Option<IrFrame>) {
        match self.state {
            DecoderState::WaitingForStartSpace => {
                if within_25_percent(mark_us, HEADER_MARK_US) {
                    (DecoderState::WaitingForFirstDataMark, None)
                } else {
                    (DecoderState::WaitingForStartMark, None)
                }
            }
            DecoderState::WaitingForDataSpace => {
                if !within_50_percent(mark_us, BIT_MARK_US) {
                    return (DecoderState::WaitingForStartMark, None);
                }
                if self.bit_counter >= FRAME_BITS {
                    self.last_word = Some(self.raw);
                    let frame = IrFrame::from_raw(self.raw, self.flags);
                    (DecoderState::WaitingForStartMark, Some(frame))
                } else {
                    (DecoderState::WaitingForDataMark, None)
                }
            }
            _ => (DecoderState::WaitingForStartMark, None),
        }
    }
}

impl Default for IrDecoder {
    fn default() -> Self {
        Self::new()
    }
}
