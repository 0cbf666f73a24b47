#![allow(dead_code)]

use core::convert::Infallible;

use starlight_headliner::{
    AdcControl, CompareTimer, Hsv16, IrDecoder, IrFrame, Level, OverflowTimer, StripDriver,
    TimerChannel, ir::timing::{BIT_MARK_US, HEADER_MARK_US, HEADER_SPACE_US, ONE_SPACE_US, ZERO_SPACE_US},
};

/// Strip driver that keeps the last committed frame
#[derive(Debug, Default)]
pub(crate) struct RecordingStrip {
    pub(crate) pixels: Vec<Hsv16>,
    pub(crate) brightness: u8,
    pub(crate) committed: Vec<Hsv16>,
    pub(crate) committed_brightness: u8,
    pub(crate) commits: usize,
    pub(crate) clears: usize,
}

impl RecordingStrip {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            pixels: vec![Hsv16::default(); len],
            committed: vec![Hsv16::default(); len],
            ..Self::default()
        }
    }
}

impl StripDriver for RecordingStrip {
    type Error = Infallible;

    fn clear(&mut self) {
        self.clears += 1;
        for pixel in &mut self.pixels {
            *pixel = Hsv16::default();
        }
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn set_pixel(&mut self, index: usize, color: Hsv16) {
        self.pixels[index] = color;
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.committed.clone_from(&self.pixels);
        self.committed_brightness = self.brightness;
        self.commits += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HwEvent {
    Arm(TimerChannel, u16),
    Disarm(TimerChannel),
    AdcEnable,
    AdcDisable,
    StartConversion,
}

/// Timer and ADC that log every call
#[derive(Debug, Default)]
pub(crate) struct MockHardware {
    pub(crate) events: Vec<HwEvent>,
    pub(crate) twinkle_armed: bool,
    pub(crate) music_armed: bool,
    pub(crate) adc_enabled: bool,
    pub(crate) sample: u8,
}

impl MockHardware {
    pub(crate) fn take_events(&mut self) -> Vec<HwEvent> {
        core::mem::take(&mut self.events)
    }
}

impl CompareTimer for MockHardware {
    fn arm(&mut self, channel: TimerChannel, compare: u16) {
        self.events.push(HwEvent::Arm(channel, compare));
        match channel {
            TimerChannel::Twinkle => self.twinkle_armed = true,
            TimerChannel::Music => self.music_armed = true,
        }
    }

    fn disarm(&mut self, channel: TimerChannel) {
        self.events.push(HwEvent::Disarm(channel));
        match channel {
            TimerChannel::Twinkle => self.twinkle_armed = false,
            TimerChannel::Music => self.music_armed = false,
        }
    }
}

impl AdcControl for MockHardware {
    fn enable(&mut self) {
        self.events.push(HwEvent::AdcEnable);
        self.adc_enabled = true;
    }

    fn disable(&mut self) {
        self.events.push(HwEvent::AdcDisable);
        self.adc_enabled = false;
    }

    fn start_conversion(&mut self) {
        self.events.push(HwEvent::StartConversion);
    }

    fn read_sample(&mut self) -> u8 {
        self.sample
    }
}

#[derive(Debug, Default)]
pub(crate) struct MockOverflowTimer {
    pub(crate) armed: bool,
    pub(crate) arm_calls: usize,
    pub(crate) disarm_calls: usize,
}

impl OverflowTimer for MockOverflowTimer {
    fn arm_overflow(&mut self) {
        self.armed = true;
        self.arm_calls += 1;
    }

    fn disarm_overflow(&mut self) {
        self.armed = false;
        self.disarm_calls += 1;
    }

    fn is_overflow_armed(&self) -> bool {
        self.armed
    }
}

/// Data word as transmitted: address, !address, command, !command
pub(crate) fn nec_word(address: u8, command: u8) -> u32 {
    u32::from(address)
        | u32::from(!address) << 8
        | u32::from(command) << 16
        | u32::from(!command) << 24
}

/// Edges of one complete frame, each with the time since the previous edge
pub(crate) fn frame_edges(address: u8, command: u8) -> Vec<(Level, u32)> {
    let word = nec_word(address, command);
    let mut edges = vec![
        (Level::Low, 40_000),
        (Level::High, HEADER_MARK_US),
        (Level::Low, HEADER_SPACE_US),
    ];
    for bit in 0..32 {
        edges.push((Level::High, BIT_MARK_US));
        let space = if word & (1 << bit) != 0 {
            ONE_SPACE_US
        } else {
            ZERO_SPACE_US
        };
        edges.push((Level::Low, space));
    }
    edges.push((Level::High, BIT_MARK_US));
    edges
}

/// Feed edges and collect every emitted frame
pub(crate) fn feed(decoder: &mut IrDecoder, edges: &[(Level, u32)]) -> Vec<IrFrame> {
    edges
        .iter()
        .filter_map(|&(level, elapsed)| decoder.advance(level, elapsed))
        .collect()
}
