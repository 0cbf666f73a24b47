//! Pulse-distance timings and tolerance windows, in microseconds.

/// Base pulse length
pub const UNIT_US: u32 = 560;
pub const HEADER_MARK_US: u32 = 16 * UNIT_US;
pub const HEADER_SPACE_US: u32 = 8 * UNIT_US;
/// Header space of a repeat frame
pub const REPEAT_SPACE_US: u32 = 4 * UNIT_US;
pub const BIT_MARK_US: u32 = UNIT_US;
pub const ONE_SPACE_US: u32 = 3 * UNIT_US;
pub const ZERO_SPACE_US: u32 = UNIT_US;
/// Data spaces at least this long decode as logical 1
pub const ONE_THRESHOLD_US: u32 = 2 * UNIT_US;
/// Any space longer than this restarts frame detection
pub const RESYNC_SPACE_US: u32 = 2 * HEADER_MARK_US;

/// Data bits per frame
pub const FRAME_BITS: u8 = 32;

pub const fn lower_25_percent(duration: u32) -> u32 {
    duration - duration / 4
}

pub const fn upper_25_percent(duration: u32) -> u32 {
    duration + duration / 4
}

pub const fn lower_50_percent(duration: u32) -> u32 {
    duration / 2
}

pub const fn upper_50_percent(duration: u32) -> u32 {
    duration + duration / 2
}

/// `elapsed` lies within 25 % of `expected`, bounds included
pub const fn within_25_percent(elapsed: u32, expected: u32) -> bool {
    elapsed >= lower_25_percent(expected) && elapsed <= upper_25_percent(expected)
}

/// `elapsed` lies within 50 % of `expected`, bounds included
pub const fn within_50_percent(elapsed: u32, expected: u32) -> bool {
    elapsed >= lower_50_percent(expected) && elapsed <= upper_50_percent(expected)
}

/// `elapsed` is a plausible data space, either a 0 or a 1
pub const fn is_data_space(elapsed: u32) -> bool {
    elapsed >= lower_50_percent(ZERO_SPACE_US) && elapsed <= upper_50_percent(ONE_SPACE_US)
}
