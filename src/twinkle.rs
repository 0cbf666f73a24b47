//! Twinkle ring animation state

/// Position of the moving gradient around a ring of `N` pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwinkleRing<const N: usize> {
    offset: usize,
}

impl<const N: usize> TwinkleRing<N> {
    pub const fn new() -> Self {
        Self { offset: 0 }
    }

    /// Start at `offset`, wrapped into the ring
    pub const fn with_offset(offset: usize) -> Self {
        Self { offset: offset % N }
    }

    /// Pixel currently blacked out
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Move the ring by one pixel
    pub fn advance(&mut self) -> usize {
        self.offset = (self.offset + 1) % N;
        self.offset
    }

    /// Pixel drawn for gradient step `index`
    pub const fn pixel(&self, index: usize) -> usize {
        (index + self.offset) % N
    }

    /// Value spacing between neighbouring gradient steps
    #[allow(clippy::cast_possible_truncation)]
    pub const FADE_STEP: u8 = (255 / N) as u8;

    /// Uncorrected value of gradient step `index`
    #[allow(clippy::cast_possible_truncation)]
    pub const fn gradient_value(index: usize) -> u8 {
        (index * Self::FADE_STEP as usize) as u8
    }
}

impl<const N: usize> Default for TwinkleRing<N> {
    fn default() -> Self {
        Self::new()
    }
}
