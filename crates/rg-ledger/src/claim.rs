//! A single reserved time interval.

use rg_core::TickOffset;

/// A reservation of a tile over the half-open interval `[start, end)`,
/// expressed in ticks relative to the current tick.
///
/// A claim with `start <= 0` is in effect: its agent is (or should be) on the
/// tile right now.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Claim {
    pub start: TickOffset,
    pub end:   TickOffset,
}

impl Claim {
    #[inline]
    pub fn new(start: TickOffset, end: TickOffset) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn duration(&self) -> TickOffset {
        self.end - self.start
    }

    /// `true` once the claim has started.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.start <= 0
    }

    /// `true` if the instant `t` falls inside `[start, end)`.
    #[inline]
    pub fn contains(&self, t: TickOffset) -> bool {
        self.start <= t && t < self.end
    }

    /// `true` if the whole claim lies inside the window `[from, to)`.
    #[inline]
    pub fn is_within(&self, from: TickOffset, to: TickOffset) -> bool {
        from <= self.start && self.end <= to
    }
}
