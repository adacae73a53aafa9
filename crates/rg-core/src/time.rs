//! Simulation time model.
//!
//! # Absolute vs. relative time
//!
//! The tick driver counts absolute time with a monotonically increasing
//! [`Tick`].  Claim ledgers, on the other hand, store every interval
//! **relative to the current tick** as a signed [`TickOffset`]: `0` is "now",
//! negative values lie in the past.  Each maintenance pass shifts every
//! relative interval one tick towards the past, which is how a future claim
//! becomes current and eventually expires.
//!
//! Integer ticks keep all schedule arithmetic exact.

use std::fmt;

/// A tick count relative to the current tick.  Negative means "already
/// elapsed".
pub type TickOffset = i64;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The tick driver's clock.  Holds no heap data.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Absolute tick that lies `offset` ticks from now, or `None` if it
    /// would precede tick 0.
    pub fn absolute(&self, offset: TickOffset) -> Option<Tick> {
        let abs = self.current_tick.0 as i64 + offset;
        (abs >= 0).then_some(Tick(abs as u64))
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_tick)
    }
}
