//! The `ClaimLedger`: ordered reservations for one tile.
//!
//! # Data layout
//!
//! Claims are stored in a `BTreeMap` keyed by `(absolute start, insertion
//! sequence)`, where "absolute" means relative to the ledger's own epoch
//! (the number of maintenance passes it has seen):
//!
//! ```text
//! relative = absolute - epoch
//! ```
//!
//! Aging every claim by one tick is then a single `epoch += 1`; the relative
//! order of claims never changes, so ascending-start order (ties broken by
//! insertion order) holds structurally before every query.  No re-sorting.

use std::collections::BTreeMap;

use rg_core::TickOffset;
use tracing::trace;

use crate::{Claim, LedgerError, LedgerResult};

/// Sort key: claims order by start tick, then by insertion order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct ClaimKey {
    start: i64,
    seq:   u64,
}

/// The per-tile collection of claims.
///
/// Mutated only by claim issuance ([`add_claim`](Self::add_claim)) and the
/// tick driver ([`maintain`](Self::maintain)); the two must not interleave
/// within a tick.  Claims cannot be retracted early: once added, a claim
/// lives until it expires naturally.
#[derive(Debug, Clone, Default)]
pub struct ClaimLedger {
    /// Absolute start/sequence → absolute end.
    claims:   BTreeMap<ClaimKey, i64>,
    /// Maintenance passes applied so far.
    epoch:    i64,
    next_seq: u64,
}

impl ClaimLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Reserve `[start, start + duration)`.
    ///
    /// Does not check for conflicts with existing claims; callers are
    /// expected to have consulted [`find_delay`](Self::find_delay) first.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NonPositiveDuration`] if `duration <= 0`.
    pub fn add_claim(&mut self, start: TickOffset, duration: TickOffset) -> LedgerResult<()> {
        if duration <= 0 {
            return Err(LedgerError::NonPositiveDuration { start, duration });
        }
        let key = ClaimKey { start: start + self.epoch, seq: self.next_seq };
        self.next_seq += 1;
        self.claims.insert(key, key.start + duration);
        trace!(start, end = start + duration, "claim added");
        Ok(())
    }

    /// Age every claim by one tick and drop those whose end has reached 0.
    ///
    /// Must be called exactly once per simulation tick.  Returns the number
    /// of claims that expired.
    pub fn maintain(&mut self) -> usize {
        self.epoch += 1;
        let epoch = self.epoch;
        let before = self.claims.len();
        self.claims.retain(|_, end| *end - epoch > 0);
        let expired = before - self.claims.len();
        if expired > 0 {
            trace!(expired, remaining = self.claims.len(), "claims expired");
        }
        expired
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Claims in ascending start order, as relative intervals.
    pub fn iter(&self) -> impl Iterator<Item = Claim> + '_ {
        let epoch = self.epoch;
        self.claims
            .iter()
            .map(move |(key, &end)| Claim::new(key.start - epoch, end - epoch))
    }

    /// The claim with the earliest start, if any.
    pub fn earliest(&self) -> Option<Claim> {
        self.iter().next()
    }

    /// `true` if the earliest claim has started.
    pub fn is_currently_claimed(&self) -> bool {
        self.earliest().is_some_and(|c| c.is_active())
    }

    /// Number of claims that have started.
    pub fn active_count(&self) -> usize {
        self.iter().take_while(Claim::is_active).count()
    }

    /// `true` if more than one claim is in effect at once; an agent was
    /// admitted on top of another.  Diagnostic only; nothing is corrected.
    pub fn has_conflict(&self) -> bool {
        self.active_count() > 1
    }

    /// Extra ticks an agent would have to wait before occupying
    /// `[time, time + duration)`.
    ///
    /// Scans claims in ledger order.  A claim matches when the window's start
    /// falls inside it, the window's end falls inside it, or it lies wholly
    /// inside the window; each match adds `claim.end - time`.  The sum is a
    /// single-pass estimate: the shifted window is never re-checked, so
    /// several overlapping claims can under-state the wait actually needed.
    pub fn find_delay(&self, time: TickOffset, duration: TickOffset) -> TickOffset {
        let window_end = time.saturating_add(duration);
        let delay = self
            .iter()
            .filter(|c| c.contains(time) || c.contains(window_end) || c.is_within(time, window_end))
            .fold(0, |acc: TickOffset, c| acc.saturating_add(c.end - time));
        if delay > 0 {
            trace!(time, duration, delay, "window contended");
        }
        delay
    }
}
