//! `rg-ledger` — the per-tile claim ledger.
//!
//! # Crate layout
//!
//! | Module     | Contents                                             |
//! |------------|------------------------------------------------------|
//! | [`claim`]  | `Claim` — one reserved `[start, end)` interval       |
//! | [`ledger`] | `ClaimLedger` — ordered claims, expiry, delay query  |
//! | [`error`]  | `LedgerError`, `LedgerResult<T>`                     |
//!
//! # Time model
//!
//! Every interval is stored relative to the current tick (see
//! [`rg_core::TickOffset`]).  `start <= 0` means the claim is already in
//! effect.  [`ClaimLedger::maintain`] must run exactly once per simulation
//! tick; it ages every claim by one tick and drops the ones that have ended.

pub mod claim;
pub mod error;
pub mod ledger;


pub use claim::Claim;
pub use error::{LedgerError, LedgerResult};
pub use ledger::ClaimLedger;
