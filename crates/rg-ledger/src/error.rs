use rg_core::TickOffset;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("claim at {start} has non-positive duration {duration}")]
    NonPositiveDuration {
        start:    TickOffset,
        duration: TickOffset,
    },
}

pub type LedgerResult<T> = Result<T, LedgerError>;
