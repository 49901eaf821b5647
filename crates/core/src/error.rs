//! Error kinds surfaced by pool operations

use curve_model::CurveError;
use thiserror::Error;

use crate::ledger::LedgerError;

/// Every way a pool operation can be rejected. All are detected before
/// any ledger mutation; a rejected operation leaves the pool exactly as
/// it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("amount must be nonzero")]
    InvalidAmount,

    #[error("fee must be at most 10_000 basis points")]
    InvalidFee,

    #[error("computed amounts violate the caller's slippage bounds")]
    SlippageExceeded,

    #[error("caller or pool lacks the required balance")]
    InsufficientBalance,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("pool is locked")]
    PoolLocked,

    #[error("no pool with this identity")]
    PoolNotFound,

    #[error("a pool with this identity already exists")]
    PoolExists,

    #[error("a pool requires two distinct token types")]
    IdenticalTokens,

    #[error("caller is not the pool's lock authority")]
    Unauthorized,
}

impl From<CurveError> for PoolError {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::InvalidAmount => PoolError::InvalidAmount,
            CurveError::InvalidFee => PoolError::InvalidFee,
            // An unfunded pool cannot quote, and a funded one cannot be
            // drained to zero on one side: both reject as a balance issue.
            CurveError::InvalidReserves => PoolError::InsufficientBalance,
            CurveError::InsufficientLiquidity => PoolError::InsufficientBalance,
            CurveError::Overflow => PoolError::Overflow,
        }
    }
}

impl From<LedgerError> for PoolError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds => PoolError::InsufficientBalance,
            LedgerError::Overflow => PoolError::Overflow,
        }
    }
}
