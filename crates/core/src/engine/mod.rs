//! Pool engine - one atomic operation per entry point
//!
//! `PoolEngine` owns the ledger and the pool registry. Each operation
//! lives in its own module and follows the same shape: look up the pool,
//! validate every precondition, quote with the curve model, then commit
//! exactly one ledger batch. Nothing is written before the last check
//! passes.

mod deposit;
mod initialize;
mod lock;
mod swap;
mod withdraw;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PoolError;
use crate::ids::PoolId;
use crate::ledger::TokenLedger;
use crate::state::Pool;

/// Which side of the pair goes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapDirection {
    XToY,
    YToX,
}

/// What a committed deposit actually moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositReceipt {
    pub shares: u64,
    pub amount_x: u64,
    pub amount_y: u64,
}

/// What a committed withdrawal actually moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawReceipt {
    pub shares: u64,
    pub amount_x: u64,
    pub amount_y: u64,
}

/// What a committed swap actually moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapReceipt {
    pub amount_in: u64,
    pub fee: u64,
    pub amount_out: u64,
}

/// All pools plus the ledger they share
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEngine<L> {
    ledger: L,
    pools: BTreeMap<PoolId, Pool>,
}

impl<L: TokenLedger> PoolEngine<L> {
    pub fn new(ledger: L) -> Self {
        PoolEngine {
            ledger,
            pools: BTreeMap::new(),
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Direct ledger access, for funding accounts outside pool ops
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn pool(&self, id: &PoolId) -> Option<&Pool> {
        self.pools.get(id)
    }

    pub fn pools(&self) -> impl Iterator<Item = (&PoolId, &Pool)> {
        self.pools.iter()
    }

    /// Resolve a pool for a mutating operation: it must exist and must
    /// not be locked.
    fn unlocked_pool(&self, id: &PoolId) -> Result<Pool, PoolError> {
        let pool = self.pools.get(id).ok_or(PoolError::PoolNotFound)?;
        if pool.locked {
            return Err(PoolError::PoolLocked);
        }
        Ok(pool.clone())
    }
}
