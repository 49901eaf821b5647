//! Lock gate administration

use crate::engine::PoolEngine;
use crate::error::PoolError;
use crate::ids::{AccountId, PoolId};
use crate::ledger::TokenLedger;

impl<L: TokenLedger> PoolEngine<L> {
    /// Flip the pool's lock flag
    ///
    /// Only the lock authority named at creation may call this; a pool
    /// created without one can never be locked. While locked, every
    /// mutating operation fails with `PoolLocked`.
    pub fn set_locked(
        &mut self,
        pool_id: &PoolId,
        caller: &AccountId,
        locked: bool,
    ) -> Result<(), PoolError> {
        let pool = self.pools.get_mut(pool_id).ok_or(PoolError::PoolNotFound)?;
        if pool.lock_authority != Some(*caller) {
            return Err(PoolError::Unauthorized);
        }
        log::info!("set_locked pool={} locked={}", pool_id, locked);
        pool.locked = locked;
        Ok(())
    }
}
