//! Pool creation

use crate::engine::PoolEngine;
use crate::error::PoolError;
use crate::ids::{AccountId, PoolId, TokenId};
use crate::ledger::TokenLedger;
use crate::state::Pool;

impl<L: TokenLedger> PoolEngine<L> {
    /// Create a pool for a token pair
    ///
    /// Every identity the pool needs (share token, vaults, authority) is
    /// derived from the seed and pair; nothing is funded, so the pool
    /// starts with zero reserves and zero share supply. The optional
    /// `lock_authority` is the only identity that may later lock the
    /// pool; it has no other effect.
    ///
    /// # Errors
    /// * `InvalidFee` - `fee_bps` above 10_000
    /// * `IdenticalTokens` - the pair must be two distinct token types
    /// * `PoolExists` - the derived identity is already registered
    pub fn initialize(
        &mut self,
        seed: u64,
        token_x: TokenId,
        token_y: TokenId,
        fee_bps: u16,
        lock_authority: Option<AccountId>,
    ) -> Result<PoolId, PoolError> {
        if fee_bps as u64 > curve_model::BPS_SCALE {
            return Err(PoolError::InvalidFee);
        }
        if token_x == token_y {
            return Err(PoolError::IdenticalTokens);
        }

        let id = PoolId::derive(seed, &token_x, &token_y);
        if self.pools.contains_key(&id) {
            return Err(PoolError::PoolExists);
        }

        let pool = Pool::new(seed, token_x, token_y, fee_bps, lock_authority);
        log::info!("initialize pool={} seed={} fee_bps={}", id, seed, fee_bps);
        self.pools.insert(id, pool);

        Ok(id)
    }
}
