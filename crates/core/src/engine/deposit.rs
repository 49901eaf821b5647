//! Liquidity deposit

use crate::engine::{DepositReceipt, PoolEngine};
use crate::error::PoolError;
use crate::ids::{AccountId, PoolId};
use crate::ledger::{LedgerInstruction, TokenLedger};

impl<L: TokenLedger> PoolEngine<L> {
    /// Mint `desired_shares` liquidity shares to `caller` against a
    /// proportional contribution of both reserves
    ///
    /// The first deposit into an empty pool takes `max_x`/`max_y` as the
    /// exact initial reserves and the caller's `desired_shares` as the
    /// whole share supply - genesis fixes the share/reserve rate, since
    /// there is no external price to defer to. Afterward the required
    /// contribution is computed at the live ratio, rounded up, and
    /// checked against the caller's maxima.
    ///
    /// # Errors
    /// * `PoolNotFound` / `PoolLocked` - pool gate
    /// * `InvalidAmount` - zero shares, or a zero side at bootstrap
    /// * `SlippageExceeded` - required contribution above `max_x`/`max_y`
    /// * `InsufficientBalance` - caller cannot fund the contribution
    /// * `Overflow` - required contribution exceeds the amount range
    pub fn deposit(
        &mut self,
        pool_id: &PoolId,
        caller: &AccountId,
        desired_shares: u64,
        max_x: u64,
        max_y: u64,
    ) -> Result<DepositReceipt, PoolError> {
        let pool = self.unlocked_pool(pool_id)?;
        if desired_shares == 0 {
            return Err(PoolError::InvalidAmount);
        }

        let share_supply = pool.share_supply(&self.ledger);
        let (amount_x, amount_y) = if share_supply == 0 {
            // Bootstrap: the caller's maxima are the initial reserves.
            if max_x == 0 || max_y == 0 {
                return Err(PoolError::InvalidAmount);
            }
            (max_x, max_y)
        } else {
            let (reserve_x, reserve_y) = pool.reserves(&self.ledger);
            let quote =
                curve_model::deposit_quote(desired_shares, reserve_x, reserve_y, share_supply)?;
            if quote.required_x > max_x || quote.required_y > max_y {
                return Err(PoolError::SlippageExceeded);
            }
            (quote.required_x, quote.required_y)
        };

        if self.ledger.balance_of(&pool.token_x, caller) < amount_x
            || self.ledger.balance_of(&pool.token_y, caller) < amount_y
        {
            return Err(PoolError::InsufficientBalance);
        }

        self.ledger.execute(&[
            LedgerInstruction::Transfer {
                token: pool.token_x,
                from: *caller,
                to: pool.vault_x,
                amount: amount_x,
            },
            LedgerInstruction::Transfer {
                token: pool.token_y,
                from: *caller,
                to: pool.vault_y,
                amount: amount_y,
            },
            LedgerInstruction::Mint {
                token: pool.share_token,
                to: *caller,
                amount: desired_shares,
            },
        ])?;
        log::debug!(
            "deposit pool={} shares={} x={} y={}",
            pool_id,
            desired_shares,
            amount_x,
            amount_y
        );

        Ok(DepositReceipt {
            shares: desired_shares,
            amount_x,
            amount_y,
        })
    }
}
