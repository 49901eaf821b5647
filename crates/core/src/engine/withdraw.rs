//! Liquidity withdrawal

use crate::engine::{PoolEngine, WithdrawReceipt};
use crate::error::PoolError;
use crate::ids::{AccountId, PoolId};
use crate::ledger::{LedgerInstruction, TokenLedger};

impl<L: TokenLedger> PoolEngine<L> {
    /// Burn `shares` liquidity shares from `caller` and pay out the
    /// proportional slice of both reserves, rounded down
    ///
    /// # Errors
    /// * `PoolNotFound` / `PoolLocked` - pool gate
    /// * `InvalidAmount` - zero shares
    /// * `InsufficientBalance` - `shares` above the caller's held balance
    /// * `SlippageExceeded` - a payout below `min_x`/`min_y`
    pub fn withdraw(
        &mut self,
        pool_id: &PoolId,
        caller: &AccountId,
        shares: u64,
        min_x: u64,
        min_y: u64,
    ) -> Result<WithdrawReceipt, PoolError> {
        let pool = self.unlocked_pool(pool_id)?;
        if shares == 0 {
            return Err(PoolError::InvalidAmount);
        }
        if shares > self.ledger.balance_of(&pool.share_token, caller) {
            return Err(PoolError::InsufficientBalance);
        }

        let (reserve_x, reserve_y) = pool.reserves(&self.ledger);
        let share_supply = pool.share_supply(&self.ledger);
        let quote = curve_model::withdraw_quote(shares, reserve_x, reserve_y, share_supply)?;
        if quote.out_x < min_x || quote.out_y < min_y {
            return Err(PoolError::SlippageExceeded);
        }

        self.ledger.execute(&[
            LedgerInstruction::Transfer {
                token: pool.token_x,
                from: pool.vault_x,
                to: *caller,
                amount: quote.out_x,
            },
            LedgerInstruction::Transfer {
                token: pool.token_y,
                from: pool.vault_y,
                to: *caller,
                amount: quote.out_y,
            },
            LedgerInstruction::Burn {
                token: pool.share_token,
                from: *caller,
                amount: shares,
            },
        ])?;
        log::debug!(
            "withdraw pool={} shares={} x={} y={}",
            pool_id,
            shares,
            quote.out_x,
            quote.out_y
        );

        Ok(WithdrawReceipt {
            shares,
            amount_x: quote.out_x,
            amount_y: quote.out_y,
        })
    }
}
