//! Token-for-token exchange

use crate::engine::{PoolEngine, SwapDirection, SwapReceipt};
use crate::error::PoolError;
use crate::ids::{AccountId, PoolId};
use crate::ledger::{LedgerInstruction, TokenLedger};

impl<L: TokenLedger> PoolEngine<L> {
    /// Swap `amount_in` of one side of the pair for the other along the
    /// constant-product curve
    ///
    /// The full `amount_in` enters the input vault; only the post-fee
    /// portion moves the curve point, so the fee is retained as reserve
    /// growth and accrues to share holders pro-rata. The output is
    /// floored against the curve and checked against `min_out` before
    /// anything moves.
    ///
    /// # Errors
    /// * `PoolNotFound` / `PoolLocked` - pool gate
    /// * `InvalidAmount` - zero input
    /// * `InsufficientBalance` - unfunded pool, or caller cannot cover
    ///   `amount_in`
    /// * `SlippageExceeded` - output below `min_out`
    /// * `Overflow` - input reserve would exceed the amount range
    pub fn swap(
        &mut self,
        pool_id: &PoolId,
        caller: &AccountId,
        direction: SwapDirection,
        amount_in: u64,
        min_out: u64,
    ) -> Result<SwapReceipt, PoolError> {
        let pool = self.unlocked_pool(pool_id)?;

        let (reserve_x, reserve_y) = pool.reserves(&self.ledger);
        let (token_in, vault_in, reserve_in, token_out, vault_out, reserve_out) = match direction {
            SwapDirection::XToY => (
                pool.token_x,
                pool.vault_x,
                reserve_x,
                pool.token_y,
                pool.vault_y,
                reserve_y,
            ),
            SwapDirection::YToX => (
                pool.token_y,
                pool.vault_y,
                reserve_y,
                pool.token_x,
                pool.vault_x,
                reserve_x,
            ),
        };

        let quote = curve_model::swap_quote(reserve_in, reserve_out, pool.fee_bps, amount_in)?;
        if quote.amount_out < min_out {
            return Err(PoolError::SlippageExceeded);
        }
        if self.ledger.balance_of(&token_in, caller) < amount_in {
            return Err(PoolError::InsufficientBalance);
        }

        self.ledger.execute(&[
            LedgerInstruction::Transfer {
                token: token_in,
                from: *caller,
                to: vault_in,
                amount: amount_in,
            },
            LedgerInstruction::Transfer {
                token: token_out,
                from: vault_out,
                to: *caller,
                amount: quote.amount_out,
            },
        ])?;
        log::debug!(
            "swap pool={} dir={:?} in={} fee={} out={}",
            pool_id,
            direction,
            amount_in,
            quote.fee,
            quote.amount_out
        );

        Ok(SwapReceipt {
            amount_in,
            fee: quote.fee,
            amount_out: quote.amount_out,
        })
    }
}
