//! Persistent pool record
//!
//! A `Pool` stores configuration only. Reserves and share supply are
//! never cached here: the ledger is the authoritative source and the
//! views below read it live at operation time.

use serde::{Deserialize, Serialize};

use crate::ids::{AccountId, PoolId, TokenId};
use crate::ledger::TokenLedger;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// Caller-chosen value distinguishing pools over the same pair
    pub seed: u64,
    /// The tradable pair, fixed at creation
    pub token_x: TokenId,
    pub token_y: TokenId,
    /// Fungible liquidity share token, minted and burned only here
    pub share_token: TokenId,
    /// Vault accounts holding the reserves, owned by the pool
    pub vault_x: AccountId,
    pub vault_y: AccountId,
    /// Swap fee in basis points, in [0, 10_000], fixed at creation
    pub fee_bps: u16,
    /// Gate on every mutating operation
    pub locked: bool,
    /// Sole identity allowed to flip `locked`; None means never lockable
    pub lock_authority: Option<AccountId>,
}

impl Pool {
    /// Assemble a pool record with all identities derived from the seed
    /// and pair. Reserves and supply start at zero because the derived
    /// accounts have never been funded.
    pub fn new(
        seed: u64,
        token_x: TokenId,
        token_y: TokenId,
        fee_bps: u16,
        lock_authority: Option<AccountId>,
    ) -> Self {
        let id = PoolId::derive(seed, &token_x, &token_y);
        Pool {
            seed,
            token_x,
            token_y,
            share_token: id.share_token(),
            vault_x: id.vault(&token_x),
            vault_y: id.vault(&token_y),
            fee_bps,
            locked: false,
            lock_authority,
        }
    }

    pub fn id(&self) -> PoolId {
        PoolId::derive(self.seed, &self.token_x, &self.token_y)
    }

    /// Current (reserve_x, reserve_y), read from the ledger
    pub fn reserves<L: TokenLedger>(&self, ledger: &L) -> (u64, u64) {
        (
            ledger.balance_of(&self.token_x, &self.vault_x),
            ledger.balance_of(&self.token_y, &self.vault_y),
        )
    }

    /// Outstanding liquidity shares, read from the ledger
    pub fn share_supply<L: TokenLedger>(&self, ledger: &L) -> u64 {
        ledger.supply_of(&self.share_token)
    }
}
