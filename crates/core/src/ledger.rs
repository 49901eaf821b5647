//! Token ledger interface and in-memory reference implementation
//!
//! The engine never touches balances directly: it stages a batch of
//! transfer/mint/burn instructions and hands the whole batch to the
//! ledger. `execute` is all-or-nothing - every instruction is validated
//! against the running post-image before anything commits, so a failed
//! batch leaves the ledger untouched. That contract is what lets each
//! pool operation be a single atomic transition.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{AccountId, TokenId};

/// One ledger mutation, atomic only as part of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerInstruction {
    Transfer {
        token: TokenId,
        from: AccountId,
        to: AccountId,
        amount: u64,
    },
    Mint {
        token: TokenId,
        to: AccountId,
        amount: u64,
    },
    Burn {
        token: TokenId,
        from: AccountId,
        amount: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("source account lacks the required balance")]
    InsufficientFunds,

    #[error("balance or supply would overflow")]
    Overflow,
}

/// The narrow interface pool operations consume
pub trait TokenLedger {
    fn balance_of(&self, token: &TokenId, owner: &AccountId) -> u64;

    fn supply_of(&self, token: &TokenId) -> u64;

    /// Apply a batch of instructions, all or nothing
    fn execute(&mut self, batch: &[LedgerInstruction]) -> Result<(), LedgerError>;
}

/// Per-token balances and total supply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct TokenBook {
    supply: u64,
    balances: BTreeMap<AccountId, u64>,
}

/// Map-backed ledger used by tests and the CLI store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryLedger {
    books: BTreeMap<TokenId, TokenBook>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(&mut self, instruction: &LedgerInstruction) -> Result<(), LedgerError> {
        match *instruction {
            LedgerInstruction::Transfer {
                token,
                from,
                to,
                amount,
            } => {
                self.debit(&token, &from, amount)?;
                self.credit(&token, &to, amount)
            }
            LedgerInstruction::Mint { token, to, amount } => {
                let book = self.books.entry(token).or_default();
                book.supply = book.supply.checked_add(amount).ok_or(LedgerError::Overflow)?;
                self.credit(&token, &to, amount)
            }
            LedgerInstruction::Burn {
                token,
                from,
                amount,
            } => {
                self.debit(&token, &from, amount)?;
                let book = self.books.entry(token).or_default();
                // debit succeeded, so supply covers the amount
                book.supply -= amount;
                Ok(())
            }
        }
    }

    fn debit(&mut self, token: &TokenId, from: &AccountId, amount: u64) -> Result<(), LedgerError> {
        let balance = self
            .books
            .get_mut(token)
            .and_then(|book| book.balances.get_mut(from))
            .ok_or(LedgerError::InsufficientFunds)?;
        *balance = balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds)?;
        Ok(())
    }

    fn credit(&mut self, token: &TokenId, to: &AccountId, amount: u64) -> Result<(), LedgerError> {
        let balance = self
            .books
            .entry(*token)
            .or_default()
            .balances
            .entry(*to)
            .or_default();
        *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }
}

impl TokenLedger for MemoryLedger {
    fn balance_of(&self, token: &TokenId, owner: &AccountId) -> u64 {
        self.books
            .get(token)
            .and_then(|book| book.balances.get(owner))
            .copied()
            .unwrap_or(0)
    }

    fn supply_of(&self, token: &TokenId) -> u64 {
        self.books.get(token).map(|book| book.supply).unwrap_or(0)
    }

    fn execute(&mut self, batch: &[LedgerInstruction]) -> Result<(), LedgerError> {
        // Stage on a copy and swap in only on full success.
        let mut staged = self.clone();
        for instruction in batch {
            staged.apply(instruction)?;
        }
        *self = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (TokenId, AccountId, AccountId) {
        (
            TokenId::named("tok"),
            AccountId::named("alice"),
            AccountId::named("bob"),
        )
    }

    #[test]
    fn mint_transfer_burn_roundtrip() {
        let (token, alice, bob) = ids();
        let mut ledger = MemoryLedger::new();

        ledger
            .execute(&[LedgerInstruction::Mint {
                token,
                to: alice,
                amount: 100,
            }])
            .unwrap();
        assert_eq!(ledger.supply_of(&token), 100);

        ledger
            .execute(&[LedgerInstruction::Transfer {
                token,
                from: alice,
                to: bob,
                amount: 40,
            }])
            .unwrap();
        assert_eq!(ledger.balance_of(&token, &alice), 60);
        assert_eq!(ledger.balance_of(&token, &bob), 40);

        ledger
            .execute(&[LedgerInstruction::Burn {
                token,
                from: bob,
                amount: 40,
            }])
            .unwrap();
        assert_eq!(ledger.supply_of(&token), 60);
        assert_eq!(ledger.balance_of(&token, &bob), 0);
    }

    #[test]
    fn failed_batch_commits_nothing() {
        let (token, alice, bob) = ids();
        let mut ledger = MemoryLedger::new();
        ledger
            .execute(&[LedgerInstruction::Mint {
                token,
                to: alice,
                amount: 10,
            }])
            .unwrap();

        let before = ledger.clone();
        let result = ledger.execute(&[
            // valid on its own...
            LedgerInstruction::Transfer {
                token,
                from: alice,
                to: bob,
                amount: 10,
            },
            // ...but the batch fails here
            LedgerInstruction::Transfer {
                token,
                from: alice,
                to: bob,
                amount: 1,
            },
        ]);
        assert_eq!(result, Err(LedgerError::InsufficientFunds));
        assert_eq!(ledger, before);
    }

    #[test]
    fn batch_validates_against_post_image() {
        let (token, alice, bob) = ids();
        let mut ledger = MemoryLedger::new();

        // The second instruction spends what the first one delivers.
        ledger
            .execute(&[
                LedgerInstruction::Mint {
                    token,
                    to: alice,
                    amount: 5,
                },
                LedgerInstruction::Transfer {
                    token,
                    from: alice,
                    to: bob,
                    amount: 5,
                },
            ])
            .unwrap();
        assert_eq!(ledger.balance_of(&token, &bob), 5);
    }
}
