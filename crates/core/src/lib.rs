//! Eddy core - constant-product liquidity pool accounting engine
//!
//! A pool holds reserves of two token types in ledger vaults, issues a
//! fungible share token against them, and prices token-for-token swaps
//! with the constant-product rule. Every public operation is a single
//! atomic transition: all validation happens up front, then exactly one
//! ledger batch and one state write commit together, or nothing does.
//!
//! The token ledger itself is an external collaborator consumed through
//! the narrow [`ledger::TokenLedger`] interface; [`ledger::MemoryLedger`]
//! is the in-process reference implementation used by tests and the CLI.

#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod state;

pub use engine::{DepositReceipt, PoolEngine, SwapDirection, SwapReceipt, WithdrawReceipt};
pub use error::PoolError;
pub use ids::{AccountId, PoolId, TokenId};
pub use ledger::{LedgerError, LedgerInstruction, MemoryLedger, TokenLedger};
pub use state::Pool;
