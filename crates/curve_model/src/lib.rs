//! Curve model - pure constant product math (x·y=k)
//!
//! This crate contains the core pool arithmetic: fee splitting, swap
//! quoting along the constant-product curve, and proportional liquidity
//! quotes with explicit rounding directions. The engine crate imports
//! these functions and never re-derives the formulas.

#![no_std]

pub mod math;

pub use math::{
    deposit_quote, fee_split, swap_quote, withdraw_quote, DepositQuote, SwapQuote, WithdrawQuote,
};

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: u64 = 10_000;

/// Error types for curve operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    /// Invalid amount (zero where nonzero is mandatory)
    InvalidAmount,
    /// Fee outside [0, 10_000] basis points
    InvalidFee,
    /// Reserves or share supply are zero where a funded pool is required
    InvalidReserves,
    /// The swap would drain the output reserve to zero
    InsufficientLiquidity,
    /// Arithmetic overflow
    Overflow,
}
