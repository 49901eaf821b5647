//! Constant product pool math with explicit rounding directions
//!
//! All intermediate products are widened to u128 before division, so two
//! full u64 reserves can be multiplied without overflow. Division rounds
//! the way the pool needs it to: ceiling when computing what a depositor
//! owes, floor when computing anything the pool pays out.

use crate::{CurveError, BPS_SCALE};

/// Result of quoting a swap against the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    /// Fee withheld from the input, floor(amount_in * fee_bps / 10_000)
    pub fee: u64,

    /// Portion of the input traded along the curve (amount_in - fee)
    pub swap_in: u64,

    /// Output owed to the caller
    pub amount_out: u64,

    /// Input reserve after commit: reserve_in + amount_in (fee retained)
    pub new_reserve_in: u64,

    /// Output reserve after commit: floor(k / (reserve_in + swap_in))
    pub new_reserve_out: u64,
}

/// Contribution required to mint a given number of shares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositQuote {
    pub required_x: u64,
    pub required_y: u64,
}

/// Payout for redeeming a given number of shares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawQuote {
    pub out_x: u64,
    pub out_y: u64,
}

/// Multiply two u64 values into u128 (cannot overflow)
#[inline]
pub fn mul_wide(a: u64, b: u64) -> u128 {
    (a as u128) * (b as u128)
}

/// Divide, rounding down
#[inline]
pub fn div_floor(numerator: u128, denominator: u128) -> u128 {
    numerator / denominator
}

/// Divide, rounding up
///
/// The numerator here is always a product of two u64 values and the
/// denominator fits in u64, so `numerator + denominator - 1` stays below
/// u128::MAX.
#[inline]
pub fn div_ceil(numerator: u128, denominator: u128) -> u128 {
    (numerator + denominator - 1) / denominator
}

/// Split a swap input into (fee, traded amount)
///
/// `fee = floor(amount_in * fee_bps / 10_000)`, so `0 <= fee <= amount_in`
/// for any valid fee. The fee stays in the pool; only the remainder moves
/// along the curve.
pub fn fee_split(amount_in: u64, fee_bps: u16) -> Result<(u64, u64), CurveError> {
    if fee_bps as u64 > BPS_SCALE {
        return Err(CurveError::InvalidFee);
    }
    let fee = div_floor(mul_wide(amount_in, fee_bps as u64), BPS_SCALE as u128) as u64;
    Ok((fee, amount_in - fee))
}

/// Quote a swap of `amount_in` input tokens against the curve
///
/// The invariant `k = reserve_in * reserve_out` is captured before any
/// mutation. Only the post-fee input moves the curve point; the output is
/// `reserve_out - floor(k / (reserve_in + swap_in))`, which can never
/// exceed what the unrounded curve allows. The full `amount_in` lands in
/// the input reserve, so the retained fee pushes `k` back up; flooring
/// can concede at most the division remainder, which is below the
/// post-trade input reserve.
///
/// # Arguments
/// * `reserve_in` - Current reserve of the input token
/// * `reserve_out` - Current reserve of the output token
/// * `fee_bps` - Pool fee in basis points
/// * `amount_in` - Gross input amount supplied by the caller
pub fn swap_quote(
    reserve_in: u64,
    reserve_out: u64,
    fee_bps: u16,
    amount_in: u64,
) -> Result<SwapQuote, CurveError> {
    if amount_in == 0 {
        return Err(CurveError::InvalidAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(CurveError::InvalidReserves);
    }

    let (fee, swap_in) = fee_split(amount_in, fee_bps)?;

    let k = mul_wide(reserve_in, reserve_out);
    let curve_reserve_in = reserve_in
        .checked_add(swap_in)
        .ok_or(CurveError::Overflow)?;
    let new_reserve_out = div_floor(k, curve_reserve_in as u128) as u64;
    if new_reserve_out == 0 {
        // Floor division may round the last output unit away entirely; a
        // funded pool must keep both reserves nonzero.
        return Err(CurveError::InsufficientLiquidity);
    }
    let amount_out = reserve_out - new_reserve_out;

    // The fee portion also enters the vault, on top of the curve point.
    let new_reserve_in = reserve_in
        .checked_add(amount_in)
        .ok_or(CurveError::Overflow)?;

    Ok(SwapQuote {
        fee,
        swap_in,
        amount_out,
        new_reserve_in,
        new_reserve_out,
    })
}

/// Quote the contribution required to mint `desired_shares` at the
/// current reserve/share ratio
///
/// Both sides round up: a depositor may pay one unit more than the exact
/// ratio, never less, so share issuance is always fully collateralized.
/// Only valid for a funded pool; the bootstrap deposit does not go
/// through a quote.
pub fn deposit_quote(
    desired_shares: u64,
    reserve_x: u64,
    reserve_y: u64,
    share_supply: u64,
) -> Result<DepositQuote, CurveError> {
    if desired_shares == 0 {
        return Err(CurveError::InvalidAmount);
    }
    if share_supply == 0 || reserve_x == 0 || reserve_y == 0 {
        return Err(CurveError::InvalidReserves);
    }

    let required_x = div_ceil(mul_wide(desired_shares, reserve_x), share_supply as u128);
    let required_y = div_ceil(mul_wide(desired_shares, reserve_y), share_supply as u128);
    if required_x > u64::MAX as u128 || required_y > u64::MAX as u128 {
        return Err(CurveError::Overflow);
    }

    Ok(DepositQuote {
        required_x: required_x as u64,
        required_y: required_y as u64,
    })
}

/// Quote the payout for redeeming `shares` at the current ratio
///
/// Both sides round down: a redeemer may receive one unit less than the
/// exact ratio, never more, so the pool never pays beyond proportional
/// backing.
pub fn withdraw_quote(
    shares: u64,
    reserve_x: u64,
    reserve_y: u64,
    share_supply: u64,
) -> Result<WithdrawQuote, CurveError> {
    if shares == 0 {
        return Err(CurveError::InvalidAmount);
    }
    if share_supply == 0 {
        return Err(CurveError::InvalidReserves);
    }

    let out_x = div_floor(mul_wide(shares, reserve_x), share_supply as u128);
    let out_y = div_floor(mul_wide(shares, reserve_y), share_supply as u128);
    if out_x > u64::MAX as u128 || out_y > u64::MAX as u128 {
        return Err(CurveError::Overflow);
    }

    Ok(WithdrawQuote {
        out_x: out_x as u64,
        out_y: out_y as u64,
    })
}
