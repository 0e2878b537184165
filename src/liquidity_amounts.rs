//! Liquidity and token amount math for a position over a sqrt price range.
//!
//! Bounds may be passed in either order; they are sorted before use. All
//! results are floored, and products are formed in 512 bits before dividing.

use crate::error::QuoteMathError;
use crate::full_math::{narrow, Q96};
use crate::price::price_to_sqrt_price_x96;
use alloy::primitives::{U256, U512};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmountPair {
    pub amount0: U256,
    pub amount1: U256,
}

/// Liquidity for a one-sided deposit and the other token it requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairedAmount {
    pub liquidity: u128,
    pub amount1: U256,
}

fn sorted(sqrt_price_a_x96: U256, sqrt_price_b_x96: U256) -> (U256, U256) {
    if sqrt_price_a_x96 > sqrt_price_b_x96 {
        (sqrt_price_b_x96, sqrt_price_a_x96)
    } else {
        (sqrt_price_a_x96, sqrt_price_b_x96)
    }
}

fn to_liquidity(value: U512) -> Result<u128, QuoteMathError> {
    u128::try_from(value).map_err(|_| QuoteMathError::LiquidityOverflow)
}

/// amount0 * sqrt_lower * sqrt_upper / (Q96 * (sqrt_upper - sqrt_lower))
pub fn liquidity_for_amount0(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    amount0: U256,
) -> Result<u128, QuoteMathError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_a_x96, sqrt_price_b_x96);
    if sqrt_lower == sqrt_upper {
        return Err(QuoteMathError::ZeroWidthRange);
    }
    let intermediate = U512::from(sqrt_lower) * U512::from(sqrt_upper);
    let numerator = U512::from(amount0)
        .checked_mul(intermediate)
        .ok_or(QuoteMathError::Overflow)?;
    let denominator = U512::from(sqrt_upper - sqrt_lower) * U512::from(Q96);
    to_liquidity(numerator / denominator)
}

/// amount1 * Q96 / (sqrt_upper - sqrt_lower)
pub fn liquidity_for_amount1(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    amount1: U256,
) -> Result<u128, QuoteMathError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_a_x96, sqrt_price_b_x96);
    if sqrt_lower == sqrt_upper {
        return Err(QuoteMathError::ZeroWidthRange);
    }
    let numerator = U512::from(amount1) * U512::from(Q96);
    to_liquidity(numerator / U512::from(sqrt_upper - sqrt_lower))
}

/// Largest liquidity that both desired amounts can fund at the current price.
pub fn liquidity_for_amounts(
    sqrt_price_x96: U256,
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    amount0: U256,
    amount1: U256,
) -> Result<u128, QuoteMathError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_a_x96, sqrt_price_b_x96);
    if sqrt_price_x96 <= sqrt_lower {
        liquidity_for_amount0(sqrt_lower, sqrt_upper, amount0)
    } else if sqrt_price_x96 < sqrt_upper {
        let liquidity0 = liquidity_for_amount0(sqrt_price_x96, sqrt_upper, amount0)?;
        let liquidity1 = liquidity_for_amount1(sqrt_lower, sqrt_price_x96, amount1)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        liquidity_for_amount1(sqrt_lower, sqrt_upper, amount1)
    }
}

/// Token1 held by `liquidity` at the current price.
///
/// Below the range the position is all token0 and this is 0. Above it the full
/// width counts. Inside, only the part between the lower bound and the current
/// price counts. Both branches agree when the current price sits on a bound.
pub fn amount1_for_liquidity(
    sqrt_price_x96: U256,
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: u128,
) -> Result<U256, QuoteMathError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_a_x96, sqrt_price_b_x96);
    let width = if sqrt_price_x96 < sqrt_lower {
        return Ok(U256::ZERO);
    } else if sqrt_price_x96 > sqrt_upper {
        sqrt_upper - sqrt_lower
    } else {
        sqrt_price_x96 - sqrt_lower
    };
    narrow(U512::from(liquidity) * U512::from(width) / U512::from(Q96))
}

/// Token0 held by `liquidity` at the current price, mirror of [`amount1_for_liquidity`].
///
/// L * Q96 * (sqrt_upper - sqrt_start) / (sqrt_upper * sqrt_start), where the start
/// is the lower bound below the range and the current price inside it.
pub fn amount0_for_liquidity(
    sqrt_price_x96: U256,
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: u128,
) -> Result<U256, QuoteMathError> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_a_x96, sqrt_price_b_x96);
    if sqrt_price_x96 > sqrt_upper {
        return Ok(U256::ZERO);
    }
    let sqrt_start = sqrt_price_x96.max(sqrt_lower);
    if sqrt_start.is_zero() {
        return Err(QuoteMathError::ZeroSqrtPrice);
    }
    let numerator = (U512::from(liquidity) << 96usize) * U512::from(sqrt_upper - sqrt_start);
    narrow(numerator / U512::from(sqrt_upper) / U512::from(sqrt_start))
}

pub fn amounts_for_liquidity(
    sqrt_price_x96: U256,
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: u128,
) -> Result<AmountPair, QuoteMathError> {
    Ok(AmountPair {
        amount0: amount0_for_liquidity(
            sqrt_price_x96,
            sqrt_price_a_x96,
            sqrt_price_b_x96,
            liquidity,
        )?,
        amount1: amount1_for_liquidity(
            sqrt_price_x96,
            sqrt_price_a_x96,
            sqrt_price_b_x96,
            liquidity,
        )?,
    })
}

/// Quotes the token1 side of a deposit of `amount0` token0 between two prices.
///
/// Prices are raw token1 per token0 and are encoded with the exact
/// [`price_to_sqrt_price_x96`].
pub fn compute_required_paired_amount(
    current_price: f64,
    lower_price: f64,
    upper_price: f64,
    amount0: U256,
) -> Result<PairedAmount, QuoteMathError> {
    let sqrt_price_x96 = price_to_sqrt_price_x96(current_price)?;
    let sqrt_price_a_x96 = price_to_sqrt_price_x96(lower_price)?;
    let sqrt_price_b_x96 = price_to_sqrt_price_x96(upper_price)?;

    let liquidity = liquidity_for_amount0(sqrt_price_a_x96, sqrt_price_b_x96, amount0)?;
    let amount1 =
        amount1_for_liquidity(sqrt_price_x96, sqrt_price_a_x96, sqrt_price_b_x96, liquidity)?;
    debug!(
        "paired amount at price {} in [{}, {}]: amount0={} liquidity={} amount1={}",
        current_price, lower_price, upper_price, amount0, liquidity, amount1
    );
    Ok(PairedAmount { liquidity, amount1 })
}
