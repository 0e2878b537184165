//! Conversions between ticks, prices and Q64.96 sqrt prices.
//!
//! Two precision tiers live here and must not be mixed up:
//!
//! - floating point (`tick_to_price`, `price_to_tick`, `tick_to_sqrt_price_x96`),
//!   good for live display and editing of price inputs. These carry double
//!   precision error and can differ from the on-chain value in the last bits.
//! - exact integer (`price_ratio_to_sqrt_price_x96`, `price_to_sqrt_price_x96`),
//!   used for pool initialization and liquidity math.
//!
//! Prices are token1 per token0 in raw units unless a function says otherwise.

use crate::error::QuoteMathError;
use crate::full_math::{
    decompose_f64, integer_sqrt, narrow, u256_from_f64_floor, u256_to_f64, Q192, Q96,
};
use crate::tick_math::check_tick;
use alloy::primitives::{U256, U512};

// 1.0001, the price ratio between two adjacent ticks
pub const TICK_BASE: f64 = 1.0001;

/// 1.0001^tick. Display only.
pub fn tick_to_price(tick: i32) -> f64 {
    TICK_BASE.powi(tick)
}

/// round(ln(price) / ln(1.0001)).
///
/// Round trips with [`tick_to_price`] to within one tick across the whole tick range.
pub fn price_to_tick(price: f64) -> Result<i32, QuoteMathError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(QuoteMathError::InvalidPrice(price));
    }
    let tick = (price.ln() / TICK_BASE.ln()).round();
    if tick < i32::MIN as f64 || tick > i32::MAX as f64 {
        return Err(QuoteMathError::InvalidPrice(price));
    }
    Ok(tick as i32)
}

/// floor(1.0001^(tick/2) * 2^96) computed in floating point.
///
/// Not bit exact with the pool contracts, see [`crate::tick_math::get_sqrt_ratio_at_tick`].
pub fn tick_to_sqrt_price_x96(tick: i32) -> Result<U256, QuoteMathError> {
    check_tick(tick)?;
    let sqrt_price = TICK_BASE.powf(tick as f64 / 2.0) * u256_to_f64(Q96);
    u256_from_f64_floor(sqrt_price).ok_or(QuoteMathError::TickOutOfBounds(tick))
}

/// floor(sqrt((amount1 << 192) / amount0)), exact for any pair of 256 bit amounts.
///
/// This is the encoding a pool is initialized with when its reserves are known.
pub fn price_ratio_to_sqrt_price_x96(amount1: U256, amount0: U256) -> Result<U256, QuoteMathError> {
    if amount0.is_zero() {
        return Err(QuoteMathError::ZeroAmount0);
    }
    let ratio = U512::from(amount1) * Q192 / U512::from(amount0);
    narrow(integer_sqrt(ratio))
}

/// floor(sqrt(price) * 2^96) with no rounding beyond the final floor.
///
/// A double is an exact binary fraction `m * 2^e`, so the squared fixed point
/// value `m * 2^(e + 192)` is formed exactly and passed through the integer
/// square root.
pub fn price_to_sqrt_price_x96(price: f64) -> Result<U256, QuoteMathError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(QuoteMathError::InvalidPrice(price));
    }
    let (mantissa, exponent) = decompose_f64(price);
    let shift = exponent + 192;
    let scaled = if shift >= 0 {
        let shift = shift as usize;
        // mantissa < 2^53; the product must fit in 512 bits
        if shift > 512 - 53 {
            return Err(QuoteMathError::InvalidPrice(price));
        }
        U512::from(mantissa) << shift
    } else if shift > -64 {
        U512::from(mantissa >> shift.unsigned_abs())
    } else {
        U512::ZERO
    };
    narrow(integer_sqrt(scaled))
}

/// (sqrt_price_x96 / 2^96)^2. Display only.
pub fn sqrt_price_x96_to_price(sqrt_price_x96: U256) -> f64 {
    let sqrt_price = u256_to_f64(sqrt_price_x96) / u256_to_f64(Q96);
    sqrt_price * sqrt_price
}

/// Raw price to a human price: raw * 10^(decimals0 - decimals1).
pub fn adjust_price_for_decimals(raw_price: f64, decimals0: u8, decimals1: u8) -> f64 {
    raw_price * 10f64.powi(decimals0 as i32 - decimals1 as i32)
}

/// Human price back to raw units: adjusted * 10^(decimals1 - decimals0).
pub fn raw_price_from_adjusted(adjusted_price: f64, decimals0: u8, decimals1: u8) -> f64 {
    adjusted_price * 10f64.powi(decimals1 as i32 - decimals0 as i32)
}
