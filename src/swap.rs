use crate::error::QuoteMathError;
use crate::full_math::{mul_div, Q96};
use crate::pool::{sort_tokens, FeeTier};
use crate::slippage::Slippage;
use crate::tick_math;
use alloy::primitives::{Address, U256};

// fees are expressed in hundredths of a basis point
const FEE_DENOMINATOR: u32 = 1_000_000;

// 2^160 - 1, the widest value a uint160 sqrtPriceLimitX96 can hold
pub const MAX_UINT160: U256 = U256::from_limbs([u64::MAX, u64::MAX, u32::MAX as u64, 0]);

/// Result of a single pool exact input quote, as returned by the quoter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    pub amount_in: U256,
    pub amount_out: U256,
}

impl SwapQuote {
    pub fn minimum_amount_out(&self, slippage: Slippage) -> U256 {
        slippage.minimum_out(self.amount_out)
    }
}

/// Checks a sqrt price limit the way the pool does before swapping.
///
/// Zero disables the limit. Otherwise the limit has to fit in a uint160, sit
/// strictly between MIN_SQRT_RATIO and MAX_SQRT_RATIO, and lie below the current
/// price when selling token0 or above it when selling token1.
pub fn validate_sqrt_price_limit(
    sqrt_price_limit: U256,
    current_sqrt_price: U256,
    zero_for_one: bool,
) -> Result<(), QuoteMathError> {
    if sqrt_price_limit.is_zero() {
        return Ok(());
    }
    if sqrt_price_limit > MAX_UINT160 {
        return Err(QuoteMathError::SqrtPriceLimitNotUint160);
    }
    if sqrt_price_limit <= tick_math::MIN_SQRT_RATIO {
        return Err(QuoteMathError::SqrtPriceLimitTooLow);
    }
    if sqrt_price_limit >= tick_math::MAX_SQRT_RATIO {
        return Err(QuoteMathError::SqrtPriceLimitTooHigh);
    }
    if zero_for_one {
        // sell: price moves down
        if sqrt_price_limit >= current_sqrt_price {
            return Err(QuoteMathError::SqrtPriceLimitTooHigh);
        }
    } else if sqrt_price_limit <= current_sqrt_price {
        // buy: price moves up
        return Err(QuoteMathError::SqrtPriceLimitTooLow);
    }
    Ok(())
}

/// Output at the current spot price after the pool fee, ignoring depth.
///
/// Only an indication for display; the quoter is the source of truth for
/// anything sent with a transaction.
pub fn spot_amount_out(
    amount_in: U256,
    sqrt_price_x96: U256,
    zero_for_one: bool,
    fee: FeeTier,
) -> Result<U256, QuoteMathError> {
    if sqrt_price_x96.is_zero() {
        return Err(QuoteMathError::ZeroSqrtPrice);
    }
    let amount_after_fee = mul_div(
        amount_in,
        U256::from(FEE_DENOMINATOR - fee.pips()),
        U256::from(FEE_DENOMINATOR),
    )?;
    if zero_for_one {
        // amount * sqrtP^2 / 2^192
        let partial = mul_div(amount_after_fee, sqrt_price_x96, Q96)?;
        mul_div(partial, sqrt_price_x96, Q96)
    } else {
        // amount * 2^192 / sqrtP^2
        let partial = mul_div(amount_after_fee, Q96, sqrt_price_x96)?;
        mul_div(partial, Q96, sqrt_price_x96)
    }
}

/// Router parameters for a single pool exact input swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactInputSingle {
    pub token_in: Address,
    pub token_out: Address,
    pub fee: FeeTier,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
    pub sqrt_price_limit_x96: U256,
}

impl ExactInputSingle {
    /// Builds the call from a quote, with the minimum output taken from `slippage`
    /// and no price limit.
    pub fn new(
        token_in: Address,
        token_out: Address,
        fee: FeeTier,
        quote: &SwapQuote,
        slippage: Slippage,
    ) -> Result<Self, QuoteMathError> {
        sort_tokens(token_in, token_out)?;
        Ok(ExactInputSingle {
            token_in,
            token_out,
            fee,
            amount_in: quote.amount_in,
            amount_out_minimum: quote.minimum_amount_out(slippage),
            sqrt_price_limit_x96: U256::ZERO,
        })
    }

    /// Same call bounded by `sqrt_price_limit_x96`, checked against the current price.
    pub fn with_price_limit(
        self,
        sqrt_price_limit_x96: U256,
        current_sqrt_price: U256,
    ) -> Result<Self, QuoteMathError> {
        validate_sqrt_price_limit(
            sqrt_price_limit_x96,
            current_sqrt_price,
            self.zero_for_one(),
        )?;
        Ok(ExactInputSingle {
            sqrt_price_limit_x96,
            ..self
        })
    }

    /// Whether token0 is sold, i.e. the pool price moves down.
    pub fn zero_for_one(&self) -> bool {
        self.token_in < self.token_out
    }
}
