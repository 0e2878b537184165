use crate::error::QuoteMathError;
use crate::liquidity_amounts::{amounts_for_liquidity, AmountPair};
use crate::range::PositionRange;
use crate::slippage::Slippage;
use crate::tick_math::get_sqrt_ratio_at_tick;
use alloy::primitives::U256;
use log::debug;

/// A position as read back from the position manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSnapshot {
    pub liquidity: u128,
    pub range: PositionRange,
}

/// Parameters for a decrease-liquidity call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecreaseLiquidityPlan {
    pub liquidity: u128,
    pub expected: AmountPair,
    pub amount0_min: U256,
    pub amount1_min: U256,
}

/// Parameters for a mint call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintPlan {
    pub range: PositionRange,
    pub amount0_desired: U256,
    pub amount1_desired: U256,
    pub amount0_min: U256,
    pub amount1_min: U256,
}

impl PositionSnapshot {
    fn sqrt_bounds(&self) -> Result<(U256, U256), QuoteMathError> {
        Ok((
            get_sqrt_ratio_at_tick(self.range.tick_lower)?,
            get_sqrt_ratio_at_tick(self.range.tick_upper)?,
        ))
    }

    fn amounts_for(
        &self,
        liquidity: u128,
        sqrt_price_x96: U256,
    ) -> Result<AmountPair, QuoteMathError> {
        let (sqrt_lower, sqrt_upper) = self.sqrt_bounds()?;
        amounts_for_liquidity(sqrt_price_x96, sqrt_lower, sqrt_upper, liquidity)
    }

    /// Tokens the whole position would return at the pool's current sqrt price.
    pub fn withdrawable_amounts(&self, sqrt_price_x96: U256) -> Result<AmountPair, QuoteMathError> {
        self.amounts_for(self.liquidity, sqrt_price_x96)
    }

    /// Same as [`Self::withdrawable_amounts`] when only the current tick is known.
    pub fn withdrawable_amounts_at_tick(
        &self,
        current_tick: i32,
    ) -> Result<AmountPair, QuoteMathError> {
        self.withdrawable_amounts(get_sqrt_ratio_at_tick(current_tick)?)
    }

    /// Sizes the removal of `liquidity` from this position.
    ///
    /// Minimums are `floor(amount * tolerance)`, a client side floor only.
    pub fn plan_decrease(
        &self,
        liquidity: u128,
        sqrt_price_x96: U256,
        slippage: Slippage,
    ) -> Result<DecreaseLiquidityPlan, QuoteMathError> {
        if liquidity > self.liquidity {
            return Err(QuoteMathError::InsufficientLiquidity {
                requested: liquidity,
                available: self.liquidity,
            });
        }
        let expected = self.amounts_for(liquidity, sqrt_price_x96)?;
        let plan = DecreaseLiquidityPlan {
            liquidity,
            expected,
            amount0_min: slippage.fraction_of(expected.amount0),
            amount1_min: slippage.fraction_of(expected.amount1),
        };
        debug!(
            "decrease {} of {} liquidity in [{}, {}]: amount0={} amount1={}",
            liquidity,
            self.liquidity,
            self.range.tick_lower,
            self.range.tick_upper,
            expected.amount0,
            expected.amount1
        );
        Ok(plan)
    }
}

/// Mint parameters with minimums of `amount * (1 - tolerance)`.
pub fn plan_mint(
    range: PositionRange,
    amount0_desired: U256,
    amount1_desired: U256,
    slippage: Slippage,
) -> MintPlan {
    MintPlan {
        range,
        amount0_desired,
        amount1_desired,
        amount0_min: slippage.minimum_out(amount0_desired),
        amount1_min: slippage.minimum_out(amount1_desired),
    }
}
