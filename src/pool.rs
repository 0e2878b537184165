use crate::error::QuoteMathError;
use crate::price::{price_ratio_to_sqrt_price_x96, sqrt_price_x96_to_price};
use crate::range::{default_range, PositionRange};
use crate::tick::TickSpacing;
use crate::tick_math::get_tick_at_sqrt_ratio;
use alloy::primitives::{Address, U256};
use log::debug;
use serde::{Deserialize, Serialize};

/// Fee tiers enabled on the factory, in hundredths of a basis point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FeeTier {
    Lowest,
    Low,
    Medium,
    High,
}

impl FeeTier {
    pub fn pips(self) -> u32 {
        match self {
            FeeTier::Lowest => 100,
            FeeTier::Low => 500,
            FeeTier::Medium => 3000,
            FeeTier::High => 10000,
        }
    }

    pub fn tick_spacing(self) -> TickSpacing {
        let spacing = match self {
            FeeTier::Lowest => 1,
            FeeTier::Low => 10,
            FeeTier::Medium => 60,
            FeeTier::High => 200,
        };
        TickSpacing::new_unchecked(spacing)
    }
}

impl TryFrom<u32> for FeeTier {
    type Error = QuoteMathError;

    fn try_from(pips: u32) -> Result<Self, Self::Error> {
        match pips {
            100 => Ok(FeeTier::Lowest),
            500 => Ok(FeeTier::Low),
            3000 => Ok(FeeTier::Medium),
            10000 => Ok(FeeTier::High),
            other => Err(QuoteMathError::UnknownFeeTier(other)),
        }
    }
}

impl From<FeeTier> for u32 {
    fn from(fee: FeeTier) -> u32 {
        fee.pips()
    }
}

/// Orders two tokens the way the factory does: token0 has the lower address.
pub fn sort_tokens(
    token_a: Address,
    token_b: Address,
) -> Result<(Address, Address), QuoteMathError> {
    if token_a == token_b {
        return Err(QuoteMathError::IdenticalTokens);
    }
    if token_a < token_b {
        Ok((token_a, token_b))
    } else {
        Ok((token_b, token_a))
    }
}

/// Pool state as read from slot0 and the pool's immutables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub tick_spacing: TickSpacing,
}

impl PoolSnapshot {
    /// Market price, raw token1 per token0. Display only.
    pub fn price(&self) -> f64 {
        sqrt_price_x96_to_price(self.sqrt_price_x96)
    }

    pub fn default_range(&self) -> PositionRange {
        default_range(self.tick, self.tick_spacing)
    }
}

/// Everything needed to create, initialize and seed a new pool from two reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolInitialization {
    pub token0: Address,
    pub token1: Address,
    pub fee: FeeTier,
    pub amount0: U256,
    pub amount1: U256,
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub range: PositionRange,
}

impl PoolInitialization {
    /// Reserves are raw amounts of each token. They are reordered with the tokens,
    /// and the initial price is the exact ratio amount1 / amount0.
    ///
    /// The seeding range is the default range around the initial tick. A price so
    /// close to either end of the tick range that the default range spills past it
    /// is rejected with `TickOutOfBounds`.
    pub fn from_reserves(
        token_a: Address,
        amount_a: U256,
        token_b: Address,
        amount_b: U256,
        fee: FeeTier,
    ) -> Result<Self, QuoteMathError> {
        let (token0, token1) = sort_tokens(token_a, token_b)?;
        let (amount0, amount1) = if token0 == token_a {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };
        let sqrt_price_x96 = price_ratio_to_sqrt_price_x96(amount1, amount0)?;
        let tick = get_tick_at_sqrt_ratio(sqrt_price_x96)?;
        let tick_spacing = fee.tick_spacing();
        let range = default_range(tick, tick_spacing);
        let range = PositionRange::new(range.tick_lower, range.tick_upper, tick_spacing)?;
        debug!(
            "initializing pool {}/{} fee {} at sqrt price {} (tick {}), range [{}, {}]",
            token0,
            token1,
            fee.pips(),
            sqrt_price_x96,
            tick,
            range.tick_lower,
            range.tick_upper
        );
        Ok(PoolInitialization {
            token0,
            token1,
            fee,
            amount0,
            amount1,
            sqrt_price_x96,
            tick,
            range,
        })
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            sqrt_price_x96: self.sqrt_price_x96,
            tick: self.tick,
            tick_spacing: self.fee.tick_spacing(),
        }
    }
}
