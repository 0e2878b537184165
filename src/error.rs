use alloy::primitives::utils::UnitsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteMathError {
    // square root of a negative value
    #[error("Square root of negative numbers is not supported")]
    NegativeSquareRoot,
    // price ratio with a zero denominator
    #[error("amount0 cannot be 0")]
    ZeroAmount0,
    // lower and upper sqrt prices are equal
    #[error("Price range has zero width")]
    ZeroWidthRange,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Sqrt price is zero")]
    ZeroSqrtPrice,
    #[error("Invalid price {0}")]
    InvalidPrice(f64),
    #[error("Tick {0} out of bounds")]
    TickOutOfBounds(i32),
    #[error("Sqrt price out of bounds")]
    SqrtPriceOutOfBounds,
    #[error("Invalid tick spacing {0}")]
    InvalidTickSpacing(i32),
    #[error("Invalid tick range [{lower}, {upper}]")]
    InvalidRange { lower: i32, upper: i32 },
    #[error("Tick {tick} is not a multiple of tick spacing {spacing}")]
    UnalignedTick { tick: i32, spacing: i32 },
    #[error("Overflow when computing intermediate value")]
    Overflow,
    #[error("Liquidity does not fit in u128")]
    LiquidityOverflow,
    #[error("Cannot remove {requested} liquidity from a position holding {available}")]
    InsufficientLiquidity { requested: u128, available: u128 },
    #[error("Invalid slippage tolerance {0}%")]
    InvalidSlippage(f64),
    // sqrt price limit at or below MIN_SQRT_RATIO, or not below the current price
    #[error("Sqrt price limit too low")]
    SqrtPriceLimitTooLow,
    // sqrt price limit at or above MAX_SQRT_RATIO, or not above the current price
    #[error("Sqrt price limit too high")]
    SqrtPriceLimitTooHigh,
    #[error("Sqrt price limit does not fit in uint160")]
    SqrtPriceLimitNotUint160,
    #[error("Tokens must be different")]
    IdenticalTokens,
    #[error("Unknown fee tier {0}")]
    UnknownFeeTier(u32),
    #[error("Amount must not be negative")]
    NegativeAmount,
    #[error(transparent)]
    Units(#[from] UnitsError),
}
