pub mod error;
pub mod full_math;
pub mod liquidity_amounts;
pub mod pool;
pub mod position;
pub mod price;
pub mod range;
pub mod settings;
pub mod slippage;
pub mod swap;
pub mod tick;
pub mod tick_math;
pub mod units;

pub use error::QuoteMathError;
pub use liquidity_amounts::{compute_required_paired_amount, AmountPair, PairedAmount};
pub use pool::{FeeTier, PoolInitialization, PoolSnapshot};
pub use position::{plan_mint, DecreaseLiquidityPlan, MintPlan, PositionSnapshot};
pub use range::{default_range, range_from_prices, PositionRange};
pub use settings::{SettingsError, TransactionSettings};
pub use slippage::Slippage;
pub use swap::{ExactInputSingle, SwapQuote};
pub use tick::{snap_tick, TickSpacing};
