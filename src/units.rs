use crate::error::QuoteMathError;
use alloy::primitives::utils::{format_units, parse_units};
use alloy::primitives::U256;

/// Parses a human amount such as `"1.5"` into raw token units.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, QuoteMathError> {
    let amount = amount.trim();
    if amount.starts_with('-') {
        return Err(QuoteMathError::NegativeAmount);
    }
    Ok(parse_units(amount, decimals)?.get_absolute())
}

/// Formats raw token units for display, cut (not rounded) to `display_decimals`
/// fractional digits, without trailing zeros.
pub fn format_amount(
    amount: U256,
    decimals: u8,
    display_decimals: usize,
) -> Result<String, QuoteMathError> {
    let formatted = format_units(amount, decimals)?;
    let Some((whole, fraction)) = formatted.split_once('.') else {
        return Ok(formatted);
    };
    let fraction = &fraction[..fraction.len().min(display_decimals)];
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        Ok(whole.to_string())
    } else {
        Ok(format!("{}.{}", whole, fraction))
    }
}
