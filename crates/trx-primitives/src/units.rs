//! Amount units. All on-chain amounts are integer SUN.

use thiserror::Error;

/// SUN per TRX (1 major unit = 1,000,000 minor units)
pub const SUN_PER_TRX: i64 = 1_000_000;

/// Fractional digits of the major unit
pub const TRX_DECIMALS: u32 = 6;

/// Unit conversion error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    /// Not a decimal number
    #[error("invalid decimal amount: {0}")]
    InvalidAmount(String),
    /// More fractional digits than the unit carries
    #[error("too many fractional digits: {got} > {max}")]
    TooManyDigits {
        /// digits supplied
        got: u32,
        /// digits the unit allows
        max: u32,
    },
    /// Result does not fit the target integer type
    #[error("amount overflow")]
    Overflow,
}

/// Parse a decimal string into integer minor units with `decimals`
/// fractional digits. Pure integer arithmetic, no floating point.
///
/// `parse_units("1.5", 6)` is `1_500_000`.
pub fn parse_units(value: &str, decimals: u32) -> Result<u128, UnitsError> {
    let value = value.trim();
    let (whole, frac) = match value.split_once('.') {
        Some((w, f)) => (w, f),
        None => (value, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(UnitsError::InvalidAmount(value.to_string()));
    }
    if frac.len() as u32 > decimals {
        return Err(UnitsError::TooManyDigits {
            got: frac.len() as u32,
            max: decimals,
        });
    }

    let whole: u128 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| UnitsError::InvalidAmount(value.to_string()))?
    };
    let frac_scaled: u128 = if frac.is_empty() {
        0
    } else {
        let parsed: u128 = frac
            .parse()
            .map_err(|_| UnitsError::InvalidAmount(value.to_string()))?;
        parsed * 10u128.pow(decimals - frac.len() as u32)
    };

    whole
        .checked_mul(10u128.pow(decimals))
        .and_then(|w| w.checked_add(frac_scaled))
        .ok_or(UnitsError::Overflow)
}

/// Parse a decimal TRX string into SUN.
pub fn to_sun(value: &str) -> Result<i64, UnitsError> {
    let sun = parse_units(value, TRX_DECIMALS)?;
    i64::try_from(sun).map_err(|_| UnitsError::Overflow)
}
