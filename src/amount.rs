//! Decimal-string ↔ base-unit conversion for the native token.
//!
//! All arithmetic is done on decimal digit strings — never floating point —
//! so display values round-trip exactly. 1 token = 10^18 base units.

use thiserror::Error;

/// Decimal places of the native token.
pub const DECIMALS: usize = 18;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("malformed amount: {0:?}")]
    Malformed(String),

    #[error("amount has more than {} decimal places", DECIMALS)]
    TooPrecise,

    #[error("amount does not fit in the base-unit range")]
    Overflow,
}

/// Parse a human-readable decimal amount (e.g. "10.5") into base units.
///
/// Accepts unsigned decimals with at most one `.` and up to [`DECIMALS`]
/// fractional digits. Anything else fails fast — callers must not submit.
pub fn parse_units(s: &str) -> Result<u128, AmountError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(AmountError::Malformed(s.to_string()));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::Malformed(s.to_string()));
    }
    if frac.len() > DECIMALS {
        return Err(AmountError::TooPrecise);
    }

    let whole_val: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| AmountError::Overflow)?
    };

    // Pad the fractional part to exactly DECIMALS digits.
    let frac_padded = format!("{:0<width$}", frac, width = DECIMALS);
    let frac_val: u128 = frac_padded.parse().map_err(|_| AmountError::Overflow)?;

    let scale = 10u128.pow(DECIMALS as u32);
    whole_val
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_val))
        .ok_or(AmountError::Overflow)
}

/// Format a base-unit amount as a decimal string, trimming trailing zeros.
pub fn format_units(v: u128) -> String {
    let scale = 10u128.pow(DECIMALS as u32);
    let whole = v / scale;
    let frac = v % scale;

    if frac == 0 {
        return whole.to_string();
    }

    let frac_str = format!("{:0>width$}", frac, width = DECIMALS);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn parses_whole_amounts() {
        assert_eq!(parse_units("1").unwrap(), UNIT);
        assert_eq!(parse_units("42").unwrap(), 42 * UNIT);
        assert_eq!(parse_units("0").unwrap(), 0);
    }

    #[test]
    fn parses_fractional_amounts() {
        assert_eq!(parse_units("10.5").unwrap(), 10 * UNIT + UNIT / 2);
        assert_eq!(parse_units("0.000000000000000001").unwrap(), 1);
        assert_eq!(parse_units(".5").unwrap(), UNIT / 2);
        assert_eq!(parse_units("5.").unwrap(), 5 * UNIT);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(parse_units(" 1.5 ").unwrap(), UNIT + UNIT / 2);
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse_units(""), Err(AmountError::Empty));
        assert_eq!(parse_units("   "), Err(AmountError::Empty));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(parse_units("abc"), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_units("1.2.3"), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_units("-1"), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_units("1e5"), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_units("."), Err(AmountError::Malformed(_))));
    }

    #[test]
    fn rejects_excess_precision() {
        assert_eq!(
            parse_units("0.0000000000000000001"),
            Err(AmountError::TooPrecise)
        );
    }

    #[test]
    fn rejects_overflow() {
        // u128::MAX is ~3.4e38; 1e21 whole tokens exceeds it after scaling.
        let huge = "1".repeat(40);
        assert_eq!(parse_units(&huge), Err(AmountError::Overflow));
    }

    #[test]
    fn formats_and_trims() {
        assert_eq!(format_units(0), "0");
        assert_eq!(format_units(UNIT), "1");
        assert_eq!(format_units(10 * UNIT + UNIT / 2), "10.5");
        assert_eq!(format_units(1), "0.000000000000000001");
    }

    #[test]
    fn round_trips_exact_decimals() {
        for s in ["10.5", "0.25", "1", "123.456789", "0.000000000000000001"] {
            assert_eq!(format_units(parse_units(s).unwrap()), s);
        }
    }
}
