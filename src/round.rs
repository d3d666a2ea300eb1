//! Significant-digit rounding of the value column.
//!
//! The [`RoundingFilter`] is a text-to-text pre-processing pass: every row
//! keeps its index tokens and gets its value token replaced by a normalized
//! scientific-notation string with a fixed number of significant digits,
//! e.g. `3.14159` at three digits becomes `3.14e+00`. Its output is valid
//! input for the transcoder.
//!
//! ```rust
//! use lutbake::{RoundingFilter, RoundOptions};
//!
//! let filter = RoundingFilter::new(RoundOptions::new().with_significant_digits(3)).unwrap();
//! assert_eq!(filter.filter_str("7 3.14159\n").unwrap(), "7 3.14e+00\n");
//! ```

use crate::row::{Row, NAN_TOKEN};
use crate::{Error, Result, RoundOptions};
use tracing::debug;

/// Formats `value` with exactly `digits` significant digits.
///
/// The mantissa carries `digits - 1` fractional digits and the exponent is
/// signed with at least two digits (`1.50e-03`). NaN renders as `nan`,
/// infinities as `inf` / `-inf`.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if `digits` is zero.
///
/// # Examples
///
/// ```rust
/// use lutbake::round_to_significant;
///
/// assert_eq!(round_to_significant(3.14159, 3).unwrap(), "3.14e+00");
/// assert_eq!(round_to_significant(-0.00123456, 2).unwrap(), "-1.2e-03");
/// assert_eq!(round_to_significant(f64::NAN, 9).unwrap(), "nan");
/// assert!(round_to_significant(1.0, 0).is_err());
/// ```
pub fn round_to_significant(value: f64, digits: usize) -> Result<String> {
    if digits < 1 {
        return Err(Error::configuration(
            "number of significant digits must be >= 1",
        ));
    }
    if value.is_nan() {
        return Ok(NAN_TOKEN.to_string());
    }
    if value.is_infinite() {
        return Ok(if value < 0.0 { "-inf" } else { "inf" }.to_string());
    }

    // Rust renders exponents as `e0` / `e-3`; widen to `e+00` / `e-03`.
    let formatted = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = formatted
        .split_once('e')
        .ok_or_else(|| Error::custom(format!("missing exponent in '{}'", formatted)))?;
    let exponent: i32 = exponent
        .parse()
        .map_err(|_| Error::custom(format!("invalid exponent in '{}'", formatted)))?;
    let sign = if exponent < 0 { '-' } else { '+' };
    Ok(format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs()))
}

/// Row filter replacing each value with its rounded representation.
#[derive(Clone, Debug)]
pub struct RoundingFilter {
    digits: usize,
}

impl RoundingFilter {
    /// Creates a filter, validating the options up front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if fewer than one significant digit is requested.
    pub fn new(options: RoundOptions) -> Result<Self> {
        if options.significant_digits < 1 {
            return Err(Error::configuration(
                "number of significant digits must be >= 1",
            ));
        }
        Ok(RoundingFilter {
            digits: options.significant_digits,
        })
    }

    pub fn significant_digits(&self) -> usize {
        self.digits
    }

    /// Rewrites one row: index tokens unchanged, value rounded, single-space separated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRow`] if the value token is not a number.
    pub fn filter_row(&self, row: &Row<'_>) -> Result<String> {
        let rounded = round_to_significant(row.numeric_value()?, self.digits)?;
        let tokens = row.tokens();
        let mut output = String::with_capacity(row.tokens().iter().map(|t| t.len() + 1).sum());
        for token in &tokens[..tokens.len() - 1] {
            output.push_str(token);
            output.push(' ');
        }
        output.push_str(&rounded);
        Ok(output)
    }

    /// Rewrites a whole table, one output line per input line.
    ///
    /// Blank lines are kept as empty lines, so line numbers in the output
    /// match the input.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed row; no partial output is returned.
    pub fn filter_str(&self, input: &str) -> Result<String> {
        let mut output = String::with_capacity(input.len());
        let mut rows = 0usize;
        for (i, text) in input.lines().enumerate() {
            if let Some(row) = Row::parse(i + 1, text) {
                output.push_str(&self.filter_row(&row)?);
                rows += 1;
            }
            output.push('\n');
        }
        debug!(rows, digits = self.digits, "rounded table");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_examples() {
        assert_eq!(round_to_significant(3.14159, 3).unwrap(), "3.14e+00");
        assert_eq!(round_to_significant(0.5, 9).unwrap(), "5.00000000e-01");
        assert_eq!(round_to_significant(123456.0, 1).unwrap(), "1e+05");
        assert_eq!(round_to_significant(9.996, 3).unwrap(), "1.00e+01");
        assert_eq!(round_to_significant(1.5e-120, 2).unwrap(), "1.5e-120");
        assert_eq!(round_to_significant(0.0, 3).unwrap(), "0.00e+00");
    }

    #[test]
    fn test_round_special_values() {
        assert_eq!(round_to_significant(f64::INFINITY, 4).unwrap(), "inf");
        assert_eq!(round_to_significant(f64::NEG_INFINITY, 4).unwrap(), "-inf");
        assert_eq!(round_to_significant(f64::NAN, 4).unwrap(), "nan");
    }

    #[test]
    fn test_zero_digits_rejected_before_rows() {
        let err = RoundingFilter::new(RoundOptions::new().with_significant_digits(0)).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_filter_preserves_indices() {
        let filter = RoundingFilter::new(RoundOptions::default()).unwrap();
        let row = Row::parse(1, "  4\t007   0.1").unwrap();
        assert_eq!(filter.filter_row(&row).unwrap(), "4 007 1.00000000e-01");
    }

    #[test]
    fn test_filter_nan_row() {
        let filter = RoundingFilter::new(RoundOptions::default()).unwrap();
        assert_eq!(filter.filter_str("1 0 nan\n").unwrap(), "1 0 nan\n");
    }

    #[test]
    fn test_filter_malformed_value() {
        let filter = RoundingFilter::new(RoundOptions::default()).unwrap();
        let err = filter.filter_str("0 1.0\n1 oops\n").unwrap_err();
        assert!(matches!(err, Error::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_filter_keeps_blank_lines() {
        let filter = RoundingFilter::new(RoundOptions::new().with_significant_digits(3)).unwrap();
        assert_eq!(
            filter.filter_str("0 1.0\n\n1 2.0\n").unwrap(),
            "0 1.00e+00\n\n1 2.00e+00\n"
        );
        assert_eq!(filter.filter_str("0 1.0\n  \t\n").unwrap(), "0 1.00e+00\n\n");
    }

    #[test]
    fn test_filter_line_numbers_count_blank_lines() {
        let filter = RoundingFilter::new(RoundOptions::default()).unwrap();
        let err = filter.filter_str("0 1.0\n\n1 bad\n").unwrap_err();
        assert!(matches!(err, Error::MalformedRow { line: 3, .. }));
    }
}
