//! Row tokenization for the whitespace-separated sample table.
//!
//! A row is one non-blank input line: `idx_0 idx_1 ... idx_{N-1} value`.
//! Blank lines are skipped, but every [`Row`] remembers its physical
//! (1-based) line number so diagnostics point at the right place.

use crate::{Error, Result};

/// Token accepted as a missing sample in the value column.
pub const NAN_TOKEN: &str = "nan";

/// A single tokenized row of the input table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row<'a> {
    line: usize,
    text: &'a str,
    tokens: Vec<&'a str>,
}

impl<'a> Row<'a> {
    /// Tokenizes one input line. Returns `None` for blank lines.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lutbake::Row;
    ///
    /// let row = Row::parse(1, "3 2 0.25").unwrap();
    /// assert_eq!(row.tokens(), &["3", "2", "0.25"]);
    /// assert_eq!(row.value(), "0.25");
    /// assert!(Row::parse(2, "   ").is_none());
    /// ```
    pub fn parse(line: usize, text: &'a str) -> Option<Self> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return None;
        }
        Some(Row { line, text, tokens })
    }

    /// 1-based line number in the input.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    /// Number of leading index columns, i.e. all tokens but the value.
    pub fn index_count(&self) -> usize {
        self.tokens.len() - 1
    }

    /// The value token (always the last one).
    pub fn value(&self) -> &'a str {
        self.tokens[self.tokens.len() - 1]
    }

    /// Parses the index tuple of a row expected to address an `ndims`-dimensional table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRow`] if the row does not have exactly
    /// `ndims + 1` tokens or an index is not a non-negative integer.
    pub fn indices(&self, ndims: usize) -> Result<Vec<usize>> {
        if self.tokens.len() != ndims + 1 {
            return Err(self.malformed(&format!(
                "expected {} index column(s) and a value, found {} token(s)",
                ndims,
                self.tokens.len()
            )));
        }
        self.tokens[..ndims]
            .iter()
            .enumerate()
            .map(|(dimension, token)| {
                token.parse::<usize>().map_err(|_| {
                    self.malformed(&format!(
                        "index column {} ('{}') is not a non-negative integer",
                        dimension, token
                    ))
                })
            })
            .collect()
    }

    /// Returns the value token after checking it is `nan` or a number.
    ///
    /// The token is returned verbatim; it is never re-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRow`] if the token is not numeric.
    pub fn checked_value(&self) -> Result<&'a str> {
        let value = self.value();
        if value == NAN_TOKEN || value.parse::<f64>().is_ok() {
            Ok(value)
        } else {
            Err(self.malformed(&format!("value '{}' is not a number or 'nan'", value)))
        }
    }

    /// Parses the value token as a floating-point number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRow`] if the token is not numeric.
    pub fn numeric_value(&self) -> Result<f64> {
        let value = self.value();
        value
            .parse::<f64>()
            .map_err(|_| self.malformed(&format!("value '{}' is not a number", value)))
    }

    pub(crate) fn malformed(&self, msg: &str) -> Error {
        Error::malformed_row(self.line, msg, self.text.trim_end())
    }
}

/// Tokenizes every non-blank line of `input`.
///
/// # Examples
///
/// ```rust
/// use lutbake::parse_rows;
///
/// let rows = parse_rows("0 1.5\n\n1 2.5\n");
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].line(), 3);
/// ```
pub fn parse_rows(input: &str) -> Vec<Row<'_>> {
    input
        .lines()
        .enumerate()
        .filter_map(|(i, text)| Row::parse(i + 1, text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_parse() {
        let row = Row::parse(1, "3 2 1.5").unwrap();
        assert_eq!(row.index_count(), 2);
        assert_eq!(row.indices(2).unwrap(), vec![3, 2]);
    }

    #[test]
    fn test_indices_wrong_arity() {
        let row = Row::parse(7, "3 1.5").unwrap();
        let err = row.indices(2).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { line: 7, .. }));
        assert!(err.to_string().contains("found 2 token(s)"));

        let row = Row::parse(8, "3 2 1 1.5").unwrap();
        assert!(row.indices(2).is_err());
    }

    #[test]
    fn test_negative_index_rejected() {
        let row = Row::parse(2, "-1 0 1.5").unwrap();
        let err = row.indices(2).unwrap_err();
        assert!(err.to_string().contains("index column 0"));
    }

    #[test]
    fn test_checked_value() {
        assert_eq!(Row::parse(1, "0 nan").unwrap().checked_value().unwrap(), "nan");
        assert_eq!(Row::parse(1, "0 1.50").unwrap().checked_value().unwrap(), "1.50");
        assert_eq!(Row::parse(1, "0 -2e-3").unwrap().checked_value().unwrap(), "-2e-3");
        assert!(Row::parse(1, "0 abc").unwrap().checked_value().is_err());
    }

    #[test]
    fn test_crlf_and_tabs() {
        let rows = parse_rows("0\t1 0.5\r\n1\t1 0.75\r\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tokens(), &["0", "1", "0.5"]);
        assert_eq!(rows[1].value(), "0.75");
    }
}
