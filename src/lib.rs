//! # lutbake
//!
//! Bakes plain-text tables of N-dimensional sample data into flattened,
//! source-embeddable array literals.
//!
//! ## Input
//!
//! One row per sample: `N` non-negative integer indices followed by a value,
//! all separated by whitespace. The value is a decimal number or `nan`.
//!
//! ```text
//! 0 0 1.5
//! 0 1 2.0
//! 1 0 nan
//! 1 1 3.25
//! ```
//!
//! ## Pipeline
//!
//! 1. **Rounding** ([`RoundingFilter`], optional): rewrites every value with a
//!    fixed number of significant digits. Text in, text out.
//! 2. **Shape inference** ([`Shape::infer`]): the number of dimensions and the
//!    extents come from the last row, which by convention holds the maximum
//!    index of every dimension.
//! 3. **Dense reconstruction** ([`DenseTable::from_rows`]): each row's value
//!    text is stored at its row-major offset. Rows may be in any order.
//! 4. **Literal emission** ([`LiteralWriter`]): the buffer is written in
//!    row-major order; `nan` becomes `0.f`, decimal values get an `f` suffix
//!    and each run over the last dimension goes on its own line.
//!
//! ```rust
//! use lutbake::{round_table_with_options, transcode, RoundOptions};
//!
//! let rounded = round_table_with_options(
//!     "0 0 1.5\n0 1 2\n1 0 nan\n1 1 3.25\n",
//!     &RoundOptions::new().with_significant_digits(3),
//! )
//! .unwrap();
//! assert_eq!(rounded, "0 0 1.50e+00\n0 1 2.00e+00\n1 0 nan\n1 1 3.25e+00\n");
//!
//! let literal = transcode(&rounded).unwrap();
//! assert_eq!(literal, "{\n1.50e+00f, 2.00e+00f,\n0.f, 3.25e+00f\n}\n");
//! ```
//!
//! ## Failure Model
//!
//! Every stage runs over the whole input in memory and either completes or
//! fails with an [`Error`]; no partial output is ever produced. Besides
//! malformed rows, the transcoder rejects indices beyond the inferred shape
//! ([`Error::ShapeMismatch`]) and tables with cells no row addressed
//! ([`Error::UnsetCell`]).

pub mod decl;
pub mod dense;
pub mod error;
pub mod literal;
pub mod options;
pub mod round;
pub mod row;
pub mod samples;
pub mod shape;

pub use decl::Declaration;
pub use dense::DenseTable;
pub use error::{Error, Result};
pub use literal::{format_value, LiteralWriter};
pub use options::{LiteralOptions, RoundOptions, SampleOptions, ShapeInference};
pub use round::{round_to_significant, RoundingFilter};
pub use row::{parse_rows, Row};
pub use samples::SampleSet;
pub use shape::Shape;

use std::io;

/// Rounds the value column of a table to 9 significant digits.
///
/// # Errors
///
/// Returns [`Error::MalformedRow`] if a value is not a number.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn round_table(input: &str) -> Result<String> {
    round_table_with_options(input, &RoundOptions::default())
}

/// Rounds the value column of a table with custom options.
///
/// # Examples
///
/// ```rust
/// use lutbake::{round_table_with_options, RoundOptions};
///
/// let options = RoundOptions::new().with_significant_digits(3);
/// assert_eq!(round_table_with_options("7 3.14159\n", &options).unwrap(), "7 3.14e+00\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Configuration`] for fewer than one significant digit,
/// before any row is read, and [`Error::MalformedRow`] for a bad value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn round_table_with_options(input: &str, options: &RoundOptions) -> Result<String> {
    RoundingFilter::new(options.clone())?.filter_str(input)
}

/// Parses a table and reconstructs its dense buffer.
///
/// # Errors
///
/// See [`Shape::infer`] and [`DenseTable::from_rows`].
pub fn dense_table(input: &str, inference: ShapeInference) -> Result<DenseTable> {
    let rows = parse_rows(input);
    let shape = Shape::infer(&rows, inference)?;
    DenseTable::from_rows(&rows, shape)
}

/// Transcodes a table into a flattened array literal with default options.
///
/// # Examples
///
/// ```rust
/// use lutbake::transcode;
///
/// assert_eq!(transcode("0 1\n1 2.5\n2 nan\n").unwrap(), "{\n1, 2.5f, 0.f\n}\n");
/// ```
///
/// # Errors
///
/// Returns an error if the input is empty or malformed, an index exceeds the
/// inferred shape, or a cell is never written.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn transcode(input: &str) -> Result<String> {
    transcode_with_options(input, &LiteralOptions::default())
}

/// Transcodes a table into a flattened array literal with custom options.
///
/// # Errors
///
/// Same as [`transcode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn transcode_with_options(input: &str, options: &LiteralOptions) -> Result<String> {
    let table = dense_table(input, options.shape_inference)?;
    let mut writer = LiteralWriter::new(options);
    writer.write_table(&table)?;
    Ok(writer.into_inner())
}

/// Transcodes a table and writes the literal to `writer`.
///
/// The literal is fully built before anything is written.
///
/// # Errors
///
/// Returns transcoding errors, or [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn transcode_to_writer<W>(mut writer: W, input: &str, options: &LiteralOptions) -> Result<()>
where
    W: io::Write,
{
    let literal = transcode_with_options(input, options)?;
    writer
        .write_all(literal.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Converts a JSON sample set into a row table.
///
/// # Errors
///
/// Returns [`Error::Samples`] for invalid JSON or an inconsistent sample set.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn samples_to_table(json: &str, options: &SampleOptions) -> Result<String> {
    SampleSet::from_json(json)?.to_table(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcode_worked_example() {
        let input = "0 0 1.5\n0 1 2.0\n1 0 nan\n1 1 3.25\n";
        assert_eq!(
            transcode(input).unwrap(),
            "{\n1.5f, 2.0f,\n0.f, 3.25f\n}\n"
        );
    }

    #[test]
    fn test_round_worked_example() {
        let options = RoundOptions::new().with_significant_digits(3);
        assert_eq!(
            round_table_with_options("7 3.14159", &options).unwrap(),
            "7 3.14e+00\n"
        );
    }

    #[test]
    fn test_zero_digits_fail_before_rows() {
        let options = RoundOptions::new().with_significant_digits(0);
        // The malformed row is never reached.
        let err = round_table_with_options("0 not-a-number\n", &options).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_transcode_to_writer() {
        let mut buffer = Vec::new();
        transcode_to_writer(&mut buffer, "0 1.0\n1 2.0\n", &LiteralOptions::default()).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "{\n1.0f, 2.0f\n}\n");
    }

    #[test]
    fn test_writer_untouched_on_error() {
        let mut buffer = Vec::new();
        let result = transcode_to_writer(&mut buffer, "0 1.0\n2 2.0\n", &LiteralOptions::default());
        assert!(matches!(result, Err(Error::UnsetCell { offset: 1, .. })));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(transcode("").unwrap_err(), Error::EmptyInput);
    }
}
