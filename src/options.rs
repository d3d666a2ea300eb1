//! Configuration options for rounding, transcoding and sample conversion.
//!
//! This module provides types to customize each stage of the pipeline:
//!
//! - [`RoundOptions`]: Significant digits kept by the rounding filter
//! - [`LiteralOptions`]: Shape inference and scalar formatting of the literal
//! - [`ShapeInference`]: Where the table's extents are read from
//! - [`SampleOptions`]: Which field of a JSON sample holds the value
//!
//! ## Examples
//!
//! ```rust
//! use lutbake::{transcode_with_options, LiteralOptions, ShapeInference};
//!
//! // Rows out of order: scan every row for the true maxima
//! let options = LiteralOptions::new().with_shape_inference(ShapeInference::MaxScan);
//! let literal = transcode_with_options("1 2.5\n0 1.0\n", &options).unwrap();
//! assert_eq!(literal, "{\n1.0f, 2.5f\n}\n");
//! ```

/// Significant digits used by the rounding filter unless configured otherwise.
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 9;

/// Options for the rounding filter.
///
/// # Examples
///
/// ```rust
/// use lutbake::RoundOptions;
///
/// let options = RoundOptions::new().with_significant_digits(3);
/// assert_eq!(options.significant_digits, 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RoundOptions {
    pub significant_digits: usize,
}

impl Default for RoundOptions {
    fn default() -> Self {
        RoundOptions {
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
        }
    }
}

impl RoundOptions {
    /// Creates default options (9 significant digits).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of significant digits kept in the value column.
    ///
    /// Values below 1 are rejected when the filter is constructed.
    #[must_use]
    pub fn with_significant_digits(mut self, digits: usize) -> Self {
        self.significant_digits = digits;
        self
    }
}

/// Strategy for deriving the table's extents.
///
/// - **LastRow**: Default. Dimensionality and extents come from the final row,
///   which by input convention carries the maximum index of every dimension.
///   The convention is not verified; a row exceeding it fails with
///   [`Error::ShapeMismatch`](crate::Error::ShapeMismatch).
/// - **MaxScan**: Dimensionality comes from the final row, extents from the
///   maximum index seen in each dimension across all rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShapeInference {
    #[default]
    LastRow,
    MaxScan,
}

/// Options for the literal emitter.
///
/// # Examples
///
/// ```rust
/// use lutbake::{LiteralOptions, ShapeInference};
///
/// let options = LiteralOptions::new();
/// assert_eq!(options.nan_literal, "0.f");
/// assert_eq!(options.float_suffix, Some('f'));
/// assert_eq!(options.shape_inference, ShapeInference::LastRow);
///
/// let options = LiteralOptions::new()
///     .with_nan_literal("NAN")
///     .without_float_suffix();
/// assert_eq!(options.float_suffix, None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LiteralOptions {
    pub shape_inference: ShapeInference,
    pub nan_literal: String,
    pub float_suffix: Option<char>,
}

impl Default for LiteralOptions {
    fn default() -> Self {
        LiteralOptions {
            shape_inference: ShapeInference::default(),
            nan_literal: "0.f".to_string(),
            float_suffix: Some('f'),
        }
    }
}

impl LiteralOptions {
    /// Creates default options (last-row shape, `nan` as `0.f`, `f` suffix).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_shape_inference(mut self, inference: ShapeInference) -> Self {
        self.shape_inference = inference;
        self
    }

    /// Sets the literal substituted for `nan` value tokens.
    #[must_use]
    pub fn with_nan_literal(mut self, literal: &str) -> Self {
        self.nan_literal = literal.to_string();
        self
    }

    /// Sets the marker appended to values containing a decimal point.
    #[must_use]
    pub fn with_float_suffix(mut self, suffix: char) -> Self {
        self.float_suffix = Some(suffix);
        self
    }

    /// Emits decimal values verbatim, without a float-literal marker.
    #[must_use]
    pub fn without_float_suffix(mut self) -> Self {
        self.float_suffix = None;
        self
    }
}

/// Options for converting a JSON sample set into rows.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleOptions {
    pub value_field: String,
}

impl Default for SampleOptions {
    fn default() -> Self {
        SampleOptions {
            value_field: "albedo".to_string(),
        }
    }
}

impl SampleOptions {
    /// Creates default options (values read from the `albedo` field).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field of each result object that holds the sample value.
    #[must_use]
    pub fn with_value_field(mut self, field: &str) -> Self {
        self.value_field = field.to_string();
        self
    }
}
