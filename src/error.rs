//! Error types for table rounding, transcoding and sample conversion.
//!
//! Every failure is fatal to a run: nothing is emitted once an error has been
//! raised, so a malformed table halts the build instead of baking a silently
//! wrong lookup table.
//!
//! ## Error Categories
//!
//! - **Configuration Errors**: Invalid options (e.g. zero significant digits)
//! - **Malformed Rows**: Wrong token count or unparsable index/value tokens
//! - **Shape Errors**: Indices outside the inferred extents, overflowing shapes
//! - **Unset Cells**: Table slots that no row addressed
//! - **Sample Errors**: Invalid JSON sample sets
//!
//! ## Examples
//!
//! ```rust
//! use lutbake::{transcode, Error};
//!
//! let result = transcode("0 0 1.5\n0 x 2.0\n");
//! assert!(matches!(result, Err(Error::MalformedRow { line: 2, .. })));
//! ```

use thiserror::Error;

/// Represents all possible errors raised while baking a table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Invalid option value, detected before any row is processed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Row with the wrong token count or an unparsable token
    #[error("Malformed row at line {line}:\n{context}\n{msg}")]
    MalformedRow {
        line: usize,
        msg: String,
        context: String,
    },

    /// Index tuple addressing a cell outside the inferred shape
    #[error("Shape mismatch at line {line}: index {index} in dimension {dimension} is out of bounds for extent {extent}\nHelp: the last row must hold the maximum index of every dimension")]
    ShapeMismatch {
        line: usize,
        dimension: usize,
        index: usize,
        extent: usize,
    },

    /// Table slot left empty after all rows were ingested
    #[error("Unset cell at offset {offset} (index {index:?}): no row addresses it")]
    UnsetCell { offset: usize, index: Vec<usize> },

    /// Cell count does not fit into the address space
    #[error("Shape {extents:?} has too many cells to address")]
    ShapeOverflow { extents: Vec<usize> },

    /// Input without a single non-blank row
    #[error("Empty input: expected at least one row")]
    EmptyInput,

    /// Invalid JSON sample set
    #[error("Invalid sample set: {0}")]
    Samples(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a configuration error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lutbake::Error;
    ///
    /// let err = Error::configuration("significant digits must be >= 1");
    /// assert!(err.to_string().contains(">= 1"));
    /// ```
    pub fn configuration(msg: &str) -> Self {
        Error::Configuration(msg.to_string())
    }

    /// Creates a malformed row error carrying the offending line as context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lutbake::Error;
    ///
    /// let err = Error::malformed_row(3, "expected 3 tokens, found 2", "0 1.5");
    /// assert!(err.to_string().contains("line 3"));
    /// assert!(err.to_string().contains("0 1.5"));
    /// ```
    pub fn malformed_row(line: usize, msg: &str, context: &str) -> Self {
        Error::MalformedRow {
            line,
            msg: msg.to_string(),
            context: context.to_string(),
        }
    }

    /// Creates a shape mismatch error for an index past its dimension's extent.
    pub fn shape_mismatch(line: usize, dimension: usize, index: usize, extent: usize) -> Self {
        Error::ShapeMismatch {
            line,
            dimension,
            index,
            extent,
        }
    }

    /// Creates an error for a JSON sample set that cannot be converted.
    pub fn samples(msg: &str) -> Self {
        Error::Samples(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Samples(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
