//! Flattened array literal emission.
//!
//! The [`LiteralWriter`] walks a [`DenseTable`] in row-major order and writes
//! one brace-framed list of scalars. Values are separated by `", "`, except
//! where the first `N - 1` coordinates change between two neighbouring
//! cells: that boundary gets `",\n"` instead, so every run over the last
//! dimension lands on its own line. Exactly one separator sits between any
//! two values.
//!
//! ```rust
//! use lutbake::transcode;
//!
//! let input = "0 0 1.5\n0 1 2.0\n1 0 nan\n1 1 3.25\n";
//! assert_eq!(transcode(input).unwrap(), "{\n1.5f, 2.0f,\n0.f, 3.25f\n}\n");
//! ```

use std::borrow::Cow;

use crate::row::NAN_TOKEN;
use crate::{DenseTable, Error, LiteralOptions, Result};

const VALUE_SEPARATOR: &str = ", ";
const GROUP_SEPARATOR: &str = ",\n";

/// Formats a single stored value token.
///
/// `nan` becomes the configured NaN literal; text containing a decimal
/// point gets the float suffix; anything else is emitted as is.
///
/// # Examples
///
/// ```rust
/// use lutbake::{format_value, LiteralOptions};
///
/// let options = LiteralOptions::default();
/// assert_eq!(format_value("nan", &options), "0.f");
/// assert_eq!(format_value("2.5e-03", &options), "2.5e-03f");
/// assert_eq!(format_value("42", &options), "42");
/// ```
pub fn format_value<'a>(text: &'a str, options: &'a LiteralOptions) -> Cow<'a, str> {
    if text == NAN_TOKEN {
        return Cow::Borrowed(options.nan_literal.as_str());
    }
    match options.float_suffix {
        Some(suffix) if text.contains('.') => {
            let mut literal = String::with_capacity(text.len() + suffix.len_utf8());
            literal.push_str(text);
            literal.push(suffix);
            Cow::Owned(literal)
        }
        _ => Cow::Borrowed(text),
    }
}

/// Writer producing the array literal of a dense table.
pub struct LiteralWriter<'o> {
    output: String,
    options: &'o LiteralOptions,
}

impl<'o> LiteralWriter<'o> {
    pub fn new(options: &'o LiteralOptions) -> Self {
        LiteralWriter {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends the literal of `table`, framed by `{\n` and `\n}\n`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsetCell`] if the table has a hole; nothing is
    /// appended in that case.
    pub fn write_table(&mut self, table: &DenseTable) -> Result<()> {
        table.ensure_complete()?;

        let shape = table.shape();
        let extents = shape.extents();
        let ndims = extents.len();
        let outer = ndims.saturating_sub(1);

        let mut index = vec![0usize; ndims];
        let mut previous: Option<Vec<usize>> = None;

        self.output.reserve(shape.cell_count() * 12);
        self.output.push_str("{\n");
        for offset in 0..shape.cell_count() {
            let value = table.cell(offset).ok_or_else(|| Error::UnsetCell {
                offset,
                index: index.clone(),
            })?;

            let prefix = &index[..outer];
            match previous.as_mut() {
                Some(last) if last.as_slice() != prefix => {
                    self.output.push_str(GROUP_SEPARATOR);
                    last.copy_from_slice(prefix);
                }
                Some(_) => {}
                None => previous = Some(prefix.to_vec()),
            }

            self.output.push_str(&format_value(value, self.options));

            if ndims > 0 && index[ndims - 1] != extents[ndims - 1] - 1 {
                self.output.push_str(VALUE_SEPARATOR);
            }

            advance(&mut index, extents);
        }
        self.output.push_str("\n}\n");
        Ok(())
    }
}

/// Steps a row-major multi-index to the next cell (last dimension fastest).
fn advance(index: &mut [usize], extents: &[usize]) {
    for d in (0..index.len()).rev() {
        index[d] += 1;
        if index[d] < extents[d] {
            return;
        }
        index[d] = 0;
    }
}
