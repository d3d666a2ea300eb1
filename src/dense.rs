//! Dense reconstruction of a table from sparse `(index..., value)` rows.
//!
//! Values are kept as the exact text found in the input. Decoding them into
//! a float and re-encoding would change the digits baked into the literal.

use crate::row::Row;
use crate::{Error, Result, Shape};
use tracing::debug;

/// Flat row-major buffer of value tokens with fill tracking.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseTable {
    shape: Shape,
    cells: Vec<Option<String>>,
    filled: usize,
}

impl DenseTable {
    /// Creates a table of `shape` with every cell unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeOverflow`] if the buffer cannot be allocated.
    pub fn new(shape: Shape) -> Result<Self> {
        let count = shape.cell_count();
        let mut cells = Vec::new();
        if cells.try_reserve_exact(count).is_err() {
            return Err(Error::ShapeOverflow {
                extents: shape.extents().to_vec(),
            });
        }
        cells.resize(count, None);
        Ok(DenseTable {
            shape,
            cells,
            filled: 0,
        })
    }

    /// Populates a table from `rows` in a single pass.
    ///
    /// Rows may come in any order. A later row addressing the same cell
    /// overwrites the earlier one.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedRow`] for a row of the wrong arity or with bad tokens
    /// - [`Error::ShapeMismatch`] for an index outside the shape (nothing is written)
    /// - [`Error::UnsetCell`] if a cell is left unset once all rows are read
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lutbake::{parse_rows, DenseTable, Shape};
    ///
    /// let rows = parse_rows("1 0.5\n0 nan\n");
    /// let table = DenseTable::from_rows(&rows, Shape::new(vec![2]).unwrap()).unwrap();
    /// assert_eq!(table.get(&[0]), Some("nan"));
    /// assert_eq!(table.get(&[1]), Some("0.5"));
    /// ```
    pub fn from_rows(rows: &[Row<'_>], shape: Shape) -> Result<Self> {
        let mut table = DenseTable::new(shape)?;
        for row in rows {
            table.insert_row(row)?;
        }
        debug!(
            rows = rows.len(),
            cells = table.cells.len(),
            filled = table.filled,
            "reconstructed dense table"
        );
        table.ensure_complete()?;
        Ok(table)
    }

    /// Stores one row's value at the cell its indices address.
    ///
    /// Returns the value previously held by that cell, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRow`] or [`Error::ShapeMismatch`]; the table
    /// is left untouched on error.
    pub fn insert_row(&mut self, row: &Row<'_>) -> Result<Option<String>> {
        let index = row.indices(self.shape.ndims())?;
        let value = row.checked_value()?;
        let offset = self.shape.checked_offset(&index, row.line())?;

        let previous = self.cells[offset].replace(value.to_string());
        match &previous {
            Some(old) => debug!(
                line = row.line(),
                offset,
                old = old.as_str(),
                new = value,
                "overwriting cell"
            ),
            None => self.filled += 1,
        }
        Ok(previous)
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of distinct cells written so far.
    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn is_complete(&self) -> bool {
        self.filled == self.cells.len()
    }

    /// Value at a flat row-major offset, `None` if unset or out of range.
    pub fn cell(&self, offset: usize) -> Option<&str> {
        self.cells.get(offset).and_then(|c| c.as_deref())
    }

    /// Value at a multi-index, `None` if unset or out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<&str> {
        self.shape.offset(index).and_then(|offset| self.cell(offset))
    }

    /// Fails with the first unset cell in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsetCell`] naming the cell's offset and multi-index.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.is_complete() {
            return Ok(());
        }
        match self.cells.iter().position(Option::is_none) {
            Some(offset) => Err(Error::UnsetCell {
                offset,
                index: self.shape.unravel(offset),
            }),
            None => Ok(()),
        }
    }
}
