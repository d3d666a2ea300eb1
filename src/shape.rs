//! Shape inference and row-major addressing.
//!
//! A [`Shape`] is the ordered list of per-dimension extents of the dense
//! table. Cells are addressed in row-major order (last dimension fastest):
//!
//! ```text
//! offset(idx) = sum_d idx[d] * prod_{d' > d} extents[d']
//! ```
//!
//! ## Inference
//!
//! The number of dimensions is always the token count of the final row minus
//! one. With [`ShapeInference::LastRow`] the extents are that row's indices
//! plus one; this relies on the input convention that the last row holds the
//! maximum index of every dimension. [`ShapeInference::MaxScan`] instead
//! takes the per-dimension maxima over all rows.
//!
//! ```rust
//! use lutbake::{parse_rows, Shape, ShapeInference};
//!
//! let rows = parse_rows("0 0 1.0\n3 2 2.0\n");
//! let shape = Shape::infer(&rows, ShapeInference::LastRow).unwrap();
//! assert_eq!(shape.extents(), &[4, 3]);
//! assert_eq!(shape.cell_count(), 12);
//! ```

use crate::row::Row;
use crate::{Error, Result, ShapeInference};
use tracing::debug;

/// Extents of an N-dimensional dense table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    extents: Vec<usize>,
    strides: Vec<usize>,
    cells: usize,
}

impl Shape {
    /// Creates a shape from explicit extents.
    ///
    /// A zero-dimensional shape holds a single cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for a zero extent and
    /// [`Error::ShapeOverflow`] if the cell count does not fit in `usize`.
    pub fn new(extents: Vec<usize>) -> Result<Self> {
        if let Some(dimension) = extents.iter().position(|&e| e == 0) {
            return Err(Error::configuration(&format!(
                "extent of dimension {} must be positive",
                dimension
            )));
        }

        let mut strides = vec![1; extents.len()];
        let mut cells: usize = 1;
        for d in (0..extents.len()).rev() {
            strides[d] = cells;
            cells = cells
                .checked_mul(extents[d])
                .ok_or_else(|| Error::ShapeOverflow {
                    extents: extents.clone(),
                })?;
        }

        Ok(Shape {
            extents,
            strides,
            cells,
        })
    }

    /// Infers the shape of a table from its rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] when there are no rows,
    /// [`Error::MalformedRow`] when an inspected row cannot be parsed, and
    /// the errors of [`Shape::new`].
    pub fn infer(rows: &[Row<'_>], inference: ShapeInference) -> Result<Self> {
        let last = rows.last().ok_or(Error::EmptyInput)?;
        let ndims = last.index_count();

        let max_indices = match inference {
            ShapeInference::LastRow => last.indices(ndims)?,
            ShapeInference::MaxScan => {
                let mut maxima = vec![0; ndims];
                for row in rows {
                    for (max, index) in maxima.iter_mut().zip(row.indices(ndims)?) {
                        *max = (*max).max(index);
                    }
                }
                maxima
            }
        };

        let extents = max_indices
            .iter()
            .map(|&max| {
                max.checked_add(1).ok_or_else(|| Error::ShapeOverflow {
                    extents: max_indices.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let shape = Shape::new(extents)?;
        debug!(
            ?inference,
            extents = ?shape.extents,
            cells = shape.cells,
            "inferred table shape"
        );
        Ok(shape)
    }

    pub fn ndims(&self) -> usize {
        self.extents.len()
    }

    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Row-major strides: `strides[d]` is the offset distance between
    /// neighbouring cells along dimension `d`.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Total number of cells (product of the extents).
    pub fn cell_count(&self) -> usize {
        self.cells
    }

    /// Largest valid index per dimension.
    pub fn max_indices(&self) -> Vec<usize> {
        self.extents.iter().map(|e| e - 1).collect()
    }

    /// Row-major flat offset of `index`, or `None` if it is out of bounds
    /// or has the wrong number of coordinates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lutbake::Shape;
    ///
    /// let shape = Shape::new(vec![4, 3]).unwrap();
    /// assert_eq!(shape.offset(&[2, 1]), Some(7));
    /// assert_eq!(shape.offset(&[4, 0]), None);
    /// ```
    pub fn offset(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.ndims() {
            return None;
        }
        let mut offset = 0;
        for ((&i, &extent), &stride) in index.iter().zip(&self.extents).zip(&self.strides) {
            if i >= extent {
                return None;
            }
            offset += i * stride;
        }
        Some(offset)
    }

    /// Like [`Shape::offset`], but reports the first out-of-bounds
    /// coordinate as a [`Error::ShapeMismatch`] attributed to `line`.
    pub(crate) fn checked_offset(&self, index: &[usize], line: usize) -> Result<usize> {
        for (dimension, (&i, &extent)) in index.iter().zip(&self.extents).enumerate() {
            if i >= extent {
                return Err(Error::shape_mismatch(line, dimension, i, extent));
            }
        }
        self.offset(index).ok_or_else(|| {
            Error::custom(format!(
                "index {:?} does not address a {}-dimensional table",
                index,
                self.ndims()
            ))
        })
    }

    /// Multi-index of the cell at a flat `offset` (inverse of [`Shape::offset`]).
    pub fn unravel(&self, mut offset: usize) -> Vec<usize> {
        self.strides
            .iter()
            .map(|&stride| {
                let i = offset / stride;
                offset %= stride;
                i
            })
            .collect()
    }

    /// Offsets of the `2^N` corners of a unit hypercube relative to its
    /// lowest corner. Bit `d` of the corner number selects a step along
    /// dimension `d`.
    ///
    /// # Panics
    ///
    /// Panics if the shape has `usize::BITS` or more dimensions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lutbake::Shape;
    ///
    /// let shape = Shape::new(vec![8, 8]).unwrap();
    /// assert_eq!(shape.corner_offsets(), vec![0, 8, 1, 9]);
    /// ```
    pub fn corner_offsets(&self) -> Vec<usize> {
        (0..1usize << self.ndims())
            .map(|corner| {
                self.strides
                    .iter()
                    .enumerate()
                    .filter(|(d, _)| corner & (1 << d) != 0)
                    .map(|(_, stride)| stride)
                    .sum()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::parse_rows;

    #[test]
    fn test_infer_from_last_row() {
        let rows = parse_rows("0 0 1.0\n3 2 5.0\n");
        let shape = Shape::infer(&rows, ShapeInference::LastRow).unwrap();
        assert_eq!(shape.extents(), &[4, 3]);
        assert_eq!(shape.cell_count(), 12);
        assert_eq!(shape.strides(), &[3, 1]);
        assert_eq!(shape.max_indices(), vec![3, 2]);
    }

    #[test]
    fn test_infer_last_row_trusts_convention() {
        // The larger index on line 1 is not seen by last-row inference.
        let rows = parse_rows("5 1.0\n1 2.0\n");
        let shape = Shape::infer(&rows, ShapeInference::LastRow).unwrap();
        assert_eq!(shape.extents(), &[2]);

        let shape = Shape::infer(&rows, ShapeInference::MaxScan).unwrap();
        assert_eq!(shape.extents(), &[6]);
    }

    #[test]
    fn test_infer_zero_dimensions() {
        let rows = parse_rows("4.5\n");
        let shape = Shape::infer(&rows, ShapeInference::LastRow).unwrap();
        assert_eq!(shape.ndims(), 0);
        assert_eq!(shape.cell_count(), 1);
        assert_eq!(shape.offset(&[]), Some(0));
    }

    #[test]
    fn test_infer_empty() {
        let rows = parse_rows("\n  \n");
        assert_eq!(
            Shape::infer(&rows, ShapeInference::LastRow).unwrap_err(),
            Error::EmptyInput
        );
    }

    #[test]
    fn test_infer_bad_last_row() {
        let rows = parse_rows("0 0 1.0\n1 x 2.0\n");
        let err = Shape::infer(&rows, ShapeInference::LastRow).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_offset_unravel_inverse() {
        let shape = Shape::new(vec![2, 3, 4]).unwrap();
        for offset in 0..shape.cell_count() {
            let index = shape.unravel(offset);
            assert_eq!(shape.offset(&index), Some(offset));
        }
        assert_eq!(shape.unravel(23), vec![1, 2, 3]);
    }

    #[test]
    fn test_checked_offset_reports_dimension() {
        let shape = Shape::new(vec![2, 3]).unwrap();
        let err = shape.checked_offset(&[1, 3], 9).unwrap_err();
        assert_eq!(err, Error::shape_mismatch(9, 1, 3, 3));
    }

    #[test]
    fn test_zero_extent_rejected() {
        assert!(matches!(
            Shape::new(vec![3, 0]).unwrap_err(),
            Error::Configuration(_)
        ));
    }

    #[test]
    fn test_overflow_detected() {
        let err = Shape::new(vec![usize::MAX, 2]).unwrap_err();
        assert!(matches!(err, Error::ShapeOverflow { .. }));
    }

    #[test]
    fn test_corner_offsets_3d() {
        let shape = Shape::new(vec![2, 3, 4]).unwrap();
        assert_eq!(shape.corner_offsets(), vec![0, 12, 4, 16, 1, 13, 5, 17]);
    }
}
