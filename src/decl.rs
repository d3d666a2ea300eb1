//! C declarations for a baked lookup table.
//!
//! Besides the flattened values, a multilinear lookup needs the table's
//! dimensionality, the largest index per dimension and the offsets of the
//! `2^N` corners of a unit hypercube. [`Declaration`] renders all four
//! symbols, either as definitions or as `extern` declarations for a header:
//!
//! ```text
//! Float         matteAlbedoLUT[8*8] = {...};
//! unsigned char matteAlbedoLUTNDims = 2;
//! unsigned char matteAlbedoLUTMaxIndices[2] = {7, 7};
//! unsigned int  matteAlbedoLUTOffsets[4] = {0, 8, 1, 9};
//! ```

use crate::{DenseTable, Error, LiteralOptions, LiteralWriter, Result, Shape};

/// Upper bound on declared dimensions; the corner table has `2^N` entries.
pub const MAX_DECLARED_DIMS: usize = 16;

/// Named declaration of a table and its lookup metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    name: String,
    element_type: String,
}

impl Declaration {
    /// Creates a declaration for symbol `name` with element type `Float`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `name` is not a C identifier.
    pub fn new(name: &str) -> Result<Self> {
        let mut chars = name.chars();
        let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(Error::configuration(&format!(
                "'{}' is not a valid C identifier",
                name
            )));
        }
        Ok(Declaration {
            name: name.to_string(),
            element_type: "Float".to_string(),
        })
    }

    #[must_use]
    pub fn with_element_type(mut self, element_type: &str) -> Self {
        self.element_type = element_type.to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders the definitions of the table and its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for a zero-dimensional table, more
    /// than [`MAX_DECLARED_DIMS`] dimensions or a maximum index above 255,
    /// [`Error::ShapeOverflow`] if a corner offset exceeds `u32::MAX`, and
    /// [`Error::UnsetCell`] for an incomplete table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lutbake::{parse_rows, Declaration, DenseTable, LiteralOptions, Shape};
    ///
    /// let rows = parse_rows("0 0.5\n1 1.0\n");
    /// let table = DenseTable::from_rows(&rows, Shape::new(vec![2]).unwrap()).unwrap();
    /// let decl = Declaration::new("fooLUT").unwrap();
    /// let text = decl.definition(&table, &LiteralOptions::default()).unwrap();
    /// assert!(text.starts_with("Float         fooLUT[2] = {\n0.5f, 1.0f\n};\n"));
    /// assert!(text.contains("unsigned int  fooLUTOffsets[2] = {0, 1};"));
    /// ```
    pub fn definition(&self, table: &DenseTable, options: &LiteralOptions) -> Result<String> {
        let shape = table.shape();
        self.check_dimensions(shape)?;

        let mut writer = LiteralWriter::new(options);
        writer.write_table(table)?;
        let literal = writer.into_inner();

        let mut output = String::with_capacity(literal.len() + 256);
        output.push_str(&format!(
            "{:<13} {}[{}] = {};\n",
            self.element_type,
            self.name,
            extent_product(shape),
            literal.trim_end_matches('\n')
        ));
        output.push_str(&format!(
            "unsigned char {}NDims = {};\n",
            self.name,
            shape.ndims()
        ));
        output.push_str(&format!(
            "unsigned char {}MaxIndices[{}] = {{{}}};\n",
            self.name,
            shape.ndims(),
            join(&shape.max_indices())
        ));
        let offsets = shape.corner_offsets();
        output.push_str(&format!(
            "unsigned int  {}Offsets[{}] = {{{}}};\n",
            self.name,
            offsets.len(),
            join(&offsets)
        ));
        Ok(output)
    }

    /// Renders `extern` declarations of the same four symbols.
    ///
    /// # Errors
    ///
    /// Same bounds as [`Declaration::definition`].
    pub fn header(&self, shape: &Shape) -> Result<String> {
        self.check_dimensions(shape)?;
        Ok(format!(
            "extern {:<13} {}[{}];\n\
             extern unsigned char {}NDims;\n\
             extern unsigned char {}MaxIndices[{}];\n\
             extern unsigned int  {}Offsets[{}];\n",
            self.element_type,
            self.name,
            extent_product(shape),
            self.name,
            self.name,
            shape.ndims(),
            self.name,
            1usize << shape.ndims()
        ))
    }

    fn check_dimensions(&self, shape: &Shape) -> Result<()> {
        let ndims = shape.ndims();
        if ndims == 0 {
            return Err(Error::configuration(&format!(
                "cannot declare zero-dimensional table '{}'",
                self.name
            )));
        }
        // NDims and MaxIndices are `unsigned char`, Offsets holds 2^N `unsigned int`.
        if ndims > MAX_DECLARED_DIMS {
            return Err(Error::configuration(&format!(
                "table '{}' has {} dimensions; at most {} can be declared",
                self.name, ndims, MAX_DECLARED_DIMS
            )));
        }
        if let Some((dimension, max)) = shape
            .max_indices()
            .into_iter()
            .enumerate()
            .find(|&(_, max)| max > usize::from(u8::MAX))
        {
            return Err(Error::configuration(&format!(
                "maximum index {} of dimension {} does not fit an unsigned char",
                max, dimension
            )));
        }
        let largest_offset = shape
            .strides()
            .iter()
            .try_fold(0usize, |sum, &stride| sum.checked_add(stride));
        match largest_offset {
            Some(offset) if offset <= u32::MAX as usize => Ok(()),
            _ => Err(Error::ShapeOverflow {
                extents: shape.extents().to_vec(),
            }),
        }
    }
}

fn extent_product(shape: &Shape) -> String {
    shape
        .extents()
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("*")
}

fn join(values: &[usize]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
