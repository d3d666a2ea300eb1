//! Conversion of JSON sample sets into row tables.
//!
//! A sample set lists its grid (`nDims`, `lengths`) and one result object per
//! grid point, enumerated with dimension 0 varying fastest:
//!
//! ```json
//! {"nDims": 2, "lengths": [2, 2],
//!  "results": [{"albedo": 0.1}, {"albedo": 0.2}, {"albedo": 0.3}, {"albedo": 0.4}]}
//! ```
//!
//! Each result becomes a row `idx_{N-1} ... idx_0 value`, which puts the
//! fastest-varying coordinate in the last index column, the order the
//! transcoder expects.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{Error, Result, SampleOptions};

/// A grid of simulation results as read from JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSet {
    pub n_dims: usize,
    pub lengths: Vec<usize>,
    pub results: Vec<Map<String, Value>>,
}

impl SampleSet {
    /// Parses a sample set from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Samples`] for invalid JSON or a missing field.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn validate(&self) -> Result<()> {
        if self.n_dims == 0 {
            return Err(Error::samples("nDims must be at least 1"));
        }
        if self.lengths.len() != self.n_dims {
            return Err(Error::samples(&format!(
                "nDims is {} but {} length(s) are given",
                self.n_dims,
                self.lengths.len()
            )));
        }
        if let Some(d) = self.lengths.iter().position(|&l| l == 0) {
            return Err(Error::samples(&format!("length of dimension {} is zero", d)));
        }
        Ok(())
    }

    /// Writes one row per result until the results or the grid run out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Samples`] for an inconsistent grid or a result without
    /// a numeric value field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lutbake::{SampleOptions, SampleSet};
    ///
    /// let set = SampleSet::from_json(
    ///     r#"{"nDims": 2, "lengths": [2, 1], "results": [{"albedo": 0.5}, {"albedo": 1}]}"#,
    /// ).unwrap();
    /// assert_eq!(set.to_table(&SampleOptions::default()).unwrap(), "0 0 0.5\n0 1 1.0\n");
    /// ```
    pub fn to_table(&self, options: &SampleOptions) -> Result<String> {
        self.validate()?;

        let field = options.value_field.as_str();
        let mut indices = vec![0usize; self.n_dims];
        let mut output = String::new();
        let mut written = 0;

        'results: for (i, result) in self.results.iter().enumerate() {
            let value = result.get(field).and_then(Value::as_f64).ok_or_else(|| {
                Error::samples(&format!("result {} has no numeric '{}' field", i, field))
            })?;

            for index in indices.iter().rev() {
                output.push_str(&index.to_string());
                output.push(' ');
            }
            // Debug keeps a float form: `1.0`, `1e21`.
            output.push_str(&format!("{:?}", value));
            output.push('\n');
            written += 1;

            let mut d = 0;
            indices[0] += 1;
            while indices[d] == self.lengths[d] {
                if d == self.n_dims - 1 {
                    break 'results;
                }
                indices[d] = 0;
                d += 1;
                indices[d] += 1;
            }
        }

        if written < self.results.len() {
            warn!(
                ignored = self.results.len() - written,
                "sample set has more results than grid points"
            );
        }
        debug!(rows = written, lengths = ?self.lengths, "converted sample set");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(n_dims: usize, lengths: &[usize], values: &[f64]) -> SampleSet {
        let results = values
            .iter()
            .map(|v| {
                let mut map = Map::new();
                map.insert("albedo".to_string(), Value::from(*v));
                map
            })
            .collect();
        SampleSet {
            n_dims,
            lengths: lengths.to_vec(),
            results,
        }
    }

    #[test]
    fn test_first_dimension_fastest() {
        let table = set(2, &[2, 3], &[0.0, 0.1, 0.2, 0.3, 0.4, 0.5])
            .to_table(&SampleOptions::default())
            .unwrap();
        assert_eq!(
            table,
            "0 0 0.0\n0 1 0.1\n1 0 0.2\n1 1 0.3\n2 0 0.4\n2 1 0.5\n"
        );
    }

    #[test]
    fn test_surplus_results_ignored() {
        let table = set(1, &[2], &[1.0, 2.0, 3.0])
            .to_table(&SampleOptions::default())
            .unwrap();
        assert_eq!(table, "0 1.0\n1 2.0\n");
    }

    #[test]
    fn test_short_results_stop_early() {
        let table = set(2, &[2, 2], &[0.25, 0.5])
            .to_table(&SampleOptions::default())
            .unwrap();
        assert_eq!(table, "0 0 0.25\n0 1 0.5\n");
    }

    #[test]
    fn test_values_keep_float_form() {
        let table = set(1, &[4], &[1e21, 2.5e-8, -3.0, 1e300])
            .to_table(&SampleOptions::default())
            .unwrap();
        assert_eq!(table, "0 1e21\n1 2.5e-8\n2 -3.0\n3 1e300\n");
    }

    #[test]
    fn test_inconsistent_grid() {
        let err = set(2, &[2], &[1.0]).to_table(&SampleOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Samples(_)));
        assert!(set(0, &[], &[1.0]).to_table(&SampleOptions::default()).is_err());
        assert!(set(1, &[0], &[1.0]).to_table(&SampleOptions::default()).is_err());
    }

    #[test]
    fn test_custom_value_field() {
        let set = SampleSet::from_json(
            r#"{"nDims": 1, "lengths": [2], "results": [{"pdf": 0.5}, {"pdf": 0.75}]}"#,
        )
        .unwrap();
        let options = SampleOptions::new().with_value_field("pdf");
        assert_eq!(set.to_table(&options).unwrap(), "0 0.5\n1 0.75\n");

        let err = set.to_table(&SampleOptions::default()).unwrap_err();
        assert!(err.to_string().contains("'albedo'"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            SampleSet::from_json("{\"nDims\": 1}").unwrap_err(),
            Error::Samples(_)
        ));
    }
}
