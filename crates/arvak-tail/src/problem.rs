//! Tail-assignment problem definition.
//!
//! A problem instance is an `F x R` resource matrix `FR` (flights by
//! rotations), a cost vector `CR` of length `R` and a penalty weight `mu`.
//! An assignment selects a subset of rotations; it is feasible when every
//! flight is covered exactly once.

use ndarray::{Array1, Array2, Axis};

use crate::error::{TailError, TailResult};

/// Default penalty weight for uncovered or over-covered flights.
pub const DEFAULT_MU: f64 = 1.0;

/// An immutable tail-assignment instance.
#[derive(Debug, Clone, PartialEq)]
pub struct TailAssignment {
    fr: Array2<f64>,
    cr: Array1<f64>,
    mu: f64,
    /// Σ_r FR[f, r] for every flight, summed in column order.
    row_sums: Array1<f64>,
}

impl TailAssignment {
    /// Create a problem from a resource matrix and cost vector with
    /// [`DEFAULT_MU`].
    pub fn new(fr: Array2<f64>, cr: Array1<f64>) -> TailResult<Self> {
        let (flights, resources) = fr.dim();
        if flights == 0 || resources == 0 {
            return Err(TailError::EmptyProblem { flights, resources });
        }
        if cr.len() != resources {
            return Err(TailError::DimensionMismatch {
                fr_columns: resources,
                cr_len: cr.len(),
            });
        }
        if let Some(((f, r), v)) = fr.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(TailError::InvalidValue {
                field: "FR",
                reason: format!("entry ({f}, {r}) is {v}"),
            });
        }
        if let Some((r, v)) = cr.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(TailError::InvalidValue {
                field: "CR",
                reason: format!("entry {r} is {v}"),
            });
        }

        let row_sums = fr
            .axis_iter(Axis(0))
            .map(|row| row.iter().fold(0.0, |acc, v| acc + v))
            .collect();

        Ok(Self {
            fr,
            cr,
            mu: DEFAULT_MU,
            row_sums,
        })
    }

    /// Create a problem from nested rows, as read from configuration.
    pub fn from_rows(fr: &[Vec<f64>], cr: &[f64]) -> TailResult<Self> {
        let resources = fr.first().map_or(0, Vec::len);
        for (row, values) in fr.iter().enumerate() {
            if values.len() != resources {
                return Err(TailError::RaggedMatrix {
                    row,
                    expected: resources,
                    got: values.len(),
                });
            }
        }
        let flat: Vec<f64> = fr.iter().flatten().copied().collect();
        let matrix = Array2::from_shape_vec((fr.len(), resources), flat).map_err(|e| {
            TailError::InvalidValue {
                field: "FR",
                reason: e.to_string(),
            }
        })?;
        Self::new(matrix, Array1::from(cr.to_vec()))
    }

    /// Replace the penalty weight.
    pub fn with_mu(mut self, mu: f64) -> TailResult<Self> {
        if !mu.is_finite() {
            return Err(TailError::InvalidValue {
                field: "mu",
                reason: format!("{mu} is not finite"),
            });
        }
        self.mu = mu;
        Ok(self)
    }

    /// Number of flights `F` (rows of FR).
    pub fn num_flights(&self) -> usize {
        self.fr.nrows()
    }

    /// Number of resources `R`; also the number of qubits.
    pub fn num_resources(&self) -> usize {
        self.fr.ncols()
    }

    /// The resource matrix FR.
    pub fn fr(&self) -> &Array2<f64> {
        &self.fr
    }

    /// The cost vector CR.
    pub fn cr(&self) -> &Array1<f64> {
        &self.cr
    }

    /// The penalty weight.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Per-flight row sums of FR.
    pub fn row_sums(&self) -> &Array1<f64> {
        &self.row_sums
    }
}
