//! Assignment vectors and their bitstring encoding.
//!
//! Backends report outcomes as MSB-first bitstrings: the rightmost
//! character is qubit 0. An [`Assignment`] stores bits in resource order,
//! so `x[r]` is the character at position `R - 1 - r`.

use std::fmt;

use ndarray::Array2;

use crate::error::{TailError, TailResult};

/// Largest number of resources for which all `2^R` assignments are
/// enumerated.
pub const MAX_ENUMERATION_QUBITS: usize = 20;

/// A binary selection of rotations, `x[r] = 1` when rotation `r` is used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Assignment {
    bits: Vec<u8>,
}

impl Assignment {
    /// Create an assignment from explicit bits.
    pub fn new(bits: Vec<u8>) -> TailResult<Self> {
        if let Some(bad) = bits.iter().find(|&&b| b > 1) {
            return Err(TailError::InvalidBitstring {
                bitstring: format!("{bits:?}"),
                reason: format!("bit value {bad} is not 0 or 1"),
            });
        }
        Ok(Self { bits })
    }

    /// Decode a computational-basis index; bit `r` of `index` is `x[r]`.
    pub fn from_index(index: usize, num_resources: usize) -> Self {
        let bits = (0..num_resources)
            .map(|r| ((index >> r) & 1) as u8)
            .collect();
        Self { bits }
    }

    /// Parse an MSB-first bitstring of exactly `num_resources` characters.
    pub fn from_bitstring(bitstring: &str, num_resources: usize) -> TailResult<Self> {
        let chars = bitstring.as_bytes();
        if chars.len() != num_resources {
            return Err(TailError::InvalidBitstring {
                bitstring: bitstring.to_string(),
                reason: format!("expected {num_resources} characters, got {}", chars.len()),
            });
        }
        let bits = chars
            .iter()
            .rev()
            .map(|c| match c {
                b'0' => Ok(0),
                b'1' => Ok(1),
                other => Err(TailError::InvalidBitstring {
                    bitstring: bitstring.to_string(),
                    reason: format!("unexpected character '{}'", *other as char),
                }),
            })
            .collect::<TailResult<Vec<u8>>>()?;
        Ok(Self { bits })
    }

    /// Encode as an MSB-first bitstring.
    pub fn to_bitstring(&self) -> String {
        self.bits
            .iter()
            .rev()
            .map(|&b| if b == 1 { '1' } else { '0' })
            .collect()
    }

    /// The basis-state index of this assignment.
    pub fn index(&self) -> usize {
        self.bits
            .iter()
            .enumerate()
            .fold(0, |acc, (r, &b)| acc | ((b as usize) << r))
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if the assignment covers zero resources.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bits in resource order.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Indices of the selected resources.
    pub fn selected(&self) -> Vec<usize> {
        self.bits
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b == 1)
            .map(|(r, _)| r)
            .collect()
    }

    /// Bits as a float vector for matrix products.
    pub fn as_vector(&self) -> ndarray::Array1<f64> {
        self.bits.iter().map(|&b| f64::from(b)).collect()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bitstring())
    }
}

/// All `2^R` assignments as rows of a `2^R x R` matrix, row `i` being
/// [`Assignment::from_index`]`(i, R)`.
pub fn assignment_matrix(num_resources: usize) -> TailResult<Array2<f64>> {
    if num_resources > MAX_ENUMERATION_QUBITS {
        return Err(TailError::TooManyQubits {
            qubits: num_resources,
            max: MAX_ENUMERATION_QUBITS,
        });
    }
    let dim = 1usize << num_resources;
    Ok(Array2::from_shape_fn((dim, num_resources), |(i, r)| {
        ((i >> r) & 1) as f64
    }))
}
