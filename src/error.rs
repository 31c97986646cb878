//! Error types for the factorization engine.

use std::error::Error;
use std::fmt;

/// Errors that can occur while configuring or running a factorization
#[derive(Debug, Clone, PartialEq)]
pub enum NmfError {
    /// Cost function tag outside {EucDist, KLDiv, ISDiv}
    UnknownCostFunction(String),
    /// Regularization tag outside {None, FrobW, FrobH, 1W, 1H}
    UnknownRegularization(String),
    /// Numeric parameter out of its admissible range
    InvalidParameter(String),
    /// Operand dimensions do not line up
    ShapeMismatch {
        operand: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl NmfError {
    pub(crate) fn shape(
        operand: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    ) -> Self {
        NmfError::ShapeMismatch {
            operand,
            expected,
            found,
        }
    }

    /// True for the configuration family (unknown tags, bad parameters)
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, NmfError::ShapeMismatch { .. })
    }
}

impl fmt::Display for NmfError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NmfError::UnknownCostFunction(tag) => write!(f, "Unknown cost function: {}", tag),
            NmfError::UnknownRegularization(tag) => {
                write!(f, "Unknown regularization: {}", tag)
            }
            NmfError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            NmfError::ShapeMismatch {
                operand,
                expected,
                found,
            } => write!(
                f,
                "Shape mismatch for {}: expected {}x{}, found {}x{}",
                operand, expected.0, expected.1, found.0, found.1
            ),
        }
    }
}

impl Error for NmfError {}
