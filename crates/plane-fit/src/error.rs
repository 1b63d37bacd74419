//! Error types for plane solving with rich diagnostics.
//!
//! Every failure carries:
//! - A machine-readable error code
//! - The offending plane index when one exists
//! - A recovery suggestion
//! - Terminal-friendly help text via miette
//!
//! # Error Codes
//!
//! Each error has a unique code in the format `GEOM-XXXX`:
//! - `GEOM-1xxx`: Input errors (degenerate or non-finite plane data)
//! - `GEOM-2xxx`: Solve errors (rank-deficient systems)
//!
//! # Example
//!
//! ```
//! use plane_fit::{ErrorCode, GeomError};
//!
//! let err = GeomError::degenerate_normal(3, 0.0);
//! assert_eq!(err.code(), ErrorCode::DegenerateNormal);
//! assert_eq!(err.code().as_str(), "GEOM-1001");
//! assert_eq!(err.plane_index(), Some(3));
//! ```

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for plane operations.
pub type GeomResult<T> = Result<T, GeomError>;

/// Machine-readable error codes.
///
/// Codes follow the pattern `GEOM-XXXX` where:
/// - 1xxx = Input errors
/// - 2xxx = Solve errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input errors (1xxx)
    /// GEOM-1001: Plane normal has (near) zero length
    DegenerateNormal = 1001,
    /// GEOM-1002: Plane point or normal has NaN or Infinity component
    InvalidCoordinate = 1002,

    // Solve errors (2xxx)
    /// GEOM-2001: Normal-equations matrix is rank deficient
    SingularSystem = 2001,
}

impl ErrorCode {
    /// Returns the error code as a string in the format `GEOM-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DegenerateNormal => "GEOM-1001",
            ErrorCode::InvalidCoordinate => "GEOM-1002",
            ErrorCode::SingularSystem => "GEOM-2001",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recovery suggestions for solver errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoverySuggestion {
    /// Drop or fix the listed input planes.
    FixInput { checks: Vec<String> },
    /// Adjust solver parameters.
    AdjustParameters { parameters: Vec<(String, String)> },
    /// Add more planes so the system is well determined.
    AddConstraints { description: String },
}

impl std::fmt::Display for RecoverySuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecoverySuggestion::FixInput { checks } => {
                write!(f, "Check the input planes for: {}", checks.join(", "))
            }
            RecoverySuggestion::AdjustParameters { parameters } => {
                let params: Vec<String> = parameters
                    .iter()
                    .map(|(k, v)| format!("{} = {}", k, v))
                    .collect();
                write!(f, "Try adjusting: {}", params.join(", "))
            }
            RecoverySuggestion::AddConstraints { description } => {
                write!(f, "{}", description)
            }
        }
    }
}

/// Errors that can occur while building or querying a plane solver.
#[derive(Debug, Error, Diagnostic)]
pub enum GeomError {
    /// A plane normal is too short to normalize.
    #[error("plane {plane_index} has a degenerate normal (length {length:e})")]
    #[diagnostic(
        code(geom::input::degenerate_normal),
        help("Every plane needs a non-zero normal. Filter out planes built from collinear or coincident points.")
    )]
    DegenerateNormal { plane_index: usize, length: f64 },

    /// A plane component is NaN or infinite.
    #[error("plane {plane_index} has an invalid {field} component: {value}")]
    #[diagnostic(
        code(geom::input::coordinate),
        help("Check for numerical issues in the source data. NaN usually comes from an earlier division by zero.")
    )]
    InvalidCoordinate {
        plane_index: usize,
        field: &'static str,
        value: f64,
    },

    /// The normal equations do not have a unique solution.
    #[error("normal equations are singular: rank {rank} from {plane_count} planes")]
    #[diagnostic(
        code(geom::solve::singular),
        help("The plane normals do not span 3D space. Use the least-squares policy or add planes with independent normals.")
    )]
    SingularSystem { rank: usize, plane_count: usize },
}

impl GeomError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            GeomError::DegenerateNormal { .. } => ErrorCode::DegenerateNormal,
            GeomError::InvalidCoordinate { .. } => ErrorCode::InvalidCoordinate,
            GeomError::SingularSystem { .. } => ErrorCode::SingularSystem,
        }
    }

    /// Returns a recovery suggestion for this error.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self {
            GeomError::DegenerateNormal { .. } => RecoverySuggestion::FixInput {
                checks: vec!["zero-length normals".into(), "duplicate source points".into()],
            },
            GeomError::InvalidCoordinate { .. } => RecoverySuggestion::FixInput {
                checks: vec!["NaN values".into(), "infinite values".into()],
            },
            GeomError::SingularSystem { .. } => RecoverySuggestion::AdjustParameters {
                parameters: vec![("singular_policy".into(), "least_squares".into())],
            },
        }
    }

    /// Returns the index of the offending plane, if the error is tied to one.
    pub fn plane_index(&self) -> Option<usize> {
        match self {
            GeomError::DegenerateNormal { plane_index, .. }
            | GeomError::InvalidCoordinate { plane_index, .. } => Some(*plane_index),
            GeomError::SingularSystem { .. } => None,
        }
    }

    /// Create a DegenerateNormal error.
    pub fn degenerate_normal(plane_index: usize, length: f64) -> Self {
        GeomError::DegenerateNormal {
            plane_index,
            length,
        }
    }

    /// Create an InvalidCoordinate error.
    pub fn invalid_coordinate(plane_index: usize, field: &'static str, value: f64) -> Self {
        GeomError::InvalidCoordinate {
            plane_index,
            field,
            value,
        }
    }

    /// Create a SingularSystem error.
    pub fn singular_system(rank: usize, plane_count: usize) -> Self {
        GeomError::SingularSystem { rank, plane_count }
    }
}
