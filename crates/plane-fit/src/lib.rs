//! Least-squares plane intersection.
//!
//! This crate answers two questions about a fixed set of planes in 3D:
//!
//! - How far, in the sum-of-squared-distances sense, is a point from all of them?
//! - Which point minimizes that sum?
//!
//! The second is the classic least-squares intersection of planes, the same
//! problem quadric-error-metric simplification solves per vertex.
//!
//! # Quick Start
//!
//! ```
//! use plane_fit::{Plane, PlaneDistanceSolver};
//! use nalgebra::Point3;
//!
//! // Six faces of the unit cube, normals pointing inward
//! let planes = [
//!     Plane::from_coords([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
//!     Plane::from_coords([0.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
//!     Plane::from_coords([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
//!     Plane::from_coords([1.0, 1.0, 1.0], [-1.0, 0.0, 0.0]),
//!     Plane::from_coords([1.0, 1.0, 1.0], [0.0, -1.0, 0.0]),
//!     Plane::from_coords([1.0, 1.0, 1.0], [0.0, 0.0, -1.0]),
//! ];
//!
//! let solver = PlaneDistanceSolver::new(&planes).unwrap();
//! let center = solver.optimal_point().unwrap();
//!
//! assert!((center - Point3::new(0.5, 0.5, 0.5)).norm() < 1e-12);
//! assert!((solver.sum_of_squared_distances(&center) - 1.5).abs() < 1e-12);
//! ```
//!
//! # Normals
//!
//! Normals need not be unit length; every plane is normalized on the way in.
//! A zero-length normal is rejected with [`GeomError::DegenerateNormal`]
//! rather than producing NaN.
//!
//! # Singular Systems
//!
//! With three or more planes whose normals do not span 3D space (all parallel,
//! or all perpendicular to one direction), the normal equations have no
//! unique solution. By default the solver returns the minimum-norm
//! least-squares point; [`SolverParams::strict`] turns this into an error.
//!
//! ```
//! use plane_fit::{ErrorCode, Plane, PlaneDistanceSolver, SolverParams};
//!
//! // Three vertical planes: every normal lies in the XY plane
//! let planes = [
//!     Plane::from_coords([1.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
//!     Plane::from_coords([0.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
//!     Plane::from_coords([1.0, 1.0, 0.0], [1.0, -1.0, 0.0]),
//! ];
//!
//! let lenient = PlaneDistanceSolver::new(&planes).unwrap();
//! assert!(lenient.optimal_point().is_ok());
//!
//! let strict = PlaneDistanceSolver::with_params(&planes, SolverParams::strict()).unwrap();
//! assert_eq!(strict.optimal_point().unwrap_err().code(), ErrorCode::SingularSystem);
//! ```
//!
//! # Error Handling
//!
//! Fallible operations return `GeomResult<T>`, which is `Result<T, GeomError>`.
//! Each error has a `GEOM-XXXX` code and a recovery suggestion.
//!
//! # Features
//!
//! - `config`: load and save [`SolverParams`] as TOML or JSON

mod error;
mod quadric;
mod solver;
pub mod tracing_ext;
mod types;

#[cfg(feature = "config")]
mod config;

pub use error::{ErrorCode, GeomError, GeomResult, RecoverySuggestion};
pub use quadric::Quadric;
pub use solver::{PlaneDistanceSolver, SingularPolicy, SolveReport, SolveStrategy, SolverParams};
pub use types::Plane;

#[cfg(feature = "config")]
pub use config::ConfigError;
