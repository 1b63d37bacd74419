//! Tracing extensions for solver operations.
//!
//! The crate only emits through the `tracing` facade; it never installs a
//! subscriber. To see output, initialize one in your application:
//!
//! ```rust,ignore
//! use tracing_subscriber::{fmt, prelude::*, EnvFilter};
//!
//! tracing_subscriber::registry()
//!     .with(fmt::layer())
//!     .with(EnvFilter::from_default_env())
//!     .init();
//!
//! // RUST_LOG=plane_fit=debug for construction details
//! // RUST_LOG=plane_fit::timing=info for batch timings
//! ```
//!
//! # Log Levels
//!
//! - **WARN**: least-squares fallback for singular systems
//! - **INFO**: operation timings
//! - **DEBUG**: solver construction, rank, strategy selection
//! - **TRACE**: per-solve results

use std::time::Instant;
use tracing::{Span, debug, info};

use crate::PlaneDistanceSolver;

/// A timer over a solver operation that logs its duration on drop.
///
/// Work done while [`span`](OperationTimer::span) is entered is recorded
/// under the `solver_operation` span with the plane and query counts.
pub struct OperationTimer {
    name: &'static str,
    start: Instant,
    span: Span,
}

impl OperationTimer {
    /// Create a timer that records the plane and query counts.
    pub fn with_context(name: &'static str, plane_count: usize, query_count: usize) -> Self {
        let span = tracing::info_span!(
            "solver_operation",
            operation = name,
            planes = plane_count,
            queries = query_count
        );
        debug!(
            target: "plane_fit::timing",
            operation = name,
            planes = plane_count,
            queries = query_count,
            "Starting operation"
        );
        Self {
            name,
            start: Instant::now(),
            span,
        }
    }

    fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Get the span for this timer.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        info!(
            target: "plane_fit::timing",
            operation = self.name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            "Operation completed"
        );
    }
}

/// Log solver statistics at debug level.
pub fn log_solver_stats(solver: &PlaneDistanceSolver, context: &str) {
    let a = solver.quadric().matrix();
    debug!(
        target: "plane_fit::solver_state",
        context = context,
        planes = solver.len(),
        rank = solver.rank(),
        diagonal = format!("{:.4} {:.4} {:.4}", a[(0, 0)], a[(1, 1)], a[(2, 2)]),
        "Solver state"
    );
}
