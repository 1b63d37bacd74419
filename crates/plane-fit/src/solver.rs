//! Closed-form solver for squared distances to a set of planes.
//!
//! [`PlaneDistanceSolver`] takes a fixed set of planes, accumulates the
//! normal equations `A p = b` once, and then answers two queries:
//!
//! - [`sum_of_squared_distances`](PlaneDistanceSolver::sum_of_squared_distances)
//!   for any point
//! - [`optimal_point`](PlaneDistanceSolver::optimal_point), the point that
//!   minimizes that sum
//!
//! # Degenerate sets
//!
//! | Planes | Optimal point |
//! |--------|---------------|
//! | 0      | the origin |
//! | 1      | the plane's own point |
//! | 2      | least-squares solve of `[n̂₁; n̂₂; n̂₁×n̂₂] p = [n̂₁·q₁; n̂₂·q₂; 0]` |
//! | ≥3     | `A p = b`, with [`SingularPolicy`] deciding rank-deficient cases |
//!
//! # Example
//!
//! ```
//! use plane_fit::{Plane, PlaneDistanceSolver};
//! use nalgebra::Point3;
//!
//! let planes = [
//!     Plane::from_coords([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
//!     Plane::from_coords([0.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
//!     Plane::from_coords([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
//! ];
//! let solver = PlaneDistanceSolver::new(&planes).unwrap();
//!
//! assert_eq!(solver.sum_of_squared_distances(&Point3::new(1.0, 1.0, 1.0)), 3.0);
//! assert_eq!(solver.optimal_point().unwrap(), Point3::origin());
//! ```

use nalgebra::{DMatrix, Matrix3, Point3, Vector3};
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::tracing_ext::{OperationTimer, log_solver_stats};
use crate::{GeomError, GeomResult, Plane, Quadric};

/// What to do when the normal equations of three or more planes are singular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SingularPolicy {
    /// Return the minimum-norm least-squares solution.
    #[default]
    LeastSquares,
    /// Fail with [`GeomError::SingularSystem`].
    Fail,
}

/// Parameters for plane solving.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SolverParams {
    /// Policy for rank-deficient systems with three or more planes.
    pub singular_policy: SingularPolicy,

    /// Relative threshold on singular values when computing rank.
    ///
    /// Rank is measured on the stacked unit normals, whose singular values are
    /// the square roots of those of `A`. A singular value `s` counts toward the
    /// rank when `s > rank_tolerance * s_max`.
    pub rank_tolerance: f64,

    /// Normals at or below this length are rejected.
    pub min_normal_length: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            singular_policy: SingularPolicy::LeastSquares,
            rank_tolerance: 1e-10,
            min_normal_length: 1e-12,
        }
    }
}

impl SolverParams {
    /// Params that refuse to answer for singular systems.
    pub fn strict() -> Self {
        Self {
            singular_policy: SingularPolicy::Fail,
            ..Default::default()
        }
    }

    /// Set the singular-system policy.
    pub fn with_singular_policy(mut self, policy: SingularPolicy) -> Self {
        self.singular_policy = policy;
        self
    }

    /// Set the relative rank tolerance.
    pub fn with_rank_tolerance(mut self, tolerance: f64) -> Self {
        self.rank_tolerance = tolerance.max(0.0);
        self
    }

    /// Set the minimum accepted normal length.
    pub fn with_min_normal_length(mut self, length: f64) -> Self {
        self.min_normal_length = length.max(0.0);
        self
    }
}

/// How the optimal point was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStrategy {
    /// No planes; the origin is returned.
    Origin,
    /// One plane; its point is returned unchanged.
    PlanePoint,
    /// Two planes; least-squares solve including the intersection direction.
    PlanePair,
    /// Full-rank normal equations solved directly.
    NormalEquations,
    /// Rank-deficient normal equations solved in the least-squares sense.
    LeastSquares,
}

/// Result of [`PlaneDistanceSolver::solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    /// The minimizing point.
    pub point: Point3<f64>,
    /// Sum of squared distances at `point`.
    pub residual: f64,
    /// Rank of the stacked unit normals, equal to the rank of `A`.
    pub rank: usize,
    /// How `point` was computed.
    pub strategy: SolveStrategy,
}

/// Solver for the sum of squared distances to a fixed set of planes.
///
/// All precomputation happens in the constructor; the solver is immutable
/// afterwards and can be shared across threads.
#[derive(Debug, Clone)]
pub struct PlaneDistanceSolver {
    /// Input planes with unit normals.
    planes: Vec<Plane>,
    quadric: Quadric,
    rank: usize,
    params: SolverParams,
}

impl PlaneDistanceSolver {
    /// Build a solver with default parameters.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::DegenerateNormal`] for a zero-length normal and
    /// [`GeomError::InvalidCoordinate`] for NaN or infinite components.
    pub fn new(planes: &[Plane]) -> GeomResult<Self> {
        Self::with_params(planes, SolverParams::default())
    }

    /// Build a solver with custom parameters.
    ///
    /// # Errors
    ///
    /// Same as [`PlaneDistanceSolver::new`].
    pub fn with_params(planes: &[Plane], params: SolverParams) -> GeomResult<Self> {
        let mut normalized = Vec::with_capacity(planes.len());
        let mut quadric = Quadric::zero();

        for (i, plane) in planes.iter().enumerate() {
            plane.validate(i, params.min_normal_length)?;
            let plane = plane.normalized();
            quadric += Quadric::from_plane(&plane);
            normalized.push(plane);
        }

        let rank = normals_rank(&normalized, params.rank_tolerance);

        let solver = Self {
            planes: normalized,
            quadric,
            rank,
            params,
        };
        debug!(
            planes = solver.planes.len(),
            rank = solver.rank,
            normal_trace = solver.quadric.matrix().trace(),
            "Built plane distance solver"
        );
        log_solver_stats(&solver, "construct");
        Ok(solver)
    }

    /// Number of planes.
    #[inline]
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    /// Whether the plane set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// The planes, with unit normals.
    #[inline]
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// The accumulated quadric `(A, b, c)`.
    #[inline]
    pub fn quadric(&self) -> &Quadric {
        &self.quadric
    }

    /// Rank of the normal-equations matrix `A`.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Parameters this solver was built with.
    #[inline]
    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Signed distance `(qᵢ - p)·n̂ᵢ` to every plane, in input order.
    pub fn signed_distances(&self, point: &Point3<f64>) -> Vec<f64> {
        self.planes
            .iter()
            .map(|plane| plane.signed_distance(point))
            .collect()
    }

    /// Sum of squared distances from `point` to every plane.
    ///
    /// Each distance is evaluated on its own, so the result equals squaring
    /// and adding per-plane distances. Returns 0 for an empty set.
    pub fn sum_of_squared_distances(&self, point: &Point3<f64>) -> f64 {
        self.planes
            .iter()
            .map(|plane| {
                let d = (plane.point - point).dot(&plane.normal);
                d * d
            })
            .sum()
    }

    /// Evaluate [`sum_of_squared_distances`](Self::sum_of_squared_distances)
    /// for many points in parallel. Output order matches input order.
    pub fn sum_of_squared_distances_batch(&self, points: &[Point3<f64>]) -> Vec<f64> {
        let timer =
            OperationTimer::with_context("sum_of_squared_distances_batch", self.len(), points.len());
        let _entered = timer.span().enter();
        points
            .par_iter()
            .map(|p| self.sum_of_squared_distances(p))
            .collect()
    }

    /// The point minimizing the sum of squared distances.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::SingularSystem`] when three or more planes give a
    /// rank-deficient system and the policy is [`SingularPolicy::Fail`], or
    /// when the SVD cannot produce a least-squares solution.
    pub fn optimal_point(&self) -> GeomResult<Point3<f64>> {
        self.solve().map(|report| report.point)
    }

    /// Compute the optimal point together with diagnostics.
    ///
    /// # Errors
    ///
    /// Same as [`PlaneDistanceSolver::optimal_point`].
    pub fn solve(&self) -> GeomResult<SolveReport> {
        let (point, strategy) = match self.planes.as_slice() {
            [] => (Point3::origin(), SolveStrategy::Origin),
            [plane] => (plane.point, SolveStrategy::PlanePoint),
            [first, second] => (self.solve_pair(first, second)?, SolveStrategy::PlanePair),
            _ => self.solve_normal_equations()?,
        };
        debug!(?strategy, rank = self.rank, planes = self.len(), "Selected solve strategy");

        let residual = self.sum_of_squared_distances(&point);
        trace!(
            ?strategy,
            x = point.x,
            y = point.y,
            z = point.z,
            residual,
            "Solved for optimal point"
        );

        Ok(SolveReport {
            point,
            residual,
            rank: self.rank,
            strategy,
        })
    }

    fn solve_pair(&self, first: &Plane, second: &Plane) -> GeomResult<Point3<f64>> {
        let (n1, n2) = (first.normal, second.normal);
        let direction = n1.cross(&n2);

        let m = Matrix3::from_rows(&[n1.transpose(), n2.transpose(), direction.transpose()]);
        let rhs = Vector3::new(n1.dot(&first.point.coords), n2.dot(&second.point.coords), 0.0);

        least_squares(m, &rhs, self.params.rank_tolerance)
            .ok_or_else(|| GeomError::singular_system(self.rank, self.len()))
    }

    fn solve_normal_equations(&self) -> GeomResult<(Point3<f64>, SolveStrategy)> {
        if self.rank == 3 {
            if let Some(p) = self.quadric.optimal_point() {
                if p.coords.iter().all(|c| c.is_finite()) {
                    return Ok((p, SolveStrategy::NormalEquations));
                }
            }
        }

        match self.params.singular_policy {
            SingularPolicy::Fail => Err(GeomError::singular_system(self.rank, self.len())),
            SingularPolicy::LeastSquares => {
                warn!(
                    planes = self.len(),
                    rank = self.rank,
                    "Normal equations are rank deficient, using least-squares solution"
                );
                least_squares(
                    *self.quadric.matrix(),
                    self.quadric.vector(),
                    self.params.rank_tolerance,
                )
                .map(|p| (p, SolveStrategy::LeastSquares))
                .ok_or_else(|| GeomError::singular_system(self.rank, self.len()))
            }
        }
    }
}

/// Rank of the `n x 3` matrix of unit normals.
///
/// Equal to the rank of `A = NᵀN`, but the singular values of `N` are the
/// square roots of those of `A`, so `tolerance` is not squared away.
fn normals_rank(planes: &[Plane], tolerance: f64) -> usize {
    if planes.is_empty() {
        return 0;
    }
    let normals = DMatrix::from_fn(planes.len(), 3, |i, j| planes[i].normal[j]);
    let singular_values = normals.singular_values();
    let max = singular_values.max();
    if max <= 0.0 {
        return 0;
    }
    singular_values
        .iter()
        .filter(|&&s| s > tolerance * max)
        .count()
}

/// Minimum-norm least-squares solution of `m x = rhs` via the SVD pseudo-inverse.
///
/// `None` if the SVD is missing a factor or the solution is not finite.
fn least_squares(m: Matrix3<f64>, rhs: &Vector3<f64>, tolerance: f64) -> Option<Point3<f64>> {
    let svd = m.svd(true, true);
    let eps = tolerance * svd.singular_values.max();
    svd.solve(rhs, eps)
        .ok()
        .filter(|x| x.iter().all(|c| c.is_finite()))
        .map(Point3::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use approx::assert_relative_eq;

    fn axis_planes() -> Vec<Plane> {
        vec![
            Plane::from_coords([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            Plane::from_coords([0.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            Plane::from_coords([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ]
    }

    fn cube_planes(min: f64, max: f64, scales: [f64; 6]) -> Vec<Plane> {
        let lo = [min; 3];
        let hi = [max; 3];
        vec![
            Plane::from_coords(lo, [scales[0], 0.0, 0.0]),
            Plane::from_coords(lo, [0.0, scales[1], 0.0]),
            Plane::from_coords(lo, [0.0, 0.0, scales[2]]),
            Plane::from_coords(hi, [-scales[3], 0.0, 0.0]),
            Plane::from_coords(hi, [0.0, -scales[4], 0.0]),
            Plane::from_coords(hi, [0.0, 0.0, -scales[5]]),
        ]
    }

    /// Three planes whose normals all lie in the XY plane.
    fn coplanar_normal_planes() -> Vec<Plane> {
        vec![
            Plane::from_coords([1.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            Plane::from_coords([0.0, 2.0, 0.0], [0.0, 1.0, 0.0]),
            Plane::from_coords([1.0, 1.0, 0.0], [1.0, 1.0, 0.0]),
        ]
    }

    #[test]
    fn test_empty_set() {
        let solver = PlaneDistanceSolver::new(&[]).unwrap();
        assert!(solver.is_empty());
        assert_eq!(solver.rank(), 0);
        assert_eq!(solver.sum_of_squared_distances(&Point3::new(4.0, 5.0, 6.0)), 0.0);

        let report = solver.solve().unwrap();
        assert_eq!(report.point, Point3::origin());
        assert_eq!(report.strategy, SolveStrategy::Origin);
    }

    #[test]
    fn test_single_plane() {
        let solver =
            PlaneDistanceSolver::new(&[Plane::from_coords([0.0, 0.0, 0.0], [1.0, 0.0, 0.0])])
                .unwrap();
        assert_eq!(solver.sum_of_squared_distances(&Point3::new(1.0, 1.0, 0.0)), 1.0);
        assert_eq!(solver.optimal_point().unwrap(), Point3::origin());
    }

    #[test]
    fn test_single_plane_returns_plane_point() {
        let q = Point3::new(3.0, -2.0, 7.5);
        let solver =
            PlaneDistanceSolver::new(&[Plane::new(q, Vector3::new(0.0, 2.0, 2.0))]).unwrap();
        let report = solver.solve().unwrap();
        assert_eq!(report.point, q);
        assert_eq!(report.strategy, SolveStrategy::PlanePoint);
        assert_eq!(report.rank, 1);
    }

    #[test]
    fn test_two_planes() {
        let solver = PlaneDistanceSolver::new(&axis_planes()[..2]).unwrap();
        assert_eq!(solver.sum_of_squared_distances(&Point3::new(1.0, 1.0, 0.0)), 2.0);

        let report = solver.solve().unwrap();
        assert_eq!(report.strategy, SolveStrategy::PlanePair);
        assert_relative_eq!(report.point, Point3::origin(), epsilon = 1e-12);
    }

    #[test]
    fn test_two_planes_oblique() {
        let planes = [
            Plane::from_coords([1.0, 0.0, 0.0], [1.0, 1.0, 0.0]),
            Plane::from_coords([0.0, 0.0, 3.0], [0.0, 1.0, 2.0]),
        ];
        let solver = PlaneDistanceSolver::new(&planes).unwrap();
        let report = solver.solve().unwrap();

        // Non-parallel planes intersect, so the optimum lies on both.
        assert_relative_eq!(report.residual, 0.0, epsilon = 1e-20);
        for plane in &planes {
            assert_relative_eq!(plane.signed_distance(&report.point), 0.0, epsilon = 1e-12);
        }
        // The extra row pins the point to the plane through the origin
        // perpendicular to the intersection line.
        let direction = planes[0].normal.cross(&planes[1].normal);
        assert_relative_eq!(report.point.coords.dot(&direction), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_two_parallel_planes_midpoint() {
        let planes = [
            Plane::from_coords([0.0, 0.0, 1.0], [0.0, 0.0, 1.0]),
            Plane::from_coords([5.0, 5.0, 3.0], [0.0, 0.0, -4.0]),
        ];
        let solver = PlaneDistanceSolver::new(&planes).unwrap();
        let p = solver.optimal_point().unwrap();

        assert_relative_eq!(p, Point3::new(0.0, 0.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(solver.sum_of_squared_distances(&p), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_axis_triple() {
        let solver = PlaneDistanceSolver::new(&axis_planes()).unwrap();
        assert_eq!(solver.sum_of_squared_distances(&Point3::new(1.0, 1.0, 1.0)), 3.0);

        let report = solver.solve().unwrap();
        assert_eq!(report.strategy, SolveStrategy::NormalEquations);
        assert_eq!(report.rank, 3);
        assert_relative_eq!(report.point, Point3::origin(), epsilon = 1e-12);
    }

    #[test]
    fn test_unit_cube() {
        let solver = PlaneDistanceSolver::new(&cube_planes(0.0, 1.0, [1.0; 6])).unwrap();
        assert_eq!(
            solver.sum_of_squared_distances(&Point3::new(0.5, 0.5, 0.5)),
            1.5
        );
        assert_relative_eq!(
            solver.optimal_point().unwrap(),
            Point3::new(0.5, 0.5, 0.5),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_scaled_cube() {
        let planes = cube_planes(0.0, 2.0, [100.0, 50.0, 10.0, 10.0, 30.0, 50.0]);
        let solver = PlaneDistanceSolver::new(&planes).unwrap();
        assert_eq!(solver.sum_of_squared_distances(&Point3::new(1.0, 1.0, 1.0)), 6.0);
        assert_relative_eq!(
            solver.optimal_point().unwrap(),
            Point3::new(1.0, 1.0, 1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_normal_rejected() {
        let mut planes = axis_planes();
        planes.push(Plane::from_coords([1.0, 2.0, 3.0], [0.0, 0.0, 0.0]));
        let err = PlaneDistanceSolver::new(&planes).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DegenerateNormal);
        assert_eq!(err.plane_index(), Some(3));
    }

    #[test]
    fn test_min_normal_length_param() {
        let planes = [Plane::from_coords([0.0, 0.0, 0.0], [0.0, 0.0, 1e-6])];
        assert!(PlaneDistanceSolver::new(&planes).is_ok());

        let params = SolverParams::default().with_min_normal_length(1e-3);
        let err = PlaneDistanceSolver::with_params(&planes, params).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DegenerateNormal);
    }

    #[test]
    fn test_singular_least_squares() {
        let planes = coplanar_normal_planes();
        let solver = PlaneDistanceSolver::new(&planes).unwrap();
        assert_eq!(solver.rank(), 2);

        let report = solver.solve().unwrap();
        assert_eq!(report.strategy, SolveStrategy::LeastSquares);
        // Minimum-norm: no component along the null direction.
        assert_relative_eq!(report.point.z, 0.0, epsilon = 1e-12);

        // Moving along the null direction leaves the sum unchanged; moving
        // in-plane can only make it worse.
        let shifted = report.point + Vector3::new(0.0, 0.0, 10.0);
        assert_relative_eq!(
            solver.sum_of_squared_distances(&shifted),
            report.residual,
            epsilon = 1e-9
        );
        for delta in [
            Vector3::new(0.01, 0.0, 0.0),
            Vector3::new(0.0, -0.01, 0.0),
            Vector3::new(0.01, 0.01, 0.0),
        ] {
            assert!(solver.sum_of_squared_distances(&(report.point + delta)) >= report.residual);
        }
    }

    #[test]
    fn test_singular_strict() {
        let solver =
            PlaneDistanceSolver::with_params(&coplanar_normal_planes(), SolverParams::strict())
                .unwrap();
        let err = solver.optimal_point().unwrap_err();
        match err {
            GeomError::SingularSystem { rank, plane_count } => {
                assert_eq!(rank, 2);
                assert_eq!(plane_count, 3);
            }
            other => panic!("Expected SingularSystem, got {other:?}"),
        }
    }

    #[test]
    fn test_all_parallel_planes() {
        let planes = [
            Plane::from_coords([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            Plane::from_coords([0.0, 0.0, 1.0], [0.0, 0.0, 2.0]),
            Plane::from_coords([0.0, 0.0, 5.0], [0.0, 0.0, -1.0]),
        ];
        let solver = PlaneDistanceSolver::new(&planes).unwrap();
        assert_eq!(solver.rank(), 1);
        let p = solver.optimal_point().unwrap();
        assert_relative_eq!(p, Point3::new(0.0, 0.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_signed_distances() {
        let solver = PlaneDistanceSolver::new(&cube_planes(0.0, 1.0, [2.0; 6])).unwrap();
        let d = solver.signed_distances(&Point3::new(0.25, 0.5, 1.0));
        assert_eq!(d.len(), 6);
        assert_relative_eq!(d[0], -0.25);
        assert_relative_eq!(d[2], -1.0);
        assert_relative_eq!(d[3], -0.75);
        assert_relative_eq!(d[5], 0.0);
    }

    #[test]
    fn test_batch_matches_single() {
        let solver = PlaneDistanceSolver::new(&cube_planes(0.0, 1.0, [1.0; 6])).unwrap();
        let points: Vec<_> = (0..50)
            .map(|i| {
                let t = i as f64 * 0.1;
                Point3::new(t, 1.0 - t, t * t)
            })
            .collect();

        let batch = solver.sum_of_squared_distances_batch(&points);
        assert_eq!(batch.len(), points.len());
        for (p, value) in points.iter().zip(&batch) {
            assert_eq!(*value, solver.sum_of_squared_distances(p));
        }
    }

    #[test]
    fn test_quadric_agrees_with_direct() {
        let solver = PlaneDistanceSolver::new(&coplanar_normal_planes()).unwrap();
        let p = Point3::new(0.3, -1.2, 8.0);
        assert_relative_eq!(
            solver.quadric().evaluate(&p),
            solver.sum_of_squared_distances(&p),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_params_builder() {
        let params = SolverParams::default()
            .with_singular_policy(SingularPolicy::Fail)
            .with_rank_tolerance(-1.0);
        assert_eq!(params.singular_policy, SingularPolicy::Fail);
        assert_eq!(params.rank_tolerance, 0.0);
        assert_eq!(SolverParams::strict().singular_policy, SingularPolicy::Fail);
    }

    #[test]
    fn test_near_coplanar_normals_are_full_rank() {
        let target = Point3::new(0.0, 0.0, 1e5);
        let planes = [
            Plane::from_coords([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            Plane::from_coords([0.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            Plane::new(target, Vector3::new(1.0, 1.0, 1e-5)),
        ];
        let solver = PlaneDistanceSolver::with_params(&planes, SolverParams::strict()).unwrap();
        assert_eq!(solver.rank(), 3);

        let report = solver.solve().unwrap();
        assert_eq!(report.strategy, SolveStrategy::NormalEquations);
        assert_relative_eq!(report.point, target, epsilon = 1e-3, max_relative = 1e-4);
        assert!(report.residual < 1e-6, "residual {}", report.residual);
    }

    #[test]
    fn test_huge_normals() {
        let single = PlaneDistanceSolver::new(&[Plane::from_coords(
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 1e200],
        )])
        .unwrap();
        assert_eq!(single.sum_of_squared_distances(&Point3::new(0.0, 0.0, 3.0)), 9.0);

        let planes = [
            Plane::from_coords([1.0, 0.0, 0.0], [1e200, 0.0, 0.0]),
            Plane::from_coords([0.0, 2.0, 0.0], [0.0, 1.0, 0.0]),
            Plane::from_coords([0.0, 0.0, 3.0], [0.0, 0.0, 1e-170]),
        ];
        let params = SolverParams::default().with_min_normal_length(0.0);
        let solver = PlaneDistanceSolver::with_params(&planes, params).unwrap();
        assert_eq!(solver.rank(), 3);
        let report = solver.solve().unwrap();
        assert_eq!(report.strategy, SolveStrategy::NormalEquations);
        assert_relative_eq!(report.point, Point3::new(1.0, 2.0, 3.0), epsilon = 1e-12);
        assert_relative_eq!(report.residual, 0.0, epsilon = 1e-20);
    }

    #[test]
    fn test_least_squares_zero_system() {
        let p = least_squares(Matrix3::zeros(), &Vector3::zeros(), 1e-10);
        assert_eq!(p, Some(Point3::origin()));

        let m = Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0);
        let p = least_squares(m, &Vector3::new(2.0, 3.0, 0.0), 1e-10);
        assert_eq!(p, Some(Point3::new(2.0, 3.0, 0.0)));
    }

    #[test]
    fn test_solver_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PlaneDistanceSolver>();
    }
}
