//! Quadric form of the sum of squared plane distances.
//!
//! For a unit normal `n` and plane offset `d = q·n`, the squared distance of
//! `p` to the plane is `(n·p - d)^2 = pᵀ(nnᵀ)p - 2d nᵀp + d²`. Summing over a
//! set of planes gives the quadratic form
//!
//! ```text
//! E(p) = pᵀ A p - 2 bᵀ p + c
//! A = Σ nᵢnᵢᵀ,   b = Σ dᵢ nᵢ,   c = Σ dᵢ²
//! ```
//!
//! whose gradient vanishes where `A p = b`. This is the same accumulator used
//! by quadric-error-metric decimation, kept in its 3x3 + vector + scalar form.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use nalgebra::{Matrix3, Point3, Vector3};

use crate::Plane;

/// Accumulated squared-distance quadric `(A, b, c)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadric {
    a: Matrix3<f64>,
    b: Vector3<f64>,
    c: f64,
}

impl Default for Quadric {
    fn default() -> Self {
        Self::zero()
    }
}

impl Quadric {
    /// The empty quadric; evaluates to zero everywhere.
    pub fn zero() -> Self {
        Self {
            a: Matrix3::zeros(),
            b: Vector3::zeros(),
            c: 0.0,
        }
    }

    /// Quadric of a single plane. The normal is normalized first.
    pub fn from_plane(plane: &Plane) -> Self {
        let n = plane.unit_normal();
        let d = plane.point.coords.dot(&n);
        Self {
            a: n * n.transpose(),
            b: n * d,
            c: d * d,
        }
    }

    /// Add another quadric to this one.
    pub fn add(&mut self, other: &Quadric) {
        self.a += other.a;
        self.b += other.b;
        self.c += other.c;
    }

    /// Evaluate the summed squared distance at `p`.
    ///
    /// Cancellation can leave a tiny negative value far from the planes, so the
    /// result is clamped at zero.
    pub fn evaluate(&self, p: &Point3<f64>) -> f64 {
        let v = p.coords;
        let value = v.dot(&(self.a * v)) - 2.0 * self.b.dot(&v) + self.c;
        value.max(0.0)
    }

    /// Find the point that minimizes the quadric, or `None` if `A` is singular.
    pub fn optimal_point(&self) -> Option<Point3<f64>> {
        self.a.lu().solve(&self.b).map(Point3::from)
    }

    /// The symmetric matrix `A = Σ nnᵀ`.
    #[inline]
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.a
    }

    /// The vector `b = Σ (q·n) n`.
    #[inline]
    pub fn vector(&self) -> &Vector3<f64> {
        &self.b
    }

    /// The constant `c = Σ (q·n)²`.
    #[inline]
    pub fn constant(&self) -> f64 {
        self.c
    }
}

impl Add for Quadric {
    type Output = Quadric;

    fn add(mut self, rhs: Quadric) -> Quadric {
        Quadric::add(&mut self, &rhs);
        self
    }
}

impl AddAssign for Quadric {
    fn add_assign(&mut self, rhs: Quadric) {
        Quadric::add(self, &rhs);
    }
}

impl Sum for Quadric {
    fn sum<I: Iterator<Item = Quadric>>(iter: I) -> Self {
        iter.fold(Quadric::zero(), |acc, q| acc + q)
    }
}

impl<'a> Sum<&'a Plane> for Quadric {
    fn sum<I: Iterator<Item = &'a Plane>>(iter: I) -> Self {
        iter.map(Quadric::from_plane).sum()
    }
}
