//! Core plane type.

use nalgebra::{Point3, Vector3};

use crate::{GeomError, GeomResult};

/// An infinite plane given by a point on it and a normal.
///
/// The normal does not have to be unit length; anything that consumes a plane
/// normalizes it first. Use [`Plane::validate`] to reject zero-length normals
/// and non-finite components before solving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Any point on the plane.
    pub point: Point3<f64>,

    /// Normal direction, not necessarily normalized.
    pub normal: Vector3<f64>,
}

impl Plane {
    /// Create a plane from a point and a normal.
    #[inline]
    pub fn new(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { point, normal }
    }

    /// Create a plane from raw point and normal coordinates.
    #[inline]
    pub fn from_coords(point: [f64; 3], normal: [f64; 3]) -> Self {
        Self::new(Point3::from(point), Vector3::from(normal))
    }

    /// Create a plane from the implicit equation `ax + by + cz + d = 0`.
    ///
    /// The stored point is the foot of the perpendicular from the origin.
    /// A zero `(a, b, c)` yields a plane at the origin with a zero normal,
    /// which [`Plane::validate`] rejects.
    pub fn from_coefficients(a: f64, b: f64, c: f64, d: f64) -> Self {
        let mut plane = Self {
            point: Point3::origin(),
            normal: Vector3::new(a, b, c),
        };
        let len = plane.normal_length();
        if len > 0.0 {
            plane.point = Point3::from(plane.unit_normal() * (-d / len));
        }
        plane
    }

    /// Length of the normal, computed without overflow or underflow for
    /// finite components of any magnitude.
    pub fn normal_length(&self) -> f64 {
        let scale = self.normal.amax();
        if scale > 0.0 {
            scale * (self.normal / scale).norm()
        } else {
            scale
        }
    }

    /// Unit-length normal.
    ///
    /// The normal is rescaled by its largest component first, so huge and
    /// tiny finite normals both normalize. Produces NaN components for a zero
    /// normal.
    #[inline]
    pub fn unit_normal(&self) -> Vector3<f64> {
        let scaled = self.normal / self.normal.amax();
        scaled / scaled.norm()
    }

    /// Projection of the plane point onto the unit normal (`q·n̂`).
    #[inline]
    pub fn offset(&self) -> f64 {
        self.point.coords.dot(&self.unit_normal())
    }

    /// Signed distance `(q - p)·n̂` from `p` to the plane.
    ///
    /// Positive when `p` lies behind the plane relative to its normal.
    #[inline]
    pub fn signed_distance(&self, p: &Point3<f64>) -> f64 {
        (self.point - p).dot(&self.unit_normal())
    }

    /// Closest point on the plane to `p`.
    pub fn project(&self, p: &Point3<f64>) -> Point3<f64> {
        p + self.unit_normal() * self.signed_distance(p)
    }

    /// Implicit coefficients `[a, b, c, d]` with a unit normal.
    pub fn coefficients(&self) -> [f64; 4] {
        let n = self.unit_normal();
        [n.x, n.y, n.z, -self.offset()]
    }

    /// Whether the normal is too short to normalize reliably.
    #[inline]
    pub fn is_degenerate(&self, min_normal_length: f64) -> bool {
        !(self.normal_length() > min_normal_length)
    }

    /// Copy of this plane with a unit normal.
    pub fn normalized(&self) -> Self {
        Self {
            point: self.point,
            normal: self.unit_normal(),
        }
    }

    /// Check the plane for non-finite components and a usable normal.
    ///
    /// `index` is reported back in the error so callers validating a whole
    /// set can locate the offending plane.
    pub fn validate(&self, index: usize, min_normal_length: f64) -> GeomResult<()> {
        const FIELDS: [(&str, &str); 3] = [
            ("point.x", "normal.x"),
            ("point.y", "normal.y"),
            ("point.z", "normal.z"),
        ];
        for (axis, &(point_field, normal_field)) in FIELDS.iter().enumerate() {
            let p = self.point[axis];
            if !p.is_finite() {
                return Err(GeomError::invalid_coordinate(index, point_field, p));
            }
            let n = self.normal[axis];
            if !n.is_finite() {
                return Err(GeomError::invalid_coordinate(index, normal_field, n));
            }
        }

        if self.is_degenerate(min_normal_length) {
            return Err(GeomError::degenerate_normal(index, self.normal_length()));
        }
        Ok(())
    }
}
