//! Definition of the finite cylinder primitive used by the sweep tests.

use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::{Cuboid, Segment};
use crate::utils;
use na::Unit;

/// A cylinder defined by the segment joining the centers of its two caps and a radius.
///
/// Unlike most shapes, the cylinder is expressed directly in the space it lives in, it is not
/// attached to a local frame. A cylinder with `segment.a == segment.b` is degenerate: it is
/// treated as a sphere by the queries of this crate (see [`Cylinder::is_sphere`]).
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Cylinder {
    /// The axis of the cylinder, joining the centers of its two caps.
    pub segment: Segment,
    /// The radius of the cylinder.
    pub radius: Real,
}

impl Cylinder {
    /// Creates a new cylinder from the centers of its caps and its radius.
    ///
    /// # Arguments:
    /// * `a` - the center of the first cap.
    /// * `b` - the center of the second cap.
    /// * `radius` - the radius of the cylinder, must be non-negative.
    pub fn new(a: Point<Real>, b: Point<Real>, radius: Real) -> Cylinder {
        Self::from_segment(Segment::new(a, b), radius)
    }

    /// Creates a new cylinder from its axis and radius.
    pub fn from_segment(segment: Segment, radius: Real) -> Cylinder {
        debug_assert!(radius >= 0.0, "A cylinder radius must be non-negative.");
        Cylinder { segment, radius }
    }

    /// The axis of this cylinder scaled by its length, pointing from `segment.a` toward `segment.b`.
    #[inline]
    pub fn scaled_direction(&self) -> Vector<Real> {
        self.segment.scaled_direction()
    }

    /// The unit axis of this cylinder, or `None` if the cylinder is degenerate.
    #[inline]
    pub fn direction(&self) -> Option<Unit<Vector<Real>>> {
        self.segment.direction()
    }

    /// The distance between the centers of the two caps.
    #[inline]
    pub fn length(&self) -> Real {
        self.segment.length()
    }

    /// The center of this cylinder.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        self.segment.center()
    }

    /// Is this cylinder degenerate, i.e., are both its caps at the same location?
    #[inline]
    pub fn is_sphere(&self) -> bool {
        self.direction().is_none()
    }

    /// This cylinder translated by `shift`.
    #[inline]
    pub fn translated(&self, shift: &Vector<Real>) -> Self {
        Self::from_segment(self.segment.translated(shift), self.radius)
    }

    /// Computes an oriented box enclosing this cylinder.
    ///
    /// The local `x` axis of the box is aligned with the cylinder axis. The box of a degenerate
    /// cylinder is not rotated.
    pub fn bounding_obb(&self) -> (Isometry<Real>, Cuboid) {
        let half_length = self.length() * 0.5;
        let half_extents = Vector::new(half_length, self.radius, self.radius);
        let rotation = match self.direction() {
            Some(dir) => utils::shortest_rotation(&Vector::x_axis(), &dir),
            None => na::UnitQuaternion::identity(),
        };

        (
            Isometry::from_parts(self.center().coords.into(), rotation),
            Cuboid::new(half_extents),
        )
    }
}
