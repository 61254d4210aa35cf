use crate::math::{Real, Rotation, UnitVector, Vector};
use na::{RealField, Unit};

/// The rotation with the smallest angle that maps `from` onto `to`.
///
/// Unlike `UnitQuaternion::rotation_between_axis`, this never fails: if both directions are
/// opposite, a half-turn around an arbitrary axis orthogonal to `from` is returned.
pub fn shortest_rotation(from: &UnitVector<Real>, to: &UnitVector<Real>) -> Rotation<Real> {
    Rotation::rotation_between_axis(from, to).unwrap_or_else(|| {
        let helper = if from.x.abs() < 0.9 {
            Vector::x()
        } else {
            Vector::y()
        };
        let axis = Unit::new_normalize(from.cross(&helper));
        Rotation::from_axis_angle(&axis, Real::pi())
    })
}

/// Wraps `angle` into the canonical range `(-π, π]`.
pub fn wrap_angle(angle: Real) -> Real {
    let two_pi = Real::two_pi();
    let mut wrapped = angle % two_pi;

    if wrapped > Real::pi() {
        wrapped -= two_pi;
    } else if wrapped <= -Real::pi() {
        wrapped += two_pi;
    }

    wrapped
}

/// Splits `v` into its components parallel and perpendicular to the unit vector `axis`.
///
/// Returns `(parallel, perpendicular)`.
#[inline]
pub fn decompose_vector(v: &Vector<Real>, axis: &UnitVector<Real>) -> (Vector<Real>, Vector<Real>) {
    let parallel = **axis * v.dot(axis);
    (parallel, v - parallel)
}
