use crate::math::{Point, Real, Vector};

/// Computes the parameter `t` such that `line_origin + line_dir * t` lies on the plane going
/// through `plane_center` with the normal `plane_normal`.
///
/// Returns `None` if the line is parallel to the plane.
#[inline]
pub fn line_toi_with_plane(
    plane_center: &Point<Real>,
    plane_normal: &Vector<Real>,
    line_origin: &Point<Real>,
    line_dir: &Vector<Real>,
) -> Option<Real> {
    let dpos = *plane_center - *line_origin;
    let denom = plane_normal.dot(line_dir);

    if relative_eq!(denom, 0.0) {
        None
    } else {
        Some(plane_normal.dot(&dpos) / denom)
    }
}
