use crate::math::{Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::details::line_toi_with_plane;
use crate::shape::Cylinder;
use crate::utils;
use arrayvec::ArrayVec;
use na::Unit;

/// Intersects the ray `origin + dir * t` (with `t >= 0`) with the surface of a cylinder.
///
/// Both the lateral surface and the two flat caps are tested. At most two intersection
/// parameters are returned, in the order they were discovered: the lateral roots come first
/// (the farthest root before the nearest one), then the cap hits. Callers that need the hits
/// sorted must sort them.
///
/// A degenerate cylinder (with both cap centers at the same location) has no surface for this
/// query and never yields any intersection.
pub fn intersect_ray_cylinder(
    origin: &Point<Real>,
    dir: &Vector<Real>,
    cylinder: &Cylinder,
) -> ArrayVec<Real, 2> {
    let mut hits = ArrayVec::new();
    let scaled_axis = cylinder.scaled_direction();
    let axis_length = scaled_axis.norm();

    if axis_length <= DEFAULT_EPSILON {
        log::trace!("Ray cast against a degenerate cylinder ignored.");
        return hits;
    }

    let axis = Unit::new_unchecked(scaled_axis / axis_length);
    let radius2 = cylinder.radius * cylinder.radius;

    // Lateral surface. A ray parallel to the axis can only hit the caps.
    let (_, dir_perp) = utils::decompose_vector(dir, &axis);
    let a = dir_perp.norm_squared();

    if a > DEFAULT_EPSILON {
        let dpos = origin - cylinder.segment.a;
        let (_, dpos_perp) = utils::decompose_vector(&dpos, &axis);
        let b = 2.0 * dpos_perp.dot(&dir_perp);
        let c = dpos_perp.norm_squared() - radius2;
        let d = b * b - 4.0 * a * c;
        let half_inv_a = 0.5 / a;

        let dpos_axial = dpos.dot(&axis);
        let dir_axial = dir.dot(&axis);
        let between_caps = |t: Real| {
            let height = dpos_axial + t * dir_axial;
            height >= 0.0 && height <= axis_length
        };

        if d >= 0.0 && d <= DEFAULT_EPSILON {
            // Tangent ray.
            let t = -b * half_inv_a;
            if t >= 0.0 && between_caps(t) {
                hits.push(t);
            }
        } else if d > DEFAULT_EPSILON {
            let sqrt_d = d.sqrt();

            for t in [(-b + sqrt_d) * half_inv_a, (-b - sqrt_d) * half_inv_a] {
                if t >= 0.0 && between_caps(t) {
                    hits.push(t);
                }
            }

            if hits.is_full() {
                return hits;
            }
        }
    }

    // Caps.
    for cap_center in [cylinder.segment.a, cylinder.segment.b] {
        let Some(t) = line_toi_with_plane(&cap_center, &axis, origin, dir) else {
            continue;
        };

        if t >= 0.0 {
            let pt = origin + dir * t;

            if (pt - cap_center).norm_squared() < radius2 {
                hits.push(t);

                if hits.is_full() {
                    return hits;
                }
            }
        }
    }

    hits
}

impl Cylinder {
    /// Intersects a ray with the surface of this cylinder.
    ///
    /// See [`intersect_ray_cylinder`] for details.
    #[inline]
    pub fn intersect_ray(&self, ray: &crate::query::Ray) -> ArrayVec<Real, 2> {
        intersect_ray_cylinder(&ray.origin, &ray.dir, self)
    }
}
