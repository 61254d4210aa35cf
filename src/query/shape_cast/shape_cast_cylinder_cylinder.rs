use na::Unit;

use crate::math::{Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::details::{
    closest_points_segment_segment_two_pass, distance_point_segment_squared,
    intersect_ray_cylinder, ray_toi_with_ball,
};
use crate::query::Ray;
use crate::shape::Cylinder;

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
/// Controls which outputs a cylinder cast computes.
///
/// The same flags are used on the returned [`CylinderCastHit`] to tell which outputs were
/// actually produced. The time of impact is always produced.
pub struct CylinderCastFlags(u8);

bitflags::bitflags! {
    impl CylinderCastFlags: u8 {
        /// If set, the cylinders are assumed to be disjoint at time 0 and the initial
        /// overlap test is skipped.
        const ASSUME_NO_INITIAL_OVERLAP = 1;
        /// If set, the contact point is computed.
        const POSITION = 1 << 1;
        /// If set, the contact normal is computed.
        const NORMAL = 1 << 2;
    }
}

/// The way the cylinder cast terminated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum CylinderCastStatus {
    /// The cylinders already overlap at time 0.
    ///
    /// The time of impact is 0 and the normal is the opposite of the sweep direction. The
    /// penetration is not refined.
    Penetrating,
    /// The cylinders touch on their lateral surfaces.
    Lateral,
    /// The contact involves the end cap of at least one cylinder.
    EndCap,
    /// The time of impact was found but the contact was not classified, either because no
    /// contact geometry was requested or because both cylinders are spheres.
    Converged,
}

/// The result of a cylinder cast.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CylinderCastHit {
    /// The distance travelled along the sweep direction before the cylinders touch.
    pub time_of_impact: Real,
    /// The contact point at the time of impact.
    ///
    /// Only reliable if `flags` contains [`CylinderCastFlags::POSITION`].
    pub position: Point<Real>,
    /// The outward normal of the first cylinder at the contact point.
    ///
    /// Only reliable if `flags` contains [`CylinderCastFlags::NORMAL`].
    pub normal: Unit<Vector<Real>>,
    /// The outputs that were actually computed.
    pub flags: CylinderCastFlags,
    /// The way the cast terminated.
    pub status: CylinderCastStatus,
}

/// Relative gap under which the closest axis points at impact are considered to be in end-cap
/// contact rather than lateral contact.
const CONTACT_CLASSIFICATION_TOLERANCE: Real = 1.0e-4;

/// Time of impact of two cylinders with parallel axes under translational movement.
///
/// `cyl1` is static, `cyl2` moves along the unit direction `dir` and can travel at most
/// `max_time_of_impact`. Both cylinders are expressed in the same space. The returned normal
/// is the outward normal of `cyl1` at the contact, so it opposes the sweep. Returns `None` if
/// the cylinders don't touch within the allowed distance.
///
/// The axes of both cylinders must be parallel. A cylinder with a zero-length axis is handled
/// as a sphere.
pub fn cast_parallel_cylinders(
    cyl1: &Cylinder,
    cyl2: &Cylinder,
    dir: &UnitVector<Real>,
    max_time_of_impact: Real,
    flags: CylinderCastFlags,
) -> Option<CylinderCastHit> {
    let fused_radius = cyl1.radius + cyl2.radius;
    let center1 = cyl1.center();
    let center2 = cyl2.center();

    let Some(axis) = cyl1.direction().or_else(|| cyl2.direction()) else {
        log::trace!("Casting two degenerate cylinders, falling back to a sphere cast.");
        return cast_spheres(cyl1, cyl2, dir, max_time_of_impact, flags);
    };

    debug_assert!(
        cyl1.direction().map_or(true, |d| d.cross(&axis).norm() <= 1.0e-3)
            && cyl2.direction().map_or(true, |d| d.cross(&axis).norm() <= 1.0e-3),
        "The axes of the cylinders must be parallel."
    );

    // Minkowski sum of both cylinders, centered on the first one: casting `cyl2` against
    // `cyl1` becomes casting the center of `cyl2` against this proxy.
    let half_length = (cyl1.length() + cyl2.length()) * 0.5;
    let proxy = Cylinder::new(
        center1 - *axis * half_length,
        center1 + *axis * half_length,
        fused_radius,
    );

    if !flags.contains(CylinderCastFlags::ASSUME_NO_INITIAL_OVERLAP) {
        let dist_sq = distance_point_segment_squared(&proxy.segment, &center2);
        let axial_offset = (center2 - center1).dot(&axis);

        if dist_sq < fused_radius * fused_radius && axial_offset.abs() < half_length {
            return Some(CylinderCastHit {
                time_of_impact: 0.0,
                position: center2,
                normal: -*dir,
                flags: CylinderCastFlags::NORMAL,
                status: CylinderCastStatus::Penetrating,
            });
        }
    }

    let hits = intersect_ray_cylinder(&center2, dir, &proxy);
    let time_of_impact = hits.iter().copied().fold(Real::MAX, Real::min);

    if hits.is_empty() || time_of_impact > max_time_of_impact {
        return None;
    }

    let mut result = CylinderCastHit {
        time_of_impact,
        position: center2 + **dir * time_of_impact,
        normal: -*dir,
        flags: CylinderCastFlags::empty(),
        status: CylinderCastStatus::Converged,
    };

    let wanted = flags & (CylinderCastFlags::POSITION | CylinderCastFlags::NORMAL);
    if wanted.is_empty() {
        return Some(result);
    }

    let seg2 = cyl2.segment.translated(&(**dir * time_of_impact));
    // `x` lies on the axis of `cyl2` at its impact pose, `y` on the axis of `cyl1`.
    let (x, y) = closest_points_segment_segment_two_pass(
        &seg2.a,
        &seg2.scaled_direction(),
        &cyl1.segment.a,
        &cyl1.segment.scaled_direction(),
    );
    let dist = na::distance(&x, &y);
    // Lateral contacts reach `dist == fused_radius` only up to the rounding of the axes.
    let tolerance = (fused_radius * CONTACT_CLASSIFICATION_TOLERANCE).max(DEFAULT_EPSILON);
    let end_cap = dist < fused_radius - tolerance;

    let (normal, position) = if end_cap {
        // `fused_radius - dist > tolerance` here.
        let half_dist = dist * 0.5;
        let position = Point::from(
            (x.coords * (cyl1.radius - half_dist) + y.coords * (cyl2.radius - half_dist))
                / (fused_radius - dist),
        );
        (y - center1, position)
    } else {
        let position = if fused_radius > DEFAULT_EPSILON {
            Point::from((x.coords * cyl1.radius + y.coords * cyl2.radius) / fused_radius)
        } else {
            na::center(&x, &y)
        };
        (x - y, position)
    };

    result.status = if end_cap {
        CylinderCastStatus::EndCap
    } else {
        CylinderCastStatus::Lateral
    };

    if wanted.contains(CylinderCastFlags::NORMAL) {
        if let Some(normal) = Unit::try_new(normal, DEFAULT_EPSILON) {
            result.normal = normal;
        } else {
            log::debug!("Degenerate cylinder cast normal, using the opposite sweep direction.");
        }
    }

    if wanted.contains(CylinderCastFlags::POSITION) {
        result.position = position;
    }

    result.flags = wanted;
    Some(result)
}

fn cast_spheres(
    cyl1: &Cylinder,
    cyl2: &Cylinder,
    dir: &UnitVector<Real>,
    max_time_of_impact: Real,
    flags: CylinderCastFlags,
) -> Option<CylinderCastHit> {
    let fused_radius = cyl1.radius + cyl2.radius;
    let center1 = cyl1.center();
    let ray = Ray::new(cyl2.center(), **dir);
    let solid = !flags.contains(CylinderCastFlags::ASSUME_NO_INITIAL_OVERLAP);

    let (inside, Some(time_of_impact)) = ray_toi_with_ball(&center1, fused_radius, &ray, solid)
    else {
        return None;
    };

    if inside && solid {
        return Some(CylinderCastHit {
            time_of_impact: 0.0,
            position: ray.origin,
            normal: -*dir,
            flags: CylinderCastFlags::NORMAL,
            status: CylinderCastStatus::Penetrating,
        });
    }

    if time_of_impact > max_time_of_impact {
        return None;
    }

    let wanted = flags & (CylinderCastFlags::POSITION | CylinderCastFlags::NORMAL);
    let normal = Unit::try_new(ray.point_at(time_of_impact) - center1, DEFAULT_EPSILON)
        .unwrap_or(-*dir);

    Some(CylinderCastHit {
        time_of_impact,
        position: center1 + *normal * cyl1.radius,
        normal,
        flags: wanted,
        status: CylinderCastStatus::Converged,
    })
}
