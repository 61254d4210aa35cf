use crate::math::{Point, Real, Vector, DEFAULT_EPSILON};

/// Closest points between the segments `(p, p + a)` and `(q, q + b)`.
///
/// Returns `(x, y)` where `x` lies on the first segment and `y` on the second one.
#[inline]
pub fn closest_points_segment_segment_two_pass(
    p: &Point<Real>,
    a: &Vector<Real>,
    q: &Point<Real>,
    b: &Vector<Real>,
) -> (Point<Real>, Point<Real>) {
    let (t, u) = closest_parameters_segment_segment(p, a, q, b);
    (p + a * t, q + b * u)
}

/// The parameters `(t, u) ∈ [0, 1]²` of the closest points `p + a * t` and `q + b * u` between
/// the segments `(p, p + a)` and `(q, q + b)`.
///
/// The optimal `t` of the infinite lines is computed and clamped first. Then `u` is computed
/// for that `t`. If `u` has to be clamped, `t` is computed again for the clamped `u` (and
/// clamped again). The second pass matters when the unconstrained optimum lies outside of
/// both segments.
pub fn closest_parameters_segment_segment(
    p: &Point<Real>,
    a: &Vector<Real>,
    q: &Point<Real>,
    b: &Vector<Real>,
) -> (Real, Real) {
    let diff = q - p;
    let a_dot_a = a.norm_squared();
    let b_dot_b = b.norm_squared();
    let a_dot_b = a.dot(b);
    let a_dot_diff = a.dot(&diff);
    let b_dot_diff = b.dot(&diff);

    let a_is_point = a_dot_a <= DEFAULT_EPSILON;
    let b_is_point = b_dot_b <= DEFAULT_EPSILON;

    // `t` on the first segment, for the closest points of the supporting lines.
    let ab = a_dot_a * b_dot_b;
    let ba = a_dot_b * a_dot_b;
    let denom = ab - ba;

    // Use absolute and ulps error to test collinearity.
    let mut t = if denom > DEFAULT_EPSILON && !ulps_eq!(ab, ba) {
        na::clamp((a_dot_diff * b_dot_b - b_dot_diff * a_dot_b) / denom, 0.0, 1.0)
    } else {
        0.0
    };

    // Solves for `t` once `u` is fixed on the second segment.
    let refit_t = |u: Real| {
        if a_is_point {
            0.0
        } else {
            na::clamp((u * a_dot_b + a_dot_diff) / a_dot_a, 0.0, 1.0)
        }
    };

    let u;

    if b_is_point {
        u = 0.0;
        t = refit_t(0.0);
    } else {
        let unclamped_u = (t * a_dot_b - b_dot_diff) / b_dot_b;

        if unclamped_u < 0.0 {
            u = 0.0;
            t = refit_t(0.0);
        } else if unclamped_u > 1.0 {
            u = 1.0;
            t = refit_t(1.0);
        } else {
            u = unclamped_u;
        }
    }

    (t, u)
}
