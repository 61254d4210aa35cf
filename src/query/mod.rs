//! Non-persistent geometric queries.
//!
//! The main entry point of this module is [`cast_parallel_cylinders`], the continuous
//! collision test between two cylinders with parallel axes, one of which is moving along a
//! straight line.
//!
//! # Specific cases
//! The functions exported by the `details` submodule are the analytic building blocks of the
//! cylinder cast: ray/cylinder and ray/ball intersections, and closest points between segments.

pub use self::ray::Ray;
pub use self::shape_cast::{
    cast_parallel_cylinders, CylinderCastFlags, CylinderCastHit, CylinderCastStatus,
};

pub mod closest_points;
pub mod point;
mod ray;
mod shape_cast;

/// Queries dedicated to specific pairs of shapes.
pub mod details {
    pub use super::closest_points::*;
    pub use super::point::*;
    pub use super::ray::{intersect_ray_cylinder, line_toi_with_plane, ray_toi_with_ball};
}
