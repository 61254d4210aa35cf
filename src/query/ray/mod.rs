//! Ray-casting related definitions and implementations.

#[doc(inline)]
pub use self::ray::Ray;
pub use self::ray_ball::ray_toi_with_ball;
pub use self::ray_cylinder::intersect_ray_cylinder;
pub use self::ray_plane::line_toi_with_plane;

#[doc(hidden)]
pub mod ray;
mod ray_ball;
mod ray_cylinder;
mod ray_plane;
