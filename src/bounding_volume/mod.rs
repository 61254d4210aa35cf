//! Bounding volumes.

#[doc(inline)]
pub use crate::bounding_volume::aabb::Aabb;
#[doc(inline)]
pub use crate::bounding_volume::bounding_volume::BoundingVolume;

#[doc(hidden)]
pub mod aabb;
mod aabb_capsule;
mod aabb_cuboid;
mod aabb_cylinder;
#[doc(hidden)]
pub mod bounding_volume;
