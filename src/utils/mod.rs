//! Various unsorted geometrical and logical operators.

pub use self::isometry_ops::IsometryOps;
pub use self::rotation::{decompose_vector, shortest_rotation, wrap_angle};

mod isometry_ops;
mod rotation;
