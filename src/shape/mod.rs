//! Shapes supported by strider.

pub use self::capsule::Capsule;
pub use self::cuboid::Cuboid;
pub use self::cylinder::Cylinder;
pub use self::segment::{Segment, SegmentPointLocation};

mod capsule;
mod cuboid;
mod cylinder;
mod segment;
