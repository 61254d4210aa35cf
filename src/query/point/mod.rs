//! Point projection on the shapes of this crate.

pub use self::point_segment::distance_point_segment_squared;

mod point_segment;
