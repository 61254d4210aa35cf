//! Implementation details of the closest points queries.

pub use self::closest_points_segment_segment::{
    closest_parameters_segment_segment, closest_points_segment_segment_two_pass,
};

mod closest_points_segment_segment;
