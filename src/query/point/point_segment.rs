use crate::math::{Point, Real};
use crate::shape::{Segment, SegmentPointLocation};

impl Segment {
    /// Projects a point on this segment.
    ///
    /// Returns the projected point and its location on the segment.
    pub fn project_point_with_location(
        &self,
        pt: &Point<Real>,
    ) -> (Point<Real>, SegmentPointLocation) {
        let ab = self.b - self.a;
        let ap = pt - self.a;
        let ab_ap = ab.dot(&ap);
        let sqnab = ab.norm_squared();

        if ab_ap <= 0.0 {
            // Voronoï region of vertex 'a'.
            (self.a, SegmentPointLocation::OnVertex(0))
        } else if ab_ap >= sqnab {
            // Voronoï region of vertex 'b'.
            (self.b, SegmentPointLocation::OnVertex(1))
        } else {
            // Voronoï region of the segment interior.
            let u = ab_ap / sqnab;
            (self.a + ab * u, SegmentPointLocation::OnEdge([1.0 - u, u]))
        }
    }

    /// Projects a point on this segment.
    #[inline]
    pub fn project_point(&self, pt: &Point<Real>) -> Point<Real> {
        self.project_point_with_location(pt).0
    }
}

/// The squared distance between a point and a segment.
///
/// A degenerate segment is handled as a single point.
#[inline]
pub fn distance_point_segment_squared(segment: &Segment, pt: &Point<Real>) -> Real {
    na::distance_squared(&segment.project_point(pt), pt)
}
