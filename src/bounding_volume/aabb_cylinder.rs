use crate::bounding_volume::Aabb;
use crate::math::{Real, Vector};
use crate::shape::Cylinder;

impl Cylinder {
    /// The axis-aligned bounding box of this cylinder.
    ///
    /// Each cap is a disk, so its extent along the world axis `i` is
    /// `radius * sqrt(1 - dir[i]²)`, where `dir` is the unit axis of the cylinder.
    pub fn aabb(&self) -> Aabb {
        let a = self.segment.a;
        let b = self.segment.b;

        let disk_extents = match self.direction() {
            Some(dir) => Vector::from_fn(|i, _| {
                let sin2: Real = 1.0 - dir[i] * dir[i];
                self.radius * sin2.max(0.0).sqrt()
            }),
            None => Vector::repeat(self.radius),
        };

        Aabb::new(
            (a.coords.inf(&b.coords) - disk_extents).into(),
            (a.coords.sup(&b.coords) + disk_extents).into(),
        )
    }
}
