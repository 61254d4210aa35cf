use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Point, Real, UnitVector, Vector, DIM};

/// The volume of a controller, as seen by the sweep driver.
///
/// Both capsules and boxes are approximated by a vertical cylinder with a radius and a
/// height along the up direction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SweptVolume {
    /// The lateral radius of the volume.
    pub radius: Real,
    /// The height of the volume along the up direction, excluding the radius.
    pub height: Real,
}

impl SweptVolume {
    /// The swept volume of a capsule.
    pub fn capsule(radius: Real, height: Real) -> Self {
        Self { radius, height }
    }

    /// The swept volume of a box, whatever its rotation around the up direction.
    pub fn obb(half_box_height: Real, half_side_extent: Real, half_forward_extent: Real) -> Self {
        Self {
            radius: half_side_extent.max(half_forward_extent),
            height: 2.0 * half_box_height,
        }
    }

    /// The AABB enclosing this volume while its center moves from `center` to
    /// `center + displacement`.
    ///
    /// The volume is inflated by `contact_offset`, and the box is extended downward by
    /// `max_jump_height` so that the ground below a jumping character is still gathered.
    pub fn temporal_aabb(
        &self,
        center: &Point<Real>,
        displacement: &Vector<Real>,
        contact_offset: Real,
        max_jump_height: Real,
        up: &UnitVector<Real>,
    ) -> Aabb {
        let radius = self.radius + contact_offset;
        let half_height = self.height * 0.5;
        let half_extents = Vector::repeat(radius) + up.abs() * half_height;

        let start = Aabb::from_half_extents(*center, half_extents);
        let mut aabb = start.merged(&start.translated(displacement));

        if max_jump_height != 0.0 {
            for i in 0..DIM {
                let shift = up[i] * max_jump_height;
                if shift > 0.0 {
                    aabb.mins[i] -= shift;
                } else {
                    aabb.maxs[i] -= shift;
                }
            }
        }

        aabb
    }
}
