use crate::character::MaterialHandle;
use crate::math::{Point, Real, UnitVector, Vector};
use num_derive::FromPrimitive;

/// The kind of volume backing a [`RotatableController`](crate::character::RotatableController).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ControllerShapeType {
    /// A capsule aligned with the up direction.
    #[default]
    Capsule,
    /// A box aligned with the up direction and rotated around it by the controller orientation.
    Obb,
}

/// Controls whether a controller can climb on top of steep or narrow ledges.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, FromPrimitive)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ClimbingMode {
    /// Standard mode, the controller climbs anything its step offset allows.
    #[default]
    Easy = 0,
    /// Constrained mode, the controller can't climb ledges narrower than its volume.
    Constrained = 1,
}

/// Describes a [`RotatableController`](crate::character::RotatableController) to create.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RotatableControllerDesc {
    /// The initial position of the center of the controller volume.
    pub position: Point<Real>,
    /// The up direction of the controller.
    pub up_direction: UnitVector<Real>,
    /// The initial rotation of the controller around its up direction, in radians.
    pub orientation: Real,
    /// The radius of the capsule.
    pub radius: Real,
    /// The height of the capsule, excluding its hemispherical caps.
    pub height: Real,
    /// The half-extent of the box along the up direction.
    pub half_box_height: Real,
    /// The half-extent of the box along its side axis.
    pub half_side_extent: Real,
    /// The half-extent of the box along its forward axis.
    pub half_forward_extent: Real,
    /// The climbing mode of the controller.
    pub climbing_mode: ClimbingMode,
    /// The initial kind of volume of the controller.
    pub shape_type: ControllerShapeType,
    /// The skin width around the controller volume.
    pub contact_offset: Real,
    /// The maximum obstacle height the controller can climb.
    pub step_offset: Real,
    /// The cosine of the maximum slope the controller can walk on.
    pub slope_limit: Real,
    /// Scale applied to the volume of the proxy body, relative to the controller volume.
    pub proxy_scale_coeff: Real,
    /// The density of the proxy body.
    pub proxy_density: Real,
    /// The material of the proxy shape.
    pub material: MaterialHandle,
}

impl Default for RotatableControllerDesc {
    fn default() -> Self {
        Self {
            position: Point::origin(),
            up_direction: Vector::y_axis(),
            orientation: 0.0,
            radius: 0.0,
            height: 0.0,
            half_box_height: 1.0,
            half_side_extent: 0.5,
            half_forward_extent: 0.5,
            climbing_mode: ClimbingMode::Easy,
            shape_type: ControllerShapeType::Capsule,
            contact_offset: 0.1,
            step_offset: 0.5,
            slope_limit: 0.707,
            proxy_scale_coeff: 0.8,
            proxy_density: 10.0,
            material: MaterialHandle::default(),
        }
    }
}

impl RotatableControllerDesc {
    /// Creates a descriptor of a capsule controller with the given radius and height.
    pub fn capsule(radius: Real, height: Real) -> Self {
        Self {
            radius,
            height,
            shape_type: ControllerShapeType::Capsule,
            ..Default::default()
        }
    }

    /// Creates a descriptor of a box controller with the given half-extents.
    pub fn obb(half_box_height: Real, half_side_extent: Real, half_forward_extent: Real) -> Self {
        Self {
            half_box_height,
            half_side_extent,
            half_forward_extent,
            shape_type: ControllerShapeType::Obb,
            ..Default::default()
        }
    }

    /// Checks that this descriptor can be used to build a controller.
    ///
    /// The dimensions of the initial shape kind must be positive, and so must the offsets, the
    /// slope limit and the proxy parameters. The step offset must fit inside the volume.
    pub fn is_valid(&self) -> bool {
        let volume_is_valid = match self.shape_type {
            ControllerShapeType::Capsule => {
                self.radius > 0.0
                    && self.height > 0.0
                    && self.step_offset <= self.height + 2.0 * self.radius
            }
            ControllerShapeType::Obb => {
                self.half_box_height > 0.0
                    && self.half_side_extent > 0.0
                    && self.half_forward_extent > 0.0
                    && self.step_offset <= 2.0 * self.half_box_height
            }
        };

        volume_is_valid
            && self.contact_offset > 0.0
            && self.step_offset > 0.0
            && self.slope_limit > 0.0
            && self.proxy_scale_coeff > 0.0
            && self.proxy_density > 0.0
            && self.orientation.is_finite()
            && relative_eq!(self.up_direction.norm(), 1.0, epsilon = 1.0e-3)
    }
}
