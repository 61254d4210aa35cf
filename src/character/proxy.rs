//! Interface to the physics bodies representing controllers in the simulation.

use crate::math::{Isometry, Real};
use crate::shape::{Capsule, Cuboid};

/// Index of a kinematic body created by a [`ProxyBodySet`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BodyHandle(pub u32);

/// Index of a shape attached to a body of a [`ProxyBodySet`].
///
/// A shape handle is only meaningful while the body carrying the shape exists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ShapeHandle(pub u32);

/// Index of a material known to a [`ProxyBodySet`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MaterialHandle(pub u32);

/// Collision filtering data of a shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FilterData {
    /// The groups this shape belongs to.
    pub memberships: u32,
    /// The groups this shape can interact with.
    pub filter: u32,
}

impl FilterData {
    /// Creates filter data from groups memberships and a filter.
    pub const fn new(memberships: u32, filter: u32) -> Self {
        Self {
            memberships,
            filter,
        }
    }
}

impl Default for FilterData {
    fn default() -> Self {
        Self::new(u32::MAX, u32::MAX)
    }
}

/// The geometry of a proxy shape, expressed in the local frame of its body.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ProxyGeometry {
    /// A capsule shape.
    Capsule(Capsule),
    /// A box shape.
    Cuboid(Cuboid),
}

impl ProxyGeometry {
    /// Are all the dimensions of this geometry positive and finite?
    pub fn is_valid(&self) -> bool {
        match self {
            ProxyGeometry::Capsule(capsule) => {
                capsule.radius > 0.0
                    && capsule.radius.is_finite()
                    && capsule.segment.a.coords.iter().all(|x| x.is_finite())
                    && capsule.segment.b.coords.iter().all(|x| x.is_finite())
            }
            ProxyGeometry::Cuboid(cuboid) => cuboid
                .half_extents
                .iter()
                .all(|x| *x > 0.0 && x.is_finite()),
        }
    }
}

/// Errors reported by a [`ProxyBodySet`].
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ProxyBodyError {
    /// The body handle does not refer to an existing body.
    #[error("unknown proxy body")]
    UnknownBody,
    /// The shape handle does not refer to an existing shape.
    #[error("unknown proxy shape")]
    UnknownShape,
    /// The body set refused the operation.
    #[error("the proxy body set refused the operation")]
    Rejected,
}

/// The set of physics bodies used as proxies of the character controllers.
///
/// This is the boundary with the rigid-body simulator: controllers never access the
/// simulation directly. Implementations must keep handles stable for as long as the objects
/// they refer to exist.
pub trait ProxyBodySet {
    /// Creates a kinematic body with no shape at the given pose.
    fn create_kinematic_body(
        &mut self,
        pose: &Isometry<Real>,
        density: Real,
    ) -> Result<BodyHandle, ProxyBodyError>;

    /// Destroys a body together with all its shapes.
    fn destroy_body(&mut self, body: BodyHandle) -> Result<(), ProxyBodyError>;

    /// Creates a shape and attaches it to `body`.
    fn create_shape(
        &mut self,
        body: BodyHandle,
        geometry: &ProxyGeometry,
        material: MaterialHandle,
    ) -> Result<ShapeHandle, ProxyBodyError>;

    /// Detaches `shape` from `body` and destroys it.
    fn detach_shape(&mut self, body: BodyHandle, shape: ShapeHandle) -> Result<(), ProxyBodyError>;

    /// The shapes attached to `body`.
    fn shapes(&self, body: BodyHandle) -> Result<&[ShapeHandle], ProxyBodyError>;

    /// The materials of `shape`.
    fn shape_materials(&self, shape: ShapeHandle) -> Result<&[MaterialHandle], ProxyBodyError>;

    /// The geometry of `shape`.
    fn shape_geometry(&self, shape: ShapeHandle) -> Result<ProxyGeometry, ProxyBodyError>;

    /// Replaces the geometry of `shape`.
    fn set_shape_geometry(
        &mut self,
        shape: ShapeHandle,
        geometry: &ProxyGeometry,
    ) -> Result<(), ProxyBodyError>;

    /// The filter data used by the simulation to decide if `shape` generates contacts.
    fn simulation_filter_data(&self, shape: ShapeHandle) -> Result<FilterData, ProxyBodyError>;

    /// Sets the filter data used by the simulation.
    fn set_simulation_filter_data(
        &mut self,
        shape: ShapeHandle,
        data: FilterData,
    ) -> Result<(), ProxyBodyError>;

    /// The filter data used by scene queries to decide if `shape` is hit.
    fn query_filter_data(&self, shape: ShapeHandle) -> Result<FilterData, ProxyBodyError>;

    /// Sets the filter data used by scene queries.
    fn set_query_filter_data(
        &mut self,
        shape: ShapeHandle,
        data: FilterData,
    ) -> Result<(), ProxyBodyError>;

    /// The current pose of `body`.
    fn global_pose(&self, body: BodyHandle) -> Result<Isometry<Real>, ProxyBodyError>;

    /// Sets the pose `body` must reach at the end of the next simulation step.
    fn set_kinematic_target(
        &mut self,
        body: BodyHandle,
        target: &Isometry<Real>,
    ) -> Result<(), ProxyBodyError>;
}
