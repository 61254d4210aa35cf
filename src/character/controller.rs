use num::FromPrimitive;

use crate::bounding_volume::Aabb;
use crate::character::{
    BodyHandle, ClimbingMode, ControllerError, ControllerManager, ControllerShapeType,
    ProxyBodyError, ProxyBodySet, ProxyGeometry, RotatableControllerDesc, ShapeHandle,
    SweepTestCache, SweptVolume,
};
use crate::math::{Isometry, Point, Real, Rotation, UnitVector, Vector};
use crate::shape::{Capsule, Cuboid};
use crate::utils;

/// A character controller backed by either a capsule or a box that can rotate around the up
/// direction.
///
/// The controller owns a kinematic proxy body, created through a [`ProxyBodySet`], that
/// represents it in the simulation. Every change of position, orientation or dimensions is
/// pushed to that body. The proxy body is scaled down by the proxy scale coefficient of the
/// descriptor so that it doesn't prevent the controller from moving.
///
/// The proxy body uses its local `y` axis as its up axis. For boxes, the local `x` axis is
/// the side axis and the local `z` axis is the forward axis.
#[derive(Debug)]
pub struct RotatableController {
    manager: ControllerManager,
    proxy: Option<(BodyHandle, ShapeHandle)>,
    shape_type: ControllerShapeType,
    orientation: Real,
    radius: Real,
    height: Real,
    half_box_height: Real,
    half_side_extent: Real,
    half_forward_extent: Real,
    climbing_mode: ClimbingMode,
    position: Point<Real>,
    up_direction: UnitVector<Real>,
    rotation_from_up: Rotation<Real>,
    contact_offset: Real,
    step_offset: Real,
    slope_limit: Real,
    proxy_scale_coeff: Real,
    proxy_density: Real,
    cache: SweepTestCache,
}

impl RotatableController {
    /// Creates a controller and its proxy body.
    pub fn new(
        manager: &ControllerManager,
        backend: &mut dyn ProxyBodySet,
        desc: &RotatableControllerDesc,
    ) -> Result<Self, ControllerError> {
        if !desc.is_valid() {
            return Err(ControllerError::InvalidDescriptor);
        }

        let mut controller = Self {
            manager: manager.clone(),
            proxy: None,
            shape_type: desc.shape_type,
            orientation: utils::wrap_angle(desc.orientation),
            radius: desc.radius,
            height: desc.height,
            half_box_height: desc.half_box_height,
            half_side_extent: desc.half_side_extent,
            half_forward_extent: desc.half_forward_extent,
            climbing_mode: desc.climbing_mode,
            position: desc.position,
            up_direction: desc.up_direction,
            rotation_from_up: utils::shortest_rotation(&Vector::y_axis(), &desc.up_direction),
            contact_offset: desc.contact_offset,
            step_offset: desc.step_offset,
            slope_limit: desc.slope_limit,
            proxy_scale_coeff: desc.proxy_scale_coeff,
            proxy_density: desc.proxy_density,
            cache: SweepTestCache::new(),
        };

        let body = backend
            .create_kinematic_body(&controller.proxy_pose(), controller.proxy_density)
            .map_err(|err| {
                log::warn!("Failed to create the controller proxy body: {}", err);
                ControllerError::ProxyCreationFailed
            })?;

        let geometry = controller.proxy_geometry(controller.shape_type);
        let shape = match backend.create_shape(body, &geometry, desc.material) {
            Ok(shape) => shape,
            Err(err) => {
                log::warn!("Failed to create the controller proxy shape: {}", err);
                if let Err(err) = backend.destroy_body(body) {
                    log::warn!("Failed to destroy the controller proxy body: {}", err);
                }
                return Err(ControllerError::ProxyCreationFailed);
            }
        };

        manager.register_shape(shape);
        controller.proxy = Some((body, shape));
        Ok(controller)
    }

    /// Destroys the proxy body of this controller.
    pub fn release(mut self, backend: &mut dyn ProxyBodySet) {
        let Some((body, shape)) = self.proxy.take() else {
            return;
        };

        self.manager.unregister_shape(shape);
        if let Err(err) = backend.destroy_body(body) {
            log::warn!("Failed to destroy the controller proxy body: {}", err);
        }
    }

    /// The manager of this controller.
    pub fn manager(&self) -> &ControllerManager {
        &self.manager
    }

    /// The proxy body of this controller.
    pub fn proxy_body(&self) -> Option<BodyHandle> {
        self.proxy.map(|(body, _)| body)
    }

    /// The shape attached to the proxy body of this controller.
    pub fn proxy_shape(&self) -> Option<ShapeHandle> {
        self.proxy.map(|(_, shape)| shape)
    }

    /// The kind of volume of this controller.
    pub fn shape_type(&self) -> ControllerShapeType {
        self.shape_type
    }

    /// The position of the center of the controller volume.
    pub fn position(&self) -> Point<Real> {
        self.position
    }

    /// The rotation of this controller around its up direction, in `(-π, π]`.
    pub fn orientation(&self) -> Real {
        self.orientation
    }

    /// The radius of the capsule.
    pub fn radius(&self) -> Real {
        self.radius
    }

    /// The height of the capsule, excluding its caps.
    pub fn height(&self) -> Real {
        self.height
    }

    /// The half-extent of the box along the up direction.
    pub fn half_box_height(&self) -> Real {
        self.half_box_height
    }

    /// The half-extent of the box along its side axis.
    pub fn half_side_extent(&self) -> Real {
        self.half_side_extent
    }

    /// The half-extent of the box along its forward axis.
    pub fn half_forward_extent(&self) -> Real {
        self.half_forward_extent
    }

    /// The climbing mode of this controller.
    pub fn climbing_mode(&self) -> ClimbingMode {
        self.climbing_mode
    }

    /// The up direction of this controller.
    pub fn up_direction(&self) -> UnitVector<Real> {
        self.up_direction
    }

    /// The skin width around the controller volume.
    pub fn contact_offset(&self) -> Real {
        self.contact_offset
    }

    /// The maximum obstacle height this controller can climb.
    pub fn step_offset(&self) -> Real {
        self.step_offset
    }

    /// The cosine of the maximum slope this controller can walk on.
    pub fn slope_limit(&self) -> Real {
        self.slope_limit
    }

    /// The distance between the center of the volume and its bottom, without the contact offset.
    pub fn half_height(&self) -> Real {
        self.half_height_of(self.shape_type)
    }

    fn half_height_of(&self, shape_type: ControllerShapeType) -> Real {
        match shape_type {
            ControllerShapeType::Capsule => self.radius + self.height * 0.5,
            ControllerShapeType::Obb => self.half_box_height,
        }
    }

    /// Moves the center of this controller.
    ///
    /// The new pose of the proxy body is submitted as its kinematic target.
    pub fn set_position(&mut self, backend: &mut dyn ProxyBodySet, position: Point<Real>) {
        self.position = position;
        self.push_pose(backend);
    }

    /// Sets the rotation of this controller around its up direction.
    ///
    /// The angle is wrapped to `(-π, π]`. Capsules are symmetric around the up direction so
    /// their proxy body is left untouched.
    pub fn set_orientation(&mut self, backend: &mut dyn ProxyBodySet, orientation: Real) {
        self.orientation = utils::wrap_angle(orientation);

        if self.shape_type == ControllerShapeType::Obb {
            self.push_pose(backend);
        }
    }

    /// Sets the up direction of this controller.
    pub fn set_up_direction(&mut self, backend: &mut dyn ProxyBodySet, up: UnitVector<Real>) {
        if up == self.up_direction {
            return;
        }

        self.up_direction = up;
        self.rotation_from_up = utils::shortest_rotation(&Vector::y_axis(), &up);
        self.push_pose(backend);
    }

    /// Sets the skin width. Non-positive values are ignored.
    pub fn set_contact_offset(&mut self, offset: Real) {
        if offset > 0.0 {
            self.contact_offset = offset;
        }
    }

    /// Sets the maximum obstacle height this controller can climb. Non-positive values are
    /// ignored.
    pub fn set_step_offset(&mut self, offset: Real) {
        if offset > 0.0 {
            self.step_offset = offset;
        }
    }

    /// Sets the cosine of the maximum walkable slope. Non-positive values are ignored.
    pub fn set_slope_limit(&mut self, slope_limit: Real) {
        if slope_limit > 0.0 {
            self.slope_limit = slope_limit;
        }
    }

    /// Sets the radius of the capsule.
    ///
    /// The value is stored even if the proxy body refuses the resulting geometry.
    pub fn set_radius(
        &mut self,
        backend: &mut dyn ProxyBodySet,
        radius: Real,
    ) -> Result<(), ControllerError> {
        self.radius = radius;
        self.update_kinematic_proxy(backend)
    }

    /// Sets the height of the capsule.
    ///
    /// The value is stored even if the proxy body refuses the resulting geometry.
    pub fn set_height(
        &mut self,
        backend: &mut dyn ProxyBodySet,
        height: Real,
    ) -> Result<(), ControllerError> {
        self.height = height;
        self.update_kinematic_proxy(backend)
    }

    /// Sets the half-extent of the box along the up direction.
    pub fn set_half_box_height(
        &mut self,
        backend: &mut dyn ProxyBodySet,
        half_height: Real,
    ) -> Result<(), ControllerError> {
        self.half_box_height = half_height;
        self.update_kinematic_proxy(backend)
    }

    /// Sets the half-extent of the box along its side axis.
    pub fn set_half_side_extent(
        &mut self,
        backend: &mut dyn ProxyBodySet,
        half_extent: Real,
    ) -> Result<(), ControllerError> {
        self.half_side_extent = half_extent;
        self.update_kinematic_proxy(backend)
    }

    /// Sets the half-extent of the box along its forward axis.
    pub fn set_half_forward_extent(
        &mut self,
        backend: &mut dyn ProxyBodySet,
        half_extent: Real,
    ) -> Result<(), ControllerError> {
        self.half_forward_extent = half_extent;
        self.update_kinematic_proxy(backend)
    }

    /// Sets the climbing mode of this controller.
    pub fn set_climbing_mode(&mut self, mode: ClimbingMode) {
        self.climbing_mode = mode;
    }

    /// Sets the climbing mode of this controller from its raw value.
    pub fn set_climbing_mode_raw(&mut self, mode: u32) -> Result<(), ControllerError> {
        self.climbing_mode =
            ClimbingMode::from_u32(mode).ok_or(ControllerError::InvalidClimbingMode(mode))?;
        Ok(())
    }

    /// Changes the kind of volume of this controller.
    ///
    /// The shape of the proxy body is replaced by a new one with the same material and filter
    /// data. The center of the controller is moved along the up direction so that its bottom
    /// stays at the same place. On error, neither the controller nor its proxy body are
    /// modified.
    pub fn set_shape_type(
        &mut self,
        backend: &mut dyn ProxyBodySet,
        shape_type: ControllerShapeType,
    ) -> Result<(), ControllerError> {
        if shape_type == self.shape_type {
            return Ok(());
        }

        let (body, old_shape) = self.proxy.ok_or(ControllerError::MissingProxyBody)?;
        match backend.shapes(body) {
            Ok([_]) => {}
            Ok(shapes) => return Err(ControllerError::UnexpectedShapeCount(shapes.len())),
            Err(_) => return Err(ControllerError::MissingProxyBody),
        }
        let material = match backend.shape_materials(old_shape) {
            Ok([material]) => *material,
            Ok(materials) => {
                return Err(ControllerError::UnexpectedMaterialCount(materials.len()))
            }
            Err(_) => return Err(ControllerError::UnexpectedMaterialCount(0)),
        };

        let new_shape = backend
            .create_shape(body, &self.proxy_geometry(shape_type), material)
            .map_err(|err| {
                log::warn!("Failed to create the {:?} proxy shape: {}", shape_type, err);
                ControllerError::ShapeCreationFailed
            })?;

        if let Err(err) = copy_filter_data(backend, old_shape, new_shape) {
            log::warn!("Failed to copy the proxy shape filter data: {}", err);
            discard_shape(backend, body, new_shape);
            return Err(ControllerError::FilterCopyFailed);
        }

        if let Err(err) = backend.detach_shape(body, old_shape) {
            log::warn!("Failed to detach the previous proxy shape: {}", err);
            discard_shape(backend, body, new_shape);
            return Err(ControllerError::ShapeDetachFailed);
        }

        // Commit.
        self.manager.replace_shape(old_shape, new_shape);
        self.proxy = Some((body, new_shape));

        // Keep the bottom of the volume in place.
        let shift = self.half_height_of(shape_type) - self.half_height_of(self.shape_type);
        self.position += *self.up_direction * shift;

        log::debug!(
            "Controller shape changed from {:?} to {:?}.",
            self.shape_type,
            shape_type
        );
        self.shape_type = shape_type;
        self.push_pose(backend);

        Ok(())
    }

    /// The position of the bottom of this controller, including its contact offset.
    pub fn foot_position(&self) -> Point<Real> {
        self.position - *self.up_direction * self.center_to_foot()
    }

    /// Moves this controller so that its bottom, including the contact offset, is at `position`.
    pub fn set_foot_position(&mut self, backend: &mut dyn ProxyBodySet, position: Point<Real>) {
        let center = position + *self.up_direction * self.center_to_foot();
        self.set_position(backend, center);
    }

    fn center_to_foot(&self) -> Real {
        self.half_height() + self.contact_offset
    }

    /// The world-space capsule of this controller, if its volume is a capsule.
    pub fn capsule(&self) -> Option<Capsule> {
        (self.shape_type == ControllerShapeType::Capsule).then(|| self.world_capsule())
    }

    /// The world-space box of this controller, if its volume is a box.
    ///
    /// Like [`Self::capsule`], this is the controller volume itself: the half-extents are not
    /// scaled by the proxy scale coefficient.
    pub fn obb(&self) -> Option<(Isometry<Real>, Cuboid)> {
        (self.shape_type == ControllerShapeType::Obb).then(|| self.world_obb())
    }

    fn world_capsule(&self) -> Capsule {
        let half_segment = *self.up_direction * (self.height * 0.5);
        Capsule::new(
            self.position - half_segment,
            self.position + half_segment,
            self.radius,
        )
    }

    fn world_obb(&self) -> (Isometry<Real>, Cuboid) {
        let half_extents = Vector::new(
            self.half_side_extent,
            self.half_box_height,
            self.half_forward_extent,
        );
        (self.proxy_pose(), Cuboid::new(half_extents))
    }

    /// The world-space AABB of the volume of this controller.
    ///
    /// For boxes, this is the tight AABB of the box rotated by the controller orientation.
    pub fn world_aabb(&self) -> Aabb {
        match self.shape_type {
            ControllerShapeType::Capsule => self.world_capsule().local_aabb(),
            ControllerShapeType::Obb => {
                let (pose, cuboid) = self.world_obb();
                cuboid.aabb(&pose)
            }
        }
    }

    /// The volume swept by this controller, as seen by the sweep driver.
    pub fn swept_volume(&self) -> SweptVolume {
        match self.shape_type {
            ControllerShapeType::Capsule => SweptVolume::capsule(self.radius, self.height),
            ControllerShapeType::Obb => SweptVolume::obb(
                self.half_box_height,
                self.half_side_extent,
                self.half_forward_extent,
            ),
        }
    }

    /// Changes the height of a capsule controller while keeping its bottom in place.
    ///
    /// This does nothing for box controllers.
    pub fn resize(
        &mut self,
        backend: &mut dyn ProxyBodySet,
        height: Real,
    ) -> Result<(), ControllerError> {
        if self.shape_type != ControllerShapeType::Capsule {
            return Ok(());
        }

        let delta = height - self.height;
        let result = self.set_height(backend, height);
        let position = self.position + *self.up_direction * (delta * 0.5);
        self.set_position(backend, position);
        result
    }

    /// The cache of obstacles gathered around this controller.
    ///
    /// The cache belongs to this controller, so reading it never takes the manager lock.
    pub fn sweep_test_cache(&self) -> &SweepTestCache {
        &self.cache
    }

    /// Mutable access to the cache of obstacles gathered around this controller.
    ///
    /// If the manager enables locking, the cache lock is held while `f` runs. The lock only
    /// serializes `f` with the holders of [`ControllerManager::lock_caches`], e.g. a sweep
    /// driver reading the caches of several controllers through shared references.
    pub fn with_sweep_test_cache<T>(&mut self, f: impl FnOnce(&mut SweepTestCache) -> T) -> T {
        let _guard = self.manager.lock_caches();
        f(&mut self.cache)
    }

    /// Discards the obstacles cached around this controller.
    ///
    /// If the manager enables locking, the cache lock is held during the clear.
    pub fn invalidate_cache(&mut self) {
        self.with_sweep_test_cache(|cache| cache.clear())
    }

    fn proxy_pose(&self) -> Isometry<Real> {
        let rotation = match self.shape_type {
            ControllerShapeType::Capsule => self.rotation_from_up,
            ControllerShapeType::Obb => {
                Rotation::from_axis_angle(&self.up_direction, self.orientation)
                    * self.rotation_from_up
            }
        };

        Isometry::from_parts(self.position.coords.into(), rotation)
    }

    fn proxy_geometry(&self, shape_type: ControllerShapeType) -> ProxyGeometry {
        let k = self.proxy_scale_coeff;

        match shape_type {
            ControllerShapeType::Capsule => {
                ProxyGeometry::Capsule(Capsule::new_y(0.5 * self.height * k, self.radius * k))
            }
            ControllerShapeType::Obb => ProxyGeometry::Cuboid(Cuboid::new(
                Vector::new(
                    self.half_side_extent,
                    self.half_box_height,
                    self.half_forward_extent,
                ) * k,
            )),
        }
    }

    fn push_pose(&self, backend: &mut dyn ProxyBodySet) {
        if let Some((body, _)) = self.proxy {
            if let Err(err) = backend.set_kinematic_target(body, &self.proxy_pose()) {
                log::warn!("Failed to set the controller kinematic target: {}", err);
            }
        }
    }

    fn update_kinematic_proxy(
        &self,
        backend: &mut dyn ProxyBodySet,
    ) -> Result<(), ControllerError> {
        let Some((_, shape)) = self.proxy else {
            return Ok(());
        };

        backend
            .set_shape_geometry(shape, &self.proxy_geometry(self.shape_type))
            .map_err(|err| {
                log::warn!("The proxy body refused the controller geometry: {}", err);
                ControllerError::GeometryRejected
            })
    }
}

fn discard_shape(backend: &mut dyn ProxyBodySet, body: BodyHandle, shape: ShapeHandle) {
    if let Err(err) = backend.detach_shape(body, shape) {
        log::warn!("Failed to discard the replacement proxy shape: {}", err);
    }
}

fn copy_filter_data(
    backend: &mut dyn ProxyBodySet,
    from: ShapeHandle,
    to: ShapeHandle,
) -> Result<(), ProxyBodyError> {
    let simulation = backend.simulation_filter_data(from)?;
    let query = backend.query_filter_data(from)?;
    backend.set_simulation_filter_data(to, simulation)?;
    backend.set_query_filter_data(to, query)
}
