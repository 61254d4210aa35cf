use approx::assert_relative_eq;
use strider3d::character::{
    BodyHandle, ControllerError, ControllerManager, ControllerShapeType, FilterData,
    MaterialHandle, ProxyBodyError, ProxyBodySet, ProxyGeometry, ProxyWorld,
    RotatableController, RotatableControllerDesc, ShapeHandle,
};
use strider3d::math::{Isometry, Point, Real};

fn capsule_controller(
    manager: &ControllerManager,
    world: &mut dyn ProxyBodySet,
) -> RotatableController {
    let mut desc = RotatableControllerDesc::capsule(0.5, 1.0);
    desc.half_box_height = 0.8;
    desc.position = Point::new(0.0, 5.0, 0.0);
    desc.material = MaterialHandle(7);
    manager.create_controller(world, &desc).unwrap()
}

fn proxy_shape(world: &dyn ProxyBodySet, controller: &RotatableController) -> ShapeHandle {
    let shapes = world.shapes(controller.proxy_body().unwrap()).unwrap();
    assert_eq!(shapes.len(), 1);
    shapes[0]
}

#[test]
fn shape_type_change_keeps_the_feet_planted() {
    let manager = ControllerManager::new();
    let mut world = ProxyWorld::new();
    let mut controller = capsule_controller(&manager, &mut world);
    let old_shape = proxy_shape(&world, &controller);
    let filter = FilterData::new(0b0010, 0b0101);
    world.set_simulation_filter_data(old_shape, filter).unwrap();
    world.set_query_filter_data(old_shape, filter).unwrap();
    let foot = controller.foot_position();

    controller
        .set_shape_type(&mut world, ControllerShapeType::Obb)
        .unwrap();

    assert_eq!(controller.shape_type(), ControllerShapeType::Obb);
    assert_relative_eq!(controller.position(), Point::new(0.0, 4.8, 0.0), epsilon = 1.0e-5);
    assert_relative_eq!(controller.foot_position(), foot, epsilon = 1.0e-5);

    let new_shape = proxy_shape(&world, &controller);
    assert_ne!(new_shape, old_shape);
    assert_eq!(controller.proxy_shape(), Some(new_shape));
    assert!(world.shape(old_shape).is_none());
    assert!(manager.is_controller_shape(new_shape));
    assert!(!manager.is_controller_shape(old_shape));
    assert_eq!(world.shape_materials(new_shape).unwrap(), &[MaterialHandle(7)]);
    assert_eq!(world.simulation_filter_data(new_shape).unwrap(), filter);
    assert_eq!(world.query_filter_data(new_shape).unwrap(), filter);
    assert!(matches!(
        world.shape_geometry(new_shape).unwrap(),
        ProxyGeometry::Cuboid(_)
    ));

    // The new pose is submitted to the proxy body.
    world.step();
    let pose = world.global_pose(controller.proxy_body().unwrap()).unwrap();
    assert_relative_eq!(pose.translation.vector.y, 4.8, epsilon = 1.0e-5);

    controller
        .set_shape_type(&mut world, ControllerShapeType::Capsule)
        .unwrap();
    assert_relative_eq!(controller.position(), Point::new(0.0, 5.0, 0.0), epsilon = 1.0e-5);
}

#[test]
fn setting_the_same_shape_type_is_a_no_op() {
    let manager = ControllerManager::new();
    let mut world = ProxyWorld::new();
    let mut controller = capsule_controller(&manager, &mut world);
    let shape = proxy_shape(&world, &controller);

    for _ in 0..2 {
        controller
            .set_shape_type(&mut world, ControllerShapeType::Capsule)
            .unwrap();
        assert_eq!(proxy_shape(&world, &controller), shape);
        assert_eq!(controller.position(), Point::new(0.0, 5.0, 0.0));
    }

    controller
        .set_shape_type(&mut world, ControllerShapeType::Obb)
        .unwrap();
    let shape = proxy_shape(&world, &controller);
    controller
        .set_shape_type(&mut world, ControllerShapeType::Obb)
        .unwrap();
    assert_eq!(proxy_shape(&world, &controller), shape);
}

#[test]
fn shape_type_preconditions() {
    let manager = ControllerManager::new();
    let mut world = ProxyWorld::new();
    let mut controller = capsule_controller(&manager, &mut world);
    let body = controller.proxy_body().unwrap();
    let shape = proxy_shape(&world, &controller);

    // Two materials.
    world
        .set_shape_materials(shape, &[MaterialHandle(1), MaterialHandle(2)])
        .unwrap();
    assert_eq!(
        controller.set_shape_type(&mut world, ControllerShapeType::Obb),
        Err(ControllerError::UnexpectedMaterialCount(2))
    );
    world.set_shape_materials(shape, &[MaterialHandle(1)]).unwrap();

    // Two shapes.
    let geometry = world.shape_geometry(shape).unwrap();
    let extra = world
        .create_shape(body, &geometry, MaterialHandle(1))
        .unwrap();
    assert_eq!(
        controller.set_shape_type(&mut world, ControllerShapeType::Obb),
        Err(ControllerError::UnexpectedShapeCount(2))
    );
    world.detach_shape(body, extra).unwrap();

    // Unknown proxy body.
    let mut other_world = ProxyWorld::new();
    assert_eq!(
        controller.set_shape_type(&mut other_world, ControllerShapeType::Obb),
        Err(ControllerError::MissingProxyBody)
    );

    assert_eq!(controller.shape_type(), ControllerShapeType::Capsule);
    assert_eq!(controller.position(), Point::new(0.0, 5.0, 0.0));
    assert_eq!(proxy_shape(&world, &controller), shape);
}

#[test]
fn shape_creation_failure_changes_nothing() {
    let manager = ControllerManager::new();
    let mut world = ProxyWorld::new();
    let mut controller = capsule_controller(&manager, &mut world);
    let shape = proxy_shape(&world, &controller);

    // Accepted since the proxy is still a capsule.
    controller.set_half_box_height(&mut world, -1.0).unwrap();
    assert_eq!(
        controller.set_shape_type(&mut world, ControllerShapeType::Obb),
        Err(ControllerError::ShapeCreationFailed)
    );

    assert_eq!(controller.shape_type(), ControllerShapeType::Capsule);
    assert_eq!(controller.position(), Point::new(0.0, 5.0, 0.0));
    assert_eq!(proxy_shape(&world, &controller), shape);
    assert!(manager.is_controller_shape(shape));
    assert_eq!(manager.num_controller_shapes(), 1);
}

/// A body set that refuses some operations.
#[derive(Default)]
struct FaultyWorld {
    world: ProxyWorld,
    refuse_query_filters: bool,
    pinned_shape: Option<ShapeHandle>,
}

impl ProxyBodySet for FaultyWorld {
    fn create_kinematic_body(
        &mut self,
        pose: &Isometry<Real>,
        density: Real,
    ) -> Result<BodyHandle, ProxyBodyError> {
        self.world.create_kinematic_body(pose, density)
    }

    fn destroy_body(&mut self, body: BodyHandle) -> Result<(), ProxyBodyError> {
        self.world.destroy_body(body)
    }

    fn create_shape(
        &mut self,
        body: BodyHandle,
        geometry: &ProxyGeometry,
        material: MaterialHandle,
    ) -> Result<ShapeHandle, ProxyBodyError> {
        self.world.create_shape(body, geometry, material)
    }

    fn detach_shape(&mut self, body: BodyHandle, shape: ShapeHandle) -> Result<(), ProxyBodyError> {
        if self.pinned_shape == Some(shape) {
            return Err(ProxyBodyError::Rejected);
        }
        self.world.detach_shape(body, shape)
    }

    fn shapes(&self, body: BodyHandle) -> Result<&[ShapeHandle], ProxyBodyError> {
        self.world.shapes(body)
    }

    fn shape_materials(&self, shape: ShapeHandle) -> Result<&[MaterialHandle], ProxyBodyError> {
        self.world.shape_materials(shape)
    }

    fn shape_geometry(&self, shape: ShapeHandle) -> Result<ProxyGeometry, ProxyBodyError> {
        self.world.shape_geometry(shape)
    }

    fn set_shape_geometry(
        &mut self,
        shape: ShapeHandle,
        geometry: &ProxyGeometry,
    ) -> Result<(), ProxyBodyError> {
        self.world.set_shape_geometry(shape, geometry)
    }

    fn simulation_filter_data(&self, shape: ShapeHandle) -> Result<FilterData, ProxyBodyError> {
        self.world.simulation_filter_data(shape)
    }

    fn set_simulation_filter_data(
        &mut self,
        shape: ShapeHandle,
        data: FilterData,
    ) -> Result<(), ProxyBodyError> {
        self.world.set_simulation_filter_data(shape, data)
    }

    fn query_filter_data(&self, shape: ShapeHandle) -> Result<FilterData, ProxyBodyError> {
        self.world.query_filter_data(shape)
    }

    fn set_query_filter_data(
        &mut self,
        shape: ShapeHandle,
        data: FilterData,
    ) -> Result<(), ProxyBodyError> {
        if self.refuse_query_filters {
            return Err(ProxyBodyError::Rejected);
        }
        self.world.set_query_filter_data(shape, data)
    }

    fn global_pose(&self, body: BodyHandle) -> Result<Isometry<Real>, ProxyBodyError> {
        self.world.global_pose(body)
    }

    fn set_kinematic_target(
        &mut self,
        body: BodyHandle,
        target: &Isometry<Real>,
    ) -> Result<(), ProxyBodyError> {
        self.world.set_kinematic_target(body, target)
    }
}

#[test]
fn filter_copy_failure_removes_the_new_shape() {
    let manager = ControllerManager::new();
    let mut world = FaultyWorld::default();
    let mut controller = capsule_controller(&manager, &mut world);
    let shape = proxy_shape(&world, &controller);
    world.refuse_query_filters = true;

    assert_eq!(
        controller.set_shape_type(&mut world, ControllerShapeType::Obb),
        Err(ControllerError::FilterCopyFailed)
    );

    assert_eq!(controller.shape_type(), ControllerShapeType::Capsule);
    assert_eq!(controller.position(), Point::new(0.0, 5.0, 0.0));
    assert_eq!(proxy_shape(&world, &controller), shape);
    assert_eq!(world.world.num_shapes(), 1);
    assert!(manager.is_controller_shape(shape));
}

#[test]
fn detach_failure_removes_the_new_shape() {
    let manager = ControllerManager::new();
    let mut world = FaultyWorld::default();
    let mut controller = capsule_controller(&manager, &mut world);
    let shape = proxy_shape(&world, &controller);
    world.pinned_shape = Some(shape);

    assert_eq!(
        controller.set_shape_type(&mut world, ControllerShapeType::Obb),
        Err(ControllerError::ShapeDetachFailed)
    );

    assert_eq!(controller.shape_type(), ControllerShapeType::Capsule);
    assert_eq!(controller.position(), Point::new(0.0, 5.0, 0.0));
    assert_eq!(controller.proxy_shape(), Some(shape));
    assert_eq!(proxy_shape(&world, &controller), shape);
    assert_eq!(world.world.num_shapes(), 1);
    assert!(manager.is_controller_shape(shape));
    assert_eq!(manager.num_controller_shapes(), 1);

    // Later geometry updates still target the shape of the controller.
    controller.set_radius(&mut world, 1.0).unwrap();
    let ProxyGeometry::Capsule(capsule) = world.shape_geometry(shape).unwrap() else {
        panic!("The proxy of a capsule controller must be a capsule.");
    };
    assert_relative_eq!(capsule.radius, 0.8, epsilon = 1.0e-6);

    world.pinned_shape = None;
    controller
        .set_shape_type(&mut world, ControllerShapeType::Obb)
        .unwrap();
    assert_eq!(controller.proxy_shape(), Some(proxy_shape(&world, &controller)));
    assert!(!manager.is_controller_shape(shape));
}

#[test]
fn invalid_climbing_modes_are_rejected() {
    let manager = ControllerManager::new();
    let mut world = ProxyWorld::new();
    let mut controller = capsule_controller(&manager, &mut world);

    controller.set_climbing_mode_raw(1).unwrap();
    assert_eq!(
        controller.set_climbing_mode_raw(2),
        Err(ControllerError::InvalidClimbingMode(2))
    );
    assert_eq!(
        controller.climbing_mode(),
        strider3d::character::ClimbingMode::Constrained
    );
}
