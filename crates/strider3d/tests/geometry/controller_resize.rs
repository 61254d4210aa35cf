use approx::assert_relative_eq;
use strider3d::character::{
    ControllerError, ControllerManager, ProxyBodySet, ProxyGeometry, ProxyWorld,
    RotatableControllerDesc,
};
use strider3d::math::{Point, Vector};

#[test]
fn resize_keeps_the_base_in_place() {
    let manager = ControllerManager::new();
    let mut world = ProxyWorld::new();
    let mut desc = RotatableControllerDesc::capsule(0.5, 1.0);
    desc.position = Point::new(1.0, 5.0, -2.0);
    let mut controller = manager.create_controller(&mut world, &desc).unwrap();
    let foot = controller.foot_position();

    controller.resize(&mut world, 2.5).unwrap();
    assert_eq!(controller.height(), 2.5);
    assert_relative_eq!(controller.position(), Point::new(1.0, 5.75, -2.0), epsilon = 1.0e-5);
    assert_relative_eq!(controller.foot_position(), foot, epsilon = 1.0e-5);

    let body = controller.proxy_body().unwrap();
    let shape = world.shapes(body).unwrap()[0];
    let ProxyGeometry::Capsule(proxy) = world.shape_geometry(shape).unwrap() else {
        panic!("Unexpected proxy geometry.");
    };
    assert_relative_eq!(proxy.height(), 2.5 * 0.8, epsilon = 1.0e-5);

    controller.resize(&mut world, 1.0).unwrap();
    assert_eq!(controller.height(), 1.0);
    assert_relative_eq!(controller.position(), desc.position, epsilon = 1.0e-5);
}

#[test]
fn resize_ignores_boxes() {
    let manager = ControllerManager::new();
    let mut world = ProxyWorld::new();
    let mut desc = RotatableControllerDesc::obb(1.0, 0.5, 0.3);
    desc.height = 1.0;
    let mut controller = manager.create_controller(&mut world, &desc).unwrap();

    controller.resize(&mut world, 3.0).unwrap();
    assert_eq!(controller.height(), 1.0);
    assert_eq!(controller.position(), desc.position);
}

#[test]
fn refused_geometry_is_still_stored() {
    let manager = ControllerManager::new();
    let mut world = ProxyWorld::new();
    let mut controller = manager
        .create_controller(&mut world, &RotatableControllerDesc::capsule(0.5, 1.0))
        .unwrap();

    assert_eq!(
        controller.set_radius(&mut world, -1.0),
        Err(ControllerError::GeometryRejected)
    );
    assert_eq!(controller.radius(), -1.0);

    controller.set_radius(&mut world, 0.25).unwrap();
    let body = controller.proxy_body().unwrap();
    let shape = world.shapes(body).unwrap()[0];
    let ProxyGeometry::Capsule(proxy) = world.shape_geometry(shape).unwrap() else {
        panic!("Unexpected proxy geometry.");
    };
    assert_relative_eq!(proxy.radius, 0.2, epsilon = 1.0e-6);

    // Box dimensions are stored but don't affect the capsule proxy.
    controller.set_half_side_extent(&mut world, 2.0).unwrap();
    assert_eq!(controller.half_side_extent(), 2.0);
    assert_relative_eq!(controller.world_aabb().half_extents(), Vector::new(0.25, 0.75, 0.25));
}
