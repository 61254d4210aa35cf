use approx::assert_relative_eq;
use strider3d::character::{
    ControllerManager, ProxyBodySet, ProxyGeometry, ProxyWorld, RotatableControllerDesc,
};
use strider3d::math::{Point, Real, Vector};
use strider3d::na::RealField;

fn lateral_half_extents(s: Real, f: Real, angle: Real) -> (Real, Real) {
    let (sin, cos) = angle.sin_cos();
    (
        (s * cos + f * sin).abs().max((s * cos - f * sin).abs()),
        (s * sin + f * cos).abs().max((s * sin - f * cos).abs()),
    )
}

#[test]
fn box_world_aabb_without_rotation() {
    let manager = ControllerManager::new();
    let mut world = ProxyWorld::new();
    let mut desc = RotatableControllerDesc::obb(1.0, 0.5, 0.3);
    desc.position = Point::new(2.0, 1.0, 0.0);
    let controller = manager.create_controller(&mut world, &desc).unwrap();

    let aabb = controller.world_aabb();
    assert_relative_eq!(aabb.center(), desc.position, epsilon = 1.0e-6);
    assert_relative_eq!(aabb.half_extents(), Vector::new(0.5, 1.0, 0.3), epsilon = 1.0e-6);
}

#[test]
fn world_box_is_not_scaled_like_the_proxy() {
    let manager = ControllerManager::new();
    let mut world = ProxyWorld::new();
    let desc = RotatableControllerDesc::obb(1.0, 0.5, 0.3);
    let controller = manager.create_controller(&mut world, &desc).unwrap();

    let (pose, cuboid) = controller.obb().expect("The controller is a box.");
    assert_relative_eq!(cuboid.half_extents, Vector::new(0.5, 1.0, 0.3), epsilon = 1.0e-6);
    assert_relative_eq!(pose.translation.vector, desc.position.coords, epsilon = 1.0e-6);
    assert!(controller.capsule().is_none());

    let shape = controller.proxy_shape().unwrap();
    let ProxyGeometry::Cuboid(proxy) = world.shape_geometry(shape).unwrap() else {
        panic!("The proxy of a box controller must be a cuboid.");
    };
    assert_relative_eq!(
        proxy.half_extents,
        cuboid.half_extents * desc.proxy_scale_coeff,
        epsilon = 1.0e-6
    );
}

#[test]
fn box_world_aabb_is_tight() {
    let manager = ControllerManager::new();
    let mut world = ProxyWorld::new();
    let desc = RotatableControllerDesc::obb(1.0, 0.5, 0.3);
    let mut controller = manager.create_controller(&mut world, &desc).unwrap();

    let mut rng = oorandom::Rand32::new(42);
    let angles = [Real::frac_pi_2(), Real::frac_pi_4(), -Real::pi() * 0.75];
    let random_angles = (0..100).map(|_| (rng.rand_float() * 2.0 - 1.0) * 10.0);

    for angle in angles.into_iter().chain(random_angles) {
        controller.set_orientation(&mut world, angle);
        let (x, z) = lateral_half_extents(0.5, 0.3, controller.orientation());
        let half_extents = controller.world_aabb().half_extents();

        assert_relative_eq!(half_extents, Vector::new(x, 1.0, z), epsilon = 1.0e-5);
    }
}

#[test]
fn capsule_world_aabb() {
    let manager = ControllerManager::new();
    let mut world = ProxyWorld::new();
    let mut desc = RotatableControllerDesc::capsule(0.5, 1.0);
    desc.position = Point::new(0.0, 5.0, 0.0);
    let mut controller = manager.create_controller(&mut world, &desc).unwrap();

    let aabb = controller.world_aabb();
    assert_relative_eq!(aabb.mins, Point::new(-0.5, 4.0, -0.5), epsilon = 1.0e-6);
    assert_relative_eq!(aabb.maxs, Point::new(0.5, 6.0, 0.5), epsilon = 1.0e-6);

    // Capsules are symmetric around the up direction.
    controller.set_orientation(&mut world, 1.0);
    assert_eq!(controller.world_aabb(), aabb);

    controller.set_up_direction(&mut world, Vector::x_axis());
    let aabb = controller.world_aabb();
    assert_relative_eq!(aabb.half_extents(), Vector::new(1.0, 0.5, 0.5), epsilon = 1.0e-6);
}
