use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use strider3d::bounding_volume::Aabb;
use strider3d::character::{ControllerManager, ProxyWorld, RotatableControllerDesc};
use strider3d::math::{Point, Vector};
use strider3d::shape::Cylinder;

fn fill_cache(controller: &mut strider3d::character::RotatableController) {
    let obstacle = Cylinder::new(Point::origin(), Point::new(0.0, 1.0, 0.0), 0.5);
    controller.with_sweep_test_cache(|cache| {
        cache.store(
            Aabb::from_half_extents(Point::origin(), Vector::repeat(5.0)),
            [obstacle],
        )
    });
}

#[test]
fn invalidate_cache_without_locking() {
    let manager = ControllerManager::new();
    let mut world = ProxyWorld::new();
    let mut controller = manager
        .create_controller(&mut world, &RotatableControllerDesc::capsule(0.5, 1.0))
        .unwrap();

    fill_cache(&mut controller);
    assert!(!controller.sweep_test_cache().is_empty());
    assert!(manager.lock_caches().is_none());

    controller.invalidate_cache();
    assert!(controller.sweep_test_cache().is_empty());
}

#[test]
fn invalidate_cache_waits_for_the_manager_lock() {
    let manager = ControllerManager::new();
    manager.set_locking_enabled(true);
    let mut world = ProxyWorld::new();
    let mut controller = manager
        .create_controller(&mut world, &RotatableControllerDesc::capsule(0.5, 1.0))
        .unwrap();
    fill_cache(&mut controller);

    let guard = manager.lock_caches().expect("Locking is enabled.");
    let cleared = Arc::new(AtomicBool::new(false));
    let cleared2 = cleared.clone();

    let handle = thread::spawn(move || {
        controller.invalidate_cache();
        cleared2.store(true, Ordering::SeqCst);
        controller
    });

    thread::sleep(Duration::from_millis(50));
    assert!(!cleared.load(Ordering::SeqCst));

    drop(guard);
    let controller = handle.join().unwrap();
    assert!(cleared.load(Ordering::SeqCst));
    assert!(controller.sweep_test_cache().is_empty());
}
