use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hashbrown::HashSet;
use parking_lot::{Mutex, MutexGuard};

use crate::character::{
    ControllerError, ProxyBodySet, RotatableController, RotatableControllerDesc, ShapeHandle,
};

#[derive(Debug, Default)]
struct ManagerShared {
    locking_enabled: AtomicBool,
    cache_lock: Mutex<()>,
    shapes: Mutex<HashSet<ShapeHandle>>,
}

/// Owns the state shared by all the controllers it creates.
///
/// Cloning a manager is cheap: clones share the same state. The manager tracks the proxy
/// shapes of its controllers so the sweep driver can ignore them, and provides the lock
/// serializing accesses to the sweep test caches when locking is enabled.
#[derive(Clone, Debug, Default)]
pub struct ControllerManager {
    shared: Arc<ManagerShared>,
}

impl ControllerManager {
    /// Creates a manager with locking disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a controller managed by `self`.
    pub fn create_controller(
        &self,
        backend: &mut dyn ProxyBodySet,
        desc: &RotatableControllerDesc,
    ) -> Result<RotatableController, ControllerError> {
        RotatableController::new(self, backend, desc)
    }

    /// Enables or disables locking of the sweep test caches.
    ///
    /// Locking must be enabled if controllers of this manager are used from several threads.
    pub fn set_locking_enabled(&self, enabled: bool) {
        self.shared.locking_enabled.store(enabled, Ordering::Release);
    }

    /// Is locking of the sweep test caches enabled?
    pub fn locking_enabled(&self) -> bool {
        self.shared.locking_enabled.load(Ordering::Acquire)
    }

    /// Acquires the lock of the sweep test caches, if locking is enabled.
    ///
    /// No controller can invalidate its cache while the returned guard is alive.
    pub fn lock_caches(&self) -> Option<MutexGuard<'_, ()>> {
        self.locking_enabled().then(|| self.shared.cache_lock.lock())
    }

    /// Is `shape` the proxy shape of a controller of this manager?
    pub fn is_controller_shape(&self, shape: ShapeHandle) -> bool {
        self.shared.shapes.lock().contains(&shape)
    }

    /// The number of proxy shapes registered to this manager.
    pub fn num_controller_shapes(&self) -> usize {
        self.shared.shapes.lock().len()
    }

    pub(crate) fn register_shape(&self, shape: ShapeHandle) {
        let _ = self.shared.shapes.lock().insert(shape);
    }

    pub(crate) fn unregister_shape(&self, shape: ShapeHandle) {
        let _ = self.shared.shapes.lock().remove(&shape);
    }

    pub(crate) fn replace_shape(&self, old: ShapeHandle, new: ShapeHandle) {
        let mut shapes = self.shared.shapes.lock();
        let _ = shapes.remove(&old);
        let _ = shapes.insert(new);
    }
}
