//! Shape synchronization of kinematic character controllers.
//!
//! A [`RotatableController`] is a character whose volume is either a capsule or a box
//! rotating around the up direction. It keeps a kinematic proxy body, created through the
//! [`ProxyBodySet`] interface, in sync with its position, orientation and dimensions.
//! Controllers are created by a [`ControllerManager`] which tracks their proxy shapes and
//! owns the lock protecting their sweep test caches.

pub use self::controller::RotatableController;
pub use self::descriptor::{ClimbingMode, ControllerShapeType, RotatableControllerDesc};
pub use self::error::ControllerError;
pub use self::manager::ControllerManager;
pub use self::proxy::{
    BodyHandle, FilterData, MaterialHandle, ProxyBodyError, ProxyBodySet, ProxyGeometry,
    ShapeHandle,
};
pub use self::proxy_world::{ProxyBody, ProxyShape, ProxyWorld};
pub use self::sweep_test_cache::SweepTestCache;
pub use self::swept_volume::SweptVolume;

mod controller;
mod descriptor;
mod error;
mod manager;
mod proxy;
mod proxy_world;
mod sweep_test_cache;
mod swept_volume;
