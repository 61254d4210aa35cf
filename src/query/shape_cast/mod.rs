//! Implementation details of the cylinder casting functions.

pub use self::shape_cast_cylinder_cylinder::{
    cast_parallel_cylinders, CylinderCastFlags, CylinderCastHit, CylinderCastStatus,
};

mod shape_cast_cylinder_cylinder;
