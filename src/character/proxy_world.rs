use slab::Slab;

use crate::character::{
    BodyHandle, FilterData, MaterialHandle, ProxyBodyError, ProxyBodySet, ProxyGeometry,
    ShapeHandle,
};
use crate::math::{Isometry, Real};

/// A kinematic body of a [`ProxyWorld`].
#[derive(Clone, Debug)]
pub struct ProxyBody {
    /// The current pose of the body.
    pub pose: Isometry<Real>,
    /// The pose the body will reach at the next call to [`ProxyWorld::step`].
    pub kinematic_target: Option<Isometry<Real>>,
    /// The density of the body.
    pub density: Real,
    /// The shapes attached to the body.
    pub shapes: Vec<ShapeHandle>,
}

/// A shape of a [`ProxyWorld`].
#[derive(Clone, Debug)]
pub struct ProxyShape {
    /// The body this shape is attached to.
    pub body: BodyHandle,
    /// The geometry of the shape, in the local frame of its body.
    pub geometry: ProxyGeometry,
    /// The materials of the shape.
    pub materials: Vec<MaterialHandle>,
    /// The filter data used by the simulation.
    pub simulation_filter_data: FilterData,
    /// The filter data used by scene queries.
    pub query_filter_data: FilterData,
}

/// An in-memory set of kinematic bodies.
///
/// This lets controllers run without a rigid-body simulator: the bodies only move to their
/// kinematic target when [`ProxyWorld::step`] is called. Geometries with non-positive or
/// non-finite dimensions are refused.
#[derive(Clone, Debug, Default)]
pub struct ProxyWorld {
    bodies: Slab<ProxyBody>,
    shapes: Slab<ProxyShape>,
}

impl ProxyWorld {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of bodies in this world.
    pub fn num_bodies(&self) -> usize {
        self.bodies.len()
    }

    /// The number of shapes in this world.
    pub fn num_shapes(&self) -> usize {
        self.shapes.len()
    }

    /// Gets the body with the given handle.
    pub fn body(&self, handle: BodyHandle) -> Option<&ProxyBody> {
        self.bodies.get(handle.0 as usize)
    }

    /// Gets the shape with the given handle.
    pub fn shape(&self, handle: ShapeHandle) -> Option<&ProxyShape> {
        self.shapes.get(handle.0 as usize)
    }

    /// Replaces the materials of a shape.
    pub fn set_shape_materials(
        &mut self,
        handle: ShapeHandle,
        materials: &[MaterialHandle],
    ) -> Result<(), ProxyBodyError> {
        let shape = self.shape_mut(handle)?;
        shape.materials.clear();
        shape.materials.extend_from_slice(materials);
        Ok(())
    }

    /// Moves every body to its kinematic target, if it has one.
    pub fn step(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            if let Some(target) = body.kinematic_target.take() {
                body.pose = target;
            }
        }
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut ProxyBody, ProxyBodyError> {
        self.bodies
            .get_mut(handle.0 as usize)
            .ok_or(ProxyBodyError::UnknownBody)
    }

    fn shape_ref(&self, handle: ShapeHandle) -> Result<&ProxyShape, ProxyBodyError> {
        self.shape(handle).ok_or(ProxyBodyError::UnknownShape)
    }

    fn shape_mut(&mut self, handle: ShapeHandle) -> Result<&mut ProxyShape, ProxyBodyError> {
        self.shapes
            .get_mut(handle.0 as usize)
            .ok_or(ProxyBodyError::UnknownShape)
    }
}

impl ProxyBodySet for ProxyWorld {
    fn create_kinematic_body(
        &mut self,
        pose: &Isometry<Real>,
        density: Real,
    ) -> Result<BodyHandle, ProxyBodyError> {
        if density <= 0.0 {
            return Err(ProxyBodyError::Rejected);
        }

        let index = self.bodies.insert(ProxyBody {
            pose: *pose,
            kinematic_target: None,
            density,
            shapes: vec![],
        });

        Ok(BodyHandle(index as u32))
    }

    fn destroy_body(&mut self, handle: BodyHandle) -> Result<(), ProxyBodyError> {
        let body = self
            .bodies
            .try_remove(handle.0 as usize)
            .ok_or(ProxyBodyError::UnknownBody)?;

        for shape in body.shapes {
            let _ = self.shapes.try_remove(shape.0 as usize);
        }

        Ok(())
    }

    fn create_shape(
        &mut self,
        handle: BodyHandle,
        geometry: &ProxyGeometry,
        material: MaterialHandle,
    ) -> Result<ShapeHandle, ProxyBodyError> {
        if !self.bodies.contains(handle.0 as usize) {
            return Err(ProxyBodyError::UnknownBody);
        }

        if !geometry.is_valid() {
            log::debug!("Refusing proxy geometry {:?}.", geometry);
            return Err(ProxyBodyError::Rejected);
        }

        let index = self.shapes.insert(ProxyShape {
            body: handle,
            geometry: *geometry,
            materials: vec![material],
            simulation_filter_data: FilterData::default(),
            query_filter_data: FilterData::default(),
        });
        let shape = ShapeHandle(index as u32);
        self.body_mut(handle)?.shapes.push(shape);

        Ok(shape)
    }

    fn detach_shape(
        &mut self,
        handle: BodyHandle,
        shape: ShapeHandle,
    ) -> Result<(), ProxyBodyError> {
        let body = self.body_mut(handle)?;
        let position = body
            .shapes
            .iter()
            .position(|s| *s == shape)
            .ok_or(ProxyBodyError::UnknownShape)?;
        let _ = body.shapes.remove(position);
        let _ = self.shapes.try_remove(shape.0 as usize);
        Ok(())
    }

    fn shapes(&self, handle: BodyHandle) -> Result<&[ShapeHandle], ProxyBodyError> {
        self.body(handle)
            .map(|body| &body.shapes[..])
            .ok_or(ProxyBodyError::UnknownBody)
    }

    fn shape_materials(&self, handle: ShapeHandle) -> Result<&[MaterialHandle], ProxyBodyError> {
        self.shape_ref(handle).map(|shape| &shape.materials[..])
    }

    fn shape_geometry(&self, handle: ShapeHandle) -> Result<ProxyGeometry, ProxyBodyError> {
        self.shape_ref(handle).map(|shape| shape.geometry)
    }

    fn set_shape_geometry(
        &mut self,
        handle: ShapeHandle,
        geometry: &ProxyGeometry,
    ) -> Result<(), ProxyBodyError> {
        let shape = self.shape_mut(handle)?;

        if !geometry.is_valid() {
            log::debug!("Refusing proxy geometry {:?}.", geometry);
            return Err(ProxyBodyError::Rejected);
        }

        shape.geometry = *geometry;
        Ok(())
    }

    fn simulation_filter_data(&self, handle: ShapeHandle) -> Result<FilterData, ProxyBodyError> {
        self.shape_ref(handle)
            .map(|shape| shape.simulation_filter_data)
    }

    fn set_simulation_filter_data(
        &mut self,
        handle: ShapeHandle,
        data: FilterData,
    ) -> Result<(), ProxyBodyError> {
        self.shape_mut(handle)?.simulation_filter_data = data;
        Ok(())
    }

    fn query_filter_data(&self, handle: ShapeHandle) -> Result<FilterData, ProxyBodyError> {
        self.shape_ref(handle).map(|shape| shape.query_filter_data)
    }

    fn set_query_filter_data(
        &mut self,
        handle: ShapeHandle,
        data: FilterData,
    ) -> Result<(), ProxyBodyError> {
        self.shape_mut(handle)?.query_filter_data = data;
        Ok(())
    }

    fn global_pose(&self, handle: BodyHandle) -> Result<Isometry<Real>, ProxyBodyError> {
        self.body(handle)
            .map(|body| body.pose)
            .ok_or(ProxyBodyError::UnknownBody)
    }

    fn set_kinematic_target(
        &mut self,
        handle: BodyHandle,
        target: &Isometry<Real>,
    ) -> Result<(), ProxyBodyError> {
        self.body_mut(handle)?.kinematic_target = Some(*target);
        Ok(())
    }
}
