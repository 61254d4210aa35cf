use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::shape::Cylinder;

/// Obstacles gathered around a controller by the sweep driver, reused between moves.
///
/// The driver stores the obstacles found inside some bounds. As long as later queries fit in
/// these bounds, the cached obstacles can be used instead of querying the scene again.
#[derive(Clone, Debug, Default)]
pub struct SweepTestCache {
    bounds: Option<Aabb>,
    obstacles: Vec<Cylinder>,
}

impl SweepTestCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the content of this cache by the obstacles found inside of `bounds`.
    pub fn store(&mut self, bounds: Aabb, obstacles: impl IntoIterator<Item = Cylinder>) {
        self.bounds = Some(bounds);
        self.obstacles.clear();
        self.obstacles.extend(obstacles);
    }

    /// The bounds the cached obstacles were gathered in, if the cache is valid.
    pub fn bounds(&self) -> Option<&Aabb> {
        self.bounds.as_ref()
    }

    /// The cached obstacles.
    pub fn obstacles(&self) -> &[Cylinder] {
        &self.obstacles
    }

    /// The cached obstacles whose AABB intersects `aabb`.
    pub fn obstacles_intersecting<'a>(
        &'a self,
        aabb: &'a Aabb,
    ) -> impl Iterator<Item = &'a Cylinder> + 'a {
        self.obstacles
            .iter()
            .filter(move |obstacle| obstacle.aabb().intersects(aabb))
    }

    /// Can the cached obstacles be used for a query enclosed in `query_bounds`?
    pub fn covers(&self, query_bounds: &Aabb) -> bool {
        self.bounds
            .as_ref()
            .is_some_and(|bounds| bounds.contains(query_bounds))
    }

    /// Is this cache empty?
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Discards the content of this cache.
    pub fn clear(&mut self) {
        self.bounds = None;
        self.obstacles.clear();
    }
}
