use crate::core::geometry::{Bounds, Plane};
use nalgebra::{Point2, Point3, UnitQuaternion, Vector3};
use serde::Deserialize;

/// Opaque reference to an object owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub u32);

/// Pickability layer. Ray casts only consider objects on the requested layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    #[default]
    Default,
    Handle,
}

/// A named object description the host knows how to instantiate.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: String,
    /// Bounds of the template's visual in its own local space.
    pub bounds: Bounds,
    pub layer: Layer,
}

impl Template {
    /// Full size of the visual.
    pub fn footprint(&self) -> Vector3<f32> {
        self.bounds.size()
    }

    /// Half of [`Template::footprint`].
    pub fn half_footprint(&self) -> Vector3<f32> {
        self.bounds.extents()
    }
}

/// Position/rotation/scale relative to the parent (the table root).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub position: Point3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::repeat(1.0),
        }
    }
}

impl LocalTransform {
    pub fn new(position: Point3<f32>, rotation: UnitQuaternion<f32>, scale: Vector3<f32>) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }
}

//=================================
// Host Capabilities
//=================================

/// Scene-graph access: instantiation, destruction, transforms and visibility.
/// Every object created here is a child of the table root.
pub trait SceneHost {
    fn create_child(&mut self, template: &Template) -> ObjectHandle;
    fn destroy(&mut self, handle: ObjectHandle);
    fn set_local_transform(&mut self, handle: ObjectHandle, transform: LocalTransform);
    fn set_visible(&mut self, handle: ObjectHandle, visible: bool);
}

/// Receives the tabletop geometry.
pub trait MeshSink {
    /// Called once before the first vertex upload; the triangle list never changes afterwards.
    fn set_triangles(&mut self, indices: &[u32]);

    /// Replaces all vertex positions and returns the recomputed local bounds.
    fn update_vertices(&mut self, positions: &[Point3<f32>]) -> Bounds;
}

/// Pointer picking against the active camera.
pub trait Raycaster {
    /// First object on `layer` under the screen position, if any.
    fn cast_from_screen(&self, screen: Point2<f32>, layer: Layer) -> Option<ObjectHandle>;

    /// World-space point where the pointer ray meets `plane` (given in world space).
    fn project_onto_plane(&self, screen: Point2<f32>, plane: &Plane) -> Option<Point3<f32>>;
}
