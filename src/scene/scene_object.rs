use crate::core::geometry::Bounds;
use crate::core::math::transform::TransformFactory;
use crate::scene::host::{Layer, LocalTransform, Template};
use nalgebra::Matrix4;

/// An instance of a template living under the table root.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub template: String,
    pub layer: Layer,
    /// Template bounds in the object's own space.
    pub bounds: Bounds,
    pub local: LocalTransform,
    pub visible: bool,
}

impl SceneObject {
    pub fn from_template(template: &Template) -> Self {
        Self {
            template: template.name.clone(),
            layer: template.layer,
            bounds: template.bounds,
            local: LocalTransform::default(),
            visible: true,
        }
    }

    /// Object space -> parent space.
    pub fn local_matrix(&self) -> Matrix4<f32> {
        TransformFactory::trs(&self.local.position, &self.local.rotation, &self.local.scale)
    }

    /// Bounds in world space, given the parent's world matrix.
    pub fn world_bounds(&self, parent: &Matrix4<f32>) -> Bounds {
        self.bounds.transformed(&(parent * self.local_matrix()))
    }
}
