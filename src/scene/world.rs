use crate::core::geometry::{Bounds, Plane};
use crate::scene::camera::Camera;
use crate::scene::host::{
    Layer, LocalTransform, MeshSink, ObjectHandle, Raycaster, SceneHost, Template,
};
use crate::scene::mesh::Mesh;
use crate::scene::scene_object::SceneObject;
use log::{trace, warn};
use nalgebra::{Matrix4, Point2, Point3};
use std::collections::BTreeMap;

/// Self-contained host: owns the objects, the tabletop mesh and the viewing camera.
#[derive(Debug)]
pub struct World {
    pub camera: Camera,
    /// Viewport size in pixels.
    pub viewport: (f32, f32),
    /// Table root in world space; every object is its child.
    root: Matrix4<f32>,
    objects: BTreeMap<ObjectHandle, SceneObject>,
    next_id: u32,
    mesh: Mesh,
}

impl World {
    pub fn new(camera: Camera, viewport: (f32, f32), root: Matrix4<f32>) -> Self {
        Self {
            camera,
            viewport,
            root,
            objects: BTreeMap::new(),
            next_id: 1,
            mesh: Mesh::default(),
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if (width, height) != self.viewport && width > 0.0 && height > 0.0 {
            self.viewport = (width, height);
            self.camera.set_aspect_ratio(width / height);
        }
    }

    pub fn root(&self) -> &Matrix4<f32> {
        &self.root
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(&handle)
    }

    /// Live objects in creation order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectHandle, &SceneObject)> {
        self.objects.iter().map(|(h, o)| (*h, o))
    }

    /// Live objects created from the named template.
    pub fn count_of(&self, template: &str) -> usize {
        self.objects.values().filter(|o| o.template == template).count()
    }

    /// World point -> screen pixel through the current camera.
    pub fn world_to_screen(&self, world: &Point3<f32>) -> Option<Point2<f32>> {
        self.camera
            .world_to_screen(world, self.viewport.0, self.viewport.1)
    }

    fn object_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneObject> {
        let object = self.objects.get_mut(&handle);
        if object.is_none() {
            warn!("Unknown object {:?}", handle);
        }
        object
    }
}

impl SceneHost for World {
    fn create_child(&mut self, template: &Template) -> ObjectHandle {
        let handle = ObjectHandle(self.next_id);
        self.next_id += 1;
        self.objects
            .insert(handle, SceneObject::from_template(template));
        trace!("Created {:?} from '{}'", handle, template.name);
        handle
    }

    fn destroy(&mut self, handle: ObjectHandle) {
        if self.objects.remove(&handle).is_none() {
            warn!("Destroying unknown object {:?}", handle);
        }
    }

    fn set_local_transform(&mut self, handle: ObjectHandle, transform: LocalTransform) {
        if let Some(object) = self.object_mut(handle) {
            object.local = transform;
        }
    }

    fn set_visible(&mut self, handle: ObjectHandle, visible: bool) {
        if let Some(object) = self.object_mut(handle) {
            object.visible = visible;
        }
    }
}

impl MeshSink for World {
    fn set_triangles(&mut self, indices: &[u32]) {
        self.mesh.indices = indices.to_vec();
    }

    fn update_vertices(&mut self, positions: &[Point3<f32>]) -> Bounds {
        self.mesh.positions.clear();
        self.mesh.positions.extend_from_slice(positions);
        self.mesh.recalculate_bounds();
        self.mesh.recalculate_normals();
        *self.mesh.bounds()
    }
}

impl Raycaster for World {
    /// Nearest object on `layer` whose world bounds the pointer ray enters.
    /// Hidden objects stay pickable; visibility is only a visual.
    fn cast_from_screen(&self, screen: Point2<f32>, layer: Layer) -> Option<ObjectHandle> {
        let ray = self
            .camera
            .screen_point_to_ray(screen, self.viewport.0, self.viewport.1)?;

        self.objects
            .iter()
            .filter(|(_, o)| o.layer == layer)
            .filter_map(|(h, o)| {
                let t = ray.intersect_bounds(&o.world_bounds(&self.root))?;
                (t <= self.camera.far).then_some((*h, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(h, _)| h)
    }

    fn project_onto_plane(&self, screen: Point2<f32>, plane: &Plane) -> Option<Point3<f32>> {
        self.camera
            .screen_point_to_ray(screen, self.viewport.0, self.viewport.1)?
            .intersect_plane(plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{UnitQuaternion, Vector3};

    fn top_down_world() -> World {
        let camera = Camera::new_orthographic(
            Point3::new(0.0, 10.0, 0.0),
            Point3::origin(),
            -Vector3::z(),
            4.0,
            1.0,
            0.1,
            100.0,
        );
        World::new(camera, (400.0, 400.0), Matrix4::identity())
    }

    fn cube(name: &str, layer: Layer) -> Template {
        Template {
            name: name.to_string(),
            bounds: Bounds::from_center_size(Point3::origin(), Vector3::repeat(1.0)),
            layer,
        }
    }

    #[test]
    fn picks_only_objects_on_the_requested_layer() {
        let mut world = top_down_world();
        let handle = world.create_child(&cube("handle", Layer::Handle));
        let other = world.create_child(&cube("leg", Layer::Default));
        world.set_local_transform(
            handle,
            LocalTransform::new(Point3::new(1.0, 0.0, 0.0), UnitQuaternion::identity(), Vector3::repeat(0.2)),
        );
        world.set_local_transform(
            other,
            LocalTransform::new(Point3::new(-1.0, 0.0, 0.0), UnitQuaternion::identity(), Vector3::repeat(0.2)),
        );
        world.set_visible(handle, false);

        let over_handle = world.world_to_screen(&Point3::new(1.0, 0.0, 0.0)).unwrap();
        let over_other = world.world_to_screen(&Point3::new(-1.0, 0.0, 0.0)).unwrap();

        assert_eq!(world.cast_from_screen(over_handle, Layer::Handle), Some(handle));
        assert_eq!(world.cast_from_screen(over_other, Layer::Handle), None);
        assert_eq!(world.cast_from_screen(over_other, Layer::Default), Some(other));
    }

    #[test]
    fn projects_pointer_onto_a_horizontal_plane() {
        let world = top_down_world();
        let screen = world.world_to_screen(&Point3::new(0.5, 0.8, -1.2)).unwrap();
        let hit = world
            .project_onto_plane(screen, &Plane::horizontal(0.8))
            .unwrap();
        assert!((hit - Point3::new(0.5, 0.8, -1.2)).norm() < 1e-3);
    }

    #[test]
    fn destroy_and_counts_track_live_objects() {
        let mut world = top_down_world();
        let a = world.create_child(&cube("chair", Layer::Default));
        world.create_child(&cube("chair", Layer::Default));
        assert_eq!(world.count_of("chair"), 2);
        world.destroy(a);
        assert_eq!(world.count_of("chair"), 1);
        assert!(world.object(a).is_none());
    }
}
