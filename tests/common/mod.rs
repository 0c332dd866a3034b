#![allow(dead_code)]

use nalgebra::{Matrix4, Point2, Point3, Vector3};
use std::collections::BTreeMap;
use table_designer::core::geometry::{Bounds, Plane};
use table_designer::scene::host::{
    Layer, LocalTransform, MeshSink, ObjectHandle, Raycaster, SceneHost, Template,
};
use table_designer::table::TableSettings;
use table_designer::table::settings::{ChairSettings, LegSettings, TabletopSettings};
use table_designer::table::stretch::MinDimension;

/// Pick radius around an object's position, in world units.
pub const PICK_RADIUS: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FakeObject {
    pub template: String,
    pub layer: Layer,
    pub transform: LocalTransform,
    pub visible: bool,
}

/// Host with the world seen straight from above: pointer `(x, y)` is world `(x, _, y)`.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub objects: BTreeMap<ObjectHandle, FakeObject>,
    next_id: u32,
    pub triangles: Vec<u32>,
    pub vertices: Vec<Point3<f32>>,
    pub uploads: usize,
    /// Makes every plane projection miss.
    pub miss_plane: bool,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_of(&self, template: &str) -> usize {
        self.objects.values().filter(|o| o.template == template).count()
    }

    pub fn visible_on(&self, layer: Layer) -> usize {
        self.objects
            .values()
            .filter(|o| o.layer == layer && o.visible)
            .count()
    }

    pub fn object(&self, handle: ObjectHandle) -> &FakeObject {
        &self.objects[&handle]
    }
}

impl SceneHost for FakeHost {
    fn create_child(&mut self, template: &Template) -> ObjectHandle {
        self.next_id += 1;
        let handle = ObjectHandle(self.next_id);
        self.objects.insert(
            handle,
            FakeObject {
                template: template.name.clone(),
                layer: template.layer,
                transform: LocalTransform::default(),
                visible: true,
            },
        );
        handle
    }

    fn destroy(&mut self, handle: ObjectHandle) {
        self.objects.remove(&handle);
    }

    fn set_local_transform(&mut self, handle: ObjectHandle, transform: LocalTransform) {
        if let Some(o) = self.objects.get_mut(&handle) {
            o.transform = transform;
        }
    }

    fn set_visible(&mut self, handle: ObjectHandle, visible: bool) {
        if let Some(o) = self.objects.get_mut(&handle) {
            o.visible = visible;
        }
    }
}

impl MeshSink for FakeHost {
    fn set_triangles(&mut self, indices: &[u32]) {
        self.triangles = indices.to_vec();
    }

    fn update_vertices(&mut self, positions: &[Point3<f32>]) -> Bounds {
        self.vertices = positions.to_vec();
        self.uploads += 1;
        Bounds::from_points(positions).unwrap_or(Bounds::new(Point3::origin(), Point3::origin()))
    }
}

impl Raycaster for FakeHost {
    fn cast_from_screen(&self, screen: Point2<f32>, layer: Layer) -> Option<ObjectHandle> {
        self.objects
            .iter()
            .filter(|(_, o)| o.layer == layer)
            .map(|(h, o)| {
                let p = o.transform.position;
                (*h, (Point2::new(p.x, p.z) - screen).norm())
            })
            .filter(|(_, d)| *d <= PICK_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(h, _)| h)
    }

    fn project_onto_plane(&self, screen: Point2<f32>, plane: &Plane) -> Option<Point3<f32>> {
        if self.miss_plane || plane.normal.y.abs() < 1e-6 {
            return None;
        }
        let y = -(plane.constant + plane.normal.x * screen.x + plane.normal.z * screen.y)
            / plane.normal.y;
        Some(Point3::new(screen.x, y, screen.y))
    }
}

pub fn template(name: &str, size: [f32; 3], layer: Layer) -> Template {
    Template {
        name: name.to_string(),
        bounds: Bounds::from_center_size(Point3::origin(), Vector3::from(size)),
        layer,
    }
}

/// 2.0 x 1.5 top, 0.05 thick, 0.75 high, minimums 0.5, with legs and chairs.
pub fn full_settings() -> TableSettings {
    TableSettings {
        tabletop: TabletopSettings {
            width: 2.0,
            thickness: 0.05,
            depth: 1.5,
            base_height: 0.75,
            min: MinDimension {
                width: 0.5,
                depth: 0.5,
            },
            handle: template("handle", [1.0, 1.0, 1.0], Layer::Handle),
        },
        leg: Some(LegSettings {
            template: template("leg", [0.1, 1.0, 0.1], Layer::Default),
            distance: [0.05, 0.05],
        }),
        chair: Some(ChairSettings {
            template: template("chair", [0.4, 0.9, 0.4], Layer::Default),
            padding: 0.1,
        }),
        root: Matrix4::identity(),
    }
}

pub fn tabletop_only() -> TableSettings {
    TableSettings {
        leg: None,
        chair: None,
        ..full_settings()
    }
}

pub fn pointer(x: f32, z: f32) -> Point2<f32> {
    Point2::new(x, z)
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}
