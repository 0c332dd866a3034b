use crate::core::geometry::Bounds;
use crate::core::math::interpolation::lerp;
use crate::scene::host::{LocalTransform, ObjectHandle, SceneHost};
use crate::table::corners::{Corner, CornerModel};
use crate::table::settings::LegSettings;
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Leg positions for the current top.
///
/// Each leg is pulled from its corner towards the centre of `bounds` by
/// `(distance + half footprint) / half extent`, independently on x and z.
pub fn leg_positions(
    model: &CornerModel,
    bounds: &Bounds,
    distance: [f32; 2],
    half_footprint: &Vector3<f32>,
    base_height: f32,
) -> [Point3<f32>; 4] {
    let extents = bounds.extents();
    let center = bounds.center();
    let tx = (distance[0] + half_footprint.x) / extents.x;
    let tz = (distance[1] + half_footprint.z) / extents.z;

    Corner::ALL.map(|corner| {
        let c = model.position(corner);
        Point3::new(lerp(c.x, center.x, tx), base_height, lerp(c.z, center.z, tz))
    })
}

/// The four legs, one per corner, in corner order.
#[derive(Debug)]
pub struct LegLayout {
    settings: LegSettings,
    objects: [ObjectHandle; 4],
    positions: [Point3<f32>; 4],
    scale: Vector3<f32>,
}

impl LegLayout {
    /// Instantiates the legs. They stretch from the floor to the slab bottom.
    pub fn spawn<H: SceneHost>(settings: LegSettings, base_height: f32, host: &mut H) -> Self {
        let objects = Corner::ALL.map(|_| host.create_child(&settings.template));
        Self {
            settings,
            objects,
            positions: [Point3::origin(); 4],
            scale: Vector3::new(1.0, base_height, 1.0),
        }
    }

    pub fn reposition<H: SceneHost>(
        &mut self,
        model: &CornerModel,
        bounds: &Bounds,
        base_height: f32,
        host: &mut H,
    ) {
        self.positions = leg_positions(
            model,
            bounds,
            self.settings.distance,
            &self.settings.template.half_footprint(),
            base_height,
        );
        for (object, position) in self.objects.iter().zip(&self.positions) {
            host.set_local_transform(
                *object,
                LocalTransform::new(*position, UnitQuaternion::identity(), self.scale),
            );
        }
    }

    pub fn positions(&self) -> &[Point3<f32>; 4] {
        &self.positions
    }

    pub fn objects(&self) -> &[ObjectHandle; 4] {
        &self.objects
    }

    /// Full footprint of one leg.
    pub fn footprint(&self) -> Vector3<f32> {
        self.settings.template.footprint()
    }
}
