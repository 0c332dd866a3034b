use crate::core::math::interpolation::{inverse_lerp, lerp};
use crate::scene::host::{LocalTransform, ObjectHandle, SceneHost};
use crate::table::settings::ChairSettings;
use log::debug;
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Chair arrangement derived from the leg positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChairPlan {
    /// Free length along the north/south edges.
    pub space_h: f32,
    /// Free length along the east/west edges.
    pub space_v: f32,
    /// Chairs per north/south edge.
    pub count_h: usize,
    /// Chairs per east/west edge.
    pub count_v: usize,
    /// One transform per chair, edge by edge starting with north.
    pub placements: Vec<LocalTransform>,
}

impl ChairPlan {
    pub fn total(&self) -> usize {
        self.placements.len()
    }
}

/// Lays chairs out along the four edges spanned by consecutive legs.
///
/// Legs must be in corner order (NW, NE, SE, SW). Chairs are spread evenly
/// between the two legs of an edge, rotated a quarter turn per edge so a chair
/// whose front is local +z faces the table. Negative free space yields no
/// chairs; too little space is otherwise not guarded and chairs may overlap.
pub fn plan_chairs(
    legs: &[Point3<f32>; 4],
    leg_footprint: &Vector3<f32>,
    chair_width: f32,
    padding: f32,
) -> ChairPlan {
    let space_h = legs[1].x - legs[0].x - leg_footprint.x - padding;
    let space_v = legs[1].z - legs[2].z - leg_footprint.z - padding;
    let chair_size = chair_width + padding;

    let count_h = (space_h / chair_size).floor().max(0.0) as usize;
    let count_v = (space_v / chair_size).floor().max(0.0) as usize;

    let mut placements = Vec::with_capacity((count_h + count_v) * 2);
    for edge in 0..4 {
        let (space, count) = if edge % 2 == 0 {
            (space_h, count_h)
        } else {
            (space_v, count_v)
        };
        if count == 0 {
            continue;
        }

        let a = legs[edge];
        let b = legs[(edge + 1) % 4];
        // Widens [0, 1] so the outermost chairs clear the legs.
        let extents = ((a - b).norm() / space - 1.0) * 0.5;
        let yaw = (180.0 + 90.0 * edge as f32).to_radians();
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw);

        for j in 0..count {
            let slot = (j * 2 + 1) as f32 / (count * 2) as f32;
            let t = inverse_lerp(-extents, extents + 1.0, slot);
            placements.push(LocalTransform::new(
                Point3::new(lerp(a.x, b.x, t), 0.0, lerp(a.z, b.z, t)),
                rotation,
                Vector3::repeat(1.0),
            ));
        }
    }

    ChairPlan {
        space_h,
        space_v,
        count_h,
        count_v,
        placements,
    }
}

/// Chair instances around the table. Rebuilt to the planned count on every layout pass.
#[derive(Debug)]
pub struct ChairLayout {
    settings: ChairSettings,
    chairs: Vec<ObjectHandle>,
    plan: ChairPlan,
}

impl ChairLayout {
    pub fn new(settings: ChairSettings) -> Self {
        Self {
            settings,
            chairs: Vec::new(),
            plan: ChairPlan::default(),
        }
    }

    /// Re-plans, creates or destroys chairs at the tail to match, then places them.
    pub fn arrange<H: SceneHost>(
        &mut self,
        legs: &[Point3<f32>; 4],
        leg_footprint: &Vector3<f32>,
        host: &mut H,
    ) {
        let plan = plan_chairs(
            legs,
            leg_footprint,
            self.settings.template.footprint().x,
            self.settings.padding,
        );
        let target = plan.total();

        if self.chairs.len() != target {
            debug!("Chair count {} -> {}", self.chairs.len(), target);
        }
        while self.chairs.len() < target {
            self.chairs.push(host.create_child(&self.settings.template));
        }
        for chair in self.chairs.drain(target..).rev() {
            host.destroy(chair);
        }

        for (chair, placement) in self.chairs.iter().zip(&plan.placements) {
            host.set_local_transform(*chair, *placement);
        }
        self.plan = plan;
    }

    pub fn plan(&self) -> &ChairPlan {
        &self.plan
    }

    pub fn chairs(&self) -> &[ObjectHandle] {
        &self.chairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle_legs(hx: f32, hz: f32) -> [Point3<f32>; 4] {
        [
            Point3::new(-hx, 0.75, hz),
            Point3::new(hx, 0.75, hz),
            Point3::new(hx, 0.75, -hz),
            Point3::new(-hx, 0.75, -hz),
        ]
    }

    #[test]
    fn counts_follow_free_space() {
        // 2.0 between legs: 2.0 - 0.1 - 0.1 = 1.8 free, chair slot 0.5 -> 3
        // 1.0 between legs: 1.0 - 0.1 - 0.1 = 0.8 free -> 1
        let plan = plan_chairs(&rectangle_legs(1.0, 0.5), &Vector3::new(0.1, 1.0, 0.1), 0.4, 0.1);
        assert_eq!(plan.count_h, 3);
        assert_eq!(plan.count_v, 1);
        assert_eq!(plan.total(), 8);
    }

    #[test]
    fn chairs_stay_on_their_edge_and_between_legs() {
        let legs = rectangle_legs(1.0, 0.5);
        let plan = plan_chairs(&legs, &Vector3::new(0.1, 1.0, 0.1), 0.4, 0.1);

        let north = &plan.placements[..3];
        for p in north {
            assert_eq!(p.position.z, 0.5);
            assert!(p.position.x > -1.0 && p.position.x < 1.0);
            assert_eq!(p.position.y, 0.0);
        }
        // Evenly spread and symmetric about the middle.
        assert!((north[0].position.x + north[2].position.x).abs() < 1e-5);
        assert!(north[1].position.x.abs() < 1e-5);

        let east = &plan.placements[3];
        assert_eq!(east.position.x, 1.0);
        assert!(east.position.z.abs() < 1e-5);
    }

    #[test]
    fn every_chair_faces_the_table() {
        let plan = plan_chairs(&rectangle_legs(1.0, 0.5), &Vector3::new(0.1, 1.0, 0.1), 0.4, 0.1);
        for p in &plan.placements {
            let front = p.rotation * Vector3::z();
            let to_center = -p.position.coords;
            assert!(front.dot(&to_center) > 0.0, "{:?}", p.position);
        }
    }

    #[test]
    fn no_room_means_no_chairs() {
        let plan = plan_chairs(&rectangle_legs(0.2, 0.2), &Vector3::new(0.1, 1.0, 0.1), 0.4, 0.5);
        assert_eq!(plan.total(), 0);
        assert!(plan.space_h < 0.0);
    }
}
