use crate::table::corners::{Axis, Corner, CornerModel};
use log::trace;
use nalgebra::Point3;

/// Smallest allowed tabletop extent on each horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinDimension {
    pub width: f32,
    pub depth: f32,
}

impl MinDimension {
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Z => self.depth,
        }
    }
}

/// Resolves where `corner` ends up when dragged towards `target` (table-local).
///
/// Each horizontal axis is handled on its own:
/// - a target on the far side of the opposite corner keeps the current value,
/// - a target closer than the minimum to the opposite corner is pushed out to exactly the minimum.
pub fn constrain_target(
    model: &CornerModel,
    corner: Corner,
    target: Point3<f32>,
    min: &MinDimension,
) -> Point3<f32> {
    let current = model.position(corner);
    let opposite = model.position(corner.opposite());
    let mut position = target;

    for axis in Axis::HORIZONTAL {
        let i = axis.component();
        let (p, o, c) = (position[i], opposite[i], current[i]);

        let is_flipped = (p > o && o > c) || (p < o && o < c);
        if is_flipped {
            trace!("{:?} flip blocked on {:?}", corner, axis);
            position[i] = c;
            continue;
        }

        let minimum = min.along(axis);
        let distance = (p - o).abs();
        if distance < minimum {
            // Extrapolates along O->P so |P - O| == minimum.
            let t = distance / minimum;
            position[i] = (p - o * (1.0 - t)) / t;
        }
    }

    position
}

/// Copies the moved corner's coordinates to its two neighbours so the top stays a rectangle.
///
/// Even corners share x with the previous neighbour and z with the next one; odd corners the reverse.
pub fn propagate_to_neighbors(model: &mut CornerModel, corner: Corner) {
    let (previous, next) = corner.neighbors();
    if corner.is_even() {
        model.copy_axis(corner, previous, Axis::X);
        model.copy_axis(corner, next, Axis::Z);
    } else {
        model.copy_axis(corner, previous, Axis::Z);
        model.copy_axis(corner, next, Axis::X);
    }
}

/// Full stretch step: constrain, move the corner, fix up the neighbours.
/// Returns the position the corner was actually moved to.
pub fn stretch_corner(
    model: &mut CornerModel,
    corner: Corner,
    target: Point3<f32>,
    min: &MinDimension,
) -> Point3<f32> {
    let position = constrain_target(model, corner, target, min);
    model.set_position(corner, &position);
    propagate_to_neighbors(model, corner);
    position
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: MinDimension = MinDimension {
        width: 0.5,
        depth: 0.5,
    };

    fn table() -> CornerModel {
        CornerModel::new(2.0, 0.05, 1.5, 0.75)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn free_drag_moves_corner_to_target() {
        let mut model = table();
        let p = stretch_corner(&mut model, Corner::Northeast, Point3::new(5.0, 0.0, 5.0), &MIN);
        assert_eq!((p.x, p.z), (5.0, 5.0));
        assert_eq!(model.position(Corner::Northwest).z, 5.0);
        assert_eq!(model.position(Corner::Southeast).x, 5.0);
        assert_eq!(model.position(Corner::Southwest), Point3::new(-1.0, 0.75, -0.75));
    }

    #[test]
    fn target_inside_minimum_is_pushed_out_to_minimum() {
        let mut model = table();
        stretch_corner(&mut model, Corner::Northeast, Point3::new(-0.8, 0.0, 0.75), &MIN);
        assert!(close(model.position(Corner::Northeast).x, -0.5));
        assert!(close(model.span(Axis::X), 0.5));
        assert!(close(model.span(Axis::Z), 1.5));
    }

    #[test]
    fn target_beyond_opposite_corner_is_blocked_per_axis() {
        let mut model = table();
        stretch_corner(&mut model, Corner::Southwest, Point3::new(3.0, 0.0, -2.0), &MIN);
        let sw = model.position(Corner::Southwest);
        assert_eq!(sw.x, -1.0);
        assert_eq!(sw.z, -2.0);
    }

    #[test]
    fn neighbours_share_the_expected_axis_for_every_corner() {
        for corner in Corner::ALL {
            let mut model = table();
            let current = model.position(corner);
            let target = Point3::new(current.x * 1.5, 0.0, current.z * 1.2);
            let moved = stretch_corner(&mut model, corner, target, &MIN);

            let (prev, next) = corner.neighbors();
            let (prev_axis, next_axis) = if corner.is_even() {
                (Axis::X, Axis::Z)
            } else {
                (Axis::Z, Axis::X)
            };
            assert_eq!(model.position(prev)[prev_axis.component()], moved[prev_axis.component()]);
            assert_eq!(model.position(next)[next_axis.component()], moved[next_axis.component()]);
        }
    }
}
