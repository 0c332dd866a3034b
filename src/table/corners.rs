use crate::table::box_mesh::{self, VERTEX_COUNT, VERTICES_PER_CORNER};
use nalgebra::Point3;

/// The four tabletop corners, walked consecutively around the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    Northwest,
    Northeast,
    Southeast,
    Southwest,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::Northwest,
        Corner::Northeast,
        Corner::Southeast,
        Corner::Southwest,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Corner {
        Self::ALL[index % 4]
    }

    /// Diagonally opposite corner.
    pub fn opposite(self) -> Corner {
        Self::from_index(self.index() + 2)
    }

    pub fn previous(self) -> Corner {
        Self::from_index(self.index() + 3)
    }

    pub fn next(self) -> Corner {
        Self::from_index(self.index() + 1)
    }

    /// `(previous, next)`.
    pub fn neighbors(self) -> (Corner, Corner) {
        (self.previous(), self.next())
    }

    /// True for Northwest and Southeast.
    pub fn is_even(self) -> bool {
        self.index() % 2 == 0
    }
}

/// Horizontal axis of the table's local space. The discriminant is the `Point3` component index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X = 0,
    Z = 2,
}

impl Axis {
    pub const HORIZONTAL: [Axis; 2] = [Axis::X, Axis::Z];

    pub fn component(self) -> usize {
        self as usize
    }
}

/// Tabletop vertex buffer viewed as four corners of six duplicated vertices each.
///
/// Writes only ever touch x and z; the slab height is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerModel {
    vertices: [Point3<f32>; VERTEX_COUNT],
}

impl CornerModel {
    pub fn new(width: f32, thickness: f32, depth: f32, base_height: f32) -> Self {
        Self {
            vertices: box_mesh::generate_vertices(width, thickness, depth, base_height),
        }
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Position of the corner's first (bottom) vertex.
    pub fn position(&self, corner: Corner) -> Point3<f32> {
        self.vertices[corner.index() * VERTICES_PER_CORNER]
    }

    /// Moves all six vertices of `corner` to the horizontal position of `position`.
    pub fn set_position(&mut self, corner: Corner, position: &Point3<f32>) {
        for v in self.slots_mut(corner) {
            v.x = position.x;
            v.z = position.z;
        }
    }

    /// Copies one horizontal axis of `from` onto every vertex of `to`.
    pub fn copy_axis(&mut self, from: Corner, to: Corner, axis: Axis) {
        let value = self.position(from)[axis.component()];
        for v in self.slots_mut(to) {
            v[axis.component()] = value;
        }
    }

    /// Extent of the top along `axis`, measured between Northwest and Southeast.
    pub fn span(&self, axis: Axis) -> f32 {
        let a = self.position(Corner::Northwest)[axis.component()];
        let b = self.position(Corner::Southeast)[axis.component()];
        (b - a).abs()
    }

    fn slots_mut(&mut self, corner: Corner) -> &mut [Point3<f32>] {
        let start = corner.index() * VERTICES_PER_CORNER;
        &mut self.vertices[start..start + VERTICES_PER_CORNER]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_relations_wrap_around() {
        assert_eq!(Corner::Northwest.opposite(), Corner::Southeast);
        assert_eq!(Corner::Southwest.opposite(), Corner::Northeast);
        assert_eq!(
            Corner::Northwest.neighbors(),
            (Corner::Southwest, Corner::Northeast)
        );
        assert_eq!(
            Corner::Southwest.neighbors(),
            (Corner::Southeast, Corner::Northwest)
        );
        assert!(Corner::Southeast.is_even());
        assert!(!Corner::Northeast.is_even());
    }

    #[test]
    fn set_position_moves_all_six_slots_but_keeps_height() {
        let mut model = CornerModel::new(2.0, 0.5, 1.0, 1.0);
        model.set_position(Corner::Northeast, &Point3::new(3.0, 99.0, 4.0));

        let slots = &model.vertices()[6..12];
        for (i, v) in slots.iter().enumerate() {
            assert_eq!(v.x, 3.0);
            assert_eq!(v.z, 4.0);
            assert_eq!(v.y, if i < 3 { 1.0 } else { 1.5 });
        }
        assert_eq!(model.position(Corner::Northwest), Point3::new(-1.0, 1.0, 0.5));
    }

    #[test]
    fn copy_axis_only_touches_the_requested_component() {
        let mut model = CornerModel::new(2.0, 0.5, 1.0, 1.0);
        model.set_position(Corner::Northeast, &Point3::new(3.0, 0.0, 4.0));
        model.copy_axis(Corner::Northeast, Corner::Southeast, Axis::X);

        assert_eq!(model.position(Corner::Southeast), Point3::new(3.0, 1.0, -0.5));
        assert_eq!(model.span(Axis::X), 4.0);
        assert_eq!(model.span(Axis::Z), 1.0);
    }
}
