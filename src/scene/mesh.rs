use crate::core::geometry::Bounds;
use nalgebra::{Point3, Vector3};

/// Vertex positions, per-vertex normals and a triangle list.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub positions: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    /// List of indices defining triangles (3 indices per triangle).
    pub indices: Vec<u32>,
    bounds: Bounds,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl Mesh {
    pub fn new(positions: Vec<Point3<f32>>, indices: Vec<u32>) -> Self {
        let mut mesh = Self {
            positions,
            normals: Vec::new(),
            indices,
            bounds: Bounds::new(Point3::origin(), Point3::origin()),
        };
        mesh.recalculate_bounds();
        mesh.recalculate_normals();
        mesh
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Empty meshes get a zero-sized box at the origin.
    pub fn recalculate_bounds(&mut self) {
        self.bounds = Bounds::from_points(&self.positions)
            .unwrap_or_else(|| Bounds::new(Point3::origin(), Point3::origin()));
    }

    /// Area-weighted face normals accumulated per vertex.
    ///
    /// Vertices that are not shared between faces end up with flat normals.
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![Vector3::zeros(); self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let (Some(a), Some(b), Some(c)) = (
                self.positions.get(i0),
                self.positions.get(i1),
                self.positions.get(i2),
            ) else {
                continue;
            };
            let face = (b - a).cross(&(c - a));
            normals[i0] += face;
            normals[i1] += face;
            normals[i2] += face;
        }

        self.normals = normals
            .into_iter()
            .map(|n| n.try_normalize(1e-12).unwrap_or_else(Vector3::y))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::box_mesh::{TRIANGLES, generate_vertices};

    #[test]
    fn slab_normals_are_flat_and_axis_aligned() {
        let mesh = Mesh::new(generate_vertices(2.0, 0.1, 1.0, 0.5).to_vec(), TRIANGLES.to_vec());
        assert_eq!(mesh.triangle_count(), 12);

        // NW corner: slot 0 faces -x, slot 1 down, slot 4 up, slot 5 +z.
        assert!((mesh.normals[0] - Vector3::new(-1.0, 0.0, 0.0)).norm() < 1e-5);
        assert!((mesh.normals[1] - Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-5);
        assert!((mesh.normals[4] - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-5);
        assert!((mesh.normals[5] - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn bounds_cover_the_slab() {
        let mesh = Mesh::new(generate_vertices(2.0, 0.1, 1.0, 0.5).to_vec(), TRIANGLES.to_vec());
        assert_eq!(mesh.bounds().min, Point3::new(-1.0, 0.5, -0.5));
        assert!((mesh.bounds().max - Point3::new(1.0, 0.6, 0.5)).norm() < 1e-6);
    }
}
