use nalgebra::Point3;

/// Number of mesh vertices owned by one corner (3 bottom copies, then 3 top copies).
pub const VERTICES_PER_CORNER: usize = 6;

/// Total vertex count of the tabletop slab.
pub const VERTEX_COUNT: usize = 4 * VERTICES_PER_CORNER;

/// Triangle list of the slab. Each face has its own 4 vertices so normals stay flat.
///
/// Per corner, slots 0/3 sit on the x-facing side, slot 1 on the bottom,
/// slot 4 on the top and slots 2/5 on the z-facing side.
#[rustfmt::skip]
pub const TRIANGLES: [u32; 36] = [
    // Left
    3, 21, 18,
    18, 0, 3,
    // Front
    22, 15, 12,
    12, 19, 22,
    // Top
    4, 9, 16,
    16, 23, 4,
    // Bottom
    6, 1, 20,
    20, 13, 6,
    // Right
    17, 10, 7,
    7, 14, 17,
    // Back
    11, 5, 2,
    2, 8, 11,
];

/// Builds the 24 slab vertices for a `width` x `depth` top whose bottom sits at `base_height`.
///
/// Top view, corners emitted in this order:
/// ```text
///   NW -------- NE
///    |          |
///    |          |
///   SW -------- SE
/// ```
pub fn generate_vertices(
    width: f32,
    thickness: f32,
    depth: f32,
    base_height: f32,
) -> [Point3<f32>; VERTEX_COUNT] {
    let hw = width * 0.5;
    let hd = depth * 0.5;
    let footprint = [(-hw, hd), (hw, hd), (hw, -hd), (-hw, -hd)];

    let mut vertices = [Point3::origin(); VERTEX_COUNT];
    for (corner, (x, z)) in footprint.into_iter().enumerate() {
        let base = corner * VERTICES_PER_CORNER;
        for slot in 0..3 {
            vertices[base + slot] = Point3::new(x, base_height, z);
            vertices[base + 3 + slot] = Point3::new(x, base_height + thickness, z);
        }
    }
    vertices
}
