use nalgebra::{Matrix4, Point3, Vector3};

use crate::core::math::transform::{transform_point, transform_vector};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Bounds {
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Point3<f32>, size: Vector3<f32>) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box enclosing all `points`. `None` for an empty slice.
    pub fn from_points(points: &[Point3<f32>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::new(*first, *first);
        for p in rest {
            bounds.expand_by_point(p);
        }
        Some(bounds)
    }

    pub fn expand_by_point(&mut self, p: &Point3<f32>) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Half of [`Bounds::size`].
    pub fn extents(&self) -> Vector3<f32> {
        self.size() * 0.5
    }

    /// Box enclosing this one after an affine transform.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        let corners = [
            Point3::new(self.min.x, self.min.y, self.min.z),
            Point3::new(self.max.x, self.min.y, self.min.z),
            Point3::new(self.min.x, self.max.y, self.min.z),
            Point3::new(self.max.x, self.max.y, self.min.z),
            Point3::new(self.min.x, self.min.y, self.max.z),
            Point3::new(self.max.x, self.min.y, self.max.z),
            Point3::new(self.min.x, self.max.y, self.max.z),
            Point3::new(self.max.x, self.max.y, self.max.z),
        ];
        let moved = corners.map(|c| transform_point(matrix, &c));
        let mut bounds = Self::new(moved[0], moved[0]);
        for p in &moved[1..] {
            bounds.expand_by_point(p);
        }
        bounds
    }
}

/// Infinite plane: `normal . p + constant = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f32>,
    pub constant: f32,
}

impl Plane {
    pub fn from_normal_and_point(normal: Vector3<f32>, point: &Point3<f32>) -> Self {
        let n = normal.normalize();
        Self {
            normal: n,
            constant: -point.coords.dot(&n),
        }
    }

    /// Horizontal plane at height `y`, facing up.
    pub fn horizontal(y: f32) -> Self {
        Self {
            normal: Vector3::y(),
            constant: -y,
        }
    }

    pub fn distance_to_point(&self, p: &Point3<f32>) -> f32 {
        self.normal.dot(&p.coords) + self.constant
    }

    /// Same plane expressed in the space `matrix` maps into.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        let point = Point3::from(self.normal * -self.constant);
        let normal_matrix = matrix
            .try_inverse()
            .map(|inv| inv.transpose())
            .unwrap_or(*matrix);
        Self::from_normal_and_point(
            transform_vector(&normal_matrix, &self.normal),
            &transform_point(matrix, &point),
        )
    }
}

/// Half-line starting at `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// Distance along the ray to `plane`, `None` if parallel or behind.
    pub fn distance_to_plane(&self, plane: &Plane) -> Option<f32> {
        let denom = plane.normal.dot(&self.direction);
        if denom.abs() < 1e-8 {
            return None;
        }
        let t = -(self.origin.coords.dot(&plane.normal) + plane.constant) / denom;
        (t >= 0.0).then_some(t)
    }

    pub fn intersect_plane(&self, plane: &Plane) -> Option<Point3<f32>> {
        self.distance_to_plane(plane).map(|t| self.at(t))
    }

    /// Slab test. Returns the entry distance (0 when the origin is inside).
    pub fn intersect_bounds(&self, bounds: &Bounds) -> Option<f32> {
        let inv_dir = self.direction.map(|d| 1.0 / d);

        let t1 = (bounds.min.x - self.origin.x) * inv_dir.x;
        let t2 = (bounds.max.x - self.origin.x) * inv_dir.x;
        let t3 = (bounds.min.y - self.origin.y) * inv_dir.y;
        let t4 = (bounds.max.y - self.origin.y) * inv_dir.y;
        let t5 = (bounds.min.z - self.origin.z) * inv_dir.z;
        let t6 = (bounds.max.z - self.origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        if tmax < 0.0 || tmin > tmax {
            None
        } else {
            Some(tmin.max(0.0))
        }
    }
}
