use crate::core::geometry::Ray;
use crate::core::math::transform::{
    TransformFactory, apply_perspective_division, ndc_to_screen, screen_to_ndc, transform_point,
};
use crate::io::config::CameraConfig;
use nalgebra::{Matrix4, Point2, Point3, Vector3};

#[derive(Debug, Clone)]
pub enum ProjectionType {
    Perspective { fov_y_rad: f32, aspect_ratio: f32 },
    Orthographic { height: f32, aspect_ratio: f32 },
}

/// Manages the View and Projection matrices, and converts between screen and world.
#[derive(Debug, Clone)]
pub struct Camera {
    // --- Common Parameters ---
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub near: f32,
    pub far: f32,

    // --- Projection Specifics ---
    pub projection_type: ProjectionType,

    // --- Cached Matrices ---
    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
    inverse_view_projection: Matrix4<f32>,
}

impl Camera {
    pub fn new_perspective(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov_y_rad: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self::with_projection(
            position,
            target,
            up,
            near,
            far,
            ProjectionType::Perspective {
                fov_y_rad,
                aspect_ratio,
            },
        )
    }

    pub fn new_orthographic(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        height: f32, // View height
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self::with_projection(
            position,
            target,
            up,
            near,
            far,
            ProjectionType::Orthographic {
                height,
                aspect_ratio,
            },
        )
    }

    fn with_projection(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        near: f32,
        far: f32,
        projection_type: ProjectionType,
    ) -> Self {
        let mut cam = Self {
            position,
            target,
            up,
            near,
            far,
            projection_type,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
            inverse_view_projection: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    /// Builds the camera described by `config` for a viewport of the given aspect ratio.
    pub fn from_config(config: &CameraConfig, aspect_ratio: f32) -> Self {
        let position = Point3::from(config.position);
        let target = Point3::from(config.target);
        let up = Vector3::from(config.up);

        match config.projection.as_str() {
            "orthographic" => Self::new_orthographic(
                position,
                target,
                up,
                config.ortho_height,
                aspect_ratio,
                config.near,
                config.far,
            ),
            _ => Self::new_perspective(
                position,
                target,
                up,
                config.fov.to_radians(),
                aspect_ratio,
                config.near,
                config.far,
            ),
        }
    }

    /// Recalculates View and Projection matrices based on current parameters.
    pub fn update_matrices(&mut self) {
        self.view_matrix = TransformFactory::view(&self.position, &self.target, &self.up);

        self.projection_matrix = match self.projection_type {
            ProjectionType::Perspective {
                fov_y_rad,
                aspect_ratio,
            } => TransformFactory::perspective(aspect_ratio, fov_y_rad, self.near, self.far),

            ProjectionType::Orthographic {
                height,
                aspect_ratio,
            } => {
                let half_height = height / 2.0;
                let half_width = half_height * aspect_ratio;

                TransformFactory::orthographic(
                    -half_width,
                    half_width, // Left, Right
                    -half_height,
                    half_height, // Bottom, Top
                    self.near,
                    self.far,
                )
            }
        };

        self.inverse_view_projection = (self.projection_matrix * self.view_matrix)
            .try_inverse()
            .unwrap_or_else(Matrix4::identity);
    }

    /// Keeps the projection in step with a resized viewport.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        match &mut self.projection_type {
            ProjectionType::Perspective { aspect_ratio, .. }
            | ProjectionType::Orthographic { aspect_ratio, .. } => *aspect_ratio = aspect,
        }
        self.update_matrices();
    }

    /// World-space ray through a screen pixel, starting on the near plane.
    pub fn screen_point_to_ray(&self, screen: Point2<f32>, width: f32, height: f32) -> Option<Ray> {
        let ndc = screen_to_ndc(&screen, width, height);
        let near = self.inverse_view_projection * Point3::new(ndc.x, ndc.y, -1.0).to_homogeneous();
        let far = self.inverse_view_projection * Point3::new(ndc.x, ndc.y, 1.0).to_homogeneous();

        let near = apply_perspective_division(&near)?;
        let far = apply_perspective_division(&far)?;
        let direction = far - near;
        if direction.norm_squared() < 1e-12 {
            return None;
        }
        Some(Ray::new(near, direction))
    }

    /// Screen pixel a world point projects to. `None` behind the camera.
    pub fn world_to_screen(&self, world: &Point3<f32>, width: f32, height: f32) -> Option<Point2<f32>> {
        let view = transform_point(&self.view_matrix, world);
        if view.z >= 0.0 {
            return None;
        }
        let clip = self.projection_matrix * view.to_homogeneous();
        let ndc = apply_perspective_division(&clip)?;
        Some(ndc_to_screen(ndc.x, ndc.y, width, height))
    }
}
