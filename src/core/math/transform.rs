use nalgebra::{Matrix4, Point2, Point3, UnitQuaternion, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Builds the handful of matrices the table scene needs.
/// Everything is Right-Handed with +Y up; the camera looks down its local -Z.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Rotation around the Y-axis (yaw). Positive angles turn +Z towards +X.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn scaling_nonuniform(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Translation * Rotation * Scale, the order every scene object uses.
    pub fn trs(
        position: &Point3<f32>,
        rotation: &UnitQuaternion<f32>,
        scale: &Vector3<f32>,
    ) -> Matrix4<f32> {
        Self::translation(&position.coords) * rotation.to_homogeneous() * Self::scaling_nonuniform(scale)
    }

    /// Look-At view matrix (world -> camera space).
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let z_axis = (eye - target).normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        let rotation = Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, 0.0,
            y_axis.x, y_axis.y, y_axis.z, 0.0,
            z_axis.x, z_axis.y, z_axis.z, 0.0,
            0.0,      0.0,      0.0,      1.0,
        );

        let translation = Self::translation(&-eye.coords);

        rotation * translation
    }

    /// Perspective projection mapping the view frustum to NDC [-1, 1].
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fov_y_rad / 2.0).tan();
        let nf = 1.0 / (near - far);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,                          0.0,
            0.0,              f,   0.0,                          0.0,
            0.0,              0.0, (far + near) * nf,            2.0 * far * near * nf,
            0.0,              0.0, -1.0,                         0.0,
        )
    }

    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Matrix4<f32> {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let nf = 1.0 / (near - far);

        Matrix4::new(
            2.0 * rl,      0.0,           0.0,          -(right + left) * rl,
            0.0,           2.0 * tb,      0.0,          -(top + bottom) * tb,
            0.0,           0.0,           2.0 * nf,     (far + near) * nf,
            0.0,           0.0,           0.0,          1.0,
        )
    }
}

//=================================
// Space Conversions
//=================================

/// Clip space -> NDC. Returns `None` for points on the camera plane (w ~ 0).
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Option<Point3<f32>> {
    let w = clip.w;
    if w.abs() > 1e-6 {
        Some(Point3::new(clip.x / w, clip.y / w, clip.z / w))
    } else {
        None
    }
}

/// NDC -> screen pixels. Screen +Y points down.
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - (ndc_y + 1.0) * 0.5) * height,
    )
}

/// Screen pixels -> NDC, the inverse of [`ndc_to_screen`].
#[inline]
pub fn screen_to_ndc(screen: &Point2<f32>, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        screen.x / width * 2.0 - 1.0,
        1.0 - screen.y / height * 2.0,
    )
}

/// Applies an affine matrix to a point.
#[inline]
pub fn transform_point(matrix: &Matrix4<f32>, point: &Point3<f32>) -> Point3<f32> {
    let v = matrix * point.to_homogeneous();
    Point3::new(v.x, v.y, v.z)
}

/// Applies an affine matrix to a direction (translation ignored).
#[inline]
pub fn transform_vector(matrix: &Matrix4<f32>, vector: &Vector3<f32>) -> Vector3<f32> {
    let v = matrix * vector.to_homogeneous();
    Vector3::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_and_ndc_round_trip_through_the_viewport() {
        let screen = Point2::new(200.0, 150.0);
        let ndc = screen_to_ndc(&screen, 800.0, 600.0);
        assert!((ndc.x + 0.5).abs() < 1e-6);
        assert!((ndc.y - 0.5).abs() < 1e-6);

        let back = ndc_to_screen(ndc.x, ndc.y, 800.0, 600.0);
        assert!((back - screen).norm() < 1e-4);
    }

    #[test]
    fn trs_applies_scale_then_rotation_then_translation() {
        let m = TransformFactory::trs(
            &Point3::new(1.0, 2.0, 3.0),
            &UnitQuaternion::from_axis_angle(&Vector3::y_axis(), std::f32::consts::FRAC_PI_2),
            &Vector3::new(2.0, 1.0, 1.0),
        );
        // (0, 0, 1) -> scaled (0, 0, 1) -> yaw 90 deg -> (1, 0, 0) -> translated
        let p = transform_point(&m, &Point3::new(0.0, 0.0, 1.0));
        assert!((p - Point3::new(2.0, 2.0, 3.0)).norm() < 1e-5);
    }

    #[test]
    fn rotation_y_matches_quaternion_yaw() {
        let angle = 0.7;
        let m = TransformFactory::rotation_y(angle);
        let q = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle);
        let v = Vector3::new(0.3, -1.0, 2.0);
        assert!((transform_vector(&m, &v) - q * v).norm() < 1e-5);
    }
}
