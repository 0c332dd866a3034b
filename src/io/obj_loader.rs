use crate::core::geometry::Bounds;
use log::info;
use nalgebra::Point3;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("'{0}' contains no vertices")]
    Empty(String),
}

/// Measures the bounds of every model in an OBJ file.
///
/// Only positions are read; templates need a footprint, not renderable geometry.
pub fn load_obj_bounds<P: AsRef<Path>>(path: P) -> Result<Bounds, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound(path.display().to_string()));
    }

    info!("Measuring OBJ file: {}", path.display());

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &load_options)?;

    let points: Vec<Point3<f32>> = models
        .iter()
        .flat_map(|model| model.mesh.positions.chunks_exact(3))
        .map(|p| Point3::new(p[0], p[1], p[2]))
        .collect();

    let bounds = Bounds::from_points(&points)
        .ok_or_else(|| LoadError::Empty(path.display().to_string()))?;

    info!(
        "OBJ measured: {} vertices, size {:.3} x {:.3} x {:.3}",
        points.len(),
        bounds.size().x,
        bounds.size().y,
        bounds.size().z
    );
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn measures_obj_positions() {
        let dir = std::env::temp_dir().join(format!("table-designer-obj-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("leg.obj");
        fs::write(
            &path,
            "v -0.05 0.0 -0.04\nv 0.05 0.0 -0.04\nv 0.05 1.0 0.04\nv -0.05 1.0 0.04\nf 1 2 3\nf 1 3 4\n",
        )
        .unwrap();

        let bounds = load_obj_bounds(&path).unwrap();
        assert!((bounds.size().x - 0.1).abs() < 1e-6);
        assert!((bounds.size().y - 1.0).abs() < 1e-6);
        assert!((bounds.size().z - 0.08).abs() < 1e-6);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(matches!(
            load_obj_bounds("does/not/exist.obj"),
            Err(LoadError::NotFound(_))
        ));
    }
}
