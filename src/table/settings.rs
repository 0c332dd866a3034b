use crate::io::obj_loader::LoadError;
use crate::scene::host::{Layer, Template};
use crate::table::stretch::MinDimension;
use nalgebra::Matrix4;
use thiserror::Error;

/// Anything that stops a table from being built. Reported once, at startup.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("tabletop {axis} ({value}) must be larger than its minimum ({min})")]
    BelowMinimum { axis: &'static str, value: f32, min: f32 },
    #[error("leg distance from corner must not be negative, got [{x}, {z}]")]
    NegativeLegDistance { x: f32, z: f32 },
    #[error("chairs are laid out between legs, a [leg] section is required")]
    ChairWithoutLegs,
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),
    #[error("template '{0}' is defined more than once")]
    DuplicateTemplate(String),
    #[error("handle template '{0}' must be on the handle layer")]
    HandleNotPickable(String),
    #[error("template '{name}' needs exactly one of `footprint` or `mesh`")]
    AmbiguousTemplate { name: String },
    #[error("template '{name}' has a non-positive footprint")]
    EmptyFootprint { name: String },
    #[error("template '{name}': {source}")]
    TemplateLoad {
        name: String,
        #[source]
        source: LoadError,
    },
    #[error("session frame {index} needs exactly one of `pointer` or `world`")]
    AmbiguousSessionFrame { index: usize },
    #[error("table root transform is not invertible")]
    SingularRootTransform,
}

/// Tabletop slab and its handles.
#[derive(Debug, Clone)]
pub struct TabletopSettings {
    pub width: f32,
    pub thickness: f32,
    pub depth: f32,
    /// Elevation of the slab bottom above the floor.
    pub base_height: f32,
    pub min: MinDimension,
    pub handle: Template,
}

#[derive(Debug, Clone)]
pub struct LegSettings {
    pub template: Template,
    /// Horizontal distance of each leg's outer face from its corner, `[x, z]`.
    pub distance: [f32; 2],
}

#[derive(Debug, Clone)]
pub struct ChairSettings {
    pub template: Template,
    /// Minimum gap between a chair and any neighbour (chair or leg).
    pub padding: f32,
}

/// Everything needed to build a [`crate::table::Table`].
#[derive(Debug, Clone)]
pub struct TableSettings {
    pub tabletop: TabletopSettings,
    pub leg: Option<LegSettings>,
    pub chair: Option<ChairSettings>,
    /// Table root in world space.
    pub root: Matrix4<f32>,
}

fn positive(field: &'static str, value: f32) -> Result<(), SetupError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(SetupError::NotPositive { field, value })
    }
}

fn footprint_positive(template: &Template) -> Result<(), SetupError> {
    let size = template.footprint();
    if size.x > 0.0 && size.z > 0.0 {
        Ok(())
    } else {
        Err(SetupError::EmptyFootprint {
            name: template.name.clone(),
        })
    }
}

impl TableSettings {
    /// Checks every precondition the table relies on during interaction.
    pub fn validate(&self) -> Result<(), SetupError> {
        let t = &self.tabletop;

        positive("tabletop thickness", t.thickness)?;
        positive("tabletop height", t.base_height)?;
        positive("minimum width", t.min.width)?;
        positive("minimum depth", t.min.depth)?;
        // Comparisons are phrased so NaN fails them.
        if !(t.width > t.min.width) {
            return Err(SetupError::BelowMinimum {
                axis: "width",
                value: t.width,
                min: t.min.width,
            });
        }
        if !(t.depth > t.min.depth) {
            return Err(SetupError::BelowMinimum {
                axis: "depth",
                value: t.depth,
                min: t.min.depth,
            });
        }
        if t.handle.layer != Layer::Handle {
            return Err(SetupError::HandleNotPickable(t.handle.name.clone()));
        }

        if let Some(leg) = &self.leg {
            let [x, z] = leg.distance;
            if !(x >= 0.0 && z >= 0.0) {
                return Err(SetupError::NegativeLegDistance { x, z });
            }
            footprint_positive(&leg.template)?;
        }

        if let Some(chair) = &self.chair {
            if self.leg.is_none() {
                return Err(SetupError::ChairWithoutLegs);
            }
            positive("chair padding", chair.padding)?;
            footprint_positive(&chair.template)?;
        }

        if !self.root.iter().all(|v| v.is_finite()) || self.root.try_inverse().is_none() {
            return Err(SetupError::SingularRootTransform);
        }

        Ok(())
    }
}
