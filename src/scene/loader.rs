use crate::core::geometry::Bounds;
use crate::core::math::transform::TransformFactory;
use crate::io::config::{Config, SessionFrame};
use crate::io::obj_loader::load_obj_bounds;
use crate::scene::camera::Camera;
use crate::scene::context::SceneContext;
use crate::scene::host::Template;
use crate::scene::world::World;
use crate::table::settings::{ChairSettings, LegSettings, SetupError, TableSettings, TabletopSettings};
use crate::table::stretch::MinDimension;
use crate::table::Table;
use crate::ui::input::{PointerSample, PointerTracker};
use log::{info, warn};
use nalgebra::{Matrix4, Point2, Point3, Vector3};
use std::collections::HashMap;

/// Resolves every `[[templates]]` entry into measured bounds.
pub fn resolve_templates(config: &Config) -> Result<HashMap<String, Template>, SetupError> {
    let mut templates = HashMap::new();

    for t in &config.templates {
        let bounds = match (&t.footprint, &t.mesh) {
            (Some(size), None) => Bounds::from_center_size(Point3::origin(), Vector3::from(*size)),
            (None, Some(mesh)) => load_obj_bounds(config.base_dir.join(mesh)).map_err(|source| {
                SetupError::TemplateLoad {
                    name: t.name.clone(),
                    source,
                }
            })?,
            _ => {
                return Err(SetupError::AmbiguousTemplate {
                    name: t.name.clone(),
                });
            }
        };

        let template = Template {
            name: t.name.clone(),
            bounds,
            layer: t.layer,
        };
        if templates.insert(t.name.clone(), template).is_some() {
            return Err(SetupError::DuplicateTemplate(t.name.clone()));
        }
    }

    Ok(templates)
}

fn lookup(templates: &HashMap<String, Template>, name: &str) -> Result<Template, SetupError> {
    templates
        .get(name)
        .cloned()
        .ok_or_else(|| SetupError::UnknownTemplate(name.to_string()))
}

/// Table root placement in the world.
pub fn root_transform(config: &Config) -> Matrix4<f32> {
    TransformFactory::translation(&Vector3::from(config.tabletop.position))
        * TransformFactory::rotation_y(config.tabletop.yaw.to_radians())
}

/// Maps configuration sections onto table settings. Validation happens in [`Table::new`].
pub fn build_table_settings(
    config: &Config,
    templates: &HashMap<String, Template>,
) -> Result<TableSettings, SetupError> {
    let [width, thickness, depth] = config.tabletop.dimension;
    let [min_width, min_depth] = config.tabletop.min_dimension;

    let tabletop = TabletopSettings {
        width,
        thickness,
        depth,
        base_height: config.tabletop.height,
        min: MinDimension {
            width: min_width,
            depth: min_depth,
        },
        handle: lookup(templates, &config.tabletop.handle)?,
    };

    let leg = match &config.leg {
        Some(leg) => Some(LegSettings {
            template: lookup(templates, &leg.template)?,
            distance: leg.distance,
        }),
        None => None,
    };

    let chair = match &config.chair {
        Some(chair) => Some(ChairSettings {
            template: lookup(templates, &chair.template)?,
            padding: chair.padding,
        }),
        None => None,
    };

    Ok(TableSettings {
        tabletop,
        leg,
        chair,
        root: root_transform(config),
    })
}

/// Converts scripted frames into pointer samples for the world's camera.
pub fn resolve_session(
    frames: &[SessionFrame],
    world: &World,
) -> Result<Vec<PointerSample>, SetupError> {
    frames
        .iter()
        .enumerate()
        .map(|(index, frame)| {
            let position = match (frame.pointer, frame.world) {
                (Some(p), None) => Some(Point2::from(p)),
                (None, Some(w)) => {
                    let screen = world.world_to_screen(&Point3::from(w));
                    if screen.is_none() {
                        warn!("Session frame {} is behind the camera, pointer left out", index);
                    }
                    screen
                }
                _ => return Err(SetupError::AmbiguousSessionFrame { index }),
            };
            Ok(PointerSample::new(position, frame.primary_down))
        })
        .collect()
}

/// Builds the world, the table and its pointer tracker from configuration.
pub fn init_scene(config: &Config) -> Result<SceneContext, SetupError> {
    let (width, height) = (
        config.viewport.width.max(1) as f32,
        config.viewport.height.max(1) as f32,
    );
    let camera = Camera::from_config(&config.camera, width / height);

    let templates = resolve_templates(config)?;
    let settings = build_table_settings(config, &templates)?;

    let mut world = World::new(camera, (width, height), settings.root);
    let table = Table::new(settings, &mut world)?;

    info!(
        "Scene initialized: {} templates, {} objects.",
        templates.len(),
        world.objects().count()
    );

    Ok(SceneContext {
        world,
        table,
        tracker: PointerTracker::new(),
    })
}
