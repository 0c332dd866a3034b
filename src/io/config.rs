use crate::scene::host::Layer;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tabletop: TabletopConfig,
    /// Absent section: no legs (and therefore no chairs).
    #[serde(default)]
    pub leg: Option<LegConfig>,
    /// Absent section: no chairs.
    #[serde(default)]
    pub chair: Option<ChairConfig>,
    #[serde(default = "default_templates")]
    pub templates: Vec<TemplateConfig>,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub plan: PlanConfig,
    #[serde(default)]
    pub session: Vec<SessionFrame>,

    /// Directory relative template meshes are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tabletop: TabletopConfig::default(),
            leg: Some(LegConfig::default()),
            chair: Some(ChairConfig::default()),
            templates: default_templates(),
            camera: CameraConfig::default(),
            viewport: ViewportConfig::default(),
            plan: PlanConfig::default(),
            session: default_session(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Config = toml::from_str(&content)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config)
    }
}

//=================================
// Table
//=================================

#[derive(Debug, Clone, Deserialize)]
pub struct TabletopConfig {
    /// Width, thickness, depth.
    #[serde(default = "default_dimension")]
    pub dimension: [f32; 3],
    /// Elevation of the slab bottom.
    #[serde(default = "default_height")]
    pub height: f32,
    /// Minimum width and depth.
    #[serde(default = "default_min_dimension")]
    pub min_dimension: [f32; 2],
    #[serde(default = "default_handle_template")]
    pub handle: String,

    // --- Placement in the world ---
    #[serde(default)]
    pub position: [f32; 3],
    /// Degrees around +Y.
    #[serde(default)]
    pub yaw: f32,
}

impl Default for TabletopConfig {
    fn default() -> Self {
        Self {
            dimension: default_dimension(),
            height: default_height(),
            min_dimension: default_min_dimension(),
            handle: default_handle_template(),
            position: [0.0; 3],
            yaw: 0.0,
        }
    }
}

fn default_dimension() -> [f32; 3] {
    [2.0, 0.05, 1.5]
}
fn default_height() -> f32 {
    0.75
}
fn default_min_dimension() -> [f32; 2] {
    [0.5, 0.5]
}
fn default_handle_template() -> String {
    "handle".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegConfig {
    #[serde(default = "default_leg_template")]
    pub template: String,
    /// Distance from the corner on x and z.
    #[serde(default = "default_leg_distance")]
    pub distance: [f32; 2],
}

impl Default for LegConfig {
    fn default() -> Self {
        Self {
            template: default_leg_template(),
            distance: default_leg_distance(),
        }
    }
}

fn default_leg_template() -> String {
    "leg".to_string()
}
fn default_leg_distance() -> [f32; 2] {
    [0.05, 0.05]
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChairConfig {
    #[serde(default = "default_chair_template")]
    pub template: String,
    /// Minimum space between a chair and any other chair or leg.
    #[serde(default = "default_padding")]
    pub padding: f32,
}

impl Default for ChairConfig {
    fn default() -> Self {
        Self {
            template: default_chair_template(),
            padding: default_padding(),
        }
    }
}

fn default_chair_template() -> String {
    "chair".to_string()
}
fn default_padding() -> f32 {
    0.1
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    pub name: String,
    /// Explicit size of the visual, centred on the template origin.
    pub footprint: Option<[f32; 3]>,
    /// OBJ file to measure instead of `footprint`.
    pub mesh: Option<String>,
    #[serde(default)]
    pub layer: Layer,
}

fn default_templates() -> Vec<TemplateConfig> {
    vec![
        TemplateConfig {
            name: "handle".to_string(),
            footprint: Some([1.0, 1.0, 1.0]),
            mesh: None,
            layer: Layer::Handle,
        },
        TemplateConfig {
            name: "leg".to_string(),
            footprint: Some([0.08, 1.0, 0.08]),
            mesh: None,
            layer: Layer::Default,
        },
        TemplateConfig {
            name: "chair".to_string(),
            footprint: Some([0.45, 0.9, 0.45]),
            mesh: None,
            layer: Layer::Default,
        },
    ]
}

//=================================
// Viewing
//=================================

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_projection")]
    pub projection: String, // "perspective", "orthographic"
    #[serde(default = "default_ortho_height")]
    pub ortho_height: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            target: [0.0, 0.0, 0.0],
            up: default_up(),
            fov: default_fov(),
            projection: default_projection(),
            ortho_height: default_ortho_height(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 4.0, 5.0]
}
fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}
fn default_fov() -> f32 {
    45.0
}
fn default_projection() -> String {
    "perspective".to_string()
}
fn default_ortho_height() -> f32 {
    5.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_viewport_width")]
    pub width: usize,
    #[serde(default = "default_viewport_height")]
    pub height: usize,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
        }
    }
}

fn default_viewport_width() -> usize {
    1280
}
fn default_viewport_height() -> usize {
    720
}

/// Top-view snapshot written after a headless session.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_plan_output")]
    pub output: String,
    #[serde(default = "default_pixels_per_unit")]
    pub pixels_per_unit: f32,
    /// World units of empty border around the table and chairs.
    #[serde(default = "default_margin")]
    pub margin: f32,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            output: default_plan_output(),
            pixels_per_unit: default_pixels_per_unit(),
            margin: default_margin(),
        }
    }
}

fn default_plan_output() -> String {
    "table_plan.png".to_string()
}
fn default_pixels_per_unit() -> f32 {
    200.0
}
fn default_margin() -> f32 {
    0.5
}

//=================================
// Scripted Session
//=================================

/// One frame of pointer input. Exactly one of `pointer` (screen pixels) or
/// `world` (a point projected through the camera) must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionFrame {
    pub pointer: Option<[f32; 2]>,
    pub world: Option<[f32; 3]>,
    #[serde(default)]
    pub primary_down: bool,
}

impl SessionFrame {
    fn world(p: [f32; 3], primary_down: bool) -> Self {
        Self {
            pointer: None,
            world: Some(p),
            primary_down,
        }
    }
}

/// Grabs the north-east handle and pulls it outwards, then pushes the
/// south-west handle inwards.
fn default_session() -> Vec<SessionFrame> {
    let y = default_height() + default_dimension()[1] * 0.5;
    vec![
        SessionFrame::world([1.0, y, 0.75], false),
        SessionFrame::world([1.0, y, 0.75], true),
        SessionFrame::world([1.3, y, 0.9], true),
        SessionFrame::world([1.6, y, 1.1], true),
        SessionFrame::world([1.6, y, 1.1], false),
        SessionFrame::world([-1.0, y, -0.75], false),
        SessionFrame::world([-1.0, y, -0.75], true),
        SessionFrame::world([-0.2, y, -0.5], true),
        SessionFrame::world([-0.2, y, -0.5], false),
    ]
}
