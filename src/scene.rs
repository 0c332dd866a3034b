pub mod camera;
pub mod context;
pub mod host;
pub mod loader;
pub mod mesh;
pub mod scene_object;
pub mod world;
