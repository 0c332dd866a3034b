pub mod app;
pub mod core;
pub mod io;
pub mod scene;
pub mod table;
pub mod ui;
