//! Stretchable tabletop with corner handles and derived leg/chair layout.

pub mod box_mesh;
pub mod chairs;
pub mod component;
pub mod corners;
pub mod interaction;
pub mod legs;
pub mod settings;
pub mod stretch;

pub use component::{PointerOutcome, Table};
pub use corners::Corner;
pub use settings::{SetupError, TableSettings};
