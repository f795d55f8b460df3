pub mod meshes;
pub mod physics;
pub mod plugin;
pub mod settle;
pub mod systems;
pub mod throw_control;
pub mod types;

pub use meshes::*;
pub use physics::*;
pub use plugin::*;
pub use settle::*;
pub use systems::*;
pub use throw_control::*;
pub use types::*;
