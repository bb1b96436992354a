pub mod angle;
pub mod beam;
pub mod config;
pub mod fov;
pub mod frontier;
pub mod grid;
pub mod hex;
pub mod scenario;
pub mod sector;

pub use angle::Angle;
pub use beam::{Beam, LightSink, OpacitySource};
pub use fov::{beam_view, field_of_view};
#[cfg(feature = "parallel")]
pub use fov::par_field_of_view;
pub use frontier::Frontier;
pub use grid::HexGrid;
pub use hex::{Direction, Hex};
pub use scenario::{Scenario, ScenarioError};
pub use sector::Sector;
