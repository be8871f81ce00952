//! The "chaos to pipeline" walkthrough canvas.

mod component;
mod render;
mod state;
mod types;

pub use component::ConstellationCanvas;
pub use state::ConstellationState;
pub use types::{ConstellationConfig, STEPS, Step};
