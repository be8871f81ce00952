//! The hero particle cloud.

mod component;
mod render;
mod state;

pub use component::ParticleCloud;
pub use state::{ParticleCloudConfig, ParticleState, Projected, TargetShape};
