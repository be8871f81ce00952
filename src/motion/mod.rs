//! Layout generation, interpolation and scheduling behind the animated canvases.
//!
//! Nothing in here touches the DOM; the components feed it sizes, pointer
//! positions and frame deltas, and paint whatever it hands back.

mod chaos;
mod easing;
mod interpolate;
mod layout;
mod scheduler;
mod scroll;
mod spring;
mod target;

pub use chaos::{ChaosConfig, ShellConfig, chaos_layout, sphere_shell};
pub use easing::Easing;
pub use interpolate::{OpacityRamp, Pointer, Repulsion, cloud_rotation, interpolate, repel};
pub use layout::{Dimensions, Drift, Edge, Layout, LayoutCache, Node, Position};
pub use scheduler::{
	AnimationContext, CycleConfig, CyclePhase, CycleSample, ProgressSample, ScheduleMode,
	Scheduler, sample_cycle,
};
pub use scroll::scroll_progress;
pub use spring::{Spring, SpringConfig};
pub use target::{
	DECISION_NODE, PIPELINE_EDGES, PIPELINE_NODE_COUNT, STAGE_LABELS, grid_shape, icon_shape,
	pipeline_layout, stage_label_x,
};
