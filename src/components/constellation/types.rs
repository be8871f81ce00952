use crate::motion::{
	ChaosConfig, CycleConfig, CyclePhase, Easing, OpacityRamp, Repulsion, ScheduleMode,
	SpringConfig,
};

/// One stop of the walkthrough.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
	/// Button text.
	pub label: &'static str,
	/// One-line explanation.
	pub description: &'static str,
}

/// Walkthrough stops, from chaos to the full pipeline.
pub const STEPS: [Step; 4] = [
	Step {
		label: "Chaos",
		description: "Raw unstructured data nodes",
	},
	Step {
		label: "Clustering",
		description: "Nodes grouping by signal type",
	},
	Step {
		label: "Organizing",
		description: "Pipeline stages forming",
	},
	Step {
		label: "Orchestrated",
		description: "Intelligence pipeline active",
	},
];

/// Status text shown while the cycle runs on its own.
pub fn phase_label(phase: CyclePhase) -> &'static str {
	match phase {
		CyclePhase::Idle => "waiting",
		CyclePhase::Gathering => "organizing",
		CyclePhase::HoldingFormed => "orchestrated",
		CyclePhase::Scattering => "dispersing",
		CyclePhase::HoldingChaotic => "chaos",
	}
}

/// Settings for the constellation canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstellationConfig {
	/// Chaos layout seed.
	pub seed: u64,
	/// Scatter settings.
	pub chaos: ChaosConfig,
	/// Pointer push-away.
	pub repulsion: Repulsion,
	/// Edge fade-in.
	pub edge_opacity: OpacityRamp,
	/// Stage label fade-in.
	pub label_opacity: OpacityRamp,
	/// Curve applied to raw progress.
	pub easing: Easing,
	/// Follower used while interactive.
	pub spring: SpringConfig,
	/// Timings used while autonomous.
	pub cycle: CycleConfig,
	/// Start in the timed cycle rather than following user input.
	pub autoplay: bool,
}

impl ConstellationConfig {
	/// Scheduler mode for the given autoplay flag.
	pub fn mode(&self, autoplay: bool) -> ScheduleMode {
		if autoplay {
			ScheduleMode::Autonomous(self.cycle)
		} else {
			ScheduleMode::Interactive(self.spring)
		}
	}
}

impl Default for ConstellationConfig {
	fn default() -> Self {
		Self {
			seed: 0x5EED_C0DE,
			chaos: ChaosConfig::default(),
			repulsion: Repulsion::default(),
			edge_opacity: OpacityRamp::EDGES,
			label_opacity: OpacityRamp::LABELS,
			easing: Easing::HOUSE,
			spring: SpringConfig::default(),
			cycle: CycleConfig::default(),
			autoplay: false,
		}
	}
}
