use glam::DVec2;

use super::types::{ConstellationConfig, STEPS};
use crate::motion::{
	AnimationContext, Dimensions, Edge, LayoutCache, PIPELINE_EDGES, PIPELINE_NODE_COUNT, Pointer,
	ProgressSample, Scheduler, chaos_layout, interpolate, pipeline_layout, repel,
};

pub(crate) const NODE_RADIUS: f64 = 5.0;
pub(crate) const DECISION_RADIUS: f64 = 8.0;

/// Everything the constellation canvas needs between frames.
pub struct ConstellationState {
	/// Settings this state was built from.
	pub config: ConstellationConfig,
	/// Canvas width in CSS pixels.
	pub width: f64,
	/// Canvas height in CSS pixels.
	pub height: f64,
	/// Last known pointer.
	pub pointer: Pointer,
	/// Index into `STEPS` shown as status.
	pub step: usize,
	layouts: LayoutCache<DVec2>,
	scheduler: Scheduler,
	ctx: AnimationContext,
	pending_resize: Option<Dimensions>,
	positions: Vec<DVec2>,
	sample: ProgressSample,
	mutations: u64,
}

impl ConstellationState {
	/// Builds layouts for the initial size.
	pub fn new(config: ConstellationConfig, width: f64, height: f64) -> Self {
		let scheduler = Scheduler::new(config.mode(config.autoplay), config.easing);
		let sample = scheduler.last();
		let mut state = Self {
			config,
			width,
			height,
			pointer: Pointer::Away,
			step: 0,
			layouts: LayoutCache::new(),
			scheduler,
			ctx: AnimationContext::new(),
			pending_resize: None,
			positions: Vec::with_capacity(PIPELINE_NODE_COUNT),
			sample,
			mutations: 0,
		};
		state.regenerate(Dimensions::new(width, height));
		state
	}

	/// Queues a new container size; applied at the start of the next frame.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.pending_resize = Some(Dimensions::new(width, height));
	}

	/// Updates the repulsion source.
	pub fn set_pointer(&mut self, pointer: Pointer) {
		self.pointer = pointer;
	}

	/// Heads for step `step`, clamped to the last one.
	pub fn set_step(&mut self, step: usize) {
		self.step = step.min(STEPS.len() - 1);
		self.scheduler.set_step(self.step, STEPS.len());
	}

	/// Scrubs to an arbitrary progress; the status step follows the nearest one.
	pub fn set_progress(&mut self, progress: f64) {
		let progress = if progress.is_finite() { progress.clamp(0.0, 1.0) } else { 0.0 };
		self.step = (progress * (STEPS.len() - 1) as f64).round() as usize;
		self.scheduler.set_progress(progress);
	}

	/// Switches between the timed cycle and following user input.
	pub fn set_autoplay(&mut self, autoplay: bool) {
		let mode = self.config.mode(autoplay);
		self.scheduler.set_mode(mode, &self.ctx);
		self.config.autoplay = autoplay;
	}

	/// True while the timed cycle runs.
	pub fn is_autonomous(&self) -> bool {
		self.scheduler.is_autonomous()
	}

	/// Runs one frame: re-measure, re-layout, schedule, interpolate, repel.
	///
	/// Returns `false` once torn down; the position buffer is left alone.
	pub fn frame(&mut self, dt: f64) -> bool {
		if self.ctx.is_cancelled() {
			return false;
		}
		if let Some(dims) = self.pending_resize.take() {
			self.regenerate(dims);
		}
		let Some(sample) = self.scheduler.tick(&mut self.ctx, dt) else {
			return false;
		};
		self.sample = sample;

		interpolate(
			self.layouts.chaos(),
			self.layouts.target(),
			sample.eased,
			self.ctx.elapsed(),
			&mut self.positions,
		);
		repel(&mut self.positions, self.pointer, &self.config.repulsion);
		self.mutations += 1;
		true
	}

	/// Stops the session. Later frames are no-ops.
	pub fn teardown(&mut self) {
		if !self.ctx.is_cancelled() {
			log::debug!("constellation torn down after {} ticks", self.ctx.ticks());
		}
		self.ctx.cancel();
	}

	/// True after `teardown`.
	pub fn is_torn_down(&self) -> bool {
		self.ctx.is_cancelled()
	}

	/// Node positions for the last frame.
	pub fn positions(&self) -> &[DVec2] {
		&self.positions
	}

	/// Pipeline edges to draw.
	pub fn edges(&self) -> &'static [Edge] {
		&PIPELINE_EDGES
	}

	/// Progress for the last frame.
	pub fn sample(&self) -> ProgressSample {
		self.sample
	}

	/// Edge alpha for the last frame.
	pub fn edge_opacity(&self) -> f64 {
		self.config.edge_opacity.at(self.sample.eased)
	}

	/// Stage label alpha for the last frame.
	pub fn label_opacity(&self) -> f64 {
		self.config.label_opacity.at(self.sample.eased)
	}

	/// Writes to the position buffer so far.
	pub fn mutations(&self) -> u64 {
		self.mutations
	}

	/// How many times layouts were rebuilt.
	pub fn layout_generations(&self) -> u64 {
		self.layouts.generations()
	}

	fn regenerate(&mut self, dims: Dimensions) {
		let seed = self.config.seed;
		let chaos_config = self.config.chaos.clone();
		let rebuilt = self.layouts.update(dims, |dims| {
			let chaos = chaos_layout(seed, PIPELINE_NODE_COUNT, dims, &chaos_config)?;
			let target = pipeline_layout(dims)?;
			Some((chaos, target))
		});
		if rebuilt {
			self.width = dims.width;
			self.height = dims.height;
			log::debug!("constellation layout rebuilt for {}x{}", dims.width, dims.height);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::motion::{CyclePhase, Easing};

	fn state() -> ConstellationState {
		ConstellationState::new(ConstellationConfig::default(), 800.0, 420.0)
	}

	#[test]
	fn first_frame_fills_every_node() {
		let mut s = state();
		assert!(s.frame(0.016));
		assert_eq!(s.positions().len(), PIPELINE_NODE_COUNT);
		assert_eq!(s.mutations(), 1);
	}

	#[test]
	fn last_step_organizes_the_pipeline() {
		let mut s = state();
		s.set_step(STEPS.len() - 1);
		for _ in 0..600 {
			s.frame(1.0 / 60.0);
		}
		let target = pipeline_layout(Dimensions::new(800.0, 420.0)).unwrap();
		for (p, t) in s.positions().iter().zip(target.positions()) {
			assert!(p.distance(t) < 1e-6, "{p} vs {t}");
		}
		assert_eq!(s.edge_opacity(), 1.0);
		assert_eq!(s.label_opacity(), 1.0);
	}

	#[test]
	fn scrubbing_tracks_nearest_step() {
		let mut s = state();
		s.set_progress(0.7);
		assert_eq!(s.step, 2);
		s.set_progress(f64::NAN);
		assert_eq!(s.step, 0);
	}

	#[test]
	fn chaos_hides_edges_and_labels() {
		let mut s = state();
		s.frame(0.016);
		assert_eq!(s.edge_opacity(), 0.0);
		assert_eq!(s.label_opacity(), 0.0);
	}

	#[test]
	fn resize_is_applied_on_next_frame() {
		let mut s = state();
		s.resize(1200.0, 500.0);
		assert_eq!(s.width, 800.0);
		s.frame(0.016);
		assert_eq!((s.width, s.height), (1200.0, 500.0));
		assert_eq!(s.layout_generations(), 2);
	}

	#[test]
	fn zero_size_keeps_last_layout() {
		let mut s = state();
		s.frame(0.016);
		s.resize(0.0, 0.0);
		s.frame(0.016);
		assert_eq!((s.width, s.height), (800.0, 420.0));
		assert_eq!(s.layout_generations(), 1);
		assert_eq!(s.positions().len(), PIPELINE_NODE_COUNT);
	}

	#[test]
	fn starting_with_zero_size_recovers_later() {
		let mut s = ConstellationState::new(ConstellationConfig::default(), 0.0, 0.0);
		s.frame(0.016);
		assert!(s.positions().is_empty());
		s.resize(640.0, 400.0);
		s.frame(0.016);
		assert_eq!(s.positions().len(), PIPELINE_NODE_COUNT);
	}

	#[test]
	fn teardown_freezes_the_buffer() {
		let mut s = state();
		s.frame(0.016);
		s.teardown();
		let (count, snapshot) = (s.mutations(), s.positions().to_vec());
		for _ in 0..10 {
			assert!(!s.frame(0.016));
		}
		assert_eq!(s.mutations(), count);
		assert_eq!(s.positions(), snapshot.as_slice());
	}

	#[test]
	fn pointer_pushes_nearby_nodes() {
		let mut calm = state();
		let mut poked = state();
		calm.frame(0.016);
		let victim = calm.positions()[0];
		poked.set_pointer(Pointer::At(victim + DVec2::new(1.0, 0.0)));
		poked.frame(0.016);
		assert!(poked.positions()[0].x < victim.x);
	}

	#[test]
	fn autonomous_mode_gathers_by_itself() {
		let config = ConstellationConfig {
			autoplay: true,
			easing: Easing::Linear,
			..ConstellationConfig::default()
		};
		let gather = config.cycle.gather;
		let mut s = ConstellationState::new(config, 800.0, 420.0);
		s.frame(gather + 0.5);
		assert_eq!(s.sample().progress, 1.0);
		assert_eq!(s.sample().phase, Some(CyclePhase::HoldingFormed));
		assert_eq!(s.edge_opacity(), 1.0);
	}

	#[test]
	fn toggling_autoplay_hands_control_back() {
		let mut s = state();
		s.set_autoplay(true);
		assert!(s.is_autonomous());
		s.set_progress(1.0);
		s.frame(0.016);
		assert!(s.sample().progress < 0.1);
		s.set_autoplay(false);
		s.set_progress(1.0);
		for _ in 0..600 {
			s.frame(1.0 / 60.0);
		}
		assert_eq!(s.sample().progress, 1.0);
	}
}
