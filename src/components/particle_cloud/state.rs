use glam::{DVec2, DVec3};

use crate::motion::{
	AnimationContext, CycleConfig, Dimensions, Easing, Layout, ProgressSample, ScheduleMode,
	Scheduler, ShellConfig, SpringConfig, cloud_rotation, grid_shape, icon_shape, interpolate,
	sphere_shell,
};

/// What the cloud organizes into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TargetShape {
	/// Flat square grid with `spacing` between points.
	Grid { spacing: f64 },
	/// Cube over a ring and floor grid, scaled by `scale`.
	Icon { scale: f64 },
}

impl TargetShape {
	/// Target layout for `count` particles.
	pub fn build(&self, count: usize) -> Layout<DVec3> {
		match *self {
			TargetShape::Grid { spacing } => grid_shape(count, spacing),
			TargetShape::Icon { scale } => icon_shape(count, scale),
		}
	}
}

/// Settings for the hero particle cloud.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleCloudConfig {
	/// Number of particles.
	pub count: usize,
	/// Shell seed.
	pub seed: u64,
	/// Chaotic shell settings.
	pub shell: ShellConfig,
	/// What the cloud organizes into.
	pub shape: TargetShape,
	/// Curve applied to raw progress.
	pub easing: Easing,
	/// Follower used for scroll input.
	pub spring: SpringConfig,
	/// Timings used while autonomous.
	pub cycle: CycleConfig,
	/// Cycle on a timer instead of following scroll.
	pub autoplay: bool,
	/// Ambient clock speed relative to wall time.
	pub time_scale: f64,
	/// Camera distance from the origin along z.
	pub camera_distance: f64,
	/// Vertical field of view.
	pub fov_degrees: f64,
	/// Point size in world units.
	pub point_size: f64,
}

impl Default for ParticleCloudConfig {
	fn default() -> Self {
		Self {
			count: 1500,
			seed: 0xC10D,
			shell: ShellConfig::default(),
			shape: TargetShape::Icon { scale: 1.6 },
			easing: Easing::Linear,
			spring: SpringConfig::critical(40.0),
			cycle: CycleConfig {
				gather: 2.4,
				hold_formed: 4.0,
				scatter: 1.8,
				hold_chaotic: 3.0,
				..CycleConfig::default()
			},
			autoplay: false,
			time_scale: 0.3,
			camera_distance: 8.0,
			fov_degrees: 55.0,
			point_size: 0.04,
		}
	}
}

/// A particle projected onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	/// Canvas position in CSS pixels.
	pub screen: DVec2,
	/// Pixels per world unit at this depth.
	pub scale: f64,
}

/// Everything the particle cloud needs between frames.
pub struct ParticleState {
	/// Settings this state was built from.
	pub config: ParticleCloudConfig,
	/// Canvas width in CSS pixels.
	pub width: f64,
	/// Canvas height in CSS pixels.
	pub height: f64,
	chaos: Layout<DVec3>,
	target: Layout<DVec3>,
	scheduler: Scheduler,
	ctx: AnimationContext,
	pending_resize: Option<Dimensions>,
	positions: Vec<DVec3>,
	sample: ProgressSample,
	rotation: f64,
	mutations: u64,
}

impl ParticleState {
	/// Builds both layouts; they depend only on the particle count.
	pub fn new(config: ParticleCloudConfig, width: f64, height: f64) -> Self {
		let chaos = sphere_shell(config.seed, config.count, &config.shell);
		let target = config.shape.build(config.count);
		let mode = if config.autoplay {
			ScheduleMode::Autonomous(config.cycle)
		} else {
			ScheduleMode::Interactive(config.spring)
		};
		let scheduler = Scheduler::new(mode, config.easing);
		let sample = scheduler.last();
		let positions = Vec::with_capacity(config.count);
		Self {
			config,
			width,
			height,
			chaos,
			target,
			scheduler,
			ctx: AnimationContext::new(),
			pending_resize: None,
			positions,
			sample,
			rotation: 0.0,
			mutations: 0,
		}
	}

	/// Scroll position of the hero, `[0, 1]`.
	pub fn set_scroll(&mut self, progress: f64) {
		self.scheduler.set_progress(progress);
	}

	/// Queues a new canvas size for the next frame.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.pending_resize = Some(Dimensions::new(width, height));
	}

	/// Runs one frame. Returns `false` once torn down.
	pub fn frame(&mut self, dt: f64) -> bool {
		if self.ctx.is_cancelled() {
			return false;
		}
		if let Some(dims) = self.pending_resize.take() {
			if dims.is_degenerate() {
				log::debug!("particle cloud keeps {}x{}", self.width, self.height);
			} else {
				self.width = dims.width;
				self.height = dims.height;
			}
		}
		let Some(sample) = self.scheduler.tick(&mut self.ctx, dt) else {
			return false;
		};
		self.sample = sample;

		let time = self.ctx.elapsed() * self.config.time_scale;
		interpolate(
			&self.chaos,
			&self.target,
			sample.eased,
			time,
			&mut self.positions,
		);
		self.rotation = cloud_rotation(time, sample.progress);
		self.mutations += 1;
		true
	}

	/// Stops the session. Later frames are no-ops.
	pub fn teardown(&mut self) {
		self.ctx.cancel();
	}

	/// World positions for the last frame.
	pub fn positions(&self) -> &[DVec3] {
		&self.positions
	}

	/// Progress for the last frame.
	pub fn sample(&self) -> ProgressSample {
		self.sample
	}

	/// Y rotation in radians for the last frame.
	pub fn rotation(&self) -> f64 {
		self.rotation
	}

	/// Writes to the position buffer so far.
	pub fn mutations(&self) -> u64 {
		self.mutations
	}

	/// Perspective projection after the cloud's Y rotation. `None` behind the
	/// camera or when the canvas has no size.
	pub fn project(&self, p: DVec3) -> Option<Projected> {
		if Dimensions::new(self.width, self.height).is_degenerate() {
			return None;
		}
		let (sin, cos) = self.rotation.sin_cos();
		let x = p.x * cos + p.z * sin;
		let z = -p.x * sin + p.z * cos;
		let depth = self.config.camera_distance - z;
		if depth <= 0.1 {
			return None;
		}
		let focal = (self.height / 2.0) / (self.config.fov_degrees.to_radians() / 2.0).tan();
		let scale = focal / depth;
		Some(Projected {
			screen: DVec2::new(self.width / 2.0 + x * scale, self.height / 2.0 - p.y * scale),
			scale,
		})
	}
}
