use super::easing::Easing;
use super::spring::{Spring, SpringConfig};

/// Per-session animation state, created on mount and cancelled on unmount.
///
/// Everything that ticks receives it by reference; nothing reads ambient
/// clocks.
#[derive(Clone, Debug, Default)]
pub struct AnimationContext {
	elapsed: f64,
	ticks: u64,
	cancelled: bool,
}

impl AnimationContext {
	/// A fresh, running context.
	pub fn new() -> Self {
		Self::default()
	}

	/// Seconds advanced since mount.
	pub fn elapsed(&self) -> f64 {
		self.elapsed
	}

	/// Frames advanced so far.
	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	/// True once `cancel` has run.
	pub fn is_cancelled(&self) -> bool {
		self.cancelled
	}

	/// Stops the context; `advance` refuses from here on.
	pub fn cancel(&mut self) {
		self.cancelled = true;
	}

	/// Advances the clock. Returns `false` (and does nothing) once cancelled.
	pub fn advance(&mut self, dt: f64) -> bool {
		if self.cancelled {
			return false;
		}
		if dt.is_finite() && dt > 0.0 {
			self.elapsed += dt;
		}
		self.ticks += 1;
		true
	}
}

/// Where the autonomous cycle is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CyclePhase {
	/// Before the first gather, or a zero-length cycle.
	Idle,
	/// Chaos forming into the target.
	Gathering,
	/// Resting on the target.
	HoldingFormed,
	/// Target dissolving back into chaos.
	Scattering,
	/// Resting in chaos.
	HoldingChaotic,
}

/// Phase lengths in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleConfig {
	/// Idle time before the first gather.
	pub start_delay: f64,
	/// Chaos to target.
	pub gather: f64,
	/// Rest on the target.
	pub hold_formed: f64,
	/// Target to chaos.
	pub scatter: f64,
	/// Rest in chaos.
	pub hold_chaotic: f64,
}

impl Default for CycleConfig {
	fn default() -> Self {
		Self {
			start_delay: 0.0,
			gather: 2.0,
			hold_formed: 3.0,
			scatter: 1.6,
			hold_chaotic: 2.5,
		}
	}
}

impl CycleConfig {
	/// Length of one loop, excluding the start delay.
	pub fn cycle_length(&self) -> f64 {
		self.gather.max(0.0)
			+ self.hold_formed.max(0.0)
			+ self.scatter.max(0.0)
			+ self.hold_chaotic.max(0.0)
	}
}

/// The cycle at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleSample {
	/// Current phase.
	pub phase: CyclePhase,
	/// Progress through the current phase, `[0, 1]`.
	pub phase_progress: f64,
	/// Raw morph progress, `[0, 1]`.
	pub progress: f64,
}

/// Gather → hold → scatter → hold, looping. Computed from total elapsed time,
/// so any instant can be sampled directly.
pub fn sample_cycle(config: &CycleConfig, elapsed: f64) -> CycleSample {
	let idle = CycleSample {
		phase: CyclePhase::Idle,
		phase_progress: 0.0,
		progress: 0.0,
	};
	let length = config.cycle_length();
	if !(length > 0.0) || !elapsed.is_finite() || elapsed < config.start_delay.max(0.0) {
		return idle;
	}

	let mut t = (elapsed - config.start_delay.max(0.0)) % length;
	let phases = [
		(CyclePhase::Gathering, config.gather.max(0.0)),
		(CyclePhase::HoldingFormed, config.hold_formed.max(0.0)),
		(CyclePhase::Scattering, config.scatter.max(0.0)),
		(CyclePhase::HoldingChaotic, config.hold_chaotic.max(0.0)),
	];
	for (phase, duration) in phases {
		if t < duration {
			let local = (t / duration).clamp(0.0, 1.0);
			let progress = match phase {
				CyclePhase::Gathering => local,
				CyclePhase::Scattering => 1.0 - local,
				CyclePhase::HoldingFormed => 1.0,
				CyclePhase::HoldingChaotic | CyclePhase::Idle => 0.0,
			};
			return CycleSample {
				phase,
				phase_progress: local,
				progress,
			};
		}
		t -= duration;
	}
	// Only reachable through rounding at the very end of the cycle.
	CycleSample {
		phase: CyclePhase::HoldingChaotic,
		phase_progress: 1.0,
		progress: 0.0,
	}
}

/// What drives progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScheduleMode {
	/// Progress follows user input through a spring.
	Interactive(SpringConfig),
	/// Progress loops through the timed cycle on its own.
	Autonomous(CycleConfig),
}

impl Default for ScheduleMode {
	fn default() -> Self {
		ScheduleMode::Interactive(SpringConfig::default())
	}
}

/// Progress for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressSample {
	/// Raw progress, `[0, 1]`.
	pub progress: f64,
	/// Progress after easing.
	pub eased: f64,
	/// Cycle phase; `None` while interactive.
	pub phase: Option<CyclePhase>,
}

/// Turns user commands or the cycle clock into a progress value per tick.
#[derive(Clone, Debug)]
pub struct Scheduler {
	mode: ScheduleMode,
	easing: Easing,
	spring: Spring,
	/// Context time at which the current cycle started.
	origin: f64,
	last: ProgressSample,
}

impl Scheduler {
	/// Starts at progress 0.
	pub fn new(mode: ScheduleMode, easing: Easing) -> Self {
		let spring_config = match mode {
			ScheduleMode::Interactive(config) => config,
			ScheduleMode::Autonomous(_) => SpringConfig::default(),
		};
		Self {
			mode,
			easing,
			spring: Spring::new(0.0, spring_config),
			origin: 0.0,
			last: ProgressSample {
				progress: 0.0,
				eased: 0.0,
				phase: match mode {
					ScheduleMode::Interactive(_) => None,
					ScheduleMode::Autonomous(_) => Some(CyclePhase::Idle),
				},
			},
		}
	}

	/// Current driver.
	pub fn mode(&self) -> ScheduleMode {
		self.mode
	}

	/// Switches mode mid-session without a visual jump: a new cycle starts
	/// now, and interactive mode picks up from the current progress.
	pub fn set_mode(&mut self, mode: ScheduleMode, ctx: &AnimationContext) {
		if mode == self.mode {
			return;
		}
		let current = self.last.progress;
		self.spring = Spring::new(current, match mode {
			ScheduleMode::Interactive(config) => config,
			ScheduleMode::Autonomous(_) => SpringConfig::default(),
		});
		if let ScheduleMode::Autonomous(config) = mode {
			// Enter the cycle where it matches what is on screen.
			let skip = if current >= 0.5 { config.gather.max(0.0) } else { 0.0 };
			self.origin = ctx.elapsed() - config.start_delay.max(0.0) - skip;
		}
		log::debug!("schedule mode {:?} -> {:?}", self.mode, mode);
		self.mode = mode;
	}

	/// True while the timed cycle drives progress.
	pub fn is_autonomous(&self) -> bool {
		matches!(self.mode, ScheduleMode::Autonomous(_))
	}

	/// Sets the interactive target, clamped to `[0, 1]`. Ignored while cycling.
	pub fn set_progress(&mut self, target: f64) {
		if self.is_autonomous() {
			log::debug!("ignoring progress command in autonomous mode");
			return;
		}
		let target = if target.is_finite() { target.clamp(0.0, 1.0) } else { 0.0 };
		self.spring.set_target(target);
	}

	/// Maps step `step` of `steps` onto `[0, 1]`.
	pub fn set_step(&mut self, step: usize, steps: usize) {
		let progress = if steps > 1 {
			step.min(steps - 1) as f64 / (steps - 1) as f64
		} else {
			0.0
		};
		self.set_progress(progress);
	}

	/// Jumps to `progress` without animating.
	pub fn jump_to(&mut self, progress: f64) {
		if !self.is_autonomous() {
			self.spring.snap(progress.clamp(0.0, 1.0));
			self.last.progress = self.spring.value();
			self.last.eased = self.easing.apply(self.last.progress);
		}
	}

	/// Progress the spring is heading for.
	pub fn target(&self) -> f64 {
		self.spring.target()
	}

	/// The most recent tick.
	pub fn last(&self) -> ProgressSample {
		self.last
	}

	/// Advances by `dt` seconds. `None` once the context is cancelled.
	pub fn tick(&mut self, ctx: &mut AnimationContext, dt: f64) -> Option<ProgressSample> {
		if !ctx.advance(dt) {
			return None;
		}
		let (progress, phase) = match self.mode {
			ScheduleMode::Interactive(_) => {
				self.spring.step(dt);
				(self.spring.value().clamp(0.0, 1.0), None)
			}
			ScheduleMode::Autonomous(config) => {
				let sample = sample_cycle(&config, ctx.elapsed() - self.origin);
				if Some(sample.phase) != self.last.phase {
					log::debug!("cycle phase -> {:?}", sample.phase);
				}
				(sample.progress, Some(sample.phase))
			}
		};
		self.last = ProgressSample {
			progress,
			eased: self.easing.apply(progress),
			phase,
		};
		Some(self.last)
	}
}
