/// Second-order spring parameters. `damping == 2 * sqrt(stiffness)` is
/// critical; anything at or above that never overshoots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
	/// Restoring force per unit of displacement.
	pub stiffness: f64,
	/// Resisting force per unit of velocity.
	pub damping: f64,
}

impl SpringConfig {
	/// Critically damped spring of this stiffness.
	pub fn critical(stiffness: f64) -> Self {
		Self {
			stiffness,
			damping: 2.0 * stiffness.max(0.0).sqrt(),
		}
	}

	/// `1.0` is critical.
	pub fn damping_ratio(&self) -> f64 {
		self.damping / (2.0 * self.stiffness.sqrt())
	}
}

impl Default for SpringConfig {
	fn default() -> Self {
		Self::critical(90.0)
	}
}

const REST_EPSILON: f64 = 1e-4;

/// A scalar that follows its target through a damped spring.
///
/// Steps use the closed-form solution, so the result doesn't depend on how the
/// frame clock slices time.
#[derive(Clone, Debug)]
pub struct Spring {
	config: SpringConfig,
	value: f64,
	velocity: f64,
	target: f64,
}

impl Spring {
	/// A spring at rest on `value`.
	pub fn new(value: f64, config: SpringConfig) -> Self {
		Self {
			config,
			value,
			velocity: 0.0,
			target: value,
		}
	}

	/// Current value.
	pub fn value(&self) -> f64 {
		self.value
	}

	/// Where the spring is heading.
	pub fn target(&self) -> f64 {
		self.target
	}

	/// Current velocity in units per second.
	pub fn velocity(&self) -> f64 {
		self.velocity
	}

	/// Retargets immediately. Velocity carries over, except that a damped
	/// spring never keeps enough of it to cross the new target.
	pub fn set_target(&mut self, target: f64) {
		self.target = target;
		if self.config.damping_ratio() < 1.0 - 1e-6 {
			return;
		}
		let x0 = self.value - target;
		if x0 == 0.0 {
			self.velocity = 0.0;
		} else if self.velocity * x0 < 0.0 {
			// (x0 + (v0 + w*x0) t) e^(-wt) stays on one side while |v0| <= w*|x0|.
			let limit = self.config.stiffness.max(0.0).sqrt() * x0.abs();
			self.velocity = self.velocity.clamp(-limit, limit);
		}
	}

	/// Jumps to `value` and stops.
	pub fn snap(&mut self, value: f64) {
		self.value = value;
		self.target = value;
		self.velocity = 0.0;
	}

	/// At rest on the target.
	pub fn is_settled(&self) -> bool {
		self.value == self.target && self.velocity == 0.0
	}

	/// Advances `dt` seconds.
	pub fn step(&mut self, dt: f64) {
		if self.is_settled() || !(dt > 0.0) {
			return;
		}
		let omega = self.config.stiffness.max(0.0).sqrt();
		if omega == 0.0 {
			self.snap(self.target);
			return;
		}
		let zeta = self.config.damping_ratio();
		let (x, v) = solve(self.value - self.target, self.velocity, omega, zeta, dt);

		if x.abs() < REST_EPSILON && v.abs() < REST_EPSILON {
			self.snap(self.target);
		} else {
			self.value = self.target + x;
			self.velocity = v;
		}
	}
}

/// Displacement and velocity after `t` seconds, starting from `(x0, v0)`.
fn solve(x0: f64, v0: f64, omega: f64, zeta: f64, t: f64) -> (f64, f64) {
	if (zeta - 1.0).abs() < 1e-6 {
		let b = v0 + omega * x0;
		let decay = (-omega * t).exp();
		((x0 + b * t) * decay, (v0 - omega * b * t) * decay)
	} else if zeta > 1.0 {
		let root = (zeta * zeta - 1.0).sqrt();
		let (r1, r2) = (-omega * (zeta - root), -omega * (zeta + root));
		let c2 = (v0 - r1 * x0) / (r2 - r1);
		let c1 = x0 - c2;
		let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
		(c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
	} else {
		let a = zeta * omega;
		let wd = omega * (1.0 - zeta * zeta).sqrt();
		let b = (v0 + a * x0) / wd;
		let (sin, cos) = (wd * t).sin_cos();
		let decay = (-a * t).exp();
		let x = decay * (x0 * cos + b * sin);
		let v = decay * (-a * (x0 * cos + b * sin) + wd * (b * cos - x0 * sin));
		(x, v)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn run(spring: &mut Spring, seconds: f64) -> Vec<f64> {
		let dt = 1.0 / 60.0;
		(0..(seconds / dt) as usize)
			.map(|_| {
				spring.step(dt);
				spring.value()
			})
			.collect()
	}

	#[test]
	fn critical_spring_settles_without_overshoot() {
		let mut spring = Spring::new(0.0, SpringConfig::default());
		spring.set_target(1.0);
		let trace = run(&mut spring, 3.0);
		assert!(trace.iter().all(|v| *v <= 1.0));
		assert!(trace.windows(2).all(|w| w[0] <= w[1]));
		assert!(spring.is_settled());
		assert_eq!(spring.value(), 1.0);
	}

	#[test]
	fn overdamped_spring_also_stays_below_target() {
		let mut spring = Spring::new(0.0, SpringConfig {
			stiffness: 60.0,
			damping: 40.0,
		});
		spring.set_target(1.0);
		assert!(run(&mut spring, 4.0).iter().all(|v| *v <= 1.0));
	}

	#[test]
	fn underdamped_spring_overshoots() {
		let mut spring = Spring::new(0.0, SpringConfig {
			stiffness: 200.0,
			damping: 4.0,
		});
		spring.set_target(1.0);
		assert!(run(&mut spring, 1.0).iter().any(|v| *v > 1.0));
	}

	#[test]
	fn retarget_supersedes_previous_target() {
		let mut spring = Spring::new(0.0, SpringConfig::default());
		spring.set_target(1.0);
		run(&mut spring, 0.1);
		let mid = spring.value();
		assert!(mid > 0.0 && mid < 1.0);
		spring.set_target(0.0);
		run(&mut spring, 3.0);
		assert_eq!(spring.value(), 0.0);
	}

	#[test]
	fn close_retarget_mid_flight_does_not_overshoot() {
		let mut spring = Spring::new(0.0, SpringConfig::default());
		spring.set_target(1.0);
		for _ in 0..6 {
			spring.step(1.0 / 60.0);
		}
		let target = spring.value() + 0.05;
		spring.set_target(target);
		let trace = run(&mut spring, 3.0);
		let peak = trace.iter().copied().fold(f64::MIN, f64::max);
		assert!(peak <= target, "peak {peak} past {target}");
		assert_eq!(spring.value(), target);
	}

	#[test]
	fn reversing_mid_flight_does_not_undershoot() {
		let mut spring = Spring::new(1.0, SpringConfig::default());
		spring.set_target(0.0);
		for _ in 0..6 {
			spring.step(1.0 / 60.0);
		}
		let target = spring.value() - 0.02;
		spring.set_target(target);
		assert!(run(&mut spring, 3.0).iter().all(|v| *v >= target));
	}

	#[test]
	fn retarget_to_current_value_stops() {
		let mut spring = Spring::new(0.0, SpringConfig::default());
		spring.set_target(1.0);
		spring.step(0.05);
		spring.set_target(spring.value());
		assert!(spring.is_settled());
	}

	#[test]
	fn step_size_does_not_change_the_path() {
		let (mut coarse, mut fine) = (
			Spring::new(0.0, SpringConfig::default()),
			Spring::new(0.0, SpringConfig::default()),
		);
		coarse.set_target(1.0);
		fine.set_target(1.0);
		coarse.step(0.2);
		for _ in 0..10 {
			fine.step(0.02);
		}
		assert!((coarse.value() - fine.value()).abs() < 1e-9);
	}
}
