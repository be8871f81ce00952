use std::f64::consts::TAU;

use glam::DVec2;

use super::layout::{Layout, Position};

/// Last known pointer position relative to the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Pointer {
	/// Hovering at this canvas position.
	At(DVec2),
	/// Not hovering. Repulsion is a no-op.
	#[default]
	Away,
}

/// Pointer push-away field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Repulsion {
	/// Reach in pixels.
	pub radius: f64,
	/// Displacement in pixels applied to a node sitting on the pointer.
	pub force: f64,
}

impl Default for Repulsion {
	fn default() -> Self {
		Self {
			radius: 120.0,
			force: 36.0,
		}
	}
}

/// Opacity that stays at zero until `threshold`, then ramps linearly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpacityRamp {
	/// Eased progress where the fade starts.
	pub threshold: f64,
	/// Opacity gained per unit of progress past `threshold`.
	pub scale: f64,
}

impl OpacityRamp {
	/// Edges fade in over the second half.
	pub const EDGES: OpacityRamp = OpacityRamp {
		threshold: 0.5,
		scale: 2.0,
	};
	/// Stage labels follow slightly after edges.
	pub const LABELS: OpacityRamp = OpacityRamp {
		threshold: 0.55,
		scale: 2.5,
	};

	/// Opacity in `[0, 1]` at `eased` progress.
	pub fn at(&self, eased: f64) -> f64 {
		((eased - self.threshold) * self.scale).clamp(0.0, 1.0)
	}
}

/// Writes the blended chaos→target positions for this tick into `out`.
///
/// Drift rides on the chaos endpoint and fades out as `1 - eased²`, so the
/// formed state is still. A node without a target entry stays on its own
/// drifting chaos position.
pub fn interpolate<P: Position>(
	chaos: &Layout<P>,
	target: &Layout<P>,
	eased: f64,
	time: f64,
	out: &mut Vec<P>,
) {
	let eased = eased.clamp(0.0, 1.0);
	let drift_scale = 1.0 - eased * eased;

	out.clear();
	out.extend(chaos.nodes().iter().map(|node| {
		let start = if drift_scale > 0.0 {
			node.position
				.add_scaled(P::drift_offset(&node.drift, time), drift_scale)
		} else {
			node.position
		};
		match target.get(node.index) {
			Some(t) => start.lerp_to(t.position, eased),
			None => start,
		}
	}));
}

/// Pushes nodes within `repulsion.radius` of the pointer away from it.
pub fn repel(positions: &mut [DVec2], pointer: Pointer, repulsion: &Repulsion) {
	let Pointer::At(at) = pointer else {
		return;
	};
	if !(repulsion.radius > 0.0) {
		return;
	}
	for (i, p) in positions.iter_mut().enumerate() {
		let away = *p - at;
		let dist = away.length();
		if dist >= repulsion.radius {
			continue;
		}
		let dir = if dist > 1e-9 {
			away / dist
		} else {
			// Sitting on the pointer: pick a stable per-node direction.
			DVec2::from_angle(i as f64 * 0.618_034 * TAU)
		};
		*p += dir * repulsion.force * (1.0 - dist / repulsion.radius);
	}
}

/// Y-axis spin of the particle cloud; winds down as the cloud forms.
pub fn cloud_rotation(time: f64, progress: f64) -> f64 {
	time * 0.04 * (1.0 - progress.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
	use glam::DVec3;

	use super::*;
	use crate::motion::layout::{Drift, Node};

	fn drifting(points: &[(f64, f64)]) -> Layout<DVec2> {
		Layout::new(
			points
				.iter()
				.enumerate()
				.map(|(index, &(x, y))| Node {
					index,
					position: DVec2::new(x, y),
					drift: Drift {
						amplitude: 5.0,
						phase: index as f64,
						speed: 0.7,
					},
				})
				.collect(),
		)
	}

	#[test]
	fn progress_zero_is_chaos_with_drift() {
		let chaos = drifting(&[(10.0, 20.0), (300.0, 40.0)]);
		let target = Layout::from_positions([DVec2::new(0.0, 0.0), DVec2::new(50.0, 50.0)]);
		let mut out = Vec::new();
		interpolate(&chaos, &target, 0.0, 3.2, &mut out);
		for (node, p) in chaos.nodes().iter().zip(&out) {
			let expected = node.position + DVec2::drift_offset(&node.drift, 3.2);
			assert!(p.distance(expected) < 1e-9);
		}
	}

	#[test]
	fn progress_one_is_target() {
		let chaos = drifting(&[(10.0, 20.0), (300.0, 40.0)]);
		let target = Layout::from_positions([DVec2::new(0.0, 0.0), DVec2::new(50.0, 50.0)]);
		let mut out = Vec::new();
		interpolate(&chaos, &target, 1.0, 99.0, &mut out);
		for (t, p) in target.positions().zip(&out) {
			assert!(p.distance(t) < 1e-9);
		}
	}

	#[test]
	fn works_in_three_dimensions() {
		let chaos = Layout::from_positions([DVec3::new(1.0, 2.0, 3.0)]);
		let target = Layout::from_positions([DVec3::new(3.0, 2.0, 1.0)]);
		let mut out = Vec::new();
		interpolate(&chaos, &target, 0.5, 0.0, &mut out);
		assert_eq!(out, vec![DVec3::new(2.0, 2.0, 2.0)]);
	}

	#[test]
	fn missing_target_keeps_chaos_position() {
		let chaos = Layout::from_positions([DVec2::new(1.0, 1.0), DVec2::new(9.0, 9.0)]);
		let target = Layout::from_positions([DVec2::new(3.0, 3.0)]);
		let mut out = Vec::new();
		interpolate(&chaos, &target, 0.5, 0.0, &mut out);
		assert_eq!(out, vec![DVec2::new(2.0, 2.0), DVec2::new(9.0, 9.0)]);
	}

	#[test]
	fn buffer_is_reused_not_appended() {
		let chaos = Layout::from_positions([DVec2::ONE]);
		let mut out = vec![DVec2::ZERO; 8];
		interpolate(&chaos, &chaos, 0.3, 0.0, &mut out);
		assert_eq!(out.len(), 1);
	}

	#[test]
	fn node_on_pointer_gets_full_force() {
		let rep = Repulsion {
			radius: 100.0,
			force: 30.0,
		};
		let at = DVec2::new(50.0, 50.0);
		let mut positions = vec![at];
		repel(&mut positions, Pointer::At(at), &rep);
		assert!((positions[0].distance(at) - 30.0).abs() < 1e-9);
	}

	#[test]
	fn repulsion_pushes_along_the_pointer_line() {
		let rep = Repulsion {
			radius: 100.0,
			force: 40.0,
		};
		let mut positions = vec![DVec2::new(75.0, 0.0)];
		repel(&mut positions, Pointer::At(DVec2::ZERO), &rep);
		// (1 - 75/100) * 40 = 10 px further along +x
		assert!(positions[0].distance(DVec2::new(85.0, 0.0)) < 1e-9);
	}

	#[test]
	fn nodes_outside_radius_are_untouched() {
		let rep = Repulsion::default();
		let original = vec![DVec2::new(rep.radius, 0.0), DVec2::new(500.0, 500.0)];
		let mut positions = original.clone();
		repel(&mut positions, Pointer::At(DVec2::ZERO), &rep);
		assert_eq!(positions, original);
	}

	#[test]
	fn pointer_away_is_a_noop() {
		let original = vec![DVec2::ZERO, DVec2::new(3.0, 4.0)];
		let mut positions = original.clone();
		repel(&mut positions, Pointer::Away, &Repulsion::default());
		assert_eq!(positions, original);
	}

	#[test]
	fn opacity_ramps_after_threshold() {
		let ramp = OpacityRamp::EDGES;
		assert_eq!(ramp.at(0.0), 0.0);
		assert_eq!(ramp.at(0.5), 0.0);
		assert!((ramp.at(0.75) - 0.5).abs() < 1e-12);
		assert_eq!(ramp.at(1.0), 1.0);
		assert_eq!(OpacityRamp::LABELS.at(0.55), 0.0);
	}

	#[test]
	fn rotation_stops_when_formed() {
		assert_eq!(cloud_rotation(100.0, 1.0), 0.0);
		assert!((cloud_rotation(10.0, 0.0) - 0.4).abs() < 1e-12);
	}
}
