use std::f64::consts::{PI, TAU};

use glam::{DVec2, DVec3};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::layout::{Dimensions, Drift, Layout, Node};

/// Knobs for the scattered 2D layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ChaosConfig {
	/// Distance kept clear along every container edge.
	pub margin: f64,
	/// Fraction of a zone a node may wander from the zone centre (0..=1).
	pub jitter: f64,
	/// Range of drift amplitudes in pixels.
	pub drift_amplitude: (f64, f64),
	/// Range of drift speeds in radians per second.
	pub drift_speed: (f64, f64),
}

impl Default for ChaosConfig {
	fn default() -> Self {
		Self {
			margin: 60.0,
			jitter: 0.7,
			drift_amplitude: (4.0, 10.0),
			drift_speed: (0.4, 0.9),
		}
	}
}

/// Scatters `count` nodes over the container, one per zone of a coarse grid.
///
/// Returns `None` when the container (minus margins) has no area.
pub fn chaos_layout(
	seed: u64,
	count: usize,
	dims: Dimensions,
	config: &ChaosConfig,
) -> Option<Layout<DVec2>> {
	if dims.is_degenerate() {
		return None;
	}
	let (usable_w, usable_h) = (
		dims.width - 2.0 * config.margin,
		dims.height - 2.0 * config.margin,
	);
	if !(usable_w > 0.0 && usable_h > 0.0) {
		return None;
	}
	if count == 0 {
		return Some(Layout::default());
	}

	let aspect = usable_w / usable_h;
	let cols = ((count as f64 * aspect).sqrt().ceil() as usize).clamp(1, count);
	let rows = count.div_ceil(cols);
	let (zone_w, zone_h) = (usable_w / cols as f64, usable_h / rows as f64);
	let jitter = config.jitter.clamp(0.0, 1.0);

	let mut rng = ChaCha8Rng::seed_from_u64(seed);
	let mut zones: Vec<usize> = (0..cols * rows).collect();
	zones.shuffle(&mut rng);

	let nodes = zones
		.into_iter()
		.take(count)
		.enumerate()
		.map(|(index, zone)| {
			let (zx, zy) = ((zone % cols) as f64, (zone / cols) as f64);
			let jx = rng.gen_range(-0.5..0.5) * jitter;
			let jy = rng.gen_range(-0.5..0.5) * jitter;
			let position = DVec2::new(
				config.margin + (zx + 0.5 + jx) * zone_w,
				config.margin + (zy + 0.5 + jy) * zone_h,
			);
			let drift = Drift {
				amplitude: gen_between(&mut rng, config.drift_amplitude),
				phase: rng.gen_range(0.0..TAU),
				speed: gen_between(&mut rng, config.drift_speed),
			};
			Node {
				index,
				position,
				drift,
			}
		})
		.collect();

	Some(Layout::new(nodes))
}

/// Uniform in `[lo, hi)`; a collapsed or inverted range yields `lo`.
fn gen_between(rng: &mut impl Rng, (lo, hi): (f64, f64)) -> f64 {
	if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

/// Knobs for the particle cloud's chaotic shell.
#[derive(Clone, Debug, PartialEq)]
pub struct ShellConfig {
	/// Radius of the hollow centre.
	pub inner_radius: f64,
	/// Radial depth of the shell.
	pub thickness: f64,
	/// Total z spread; the shell is squashed to this depth.
	pub depth: f64,
	/// Drift amplitude in world units.
	pub drift_amplitude: f64,
	/// Drift speed in radians per second.
	pub drift_speed: f64,
}

impl Default for ShellConfig {
	fn default() -> Self {
		Self {
			inner_radius: 3.5,
			thickness: 2.0,
			depth: 3.0,
			drift_amplitude: 0.04,
			drift_speed: 1.0,
		}
	}
}

/// Particles spread over a thick spherical shell with a flattened z.
pub fn sphere_shell(seed: u64, count: usize, config: &ShellConfig) -> Layout<DVec3> {
	let mut rng = ChaCha8Rng::seed_from_u64(seed);
	let nodes = (0..count)
		.map(|index| {
			let theta = rng.gen_range(0.0..TAU);
			let phi = (2.0 * rng.r#gen::<f64>() - 1.0).acos();
			let r = config.inner_radius + rng.r#gen::<f64>() * config.thickness;
			let position = DVec3::new(
				r * phi.sin() * theta.cos(),
				r * phi.sin() * theta.sin(),
				(rng.r#gen::<f64>() - 0.5) * config.depth,
			);
			// Phase walks with the index so neighbours don't pulse together.
			let drift = Drift {
				amplitude: config.drift_amplitude,
				phase: (index as f64 * 0.5) % (2.0 * PI),
				speed: config.drift_speed,
			};
			Node {
				index,
				position,
				drift,
			}
		})
		.collect();
	Layout::new(nodes)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_inputs_same_layout() {
		let dims = Dimensions::new(800.0, 420.0);
		let a = chaos_layout(7, 11, dims, &ChaosConfig::default()).unwrap();
		let b = chaos_layout(7, 11, dims, &ChaosConfig::default()).unwrap();
		assert_eq!(a, b);
	}

	#[test]
	fn seeds_pick_different_zones() {
		let dims = Dimensions::new(800.0, 420.0);
		let config = ChaosConfig::default();
		assert_ne!(
			chaos_layout(1, 11, dims, &config),
			chaos_layout(2, 11, dims, &config)
		);
	}

	#[test]
	fn collapsed_drift_range_is_allowed() {
		let config = ChaosConfig {
			drift_amplitude: (0.0, 0.0),
			..ChaosConfig::default()
		};
		let layout = chaos_layout(4, 11, Dimensions::new(800.0, 420.0), &config).unwrap();
		assert!(layout.nodes().iter().all(|n| n.drift.amplitude == 0.0));
	}

	#[test]
	fn stays_inside_margins() {
		let config = ChaosConfig::default();
		for (w, h) in [(800.0, 420.0), (320.0, 480.0), (1920.0, 200.0)] {
			let layout = chaos_layout(3, 40, Dimensions::new(w, h), &config).unwrap();
			assert_eq!(layout.len(), 40);
			for p in layout.positions() {
				assert!(p.x >= config.margin && p.x <= w - config.margin, "{p}");
				assert!(p.y >= config.margin && p.y <= h - config.margin, "{p}");
			}
		}
	}

	#[test]
	fn one_node_per_zone() {
		// With no jitter every node sits on a distinct zone centre.
		let config = ChaosConfig {
			jitter: 0.0,
			..ChaosConfig::default()
		};
		let layout = chaos_layout(9, 11, Dimensions::new(800.0, 420.0), &config).unwrap();
		let positions: Vec<_> = layout.positions().collect();
		for (i, a) in positions.iter().enumerate() {
			for b in &positions[i + 1..] {
				assert!(a.distance(*b) > 1.0);
			}
		}
	}

	#[test]
	fn degenerate_sizes_yield_nothing() {
		let config = ChaosConfig::default();
		assert!(chaos_layout(1, 11, Dimensions::new(0.0, 400.0), &config).is_none());
		assert!(chaos_layout(1, 11, Dimensions::new(100.0, 100.0), &config).is_none());
	}

	#[test]
	fn shell_is_seeded() {
		let config = ShellConfig::default();
		assert_eq!(sphere_shell(5, 300, &config), sphere_shell(5, 300, &config));
		assert_ne!(sphere_shell(5, 300, &config), sphere_shell(6, 300, &config));
	}

	#[test]
	fn shell_respects_radius_and_depth() {
		let config = ShellConfig::default();
		let outer = config.inner_radius + config.thickness;
		for p in sphere_shell(11, 500, &config).positions() {
			assert!(p.truncate().length() <= outer + 1e-9);
			assert!(p.z.abs() <= config.depth / 2.0);
		}
	}

	proptest::proptest! {
		#[test]
		fn generation_is_deterministic(
			seed in proptest::prelude::any::<u64>(),
			count in 1usize..64,
			w in 200.0f64..2000.0,
			h in 200.0f64..2000.0,
		) {
			let dims = Dimensions::new(w, h);
			let config = ChaosConfig::default();
			proptest::prop_assert_eq!(
				chaos_layout(seed, count, dims, &config),
				chaos_layout(seed, count, dims, &config)
			);
		}
	}
}
