use std::f64::consts::TAU;

use glam::{DVec2, DVec3};

use super::layout::{Dimensions, Edge, Layout};

/// Nodes in the pipeline diagram.
pub const PIPELINE_NODE_COUNT: usize = 11;

/// Node placement as fractions of the container, grouped by stage.
const PIPELINE_FRACTIONS: [(f64, f64); PIPELINE_NODE_COUNT] = [
	// sources
	(0.12, 0.25),
	(0.12, 0.5),
	(0.12, 0.75),
	// ingest
	(0.33, 0.35),
	(0.33, 0.65),
	// process
	(0.54, 0.3),
	(0.54, 0.5),
	(0.54, 0.7),
	// route
	(0.75, 0.38),
	(0.75, 0.62),
	// decide
	(0.9, 0.5),
];

/// Directed links between pipeline nodes.
pub const PIPELINE_EDGES: [Edge; 14] = [
	(0, 3),
	(1, 3),
	(1, 4),
	(2, 4),
	(3, 5),
	(3, 6),
	(4, 6),
	(4, 7),
	(5, 8),
	(6, 8),
	(6, 9),
	(7, 9),
	(8, 10),
	(9, 10),
];

/// The final "decision" node, drawn larger.
pub const DECISION_NODE: usize = 10;

/// Column captions, left to right.
pub const STAGE_LABELS: [&str; 5] = ["Sources", "Ingest", "Process", "Route", "Decide"];

/// Horizontal position of stage label `i`, as a fraction of the width.
pub fn stage_label_x(i: usize) -> f64 {
	i as f64 * 0.195 + 0.1
}

/// The organized 5-stage pipeline DAG.
pub fn pipeline_layout(dims: Dimensions) -> Option<Layout<DVec2>> {
	if dims.is_degenerate() {
		return None;
	}
	Some(Layout::from_positions(
		PIPELINE_FRACTIONS
			.iter()
			.map(|&(fx, fy)| dims.scale(fx, fy)),
	))
}

/// A centred square grid in the z=0 plane.
pub fn grid_shape(count: usize, spacing: f64) -> Layout<DVec3> {
	let cols = (count as f64).sqrt().ceil().max(1.0) as usize;
	let offset = (cols - 1) as f64 * spacing / 2.0;
	Layout::from_positions((0..count).map(|i| {
		let (col, row) = ((i % cols) as f64, (i / cols) as f64);
		DVec3::new(col * spacing - offset, row * spacing - offset, 0.0)
	}))
}

/// The "data icon": a wireframe cube floating over a ring, over a floor grid.
///
/// Always returns exactly `count` points.
pub fn icon_shape(count: usize, scale: f64) -> Layout<DVec3> {
	let n_cube = count * 45 / 100;
	let n_disc = count * 25 / 100;
	let n_grid = count - n_cube - n_disc;

	let mut points = Vec::with_capacity(count);
	points.extend(cube_edges(n_cube, 0.9 * scale, DVec3::new(0.0, 0.5 * scale, 0.0)));
	points.extend(disc_ring(n_disc, 1.6 * scale, -0.6 * scale));
	points.extend(floor_grid(n_grid, 2.6 * scale, -1.1 * scale));
	Layout::from_positions(points)
}

fn cube_edges(n: usize, half: f64, centre: DVec3) -> impl Iterator<Item = DVec3> {
	let per_edge = n.div_ceil(12).max(1);
	(0..n).map(move |k| {
		let (edge, slot) = (k % 12, k / 12);
		let t = -half + 2.0 * half * (slot as f64 + 0.5) / per_edge as f64;
		let combo = edge % 4;
		let a = if combo & 1 == 0 { -half } else { half };
		let b = if combo & 2 == 0 { -half } else { half };
		let p = match edge / 4 {
			0 => DVec3::new(t, a, b),
			1 => DVec3::new(a, t, b),
			_ => DVec3::new(a, b, t),
		};
		centre + p
	})
}

fn disc_ring(n: usize, radius: f64, y: f64) -> impl Iterator<Item = DVec3> {
	(0..n).map(move |k| {
		let angle = k as f64 / n as f64 * TAU;
		DVec3::new(radius * angle.cos(), y, radius * angle.sin())
	})
}

fn floor_grid(n: usize, extent: f64, y: f64) -> impl Iterator<Item = DVec3> {
	let cols = (n as f64).sqrt().ceil().max(1.0) as usize;
	let spacing = extent / cols as f64;
	let offset = (cols - 1) as f64 * spacing / 2.0;
	(0..n).map(move |k| {
		let (col, row) = ((k % cols) as f64, (k / cols) as f64);
		DVec3::new(col * spacing - offset, y, row * spacing - offset)
	})
}
