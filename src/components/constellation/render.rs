use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{ConstellationState, DECISION_RADIUS, NODE_RADIUS};
use super::types::{STEPS, phase_label};
use crate::motion::{DECISION_NODE, STAGE_LABELS, stage_label_x};

const GRID_SPACING: f64 = 32.0;

fn primary(alpha: f64) -> String {
	format!("rgba(100, 180, 255, {})", alpha.clamp(0.0, 1.0))
}

pub fn render(state: &ConstellationState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, ctx);
	draw_stage_labels(state, ctx);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	draw_progress(state, ctx);
}

fn draw_grid(state: &ConstellationState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.04)");
	ctx.set_line_width(0.5);
	ctx.begin_path();
	let mut x = 0.0;
	while x <= state.width {
		ctx.move_to(x, 0.0);
		ctx.line_to(x, state.height);
		x += GRID_SPACING;
	}
	let mut y = 0.0;
	while y <= state.height {
		ctx.move_to(0.0, y);
		ctx.line_to(state.width, y);
		y += GRID_SPACING;
	}
	ctx.stroke();
}

fn draw_stage_labels(state: &ConstellationState, ctx: &CanvasRenderingContext2d) {
	let alpha = state.label_opacity();
	if alpha <= 0.0 {
		return;
	}
	ctx.set_fill_style_str(&primary(alpha * 0.7));
	ctx.set_font("12px monospace");
	for (i, label) in STAGE_LABELS.iter().enumerate() {
		let _ = ctx.fill_text(label, state.width * stage_label_x(i), 24.0);
	}
}

fn draw_edges(state: &ConstellationState, ctx: &CanvasRenderingContext2d) {
	let alpha = state.edge_opacity() * 0.5;
	if alpha <= 0.0 {
		return;
	}
	let positions = state.positions();
	ctx.set_stroke_style_str(&primary(alpha));
	ctx.set_line_width(1.0);
	ctx.set_line_cap("round");

	for &(from, to) in state.edges() {
		let (Some(a), Some(b)) = (positions.get(from), positions.get(to)) else {
			continue;
		};
		// Horizontal S-curve between stages.
		let mx = (a.x + b.x) / 2.0;
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.bezier_curve_to(mx, a.y, mx, b.y, b.x, b.y);
		ctx.stroke();
	}
}

fn draw_nodes(state: &ConstellationState, ctx: &CanvasRenderingContext2d) {
	let ring_alpha = state.edge_opacity() * 0.3;

	for (i, p) in state.positions().iter().enumerate() {
		let is_decision = i == DECISION_NODE;

		if ring_alpha > 0.0 {
			let ring = if is_decision { 22.0 } else { 14.0 };
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, ring, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&primary(ring_alpha));
			ctx.set_line_width(0.75);
			ctx.stroke();
		}

		let radius = if is_decision { DECISION_RADIUS } else { NODE_RADIUS };
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
		if is_decision {
			ctx.set_fill_style_str(&primary(0.9));
			ctx.fill();
		} else {
			ctx.set_fill_style_str("rgba(26, 26, 46, 0.7)");
			ctx.fill();
			ctx.set_stroke_style_str(&primary(0.7));
			ctx.set_line_width(1.2);
			ctx.stroke();
		}
	}
}

fn draw_progress(state: &ConstellationState, ctx: &CanvasRenderingContext2d) {
	let sample = state.sample();
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.08)");
	ctx.fill_rect(0.0, state.height - 1.0, state.width, 1.0);
	ctx.set_fill_style_str(&primary(0.6));
	ctx.fill_rect(0.0, state.height - 1.0, state.width * sample.progress, 1.0);

	let status = match sample.phase {
		Some(phase) => phase_label(phase).to_owned(),
		None => STEPS[state.step].label.to_lowercase(),
	};
	ctx.set_fill_style_str(&primary(0.5));
	ctx.set_font("12px monospace");
	ctx.set_text_align("right");
	let _ = ctx.fill_text(&status, state.width - 16.0, state.height - 16.0);
	ctx.set_text_align("start");
}
