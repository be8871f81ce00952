use web_sys::CanvasRenderingContext2d;

use super::state::ParticleState;

pub fn render(state: &ParticleState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	let _ = ctx.set_global_composite_operation("lighter");
	ctx.set_fill_style_str("hsla(200, 80%, 72%, 0.75)");

	for p in state.positions() {
		let Some(projected) = state.project(*p) else {
			continue;
		};
		let size = (state.config.point_size * projected.scale).max(0.5);
		ctx.fill_rect(
			projected.screen.x - size / 2.0,
			projected.screen.y - size / 2.0,
			size,
			size,
		);
	}
	let _ = ctx.set_global_composite_operation("source-over");
}
