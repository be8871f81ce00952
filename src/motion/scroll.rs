/// Scroll progress of an element through the viewport.
///
/// 0 when its top reaches the bottom of the viewport, 1 when its bottom leaves
/// the top.
pub fn scroll_progress(rect_bottom: f64, rect_height: f64, viewport_height: f64) -> f64 {
	let span = viewport_height + rect_height;
	if !(span > 0.0) {
		return 0.0;
	}
	(1.0 - rect_bottom / span).clamp(0.0, 1.0)
}
