use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use leptos::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::ConstellationState;
use super::types::ConstellationConfig;
use crate::components::browser::{self, FrameLoop, ResizeWatch, Session};
use crate::error::Result;
use crate::motion::Pointer;

type SharedState = Rc<RefCell<Option<ConstellationState>>>;

/// Pipeline constellation. Nodes drift in chaos at progress 0 and settle into
/// the pipeline diagram at 1; the pointer pushes nearby nodes aside.
#[component]
pub fn ConstellationCanvas(
	/// Interactive target progress (step buttons, slider).
	#[prop(into)]
	progress: Signal<f64>,
	/// Run the gather/hold/scatter cycle instead of following `progress`.
	#[prop(into, default = Signal::stored(false))]
	autoplay: Signal<bool>,
	/// Layout, easing and timing settings.
	#[prop(default = ConstellationConfig::default())]
	config: ConstellationConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let session = StoredValue::new_local(None::<Session>);

	let state_init = state.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if session.with_value(Option::is_some) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let config = ConstellationConfig {
			autoplay: autoplay.get_untracked(),
			..config.clone()
		};
		match mount(&canvas, config, progress.get_untracked(), state_init.clone()) {
			Ok(s) => {
				log::info!("constellation canvas mounted");
				session.set_value(Some(s));
			}
			Err(err) => log::error!("constellation canvas failed to mount: {err}"),
		}
	});

	on_cleanup(move || {
		session.try_update_value(|s| {
			if let Some(s) = s.take() {
				s.teardown();
				log::info!("constellation canvas unmounted");
			}
		});
	});

	let state_progress = state.clone();
	Effect::new(move |_| {
		let target = progress.get();
		if let Some(ref mut s) = *state_progress.borrow_mut() {
			s.set_progress(target);
		}
	});

	let state_mode = state.clone();
	Effect::new(move |_| {
		let autoplay = autoplay.get();
		if let Some(ref mut s) = *state_mode.borrow_mut() {
			s.set_autoplay(autoplay);
			if !autoplay {
				s.set_progress(progress.get_untracked());
			}
		}
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let at = DVec2::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.set_pointer(Pointer::At(at));
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.set_pointer(Pointer::Away);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="constellation-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block; width: 100%; height: 100%;"
		/>
	}
}

fn mount(
	canvas: &HtmlCanvasElement,
	config: ConstellationConfig,
	initial_progress: f64,
	state: SharedState,
) -> Result<Session> {
	let ctx = browser::context_2d(canvas)?;
	let (w, h) = browser::measure(canvas);
	browser::fit_canvas(canvas, w, h);
	let mut initial = ConstellationState::new(config, w, h);
	initial.set_progress(initial_progress);
	*state.borrow_mut() = Some(initial);

	let state_anim = state.clone();
	let frame = FrameLoop::start(move |dt| {
		let mut guard = state_anim.borrow_mut();
		let Some(s) = guard.as_mut() else {
			return false;
		};
		if !s.frame(dt) {
			return false;
		}
		render::render(s, &ctx);
		true
	})?;

	let state_teardown = state.clone();
	let mut session = Session::new(frame, move || {
		if let Some(ref mut s) = *state_teardown.borrow_mut() {
			s.teardown();
		}
	});

	if let Some(parent) = canvas.parent_element() {
		let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
		session.resize = Some(ResizeWatch::observe(&parent, move |nw, nh| {
			browser::fit_canvas(&canvas_resize, nw, nh);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		})?);
	}
	Ok(session)
}
