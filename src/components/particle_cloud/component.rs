use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use web_sys::HtmlCanvasElement;

use super::render;
use super::state::{ParticleCloudConfig, ParticleState};
use crate::components::browser::{self, EventListener, FrameLoop, ResizeWatch, Session};
use crate::error::Result;
use crate::motion::scroll_progress;

type SharedState = Rc<RefCell<Option<ParticleState>>>;

/// Hero particle cloud. Scrolling its section through the viewport morphs the
/// cloud into its target shape; with `autoplay` it cycles on its own.
#[component]
pub fn ParticleCloud(
	/// Particle count, target shape and camera settings.
	#[prop(default = ParticleCloudConfig::default())]
	config: ParticleCloudConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let session = StoredValue::new_local(None::<Session>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if session.with_value(Option::is_some) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match mount(&canvas, config.clone(), state.clone()) {
			Ok(s) => {
				log::info!("particle cloud mounted");
				session.set_value(Some(s));
			}
			Err(err) => log::error!("particle cloud failed to mount: {err}"),
		}
	});

	on_cleanup(move || {
		session.try_update_value(|s| {
			if let Some(s) = s.take() {
				s.teardown();
				log::info!("particle cloud unmounted");
			}
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-cloud"
			style="display: block; width: 100%; height: 100%; background: transparent;"
		/>
	}
}

fn mount(canvas: &HtmlCanvasElement, config: ParticleCloudConfig, state: SharedState) -> Result<Session> {
	let ctx = browser::context_2d(canvas)?;
	let window = browser::window()?;
	let (w, h) = browser::measure(canvas);
	browser::fit_canvas(canvas, w, h);
	let autoplay = config.autoplay;
	*state.borrow_mut() = Some(ParticleState::new(config, w, h));

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

	if let Some(section) = canvas.parent_element() {
		let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
		session.resize = Some(ResizeWatch::observe(&section, move |nw, nh| {
			browser::fit_canvas(&canvas_resize, nw, nh);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		})?);

		if !autoplay {
			let (state_scroll, window_scroll) = (state.clone(), window.clone());
			let mut update = move || {
				let rect = section.get_bounding_client_rect();
				let viewport = window_scroll
					.inner_height()
					.ok()
					.and_then(|v| v.as_f64())
					.unwrap_or(0.0);
				let progress = scroll_progress(rect.bottom(), rect.height(), viewport);
				if let Some(ref mut s) = *state_scroll.borrow_mut() {
					s.set_scroll(progress);
				}
			};
			update();
			session
				.listeners
				.push(EventListener::new(&window, "scroll", move |_| update())?);
		}
	}
	Ok(session)
}
