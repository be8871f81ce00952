//! Scoped browser registrations: every guard here undoes itself on drop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Element, Event, EventTarget, HtmlCanvasElement, ResizeObserver,
	ResizeObserverEntry, Window,
};

use crate::error::{CanvasError, Result};

/// Longest step fed to the simulation; a backgrounded tab resumes smoothly.
const MAX_FRAME_DT: f64 = 0.1;

pub fn window() -> Result<Window> {
	web_sys::window().ok_or(CanvasError::NoWindow)
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")?
		.ok_or(CanvasError::NoContext)?
		.dyn_into()
		.map_err(|_| CanvasError::NoContext)
}

/// Size of the canvas' parent, falling back to the canvas itself.
pub fn measure(canvas: &HtmlCanvasElement) -> (f64, f64) {
	match canvas.parent_element() {
		Some(parent) => (parent.client_width() as f64, parent.client_height() as f64),
		None => (canvas.client_width() as f64, canvas.client_height() as f64),
	}
}

/// Sets the canvas backing store size, ignoring degenerate sizes.
pub fn fit_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
	if width > 0.0 && height > 0.0 {
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);
	}
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop. The callback gets the frame delta in
/// seconds and returns `false` to stop scheduling.
pub struct FrameLoop {
	window: Window,
	handle: Rc<Cell<Option<i32>>>,
	callback: FrameCallback,
}

impl FrameLoop {
	pub fn start(mut on_frame: impl FnMut(f64) -> bool + 'static) -> Result<Self> {
		let window = window()?;
		let handle = Rc::new(Cell::new(None));
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let (handle_inner, callback_inner, window_inner) =
			(handle.clone(), callback.clone(), window.clone());

		let mut last: Option<f64> = None;
		*callback.borrow_mut() = Some(Closure::new(move |now: f64| {
			handle_inner.set(None);
			let dt = last
				.map(|prev| ((now - prev) / 1000.0).clamp(0.0, MAX_FRAME_DT))
				.unwrap_or(0.0);
			last = Some(now);
			if !on_frame(dt) {
				return;
			}
			if let Some(ref cb) = *callback_inner.borrow() {
				match window_inner.request_animation_frame(cb.as_ref().unchecked_ref()) {
					Ok(id) => handle_inner.set(Some(id)),
					Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
				}
			}
		}));

		if let Some(ref cb) = *callback.borrow() {
			handle.set(Some(
				window.request_animation_frame(cb.as_ref().unchecked_ref())?,
			));
		}
		Ok(Self {
			window,
			handle,
			callback,
		})
	}

	/// Cancels the pending frame and drops the callback.
	pub fn stop(&self) {
		if let Some(id) = self.handle.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		// Breaks the closure's reference to itself.
		self.callback.borrow_mut().take();
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.stop();
	}
}

/// A DOM event listener removed on drop.
pub struct EventListener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
	pub fn new(
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Result<Self> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for EventListener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// Observes an element's content box; disconnected on drop.
pub struct ResizeWatch {
	observer: ResizeObserver,
	_callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl ResizeWatch {
	pub fn observe(element: &Element, mut on_resize: impl FnMut(f64, f64) + 'static) -> Result<Self> {
		let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
			let latest = entries
				.iter()
				.filter_map(|entry| entry.dyn_into::<ResizeObserverEntry>().ok())
				.last();
			if let Some(entry) = latest {
				let rect = entry.content_rect();
				on_resize(rect.width(), rect.height());
			}
		});
		let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
		observer.observe(element);
		Ok(Self {
			observer,
			_callback: callback,
		})
	}
}

impl Drop for ResizeWatch {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

/// Everything one mounted canvas holds on to.
pub struct Session {
	pub frame: FrameLoop,
	pub resize: Option<ResizeWatch>,
	pub listeners: Vec<EventListener>,
	on_teardown: Option<Box<dyn FnOnce()>>,
}

impl Session {
	pub fn new(frame: FrameLoop, on_teardown: impl FnOnce() + 'static) -> Self {
		Self {
			frame,
			resize: None,
			listeners: Vec::new(),
			on_teardown: Some(Box::new(on_teardown)),
		}
	}

	/// Cancels the frame loop, then releases observers and listeners.
	pub fn teardown(mut self) {
		self.frame.stop();
		if let Some(done) = self.on_teardown.take() {
			done();
		}
		self.resize.take();
		self.listeners.clear();
	}
}
