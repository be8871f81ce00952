use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while wiring a canvas into the page.
#[derive(Debug, Error)]
pub enum CanvasError {
	#[error("no global `window`")]
	NoWindow,
	#[error("canvas has no 2d context")]
	NoContext,
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for CanvasError {
	fn from(value: JsValue) -> Self {
		CanvasError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

pub type Result<T, E = CanvasError> = std::result::Result<T, E>;
