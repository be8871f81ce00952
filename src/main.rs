use leptos::prelude::*;
use xai_landing::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App)
}
