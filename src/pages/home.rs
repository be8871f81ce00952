use leptos::prelude::*;

use crate::components::constellation::{ConstellationCanvas, STEPS};
use crate::components::particle_cloud::ParticleCloud;

/// Progress for step `i` of the constellation walkthrough.
fn step_progress(i: usize) -> f64 {
	i as f64 / (STEPS.len() - 1) as f64
}

#[component]
fn Hero() -> impl IntoView {
	view! {
		<section class="hero" style="position: relative; min-height: 100vh; overflow: hidden;">
			<div style="position: absolute; inset: 0;">
				<ParticleCloud />
			</div>
			<div class="hero-copy" style="position: relative; z-index: 1; text-align: center; padding-top: 30vh;">
				<p class="eyebrow">"Intelligence Infrastructure · Now in Beta"</p>
				<h1>"From raw data to decisive intelligence."</h1>
				<p class="subtitle">
					"Xai ingests your operational chaos, structures it with AI, and orchestrates it into automated decisions."
				</p>
				<a class="cta" href="#constellation">"See how it works →"</a>
			</div>
		</section>
	}
}

#[component]
fn Constellation() -> impl IntoView {
	let (step, set_step) = signal(0usize);
	let (progress, set_progress) = signal(0.0f64);
	let (autoplay, set_autoplay) = signal(false);

	let go_to = move |i: usize| {
		let i = i.min(STEPS.len() - 1);
		set_step.set(i);
		set_progress.set(step_progress(i));
	};

	view! {
		<section id="constellation" class="constellation">
			<span class="eyebrow">"Orchestration"</span>
			<h2>"Intelligence orchestrating itself."</h2>
			<p class="subtitle">
				"Click through the steps to watch unstructured data nodes self-organize into a deterministic automation pipeline."
			</p>

			<div class="step-controls">
				{STEPS
					.iter()
					.enumerate()
					.map(|(i, s)| {
						view! {
							<button
								class="step"
								class:active=move || step.get() == i
								disabled=move || autoplay.get()
								on:click=move |_| go_to(i)
							>
								<span class="step-index">{format!("0{}", i + 1)}</span>
								{s.label}
							</button>
						}
					})
					.collect_view()}
				<span class="step-description">
					{move || format!("— {}", STEPS[step.get()].description)}
				</span>
				<button class="autoplay" on:click=move |_| set_autoplay.update(|a| *a = !*a)>
					{move || if autoplay.get() { "Pause" } else { "Autoplay" }}
				</button>
			</div>

			<div class="constellation-frame" style="position: relative; width: 100%; height: 460px;">
				<ConstellationCanvas progress=progress autoplay=autoplay />
				<div class="constellation-nav">
					<button
						disabled=move || autoplay.get() || step.get() == 0
						on:click=move |_| go_to(step.get_untracked().saturating_sub(1))
					>
						"←"
					</button>
					<button
						disabled=move || autoplay.get() || step.get() == STEPS.len() - 1
						on:click=move |_| go_to(step.get_untracked() + 1)
					>
						"→"
					</button>
				</div>
			</div>

			<input
				class="constellation-scrub"
				type="range"
				min="0"
				max="1"
				step="0.001"
				disabled=move || autoplay.get()
				prop:value=move || progress.get().to_string()
				on:input=move |ev| {
					if let Ok(value) = event_target_value(&ev).parse::<f64>() {
						let value = value.clamp(0.0, 1.0);
						set_progress.set(value);
						set_step.set((value * (STEPS.len() - 1) as f64).round() as usize);
					}
				}
			/>
		</section>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<main class="landing">
				<Hero />
				<Constellation />
			</main>
		</ErrorBoundary>
	}
}
