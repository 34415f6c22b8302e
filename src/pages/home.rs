use leptos::prelude::*;

use crate::components::scene_canvas::SceneCanvas;
use crate::engine::HoveredInfo;
use crate::render::BlendMode;
use crate::scenes::{constellation_config, skills_config};

/// Default Home Page: the fullscreen constellation background plus the
/// labeled skills-network section with its category filter and info panel.
#[component]
pub fn Home() -> impl IntoView {
	let skills = skills_config(42);
	let categories: Vec<_> = skills
		.categories
		.iter()
		.map(|c| (c.id.clone(), c.name.clone()))
		.collect();

	let selected = RwSignal::new(None::<usize>);
	let hovered = RwSignal::new(None::<HoveredInfo>);
	let on_hover = Callback::new(move |info: Option<HoveredInfo>| hovered.set(info));

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

			<div class="constellation-background">
				<SceneCanvas config=constellation_config(7) fullscreen=true />
			</div>

			<section class="skills-network">
				<div class="skills-network__categories">
					{categories
						.into_iter()
						.enumerate()
						.map(|(i, (id, name))| {
							view! {
								<button
									class="skills-network__category"
									class=("skills-network__category--active", move || {
										selected.get() == Some(i)
									})
									on:click=move |_| {
										selected
											.update(|s| {
												*s = if *s == Some(i) { None } else { Some(i) };
											});
									}
									data-category=id
								>
									{name}
								</button>
							}
						})
						.collect_view()}
				</div>

				<SceneCanvas
					config=skills
					blend=BlendMode::Normal
					selected_category=Signal::derive(move || selected.get())
					on_hover=on_hover
				/>

				<Show when=move || hovered.get().is_some()>
					{move || {
						hovered
							.get()
							.map(|info| {
								view! {
									<div class="skills-network__info">
										<span class="skills-network__info-label">{info.label}</span>
										<span class="skills-network__info-category">
											{info.category.unwrap_or_default()}
										</span>
										<span class="skills-network__info-connections">
											{format!("{} connections", info.connections)}
										</span>
									</div>
								}
							})
					}}
				</Show>
			</section>
		</ErrorBoundary>
	}
}
