use leptos::prelude::*;

use crate::components::circuit_board::CircuitBoardCanvas;

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

			<div class="fullscreen-board">
				<CircuitBoardCanvas />
				<div class="board-overlay">
					<h1>"LogicBench"</h1>
					<p class="subtitle">
						"Pick gates from the toolbox. Drag from an output port to an input port to wire them. Click a switch to toggle it; the bulb shows the result."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
