use leptos::prelude::*;

use crate::components::graph_editor::{GraphEditorCanvas, GraphSnapshot};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (counts, set_counts) = signal((0usize, 0usize));
	let on_change = move |snapshot: GraphSnapshot| {
		set_counts.set((snapshot.nodes.len(), snapshot.edges.len()));
	};

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

			<div class="fullscreen-graph">
				<GraphEditorCanvas fullscreen=true on_change=on_change />
				<div class="graph-overlay">
					<h1>"Graph Editor"</h1>
					<p class="subtitle">
						"Double-click to add or delete a node. "
						"Drag a handle onto another node to link them. "
						"Click an edge to cycle its direction, click its weight to edit it."
					</p>
					<p class="subtitle">
						{move || {
							let (nodes, edges) = counts.get();
							format!("{nodes} nodes, {edges} edges")
						}}
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
