use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, FocusEvent, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window,
};

use super::error::WeightEditError;
use super::gesture::{HostRequest, WeightEditRequest};
use super::render;
use super::state::GraphEditorState;
use super::types::GraphSnapshot;

type SharedState = Rc<RefCell<Option<GraphEditorState>>>;

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Acts on what the gesture machine asked for. Runs after the state borrow ends.
fn dispatch(
	state: &SharedState,
	requests: Vec<HostRequest>,
	editing: RwSignal<Option<WeightEditRequest>>,
	on_change: Option<Callback<GraphSnapshot>>,
) {
	let mut changed = false;
	for request in requests {
		match request {
			HostRequest::StartCooldown(duration) => {
				let state = state.clone();
				set_timeout(
					move || {
						if let Some(ref mut s) = *state.borrow_mut() {
							s.end_cooldown();
						}
					},
					duration,
				);
			}
			HostRequest::EditWeight(request) => editing.set(Some(request)),
			HostRequest::CloseWeightEditor => editing.set(None),
			HostRequest::GraphChanged => changed = true,
		}
	}
	if !changed {
		return;
	}
	let Some(on_change) = on_change else {
		return;
	};
	let snapshot = state.borrow().as_ref().map(|s| s.store.snapshot());
	if let Some(snapshot) = snapshot {
		on_change.run(snapshot);
	}
}

#[component]
pub fn GraphEditorCanvas(
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional, into)] on_change: Option<Callback<GraphSnapshot>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let input_ref = NodeRef::<leptos::html::Input>::new();
	let editing: RwSignal<Option<WeightEditRequest>> = RwSignal::new(None);
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let window_size = |win: &Window| {
			(
				win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0),
				win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0),
			)
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("canvas has no 2d context");
			return;
		};
		*state_init.borrow_mut() = Some(GraphEditorState::new(w, h));
		debug!("graph editor ready at {w}x{h}");

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref s) = *state_anim.borrow() {
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Enter and blur both commit; whichever comes second finds nothing pending.
	let state_commit = state.clone();
	let commit = move |text: String| {
		editing.set(None);
		let result = match *state_commit.borrow_mut() {
			Some(ref mut s) => s.commit_weight(&text),
			None => return,
		};
		match result {
			Ok(true) => {
				dispatch(&state_commit, vec![HostRequest::GraphChanged], editing, on_change)
			}
			Ok(false) | Err(WeightEditError::NoPendingEdit) => {}
			Err(err) => warn!("weight not applied: {err}"),
		}
	};

	// Pressing elsewhere fires before the input blurs; flush the typed text first.
	let (state_md, commit_on_press) = (state.clone(), commit.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if editing.get_untracked().is_some() {
			if let Some(input) = input_ref.get_untracked() {
				commit_on_press(input.value());
			}
		}
		let requests = match *state_md.borrow_mut() {
			Some(ref mut s) => s.pointer_down(x, y),
			None => return,
		};
		dispatch(&state_md, requests, editing, on_change);
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let requests = match *state_mm.borrow_mut() {
			Some(ref mut s) => s.pointer_move(x, y),
			None => return,
		};
		dispatch(&state_mm, requests, editing, on_change);
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let requests = match *state_mu.borrow_mut() {
			Some(ref mut s) => s.pointer_up(x, y),
			None => return,
		};
		dispatch(&state_mu, requests, editing, on_change);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let requests = match *state_ml.borrow_mut() {
			Some(ref mut s) => s.pointer_leave(),
			None => return,
		};
		dispatch(&state_ml, requests, editing, on_change);
	};

	let state_dc = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let requests = match *state_dc.borrow_mut() {
			Some(ref mut s) => s.double_click(x, y),
			None => return,
		};
		dispatch(&state_dc, requests, editing, on_change);
	};

	let commit_on_key = commit.clone();
	let state_cancel = state.clone();
	let on_keydown = move |ev: KeyboardEvent| match ev.key().as_str() {
		"Enter" => commit_on_key(event_target_value(&ev)),
		"Escape" => {
			editing.set(None);
			if let Some(ref mut s) = *state_cancel.borrow_mut() {
				s.cancel_weight_edit();
			}
		}
		_ => {}
	};
	let on_blur = move |ev: FocusEvent| commit(event_target_value(&ev));

	Effect::new(move |_| {
		let Some(request) = editing.get() else {
			return;
		};
		debug!("editing weight of edge {}", request.edge);
		if let Some(input) = input_ref.get() {
			input.set_value(&request.initial.to_string());
			let _ = input.focus();
			input.select();
		}
	});

	let overlay_style = move || match editing.get() {
		Some(request) => format!(
			"position: absolute; left: {}px; top: {}px; \
			 transform: translate(-50%, -50%); width: 4em;",
			request.anchor.x, request.anchor.y
		),
		None => "display: none;".to_string(),
	};

	view! {
		<div class="graph-editor" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="graph-editor-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:dblclick=on_dblclick
				style="display: block; cursor: crosshair;"
			/>
			<input
				node_ref=input_ref
				type="number"
				step="any"
				class="graph-editor-weight"
				style=overlay_style
				on:keydown=on_keydown
				on:blur=on_blur
			/>
		</div>
	}
}
