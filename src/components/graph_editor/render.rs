use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::geometry::{self, HandleSide};
use super::gesture::Interaction;
use super::hit;
use super::state::{
	BOTH_WAYS_OFFSET, GraphEditorState, HANDLE_RADIUS, LABEL_HIT_RADIUS, NODE_RADIUS,
};
use super::types::{DirectionType, GraphEdge, Point};

const BACKGROUND: &str = "#1a1a2e";
const EDGE_COLOR: &str = "rgba(100, 180, 255, 0.8)";
const EDGE_EDITING_COLOR: &str = "#ffd166";
const NODE_COLOR: &str = "#1f77b4";
const NODE_HOVER_COLOR: &str = "#3a95d6";
const NODE_NEIGHBOR_COLOR: &str = "#2c86c5";
const HANDLE_COLOR: &str = "rgba(255, 255, 255, 0.85)";
const ARROW_SIZE: f64 = 12.0;

/// Draws one frame. Reads the state, never writes it.
pub fn render(state: &GraphEditorState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_rubber_band(state, ctx);
	draw_nodes(state, ctx);
	draw_handles(state, ctx);
}

fn draw_edges(state: &GraphEditorState, ctx: &CanvasRenderingContext2d) {
	let editing = match state.gesture.interaction() {
		Interaction::EditingWeight { edge } => Some(edge),
		_ => None,
	};

	for edge in state.store.edges() {
		let (Some(from), Some(to)) = (state.store.node(edge.from), state.store.node(edge.to)) else {
			continue;
		};
		let (a, b) = (from.position, to.position);
		let color = if editing == Some(edge.key()) {
			EDGE_EDITING_COLOR
		} else {
			EDGE_COLOR
		};
		ctx.set_stroke_style_str(color);
		ctx.set_fill_style_str(color);
		ctx.set_line_width(2.0);

		match edge.direction {
			DirectionType::Undirected => {
				ctx.begin_path();
				ctx.move_to(a.x, a.y);
				ctx.line_to(b.x, b.y);
				ctx.stroke();
			}
			DirectionType::OneWay => {
				ctx.begin_path();
				ctx.move_to(a.x, a.y);
				ctx.line_to(b.x, b.y);
				ctx.stroke();
				draw_arrow(ctx, a, b);
			}
			DirectionType::BothWays => {
				let n = geometry::unit_normal(a, b);
				// A quadratic arc passes halfway to its control point.
				let bend = 2.0 * BOTH_WAYS_OFFSET;
				let mid = geometry::midpoint(a, b);
				let forward = mid.offset(n.x * bend, n.y * bend);
				let backward = mid.offset(-n.x * bend, -n.y * bend);
				draw_arc(ctx, a, forward, b);
				draw_arrow(ctx, forward, b);
				draw_arc(ctx, b, backward, a);
				draw_arrow(ctx, backward, a);
			}
		}
		draw_labels(state, ctx, edge);
	}
}

fn draw_arc(ctx: &CanvasRenderingContext2d, from: Point, control: Point, to: Point) {
	ctx.begin_path();
	ctx.move_to(from.x, from.y);
	ctx.quadratic_curve_to(control.x, control.y, to.x, to.y);
	ctx.stroke();
}

/// Arrow head on the rim of the node at `tip`, pointing away from `from`.
fn draw_arrow(ctx: &CanvasRenderingContext2d, from: Point, tip: Point) {
	let (dx, dy) = (tip.x - from.x, tip.y - from.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let (tip_x, tip_y) = (tip.x - ux * NODE_RADIUS, tip.y - uy * NODE_RADIUS);
	let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_labels(state: &GraphEditorState, ctx: &CanvasRenderingContext2d, edge: &GraphEdge) {
	let text = edge.weight_label();
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	for p in hit::label_positions(&state.store, edge) {
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, LABEL_HIT_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(BACKGROUND);
		ctx.fill();
		ctx.set_fill_style_str("white");
		let _ = ctx.fill_text(&text, p.x, p.y);
	}
}

fn draw_rubber_band(state: &GraphEditorState, ctx: &CanvasRenderingContext2d) {
	let Interaction::DraggingNewEdgeHandle { start, current, .. } = state.gesture.interaction()
	else {
		return;
	};
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.6)");
	ctx.set_line_width(1.5);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(6.0),
		&JsValue::from_f64(4.0),
	));
	ctx.begin_path();
	ctx.move_to(start.x, start.y);
	ctx.line_to(current.x, current.y);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &GraphEditorState, ctx: &CanvasRenderingContext2d) {
	let hovered = state.gesture.hovered();
	let neighbors = hovered
		.and_then(|id| state.store.node(id))
		.map(|n| n.connected_nodes());
	ctx.set_font("16px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for node in state.store.nodes() {
		let Point { x, y } = node.position;
		ctx.begin_path();
		let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(if hovered == Some(node.id) {
			NODE_HOVER_COLOR
		} else if neighbors.is_some_and(|n| n.contains(&node.id)) {
			NODE_NEIGHBOR_COLOR
		} else {
			NODE_COLOR
		});
		ctx.fill();

		ctx.set_fill_style_str("white");
		let _ = ctx.fill_text(&node.id.to_string(), x, y);
	}
}

fn draw_handles(state: &GraphEditorState, ctx: &CanvasRenderingContext2d) {
	if state.gesture.interaction().is_dragging() {
		return;
	}
	let Some(node) = state.gesture.hovered().and_then(|id| state.store.node(id)) else {
		return;
	};
	ctx.set_fill_style_str(HANDLE_COLOR);
	for side in HandleSide::ALL {
		let c = side.center(node.position, NODE_RADIUS);
		ctx.begin_path();
		let _ = ctx.arc(c.x, c.y, HANDLE_RADIUS, 0.0, 2.0 * PI);
		ctx.fill();
	}
}
