use std::time::Duration;

use super::error::WeightEditError;
use super::gesture::{GestureMachine, HostRequest};
use super::hit::EdgeDistances;
use super::store::GraphStore;
use super::types::Point;

pub const NODE_RADIUS: f64 = 50.0;
pub const HANDLE_RADIUS: f64 = 10.0;
pub const LABEL_HIT_RADIUS: f64 = 12.0;
/// Distance between a both-ways edge's centerline and each of its two arcs.
pub const BOTH_WAYS_OFFSET: f64 = 15.0;
pub const DIRECTION_COOLDOWN: Duration = Duration::from_millis(300);

/// Everything the canvas shares between event handlers and the frame loop.
#[derive(Debug)]
pub struct GraphEditorState {
	pub store: GraphStore,
	pub gesture: GestureMachine,
	pub width: f64,
	pub height: f64,
}

impl GraphEditorState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			store: GraphStore::new(),
			gesture: GestureMachine::new(EdgeDistances::default()),
			width,
			height,
		}
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) -> Vec<HostRequest> {
		self.gesture.pointer_down(&self.store, Point::new(x, y))
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) -> Vec<HostRequest> {
		self.gesture.pointer_move(&mut self.store, Point::new(x, y))
	}

	pub fn pointer_up(&mut self, x: f64, y: f64) -> Vec<HostRequest> {
		self.gesture.pointer_up(&mut self.store, Point::new(x, y))
	}

	pub fn pointer_leave(&mut self) -> Vec<HostRequest> {
		self.gesture.pointer_leave(&mut self.store)
	}

	pub fn double_click(&mut self, x: f64, y: f64) -> Vec<HostRequest> {
		self.gesture.double_click(&mut self.store, Point::new(x, y))
	}

	pub fn commit_weight(&mut self, text: &str) -> Result<bool, WeightEditError> {
		self.gesture.commit_weight(&mut self.store, text)
	}

	pub fn cancel_weight_edit(&mut self) -> bool {
		self.gesture.cancel_weight_edit()
	}

	pub fn end_cooldown(&mut self) {
		self.gesture.end_cooldown();
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_editor::gesture::Interaction;
	use crate::components::graph_editor::types::DirectionType;

	#[test]
	fn place_link_and_cycle_through_state() {
		let mut state = GraphEditorState::new(800.0, 600.0);
		state.double_click(100.0, 100.0);
		state.double_click(400.0, 100.0);
		assert_eq!(state.store.nodes().len(), 2);

		state.pointer_move(100.0, 100.0);
		state.pointer_down(100.0 + NODE_RADIUS, 100.0);
		state.pointer_move(380.0, 110.0);
		state.pointer_up(400.0, 100.0);
		assert_eq!(state.store.edges().len(), 1);

		let requests = state.pointer_up(200.0, 102.0);
		assert!(requests.contains(&HostRequest::StartCooldown(DIRECTION_COOLDOWN)));
		assert_eq!(state.store.edges()[0].direction, DirectionType::OneWay);
		state.end_cooldown();
		assert!(!state.gesture.cooldown_active());
	}

	#[test]
	fn typed_weight_survives_a_press_elsewhere() {
		let mut state = GraphEditorState::new(800.0, 600.0);
		state.double_click(100.0, 100.0);
		state.double_click(400.0, 100.0);
		state.pointer_move(100.0, 100.0);
		state.pointer_down(100.0 + NODE_RADIUS, 100.0);
		state.pointer_up(400.0, 100.0);

		state.pointer_down(250.0, 100.0);
		state.pointer_up(250.0, 100.0);
		assert!(matches!(
			state.gesture.interaction(),
			Interaction::EditingWeight { .. }
		));

		// The host flushes the input before forwarding the press.
		assert_eq!(state.commit_weight("6.5"), Ok(true));
		assert!(state.pointer_down(100.0, 100.0).is_empty());
		assert_eq!(state.store.edges()[0].weight, 6.5);
	}
}
