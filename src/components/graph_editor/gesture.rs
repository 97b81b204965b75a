//! Pointer gesture state machine.
//!
//! Every event handler takes the store explicitly and returns the requests the
//! host has to act on (timers, the weight editor, change notification). The
//! machine itself never touches the DOM, so it runs unchanged under tests.

use std::time::Duration;

use log::debug;

use super::error::WeightEditError;
use super::geometry;
use super::hit::{self, EdgeDistances, HitRouter, HitTarget};
use super::state::{DIRECTION_COOLDOWN, LABEL_HIT_RADIUS};
use super::store::GraphStore;
use super::types::{DirectionType, EdgeKey, NodeId, Point};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Interaction {
	#[default]
	Idle,
	DraggingNode {
		node: NodeId,
	},
	DraggingNewEdgeHandle {
		origin: NodeId,
		start: Point,
		current: Point,
	},
	EditingWeight {
		edge: EdgeKey,
	},
}

impl Interaction {
	pub fn is_idle(&self) -> bool {
		matches!(self, Self::Idle)
	}

	pub fn is_dragging(&self) -> bool {
		matches!(
			self,
			Self::DraggingNode { .. } | Self::DraggingNewEdgeHandle { .. }
		)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeightEditRequest {
	pub edge: EdgeKey,
	pub anchor: Point,
	pub initial: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HostRequest {
	/// Call [`GestureMachine::end_cooldown`] after this long.
	StartCooldown(Duration),
	EditWeight(WeightEditRequest),
	/// The pending weight edit ended without a commit; close the editor.
	CloseWeightEditor,
	GraphChanged,
}

#[derive(Clone, Debug, Default)]
pub struct GestureMachine {
	router: HitRouter,
	interaction: Interaction,
	hovered: Option<NodeId>,
	cooldown: bool,
	pointer: Point,
}

/// Parses user input for an edge weight. Only finite numbers are accepted.
pub fn parse_weight(text: &str) -> Result<f64, WeightEditError> {
	let trimmed = text.trim();
	match trimmed.parse::<f64>() {
		Ok(weight) if weight.is_finite() => Ok(weight),
		_ => Err(WeightEditError::InvalidWeight(trimmed.to_owned())),
	}
}

impl GestureMachine {
	pub fn new(distances: EdgeDistances) -> Self {
		Self {
			router: HitRouter::new(distances),
			..Self::default()
		}
	}

	pub fn interaction(&self) -> Interaction {
		self.interaction
	}

	pub fn hovered(&self) -> Option<NodeId> {
		self.hovered
	}

	pub fn cooldown_active(&self) -> bool {
		self.cooldown
	}

	/// A press while a weight edit is open drops that edit; hosts flush the typed
	/// text through [`Self::commit_weight`] before forwarding the press.
	pub fn pointer_down(&mut self, store: &GraphStore, p: Point) -> Vec<HostRequest> {
		self.pointer = p;
		let mut requests = Vec::new();
		if self.cancel_weight_edit() {
			requests.push(HostRequest::CloseWeightEditor);
		}
		if !self.interaction.is_idle() {
			return requests;
		}
		match self.router.resolve(store, p, self.hovered, false) {
			Some(HitTarget::Handle { node, side }) => {
				debug!("{side:?} handle of node {node} pressed");
				self.transition(Interaction::DraggingNewEdgeHandle {
					origin: node,
					start: p,
					current: p,
				});
			}
			Some(HitTarget::Node(node)) => self.transition(Interaction::DraggingNode { node }),
			_ => {}
		}
		requests
	}

	pub fn pointer_move(&mut self, store: &mut GraphStore, p: Point) -> Vec<HostRequest> {
		self.pointer = p;
		match self.interaction {
			Interaction::DraggingNode { node } => {
				if store.set_node_position(node, p) {
					return vec![HostRequest::GraphChanged];
				}
				debug!("dragged node {node} vanished, releasing");
				self.transition(Interaction::Idle);
			}
			Interaction::DraggingNewEdgeHandle { origin, start, .. } => {
				self.interaction = Interaction::DraggingNewEdgeHandle {
					origin,
					start,
					current: p,
				};
			}
			Interaction::Idle | Interaction::EditingWeight { .. } => self.update_hover(store, p),
		}
		Vec::new()
	}

	pub fn pointer_up(&mut self, store: &mut GraphStore, p: Point) -> Vec<HostRequest> {
		self.pointer = p;
		let mut requests = Vec::new();
		match self.interaction {
			Interaction::DraggingNewEdgeHandle { origin, .. } => {
				if let Some(target) = self.router.node_at(store, p) {
					if target != origin
						&& store.add_edge(origin, target, DirectionType::Undirected)
					{
						requests.push(HostRequest::GraphChanged);
					}
				}
				self.transition(Interaction::Idle);
			}
			Interaction::DraggingNode { .. } => self.transition(Interaction::Idle),
			Interaction::Idle => match self.router.resolve(store, p, self.hovered, false) {
				Some(HitTarget::WeightLabel(edge)) => {
					if let Some(request) = self.begin_weight_edit(store, edge, p) {
						requests.push(HostRequest::EditWeight(request));
					}
				}
				Some(HitTarget::Edge(edge)) => {
					if store.cycle_edge_direction(edge.from, edge.to).is_some() {
						self.cooldown = true;
						requests.push(HostRequest::StartCooldown(DIRECTION_COOLDOWN));
						requests.push(HostRequest::GraphChanged);
					}
				}
				_ => {}
			},
			Interaction::EditingWeight { .. } => {}
		}
		requests
	}

	/// Leaving the canvas mid-drag finishes the drag as a release would.
	pub fn pointer_leave(&mut self, store: &mut GraphStore) -> Vec<HostRequest> {
		let requests = if self.interaction.is_dragging() {
			self.pointer_up(store, self.pointer)
		} else {
			Vec::new()
		};
		self.hovered = None;
		requests
	}

	pub fn double_click(&mut self, store: &mut GraphStore, p: Point) -> Vec<HostRequest> {
		self.pointer = p;
		let mut requests = Vec::new();
		if let Some(id) = self.router.node_at(store, p) {
			if store.delete_node(id) {
				requests.push(HostRequest::GraphChanged);
			}
			self.hovered = None;
			self.release_captures_of(id, &mut requests);
			return requests;
		}
		// Handles poke out past the rim; that area belongs to the hovered node.
		let dragging = self.interaction.is_dragging();
		let hit = self.router.resolve(store, p, self.hovered, dragging);
		if let Some(HitTarget::Handle { .. }) = hit {
			return requests;
		}

		let editing = matches!(self.interaction, Interaction::EditingWeight { .. });
		if !self.cooldown_active() && !editing {
			store.add_node(p.x, p.y);
			requests.push(HostRequest::GraphChanged);
		} else if !dragging {
			self.delete_edge_at(store, p, &mut requests);
		}
		requests
	}

	/// Applies typed text to the edge being edited. The edit ends either way.
	pub fn commit_weight(
		&mut self,
		store: &mut GraphStore,
		text: &str,
	) -> Result<bool, WeightEditError> {
		let Interaction::EditingWeight { edge } = self.interaction else {
			return Err(WeightEditError::NoPendingEdit);
		};
		self.transition(Interaction::Idle);
		let weight = parse_weight(text)?;
		Ok(store.update_edge_weight(edge.from, edge.to, weight))
	}

	pub fn cancel_weight_edit(&mut self) -> bool {
		if matches!(self.interaction, Interaction::EditingWeight { .. }) {
			self.transition(Interaction::Idle);
			return true;
		}
		false
	}

	pub fn end_cooldown(&mut self) {
		self.cooldown = false;
	}

	fn begin_weight_edit(
		&mut self,
		store: &GraphStore,
		key: EdgeKey,
		p: Point,
	) -> Option<WeightEditRequest> {
		let edge = store.edge(key)?;
		let anchor = hit::label_positions(store, edge)
			.into_iter()
			.find(|c| geometry::point_in_circle(p, *c, LABEL_HIT_RADIUS))
			.unwrap_or(p);
		let request = WeightEditRequest {
			edge: key,
			anchor,
			initial: edge.weight,
		};
		self.transition(Interaction::EditingWeight { edge: key });
		Some(request)
	}

	fn delete_edge_at(
		&mut self,
		store: &mut GraphStore,
		p: Point,
		requests: &mut Vec<HostRequest>,
	) {
		let Some(edge) = self.router.edge_at(store, p) else {
			return;
		};
		if !store.delete_edge(edge.from, edge.to) {
			return;
		}
		requests.push(HostRequest::GraphChanged);
		if self.interaction == (Interaction::EditingWeight { edge }) {
			self.transition(Interaction::Idle);
			requests.push(HostRequest::CloseWeightEditor);
		}
	}

	fn update_hover(&mut self, store: &GraphStore, p: Point) {
		let on_handle = self
			.hovered
			.is_some_and(|id| self.router.handle_at(store, id, p).is_some());
		if !on_handle {
			self.hovered = self.router.node_at(store, p);
		}
	}

	fn release_captures_of(&mut self, node: NodeId, requests: &mut Vec<HostRequest>) {
		match self.interaction {
			Interaction::DraggingNode { node: n }
			| Interaction::DraggingNewEdgeHandle { origin: n, .. }
				if n == node =>
			{
				self.transition(Interaction::Idle);
			}
			Interaction::EditingWeight { edge } if edge.touches(node) => {
				self.transition(Interaction::Idle);
				requests.push(HostRequest::CloseWeightEditor);
			}
			_ => {}
		}
	}

	fn transition(&mut self, next: Interaction) {
		debug!("gesture {:?} -> {:?}", self.interaction, next);
		self.interaction = next;
	}
}
