//! Graph store: nodes, edges and the adjacency derived from them.
//!
//! Edges are the source of truth. Each node's `connected_nodes` is recomputed
//! from the edge list for every endpoint an edge mutation touches, and nowhere
//! else. A relationship is always exactly one edge record; `both-ways` is a
//! direction on that record, never a second edge in the reverse orientation.

use std::collections::BTreeSet;

use log::debug;

use super::types::{DirectionType, EdgeKey, GraphEdge, GraphNode, GraphSnapshot, NodeId, Point};

#[derive(Clone, Debug)]
pub struct GraphStore {
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
	next_id: u32,
}

impl Default for GraphStore {
	fn default() -> Self {
		Self::new()
	}
}

impl GraphStore {
	pub fn new() -> Self {
		Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			next_id: 1,
		}
	}

	/// Nodes in insertion order.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn edge(&self, key: EdgeKey) -> Option<&GraphEdge> {
		self.edges.iter().find(|e| e.key() == key)
	}

	pub fn snapshot(&self) -> GraphSnapshot {
		GraphSnapshot {
			nodes: self.nodes.clone(),
			edges: self.edges.clone(),
		}
	}

	pub fn add_node(&mut self, x: f64, y: f64) -> NodeId {
		let id = NodeId(self.next_id);
		self.next_id += 1;
		if self.node(id).is_some() {
			debug!("node {id} already present, not inserting");
			return id;
		}
		self.nodes.push(GraphNode::new(id, Point::new(x, y)));
		debug!("added node {id} at ({x}, {y})");
		id
	}

	/// Adds `from`-`to` with weight 1. Refused when an endpoint is missing, for
	/// self-loops, and when the pair is already linked in either orientation.
	pub fn add_edge(&mut self, from: NodeId, to: NodeId, direction: DirectionType) -> bool {
		if from == to || self.node(from).is_none() || self.node(to).is_none() {
			return false;
		}
		let key = EdgeKey::new(from, to);
		if self.edge(key).is_some() || self.edge(key.reversed()).is_some() {
			debug!("edge {key} already linked, ignoring");
			return false;
		}
		self.edges.push(GraphEdge {
			from,
			to,
			weight: GraphEdge::DEFAULT_WEIGHT,
			direction,
		});
		self.refresh_adjacency(&[from, to]);
		debug!("added {direction} edge {key}");
		true
	}

	pub fn delete_node(&mut self, id: NodeId) -> bool {
		if self.node(id).is_none() {
			return false;
		}
		let mut neighbors = Vec::new();
		let before = self.edges.len();
		self.edges.retain(|edge| {
			if edge.key().touches(id) {
				neighbors.push(if edge.from == id { edge.to } else { edge.from });
				false
			} else {
				true
			}
		});
		self.nodes.retain(|n| n.id != id);
		self.refresh_adjacency(&neighbors);
		debug!(
			"deleted node {id} and {} incident edges",
			before - self.edges.len()
		);
		true
	}

	/// Removes exactly `from-to`; the reverse key is a different edge.
	pub fn delete_edge(&mut self, from: NodeId, to: NodeId) -> bool {
		let key = EdgeKey::new(from, to);
		let Some(index) = self.edges.iter().position(|e| e.key() == key) else {
			return false;
		};
		self.edges.remove(index);
		self.refresh_adjacency(&[from, to]);
		debug!("deleted edge {key}");
		true
	}

	pub fn update_edge_weight(&mut self, from: NodeId, to: NodeId, weight: f64) -> bool {
		let key = EdgeKey::new(from, to);
		let Some(edge) = self.edges.iter_mut().find(|e| e.key() == key) else {
			return false;
		};
		edge.weight = weight;
		debug!("edge {key} weight set to {weight}");
		true
	}

	/// Advances `undirected -> one-way -> both-ways -> undirected` and returns
	/// the new direction.
	pub fn cycle_edge_direction(&mut self, from: NodeId, to: NodeId) -> Option<DirectionType> {
		let direction = self.edge(EdgeKey::new(from, to))?.direction.cycled();
		self.set_edge_direction(from, to, direction);
		Some(direction)
	}

	/// Sets the direction of exactly `from-to` and re-derives both endpoints'
	/// neighbors.
	pub fn set_edge_direction(
		&mut self,
		from: NodeId,
		to: NodeId,
		direction: DirectionType,
	) -> bool {
		let key = EdgeKey::new(from, to);
		let Some(edge) = self.edges.iter_mut().find(|e| e.key() == key) else {
			return false;
		};
		edge.direction = direction;
		self.refresh_adjacency(&[from, to]);
		debug!("edge {key} is now {direction}");
		true
	}

	/// Returns `false` when the node is gone, so a stale drag capture can let go.
	pub fn set_node_position(&mut self, id: NodeId, position: Point) -> bool {
		let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
			return false;
		};
		node.position = position;
		true
	}

	/// Neighbors of `id` implied by the current edge list.
	fn derived_neighbors(&self, id: NodeId) -> BTreeSet<NodeId> {
		self.edges
			.iter()
			.filter_map(|edge| {
				if edge.from == id {
					Some(edge.to)
				} else if edge.to == id && edge.direction.is_mutual() {
					Some(edge.from)
				} else {
					None
				}
			})
			.collect()
	}

	fn refresh_adjacency(&mut self, ids: &[NodeId]) {
		for &id in ids {
			let neighbors = self.derived_neighbors(id);
			if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
				node.connected_nodes = neighbors;
			}
		}
	}
}
