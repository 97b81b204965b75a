//! Resolves what lies under the pointer.
//!
//! Precedence, highest first: a handle of the hovered node, a node body, an
//! edge weight label, an edge body. Exactly one target comes back per query.

use super::geometry::{self, HandleSide};
use super::state::{BOTH_WAYS_OFFSET, HANDLE_RADIUS, LABEL_HIT_RADIUS, NODE_RADIUS};
use super::store::GraphStore;
use super::types::{DirectionType, EdgeKey, GraphEdge, NodeId, Point};

/// Squared pointer-to-segment distance under which an edge counts as hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeDistances {
	pub one_way: f64,
	pub both_ways: f64,
	pub undirected: f64,
}

impl Default for EdgeDistances {
	fn default() -> Self {
		// The double arc of a both-ways edge is drawn wider apart.
		Self {
			one_way: 100.0,
			both_ways: 400.0,
			undirected: 100.0,
		}
	}
}

impl EdgeDistances {
	pub fn for_direction(&self, direction: DirectionType) -> f64 {
		match direction {
			DirectionType::OneWay => self.one_way,
			DirectionType::BothWays => self.both_ways,
			DirectionType::Undirected => self.undirected,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitTarget {
	Handle { node: NodeId, side: HandleSide },
	Node(NodeId),
	WeightLabel(EdgeKey),
	Edge(EdgeKey),
}

/// Where the weight label(s) of an edge are drawn.
pub fn label_positions(store: &GraphStore, edge: &GraphEdge) -> Vec<Point> {
	let (Some(from), Some(to)) = (store.node(edge.from), store.node(edge.to)) else {
		return Vec::new();
	};
	match edge.direction {
		DirectionType::BothWays => {
			geometry::offset_midpoints(from.position, to.position, BOTH_WAYS_OFFSET).to_vec()
		}
		DirectionType::OneWay | DirectionType::Undirected => {
			vec![geometry::midpoint(from.position, to.position)]
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct HitRouter {
	pub distances: EdgeDistances,
}

impl HitRouter {
	pub fn new(distances: EdgeDistances) -> Self {
		Self { distances }
	}

	/// Full resolution. Handles are only considered for `hovered` and only
	/// when no drag is running.
	pub fn resolve(
		&self,
		store: &GraphStore,
		p: Point,
		hovered: Option<NodeId>,
		dragging: bool,
	) -> Option<HitTarget> {
		if !dragging {
			let handle = hovered.and_then(|id| self.handle_at(store, id, p).map(|s| (id, s)));
			if let Some((node, side)) = handle {
				return Some(HitTarget::Handle { node, side });
			}
		}
		if let Some(id) = self.node_at(store, p) {
			return Some(HitTarget::Node(id));
		}
		if let Some(key) = self.label_at(store, p) {
			return Some(HitTarget::WeightLabel(key));
		}
		self.edge_at(store, p).map(HitTarget::Edge)
	}

	pub fn handle_at(&self, store: &GraphStore, node: NodeId, p: Point) -> Option<HandleSide> {
		let node = store.node(node)?;
		geometry::handle_at(node.position, p, NODE_RADIUS, HANDLE_RADIUS)
	}

	/// First node in insertion order whose body contains `p`.
	pub fn node_at(&self, store: &GraphStore, p: Point) -> Option<NodeId> {
		store
			.nodes()
			.iter()
			.find(|n| geometry::point_in_circle(p, n.position, NODE_RADIUS))
			.map(|n| n.id)
	}

	pub fn label_at(&self, store: &GraphStore, p: Point) -> Option<EdgeKey> {
		store
			.edges()
			.iter()
			.find(|e| {
				label_positions(store, e)
					.into_iter()
					.any(|c| geometry::point_in_circle(p, c, LABEL_HIT_RADIUS))
			})
			.map(GraphEdge::key)
	}

	pub fn edge_at(&self, store: &GraphStore, p: Point) -> Option<EdgeKey> {
		store
			.edges()
			.iter()
			.find(|e| {
				let (Some(from), Some(to)) = (store.node(e.from), store.node(e.to)) else {
					return false;
				};
				geometry::distance_to_segment_squared(from.position, to.position, p)
					<= self.distances.for_direction(e.direction)
			})
			.map(GraphEdge::key)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn line_graph(direction: DirectionType) -> (GraphStore, NodeId, NodeId) {
		let mut store = GraphStore::new();
		let a = store.add_node(0.0, 0.0);
		let b = store.add_node(300.0, 0.0);
		store.add_edge(a, b, direction);
		(store, a, b)
	}

	#[test]
	fn node_center_hits_and_radius_plus_one_misses() {
		let (store, a, _) = line_graph(DirectionType::Undirected);
		let router = HitRouter::default();
		assert_eq!(router.node_at(&store, Point::new(0.0, 0.0)), Some(a));
		assert_eq!(router.node_at(&store, Point::new(0.0, NODE_RADIUS + 1.0)), None);
		assert_eq!(router.node_at(&store, Point::new(-NODE_RADIUS - 1.0, 0.0)), None);
	}

	#[test]
	fn overlapping_nodes_resolve_to_first_inserted() {
		let mut store = GraphStore::new();
		let first = store.add_node(0.0, 0.0);
		store.add_node(10.0, 0.0);
		assert_eq!(HitRouter::default().node_at(&store, Point::new(5.0, 0.0)), Some(first));
	}

	#[test]
	fn handle_only_counts_for_hovered_node_when_idle() {
		let (store, a, _) = line_graph(DirectionType::Undirected);
		let router = HitRouter::default();
		let top = Point::new(0.0, -NODE_RADIUS - 5.0);
		assert_eq!(
			router.resolve(&store, top, Some(a), false),
			Some(HitTarget::Handle { node: a, side: HandleSide::Top })
		);
		assert_eq!(router.resolve(&store, top, None, false), None);
		assert_eq!(router.resolve(&store, top, Some(a), true), None);
	}

	#[test]
	fn handle_beats_node_body() {
		let (store, a, _) = line_graph(DirectionType::Undirected);
		let inside_rim = Point::new(NODE_RADIUS - 5.0, 0.0);
		let router = HitRouter::default();
		assert_eq!(router.resolve(&store, inside_rim, None, false), Some(HitTarget::Node(a)));
		assert_eq!(
			router.resolve(&store, inside_rim, Some(a), false),
			Some(HitTarget::Handle { node: a, side: HandleSide::Right })
		);
	}

	#[test]
	fn label_beats_edge_body_at_midpoint() {
		let (store, a, b) = line_graph(DirectionType::Undirected);
		let router = HitRouter::default();
		let key = EdgeKey::new(a, b);
		assert_eq!(
			router.resolve(&store, Point::new(150.0, 3.0), None, false),
			Some(HitTarget::WeightLabel(key))
		);
		assert_eq!(
			router.resolve(&store, Point::new(100.0, 3.0), None, false),
			Some(HitTarget::Edge(key))
		);
		assert_eq!(router.resolve(&store, Point::new(100.0, 40.0), None, false), None);
	}

	#[test]
	fn node_body_beats_label_inside_it() {
		let mut store = GraphStore::new();
		let a = store.add_node(0.0, 0.0);
		let b = store.add_node(60.0, 0.0);
		store.add_edge(a, b, DirectionType::Undirected);
		let router = HitRouter::default();
		let label = Point::new(30.0, 0.0);
		assert_eq!(router.label_at(&store, label), Some(EdgeKey::new(a, b)));
		assert_eq!(router.resolve(&store, label, None, false), Some(HitTarget::Node(a)));
	}

	#[test]
	fn both_ways_labels_sit_on_the_arcs() {
		let (store, a, b) = line_graph(DirectionType::BothWays);
		let router = HitRouter::default();
		let key = EdgeKey::new(a, b);
		assert_eq!(router.label_at(&store, Point::new(150.0, BOTH_WAYS_OFFSET)), Some(key));
		assert_eq!(router.label_at(&store, Point::new(150.0, -BOTH_WAYS_OFFSET)), Some(key));
		assert_eq!(label_positions(&store, store.edge(key).unwrap()).len(), 2);
	}

	#[test]
	fn edge_threshold_depends_on_direction() {
		let off_line = Point::new(100.0, 15.0);
		let router = HitRouter::default();
		let (undirected, ..) = line_graph(DirectionType::Undirected);
		assert_eq!(router.edge_at(&undirected, off_line), None);
		let (both, a, b) = line_graph(DirectionType::BothWays);
		assert_eq!(router.edge_at(&both, off_line), Some(EdgeKey::new(a, b)));
	}

	#[test]
	fn default_distances_match_public_table() {
		let d = EdgeDistances::default();
		assert_eq!(d.for_direction(DirectionType::OneWay), 100.0);
		assert_eq!(d.for_direction(DirectionType::Undirected), 100.0);
		assert!(d.for_direction(DirectionType::BothWays) > d.one_way);
	}
}
