use std::collections::BTreeSet;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn offset(self, dx: f64, dy: f64) -> Self {
		Self::new(self.x + dx, self.y + dy)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Identity of an edge: the ordered `(from, to)` pair, so `1-2` and `2-1` differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
	pub from: NodeId,
	pub to: NodeId,
}

impl EdgeKey {
	pub const fn new(from: NodeId, to: NodeId) -> Self {
		Self { from, to }
	}

	pub const fn reversed(self) -> Self {
		Self::new(self.to, self.from)
	}

	pub fn touches(self, node: NodeId) -> bool {
		self.from == node || self.to == node
	}
}

impl fmt::Display for EdgeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.from, self.to)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DirectionType {
	OneWay,
	BothWays,
	#[default]
	Undirected,
}

impl DirectionType {
	/// Next state of the click-to-cycle sequence.
	pub fn cycled(self) -> Self {
		match self {
			Self::Undirected => Self::OneWay,
			Self::OneWay => Self::BothWays,
			Self::BothWays => Self::Undirected,
		}
	}

	/// Whether the `to` endpoint also counts `from` as a neighbor.
	pub fn is_mutual(self) -> bool {
		!matches!(self, Self::OneWay)
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::OneWay => "one-way",
			Self::BothWays => "both-ways",
			Self::Undirected => "undirected",
		}
	}
}

impl fmt::Display for DirectionType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: NodeId,
	pub position: Point,
	pub(super) connected_nodes: BTreeSet<NodeId>,
}

impl GraphNode {
	pub(super) fn new(id: NodeId, position: Point) -> Self {
		Self {
			id,
			position,
			connected_nodes: BTreeSet::new(),
		}
	}

	/// Nodes this one has an outgoing or mutual relationship to.
	pub fn connected_nodes(&self) -> &BTreeSet<NodeId> {
		&self.connected_nodes
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	pub from: NodeId,
	pub to: NodeId,
	pub weight: f64,
	pub direction: DirectionType,
}

impl GraphEdge {
	pub const DEFAULT_WEIGHT: f64 = 1.0;

	pub fn key(&self) -> EdgeKey {
		EdgeKey::new(self.from, self.to)
	}

	/// Weight as drawn on the canvas; storage keeps full precision.
	pub fn weight_label(&self) -> String {
		format!("{:.1}", self.weight)
	}
}

/// Owned copy of the graph handed to the host after a mutation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphSnapshot {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn edge_key_is_order_sensitive() {
		let a = EdgeKey::new(NodeId(1), NodeId(2));
		assert_eq!(a.to_string(), "1-2");
		assert_eq!(a.reversed().to_string(), "2-1");
		assert_ne!(a, a.reversed());
	}

	#[test]
	fn direction_cycle_has_period_three() {
		for start in [
			DirectionType::Undirected,
			DirectionType::OneWay,
			DirectionType::BothWays,
		] {
			assert_eq!(start.cycled().cycled().cycled(), start);
			assert_ne!(start.cycled(), start);
		}
	}

	#[test]
	fn weight_label_rounds_to_one_decimal() {
		let edge = GraphEdge {
			from: NodeId(1),
			to: NodeId(2),
			weight: 2.345,
			direction: DirectionType::Undirected,
		};
		assert_eq!(edge.weight_label(), "2.3");
		assert_eq!(edge.weight, 2.345);
	}
}
