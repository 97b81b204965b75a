//! Pure geometry helpers shared by hit-testing and the renderer.

use super::types::Point;

/// One of the four handles drawn around a hovered node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleSide {
	Top,
	Right,
	Bottom,
	Left,
}

impl HandleSide {
	pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

	/// Handle center for a node at `center` with the given radius.
	pub fn center(self, center: Point, node_radius: f64) -> Point {
		match self {
			Self::Top => center.offset(0.0, -node_radius),
			Self::Right => center.offset(node_radius, 0.0),
			Self::Bottom => center.offset(0.0, node_radius),
			Self::Left => center.offset(-node_radius, 0.0),
		}
	}
}

/// Squared distance from `p` to the closed segment `a`-`b`.
///
/// A zero-length segment degrades to the distance to `a`.
pub fn distance_to_segment_squared(a: Point, b: Point, p: Point) -> f64 {
	let (cx, cy) = (b.x - a.x, b.y - a.y);
	let len_sq = cx * cx + cy * cy;
	let t = if len_sq != 0.0 {
		(((p.x - a.x) * cx + (p.y - a.y) * cy) / len_sq).clamp(0.0, 1.0)
	} else {
		0.0
	};
	let (nx, ny) = (a.x + t * cx, a.y + t * cy);
	let (dx, dy) = (p.x - nx, p.y - ny);
	dx * dx + dy * dy
}

pub fn midpoint(a: Point, b: Point) -> Point {
	Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Strict containment: a point on the rim is outside.
pub fn point_in_circle(p: Point, center: Point, radius: f64) -> bool {
	let (dx, dy) = (p.x - center.x, p.y - center.y);
	dx * dx + dy * dy < radius * radius
}

pub fn handle_at(
	node_center: Point,
	p: Point,
	node_radius: f64,
	handle_radius: f64,
) -> Option<HandleSide> {
	HandleSide::ALL
		.into_iter()
		.find(|side| point_in_circle(p, side.center(node_center, node_radius), handle_radius))
}

/// Unit normal of `a`->`b`, rotated a quarter turn clockwise in screen space.
pub fn unit_normal(a: Point, b: Point) -> Point {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	let len = (dx * dx + dy * dy).sqrt();
	if len < f64::EPSILON {
		return Point::default();
	}
	Point::new(-dy / len, dx / len)
}

/// Midpoints of the two arcs of a both-ways edge, one on each side of `a`-`b`.
pub fn offset_midpoints(a: Point, b: Point, offset: f64) -> [Point; 2] {
	let mid = midpoint(a, b);
	let n = unit_normal(a, b);
	[
		mid.offset(n.x * offset, n.y * offset),
		mid.offset(-n.x * offset, -n.y * offset),
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn segment_distance_projects_inside() {
		let d = distance_to_segment_squared(
			Point::new(0.0, 0.0),
			Point::new(10.0, 0.0),
			Point::new(5.0, 3.0),
		);
		assert_eq!(d, 9.0);
	}

	#[test]
	fn segment_distance_clamps_to_endpoints() {
		let a = Point::new(0.0, 0.0);
		let b = Point::new(10.0, 0.0);
		assert_eq!(distance_to_segment_squared(a, b, Point::new(-3.0, 4.0)), 25.0);
		assert_eq!(distance_to_segment_squared(a, b, Point::new(13.0, 4.0)), 25.0);
	}

	#[test]
	fn degenerate_segment_uses_start() {
		let a = Point::new(2.0, 2.0);
		assert_eq!(distance_to_segment_squared(a, a, Point::new(5.0, 6.0)), 25.0);
	}

	#[test]
	fn midpoint_averages() {
		assert_eq!(
			midpoint(Point::new(0.0, 0.0), Point::new(100.0, 50.0)),
			Point::new(50.0, 25.0)
		);
	}

	#[test]
	fn circle_rim_is_outside() {
		let c = Point::new(0.0, 0.0);
		assert!(point_in_circle(c, c, 50.0));
		assert!(point_in_circle(Point::new(49.0, 0.0), c, 50.0));
		assert!(!point_in_circle(Point::new(50.0, 0.0), c, 50.0));
	}

	#[test]
	fn handles_sit_on_compass_points() {
		let c = Point::new(100.0, 100.0);
		assert_eq!(handle_at(c, Point::new(100.0, 52.0), 50.0, 10.0), Some(HandleSide::Top));
		assert_eq!(handle_at(c, Point::new(148.0, 100.0), 50.0, 10.0), Some(HandleSide::Right));
		assert_eq!(handle_at(c, Point::new(100.0, 155.0), 50.0, 10.0), Some(HandleSide::Bottom));
		assert_eq!(handle_at(c, Point::new(45.0, 100.0), 50.0, 10.0), Some(HandleSide::Left));
		assert_eq!(handle_at(c, Point::new(135.0, 65.0), 50.0, 10.0), None);
		assert_eq!(handle_at(c, c, 50.0, 10.0), None);
	}

	#[test]
	fn offset_midpoints_straddle_the_segment() {
		let [a, b] = offset_midpoints(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 15.0);
		assert_eq!(a, Point::new(50.0, 15.0));
		assert_eq!(b, Point::new(50.0, -15.0));
	}

	#[test]
	fn offset_midpoints_collapse_for_coincident_points() {
		let p = Point::new(7.0, 7.0);
		assert_eq!(offset_midpoints(p, p, 15.0), [p, p]);
	}
}
