//! Collision-aware placement of newly inserted components.

use super::config::BoardConfig;
use super::geometry::Point;
use super::graph::CircuitGraph;

/// Find a spot near `prefer` with clearance from every placed component.
///
/// The preferred point is clamped inside the padded canvas, then concentric
/// rings of cardinal/diagonal candidates are scanned outward. When every
/// ring is crowded the clamped preferred point is returned; overlap is the
/// last resort, this never fails.
pub fn find_free_spot(
	graph: &CircuitGraph,
	cfg: &BoardConfig,
	width: f64,
	height: f64,
	prefer: Option<Point>,
) -> Point {
	let pad = cfg.place_pad;
	let clamp_x = |x: f64| x.clamp(pad, (width - pad).max(pad));
	let clamp_y = |y: f64| y.clamp(pad, (height - pad).max(pad));
	let start = Point::new(
		clamp_x(prefer.map_or(width / 2.0, |p| p.x)),
		clamp_y(prefer.map_or(height / 2.0, |p| p.y)),
	);

	let step = cfg.place_step();
	for ring in 0..cfg.place_rings {
		let r = ring as f64 * step;
		let candidates = [
			Point::new(start.x + r, start.y),
			Point::new(start.x - r, start.y),
			Point::new(start.x, start.y + r),
			Point::new(start.x, start.y - r),
			Point::new(start.x + r, start.y + r),
			Point::new(start.x - r, start.y - r),
			Point::new(start.x + r, start.y - r),
			Point::new(start.x - r, start.y + r),
		];
		for c in candidates {
			let p = Point::new(clamp_x(c.x), clamp_y(c.y));
			if !is_crowded(graph, cfg, p) {
				return p;
			}
		}
	}
	start
}

fn is_crowded(graph: &CircuitGraph, cfg: &BoardConfig, p: Point) -> bool {
	graph
		.components()
		.any(|c| c.pos.distance(p) < cfg.place_clearance)
}
