//! Geometry primitives shared by hit-testing, placement and rendering.

/// A point (or vector) in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

impl std::ops::Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl std::ops::Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub w: f64,
	pub h: f64,
}

impl Rect {
	pub fn centered(center: Point, w: f64, h: f64) -> Self {
		Self {
			x: center.x - w / 2.0,
			y: center.y - h / 2.0,
			w,
			h,
		}
	}

	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
	}
}

/// Round a coordinate to the nearest grid line.
pub fn snap(v: f64, grid: f64) -> f64 {
	(v / grid).round() * grid
}

/// Distance from `p` to the segment `a`..`b` via clamped projection.
pub fn dist_to_segment(p: Point, a: Point, b: Point) -> f64 {
	let ab = b - a;
	let ap = p - a;
	let ab2 = ab.x * ab.x + ab.y * ab.y;
	let t = if ab2 > 0.0 {
		((ap.x * ab.x + ap.y * ab.y) / ab2).clamp(0.0, 1.0)
	} else {
		0.0
	};
	p.distance(Point::new(a.x + t * ab.x, a.y + t * ab.y))
}

/// Evaluate a cubic bezier at parameter `t`.
pub fn cubic_at(c: [Point; 4], t: f64) -> Point {
	let u = 1.0 - t;
	let (uu, tt) = (u * u, t * t);
	let (uuu, ttt) = (uu * u, tt * t);
	Point::new(
		uuu * c[0].x + 3.0 * uu * t * c[1].x + 3.0 * u * tt * c[2].x + ttt * c[3].x,
		uuu * c[0].y + 3.0 * uu * t * c[1].y + 3.0 * u * tt * c[2].y + ttt * c[3].y,
	)
}

/// Subdivisions used when flattening a bezier for distance queries.
pub const BEZIER_STEPS: usize = 24;

/// Approximate distance from `p` to a cubic bezier by sampling the curve
/// into a polyline and taking the minimum point-to-segment distance.
pub fn dist_to_cubic_bezier(p: Point, c: [Point; 4]) -> f64 {
	let mut min = f64::INFINITY;
	let mut prev = c[0];
	for i in 1..=BEZIER_STEPS {
		let t = i as f64 / BEZIER_STEPS as f64;
		let q = cubic_at(c, t);
		min = min.min(dist_to_segment(p, prev, q));
		prev = q;
	}
	min
}

/// Control points for a wire between an output port at `p0` and an input
/// port at `p3`. Tangents are horizontal, their length following the
/// horizontal span clamped to `[30, max_cp]`, negated on the input side.
pub fn wire_curve(p0: Point, p3: Point, max_cp: f64) -> [Point; 4] {
	let dx = ((p3.x - p0.x).abs() * 0.6).clamp(30.0, max_cp);
	[
		p0,
		Point::new(p0.x + dx, p0.y),
		Point::new(p3.x - dx, p3.y),
		p3,
	]
}
