//! Board tunables, fixed at construction time.

/// Sizes, hit radii and search bounds for one board instance.
///
/// The touch flag only selects the larger hit radii and the auto-commit
/// behavior while wiring; nothing else branches on the input device.
#[derive(Clone, Debug)]
pub struct BoardConfig {
	pub grid: f64,
	pub gate_w: f64,
	pub gate_h: f64,
	/// Visual port radius; hit radius is `port_hit`.
	pub node_r: f64,
	pub port_hit: f64,
	pub wire_hit: f64,
	/// Upper bound on the bezier tangent length of a wire.
	pub wire_cp: f64,
	pub snap_move_grid: bool,
	pub place_pad: f64,
	pub place_rings: usize,
	pub place_clearance: f64,
	pub sim_rounds: usize,
	pub touch: bool,
}

impl BoardConfig {
	pub fn new(touch: bool) -> Self {
		Self {
			grid: 22.0,
			gate_w: 104.0,
			gate_h: 60.0,
			node_r: 7.0,
			port_hit: if touch { 32.0 } else { 16.0 },
			wire_hit: if touch { 20.0 } else { 10.0 },
			wire_cp: 72.0,
			snap_move_grid: false,
			place_pad: 70.0,
			place_rings: 18,
			place_clearance: 92.0,
			sim_rounds: 3,
			touch,
		}
	}

	/// Ring spacing of the free-spot search.
	pub fn place_step(&self) -> f64 {
		self.grid * 2.0
	}
}

impl Default for BoardConfig {
	fn default() -> Self {
		Self::new(false)
	}
}
