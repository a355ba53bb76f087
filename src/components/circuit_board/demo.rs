//! Prebuilt teaching circuits: switches on the left, the gate mid-canvas,
//! a bulb on the right.

use super::geometry::Point;
use super::state::{BoardState, Feedback};
use super::types::GateKind;

impl BoardState {
	/// Replace the board contents with the classic demo for `kind`.
	pub fn build_demo(&mut self, kind: GateKind) -> Vec<Feedback> {
		self.clear_board();

		let cy = self.height / 2.0;
		let (x0, x1, x2) = (self.width * 0.20, self.width * 0.48, self.width * 0.76);

		if kind == GateKind::Not {
			let sw = self.add_component_at(GateKind::Switch, "toggle", Point::new(x0, cy));
			let gate = self.add_component_at(GateKind::Not, "default", Point::new(x1, cy));
			let bulb = self.add_component_at(GateKind::Bulb, "classic", Point::new(x2, cy));
			self.graph.add_wire(sw, 0, gate, 0);
			self.graph.add_wire(gate, 0, bulb, 0);
		} else {
			let sw_a = self.add_component_at(GateKind::Switch, "toggle", Point::new(x0, cy - 40.0));
			let sw_b = self.add_component_at(GateKind::Switch, "toggle", Point::new(x0, cy + 40.0));
			let gate = self.add_component_at(kind, "default", Point::new(x1, cy));
			let bulb = self.add_component_at(GateKind::Bulb, "classic", Point::new(x2, cy));
			self.graph.add_wire(sw_a, 0, gate, 0);
			self.graph.add_wire(sw_b, 0, gate, 1);
			self.graph.add_wire(gate, 0, bulb, 0);
		}
		vec![Feedback::Toast(format!("Built: {}", kind.name()))]
	}
}
