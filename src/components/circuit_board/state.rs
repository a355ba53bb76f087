//! Mutable editor state and the pointer/keyboard interaction machine.
//!
//! Event methods mutate the board and return [`Feedback`] values for the
//! host UI to display; the core itself performs no side effects, which
//! keeps every transition testable without a rendering surface.

use log::debug;

use super::config::BoardConfig;
use super::geometry::{self, Point};
use super::graph::CircuitGraph;
use super::placement::find_free_spot;
use super::types::{ComponentId, GateKind, PortKind, PortRef, Selection, Wire, WireId};

/// A component mid-drag, with the grab offset from its center.
#[derive(Clone, Copy, Debug)]
pub struct DragState {
	pub id: ComponentId,
	pub dx: f64,
	pub dy: f64,
}

/// A pending wire being dragged out of an output port.
#[derive(Clone, Copy, Debug)]
pub struct WiringState {
	pub from: ComponentId,
	pub from_port: usize,
	pub pointer: Point,
}

/// Display data emitted by event handlers for the host UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
	Toast(String),
	Status(String),
}

impl Feedback {
	fn toast(msg: impl Into<String>) -> Self {
		Feedback::Toast(msg.into())
	}

	fn status(msg: impl Into<String>) -> Self {
		Feedback::Status(msg.into())
	}
}

/// Keys the board reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
	Escape,
	Delete,
}

/// The whole editor: graph, selection, interaction state and config.
pub struct BoardState {
	pub graph: CircuitGraph,
	pub selected: Selection,
	pub dragging: Option<DragState>,
	pub wiring: Option<WiringState>,
	pub last_pointer: Point,
	pub width: f64,
	pub height: f64,
	pub config: BoardConfig,
}

impl BoardState {
	pub fn new(width: f64, height: f64, config: BoardConfig) -> Self {
		Self {
			graph: CircuitGraph::new(),
			selected: Selection::None,
			dragging: None,
			wiring: None,
			last_pointer: Point::default(),
			width,
			height,
			config,
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Insert at an exact position, skipping the free-spot search.
	pub fn add_component_at(&mut self, kind: GateKind, variant: &str, pos: Point) -> ComponentId {
		self.graph.add_component(kind, variant, pos, &self.config)
	}

	/// Insert from the library near `near` (default: the last pointer
	/// position), nudged to a clear spot.
	pub fn add_from_library(
		&mut self,
		kind: GateKind,
		variant: &str,
		near: Option<Point>,
	) -> Vec<Feedback> {
		let spot = find_free_spot(
			&self.graph,
			&self.config,
			self.width,
			self.height,
			near.or(Some(self.last_pointer)),
		);
		self.add_component_at(kind, variant, spot);
		debug!("Added {} at ({:.0}, {:.0})", kind.name(), spot.x, spot.y);
		vec![Feedback::toast(format!("Added {}", kind.name()))]
	}

	/// Remove everything and reset the interaction state.
	pub fn clear_board(&mut self) -> Vec<Feedback> {
		self.graph.clear();
		self.selected = Selection::None;
		self.dragging = None;
		self.wiring = None;
		vec![Feedback::toast("Cleared"), Feedback::status("Ready")]
	}

	/// Remove a component, cascading to its wires and any state pointing
	/// at it.
	pub fn remove_component(&mut self, id: ComponentId) {
		self.graph.remove_component(id);
		if self.selected == Selection::Component(id) {
			self.selected = Selection::None;
		}
		if self.dragging.is_some_and(|d| d.id == id) {
			self.dragging = None;
		}
		if self.wiring.is_some_and(|w| w.from == id) {
			self.wiring = None;
		}
	}

	/// Run one simulation tick with the configured round bound.
	pub fn tick(&mut self) {
		self.graph.step_simulation(self.config.sim_rounds);
	}

	// Hit-testing --------------------------------------------------------

	/// Topmost port within the hit radius; a component's outputs are
	/// checked before its inputs.
	pub fn port_at(&self, p: Point) -> Option<PortRef> {
		for c in self.graph.components_topmost_first() {
			for (index, port) in c.outputs.iter().enumerate() {
				if (c.pos + port.offset).distance(p) <= self.config.port_hit {
					return Some(PortRef {
						component: c.id,
						kind: PortKind::Output,
						index,
					});
				}
			}
			for (index, port) in c.inputs.iter().enumerate() {
				if (c.pos + port.offset).distance(p) <= self.config.port_hit {
					return Some(PortRef {
						component: c.id,
						kind: PortKind::Input,
						index,
					});
				}
			}
		}
		None
	}

	/// Topmost wire whose curve passes within the wire hit tolerance.
	pub fn wire_at(&self, p: Point) -> Option<WireId> {
		for w in self.graph.wires().iter().rev() {
			if let Some(curve) = self.wire_curve(w) {
				if geometry::dist_to_cubic_bezier(p, curve) <= self.config.wire_hit {
					return Some(w.id);
				}
			}
		}
		None
	}

	/// Topmost component whose bounding box contains the point.
	pub fn component_at(&self, p: Point) -> Option<ComponentId> {
		self.graph
			.components_topmost_first()
			.find(|c| c.bounds().contains(p))
			.map(|c| c.id)
	}

	/// Bezier control points of a committed wire.
	pub fn wire_curve(&self, w: &Wire) -> Option<[Point; 4]> {
		let from = self.graph.component(w.from)?;
		let to = self.graph.component(w.to)?;
		Some(geometry::wire_curve(
			from.output_pos(w.from_port),
			to.input_pos(w.to_port),
			self.config.wire_cp,
		))
	}

	// Interaction machine ------------------------------------------------

	/// Pointer pressed: ports first, then wires, then bodies, then empty
	/// space.
	pub fn pointer_down(&mut self, p: Point) -> Vec<Feedback> {
		self.last_pointer = p;
		let mut fx = Vec::new();

		if let Some(hit) = self.port_at(p) {
			match hit.kind {
				PortKind::Input => {
					if let Some(existing) = self.graph.wire_feeding(hit.component, hit.index) {
						// Tear the wire out and resume wiring from its source.
						self.graph.remove_wire(existing.id);
						self.wiring = Some(WiringState {
							from: existing.from,
							from_port: existing.from_port,
							pointer: p,
						});
						fx.push(Feedback::toast(
							"Rewire: choose a new input (or drop empty to disconnect)",
						));
					} else {
						fx.push(Feedback::toast("Start from an output node"));
					}
				}
				PortKind::Output => {
					self.wiring = Some(WiringState {
						from: hit.component,
						from_port: hit.index,
						pointer: p,
					});
					fx.push(Feedback::toast("Select an input node"));
				}
			}
			return fx;
		}

		if let Some(id) = self.wire_at(p) {
			self.selected = Selection::Wire(id);
			fx.push(Feedback::status("Wire selected"));
			return fx;
		}

		if let Some(id) = self.component_at(p) {
			self.graph.bring_to_front(id);
			self.selected = Selection::Component(id);
			if let Some(c) = self.graph.component_mut(id) {
				if c.kind == GateKind::Switch {
					c.state = !c.state;
					fx.push(Feedback::toast(if c.state { "Switch ON" } else { "Switch OFF" }));
				}
				self.dragging = Some(DragState {
					id,
					dx: p.x - c.pos.x,
					dy: p.y - c.pos.y,
				});
				fx.push(Feedback::status(format!("Selected: {}", c.kind.name())));
			}
			return fx;
		}

		self.selected = Selection::None;
		if self.wiring.take().is_some() {
			fx.push(Feedback::toast("Wiring cancelled"));
		}
		fx.push(Feedback::status("Ready"));
		fx
	}

	/// Pointer moved: track the preview curve or carry the dragged
	/// component; under touch input a free input under the pointer commits
	/// the pending wire immediately.
	pub fn pointer_move(&mut self, p: Point) -> Vec<Feedback> {
		self.last_pointer = p;
		let mut fx = Vec::new();

		if let Some(w) = &mut self.wiring {
			w.pointer = p;
			let pending = *w;
			if self.config.touch {
				if let Some(hit) = self.port_at(p) {
					if hit.kind == PortKind::Input
						&& self.graph.wire_feeding(hit.component, hit.index).is_none()
					{
						self.graph
							.add_wire(pending.from, pending.from_port, hit.component, hit.index);
						self.wiring = None;
						fx.push(Feedback::toast("Auto-connected"));
					}
				}
			}
			return fx;
		}

		if let Some(d) = self.dragging {
			let (snap_to_grid, grid) = (self.config.snap_move_grid, self.config.grid);
			if let Some(c) = self.graph.component_mut(d.id) {
				let mut nx = p.x - d.dx;
				let mut ny = p.y - d.dy;
				if snap_to_grid {
					nx = geometry::snap(nx, grid);
					ny = geometry::snap(ny, grid);
				}
				c.pos = Point::new(nx, ny);
			}
		}
		fx
	}

	/// Pointer released: end a drag, or commit/discard the pending wire.
	pub fn pointer_up(&mut self, p: Point) -> Vec<Feedback> {
		self.last_pointer = p;
		let mut fx = Vec::new();

		if self.dragging.take().is_some() {
			return fx;
		}

		if let Some(pending) = self.wiring.take() {
			match self.port_at(p) {
				Some(hit) if hit.kind == PortKind::Input => {
					self.graph
						.add_wire(pending.from, pending.from_port, hit.component, hit.index);
					fx.push(Feedback::toast("Connected"));
				}
				_ => fx.push(Feedback::toast("Disconnected")),
			}
		}
		fx
	}

	/// Right-click deletes the wire under the pointer.
	pub fn context_menu(&mut self, p: Point) -> Vec<Feedback> {
		let mut fx = Vec::new();
		if let Some(id) = self.wire_at(p) {
			self.graph.remove_wire(id);
			self.selected = Selection::None;
			fx.push(Feedback::toast("Wire deleted"));
		}
		fx
	}

	/// Escape cancels a pending wire; Delete removes the selection.
	pub fn key_down(&mut self, key: Key) -> Vec<Feedback> {
		let mut fx = Vec::new();
		match key {
			Key::Escape => {
				if self.wiring.take().is_some() {
					fx.push(Feedback::toast("Wiring cancelled"));
				}
			}
			Key::Delete => match self.selected {
				Selection::Wire(id) => {
					self.graph.remove_wire(id);
					self.selected = Selection::None;
					fx.push(Feedback::toast("Wire deleted"));
				}
				Selection::Component(id) => {
					self.remove_component(id);
					fx.push(Feedback::toast("Component deleted"));
				}
				Selection::None => {}
			},
		}
		fx
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn board() -> BoardState {
		BoardState::new(800.0, 600.0, BoardConfig::default())
	}

	fn touch_board() -> BoardState {
		BoardState::new(800.0, 600.0, BoardConfig::new(true))
	}

	fn has_toast(fx: &[Feedback], needle: &str) -> bool {
		fx.iter()
			.any(|f| matches!(f, Feedback::Toast(m) if m.contains(needle)))
	}

	#[test]
	fn drag_a_wire_from_output_to_input() {
		let mut s = board();
		let sw = s.add_component_at(GateKind::Switch, "toggle", Point::new(200.0, 300.0));
		let bulb = s.add_component_at(GateKind::Bulb, "classic", Point::new(500.0, 300.0));
		let out = s.graph.component(sw).unwrap().output_pos(0);
		let inp = s.graph.component(bulb).unwrap().input_pos(0);

		s.pointer_down(out);
		assert!(s.wiring.is_some());
		s.pointer_move(Point::new(350.0, 280.0));
		assert_eq!(s.wiring.unwrap().pointer, Point::new(350.0, 280.0));
		let fx = s.pointer_up(inp);
		assert!(s.wiring.is_none());
		assert!(has_toast(&fx, "Connected"));
		assert_eq!(s.graph.wire_feeding(bulb, 0).map(|w| w.from), Some(sw));
	}

	#[test]
	fn release_over_nothing_discards_the_pending_wire() {
		let mut s = board();
		let sw = s.add_component_at(GateKind::Switch, "toggle", Point::new(200.0, 300.0));
		let out = s.graph.component(sw).unwrap().output_pos(0);
		s.pointer_down(out);
		let fx = s.pointer_up(Point::new(600.0, 100.0));
		assert!(s.wiring.is_none());
		assert!(has_toast(&fx, "Disconnected"));
		assert!(s.graph.wires().is_empty());
	}

	#[test]
	fn down_on_an_unfed_input_is_an_instructive_noop() {
		let mut s = board();
		let bulb = s.add_component_at(GateKind::Bulb, "classic", Point::new(400.0, 300.0));
		let inp = s.graph.component(bulb).unwrap().input_pos(0);
		let fx = s.pointer_down(inp);
		assert!(s.wiring.is_none());
		assert!(s.dragging.is_none());
		assert!(has_toast(&fx, "Start from an output node"));
	}

	#[test]
	fn down_on_a_fed_input_tears_the_wire_out_for_rewiring() {
		let mut s = board();
		let sw = s.add_component_at(GateKind::Switch, "toggle", Point::new(200.0, 300.0));
		let bulb = s.add_component_at(GateKind::Bulb, "classic", Point::new(500.0, 300.0));
		s.graph.add_wire(sw, 0, bulb, 0);

		let inp = s.graph.component(bulb).unwrap().input_pos(0);
		let fx = s.pointer_down(inp);
		assert!(has_toast(&fx, "Rewire"));
		assert!(s.graph.wires().is_empty());
		let w = s.wiring.unwrap();
		assert_eq!((w.from, w.from_port), (sw, 0));

		// Dropping on empty space leaves the input disconnected.
		s.pointer_up(Point::new(100.0, 100.0));
		assert!(s.graph.wire_feeding(bulb, 0).is_none());
	}

	#[test]
	fn committing_over_a_fed_input_supersedes_the_old_wire() {
		let mut s = board();
		let a = s.add_component_at(GateKind::Switch, "toggle", Point::new(150.0, 200.0));
		let b = s.add_component_at(GateKind::Switch, "toggle", Point::new(150.0, 400.0));
		let bulb = s.add_component_at(GateKind::Bulb, "classic", Point::new(500.0, 300.0));
		s.graph.add_wire(a, 0, bulb, 0);

		let out_b = s.graph.component(b).unwrap().output_pos(0);
		let inp = s.graph.component(bulb).unwrap().input_pos(0);
		s.pointer_down(out_b);
		s.pointer_up(inp);
		assert_eq!(s.graph.wires().len(), 1);
		assert_eq!(s.graph.wire_feeding(bulb, 0).map(|w| w.from), Some(b));
	}

	#[test]
	fn body_hit_selects_toggles_and_starts_dragging() {
		let mut s = board();
		let sw = s.add_component_at(GateKind::Switch, "toggle", Point::new(300.0, 300.0));
		// Inside the body, away from any port.
		let fx = s.pointer_down(Point::new(310.0, 310.0));
		assert_eq!(s.selected, Selection::Component(sw));
		assert!(s.graph.component(sw).unwrap().state);
		assert!(has_toast(&fx, "Switch ON"));
		let d = s.dragging.unwrap();
		assert_eq!((d.dx, d.dy), (10.0, 10.0));

		s.pointer_move(Point::new(410.0, 260.0));
		assert_eq!(s.graph.component(sw).unwrap().pos, Point::new(400.0, 250.0));
		s.pointer_up(Point::new(410.0, 260.0));
		assert!(s.dragging.is_none());
	}

	#[test]
	fn topmost_component_wins_the_body_hit() {
		let mut s = board();
		let under = s.add_component_at(GateKind::And, "default", Point::new(300.0, 300.0));
		let over = s.add_component_at(GateKind::Or, "default", Point::new(305.0, 305.0));
		s.pointer_down(Point::new(300.0, 300.0));
		assert_eq!(s.selected, Selection::Component(over));
		// The clicked component moved to the front of the hit order.
		let _ = under;
		assert_eq!(
			s.graph.components_topmost_first().next().map(|c| c.id),
			Some(over)
		);
	}

	#[test]
	fn empty_space_clears_selection_and_cancels_wiring() {
		let mut s = board();
		let sw = s.add_component_at(GateKind::Switch, "toggle", Point::new(200.0, 300.0));
		let out = s.graph.component(sw).unwrap().output_pos(0);
		s.pointer_down(out);
		assert!(s.wiring.is_some());
		let fx = s.pointer_down(Point::new(700.0, 100.0));
		assert!(s.wiring.is_none());
		assert_eq!(s.selected, Selection::None);
		assert!(has_toast(&fx, "Wiring cancelled"));
	}

	#[test]
	fn clicking_a_wire_selects_it_and_delete_removes_it() {
		let mut s = board();
		let sw = s.add_component_at(GateKind::Switch, "toggle", Point::new(200.0, 300.0));
		let bulb = s.add_component_at(GateKind::Bulb, "classic", Point::new(500.0, 300.0));
		let id = s.graph.add_wire(sw, 0, bulb, 0);

		// Midway between the ports, on the (horizontal) curve.
		let mid = Point::new(350.0, 300.0);
		s.pointer_down(mid);
		assert_eq!(s.selected, Selection::Wire(id));

		let fx = s.key_down(Key::Delete);
		assert!(has_toast(&fx, "Wire deleted"));
		assert!(s.graph.wires().is_empty());
		assert_eq!(s.selected, Selection::None);
	}

	#[test]
	fn delete_removes_the_selected_component_and_cascades() {
		let mut s = board();
		let sw = s.add_component_at(GateKind::Switch, "toggle", Point::new(200.0, 300.0));
		let not = s.add_component_at(GateKind::Not, "default", Point::new(400.0, 300.0));
		s.graph.add_wire(sw, 0, not, 0);

		s.pointer_down(Point::new(400.0, 310.0));
		assert_eq!(s.selected, Selection::Component(not));
		s.pointer_up(Point::new(400.0, 310.0));

		s.key_down(Key::Delete);
		assert!(s.graph.component(not).is_none());
		assert!(s.graph.wires().is_empty());
		assert_eq!(s.selected, Selection::None);
	}

	#[test]
	fn escape_cancels_wiring() {
		let mut s = board();
		let sw = s.add_component_at(GateKind::Switch, "toggle", Point::new(200.0, 300.0));
		let out = s.graph.component(sw).unwrap().output_pos(0);
		s.pointer_down(out);
		let fx = s.key_down(Key::Escape);
		assert!(s.wiring.is_none());
		assert!(has_toast(&fx, "Wiring cancelled"));
		assert!(s.key_down(Key::Escape).is_empty());
	}

	#[test]
	fn context_menu_deletes_the_wire_under_the_pointer() {
		let mut s = board();
		let sw = s.add_component_at(GateKind::Switch, "toggle", Point::new(200.0, 300.0));
		let bulb = s.add_component_at(GateKind::Bulb, "classic", Point::new(500.0, 300.0));
		s.graph.add_wire(sw, 0, bulb, 0);

		let fx = s.context_menu(Point::new(350.0, 300.0));
		assert!(has_toast(&fx, "Wire deleted"));
		assert!(s.graph.wires().is_empty());
		assert!(s.context_menu(Point::new(350.0, 300.0)).is_empty());
	}

	#[test]
	fn touch_input_auto_commits_over_a_free_input() {
		let mut s = touch_board();
		let sw = s.add_component_at(GateKind::Switch, "toggle", Point::new(200.0, 300.0));
		let bulb = s.add_component_at(GateKind::Bulb, "classic", Point::new(500.0, 300.0));
		let out = s.graph.component(sw).unwrap().output_pos(0);
		let inp = s.graph.component(bulb).unwrap().input_pos(0);

		s.pointer_down(out);
		let fx = s.pointer_move(inp);
		assert!(has_toast(&fx, "Auto-connected"));
		assert!(s.wiring.is_none());
		assert_eq!(s.graph.wire_feeding(bulb, 0).map(|w| w.from), Some(sw));
	}

	#[test]
	fn pointer_input_does_not_auto_commit_on_move() {
		let mut s = board();
		let sw = s.add_component_at(GateKind::Switch, "toggle", Point::new(200.0, 300.0));
		let bulb = s.add_component_at(GateKind::Bulb, "classic", Point::new(500.0, 300.0));
		let out = s.graph.component(sw).unwrap().output_pos(0);
		let inp = s.graph.component(bulb).unwrap().input_pos(0);

		s.pointer_down(out);
		s.pointer_move(inp);
		assert!(s.wiring.is_some());
		assert!(s.graph.wires().is_empty());
	}

	#[test]
	fn library_insertion_lands_on_a_clear_spot() {
		let mut s = board();
		s.last_pointer = Point::new(400.0, 300.0);
		s.add_from_library(GateKind::And, "default", None);
		s.add_from_library(GateKind::Or, "default", None);
		let positions: Vec<Point> = s.graph.components().map(|c| c.pos).collect();
		assert_eq!(positions.len(), 2);
		assert!(positions[0].distance(positions[1]) >= s.config.place_clearance);
	}

	#[test]
	fn clear_board_resets_everything() {
		let mut s = board();
		let sw = s.add_component_at(GateKind::Switch, "toggle", Point::new(200.0, 300.0));
		let bulb = s.add_component_at(GateKind::Bulb, "classic", Point::new(500.0, 300.0));
		s.graph.add_wire(sw, 0, bulb, 0);
		s.selected = Selection::Component(sw);

		s.clear_board();
		assert!(s.graph.is_empty());
		assert!(s.graph.wires().is_empty());
		assert_eq!(s.selected, Selection::None);
	}
}
