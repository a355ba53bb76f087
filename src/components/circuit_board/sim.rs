//! Signal propagation: a bounded-iteration tick run once per frame.

use super::graph::CircuitGraph;
use super::types::Component;

impl CircuitGraph {
	/// One simulation tick.
	///
	/// Inputs are cleared, switches drive their outputs from the retained
	/// toggle, then `rounds` passes of wire propagation + gate recompute.
	/// The fixed bound keeps the tick O(rounds x graph) with no dependency
	/// sort; acyclic chains up to `rounds` gates deep settle in one tick,
	/// deeper chains and feedback loops may not.
	pub fn step_simulation(&mut self, rounds: usize) {
		for c in self.components_mut() {
			for p in &mut c.inputs {
				p.value = false;
			}
			if c.kind.is_source() {
				compute(c);
			}
		}
		for _ in 0..rounds {
			self.propagate_wires();
			for c in self.components_mut() {
				if !c.kind.is_source() {
					compute(c);
				}
			}
		}
	}
}

/// Recompute one component from its current input values.
fn compute(c: &mut Component) {
	let i0 = c.inputs.first().is_some_and(|p| p.value);
	let i1 = c.inputs.get(1).is_some_and(|p| p.value);
	let out = match c.kind.eval(i0, i1) {
		Some(v) => v,
		None if c.kind.is_source() => c.state,
		None => {
			// Bulb: latch the observed input, no output to drive.
			c.state = i0;
			return;
		}
	};
	if let Some(p) = c.outputs.first_mut() {
		p.value = out;
	}
}

#[cfg(test)]
mod tests {
	use super::super::config::BoardConfig;
	use super::super::geometry::Point;
	use super::super::types::{ComponentId, GateKind};
	use super::*;

	const ROUNDS: usize = 3;

	fn cfg() -> BoardConfig {
		BoardConfig::default()
	}

	fn set_switch(g: &mut CircuitGraph, id: ComponentId, on: bool) {
		g.component_mut(id).unwrap().state = on;
	}

	#[test]
	fn switch_drives_its_output() {
		let mut g = CircuitGraph::new();
		let sw = g.add_component(GateKind::Switch, "toggle", Point::new(0.0, 0.0), &cfg());
		g.step_simulation(ROUNDS);
		assert!(!g.component(sw).unwrap().outputs[0].value);
		set_switch(&mut g, sw, true);
		g.step_simulation(ROUNDS);
		assert!(g.component(sw).unwrap().outputs[0].value);
	}

	#[test]
	fn and_gate_end_to_end() {
		let mut g = CircuitGraph::new();
		let a = g.add_component(GateKind::Switch, "toggle", Point::new(0.0, 0.0), &cfg());
		let b = g.add_component(GateKind::Switch, "toggle", Point::new(0.0, 100.0), &cfg());
		let and = g.add_component(GateKind::And, "default", Point::new(200.0, 50.0), &cfg());
		let bulb = g.add_component(GateKind::Bulb, "classic", Point::new(400.0, 50.0), &cfg());
		g.add_wire(a, 0, and, 0);
		g.add_wire(b, 0, and, 1);
		g.add_wire(and, 0, bulb, 0);

		g.step_simulation(ROUNDS);
		assert!(!g.component(bulb).unwrap().state);

		set_switch(&mut g, a, true);
		g.step_simulation(ROUNDS);
		assert!(!g.component(bulb).unwrap().state);

		set_switch(&mut g, b, true);
		g.step_simulation(ROUNDS);
		assert!(g.component(bulb).unwrap().state);
	}

	#[test]
	fn every_gate_matches_its_truth_table_through_the_graph() {
		for kind in [
			GateKind::And,
			GateKind::Or,
			GateKind::Nand,
			GateKind::Nor,
			GateKind::Xor,
			GateKind::Xnor,
		] {
			for (a_on, b_on) in [(false, false), (false, true), (true, false), (true, true)] {
				let mut g = CircuitGraph::new();
				let a = g.add_component(GateKind::Switch, "toggle", Point::new(0.0, 0.0), &cfg());
				let b =
					g.add_component(GateKind::Switch, "toggle", Point::new(0.0, 100.0), &cfg());
				let gate = g.add_component(kind, "default", Point::new(200.0, 50.0), &cfg());
				g.add_wire(a, 0, gate, 0);
				g.add_wire(b, 0, gate, 1);
				set_switch(&mut g, a, a_on);
				set_switch(&mut g, b, b_on);
				g.step_simulation(ROUNDS);
				assert_eq!(
					g.component(gate).unwrap().outputs[0].value,
					kind.eval(a_on, b_on).unwrap(),
					"{} {a_on} {b_on}",
					kind.name()
				);
			}
		}
	}

	#[test]
	fn depth_three_chain_settles_in_one_tick() {
		// switch -> NOT -> NOT -> bulb: bulb observes the switch value.
		let mut g = CircuitGraph::new();
		let sw = g.add_component(GateKind::Switch, "toggle", Point::new(0.0, 0.0), &cfg());
		let n1 = g.add_component(GateKind::Not, "default", Point::new(150.0, 0.0), &cfg());
		let n2 = g.add_component(GateKind::Not, "default", Point::new(300.0, 0.0), &cfg());
		let bulb = g.add_component(GateKind::Bulb, "classic", Point::new(450.0, 0.0), &cfg());
		g.add_wire(sw, 0, n1, 0);
		g.add_wire(n1, 0, n2, 0);
		g.add_wire(n2, 0, bulb, 0);

		set_switch(&mut g, sw, true);
		g.step_simulation(ROUNDS);
		assert!(g.component(bulb).unwrap().state);
		set_switch(&mut g, sw, false);
		g.step_simulation(ROUNDS);
		assert!(!g.component(bulb).unwrap().state);
	}

	#[test]
	fn tick_is_idempotent_on_an_unchanged_graph() {
		let mut g = CircuitGraph::new();
		let sw = g.add_component(GateKind::Switch, "toggle", Point::new(0.0, 0.0), &cfg());
		let xor = g.add_component(GateKind::Xor, "default", Point::new(200.0, 0.0), &cfg());
		let bulb = g.add_component(GateKind::Bulb, "classic", Point::new(400.0, 0.0), &cfg());
		g.add_wire(sw, 0, xor, 0);
		g.add_wire(xor, 0, bulb, 0);
		set_switch(&mut g, sw, true);

		g.step_simulation(ROUNDS);
		let snapshot: Vec<(bool, Vec<bool>, Vec<bool>)> = g
			.components()
			.map(|c| {
				(
					c.state,
					c.inputs.iter().map(|p| p.value).collect(),
					c.outputs.iter().map(|p| p.value).collect(),
				)
			})
			.collect();

		g.step_simulation(ROUNDS);
		let again: Vec<(bool, Vec<bool>, Vec<bool>)> = g
			.components()
			.map(|c| {
				(
					c.state,
					c.inputs.iter().map(|p| p.value).collect(),
					c.outputs.iter().map(|p| p.value).collect(),
				)
			})
			.collect();
		assert_eq!(snapshot, again);
	}

	#[test]
	fn disconnected_input_reads_false() {
		let mut g = CircuitGraph::new();
		let nand = g.add_component(GateKind::Nand, "default", Point::new(0.0, 0.0), &cfg());
		g.step_simulation(ROUNDS);
		// NAND(0, 0) = 1.
		assert!(g.component(nand).unwrap().outputs[0].value);
	}
}
