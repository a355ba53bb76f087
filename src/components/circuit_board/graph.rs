//! The owned arena of components and wires.
//!
//! Everything else in the editor refers to graph elements by id; the graph
//! is the only owner and keeps the structure consistent on removal.

use std::collections::HashMap;

use super::config::BoardConfig;
use super::geometry::Point;
use super::types::{Component, ComponentId, GateKind, Wire, WireId};

#[derive(Debug, Default)]
pub struct CircuitGraph {
	components: HashMap<ComponentId, Component>,
	/// Draw (and hit) order; the last id is topmost.
	order: Vec<ComponentId>,
	/// Insertion order, scanned in reverse for hit-testing.
	wires: Vec<Wire>,
	next_id: u64,
}

impl CircuitGraph {
	pub fn new() -> Self {
		Self::default()
	}

	fn fresh_id(&mut self) -> u64 {
		self.next_id += 1;
		self.next_id
	}

	/// Allocate a component with a fresh id and its kind's port layout.
	pub fn add_component(
		&mut self,
		kind: GateKind,
		variant: &str,
		pos: Point,
		cfg: &BoardConfig,
	) -> ComponentId {
		let id = ComponentId(self.fresh_id());
		self.components
			.insert(id, Component::new(id, kind, variant, pos, cfg.gate_w, cfg.gate_h));
		self.order.push(id);
		id
	}

	/// Remove a component and every wire touching it. No-op if absent.
	pub fn remove_component(&mut self, id: ComponentId) {
		if self.components.remove(&id).is_none() {
			return;
		}
		self.order.retain(|&c| c != id);
		self.wires.retain(|w| w.from != id && w.to != id);
	}

	/// Insert a wire, superseding whatever already feeds the destination
	/// input so that at most one wire ever feeds a given input port.
	pub fn add_wire(
		&mut self,
		from: ComponentId,
		from_port: usize,
		to: ComponentId,
		to_port: usize,
	) -> WireId {
		self.wires.retain(|w| !(w.to == to && w.to_port == to_port));
		let id = WireId(self.fresh_id());
		self.wires.push(Wire {
			id,
			from,
			from_port,
			to,
			to_port,
		});
		id
	}

	/// Remove a wire by id. No-op if absent.
	pub fn remove_wire(&mut self, id: WireId) {
		self.wires.retain(|w| w.id != id);
	}

	/// The at-most-one wire feeding the given input port.
	pub fn wire_feeding(&self, to: ComponentId, to_port: usize) -> Option<Wire> {
		self.wires
			.iter()
			.copied()
			.find(|w| w.to == to && w.to_port == to_port)
	}

	/// Move a component to the top of the draw/hit order.
	pub fn bring_to_front(&mut self, id: ComponentId) {
		if let Some(idx) = self.order.iter().position(|&c| c == id) {
			self.order.remove(idx);
			self.order.push(id);
		}
	}

	pub fn component(&self, id: ComponentId) -> Option<&Component> {
		self.components.get(&id)
	}

	pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
		self.components.get_mut(&id)
	}

	/// Components in draw order (bottom first).
	pub fn components(&self) -> impl Iterator<Item = &Component> + '_ {
		self.order.iter().filter_map(|id| self.components.get(id))
	}

	/// Components in hit-test order (topmost first).
	pub fn components_topmost_first(&self) -> impl Iterator<Item = &Component> + '_ {
		self.order
			.iter()
			.rev()
			.filter_map(|id| self.components.get(id))
	}

	pub(super) fn components_mut(&mut self) -> impl Iterator<Item = &mut Component> + '_ {
		self.components.values_mut()
	}

	pub fn wires(&self) -> &[Wire] {
		&self.wires
	}

	pub fn clear(&mut self) {
		self.components.clear();
		self.order.clear();
		self.wires.clear();
	}

	pub fn is_empty(&self) -> bool {
		self.components.is_empty()
	}

	/// Copy each wire's source output value into its destination input.
	pub(super) fn propagate_wires(&mut self) {
		for i in 0..self.wires.len() {
			let w = self.wires[i];
			let v = self
				.components
				.get(&w.from)
				.and_then(|c| c.outputs.get(w.from_port))
				.is_some_and(|p| p.value);
			if let Some(p) = self
				.components
				.get_mut(&w.to)
				.and_then(|c| c.inputs.get_mut(w.to_port))
			{
				p.value = v;
			}
		}
	}
}
