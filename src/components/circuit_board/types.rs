//! Plain data for the circuit graph: components, ports, wires, selection.

use super::geometry::{Point, Rect};

/// Identifier of a placed component. Fresh per insertion, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u64);

/// Identifier of a wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WireId(pub u64);

/// The closed set of things that can sit on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateKind {
	And,
	Or,
	Not,
	Nand,
	Nor,
	Xor,
	Xnor,
	Switch,
	Bulb,
}

impl GateKind {
	/// Canonical name, also used as the on-gate caption for logic gates.
	pub fn name(self) -> &'static str {
		match self {
			GateKind::And => "AND",
			GateKind::Or => "OR",
			GateKind::Not => "NOT",
			GateKind::Nand => "NAND",
			GateKind::Nor => "NOR",
			GateKind::Xor => "XOR",
			GateKind::Xnor => "XNOR",
			GateKind::Switch => "SWITCH",
			GateKind::Bulb => "BULB",
		}
	}

	/// True for kinds whose output is driven by retained state, not inputs.
	pub fn is_source(self) -> bool {
		matches!(self, GateKind::Switch)
	}

	pub fn input_count(self) -> usize {
		match self {
			GateKind::Switch => 0,
			GateKind::Not | GateKind::Bulb => 1,
			_ => 2,
		}
	}

	pub fn output_count(self) -> usize {
		match self {
			GateKind::Bulb => 0,
			_ => 1,
		}
	}

	/// Combinational boolean function, `None` for the stateful kinds
	/// (`Switch` is driven by its toggle, `Bulb` latches its input).
	pub fn eval(self, i0: bool, i1: bool) -> Option<bool> {
		match self {
			GateKind::And => Some(i0 && i1),
			GateKind::Or => Some(i0 || i1),
			GateKind::Not => Some(!i0),
			GateKind::Nand => Some(!(i0 && i1)),
			GateKind::Nor => Some(!(i0 || i1)),
			GateKind::Xor => Some(i0 != i1),
			GateKind::Xnor => Some(i0 == i1),
			GateKind::Switch | GateKind::Bulb => None,
		}
	}
}

/// A connection point at a fixed offset from its component's center.
#[derive(Clone, Copy, Debug, Default)]
pub struct Port {
	pub offset: Point,
	pub value: bool,
}

impl Port {
	fn at(x: f64, y: f64) -> Self {
		Self {
			offset: Point::new(x, y),
			value: false,
		}
	}
}

/// A logic element placed on the board.
#[derive(Clone, Debug)]
pub struct Component {
	pub id: ComponentId,
	pub kind: GateKind,
	/// Presentation tag (e.g. `"toggle"`, `"led"`); no behavioral effect.
	pub variant: String,
	pub pos: Point,
	/// Toggled value for `Switch`, last observed input for `Bulb`.
	pub state: bool,
	pub inputs: Vec<Port>,
	pub outputs: Vec<Port>,
	pub width: f64,
	pub height: f64,
}

impl Component {
	pub(super) fn new(
		id: ComponentId,
		kind: GateKind,
		variant: &str,
		pos: Point,
		width: f64,
		height: f64,
	) -> Self {
		let hw = width / 2.0;
		let inputs = match kind.input_count() {
			0 => Vec::new(),
			1 => vec![Port::at(-hw, 0.0)],
			_ => vec![Port::at(-hw, -14.0), Port::at(-hw, 14.0)],
		};
		let outputs = match kind.output_count() {
			0 => Vec::new(),
			_ => vec![Port::at(hw, 0.0)],
		};
		Self {
			id,
			kind,
			variant: variant.to_string(),
			pos,
			state: false,
			inputs,
			outputs,
			width,
			height,
		}
	}

	/// Absolute position of an input port.
	pub fn input_pos(&self, index: usize) -> Point {
		self.pos + self.inputs[index].offset
	}

	/// Absolute position of an output port.
	pub fn output_pos(&self, index: usize) -> Point {
		self.pos + self.outputs[index].offset
	}

	pub fn bounds(&self) -> Rect {
		Rect::centered(self.pos, self.width, self.height)
	}
}

/// Directed edge from an output port to an input port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wire {
	pub id: WireId,
	pub from: ComponentId,
	pub from_port: usize,
	pub to: ComponentId,
	pub to_port: usize,
}

/// The single active selection, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	None,
	Component(ComponentId),
	Wire(WireId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortKind {
	Input,
	Output,
}

/// Result of a port hit-test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortRef {
	pub component: ComponentId,
	pub kind: PortKind,
	pub index: usize,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn port_layout_per_kind() {
		for kind in [
			GateKind::And,
			GateKind::Or,
			GateKind::Nand,
			GateKind::Nor,
			GateKind::Xor,
			GateKind::Xnor,
		] {
			assert_eq!(kind.input_count(), 2);
			assert_eq!(kind.output_count(), 1);
		}
		assert_eq!(GateKind::Not.input_count(), 1);
		assert_eq!(GateKind::Not.output_count(), 1);
		assert_eq!(GateKind::Switch.input_count(), 0);
		assert_eq!(GateKind::Switch.output_count(), 1);
		assert_eq!(GateKind::Bulb.input_count(), 1);
		assert_eq!(GateKind::Bulb.output_count(), 0);
	}

	#[test]
	fn ports_sit_on_the_body_edges() {
		let c = Component::new(
			ComponentId(1),
			GateKind::And,
			"default",
			Point::new(200.0, 100.0),
			104.0,
			60.0,
		);
		assert_eq!(c.input_pos(0), Point::new(148.0, 86.0));
		assert_eq!(c.input_pos(1), Point::new(148.0, 114.0));
		assert_eq!(c.output_pos(0), Point::new(252.0, 100.0));
		let b = c.bounds();
		assert_eq!((b.x, b.y, b.w, b.h), (148.0, 70.0, 104.0, 60.0));
	}

	#[test]
	fn truth_tables() {
		use GateKind::*;
		let rows: &[(GateKind, [bool; 4])] = &[
			(And, [false, false, false, true]),
			(Or, [false, true, true, true]),
			(Nand, [true, true, true, false]),
			(Nor, [true, false, false, false]),
			(Xor, [false, true, true, false]),
			(Xnor, [true, false, false, true]),
		];
		for &(kind, expect) in rows {
			for (i, (a, b)) in [(false, false), (false, true), (true, false), (true, true)]
				.into_iter()
				.enumerate()
			{
				assert_eq!(kind.eval(a, b), Some(expect[i]), "{} {a} {b}", kind.name());
			}
		}
		assert_eq!(Not.eval(false, false), Some(true));
		assert_eq!(Not.eval(true, false), Some(false));
		assert_eq!(Switch.eval(true, true), None);
		assert_eq!(Bulb.eval(true, true), None);
	}
}
