//! Canvas drawing for the board. Pure consumer of [`BoardState`]; nothing
//! here mutates the graph.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::geometry::Point;
use super::state::BoardState;
use super::types::{Component, GateKind, PortKind, PortRef, Selection, Wire};

const WIRE_OFF: &str = "rgba(255,255,255,0.28)";
const WIRE_ON: &str = "rgba(51,209,122,0.95)";
const WIRE_SEL: &str = "rgba(78,163,255,0.95)";
const NODE_OFF: &str = "rgba(255,255,255,0.40)";
const NODE_ON: &str = "rgba(51,209,122,0.95)";
const BODY: &str = "rgba(18,25,45,0.92)";
const STROKE: &str = "rgba(255,255,255,0.65)";
const TEXT: &str = "rgba(255,255,255,0.92)";
const SEL: &str = "rgba(78,163,255,0.85)";

pub fn render(state: &BoardState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);

	for wire in state.graph.wires() {
		draw_wire(state, ctx, wire);
	}
	draw_wiring_preview(state, ctx);
	// Hot port under the pending wire, highlighted while wiring.
	let hot = state.wiring.and_then(|w| state.port_at(w.pointer));
	for c in state.graph.components() {
		draw_component(state, ctx, c);
		draw_ports(state, ctx, c, hot);
	}
}

fn draw_wire(state: &BoardState, ctx: &CanvasRenderingContext2d, wire: &Wire) {
	let Some(bz) = state.wire_curve(wire) else {
		return;
	};
	let v = state
		.graph
		.component(wire.from)
		.and_then(|c| c.outputs.get(wire.from_port))
		.is_some_and(|p| p.value);
	let selected = state.selected == Selection::Wire(wire.id);

	ctx.begin_path();
	ctx.move_to(bz[0].x, bz[0].y);
	ctx.bezier_curve_to(bz[1].x, bz[1].y, bz[2].x, bz[2].y, bz[3].x, bz[3].y);
	ctx.set_stroke_style_str(if selected {
		WIRE_SEL
	} else if v {
		WIRE_ON
	} else {
		WIRE_OFF
	});
	ctx.set_line_width(if selected { 4.6 } else { 3.2 });
	ctx.set_line_cap("round");
	ctx.stroke();

	if v && !selected {
		ctx.set_stroke_style_str("rgba(210,255,230,0.55)");
		ctx.set_line_width(1.2);
		ctx.stroke();
	}
}

fn draw_wiring_preview(state: &BoardState, ctx: &CanvasRenderingContext2d) {
	let Some(wiring) = state.wiring else {
		return;
	};
	let Some(from) = state.graph.component(wiring.from) else {
		return;
	};
	let p0 = from.output_pos(wiring.from_port);
	let p3 = wiring.pointer;
	let cp = state.config.wire_cp;

	ctx.begin_path();
	ctx.move_to(p0.x, p0.y);
	ctx.bezier_curve_to(p0.x + cp, p0.y, p3.x - cp, p3.y, p3.x, p3.y);
	ctx.set_stroke_style_str(WIRE_SEL);
	ctx.set_line_width(if state.config.touch { 5.0 } else { 3.5 });
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(6.0),
		&JsValue::from_f64(6.0),
	));
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	// Commit target ring under touch input.
	if state.config.touch {
		if let Some(hit) = state.port_at(p3) {
			if hit.kind == PortKind::Input {
				ctx.begin_path();
				let _ = ctx.arc(p3.x, p3.y, 20.0, 0.0, 2.0 * PI);
				ctx.set_fill_style_str("rgba(51,209,122,0.3)");
				ctx.fill();
				ctx.set_stroke_style_str("rgba(51,209,122,0.8)");
				ctx.set_line_width(3.0);
				ctx.stroke();
			}
		}
	}
}

fn round_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let rr = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + rr, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, rr);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, rr);
	let _ = ctx.arc_to(x, y + h, x, y, rr);
	let _ = ctx.arc_to(x, y, x + w, y, rr);
	ctx.close_path();
}

fn draw_component(state: &BoardState, ctx: &CanvasRenderingContext2d, c: &Component) {
	let selected = state.selected == Selection::Component(c.id);
	let (w, h) = (c.width, c.height);

	ctx.save();
	let _ = ctx.translate(c.pos.x, c.pos.y);

	if selected {
		ctx.set_stroke_style_str(SEL);
		ctx.set_line_width(2.0);
		round_rect(ctx, -w / 2.0 - 6.0, -h / 2.0 - 6.0, w + 12.0, h + 12.0, 16.0);
		ctx.stroke();
	}

	match c.kind {
		GateKind::Switch => draw_switch(ctx, c),
		GateKind::Bulb => draw_bulb(ctx, c),
		_ => draw_gate_body(ctx, c),
	}

	ctx.restore();
}

fn draw_gate_body(ctx: &CanvasRenderingContext2d, c: &Component) {
	let (w, h) = (c.width, c.height);
	ctx.set_fill_style_str(BODY);
	ctx.set_stroke_style_str(STROKE);
	ctx.set_line_width(2.2);

	ctx.begin_path();
	match c.kind {
		GateKind::Not => {
			ctx.move_to(-w / 2.0, -h / 2.0);
			ctx.line_to(w / 2.0 - 16.0, 0.0);
			ctx.line_to(-w / 2.0, h / 2.0);
			ctx.close_path();
		}
		GateKind::And | GateKind::Nand => {
			ctx.move_to(-w / 2.0, -h / 2.0);
			ctx.line_to(0.0, -h / 2.0);
			let _ = ctx.arc(0.0, 0.0, h / 2.0, -PI / 2.0, PI / 2.0);
			ctx.line_to(-w / 2.0, h / 2.0);
			ctx.close_path();
		}
		_ => {
			// OR family shield; XOR/XNOR get a detached second arc.
			let xor = matches!(c.kind, GateKind::Xor | GateKind::Xnor);
			let off = if xor { 7.0 } else { 0.0 };
			ctx.move_to(-w / 2.0 + off, -h / 2.0);
			ctx.quadratic_curve_to(w / 2.0, -h / 2.0, w / 2.0, 0.0);
			ctx.quadratic_curve_to(w / 2.0, h / 2.0, -w / 2.0 + off, h / 2.0);
			ctx.quadratic_curve_to(12.0 + off, 0.0, -w / 2.0 + off, -h / 2.0);
			if xor {
				ctx.stroke();
				ctx.begin_path();
				ctx.move_to(-w / 2.0 - 9.0, -h / 2.0);
				ctx.quadratic_curve_to(6.0, 0.0, -w / 2.0 - 9.0, h / 2.0);
			}
		}
	}
	ctx.fill();
	ctx.stroke();

	// Inversion bubble.
	if matches!(
		c.kind,
		GateKind::Not | GateKind::Nand | GateKind::Nor | GateKind::Xnor
	) {
		ctx.begin_path();
		let _ = ctx.arc(w / 2.0 + 4.0, 0.0, 5.0, 0.0, 2.0 * PI);
		ctx.set_fill_style_str("rgba(255,255,255,0.92)");
		ctx.fill();
		ctx.set_stroke_style_str(STROKE);
		ctx.stroke();
	}

	ctx.set_fill_style_str(TEXT);
	ctx.set_font("950 12px ui-sans-serif, system-ui");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(c.kind.name(), 0.0, 0.0);
}

fn draw_switch(ctx: &CanvasRenderingContext2d, c: &Component) {
	let on = c.state;
	let (w, h) = (c.width, c.height);

	ctx.set_fill_style_str("rgba(0,0,0,0.25)");
	ctx.set_stroke_style_str("rgba(255,255,255,0.35)");
	ctx.set_line_width(2.0);
	round_rect(ctx, -w / 2.0, -h / 2.0, w, h, 18.0);
	ctx.fill();
	ctx.stroke();

	match c.variant.as_str() {
		"push" => {
			ctx.begin_path();
			let _ = ctx.arc(0.0, -4.0, 14.0, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(if on {
				"rgba(51,209,122,0.85)"
			} else {
				"rgba(255,255,255,0.18)"
			});
			ctx.fill();
			ctx.set_stroke_style_str("rgba(255,255,255,0.35)");
			ctx.stroke();
		}
		"rocker" => {
			ctx.save();
			let _ = ctx.rotate(-0.12);
			round_rect(ctx, -22.0, -14.0, 44.0, 28.0, 10.0);
			ctx.set_fill_style_str(if on {
				"rgba(78,163,255,0.35)"
			} else {
				"rgba(255,255,255,0.10)"
			});
			ctx.fill();
			ctx.set_stroke_style_str("rgba(255,255,255,0.25)");
			ctx.stroke();
			ctx.restore();
		}
		_ => {
			round_rect(ctx, -w / 2.0 + 10.0, -10.0, w - 20.0, 20.0, 999.0);
			ctx.set_fill_style_str("rgba(255,255,255,0.10)");
			ctx.fill();
			let knob_x = if on { w / 2.0 - 22.0 } else { -w / 2.0 + 22.0 };
			ctx.begin_path();
			let _ = ctx.arc(knob_x, 0.0, 12.0, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(if on {
				"rgba(51,209,122,0.90)"
			} else {
				"rgba(255,255,255,0.30)"
			});
			ctx.fill();
		}
	}

	ctx.set_fill_style_str(TEXT);
	ctx.set_font("900 12px ui-sans-serif, system-ui");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(if on { "ON" } else { "OFF" }, 0.0, h / 2.0 - 14.0);
}

fn draw_bulb(ctx: &CanvasRenderingContext2d, c: &Component) {
	let on = c.state;
	let (w, h) = (c.width, c.height);

	ctx.set_fill_style_str("rgba(0,0,0,0.18)");
	ctx.set_stroke_style_str("rgba(255,255,255,0.28)");
	ctx.set_line_width(2.0);
	round_rect(ctx, -w / 2.0, -h / 2.0, w, h, 18.0);
	ctx.fill();
	ctx.stroke();

	match c.variant.as_str() {
		"classic" => {
			ctx.begin_path();
			let _ = ctx.arc(0.0, -2.0, 18.0, 0.0, 2.0 * PI);
			if on {
				ctx.set_shadow_color("rgba(255,209,102,0.9)");
				ctx.set_shadow_blur(30.0);
			}
			ctx.set_fill_style_str(if on {
				"rgba(255,209,102,0.65)"
			} else {
				"rgba(255,255,255,0.08)"
			});
			ctx.fill();
			ctx.set_shadow_blur(0.0);
			ctx.set_stroke_style_str("rgba(255,255,255,0.35)");
			ctx.stroke();

			// Filament.
			ctx.begin_path();
			ctx.move_to(-10.0, 10.0);
			ctx.line_to(-4.0, -2.0);
			ctx.line_to(4.0, -2.0);
			ctx.line_to(10.0, 10.0);
			ctx.set_stroke_style_str(if on {
				"rgba(255,255,255,0.85)"
			} else {
				"rgba(255,255,255,0.30)"
			});
			ctx.set_line_width(2.0);
			ctx.stroke();
		}
		"led" => {
			ctx.begin_path();
			let _ = ctx.arc(0.0, -6.0, 16.0, PI, 0.0);
			ctx.line_to(16.0, 10.0);
			ctx.line_to(-16.0, 10.0);
			ctx.close_path();
			if on {
				ctx.set_shadow_color("rgba(255,77,109,0.95)");
				ctx.set_shadow_blur(26.0);
			}
			ctx.set_fill_style_str(if on {
				"rgba(255,77,109,0.70)"
			} else {
				"rgba(255,77,109,0.16)"
			});
			ctx.fill();
			ctx.set_shadow_blur(0.0);
			ctx.set_stroke_style_str("rgba(255,255,255,0.28)");
			ctx.stroke();
		}
		"neon" => {
			round_rect(ctx, -22.0, -12.0, 44.0, 24.0, 999.0);
			if on {
				ctx.set_shadow_color("rgba(78,255,255,0.95)");
				ctx.set_shadow_blur(28.0);
			}
			ctx.set_fill_style_str(if on {
				"rgba(78,255,255,0.35)"
			} else {
				"rgba(78,255,255,0.10)"
			});
			ctx.fill();
			ctx.set_shadow_blur(0.0);
			ctx.set_stroke_style_str("rgba(255,255,255,0.25)");
			ctx.stroke();
		}
		_ => {
			round_rect(ctx, -18.0, -18.0, 36.0, 36.0, 10.0);
			ctx.set_fill_style_str("rgba(0,0,0,0.35)");
			ctx.fill();
			ctx.set_stroke_style_str("rgba(255,255,255,0.18)");
			ctx.stroke();

			ctx.begin_path();
			let _ = ctx.arc(0.0, 0.0, 12.0, 0.0, 2.0 * PI);
			if on {
				ctx.set_shadow_color("rgba(51,209,122,0.95)");
				ctx.set_shadow_blur(26.0);
			}
			ctx.set_fill_style_str(if on {
				"rgba(51,209,122,0.85)"
			} else {
				"rgba(51,209,122,0.14)"
			});
			ctx.fill();
			ctx.set_shadow_blur(0.0);
			ctx.set_stroke_style_str("rgba(255,255,255,0.22)");
			ctx.stroke();
		}
	}

	ctx.set_fill_style_str("rgba(255,255,255,0.78)");
	ctx.set_font("900 11px ui-sans-serif, system-ui");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text("OUT", 0.0, h / 2.0 - 14.0);
}

fn draw_ports(
	state: &BoardState,
	ctx: &CanvasRenderingContext2d,
	c: &Component,
	hot: Option<PortRef>,
) {
	for (i, port) in c.inputs.iter().enumerate() {
		let p = c.pos + port.offset;
		let has_wire = state.graph.wire_feeding(c.id, i).is_some();
		let is_hot = hot
			.is_some_and(|h| h.component == c.id && h.kind == PortKind::Input && h.index == i);
		draw_node(state, ctx, p, port.value, true, has_wire, is_hot);
	}
	for (i, port) in c.outputs.iter().enumerate() {
		let p = c.pos + port.offset;
		let is_hot = hot
			.is_some_and(|h| h.component == c.id && h.kind == PortKind::Output && h.index == i);
		draw_node(state, ctx, p, port.value, false, false, is_hot);
	}
}

fn draw_node(
	state: &BoardState,
	ctx: &CanvasRenderingContext2d,
	p: Point,
	on: bool,
	is_input: bool,
	has_wire: bool,
	hot: bool,
) {
	ctx.save();
	let radius = state.config.node_r;

	// Larger landing halo under touch input.
	if state.config.touch && hot {
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius + 8.0, 0.0, 2.0 * PI);
		ctx.set_fill_style_str("rgba(78,163,255,0.15)");
		ctx.fill();
	}

	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
	if hot {
		ctx.set_shadow_color("rgba(255,255,255,0.65)");
		ctx.set_shadow_blur(12.0);
	}

	if is_input {
		ctx.set_fill_style_str(if on { NODE_ON } else { NODE_OFF });
		ctx.fill();
		ctx.set_stroke_style_str(if has_wire {
			"rgba(78,163,255,0.55)"
		} else {
			"rgba(255,255,255,0.18)"
		});
		ctx.set_line_width(2.0);
		ctx.stroke();
	} else {
		ctx.set_fill_style_str("rgba(0,0,0,0.28)");
		ctx.fill();
		ctx.set_stroke_style_str(if on { NODE_ON } else { NODE_OFF });
		ctx.set_line_width(2.4);
		ctx.stroke();
	}
	ctx.restore();
}
