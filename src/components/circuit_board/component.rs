use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use super::config::BoardConfig;
use super::geometry::Point;
use super::render;
use super::state::{BoardState, Feedback, Key};
use super::types::GateKind;

/// Library entries: kind, variant tag, button label.
const TOOLS: &[(GateKind, &str, &str)] = &[
	(GateKind::Switch, "toggle", "Switch"),
	(GateKind::Switch, "push", "Push switch"),
	(GateKind::Switch, "rocker", "Rocker switch"),
	(GateKind::And, "default", "AND"),
	(GateKind::Or, "default", "OR"),
	(GateKind::Not, "default", "NOT"),
	(GateKind::Nand, "default", "NAND"),
	(GateKind::Nor, "default", "NOR"),
	(GateKind::Xor, "default", "XOR"),
	(GateKind::Xnor, "default", "XNOR"),
	(GateKind::Bulb, "classic", "Bulb"),
	(GateKind::Bulb, "led", "LED"),
	(GateKind::Bulb, "neon", "Neon"),
];

/// Gates with a prebuilt demo circuit.
const DEMOS: &[GateKind] = &[
	GateKind::And,
	GateKind::Or,
	GateKind::Not,
	GateKind::Nand,
	GateKind::Nor,
	GateKind::Xor,
	GateKind::Xnor,
];

fn apply_feedback(fx: Vec<Feedback>, set_status: WriteSignal<String>, set_toast: WriteSignal<String>) {
	for f in fx {
		match f {
			Feedback::Toast(msg) => set_toast.set(msg),
			Feedback::Status(msg) => set_status.set(msg),
		}
	}
}

fn canvas_point(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(client_x - rect.left(), client_y - rect.top())
}

fn mouse_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	canvas_point(canvas, ev.client_x() as f64, ev.client_y() as f64)
}

fn touch_point(canvas: &HtmlCanvasElement, ev: &TouchEvent) -> Option<Point> {
	// touchend reports the lifted finger only in changedTouches.
	let t = ev
		.touches()
		.item(0)
		.or_else(|| ev.changed_touches().item(0))?;
	Some(canvas_point(canvas, t.client_x() as f64, t.client_y() as f64))
}

#[component]
pub fn CircuitBoardCanvas() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<BoardState>>> = Rc::new(RefCell::new(None));
	let sim_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let draw_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	let (status, set_status) = signal(String::from("Ready"));
	let (toast, set_toast) = signal(String::new());

	let (state_init, sim_init, draw_init, resize_init) = (
		state.clone(),
		sim_cb.clone(),
		draw_cb.clone(),
		resize_cb.clone(),
	);
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = (
			window.inner_width().unwrap().as_f64().unwrap(),
			window.inner_height().unwrap().as_f64().unwrap(),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let touch = window.navigator().max_touch_points() > 0;
		*state_init.borrow_mut() = Some(BoardState::new(w, h, BoardConfig::new(touch)));
		info!("Board initialized ({w:.0}x{h:.0}, touch: {touch})");

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_init.borrow_mut() = Some(Closure::new(move || {
			let win: Window = web_sys::window().unwrap();
			let (nw, nh) = (
				win.inner_width().unwrap().as_f64().unwrap(),
				win.inner_height().unwrap().as_f64().unwrap(),
			);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		// Simulation tick, once per frame.
		let (state_sim, sim_inner) = (state_init.clone(), sim_init.clone());
		*sim_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_sim.borrow_mut() {
				s.tick();
			}
			if let Some(ref cb) = *sim_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *sim_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}

		// Redraw, independent of the tick.
		let (state_draw, draw_inner) = (state_init.clone(), draw_init.clone());
		*draw_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref s) = *state_draw.borrow() {
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *draw_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *draw_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_kb = state.clone();
	window_event_listener(leptos::ev::keydown, move |ev| {
		let key = match ev.key().as_str() {
			"Escape" => Key::Escape,
			"Delete" | "Backspace" => Key::Delete,
			_ => return,
		};
		if let Some(ref mut s) = *state_kb.borrow_mut() {
			apply_feedback(s.key_down(key), set_status, set_toast);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let p = mouse_point(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			apply_feedback(s.pointer_down(p), set_status, set_toast);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let p = mouse_point(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			apply_feedback(s.pointer_move(p), set_status, set_toast);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let p = mouse_point(&canvas, &ev);
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			apply_feedback(s.pointer_up(p), set_status, set_toast);
		}
	};

	let state_ts = state.clone();
	let on_touchstart = move |ev: TouchEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		if let Some(p) = touch_point(&canvas, &ev) {
			if let Some(ref mut s) = *state_ts.borrow_mut() {
				apply_feedback(s.pointer_down(p), set_status, set_toast);
			}
		}
	};

	let state_tm = state.clone();
	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		if let Some(p) = touch_point(&canvas, &ev) {
			if let Some(ref mut s) = *state_tm.borrow_mut() {
				apply_feedback(s.pointer_move(p), set_status, set_toast);
			}
		}
	};

	let state_te = state.clone();
	let on_touchend = move |ev: TouchEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		if let Some(p) = touch_point(&canvas, &ev) {
			if let Some(ref mut s) = *state_te.borrow_mut() {
				apply_feedback(s.pointer_up(p), set_status, set_toast);
			}
		}
	};

	let state_cm = state.clone();
	let on_contextmenu = move |ev: MouseEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let p = mouse_point(&canvas, &ev);
		if let Some(ref mut s) = *state_cm.borrow_mut() {
			apply_feedback(s.context_menu(p), set_status, set_toast);
		}
	};

	let state_clear = state.clone();
	let on_clear = move |_| {
		if let Some(ref mut s) = *state_clear.borrow_mut() {
			apply_feedback(s.clear_board(), set_status, set_toast);
		}
	};

	view! {
		<div class="circuit-board">
			<canvas
				node_ref=canvas_ref
				class="circuit-board-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:touchstart=on_touchstart
				on:touchmove=on_touchmove
				on:touchend=on_touchend
				on:contextmenu=on_contextmenu
				style="display: block; touch-action: none;"
			/>
			<div class="circuit-board-toolbox">
				{TOOLS
					.iter()
					.map(|&(kind, variant, label)| {
						let st = state.clone();
						view! {
							<button on:click=move |_| {
								if let Some(ref mut s) = *st.borrow_mut() {
									apply_feedback(
										s.add_from_library(kind, variant, None),
										set_status,
										set_toast,
									);
								}
							}>{label}</button>
						}
					})
					.collect_view()}
				<button on:click=on_clear>"Clear"</button>
			</div>
			<div class="circuit-board-demos">
				{DEMOS
					.iter()
					.map(|&kind| {
						let st = state.clone();
						view! {
							<button on:click=move |_| {
								if let Some(ref mut s) = *st.borrow_mut() {
									apply_feedback(s.build_demo(kind), set_status, set_toast);
								}
							}>{format!("Demo: {}", kind.name())}</button>
						}
					})
					.collect_view()}
			</div>
			<div class="circuit-board-status">{move || status.get()}</div>
			<div class="circuit-board-toast">{move || toast.get()}</div>
		</div>
	}
}
