use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, Window};

use crate::engine::{HoveredInfo, Scene, SceneConfig};
use crate::render::{
	BlendMode, FrameUniforms, GlContext, LineRenderer, PointRenderer, PulseRenderer,
};

const DEFAULT_TINT: [f32; 3] = [0.69, 0.69, 0.69];

/// Everything the frame loop owns: the engine scene plus its GPU mirrors.
struct CanvasState {
	scene: Scene,
	ctx: GlContext,
	points: PointRenderer,
	lines: LineRenderer,
	pulses: PulseRenderer,
	width: f64,
	height: f64,
	last_ms: f64,
	last_hovered: Option<String>,
}

impl CanvasState {
	fn new(
		canvas: &HtmlCanvasElement,
		config: SceneConfig,
		blend: BlendMode,
		width: f64,
		height: f64,
	) -> Result<Self, String> {
		let scene = Scene::new(config).map_err(|e| e.to_string())?;
		let ctx = GlContext::new(canvas).map_err(|e| e.to_string())?;

		let nodes = scene.nodes();
		let positions: Vec<_> = nodes.nodes().iter().map(|n| n.rest).collect();
		let sizes: Vec<_> = nodes.nodes().iter().map(|n| n.base_size).collect();
		let tints: Vec<[f32; 3]> = nodes
			.nodes()
			.iter()
			.map(|n| {
				n.category
					.and_then(|c| scene.categories().get(c))
					.map(|c| c.color)
					.unwrap_or(DEFAULT_TINT)
			})
			.collect();
		let points =
			PointRenderer::new(&ctx, &positions, &sizes, &tints, blend).map_err(|e| e.to_string())?;

		let mut endpoints = Vec::with_capacity(scene.edges().len() * 6);
		for edge in scene.edges().edges() {
			for &end in &[positions[edge.from], positions[edge.to]] {
				endpoints.extend([end.x, end.y, end.z]);
			}
		}
		let lines = LineRenderer::new(&ctx, &endpoints, [0.5, 0.5, 0.5], BlendMode::Normal)
			.map_err(|e| e.to_string())?;
		let pulses = PulseRenderer::new(&ctx, scene.edges().len(), [0.7, 0.7, 0.7])
			.map_err(|e| e.to_string())?;

		let mut state = Self {
			scene,
			ctx,
			points,
			lines,
			pulses,
			width,
			height,
			last_ms: js_sys::Date::now(),
			last_hovered: None,
		};
		state.scene.set_viewport(width as f32, height as f32);
		Ok(state)
	}

	fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.scene.set_viewport(width as f32, height as f32);
	}

	/// Advance, upload, and draw one frame. Returns `Some` when the hovered
	/// node changed since the previous frame.
	fn frame(&mut self, selected: Option<usize>) -> Option<Option<HoveredInfo>> {
		let now = js_sys::Date::now();
		let dt = (((now - self.last_ms) / 1000.0) as f32).clamp(0.0, 0.1);
		self.last_ms = now;

		self.scene.select_category(selected);
		self.scene.advance(dt);

		let nodes = self.scene.nodes();
		self.points
			.upload(&self.ctx, nodes.brightness(), nodes.size_scale(), nodes.displacement());
		let edges = self.scene.edges();
		self.lines.upload(&self.ctx, edges.vertex_opacity());
		self.pulses.upload(
			&self.ctx,
			edges.pulse_positions(),
			edges.pulse_sizes(),
			edges.pulse_opacities(),
		);

		let half = self.scene.half_extent();
		let (rotation, offset_y) = self.scene.parallax();
		let uniforms = FrameUniforms {
			half_extent: [half.x, half.y],
			rotation,
			offset_y,
			point_scale: self.height as f32 / (half.y * 2.0) * 0.6,
		};

		let gl = &self.ctx.gl;
		gl.viewport(0, 0, self.width as i32, self.height as i32);
		gl.clear_color(0.0, 0.0, 0.0, 0.0);
		gl.clear(web_sys::WebGl2RenderingContext::COLOR_BUFFER_BIT);
		self.lines.draw(&self.ctx, &uniforms);
		self.points.draw(&self.ctx, &uniforms);
		self.pulses.draw(&self.ctx, &uniforms);

		let hovered = self.scene.hovered_info();
		let id = hovered.as_ref().map(|h| h.id.clone());
		if id != self.last_hovered {
			self.last_hovered = id;
			Some(hovered)
		} else {
			None
		}
	}

	/// Release the GL programs and buffers at unmount; dropping the `web-sys`
	/// handles alone would leave the GL objects alive in the context.
	fn dispose(&self) {
		self.points.dispose(&self.ctx);
		self.lines.dispose(&self.ctx);
		self.pulses.dispose(&self.ctx);
	}
}

/// A canvas hosting one engine scene: points, edges, and pulse markers drawn
/// through the WebGL renderers, advanced once per animation frame.
#[component]
pub fn SceneCanvas(
	config: SceneConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(default = BlendMode::Additive)] blend: BlendMode,
	#[prop(optional, into)] selected_category: Option<Signal<Option<usize>>>,
	#[prop(optional, into)] on_hover: Option<Callback<Option<HoveredInfo>>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CanvasState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let scroll_cb: Rc<RefCell<Option<Closure<dyn FnMut(Event)>>>> = Rc::new(RefCell::new(None));
	let running = Rc::new(Cell::new(true));
	let config = RefCell::new(Some(config));

	let (state_init, animate_init, resize_cb_init, scroll_cb_init, running_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		scroll_cb.clone(),
		running.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(config) = config.borrow_mut().take() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		match CanvasState::new(&canvas, config, blend, w, h) {
			Ok(built) => *state_init.borrow_mut() = Some(built),
			Err(err) => {
				// Fatal: leave the canvas blank and let the host show its
				// static fallback.
				log::error!("scene canvas construction failed: {err}");
				return;
			}
		}

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
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
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let state_scroll = state_init.clone();
		*scroll_cb_init.borrow_mut() = Some(Closure::new(move |_: Event| {
			let win: Window = web_sys::window().unwrap();
			let y = win.scroll_y().unwrap_or(0.0);
			if let Some(ref mut s) = *state_scroll.borrow_mut() {
				s.scene.scrolled(y as f32);
			}
		}));
		if let Some(ref cb) = *scroll_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, running_anim) =
			(state_init.clone(), animate_init.clone(), running_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !running_anim.get() {
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				let selected = selected_category.and_then(|sig| sig.get_untracked());
				if let Some(change) = s.frame(selected) {
					if let Some(cb) = on_hover {
						cb.run(change);
					}
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.scene.pointer_moved(x as f32, y as f32, js_sys::Date::now());
		}
	};

	// Every listener registered at mount has exactly one matching removal
	// here; the frame loop stops re-scheduling itself on the next tick. The
	// captured handles are not thread-safe, so they ride in a SendWrapper to
	// satisfy the cleanup hook's bounds; cleanup always runs on the UI thread.
	let cleanup = SendWrapper::new((running, animate, resize_cb, scroll_cb, state));
	on_cleanup(move || {
		let (running, animate, resize_cb, scroll_cb, state) = cleanup.take();
		running.set(false);
		if let Some(window) = web_sys::window() {
			if let Some(ref cb) = *resize_cb.borrow() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
			if let Some(ref cb) = *scroll_cb.borrow() {
				let _ = window
					.remove_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref());
			}
		}
		animate.borrow_mut().take();
		if let Some(state) = state.borrow_mut().take() {
			state.dispose();
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="scene-canvas"
			on:mousemove=on_mousemove
			style="display: block;"
		/>
	}
}
