//! Scene orchestrator: the single owner the frame loop mutates. Pointer and
//! scroll events land in single-slot holders and are read once per frame, at
//! the start of `advance`; everything downstream is frame-synchronous.

use glam::Vec3;

use super::clock::FrameClock;
use super::config::{ConfigError, SceneConfig, Tuning};
use super::edges::EdgeField;
use super::nodes::{Node, NodeField};
use super::pointer::{PointerState, PointerTracker, Viewport};
use super::reveal::{RevealPhase, RevealTimeline};

/// What the surrounding UI is allowed to read about the hovered node.
#[derive(Clone, Debug, PartialEq)]
pub struct HoveredInfo {
	pub id: String,
	pub label: String,
	pub category: Option<String>,
	pub connections: usize,
}

pub struct Scene {
	tuning: Tuning,
	categories: Vec<super::config::CategoryDef>,
	half_extent: Vec3,
	clock: FrameClock,
	pointer: PointerTracker,
	reveal: RevealTimeline,
	nodes: NodeField,
	edges: EdgeField,
	viewport: Viewport,
	pending_pointer: Option<(f32, f32, f64)>,
	scroll_y: f32,
	selected_category: Option<usize>,
}

impl Scene {
	/// Build a scene from a validated configuration. Malformed configuration
	/// is rejected here, before any derived state exists.
	pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		let SceneConfig { nodes, edges, categories, half_extent, seed, tuning } = config;

		let nodes: Vec<Node> = nodes
			.into_iter()
			.map(|spec| Node {
				id: spec.id,
				label: spec.label,
				category: spec.category,
				rest: spec.position,
				base_size: spec.base_size,
			})
			.collect();

		let edge_field = EdgeField::build(&nodes, &edges, seed, half_extent.y, &tuning)?;
		log::debug!(
			"scene built: {} nodes, {} edges",
			nodes.len(),
			edge_field.len()
		);

		Ok(Self {
			viewport: Viewport::new(1.0, 1.0, half_extent.truncate()),
			reveal: RevealTimeline::new(tuning.reveal.clone()),
			nodes: NodeField::new(nodes, half_extent.y),
			edges: edge_field,
			clock: FrameClock::new(),
			pointer: PointerTracker::new(),
			pending_pointer: None,
			scroll_y: 0.0,
			selected_category: None,
			tuning,
			categories,
			half_extent,
		})
	}

	/// Latest-wins pointer sample; read at the start of the next frame.
	pub fn pointer_moved(&mut self, sx: f32, sy: f32, now_ms: f64) {
		self.pending_pointer = Some((sx, sy, now_ms));
	}

	pub fn scrolled(&mut self, y: f32) {
		self.scroll_y = y;
	}

	pub fn set_viewport(&mut self, width: f32, height: f32) {
		self.viewport = Viewport::new(width, height, self.half_extent.truncate());
	}

	/// Select a category to dim everything outside it, or clear the filter.
	pub fn select_category(&mut self, category: Option<usize>) {
		if category.map_or(false, |c| c >= self.categories.len()) {
			log::warn!("ignoring unknown category index {category:?}");
			return;
		}
		if self.selected_category != category {
			self.selected_category = category;
			self.edges.set_dimmed(self.nodes.nodes(), category);
		}
	}

	pub fn selected_category(&self) -> Option<usize> {
		self.selected_category
	}

	/// Advance the whole engine by one frame: pointer intake and decay,
	/// reveal phase, node state, then edge and pulse state.
	pub fn advance(&mut self, dt: f32) {
		self.clock.advance(dt);
		if let Some((sx, sy, now_ms)) = self.pending_pointer.take() {
			self.pointer
				.record(sx, sy, now_ms, &self.viewport, &self.tuning);
		}
		self.pointer.relax(&self.tuning);
		self.reveal.advance(self.clock.elapsed());

		let state = self.pointer.state();
		self.nodes.advance(
			self.clock.elapsed(),
			&state,
			&self.reveal,
			self.selected_category,
			&self.tuning,
		);
		self.edges.advance(
			self.clock.delta(),
			&state,
			&self.reveal,
			self.nodes.hovered(),
			self.nodes.nodes(),
			self.nodes.dim(),
			&self.tuning,
		);
	}

	pub fn elapsed(&self) -> f64 {
		self.clock.elapsed()
	}

	pub fn phase(&self) -> RevealPhase {
		self.reveal.phase()
	}

	pub fn pointer_state(&self) -> PointerState {
		self.pointer.state()
	}

	pub fn nodes(&self) -> &NodeField {
		&self.nodes
	}

	pub fn edges(&self) -> &EdgeField {
		&self.edges
	}

	pub fn categories(&self) -> &[super::config::CategoryDef] {
		&self.categories
	}

	pub fn half_extent(&self) -> Vec3 {
		self.half_extent
	}

	/// Scroll-linked parallax published to the renderer as uniforms.
	pub fn parallax(&self) -> (f32, f32) {
		(self.scroll_y * 0.0003, -self.scroll_y * 0.001)
	}

	/// The hovered node's label, category name, and connection count, the
	/// only structured output the surrounding UI reads.
	pub fn hovered_info(&self) -> Option<HoveredInfo> {
		let index = self.nodes.hovered()?;
		let node = self.nodes.node(index);
		Some(HoveredInfo {
			id: node.id.clone(),
			label: node.label.clone().unwrap_or_else(|| node.id.clone()),
			category: node
				.category
				.and_then(|c| self.categories.get(c))
				.map(|c| c.name.clone()),
			connections: self.edges.neighbor_count(index),
		})
	}
}
