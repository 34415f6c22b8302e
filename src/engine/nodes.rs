//! Per-node derived visual state: brightness, size scale, and a decaying
//! spatial displacement, recomputed every frame from pointer proximity and
//! the reveal timeline. All three policies feed one exponential smoothing
//! step per attribute; targets are never assigned directly.

use glam::Vec3;

use super::config::Tuning;
use super::math::{approach, normalized_height};
use super::pointer::PointerState;
use super::reveal::{RevealPhase, RevealTimeline};

/// Immutable identity of one node. Rest positions never change after
/// construction.
#[derive(Clone, Debug)]
pub struct Node {
	pub id: String,
	pub label: Option<String>,
	pub category: Option<usize>,
	pub rest: Vec3,
	pub base_size: f32,
}

pub struct NodeField {
	nodes: Vec<Node>,
	brightness: Vec<f32>,
	size_scale: Vec<f32>,
	displacement: Vec<Vec3>,
	dim: Vec<f32>,
	published_brightness: Vec<f32>,
	hovered: Option<usize>,
	half_extent_y: f32,
}

impl NodeField {
	pub(crate) fn new(nodes: Vec<Node>, half_extent_y: f32) -> Self {
		let count = nodes.len();
		Self {
			nodes,
			brightness: vec![0.0; count],
			size_scale: vec![1.0; count],
			displacement: vec![Vec3::ZERO; count],
			dim: vec![1.0; count],
			published_brightness: vec![0.0; count],
			hovered: None,
			half_extent_y,
		}
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn node(&self, index: usize) -> &Node {
		&self.nodes[index]
	}

	/// The nearest node within the hover radius, if any. At most one node is
	/// reported even when several sit inside the radius.
	pub fn hovered(&self) -> Option<usize> {
		self.hovered
	}

	/// Brightness after clamping and category dimming, one value per node.
	pub fn brightness(&self) -> &[f32] {
		&self.published_brightness
	}

	pub fn size_scale(&self) -> &[f32] {
		&self.size_scale
	}

	pub fn displacement(&self) -> &[Vec3] {
		&self.displacement
	}

	/// Advance one frame. `selected_category` dims out-of-category nodes
	/// toward the tuning's dim factor, through the same smoothing step as
	/// every other attribute.
	pub fn advance(
		&mut self,
		elapsed: f64,
		pointer: &PointerState,
		reveal: &RevealTimeline,
		selected_category: Option<usize>,
		tuning: &Tuning,
	) {
		let time = elapsed as f32;
		let velocity = pointer.velocity;
		let interaction_radius =
			tuning.node_interaction_base + tuning.node_interaction_gain * pointer.avg_velocity;
		let repel_radius = tuning.repel_base + tuning.repel_gain * velocity;
		let sweeping = reveal.phase() == RevealPhase::Sweeping;
		let steady = reveal.phase() == RevealPhase::Steady;

		let mut hovered: Option<(usize, f32)> = None;

		for (i, node) in self.nodes.iter().enumerate() {
			let rest = node.rest.truncate();
			let delta = rest - pointer.position;
			let dist = delta.length();
			let is_hovered = dist < tuning.node_hover_radius;

			if is_hovered {
				match hovered {
					Some((_, best)) if best <= dist => {}
					_ => hovered = Some((i, dist)),
				}
			}

			let (mut target_brightness, mut target_size) = if is_hovered {
				let closeness = 1.0 - dist / tuning.node_hover_radius;
				(1.0, 2.0 + closeness * 1.5)
			} else if dist < interaction_radius {
				let proximity = 1.0 - dist / interaction_radius;
				let mut brightness =
					0.5 + proximity * 0.4 + (velocity * 0.3).min(0.4);
				let mut size = 1.0 + proximity * 0.8;
				if pointer.is_shaking {
					brightness = (brightness + 0.3).min(1.0);
					size += 0.5;
				}
				(brightness, size)
			} else if !steady {
				// Dark until the reveal wave passes; the activation below is
				// the only brightness source before steady-state.
				(0.0, 1.0)
			} else {
				// Idle twinkle: a small per-node phase-shifted oscillation
				// around the resting brightness.
				let twinkle = (time * 0.5 + i as f32 * 0.3).sin() * 0.05;
				(tuning.resting_brightness + twinkle, 1.0)
			};

			if sweeping {
				let ny = normalized_height(node.rest.y, self.half_extent_y);
				target_brightness = target_brightness.max(reveal.node_activation(ny));
			}
			target_brightness = target_brightness.clamp(0.0, 1.0);
			target_size = target_size.max(0.0);

			self.brightness[i] =
				approach(self.brightness[i], target_brightness, tuning.brightness_smoothing);
			self.size_scale[i] =
				approach(self.size_scale[i], target_size, tuning.size_smoothing).max(0.0);

			// Displacement: repel away from a fast pointer or a direct hover,
			// otherwise decay back toward the rest position.
			if (dist < repel_radius && velocity > tuning.repel_velocity_floor) || is_hovered {
				let strength = if is_hovered {
					(1.0 - dist / tuning.node_hover_radius) * 0.8
				} else {
					(1.0 - dist / repel_radius) * (velocity * 0.8).min(1.5)
				};
				let away = delta / dist.max(1e-4);
				let target = Vec3::new(
					away.x * strength,
					away.y * strength,
					(time * 3.0 + i as f32).sin() * strength * 0.3,
				);
				let d = &mut self.displacement[i];
				d.x = approach(d.x, target.x, tuning.displacement_smoothing);
				d.y = approach(d.y, target.y, tuning.displacement_smoothing);
				d.z = approach(d.z, target.z, tuning.displacement_smoothing);
			} else {
				self.displacement[i] *= tuning.displacement_decay;
			}

			let dim_target = match (selected_category, node.category) {
				(Some(selected), Some(category)) if selected == category => 1.0,
				(Some(_), _) => tuning.dim_factor,
				(None, _) => 1.0,
			};
			self.dim[i] = approach(self.dim[i], dim_target, tuning.dim_smoothing);

			self.published_brightness[i] =
				(self.brightness[i] * self.dim[i]).clamp(0.0, 1.0);
		}

		self.hovered = hovered.map(|(i, _)| i);
	}

	/// Smoothed per-node dim factors, read by the edge field so edge dimming
	/// tracks node dimming.
	pub(crate) fn dim(&self) -> &[f32] {
		&self.dim
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::config::Tuning;
	use crate::engine::reveal::{RevealTimeline, RevealTiming};
	use glam::Vec2;

	fn field(positions: &[(f32, f32)]) -> NodeField {
		let nodes = positions
			.iter()
			.enumerate()
			.map(|(i, &(x, y))| Node {
				id: format!("n{i}"),
				label: None,
				category: None,
				rest: Vec3::new(x, y, 0.0),
				base_size: 1.0,
			})
			.collect();
		NodeField::new(nodes, 10.0)
	}

	fn steady_reveal() -> RevealTimeline {
		let mut reveal = RevealTimeline::new(RevealTiming::default());
		reveal.advance(10.0);
		reveal
	}

	fn pointer_at(x: f32, y: f32) -> PointerState {
		PointerState {
			position: Vec2::new(x, y),
			..Default::default()
		}
	}

	#[test]
	fn hover_is_exclusive_to_the_nearest_node() {
		let mut field = field(&[(0.0, 0.0), (3.0, 0.0), (0.9, 0.0)]);
		let reveal = steady_reveal();
		field.advance(10.0, &pointer_at(0.0, 0.0), &reveal, None, &Tuning::default());
		assert_eq!(field.hovered(), Some(0));
	}

	#[test]
	fn hovered_node_outshines_distant_ones() {
		let mut field = field(&[(0.0, 0.0), (8.0, 0.0)]);
		let reveal = steady_reveal();
		let tuning = Tuning::default();
		let pointer = pointer_at(0.0, 0.0);
		for _ in 0..60 {
			field.advance(10.0, &pointer, &reveal, None, &tuning);
		}
		assert!(field.brightness()[0] > 0.95);
		assert!(field.brightness()[1] < 0.5);
		assert!(field.size_scale()[0] > field.size_scale()[1]);
	}

	#[test]
	fn attributes_stay_clamped_under_violent_input() {
		let mut field = field(&[(0.0, 0.0), (1.0, 1.0), (-5.0, 3.0)]);
		let reveal = steady_reveal();
		let tuning = Tuning::default();
		let pointer = PointerState {
			position: Vec2::new(0.5, 0.5),
			velocity: 50.0,
			avg_velocity: 30.0,
			is_shaking: true,
			direction: Vec2::X,
		};
		for frame in 0..120 {
			field.advance(10.0 + frame as f64 * 0.016, &pointer, &reveal, None, &tuning);
			for &b in field.brightness() {
				assert!((0.0..=1.0).contains(&b));
			}
			for &s in field.size_scale() {
				assert!(s >= 0.0);
			}
		}
	}

	#[test]
	fn displacement_decays_to_near_zero_without_input() {
		let mut field = field(&[(0.5, 0.0)]);
		let reveal = steady_reveal();
		let tuning = Tuning::default();
		let moving = PointerState {
			position: Vec2::ZERO,
			velocity: 2.0,
			avg_velocity: 1.5,
			..Default::default()
		};
		for _ in 0..30 {
			field.advance(10.0, &moving, &reveal, None, &tuning);
		}
		assert!(field.displacement()[0].length() > 0.05);

		let still = pointer_at(50.0, 50.0);
		let start = field.displacement()[0].length();
		let mut last = start;
		for _ in 0..40 {
			field.advance(10.0, &still, &reveal, None, &tuning);
			let len = field.displacement()[0].length();
			assert!(len <= last + 1e-6);
			last = len;
		}
		assert!(last < start * 0.04);
	}

	#[test]
	fn dormant_nodes_stay_dark_until_the_wave_starts() {
		let mut field = field(&[(0.0, 0.0), (2.0, 5.0)]);
		let mut reveal = RevealTimeline::new(RevealTiming::default());
		let tuning = Tuning::default();
		let idle = pointer_at(100.0, 100.0);
		for frame in 0..10 {
			let elapsed = frame as f64 * 0.016;
			reveal.advance(elapsed);
			assert_eq!(reveal.phase(), RevealPhase::Dormant);
			field.advance(elapsed, &idle, &reveal, None, &tuning);
		}
		for &b in field.brightness() {
			assert_eq!(b, 0.0);
		}
	}

	#[test]
	fn reveal_wave_lights_nodes_before_steady_state() {
		let mut field = field(&[(0.0, -9.0), (0.0, 9.0)]);
		let mut reveal = RevealTimeline::new(RevealTiming::default());
		let tuning = Tuning::default();
		let idle = pointer_at(100.0, 100.0);

		// Early in the sweep only the bottom node has been passed.
		for frame in 0..40 {
			let elapsed = 0.3 + frame as f64 * 0.016;
			reveal.advance(elapsed);
			field.advance(elapsed, &idle, &reveal, None, &tuning);
		}
		assert!(field.brightness()[0] > field.brightness()[1]);
	}

	#[test]
	fn category_filter_dims_other_categories() {
		let mut field = field(&[(0.0, 0.0), (3.0, 0.0)]);
		field.nodes[0].category = Some(0);
		field.nodes[1].category = Some(1);
		let reveal = steady_reveal();
		let tuning = Tuning::default();
		let idle = pointer_at(100.0, 100.0);
		for _ in 0..80 {
			field.advance(10.0, &idle, &reveal, Some(0), &tuning);
		}
		let kept = field.brightness()[0];
		let dimmed = field.brightness()[1];
		assert!(dimmed < kept * 0.5, "dimmed {dimmed} vs kept {kept}");
	}
}
