//! Edge derivation and per-frame edge state: opacity driven by reveal wave,
//! hover, and proximity (contributions combine by max, then one smoothing
//! step), plus the traveling pulse population. Every pseudo-random draw goes
//! through a seeded generator so a fixed configuration replays identically.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::{ConfigError, EdgeRule, Tuning};
use super::math::{approach, normalized_height, segment_closest_t, segment_distance};
use super::nodes::Node;
use super::pointer::PointerState;
use super::reveal::{RevealPhase, RevealTimeline};

/// Marker traveling along an edge. At most one per edge.
#[derive(Clone, Copy, Debug)]
pub struct Pulse {
	pub active: bool,
	pub progress: f32,
	pub speed: f32,
	base_speed: f32,
}

#[derive(Clone, Debug)]
pub struct Edge {
	pub from: usize,
	pub to: usize,
	/// Euclidean distance between the rest positions, cached at construction.
	pub length: f32,
	pub opacity: f32,
	pub pulse: Pulse,
}

pub struct EdgeField {
	edges: Vec<Edge>,
	rng: SmallRng,
	velocity_boost: f32,
	dimmed: Vec<bool>,
	half_extent_y: f32,
	time: f32,
	// Flat attribute staging, two opacity values per edge (one per vertex)
	// and one pulse record per edge.
	vertex_opacity: Vec<f32>,
	pulse_positions: Vec<f32>,
	pulse_sizes: Vec<f32>,
	pulse_opacities: Vec<f32>,
}

impl EdgeField {
	/// Derive the edge set from the rule. Proximity enumeration walks node
	/// pairs in ascending `(i, j)` order and stops at the cap, so the result
	/// is byte-identical across runs for a fixed layout.
	pub(crate) fn build(
		nodes: &[Node],
		rule: &EdgeRule,
		seed: u64,
		half_extent_y: f32,
		tuning: &Tuning,
	) -> Result<Self, ConfigError> {
		let mut rng = SmallRng::seed_from_u64(seed);
		let mut edges = Vec::new();

		match rule {
			EdgeRule::Explicit(pairs) => {
				let index: HashMap<&str, usize> = nodes
					.iter()
					.enumerate()
					.map(|(i, n)| (n.id.as_str(), i))
					.collect();
				for (from, to) in pairs {
					if from == to {
						return Err(ConfigError::SelfLoop(from.clone()));
					}
					let a = *index
						.get(from.as_str())
						.ok_or_else(|| ConfigError::UnknownEndpoint(from.clone()))?;
					let b = *index
						.get(to.as_str())
						.ok_or_else(|| ConfigError::UnknownEndpoint(to.clone()))?;
					edges.push(make_edge(nodes, a, b, &mut rng, tuning));
				}
			}
			EdgeRule::Proximity { max_distance, max_edges } => {
				'outer: for i in 0..nodes.len() {
					for j in (i + 1)..nodes.len() {
						if edges.len() >= *max_edges {
							break 'outer;
						}
						if nodes[i].rest.distance(nodes[j].rest) < *max_distance {
							edges.push(make_edge(nodes, i, j, &mut rng, tuning));
						}
					}
				}
			}
		}

		let count = edges.len();
		Ok(Self {
			edges,
			rng,
			velocity_boost: 0.0,
			dimmed: vec![false; count],
			half_extent_y,
			time: 0.0,
			vertex_opacity: vec![0.0; count * 2],
			pulse_positions: vec![0.0; count * 3],
			pulse_sizes: vec![0.0; count],
			pulse_opacities: vec![0.0; count],
		})
	}

	pub fn len(&self) -> usize {
		self.edges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.edges.is_empty()
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Edges incident to `node`; the connection count shown by the info panel.
	pub fn neighbor_count(&self, node: usize) -> usize {
		self.edges
			.iter()
			.filter(|e| e.from == node || e.to == node)
			.count()
	}

	/// Mark which edges fall outside the selected category. An edge stays
	/// lit if either endpoint belongs to the selection.
	pub(crate) fn set_dimmed(&mut self, nodes: &[Node], selected: Option<usize>) {
		for (i, edge) in self.edges.iter().enumerate() {
			self.dimmed[i] = match selected {
				Some(cat) => {
					nodes[edge.from].category != Some(cat)
						&& nodes[edge.to].category != Some(cat)
				}
				None => false,
			};
		}
	}

	/// Per-vertex opacity, two values per edge, clamped to `[0, 1]`.
	pub fn vertex_opacity(&self) -> &[f32] {
		&self.vertex_opacity
	}

	/// Interpolated pulse positions, xyz per edge; inactive pulses publish
	/// zero size and opacity.
	pub fn pulse_positions(&self) -> &[f32] {
		&self.pulse_positions
	}

	pub fn pulse_sizes(&self) -> &[f32] {
		&self.pulse_sizes
	}

	pub fn pulse_opacities(&self) -> &[f32] {
		&self.pulse_opacities
	}

	pub fn advance(
		&mut self,
		dt: f32,
		pointer: &PointerState,
		reveal: &RevealTimeline,
		hovered_node: Option<usize>,
		nodes: &[Node],
		node_dim: &[f32],
		tuning: &Tuning,
	) {
		self.time += dt;
		let target_boost = (pointer.avg_velocity * 0.5).min(1.0);
		self.velocity_boost =
			approach(self.velocity_boost, target_boost, tuning.boost_smoothing);
		let boost = self.velocity_boost;
		let interaction_radius =
			tuning.edge_interaction_base + tuning.edge_interaction_gain * boost;
		let steady = reveal.phase() == RevealPhase::Steady;

		for (i, edge) in self.edges.iter_mut().enumerate() {
			let a3 = nodes[edge.from].rest;
			let b3 = nodes[edge.to].rest;
			let a = a3.truncate();
			let b = b3.truncate();
			let mid = (a + b) * 0.5;
			let ny = normalized_height(mid.y, self.half_extent_y);

			let closest_t = segment_closest_t(pointer.position, a, b);
			let line_dist = segment_distance(pointer.position, a, b);
			let is_hovered = line_dist < tuning.edge_hover_radius;

			// Opacity contributions only ever raise the target: the reveal
			// wave (or the resting floor once steady), direct hover, then
			// pointer proximity.
			let mut target = if steady {
				tuning.resting_opacity
			} else {
				reveal.edge_activation(ny)
			};
			// Edges touching the hovered node light up with a slow shimmer so
			// every connection of the selected skill stands out.
			let incident =
				hovered_node.is_some_and(|h| edge.from == h || edge.to == h);
			if incident {
				let shimmer = (self.time * 3.0 + i as f32).sin() * 0.1;
				target = target.max(0.8 + shimmer);
			}
			if is_hovered {
				let closeness = 1.0 - line_dist / tuning.edge_hover_radius;
				target = target.max(0.5 + closeness * 0.4);
			} else if mid.distance(pointer.position) < interaction_radius {
				let proximity = 1.0 - mid.distance(pointer.position) / interaction_radius;
				let mut boosted = 0.12 + proximity * 0.3 + boost * 0.2;
				if pointer.is_shaking {
					boosted = (boosted + 0.25).min(0.85);
				}
				target = target.max(boosted);
			}
			if self.dimmed[i] {
				target = tuning.dimmed_edge_opacity;
			} else {
				// Follow the endpoints' smoothed dim factors so edge and node
				// dimming settle together.
				let dim = node_dim[edge.from].max(node_dim[edge.to]);
				target *= dim;
			}

			edge.opacity =
				approach(edge.opacity, target.clamp(0.0, 1.0), tuning.opacity_smoothing)
					.clamp(0.0, 1.0);
			self.vertex_opacity[i * 2] = edge.opacity;
			self.vertex_opacity[i * 2 + 1] = edge.opacity;

			// Pulse lifecycle. Speed rises under hover (strongest) or with
			// sustained pointer velocity.
			let multiplier = if is_hovered {
				tuning.pulse_hover_multiplier
			} else {
				1.0 + tuning.pulse_velocity_gain * boost
			};
			edge.pulse.speed = edge.pulse.base_speed * multiplier;

			if edge.pulse.active {
				edge.pulse.progress += dt * edge.pulse.speed;
				if edge.pulse.progress > 1.0 {
					edge.pulse.progress = 0.0;
					edge.pulse.active = self.rng.random::<f32>() < tuning.pulse_rearm_chance;
				}
			} else if is_hovered
				&& self.rng.random::<f32>() < tuning.pulse_hover_spawn_chance
			{
				// Spawn at the projection of the pointer onto the edge.
				edge.pulse.active = true;
				edge.pulse.progress = closest_t;
			} else if !steady
				&& reveal.wave_hits(ny)
				&& self.rng.random::<f32>() < tuning.pulse_wave_spawn_chance
			{
				edge.pulse.active = true;
				edge.pulse.progress = 0.0;
			} else {
				let chance =
					tuning.pulse_idle_chance + tuning.pulse_idle_velocity_gain * boost;
				if self.rng.random::<f32>() < chance {
					edge.pulse.active = true;
					edge.pulse.progress = 0.0;
				}
			}
			edge.pulse.progress = edge.pulse.progress.clamp(0.0, 1.0);

			// Publish the pulse marker: triangular fade at both ends,
			// boosted when the marker itself is near the pointer.
			if edge.pulse.active && edge.pulse.progress > 0.0 {
				let t = edge.pulse.progress;
				let pos = a3.lerp(b3, t);
				let near_pointer =
					pos.truncate().distance(pointer.position) < tuning.pulse_pointer_radius;
				let envelope = (t * 5.0).min(1.0) * ((1.0 - t) * 5.0).min(1.0);
				let intensity = if near_pointer { 1.2 } else { 0.8 + boost * 0.4 };
				let dim = if self.dimmed[i] { tuning.dim_factor } else { 1.0 };

				self.pulse_positions[i * 3] = pos.x;
				self.pulse_positions[i * 3 + 1] = pos.y;
				self.pulse_positions[i * 3 + 2] = pos.z;
				self.pulse_opacities[i] = (envelope * intensity * dim).clamp(0.0, 1.0);
				self.pulse_sizes[i] = if near_pointer { 4.0 } else { 2.0 + boost * 1.5 };
			} else {
				self.pulse_opacities[i] = 0.0;
				self.pulse_sizes[i] = 0.0;
			}
		}
	}
}

fn make_edge(nodes: &[Node], from: usize, to: usize, rng: &mut SmallRng, tuning: &Tuning) -> Edge {
	let base_speed = tuning.pulse_speed_min + rng.random::<f32>() * tuning.pulse_speed_spread;
	Edge {
		from,
		to,
		length: nodes[from].rest.distance(nodes[to].rest),
		opacity: 0.0,
		pulse: Pulse {
			active: rng.random::<f32>() > 0.6,
			progress: rng.random::<f32>(),
			speed: base_speed,
			base_speed,
		},
	}
}
