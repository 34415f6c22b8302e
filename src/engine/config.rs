use glam::Vec3;
use thiserror::Error;

use super::reveal::RevealTiming;

/// A category a node may belong to, used for per-category tinting and for
/// the filter overlay of the labeled variant.
#[derive(Clone, Debug)]
pub struct CategoryDef {
	pub id: String,
	pub name: String,
	/// Linear RGB tint applied to the node sprites of this category.
	pub color: [f32; 3],
}

/// Static description of one node. Rest positions are immutable after scene
/// construction; everything visual is derived state owned by the fields.
#[derive(Clone, Debug)]
pub struct NodeSpec {
	pub id: String,
	pub label: Option<String>,
	/// Index into [`SceneConfig::categories`].
	pub category: Option<usize>,
	pub position: Vec3,
	pub base_size: f32,
}

/// How the edge set is derived at scene construction.
#[derive(Clone, Debug)]
pub enum EdgeRule {
	/// An explicit adjacency list of node ids.
	Explicit(Vec<(String, String)>),
	/// Every unordered node pair closer than `max_distance`, enumerated in
	/// ascending `(i, j)` order and truncated at `max_edges`. The explicit
	/// order makes the kept subset a deterministic function of the layout.
	Proximity { max_distance: f32, max_edges: usize },
}

/// Every constant the per-frame policies use. Defaults reproduce the look of
/// the ambient constellation background.
#[derive(Clone, Debug)]
pub struct Tuning {
	// Pointer velocity model.
	pub shake_threshold: f32,
	pub shake_min_samples: usize,
	pub velocity_window_ms: f64,
	pub velocity_decay: f32,
	pub avg_velocity_decay: f32,
	pub velocity_epsilon: f32,

	// Node policies.
	pub node_hover_radius: f32,
	pub node_interaction_base: f32,
	pub node_interaction_gain: f32,
	pub resting_brightness: f32,
	pub brightness_smoothing: f32,
	pub size_smoothing: f32,
	pub repel_base: f32,
	pub repel_gain: f32,
	pub repel_velocity_floor: f32,
	pub displacement_smoothing: f32,
	pub displacement_decay: f32,

	// Edge policies.
	pub edge_hover_radius: f32,
	pub edge_interaction_base: f32,
	pub edge_interaction_gain: f32,
	pub resting_opacity: f32,
	pub opacity_smoothing: f32,
	pub boost_smoothing: f32,

	// Traveling pulses.
	pub pulse_speed_min: f32,
	pub pulse_speed_spread: f32,
	pub pulse_hover_multiplier: f32,
	pub pulse_velocity_gain: f32,
	pub pulse_rearm_chance: f32,
	pub pulse_idle_chance: f32,
	pub pulse_idle_velocity_gain: f32,
	pub pulse_hover_spawn_chance: f32,
	pub pulse_wave_spawn_chance: f32,
	pub pulse_pointer_radius: f32,

	// Category filter overlay.
	pub dim_factor: f32,
	pub dimmed_edge_opacity: f32,
	pub dim_smoothing: f32,

	pub reveal: RevealTiming,
}

impl Default for Tuning {
	fn default() -> Self {
		Self {
			shake_threshold: 0.5,
			shake_min_samples: 3,
			velocity_window_ms: 500.0,
			velocity_decay: 0.95,
			avg_velocity_decay: 0.98,
			velocity_epsilon: 0.01,

			node_hover_radius: 1.5,
			node_interaction_base: 4.0,
			node_interaction_gain: 2.0,
			resting_brightness: 0.25,
			brightness_smoothing: 0.15,
			size_smoothing: 0.12,
			repel_base: 4.0,
			repel_gain: 3.0,
			repel_velocity_floor: 0.1,
			displacement_smoothing: 0.12,
			displacement_decay: 0.92,

			edge_hover_radius: 1.2,
			edge_interaction_base: 6.0,
			edge_interaction_gain: 4.0,
			resting_opacity: 0.1,
			opacity_smoothing: 0.15,
			boost_smoothing: 0.1,

			pulse_speed_min: 0.12,
			pulse_speed_spread: 0.08,
			pulse_hover_multiplier: 2.5,
			pulse_velocity_gain: 2.0,
			pulse_rearm_chance: 0.7,
			pulse_idle_chance: 0.003,
			pulse_idle_velocity_gain: 0.02,
			pulse_hover_spawn_chance: 0.1,
			pulse_wave_spawn_chance: 0.3,
			pulse_pointer_radius: 2.0,

			dim_factor: 0.3,
			dimmed_edge_opacity: 0.05,
			dim_smoothing: 0.15,

			reveal: RevealTiming::default(),
		}
	}
}

/// Complete static input of a scene: the only data the engine ever consumes
/// besides pointer/scroll samples and elapsed time.
#[derive(Clone, Debug)]
pub struct SceneConfig {
	pub nodes: Vec<NodeSpec>,
	pub edges: EdgeRule,
	pub categories: Vec<CategoryDef>,
	/// World half-extents; x/y drive pointer unprojection, y also normalizes
	/// heights for the reveal wave.
	pub half_extent: Vec3,
	/// Seed for every pseudo-random draw (pulse scheduling, layout jitter),
	/// so a fixed configuration replays identically.
	pub seed: u64,
	pub tuning: Tuning,
}

/// Configuration-time defects. Raised by [`Scene::new`] before any derived
/// state exists; there are no recoverable runtime errors after that.
///
/// [`Scene::new`]: super::scene::Scene::new
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("scene configuration has no nodes")]
	NoNodes,
	#[error("duplicate node id `{0}`")]
	DuplicateNodeId(String),
	#[error("edge endpoint `{0}` does not match any node id")]
	UnknownEndpoint(String),
	#[error("edge connects node `{0}` to itself")]
	SelfLoop(String),
	#[error("node `{id}` references category {index} but only {count} categories are defined")]
	UnknownCategory { id: String, index: usize, count: usize },
}

impl SceneConfig {
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.nodes.is_empty() {
			return Err(ConfigError::NoNodes);
		}
		let mut seen = std::collections::HashSet::new();
		for node in &self.nodes {
			if !seen.insert(node.id.as_str()) {
				return Err(ConfigError::DuplicateNodeId(node.id.clone()));
			}
			if let Some(index) = node.category {
				if index >= self.categories.len() {
					return Err(ConfigError::UnknownCategory {
						id: node.id.clone(),
						index,
						count: self.categories.len(),
					});
				}
			}
		}
		if let EdgeRule::Explicit(pairs) = &self.edges {
			for (from, to) in pairs {
				if from == to {
					return Err(ConfigError::SelfLoop(from.clone()));
				}
				for endpoint in [from, to] {
					if !seen.contains(endpoint.as_str()) {
						return Err(ConfigError::UnknownEndpoint(endpoint.clone()));
					}
				}
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, x: f32, y: f32) -> NodeSpec {
		NodeSpec {
			id: id.into(),
			label: None,
			category: None,
			position: Vec3::new(x, y, 0.0),
			base_size: 1.0,
		}
	}

	fn base_config(nodes: Vec<NodeSpec>, edges: EdgeRule) -> SceneConfig {
		SceneConfig {
			nodes,
			edges,
			categories: Vec::new(),
			half_extent: Vec3::new(10.0, 10.0, 5.0),
			seed: 7,
			tuning: Tuning::default(),
		}
	}

	#[test]
	fn rejects_empty_scene() {
		let config = base_config(Vec::new(), EdgeRule::Explicit(Vec::new()));
		assert!(matches!(config.validate(), Err(ConfigError::NoNodes)));
	}

	#[test]
	fn rejects_duplicate_ids() {
		let config = base_config(
			vec![node("a", 0.0, 0.0), node("a", 1.0, 0.0)],
			EdgeRule::Explicit(Vec::new()),
		);
		assert!(matches!(
			config.validate(),
			Err(ConfigError::DuplicateNodeId(id)) if id == "a"
		));
	}

	#[test]
	fn rejects_dangling_edge_endpoint() {
		let config = base_config(
			vec![node("a", 0.0, 0.0), node("b", 1.0, 0.0)],
			EdgeRule::Explicit(vec![("a".into(), "missing".into())]),
		);
		assert!(matches!(
			config.validate(),
			Err(ConfigError::UnknownEndpoint(id)) if id == "missing"
		));
	}

	#[test]
	fn rejects_self_loop() {
		let config = base_config(
			vec![node("a", 0.0, 0.0)],
			EdgeRule::Explicit(vec![("a".into(), "a".into())]),
		);
		assert!(matches!(config.validate(), Err(ConfigError::SelfLoop(_))));
	}

	#[test]
	fn rejects_out_of_range_category() {
		let mut spec = node("a", 0.0, 0.0);
		spec.category = Some(2);
		let config = base_config(vec![spec], EdgeRule::Explicit(Vec::new()));
		assert!(matches!(
			config.validate(),
			Err(ConfigError::UnknownCategory { index: 2, .. })
		));
	}

	#[test]
	fn accepts_valid_configuration() {
		let config = base_config(
			vec![node("a", 0.0, 0.0), node("b", 3.0, 0.0)],
			EdgeRule::Explicit(vec![("a".into(), "b".into())]),
		);
		assert!(config.validate().is_ok());
	}
}
