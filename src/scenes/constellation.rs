use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::{EdgeRule, NodeSpec, SceneConfig, Tuning};

const STAR_COUNT: usize = 80;
const HALF_EXTENT: Vec3 = Vec3::new(15.0, 10.0, 7.5);

/// The ambient starfield/constellation background: a seeded random star
/// layout with proximity edges. The same seed always yields the same sky.
pub fn constellation_config(seed: u64) -> SceneConfig {
	let mut rng = SmallRng::seed_from_u64(seed);
	let nodes = (0..STAR_COUNT)
		.map(|i| {
			let x = (rng.random::<f32>() - 0.5) * 2.0 * HALF_EXTENT.x;
			let y = (rng.random::<f32>() - 0.5) * 2.0 * HALF_EXTENT.y;
			let z = (rng.random::<f32>() - 0.5) * 2.0 * HALF_EXTENT.z - 5.0;
			NodeSpec {
				id: format!("star-{i}"),
				label: None,
				category: None,
				position: Vec3::new(x, y, z),
				base_size: rng.random::<f32>() * 1.5 + 0.3,
			}
		})
		.collect();

	SceneConfig {
		nodes,
		edges: EdgeRule::Proximity { max_distance: 4.0, max_edges: 100 },
		categories: Vec::new(),
		half_extent: HALF_EXTENT,
		seed,
		tuning: Tuning::default(),
	}
}
