use glam::Vec3;

use crate::engine::{CategoryDef, EdgeRule, NodeSpec, SceneConfig, Tuning};

pub const SKILL_CATEGORY_COUNT: usize = 4;

const CATEGORIES: [(&str, &str, [f32; 3]); SKILL_CATEGORY_COUNT] = [
	("data", "Data Science & Analytics", [0.54, 0.60, 0.67]),
	("database", "Data Engineering", [0.60, 0.67, 0.54]),
	("cloud", "Cloud & Architecture", [0.54, 0.67, 0.54]),
	("ai", "AI & LLM", [0.67, 0.60, 0.54]),
];

const NODES: [(&str, &str, usize, f32, f32, f32); 11] = [
	("python", "Python", 0, 0.0, 0.0, 1.6),
	("pandas", "Pandas", 0, -2.0, -1.0, 1.2),
	("pyspark", "PySpark", 0, -1.5, -2.5, 1.1),
	("dataanalysis", "Data Analysis", 0, -2.5, -0.5, 1.2),
	("storytelling", "Story Telling", 0, -3.5, 0.0, 1.1),
	("llmai", "LLM/AI", 3, -1.0, 2.0, 1.3),
	("sql", "SQL", 1, 2.0, -1.0, 1.3),
	("datamodelling", "Data Modelling", 1, 3.0, -2.5, 1.2),
	("etl", "ETL/ELT", 1, 1.5, -3.0, 1.1),
	("aws", "AWS", 2, 1.5, 2.0, 1.4),
	("systemdesign", "System Design", 2, 3.0, 1.5, 1.3),
];

const CONNECTIONS: [(&str, &str); 16] = [
	("python", "pandas"),
	("python", "pyspark"),
	("python", "dataanalysis"),
	("python", "llmai"),
	("python", "sql"),
	("python", "aws"),
	("pandas", "dataanalysis"),
	("dataanalysis", "storytelling"),
	("llmai", "aws"),
	("sql", "datamodelling"),
	("sql", "etl"),
	("etl", "pyspark"),
	("etl", "aws"),
	("systemdesign", "aws"),
	("systemdesign", "datamodelling"),
	("pyspark", "aws"),
];

/// The labeled skills-network variant: explicit nodes, explicit adjacency,
/// and the category set the filter overlay exposes.
pub fn skills_config(seed: u64) -> SceneConfig {
	let categories = CATEGORIES
		.iter()
		.map(|&(id, name, color)| CategoryDef {
			id: id.into(),
			name: name.into(),
			color,
		})
		.collect();
	let nodes = NODES
		.iter()
		.map(|&(id, label, category, x, y, size)| NodeSpec {
			id: id.into(),
			label: Some(label.into()),
			category: Some(category),
			position: Vec3::new(x, y, 0.0),
			base_size: size,
		})
		.collect();
	let edges = EdgeRule::Explicit(
		CONNECTIONS
			.iter()
			.map(|&(from, to)| (from.into(), to.into()))
			.collect(),
	);

	// The labeled variant sits closer to the camera, so interaction radii
	// shrink to match its tighter layout.
	let tuning = Tuning {
		node_hover_radius: 0.9,
		node_interaction_base: 2.5,
		edge_hover_radius: 0.7,
		edge_interaction_base: 3.5,
		resting_opacity: 0.2,
		..Tuning::default()
	};

	SceneConfig {
		nodes,
		edges,
		categories,
		half_extent: Vec3::new(4.5, 4.0, 2.0),
		seed,
		tuning,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::Scene;

	#[test]
	fn skills_graph_builds_with_all_connections() {
		let scene = Scene::new(skills_config(3)).unwrap();
		assert_eq!(scene.nodes().len(), NODES.len());
		assert_eq!(scene.edges().len(), CONNECTIONS.len());
		assert_eq!(scene.categories().len(), SKILL_CATEGORY_COUNT);
	}

	#[test]
	fn python_is_the_best_connected_skill() {
		let scene = Scene::new(skills_config(3)).unwrap();
		assert_eq!(scene.edges().neighbor_count(0), 6);
	}
}
