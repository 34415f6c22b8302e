//! End-to-end engine scenarios run on the host target: scene construction,
//! the boot sequence, pointer-driven hover, and relaxation back to rest.

use constellation_canvas::engine::{
	CategoryDef, EdgeRule, NodeSpec, RevealPhase, Scene, SceneConfig, Tuning,
};
use glam::Vec3;

fn two_node_config() -> SceneConfig {
	SceneConfig {
		nodes: vec![
			NodeSpec {
				id: "a".into(),
				label: Some("Alpha".into()),
				category: None,
				position: Vec3::new(6.0, 4.0, 0.0),
				base_size: 1.0,
			},
			NodeSpec {
				id: "b".into(),
				label: Some("Beta".into()),
				category: None,
				// 3 scene units from "a": inside the proximity threshold,
				// well outside the pointer's resting interaction radius.
				position: Vec3::new(9.0, 4.0, 0.0),
				base_size: 1.0,
			},
		],
		edges: EdgeRule::Proximity { max_distance: 4.0, max_edges: 100 },
		categories: Vec::new(),
		half_extent: Vec3::new(10.0, 10.0, 5.0),
		seed: 99,
		tuning: Tuning::default(),
	}
}

/// Screen coordinates for a world position under the test viewport.
fn screen(scene: &Scene, wx: f32, wy: f32, width: f32, height: f32) -> (f32, f32) {
	let half = scene.half_extent();
	let sx = (wx / half.x + 1.0) * 0.5 * width;
	let sy = (1.0 - wy / half.y) * 0.5 * height;
	(sx, sy)
}

#[test]
fn two_nodes_within_threshold_create_one_edge() {
	let scene = Scene::new(two_node_config()).unwrap();
	assert_eq!(scene.nodes().len(), 2);
	assert_eq!(scene.edges().len(), 1);
}

#[test]
fn boot_sequence_ends_steady_with_no_phase_contribution() {
	let mut scene = Scene::new(two_node_config()).unwrap();
	scene.set_viewport(800.0, 600.0);

	let mut last_phase = RevealPhase::Dormant;
	for _ in 0..300 {
		scene.advance(0.016);
		assert!(scene.phase() >= last_phase);
		last_phase = scene.phase();
	}
	assert_eq!(scene.phase(), RevealPhase::Steady);

	// With no pointer nearby, steady-state brightness settles at the idle
	// resting level rather than any reveal contribution.
	for _ in 0..120 {
		scene.advance(0.016);
	}
	for &b in scene.nodes().brightness() {
		assert!(b > 0.1 && b < 0.45, "idle brightness out of range: {b}");
	}
}

#[test]
fn pointer_on_node_hovers_only_that_node() {
	let mut scene = Scene::new(two_node_config()).unwrap();
	scene.set_viewport(800.0, 600.0);
	// Get past the boot sequence first.
	for _ in 0..300 {
		scene.advance(0.016);
	}

	let (sx, sy) = screen(&scene, 6.0, 4.0, 800.0, 600.0);
	let mut now_ms = 0.0;
	for _ in 0..30 {
		scene.pointer_moved(sx, sy, now_ms);
		scene.advance(0.016);
		now_ms += 16.0;
	}

	let info = scene.hovered_info().expect("node a should be hovered");
	assert_eq!(info.id, "a");
	assert_eq!(info.label, "Alpha");
	assert_eq!(info.connections, 1);
	assert!(scene.nodes().brightness()[0] > scene.nodes().brightness()[1]);
}

#[test]
fn stationary_pointer_relaxes_velocity_and_shaking() {
	let mut scene = Scene::new(two_node_config()).unwrap();
	scene.set_viewport(800.0, 600.0);

	// Wild motion first.
	let mut now_ms = 0.0;
	for i in 0..20 {
		let sx = if i % 2 == 0 { 10.0 } else { 790.0 };
		scene.pointer_moved(sx, 300.0, now_ms);
		scene.advance(0.016);
		now_ms += 16.0;
	}
	assert!(scene.pointer_state().avg_velocity > 0.0);
	assert!(scene.pointer_state().is_shaking);

	// Two seconds held still: the sample window drains to zero-speed entries
	// and the decay path finishes the rest.
	for _ in 0..125 {
		scene.pointer_moved(400.0, 300.0, now_ms);
		scene.advance(0.016);
		now_ms += 16.0;
	}
	let state = scene.pointer_state();
	assert_eq!(state.velocity, 0.0);
	assert!(state.avg_velocity < 0.05);
	assert!(!state.is_shaking);
}

#[test]
fn edge_construction_is_identical_across_runs() {
	let a = Scene::new(two_node_config()).unwrap();
	let b = Scene::new(two_node_config()).unwrap();
	let pairs_a: Vec<_> = a.edges().edges().iter().map(|e| (e.from, e.to)).collect();
	let pairs_b: Vec<_> = b.edges().edges().iter().map(|e| (e.from, e.to)).collect();
	assert_eq!(pairs_a, pairs_b);
}

#[test]
fn all_attributes_hold_their_clamp_invariants_through_a_session() {
	let mut scene = Scene::new(two_node_config()).unwrap();
	scene.set_viewport(800.0, 600.0);

	let mut now_ms = 0.0;
	for frame in 0..600 {
		// Sweep the pointer around through the whole session, boot included.
		let sx = 400.0 + (frame as f32 * 0.3).sin() * 390.0;
		let sy = 300.0 + (frame as f32 * 0.17).cos() * 290.0;
		scene.pointer_moved(sx, sy, now_ms);
		scene.advance(0.016);
		now_ms += 16.0;

		for &b in scene.nodes().brightness() {
			assert!((0.0..=1.0).contains(&b));
		}
		for &s in scene.nodes().size_scale() {
			assert!(s >= 0.0);
		}
		for edge in scene.edges().edges() {
			assert!((0.0..=1.0).contains(&edge.opacity));
			assert!((0.0..=1.0).contains(&edge.pulse.progress));
		}
	}
}

#[test]
fn identical_seeds_replay_identical_pulse_schedules() {
	let mut a = Scene::new(two_node_config()).unwrap();
	let mut b = Scene::new(two_node_config()).unwrap();
	a.set_viewport(800.0, 600.0);
	b.set_viewport(800.0, 600.0);

	let mut now_ms = 0.0;
	for frame in 0..400 {
		let sx = 400.0 + (frame as f32 * 0.2).sin() * 200.0;
		a.pointer_moved(sx, 300.0, now_ms);
		b.pointer_moved(sx, 300.0, now_ms);
		a.advance(0.016);
		b.advance(0.016);
		now_ms += 16.0;

		for (ea, eb) in a.edges().edges().iter().zip(b.edges().edges()) {
			assert_eq!(ea.pulse.active, eb.pulse.active);
			assert_eq!(ea.pulse.progress, eb.pulse.progress);
			assert_eq!(ea.opacity, eb.opacity);
		}
	}
}

#[test]
fn selecting_a_category_dims_everything_outside_it() {
	let mut config = two_node_config();
	config.categories = vec![
		CategoryDef {
			id: "one".into(),
			name: "One".into(),
			color: [0.6, 0.6, 0.6],
		},
		CategoryDef {
			id: "two".into(),
			name: "Two".into(),
			color: [0.6, 0.6, 0.6],
		},
	];
	config.nodes[0].category = Some(0);
	config.nodes[1].category = Some(1);
	let mut scene = Scene::new(config).unwrap();
	scene.set_viewport(800.0, 600.0);
	scene.select_category(Some(0));

	for _ in 0..400 {
		scene.advance(0.016);
	}
	let kept = scene.nodes().brightness()[0];
	let dimmed = scene.nodes().brightness()[1];
	assert!(dimmed < kept * 0.5, "dimmed {dimmed} vs kept {kept}");

	// The edge crosses the selection boundary, so it stays lit.
	assert!(scene.edges().edges()[0].opacity > 0.05);

	// An out-of-range index is ignored rather than applied.
	scene.select_category(Some(9));
	assert_eq!(scene.selected_category(), Some(0));
}

#[test]
fn malformed_configuration_is_rejected_at_construction() {
	let mut config = two_node_config();
	config.edges = EdgeRule::Explicit(vec![("a".into(), "ghost".into())]);
	let err = match Scene::new(config) {
		Ok(_) => panic!("a dangling edge endpoint should be rejected"),
		Err(err) => err,
	};
	assert!(err.to_string().contains("ghost"));
}
