use glam::Vec2;

/// Parameter of the closest point on segment `[a, b]` to `p`, clamped to `[0, 1]`.
pub fn segment_closest_t(p: Vec2, a: Vec2, b: Vec2) -> f32 {
	let ab = b - a;
	// Degenerate segments project everything onto `a`
	let len_sq = ab.length_squared().max(1e-6);
	((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
}

/// Distance from `p` to the segment `[a, b]`.
pub fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
	let t = segment_closest_t(p, a, b);
	p.distance(a + (b - a) * t)
}

/// Map a world-space y coordinate into `[0, 1]` across the field's vertical extent.
pub fn normalized_height(y: f32, half_extent_y: f32) -> f32 {
	let span = (2.0 * half_extent_y).max(1.0);
	((y + half_extent_y) / span).clamp(0.0, 1.0)
}

/// The single integration rule for visual attributes: move `value` toward
/// `target` by `factor`. Targets are never assigned directly, so attributes
/// cannot pop between frames.
pub fn approach(value: f32, target: f32, factor: f32) -> f32 {
	value + (target - value) * factor
}
