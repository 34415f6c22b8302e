use std::collections::VecDeque;

use glam::Vec2;

use super::config::Tuning;

/// Maps device (pixel) coordinates into scene space. Injected explicitly so
/// the tracker never reads window geometry itself.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
	pub width: f32,
	pub height: f32,
	/// Scene half-extents the viewport maps onto.
	pub half_extent: Vec2,
}

impl Viewport {
	pub fn new(width: f32, height: f32, half_extent: Vec2) -> Self {
		Self {
			width: width.max(1.0),
			height: height.max(1.0),
			half_extent,
		}
	}

	/// Un-project a device coordinate into scene space. Positions outside the
	/// viewport clamp to its edge rather than being rejected.
	pub fn unproject(&self, sx: f32, sy: f32) -> Vec2 {
		let nx = (sx / self.width).clamp(0.0, 1.0) * 2.0 - 1.0;
		let ny = 1.0 - (sy / self.height).clamp(0.0, 1.0) * 2.0;
		Vec2::new(nx * self.half_extent.x, ny * self.half_extent.y)
	}
}

/// The per-frame snapshot both fields read. One writer (the frame loop),
/// copied out once per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
	pub position: Vec2,
	/// Instantaneous speed in scene units per ~16.7 ms tick.
	pub velocity: f32,
	/// Mean speed over the trailing sample window.
	pub avg_velocity: f32,
	/// Scene-space motion of the most recent sample.
	pub direction: Vec2,
	pub is_shaking: bool,
}

/// Samples raw pointer motion and derives velocity, a trailing average, and
/// the erratic-motion flag. Between samples the derived values decay toward
/// rest so reactive visuals relax smoothly.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
	state: PointerState,
	samples: VecDeque<(f32, f64)>,
	last_sample: Option<(Vec2, f64)>,
}

impl PointerTracker {
	pub fn new() -> Self {
		Self::default()
	}

	/// Ingest one raw pointer-move sample taken at `now_ms`.
	pub fn record(&mut self, sx: f32, sy: f32, now_ms: f64, viewport: &Viewport, tuning: &Tuning) {
		let position = viewport.unproject(sx, sy);
		let (speed, direction) = match self.last_sample {
			Some((prev, prev_ms)) => {
				// Normalize to a frame-rate independent unit: distance per
				// 16.7 ms tick, with a floored denominator.
				let ticks = ((now_ms - prev_ms).max(1.0) / 16.67) as f32;
				(prev.distance(position) / ticks, position - prev)
			}
			None => (0.0, Vec2::ZERO),
		};

		self.samples.push_back((speed, now_ms));
		while let Some(&(_, t)) = self.samples.front() {
			if now_ms - t > tuning.velocity_window_ms {
				self.samples.pop_front();
			} else {
				break;
			}
		}
		let avg = self.samples.iter().map(|(s, _)| *s).sum::<f32>()
			/ self.samples.len().max(1) as f32;

		self.state.position = position;
		self.state.velocity = speed;
		self.state.avg_velocity = avg;
		self.state.direction = direction;
		self.state.is_shaking =
			self.samples.len() > tuning.shake_min_samples && avg > tuning.shake_threshold;
		self.last_sample = Some((position, now_ms));
	}

	/// Per-frame decay applied between pointer-move events. Velocity snaps to
	/// exactly zero below a small epsilon so the decay tail terminates.
	pub fn relax(&mut self, tuning: &Tuning) {
		if self.state.velocity > 0.0 {
			self.state.velocity *= tuning.velocity_decay;
			if self.state.velocity < tuning.velocity_epsilon {
				self.state.velocity = 0.0;
			}
		}
		if self.state.avg_velocity > 0.0 {
			self.state.avg_velocity *= tuning.avg_velocity_decay;
			if self.state.avg_velocity < tuning.velocity_epsilon {
				self.state.avg_velocity = 0.0;
			}
		}
		if self.state.avg_velocity < tuning.shake_threshold {
			self.state.is_shaking = false;
		}
	}

	pub fn state(&self) -> PointerState {
		self.state
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn viewport() -> Viewport {
		Viewport::new(800.0, 600.0, Vec2::new(10.0, 10.0))
	}

	#[test]
	fn unproject_maps_center_and_clamps_outside() {
		let vp = viewport();
		assert!(vp.unproject(400.0, 300.0).length() < 1e-5);
		let top_left = vp.unproject(-50.0, -50.0);
		assert_eq!(top_left, Vec2::new(-10.0, 10.0));
	}

	#[test]
	fn stationary_pointer_has_zero_velocity() {
		let mut tracker = PointerTracker::new();
		let tuning = Tuning::default();
		tracker.record(400.0, 300.0, 0.0, &viewport(), &tuning);
		tracker.record(400.0, 300.0, 16.0, &viewport(), &tuning);
		assert_eq!(tracker.state().velocity, 0.0);
		assert!(!tracker.state().is_shaking);
	}

	#[test]
	fn fast_jitter_sets_and_clears_shaking() {
		let mut tracker = PointerTracker::new();
		let tuning = Tuning::default();
		let vp = viewport();
		for i in 0..12 {
			let x = if i % 2 == 0 { 100.0 } else { 700.0 };
			tracker.record(x, 300.0, i as f64 * 16.0, &vp, &tuning);
		}
		assert!(tracker.state().is_shaking);
		assert!(tracker.state().avg_velocity > tuning.shake_threshold);

		// Decay with no further samples relaxes everything to rest.
		for _ in 0..600 {
			tracker.relax(&tuning);
		}
		assert_eq!(tracker.state().velocity, 0.0);
		assert!(!tracker.state().is_shaking);
	}

	#[test]
	fn trailing_window_prunes_old_samples() {
		let mut tracker = PointerTracker::new();
		let tuning = Tuning::default();
		let vp = viewport();
		for i in 0..8 {
			let x = if i % 2 == 0 { 100.0 } else { 700.0 };
			tracker.record(x, 300.0, i as f64 * 16.0, &vp, &tuning);
		}
		let busy_avg = tracker.state().avg_velocity;
		// One slow sample far outside the window leaves only itself behind.
		tracker.record(400.0, 300.0, 5_000.0, &vp, &tuning);
		assert!(tracker.state().avg_velocity < busy_avg);
		assert!(!tracker.state().is_shaking);
	}

	#[test]
	fn decay_is_monotone() {
		let mut tracker = PointerTracker::new();
		let tuning = Tuning::default();
		let vp = viewport();
		tracker.record(100.0, 300.0, 0.0, &vp, &tuning);
		tracker.record(700.0, 300.0, 16.0, &vp, &tuning);
		let mut last = tracker.state().velocity;
		assert!(last > 0.0);
		// Enough frames for 0.95^n to pull ~15 units/tick under the snap
		// epsilon.
		for _ in 0..200 {
			tracker.relax(&tuning);
			assert!(tracker.state().velocity <= last);
			last = tracker.state().velocity;
		}
		assert_eq!(last, 0.0);
	}
}
