/// Monotone frame clock: accumulated elapsed time plus the most recent
/// per-frame delta, shared by every engine component.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
	elapsed: f64,
	delta: f32,
}

impl FrameClock {
	pub fn new() -> Self {
		Self::default()
	}

	/// Advance by `dt` seconds. Negative deltas (timer skew after a tab
	/// suspend) are treated as zero so elapsed time never regresses.
	pub fn advance(&mut self, dt: f32) {
		self.delta = dt.max(0.0);
		self.elapsed += self.delta as f64;
	}

	pub fn elapsed(&self) -> f64 {
		self.elapsed
	}

	pub fn delta(&self) -> f32 {
		self.delta
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn elapsed_is_monotone() {
		let mut clock = FrameClock::new();
		let mut last = 0.0;
		for dt in [0.016, 0.032, -0.5, 0.016, 0.0] {
			clock.advance(dt);
			assert!(clock.elapsed() >= last);
			last = clock.elapsed();
		}
		// f32 deltas widen to f64 with a little representation error.
		assert!((clock.elapsed() - 0.064).abs() < 1e-6);
	}
}
