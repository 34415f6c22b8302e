//! Scripted boot sequence: a dormant scene, a one-shot activation wave that
//! sweeps the field bottom-to-top, then steady-state. Driven purely by
//! elapsed time since scene construction; transitions never regress.

/// Timing and shape of the reveal sequence.
#[derive(Clone, Debug)]
pub struct RevealTiming {
	/// Seconds before the sweep begins.
	pub dormant_secs: f64,
	/// Seconds from construction until steady-state.
	pub steady_at_secs: f64,
	/// The main front travels `front_span` across normalized height over the
	/// sweep, starting `front_offset` below the field.
	pub front_span: f32,
	pub front_offset: f32,
	/// Width of the bright transient band ahead of the front.
	pub front_band: f32,
	/// Brightness of nodes behind the front / at the front.
	pub node_lit: f32,
	pub node_front: f32,
	/// Opacity of edges behind the front / at the front.
	pub edge_lit: f32,
	pub edge_front: f32,
	/// Echo wave: a narrower repeating sweep that starts once the main front
	/// has mostly passed and keeps the scene alive until steady-state.
	pub echo_delay_secs: f64,
	pub echo_speed: f32,
	pub echo_band: f32,
	pub echo_node_peak: f32,
	pub echo_edge_peak: f32,
}

impl Default for RevealTiming {
	fn default() -> Self {
		Self {
			dormant_secs: 0.25,
			steady_at_secs: 4.0,
			front_span: 1.5,
			front_offset: 0.25,
			front_band: 0.3,
			node_lit: 0.6,
			node_front: 0.8,
			edge_lit: 0.2,
			edge_front: 0.5,
			echo_delay_secs: 2.0,
			echo_speed: 0.45,
			echo_band: 0.18,
			echo_node_peak: 0.9,
			echo_edge_peak: 0.6,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RevealPhase {
	Dormant,
	Sweeping,
	Steady,
}

#[derive(Clone, Debug)]
pub struct RevealTimeline {
	timing: RevealTiming,
	phase: RevealPhase,
	elapsed: f64,
	wave_position: f32,
	echo_position: Option<f32>,
}

impl RevealTimeline {
	pub fn new(timing: RevealTiming) -> Self {
		let wave_position = -timing.front_offset;
		Self {
			timing,
			phase: RevealPhase::Dormant,
			elapsed: 0.0,
			wave_position,
			echo_position: None,
		}
	}

	/// Re-derive phase and wave positions from elapsed time. Elapsed time is
	/// clamped to be non-decreasing, so the phase can only move forward.
	pub fn advance(&mut self, elapsed: f64) {
		self.elapsed = elapsed.max(self.elapsed);
		let t = &self.timing;

		self.phase = if self.elapsed < t.dormant_secs {
			RevealPhase::Dormant
		} else if self.elapsed < t.steady_at_secs {
			RevealPhase::Sweeping
		} else {
			RevealPhase::Steady
		};

		let sweep_secs = (t.steady_at_secs - t.dormant_secs).max(1e-6);
		let progress = (((self.elapsed - t.dormant_secs) / sweep_secs).clamp(0.0, 1.0)) as f32;
		self.wave_position = progress * t.front_span - t.front_offset;

		self.echo_position = if self.phase == RevealPhase::Sweeping
			&& self.elapsed > t.echo_delay_secs
		{
			let echo_t = (self.elapsed - t.echo_delay_secs) as f32 * t.echo_speed;
			Some(echo_t % t.front_span - t.front_offset)
		} else {
			None
		};
	}

	pub fn phase(&self) -> RevealPhase {
		self.phase
	}

	/// Phase-local progress in `[0, 1]`.
	pub fn progress(&self) -> f32 {
		let t = &self.timing;
		match self.phase {
			RevealPhase::Dormant => (self.elapsed / t.dormant_secs.max(1e-6)).min(1.0) as f32,
			RevealPhase::Sweeping => {
				let sweep = (t.steady_at_secs - t.dormant_secs).max(1e-6);
				(((self.elapsed - t.dormant_secs) / sweep).clamp(0.0, 1.0)) as f32
			}
			RevealPhase::Steady => 1.0,
		}
	}

	/// Normalized position of the main wave front; non-decreasing in time.
	pub fn wave_position(&self) -> f32 {
		self.wave_position
	}

	/// Reveal brightness contribution for a node at normalized height `ny`.
	/// Zero outside the Sweeping phase.
	pub fn node_activation(&self, ny: f32) -> f32 {
		if self.phase != RevealPhase::Sweeping {
			return 0.0;
		}
		let t = &self.timing;
		let from_front = ny - self.wave_position;
		let mut value = if from_front < 0.0 {
			t.node_lit
		} else if from_front < t.front_band {
			t.node_front * (1.0 - from_front / t.front_band)
		} else {
			0.0
		};
		if let Some(echo) = self.echo_position {
			let d = (ny - echo).abs();
			if d < t.echo_band {
				value = value.max(t.echo_node_peak * (1.0 - d / t.echo_band));
			}
		}
		value
	}

	/// Reveal opacity contribution for an edge whose midpoint sits at
	/// normalized height `ny`. Zero outside the Sweeping phase.
	pub fn edge_activation(&self, ny: f32) -> f32 {
		if self.phase != RevealPhase::Sweeping {
			return 0.0;
		}
		let t = &self.timing;
		let from_front = ny - self.wave_position;
		let mut value = if from_front < 0.0 {
			t.edge_lit
		} else if from_front < t.front_band {
			t.edge_front * (1.0 - from_front / t.front_band)
		} else {
			0.0
		};
		if let Some(echo) = self.echo_position {
			let d = (ny - echo).abs();
			if d < t.echo_band {
				value = value.max(t.echo_edge_peak * (1.0 - d / t.echo_band));
			}
		}
		value
	}

	/// True while the echo front is crossing normalized height `ny`; edges use
	/// this as an opportunity to launch a traveling pulse.
	pub fn wave_hits(&self, ny: f32) -> bool {
		match self.echo_position {
			Some(echo) => (ny - echo).abs() < self.timing.echo_band,
			None => false,
		}
	}
}
