//! WebGL2 attribute-buffer renderers. Static geometry is uploaded once at
//! construction; each frame only the derived scalar attributes are
//! re-uploaded and one draw call is issued per population (points, line
//! segments, pulse markers).

mod context;
mod lines;
mod points;
mod shaders;

pub use context::{GlContext, RenderError};
pub use lines::LineRenderer;
pub use points::{PointRenderer, PulseRenderer};

use web_sys::WebGl2RenderingContext;

/// Per-variant fragment blending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
	Additive,
	Normal,
}

impl BlendMode {
	fn apply(self, gl: &WebGl2RenderingContext) {
		match self {
			BlendMode::Additive => gl.blend_func(
				WebGl2RenderingContext::SRC_ALPHA,
				WebGl2RenderingContext::ONE,
			),
			BlendMode::Normal => gl.blend_func(
				WebGl2RenderingContext::SRC_ALPHA,
				WebGl2RenderingContext::ONE_MINUS_SRC_ALPHA,
			),
		}
	}
}

/// Per-frame uniforms shared by all programs.
#[derive(Clone, Copy, Debug)]
pub struct FrameUniforms {
	pub half_extent: [f32; 2],
	/// Scroll-linked parallax yaw and vertical offset.
	pub rotation: f32,
	pub offset_y: f32,
	/// Pixels per world size unit for point sprites.
	pub point_scale: f32,
}
