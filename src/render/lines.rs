use web_sys::{WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlUniformLocation};

use super::context::{GlContext, RenderError};
use super::{BlendMode, FrameUniforms, shaders};

/// One draw call for all edge segments: endpoint positions are static, only
/// the per-vertex opacity is re-uploaded each frame.
pub struct LineRenderer {
	program: WebGlProgram,
	position: WebGlBuffer,
	opacity: WebGlBuffer,
	loc_position: i32,
	loc_opacity: i32,
	u_half_extent: Option<WebGlUniformLocation>,
	u_rotation: Option<WebGlUniformLocation>,
	u_offset_y: Option<WebGlUniformLocation>,
	u_color: Option<WebGlUniformLocation>,
	color: [f32; 3],
	blend: BlendMode,
	vertex_count: i32,
}

impl LineRenderer {
	/// `endpoints` holds xyz for both vertices of every segment.
	pub fn new(
		ctx: &GlContext,
		endpoints: &[f32],
		color: [f32; 3],
		blend: BlendMode,
	) -> Result<Self, RenderError> {
		let program = ctx.link_program(shaders::LINE_VERTEX, shaders::LINE_FRAGMENT)?;
		let gl = &ctx.gl;
		let position = ctx.create_buffer()?;
		ctx.upload(&position, endpoints, WebGl2RenderingContext::STATIC_DRAW);
		Ok(Self {
			loc_position: gl.get_attrib_location(&program, "position"),
			loc_opacity: gl.get_attrib_location(&program, "opacity"),
			u_half_extent: gl.get_uniform_location(&program, "u_half_extent"),
			u_rotation: gl.get_uniform_location(&program, "u_rotation"),
			u_offset_y: gl.get_uniform_location(&program, "u_offset_y"),
			u_color: gl.get_uniform_location(&program, "u_color"),
			opacity: ctx.create_buffer()?,
			vertex_count: (endpoints.len() / 3) as i32,
			color,
			blend,
			program,
			position,
		})
	}

	pub fn upload(&self, ctx: &GlContext, vertex_opacity: &[f32]) {
		ctx.upload(&self.opacity, vertex_opacity, WebGl2RenderingContext::DYNAMIC_DRAW);
	}

	pub fn draw(&self, ctx: &GlContext, uniforms: &FrameUniforms) {
		let gl = &ctx.gl;
		gl.use_program(Some(&self.program));
		ctx.bind_attrib(self.loc_position, &self.position, 3);
		ctx.bind_attrib(self.loc_opacity, &self.opacity, 1);
		gl.uniform2f(
			self.u_half_extent.as_ref(),
			uniforms.half_extent[0],
			uniforms.half_extent[1],
		);
		gl.uniform1f(self.u_rotation.as_ref(), uniforms.rotation);
		gl.uniform1f(self.u_offset_y.as_ref(), uniforms.offset_y);
		gl.uniform3f(self.u_color.as_ref(), self.color[0], self.color[1], self.color[2]);
		self.blend.apply(gl);
		gl.draw_arrays(WebGl2RenderingContext::LINES, 0, self.vertex_count);
	}

	pub fn dispose(&self, ctx: &GlContext) {
		let gl = &ctx.gl;
		gl.delete_buffer(Some(&self.position));
		gl.delete_buffer(Some(&self.opacity));
		gl.delete_program(Some(&self.program));
	}
}
