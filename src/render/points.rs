use glam::Vec3;
use web_sys::{WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlUniformLocation};

use super::context::{GlContext, RenderError};
use super::{BlendMode, FrameUniforms, shaders};

/// One draw call for every node sprite: static position/size/tint buffers
/// plus per-frame brightness, size-scale, and displacement uploads.
pub struct PointRenderer {
	program: WebGlProgram,
	position: WebGlBuffer,
	size: WebGlBuffer,
	tint: WebGlBuffer,
	brightness: WebGlBuffer,
	size_scale: WebGlBuffer,
	displacement: WebGlBuffer,
	loc_position: i32,
	loc_size: i32,
	loc_tint: i32,
	loc_brightness: i32,
	loc_size_scale: i32,
	loc_displacement: i32,
	u_half_extent: Option<WebGlUniformLocation>,
	u_rotation: Option<WebGlUniformLocation>,
	u_offset_y: Option<WebGlUniformLocation>,
	u_point_scale: Option<WebGlUniformLocation>,
	count: i32,
	blend: BlendMode,
	staging: Vec<f32>,
}

impl PointRenderer {
	pub fn new(
		ctx: &GlContext,
		positions: &[Vec3],
		sizes: &[f32],
		tints: &[[f32; 3]],
		blend: BlendMode,
	) -> Result<Self, RenderError> {
		let program = ctx.link_program(shaders::POINT_VERTEX, shaders::POINT_FRAGMENT)?;
		let gl = &ctx.gl;

		let flat_positions: Vec<f32> = positions
			.iter()
			.flat_map(|p| [p.x, p.y, p.z])
			.collect();
		let flat_tints: Vec<f32> = tints.iter().flatten().copied().collect();

		let position = ctx.create_buffer()?;
		ctx.upload(&position, &flat_positions, WebGl2RenderingContext::STATIC_DRAW);
		let size = ctx.create_buffer()?;
		ctx.upload(&size, sizes, WebGl2RenderingContext::STATIC_DRAW);
		let tint = ctx.create_buffer()?;
		ctx.upload(&tint, &flat_tints, WebGl2RenderingContext::STATIC_DRAW);

		let brightness = ctx.create_buffer()?;
		let size_scale = ctx.create_buffer()?;
		let displacement = ctx.create_buffer()?;

		Ok(Self {
			loc_position: gl.get_attrib_location(&program, "position"),
			loc_size: gl.get_attrib_location(&program, "size"),
			loc_tint: gl.get_attrib_location(&program, "tint"),
			loc_brightness: gl.get_attrib_location(&program, "brightness"),
			loc_size_scale: gl.get_attrib_location(&program, "size_scale"),
			loc_displacement: gl.get_attrib_location(&program, "displacement"),
			u_half_extent: gl.get_uniform_location(&program, "u_half_extent"),
			u_rotation: gl.get_uniform_location(&program, "u_rotation"),
			u_offset_y: gl.get_uniform_location(&program, "u_offset_y"),
			u_point_scale: gl.get_uniform_location(&program, "u_point_scale"),
			count: positions.len() as i32,
			staging: Vec::with_capacity(positions.len() * 3),
			program,
			position,
			size,
			tint,
			brightness,
			size_scale,
			displacement,
			blend,
		})
	}

	/// Push this frame's derived state into the dynamic buffers.
	pub fn upload(
		&mut self,
		ctx: &GlContext,
		brightness: &[f32],
		size_scale: &[f32],
		displacement: &[Vec3],
	) {
		ctx.upload(&self.brightness, brightness, WebGl2RenderingContext::DYNAMIC_DRAW);
		ctx.upload(&self.size_scale, size_scale, WebGl2RenderingContext::DYNAMIC_DRAW);
		self.staging.clear();
		self.staging
			.extend(displacement.iter().flat_map(|d| [d.x, d.y, d.z]));
		ctx.upload(&self.displacement, &self.staging, WebGl2RenderingContext::DYNAMIC_DRAW);
	}

	pub fn draw(&self, ctx: &GlContext, uniforms: &FrameUniforms) {
		let gl = &ctx.gl;
		gl.use_program(Some(&self.program));
		ctx.bind_attrib(self.loc_position, &self.position, 3);
		ctx.bind_attrib(self.loc_size, &self.size, 1);
		ctx.bind_attrib(self.loc_tint, &self.tint, 3);
		ctx.bind_attrib(self.loc_brightness, &self.brightness, 1);
		ctx.bind_attrib(self.loc_size_scale, &self.size_scale, 1);
		ctx.bind_attrib(self.loc_displacement, &self.displacement, 3);
		gl.uniform2f(
			self.u_half_extent.as_ref(),
			uniforms.half_extent[0],
			uniforms.half_extent[1],
		);
		gl.uniform1f(self.u_rotation.as_ref(), uniforms.rotation);
		gl.uniform1f(self.u_offset_y.as_ref(), uniforms.offset_y);
		gl.uniform1f(self.u_point_scale.as_ref(), uniforms.point_scale);
		self.blend.apply(gl);
		gl.draw_arrays(WebGl2RenderingContext::POINTS, 0, self.count);
	}

	/// Delete every owned GL object. Called once at unmount.
	pub fn dispose(&self, ctx: &GlContext) {
		let gl = &ctx.gl;
		for buffer in [
			&self.position,
			&self.size,
			&self.tint,
			&self.brightness,
			&self.size_scale,
			&self.displacement,
		] {
			gl.delete_buffer(Some(buffer));
		}
		gl.delete_program(Some(&self.program));
	}
}

/// Pulse markers: a point set whose positions are recomputed every frame
/// from edge interpolation, so all three attributes are dynamic.
pub struct PulseRenderer {
	program: WebGlProgram,
	position: WebGlBuffer,
	size: WebGlBuffer,
	opacity: WebGlBuffer,
	loc_position: i32,
	loc_size: i32,
	loc_opacity: i32,
	u_half_extent: Option<WebGlUniformLocation>,
	u_rotation: Option<WebGlUniformLocation>,
	u_offset_y: Option<WebGlUniformLocation>,
	u_point_scale: Option<WebGlUniformLocation>,
	u_color: Option<WebGlUniformLocation>,
	color: [f32; 3],
	count: i32,
}

impl PulseRenderer {
	pub fn new(ctx: &GlContext, count: usize, color: [f32; 3]) -> Result<Self, RenderError> {
		let program = ctx.link_program(shaders::PULSE_VERTEX, shaders::PULSE_FRAGMENT)?;
		let gl = &ctx.gl;
		Ok(Self {
			loc_position: gl.get_attrib_location(&program, "position"),
			loc_size: gl.get_attrib_location(&program, "size"),
			loc_opacity: gl.get_attrib_location(&program, "opacity"),
			u_half_extent: gl.get_uniform_location(&program, "u_half_extent"),
			u_rotation: gl.get_uniform_location(&program, "u_rotation"),
			u_offset_y: gl.get_uniform_location(&program, "u_offset_y"),
			u_point_scale: gl.get_uniform_location(&program, "u_point_scale"),
			u_color: gl.get_uniform_location(&program, "u_color"),
			position: ctx.create_buffer()?,
			size: ctx.create_buffer()?,
			opacity: ctx.create_buffer()?,
			color,
			count: count as i32,
			program,
		})
	}

	pub fn upload(&self, ctx: &GlContext, positions: &[f32], sizes: &[f32], opacities: &[f32]) {
		ctx.upload(&self.position, positions, WebGl2RenderingContext::DYNAMIC_DRAW);
		ctx.upload(&self.size, sizes, WebGl2RenderingContext::DYNAMIC_DRAW);
		ctx.upload(&self.opacity, opacities, WebGl2RenderingContext::DYNAMIC_DRAW);
	}

	pub fn draw(&self, ctx: &GlContext, uniforms: &FrameUniforms) {
		let gl = &ctx.gl;
		gl.use_program(Some(&self.program));
		ctx.bind_attrib(self.loc_position, &self.position, 3);
		ctx.bind_attrib(self.loc_size, &self.size, 1);
		ctx.bind_attrib(self.loc_opacity, &self.opacity, 1);
		gl.uniform2f(
			self.u_half_extent.as_ref(),
			uniforms.half_extent[0],
			uniforms.half_extent[1],
		);
		gl.uniform1f(self.u_rotation.as_ref(), uniforms.rotation);
		gl.uniform1f(self.u_offset_y.as_ref(), uniforms.offset_y);
		gl.uniform1f(self.u_point_scale.as_ref(), uniforms.point_scale);
		gl.uniform3f(self.u_color.as_ref(), self.color[0], self.color[1], self.color[2]);
		BlendMode::Additive.apply(gl);
		gl.draw_arrays(WebGl2RenderingContext::POINTS, 0, self.count);
	}

	pub fn dispose(&self, ctx: &GlContext) {
		let gl = &ctx.gl;
		for buffer in [&self.position, &self.size, &self.opacity] {
			gl.delete_buffer(Some(buffer));
		}
		gl.delete_program(Some(&self.program));
	}
}
