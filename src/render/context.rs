use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{
	HtmlCanvasElement, WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlShader,
};

/// Failure to stand up the rendering pipeline. Fatal to the owning
/// component; the host substitutes a static fallback.
#[derive(Debug, Error)]
pub enum RenderError {
	#[error("webgl2 context unavailable")]
	ContextUnavailable,
	#[error("shader compile failed: {0}")]
	ShaderCompile(String),
	#[error("program link failed: {0}")]
	ProgramLink(String),
	#[error("buffer allocation failed")]
	BufferAllocation,
}

/// Thin wrapper owning the WebGL2 context; blending is configured once,
/// depth testing stays off for the whole scene.
pub struct GlContext {
	pub gl: WebGl2RenderingContext,
}

impl GlContext {
	pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, RenderError> {
		let gl = canvas
			.get_context("webgl2")
			.map_err(|_| RenderError::ContextUnavailable)?
			.ok_or(RenderError::ContextUnavailable)?
			.dyn_into::<WebGl2RenderingContext>()
			.map_err(|_| RenderError::ContextUnavailable)?;
		gl.enable(WebGl2RenderingContext::BLEND);
		gl.disable(WebGl2RenderingContext::DEPTH_TEST);
		Ok(Self { gl })
	}

	pub fn link_program(&self, vertex: &str, fragment: &str) -> Result<WebGlProgram, RenderError> {
		let vs = self.compile(WebGl2RenderingContext::VERTEX_SHADER, vertex)?;
		let fs = self.compile(WebGl2RenderingContext::FRAGMENT_SHADER, fragment)?;
		let program = self
			.gl
			.create_program()
			.ok_or(RenderError::ProgramLink("create_program returned null".into()))?;
		self.gl.attach_shader(&program, &vs);
		self.gl.attach_shader(&program, &fs);
		self.gl.link_program(&program);
		let linked = self
			.gl
			.get_program_parameter(&program, WebGl2RenderingContext::LINK_STATUS)
			.as_bool()
			.unwrap_or(false);
		if !linked {
			let log = self
				.gl
				.get_program_info_log(&program)
				.unwrap_or_else(|| "no link log".into());
			return Err(RenderError::ProgramLink(log));
		}
		// The linked program holds its own reference; the shader objects are
		// no longer needed.
		self.gl.detach_shader(&program, &vs);
		self.gl.detach_shader(&program, &fs);
		self.gl.delete_shader(Some(&vs));
		self.gl.delete_shader(Some(&fs));
		Ok(program)
	}

	fn compile(&self, kind: u32, source: &str) -> Result<WebGlShader, RenderError> {
		let shader = self
			.gl
			.create_shader(kind)
			.ok_or(RenderError::ShaderCompile("create_shader returned null".into()))?;
		self.gl.shader_source(&shader, source);
		self.gl.compile_shader(&shader);
		let compiled = self
			.gl
			.get_shader_parameter(&shader, WebGl2RenderingContext::COMPILE_STATUS)
			.as_bool()
			.unwrap_or(false);
		if !compiled {
			let log = self
				.gl
				.get_shader_info_log(&shader)
				.unwrap_or_else(|| "no compile log".into());
			return Err(RenderError::ShaderCompile(log));
		}
		Ok(shader)
	}

	pub fn create_buffer(&self) -> Result<WebGlBuffer, RenderError> {
		self.gl.create_buffer().ok_or(RenderError::BufferAllocation)
	}

	/// Upload a full attribute array. Used once for static attributes and
	/// every frame for the dynamic ones.
	pub fn upload(&self, buffer: &WebGlBuffer, data: &[f32], usage: u32) {
		self.gl
			.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(buffer));
		// Safety: the view does not outlive this call and no allocation
		// happens while it is alive.
		unsafe {
			let view = js_sys::Float32Array::view(data);
			self.gl.buffer_data_with_array_buffer_view(
				WebGl2RenderingContext::ARRAY_BUFFER,
				&view,
				usage,
			);
		}
	}

	/// Bind `buffer` to a float attribute with `components` floats per vertex.
	pub fn bind_attrib(&self, location: i32, buffer: &WebGlBuffer, components: i32) {
		if location < 0 {
			return;
		}
		self.gl
			.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(buffer));
		self.gl.vertex_attrib_pointer_with_i32(
			location as u32,
			components,
			WebGl2RenderingContext::FLOAT,
			false,
			0,
			0,
		);
		self.gl.enable_vertex_attrib_array(location as u32);
	}
}
