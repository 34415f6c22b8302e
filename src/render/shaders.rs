//! GLSL sources, treated as opaque payloads: the engine's responsibility
//! ends at which scalar attributes reach the GPU each frame.

pub const POINT_VERTEX: &str = r#"#version 300 es
precision highp float;

in vec3 position;
in vec3 displacement;
in vec3 tint;
in float size;
in float brightness;
in float size_scale;

uniform vec2 u_half_extent;
uniform float u_rotation;
uniform float u_offset_y;
uniform float u_point_scale;

out float v_brightness;
out vec3 v_tint;

void main() {
	vec3 pos = position + displacement;
	float c = cos(u_rotation);
	float s = sin(u_rotation);
	pos = vec3(c * pos.x + s * pos.z, pos.y + u_offset_y, -s * pos.x + c * pos.z);
	float depth = clamp(1.0 - pos.z * 0.02, 0.5, 1.5);
	gl_Position = vec4(pos.x / u_half_extent.x, pos.y / u_half_extent.y, 0.0, 1.0);
	gl_PointSize = max(size * size_scale * u_point_scale * depth, 0.0);
	v_brightness = brightness;
	v_tint = tint;
}
"#;

pub const POINT_FRAGMENT: &str = r#"#version 300 es
precision highp float;

in float v_brightness;
in vec3 v_tint;
out vec4 frag;

void main() {
	float dist = length(gl_PointCoord - vec2(0.5));
	if (dist > 0.5) discard;
	float alpha = (1.0 - smoothstep(0.0, 0.5, dist)) * v_brightness;
	frag = vec4(v_tint, alpha * 0.8);
}
"#;

pub const LINE_VERTEX: &str = r#"#version 300 es
precision highp float;

in vec3 position;
in float opacity;

uniform vec2 u_half_extent;
uniform float u_rotation;
uniform float u_offset_y;

out float v_opacity;

void main() {
	vec3 pos = position;
	float c = cos(u_rotation);
	float s = sin(u_rotation);
	pos = vec3(c * pos.x + s * pos.z, pos.y + u_offset_y, -s * pos.x + c * pos.z);
	gl_Position = vec4(pos.x / u_half_extent.x, pos.y / u_half_extent.y, 0.0, 1.0);
	v_opacity = opacity;
}
"#;

pub const LINE_FRAGMENT: &str = r#"#version 300 es
precision highp float;

in float v_opacity;
uniform vec3 u_color;
out vec4 frag;

void main() {
	frag = vec4(u_color, v_opacity);
}
"#;

pub const PULSE_VERTEX: &str = r#"#version 300 es
precision highp float;

in vec3 position;
in float size;
in float opacity;

uniform vec2 u_half_extent;
uniform float u_rotation;
uniform float u_offset_y;
uniform float u_point_scale;

out float v_opacity;

void main() {
	vec3 pos = position;
	float c = cos(u_rotation);
	float s = sin(u_rotation);
	pos = vec3(c * pos.x + s * pos.z, pos.y + u_offset_y, -s * pos.x + c * pos.z);
	gl_Position = vec4(pos.x / u_half_extent.x, pos.y / u_half_extent.y, 0.0, 1.0);
	gl_PointSize = size * u_point_scale * 0.5;
	v_opacity = opacity;
}
"#;

pub const PULSE_FRAGMENT: &str = r#"#version 300 es
precision highp float;

in float v_opacity;
uniform vec3 u_color;
out vec4 frag;

void main() {
	float dist = length(gl_PointCoord - vec2(0.5));
	if (dist > 0.5) discard;
	float alpha = (1.0 - smoothstep(0.0, 0.5, dist)) * v_opacity;
	frag = vec4(u_color, alpha);
}
"#;
