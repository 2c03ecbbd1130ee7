//! Built-in GLSL for the batch and sprite pipelines.
//!
//! Both vertex stages read the camera projection from uniform location
//! [`PROJECTION_UNIFORM_SLOT`](crate::render::PROJECTION_UNIFORM_SLOT), so
//! `Camera::update_and_load_camera` feeds whichever of them is current.
//! Callers with their own `.vs.glsl`/`.fs.glsl` files must declare the same
//! location.

/// Vertex stage for [`Vertex`](crate::vertex::Vertex) batches.
///
/// Attribute locations follow `Vertex::ATTRIBUTES`.
pub const BATCH_VERTEX_SHADER: &str = r#"#version 430 core
layout(location = 0) in vec3 position;
layout(location = 1) in vec4 color;
layout(location = 2) in vec2 texCoord;
layout(location = 3) in float useTexture;

layout(location = 0) uniform mat4 projection;

out vec4 v_color;
out vec2 v_texCoord;
out float v_useTexture;

void main() {
    v_color = color;
    v_texCoord = texCoord;
    v_useTexture = useTexture;
    gl_Position = projection * vec4(position, 1.0);
}
"#;

/// Fragment stage for batches: flat color, or the texel when the vertex
/// flag is set.
pub const BATCH_FRAGMENT_SHADER: &str = r#"#version 430 core
in vec4 v_color;
in vec2 v_texCoord;
in float v_useTexture;

uniform sampler2D tex;

out vec4 outColor;

void main() {
    if (v_useTexture > 0.5) {
        outColor = texture(tex, v_texCoord) * v_color;
    } else {
        outColor = v_color;
    }
}
"#;

/// Vertex stage for the sprite unit quad: `vertex.xy` is the position in
/// `[0, 1]²`, `vertex.zw` the texture coordinate.
pub const SPRITE_VERTEX_SHADER: &str = r#"#version 430 core
layout(location = 0) in vec4 vertex;

layout(location = 0) uniform mat4 projection;
uniform mat4 model;

out vec2 v_texCoord;

void main() {
    v_texCoord = vertex.zw;
    gl_Position = projection * model * vec4(vertex.xy, 0.0, 1.0);
}
"#;

/// Fragment stage for sprites, tinted by `spriteColor`.
pub const SPRITE_FRAGMENT_SHADER: &str = r#"#version 430 core
in vec2 v_texCoord;

uniform sampler2D image;
uniform vec3 spriteColor;

out vec4 outColor;

void main() {
    outColor = vec4(spriteColor, 1.0) * texture(image, v_texCoord);
}
"#;
