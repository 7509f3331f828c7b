use std::fs;
use std::path::Path;

use crate::renderer::backend::{BackendError, UniformLocation};
use crate::renderer::fetch::AttributeSemantic;
use crate::renderer::gl;
use crate::renderer::scene::SceneUniforms;

const DEFAULT_VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 aPosition;
layout(location = 1) in vec3 aNormal;
layout(location = 2) in vec2 aTexCoords;
uniform mat4 uModelViewProjMatrix;
uniform mat4 uModelViewMatrix;
uniform mat4 uNormalMatrix;
out vec3 vViewSpacePosition;
out vec3 vViewSpaceNormal;
out vec2 vTexCoords;
void main() {
    vViewSpacePosition = vec3(uModelViewMatrix * vec4(aPosition, 1.0));
    vViewSpaceNormal = normalize(vec3(uNormalMatrix * vec4(aNormal, 0.0)));
    vTexCoords = aTexCoords;
    gl_Position = uModelViewProjMatrix * vec4(aPosition, 1.0);
}
"#;
const DEFAULT_FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
in vec3 vViewSpacePosition;
in vec3 vViewSpaceNormal;
in vec2 vTexCoords;
out vec4 FRAG_COLOR;
void main() {
    vec3 output_linear_color = vec3(0.5) + normalize(vViewSpaceNormal) * 0.3;

    // The framebuffer is not SRGB, so we transform the linear color to close-enough-to-srgb.
    FRAG_COLOR = vec4(pow(output_linear_color, vec3(1.0 / 2.2)), 1.0);
}
"#;

/// GLSL sources for the scene program. Custom shaders must read the
/// attributes from the slots in [`AttributeSemantic::slot`] and declare the
/// uniforms named in [`UNIFORM_NAMES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

/// Model-view-projection, model-view and normal matrix uniform names.
pub const UNIFORM_NAMES: [&str; 3] = ["uModelViewProjMatrix", "uModelViewMatrix", "uNormalMatrix"];

impl Default for ShaderSources {
    fn default() -> Self {
        ShaderSources {
            vertex: DEFAULT_VERTEX_SHADER.to_string(),
            fragment: DEFAULT_FRAGMENT_SHADER.to_string(),
        }
    }
}

impl ShaderSources {
    /// The default shaders, with either one replaced by a file's contents.
    pub fn load(vertex: Option<&Path>, fragment: Option<&Path>) -> std::io::Result<ShaderSources> {
        let mut sources = ShaderSources::default();
        if let Some(path) = vertex {
            sources.vertex = fs::read_to_string(path)?;
        }
        if let Some(path) = fragment {
            sources.fragment = fs::read_to_string(path)?;
        }
        Ok(sources)
    }
}

pub struct ShaderProgram {
    pub program: gl::types::GLuint,
    pub uniforms: SceneUniforms,
}

/// Compiles and links the program used to render glTF scenes, and looks up
/// its matrix uniforms.
pub fn create_program(sources: &ShaderSources) -> Result<ShaderProgram, BackendError> {
    let vertex_shader = gl::create_shader(gl::VERTEX_SHADER, &sources.vertex)?;
    let fragment_shader = match gl::create_shader(gl::FRAGMENT_SHADER, &sources.fragment) {
        Ok(shader) => shader,
        Err(err) => {
            gl::call!(gl::DeleteShader(vertex_shader));
            return Err(err);
        }
    };
    let program = gl::create_program(&[vertex_shader, fragment_shader]);
    gl::call!(gl::DeleteShader(vertex_shader));
    gl::call!(gl::DeleteShader(fragment_shader));
    let program = program?;

    let [model_view_projection, model_view, normal] = UNIFORM_NAMES.map(|name| {
        let location = gl::get_uniform_location(program, name);
        if location.is_none() {
            log::warn!("the scene program has no uniform \"{name}\", uploads to it are ignored");
        }
        UniformLocation(location.unwrap_or(-1))
    });
    log::debug!(
        "scene program {program} linked, attribute slots: {:?}",
        AttributeSemantic::ALL.map(|semantic| (semantic.name(), semantic.slot())),
    );
    Ok(ShaderProgram {
        program,
        uniforms: SceneUniforms {
            model_view_projection,
            model_view,
            normal,
        },
    })
}
