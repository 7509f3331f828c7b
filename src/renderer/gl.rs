//! OpenGL ES 3.0 bindings, generated by the build script, and the helpers
//! built on top of them.

use std::ffi::{c_void, CStr, CString};
use std::ptr;

use glam::Mat4;

use crate::asset::{ComponentType, DrawMode};
use crate::renderer::backend::{
    AttributeLayout, Backend, BackendError, BufferHandle, UniformLocation, VertexArrayHandle,
};

#[allow(
    clippy::all,
    dead_code,
    non_camel_case_types,
    non_snake_case,
    non_upper_case_globals,
    unused_imports
)]
mod bindings {
    include!(concat!(env!("OUT_DIR"), "/bindings.rs"));
}

pub use bindings::*;

/// Runs a GL function, and in debug builds, panics if it raised an error.
macro_rules! gl_call {
    ($expr:expr) => {{
        #[allow(unused_unsafe)]
        let result = unsafe { $expr };
        if cfg!(debug_assertions) {
            let error = unsafe { $crate::renderer::gl::GetError() };
            if error != $crate::renderer::gl::NO_ERROR {
                panic!(
                    "OpenGL error {} at {}:{}:{}",
                    $crate::renderer::gl::error_name(error),
                    file!(),
                    line!(),
                    column!(),
                );
            }
        }
        result
    }};
}

pub(crate) use gl_call as call;

pub fn error_name(error: types::GLenum) -> String {
    match error {
        INVALID_ENUM => "INVALID_ENUM".to_string(),
        INVALID_VALUE => "INVALID_VALUE".to_string(),
        INVALID_OPERATION => "INVALID_OPERATION".to_string(),
        OUT_OF_MEMORY => "OUT_OF_MEMORY".to_string(),
        INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION".to_string(),
        _ => format!("{error}"),
    }
}

/// Clears any pending errors, so the next `GetError` only reports what
/// happened after this.
fn clear_errors() {
    while unsafe { GetError() } != NO_ERROR {}
}

pub fn component_type_enum(component_type: ComponentType) -> types::GLenum {
    match component_type {
        ComponentType::Byte => BYTE,
        ComponentType::UnsignedByte => UNSIGNED_BYTE,
        ComponentType::Short => SHORT,
        ComponentType::UnsignedShort => UNSIGNED_SHORT,
        ComponentType::UnsignedInt => UNSIGNED_INT,
        ComponentType::Float => FLOAT,
    }
}

pub fn draw_mode_enum(mode: DrawMode) -> types::GLenum {
    match mode {
        DrawMode::Points => POINTS,
        DrawMode::Lines => LINES,
        DrawMode::LineLoop => LINE_LOOP,
        DrawMode::LineStrip => LINE_STRIP,
        DrawMode::Triangles => TRIANGLES,
        DrawMode::TriangleStrip => TRIANGLE_STRIP,
        DrawMode::TriangleFan => TRIANGLE_FAN,
    }
}

/// Reads a string like `VERSION` or `RENDERER`.
pub fn get_string(name: types::GLenum) -> String {
    let string = call!(GetString(name));
    if string.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(string as *const _) }
        .to_string_lossy()
        .into_owned()
}

pub fn create_shader(shader_type: types::GLenum, source: &str) -> Result<types::GLuint, BackendError> {
    let shader = call!(CreateShader(shader_type));
    let sources = [source.as_ptr() as *const types::GLchar];
    let source_lens = [source.len() as types::GLint];
    call!(ShaderSource(shader, 1, sources.as_ptr(), source_lens.as_ptr()));
    call!(CompileShader(shader));
    let mut compile_status = 0;
    call!(GetShaderiv(shader, COMPILE_STATUS, &mut compile_status));
    if compile_status == FALSE as types::GLint {
        let mut info_log = [0u8; 4096];
        let mut length = 0;
        call!(GetShaderInfoLog(
            shader,
            info_log.len() as types::GLsizei,
            &mut length,
            info_log.as_mut_ptr() as *mut types::GLchar,
        ));
        call!(DeleteShader(shader));
        let info_log = String::from_utf8_lossy(&info_log[..length as usize]).into_owned();
        return Err(BackendError::ShaderCompilation(info_log));
    }
    Ok(shader)
}

pub fn create_program(shaders: &[types::GLuint]) -> Result<types::GLuint, BackendError> {
    let program = call!(CreateProgram());
    for &shader in shaders {
        call!(AttachShader(program, shader));
    }
    call!(LinkProgram(program));
    let mut link_status = 0;
    call!(GetProgramiv(program, LINK_STATUS, &mut link_status));
    if link_status == FALSE as types::GLint {
        let mut info_log = [0u8; 4096];
        let mut length = 0;
        call!(GetProgramInfoLog(
            program,
            info_log.len() as types::GLsizei,
            &mut length,
            info_log.as_mut_ptr() as *mut types::GLchar,
        ));
        call!(DeleteProgram(program));
        let info_log = String::from_utf8_lossy(&info_log[..length as usize]).into_owned();
        return Err(BackendError::ProgramLink(info_log));
    }
    Ok(program)
}

/// Returns `None` if the program has no active uniform called `name`.
pub fn get_uniform_location(program: types::GLuint, name: &str) -> Option<types::GLint> {
    let name = CString::new(name).ok()?;
    let location = call!(GetUniformLocation(program, name.as_ptr()));
    (location != -1).then_some(location)
}

/// [`Backend`] over the current OpenGL context. GL state is per-context, so
/// this only exists to prove the function pointers have been loaded.
pub struct GlBackend {
    _private: (),
}

impl GlBackend {
    /// Loads the GL function pointers through `loader` (e.g. SDL's
    /// `gl_get_proc_address`). A context must be current.
    pub fn load_with(loader: impl FnMut(&'static str) -> *const c_void) -> GlBackend {
        load_with(loader);
        GlBackend { _private: () }
    }
}

impl Backend for GlBackend {
    fn create_buffer(&mut self, bytes: &[u8]) -> Result<BufferHandle, BackendError> {
        let mut buffer = 0;
        call!(GenBuffers(1, &mut buffer));
        if buffer == 0 {
            return Err(BackendError::CreationFailed("buffer"));
        }
        call!(BindBuffer(ARRAY_BUFFER, buffer));
        // Not through call!, running out of memory is reported instead of
        // panicking.
        clear_errors();
        unsafe {
            BufferData(
                ARRAY_BUFFER,
                bytes.len() as types::GLsizeiptr,
                bytes.as_ptr() as *const c_void,
                STATIC_DRAW,
            )
        };
        let error = unsafe { GetError() };
        call!(BindBuffer(ARRAY_BUFFER, 0));
        if error != NO_ERROR {
            call!(DeleteBuffers(1, &buffer));
            return Err(match error {
                OUT_OF_MEMORY => BackendError::OutOfMemory("buffer"),
                _ => BackendError::CreationFailed("buffer"),
            });
        }
        Ok(BufferHandle(buffer))
    }

    fn delete_buffers(&mut self, buffers: &[BufferHandle]) {
        let names = buffers.iter().map(|buffer| buffer.0).collect::<Vec<_>>();
        call!(DeleteBuffers(names.len() as types::GLsizei, names.as_ptr()));
    }

    fn create_vertex_array(&mut self) -> Result<VertexArrayHandle, BackendError> {
        let mut vertex_array = 0;
        call!(GenVertexArrays(1, &mut vertex_array));
        if vertex_array == 0 {
            return Err(BackendError::CreationFailed("vertex array"));
        }
        Ok(VertexArrayHandle(vertex_array))
    }

    fn delete_vertex_arrays(&mut self, vertex_arrays: &[VertexArrayHandle]) {
        let names = vertex_arrays.iter().map(|vao| vao.0).collect::<Vec<_>>();
        call!(DeleteVertexArrays(names.len() as types::GLsizei, names.as_ptr()));
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayHandle>) {
        call!(BindVertexArray(vertex_array.map_or(0, |vao| vao.0)));
    }

    fn enable_vertex_attribute(&mut self, slot: u32) {
        call!(EnableVertexAttribArray(slot));
    }

    fn vertex_attribute_pointer(&mut self, slot: u32, buffer: BufferHandle, layout: &AttributeLayout) {
        call!(BindBuffer(ARRAY_BUFFER, buffer.0));
        call!(VertexAttribPointer(
            slot,
            layout.components as types::GLint,
            component_type_enum(layout.component_type),
            if layout.normalized { TRUE } else { FALSE },
            layout.stride as types::GLsizei,
            ptr::null::<c_void>().wrapping_add(layout.byte_offset),
        ));
        call!(BindBuffer(ARRAY_BUFFER, 0));
    }

    fn bind_index_buffer(&mut self, buffer: BufferHandle) {
        call!(BindBuffer(ELEMENT_ARRAY_BUFFER, buffer.0));
    }

    fn set_uniform_mat4(&mut self, location: UniformLocation, matrix: &Mat4) {
        let columns: &[f32] = bytemuck::cast_slice(std::slice::from_ref(matrix));
        call!(UniformMatrix4fv(location.0, 1, FALSE, columns.as_ptr()));
    }

    fn draw_elements(
        &mut self,
        mode: DrawMode,
        count: usize,
        index_type: ComponentType,
        byte_offset: usize,
    ) {
        call!(DrawElements(
            draw_mode_enum(mode),
            count as types::GLsizei,
            component_type_enum(index_type),
            ptr::null::<c_void>().wrapping_add(byte_offset),
        ));
    }

    fn draw_arrays(&mut self, mode: DrawMode, first: usize, count: usize) {
        call!(DrawArrays(
            draw_mode_enum(mode),
            first as types::GLint,
            count as types::GLsizei,
        ));
    }
}
