//! The seam between the renderer and the graphics API.
//!
//! The buffer store, fetch builder and scene drawing only talk to a
//! [`Backend`], so they can run against OpenGL ([`GlBackend`]) or a recorder
//! in tests.
//!
//! [`GlBackend`]: crate::renderer::gl::GlBackend

use glam::Mat4;
use thiserror::Error;

use crate::asset::{ComponentType, DrawMode};

#[cfg(test)]
pub(crate) mod recording;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("out of GPU memory while creating a {0}")]
    OutOfMemory(&'static str),
    #[error("the graphics API did not return a {0} object")]
    CreationFailed(&'static str),
    #[error("compiling shader failed: {0}")]
    ShaderCompilation(String),
    #[error("linking shader program failed: {0}")]
    ProgramLink(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub u32);

/// A uniform location in the active program. `-1` is a location the program
/// doesn't have, and uploads to it are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

/// How one vertex attribute reads its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLayout {
    /// Components per element, 1 to 4.
    pub components: u8,
    pub component_type: ComponentType,
    pub normalized: bool,
    /// Distance between consecutive elements in bytes. Never zero.
    pub stride: usize,
    /// Offset of the first element from the start of the buffer.
    pub byte_offset: usize,
}

pub trait Backend {
    /// Creates an immutable buffer initialized with `bytes`.
    fn create_buffer(&mut self, bytes: &[u8]) -> Result<BufferHandle, BackendError>;
    fn delete_buffers(&mut self, buffers: &[BufferHandle]);

    fn create_vertex_array(&mut self) -> Result<VertexArrayHandle, BackendError>;
    fn delete_vertex_arrays(&mut self, vertex_arrays: &[VertexArrayHandle]);
    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayHandle>);

    // These record into the bound vertex array.
    fn enable_vertex_attribute(&mut self, slot: u32);
    fn vertex_attribute_pointer(&mut self, slot: u32, buffer: BufferHandle, layout: &AttributeLayout);
    fn bind_index_buffer(&mut self, buffer: BufferHandle);

    fn set_uniform_mat4(&mut self, location: UniformLocation, matrix: &Mat4);

    /// Draws `count` indices of `index_type`, starting `byte_offset` bytes
    /// into the bound vertex array's index buffer.
    fn draw_elements(
        &mut self,
        mode: DrawMode,
        count: usize,
        index_type: ComponentType,
        byte_offset: usize,
    );
    fn draw_arrays(&mut self, mode: DrawMode, first: usize, count: usize);
}
