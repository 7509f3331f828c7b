use glam::Mat4;

use crate::asset::{ComponentType, DrawMode};
use crate::renderer::backend::{
    AttributeLayout, Backend, BackendError, BufferHandle, UniformLocation, VertexArrayHandle,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateBuffer {
        buffer: BufferHandle,
        byte_length: usize,
    },
    DeleteBuffers(Vec<BufferHandle>),
    CreateVertexArray(VertexArrayHandle),
    DeleteVertexArrays(Vec<VertexArrayHandle>),
    BindVertexArray(Option<VertexArrayHandle>),
    EnableVertexAttribute(u32),
    VertexAttributePointer {
        slot: u32,
        buffer: BufferHandle,
        layout: AttributeLayout,
    },
    BindIndexBuffer(BufferHandle),
    SetUniformMat4 {
        location: UniformLocation,
        matrix: Mat4,
    },
    DrawElements {
        mode: DrawMode,
        count: usize,
        index_type: ComponentType,
        byte_offset: usize,
    },
    DrawArrays {
        mode: DrawMode,
        first: usize,
        count: usize,
    },
}

impl Call {
    pub(crate) fn is_draw(&self) -> bool {
        matches!(self, Call::DrawElements { .. } | Call::DrawArrays { .. })
    }
}

/// A backend that hands out sequential handles and remembers every call.
#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub calls: Vec<Call>,
    next_name: u32,
    /// Buffer creation fails with out-of-memory once this many buffers exist.
    buffer_limit: Option<usize>,
    buffers_created: usize,
}

impl RecordingBackend {
    pub(crate) fn new() -> RecordingBackend {
        RecordingBackend::default()
    }

    pub(crate) fn with_buffer_limit(limit: usize) -> RecordingBackend {
        RecordingBackend {
            buffer_limit: Some(limit),
            ..RecordingBackend::default()
        }
    }

    pub(crate) fn draws(&self) -> Vec<&Call> {
        self.calls.iter().filter(|call| call.is_draw()).collect()
    }

    /// Every matrix uploaded to `location`, in upload order.
    pub(crate) fn uploads_to(&self, location: UniformLocation) -> Vec<Mat4> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SetUniformMat4 {
                    location: uploaded_to,
                    matrix,
                } if *uploaded_to == location => Some(*matrix),
                _ => None,
            })
            .collect()
    }

    fn next_name(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }
}

impl Backend for RecordingBackend {
    fn create_buffer(&mut self, bytes: &[u8]) -> Result<BufferHandle, BackendError> {
        if self.buffer_limit == Some(self.buffers_created) {
            return Err(BackendError::OutOfMemory("buffer"));
        }
        self.buffers_created += 1;
        let buffer = BufferHandle(self.next_name());
        self.calls.push(Call::CreateBuffer {
            buffer,
            byte_length: bytes.len(),
        });
        Ok(buffer)
    }

    fn delete_buffers(&mut self, buffers: &[BufferHandle]) {
        self.calls.push(Call::DeleteBuffers(buffers.to_vec()));
    }

    fn create_vertex_array(&mut self) -> Result<VertexArrayHandle, BackendError> {
        let vertex_array = VertexArrayHandle(self.next_name());
        self.calls.push(Call::CreateVertexArray(vertex_array));
        Ok(vertex_array)
    }

    fn delete_vertex_arrays(&mut self, vertex_arrays: &[VertexArrayHandle]) {
        self.calls.push(Call::DeleteVertexArrays(vertex_arrays.to_vec()));
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayHandle>) {
        self.calls.push(Call::BindVertexArray(vertex_array));
    }

    fn enable_vertex_attribute(&mut self, slot: u32) {
        self.calls.push(Call::EnableVertexAttribute(slot));
    }

    fn vertex_attribute_pointer(&mut self, slot: u32, buffer: BufferHandle, layout: &AttributeLayout) {
        self.calls.push(Call::VertexAttributePointer {
            slot,
            buffer,
            layout: *layout,
        });
    }

    fn bind_index_buffer(&mut self, buffer: BufferHandle) {
        self.calls.push(Call::BindIndexBuffer(buffer));
    }

    fn set_uniform_mat4(&mut self, location: UniformLocation, matrix: &Mat4) {
        self.calls.push(Call::SetUniformMat4 {
            location,
            matrix: *matrix,
        });
    }

    fn draw_elements(
        &mut self,
        mode: DrawMode,
        count: usize,
        index_type: ComponentType,
        byte_offset: usize,
    ) {
        self.calls.push(Call::DrawElements {
            mode,
            count,
            index_type,
            byte_offset,
        });
    }

    fn draw_arrays(&mut self, mode: DrawMode, first: usize, count: usize) {
        self.calls.push(Call::DrawArrays { mode, first, count });
    }
}
