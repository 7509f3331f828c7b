use crate::asset::{ComponentType, DrawMode};
use crate::renderer::backend::Backend;

/// The draw call for one primitive, resolved from its accessors when its
/// fetch configuration is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    Elements {
        mode: DrawMode,
        count: usize,
        index_type: ComponentType,
        /// Where the first index sits in the index buffer.
        byte_offset: usize,
    },
    Arrays {
        mode: DrawMode,
        first: usize,
        count: usize,
    },
    /// No indices and no attributes to take a vertex count from.
    Nothing,
}

impl DrawCall {
    /// Issues the draw. The primitive's vertex array must be bound.
    pub fn issue<B: Backend>(&self, backend: &mut B) {
        match *self {
            DrawCall::Elements {
                mode,
                count,
                index_type,
                byte_offset,
            } => backend.draw_elements(mode, count, index_type, byte_offset),
            DrawCall::Arrays { mode, first, count } => backend.draw_arrays(mode, first, count),
            DrawCall::Nothing => {}
        }
    }
}
