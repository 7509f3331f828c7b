//! Vertex fetch configurations: one vertex array object per primitive, with
//! the recognized attributes and the index buffer bound to byte ranges of the
//! uploaded buffers.

use std::ops::Range;

use crate::asset::{Accessor, BufferTarget, BufferView, Model, Primitive};
use crate::renderer::backend::{AttributeLayout, Backend, BufferHandle, VertexArrayHandle};
use crate::renderer::draw_calls::DrawCall;
use crate::renderer::error::lookup;
use crate::renderer::RenderError;

/// The attribute semantics the shaders understand, each with a fixed slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeSemantic {
    Position,
    Normal,
    Texcoord0,
}

impl AttributeSemantic {
    /// In slot order.
    pub const ALL: [AttributeSemantic; 3] = [
        AttributeSemantic::Position,
        AttributeSemantic::Normal,
        AttributeSemantic::Texcoord0,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AttributeSemantic::Position => "POSITION",
            AttributeSemantic::Normal => "NORMAL",
            AttributeSemantic::Texcoord0 => "TEXCOORD_0",
        }
    }

    /// The vertex attribute location the shaders read this semantic from.
    pub fn slot(self) -> u32 {
        match self {
            AttributeSemantic::Position => 0,
            AttributeSemantic::Normal => 1,
            AttributeSemantic::Texcoord0 => 2,
        }
    }

    pub fn from_name(name: &str) -> Option<AttributeSemantic> {
        AttributeSemantic::ALL
            .into_iter()
            .find(|semantic| semantic.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundAttribute {
    pub semantic: AttributeSemantic,
    pub accessor: usize,
    /// Index into the model's buffers.
    pub buffer_index: usize,
    pub buffer: BufferHandle,
    pub layout: AttributeLayout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundIndices {
    pub accessor: usize,
    pub buffer_index: usize,
    pub buffer: BufferHandle,
}

/// The vertex fetch state of one primitive. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub vertex_array: VertexArrayHandle,
    /// In slot order.
    pub attributes: Vec<BoundAttribute>,
    pub indices: Option<BoundIndices>,
    pub draw_call: DrawCall,
}

/// A mesh's block of fetch configurations: `count` of them starting at
/// `start`, in the same order as the mesh's primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRange {
    pub start: usize,
    pub count: usize,
}

impl FetchRange {
    pub fn indices(&self) -> Range<usize> {
        self.start..self.start + self.count
    }
}

/// Mesh index to [`FetchRange`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeshFetchRanges {
    ranges: Vec<FetchRange>,
}

impl MeshFetchRanges {
    pub fn get(&self, mesh: usize) -> Option<FetchRange> {
        self.ranges.get(mesh).copied()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Every fetch configuration of a model, plus the per-mesh index into them.
#[derive(Debug, Default)]
pub struct FetchConfigs {
    pub configs: Vec<FetchConfig>,
    pub ranges: MeshFetchRanges,
}

impl FetchConfigs {
    /// The fetch configurations of `mesh`'s primitives, in primitive order.
    pub fn for_mesh(&self, mesh: usize) -> Result<&[FetchConfig], RenderError> {
        let range = self.ranges.get(mesh).ok_or(RenderError::DanglingIndex {
            kind: "mesh",
            index: mesh,
            count: self.ranges.len(),
        })?;
        Ok(&self.configs[range.indices()])
    }

    /// Deletes the vertex arrays. The uploaded buffers are not touched.
    pub fn destroy<B: Backend>(self, backend: &mut B) {
        let vertex_arrays = self
            .configs
            .iter()
            .map(|config| config.vertex_array)
            .collect::<Vec<_>>();
        if !vertex_arrays.is_empty() {
            backend.delete_vertex_arrays(&vertex_arrays);
        }
    }
}

/// Builds a fetch configuration for every primitive of every mesh, mesh by
/// mesh in declaration order. `buffers` are the handles from
/// [`upload_buffers`](crate::renderer::buffers::upload_buffers), in the
/// model's buffer order.
///
/// Either every configuration gets built, or none: on error, the vertex
/// arrays created so far are deleted before returning.
pub fn build_fetch_configs<B: Backend>(
    backend: &mut B,
    model: &Model,
    buffers: &[BufferHandle],
) -> Result<FetchConfigs, RenderError> {
    let mut fetch = FetchConfigs::default();
    for (mesh_index, mesh) in model.meshes.iter().enumerate() {
        fetch.ranges.ranges.push(FetchRange {
            start: fetch.configs.len(),
            count: mesh.primitives.len(),
        });
        for (primitive_index, primitive) in mesh.primitives.iter().enumerate() {
            match build_primitive(backend, model, buffers, primitive) {
                Ok(config) => {
                    log::trace!(
                        "mesh {mesh_index} primitive {primitive_index}: {} attributes, indexed: {}",
                        config.attributes.len(),
                        config.indices.is_some(),
                    );
                    fetch.configs.push(config);
                }
                Err(err) => {
                    log::error!("mesh {mesh_index} primitive {primitive_index}: {err}");
                    fetch.destroy(backend);
                    return Err(err);
                }
            }
        }
    }
    log::debug!(
        "built {} fetch configurations for {} meshes",
        fetch.configs.len(),
        fetch.ranges.len(),
    );
    Ok(fetch)
}

fn build_primitive<B: Backend>(
    backend: &mut B,
    model: &Model,
    buffers: &[BufferHandle],
    primitive: &Primitive,
) -> Result<FetchConfig, RenderError> {
    // Resolve everything before creating the vertex array, so that a
    // malformed primitive doesn't leave one behind.
    let mut attributes = Vec::with_capacity(AttributeSemantic::ALL.len());
    for semantic in AttributeSemantic::ALL {
        let Some(&accessor_index) = primitive.attributes.get(semantic.name()) else {
            continue;
        };
        let resolved = resolve_accessor(model, buffers, accessor_index)?;
        let components = resolved.accessor.accessor_type.component_count();
        if components > 4 {
            return Err(RenderError::AttributeComponents {
                accessor: accessor_index,
                components,
            });
        }
        attributes.push(BoundAttribute {
            semantic,
            accessor: accessor_index,
            buffer_index: resolved.view.buffer,
            buffer: resolved.buffer,
            layout: AttributeLayout {
                components: components as u8,
                component_type: resolved.accessor.component_type,
                normalized: false,
                stride: resolved.stride,
                byte_offset: resolved.byte_offset,
            },
        });
    }
    for semantic in primitive.attributes.keys() {
        if AttributeSemantic::from_name(semantic).is_none() {
            log::debug!("ignoring unsupported attribute semantic \"{semantic}\"");
        }
    }

    let indices = match primitive.indices {
        Some(accessor_index) => {
            let resolved = resolve_accessor(model, buffers, accessor_index)?;
            if resolved.view.target == Some(BufferTarget::ArrayBuffer) {
                return Err(RenderError::IndexBufferViewTarget {
                    accessor: accessor_index,
                    buffer_view: resolved.accessor.buffer_view,
                });
            }
            if !resolved.accessor.component_type.is_index_type() {
                return Err(RenderError::IndexComponentType {
                    accessor: accessor_index,
                    component_type: resolved.accessor.component_type,
                });
            }
            Some((accessor_index, resolved))
        }
        None => None,
    };

    let draw_call = match &indices {
        Some((_, resolved)) => DrawCall::Elements {
            mode: primitive.mode,
            count: resolved.accessor.count,
            index_type: resolved.accessor.component_type,
            byte_offset: resolved.byte_offset,
        },
        None => match attributes.first() {
            Some(attribute) => DrawCall::Arrays {
                mode: primitive.mode,
                first: 0,
                count: model.accessors[attribute.accessor].count,
            },
            None => DrawCall::Nothing,
        },
    };

    let vertex_array = backend.create_vertex_array()?;
    backend.bind_vertex_array(Some(vertex_array));
    for attribute in &attributes {
        let slot = attribute.semantic.slot();
        backend.enable_vertex_attribute(slot);
        backend.vertex_attribute_pointer(slot, attribute.buffer, &attribute.layout);
    }
    if let Some((_, resolved)) = &indices {
        backend.bind_index_buffer(resolved.buffer);
    }
    backend.bind_vertex_array(None);

    Ok(FetchConfig {
        vertex_array,
        attributes,
        indices: indices.map(|(accessor, resolved)| BoundIndices {
            accessor,
            buffer_index: resolved.view.buffer,
            buffer: resolved.buffer,
        }),
        draw_call,
    })
}

/// An accessor followed through its buffer view to a GPU buffer.
struct ResolvedAccessor<'a> {
    accessor: &'a Accessor,
    view: &'a BufferView,
    buffer: BufferHandle,
    /// From the start of the buffer: accessor offset plus view offset.
    byte_offset: usize,
    stride: usize,
}

fn resolve_accessor<'a>(
    model: &'a Model,
    buffers: &[BufferHandle],
    accessor_index: usize,
) -> Result<ResolvedAccessor<'a>, RenderError> {
    let accessor = lookup(&model.accessors, accessor_index, "accessor")?;
    let view = lookup(&model.buffer_views, accessor.buffer_view, "buffer view")?;
    let buffer = *lookup(buffers, view.buffer, "buffer")?;

    let buffer_length = lookup(&model.buffers, view.buffer, "buffer")?.len();
    let view_end = view.byte_offset.checked_add(view.byte_length);
    if view_end.map_or(true, |end| end > buffer_length) {
        return Err(RenderError::BufferViewOutOfBounds {
            buffer_view: accessor.buffer_view,
            buffer: view.buffer,
        });
    }

    let stride = match view.byte_stride {
        Some(stride) if stride != 0 => stride,
        _ => accessor.element_size(),
    };
    let extent = match accessor.count {
        0 => Some(0),
        count => (count - 1)
            .checked_mul(stride)
            .and_then(|last| last.checked_add(accessor.element_size())),
    };
    let accessor_end = extent.and_then(|extent| accessor.byte_offset.checked_add(extent));
    if accessor_end.map_or(true, |end| end > view.byte_length) {
        return Err(RenderError::AccessorOutOfBounds {
            accessor: accessor_index,
            buffer_view: accessor.buffer_view,
        });
    }

    // Both offsets are inside the buffer by now, so this cannot overflow.
    Ok(ResolvedAccessor {
        accessor,
        view,
        buffer,
        byte_offset: accessor.byte_offset + view.byte_offset,
        stride,
    })
}
