use thiserror::Error;

use crate::asset::ComponentType;
use crate::renderer::backend::BackendError;

/// Errors from turning a [`Model`](crate::asset::Model) into GPU state and
/// drawing it. Everything but [`RenderError::Backend`] means the asset is
/// malformed.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{kind} {index} does not exist, the asset has {count}")]
    DanglingIndex {
        kind: &'static str,
        index: usize,
        count: usize,
    },
    #[error("buffer view {buffer_view} reaches past the end of buffer {buffer}")]
    BufferViewOutOfBounds { buffer_view: usize, buffer: usize },
    #[error("accessor {accessor} reaches past the end of buffer view {buffer_view}")]
    AccessorOutOfBounds { accessor: usize, buffer_view: usize },
    #[error("index accessor {accessor} uses buffer view {buffer_view}, which is meant for vertex attributes")]
    IndexBufferViewTarget { accessor: usize, buffer_view: usize },
    #[error("index accessor {accessor} has component type {component_type:?}, indices must be unsigned")]
    IndexComponentType {
        accessor: usize,
        component_type: ComponentType,
    },
    #[error("attribute accessor {accessor} has {components} components per element, a vertex attribute holds at most 4")]
    AttributeComponents { accessor: usize, components: usize },
    #[error("node {node} is reachable more than once from scene {scene}: the node graph has a cycle or a shared child")]
    NodeGraphCycle { node: usize, scene: usize },
    #[error("the node hierarchy of scene {scene} is deeper than {max_depth} levels")]
    NodeGraphTooDeep { scene: usize, max_depth: usize },
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Looks up `index` in one of the model's tables, reporting a dangling index
/// as [`RenderError::DanglingIndex`].
pub(crate) fn lookup<'a, T>(
    table: &'a [T],
    index: usize,
    kind: &'static str,
) -> Result<&'a T, RenderError> {
    table.get(index).ok_or(RenderError::DanglingIndex {
        kind,
        index,
        count: table.len(),
    })
}
