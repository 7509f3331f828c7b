//! Scene graph traversal and drawing.

use glam::Mat4;

use crate::asset::{Model, Node, Scene};
use crate::renderer::backend::{Backend, BufferHandle, UniformLocation};
use crate::renderer::buffers::upload_buffers;
use crate::renderer::error::lookup;
use crate::renderer::fetch::{build_fetch_configs, FetchConfigs};
use crate::renderer::RenderError;

/// Hierarchies deeper than this are treated as malformed.
pub const MAX_NODE_DEPTH: usize = 1024;

/// Where the scene shaders take their per-node matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneUniforms {
    pub model_view_projection: UniformLocation,
    pub model_view: UniformLocation,
    pub normal: UniformLocation,
}

/// The matrices uploaded for each drawn node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeMatrices {
    pub model_view: Mat4,
    pub model_view_projection: Mat4,
    /// Transforms normals into view space, also under non-uniform scaling.
    pub normal: Mat4,
}

impl NodeMatrices {
    pub fn new(view: Mat4, projection: Mat4, local_to_world: Mat4) -> NodeMatrices {
        let model_view = view * local_to_world;
        NodeMatrices {
            model_view,
            model_view_projection: projection * model_view,
            normal: model_view.inverse().transpose(),
        }
    }
}

/// The scene that gets drawn: the default scene, if the asset declares one.
pub fn active_scene(model: &Model) -> Result<Option<(usize, &Scene)>, RenderError> {
    match model.default_scene {
        Some(index) => Ok(Some((index, lookup(&model.scenes, index, "scene")?))),
        None => Ok(None),
    }
}

/// Walks the active scene depth-first, parents before children, children in
/// declaration order, calling `visit` with each node's local-to-world
/// transform.
///
/// Every reachable node is visited exactly once. A node reachable twice,
/// whether through a cycle or a shared child, is an error.
pub fn traverse_scene<'a>(
    model: &'a Model,
    mut visit: impl FnMut(usize, &'a Node, Mat4) -> Result<(), RenderError>,
) -> Result<(), RenderError> {
    let Some((scene_index, scene)) = active_scene(model)? else {
        return Ok(());
    };

    let mut visited = vec![false; model.nodes.len()];
    let mut stack = scene
        .nodes
        .iter()
        .rev()
        .map(|&node| (node, Mat4::IDENTITY, 0))
        .collect::<Vec<_>>();
    while let Some((node_index, parent_transform, depth)) = stack.pop() {
        if depth >= MAX_NODE_DEPTH {
            return Err(RenderError::NodeGraphTooDeep {
                scene: scene_index,
                max_depth: MAX_NODE_DEPTH,
            });
        }
        let node = lookup(&model.nodes, node_index, "node")?;
        if std::mem::replace(&mut visited[node_index], true) {
            return Err(RenderError::NodeGraphCycle {
                node: node_index,
                scene: scene_index,
            });
        }

        let local_to_world = parent_transform * node.transform.local_matrix();
        visit(node_index, node, local_to_world)?;

        // Reversed, so that the first child is popped first.
        stack.extend(
            node.children
                .iter()
                .rev()
                .map(|&child| (child, local_to_world, depth + 1)),
        );
    }
    Ok(())
}

/// Checks that the active scene can be traversed and that every mesh it
/// references exists, without drawing anything. Run this before the first
/// frame so a malformed asset stops the render loop from starting.
pub fn validate_scene_graph(model: &Model) -> Result<(), RenderError> {
    let mut visited = 0;
    traverse_scene(model, |_, node, _| {
        visited += 1;
        if let Some(mesh) = node.mesh {
            lookup(&model.meshes, mesh, "mesh")?;
        }
        Ok(())
    })?;
    log::debug!("scene graph is valid, {visited} nodes reachable");
    Ok(())
}

/// Draws the active scene: for every primitive of every mesh-carrying node,
/// uploads the node's matrices, binds the primitive's vertex array, and
/// issues its draw call. Draws nothing if there's no active scene.
pub fn draw_scene<B: Backend>(
    backend: &mut B,
    model: &Model,
    fetch: &FetchConfigs,
    view: Mat4,
    projection: Mat4,
    uniforms: &SceneUniforms,
) -> Result<(), RenderError> {
    traverse_scene(model, |_, node, local_to_world| {
        let Some(mesh) = node.mesh else {
            return Ok(());
        };
        let configs = fetch.for_mesh(mesh)?;
        if configs.is_empty() {
            return Ok(());
        }
        let matrices = NodeMatrices::new(view, projection, local_to_world);
        for config in configs {
            backend.set_uniform_mat4(uniforms.model_view_projection, &matrices.model_view_projection);
            backend.set_uniform_mat4(uniforms.model_view, &matrices.model_view);
            backend.set_uniform_mat4(uniforms.normal, &matrices.normal);
            backend.bind_vertex_array(Some(config.vertex_array));
            config.draw_call.issue(backend);
            backend.bind_vertex_array(None);
        }
        Ok(())
    })
}

/// A model together with the GPU state built from it. The fetch ranges index
/// the model's meshes, so the two are kept in one place.
#[derive(Debug)]
pub struct GpuScene {
    model: Model,
    buffers: Vec<BufferHandle>,
    fetch: FetchConfigs,
}

impl GpuScene {
    /// Validates the scene graph, uploads the buffers and builds the fetch
    /// configurations. Nothing is left on the GPU if any step fails.
    pub fn upload<B: Backend>(backend: &mut B, model: Model) -> Result<GpuScene, RenderError> {
        validate_scene_graph(&model)?;
        let buffers = upload_buffers(backend, &model.buffers)?;
        let fetch = match build_fetch_configs(backend, &model, &buffers) {
            Ok(fetch) => fetch,
            Err(err) => {
                backend.delete_buffers(&buffers);
                return Err(err);
            }
        };
        Ok(GpuScene {
            model,
            buffers,
            fetch,
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn buffers(&self) -> &[BufferHandle] {
        &self.buffers
    }

    pub fn fetch(&self) -> &FetchConfigs {
        &self.fetch
    }

    pub fn draw<B: Backend>(
        &self,
        backend: &mut B,
        view: Mat4,
        projection: Mat4,
        uniforms: &SceneUniforms,
    ) -> Result<(), RenderError> {
        draw_scene(backend, &self.model, &self.fetch, view, projection, uniforms)
    }

    /// Deletes the vertex arrays and then the buffers they read from.
    pub fn destroy<B: Backend>(self, backend: &mut B) {
        self.fetch.destroy(backend);
        backend.delete_buffers(&self.buffers);
    }
}
