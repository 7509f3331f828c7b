//! Small hand-built models shared by the renderer tests.

use std::collections::BTreeMap;

use crate::asset::{
    Accessor, AccessorType, BufferTarget, BufferView, ComponentType, DrawMode, Mesh, Model, Node,
    Primitive, Scene,
};

pub(crate) fn empty_model() -> Model {
    Model {
        buffers: Vec::new(),
        buffer_views: Vec::new(),
        accessors: Vec::new(),
        meshes: Vec::new(),
        nodes: Vec::new(),
        scenes: Vec::new(),
        default_scene: None,
    }
}

pub(crate) fn vec3_accessor(buffer_view: usize, byte_offset: usize, count: usize) -> Accessor {
    Accessor {
        buffer_view,
        byte_offset,
        component_type: ComponentType::Float,
        accessor_type: AccessorType::Vec3,
        count,
        normalized: false,
    }
}

pub(crate) fn primitive(attributes: &[(&str, usize)], indices: Option<usize>) -> Primitive {
    Primitive {
        attributes: attributes
            .iter()
            .map(|&(semantic, accessor)| (semantic.to_string(), accessor))
            .collect::<BTreeMap<_, _>>(),
        indices,
        mode: DrawMode::Triangles,
    }
}

/// One buffer holding `vertex_count` float vec3 positions, followed by three
/// u16 indices if `indexed`. One mesh with one primitive, no nodes yet.
pub(crate) fn triangle_mesh_model(vertex_count: usize, indexed: bool) -> Model {
    let positions_length = vertex_count * 12;
    let mut buffer_views = vec![BufferView {
        buffer: 0,
        byte_offset: 0,
        byte_length: positions_length,
        byte_stride: None,
        target: Some(BufferTarget::ArrayBuffer),
    }];
    let mut accessors = vec![vec3_accessor(0, 0, vertex_count)];
    let mut buffer = vec![0u8; positions_length];
    let mut indices = None;
    if indexed {
        buffer_views.push(BufferView {
            buffer: 0,
            byte_offset: positions_length,
            byte_length: 6,
            byte_stride: None,
            target: Some(BufferTarget::ElementArrayBuffer),
        });
        accessors.push(Accessor {
            buffer_view: 1,
            byte_offset: 0,
            component_type: ComponentType::UnsignedShort,
            accessor_type: AccessorType::Scalar,
            count: 3,
            normalized: false,
        });
        buffer.extend_from_slice(bytemuck::cast_slice(&[0u16, 1, 2]));
        indices = Some(1);
    }
    Model {
        buffers: vec![buffer],
        buffer_views,
        accessors,
        meshes: vec![Mesh {
            primitives: vec![primitive(&[("POSITION", 0)], indices)],
        }],
        ..empty_model()
    }
}

/// Adds a single root node referencing mesh 0 and makes its scene the default.
pub(crate) fn with_single_root(mut model: Model) -> Model {
    model.nodes = vec![Node {
        mesh: Some(0),
        ..Node::default()
    }];
    model.scenes = vec![Scene { nodes: vec![0] }];
    model.default_scene = Some(0);
    model
}
