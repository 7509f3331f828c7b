//! The in-memory glTF model: buffers, the views and accessors that describe
//! how to read them, and the mesh/node/scene graph on top.
//!
//! Everything in here is plain data, immutable after loading. Indices between
//! the tables are *not* validated by the loader; the renderer checks them when
//! it resolves them, and reports dangling ones as a malformed asset.

use std::collections::BTreeMap;

use glam::{Mat4, Quat, Vec3};

mod loader;

#[cfg(test)]
pub(crate) mod test_models;

pub use loader::{GltfLoader, LoadError};

#[derive(Debug)]
pub struct Model {
    /// Raw buffer contents, in declaration order.
    pub buffers: Vec<Vec<u8>>,
    pub buffer_views: Vec<BufferView>,
    pub accessors: Vec<Accessor>,
    pub meshes: Vec<Mesh>,
    pub nodes: Vec<Node>,
    pub scenes: Vec<Scene>,
    /// The scene to render. `None` is valid and means nothing gets drawn.
    pub default_scene: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferView {
    pub buffer: usize,
    pub byte_offset: usize,
    pub byte_length: usize,
    /// `None` and `Some(0)` both mean tightly packed.
    pub byte_stride: Option<usize>,
    pub target: Option<BufferTarget>,
}

/// The advisory usage hint of a buffer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    ArrayBuffer,
    ElementArrayBuffer,
}

impl BufferTarget {
    pub fn from_gltf(value: usize) -> Option<BufferTarget> {
        match value {
            34962 => Some(BufferTarget::ArrayBuffer),
            34963 => Some(BufferTarget::ElementArrayBuffer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    pub buffer_view: usize,
    pub byte_offset: usize,
    pub component_type: ComponentType,
    pub accessor_type: AccessorType,
    /// Number of elements (not components, not bytes).
    pub count: usize,
    pub normalized: bool,
}

impl Accessor {
    /// Size of one element in bytes, i.e. the stride of tightly packed data.
    pub fn element_size(&self) -> usize {
        self.accessor_type.component_count() * self.component_type.byte_size()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    UnsignedInt,
    Float,
}

impl ComponentType {
    pub fn from_gltf(value: usize) -> Option<ComponentType> {
        match value {
            5120 => Some(ComponentType::Byte),
            5121 => Some(ComponentType::UnsignedByte),
            5122 => Some(ComponentType::Short),
            5123 => Some(ComponentType::UnsignedShort),
            5125 => Some(ComponentType::UnsignedInt),
            5126 => Some(ComponentType::Float),
            _ => None,
        }
    }

    pub fn byte_size(self) -> usize {
        match self {
            ComponentType::Byte | ComponentType::UnsignedByte => 1,
            ComponentType::Short | ComponentType::UnsignedShort => 2,
            ComponentType::UnsignedInt | ComponentType::Float => 4,
        }
    }

    /// Whether this type can be used for index data.
    pub fn is_index_type(self) -> bool {
        matches!(
            self,
            ComponentType::UnsignedByte | ComponentType::UnsignedShort | ComponentType::UnsignedInt
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl AccessorType {
    pub fn from_gltf(value: &str) -> Option<AccessorType> {
        match value {
            "SCALAR" => Some(AccessorType::Scalar),
            "VEC2" => Some(AccessorType::Vec2),
            "VEC3" => Some(AccessorType::Vec3),
            "VEC4" => Some(AccessorType::Vec4),
            "MAT2" => Some(AccessorType::Mat2),
            "MAT3" => Some(AccessorType::Mat3),
            "MAT4" => Some(AccessorType::Mat4),
            _ => None,
        }
    }

    pub fn component_count(self) -> usize {
        match self {
            AccessorType::Scalar => 1,
            AccessorType::Vec2 => 2,
            AccessorType::Vec3 => 3,
            AccessorType::Vec4 | AccessorType::Mat2 => 4,
            AccessorType::Mat3 => 9,
            AccessorType::Mat4 => 16,
        }
    }
}

/// Primitive topology. The discriminants match both glTF and OpenGL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Points = 0,
    Lines = 1,
    LineLoop = 2,
    LineStrip = 3,
    Triangles = 4,
    TriangleStrip = 5,
    TriangleFan = 6,
}

impl DrawMode {
    pub fn from_gltf(value: usize) -> Option<DrawMode> {
        match value {
            0 => Some(DrawMode::Points),
            1 => Some(DrawMode::Lines),
            2 => Some(DrawMode::LineLoop),
            3 => Some(DrawMode::LineStrip),
            4 => Some(DrawMode::Triangles),
            5 => Some(DrawMode::TriangleStrip),
            6 => Some(DrawMode::TriangleFan),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primitive {
    /// Attribute semantic name (e.g. "POSITION") to accessor index.
    pub attributes: BTreeMap<String, usize>,
    pub indices: Option<usize>,
    pub mode: DrawMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mesh {
    pub primitives: Vec<Primitive>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub mesh: Option<usize>,
    pub transform: Transform,
    pub children: Vec<usize>,
}

/// A node's local transform. glTF nodes have either a matrix or a TRS triple,
/// never both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Matrix(Mat4),
    Trs {
        translation: Vec3,
        rotation: Quat,
        scale: Vec3,
    },
}

impl Default for Transform {
    fn default() -> Self {
        Transform::Trs {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn local_matrix(&self) -> Mat4 {
        match *self {
            Transform::Matrix(matrix) => matrix,
            Transform::Trs {
                translation,
                rotation,
                scale,
            } => Mat4::from_scale_rotation_translation(scale, rotation, translation),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scene {
    pub nodes: Vec<usize>,
}
