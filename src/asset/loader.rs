use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use glam::{Mat4, Quat, Vec3};
use thiserror::Error;
use tinyjson::JsonValue;

use crate::asset::{
    Accessor, AccessorType, BufferTarget, BufferView, ComponentType, DrawMode, Mesh, Model, Node,
    Primitive, Scene, Transform,
};

type JsonObject = HashMap<String, JsonValue>;

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_CHUNK_JSON: u32 = 0x4E4F_534A;
const GLB_CHUNK_BIN: u32 = 0x004E_4942;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid glTF JSON: {0}")]
    Json(String),
    #[error("invalid GLB container: {0}")]
    Glb(&'static str),
    #[error("{context}: missing required field \"{field}\"")]
    MissingField { context: String, field: &'static str },
    #[error("{context}: field \"{field}\" has an invalid value")]
    InvalidField { context: String, field: &'static str },
    #[error("buffer {index}: data URI is not valid base64")]
    DataUri { index: usize },
    #[error("buffer {index}: could not find buffer with uri \"{uri}\"")]
    MissingResource { index: usize, uri: String },
    #[error("buffer {index}: byteLength is {declared} but only {available} bytes are available")]
    ByteLength {
        index: usize,
        declared: usize,
        available: usize,
    },
    #[error("default scene {scene} does not exist, the asset has {count} scenes")]
    DefaultScene { scene: usize, count: usize },
}

/// Loads glTF 2.0 assets (`.gltf` with external buffers, or `.glb`) into a
/// [`Model`]. Only the subset needed for static geometry is read; anything
/// else in the file is skipped.
///
/// Create one per load, or keep one around; it only carries the warnings of
/// the most recent load.
#[derive(Debug, Default)]
pub struct GltfLoader {
    warnings: Vec<String>,
}

impl GltfLoader {
    pub fn new() -> GltfLoader {
        GltfLoader::default()
    }

    /// Warnings produced by the last load. They are also logged.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Loads a `.gltf` or `.glb` file. Buffer URIs are resolved relative to
    /// the file's directory.
    pub fn load_file(&mut self, path: &Path) -> Result<Model, LoadError> {
        let bytes = read(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        if bytes.starts_with(GLB_MAGIC) {
            let (json, bin) = split_glb(&bytes)?;
            self.parse(json, |uri| match uri {
                None => bin.map(<[u8]>::to_vec),
                Some(uri) => read(&base_dir.join(uri)).ok(),
            })
        } else {
            let json = std::str::from_utf8(&bytes)
                .map_err(|_| LoadError::Json("file is not valid UTF-8".to_string()))?;
            self.parse(json, |uri| read(&base_dir.join(uri?)).ok())
        }
    }

    /// Loads a glTF from its JSON text, with buffer contents provided up front
    /// as `(uri, bytes)` pairs. The binary chunk of a GLB goes under the uri
    /// `""`.
    pub fn load_gltf(&mut self, json: &str, resources: &[(&str, &[u8])]) -> Result<Model, LoadError> {
        self.parse(json, |uri| {
            let uri = uri.unwrap_or("");
            resources
                .iter()
                .find(|(name, _)| *name == uri)
                .map(|(_, data)| data.to_vec())
        })
    }

    fn parse(
        &mut self,
        json: &str,
        mut resolve: impl FnMut(Option<&str>) -> Option<Vec<u8>>,
    ) -> Result<Model, LoadError> {
        self.warnings.clear();
        let gltf: JsonValue = json.parse().map_err(|err| LoadError::Json(format!("{err}")))?;
        let gltf = object(&gltf, "root")?;

        for extension in optional_array(gltf, "extensionsRequired", "root")? {
            if let Some(extension) = extension.get::<String>() {
                self.warn(format!("required extension \"{extension}\" is not supported"));
            }
        }

        let mut buffers = Vec::new();
        for (i, buffer) in optional_array(gltf, "buffers", "root")?.iter().enumerate() {
            let context = format!("buffer {i}");
            let buffer = object(buffer, &context)?;
            let uri = match buffer.get("uri") {
                Some(uri) => Some(string(uri, &context, "uri")?),
                None => None,
            };
            let declared = required_usize(buffer, "byteLength", &context)?;
            let embedded = match uri.and_then(|uri| uri.strip_prefix("data:")) {
                Some(data_uri) => {
                    Some(decode_data_uri(data_uri).ok_or(LoadError::DataUri { index: i })?)
                }
                None => None,
            };
            let Some(mut data) = embedded.or_else(|| resolve(uri)) else {
                return Err(LoadError::MissingResource {
                    index: i,
                    uri: uri.unwrap_or("").to_string(),
                });
            };
            if data.len() < declared {
                return Err(LoadError::ByteLength {
                    index: i,
                    declared,
                    available: data.len(),
                });
            }
            // The GLB binary chunk is padded to 4 bytes.
            data.truncate(declared);
            buffers.push(data);
        }

        let mut buffer_views = Vec::new();
        for (i, view) in optional_array(gltf, "bufferViews", "root")?.iter().enumerate() {
            let context = format!("bufferView {i}");
            let view = object(view, &context)?;
            let target = match optional_usize(view, "target", &context)? {
                Some(target) => Some(BufferTarget::from_gltf(target).ok_or(
                    LoadError::InvalidField {
                        context: context.clone(),
                        field: "target",
                    },
                )?),
                None => None,
            };
            buffer_views.push(BufferView {
                buffer: required_usize(view, "buffer", &context)?,
                byte_offset: optional_usize(view, "byteOffset", &context)?.unwrap_or(0),
                byte_length: required_usize(view, "byteLength", &context)?,
                byte_stride: optional_usize(view, "byteStride", &context)?,
                target,
            });
        }

        let mut accessors = Vec::new();
        for (i, accessor) in optional_array(gltf, "accessors", "root")?.iter().enumerate() {
            let context = format!("accessor {i}");
            let accessor = object(accessor, &context)?;
            if accessor.contains_key("sparse") {
                self.warn(format!("{context}: sparse substitution is ignored"));
            }
            let component_type = ComponentType::from_gltf(required_usize(
                accessor,
                "componentType",
                &context,
            )?)
            .ok_or(LoadError::InvalidField {
                context: context.clone(),
                field: "componentType",
            })?;
            let accessor_type = accessor
                .get("type")
                .ok_or(LoadError::MissingField {
                    context: context.clone(),
                    field: "type",
                })
                .and_then(|type_| string(type_, &context, "type"))?;
            let accessor_type =
                AccessorType::from_gltf(accessor_type).ok_or(LoadError::InvalidField {
                    context: context.clone(),
                    field: "type",
                })?;
            let normalized = match accessor.get("normalized") {
                Some(value) => *value.get::<bool>().ok_or(LoadError::InvalidField {
                    context: context.clone(),
                    field: "normalized",
                })?,
                None => false,
            };
            accessors.push(Accessor {
                // Accessors without a view are all zeroes, which this subset
                // has no use for.
                buffer_view: required_usize(accessor, "bufferView", &context)?,
                byte_offset: optional_usize(accessor, "byteOffset", &context)?.unwrap_or(0),
                component_type,
                accessor_type,
                count: required_usize(accessor, "count", &context)?,
                normalized,
            });
        }

        let mut meshes = Vec::new();
        for (i, mesh) in optional_array(gltf, "meshes", "root")?.iter().enumerate() {
            let context = format!("mesh {i}");
            let mesh = object(mesh, &context)?;
            let primitives_json = mesh.get("primitives").ok_or(LoadError::MissingField {
                context: context.clone(),
                field: "primitives",
            })?;
            let primitives_json = array(primitives_json, &context, "primitives")?;
            let mut primitives = Vec::with_capacity(primitives_json.len());
            for (j, primitive) in primitives_json.iter().enumerate() {
                let context = format!("mesh {i} primitive {j}");
                let primitive = object(primitive, &context)?;
                let attributes_json = primitive.get("attributes").ok_or(LoadError::MissingField {
                    context: context.clone(),
                    field: "attributes",
                })?;
                let mut attributes = BTreeMap::new();
                for (semantic, accessor) in object(attributes_json, &context)? {
                    let accessor = take_usize(accessor).ok_or(LoadError::InvalidField {
                        context: context.clone(),
                        field: "attributes",
                    })?;
                    attributes.insert(semantic.clone(), accessor);
                }
                let mode = match optional_usize(primitive, "mode", &context)? {
                    Some(mode) => DrawMode::from_gltf(mode).ok_or(LoadError::InvalidField {
                        context: context.clone(),
                        field: "mode",
                    })?,
                    None => DrawMode::Triangles,
                };
                primitives.push(Primitive {
                    attributes,
                    indices: optional_usize(primitive, "indices", &context)?,
                    mode,
                });
            }
            meshes.push(Mesh { primitives });
        }

        let mut nodes = Vec::new();
        for (i, node) in optional_array(gltf, "nodes", "root")?.iter().enumerate() {
            let context = format!("node {i}");
            let node = object(node, &context)?;
            let children = optional_array(node, "children", &context)?
                .iter()
                .map(|child| {
                    take_usize(child).ok_or(LoadError::InvalidField {
                        context: context.clone(),
                        field: "children",
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let transform = if let Some(matrix) = node.get("matrix") {
                let matrix = floats::<16>(matrix, &context, "matrix")?;
                Transform::Matrix(Mat4::from_cols_array(&matrix))
            } else {
                let translation = match node.get("translation") {
                    Some(value) => Vec3::from_array(floats::<3>(value, &context, "translation")?),
                    None => Vec3::ZERO,
                };
                let rotation = match node.get("rotation") {
                    Some(value) => Quat::from_array(floats::<4>(value, &context, "rotation")?),
                    None => Quat::IDENTITY,
                };
                let scale = match node.get("scale") {
                    Some(value) => Vec3::from_array(floats::<3>(value, &context, "scale")?),
                    None => Vec3::ONE,
                };
                Transform::Trs {
                    translation,
                    rotation,
                    scale,
                }
            };
            nodes.push(Node {
                mesh: optional_usize(node, "mesh", &context)?,
                transform,
                children,
            });
        }

        let mut scenes = Vec::new();
        for (i, scene) in optional_array(gltf, "scenes", "root")?.iter().enumerate() {
            let context = format!("scene {i}");
            let scene = object(scene, &context)?;
            let nodes = optional_array(scene, "nodes", &context)?
                .iter()
                .map(|node| {
                    take_usize(node).ok_or(LoadError::InvalidField {
                        context: context.clone(),
                        field: "nodes",
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            scenes.push(Scene { nodes });
        }

        let default_scene = optional_usize(gltf, "scene", "root")?;
        if let Some(scene) = default_scene {
            if scene >= scenes.len() {
                return Err(LoadError::DefaultScene {
                    scene,
                    count: scenes.len(),
                });
            }
        }

        log::info!(
            "loaded glTF: {} buffers, {} accessors, {} meshes, {} nodes, {} scenes",
            buffers.len(),
            accessors.len(),
            meshes.len(),
            nodes.len(),
            scenes.len(),
        );

        Ok(Model {
            buffers,
            buffer_views,
            accessors,
            meshes,
            nodes,
            scenes,
            default_scene,
        })
    }

    fn warn(&mut self, warning: String) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }
}

fn read(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Splits a GLB container into its JSON text and optional binary chunk.
fn split_glb(bytes: &[u8]) -> Result<(&str, Option<&[u8]>), LoadError> {
    let read_u32 = |offset: usize| -> Option<u32> {
        let word = bytes.get(offset..offset + 4)?;
        Some(u32::from_le_bytes(word.try_into().ok()?))
    };
    if read_u32(4) != Some(2) {
        return Err(LoadError::Glb("only version 2 is supported"));
    }
    let length = read_u32(8).ok_or(LoadError::Glb("truncated header"))? as usize;
    if length > bytes.len() {
        return Err(LoadError::Glb("declared length exceeds file size"));
    }

    let mut json = None;
    let mut bin = None;
    let mut offset = 12;
    while offset + 8 <= length {
        let chunk_length = read_u32(offset).ok_or(LoadError::Glb("truncated chunk"))? as usize;
        let chunk_type = read_u32(offset + 4).ok_or(LoadError::Glb("truncated chunk"))?;
        let data = bytes
            .get(offset + 8..offset + 8 + chunk_length)
            .ok_or(LoadError::Glb("chunk exceeds file size"))?;
        match chunk_type {
            GLB_CHUNK_JSON if json.is_none() => json = Some(data),
            GLB_CHUNK_BIN if bin.is_none() => bin = Some(data),
            _ => {}
        }
        offset += 8 + chunk_length;
    }

    let json = json.ok_or(LoadError::Glb("missing JSON chunk"))?;
    let json = std::str::from_utf8(json).map_err(|_| LoadError::Glb("JSON chunk is not UTF-8"))?;
    // The JSON chunk is padded with spaces to a 4-byte boundary.
    Ok((json.trim_end_matches([' ', '\0']), bin))
}

/// Decodes the part of a `data:` URI after the scheme. Only base64 payloads
/// are accepted; the media type is not checked.
fn decode_data_uri(data_uri: &str) -> Option<Vec<u8>> {
    let (_, encoded) = data_uri.split_once(";base64,")?;
    base64::engine::general_purpose::STANDARD.decode(encoded).ok()
}

fn object<'a>(value: &'a JsonValue, context: &str) -> Result<&'a JsonObject, LoadError> {
    value
        .get::<JsonObject>()
        .ok_or_else(|| LoadError::Json(format!("{context} is not an object")))
}

fn array<'a>(
    value: &'a JsonValue,
    context: &str,
    field: &'static str,
) -> Result<&'a [JsonValue], LoadError> {
    value
        .get::<Vec<JsonValue>>()
        .map(Vec::as_slice)
        .ok_or(LoadError::InvalidField {
            context: context.to_string(),
            field,
        })
}

/// Returns the array under `field`, or an empty slice if it's not there.
fn optional_array<'a>(
    object: &'a JsonObject,
    field: &'static str,
    context: &str,
) -> Result<&'a [JsonValue], LoadError> {
    match object.get(field) {
        Some(value) => array(value, context, field),
        None => Ok(&[]),
    }
}

fn string<'a>(value: &'a JsonValue, context: &str, field: &'static str) -> Result<&'a str, LoadError> {
    value
        .get::<String>()
        .map(String::as_str)
        .ok_or(LoadError::InvalidField {
            context: context.to_string(),
            field,
        })
}

/// Largest integer an f64 holds exactly. Bigger JSON numbers are rejected
/// instead of being rounded or saturated.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Return usize if the JsonValue is a non-negative integer.
fn take_usize(value: &JsonValue) -> Option<usize> {
    let number = *value.get::<f64>()?;
    let valid = number >= 0.0
        && number.fract() == 0.0
        && number <= MAX_EXACT_INTEGER
        && number <= usize::MAX as f64;
    valid.then_some(number as usize)
}

fn required_usize(object: &JsonObject, field: &'static str, context: &str) -> Result<usize, LoadError> {
    optional_usize(object, field, context)?.ok_or(LoadError::MissingField {
        context: context.to_string(),
        field,
    })
}

fn optional_usize(
    object: &JsonObject,
    field: &'static str,
    context: &str,
) -> Result<Option<usize>, LoadError> {
    match object.get(field) {
        Some(value) => take_usize(value).map(Some).ok_or(LoadError::InvalidField {
            context: context.to_string(),
            field,
        }),
        None => Ok(None),
    }
}

/// Reads a fixed-size array of numbers, e.g. a translation or a matrix.
fn floats<const N: usize>(
    value: &JsonValue,
    context: &str,
    field: &'static str,
) -> Result<[f32; N], LoadError> {
    let invalid = || LoadError::InvalidField {
        context: context.to_string(),
        field,
    };
    let values = array(value, context, field)?;
    if values.len() != N {
        return Err(invalid());
    }
    let mut result = [0.0; N];
    for (slot, value) in result.iter_mut().zip(values) {
        *slot = *value.get::<f64>().ok_or_else(invalid)? as f32;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [
            { "mesh": 0, "children": [1], "translation": [1, 2, 3] },
            { "matrix": [1,0,0,0, 0,1,0,0, 0,0,1,0, 4,5,6,1] }
        ],
        "meshes": [{
            "primitives": [{
                "attributes": { "POSITION": 1, "COLOR_0": 1 },
                "indices": 0
            }]
        }],
        "buffers": [{ "uri": "triangle.bin", "byteLength": 44 }],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 6, "target": 34963 },
            { "buffer": 0, "byteOffset": 8, "byteLength": 36, "byteStride": 12, "target": 34962 }
        ],
        "accessors": [
            { "bufferView": 0, "componentType": 5123, "count": 3, "type": "SCALAR" },
            { "bufferView": 1, "byteOffset": 0, "componentType": 5126, "count": 3, "type": "VEC3" }
        ],
        "materials": [{ "name": "ignored" }]
    }"#;

    fn load_triangle() -> Model {
        let bytes = [7u8; 44];
        GltfLoader::new()
            .load_gltf(TRIANGLE, &[("triangle.bin", &bytes)])
            .unwrap()
    }

    #[test]
    fn loads_the_geometry_subset() {
        let model = load_triangle();
        assert_eq!(1, model.buffers.len());
        assert_eq!(44, model.buffers[0].len());
        assert_eq!(Some(0), model.default_scene);
        assert_eq!(vec![0], model.scenes[0].nodes);

        assert_eq!(
            BufferView {
                buffer: 0,
                byte_offset: 8,
                byte_length: 36,
                byte_stride: Some(12),
                target: Some(BufferTarget::ArrayBuffer),
            },
            model.buffer_views[1],
        );
        assert_eq!(ComponentType::UnsignedShort, model.accessors[0].component_type);
        assert_eq!(AccessorType::Vec3, model.accessors[1].accessor_type);
        assert_eq!(3, model.accessors[1].count);

        let primitive = &model.meshes[0].primitives[0];
        assert_eq!(Some(0), primitive.indices);
        assert_eq!(DrawMode::Triangles, primitive.mode);
        assert_eq!(Some(&1), primitive.attributes.get("POSITION"));
        assert_eq!(Some(&1), primitive.attributes.get("COLOR_0"));
    }

    #[test]
    fn loads_node_transforms() {
        let model = load_triangle();
        assert_eq!(Some(0), model.nodes[0].mesh);
        assert_eq!(vec![1], model.nodes[0].children);
        assert_eq!(
            Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
            model.nodes[0].transform.local_matrix(),
        );
        assert_eq!(
            Mat4::from_translation(Vec3::new(4.0, 5.0, 6.0)),
            model.nodes[1].transform.local_matrix(),
        );
        assert_eq!(None, model.nodes[1].mesh);
    }

    #[test]
    fn missing_default_scene_is_not_an_error() {
        let json = r#"{ "scenes": [{ "nodes": [] }], "nodes": [] }"#;
        let model = GltfLoader::new().load_gltf(json, &[]).unwrap();
        assert_eq!(None, model.default_scene);
        assert!(model.meshes.is_empty());
    }

    #[test]
    fn default_scene_out_of_range_is_rejected() {
        let json = r#"{ "scene": 2, "scenes": [{ "nodes": [] }] }"#;
        let err = GltfLoader::new().load_gltf(json, &[]).unwrap_err();
        assert!(matches!(err, LoadError::DefaultScene { scene: 2, count: 1 }));
    }

    #[test]
    fn embedded_base64_buffers_are_decoded() {
        // "AQIDBA==" is [1, 2, 3, 4].
        let json = r#"{ "buffers": [
            { "uri": "data:application/octet-stream;base64,AQIDBA==", "byteLength": 3 },
            { "uri": "data:application/gltf-buffer;base64,AQIDBA==", "byteLength": 4 }
        ] }"#;
        let model = GltfLoader::new().load_gltf(json, &[]).unwrap();
        assert_eq!(vec![1, 2, 3], model.buffers[0]);
        assert_eq!(vec![1, 2, 3, 4], model.buffers[1]);
    }

    #[test]
    fn malformed_data_uri_is_rejected() {
        let json = r#"{ "buffers": [{ "uri": "data:application/octet-stream;base64,@@@", "byteLength": 3 }] }"#;
        let err = GltfLoader::new().load_gltf(json, &[]).unwrap_err();
        assert!(matches!(err, LoadError::DataUri { index: 0 }));

        let json = r#"{ "buffers": [{ "uri": "data:text/plain,hello", "byteLength": 5 }] }"#;
        let err = GltfLoader::new().load_gltf(json, &[]).unwrap_err();
        assert!(matches!(err, LoadError::DataUri { index: 0 }));
    }

    #[test]
    fn huge_numbers_are_invalid_instead_of_saturated() {
        let json = r#"{ "bufferViews": [{ "buffer": 0, "byteOffset": 1e30, "byteLength": 4 }] }"#;
        let err = GltfLoader::new().load_gltf(json, &[]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidField {
                field: "byteOffset",
                ..
            }
        ));
    }

    #[test]
    fn missing_buffer_resource_is_reported() {
        let err = GltfLoader::new().load_gltf(TRIANGLE, &[]).unwrap_err();
        assert!(matches!(err, LoadError::MissingResource { index: 0, .. }));
    }

    #[test]
    fn short_buffer_is_rejected() {
        let bytes = [0u8; 40];
        let err = GltfLoader::new()
            .load_gltf(TRIANGLE, &[("triangle.bin", &bytes)])
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::ByteLength {
                index: 0,
                declared: 44,
                available: 40
            }
        ));
    }

    #[test]
    fn bad_component_type_names_the_field() {
        let json = r#"{ "accessors": [{ "bufferView": 0, "componentType": 1, "count": 1, "type": "VEC3" }] }"#;
        let err = GltfLoader::new().load_gltf(json, &[]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidField {
                field: "componentType",
                ..
            }
        ));
    }

    #[test]
    fn required_extensions_produce_warnings() {
        let json = r#"{ "extensionsRequired": ["KHR_draco_mesh_compression"] }"#;
        let mut loader = GltfLoader::new();
        loader.load_gltf(json, &[]).unwrap();
        assert_eq!(1, loader.warnings().len());
        assert!(loader.warnings()[0].contains("KHR_draco_mesh_compression"));
    }

    #[test]
    fn glb_container_is_split_into_json_and_bin() {
        let json = br#"{"buffers":[{"byteLength":5}]}  "#;
        let bin = [1u8, 2, 3, 4, 5, 0, 0, 0];
        let mut glb = Vec::new();
        glb.extend_from_slice(GLB_MAGIC);
        glb.extend_from_slice(&2u32.to_le_bytes());
        glb.extend_from_slice(&((12 + 8 + json.len() + 8 + bin.len()) as u32).to_le_bytes());
        glb.extend_from_slice(&(json.len() as u32).to_le_bytes());
        glb.extend_from_slice(&GLB_CHUNK_JSON.to_le_bytes());
        glb.extend_from_slice(json);
        glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        glb.extend_from_slice(&GLB_CHUNK_BIN.to_le_bytes());
        glb.extend_from_slice(&bin);

        let (json_text, bin_chunk) = split_glb(&glb).unwrap();
        let mut loader = GltfLoader::new();
        let model = loader
            .parse(json_text, |uri| {
                assert_eq!(None, uri);
                bin_chunk.map(<[u8]>::to_vec)
            })
            .unwrap();
        // The chunk padding is dropped.
        assert_eq!(vec![1, 2, 3, 4, 5], model.buffers[0]);
    }

    #[test]
    fn glb_with_wrong_version_is_rejected() {
        let mut glb = Vec::new();
        glb.extend_from_slice(GLB_MAGIC);
        glb.extend_from_slice(&1u32.to_le_bytes());
        glb.extend_from_slice(&12u32.to_le_bytes());
        assert!(matches!(split_glb(&glb), Err(LoadError::Glb(_))));
    }
}
