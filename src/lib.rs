//! Renders the default scene of a glTF asset with OpenGL ES 3.0.
//!
//! Loading goes [`asset::GltfLoader`] → [`asset::Model`], then
//! [`renderer::buffers::upload_buffers`] and
//! [`renderer::fetch::build_fetch_configs`] turn the model into GPU state once,
//! and [`renderer::scene::draw_scene`] draws it every frame.

pub mod asset;
pub mod camera;
pub mod config;
pub mod renderer;
