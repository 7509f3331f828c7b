use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::camera::Camera;

#[derive(Error, Debug)]
#[error("--lookat takes 9 comma-separated numbers (eye, center, up), got {0}")]
pub struct InvalidLookat(usize);

/// Renders a glTF scene.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "gltf-viewer", version, about)]
pub struct Config {
    /// The .gltf or .glb file to view.
    pub file: PathBuf,

    /// Camera placement: eye_x,eye_y,eye_z,center_x,center_y,center_z,up_x,up_y,up_z
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub lookat: Option<Vec<f32>>,

    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// GLSL ES 3.00 vertex shader replacing the built-in one.
    #[arg(long)]
    pub vertex_shader: Option<PathBuf>,

    /// GLSL ES 3.00 fragment shader replacing the built-in one.
    #[arg(long)]
    pub fragment_shader: Option<PathBuf>,

    /// Render a single frame to this image file and exit.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Config {
    /// The camera from `--lookat`, or the default one.
    pub fn camera(&self) -> Result<Camera, InvalidLookat> {
        match &self.lookat {
            Some(values) => Camera::from_lookat(values).ok_or(InvalidLookat(values.len())),
            None => Ok(Camera::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["gltf-viewer", "scene.gltf"]).unwrap();
        assert_eq!(PathBuf::from("scene.gltf"), config.file);
        assert_eq!((1280, 720), (config.width, config.height));
        assert_eq!(None, config.output);
        assert_eq!(Camera::default(), config.camera().unwrap());
    }

    #[test]
    fn parses_every_option() {
        let config = Config::try_parse_from([
            "gltf-viewer",
            "--lookat",
            "0,1,-5,0,0,0,0,1,0",
            "--width",
            "640",
            "--height",
            "480",
            "--vertex-shader",
            "shaders/forward.vs.glsl",
            "--fragment-shader",
            "shaders/normals.fs.glsl",
            "--output",
            "frame.png",
            "models/box.glb",
        ])
        .unwrap();
        assert_eq!(PathBuf::from("models/box.glb"), config.file);
        assert_eq!((640, 480), (config.width, config.height));
        assert_eq!(Some(PathBuf::from("frame.png")), config.output);
        assert_eq!(
            Some(PathBuf::from("shaders/forward.vs.glsl")),
            config.vertex_shader,
        );
        let camera = config.camera().unwrap();
        assert_eq!(Vec3::new(0.0, 1.0, -5.0), camera.eye);
        assert_eq!(Vec3::Y, camera.up);
    }

    #[test]
    fn wrong_lookat_length_is_rejected() {
        let config =
            Config::try_parse_from(["gltf-viewer", "--lookat", "1,2,3", "scene.gltf"]).unwrap();
        assert_eq!(3, config.camera().unwrap_err().0);
    }

    #[test]
    fn file_is_required() {
        assert!(Config::try_parse_from(["gltf-viewer"]).is_err());
    }
}
