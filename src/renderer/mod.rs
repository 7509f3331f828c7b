use glam::Mat4;
use image::RgbaImage;

use crate::asset::Model;

pub mod backend;
pub mod buffers;
pub mod draw_calls;
mod error;
pub mod fetch;
pub mod gl;
pub mod program;
pub mod scene;

pub use error::RenderError;

use gl::GlBackend;
use program::{ShaderProgram, ShaderSources};
use scene::GpuScene;

/// Owns one loaded model and its GPU state: the buffers, the vertex arrays
/// built on them, and the program that draws them.
pub struct Renderer {
    backend: GlBackend,
    scene: Option<GpuScene>,
    program: ShaderProgram,
    width: i32,
    height: i32,
}

impl Renderer {
    /// Uploads `model` and builds everything needed to draw it. Fails without
    /// leaving anything behind if the model is malformed.
    pub fn new(
        mut backend: GlBackend,
        model: Model,
        shaders: &ShaderSources,
        width: i32,
        height: i32,
    ) -> Result<Renderer, RenderError> {
        log::info!(
            "OpenGL {} ({})",
            gl::get_string(gl::VERSION),
            gl::get_string(gl::RENDERER),
        );
        // Fails before any GPU object exists if the graph is malformed.
        scene::validate_scene_graph(&model)?;

        let program = program::create_program(shaders)?;
        let scene = match GpuScene::upload(&mut backend, model) {
            Ok(scene) => scene,
            Err(err) => {
                gl::call!(gl::DeleteProgram(program.program));
                return Err(err);
            }
        };
        log::info!(
            "uploaded {} buffers, built {} vertex arrays",
            scene.buffers().len(),
            scene.fetch().configs.len(),
        );

        gl::call!(gl::Viewport(0, 0, width, height));
        gl::call!(gl::Enable(gl::DEPTH_TEST));
        Ok(Renderer {
            backend,
            scene: Some(scene),
            program,
            width,
            height,
        })
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        gl::call!(gl::Viewport(0, 0, width, height));
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// The model this renderer was created with.
    pub fn model(&self) -> Option<&Model> {
        self.scene.as_ref().map(GpuScene::model)
    }

    /// Draws a frame of the model this renderer was created with.
    pub fn render(&mut self, view: Mat4, projection: Mat4) -> Result<(), RenderError> {
        gl::call!(gl::ClearColor(0.0, 0.0, 0.0, 1.0));
        gl::call!(gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT));
        gl::call!(gl::UseProgram(self.program.program));
        let Some(scene) = &self.scene else {
            return Ok(());
        };
        scene.draw(&mut self.backend, view, projection, &self.program.uniforms)
    }

    /// Reads back the framebuffer, top row first.
    pub fn capture(&self) -> RgbaImage {
        let (width, height) = (self.width.max(0) as u32, self.height.max(0) as u32);
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        gl::call!(gl::PixelStorei(gl::PACK_ALIGNMENT, 1));
        gl::call!(gl::ReadPixels(
            0,
            0,
            self.width,
            self.height,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            pixels.as_mut_ptr() as *mut std::ffi::c_void,
        ));
        // GL's origin is the bottom left.
        let row_length = width as usize * 4;
        let flipped = pixels
            .chunks_exact(row_length.max(1))
            .rev()
            .flatten()
            .copied()
            .collect::<Vec<u8>>();
        RgbaImage::from_raw(width, height, flipped).unwrap_or_else(|| RgbaImage::new(width, height))
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if let Some(scene) = self.scene.take() {
            scene.destroy(&mut self.backend);
        }
        gl::call!(gl::DeleteProgram(self.program.program));
    }
}
