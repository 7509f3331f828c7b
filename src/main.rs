use std::error::Error;
use std::ffi::c_void;
use std::fmt::Display;

use anyhow::Context;
use clap::Parser;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::video::GLProfile;

use gltf_viewer::asset::GltfLoader;
use gltf_viewer::camera;
use gltf_viewer::config::Config;
use gltf_viewer::renderer::gl::GlBackend;
use gltf_viewer::renderer::program::ShaderSources;
use gltf_viewer::renderer::Renderer;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::parse();
    let camera = config.camera()?;

    let mut loader = GltfLoader::new();
    let model = loader
        .load_file(&config.file)
        .with_context(|| format!("loading {}", config.file.display()))?;
    let shaders = ShaderSources::load(
        config.vertex_shader.as_deref(),
        config.fragment_shader.as_deref(),
    )
    .context("reading shader sources")?;

    let sdl_context = sdl2::init().map_err(SdlErr)?;
    let video_subsystem = sdl_context.video().map_err(SdlErr)?;
    let gl_attr = video_subsystem.gl_attr();
    gl_attr.set_context_profile(GLProfile::GLES);
    gl_attr.set_context_version(3, 0);
    gl_attr.set_depth_size(24);
    // Linear->SRGB conversion is done in shader, thanks to lacking WebGL support.
    gl_attr.set_framebuffer_srgb_compatible(false);
    let mut window_builder =
        video_subsystem.window(env!("CARGO_PKG_NAME"), config.width, config.height);
    window_builder.resizable().opengl();
    if config.output.is_some() {
        window_builder.hidden();
    }
    let window = window_builder.build()?;
    let _gl_context = window.gl_create_context().map_err(SdlErr)?;
    if let Err(err) = video_subsystem.gl_set_swap_interval(1) {
        log::warn!("could not enable vsync: {err}");
    }

    let backend =
        GlBackend::load_with(|s| video_subsystem.gl_get_proc_address(s) as *const c_void);
    let (w, h) = window.drawable_size();
    // Dropped before the GL context, declared after it.
    let mut renderer = Renderer::new(backend, model, &shaders, w as i32, h as i32)
        .context("preparing the scene for rendering")?;
    let view = camera.view_matrix();
    let mut projection =
        camera::projection_matrix(renderer.aspect_ratio(), camera::DEFAULT_MAX_DISTANCE);

    if let Some(output) = &config.output {
        renderer.render(view, projection)?;
        renderer
            .capture()
            .save(output)
            .with_context(|| format!("writing {}", output.display()))?;
        log::info!("wrote a frame to {}", output.display());
        return Ok(());
    }

    log::info!("camera: --lookat {}", camera.to_lookat_arg());
    let mut event_pump = sdl_context.event_pump().map_err(SdlErr)?;
    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyUp {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..),
                    ..
                } => {
                    let (w, h) = window.drawable_size();
                    renderer.resize(w as i32, h as i32);
                    projection = camera::projection_matrix(
                        renderer.aspect_ratio(),
                        camera::DEFAULT_MAX_DISTANCE,
                    );
                }
                _ => {}
            }
        }

        renderer.render(view, projection)?;
        window.gl_swap_window();
    }

    Ok(())
}

#[derive(Debug)]
pub struct SdlErr(String);
impl Display for SdlErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sdl error: {}", self.0)
    }
}
impl Error for SdlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}
