//! A fixed camera. Moving it around is left to whoever owns it; the renderer
//! only needs a view matrix and a projection matrix per frame.

use glam::{Mat4, Vec3};

/// Vertical field of view of the projection, in degrees.
pub const FIELD_OF_VIEW_DEGREES: f32 = 70.0;
/// How far the projection reaches when nothing else is known about the scene.
pub const DEFAULT_MAX_DISTANCE: f32 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
}

impl Default for Camera {
    /// At the origin, looking down -Z.
    fn default() -> Self {
        Camera {
            eye: Vec3::ZERO,
            center: Vec3::NEG_Z,
            up: Vec3::Y,
        }
    }
}

impl Camera {
    /// Builds a camera from the nine `--lookat` numbers: eye, center, up.
    pub fn from_lookat(values: &[f32]) -> Option<Camera> {
        let values: &[f32; 9] = values.try_into().ok()?;
        Some(Camera {
            eye: Vec3::from_slice(&values[0..3]),
            center: Vec3::from_slice(&values[3..6]),
            up: Vec3::from_slice(&values[6..9]),
        })
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.center, self.up)
    }

    /// The `--lookat` argument that recreates this camera.
    pub fn to_lookat_arg(&self) -> String {
        [self.eye, self.center, self.up]
            .iter()
            .flat_map(|v| v.to_array())
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Perspective projection for a scene reaching `max_distance` units from the
/// camera. Non-positive distances fall back to 100.
pub fn projection_matrix(aspect_ratio: f32, max_distance: f32) -> Mat4 {
    let max_distance = if max_distance > 0.0 { max_distance } else { 100.0 };
    Mat4::perspective_rh_gl(
        FIELD_OF_VIEW_DEGREES.to_radians(),
        aspect_ratio,
        0.001 * max_distance,
        1.5 * max_distance,
    )
}
