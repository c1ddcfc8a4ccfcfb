//! # Camera Implementation
//!
//! This module contains the view and projection math used to place chunk
//! models on screen:
//! - `Camera`: position plus yaw/pitch orientation, producing a right-handed view matrix
//! - `Projection`: perspective projection settings
//!
//! Matrices follow the OpenGL clip-space convention (`z` in `[-1, 1]`).

use cgmath::*;
use std::f32::consts::FRAC_PI_2;

/// Safe limit for pitch to prevent gimbal lock
const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// Represents a first-person camera in 3D space.
///
/// A yaw of zero looks along `+x`; positive yaw turns towards `+z`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation (around X axis) in radians
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// Pitch is clamped just short of straight up or down.
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: Rad(0.0),
        };
        camera.set_pitch(pitch);
        camera
    }

    /// Sets the pitch, clamped to avoid a degenerate view matrix.
    pub fn set_pitch<P: Into<Rad<f32>>>(&mut self, pitch: P) {
        let pitch: Rad<f32> = pitch.into();
        self.pitch = Rad(pitch.0.clamp(-SAFE_FRAC_PI_2, SAFE_FRAC_PI_2));
    }

    /// Normalized direction the camera is facing.
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// Calculates the view matrix, which transforms world coordinates to camera space.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.forward(), Vector3::unit_y())
    }
}

/// Represents a camera's projection matrix and related parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Vertical field of view in radians
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a new projection for a `width` x `height` viewport.
    ///
    /// # Arguments
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels (a zero height is treated as one)
    /// * `fovy` - Vertical field of view (can be any type convertible to `Rad<f32>`)
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: aspect_ratio(width, height),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    /// Current aspect ratio.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Calculates the perspective projection matrix.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

/// Combined projection and view matrix for a frame.
pub fn view_projection(camera: &Camera, projection: &Projection) -> Matrix4<f32> {
    projection.calc_matrix() * camera.calc_matrix()
}

/// Model-view-projection matrix for a model placed at `placement`.
pub fn model_view_projection(view_projection: Matrix4<f32>, placement: Matrix4<f32>) -> Matrix4<f32> {
    view_projection * placement
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip_to_ndc(clip: Vector4<f32>) -> Vector3<f32> {
        clip.truncate() / clip.w
    }

    #[test]
    fn zero_yaw_looks_down_positive_x() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        let forward = camera.forward();
        assert!((forward - Vector3::unit_x()).magnitude() < 1e-6);

        // A point straight ahead lands in front of a right-handed camera (negative z).
        let view = camera.calc_matrix() * Vector4::new(5.0, 0.0, 0.0, 1.0);
        assert!((view.z + 5.0).abs() < 1e-5);
        assert!(view.x.abs() < 1e-5 && view.y.abs() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(120.0));
        assert!(camera.pitch.0 < FRAC_PI_2);
        assert!(camera.forward().y > 0.99);
    }

    #[test]
    fn points_ahead_project_to_the_screen_center() {
        let camera = Camera::new(Point3::new(-10.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        let projection = Projection::new(800, 600, Deg(45.0), 0.1, 100.0);
        let vp = view_projection(&camera, &projection);

        let ndc = clip_to_ndc(vp * Vector4::new(0.0, 0.0, 0.0, 1.0));
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn placement_moves_the_model_before_projection() {
        let camera = Camera::new(Point3::new(-10.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        let projection = Projection::new(1, 1, Deg(90.0), 0.1, 100.0);
        let vp = view_projection(&camera, &projection);
        let placement = Matrix4::from_translation(Vector3::new(4.0, 0.0, 0.0));

        let mvp = model_view_projection(vp, placement);
        let direct = vp * Vector4::new(4.0, 0.0, 0.0, 1.0);
        let placed = mvp * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((direct - placed).magnitude() < 1e-5);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut projection = Projection::new(100, 100, Deg(60.0), 0.1, 10.0);
        assert_eq!(projection.aspect(), 1.0);
        projection.resize(200, 100);
        assert_eq!(projection.aspect(), 2.0);
        projection.resize(10, 0);
        assert_eq!(projection.aspect(), 10.0);
    }
}
