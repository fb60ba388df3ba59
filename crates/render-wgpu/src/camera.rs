use glam::{Mat4, Vec3};
use horizon_common::{FrameParams, FrameState};

/// Fly camera with position, yaw, pitch, and projection parameters.
///
/// The far plane defaults well beyond the sky distance so the sky cube's
/// corners are never clipped.
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.8, 0.0),
            yaw: -90.0_f32.to_radians(),
            pitch: 0.0,
            fov: 60.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 10_000.0,
            speed: 10.0,
            sensitivity: 0.003,
        }
    }
}

impl FlyCamera {
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn move_forward(&mut self, dt: f32) {
        let fwd = self.forward();
        self.position += fwd * self.speed * dt;
    }

    pub fn move_backward(&mut self, dt: f32) {
        let fwd = self.forward();
        self.position -= fwd * self.speed * dt;
    }

    pub fn move_left(&mut self, dt: f32) {
        let right = self.right();
        self.position -= right * self.speed * dt;
    }

    pub fn move_right(&mut self, dt: f32) {
        let right = self.right();
        self.position += right * self.speed * dt;
    }

    pub fn move_up(&mut self, dt: f32) {
        self.position.y += self.speed * dt;
    }

    pub fn move_down(&mut self, dt: f32) {
        self.position.y -= self.speed * dt;
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Build this frame's uniform block from the camera and host state.
    pub fn frame_state(&self, player_origin: Vec3, view_distance: f32, time: f32) -> FrameState {
        FrameState::new(FrameParams {
            view: self.view_matrix(),
            projection: self.projection_matrix(),
            camera_origin: self.position,
            player_origin,
            view_distance,
            time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_common::VertexInput;
    use horizon_kernel::{DISTANCE_SCALE, transform_vertex};
    use horizon_render::SKY_CUBE_VERTICES;

    #[test]
    fn default_camera() {
        let cam = FlyCamera::default();
        assert!(cam.position.y > 0.0);
        let vp = cam.projection_matrix() * cam.view_matrix();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn camera_movement() {
        let mut cam = FlyCamera::default();
        let start = cam.position;
        cam.move_forward(1.0);
        assert_ne!(cam.position, start);
    }

    #[test]
    fn far_plane_contains_sky() {
        let cam = FlyCamera::default();
        assert!(cam.far > DISTANCE_SCALE * 3.0_f32.sqrt());
    }

    #[test]
    fn frame_state_tracks_camera() {
        let mut cam = FlyCamera::default();
        cam.move_right(2.0);
        let frame = cam.frame_state(Vec3::new(1.0, 0.0, 0.0), 750.0, 4.0);
        assert_eq!(frame.camera_origin(), cam.position);
        assert_eq!(frame.view_matrix(), cam.view_matrix());
        assert_eq!(frame.view_distance(), 750.0);
        assert_eq!(frame.time(), 4.0);
    }

    #[test]
    fn sky_corners_stay_in_depth_range() {
        let mut cam = FlyCamera::default();
        for step in 0..8 {
            cam.rotate(100.0 * step as f32, 30.0);
            cam.move_forward(5.0);
            let frame = cam.frame_state(Vec3::ZERO, 1000.0, 0.0);
            for corner in SKY_CUBE_VERTICES {
                let clip = transform_vertex(&frame, corner).clip_position;
                // Only vertices in front of the camera reach the depth test.
                if clip.w > 0.0 {
                    let depth = clip.z / clip.w;
                    assert!(depth < 1.0, "corner {:?} beyond far plane", corner.position);
                }
            }
        }
    }

    #[test]
    fn walking_does_not_move_the_sky() {
        let mut cam = FlyCamera::default();
        let input = VertexInput::new(0.3, 0.2, -1.0);
        let before = transform_vertex(&cam.frame_state(Vec3::ZERO, 0.0, 0.0), input).ndc();
        cam.move_forward(50.0);
        cam.move_left(20.0);
        cam.move_up(5.0);
        let after = transform_vertex(&cam.frame_state(Vec3::ZERO, 0.0, 0.0), input).ndc();
        assert!(before.abs_diff_eq(after, 1e-3), "{before} vs {after}");
    }
}
