use glam::{Mat4, Vec3};

/// Fly camera with position, yaw, pitch, and projection parameters.
///
/// Orientation is plain Euler yaw/pitch with no clamping: holding pitch past
/// the pole flips the view. Compounded rotation can gimbal-lock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Translation speed, units per second.
    pub speed: f32,
    /// Radians of yaw/pitch per pixel of drag.
    pub sensitivity: f32,
    /// Radians per second for arrow-key turning.
    pub turn_rate: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            // On +Z, looking back at the cluster origin.
            position: Vec3::new(0.0, 0.0, 10.0),
            yaw: -90.0_f32.to_radians(),
            pitch: 0.0,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            speed: 6.0,
            sensitivity: 0.002,
            turn_rate: 1.2,
        }
    }
}

impl FlyCamera {
    /// Unit forward vector derived from yaw/pitch.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Unit right vector: forward crossed with world up.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Apply a drag rotation. Unclamped by design; see the type docs.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_faces_negative_z() {
        let cam = FlyCamera::default();
        let fwd = cam.forward();
        assert!(fwd.z < -0.99);
        assert!(fwd.x.abs() < 1e-6);
    }

    #[test]
    fn forward_and_right_are_unit_and_orthogonal() {
        let mut cam = FlyCamera::default();
        cam.yaw = 0.4;
        cam.pitch = -0.7;
        assert!((cam.forward().length() - 1.0).abs() < 1e-6);
        assert!((cam.right().length() - 1.0).abs() < 1e-6);
        assert!(cam.forward().dot(cam.right()).abs() < 1e-6);
    }

    #[test]
    fn view_projection_is_finite() {
        let cam = FlyCamera::default();
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn rotate_is_unclamped() {
        let mut cam = FlyCamera::default();
        // Drag far enough that a clamped camera would stop at the pole.
        cam.rotate(0.0, -2000.0);
        assert!(cam.pitch > std::f32::consts::FRAC_PI_2);
    }
}
