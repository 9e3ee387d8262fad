use serde::{Deserialize, Serialize};

use crate::camera::Camera;

/// Camera tunables applied to the free-fly camera at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Movement speed in world units per second.
    pub movement_speed: f32,
    /// Degrees of rotation per pixel of mouse movement.
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl CameraOptions {
    /// Copy these tunables onto `camera`.
    pub fn configure(&self, camera: &mut Camera) {
        camera.movement_speed = self.movement_speed;
        camera.mouse_sensitivity = self.mouse_sensitivity;
        camera.fovy = self.fovy;
        camera.near = self.znear;
        camera.far = self.zfar;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn configure_copies_tunables() {
        let opts = CameraOptions {
            movement_speed: 10.0,
            mouse_sensitivity: 0.25,
            fovy: 60.0,
            znear: 0.5,
            zfar: 500.0,
        };
        let mut camera = Camera::new(Vec3::ZERO);
        opts.configure(&mut camera);
        assert_eq!(camera.movement_speed, 10.0);
        assert_eq!(camera.mouse_sensitivity, 0.25);
        assert_eq!(camera.fovy, 60.0);
        assert_eq!(camera.near, 0.5);
        assert_eq!(camera.far, 500.0);
    }
}
