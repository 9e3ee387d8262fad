//! Free-fly camera with a yaw/pitch orientation about a fixed world up.
//!
//! The camera owns its position and Euler angles and derives an orthonormal
//! `{right, up, forward}` basis from them whenever the angles change. The
//! basis fields are never written directly from outside; mouse-look, zoom,
//! and movement all go through the mutators, which clamp out-of-range input
//! instead of rejecting it. All displacement scales with the caller-supplied
//! frame delta, so movement speed is frame-rate independent.

use crate::math::{Mat4, Vec3};

/// Minimum vertical field of view, in degrees.
pub const FOVY_MIN: f32 = 1.0;
/// Maximum vertical field of view, in degrees.
pub const FOVY_MAX: f32 = 90.0;

// Keeping pitch short of +/-90 keeps `forward` off the world-up pole, so
// the basis cross products below never degenerate.
const PITCH_LIMIT: f32 = 89.0;

/// Discrete movement directions, one per held movement key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Along `forward`.
    Forward,
    /// Against `forward`.
    Backward,
    /// Against `right`.
    Left,
    /// Along `right`.
    Right,
    /// Along `up`.
    Up,
    /// Against `up`.
    Down,
}

/// Mouse-look offsets for one frame, in pixels. `dy` is positive when the
/// cursor moved toward the top of the window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseDelta {
    /// Horizontal offset (positive = right).
    pub dx: f32,
    /// Vertical offset (positive = up).
    pub dy: f32,
}

/// Free-fly perspective camera.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Fixed world-space up reference. Defines the roll-free yaw/pitch
    /// parameterization and is never mutated by camera operations.
    pub world_up: Vec3,
    /// World-space position.
    pub position: Vec3,

    // Derived coordinate system, recomputed whenever pitch/yaw change.
    forward: Vec3,
    right: Vec3,
    up: Vec3,

    // Euler angles, in degrees.
    pitch: f32,
    yaw: f32,

    /// Movement speed in world units per second.
    pub movement_speed: f32,
    /// Degrees of rotation per pixel of mouse movement.
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees, kept in `[FOVY_MIN, FOVY_MAX]`.
    pub fovy: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl Camera {
    /// Camera at `position` with the default orientation and tunables:
    /// pitch 0 and yaw -90 (looking down -Z), world up +Y, movement speed
    /// 2.5, mouse sensitivity 0.1, fovy 45, near 0.1, far 100.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self::with_world_up(Vec3::Y, position)
    }

    /// Camera with a custom world-up reference.
    #[must_use]
    pub fn with_world_up(world_up: Vec3, position: Vec3) -> Self {
        let forward = Vec3::new(0.0, 0.0, -1.0); // pitch = 0, yaw = -90
        let right = forward.cross(world_up).normalize();
        let up = right.cross(forward);
        Self {
            world_up,
            position,
            forward,
            right,
            up,
            pitch: 0.0,
            yaw: -90.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            fovy: 45.0,
            aspect: 4.0 / 3.0,
            near: 0.1,
            far: 100.0,
        }
    }

    /// The direction the camera looks along (unit length).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// The camera-local right axis (unit length).
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// The camera-local up axis (unit length).
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Pitch angle in degrees, always within `[-89, 89]`.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Yaw angle in degrees. Unbounded; it wraps naturally through the
    /// trigonometry in the basis computation.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// World-to-view matrix for the current position and basis.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.forward, self.up)
    }

    /// View-to-clip matrix (`[-1, 1]` clip depth) for the current
    /// projection parameters.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(
            self.fovy.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    /// Zoom by a scroll offset: scrolling up narrows the field of view.
    /// Saturates at `[FOVY_MIN, FOVY_MAX]`.
    pub fn update_fovy(&mut self, scroll_delta: f32) {
        self.fovy = (self.fovy - scroll_delta).clamp(FOVY_MIN, FOVY_MAX);
    }

    /// Mouse look: scales the offsets by the mouse sensitivity, saturates
    /// pitch at `[-89, 89]`, and recomputes the basis.
    pub fn update_angles(&mut self, delta: MouseDelta) {
        self.pitch = (self.pitch + delta.dy * self.mouse_sensitivity)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw += delta.dx * self.mouse_sensitivity;
        self.refresh_coordinate_system();
    }

    /// Move along the camera basis. Displacement is
    /// `movement_speed * delta_time`; orientation is untouched.
    pub fn update_position(&mut self, movement: Movement, delta_time: f32) {
        let step = self.movement_speed * delta_time;
        match movement {
            Movement::Forward => self.position += self.forward * step,
            Movement::Backward => self.position -= self.forward * step,
            Movement::Left => self.position -= self.right * step,
            Movement::Right => self.position += self.right * step,
            Movement::Up => self.position += self.up * step,
            Movement::Down => self.position -= self.up * step,
        }
    }

    // Forward comes straight from the angles; right and up follow from it
    // so the triple stays orthonormal even though world_up is a constant.
    fn refresh_coordinate_system(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        self.forward = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.forward.cross(self.world_up).normalize();
        self.up = self.right.cross(self.forward);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Vec4;

    fn assert_vec3_eq(v: Vec3, expected: Vec3, epsilon: f32) {
        assert_relative_eq!(v.x, expected.x, epsilon = epsilon);
        assert_relative_eq!(v.y, expected.y, epsilon = epsilon);
        assert_relative_eq!(v.z, expected.z, epsilon = epsilon);
    }

    fn assert_orthonormal(camera: &Camera) {
        assert_relative_eq!(camera.forward().length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.right().length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.up().length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(
            camera.forward().dot(camera.right()),
            0.0,
            epsilon = 1e-5
        );
        assert_relative_eq!(
            camera.forward().dot(camera.up()),
            0.0,
            epsilon = 1e-5
        );
        assert_relative_eq!(
            camera.right().dot(camera.up()),
            0.0,
            epsilon = 1e-5
        );
    }

    #[test]
    fn default_orientation_looks_down_minus_z() {
        let camera = Camera::new(Vec3::ZERO);
        assert_vec3_eq(camera.forward(), Vec3::new(0.0, 0.0, -1.0), 1e-6);
        assert_vec3_eq(camera.right(), Vec3::new(1.0, 0.0, 0.0), 1e-6);
        assert_vec3_eq(camera.up(), Vec3::new(0.0, 1.0, 0.0), 1e-6);
        assert_eq!(camera.pitch(), 0.0);
        assert_eq!(camera.yaw(), -90.0);
    }

    #[test]
    fn quarter_yaw_turns_reach_every_axis() {
        let mut camera = Camera::new(Vec3::ZERO);
        let quarter_turn = 90.0 / camera.mouse_sensitivity;

        // yaw -90 -> 0: facing +X
        camera.update_angles(MouseDelta {
            dx: quarter_turn,
            dy: 0.0,
        });
        assert_vec3_eq(camera.forward(), Vec3::new(1.0, 0.0, 0.0), 1e-4);
        assert_orthonormal(&camera);

        // yaw 0 -> -180: facing -X
        camera.update_angles(MouseDelta {
            dx: -2.0 * quarter_turn,
            dy: 0.0,
        });
        assert_vec3_eq(camera.forward(), Vec3::new(-1.0, 0.0, 0.0), 1e-4);
        assert_orthonormal(&camera);
    }

    #[test]
    fn basis_stays_orthonormal_under_arbitrary_mouse_input() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        let offsets = [
            (250.0, 80.0),
            (-1000.0, 500.0),
            (13.0, -2000.0),
            (0.5, 0.5),
            (4000.0, 4000.0),
        ];
        for (dx, dy) in offsets {
            camera.update_angles(MouseDelta { dx, dy });
            assert_orthonormal(&camera);
            assert!(camera.pitch().abs() <= 89.0);
        }
    }

    #[test]
    fn pitch_saturates_instead_of_flipping() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.update_angles(MouseDelta { dx: 0.0, dy: 1e6 });
        assert_eq!(camera.pitch(), 89.0);
        camera.update_angles(MouseDelta { dx: 0.0, dy: -1e7 });
        assert_eq!(camera.pitch(), -89.0);
        assert_orthonormal(&camera);
    }

    #[test]
    fn fovy_saturates_at_both_ends() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.update_fovy(1000.0);
        assert_eq!(camera.fovy, FOVY_MIN);
        camera.update_fovy(-1000.0);
        assert_eq!(camera.fovy, FOVY_MAX);
        camera.update_fovy(30.0);
        assert_eq!(camera.fovy, 60.0);
    }

    #[test]
    fn movement_scales_with_delta_time() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.update_position(Movement::Forward, 1.0);
        assert_vec3_eq(camera.position, Vec3::new(0.0, 0.0, -2.5), 1e-5);

        let mut slow = Camera::new(Vec3::ZERO);
        slow.update_position(Movement::Forward, 0.1);
        assert_vec3_eq(slow.position, Vec3::new(0.0, 0.0, -0.25), 1e-5);
    }

    #[test]
    fn six_movement_directions_cover_the_basis() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.movement_speed = 1.0;
        camera.update_position(Movement::Right, 1.0);
        camera.update_position(Movement::Up, 1.0);
        camera.update_position(Movement::Backward, 1.0);
        assert_vec3_eq(camera.position, Vec3::new(1.0, 1.0, 1.0), 1e-5);
        camera.update_position(Movement::Left, 1.0);
        camera.update_position(Movement::Down, 1.0);
        camera.update_position(Movement::Forward, 1.0);
        assert_vec3_eq(camera.position, Vec3::ZERO, 1e-5);
    }

    #[test]
    fn movement_does_not_touch_orientation() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.update_angles(MouseDelta { dx: 123.0, dy: -45.0 });
        let (forward, pitch, yaw) =
            (camera.forward(), camera.pitch(), camera.yaw());
        camera.update_position(Movement::Left, 0.5);
        assert_eq!(camera.forward(), forward);
        assert_eq!(camera.pitch(), pitch);
        assert_eq!(camera.yaw(), yaw);
    }

    #[test]
    fn view_matrix_inverse_recovers_position() {
        let mut camera = Camera::new(Vec3::new(3.0, -1.0, 2.0));
        camera.update_angles(MouseDelta { dx: 200.0, dy: 150.0 });
        let camera_to_world = camera.view_matrix().inverse();
        assert_relative_eq!(
            camera_to_world.m[0][3],
            camera.position.x,
            epsilon = 1e-4
        );
        assert_relative_eq!(
            camera_to_world.m[1][3],
            camera.position.y,
            epsilon = 1e-4
        );
        assert_relative_eq!(
            camera_to_world.m[2][3],
            camera.position.z,
            epsilon = 1e-4
        );
    }

    #[test]
    fn projection_puts_near_plane_at_minus_one() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.aspect = 1.0;
        let clip = camera.projection_matrix()
            * Vec4::new(0.0, 0.0, -camera.near, 1.0);
        assert_relative_eq!(clip.z / clip.w, -1.0, epsilon = 1e-4);
    }
}
