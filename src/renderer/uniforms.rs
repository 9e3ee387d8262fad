//! POD uniform structs and the clip-space conventions for uploading them.
//!
//! The math core is row-major with OpenGL-style `[-1, 1]` clip depth; WGSL
//! `mat4x4<f32>` is column-major and wgpu clip space wants `[0, 1]` depth.
//! Every matrix heading for the GPU therefore goes through
//! [`gl_to_wgpu`] (for projections) and `to_cols_array_2d` (the
//! transpose).

use bytemuck::{Pod, Zeroable};

use crate::camera::Camera;
use crate::math::{Mat4, Vec3};

// Remaps clip-space z from [-1, 1] to [0, 1] (z' = 0.5 * z + 0.5 * w).
const DEPTH_REMAP: Mat4 = Mat4 {
    m: [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 0.5, 0.5],
        [0.0, 0.0, 0.0, 1.0],
    ],
};

/// Convert a `[-1, 1]`-depth projection (or projection-view product) into
/// wgpu's `[0, 1]` depth range.
#[must_use]
pub fn gl_to_wgpu(projection: Mat4) -> Mat4 {
    DEPTH_REMAP * projection
}

/// Per-frame uniforms for the lit scene pass.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SceneUniform {
    /// World-to-view matrix (column-major).
    pub view: [[f32; 4]; 4],
    /// View-to-clip matrix (column-major, `[0, 1]` depth).
    pub proj: [[f32; 4]; 4],
    /// World-to-light-clip matrix for shadow lookups (column-major,
    /// `[0, 1]` depth).
    pub light_space: [[f32; 4]; 4],
    /// Camera world position (xyz; w unused).
    pub view_pos: [f32; 4],
    /// Light world position (xyz; w unused).
    pub light_pos: [f32; 4],
}

impl SceneUniform {
    /// Build the frame uniforms from the camera and light state.
    #[must_use]
    pub fn new(camera: &Camera, light: &DirectionalLight) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: gl_to_wgpu(camera.projection_matrix()).to_cols_array_2d(),
            light_space: gl_to_wgpu(light.space_matrix()).to_cols_array_2d(),
            view_pos: camera.position.extend(1.0).into(),
            light_pos: light.position.extend(1.0).into(),
        }
    }
}

/// Uniforms for the depth-only shadow pass.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ShadowUniform {
    /// World-to-light-clip matrix (column-major, `[0, 1]` depth).
    pub light_space: [[f32; 4]; 4],
}

/// Per-object uniforms, sliced out of one dynamic-offset buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ModelUniform {
    /// Object-to-world matrix (column-major).
    pub model: [[f32; 4]; 4],
    /// Normal matrix, the inverse transpose of `model` (column-major).
    pub normal: [[f32; 4]; 4],
}

impl ModelUniform {
    /// Build the per-object uniforms from an object-to-world transform.
    #[must_use]
    pub fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            // Uploading the inverse transpose column-major is the same
            // bytes as the row-major inverse.
            normal: model.inverse_transpose().to_cols_array_2d(),
        }
    }
}

/// Uniforms for the skybox pass.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SkyboxUniform {
    /// View matrix with its translation removed (column-major).
    pub view_rot: [[f32; 4]; 4],
    /// View-to-clip matrix (column-major, `[0, 1]` depth).
    pub proj: [[f32; 4]; 4],
}

impl SkyboxUniform {
    /// Build the skybox uniforms: the camera view with translation
    /// stripped, so the box never moves relative to the eye.
    #[must_use]
    pub fn new(camera: &Camera) -> Self {
        let mut view_rot = camera.view_matrix();
        view_rot.m[0][3] = 0.0;
        view_rot.m[1][3] = 0.0;
        view_rot.m[2][3] = 0.0;
        Self {
            view_rot: view_rot.to_cols_array_2d(),
            proj: gl_to_wgpu(camera.projection_matrix()).to_cols_array_2d(),
        }
    }
}

/// The directional light that casts the scene's shadows. Modeled with an
/// orthographic projection so all rays are parallel.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    /// World-space position the light rays emanate from.
    pub position: Vec3,
    /// Half-extent of the orthographic shadow volume in x/y.
    pub extent: f32,
    /// Near plane of the shadow volume.
    pub near: f32,
    /// Far plane of the shadow volume.
    pub far: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(-2.0, 4.0, -1.0),
            extent: 10.0,
            near: 1.0,
            far: 7.5,
        }
    }
}

impl DirectionalLight {
    /// World-to-light-view matrix (looking at the origin).
    #[must_use]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at(self.position, Vec3::ZERO, Vec3::Y)
    }

    /// Light-view-to-clip matrix (`[-1, 1]` depth).
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic(
            -self.extent,
            self.extent,
            -self.extent,
            self.extent,
            self.near,
            self.far,
        )
    }

    /// World-to-light-clip matrix (`[-1, 1]` depth).
    #[must_use]
    pub fn space_matrix(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Vec4;

    #[test]
    fn depth_remap_halves_the_clip_range() {
        let proj =
            Mat4::perspective(45.0_f32.to_radians(), 1.0, 0.1, 100.0);
        let remapped = gl_to_wgpu(proj);

        let near = remapped * Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-4);
        let far = remapped * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn depth_remap_leaves_xy_untouched() {
        let proj = Mat4::perspective(60.0_f32.to_radians(), 1.5, 0.5, 50.0);
        let p = Vec4::new(0.3, -0.7, -5.0, 1.0);
        let a = proj * p;
        let b = gl_to_wgpu(proj) * p;
        assert_relative_eq!(a.x, b.x, epsilon = 1e-6);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-6);
        assert_relative_eq!(a.w, b.w, epsilon = 1e-6);
    }

    #[test]
    fn skybox_uniform_strips_translation() {
        let mut camera = Camera::new(Vec3::new(10.0, 20.0, 30.0));
        camera.aspect = 1.0;
        let sky = SkyboxUniform::new(&camera);
        // Column-major layout: the translation sits in the last column,
        // which `to_cols_array_2d` stores as the last row.
        assert_eq!(sky.view_rot[3], [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn model_uniform_normal_matrix_for_rotation_equals_model() {
        // Pure rotations are orthonormal: inverse transpose == the matrix.
        let model = Mat4::from_rotation_y(0.8);
        let uniform = ModelUniform::new(model);
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(
                    uniform.normal[i][j],
                    uniform.model[i][j],
                    epsilon = 1e-5
                );
            }
        }
    }

    #[test]
    fn light_space_maps_scene_origin_inside_the_volume() {
        let light = DirectionalLight::default();
        let origin = light.space_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc_z = origin.z / origin.w;
        assert!(ndc_z > -1.0 && ndc_z < 1.0);
    }
}
