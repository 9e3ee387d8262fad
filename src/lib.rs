//! Real-time 3D rendering demo built on wgpu.
//!
//! Gloam opens a window, loads shaders and textures, and drives a per-frame
//! render loop over a small shadow-mapped test scene (a wood-textured ground
//! plane, a few cubes, a skybox) steered by a free-fly camera.
//!
//! # Key entry points
//!
//! - [`math`] - scalar/vector/matrix math (row-major, column-vector
//!   convention)
//! - [`camera::Camera`] - yaw/pitch free-fly camera producing view and
//!   projection matrices
//! - [`options::Options`] - runtime configuration (window, camera tunables)
//! - [`viewer::Viewer`] - the winit event loop that ties everything together
//!
//! # Architecture
//!
//! The math and camera modules are pure computation over `f32` value types
//! and never touch the GPU. Each frame the viewer feeds input deltas into
//! the camera, then hands the camera to [`renderer::Renderer`], which runs
//! a depth-only shadow pass from a directional light, a shadow-mapped lit
//! pass, a skybox pass, and (while Shift is held) a fullscreen debug view
//! of the depth map. Matrices are row-major on the CPU and transposed on
//! uniform upload; projection matrices use OpenGL-style `[-1, 1]` clip
//! depth and the renderer remaps them into wgpu's `[0, 1]` range.

pub mod camera;
pub mod color;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod math;
pub mod options;
pub mod renderer;
pub mod util;
pub mod viewer;

pub use camera::Camera;
pub use error::GloamError;
pub use options::Options;
pub use viewer::Viewer;
