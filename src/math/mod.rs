//! Scalar, vector, and matrix math for the demo renderer.
//!
//! Everything here is plain `f32` value-type computation: no allocation, no
//! I/O, no GPU types. Matrices are stored row-major (`m[row][col]`) and
//! compose with column vectors (`M * v`); the projection constructors emit
//! OpenGL-style `[-1, 1]` clip depth. Numerical degeneracies (normalizing a
//! zero vector, inverting a singular matrix) are precondition violations
//! that propagate `inf`/`NaN` rather than being guarded.

mod matrix;
mod scalar;
mod vector;

pub use matrix::{Mat3, Mat4};
pub use scalar::{fract, lerp, move_toward, remap, saturate, unlerp};
pub use vector::{Vec2, Vec3, Vec4};
