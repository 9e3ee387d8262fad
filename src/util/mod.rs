//! Shared utilities for the render loop.

pub mod frame_timing;
