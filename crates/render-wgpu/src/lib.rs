//! wgpu render backend for horizon.
//!
//! Draws the sky cube through the distant-geometry vertex stage and a grid
//! floor through a sibling stage. Both bind the same `FrameState` uniform
//! block. Camera uses a fly-camera model with WASD + mouse look.
//!
//! # Invariants
//! - The frame block is uploaded once per frame, before any draw.
//! - WGSL `FrameState` declarations match the Rust layout byte for byte.
//! - The sky never writes depth.

mod camera;
mod gpu;
mod shaders;

pub use camera::FlyCamera;
pub use gpu::{FrameUniforms, SkyRenderer};
pub use shaders::{FRAME_STATE_WGSL, GRID_SHADER, SKY_SHADER};
