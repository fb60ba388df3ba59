//! Shared types: the per-frame uniform block and per-vertex inputs/outputs.
//!
//! # Invariants
//! - `FrameState` byte layout is fixed; shaders bind it by offset.
//! - Vertex outputs are transient and owned by no one.

mod types;

pub use types::{FieldLayout, FrameParams, FrameState, VertexInput, VertexOutput};
