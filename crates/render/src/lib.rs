//! Rendering adapter: renderer-agnostic interface plus the sky asset.
//!
//! # Invariants
//! - Renderers read frame state; they never mutate it.
//! - The sky cube is a fixed, trusted asset. Nothing validates it at runtime.

mod mesh;
mod renderer;

pub use mesh::{SKY_CUBE_INDICES, SKY_CUBE_VERTICES};
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "horizon-render v0.1.0"
}
