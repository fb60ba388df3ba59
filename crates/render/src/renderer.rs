use horizon_common::{FrameState, VertexInput};
use horizon_kernel::{DistantTransform, ParConfig, run_stage, world_position};
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads one frame's state and a fixed mesh, then produces
/// output. It never writes to the frame state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render the mesh for one frame.
    fn render(&self, frame: &FrameState, mesh: &[VertexInput]) -> Self::Output;
}

/// Debug text renderer: runs the sky stage on the CPU and prints what the
/// rasterizer would receive.
///
/// Useful for CLI output, logging, and testing the stage without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    dispatch: ParConfig,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dispatch(dispatch: ParConfig) -> Self {
        Self { dispatch }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &FrameState, mesh: &[VertexInput]) -> String {
        let outputs = run_stage(&DistantTransform, frame, mesh, &self.dispatch);
        let c = frame.camera_origin();

        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Sky Frame (vertices={}, view_distance={:.1}, time={:.2}) ===",
            mesh.len(),
            frame.view_distance(),
            frame.time()
        );
        let _ = writeln!(out, "Camera: origin=({:.1}, {:.1}, {:.1})", c.x, c.y, c.z);

        for (i, (input, output)) in mesh.iter().zip(&outputs).enumerate() {
            let p = input.position;
            let w = world_position(p, c);
            let clip = output.clip_position;
            let ndc = output.ndc();
            let _ = writeln!(
                out,
                "  [{i:>3}] local=({:.3}, {:.3}, {:.3}) world=({:.1}, {:.1}, {:.1}) clip=({:.2}, {:.2}, {:.2}, {:.2}) ndc=({:.4}, {:.4}, {:.6})",
                p.x, p.y, p.z, w.x, w.y, w.z, clip.x, clip.y, clip.z, clip.w, ndc.x, ndc.y, ndc.z
            );
        }

        tracing::debug!(vertices = mesh.len(), "debug frame rendered");
        out
    }
}
