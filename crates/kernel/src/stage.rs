use horizon_common::{FrameState, VertexInput, VertexOutput};

/// A per-vertex program that reads the shared frame block.
///
/// Implementations must be pure: the same frame and input always give the
/// same output, and nothing is written to shared state. Stages that share
/// the `FrameState` layout may ignore any of its fields.
pub trait VertexStage: Sync {
    /// Short name used in logs and spans.
    fn name(&self) -> &'static str;

    /// Process a single vertex.
    fn process(&self, frame: &FrameState, input: VertexInput) -> VertexOutput;
}

impl<S: VertexStage + ?Sized> VertexStage for &S {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn process(&self, frame: &FrameState, input: VertexInput) -> VertexOutput {
        (**self).process(frame, input)
    }
}
