//! Host-side data-parallel dispatch of a vertex stage over a fixed vertex set.
//!
//! Every invocation reads its own input and the shared `&FrameState`, and
//! writes exactly one output slot. Workers get disjoint chunks of the input
//! and output slices through [`std::thread::scope`], so no locking is needed.
//! On wasm32 the dispatch is sequential.

use horizon_common::{FrameState, VertexInput, VertexOutput};

use crate::stage::VertexStage;

/// Configuration for parallel dispatch.
///
/// Dispatch is sequential when the vertex count is below
/// `parallel_threshold`, whatever `num_threads` says.
#[derive(Debug, Clone)]
pub struct ParConfig {
    /// Minimum number of vertices per worker batch. Default: 256.
    pub min_batch_size: usize,
    /// Number of worker threads. `None` uses
    /// [`std::thread::available_parallelism`]. Default: `None`.
    pub num_threads: Option<usize>,
    /// Vertex count below which no workers are spawned. Default: 1024.
    pub parallel_threshold: usize,
}

impl Default for ParConfig {
    fn default() -> Self {
        Self {
            min_batch_size: 256,
            num_threads: None,
            parallel_threshold: 1024,
        }
    }
}

impl ParConfig {
    /// Force sequential dispatch.
    pub fn sequential() -> Self {
        Self {
            num_threads: Some(1),
            ..Self::default()
        }
    }

    pub fn effective_threads(&self) -> usize {
        self.num_threads
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
            .max(1)
    }

    /// Whether `count` vertices would be split across worker threads.
    pub fn is_parallel(&self, count: usize) -> bool {
        !cfg!(target_arch = "wasm32")
            && self.effective_threads() > 1
            && count >= self.parallel_threshold
    }

    fn batch_size(&self, count: usize) -> usize {
        count
            .div_ceil(self.effective_threads())
            .max(self.min_batch_size)
            .max(1)
    }
}

/// Run `stage` once per vertex. Output order matches input order.
pub fn run_stage<S: VertexStage>(
    stage: &S,
    frame: &FrameState,
    vertices: &[VertexInput],
    config: &ParConfig,
) -> Vec<VertexOutput> {
    let _span = tracing::debug_span!(
        "run_stage",
        stage = stage.name(),
        vertices = vertices.len()
    )
    .entered();

    let mut outputs = vec![VertexOutput::default(); vertices.len()];
    run_stage_into(stage, frame, vertices, &mut outputs, config);
    outputs
}

/// Like [`run_stage`], writing into a caller-owned buffer.
///
/// Only the first `vertices.len()` slots of `outputs` are written; the
/// buffer must be at least that long.
pub fn run_stage_into<S: VertexStage>(
    stage: &S,
    frame: &FrameState,
    vertices: &[VertexInput],
    outputs: &mut [VertexOutput],
    config: &ParConfig,
) {
    assert!(
        outputs.len() >= vertices.len(),
        "output buffer holds {} slots, need {}",
        outputs.len(),
        vertices.len()
    );
    let outputs = &mut outputs[..vertices.len()];

    let count = vertices.len();
    if !config.is_parallel(count) {
        sequential(stage, frame, vertices, outputs);
        return;
    }

    let threads = config.effective_threads();
    let batch = config.batch_size(count);
    tracing::trace!(threads, batch, "parallel dispatch");

    std::thread::scope(|scope| {
        for (inputs, slots) in vertices.chunks(batch).zip(outputs.chunks_mut(batch)) {
            scope.spawn(move || sequential(stage, frame, inputs, slots));
        }
    });
}

fn sequential<S: VertexStage>(
    stage: &S,
    frame: &FrameState,
    inputs: &[VertexInput],
    outputs: &mut [VertexOutput],
) {
    for (input, slot) in inputs.iter().zip(outputs.iter_mut()) {
        *slot = stage.process(frame, *input);
    }
}
