use horizon_common::FrameState;

/// One published frame: an index plus the uniform block every vertex of the
/// frame reads.
///
/// Frames are immutable once published. Stages receive `&FrameState` from
/// [`Frame::state`] and have no way to write back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    index: u64,
    state: FrameState,
}

impl Frame {
    /// 1-based frame index.
    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn state(&self) -> &FrameState {
        &self.state
    }
}

/// Host-side owner of the per-frame uniform block.
///
/// The host calls [`FrameSupplier::begin_frame`] exactly once per frame
/// boundary, before any vertex of that frame is processed. The previous
/// frame is replaced wholesale; nothing is patched in place.
#[derive(Debug, Default)]
pub struct FrameSupplier {
    current: Option<Frame>,
    frame_count: u64,
}

impl FrameSupplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the state for the next frame and return it.
    pub fn begin_frame(&mut self, state: FrameState) -> &Frame {
        self.frame_count += 1;
        tracing::debug!(
            frame = self.frame_count,
            camera = ?state.camera_origin(),
            time = state.time(),
            "frame state published"
        );
        self.current.insert(Frame {
            index: self.frame_count,
            state,
        })
    }

    /// The most recently published frame, if any.
    pub fn current(&self) -> Option<&Frame> {
        self.current.as_ref()
    }

    /// Number of frames published so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
