//! Horizon kernel: the distant-geometry vertex transform and the host-side
//! machinery that feeds it.
//!
//! # Invariants
//! - The transform is a pure function of one vertex and the frame block.
//! - The frame block is published once per frame and never mutated after.
//! - Dispatch over a vertex set is order-preserving and bit-identical to a
//!   sequential map.

pub mod dispatch;
pub mod frame;
pub mod stage;
pub mod transform;

pub use dispatch::{ParConfig, run_stage, run_stage_into};
pub use frame::{Frame, FrameSupplier};
pub use stage::VertexStage;
pub use transform::{DISTANCE_SCALE, DistantTransform, transform_vertex, world_position};
