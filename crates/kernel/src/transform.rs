use glam::Vec3;
use horizon_common::{FrameState, VertexInput, VertexOutput};

use crate::stage::VertexStage;

/// Distance the unit sky shape is pushed out to, in world units.
///
/// Must stay inside the projection's far plane, and far enough out that the
/// shape never intersects ordinary scene geometry.
pub const DISTANCE_SCALE: f32 = 3000.0;

/// Scale a local-space position out to the sky distance and recenter it on
/// the camera. Scale first, then translate.
#[inline]
pub fn world_position(position: Vec3, camera_origin: Vec3) -> Vec3 {
    position * DISTANCE_SCALE + camera_origin
}

/// Run the distant-geometry transform for one vertex.
///
/// Only `view_matrix`, `projection_matrix` and `camera_origin` are read.
/// Inputs are not validated; non-finite values propagate into the output.
#[inline]
pub fn transform_vertex(frame: &FrameState, input: VertexInput) -> VertexOutput {
    let world = world_position(input.position, frame.camera_origin());
    VertexOutput {
        clip_position: frame.projection_matrix() * frame.view_matrix() * world.extend(1.0),
        forwarded_position: input.position,
    }
}

/// The sky stage: geometry that always surrounds the camera and shows no
/// parallax when the camera translates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistantTransform;

impl VertexStage for DistantTransform {
    fn name(&self) -> &'static str {
        "distant_transform"
    }

    fn process(&self, frame: &FrameState, input: VertexInput) -> VertexOutput {
        transform_vertex(frame, input)
    }
}
