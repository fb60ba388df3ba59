use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Per-frame camera and simulation state shared read-only by every vertex
/// invocation of a frame.
///
/// The layout is a byte-level contract with every shader that binds this
/// block, including stages that do not read every field. Matrices are
/// column-major. Every member is 16-byte aligned so the struct matches WGSL
/// and std140 uniform rules without extra padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct FrameState {
    /// World to camera space.
    pub view_matrix: [[f32; 4]; 4],
    /// Camera to clip space.
    pub projection_matrix: [[f32; 4]; 4],
    /// Camera position in world space. `w` is unused.
    pub camera_origin: [f32; 4],
    /// Controlled entity position in world space. `w` is unused.
    pub player_origin: [f32; 4],
    /// Far render distance in `x`, the rest is padding.
    pub view_distance: [f32; 4],
    /// Elapsed simulation time in seconds in `x`, the rest is padding.
    pub time: [f32; 4],
}

impl FrameState {
    pub const VIEW_MATRIX_OFFSET: usize = 0;
    pub const PROJECTION_MATRIX_OFFSET: usize = 64;
    pub const CAMERA_ORIGIN_OFFSET: usize = 128;
    pub const PLAYER_ORIGIN_OFFSET: usize = 144;
    pub const VIEW_DISTANCE_OFFSET: usize = 160;
    pub const TIME_OFFSET: usize = 176;
    /// Size of the whole block in bytes.
    pub const SIZE: usize = 192;

    /// Field names, byte offsets and sizes in declaration order.
    pub const LAYOUT: [FieldLayout; 6] = [
        FieldLayout::new("view_matrix", Self::VIEW_MATRIX_OFFSET, 64),
        FieldLayout::new("projection_matrix", Self::PROJECTION_MATRIX_OFFSET, 64),
        FieldLayout::new("camera_origin", Self::CAMERA_ORIGIN_OFFSET, 16),
        FieldLayout::new("player_origin", Self::PLAYER_ORIGIN_OFFSET, 16),
        FieldLayout::new("view_distance", Self::VIEW_DISTANCE_OFFSET, 16),
        FieldLayout::new("time", Self::TIME_OFFSET, 16),
    ];

    /// Pack glam values into the uniform block.
    pub fn new(params: FrameParams) -> Self {
        Self {
            view_matrix: params.view.to_cols_array_2d(),
            projection_matrix: params.projection.to_cols_array_2d(),
            camera_origin: params.camera_origin.extend(0.0).to_array(),
            player_origin: params.player_origin.extend(0.0).to_array(),
            view_distance: [params.view_distance, 0.0, 0.0, 0.0],
            time: [params.time, 0.0, 0.0, 0.0],
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.view_matrix)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.projection_matrix)
    }

    pub fn camera_origin(&self) -> Vec3 {
        Vec4::from_array(self.camera_origin).truncate()
    }

    pub fn player_origin(&self) -> Vec3 {
        Vec4::from_array(self.player_origin).truncate()
    }

    pub fn view_distance(&self) -> f32 {
        self.view_distance[0]
    }

    pub fn time(&self) -> f32 {
        self.time[0]
    }

    /// Raw bytes in upload order.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for FrameState {
    /// Identity matrices, everything else zero.
    fn default() -> Self {
        Self::new(FrameParams::default())
    }
}

static_assertions::assert_eq_size!(FrameState, [u8; FrameState::SIZE]);
static_assertions::const_assert_eq!(
    std::mem::offset_of!(FrameState, view_matrix),
    FrameState::VIEW_MATRIX_OFFSET
);
static_assertions::const_assert_eq!(
    std::mem::offset_of!(FrameState, projection_matrix),
    FrameState::PROJECTION_MATRIX_OFFSET
);
static_assertions::const_assert_eq!(
    std::mem::offset_of!(FrameState, camera_origin),
    FrameState::CAMERA_ORIGIN_OFFSET
);
static_assertions::const_assert_eq!(
    std::mem::offset_of!(FrameState, player_origin),
    FrameState::PLAYER_ORIGIN_OFFSET
);
static_assertions::const_assert_eq!(
    std::mem::offset_of!(FrameState, view_distance),
    FrameState::VIEW_DISTANCE_OFFSET
);
static_assertions::const_assert_eq!(std::mem::offset_of!(FrameState, time), FrameState::TIME_OFFSET);

/// Unpacked inputs for building a [`FrameState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_origin: Vec3,
    pub player_origin: Vec3,
    pub view_distance: f32,
    pub time: f32,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            camera_origin: Vec3::ZERO,
            player_origin: Vec3::ZERO,
            view_distance: 0.0,
            time: 0.0,
        }
    }
}

/// One entry of the [`FrameState`] byte layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    pub size: usize,
}

impl FieldLayout {
    const fn new(name: &'static str, offset: usize, size: usize) -> Self {
        Self { name, offset, size }
    }
}

/// A local-space mesh position, bound at vertex attribute location 0.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct VertexInput {
    pub position: Vec3,
}

impl VertexInput {
    pub const ATTRIBUTE_LOCATION: u32 = 0;

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
        }
    }
}

impl From<Vec3> for VertexInput {
    fn from(position: Vec3) -> Self {
        Self { position }
    }
}

/// Result of one vertex invocation. Transient: the rasterizer consumes
/// `clip_position`, the fragment stage interpolates `forwarded_position`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VertexOutput {
    pub clip_position: Vec4,
    /// Local-space position, unchanged, for direction-based lookups.
    pub forwarded_position: Vec3,
}

impl VertexOutput {
    /// Perspective-divided position. Non-finite when `w` is zero.
    pub fn ndc(&self) -> Vec3 {
        self.clip_position.truncate() / self.clip_position.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_frame_is_identity() {
        let f = FrameState::default();
        assert_eq!(f.view_matrix(), Mat4::IDENTITY);
        assert_eq!(f.projection_matrix(), Mat4::IDENTITY);
        assert_eq!(f.camera_origin(), Vec3::ZERO);
        assert_eq!(f.view_distance(), 0.0);
    }

    #[test]
    fn new_round_trips_through_accessors() {
        let params = FrameParams {
            view: Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
            projection: Mat4::perspective_rh(1.0, 1.5, 0.1, 100.0),
            camera_origin: Vec3::new(-4.0, 5.0, 6.0),
            player_origin: Vec3::new(7.0, 8.0, 9.0),
            view_distance: 250.0,
            time: 12.5,
        };
        let f = FrameState::new(params);
        assert_eq!(f.view_matrix(), params.view);
        assert_eq!(f.projection_matrix(), params.projection);
        assert_eq!(f.camera_origin(), params.camera_origin);
        assert_eq!(f.player_origin(), params.player_origin);
        assert_eq!(f.view_distance(), 250.0);
        assert_eq!(f.time(), 12.5);
    }

    #[test]
    fn bytes_follow_declared_offsets() {
        let f = FrameState::new(FrameParams {
            camera_origin: Vec3::new(10.0, 20.0, 30.0),
            view_distance: 512.0,
            time: 3.0,
            ..FrameParams::default()
        });
        let bytes = f.as_bytes();
        assert_eq!(bytes.len(), FrameState::SIZE);

        let read = |offset: usize| {
            f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
        };
        // Column-major: element [0][0] then [0][1].
        assert_eq!(read(FrameState::VIEW_MATRIX_OFFSET), 1.0);
        assert_eq!(read(FrameState::VIEW_MATRIX_OFFSET + 4), 0.0);
        assert_eq!(read(FrameState::CAMERA_ORIGIN_OFFSET), 10.0);
        assert_eq!(read(FrameState::CAMERA_ORIGIN_OFFSET + 8), 30.0);
        assert_eq!(read(FrameState::VIEW_DISTANCE_OFFSET), 512.0);
        assert_eq!(read(FrameState::TIME_OFFSET), 3.0);
    }

    #[test]
    fn layout_table_is_contiguous() {
        let mut end = 0;
        for field in FrameState::LAYOUT {
            assert_eq!(field.offset, end, "gap before {}", field.name);
            assert_eq!(field.offset % 16, 0);
            end = field.offset + field.size;
        }
        assert_eq!(end, FrameState::SIZE);
    }

    #[test]
    fn frame_state_serde_json() {
        let f = FrameState::new(FrameParams {
            camera_origin: Vec3::new(1.0, 2.0, 3.0),
            time: 4.0,
            ..FrameParams::default()
        });
        let json = serde_json::to_string(&f).unwrap();
        let back: FrameState = serde_json::from_str(&json).unwrap();
        assert_eq!(f, back);
    }

    #[test]
    fn vertex_input_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<VertexInput>(), 12);
        let v = VertexInput::new(1.0, 2.0, 3.0);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn ndc_divides_by_w() {
        let out = VertexOutput {
            clip_position: Vec4::new(2.0, 4.0, 6.0, 2.0),
            forwarded_position: Vec3::ZERO,
        };
        assert_eq!(out.ndc(), Vec3::new(1.0, 2.0, 3.0));
    }
}
