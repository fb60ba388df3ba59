/// Declares the shared `FrameState` block at group 0, binding 0.
///
/// Every stage that binds the frame block is composed from this prelude, so
/// the WGSL layout is written once and matches `horizon_common::FrameState`.
macro_rules! frame_state_wgsl {
    () => {
        r#"
struct FrameState {
    view_matrix: mat4x4<f32>,
    projection_matrix: mat4x4<f32>,
    camera_origin: vec4<f32>,
    player_origin: vec4<f32>,
    view_distance: vec4<f32>,
    time: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> frame_state: FrameState;
"#
    };
}

/// WGSL prelude shared by every stage that reads the frame block.
pub const FRAME_STATE_WGSL: &str = frame_state_wgsl!();

/// WGSL sky shader.
///
/// `vs_sky` is the distant-geometry transform: the unit cube is scaled out
/// to `DISTANCE_SCALE`, recentered on the camera, and projected. The local
/// position is forwarded unchanged for the fragment stage to use as a
/// direction. `fs_sky` is a plain vertical gradient.
pub const SKY_SHADER: &str = concat!(
    frame_state_wgsl!(),
    r#"
const DISTANCE_SCALE: f32 = 3000.0;

struct SkyOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) forwarded_position: vec3<f32>,
};

@vertex
fn vs_sky(@location(0) position: vec3<f32>) -> SkyOutput {
    let world_position = DISTANCE_SCALE * position + frame_state.camera_origin.xyz;

    var out: SkyOutput;
    out.clip_position = frame_state.projection_matrix * frame_state.view_matrix * vec4<f32>(world_position, 1.0);
    out.forwarded_position = position;
    return out;
}

@fragment
fn fs_sky(in: SkyOutput) -> @location(0) vec4<f32> {
    let dir = normalize(in.forwarded_position);
    let t = clamp(dir.y * 0.5 + 0.5, 0.0, 1.0);
    let horizon = vec3<f32>(0.78, 0.86, 0.94);
    let zenith = vec3<f32>(0.16, 0.36, 0.74);
    return vec4<f32>(mix(horizon, zenith, t), 1.0);
}
"#
);

/// WGSL shader for the grid floor.
///
/// Composed from the same frame prelude as the sky; reads `view_distance`
/// to fade lines out toward the edge of the render range.
pub const GRID_SHADER: &str = concat!(
    frame_state_wgsl!(),
    r#"
struct GridVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct GridOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_grid(v: GridVertex) -> GridOutput {
    let dist = distance(v.position, frame_state.camera_origin.xyz);
    let fade = 1.0 - clamp(dist / max(frame_state.view_distance.x, 1.0), 0.0, 1.0);

    var out: GridOutput;
    out.clip_position = frame_state.projection_matrix * frame_state.view_matrix * vec4<f32>(v.position, 1.0);
    out.color = vec4<f32>(v.color.rgb, v.color.a * fade);
    return out;
}

@fragment
fn fs_grid(in: GridOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#
);
