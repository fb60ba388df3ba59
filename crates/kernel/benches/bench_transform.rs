use std::hint::black_box;
use std::time::Instant;

use glam::{Mat4, Vec3};
use horizon_common::{FrameParams, FrameState, VertexInput};
use horizon_kernel::{DistantTransform, ParConfig, run_stage, transform_vertex};

fn make_frame() -> FrameState {
    let eye = Vec3::new(12.0, 1.8, -40.0);
    FrameState::new(FrameParams {
        view: Mat4::look_at_rh(eye, eye + Vec3::NEG_Z, Vec3::Y),
        projection: Mat4::perspective_rh(60.0_f32.to_radians(), 16.0 / 9.0, 0.1, 10_000.0),
        camera_origin: eye,
        ..FrameParams::default()
    })
}

/// Points on a latitude/longitude sphere, roughly `count` of them.
fn make_sphere(count: usize) -> Vec<VertexInput> {
    let rings = (count as f32).sqrt().ceil() as usize;
    let mut verts = Vec::with_capacity(rings * rings);
    for i in 0..rings {
        let theta = std::f32::consts::PI * i as f32 / (rings - 1).max(1) as f32;
        for j in 0..rings {
            let phi = std::f32::consts::TAU * j as f32 / rings as f32;
            verts.push(VertexInput::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            ));
        }
    }
    verts
}

fn bench_single(iterations: usize) {
    let frame = make_frame();
    let input = VertexInput::new(0.0, 0.0, 1.0);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(transform_vertex(black_box(&frame), black_box(input)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  transform_vertex ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_dispatch(vertex_count: usize, config: &ParConfig, label: &str, iterations: usize) {
    let frame = make_frame();
    let vertices = make_sphere(vertex_count);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(run_stage(
            &DistantTransform,
            black_box(&frame),
            black_box(&vertices),
            config,
        ));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  {label} ({} vertices, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        vertices.len()
    );
}

fn main() {
    println!("=== Distant Transform Benchmarks ===\n");

    println!("Single vertex:");
    bench_single(1_000_000);

    let sequential = ParConfig::sequential();
    let parallel = ParConfig::default();

    println!("\nSequential dispatch:");
    bench_dispatch(1_000, &sequential, "sequential", 1000);
    bench_dispatch(100_000, &sequential, "sequential", 100);
    bench_dispatch(1_000_000, &sequential, "sequential", 10);

    println!("\nParallel dispatch:");
    bench_dispatch(1_000, &parallel, "parallel", 1000);
    bench_dispatch(100_000, &parallel, "parallel", 100);
    bench_dispatch(1_000_000, &parallel, "parallel", 10);

    println!("\n=== Done ===");
}
