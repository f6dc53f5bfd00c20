use std::hint::black_box;
use std::time::Instant;

use fluids_math::{Axis, Matrix4f};

fn bench_multiply(iterations: usize) {
    let a = Matrix4f::rotation(0.3, Axis::X).multiply(&Matrix4f::translation(1.0, 2.0, 3.0));
    let b = Matrix4f::perspective(1280, 720, 0.1, 200.0, 1.5);

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(black_box(&a).multiply(black_box(&b)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  multiply ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_camera_chain(iterations: usize) {
    let start = Instant::now();
    for i in 0..iterations {
        let t = i as f32 * 0.001;
        let m = Matrix4f::identity()
            .multiply(&Matrix4f::perspective(500, 500, 0.1, 200.0, 1.5))
            .multiply(&Matrix4f::translation(0.0, 0.0, 2.5 + t))
            .multiply(&Matrix4f::rotation(t, Axis::X))
            .multiply(&Matrix4f::rotation(t * 0.5, Axis::Y))
            .multiply(&Matrix4f::rotation(0.0, Axis::Z));
        black_box(m);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  camera chain ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== fluids-math benchmarks ===");
    for iterations in [10_000, 100_000, 1_000_000] {
        bench_multiply(iterations);
    }
    for iterations in [10_000, 100_000] {
        bench_camera_chain(iterations);
    }
}
