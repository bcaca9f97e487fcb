use criterion::{
    criterion_group, criterion_main, black_box, BatchSize, Criterion,
};

use halfedge::{
    prelude::*,
    shape::{RawMesh, Sphere},
};


fn large_sphere() -> RawMesh {
    Sphere {
        num_latitudes: 64,
        num_longitudes: 96,
        .. Sphere::default()
    }.raw_mesh()
}


// ===============================================================================================
// ===== Benchmarks
// ===============================================================================================

fn build_from_arrays(c: &mut Criterion) {
    let raw = large_sphere();
    c.bench_function("build_from_arrays", |b| {
        b.iter(|| black_box(raw.build()))
    });
}

fn average_edge_length(c: &mut Criterion) {
    let mesh = large_sphere().build();
    c.bench_function("average_edge_length", |b| {
        b.iter(|| black_box(&mesh).average_edge_length())
    });
}

/// Count the adjacent faces per vertex
fn count_adjacent_faces(c: &mut Criterion) {
    let mesh = large_sphere().build();
    c.bench_function("count_adjacent_faces", |b| {
        b.iter(|| {
            let mesh = black_box(&mesh);
            for v in mesh.vertices() {
                black_box(mesh.faces_around_vertex(v).map(|faces| faces.len()).ok());
            }
        })
    });
}

/// Split every edge longer than the average once
fn split_long_edges(c: &mut Criterion) {
    let mesh = large_sphere().build();
    let threshold = mesh.average_edge_length();

    c.bench_function("split_long_edges", |b| {
        b.iter_batched(
            || mesh.clone(),
            |mut mesh| {
                let long = mesh.half_edges()
                    .filter(|&he| mesh.half_edge_ref(he).length() > threshold)
                    .collect::<Vec<_>>();
                for he in long {
                    if mesh.half_edge_ref(he).length() > threshold {
                        mesh.split_edge(he);
                    }
                }
                mesh
            },
            BatchSize::LargeInput,
        )
    });
}

/// Collapse every edge shorter than half the average once
fn collapse_short_edges(c: &mut Criterion) {
    let mesh = large_sphere().build();
    let avg = mesh.average_edge_length();
    let (low, high) = (0.5 * avg, 4.0 / 3.0 * avg);

    c.bench_function("collapse_short_edges", |b| {
        b.iter_batched(
            || mesh.clone(),
            |mut mesh| {
                let short = mesh.half_edges()
                    .filter(|&he| mesh.half_edge_ref(he).length() < low)
                    .collect::<Vec<_>>();
                for he in short {
                    if mesh.contains_half_edge(he) && mesh.half_edge_ref(he).length() < low {
                        black_box(mesh.collapse_edge(he, high * high).ok());
                    }
                }
                mesh
            },
            BatchSize::LargeInput,
        )
    });
}


criterion_group!(benches,
    build_from_arrays,
    average_edge_length,
    count_adjacent_faces,
    split_long_edges,
    collapse_short_edges,
);
criterion_main!(benches);
