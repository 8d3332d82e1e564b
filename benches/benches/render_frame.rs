// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use trellis_interaction::DragState;
use trellis_render::{RenderConfig, render_frame};
use trellis_store::{DiagramStore, Edge, Node, Shape};
use trellis_view::{Viewport, ViewportUpdate};

/// `n` x `n` nodes on a 150-unit pitch, each linked to its right neighbor.
fn grid_diagram(n: usize) -> DiagramStore {
    let mut store = DiagramStore::new();
    for y in 0..n {
        for x in 0..n {
            let shape = Shape::ALL[(x + y) % Shape::ALL.len()];
            let at = Point::new(x as f64 * 150.0, y as f64 * 150.0);
            let node = Node::new(format!("{x}:{y}"), shape, at, Size::new(100.0, 60.0))
                .with_label(format!("Node {x},{y}"));
            store.add_node(node).unwrap();
            if x > 0 {
                let left = format!("{}:{y}", x - 1);
                let edge = Edge::new(format!("{x}:{y}-h"), left, format!("{x}:{y}"));
                store.add_edge(edge).unwrap();
            }
        }
    }
    store
}

fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame_grid");
    let config = RenderConfig::default();
    for &n in &[32usize, 100] {
        let store = grid_diagram(n);
        group.throughput(Throughput::Elements((n * n) as u64));
        for zoom in [1.0, 0.2] {
            let mut viewport = Viewport::new(Size::new(1920.0, 1080.0));
            viewport.set_viewport(
                ViewportUpdate::default()
                    .with_center(Point::new(n as f64 * 75.0, n as f64 * 75.0))
                    .with_zoom(zoom),
            );
            group.bench_function(BenchmarkId::new(format!("zoom {zoom}"), n), |b| {
                b.iter(|| black_box(render_frame(&store, &viewport, &DragState::Idle, &config)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_render_frame);
criterion_main!(benches);
