//! Benchmarks for the scrolling engine.

use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stagediff::core::{ChangeFacet, FileChangeKind, FileEntry, RelPath, SideBySide, StatusLists};
use stagediff::scroll::{
    visible_diffs, ContentPane, DiffRegistry, DiffView, DiffViewId, Document, ElementId,
    ElementRole, LegacyRenderer, Rect, RenderError, Scene, ScrollEngine, Side, WheelEvent,
};

const DIFF_HEIGHT: f64 = 40.0;

/// Registry with `n` active unstaged diffs stacked vertically.
fn registry_with(n: usize) -> DiffRegistry {
    let mut registry = DiffRegistry::new();
    registry.select_repository(PathBuf::from("/bench"));
    registry.mount(StatusLists {
        index: Vec::new(),
        working: (0..n)
            .map(|i| {
                FileEntry::new(
                    RelPath::new(format!("src/file{}.rs", i)),
                    None,
                    Some(FileChangeKind::Modified),
                )
            })
            .collect(),
    });

    if let Some(list) = registry.list_mut(ChangeFacet::Unstaged) {
        for i in 0..n {
            let view = DiffView::new(DiffViewId(i as u64), ElementId(i as u64))
                .with_extent(i as f64 * DIFF_HEIGHT, DIFF_HEIGHT)
                .with_panes(ContentPane::new(400.0, 60.0), ContentPane::new(380.0, 60.0));
            if let Some(entry) = list.entry_mut(i) {
                entry.activate(view);
            }
        }
    }
    registry
}

/// Scene with the first diff painted at the top of an 80x50 viewport.
fn scene_for_first_diff() -> Scene {
    let mut scene = Scene::new();
    let root = scene.insert(
        ElementId(0),
        None,
        Rect::new(0.0, 0.0, 121.0, DIFF_HEIGHT),
        ElementRole::DiffRoot,
    );
    scene.push(
        Some(root),
        Rect::new(0.0, 0.0, 60.0, DIFF_HEIGHT),
        ElementRole::Pane(Side::Left),
    );
    scene.push(
        Some(root),
        Rect::new(61.0, 0.0, 60.0, DIFF_HEIGHT),
        ElementRole::Pane(Side::Right),
    );
    scene
}

struct NullRenderer;

impl LegacyRenderer for NullRenderer {
    fn scroll_y(&mut self, view: &DiffView, scroll_top: f64) -> Result<(), RenderError> {
        black_box((view.id, scroll_top));
        Ok(())
    }
}

fn bench_visible_diffs(c: &mut Criterion) {
    let mut group = c.benchmark_group("visible_diffs");

    for size in [10, 100, 1_000, 10_000] {
        let registry = registry_with(size);
        let middle = (size as f64 * DIFF_HEIGHT) / 2.0;

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &registry, |b, registry| {
            b.iter(|| visible_diffs(registry.active_diffs(), black_box(middle), 50.0).len());
        });
    }

    group.finish();
}

fn bench_vertical_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_frame/vertical");

    for size in [10, 100, 1_000] {
        let mut registry = registry_with(size);
        let scene = Scene::new();
        let mut renderer = NullRenderer;
        let mut engine = ScrollEngine::new();
        engine.document = Document::new(50.0, size as f64 * DIFF_HEIGHT);

        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| {
                let mut down = WheelEvent::new(0.0, 3.0, 10.0, 10.0);
                let mut up = WheelEvent::new(0.0, -3.0, 10.0, 10.0);
                engine.route(&mut down);
                engine.route(&mut up);
                engine.run_frame(&mut registry, &scene, &mut renderer)
            });
        });
    }

    group.finish();
}

fn bench_horizontal_frame(c: &mut Criterion) {
    let mut registry = registry_with(100);
    let scene = scene_for_first_diff();
    let mut renderer = NullRenderer;
    let mut engine = ScrollEngine::new();

    c.bench_function("run_frame/horizontal", |b| {
        b.iter(|| {
            let mut right = WheelEvent::new(8.0, 0.0, 30.0, 10.0);
            let mut left = WheelEvent::new(-8.0, 0.0, 90.0, 10.0);
            engine.route(&mut right);
            engine.route(&mut left);
            engine.run_frame(&mut registry, &scene, &mut renderer)
        });
    });
}

fn bench_side_by_side(c: &mut Criterion) {
    let old: String = (0..5_000).map(|i| format!("let value_{} = {};\n", i, i)).collect();
    let new: String = (0..5_000)
        .map(|i| {
            if i % 50 == 0 {
                format!("let value_{} = {} * 2;\n", i, i)
            } else {
                format!("let value_{} = {};\n", i, i)
            }
        })
        .collect();

    c.bench_function("SideBySide::compute/5000", |b| {
        b.iter(|| SideBySide::compute(black_box(old.as_bytes()), black_box(new.as_bytes())));
    });
}

criterion_group!(
    benches,
    bench_visible_diffs,
    bench_vertical_frame,
    bench_horizontal_frame,
    bench_side_by_side
);
criterion_main!(benches);
