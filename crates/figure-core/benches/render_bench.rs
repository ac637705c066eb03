// File: crates/figure-core/benches/render_bench.rs
// Summary: PNG encode throughput for chart templates and diagrams.

use anyhow::Result;
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use figure_core::diagram::rasterize_mindmap;
use figure_core::{layout_mindmap, Branch, Chart, DiagramOptions, MindMapSpec, RenderOptions, Series, Validation};

fn build_line_chart(n: usize) -> Chart {
    let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let y: Vec<f64> = (0..n).map(|i| (i as f64 * 0.01).sin() * 10.0 + (i as f64 * 0.0001)).collect();
    let mut chart = Chart::line(x, vec![Series::new(y)]).expect("valid line chart");
    if let figure_core::ChartKind::Line(d) = &mut chart.kind {
        d.markers = false;
    }
    chart
}

fn build_mindmap(branches: usize) -> MindMapSpec {
    (0..branches).fold(MindMapSpec::new("Center"), |spec, b| {
        spec.branch(Branch::new(format!("Branch {b}")).children((0..4).map(|c| format!("Leaf {b}.{c}"))))
    })
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    for &n in &[1_000usize, 10_000usize] {
        group.bench_function(format!("line_{n}"), |b| {
            let ch = build_line_chart(n);
            let mut opts = RenderOptions::default();
            opts.width = 800;
            opts.height = 500;
            opts.draw_labels = false;
            b.iter(|| -> Result<()> {
                let bytes = ch.render_to_png_bytes(&opts)?;
                black_box(bytes);
                Ok(())
            });
        });
    }

    group.bench_function("mindmap_8", |b| {
        let layout = layout_mindmap(&build_mindmap(8), Validation::Permissive).expect("layout");
        let opts = DiagramOptions { draw_labels: false, ..DiagramOptions::default() };
        b.iter(|| -> Result<()> {
            let mut surface = rasterize_mindmap(&layout, &opts)?;
            black_box(surface.encode_png()?);
            Ok(())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
