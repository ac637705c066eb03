// File: crates/figure-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders deterministic charts and diagrams (no text) to PNG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use figure_core::diagram::{rasterize_flowchart, rasterize_mindmap};
use figure_core::{
    layout_flow, layout_mindmap, BarData, Branch, Chart, ChartKind, Colormap, DiagramOptions, FlowStep,
    HeatmapData, MindMapSpec, PieData, RenderOptions, Series, StepKind, Validation,
};

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn write_or_compare(name: &str, bytes: &[u8]) {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__").join(name);
    if bless_mode() {
        if let Some(parent) = path.parent() { std::fs::create_dir_all(parent).ok(); }
        std::fs::write(&path, bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", path.display(), bytes.len());
        return;
    }
    if path.exists() {
        let want = std::fs::read(&path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.dimensions(), want_img.dimensions(), "size differs: {}", path.display());
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", path.display());
    }
}

fn chart_bytes(chart: &Chart) -> Vec<u8> {
    let mut opts = RenderOptions::default();
    opts.draw_labels = false; // avoid text nondeterminism across platforms
    chart.render_to_png_bytes(&opts).expect("render bytes")
}

fn diagram_opts() -> DiagramOptions {
    DiagramOptions { pixels_per_unit: 40.0, draw_labels: false, ..DiagramOptions::default() }
}

#[test]
fn golden_bar_chart() {
    let chart = Chart::bar(["A", "B", "C", "D", "E"], vec![4.0, 7.5, 2.0, 9.0, 5.5]).unwrap();
    write_or_compare("bar.png", &chart_bytes(&chart));
}

#[test]
fn golden_horizontal_bar_chart() {
    let data = BarData::new(["A", "B", "C"], vec![3.0, 1.0, 2.0]).horizontal();
    let chart = Chart::from_kind(ChartKind::Bar(data)).unwrap();
    write_or_compare("bar_horizontal.png", &chart_bytes(&chart));
}

#[test]
fn golden_donut() {
    let data = PieData::new(["a", "b", "c", "d"], vec![35.0, 25.0, 25.0, 15.0]).donut().with_explode(vec![0.05, 0.0, 0.0, 0.0]);
    let chart = Chart::from_kind(ChartKind::Pie(data)).unwrap();
    write_or_compare("donut.png", &chart_bytes(&chart));
}

#[test]
fn golden_line_chart() {
    let x: Vec<f64> = (1..=12).map(f64::from).collect();
    let a: Vec<f64> = x.iter().map(|m| 10.0 + m * 1.5).collect();
    let b: Vec<f64> = x.iter().map(|m| 25.0 - (m - 6.0).abs() * 2.0).collect();
    let chart = Chart::line(x, vec![Series::new(a), Series::new(b)]).unwrap();
    write_or_compare("line.png", &chart_bytes(&chart));
}

#[test]
fn golden_radar() {
    let chart = Chart::radar(["Speed", "Power", "Range", "Armor", "Cost"], vec![80.0, 65.0, 90.0, 40.0, 70.0]).unwrap();
    write_or_compare("radar.png", &chart_bytes(&chart));
}

#[test]
fn golden_heatmap() {
    let data = HeatmapData::new(
        vec![vec![0.2, 0.5, 0.9], vec![0.4, 0.1, 0.7], vec![1.0, 0.3, 0.6]],
        ["r1", "r2", "r3"],
        ["c1", "c2", "c3"],
    )
    .with_colormap(Colormap::Viridis);
    let chart = Chart::from_kind(ChartKind::Heatmap(data)).unwrap();
    write_or_compare("heatmap.png", &chart_bytes(&chart));
}

#[test]
fn golden_flowchart() {
    let steps = vec![
        FlowStep::new(StepKind::Start, "Start").with_next(1),
        FlowStep::new(StepKind::Decision, "ok?").with_yes(2).with_no(3),
        FlowStep::new(StepKind::Process, "yes").with_next(4),
        FlowStep::new(StepKind::Io, "no").with_next(4),
        FlowStep::new(StepKind::End, "End"),
    ];
    let layout = layout_flow(&steps, Validation::Permissive).unwrap();
    let mut surface = rasterize_flowchart(&layout, &diagram_opts()).unwrap();
    write_or_compare("flowchart.png", &surface.encode_png().unwrap());
}

#[test]
fn golden_mindmap() {
    let spec = MindMapSpec::new("Root")
        .branch(Branch::new("A").children(["a1", "a2", "a3"]))
        .branch(Branch::new("B").children(["b1"]))
        .branch(Branch::new("C"))
        .branch(Branch::new("D").children(["d1", "d2"]));
    let layout = layout_mindmap(&spec, Validation::Permissive).unwrap();
    let mut surface = rasterize_mindmap(&layout, &diagram_opts()).unwrap();
    write_or_compare("mindmap.png", &surface.encode_png().unwrap());
}
