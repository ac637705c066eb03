// File: crates/figure-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke tests writing PNGs.

use figure_core::diagram::rasterize_mindmap;
use figure_core::{
    layout_mindmap, render_flowchart, render_linear_flowchart, render_mindmap, Annotation, Branch, Chart,
    DiagramOptions, FlowStep, MindMapSpec, RenderOptions, StepKind, Validation,
};

const PNG_MAGIC: [u8; 4] = [137, 80, 78, 71];

fn out(name: &str) -> std::path::PathBuf {
    let p = std::path::PathBuf::from("target/test_out").join(name);
    std::fs::create_dir_all(p.parent().unwrap()).unwrap();
    p
}

#[test]
fn render_smoke_png() {
    let chart = Chart::bar(["Q1", "Q2", "Q3", "Q4"], vec![120.0, 98.5, 143.0, 160.0])
        .unwrap()
        .with_title("Quarterly Sales");

    let opts = RenderOptions::default();
    let path = out("smoke_bar.png");
    chart.render_to_png(&opts, &path).expect("render should succeed");
    let meta = std::fs::metadata(&path).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&PNG_MAGIC), "should be PNG header");
}

#[test]
fn flowchart_smoke_png() {
    let steps = vec![
        FlowStep::new(StepKind::Start, "Start").with_next(1),
        FlowStep::new(StepKind::Io, "Read input").with_next(2),
        FlowStep::new(StepKind::Decision, "Valid?").with_yes(3).with_no(4),
        FlowStep::new(StepKind::Process, "Save").with_next(5),
        FlowStep::new(StepKind::Process, "Report error").with_next(5),
        FlowStep::new(StepKind::End, "End"),
    ];
    let path = out("nested/dirs/smoke_flow.png");
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
    render_flowchart(&steps, &path, &DiagramOptions::default(), Validation::Permissive).expect("render flowchart");
    let bytes = std::fs::read(&path).expect("output exists");
    assert!(bytes.starts_with(&PNG_MAGIC));
}

#[test]
fn mindmap_smoke_png() {
    let spec = MindMapSpec::new("Physics\nBasics")
        .header("Mechanics overview")
        .branch(Branch::new("Kinematics").children(["Velocity", "Acceleration"]))
        .branch(Branch::new("Dynamics").children(["Newton's laws"]))
        .branch(Branch::new("Energy").color("#E67E22"));
    let path = out("smoke_mindmap.png");
    render_mindmap(&spec, &path, &DiagramOptions::default(), Validation::Strict).expect("render mindmap");
    assert!(std::fs::read(&path).unwrap().starts_with(&PNG_MAGIC));
}

#[test]
fn empty_flow_renders_blank_canvas_when_permissive() {
    let path = out("smoke_empty_flow.png");
    render_flowchart(&[], &path, &DiagramOptions::default(), Validation::Permissive).expect("permissive empty");
    assert!(path.exists());
    assert!(render_flowchart(&[], &path, &DiagramOptions::default(), Validation::Strict).is_err());
}

#[test]
fn empty_linear_flow_honours_validation() {
    let opts = DiagramOptions::default();
    let path = out("smoke_empty_linear.png");
    let none: [(StepKind, &str); 0] = [];
    render_linear_flowchart(&none, Some("Nothing"), &path, &opts, Validation::Permissive).expect("permissive empty");
    assert!(path.exists());
    assert!(render_linear_flowchart(&none, None, &path, &opts, Validation::Strict).is_err());
}

#[test]
fn far_annotation_grows_mindmap_image() {
    let opts = DiagramOptions::default();
    let plain = MindMapSpec::new("Root");
    let mut noted = plain.clone();
    noted.annotations.push(Annotation { x: 20.0, y: 1.0, text: "off to the side".into() });

    let (plain_w, _) = rasterize_mindmap(&layout_mindmap(&plain, Validation::Permissive).unwrap(), &opts)
        .unwrap()
        .size();
    let (noted_w, _) = rasterize_mindmap(&layout_mindmap(&noted, Validation::Permissive).unwrap(), &opts)
        .unwrap()
        .size();
    // canvas is 16 wide; the note sits 4+ units past it
    assert!(noted_w as f32 >= plain_w as f32 + 4.0 * opts.pixels_per_unit, "{noted_w} vs {plain_w}");
}
