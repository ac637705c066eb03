// File: crates/figure-demo/src/main.rs
// Summary: Demo renders a built-in gallery of diagrams and charts, or one JSON/CSV input, to PNGs.
// Usage: figure-demo [--strict] [--theme <name>] [input.json | input.csv]

use anyhow::{Context, Result};
use figure_core::{
    render_flowchart, render_linear_flowchart, render_mindmap, theme, Annotation, Branch, Chart, ChartKind,
    DiagramOptions, FlowStep, MindMapSpec, RenderOptions, ScatterData, Series, StepKind, Validation,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

struct Args {
    input: Option<String>,
    validation: Validation,
    theme: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args { input: None, validation: Validation::Permissive, theme: None };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--strict" => args.validation = Validation::Strict,
            "--theme" => args.theme = Some(it.next().context("--theme needs a name")?),
            _ if arg.starts_with("--") => anyhow::bail!("unknown flag {arg}"),
            _ => args.input = Some(arg),
        }
    }
    Ok(args)
}

/// One figure described in JSON; the top-level key picks the kind.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Document {
    Flowchart(Vec<FlowStep>),
    Linear(LinearDoc),
    Mindmap(MindMapSpec),
    Chart(ChartDoc),
}

#[derive(Debug, Deserialize)]
struct LinearDoc {
    #[serde(default)]
    title: Option<String>,
    items: Vec<(StepKind, String)>,
}

#[derive(Debug, Deserialize)]
struct ChartDoc {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    x_label: Option<String>,
    #[serde(default)]
    y_label: Option<String>,
    #[serde(flatten)]
    kind: ChartKind,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = parse_args()?;

    let mut chart_opts = RenderOptions::default();
    if let Some(name) = &args.theme {
        chart_opts.theme = theme::find(name);
    }
    let diagram_opts = DiagramOptions::default();

    let Some(raw) = args.input.as_deref() else {
        return render_gallery(&chart_opts, &diagram_opts, args.validation);
    };

    let (path, used_alt) = resolve_path(raw)?;
    tracing::info!(path = %path.display(), "using input file");
    if used_alt {
        tracing::info!("extension swapped between .csv/.cvs");
    }
    let out = out_name(&path);

    let ext = path.extension().map(|e| e.to_string_lossy().to_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            let doc: Document =
                serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
            render_document(doc, &out, &chart_opts, &diagram_opts, args.validation)?;
        }
        "csv" | "cvs" => {
            let chart = load_table_csv(&path)
                .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            chart.render_to_png(&chart_opts, &out)?;
        }
        other => anyhow::bail!("unsupported input extension {other:?} (expected .json or .csv)"),
    }
    println!("Wrote {}", out.display());
    Ok(())
}

fn render_document(
    doc: Document,
    out: &Path,
    chart_opts: &RenderOptions,
    diagram_opts: &DiagramOptions,
    validation: Validation,
) -> Result<()> {
    match doc {
        Document::Flowchart(steps) => Ok(render_flowchart(&steps, out, diagram_opts, validation)?),
        Document::Linear(doc) => Ok(render_linear_flowchart(&doc.items, doc.title.as_deref(), out, diagram_opts, validation)?),
        Document::Mindmap(spec) => Ok(render_mindmap(&spec, out, diagram_opts, validation)?),
        Document::Chart(doc) => {
            let mut chart = Chart::from_kind(doc.kind)?;
            chart.title = doc.title;
            if let Some(x) = doc.x_label {
                chart.x_axis.label = x;
            }
            if let Some(y) = doc.y_label {
                chart.y_axis.label = y;
            }
            chart.render_to_png(chart_opts, out)
        }
    }
}

/// Every template once, written to target/out.
fn render_gallery(chart_opts: &RenderOptions, diagram_opts: &DiagramOptions, validation: Validation) -> Result<()> {
    let dir = PathBuf::from("target/out");
    std::fs::create_dir_all(&dir).ok();

    // 1) Diagrams
    let login = [
        (StepKind::Start, "Start"),
        (StepKind::Io, "Enter Username\n& Password"),
        (StepKind::Process, "Validate\nCredentials"),
        (StepKind::Decision, "Valid?"),
        (StepKind::Process, "Grant Access"),
        (StepKind::End, "End"),
    ];
    render_linear_flowchart(&login, Some("Login Process"), dir.join("login_flowchart.png"), diagram_opts, validation)?;

    let order = vec![
        FlowStep::new(StepKind::Start, "Order received").with_next(1),
        FlowStep::new(StepKind::Decision, "In stock?").with_yes(2).with_no(3),
        FlowStep::new(StepKind::Process, "Ship order").with_next(4),
        FlowStep::new(StepKind::Io, "Notify\nbackorder").with_next(4),
        FlowStep::new(StepKind::End, "Done"),
    ];
    render_flowchart(&order, dir.join("order_flowchart.png"), diagram_opts, validation)?;

    let mut physics = MindMapSpec::new("Classical\nMechanics")
        .header("Physics Mind Map")
        .branch(Branch::new("Kinematics").color("#3498DB").children(["Position", "Velocity", "Acceleration"]))
        .branch(Branch::new("Dynamics").color("#E74C3C").children(["Newton's Laws", "Force", "Momentum"]))
        .branch(Branch::new("Energy").color("#2ECC71").children(["Kinetic", "Potential", "Conservation"]))
        .branch(Branch::new("Rotation").color("#F39C12").children(["Torque", "Angular Momentum", "Inertia"]))
        .branch(Branch::new("Oscillations").color("#9B59B6").children(["SHM", "Damping", "Resonance"]));
    physics.annotations.push(Annotation { x: 2.0, y: 1.0, text: "F = ma".into() });
    render_mindmap(&physics, dir.join("physics_mindmap.png"), diagram_opts, validation)?;

    // 2) Charts
    let months: Vec<f64> = (1..=12).map(f64::from).collect();
    let charts = [
        (
            "bar",
            Chart::bar(["Mon", "Tue", "Wed", "Thu", "Fri"], vec![23.0, 45.0, 56.0, 78.0, 32.0])?
                .with_title("Weekly Visitors"),
        ),
        (
            "pie",
            Chart::pie(["Desktop", "Mobile", "Tablet", "Other"], vec![45.0, 38.0, 12.0, 5.0])?
                .with_title("Traffic by Device"),
        ),
        (
            "line",
            Chart::line(
                months.clone(),
                vec![
                    Series::labeled("Revenue", months.iter().map(|m| 40.0 + m * 4.5).collect()),
                    Series::labeled("Costs", months.iter().map(|m| 35.0 + (m * 0.8).sin() * 8.0 + m * 2.0).collect()),
                ],
            )?
            .with_title("Monthly Growth")
            .with_axis_labels("Month", "k$"),
        ),
        ("scatter", scatter_example()?),
        (
            "heatmap",
            Chart::heatmap(
                vec![
                    vec![1.0, 0.8, 0.3, -0.2],
                    vec![0.8, 1.0, 0.5, 0.1],
                    vec![0.3, 0.5, 1.0, 0.6],
                    vec![-0.2, 0.1, 0.6, 1.0],
                ],
                ["Height", "Weight", "Age", "Income"],
                ["Height", "Weight", "Age", "Income"],
            )?
            .with_title("Correlation"),
        ),
        (
            "radar",
            Chart::radar(["Speed", "Reliability", "Comfort", "Safety", "Efficiency"], vec![80.0, 90.0, 65.0, 95.0, 70.0])?
                .with_title("Vehicle Profile"),
        ),
        (
            "grouped_bar",
            Chart::grouped_bar(
                ["Q1", "Q2", "Q3", "Q4"],
                vec![
                    Series::labeled("2023", vec![120.0, 135.0, 150.0, 170.0]),
                    Series::labeled("2024", vec![140.0, 155.0, 165.0, 190.0]),
                    Series::labeled("2025", vec![150.0, 170.0, 185.0, 210.0]),
                ],
            )?
            .with_title("Sales by Quarter")
            .with_axis_labels("Quarter", "Units"),
        ),
    ];
    for (name, chart) in &charts {
        let out = dir.join(format!("chart_{name}.png"));
        chart.render_to_png(chart_opts, &out)?;
        println!("Wrote {}", out.display());
    }
    Ok(())
}

fn scatter_example() -> Result<Chart> {
    let x = vec![1.2, 2.4, 3.1, 4.8, 5.5, 6.9, 7.3];
    let y = vec![2.0, 3.9, 3.2, 6.1, 5.4, 7.8, 8.6];
    let mut data = ScatterData::new(x, y);
    data.sizes = Some(vec![60.0, 120.0, 80.0, 200.0, 100.0, 150.0, 90.0]);
    data.labels = Some(["A", "B", "C", "D", "E", "F", "G"].map(String::from).to_vec());
    Ok(Chart::from_kind(ChartKind::Scatter(data))?.with_title("Effort vs Output").with_axis_labels("Effort", "Output"))
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}

/// Output file name like target/out/<stem>.png
fn out_name(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).filter(|s| !s.is_empty()).unwrap_or("figure");
    PathBuf::from("target/out").join(format!("{stem}.png"))
}

/// Category table: first column names the categories, every further column
/// is one numeric series headed by its name. One series renders as a bar
/// chart, several as grouped bars.
fn load_table_csv(path: &Path) -> Result<Chart> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    tracing::debug!(?headers, "csv headers");
    if headers.len() < 2 {
        anyhow::bail!("need a category column and at least one value column, got {:?}", headers);
    }

    let mut categories = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len() - 1];
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let name = rec.get(0).unwrap_or_default().to_string();
        let mut values = Vec::with_capacity(columns.len());
        for (col, header) in headers.iter().enumerate().skip(1) {
            let cell = rec.get(col).unwrap_or_default();
            let v = cell
                .parse::<f64>()
                .with_context(|| format!("row {}: {header} = {cell:?} is not a number", row + 2))?;
            values.push(v);
        }
        categories.push(name);
        for (column, v) in columns.iter_mut().zip(values) {
            column.push(v);
        }
    }
    tracing::info!(rows = categories.len(), series = columns.len(), "loaded table");

    let title = path.file_stem().map(|s| s.to_string_lossy().replace('_', " "));
    let mut chart = if columns.len() == 1 {
        let values = columns.pop().unwrap_or_default();
        Chart::bar(categories, values)?.with_axis_labels(headers[0].clone(), headers[1].clone())
    } else {
        let series = headers[1..].iter().zip(columns).map(|(h, v)| Series::labeled(h.clone(), v)).collect();
        Chart::grouped_bar(categories, series)?.with_axis_labels(headers[0].clone(), "")
    };
    chart.title = title;
    Ok(chart)
}
