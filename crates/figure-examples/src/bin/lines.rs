// File: crates/figure-examples/src/bin/lines.rs
// Summary: Minimal example that renders a two-series line chart to PNG.

use figure_core::{Chart, RenderOptions, Series};

fn main() {
    let months: Vec<f64> = (1..=6).map(f64::from).collect();
    let chart = Chart::line(
        months,
        vec![
            Series::labeled("Signups", vec![12.0, 18.0, 25.0, 31.0, 42.0, 55.0]),
            Series::labeled("Churn", vec![3.0, 4.0, 4.5, 6.0, 5.5, 7.0]),
        ],
    )
    .expect("valid line data")
    .with_title("Monthly Growth")
    .with_axis_labels("Month", "Users");

    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/out/example_lines.png");
    chart.render_to_png(&opts, &out).expect("render to png");
    println!("Wrote {}", out.display());
}
