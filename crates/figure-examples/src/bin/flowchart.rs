// File: crates/figure-examples/src/bin/flowchart.rs
// Summary: Minimal example that lays out a linear login flowchart and renders it to PNG.

use figure_core::{render_linear_flowchart, DiagramOptions, StepKind, Validation};

fn main() {
    let steps = [
        (StepKind::Start, "Start"),
        (StepKind::Io, "Enter Username\n& Password"),
        (StepKind::Process, "Validate\nCredentials"),
        (StepKind::Decision, "Valid?"),
        (StepKind::Process, "Grant Access"),
        (StepKind::End, "End"),
    ];

    let out = std::path::PathBuf::from("target/out/example_flowchart.png");
    render_linear_flowchart(&steps, Some("Login Process"), &out, &DiagramOptions::default(), Validation::Strict)
        .expect("render to png");
    println!("Wrote {}", out.display());
}
