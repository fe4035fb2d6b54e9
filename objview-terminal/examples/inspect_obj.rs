/// Example: Load an OBJ file and print what the viewer sees, without opening the TUI
///
/// Usage: cargo run --example inspect_obj -- path/to/model.obj

use objview_core::{InputSource, Matrix, TransformKind, Viewer, ViewerConfig};
use std::env;
use std::process::ExitCode;

fn print_matrix(matrix: &Matrix) {
    for row in 0..matrix.rows() {
        let cells: Vec<String> = matrix[row].iter().map(|v| format!("{v:9.4}")).collect();
        println!("  [{}]", cells.join(" "));
    }
}

fn main() -> ExitCode {
    let Some(path) = env::args().nth(1) else {
        eprintln!("Usage: inspect_obj <obj-file>");
        return ExitCode::FAILURE;
    };

    let mut viewer = Viewer::new(ViewerConfig::default());
    if let Err(e) = viewer.load_mesh(&path) {
        eprintln!("{e} ({:?})", e.status());
        return ExitCode::FAILURE;
    }

    let info = viewer.info();
    println!("{}: {} vertices, {} faces, {} edges", info.file_name, info.vertices, viewer.faces().len(), info.edges);

    // A short sequence of control-driven steps, as the keyboard would issue them
    viewer.apply_transform(TransformKind::Scale, InputSource::Control, 0.5);
    viewer.apply_transform(TransformKind::RotateY, InputSource::Control, 30.0);
    viewer.apply_transform(TransformKind::TranslateZ, InputSource::Control, -1.0);

    println!("Model matrix after scale 1.5, rotate Y 30, translate Z -1:");
    print_matrix(&viewer.transform());
    ExitCode::SUCCESS
}
