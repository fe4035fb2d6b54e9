/// objview terminal viewer
///
/// Usage: objview-terminal [--ortho] [--vertices|--square-vertices] [--dashed] [model.obj ...]
///
/// Controls:
///   - Mouse drag: rotate, Shift/Ctrl + drag: pan, wheel: zoom
///   - W/S A/D E/R: rotate about X/Y/Z, arrows/PageUp/PageDown: translate, +/-: scale
///   - 0: reset, P: projection, V: vertices, L: dashed edges, Tab: next file
///   - Q/ESC: quit
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use objview_core::{Mesh, Viewer, ViewerConfig};
use objview_terminal::{Settings, TerminalApp};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let (settings, paths) = match Settings::from_args(env::args().skip(1)) {
        Ok(parsed) => parsed,
        Err(e) => bail!("{e}"),
    };
    let files: Vec<PathBuf> = paths.into_iter().map(PathBuf::from).collect();

    let mut viewer = Viewer::new(ViewerConfig::default());
    match files.first() {
        Some(path) => {
            println!("Loading OBJ file: {}", path.display());
            let mesh = viewer
                .load_mesh(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            println!("Loaded {} vertices, {} faces", mesh.vertex_count(), mesh.face_count());
        }
        None => {
            println!("No OBJ file provided, using default cube...");
            viewer.replace_mesh("cube", Mesh::cube(1.0));
        }
    }

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(viewer, files, settings)?;
    app.run()?;

    println!("Thank you for using objview!");
    Ok(())
}
