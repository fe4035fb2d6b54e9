/// A viewing session: the loaded mesh plus its cumulative transform
use std::io::BufRead;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::engine::{InputSource, TransformEngine};
use crate::error::LoadResult;
use crate::geometry::{Edge, Face, Mesh, Vertex};
use crate::matrix::Matrix;
use crate::transform::TransformKind;

/// What happens to the displayed mesh after a failed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadFallback {
    /// Keep showing the last successfully loaded mesh, restored from memory.
    #[default]
    RestorePrevious,
    /// Re-read the last successfully loaded file from disk.
    ReloadLastFile,
    /// Leave the mesh empty.
    Discard,
}

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewerConfig {
    pub fallback: LoadFallback,
}

/// Summary of the loaded model for status displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshInfo {
    pub file_name: String,
    pub vertices: usize,
    pub edges: usize,
}

/// Owns one mesh and one cumulative transform.
///
/// Every operation runs to completion on the calling thread. A host that
/// renders from another thread should wrap the viewer in a single lock.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    config: ViewerConfig,
    mesh: Mesh,
    engine: TransformEngine,
    current_file: Option<PathBuf>,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Load the model at `path`.
    ///
    /// On success the transform is reset and `path` becomes the current
    /// file. On failure the configured [`LoadFallback`] decides what the
    /// mesh holds afterwards; the transform is left alone.
    pub fn load_mesh<P: AsRef<Path>>(&mut self, path: P) -> LoadResult<&Mesh> {
        let path = path.as_ref();
        let previous = std::mem::take(&mut self.mesh);

        match self.mesh.load(path) {
            Ok(()) => {
                info!(
                    "loaded {}: {} vertices, {} faces, {} edges",
                    path.display(),
                    self.mesh.vertex_count(),
                    self.mesh.face_count(),
                    self.mesh.edge_count()
                );
                self.engine.reset();
                self.current_file = Some(path.to_path_buf());
                Ok(&self.mesh)
            }
            Err(e) => {
                warn!("failed to load {}: {e}", path.display());
                self.recover(previous);
                Err(e)
            }
        }
    }

    /// Load a model from an in-memory source. `name` becomes the current file.
    pub fn load_from_reader<R: BufRead>(&mut self, name: &str, reader: R) -> LoadResult<&Mesh> {
        let previous = std::mem::take(&mut self.mesh);
        match self.mesh.read_from(reader, Path::new(name)) {
            Ok(()) => {
                info!("loaded {name}: {} vertices", self.mesh.vertex_count());
                self.engine.reset();
                self.current_file = Some(PathBuf::from(name));
                Ok(&self.mesh)
            }
            Err(e) => {
                warn!("failed to load {name}: {e}");
                self.recover(previous);
                Err(e)
            }
        }
    }

    /// Install an already built mesh, as if it had been loaded from `name`.
    pub fn replace_mesh(&mut self, name: impl Into<PathBuf>, mesh: Mesh) {
        self.mesh = mesh;
        self.engine.reset();
        self.current_file = Some(name.into());
    }

    fn recover(&mut self, previous: Mesh) {
        match self.config.fallback {
            LoadFallback::RestorePrevious => self.mesh = previous,
            LoadFallback::ReloadLastFile => {
                if let Some(last) = &self.current_file {
                    if let Err(e) = self.mesh.load(last) {
                        warn!("could not reload {}: {e}", last.display());
                    }
                }
            }
            LoadFallback::Discard => {}
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn vertices(&self) -> &[Vertex] {
        self.mesh.vertices()
    }

    pub fn faces(&self) -> &[Face] {
        self.mesh.faces()
    }

    pub fn edges(&self) -> &[Edge] {
        self.mesh.edges()
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn info(&self) -> MeshInfo {
        let file_name = self
            .current_file
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        MeshInfo {
            file_name,
            vertices: self.mesh.vertex_count(),
            edges: self.mesh.edge_count(),
        }
    }

    /// Apply one incremental transformation. Returns whether the transform changed.
    pub fn apply_transform(
        &mut self,
        kind: TransformKind,
        source: InputSource,
        magnitude: f32,
    ) -> bool {
        self.engine.apply(kind, source, magnitude)
    }

    pub fn reset_transform(&mut self) {
        self.engine.reset();
    }

    /// Snapshot of the cumulative transform.
    pub fn transform(&self) -> Matrix {
        self.engine.snapshot()
    }

    pub fn transform_ref(&self) -> &Matrix {
        self.engine.matrix()
    }
}
