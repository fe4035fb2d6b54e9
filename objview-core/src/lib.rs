/// objview core library - mesh loading and model transformation
///
/// This library provides the windowing-free core of the viewer: a small dense
/// matrix type, a strict OBJ reader producing vertices, faces and edges, and the
/// engine that folds user-driven translate/scale/rotate steps into a single
/// cumulative model matrix.

pub mod engine;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod obj;
pub mod transform;
pub mod viewer;

// Re-export commonly used types
pub use engine::{InputSource, TransformEngine};
pub use error::{LoadError, LoadResult, LoadStatus, MatrixError, MatrixResult};
pub use geometry::{Edge, Face, Mesh, Vertex};
pub use matrix::Matrix;
pub use obj::{load_obj, parse_obj};
pub use transform::TransformKind;
pub use viewer::{LoadFallback, MeshInfo, Viewer, ViewerConfig};
