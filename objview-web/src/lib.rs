/// objview Web - WASM bindings over the viewer core
///
/// A browser front end owns one `WebViewer`, feeds it OBJ text, forwards
/// pointer and control input, and reads the 4x4 model matrix every frame to
/// upload as a uniform.

use objview_core::{InputSource, LoadFallback, TransformKind, Viewer, ViewerConfig};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WebViewer {
    viewer: Viewer,
}

#[wasm_bindgen]
impl WebViewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebViewer {
        WebViewer {
            viewer: Viewer::new(ViewerConfig {
                fallback: LoadFallback::RestorePrevious,
            }),
        }
    }

    /// Parse OBJ source text. On failure the previous model stays loaded.
    pub fn load(&mut self, name: &str, source: &str) -> Result<(), JsValue> {
        self.viewer
            .load_from_reader(name, source.as_bytes())
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Apply a transform by name (`"translate_x"`, `"scale"`, `"rotate_y"`, ...).
    /// Returns whether the model matrix changed.
    pub fn transform(&mut self, kind: &str, pointer: bool, magnitude: f32) -> Result<bool, JsValue> {
        let kind: TransformKind = kind.parse().map_err(|e: String| JsValue::from_str(&e))?;
        Ok(self.apply(kind, pointer, magnitude))
    }

    pub fn reset(&mut self) {
        self.viewer.reset_transform();
    }

    /// Row-major entries of the model matrix.
    pub fn matrix(&self) -> Vec<f32> {
        self.viewer.transform_ref().as_slice().to_vec()
    }

    /// Flat `x, y, z` triples for a vertex buffer.
    pub fn vertex_buffer(&self) -> Vec<f32> {
        self.viewer
            .vertices()
            .iter()
            .flat_map(|v| [v.position.x, v.position.y, v.position.z])
            .collect()
    }

    /// Flat index pairs for a `LINES` element buffer.
    pub fn edge_buffer(&self) -> Vec<u32> {
        self.viewer
            .edges()
            .iter()
            .flat_map(|e| [e.first() as u32, e.second() as u32])
            .collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.viewer.mesh().vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.viewer.mesh().edge_count()
    }
}

impl WebViewer {
    fn apply(&mut self, kind: TransformKind, pointer: bool, magnitude: f32) -> bool {
        self.viewer
            .apply_transform(kind, InputSource::from(pointer), magnitude)
    }
}

impl Default for WebViewer {
    fn default() -> Self {
        Self::new()
    }
}
