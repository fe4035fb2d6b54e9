/// Cumulative model transform built from incremental user input
use log::{debug, warn};

use crate::matrix::Matrix;
use crate::transform::TransformKind;

/// Diagonal entries at or below this magnitude mean the model has collapsed.
const MIN_DIAGONAL: f64 = 1e-15;
/// Diagonal entries at or above this magnitude mean the model has blown up.
const MAX_DIAGONAL: f64 = 1e25;

/// Where a transformation request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Continuous pointer motion. Composed in view space (pre-multiplied).
    Pointer,
    /// A discrete numeric control. Composed in model space (post-multiplied).
    Control,
}

impl InputSource {
    pub fn is_device_driven(self) -> bool {
        self == InputSource::Pointer
    }
}

impl From<bool> for InputSource {
    fn from(device_driven: bool) -> Self {
        if device_driven {
            InputSource::Pointer
        } else {
            InputSource::Control
        }
    }
}

/// Holds the 4x4 cumulative transform of one viewing session
#[derive(Debug, Clone)]
pub struct TransformEngine {
    cumulative: Matrix,
}

impl TransformEngine {
    pub fn new() -> Self {
        Self {
            cumulative: Matrix::identity4(),
        }
    }

    /// Compose one more transformation into the cumulative matrix.
    ///
    /// Returns `false` and leaves the state untouched when the result would
    /// be degenerate.
    pub fn apply(&mut self, kind: TransformKind, source: InputSource, magnitude: f32) -> bool {
        let step = kind.matrix(magnitude);
        let candidate = match source {
            InputSource::Pointer => step.product(&self.cumulative),
            InputSource::Control => self.cumulative.product(&step),
        };

        let candidate = match candidate {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!("dropping {kind} transform: {e}");
                return false;
            }
        };

        if is_degenerate(&candidate) {
            debug!("rejected {kind}({magnitude}) from {source:?}: degenerate result");
            return false;
        }

        self.cumulative = candidate;
        true
    }

    pub fn reset(&mut self) {
        self.cumulative.set_identity();
    }

    pub fn matrix(&self) -> &Matrix {
        &self.cumulative
    }

    pub fn snapshot(&self) -> Matrix {
        self.cumulative.clone()
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn is_degenerate(m: &Matrix) -> bool {
    (0..3).any(|i| {
        let value = f64::from(m[i][i]).abs();
        value <= MIN_DIAGONAL || value >= MAX_DIAGONAL || value.is_nan()
    })
}
