/// Elementary 4x4 affine transformations driven by user input
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::matrix::Matrix;

/// Scale factor used when `1 + delta` would reach or cross zero.
pub const MIN_SCALE_FACTOR: f32 = 0.1;

/// cos/sin are rounded to this many steps per unit before use, so repeated
/// rotations do not accumulate drift.
const TRIG_ROUNDING: f64 = 1e7;

/// The kinds of incremental transformation a user can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    TranslateX,
    TranslateY,
    TranslateZ,
    Scale,
    RotateX,
    RotateY,
    RotateZ,
}

impl TransformKind {
    pub const ALL: [TransformKind; 7] = [
        TransformKind::TranslateX,
        TransformKind::TranslateY,
        TransformKind::TranslateZ,
        TransformKind::Scale,
        TransformKind::RotateX,
        TransformKind::RotateY,
        TransformKind::RotateZ,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransformKind::TranslateX => "translate_x",
            TransformKind::TranslateY => "translate_y",
            TransformKind::TranslateZ => "translate_z",
            TransformKind::Scale => "scale",
            TransformKind::RotateX => "rotate_x",
            TransformKind::RotateY => "rotate_y",
            TransformKind::RotateZ => "rotate_z",
        }
    }

    /// Build the 4x4 matrix for this transformation.
    ///
    /// `magnitude` is an offset for translations, a delta applied as
    /// `1 + magnitude` for scaling and an angle in degrees for rotations.
    pub fn matrix(self, magnitude: f32) -> Matrix {
        match self {
            TransformKind::TranslateX => translation(0, magnitude),
            TransformKind::TranslateY => translation(1, magnitude),
            TransformKind::TranslateZ => translation(2, magnitude),
            TransformKind::Scale => {
                let mut factor = 1.0 + magnitude;
                if factor <= 0.0 {
                    factor = MIN_SCALE_FACTOR;
                }
                let mut m = Matrix::identity4();
                m[0][0] = factor;
                m[1][1] = factor;
                m[2][2] = factor;
                m
            }
            TransformKind::RotateX => rotation(1, 2, magnitude),
            TransformKind::RotateY => rotation(2, 0, magnitude),
            TransformKind::RotateZ => rotation(0, 1, magnitude),
        }
    }
}

fn translation(axis: usize, offset: f32) -> Matrix {
    let mut m = Matrix::identity4();
    m[axis][3] = offset;
    m
}

/// Rotation in the plane spanned by axes `a` and `b`, turning `a` towards `b`.
fn rotation(a: usize, b: usize, degrees: f32) -> Matrix {
    let (cos, sin) = rounded_cos_sin(degrees);
    let mut m = Matrix::identity4();
    m[a][a] = cos;
    m[a][b] = -sin;
    m[b][a] = sin;
    m[b][b] = cos;
    m
}

fn rounded_cos_sin(degrees: f32) -> (f32, f32) {
    let radians = f64::from(degrees) * PI / 180.0;
    let round = |value: f64| ((value * TRIG_ROUNDING).round() / TRIG_ROUNDING) as f32;
    (round(radians.cos()), round(radians.sin()))
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransformKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown transformation '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translations() {
        let m = TransformKind::TranslateY.matrix(2.5);
        let mut expected = Matrix::identity4();
        expected[1][3] = 2.5;
        assert_eq!(m, expected);
        assert_eq!(m[0][3], 0.0);
        assert_eq!(m[2][3], 0.0);

        assert_eq!(TransformKind::TranslateX.matrix(-1.0)[0][3], -1.0);
        assert_eq!(TransformKind::TranslateZ.matrix(3.0)[2][3], 3.0);
    }

    #[test]
    fn test_scale_factor() {
        let m = TransformKind::Scale.matrix(1.0);
        assert_eq!(m[0][0], 2.0);
        assert_eq!(m[1][1], 2.0);
        assert_eq!(m[2][2], 2.0);
        assert_eq!(m[3][3], 1.0);
    }

    #[test]
    fn test_scale_clamps_at_zero() {
        for delta in [-1.0, -1.5, -100.0] {
            let m = TransformKind::Scale.matrix(delta);
            assert_eq!(m[0][0], MIN_SCALE_FACTOR);
            assert_eq!(m[2][2], MIN_SCALE_FACTOR);
        }
    }

    #[test]
    fn test_rotation_quarter_turns() {
        // Rotating x by 90 degrees about z gives y
        let rz = TransformKind::RotateZ.matrix(90.0);
        assert_eq!(rz[1][0], 1.0);
        assert_eq!(rz[0][1], -1.0);
        assert_eq!(rz[0][0], 0.0);

        // Rotating y by 90 degrees about x gives z
        let rx = TransformKind::RotateX.matrix(90.0);
        assert_eq!(rx[2][1], 1.0);
        assert_eq!(rx[1][2], -1.0);

        // Rotating z by 90 degrees about y gives x
        let ry = TransformKind::RotateY.matrix(90.0);
        assert_eq!(ry[0][2], 1.0);
        assert_eq!(ry[2][0], -1.0);
    }

    #[test]
    fn test_rotation_values_are_rounded() {
        let m = TransformKind::RotateX.matrix(45.0);
        assert_eq!(m[1][1], 0.7071068);
        assert_eq!(m[2][1], 0.7071068);
        assert_eq!(m[0][0], 1.0);
    }

    #[test]
    fn test_rotation_inverse() {
        for kind in [TransformKind::RotateX, TransformKind::RotateY, TransformKind::RotateZ] {
            let forward = kind.matrix(30.0);
            let back = kind.matrix(-30.0);
            assert_eq!((&forward * &back).unwrap(), Matrix::identity4());
        }
    }

    #[test]
    fn test_names_round_trip() {
        for kind in TransformKind::ALL {
            assert_eq!(kind.name().parse::<TransformKind>().unwrap(), kind);
        }
        assert!("shear".parse::<TransformKind>().is_err());
    }
}
