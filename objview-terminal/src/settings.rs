/// Display and input settings, built from defaults and command-line flags
use crate::camera::ProjectionMode;

/// How vertices are drawn on top of the wireframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VertexStyle {
    #[default]
    Hidden,
    Dot,
    Square,
}

impl VertexStyle {
    pub fn next(self) -> Self {
        match self {
            VertexStyle::Hidden => VertexStyle::Dot,
            VertexStyle::Dot => VertexStyle::Square,
            VertexStyle::Square => VertexStyle::Hidden,
        }
    }

    pub fn glyph(self) -> Option<char> {
        match self {
            VertexStyle::Hidden => None,
            VertexStyle::Dot => Some('o'),
            VertexStyle::Square => Some('#'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
}

impl EdgeStyle {
    pub fn toggled(self) -> Self {
        match self {
            EdgeStyle::Solid => EdgeStyle::Dashed,
            EdgeStyle::Dashed => EdgeStyle::Solid,
        }
    }
}

/// Viewer settings. Passed through to the renderer and input handling, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub projection: ProjectionMode,
    pub vertex_style: VertexStyle,
    pub edge_style: EdgeStyle,
    /// Degrees of rotation per cell of pointer drag
    pub rotation_sensitivity: f32,
    /// Model units per viewport width of pointer drag
    pub translation_sensitivity: f32,
    /// Extra translation gain under perspective projection
    pub perspective_gain: f32,
    /// Scale delta per scroll wheel notch
    pub zoom_step: f32,
    /// Keyboard steps for control-driven transforms
    pub rotation_step: f32,
    pub translation_step: f32,
    pub scale_step: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            projection: ProjectionMode::Perspective,
            vertex_style: VertexStyle::Hidden,
            edge_style: EdgeStyle::Solid,
            rotation_sensitivity: 1.0,
            translation_sensitivity: 1.7,
            perspective_gain: 1.1,
            zoom_step: 0.1,
            rotation_step: 5.0,
            translation_step: 0.1,
            scale_step: 0.1,
        }
    }
}

impl Settings {
    /// Split command-line arguments into settings flags and model paths.
    pub fn from_args<I, S>(args: I) -> Result<(Self, Vec<String>), String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut settings = Self::default();
        let mut paths = Vec::new();

        for arg in args {
            let arg = arg.into();
            match arg.as_str() {
                "--ortho" => settings.projection = ProjectionMode::Orthographic,
                "--vertices" => settings.vertex_style = VertexStyle::Dot,
                "--square-vertices" => settings.vertex_style = VertexStyle::Square,
                "--dashed" => settings.edge_style = EdgeStyle::Dashed,
                flag if flag.starts_with("--") => return Err(format!("unknown option '{flag}'")),
                _ => paths.push(arg),
            }
        }

        Ok((settings, paths))
    }

    /// Translation gain for the current projection.
    pub fn translation_gain(&self) -> f32 {
        match self.projection {
            ProjectionMode::Orthographic => self.translation_sensitivity,
            ProjectionMode::Perspective => self.translation_sensitivity * self.perspective_gain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args() {
        let (settings, paths) =
            Settings::from_args(["--ortho", "model.obj", "--dashed", "other.obj"]).unwrap();
        assert_eq!(settings.projection, ProjectionMode::Orthographic);
        assert_eq!(settings.edge_style, EdgeStyle::Dashed);
        assert_eq!(settings.vertex_style, VertexStyle::Hidden);
        assert_eq!(paths, vec!["model.obj".to_string(), "other.obj".to_string()]);
    }

    #[test]
    fn test_unknown_flag() {
        assert!(Settings::from_args(["--wat"]).is_err());
    }

    #[test]
    fn test_translation_gain() {
        let mut settings = Settings::default();
        assert!((settings.translation_gain() - 1.87).abs() < 1e-6);
        settings.projection = ProjectionMode::Orthographic;
        assert!((settings.translation_gain() - 1.7).abs() < 1e-6);
    }

    #[test]
    fn test_vertex_style_cycle() {
        let style = VertexStyle::Hidden.next().next().next();
        assert_eq!(style, VertexStyle::Hidden);
        assert_eq!(VertexStyle::Dot.glyph(), Some('o'));
    }
}
