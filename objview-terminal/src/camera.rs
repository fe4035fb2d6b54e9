/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 0.5;

/// Projected points further than this outside the viewport (in NDC) are dropped.
const NDC_LIMIT: f32 = 4.0;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    Orthographic,
    #[default]
    Perspective,
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
        }
    }
}

/// A point in terminal cell coordinates with its NDC depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

/// Fixed camera looking down -z at the model origin
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 2.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: Self::aspect_for(width, height),
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    fn aspect_for(width: u32, height: u32) -> f32 {
        width.max(1) as f32 * CELL_ASPECT / height.max(1) as f32
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = Self::aspect_for(width, height);
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => Matrix4::new_orthographic(
                -self.aspect,
                self.aspect,
                -1.0,
                1.0,
                self.near,
                self.far,
            ),
        }
    }

    /// Projection * view * model, computed once per frame.
    pub fn mvp(&self, model: &Matrix4<f32>) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix() * model
    }

    /// Project a model-space point through `mvp` into terminal cell space.
    pub fn project(
        &self,
        mvp: &Matrix4<f32>,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<ScreenPoint> {
        let clip = mvp * point.to_homogeneous();

        // Behind the camera or on the eye plane
        if clip.w <= 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        if !(-1.0..=1.0).contains(&depth) || ndc_x.abs() > NDC_LIMIT || ndc_y.abs() > NDC_LIMIT {
            return None;
        }

        Some(ScreenPoint {
            x: (ndc_x + 1.0) * 0.5 * width as f32,
            y: (1.0 - ndc_y) * 0.5 * height as f32,
            depth,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(80, 24)
    }
}
