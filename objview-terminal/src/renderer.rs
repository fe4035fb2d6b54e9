/// ASCII wireframe rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Matrix4;
use objview_core::Mesh;
use std::io::Write;

use crate::camera::{Camera, ScreenPoint};
use crate::settings::{EdgeStyle, Settings};

/// Vertex markers win depth ties against the edges meeting at them.
const VERTEX_DEPTH_BIAS: f32 = 1e-3;

/// Renders mesh edges and vertices into a character grid with a depth buffer
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    /// Draw every edge of `mesh`, then its vertices if the settings ask for them.
    pub fn render_mesh(
        &mut self,
        mesh: &Mesh,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        settings: &Settings,
    ) {
        let mvp = camera.mvp(model_matrix);
        let projected: Vec<Option<ScreenPoint>> = mesh
            .vertices()
            .iter()
            .map(|v| camera.project(&mvp, &v.position, self.width as u32, self.height as u32))
            .collect();
        let lookup = |index: usize| projected.get(index).copied().flatten();

        for edge in mesh.edges() {
            // Edges with a clipped endpoint are skipped
            if let (Some(a), Some(b)) = (lookup(edge.first()), lookup(edge.second())) {
                self.draw_line(a, b, settings.edge_style);
            }
        }

        if let Some(glyph) = settings.vertex_style.glyph() {
            for point in projected.iter().flatten() {
                self.plot(point.x, point.y, point.depth - VERTEX_DEPTH_BIAS, glyph, Color::Yellow);
            }
        }
    }

    fn draw_line(&mut self, a: ScreenPoint, b: ScreenPoint, style: EdgeStyle) {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let glyph = line_glyph(dx, dy);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;

        for i in 0..=steps {
            if style == EdgeStyle::Dashed && (i / 2) % 2 == 1 {
                continue;
            }
            let t = i as f32 / steps as f32;
            let depth = a.depth + (b.depth - a.depth) * t;
            self.plot(a.x + dx * t, a.y + dy * t, depth, glyph, depth_color(depth));
        }
    }

    fn plot(&mut self, x: f32, y: f32, depth: f32, glyph: char, color: Color) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = y * self.width + x;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = glyph;
            self.color_buffer[idx] = color;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Pick a line character from the on-screen direction (y grows downwards).
fn line_glyph(dx: f32, dy: f32) -> char {
    if dx.abs() > 2.0 * dy.abs() {
        '-'
    } else if dy.abs() > 2.0 * dx.abs() {
        '|'
    } else if dx * dy > 0.0 {
        '\\'
    } else {
        '/'
    }
}

fn depth_color(depth: f32) -> Color {
    if depth < 0.9 {
        Color::Cyan
    } else if depth < 0.97 {
        Color::White
    } else {
        Color::DarkGrey
    }
}
