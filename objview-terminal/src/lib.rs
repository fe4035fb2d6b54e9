/// Terminal OBJ viewer driven by mouse and keyboard
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::{info, warn};
use nalgebra::Matrix4;
use objview_core::{InputSource, TransformKind, Viewer};
use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub mod camera;
pub mod renderer;
pub mod settings;

pub use camera::{Camera, ProjectionMode};
pub use renderer::AsciiRenderer;
pub use settings::{EdgeStyle, Settings, VertexStyle};

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    viewer: Viewer,
    files: Vec<PathBuf>,
    file_index: usize,
    settings: Settings,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    drag_from: Option<(u16, u16)>,
    message: Option<String>,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Create an app sized to the current terminal. `files` are cycled with Tab;
    /// the first one is expected to be loaded already.
    pub fn new(viewer: Viewer, files: Vec<PathBuf>, settings: Settings) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(viewer, files, settings, width, height))
    }

    pub fn with_size(
        viewer: Viewer,
        files: Vec<PathBuf>,
        settings: Settings,
        width: u16,
        height: u16,
    ) -> Self {
        let mut camera = Camera::new(width as u32, height as u32);
        camera.mode = settings.projection;

        Self {
            viewer,
            files,
            file_index: 0,
            settings,
            camera,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            drag_from: None,
            message: None,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Drain pending input before drawing
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                self.renderer.resize(width as usize, height as usize);
                self.camera.resize(width as u32, height as u32);
            }
            _ => {}
        }
    }

    /// Keyboard steps act as numeric controls and compose in model space.
    fn handle_key(&mut self, KeyEvent { code, .. }: KeyEvent) {
        let rotate = self.settings.rotation_step;
        let shift = self.settings.translation_step;
        let scale = self.settings.scale_step;

        let step = match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
                None
            }
            KeyCode::Char('w') => Some((TransformKind::RotateX, -rotate)),
            KeyCode::Char('s') => Some((TransformKind::RotateX, rotate)),
            KeyCode::Char('a') => Some((TransformKind::RotateY, -rotate)),
            KeyCode::Char('d') => Some((TransformKind::RotateY, rotate)),
            KeyCode::Char('e') => Some((TransformKind::RotateZ, rotate)),
            KeyCode::Char('r') => Some((TransformKind::RotateZ, -rotate)),
            KeyCode::Left => Some((TransformKind::TranslateX, -shift)),
            KeyCode::Right => Some((TransformKind::TranslateX, shift)),
            KeyCode::Up => Some((TransformKind::TranslateY, shift)),
            KeyCode::Down => Some((TransformKind::TranslateY, -shift)),
            KeyCode::PageUp => Some((TransformKind::TranslateZ, shift)),
            KeyCode::PageDown => Some((TransformKind::TranslateZ, -shift)),
            KeyCode::Char('+') | KeyCode::Char('=') => Some((TransformKind::Scale, scale)),
            KeyCode::Char('-') => Some((TransformKind::Scale, -scale)),
            KeyCode::Char('0') => {
                self.viewer.reset_transform();
                None
            }
            KeyCode::Char('p') => {
                self.settings.projection = self.settings.projection.toggled();
                self.camera.mode = self.settings.projection;
                None
            }
            KeyCode::Char('v') => {
                self.settings.vertex_style = self.settings.vertex_style.next();
                None
            }
            KeyCode::Char('l') => {
                self.settings.edge_style = self.settings.edge_style.toggled();
                None
            }
            KeyCode::Tab => {
                self.next_file();
                None
            }
            _ => None,
        };

        if let Some((kind, magnitude)) = step {
            self.viewer.apply_transform(kind, InputSource::Control, magnitude);
        }
    }

    /// Pointer motion composes in view space: drag rotates, modified drag
    /// pans, and the wheel zooms towards the cursor.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        let width = self.renderer.width().max(1) as f32;
        let height = self.renderer.height().max(1) as f32;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.drag_from = Some((column, row)),
            MouseEventKind::Up(MouseButton::Left) => self.drag_from = None,
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some((from_column, from_row)) = self.drag_from else {
                    self.drag_from = Some((column, row));
                    return;
                };
                let dx = column as f32 - from_column as f32;
                let dy = row as f32 - from_row as f32;

                if mouse.modifiers.is_empty() {
                    let sensitivity = self.settings.rotation_sensitivity;
                    self.pointer(TransformKind::RotateY, dx * sensitivity);
                    self.pointer(TransformKind::RotateX, dy * sensitivity);
                } else {
                    let gain = self.settings.translation_gain();
                    self.pointer(TransformKind::TranslateX, dx / width * gain);
                    self.pointer(TransformKind::TranslateY, -dy / height * gain);
                }
                self.drag_from = Some((column, row));
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let zoom = if mouse.kind == MouseEventKind::ScrollUp {
                    self.settings.zoom_step
                } else {
                    -self.settings.zoom_step
                };
                let gain = self.settings.translation_gain();
                let offset_x = -(column as f32 - width / 2.0) / width;
                let offset_y = (row as f32 - height / 2.0) / height;

                self.pointer(TransformKind::TranslateX, offset_x * zoom * gain);
                self.pointer(TransformKind::TranslateY, offset_y * zoom * gain);
                self.pointer(TransformKind::Scale, zoom);
            }
            _ => {}
        }
    }

    fn pointer(&mut self, kind: TransformKind, magnitude: f32) {
        if magnitude != 0.0 {
            self.viewer.apply_transform(kind, InputSource::Pointer, magnitude);
        }
    }

    fn next_file(&mut self) {
        if self.files.len() < 2 {
            return;
        }
        self.file_index = (self.file_index + 1) % self.files.len();
        let path = self.files[self.file_index].clone();

        match self.viewer.load_mesh(&path) {
            Ok(mesh) => {
                info!("switched to {} ({} vertices)", path.display(), mesh.vertex_count());
                self.message = None;
            }
            Err(e) => {
                warn!("keeping previous model: {e}");
                self.message = Some(e.to_string());
            }
        }
    }

    /// One-line summary shown at the top of the screen.
    pub fn status_line(&self) -> String {
        let info = self.viewer.info();
        let projection = match self.settings.projection {
            ProjectionMode::Perspective => "perspective",
            ProjectionMode::Orthographic => "orthographic",
        };
        let mut line = format!(
            "objview | {} | vertices: {} | edges: {} | {} | FPS: {:.1} | drag=rotate shift+drag=pan wheel=zoom 0=reset Tab=next q=quit",
            info.file_name, info.vertices, info.edges, projection, self.fps
        );
        if let Some(message) = &self.message {
            line = format!("{message} | {line}");
        }
        line
    }

    fn render(&mut self) -> io::Result<()> {
        let model = Matrix4::try_from(self.viewer.transform_ref()).unwrap_or_else(|_| Matrix4::identity());

        self.renderer.clear();
        self.renderer
            .render_mesh(self.viewer.mesh(), &model, &self.camera, &self.settings);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let status: String = self.status_line().chars().take(self.renderer.width()).collect();
        let color = if self.message.is_some() {
            Color::Red
        } else {
            Color::Yellow
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(color),
            Print(status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
