use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fluids_frame::{FrameLoop, FrameOutcome, FrameSnapshot, SessionConfig, WindowConfig};
use fluids_input::{InputState, Key, KeymapConfig, KeymapPreset};
use fluids_render::Viewport;
use fluids_render_wgpu::WgpuRenderer;
use fluids_scene::SceneConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "fluids-desktop", about = "Fluids desktop demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Session config (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured scene
    #[arg(long, value_enum)]
    scene: Option<SceneKind>,

    /// Override the configured keymap with a preset
    #[arg(long)]
    keymap: Option<KeymapPreset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SceneKind {
    Triangle,
    CubeGrid,
    Simulation,
}

impl SceneKind {
    fn config(self) -> SceneConfig {
        match self {
            SceneKind::Triangle => SceneConfig::triangle(),
            SceneKind::CubeGrid => SceneConfig::cube_grid(),
            SceneKind::Simulation => SceneConfig::simulation(),
        }
    }
}

/// Translate a physical key into the core key set. Unmapped keys are ignored.
fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::Space => Key::Space,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        _ => return None,
    };
    Some(key)
}

struct App {
    frames: FrameLoop,
    window_config: WindowConfig,
    window: Option<Arc<Window>>,
    renderer: Option<WgpuRenderer>,
    input: InputState,
    started: Instant,
    /// First fatal error; returned from `main` after the event loop exits.
    error: Option<anyhow::Error>,
}

impl App {
    fn new(frames: FrameLoop, window_config: WindowConfig) -> Self {
        Self {
            frames,
            window_config,
            window: None,
            renderer: None,
            input: InputState::new(),
            started: Instant::now(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.window_config.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.window_config.width,
                self.window_config.height,
            ));
        let window = Arc::new(event_loop.create_window(attrs).context("creating window")?);

        let size = window.inner_size();
        let renderer = pollster::block_on(WgpuRenderer::new(
            window.clone(),
            size.width,
            size.height,
            self.window_config.vsync,
        ))
        .context("initializing renderer")?;

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.started = Instant::now();
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        let Some(key) = map_key(code) else {
            return;
        };
        self.input.set(key, pressed);
        if pressed && self.frames.keymap().is_quit_key(key) {
            tracing::info!(%key, "quit key pressed");
            self.input.request_quit();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer) else {
            return;
        };
        let size = window.inner_size();
        let snapshot = FrameSnapshot::new(
            self.started.elapsed().as_secs_f64(),
            Viewport::new(size.width, size.height),
            self.input.clone(),
        );

        match self.frames.step(&snapshot, renderer) {
            FrameOutcome::Rendered(Err(e)) => {
                self.fail(event_loop, anyhow::Error::new(e).context("rendering frame"));
            }
            FrameOutcome::Exit => event_loop.exit(),
            FrameOutcome::Rendered(Ok(())) | FrameOutcome::Skipped => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.input.request_quit();
                self.redraw(event_loop);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::Focused(false) => {
                self.input.clear();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.handle_key(code, state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut session = match &cli.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading session config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(kind) = cli.scene {
        session.scene = kind.config();
    }
    if let Some(preset) = cli.keymap {
        session.keymap = KeymapConfig::Preset(preset);
    }

    let frames = FrameLoop::from_config(&session)?;
    tracing::info!(scene = frames.scene().name(), "fluids-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(frames, session.window);
    event_loop.run_app(&mut app)?;

    tracing::info!(frames = app.frames.frames_rendered(), "fluids-desktop exiting");
    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
