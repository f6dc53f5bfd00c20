use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use fluids_camera::{Camera, CameraConfig};
use fluids_frame::{FrameLoop, ScriptStep, ScriptedInput, SessionConfig};
use fluids_input::{KeyMap, KeymapConfig, KeymapPreset};
use fluids_math::Matrix4f;
use fluids_render::{DebugTextRenderer, Viewport};
use fluids_scene::SceneConfig;
use glam::Vec3;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fluids-cli", about = "Headless tool for the fluids camera and scenes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
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

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the camera transform for a position, rotation and viewport
    Transform {
        /// Camera position as x y z
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [0.0, 0.0, 2.5], allow_negative_numbers = true)]
        position: Vec<f32>,
        /// Euler rotation in radians as x y z
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [0.0, 0.0, 0.0], allow_negative_numbers = true)]
        rotation: Vec<f32>,
        #[arg(long, default_value_t = 1.5)]
        fov: f32,
        #[arg(long, default_value_t = 0.1)]
        near: f32,
        #[arg(long, default_value_t = 200.0)]
        far: f32,
        #[arg(long, default_value_t = 500)]
        width: u32,
        #[arg(long, default_value_t = 500)]
        height: u32,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Replay scripted key input through the frame loop and print each frame
    Replay {
        /// Session config (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the configured scene
        #[arg(long, value_enum)]
        scene: Option<SceneKind>,
        /// Override the configured keymap with a preset
        #[arg(long)]
        keymap: Option<KeymapPreset>,
        /// Script steps as KEYS:FRAMES, e.g. `w+up:30` or `:10` to idle
        #[arg(short, long = "step", default_values = ["w:30", "right:30", ":10"])]
        steps: Vec<ScriptStep>,
        /// Seconds between frames
        #[arg(long, default_value_t = 1.0 / 60.0)]
        timestep: f64,
        /// Stop after this many frames even if the script continues
        #[arg(long)]
        max_frames: Option<u64>,
        /// Print only the final camera state
        #[arg(short, long)]
        quiet: bool,
    },
    /// Print a keymap as YAML
    Keymap {
        /// Built-in preset to print
        #[arg(long, default_value = "orbit", conflicts_with = "file")]
        preset: KeymapPreset,
        /// Keymap file to validate and print
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print the effective session config as YAML
    Config {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_session(path: Option<&PathBuf>) -> anyhow::Result<SessionConfig> {
    match path {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading session config {}", path.display())),
        None => Ok(SessionConfig::default()),
    }
}

/// The camera transform, after checking both `perspective` preconditions.
fn camera_transform(config: &CameraConfig, viewport: Viewport) -> anyhow::Result<Matrix4f> {
    if viewport.is_degenerate() {
        anyhow::bail!(
            "viewport {}x{} has a zero dimension",
            viewport.width,
            viewport.height
        );
    }
    config.validate()?;
    Ok(Camera::from_config(config).transform(viewport.width, viewport.height))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("fluids-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("math: {}", fluids_math::crate_info());
            println!("input: {}", fluids_input::crate_info());
            println!("render: {}", fluids_render::crate_info());
            let camera = Camera::default();
            println!(
                "default camera: position={} fov={} near={} far={}",
                camera.position, camera.fov, camera.near, camera.far
            );
        }
        Commands::Transform {
            position,
            rotation,
            fov,
            near,
            far,
            width,
            height,
            json,
        } => {
            let config = CameraConfig {
                position: Vec3::from_slice(&position),
                rotation: Vec3::from_slice(&rotation),
                fov,
                near,
                far,
                ..CameraConfig::default()
            };
            let transform = camera_transform(&config, Viewport::new(width, height))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&transform)?);
            } else {
                for row in transform.rows() {
                    println!(
                        "[{:>12.6} {:>12.6} {:>12.6} {:>12.6}]",
                        row[0], row[1], row[2], row[3]
                    );
                }
            }
        }
        Commands::Replay {
            config,
            scene,
            keymap,
            steps,
            timestep,
            max_frames,
            quiet,
        } => {
            let mut session = load_session(config.as_ref())?;
            if let Some(kind) = scene {
                session.scene = kind.config();
            }
            if let Some(preset) = keymap {
                session.keymap = KeymapConfig::Preset(preset);
            }

            let mut frames = FrameLoop::from_config(&session)?;
            let mut script = ScriptedInput::new(steps, timestep, session.window.viewport());
            tracing::info!(
                scene = frames.scene().name(),
                frames = script.total_frames(),
                "replaying script"
            );

            let mut renderer = DebugTextRenderer::new();
            let summary = frames.run(&mut script, &mut renderer, max_frames, |text| {
                if !quiet {
                    print!("{text}");
                }
            });

            let camera = frames.camera();
            println!(
                "Rendered {} frames ({} skipped)",
                summary.rendered, summary.skipped
            );
            println!("Camera position: {}", camera.position);
            println!("Camera rotation: {}", camera.rotation);
        }
        Commands::Keymap { preset, file } => {
            let map = match file {
                Some(path) => KeyMap::load(&path)
                    .with_context(|| format!("loading keymap {}", path.display()))?,
                None => KeyMap::preset(preset),
            };
            print!("{}", map.to_yaml()?);
        }
        Commands::Config { config } => {
            let session = load_session(config.as_ref())?;
            print!("{}", session.to_yaml()?);
        }
    }

    Ok(())
}
