use fluids_camera::Camera;
use fluids_input::KeyMap;
use fluids_render::{FrameSubmission, Renderer};
use fluids_scene::Scene;

use crate::clock::FrameClock;
use crate::config::{ConfigError, SessionConfig};
use crate::provider::{FrameSnapshot, InputProvider};

/// Result of one `FrameLoop::step`.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome<T> {
    /// The renderer ran and produced this output.
    Rendered(T),
    /// The viewport had a zero dimension; state advanced but nothing was drawn.
    Skipped,
    /// The snapshot requested termination; nothing advanced.
    Exit,
}

/// Counters returned by `FrameLoop::run`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rendered: u64,
    pub skipped: u64,
    /// True when the provider requested quit, false when the frame limit hit.
    pub quit: bool,
}

/// Owns the camera, keymap, scene and clock, and advances them one frame at a time.
pub struct FrameLoop {
    camera: Camera,
    keymap: KeyMap,
    scene: Scene,
    clock: FrameClock,
    rendered: u64,
}

impl FrameLoop {
    pub fn new(camera: Camera, keymap: KeyMap, scene: Scene, clock: FrameClock) -> Self {
        Self {
            camera,
            keymap,
            scene,
            clock,
            rendered: 0,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self, ConfigError> {
        config.camera.validate()?;
        let scene = Scene::from_config(&config.scene)?;
        let keymap = config.keymap.resolve();
        tracing::debug!(
            scene = scene.name(),
            bindings = keymap.bindings().len(),
            "frame loop configured"
        );
        Ok(Self::new(
            Camera::from_config(&config.camera),
            keymap,
            scene,
            FrameClock::new(config.clock.max_delta),
        ))
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Frames handed to a renderer so far.
    pub fn frames_rendered(&self) -> u64 {
        self.rendered
    }

    /// Run one frame against `snapshot`.
    pub fn step<R: Renderer>(
        &mut self,
        snapshot: &FrameSnapshot,
        renderer: &mut R,
    ) -> FrameOutcome<R::Output> {
        let _span = tracing::info_span!("frame", index = self.rendered).entered();

        if snapshot.input.quit_requested() {
            tracing::debug!("quit requested");
            return FrameOutcome::Exit;
        }

        let delta = self.clock.tick(snapshot.time);
        self.camera.move_with(&snapshot.input, &self.keymap, delta);
        self.scene.update(snapshot.time as f32);

        let viewport = snapshot.viewport;
        if viewport.is_degenerate() {
            tracing::warn!(
                width = viewport.width,
                height = viewport.height,
                "degenerate viewport, skipping frame"
            );
            return FrameOutcome::Skipped;
        }

        let transform = self.camera.transform(viewport.width, viewport.height);
        let instances = self.scene.instances();
        let submission = FrameSubmission {
            index: self.rendered,
            time: snapshot.time as f32,
            viewport,
            transform,
            mesh: self.scene.mesh(),
            instances: &instances,
        };
        let output = renderer.render(&submission);
        self.rendered += 1;

        tracing::trace!(delta, instances = instances.len(), "frame rendered");
        FrameOutcome::Rendered(output)
    }

    /// Step until the provider requests quit or `limit` frames have been polled.
    /// Each rendered output goes to `sink`.
    pub fn run<P, R, F>(
        &mut self,
        provider: &mut P,
        renderer: &mut R,
        limit: Option<u64>,
        mut sink: F,
    ) -> RunSummary
    where
        P: InputProvider,
        R: Renderer,
        F: FnMut(R::Output),
    {
        let mut summary = RunSummary::default();
        let mut polled = 0u64;
        while limit.is_none_or(|max| polled < max) {
            let snapshot = provider.poll();
            polled += 1;
            match self.step(&snapshot, renderer) {
                FrameOutcome::Rendered(output) => {
                    summary.rendered += 1;
                    sink(output);
                }
                FrameOutcome::Skipped => summary.skipped += 1,
                FrameOutcome::Exit => {
                    summary.quit = true;
                    break;
                }
            }
        }
        tracing::info!(
            rendered = summary.rendered,
            skipped = summary.skipped,
            quit = summary.quit,
            "run finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ScriptStep, ScriptedInput};
    use fluids_input::{InputState, Key};
    use fluids_render::{RecordingRenderer, Viewport};
    use fluids_scene::SceneConfig;

    const EPS: f32 = 1e-5;

    fn default_loop() -> FrameLoop {
        FrameLoop::from_config(&SessionConfig::default()).unwrap()
    }

    fn snapshot(time: f64, keys: &[Key]) -> FrameSnapshot {
        FrameSnapshot::new(
            time,
            Viewport::default(),
            InputState::with_keys(keys.iter().copied()),
        )
    }

    #[test]
    fn first_frame_has_zero_delta() {
        let mut frames = default_loop();
        let mut renderer = RecordingRenderer::new();
        let out = frames.step(&snapshot(3.0, &[Key::W]), &mut renderer);
        assert_eq!(out, FrameOutcome::Rendered(()));
        assert_eq!(frames.camera().position.z, 2.5);
    }

    #[test]
    fn camera_moves_by_elapsed_time() {
        let mut frames = default_loop();
        let mut renderer = RecordingRenderer::new();
        frames.step(&snapshot(0.0, &[]), &mut renderer);
        frames.step(&snapshot(0.05, &[Key::S]), &mut renderer);
        assert!((frames.camera().position.z - 2.55).abs() < EPS);

        let last = renderer.last().unwrap();
        assert_eq!(last.transform, frames.camera().transform(500, 500));
        assert_eq!(last.index, 1);
    }

    #[test]
    fn quit_stops_without_rendering() {
        let mut frames = default_loop();
        let mut renderer = RecordingRenderer::new();
        let mut snap = snapshot(0.0, &[Key::W]);
        snap.input.request_quit();
        assert_eq!(frames.step(&snap, &mut renderer), FrameOutcome::Exit);
        assert!(renderer.frames().is_empty());
        assert_eq!(frames.frames_rendered(), 0);
    }

    #[test]
    fn degenerate_viewport_is_skipped() {
        let mut frames = default_loop();
        let mut renderer = RecordingRenderer::new();
        let snap = FrameSnapshot::new(0.0, Viewport::new(500, 0), InputState::new());
        assert_eq!(frames.step(&snap, &mut renderer), FrameOutcome::Skipped);
        assert!(renderer.frames().is_empty());
    }

    #[test]
    fn scene_follows_snapshot_time() {
        let config = SessionConfig {
            scene: SceneConfig::simulation(),
            ..SessionConfig::default()
        };
        let mut frames = FrameLoop::from_config(&config).unwrap();
        let mut renderer = RecordingRenderer::new();
        frames.step(&snapshot(0.0, &[]), &mut renderer);
        let sim = frames.scene().simulation().unwrap();
        assert_eq!(sim.value(0, 0, 0), Some(0.5));
        assert_eq!(renderer.last().unwrap().instance_count, 512);
    }

    #[test]
    fn scripted_replay_is_deterministic() {
        let run = || {
            let mut frames = default_loop();
            let mut script = ScriptedInput::new(
                vec![
                    ScriptStep::new([Key::W], 30),
                    ScriptStep::new([Key::Right], 15),
                    ScriptStep::idle(5),
                ],
                1.0 / 60.0,
                Viewport::default(),
            );
            let mut renderer = RecordingRenderer::new();
            let summary = frames.run(&mut script, &mut renderer, None, |_| {});
            (summary, *frames.camera(), renderer.frames().len())
        };

        let (summary, camera, recorded) = run();
        assert_eq!(summary.rendered, 50);
        assert!(summary.quit);
        assert_eq!(recorded, 50);
        // W held for 30 frames: the first has zero delta, then 29 steps of 1/60.
        assert!((camera.position.z - (2.5 - 29.0 / 60.0)).abs() < 1e-4);
        assert!((camera.rotation.y - 15.0 / 60.0).abs() < 1e-4);

        let (_, again, _) = run();
        assert_eq!(camera, again);
    }

    #[test]
    fn run_respects_frame_limit() {
        let mut frames = default_loop();
        let mut script = ScriptedInput::new(vec![ScriptStep::idle(100)], 0.01, Viewport::default());
        let mut renderer = RecordingRenderer::new();
        let mut seen = 0;
        let summary = frames.run(&mut script, &mut renderer, Some(10), |_| seen += 1);
        assert_eq!(summary.rendered, 10);
        assert!(!summary.quit);
        assert_eq!(seen, 10);
    }

    #[test]
    fn invalid_scene_config_is_an_error() {
        let config = SessionConfig {
            scene: SceneConfig::CubeGrid {
                n: 0,
                spacing: 1.0,
                spin_rate: 1.0,
            },
            ..SessionConfig::default()
        };
        assert!(matches!(
            FrameLoop::from_config(&config),
            Err(ConfigError::Scene(_))
        ));
    }

    #[test]
    fn coincident_clip_planes_are_rejected_before_rendering() {
        let config = SessionConfig::from_yaml_str("camera: { near: 1.0, far: 1.0 }").unwrap();
        assert!(matches!(
            FrameLoop::from_config(&config),
            Err(ConfigError::Camera(_))
        ));
    }

    #[test]
    fn rendered_transforms_are_finite() {
        let mut frames = default_loop();
        let mut renderer = RecordingRenderer::new();
        frames.step(&snapshot(0.0, &[Key::Up]), &mut renderer);
        frames.step(&snapshot(0.5, &[Key::Up]), &mut renderer);
        assert!(renderer.frames().iter().all(|f| f.transform.is_finite()));
    }
}
