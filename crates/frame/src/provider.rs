use fluids_input::{InputState, Key, ParseKeyError};
use fluids_render::Viewport;
use std::fmt;
use std::str::FromStr;

/// What the windowing layer hands the core once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Wall-clock seconds since the session started.
    pub time: f64,
    pub viewport: Viewport,
    pub input: InputState,
}

impl FrameSnapshot {
    pub fn new(time: f64, viewport: Viewport, input: InputState) -> Self {
        Self {
            time,
            viewport,
            input,
        }
    }
}

/// Source of per-frame snapshots: a window, or a script in tests and replays.
pub trait InputProvider {
    fn poll(&mut self) -> FrameSnapshot;
}

/// Hold `keys` for `frames` consecutive frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    pub keys: Vec<Key>,
    pub frames: u32,
}

impl ScriptStep {
    pub fn new<I: IntoIterator<Item = Key>>(keys: I, frames: u32) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            frames,
        }
    }

    /// No keys held for `frames` frames.
    pub fn idle(frames: u32) -> Self {
        Self::new([], frames)
    }
}

impl fmt::Display for ScriptStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.keys.iter().map(|k| k.name()).collect();
        write!(f, "{}:{}", keys.join("+"), self.frames)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseStepError {
    #[error("expected KEYS:FRAMES (e.g. w+up:30), got {0:?}")]
    MissingFrames(String),
    #[error("invalid frame count {0:?}")]
    BadFrames(String),
    #[error(transparent)]
    Key(#[from] ParseKeyError),
}

impl FromStr for ScriptStep {
    type Err = ParseStepError;

    /// `w+up:30` holds W and Up for 30 frames; `:10` idles for 10.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (keys, frames) = s
            .rsplit_once(':')
            .ok_or_else(|| ParseStepError::MissingFrames(s.to_string()))?;
        let frames: u32 = frames
            .trim()
            .parse()
            .map_err(|_| ParseStepError::BadFrames(frames.to_string()))?;
        let keys = keys
            .split('+')
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != "-")
            .map(str::parse)
            .collect::<Result<Vec<Key>, _>>()?;
        Ok(Self { keys, frames })
    }
}

/// Replays a fixed list of steps at a fixed timestep, then requests quit.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    steps: Vec<ScriptStep>,
    timestep: f64,
    viewport: Viewport,
    step: usize,
    frame_in_step: u32,
    polls: u64,
}

impl ScriptedInput {
    pub fn new(steps: Vec<ScriptStep>, timestep: f64, viewport: Viewport) -> Self {
        Self {
            steps,
            timestep,
            viewport,
            step: 0,
            frame_in_step: 0,
            polls: 0,
        }
    }

    /// Total frames the script covers before it requests quit.
    pub fn total_frames(&self) -> u64 {
        self.steps.iter().map(|s| s.frames as u64).sum()
    }

    fn current_keys(&mut self) -> Option<Vec<Key>> {
        while let Some(step) = self.steps.get(self.step) {
            if self.frame_in_step < step.frames {
                self.frame_in_step += 1;
                return Some(step.keys.clone());
            }
            self.step += 1;
            self.frame_in_step = 0;
        }
        None
    }
}

impl InputProvider for ScriptedInput {
    fn poll(&mut self) -> FrameSnapshot {
        let time = self.polls as f64 * self.timestep;
        self.polls += 1;
        let input = match self.current_keys() {
            Some(keys) => InputState::with_keys(keys),
            None => {
                let mut input = InputState::new();
                input.request_quit();
                input
            }
        };
        FrameSnapshot::new(time, self.viewport, input)
    }
}
