use fluids_math::Matrix4f;
use fluids_scene::{Instance, Mesh};

use crate::viewport::Viewport;

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameSubmission<'a> {
    /// Frames rendered before this one.
    pub index: u64,
    /// Seconds since the session started.
    pub time: f32,
    pub viewport: Viewport,
    /// Camera transform, row-major, in OpenGL-style clip space.
    pub transform: Matrix4f,
    pub mesh: &'a Mesh,
    pub instances: &'a [Instance],
}

/// Renderer-agnostic interface. All backends implement this trait.
///
/// A renderer turns a submission into output (pixels on screen, text, a
/// record). It never feeds anything back into camera or scene state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&mut self, frame: &FrameSubmission<'_>) -> Self::Output;
}

/// Debug text renderer: a human-readable summary of each frame.
///
/// Useful for CLI output, logging, and testing the frame loop without a GPU.
#[derive(Debug)]
pub struct DebugTextRenderer {
    /// Instances listed individually before the rest are elided.
    pub max_listed: usize,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self { max_listed: 4 }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &FrameSubmission<'_>) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} (t={:.3}s, {}x{}) ===\n",
            frame.index, frame.time, frame.viewport.width, frame.viewport.height
        ));
        out.push_str(&format!("Transform: {}\n", frame.transform));
        out.push_str(&format!(
            "Mesh: {} vertices, {} triangles\n",
            frame.mesh.vertices.len(),
            frame.mesh.triangle_count()
        ));
        out.push_str(&format!("Instances: {}\n", frame.instances.len()));

        for (i, inst) in frame.instances.iter().take(self.max_listed).enumerate() {
            let m = &inst.model.data;
            out.push_str(&format!(
                "  [{i}] origin=({:.2}, {:.2}, {:.2}) color=({:.2}, {:.2}, {:.2})\n",
                m[0][3], m[1][3], m[2][3], inst.color[0], inst.color[1], inst.color[2]
            ));
        }
        if frame.instances.len() > self.max_listed {
            out.push_str(&format!(
                "  ... {} more\n",
                frame.instances.len() - self.max_listed
            ));
        }

        out
    }
}

/// What `RecordingRenderer` keeps from each submission.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub index: u64,
    pub time: f32,
    pub viewport: Viewport,
    pub transform: Matrix4f,
    pub instance_count: usize,
}

/// Keeps a copy of every submission it receives.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: Vec<RecordedFrame>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn last(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Renderer for RecordingRenderer {
    type Output = ();

    fn render(&mut self, frame: &FrameSubmission<'_>) -> Self::Output {
        tracing::trace!(index = frame.index, "recording frame");
        self.frames.push(RecordedFrame {
            index: frame.index,
            time: frame.time,
            viewport: frame.viewport,
            transform: frame.transform,
            instance_count: frame.instances.len(),
        });
    }
}
