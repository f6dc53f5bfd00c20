use fluids_math::Matrix4f;
use serde::{Deserialize, Serialize};

/// How a backend expects a 4x4 uniform laid out in memory.
///
/// The core always works row-major. GLSL with `transpose = GL_TRUE` wants
/// rows; WGSL and GLSL by default want columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniformLayout {
    RowMajor,
    ColumnMajor,
}

impl UniformLayout {
    /// Four vectors of four floats, ready to copy into a uniform buffer.
    pub fn encode(self, m: &Matrix4f) -> [[f32; 4]; 4] {
        match self {
            UniformLayout::RowMajor => m.rows(),
            UniformLayout::ColumnMajor => m.to_cols_array_2d(),
        }
    }
}

/// Depth range of the backend's clip space.
///
/// `Matrix4f::perspective` targets OpenGL-style clip space: after the divide,
/// near maps to z = +1 and far to z = -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipSpace {
    /// z in [-1, 1] (OpenGL).
    #[default]
    NegativeOneToOne,
    /// z in [0, 1] (wgpu, Vulkan, Metal, D3D). Near lands on 1, far on 0,
    /// so the depth test must use `Greater` against a clear value of 0.
    ZeroToOne,
}

impl ClipSpace {
    /// Row-major matrix that remaps clip-space z into this convention.
    pub fn correction(self) -> Matrix4f {
        match self {
            ClipSpace::NegativeOneToOne => Matrix4f::identity(),
            ClipSpace::ZeroToOne => Matrix4f::from_rows([
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 0.5, 0.5],
                [0.0, 0.0, 0.0, 1.0],
            ]),
        }
    }

    /// `correction * m`.
    pub fn adjust(self, m: &Matrix4f) -> Matrix4f {
        self.correction().multiply(m)
    }
}
