use std::fmt;
use std::ops::Mul;

use crate::axis::Axis;

/// A 4x4 matrix of `f32`, stored row-major (`data[row][col]`).
///
/// The default value is all zeros. Use the named constructors to obtain an
/// identity, translation, rotation or perspective matrix; the raw structure
/// enforces no invariant of its own.
///
/// Matrices act on homogeneous column vectors: `M * [x, y, z, 1]`. In a
/// product `A.multiply(B)` the right-hand factor is applied to the vector
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix4f {
    pub data: [[f32; 4]; 4],
}

impl Matrix4f {
    pub const ZERO: Self = Self {
        data: [[0.0; 4]; 4],
    };

    pub const IDENTITY: Self = Self {
        data: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Build a matrix from its rows.
    pub const fn from_rows(data: [[f32; 4]; 4]) -> Self {
        Self { data }
    }

    /// The multiplicative identity.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Identity with the last column's first three rows set to `x`, `y`, `z`.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut result = Self::identity();
        result.data[0][3] = x;
        result.data[1][3] = y;
        result.data[2][3] = z;
        result
    }

    /// Rotation by `angle` radians about `axis`.
    ///
    /// The `{cos, -sin; sin, cos}` block is written into the two rows and
    /// columns orthogonal to `axis`, lower index first. Any real angle is
    /// accepted.
    pub fn rotation(angle: f32, axis: Axis) -> Self {
        let (sin, cos) = angle.sin_cos();
        let (a, b) = axis.plane();
        let mut result = Self::identity();
        result.data[a][a] = cos;
        result.data[a][b] = -sin;
        result.data[b][a] = sin;
        result.data[b][b] = cos;
        result
    }

    /// Perspective projection for a `width` x `height` viewport.
    ///
    /// `fov` is the full vertical field of view in radians. Points in front of
    /// the camera have positive view-space z; after the divide, `near` lands
    /// on NDC z = +1 and `far` on NDC z = -1.
    ///
    /// Precondition: `height != 0` and `far != near`. Neither is checked; a
    /// violation divides by zero and yields non-finite entries.
    pub fn perspective(width: u32, height: u32, near: f32, far: f32, fov: f32) -> Self {
        let ratio = width as f32 / height as f32;
        let range = far - near;
        let tan_fov = (fov / 2.0).tan();

        let mut result = Self::ZERO;
        result.data[0][0] = 1.0 / (tan_fov * ratio);
        result.data[1][1] = 1.0 / tan_fov;
        result.data[2][2] = (-near - far) / range;
        result.data[2][3] = 2.0 * far * near / range;
        result.data[3][2] = 1.0;
        result
    }

    /// Matrix product `self * other`. Neither operand changes.
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = Self::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                let mut product = 0.0;
                for k in 0..4 {
                    product += self.data[i][k] * other.data[k][j];
                }
                result.data[i][j] = product;
            }
        }
        result
    }

    pub fn transpose(&self) -> Self {
        let mut result = Self::ZERO;
        for (i, row) in self.data.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                result.data[j][i] = *value;
            }
        }
        result
    }

    /// Rows, exactly as stored.
    pub fn rows(&self) -> [[f32; 4]; 4] {
        self.data
    }

    /// Columns, for APIs that expect column-major storage (WGSL, glam).
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        self.transpose().data
    }

    /// `self * v` for a homogeneous column vector.
    pub fn transform_vector(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (i, row) in self.data.iter().enumerate() {
            out[i] = row.iter().zip(v.iter()).map(|(a, b)| a * b).sum();
        }
        out
    }

    /// True when every entry differs from `other` by at most `epsilon`.
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().flatten().all(|v| v.is_finite())
    }
}

impl Mul for Matrix4f {
    type Output = Matrix4f;

    fn mul(self, rhs: Matrix4f) -> Matrix4f {
        self.multiply(&rhs)
    }
}

impl Mul<&Matrix4f> for &Matrix4f {
    type Output = Matrix4f;

    fn mul(self, rhs: &Matrix4f) -> Matrix4f {
        self.multiply(rhs)
    }
}

impl fmt::Display for Matrix4f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, row) in self.data.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{{{}, {}, {}, {}}}", row[0], row[1], row[2], row[3])?;
        }
        f.write_str("}")
    }
}

#[cfg(feature = "glam")]
impl From<Matrix4f> for glam::Mat4 {
    fn from(m: Matrix4f) -> Self {
        glam::Mat4::from_cols_array_2d(&m.to_cols_array_2d())
    }
}

#[cfg(feature = "glam")]
impl From<glam::Mat4> for Matrix4f {
    fn from(m: glam::Mat4) -> Self {
        // The columns of the transpose are the rows of `m`.
        Matrix4f::from_rows(m.transpose().to_cols_array_2d())
    }
}
