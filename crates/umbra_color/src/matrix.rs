//! Composable 5x5 color matrices
//!
//! Brightness, contrast, grayscale and sepia are expressed as homogeneous
//! color matrices so a whole filter configuration collapses into a single
//! matrix multiplication per color.

use crate::color::Rgba;

/// Luminance weights used by the grayscale matrix
const LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// A 5x5 homogeneous color matrix, row-major
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix {
    m: [[f32; 5]; 5],
}

impl ColorMatrix {
    pub const fn identity() -> Self {
        let mut m = [[0.0; 5]; 5];
        let mut i = 0;
        while i < 5 {
            m[i][i] = 1.0;
            i += 1;
        }
        Self { m }
    }

    /// Brightness scale; 1.0 is identity
    pub fn brightness(value: f32) -> Self {
        let mut out = Self::identity();
        for row in 0..3 {
            out.m[row][row] = value;
        }
        out
    }

    /// Contrast around mid-gray; 1.0 is identity
    pub fn contrast(value: f32) -> Self {
        let mut out = Self::identity();
        let offset = (1.0 - value) / 2.0;
        for row in 0..3 {
            out.m[row][row] = value;
            out.m[row][4] = offset;
        }
        out
    }

    /// Grayscale mix; 0.0 is identity, 1.0 is full luminance gray
    pub fn grayscale(amount: f32) -> Self {
        let mut out = Self::identity();
        let keep = 1.0 - amount;
        for row in 0..3 {
            for col in 0..3 {
                let base = if row == col { keep } else { 0.0 };
                out.m[row][col] = base + LUMA[col] * amount;
            }
        }
        out
    }

    /// Sepia mix; 0.0 is identity, 1.0 is full sepia
    pub fn sepia(amount: f32) -> Self {
        const SEPIA: [[f32; 3]; 3] = [
            [0.393, 0.769, 0.189],
            [0.349, 0.686, 0.168],
            [0.272, 0.534, 0.131],
        ];
        let mut out = Self::identity();
        let keep = 1.0 - amount;
        for row in 0..3 {
            for col in 0..3 {
                let base = if row == col { keep } else { 0.0 };
                out.m[row][col] = base + SEPIA[row][col] * amount;
            }
        }
        out
    }

    /// Matrix product `self * other`; `other` is applied first
    pub fn multiply(&self, other: &ColorMatrix) -> ColorMatrix {
        let mut m = [[0.0; 5]; 5];
        for (row, out_row) in m.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = (0..5).map(|k| self.m[row][k] * other.m[k][col]).sum();
            }
        }
        ColorMatrix { m }
    }

    /// Apply the matrix to a color, leaving alpha untouched
    pub fn apply(&self, color: Rgba) -> Rgba {
        let v = [
            color.r as f32 / 255.0,
            color.g as f32 / 255.0,
            color.b as f32 / 255.0,
            color.a,
            1.0,
        ];
        let mut out = [0.0f32; 3];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = (0..5).map(|k| self.m[row][k] * v[k]).sum();
        }
        Rgba {
            r: (out[0].clamp(0.0, 1.0) * 255.0).round() as u8,
            g: (out[1].clamp(0.0, 1.0) * 255.0).round() as u8,
            b: (out[2].clamp(0.0, 1.0) * 255.0).round() as u8,
            a: color.a,
        }
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}
