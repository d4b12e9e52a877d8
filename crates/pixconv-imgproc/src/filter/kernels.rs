use std::borrow::Cow;

use super::{FilterError, ShapeError};

/// A square 2D convolution kernel with an odd side length.
///
/// The weights are stored row-major. The odd side guarantees a center element,
/// so the padding radius is `side / 2` on every border.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel2d {
    side: usize,
    weights: Cow<'static, [f64]>,
}

impl Kernel2d {
    /// Create a kernel from its side length and row-major weights.
    ///
    /// # Errors
    ///
    /// Returns an invalid shape error if the side is zero or even, or if the number of weights
    /// is not `side * side`. Returns [`FilterError::InvalidKernelWeight`] for NaN or infinite
    /// weights.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixconv_imgproc::filter::Kernel2d;
    ///
    /// let kernel = Kernel2d::new(3, vec![1.0 / 9.0; 9]).unwrap();
    /// assert_eq!(kernel.side(), 3);
    /// assert_eq!(kernel.radius(), 1);
    ///
    /// assert!(Kernel2d::new(2, vec![0.25; 4]).is_err());
    /// ```
    pub fn new(side: usize, weights: Vec<f64>) -> Result<Self, FilterError> {
        Self::validate(side, &weights)?;
        Ok(Self {
            side,
            weights: Cow::Owned(weights),
        })
    }

    /// Create a kernel from a square array of rows.
    pub fn from_rows<const K: usize>(rows: [[f64; K]; K]) -> Result<Self, FilterError> {
        Self::new(K, rows.iter().flatten().copied().collect())
    }

    /// A kernel of the given side that copies its center sample.
    pub fn identity(side: usize) -> Result<Self, FilterError> {
        let mut weights = vec![0.0; side * side];
        if let Some(center) = weights.get_mut(side * side / 2) {
            *center = 1.0;
        }
        Self::new(side, weights)
    }

    // built-in kernels are checked by the tests below
    const fn from_static(side: usize, weights: &'static [f64]) -> Self {
        Self {
            side,
            weights: Cow::Borrowed(weights),
        }
    }

    fn validate(side: usize, weights: &[f64]) -> Result<(), FilterError> {
        if side == 0 {
            return Err(ShapeError::ZeroKernelSide.into());
        }
        if side % 2 == 0 {
            return Err(ShapeError::EvenKernelSide(side).into());
        }
        if weights.len() != side * side {
            return Err(ShapeError::KernelDataLength(weights.len(), side * side).into());
        }
        if let Some(idx) = weights.iter().position(|w| !w.is_finite()) {
            return Err(FilterError::InvalidKernelWeight(idx));
        }
        Ok(())
    }

    /// The number of rows (and columns) of the kernel.
    pub fn side(&self) -> usize {
        self.side
    }

    /// The padding radius `(side - 1) / 2`.
    pub fn radius(&self) -> usize {
        (self.side - 1) / 2
    }

    /// The row-major weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The weight at `(row, col)`, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.side || col >= self.side {
            return None;
        }
        self.weights.get(row * self.side + col).copied()
    }

    /// The sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Normalized 3x3 gaussian-like averaging kernel, weights sum to 1.
pub static BLUR_3X3: Kernel2d = Kernel2d::from_static(
    3,
    &[
        1.0 / 16.0,
        2.0 / 16.0,
        1.0 / 16.0,
        2.0 / 16.0,
        4.0 / 16.0,
        2.0 / 16.0,
        1.0 / 16.0,
        2.0 / 16.0,
        1.0 / 16.0,
    ],
);

/// 3x3 Laplacian-style edge detection kernel, weights sum to 0.
pub static EDGE_DETECTION_3X3: Kernel2d = Kernel2d::from_static(
    3,
    &[-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0],
);

/// 3x3 sharpening kernel, weights sum to 1.
pub static SHARPEN_3X3: Kernel2d =
    Kernel2d::from_static(3, &[0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0]);
