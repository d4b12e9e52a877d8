use pixconv_image::{Image, ImageError};

use super::{FilterError, Kernel2d, ShapeError};
use crate::padding::{spatial_padding, Padding2D};
use crate::parallel::{execute_rows, ExecutionStrategy, ParallelError};

/// Convert a raw convolution sum to an 8-bit sample.
///
/// The value is clamped to `[0, 255]` and then rounded half up, so `22.5` becomes `23`.
///
/// # Examples
///
/// ```
/// use pixconv_imgproc::filter::quantize;
///
/// assert_eq!(quantize(-12.0), 0);
/// assert_eq!(quantize(22.5), 23);
/// assert_eq!(quantize(22.49), 22);
/// assert_eq!(quantize(1e9), 255);
/// ```
#[inline]
pub fn quantize(value: f64) -> u8 {
    (value.clamp(0.0, 255.0) + 0.5).floor() as u8
}

/// Check that an image can be filtered: 1 or 3 channels and a non-zero area.
pub fn validate_image<T, const C: usize>(image: &Image<T, C>) -> Result<(), FilterError> {
    if C != 1 && C != 3 {
        return Err(ShapeError::UnsupportedChannels(C).into());
    }
    if image.size().is_empty() {
        return Err(ShapeError::EmptyImage(image.size()).into());
    }
    Ok(())
}

/// Convolve an image with a 2D kernel using edge replication at the borders.
///
/// Every channel is filtered independently. Each output sample is the weighted sum of the
/// `side x side` neighborhood around the pixel, accumulated in `f64` in row-major kernel order
/// and quantized with [`quantize`]. Out of bounds neighbors take the value of the nearest
/// border pixel.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The convolution kernel.
/// * `strategy` - How to schedule the rows. The output does not depend on it.
///
/// # Errors
///
/// All checks run before anything is written to `dst`. Fails with an invalid shape error if the
/// image is empty or has a channel count other than 1 or 3, and with an image error if `dst`
/// does not have the size of `src`.
pub fn filter2d<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel: &Kernel2d,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    validate_image(src)?;

    if dst.size() != src.size() {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            src.width(),
            src.height(),
        )
        .into());
    }

    if let ExecutionStrategy::Fixed(0) = strategy {
        return Err(ParallelError::InvalidThreadCount(0).into());
    }

    let padding = Padding2D::uniform(kernel.radius());
    let mut padded = Image::<u8, C>::from_size_val(padding.padded_size(src.size())?, 0)?;
    spatial_padding(src, &mut padded, padding)?;

    let side = kernel.side();
    let weights = kernel.weights();
    let padded_stride = padded.width() * C;
    let padded_data = padded.as_slice();

    execute_rows(strategy, dst.as_slice_mut(), src.cols() * C, |y, dst_row| {
        for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            let mut acc = [0.0f64; C];

            for (ky, kernel_row) in weights.chunks_exact(side).enumerate() {
                let start = (y + ky) * padded_stride + x * C;
                let window = &padded_data[start..start + side * C];

                for (&w, pixel) in kernel_row.iter().zip(window.chunks_exact(C)) {
                    for (acc_val, &v) in acc.iter_mut().zip(pixel.iter()) {
                        *acc_val += f64::from(v) * w;
                    }
                }
            }

            for (out, &acc_val) in dst_pixel.iter_mut().zip(acc.iter()) {
                *out = quantize(acc_val);
            }
        }
    })?;

    Ok(())
}

/// Convolve an image with a 2D kernel and return the result as a new image.
///
/// Uses the default [`ExecutionStrategy`]. See [`filter2d`] for the semantics.
///
/// # Examples
///
/// ```
/// use pixconv_image::{Image, ImageSize};
/// use pixconv_imgproc::filter::{apply_kernel, BLUR_3X3};
///
/// let image = Image::<u8, 1>::from_size_val(ImageSize { width: 4, height: 3 }, 128).unwrap();
/// let blurred = apply_kernel(&image, &BLUR_3X3).unwrap();
///
/// assert_eq!(blurred.size(), image.size());
/// assert!(blurred.as_slice().iter().all(|&v| v == 128));
/// ```
pub fn apply_kernel<const C: usize>(
    src: &Image<u8, C>,
    kernel: &Kernel2d,
) -> Result<Image<u8, C>, FilterError> {
    apply_kernel_with(src, kernel, ExecutionStrategy::default())
}

/// Same as [`apply_kernel`] with an explicit execution strategy.
pub fn apply_kernel_with<const C: usize>(
    src: &Image<u8, C>,
    kernel: &Kernel2d,
    strategy: ExecutionStrategy,
) -> Result<Image<u8, C>, FilterError> {
    validate_image(src)?;
    let mut dst = Image::<u8, C>::from_size_val(src.size(), 0)?;
    filter2d(src, &mut dst, kernel, strategy)?;
    Ok(dst)
}
