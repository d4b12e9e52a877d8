use pixconv_image::{Image, ImageError, ImageSize};
use rayon::prelude::*;

/// Maps index `i` to the nearest valid index within `[0, len)`, replicating the edge.
///
/// Example: ...d c b a | a a a a...
///
/// `len` must be non-zero.
#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// Fills the border of `new_data`, which already holds the original image in its center.
fn replicate_border<T: Copy + Send + Sync, const C: usize>(
    new_data: &mut [T],
    old_size: ImageSize,
    new_size: ImageSize,
    padding: &Padding2D,
) {
    let top = padding.top;
    let bottom = padding.bottom;
    let left = padding.left;
    let right = padding.right;
    let row_stride = new_size.width * C;

    // left and right, only on the rows holding the original image
    new_data[top * row_stride..(top + old_size.height) * row_stride]
        .par_chunks_exact_mut(row_stride)
        .for_each(|row| {
            for x in (0..left).chain(new_size.width - right..new_size.width) {
                let src_x = clamp_index(x as isize - left as isize, old_size.width);
                let src_idx = (left + src_x) * C;
                row.copy_within(src_idx..src_idx + C, x * C);
            }
        });

    // top, copying full rows which already carry their left/right borders
    {
        let (top_section, rest) = new_data.split_at_mut(top * row_stride);

        top_section
            .par_chunks_exact_mut(row_stride)
            .enumerate()
            .for_each(|(y, dst_row)| {
                let src_y = clamp_index(y as isize - top as isize, old_size.height);
                let src_row = &rest[src_y * row_stride..(src_y + 1) * row_stride];
                dst_row.copy_from_slice(src_row);
            });
    }

    // bottom
    {
        let split_point = (new_size.height - bottom) * row_stride;
        let (rest, bottom_section) = new_data.split_at_mut(split_point);

        bottom_section
            .par_chunks_exact_mut(row_stride)
            .enumerate()
            .for_each(|(idx, dst_row)| {
                let y = new_size.height - bottom + idx;
                let src_y = clamp_index(y as isize - top as isize, old_size.height);
                let src_start = (src_y + top) * row_stride;
                dst_row.copy_from_slice(&rest[src_start..src_start + row_stride]);
            });
    }
}

/// Represents 2D padding with top, bottom, left, and right values (in pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// The same amount of padding on all four sides.
    pub fn uniform(radius: usize) -> Self {
        Self {
            top: radius,
            bottom: radius,
            left: radius,
            right: radius,
        }
    }

    /// The image size obtained after padding an image of `size`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::SizeOverflow`] if the padded size does not fit in `usize`.
    pub fn padded_size(&self, size: ImageSize) -> Result<ImageSize, ImageError> {
        let width = size
            .width
            .checked_add(self.left)
            .and_then(|w| w.checked_add(self.right));
        let height = size
            .height
            .checked_add(self.top)
            .and_then(|h| h.checked_add(self.bottom));

        match (width, height) {
            (Some(width), Some(height)) => Ok(ImageSize { width, height }),
            _ => Err(ImageError::SizeOverflow(size.width, size.height)),
        }
    }
}

/// Writes `src` into the center of `dst` and fills the border by replicating the outermost
/// rows and columns of `src`.
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `dst` - The destination image where the padded output will be stored.
/// * `padding` - The amount of padding (in pixels) for all four sides.
///
/// # Errors
///
/// Returns an error if the size of `dst` does not match the padded size of `src`,
/// or if `src` is empty.
///
/// # Example
///
/// ```rust
/// use pixconv_image::{ImageSize, Image};
/// use pixconv_imgproc::padding::{Padding2D, spatial_padding};
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![3, 9]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(ImageSize { width: 4, height: 3 }, 0).unwrap();
///
/// spatial_padding(&src, &mut dst, Padding2D::uniform(1)).unwrap();
///
/// assert_eq!(dst.as_slice(), &[3, 3, 9, 9, 3, 3, 9, 9, 3, 3, 9, 9]);
/// ```
pub fn spatial_padding<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    padding: Padding2D,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let expected = padding.padded_size(src.size())?;
    if dst.size() != expected {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            expected.width,
            expected.height,
        ));
    }

    if src.size().is_empty() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            src.width().max(1),
            src.height().max(1),
        ));
    }

    // zero-sized pixels leave nothing to copy
    if C == 0 {
        return Ok(());
    }

    let old_size = src.size();
    let new_size = dst.size();
    let new_data = dst.as_slice_mut();

    // copy old image data as center of new image data
    let new_stride = new_size.width * C;
    let old_stride = old_size.width * C;
    let row_offset = padding.top * new_stride + padding.left * C;

    for (src_row, dst_row) in src
        .as_slice()
        .chunks_exact(old_stride)
        .zip(new_data[row_offset..].chunks_mut(new_stride))
    {
        dst_row[..old_stride].copy_from_slice(src_row);
    }

    replicate_border::<T, C>(new_data, old_size, new_size, &padding);

    Ok(())
}
