use crate::parallel;
use pixconv_image::{DynImage, Image, ImageError};

/// Convert an RGB8 image to grayscale using the ITU-R 601-2 luma transform:
///
/// L = 0.299 * R + 0.587 * G + 0.114 * B
///
/// computed in 16-bit fixed point with rounding.
///
/// # Arguments
///
/// * `src` - The input RGB8 image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use pixconv_image::{Image, ImageSize};
/// use pixconv_imgproc::color::gray_from_rgb_u8;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![255, 255, 255, 255, 0, 0],
/// )
/// .unwrap();
///
/// let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// gray_from_rgb_u8(&image, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[255, 76]);
/// ```
pub fn gray_from_rgb_u8(src: &Image<u8, 3>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as u32;
        let g = src_pixel[1] as u32;
        let b = src_pixel[2] as u32;
        dst_pixel[0] = ((r * 19595 + g * 38470 + b * 7471 + 0x8000) >> 16) as u8;
    });

    Ok(())
}

/// Convert a grayscale image to an RGB image by replicating the grayscale value across all three channels.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output RGB image.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_gray<T>(src: &Image<T, 1>, dst: &mut Image<T, 3>) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let gray = src_pixel[0];
        dst_pixel[0] = gray;
        dst_pixel[1] = gray;
        dst_pixel[2] = gray;
    });

    Ok(())
}

/// Get a grayscale version of a runtime-tagged image.
///
/// Grayscale input is returned as is, RGB input goes through [`gray_from_rgb_u8`].
pub fn into_gray(image: DynImage) -> Result<Image<u8, 1>, ImageError> {
    match image {
        DynImage::Gray(gray) => Ok(gray),
        DynImage::Rgb(rgb) => {
            let mut gray = Image::from_size_val(rgb.size(), 0u8)?;
            gray_from_rgb_u8(&rgb, &mut gray)?;
            Ok(gray)
        }
    }
}

/// Get an RGB version of a runtime-tagged image.
///
/// RGB input is returned as is, grayscale input goes through [`rgb_from_gray`].
pub fn into_rgb(image: DynImage) -> Result<Image<u8, 3>, ImageError> {
    match image {
        DynImage::Rgb(rgb) => Ok(rgb),
        DynImage::Gray(gray) => {
            let mut rgb = Image::from_size_val(gray.size(), 0u8)?;
            rgb_from_gray(&gray, &mut rgb)?;
            Ok(rgb)
        }
    }
}
