use crate::{Image, ImageError, ImageSize};

/// An 8-bit image whose channel layout is only known at runtime.
///
/// Decoders hand out a channel count together with a flat buffer; this type
/// narrows that down to the two layouts the filters understand.
#[derive(Clone, Debug, PartialEq)]
pub enum DynImage {
    /// Single channel grayscale image.
    Gray(Image<u8, 1>),
    /// Three channel RGB image.
    Rgb(Image<u8, 3>),
}

impl DynImage {
    /// Create an image from a flat (H, W, C) buffer and its channel count.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::UnsupportedChannelCount`] for anything other than
    /// 1 or 3 channels, or [`ImageError::InvalidChannelShape`] when the buffer
    /// length does not match the size.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixconv_image::{DynImage, ImageSize};
    ///
    /// let size = ImageSize { width: 2, height: 1 };
    /// let image = DynImage::from_raw(size, 3, vec![0u8; 6]).unwrap();
    /// assert_eq!(image.num_channels(), 3);
    ///
    /// assert!(DynImage::from_raw(size, 4, vec![0u8; 8]).is_err());
    /// ```
    pub fn from_raw(size: ImageSize, channels: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        match channels {
            1 => Ok(DynImage::Gray(Image::new(size, data)?)),
            3 => Ok(DynImage::Rgb(Image::new(size, data)?)),
            n => Err(ImageError::UnsupportedChannelCount(n)),
        }
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            DynImage::Gray(image) => image.size(),
            DynImage::Rgb(image) => image.size(),
        }
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        match self {
            DynImage::Gray(image) => image.num_channels(),
            DynImage::Rgb(image) => image.num_channels(),
        }
    }

    /// Get the pixel data as a flat slice in (H, W, C) order.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            DynImage::Gray(image) => image.as_slice(),
            DynImage::Rgb(image) => image.as_slice(),
        }
    }

    /// Consume the image and return its pixel data.
    pub fn into_vec(self) -> Vec<u8> {
        match self {
            DynImage::Gray(image) => image.into_vec(),
            DynImage::Rgb(image) => image.into_vec(),
        }
    }
}

impl From<Image<u8, 1>> for DynImage {
    fn from(image: Image<u8, 1>) -> Self {
        DynImage::Gray(image)
    }
}

impl From<Image<u8, 3>> for DynImage {
    fn from(image: Image<u8, 3>) -> Self {
        DynImage::Rgb(image)
    }
}
