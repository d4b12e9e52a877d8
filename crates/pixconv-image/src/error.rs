/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image size is not valid.
    #[error("Invalid image size ({0}, {1}), expected ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel buffer of an image of this size cannot be addressed.
    #[error("Image size ({0}, {1}) overflows the addressable memory")]
    SizeOverflow(usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds, image has {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when a buffer carries a channel layout other than grayscale or RGB.
    #[error("Unsupported number of channels ({0}), expected 1 or 3")]
    UnsupportedChannelCount(usize),
}
