mod gray;

pub use gray::{gray_from_rgb_u8, into_gray, into_rgb, rgb_from_gray};
