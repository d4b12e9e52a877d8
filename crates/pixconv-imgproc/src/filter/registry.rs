use std::fmt;
use std::str::FromStr;

use pixconv_image::Image;
use thiserror::Error;

use super::{
    apply_kernel_with, validate_image, FilterError, Kernel2d, BLUR_3X3, EDGE_DETECTION_3X3,
    SHARPEN_3X3,
};
use crate::parallel::ExecutionStrategy;

/// Names of the built-in filters, in discovery order.
pub const FILTER_NAMES: [&str; 4] = ["blur", "edge_detection", "sharpen", "none"];

/// The closed set of built-in filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedFilter {
    /// Normalized 3x3 gaussian-like blur.
    Blur,
    /// 3x3 Laplacian edge detection.
    EdgeDetection,
    /// 3x3 sharpening.
    Sharpen,
    /// Pass the image through unchanged.
    None,
}

impl NamedFilter {
    /// Every built-in filter, in the same order as [`FILTER_NAMES`].
    pub const ALL: [NamedFilter; 4] = [
        NamedFilter::Blur,
        NamedFilter::EdgeDetection,
        NamedFilter::Sharpen,
        NamedFilter::None,
    ];

    /// The identifier callers use to select this filter.
    pub fn name(&self) -> &'static str {
        match self {
            NamedFilter::Blur => "blur",
            NamedFilter::EdgeDetection => "edge_detection",
            NamedFilter::Sharpen => "sharpen",
            NamedFilter::None => "none",
        }
    }

    /// Strict lookup by identifier. Matching is exact and case sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|filter| filter.name() == name)
    }

    /// The kernel of this filter, `None` for the identity.
    pub fn kernel(&self) -> Option<&'static Kernel2d> {
        match self {
            NamedFilter::Blur => Some(&BLUR_3X3),
            NamedFilter::EdgeDetection => Some(&EDGE_DETECTION_3X3),
            NamedFilter::Sharpen => Some(&SHARPEN_3X3),
            NamedFilter::None => None,
        }
    }

    /// What applying this filter does to an image.
    pub fn action(&self) -> FilterAction<'static> {
        match self.kernel() {
            Some(kernel) => FilterAction::ApplyKernel(kernel),
            None => FilterAction::Identity,
        }
    }
}

impl fmt::Display for NamedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an identifier that names no built-in filter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown filter: {0}")]
pub struct UnknownFilter(pub String);

impl FromStr for NamedFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

/// The operation a filter identifier resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterAction<'a> {
    /// Return a copy of the input.
    Identity,
    /// Convolve the input with the kernel.
    ApplyKernel(&'a Kernel2d),
}

impl FilterAction<'_> {
    /// Run the action on an image with the default execution strategy.
    pub fn apply<const C: usize>(&self, src: &Image<u8, C>) -> Result<Image<u8, C>, FilterError> {
        self.apply_with(src, ExecutionStrategy::default())
    }

    /// Run the action on an image with the given execution strategy.
    ///
    /// Both arms validate the image the same way, so the identity accepts exactly the images a
    /// kernel would. The identity never pads and returns an independently owned copy.
    pub fn apply_with<const C: usize>(
        &self,
        src: &Image<u8, C>,
        strategy: ExecutionStrategy,
    ) -> Result<Image<u8, C>, FilterError> {
        match self {
            FilterAction::Identity => {
                validate_image(src)?;
                Ok(src.clone())
            }
            FilterAction::ApplyKernel(kernel) => apply_kernel_with(src, kernel, strategy),
        }
    }
}

/// Resolve a filter identifier to the action it performs.
///
/// `"none"` resolves to [`FilterAction::Identity`]. Identifiers that name no built-in filter
/// also resolve to [`FilterAction::Identity`]: an unknown name passes the image through
/// instead of failing the request. Use [`NamedFilter::from_name`] to detect unknown names.
///
/// # Examples
///
/// ```
/// use pixconv_imgproc::filter::{resolve, FilterAction, BLUR_3X3};
///
/// assert_eq!(resolve("blur"), FilterAction::ApplyKernel(&BLUR_3X3));
/// assert_eq!(resolve("none"), FilterAction::Identity);
/// assert_eq!(resolve("blurr"), FilterAction::Identity);
/// ```
pub fn resolve(name: &str) -> FilterAction<'static> {
    match NamedFilter::from_name(name) {
        Some(filter) => filter.action(),
        // lenient default: unknown names are a pass-through
        None => FilterAction::Identity,
    }
}

/// The identifiers of all built-in filters, in a stable order without duplicates.
pub fn available_filters() -> &'static [&'static str] {
    &FILTER_NAMES
}

/// Resolve `name` and apply it to `src`.
pub fn apply_filter<const C: usize>(
    src: &Image<u8, C>,
    name: &str,
) -> Result<Image<u8, C>, FilterError> {
    resolve(name).apply(src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixconv_image::ImageSize;
    use std::collections::HashSet;

    #[test]
    fn test_names_match_variants() {
        let names: Vec<&str> = NamedFilter::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names, FILTER_NAMES);
        assert_eq!(available_filters(), &["blur", "edge_detection", "sharpen", "none"]);

        let unique: HashSet<&str> = available_filters().iter().copied().collect();
        assert_eq!(unique.len(), available_filters().len());
    }

    #[test]
    fn test_from_name_round_trips() {
        for filter in NamedFilter::ALL {
            assert_eq!(NamedFilter::from_name(filter.name()), Some(filter));
            assert_eq!(filter.name().parse::<NamedFilter>(), Ok(filter));
            assert_eq!(filter.to_string(), filter.name());
        }
    }

    #[test]
    fn test_from_name_is_strict() {
        assert_eq!(NamedFilter::from_name("Blur"), None);
        assert_eq!(NamedFilter::from_name(" blur"), None);
        assert_eq!(NamedFilter::from_name(""), None);
        assert_eq!(
            "edge".parse::<NamedFilter>(),
            Err(UnknownFilter("edge".to_string()))
        );
    }

    #[test]
    fn test_resolve() {
        assert_eq!(resolve("blur"), FilterAction::ApplyKernel(&BLUR_3X3));
        assert_eq!(
            resolve("edge_detection"),
            FilterAction::ApplyKernel(&EDGE_DETECTION_3X3)
        );
        assert_eq!(resolve("sharpen"), FilterAction::ApplyKernel(&SHARPEN_3X3));
        assert_eq!(resolve("none"), FilterAction::Identity);
        assert_eq!(resolve("emboss"), FilterAction::Identity);
        assert_eq!(resolve("NONE"), FilterAction::Identity);
    }

    #[test]
    fn test_identity_returns_equal_copy() -> Result<(), FilterError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![1, 2, 3, 250, 251, 252],
        )?;
        let out = apply_filter(&image, "none")?;
        assert_eq!(out, image);
        assert_ne!(out.as_slice().as_ptr(), image.as_slice().as_ptr());

        Ok(())
    }

    #[test]
    fn test_identity_validates_shape() -> Result<(), FilterError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 0,
            },
            vec![],
        )?;
        let res = apply_filter(&image, "none");
        assert!(res.is_err_and(|e| e.is_invalid_shape()));

        Ok(())
    }
}
