use log::{debug, info, warn};

use pixconv_image::{DynImage, Image};
use pixconv_imgproc::filter::{available_filters, FilterAction, FilterError, NamedFilter};

use crate::config::FilterConfig;

/// Applies named filters to decoded images.
///
/// This is what a classification service holds to run the optional pre-processing step. It
/// owns the configuration and does the logging, the filter engine itself stays silent.
///
/// # Examples
///
/// ```
/// use pixconv::{FilterConfig, FilterService};
/// use pixconv::image::{Image, ImageSize};
///
/// let service = FilterService::new(FilterConfig::default());
/// let image = Image::<u8, 1>::from_size_val(ImageSize { width: 3, height: 3 }, 50).unwrap();
///
/// let blurred = service.apply_filter(&image, "blur").unwrap();
/// assert_eq!(blurred, image);
///
/// assert_eq!(service.available_filters(), &["blur", "edge_detection", "sharpen", "none"]);
/// ```
#[derive(Debug, Clone)]
pub struct FilterService {
    config: FilterConfig,
}

impl Default for FilterService {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}

impl FilterService {
    /// Create a new service with the given configuration.
    pub fn new(config: FilterConfig) -> Self {
        if NamedFilter::from_name(&config.default_filter).is_none() {
            warn!(
                "Unknown default filter: {}, images will pass through unchanged",
                config.default_filter
            );
        }
        info!(
            "Filter service initialized with default filter '{}'",
            config.default_filter
        );
        Self { config }
    }

    /// The configuration of the service.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// The names of all filters, in a stable order.
    pub fn available_filters(&self) -> &'static [&'static str] {
        available_filters()
    }

    /// The filter a request for `name` actually runs.
    ///
    /// Unknown names run [`NamedFilter::None`] and are logged as a warning when
    /// `warn_on_unknown` is set.
    pub fn applied_filter(&self, name: &str) -> NamedFilter {
        match NamedFilter::from_name(name) {
            Some(filter) => filter,
            None => {
                if self.config.warn_on_unknown {
                    warn!("Unknown filter: {name}, returning original");
                }
                NamedFilter::None
            }
        }
    }

    fn action(&self, name: &str) -> FilterAction<'static> {
        info!("Applying filter: {name}");
        self.applied_filter(name).action()
    }

    /// Apply the filter called `name` to an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is empty or the execution strategy is invalid.
    /// Unknown names are not an error.
    pub fn apply_filter<const C: usize>(
        &self,
        image: &Image<u8, C>,
        name: &str,
    ) -> Result<Image<u8, C>, FilterError> {
        debug!(
            "Image size={}, channels={}",
            image.size(),
            image.num_channels()
        );
        self.action(name)
            .apply_with(image, self.config.execution_strategy())
    }

    /// Apply the configured default filter to an image.
    pub fn apply_default<const C: usize>(
        &self,
        image: &Image<u8, C>,
    ) -> Result<Image<u8, C>, FilterError> {
        self.apply_filter(image, &self.config.default_filter)
    }

    /// Apply the filter called `name`, or the default filter when `name` is `None`.
    pub fn apply_optional<const C: usize>(
        &self,
        image: &Image<u8, C>,
        name: Option<&str>,
    ) -> Result<Image<u8, C>, FilterError> {
        match name {
            Some(name) => self.apply_filter(image, name),
            None => self.apply_default(image),
        }
    }

    /// Apply the filter called `name` to an image whose layout is known at runtime.
    ///
    /// The output keeps the layout of the input.
    pub fn apply_filter_dyn(&self, image: &DynImage, name: &str) -> Result<DynImage, FilterError> {
        Ok(match image {
            DynImage::Gray(gray) => DynImage::Gray(self.apply_filter(gray, name)?),
            DynImage::Rgb(rgb) => DynImage::Rgb(self.apply_filter(rgb, name)?),
        })
    }
}
