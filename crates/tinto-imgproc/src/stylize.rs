//! Layered photo filter: a warm tint followed by a vignette and a grain overlay.

use std::borrow::Cow;

use tinto_image::{Image, ImageError};

use crate::enhance::{add_weighted, check_warm_tint, warm_tint, BlendWeights};
use crate::resize::resize_nearest;

/// What to do with an overlay whose size differs from the source image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayPolicy {
    /// Fail with [`ImageError::InvalidImageSize`].
    #[default]
    Reject,
    /// Resample the overlay to the source size with nearest neighbour sampling.
    ResampleNearest,
}

/// Parameters of [`vintage`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StylizeParams {
    /// Multiplier of the red channel in the warm tint.
    pub red_gain: f32,
    /// Divisor of the blue channel in the warm tint.
    pub blue_divisor: f32,
    /// Weights of the tinted image and the halo overlay.
    pub halo: BlendWeights,
    /// Weights of the vignetted image and the grain overlay.
    pub grain: BlendWeights,
    /// Handling of overlays that do not match the source size.
    pub overlay_policy: OverlayPolicy,
}

impl Default for StylizeParams {
    fn default() -> Self {
        Self {
            red_gain: 1.2,
            blue_divisor: 1.5,
            halo: BlendWeights::new(0.65, 0.35),
            // the 0.95:0.5 ratio normalized to sum to one
            grain: BlendWeights::ratio(0.95, 0.5),
            overlay_policy: OverlayPolicy::Reject,
        }
    }
}

impl StylizeParams {
    /// Check every parameter against its domain.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidParameter`] for the first invalid parameter.
    pub fn validate(&self) -> Result<(), ImageError> {
        check_warm_tint(self.red_gain, self.blue_divisor)?;
        self.halo.validate()?;
        self.grain.validate()
    }
}

fn fit_overlay<'a>(
    src: &Image<u8, 3>,
    overlay: &'a Image<u8, 3>,
    policy: OverlayPolicy,
    name: &str,
) -> Result<Cow<'a, Image<u8, 3>>, ImageError> {
    if overlay.size() == src.size() {
        return Ok(Cow::Borrowed(overlay));
    }

    match policy {
        OverlayPolicy::Reject => Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            overlay.width(),
            overlay.height(),
        )),
        OverlayPolicy::ResampleNearest => {
            log::debug!(
                "resampling {} overlay from {} to {}",
                name,
                overlay.size(),
                src.size()
            );
            Ok(Cow::Owned(resize_nearest(overlay, src.size())?))
        }
    }
}

/// Apply the layered vintage filter to an RGB8 image.
///
/// The filter runs three stages:
///
/// 1. a warm tint, see [`warm_tint`],
/// 2. a weighted blend with the `halo` overlay (vignette),
/// 3. a weighted blend with the `grain` overlay.
///
/// Overlay sizes and all parameters are checked before the first stage runs.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `halo` - The vignette overlay.
/// * `grain` - The grain overlay.
/// * `params` - The filter parameters.
///
/// # Returns
///
/// The filtered image.
///
/// # Example
///
/// ```
/// use tinto_image::{Image, ImageSize};
/// use tinto_imgproc::stylize::{vintage, StylizeParams};
///
/// let size = ImageSize { width: 4, height: 4 };
/// let image = Image::<u8, 3>::from_size_val(size, 100).unwrap();
/// let halo = Image::<u8, 3>::from_size_val(size, 255).unwrap();
/// let grain = Image::<u8, 3>::from_size_val(size, 128).unwrap();
///
/// let filtered = vintage(&image, &halo, &grain, &StylizeParams::default()).unwrap();
/// assert_eq!(filtered.size(), size);
/// ```
pub fn vintage(
    src: &Image<u8, 3>,
    halo: &Image<u8, 3>,
    grain: &Image<u8, 3>,
    params: &StylizeParams,
) -> Result<Image<u8, 3>, ImageError> {
    params.validate()?;
    let halo = fit_overlay(src, halo, params.overlay_policy, "halo")?;
    let grain = fit_overlay(src, grain, params.overlay_policy, "grain")?;

    log::debug!(
        "vintage filter on {}: red gain {}, blue divisor {}, halo {:?}, grain {:?}",
        src.size(),
        params.red_gain,
        params.blue_divisor,
        params.halo,
        params.grain
    );

    let mut warm = Image::from_size_val(src.size(), 0)?;
    warm_tint(src, &mut warm, params.red_gain, params.blue_divisor)?;

    let mut vignette = Image::from_size_val(src.size(), 0)?;
    add_weighted(&warm, &*halo, params.halo, &mut vignette)?;

    // reuse the warm buffer for the last stage
    add_weighted(&vignette, &*grain, params.grain, &mut warm)?;

    Ok(warm)
}
