use crate::parallel;
use tinto_image::{Image, ImageError};

/// A color in the hue, saturation, lightness model.
///
/// * `h` - hue in degrees in the range [0, 360).
/// * `s` - saturation in the range [0, 1].
/// * `l` - lightness in the range [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: f32,
    /// Saturation.
    pub s: f32,
    /// Lightness.
    pub l: f32,
}

/// Convert a single RGB pixel to HSL.
///
/// Achromatic pixels (all channels equal) get a hue and saturation of zero.
///
/// # Example
///
/// ```
/// use tinto_imgproc::color::hsl_from_rgb_pixel;
///
/// let hsl = hsl_from_rgb_pixel([255, 0, 0]);
/// assert_eq!((hsl.h, hsl.s, hsl.l), (0.0, 1.0, 0.5));
/// ```
pub fn hsl_from_rgb_pixel(rgb: [u8; 3]) -> Hsl {
    // normalize the input to the range [0, 1]
    let r = rgb[0] as f32 / 255.0;
    let g = rgb[1] as f32 / 255.0;
    let b = rgb[2] as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let delta = max - min;
    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsl {
        h: normalize_hue(h * 60.0),
        s,
        l,
    }
}

/// Convert a single HSL color back to an RGB pixel.
///
/// Channels are rounded to the nearest integer and clamped to [0, 255].
///
/// # Example
///
/// ```
/// use tinto_imgproc::color::{rgb_from_hsl_pixel, Hsl};
///
/// let rgb = rgb_from_hsl_pixel(Hsl { h: 120.0, s: 1.0, l: 0.5 });
/// assert_eq!(rgb, [0, 255, 0]);
/// ```
pub fn rgb_from_hsl_pixel(hsl: Hsl) -> [u8; 3] {
    let Hsl { h, s, l } = hsl;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = normalize_hue(h) / 360.0;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    [to_u8(r), to_u8(g), to_u8(b)]
}

/// Wrap a hue in degrees into [0, 360).
pub(crate) fn normalize_hue(h: f32) -> f32 {
    let h = h.rem_euclid(360.0);
    // rem_euclid rounds tiny negative values up to exactly 360
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert an RGB8 image to an HSL image.
///
/// # Arguments
///
/// * `src` - The input RGB image assumed to have 3 channels.
/// * `dst` - The output HSL image.
///
/// # Returns
///
/// The HSL image with the following channels:
///
/// * H: The hue channel in the range [0, 360).
/// * S: The saturation channel in the range [0, 1].
/// * L: The lightness channel in the range [0, 1].
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use tinto_image::{Image, ImageSize};
/// use tinto_imgproc::color::hsl_from_rgb;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///        width: 4,
///        height: 5,
///     },
///     vec![0u8; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut hsl = Image::<f32, 3>::from_size_val(image.size(), 0.0).unwrap();
///
/// hsl_from_rgb(&image, &mut hsl).unwrap();
///
/// assert_eq!(hsl.num_channels(), 3);
/// assert_eq!(hsl.size().width, 4);
/// assert_eq!(hsl.size().height, 5);
/// ```
pub fn hsl_from_rgb(src: &Image<u8, 3>, dst: &mut Image<f32, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let hsl = hsl_from_rgb_pixel([src_pixel[0], src_pixel[1], src_pixel[2]]);
        dst_pixel[0] = hsl.h;
        dst_pixel[1] = hsl.s;
        dst_pixel[2] = hsl.l;
    });

    Ok(())
}

/// Convert an HSL image back to an RGB8 image.
///
/// # Arguments
///
/// * `src` - The input HSL image with channels H in degrees, S and L in [0, 1].
/// * `dst` - The output RGB image.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_hsl(src: &Image<f32, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let rgb = rgb_from_hsl_pixel(Hsl {
            h: src_pixel[0],
            s: src_pixel[1],
            l: src_pixel[2],
        });
        dst_pixel.copy_from_slice(&rgb);
    });

    Ok(())
}
