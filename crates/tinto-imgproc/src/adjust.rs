use tinto_image::{Image, ImageError};

use crate::color::{hsl_from_rgb_pixel, normalize_hue, rgb_from_hsl_pixel, Hsl};
use crate::parallel;

/// Rewrite every pixel through the HSL model, replacing one component with `f`.
fn map_hsl(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    f: impl Fn(Hsl) -> Hsl + Send + Sync,
) -> Result<(), ImageError> {
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
        dst_pixel.copy_from_slice(&rgb_from_hsl_pixel(f(hsl)));
    });

    Ok(())
}

fn check_unit_interval(name: &'static str, value: f32) -> Result<(), ImageError> {
    // NaN fails the range check as well
    if !(0.0..=1.0).contains(&value) {
        return Err(ImageError::InvalidParameter {
            name,
            value,
            expected: "a number in [0, 1]",
        });
    }
    Ok(())
}

/// Set the hue of every pixel of an RGB8 image.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output RGB image.
/// * `hue` - The new hue in degrees. Values outside [0, 360) wrap around.
///
/// # Errors
///
/// Returns [`ImageError::InvalidParameter`] if `hue` is not finite, and
/// [`ImageError::InvalidImageSize`] if the images differ in size.
///
/// # Example
///
/// ```
/// use tinto_image::{Image, ImageSize};
/// use tinto_imgproc::adjust::set_hue;
///
/// let red = Image::<u8, 3>::new(ImageSize { width: 1, height: 1 }, vec![255, 0, 0]).unwrap();
/// let mut dst = Image::<u8, 3>::from_size_val(red.size(), 0).unwrap();
///
/// set_hue(&red, &mut dst, 180.0).unwrap();
/// assert_eq!(dst.as_slice(), &[0, 255, 255]);
/// ```
pub fn set_hue(src: &Image<u8, 3>, dst: &mut Image<u8, 3>, hue: f32) -> Result<(), ImageError> {
    if !hue.is_finite() {
        return Err(ImageError::InvalidParameter {
            name: "hue",
            value: hue,
            expected: "a finite number of degrees",
        });
    }

    let h = normalize_hue(hue);
    map_hsl(src, dst, |hsl| Hsl { h, ..hsl })
}

/// Set the saturation of every pixel of an RGB8 image.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output RGB image.
/// * `saturation` - The new saturation in [0, 1]. It is not clamped.
///
/// # Errors
///
/// Returns [`ImageError::InvalidParameter`] if `saturation` is outside [0, 1].
pub fn set_saturation(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    saturation: f32,
) -> Result<(), ImageError> {
    check_unit_interval("saturation", saturation)?;
    map_hsl(src, dst, |hsl| Hsl {
        s: saturation,
        ..hsl
    })
}

/// Set the lightness of every pixel of an RGB8 image.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output RGB image.
/// * `lightness` - The new lightness in [0, 1]. It is not clamped.
///
/// # Errors
///
/// Returns [`ImageError::InvalidParameter`] if `lightness` is outside [0, 1].
pub fn set_lightness(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    lightness: f32,
) -> Result<(), ImageError> {
    check_unit_interval("lightness", lightness)?;
    map_hsl(src, dst, |hsl| Hsl {
        l: lightness,
        ..hsl
    })
}

#[cfg(test)]
mod tests {
    use tinto_image::{Image, ImageError, ImageSize};

    fn rgb(data: Vec<u8>) -> Result<Image<u8, 3>, ImageError> {
        Image::new(
            ImageSize {
                width: data.len() / 3,
                height: 1,
            },
            data,
        )
    }

    #[test]
    fn set_hue_red_to_cyan() -> Result<(), ImageError> {
        let image = rgb(vec![255, 0, 0, 128, 0, 0])?;
        let mut dst = Image::from_size_val(image.size(), 0)?;
        super::set_hue(&image, &mut dst, 180.0)?;
        assert_eq!(dst.get_pixel(0, 0)?, [0, 255, 255]);
        assert_eq!(dst.get_pixel(1, 0)?, [0, 128, 128]);
        Ok(())
    }

    #[test]
    fn set_hue_wraps_out_of_range() -> Result<(), ImageError> {
        let image = rgb(vec![255, 0, 0])?;
        let mut wrapped = Image::from_size_val(image.size(), 0)?;
        let mut direct = Image::from_size_val(image.size(), 0)?;
        super::set_hue(&image, &mut wrapped, -240.0)?;
        super::set_hue(&image, &mut direct, 120.0)?;
        assert_eq!(wrapped, direct);
        assert_eq!(direct.as_slice(), &[0, 255, 0]);
        Ok(())
    }

    #[test]
    fn set_hue_keeps_gray() -> Result<(), ImageError> {
        let image = rgb(vec![90, 90, 90])?;
        let mut dst = Image::from_size_val(image.size(), 0)?;
        super::set_hue(&image, &mut dst, 45.0)?;
        assert_eq!(dst.as_slice(), &[90, 90, 90]);
        Ok(())
    }

    #[test]
    fn set_hue_rejects_non_finite() -> Result<(), ImageError> {
        let image = rgb(vec![255, 0, 0])?;
        let mut dst = Image::from_size_val(image.size(), 3)?;
        for hue in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let res = super::set_hue(&image, &mut dst, hue);
            assert!(matches!(
                res,
                Err(ImageError::InvalidParameter { name: "hue", .. })
            ));
        }
        assert_eq!(dst.as_slice(), &[3, 3, 3]);
        Ok(())
    }

    #[test]
    fn set_saturation() -> Result<(), ImageError> {
        let image = rgb(vec![255, 0, 0, 0, 0, 255])?;
        let mut dst = Image::from_size_val(image.size(), 0)?;
        super::set_saturation(&image, &mut dst, 0.0)?;
        // zero saturation leaves only the lightness
        assert_eq!(dst.as_slice(), &[128, 128, 128, 128, 128, 128]);
        Ok(())
    }

    #[test]
    fn set_lightness() -> Result<(), ImageError> {
        let image = rgb(vec![255, 0, 0, 10, 200, 30])?;
        let mut dst = Image::from_size_val(image.size(), 0)?;
        super::set_lightness(&image, &mut dst, 1.0)?;
        assert_eq!(dst.as_slice(), &[255; 6]);
        super::set_lightness(&image, &mut dst, 0.0)?;
        assert_eq!(dst.as_slice(), &[0; 6]);
        Ok(())
    }

    #[test]
    fn unit_interval_parameters_are_not_clamped() -> Result<(), ImageError> {
        let image = rgb(vec![1, 2, 3])?;
        let mut dst = Image::from_size_val(image.size(), 0)?;
        assert!(super::set_saturation(&image, &mut dst, 1.01).is_err());
        assert!(super::set_saturation(&image, &mut dst, -0.1).is_err());
        assert!(super::set_lightness(&image, &mut dst, f32::NAN).is_err());
        assert!(super::set_lightness(&image, &mut dst, 2.0).is_err());
        assert!(super::set_saturation(&image, &mut dst, 1.0).is_ok());
        Ok(())
    }
}
