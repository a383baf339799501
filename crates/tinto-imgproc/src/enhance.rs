use tinto_image::{Image, ImageDtype, ImageError};

use crate::parallel;

/// A pair of weights applied to the two inputs of [`add_weighted`].
///
/// The weights are used exactly as stored. Use [`BlendWeights::normalized`] to
/// turn a ratio into weights that sum to one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendWeights {
    /// Weight of the first image.
    pub alpha: f64,
    /// Weight of the second image.
    pub beta: f64,
}

impl BlendWeights {
    /// Create a weight pair used as-is.
    pub const fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Scale an already validated ratio to weights summing to one.
    pub(crate) fn ratio(alpha: f64, beta: f64) -> Self {
        let total = alpha + beta;
        Self::new(alpha / total, beta / total)
    }

    /// Scale the ratio `alpha:beta` so that both weights sum to one.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidParameter`] if a weight is negative or not
    /// finite, or if both are zero.
    ///
    /// # Example
    ///
    /// ```
    /// use tinto_imgproc::enhance::BlendWeights;
    ///
    /// let w = BlendWeights::normalized(3.0, 1.0).unwrap();
    /// assert_eq!(w, BlendWeights::new(0.75, 0.25));
    /// ```
    pub fn normalized(alpha: f64, beta: f64) -> Result<Self, ImageError> {
        for value in [alpha, beta] {
            if !value.is_finite() || value < 0.0 {
                return Err(ImageError::InvalidParameter {
                    name: "blend ratio",
                    value: value as f32,
                    expected: "a finite, non-negative number",
                });
            }
        }

        let total = alpha + beta;
        if total == 0.0 {
            return Err(ImageError::InvalidParameter {
                name: "blend ratio sum",
                value: total as f32,
                expected: "a positive number",
            });
        }

        Ok(Self::ratio(alpha, beta))
    }

    pub(crate) fn validate(&self) -> Result<(), ImageError> {
        for value in [self.alpha, self.beta] {
            if !value.is_finite() {
                return Err(ImageError::InvalidParameter {
                    name: "blend weight",
                    value: value as f32,
                    expected: "a finite number",
                });
            }
        }
        Ok(())
    }
}

/// Performs weighted addition of two images `src1` and `src2` with weights `alpha`
/// and `beta`. The formula used is:
///
/// dst(x,y,c) = src1(x,y,c) * alpha + src2(x,y,c) * beta
///
/// The sum is accumulated in f64 and written through [`ImageDtype::from_f64`], so
/// for 8-bit images it is truncated and clamped to [0, 255]. Weights that sum above one brighten the
/// result and saturate at the channel maximum.
///
/// # Arguments
///
/// * `src1` - The first input image.
/// * `src2` - The second input image.
/// * `weights` - Weights of the first and second image.
/// * `dst` - The output image.
///
/// # Errors
///
/// Returns an error if the sizes of `src1`, `src2` and `dst` do not match, or if a
/// weight is not finite. Nothing is written in that case.
///
/// # Example
///
/// ```
/// use tinto_image::{Image, ImageSize};
/// use tinto_imgproc::enhance::{add_weighted, BlendWeights};
///
/// let size = ImageSize { width: 1, height: 1 };
/// let a = Image::<u8, 3>::new(size, vec![100, 200, 250]).unwrap();
/// let b = Image::<u8, 3>::new(size, vec![0, 100, 250]).unwrap();
/// let mut dst = Image::<u8, 3>::from_size_val(size, 0).unwrap();
///
/// add_weighted(&a, &b, BlendWeights::new(0.5, 0.5), &mut dst).unwrap();
/// assert_eq!(dst.as_slice(), &[50, 150, 250]);
/// ```
pub fn add_weighted<T, const C: usize>(
    src1: &Image<T, C>,
    src2: &Image<T, C>,
    weights: BlendWeights,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src1.cols(),
            src1.rows(),
            src2.cols(),
            src2.rows(),
        ));
    }

    if src1.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src1.width(),
            src1.height(),
            dst.width(),
            dst.height(),
        ));
    }

    weights.validate()?;
    let BlendWeights { alpha, beta } = weights;

    // compute the weighted sum
    parallel::par_iter_rows_two(src1, src2, dst, |src1_pixel, src2_pixel, dst_pixel| {
        for ((d, &a), &b) in dst_pixel.iter_mut().zip(src1_pixel).zip(src2_pixel) {
            let (a, b): (f64, f64) = (a.into(), b.into());
            *d = T::from_f64(alpha * a + beta * b);
        }
    });

    Ok(())
}

/// Invert an RGB8 image, mapping every channel `c` to `255 - c`.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image.
///
/// Precondition: the input and output images must have the same size.
pub fn invert<const C: usize>(src: &Image<u8, C>, dst: &mut Image<u8, C>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        for (d, &s) in dst_pixel.iter_mut().zip(src_pixel) {
            *d = u8::MAX - s;
        }
    });

    Ok(())
}

/// Check the warm tint parameters against their domains.
pub(crate) fn check_warm_tint(red_gain: f32, blue_divisor: f32) -> Result<(), ImageError> {
    if !red_gain.is_finite() || red_gain < 0.0 {
        return Err(ImageError::InvalidParameter {
            name: "red gain",
            value: red_gain,
            expected: "a finite, non-negative number",
        });
    }

    if !blue_divisor.is_finite() || blue_divisor <= 0.0 {
        return Err(ImageError::InvalidParameter {
            name: "blue divisor",
            value: blue_divisor,
            expected: "a finite, positive number",
        });
    }

    Ok(())
}

/// Warm an RGB8 image by boosting red and damping blue.
///
/// dst = (R * red_gain, G, B / blue_divisor), truncated and clamped to [0, 255].
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output RGB image.
/// * `red_gain` - Multiplier of the red channel, finite and non-negative.
/// * `blue_divisor` - Divisor of the blue channel, finite and positive.
///
/// # Errors
///
/// Returns an error if the sizes do not match or a parameter is out of its domain.
pub fn warm_tint(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    red_gain: f32,
    blue_divisor: f32,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    check_warm_tint(red_gain, blue_divisor)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = u8::from_f32(src_pixel[0] as f32 * red_gain);
        dst_pixel[1] = src_pixel[1];
        dst_pixel[2] = u8::from_f32(src_pixel[2] as f32 / blue_divisor);
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::BlendWeights;
    use approx::assert_abs_diff_eq;
    use tinto_image::{Image, ImageError, ImageSize};

    #[test]
    fn test_add_weighted() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let src1 = Image::<f32, 1>::new(size, vec![1.0f32, 2.0, 3.0, 4.0])?;
        let src2 = Image::<f32, 1>::new(size, vec![4.0f32, 5.0, 6.0, 7.0])?;
        let expected = [10.0, 14.0, 18.0, 22.0];

        let mut weighted = Image::<f32, 1>::from_size_val(size, 0.0)?;

        super::add_weighted(&src1, &src2, BlendWeights::new(2.0, 2.0), &mut weighted)?;

        weighted
            .as_slice()
            .iter()
            .zip(expected.iter())
            .for_each(|(a, b)| {
                assert!((a - b).abs() < 1e-6);
            });

        Ok(())
    }

    #[test]
    fn test_add_weighted_u8_truncates_and_clamps() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let image = Image::<u8, 3>::new(size, vec![101, 200, 3, 200, 10, 0])?;
        let halo = Image::<u8, 3>::new(size, vec![0, 50, 4, 255, 0, 0])?;
        let mut dst = Image::<u8, 3>::from_size_val(size, 0)?;

        super::add_weighted(&image, &halo, BlendWeights::new(0.65, 0.35), &mut dst)?;
        // 65.65, 130 + 17.5, 1.95 + 1.4, 130 + 89.25, 6.5, 0
        assert_eq!(dst.as_slice(), &[65, 147, 3, 219, 6, 0]);

        super::add_weighted(&image, &halo, BlendWeights::new(0.95, 0.5), &mut dst)?;
        // unnormalized weights saturate
        assert_eq!(dst.get_pixel(1, 0)?, [255, 9, 0]);

        Ok(())
    }

    #[test]
    fn test_add_weighted_same_image_unit_weights() -> Result<(), ImageError> {
        // every u8 value blended with itself at weights summing to one
        let size = ImageSize {
            width: 256,
            height: 1,
        };
        let image = Image::<u8, 1>::from_fn(size, |x, _| [x as u8])?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;

        for weights in [
            BlendWeights::new(0.65, 0.35),
            BlendWeights::normalized(0.95, 0.5)?,
            BlendWeights::normalized(1.0, 3.0)?,
        ] {
            super::add_weighted(&image, &image, weights, &mut dst)?;
            assert_eq!(dst, image, "weights {weights:?}");
        }

        // 0.65 * 29 + 0.35 * 29 lands just below 29 in single precision
        let size = ImageSize {
            width: 1,
            height: 1,
        };
        let a = Image::<u8, 3>::new(size, vec![29, 53, 101])?;
        let mut dst = Image::<u8, 3>::from_size_val(size, 0)?;
        super::add_weighted(&a, &a, BlendWeights::new(0.65, 0.35), &mut dst)?;
        assert_eq!(dst.as_slice(), &[29, 53, 101]);

        Ok(())
    }

    #[test]
    fn test_add_weighted_shape_mismatch() -> Result<(), ImageError> {
        let a = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 3,
            },
            1,
        )?;
        let b = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            1,
        )?;
        let mut dst = Image::<u8, 3>::from_size_val(a.size(), 7)?;

        assert_eq!(
            super::add_weighted(&a, &b, BlendWeights::new(0.5, 0.5), &mut dst),
            Err(ImageError::InvalidImageSize(2, 3, 3, 2))
        );
        assert!(dst.as_slice().iter().all(|&v| v == 7));

        let mut small = Image::<u8, 3>::from_size_val(b.size(), 0)?;
        assert!(super::add_weighted(&a, &a, BlendWeights::new(0.5, 0.5), &mut small).is_err());
        Ok(())
    }

    #[test]
    fn test_add_weighted_rejects_nan_weight() -> Result<(), ImageError> {
        let a = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 1,
                height: 1,
            },
            1,
        )?;
        let mut dst = Image::<u8, 3>::from_size_val(a.size(), 0)?;
        let res = super::add_weighted(&a, &a, BlendWeights::new(f64::NAN, 0.5), &mut dst);
        assert!(matches!(res, Err(ImageError::InvalidParameter { .. })));
        Ok(())
    }

    #[test]
    fn test_blend_weights_normalized() -> Result<(), ImageError> {
        let w = BlendWeights::normalized(0.95, 0.5)?;
        assert_abs_diff_eq!(w.alpha, 0.95 / 1.45, epsilon = 1e-12);
        assert_abs_diff_eq!(w.beta, 0.5 / 1.45, epsilon = 1e-12);
        assert_abs_diff_eq!(w.alpha + w.beta, 1.0, epsilon = 1e-12);

        assert!(BlendWeights::normalized(0.0, 0.0).is_err());
        assert!(BlendWeights::normalized(-1.0, 2.0).is_err());
        assert!(BlendWeights::normalized(f64::INFINITY, 2.0).is_err());
        Ok(())
    }

    #[test]
    fn test_invert() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![0, 128, 255, 10, 20, 30],
        )?;
        let mut inverted = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        super::invert(&image, &mut inverted)?;
        assert_eq!(inverted.as_slice(), &[255, 127, 0, 245, 235, 225]);

        let mut restored = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        super::invert(&inverted, &mut restored)?;
        assert_eq!(restored, image);
        Ok(())
    }

    #[test]
    fn test_warm_tint() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![100, 50, 150, 250, 7, 1],
        )?;
        let mut warm = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        super::warm_tint(&image, &mut warm, 1.2, 1.5)?;
        assert_eq!(warm.as_slice(), &[120, 50, 100, 255, 7, 0]);
        Ok(())
    }

    #[test]
    fn test_warm_tint_invalid_params() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 1,
                height: 1,
            },
            9,
        )?;
        let mut warm = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        assert!(super::warm_tint(&image, &mut warm, 1.2, 0.0).is_err());
        assert!(super::warm_tint(&image, &mut warm, -1.0, 1.5).is_err());
        assert!(super::warm_tint(&image, &mut warm, f32::NAN, 1.5).is_err());
        assert_eq!(warm.as_slice(), &[0, 0, 0]);

        assert_eq!(
            super::warm_tint(&image, &mut warm, 1.2, f32::INFINITY),
            super::check_warm_tint(1.2, f32::INFINITY)
        );
        Ok(())
    }
}
