use rayon::prelude::*;
use tinto_image::{Image, ImageError};

use crate::color::luminance;
use crate::parallel;

/// Compute the median luminance of an RGB8 image.
///
/// The luminance of every pixel is collected and the value at index
/// `floor(N / 2)` of the ascending order is returned, where `N` is the number of
/// pixels. For an even `N` this is the upper of the two middle values; the two
/// are never averaged.
///
/// # Example
///
/// ```
/// use tinto_image::{Image, ImageSize};
/// use tinto_imgproc::threshold::median_luminance;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize { width: 2, height: 1 },
///     vec![0, 0, 0, 100, 100, 100],
/// ).unwrap();
///
/// assert!((median_luminance(&image) - 100.0).abs() < 1e-3);
/// ```
pub fn median_luminance(src: &Image<u8, 3>) -> f32 {
    let mut values = src
        .as_slice()
        .par_chunks_exact(3)
        .map(|p| luminance([p[0], p[1], p[2]]))
        .collect::<Vec<_>>();

    let mid = values.len() / 2;
    let (_, median, _) = values.select_nth_unstable_by(mid, f32::total_cmp);

    *median
}

/// Turn an RGB8 image into pure black and white around its median luminance.
///
/// The operation runs in two passes. The first one computes the median
/// luminance of the whole image (see [`median_luminance`]). The second one
/// recomputes each pixel's own luminance and writes white (255, 255, 255) when it
/// is greater or equal to the median and black (0, 0, 0) otherwise. With distinct
/// luminances, `ceil(N / 2)` pixels end up white.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output black and white RGB image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use tinto_image::{Image, ImageSize};
/// use tinto_imgproc::threshold::threshold_median_luminance;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize { width: 3, height: 1 },
///     vec![10, 10, 10, 200, 200, 200, 90, 90, 90],
/// ).unwrap();
///
/// let mut bw = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
/// threshold_median_luminance(&image, &mut bw).unwrap();
///
/// assert_eq!(bw.as_slice(), &[0, 0, 0, 255, 255, 255, 255, 255, 255]);
/// ```
pub fn threshold_median_luminance(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    // the whole first pass must finish before any pixel is thresholded
    let median = median_luminance(src);
    log::debug!("median luminance of {}: {}", src.size(), median);

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let value = luminance([src_pixel[0], src_pixel[1], src_pixel[2]]);
        dst_pixel.fill(if value >= median { u8::MAX } else { 0 });
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use tinto_image::{Image, ImageError, ImageSize};

    #[test]
    fn median_is_upper_median() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![10, 20, 30, 200, 100, 50, 0, 0, 0, 255, 255, 255],
        )?;
        // sorted: 0, 19.17, 134.59, 255 -> index 2
        let median = super::median_luminance(&image);
        assert!((median - 18115.0f32.sqrt()).abs() < 1e-2);
        Ok(())
    }

    #[test]
    fn threshold_two_by_two() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let mut image = Image::<u8, 3>::from_size_val(size, 0)?;
        image.set_pixel(0, 0, [10, 20, 30])?;
        image.set_pixel(1, 0, [200, 100, 50])?;
        image.set_pixel(0, 1, [0, 0, 0])?;
        image.set_pixel(1, 1, [255, 255, 255])?;

        let mut bw = Image::<u8, 3>::from_size_val(size, 0)?;
        super::threshold_median_luminance(&image, &mut bw)?;

        assert_eq!(bw.get_pixel(0, 0)?, [0, 0, 0]);
        assert_eq!(bw.get_pixel(1, 0)?, [255, 255, 255]);
        assert_eq!(bw.get_pixel(0, 1)?, [0, 0, 0]);
        assert_eq!(bw.get_pixel(1, 1)?, [255, 255, 255]);
        Ok(())
    }

    #[test]
    fn threshold_uses_each_pixel_own_luminance() -> Result<(), ImageError> {
        // the brightest pixels come first in traversal order
        let image = Image::<u8, 3>::from_fn(
            ImageSize {
                width: 5,
                height: 1,
            },
            |x, _| [(250 - x * 50) as u8; 3],
        )?;
        let mut bw = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        super::threshold_median_luminance(&image, &mut bw)?;
        let whites = bw.as_slice().chunks_exact(3).map(|p| p[0]).collect::<Vec<_>>();
        assert_eq!(whites, vec![255, 255, 255, 0, 0]);
        Ok(())
    }

    #[test]
    fn threshold_uniform_image_is_white() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 3,
                height: 3,
            },
            77,
        )?;
        let mut bw = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        super::threshold_median_luminance(&image, &mut bw)?;
        assert!(bw.as_slice().iter().all(|&v| v == 255));
        Ok(())
    }

    #[test]
    fn threshold_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            77,
        )?;
        let mut bw = Image::<u8, 3>::from_size_val(image.size().transposed(), 0)?;
        assert_eq!(
            super::threshold_median_luminance(&image, &mut bw),
            Err(ImageError::InvalidImageSize(3, 2, 2, 3))
        );
        Ok(())
    }
}
