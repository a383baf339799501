use crate::parallel;
use tinto_image::{Image, ImageError};

/// Define the RGB weights for the luminance estimate.
const RW: f32 = 0.299;
const GW: f32 = 0.587;
const BW: f32 = 0.114;

/// Compute the perceptual luminance of an RGB pixel using the formula:
///
/// L = sqrt(0.299 * R^2 + 0.587 * G^2 + 0.114 * B^2)
///
/// The weights sum to one, so the result lies in [0, 255].
///
/// # Example
///
/// ```
/// use tinto_imgproc::color::luminance;
///
/// assert_eq!(luminance([0, 0, 0]), 0.0);
/// assert!((luminance([255, 255, 255]) - 255.0).abs() < 1e-3);
/// ```
pub fn luminance(rgb: [u8; 3]) -> f32 {
    let r = rgb[0] as f32;
    let g = rgb[1] as f32;
    let b = rgb[2] as f32;
    (RW * r * r + GW * g * g + BW * b * b).sqrt()
}

/// Convert an RGB8 image to grayscale by averaging its channels.
///
/// Each output channel is set to floor((R + G + B) / 3), so the output is still
/// a three channel image.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output grayscale RGB image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use tinto_image::{Image, ImageSize};
/// use tinto_imgproc::color::gray_average;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 1,
///         height: 1,
///     },
///     vec![10, 20, 31],
/// )
/// .unwrap();
///
/// let mut gray = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// gray_average(&image, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[20, 20, 20]);
/// ```
pub fn gray_average(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let sum = src_pixel.iter().map(|&c| c as u16).sum::<u16>();
        dst_pixel.fill((sum / 3) as u8);
    });

    Ok(())
}
