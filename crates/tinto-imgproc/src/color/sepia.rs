use crate::parallel;
use tinto_image::{Image, ImageError};

/// Sepia tone matrix in thousandths, one row per output channel.
///
/// Integer weights keep sums that land on a whole number exact before the
/// truncation.
const SEPIA_PER_MILLE: [[u32; 3]; 3] = [
    [393, 769, 189],
    [349, 686, 168],
    [272, 534, 131],
];

/// Apply a sepia tone to an RGB8 image.
///
/// Each output channel is the dot product of the input pixel with a row of the
/// sepia matrix, truncated and clamped to [0, 255]:
///
/// * R = 0.393 * R + 0.769 * G + 0.189 * B
/// * G = 0.349 * R + 0.686 * G + 0.168 * B
/// * B = 0.272 * R + 0.534 * G + 0.131 * B
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output RGB image.
///
/// Precondition: the input and output images must have the same size.
pub fn sepia(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as u32;
        let g = src_pixel[1] as u32;
        let b = src_pixel[2] as u32;
        for (dst, w) in dst_pixel.iter_mut().zip(SEPIA_PER_MILLE.iter()) {
            let sum = (w[0] * r + w[1] * g + w[2] * b) / 1000;
            *dst = sum.min(u8::MAX as u32) as u8;
        }
    });

    Ok(())
}
