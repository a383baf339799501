use tinto_image::{Image, ImageError};

use crate::parallel;

/// Rotate the input image 90 degrees clockwise.
///
/// The output has the width and height of the input swapped, and for every
/// destination coordinate:
///
/// dst(x, y) = src(y, H - 1 - x)
///
/// where H is the height of the input. No interpolation takes place.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The rotated image with shape (W, H, C).
///
/// # Example
///
/// ```
/// use tinto_image::{Image, ImageSize};
/// use tinto_imgproc::rotate::rotate90_cw;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 3,
///         height: 2,
///     },
///     vec![0, 1, 2, 3, 4, 5],
/// )
/// .unwrap();
///
/// let rotated = rotate90_cw(&image).unwrap();
///
/// assert_eq!(rotated.size().width, 2);
/// assert_eq!(rotated.size().height, 3);
/// assert_eq!(rotated.as_slice(), &[3, 0, 4, 1, 5, 2]);
/// ```
pub fn rotate90_cw<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let src_height = src.height();
    remap(src, src.size().transposed(), |x, y| (y, src_height - 1 - x))
}

/// Rotate the input image 90 degrees counter-clockwise.
///
/// This is the inverse of [`rotate90_cw`]:
///
/// dst(x, y) = src(W - 1 - y, x)
///
/// where W is the width of the input.
pub fn rotate90_ccw<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let src_width = src.width();
    remap(src, src.size().transposed(), |x, y| (src_width - 1 - y, x))
}

/// Rotate the input image by 180 degrees.
pub fn rotate180<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let (w, h) = (src.width(), src.height());
    remap(src, src.size(), |x, y| (w - 1 - x, h - 1 - y))
}

/// Build a new image of `size` where each pixel is copied from the source
/// coordinate returned by `map(x, y)`.
fn remap<T, const C: usize>(
    src: &Image<T, C>,
    size: tinto_image::ImageSize,
    map: impl Fn(usize, usize) -> (usize, usize) + Send + Sync,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let mut dst = Image::from_size_val(size, T::default())?;

    let src_cols = src.cols();
    let src_data = src.as_slice();
    parallel::par_iter_rows_indexed(&mut dst, |x, y, dst_pixel| {
        let (sx, sy) = map(x, y);
        let offset = (sy * src_cols + sx) * C;
        dst_pixel.copy_from_slice(&src_data[offset..offset + C]);
    });

    Ok(dst)
}
