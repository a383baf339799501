use tinto_image::{Image, ImageError, ImageSize};

use crate::parallel;

/// Resize an image using nearest neighbour sampling.
///
/// Each destination pixel copies the source pixel at
/// `(floor(x * src_w / dst_w), floor(y * src_h / dst_h))`.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `new_size` - The size of the output image.
///
/// # Returns
///
/// The resized image.
///
/// # Example
///
/// ```
/// use tinto_image::{Image, ImageSize};
/// use tinto_imgproc::resize::resize_nearest;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![1, 2]).unwrap();
/// let resized = resize_nearest(&image, ImageSize { width: 4, height: 2 }).unwrap();
///
/// assert_eq!(resized.as_slice(), &[1, 1, 2, 2, 1, 1, 2, 2]);
/// ```
pub fn resize_nearest<T, const C: usize>(
    src: &Image<T, C>,
    new_size: ImageSize,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    if src.size() == new_size {
        return Ok(src.clone());
    }

    let mut dst = Image::from_size_val(new_size, T::default())?;

    let (src_w, src_h) = (src.width(), src.height());
    let src_data = src.as_slice();
    parallel::par_iter_rows_indexed(&mut dst, |x, y, dst_pixel| {
        let sx = x * src_w / new_size.width;
        let sy = y * src_h / new_size.height;
        let offset = (sy * src_w + sx) * C;
        dst_pixel.copy_from_slice(&src_data[offset..offset + C]);
    });

    Ok(dst)
}
