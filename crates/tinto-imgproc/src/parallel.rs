use rayon::prelude::*;

use tinto_image::Image;

/// Apply a function to each pixel in the image in parallel.
///
/// Rows are processed independently; every pixel of `src` is visited exactly once
/// and paired with the pixel at the same coordinate in `dst`.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
{
    let cols = src.cols();
    src.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each pair of pixels of two images in parallel.
pub fn par_iter_rows_two<T1, const C1: usize, T2, const C2: usize, T3, const C3: usize>(
    src1: &Image<T1, C1>,
    src2: &Image<T2, C2>,
    dst: &mut Image<T3, C3>,
    f: impl Fn(&[T1], &[T2], &mut [T3]) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
    T3: Clone + Send + Sync,
{
    let cols = src1.cols();
    src1.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(src2.as_slice().par_chunks_exact(C2 * cols))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C3 * cols))
        .for_each(|((src1_chunk, src2_chunk), dst_chunk)| {
            src1_chunk
                .chunks_exact(C1)
                .zip(src2_chunk.chunks_exact(C2))
                .zip(dst_chunk.chunks_exact_mut(C3))
                .for_each(|((src1_pixel, src2_pixel), dst_pixel)| {
                    f(src1_pixel, src2_pixel, dst_pixel);
                });
        });
}

/// Fill every pixel of `dst` in parallel from its `(x, y)` coordinate.
pub fn par_iter_rows_indexed<T, const C: usize>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, usize, &mut [T]) + Send + Sync,
) where
    T: Clone + Send + Sync,
{
    let cols = dst.cols();
    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .enumerate()
        .for_each(|(y, dst_chunk)| {
            dst_chunk
                .chunks_exact_mut(C)
                .enumerate()
                .for_each(|(x, dst_pixel)| f(x, y, dst_pixel));
        });
}

#[cfg(test)]
mod tests {
    use tinto_image::{Image, ImageError, ImageSize};

    #[test]
    fn test_par_iter_rows_visits_every_pixel() -> Result<(), ImageError> {
        // wider than tall and taller than wide, both must be fully covered
        for size in [[5, 2], [2, 5]] {
            let src = Image::<u8, 1>::from_size_val(ImageSize::from(size), 1)?;
            let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;
            super::par_iter_rows(&src, &mut dst, |s, d| d[0] = s[0] + 1);
            assert!(dst.as_slice().iter().all(|&v| v == 2));
        }
        Ok(())
    }

    #[test]
    fn test_par_iter_rows_two() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let src1 = Image::<u8, 1>::new(size, vec![1, 2, 3, 4])?;
        let src2 = Image::<u8, 1>::new(size, vec![10, 20, 30, 40])?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;
        super::par_iter_rows_two(&src1, &src2, &mut dst, |a, b, d| d[0] = a[0] + b[0]);
        assert_eq!(dst.as_slice(), &[11, 22, 33, 44]);
        Ok(())
    }

    #[test]
    fn test_par_iter_rows_indexed() -> Result<(), ImageError> {
        let mut dst = Image::<usize, 2>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0,
        )?;
        super::par_iter_rows_indexed(&mut dst, |x, y, d| {
            d[0] = x;
            d[1] = y;
        });
        assert_eq!(dst.get_pixel(2, 1)?, [2, 1]);
        assert_eq!(dst.get_pixel(0, 1)?, [0, 1]);
        Ok(())
    }
}
