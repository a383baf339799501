use std::{path::Path, str::FromStr};

use tinto_image::{Image, ImageSize};

use crate::error::IoError;

/// Image file formats that images can be written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics.
    Png,
    /// JPEG, lossy.
    Jpeg,
    /// Windows bitmap.
    Bmp,
    /// Tagged Image File Format.
    Tiff,
}

impl ImageFormat {
    /// Guess the format from the extension of a path.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedImageFormat`] if the path has no extension or an
    /// unknown one.
    pub fn from_path(file_path: impl AsRef<Path>) -> Result<Self, IoError> {
        let file_path = file_path.as_ref();
        let ext = file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| IoError::UnsupportedImageFormat(file_path.display().to_string()))?;
        ext.parse()
    }

    fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
        }
    }
}

impl FromStr for ImageFormat {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "bmp" => Ok(ImageFormat::Bmp),
            "tif" | "tiff" => Ok(ImageFormat::Tiff),
            _ => Err(IoError::UnsupportedImageFormat(s.to_string())),
        }
    }
}

/// Reads an RGB8 image from the given file path.
///
/// The method tries to read from any image format supported by the image crate
/// and converts the decoded pixels to 8-bit RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB8 image containing the image data.
///
/// # Errors
///
/// Returns [`IoError::FileDoesNotExist`] if the file is missing,
/// [`IoError::FileError`] if it cannot be read and [`IoError::ImageCodecError`]
/// if it cannot be decoded.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!("read {} from {}", size, file_path.display());

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

/// Writes an RGB8 image to the given file path in the given format.
///
/// # Arguments
///
/// * `file_path` - The destination path.
/// * `image` - The image to write.
/// * `format` - The file format to encode to.
pub fn write_image(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
    format: ImageFormat,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    image::save_buffer_with_format(
        file_path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        image::ColorType::Rgb8,
        format.to_image_format(),
    )?;

    log::debug!(
        "wrote {} as {:?} to {}",
        image.size(),
        format,
        file_path.display()
    );

    Ok(())
}

/// Writes an RGB8 image to the given file path as PNG.
///
/// # Arguments
///
/// * `file_path` - The destination path.
/// * `image` - The image to write.
pub fn write_image_png_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    write_image(file_path, image, ImageFormat::Png)
}
