#![deny(missing_docs)]
//! Image types and traits for generating and manipulating images

/// image representation for pixel transformations.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize, Rgb8Image};
