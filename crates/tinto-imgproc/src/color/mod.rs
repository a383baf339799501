mod gray;
mod hsl;
mod sepia;

pub use gray::{gray_average, luminance};
pub use hsl::{hsl_from_rgb, hsl_from_rgb_pixel, rgb_from_hsl, rgb_from_hsl_pixel, Hsl};
pub use sepia::sepia;

pub(crate) use hsl::normalize_hue;
