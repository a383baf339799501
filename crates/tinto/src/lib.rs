#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use tinto_image as image;

#[doc(inline)]
pub use tinto_imgproc as imgproc;

#[doc(inline)]
pub use tinto_io as io;
