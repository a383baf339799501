#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// hue, saturation and lightness overrides.
pub mod adjust;

/// color transformations module.
pub mod color;

/// image enhancement and blending module.
pub mod enhance;

/// module containing parallelization utilities.
pub mod parallel;

/// utility functions for resizing images.
pub mod resize;

/// quarter turn rotations.
pub mod rotate;

/// layered photo filters.
pub mod stylize;

/// operations to threshold images.
pub mod threshold;
