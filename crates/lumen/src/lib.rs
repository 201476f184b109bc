#![doc = include_str!("../README.md")]

#[doc(inline)]
pub use lumen_tensor as tensor;

#[doc(inline)]
pub use lumen_image as image;

#[doc(inline)]
pub use lumen_imgproc as imgproc;

#[doc(inline)]
pub use lumen_nn as nn;

#[doc(inline)]
pub use lumen_io as io;
