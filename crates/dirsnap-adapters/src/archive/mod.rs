//! Archive codec adapters.

pub mod zip;

pub use zip::ZipCodec;
