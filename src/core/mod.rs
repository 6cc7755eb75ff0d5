pub mod color_map;
pub mod error;
pub mod file_io;
pub mod histogram;
pub mod image_utils;
pub mod interpolation;
