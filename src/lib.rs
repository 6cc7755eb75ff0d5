//! Histogram-colored Mandelbrot rendering and perfect maze generation.
//!
//! The two pipelines share nothing but the error type:
//!
//! - [`fractals`]: escape-time kernel -> histogram normalization -> gradient colorization.
//! - [`maze`]: a grid of wall bit sets carved by randomized depth-first traversal.

pub mod core;
pub mod fractals;
pub mod maze;

pub use crate::core::color_map::{Gradient, GradientStop};
pub use crate::core::error::{KernelError, KernelResult};
pub use crate::fractals::mandelbrot::{render_mandelbrot, MandelbrotParams};
pub use crate::maze::{generate_maze, wall_grid::WallGrid, MazeParams};
