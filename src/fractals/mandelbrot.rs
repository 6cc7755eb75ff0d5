use std::io::{self, Write};

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::core::{
    color_map::{Gradient, GradientStop, DEFAULT_GRADIENT_STOPS},
    error::KernelResult,
    histogram::NormalizedColors,
    image_utils::{RenderOptions, ViewportSpecification},
};

use super::{
    colorize::colorize,
    escape_time::{compute_escape_data, EscapeData},
};

fn default_gradient_stops() -> Vec<GradientStop> {
    DEFAULT_GRADIENT_STOPS.to_vec()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MandelbrotParams {
    pub viewport: ViewportSpecification,
    pub max_iter_count: u32,
    #[serde(default = "default_gradient_stops")]
    pub gradient: Vec<GradientStop>,
    #[serde(default)]
    pub render_options: RenderOptions,
}

impl Default for MandelbrotParams {
    fn default() -> MandelbrotParams {
        MandelbrotParams {
            viewport: ViewportSpecification::new([640, 480], [-0.8, 0.0], 2.2),
            max_iter_count: 100,
            gradient: default_gradient_stops(),
            render_options: RenderOptions::default(),
        }
    }
}

/// Everything produced by a render: the image plus the intermediate
/// buffers, which are useful for diagnostics.
pub struct MandelbrotRender {
    pub image: RgbImage,
    pub escape_data: EscapeData,
    pub normalized_colors: NormalizedColors,
}

impl MandelbrotRender {
    /// Print the histogram and the normalized color table to the writer
    pub fn display_diagnostics<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "Mandelbrot render: {}x{}, max_iter_count: {}, in-set pixels: {}",
            self.escape_data.resolution[0],
            self.escape_data.resolution[1],
            self.escape_data.max_iter_count,
            self.escape_data.in_set_count()
        )?;
        self.escape_data.histogram.display(writer)?;
        self.normalized_colors.display(writer)?;
        Ok(())
    }
}

impl MandelbrotParams {
    pub fn render(&self) -> KernelResult<MandelbrotRender> {
        let gradient = Gradient::new(&self.gradient)?;
        render_with_gradient(
            &self.viewport,
            self.max_iter_count,
            &gradient,
            &self.render_options,
        )
    }
}

/**
 * Full pipeline: escape-time evaluation, histogram normalization, then
 * colorization. Fails before producing any output if the inputs are invalid
 * or if no pixel escapes.
 */
pub fn render_with_gradient(
    viewport: &ViewportSpecification,
    max_iter_count: u32,
    gradient: &Gradient,
    options: &RenderOptions,
) -> KernelResult<MandelbrotRender> {
    let escape_data = compute_escape_data(viewport, max_iter_count, options)?;
    let normalized_colors = NormalizedColors::new(&escape_data.histogram)?;
    let image = colorize(&escape_data, &normalized_colors, gradient);

    log::info!(
        "rendered mandelbrot: {}x{} centered at ({}, {}), {} of {} pixels in the set",
        viewport.resolution[0],
        viewport.resolution[1],
        viewport.center[0],
        viewport.center[1],
        escape_data.in_set_count(),
        escape_data.pixel_count()
    );

    Ok(MandelbrotRender {
        image,
        escape_data,
        normalized_colors,
    })
}

/// Render the Mandelbrot set into a row-major RGB8 image.
pub fn render_mandelbrot(
    width: u32,
    height: u32,
    max_iter_count: u32,
    center_x: f64,
    center_y: f64,
    view_height: f64,
    gradient: &Gradient,
) -> KernelResult<RgbImage> {
    let viewport = ViewportSpecification::new([width, height], [center_x, center_y], view_height);
    let render = render_with_gradient(
        &viewport,
        max_iter_count,
        gradient,
        &RenderOptions::default(),
    )?;
    Ok(render.image)
}
