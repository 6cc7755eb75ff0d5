use image::{Rgb, RgbImage};

use crate::core::{color_map::ColorMapper, histogram::NormalizedColors};

use super::escape_time::EscapeData;

/// Pixels that never escaped are always drawn in this color.
pub const IN_SET_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/**
 * Position within the gradient for a pixel that escaped after `iter_count`
 * steps. The previous iteration's cumulative value is used as the base so that
 * the full gradient range is covered, and the smoothed fraction blends toward
 * the current iteration's value.
 */
pub fn gradient_position(
    iter_count: u32,
    smoothed_fraction: f64,
    normalized_colors: &NormalizedColors,
) -> f64 {
    let index = iter_count as usize;
    debug_assert!(index >= 1, "escaped pixels always take at least one step");
    let color_of_previous_iter = normalized_colors.value(index - 1);
    let color_of_current_iter = normalized_colors.value(index);
    color_of_previous_iter + smoothed_fraction * (color_of_current_iter - color_of_previous_iter)
}

/**
 * Apply color to each pixel in the image, using the histogram-normalized
 * escape counts as queries into the color map.
 */
pub fn colorize<C: ColorMapper>(
    escape_data: &EscapeData,
    normalized_colors: &NormalizedColors,
    color_map: &C,
) -> RgbImage {
    let [width, height] = escape_data.resolution;
    let max_iter_count = escape_data.max_iter_count;

    let mut imgbuf = RgbImage::new(width, height);
    for (pixel, (&iter_count, &fraction)) in imgbuf.pixels_mut().zip(
        escape_data
            .iterations
            .iter()
            .zip(&escape_data.smoothed_fractions),
    ) {
        *pixel = if iter_count == max_iter_count {
            IN_SET_COLOR
        } else {
            color_map.compute_pixel(gradient_position(iter_count, fraction, normalized_colors))
        };
    }
    imgbuf
}
