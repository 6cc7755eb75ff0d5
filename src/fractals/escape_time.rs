use rayon::prelude::*;

use crate::core::{
    error::{KernelError, KernelResult},
    histogram::IterationHistogram,
    image_utils::{PixelMapper, RenderOptions, ViewportSpecification},
};

/// A point is declared escaping once its magnitude reaches this radius.
pub const BAILOUT_RADIUS: f64 = 20.0;
pub const BAILOUT_RADIUS_SQUARED: f64 = BAILOUT_RADIUS * BAILOUT_RADIUS;

/**
 * Data structure for storing the internal state of the mandelbrot sequence calculation.
 * Highly optimized version of the equation to reduce floating point operation count.
 */
pub struct EscapeSequence {
    pub x0: f64,
    pub y0: f64,
    pub x: f64,
    pub y: f64,
    pub x_sqr: f64,
    pub y_sqr: f64,
    pub iter_count: u32,
}

impl EscapeSequence {
    /// Implements the equation:  Z := Z*Z + C, starting from Z = 0.
    /// constant_term:  value for "C" in the above equation
    pub fn new(constant_term: &[f64; 2]) -> EscapeSequence {
        EscapeSequence {
            x0: constant_term[0],
            y0: constant_term[1],
            x: 0.0,
            y: 0.0,
            x_sqr: 0.0,
            y_sqr: 0.0,
            iter_count: 0,
        }
    }

    pub fn radius_squared(&self) -> f64 {
        self.x_sqr + self.y_sqr
    }

    // Z = Z*Z + C
    pub fn step(&mut self) {
        self.y = (self.x + self.x) * self.y + self.y0;
        self.x = self.x_sqr - self.y_sqr + self.x0;
        self.x_sqr = self.x * self.x;
        self.y_sqr = self.y * self.y;
        self.iter_count += 1;
    }

    /// Step until either the bailout radius is reached or `max_iter_count` steps
    /// have been taken. The bailout test happens before each step, so a point
    /// that only reaches the bailout radius on the final step counts as in-set.
    /// @return: magnitude of Z at escape, or None if the point did not escape.
    pub fn step_until_escape(&mut self, max_iter_count: u32) -> Option<f64> {
        while self.iter_count < max_iter_count {
            if self.radius_squared() >= BAILOUT_RADIUS_SQUARED {
                return Some(self.radius_squared().sqrt());
            }
            self.step();
        }
        None
    }
}

/**
 * Renormalized escape time: the fractional position between the previous and
 * the current iteration count, derived from how far past the bailout radius
 * the sequence landed. Only defined for escaped points, whose magnitude is at
 * least `BAILOUT_RADIUS` and so comfortably above `e`, which keeps the double
 * logarithm real valued.
 */
pub fn smoothed_fraction(final_magnitude: f64) -> f64 {
    debug_assert!(
        final_magnitude > std::f64::consts::E,
        "escape magnitude {} is too small for the double logarithm",
        final_magnitude
    );
    let log_log_bailout = BAILOUT_RADIUS.ln().ln();
    let delta = (final_magnitude.ln().ln() - log_log_bailout) / std::f64::consts::LN_2;
    if delta.is_nan() {
        return 0.0;
    }
    (1.0 - delta.min(1.0)).clamp(0.0, 1.0)
}

/// Per-pixel escape data for a full image, plus the histogram of escape counts.
#[derive(Debug, Clone)]
pub struct EscapeData {
    pub max_iter_count: u32,
    pub resolution: [u32; 2],
    pub histogram: IterationHistogram,
    /// Row-major; `max_iter_count` marks pixels that never escaped.
    pub iterations: Vec<u32>,
    /// Row-major; zero for pixels that never escaped.
    pub smoothed_fractions: Vec<f64>,
}

impl EscapeData {
    pub fn pixel_count(&self) -> usize {
        self.iterations.len()
    }

    pub fn in_set_count(&self) -> usize {
        self.iterations
            .iter()
            .filter(|&&iter| iter == self.max_iter_count)
            .count()
    }
}

fn evaluate_row(
    pixel_mapper: &PixelMapper,
    pixel_y: u32,
    max_iter_count: u32,
    iterations: &mut [u32],
    smoothed_fractions: &mut [f64],
) {
    let y0 = pixel_mapper.height.map(pixel_y);
    for (pixel_x, (iter_out, fraction_out)) in iterations
        .iter_mut()
        .zip(smoothed_fractions.iter_mut())
        .enumerate()
    {
        let x0 = pixel_mapper.width.map(pixel_x as u32);
        let mut sequence = EscapeSequence::new(&[x0, y0]);
        *fraction_out = match sequence.step_until_escape(max_iter_count) {
            Some(final_magnitude) => smoothed_fraction(final_magnitude),
            None => 0.0,
        };
        *iter_out = sequence.iter_count;
    }
}

/**
 * Computes the escape iteration count and smoothed fraction for every pixel in
 * the viewport, then accumulates the histogram of escape counts. The histogram
 * is always built in a single serial pass, so parallel and serial evaluation
 * produce identical results.
 */
pub fn compute_escape_data(
    viewport: &ViewportSpecification,
    max_iter_count: u32,
    options: &RenderOptions,
) -> KernelResult<EscapeData> {
    viewport.validate()?;
    if max_iter_count < 1 {
        return Err(KernelError::invalid_dimension(
            "max_iter_count",
            max_iter_count,
        ));
    }

    let row_length = viewport.resolution[0] as usize;
    let pixel_count = viewport.pixel_count();
    let pixel_mapper = PixelMapper::new(viewport);

    let mut iterations = vec![0u32; pixel_count];
    let mut smoothed_fractions = vec![0.0f64; pixel_count];

    if options.parallel {
        iterations
            .par_chunks_mut(row_length)
            .zip(smoothed_fractions.par_chunks_mut(row_length))
            .enumerate()
            .for_each(|(pixel_y, (iter_row, fraction_row))| {
                evaluate_row(
                    &pixel_mapper,
                    pixel_y as u32,
                    max_iter_count,
                    iter_row,
                    fraction_row,
                );
            });
    } else {
        for (pixel_y, (iter_row, fraction_row)) in iterations
            .chunks_mut(row_length)
            .zip(smoothed_fractions.chunks_mut(row_length))
            .enumerate()
        {
            evaluate_row(
                &pixel_mapper,
                pixel_y as u32,
                max_iter_count,
                iter_row,
                fraction_row,
            );
        }
    }

    let mut histogram = IterationHistogram::new(max_iter_count);
    for &iter in iterations.iter().filter(|&&iter| iter < max_iter_count) {
        histogram.insert(iter);
    }

    log::debug!(
        "escape data: {} pixels, {} escaped, max_iter_count = {}",
        pixel_count,
        histogram.escaped_count(),
        max_iter_count
    );

    Ok(EscapeData {
        max_iter_count,
        resolution: [viewport.resolution[0], viewport.resolution[1]],
        histogram,
        iterations,
        smoothed_fractions,
    })
}
