use image::Rgb;
use iter_num_tools::lin_space;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::core::error::{KernelError, KernelResult};
use crate::core::interpolation::{InterpolationKeyframe, KeyframeInterpolator, LinearInterpolator};

/**
 * Represents a single "color stop" of a gradient, pairing a position on [0,1]
 * with the color that should be produced there. Channels are on [0,1].
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub position: f64, // specify location of this color within the gradient; on [0,1]
    pub rgb: [f64; 3], // [R, G, B]
}

impl GradientStop {
    pub const fn new(position: f64, r: f64, g: f64, b: f64) -> GradientStop {
        GradientStop {
            position,
            rgb: [r, g, b],
        }
    }
}

pub trait ColorMapper {
    fn compute_pixel(&self, query: f64) -> Rgb<u8>;
}

/// The five stop gradient used by the default Mandelbrot render:
/// black, blue, green, red, then yellow at the outer edge.
pub const DEFAULT_GRADIENT_STOPS: [GradientStop; 5] = [
    GradientStop::new(0.00, 0.0, 0.0, 0.0),
    GradientStop::new(0.50, 0.0, 0.0, 1.0),
    GradientStop::new(0.75, 0.0, 1.0, 0.0),
    GradientStop::new(0.90, 1.0, 0.0, 0.0),
    GradientStop::new(1.00, 1.0, 1.0, 0.0),
];

/**
 * Piecewise linear gradient in RGB space. Immutable once constructed; the
 * constructor guarantees that the stops cover all of [0,1], so every lookup
 * lands in some interval.
 */
#[derive(Clone, Debug)]
pub struct Gradient {
    stops: Vec<GradientStop>,
    interpolator: KeyframeInterpolator<f64, Vector3<f64>, LinearInterpolator>,
}

impl Gradient {
    pub fn new(stops: &[GradientStop]) -> KernelResult<Gradient> {
        for stop in stops {
            if stop
                .rgb
                .iter()
                .any(|channel| !channel.is_finite() || *channel < 0.0 || *channel > 1.0)
            {
                return Err(KernelError::InvalidGradient(format!(
                    "color channels must be on [0,1], got {:?} at position {}",
                    stop.rgb, stop.position
                )));
            }
        }

        let keyframes = stops
            .iter()
            .map(|stop| InterpolationKeyframe {
                input: stop.position,
                output: Vector3::from(stop.rgb),
            })
            .collect();

        Ok(Gradient {
            stops: stops.to_vec(),
            interpolator: KeyframeInterpolator::new(keyframes, LinearInterpolator)?,
        })
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Color on [0,1] per channel at `position`, which is clamped onto [0,1].
    pub fn color_at(&self, position: f64) -> Vector3<f64> {
        self.interpolator.evaluate(position)
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Gradient::new(&DEFAULT_GRADIENT_STOPS).expect("default gradient stops are valid")
    }
}

impl ColorMapper for Gradient {
    fn compute_pixel(&self, query: f64) -> Rgb<u8> {
        let color = self.color_at(query);
        // Truncation, not rounding: 255 * 0.999 maps to 254.
        Rgb([
            (255.0 * color[0]) as u8,
            (255.0 * color[1]) as u8,
            (255.0 * color[2]) as u8,
        ])
    }
}

/**
 * Create a new stop vector, using the same colors, but uniformly spaced positions.
 */
pub fn with_uniform_spacing(old_stops: &[GradientStop]) -> Vec<GradientStop> {
    let positions = lin_space(0.0..=1.0, old_stops.len());
    let mut new_stops = old_stops.to_vec();
    for (position, stop) in positions.zip(&mut new_stops) {
        stop.position = position;
    }
    new_stops
}
