use serde::{Deserialize, Serialize};

use crate::core::error::{KernelError, KernelResult};

/**
 * Used to fully-specify both an image resolution and how it is anchored into the "real"
 * space in which the fractal lives. The width in "real" space is derived from the aspect
 * ratio of the image and the specified height.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ViewportSpecification {
    pub resolution: nalgebra::Vector2<u32>,
    pub center: nalgebra::Vector2<f64>,
    pub height: f64,
}

impl ViewportSpecification {
    pub fn new(resolution: [u32; 2], center: [f64; 2], height: f64) -> ViewportSpecification {
        ViewportSpecification {
            resolution: nalgebra::Vector2::from(resolution),
            center: nalgebra::Vector2::from(center),
            height,
        }
    }

    pub fn width(&self) -> f64 {
        self.height * ((self.resolution[0] as f64) / (self.resolution[1] as f64))
    }

    pub fn pixel_count(&self) -> usize {
        (self.resolution[0] as usize) * (self.resolution[1] as usize)
    }

    /// Row-major index of the pixel at column `x`, row `y`.
    pub fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.resolution[0] as usize) + (x as usize)
    }

    pub fn validate(&self) -> KernelResult<()> {
        if self.resolution[0] == 0 {
            return Err(KernelError::invalid_dimension("image_width", self.resolution[0]));
        }
        if self.resolution[1] == 0 {
            return Err(KernelError::invalid_dimension("image_height", self.resolution[1]));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(KernelError::invalid_dimension("view_height", self.height));
        }
        if !(self.center[0].is_finite() && self.center[1].is_finite()) {
            return Err(KernelError::invalid_dimension(
                "center",
                format!("({}, {})", self.center[0], self.center[1]),
            ));
        }
        Ok(())
    }
}

/// Knobs that change how a render is computed, but never what it produces.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Evaluate image rows on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

#[derive(Clone, Debug)]
/**
 * Used to map from image space into the "regular" domain used to generate the fractals.
 * Pixel `i` of `n` maps to `low + span * (i / n)`, so pixel zero sits on the
 * edge of the view rather than at the center of a pixel.
 */
pub struct LinearPixelMap {
    low: f64,
    span: f64,
    count: f64,
}

impl LinearPixelMap {
    /**
     * @param n: number of pixels spanned by [low, low + span)
     * @param low: output of the map at 0
     * @param span: signed extent covered by the `n` pixels
     */
    pub fn new(n: u32, low: f64, span: f64) -> LinearPixelMap {
        more_asserts::assert_gt!(n, 0);
        LinearPixelMap {
            low,
            span,
            count: n as f64,
        }
    }

    // Map from pixel (integer) to point (float)
    pub fn map(&self, index: u32) -> f64 {
        self.low + self.span * ((index as f64) / self.count)
    }
}

#[derive(Clone, Debug)]
pub struct PixelMapper {
    pub width: LinearPixelMap,
    pub height: LinearPixelMap,
}

impl PixelMapper {
    pub fn new(viewport: &ViewportSpecification) -> PixelMapper {
        let width = viewport.width();
        let height = viewport.height;
        PixelMapper {
            width: LinearPixelMap::new(
                viewport.resolution[0],
                viewport.center[0] - 0.5 * width,
                width,
            ),
            // Image coordinates are upside down.
            height: LinearPixelMap::new(
                viewport.resolution[1],
                viewport.center[1] + 0.5 * height,
                -height,
            ),
        }
    }

    pub fn map(&self, point: &(u32, u32)) -> (f64, f64) {
        let (x, y) = point;
        (self.width.map(*x), self.height.map(*y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_viewport_width() {
        let viewport = ViewportSpecification::new([640, 480], [-0.8, 0.0], 2.2);

        // The `width` is defined S.T. that aspect ratio is identical in both the image and the regular space.
        let aspect_ratio = viewport.width() / viewport.height;
        let pixel_aspect_ratio = (viewport.resolution[0] as f64) / (viewport.resolution[1] as f64);
        assert_relative_eq!(aspect_ratio, pixel_aspect_ratio, epsilon = 1e-12);
        assert_eq!(viewport.pixel_count(), 640 * 480);
        assert_eq!(viewport.pixel_index(3, 2), 2 * 640 + 3);
    }

    #[test]
    fn test_viewport_validation() {
        assert!(ViewportSpecification::new([4, 3], [0.0, 0.0], 1.0)
            .validate()
            .is_ok());
        for viewport in [
            ViewportSpecification::new([0, 3], [0.0, 0.0], 1.0),
            ViewportSpecification::new([4, 0], [0.0, 0.0], 1.0),
            ViewportSpecification::new([4, 3], [0.0, 0.0], 0.0),
            ViewportSpecification::new([4, 3], [0.0, 0.0], -2.0),
            ViewportSpecification::new([4, 3], [f64::NAN, 0.0], 1.0),
        ] {
            assert!(matches!(
                viewport.validate(),
                Err(KernelError::InvalidDimension { .. })
            ));
        }
    }

    #[test]
    fn test_linear_pixel_map_domain_bounds() {
        let n = 8;
        let pixel_map = LinearPixelMap::new(n, 1.25, 4.0);

        let tol = 1e-12;
        assert_relative_eq!(pixel_map.map(0), 1.25, epsilon = tol);
        assert_relative_eq!(pixel_map.map(4), 3.25, epsilon = tol);
        // one past the last pixel lands on the far edge
        assert_relative_eq!(pixel_map.map(n), 5.25, epsilon = tol);
    }

    #[test]
    fn test_pixel_mapper_corners() {
        let viewport = ViewportSpecification::new([4, 2], [1.0, -1.0], 2.0);
        let mapper = PixelMapper::new(&viewport);

        let tol = 1e-12;
        let (x, y) = mapper.map(&(0, 0));
        assert_relative_eq!(x, -1.0, epsilon = tol); // x_left
        assert_relative_eq!(y, 0.0, epsilon = tol); // y_top

        let (x, y) = mapper.map(&(2, 1));
        assert_relative_eq!(x, 1.0, epsilon = tol);
        assert_relative_eq!(y, -1.0, epsilon = tol);
    }
}
