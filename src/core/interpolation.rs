use num_traits::Float;
use std::ops::{Add, Mul, Sub};

use crate::core::error::{KernelError, KernelResult};

/// Trait for interpolation between two values
pub trait Interpolator<T, V>
where
    T: Float + Copy,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
{
    fn interpolate(&self, alpha: T, a: &V, b: &V) -> V;
}

/// Keyframes, used to construct (and define) a piecewise interpolator
/// Generic keyframe: maps an input (query) to an output value.
#[derive(Clone, Copy, Debug)]
pub struct InterpolationKeyframe<T, V> {
    pub input: T,
    pub output: V,
}

/// Generic container for performing interpolation between keyframes
/// that span the unit interval.
#[derive(Clone, Debug)]
pub struct KeyframeInterpolator<T, V, F>
where
    T: Float + Copy,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
    F: Interpolator<T, V>,
{
    queries: Vec<T>,
    values: Vec<V>,
    interpolator: F,
}

impl<T, V, F> KeyframeInterpolator<T, V, F>
where
    T: Float + Copy + std::fmt::Debug,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
    F: Interpolator<T, V>,
{
    pub fn new(keyframes: Vec<InterpolationKeyframe<T, V>>, interpolator: F) -> KernelResult<Self> {
        let (first, last) = match (keyframes.first(), keyframes.last()) {
            (Some(first), Some(last)) if keyframes.len() >= 2 => (first, last),
            _ => {
                return Err(KernelError::InvalidGradient(format!(
                    "need at least two keyframes, got {}",
                    keyframes.len()
                )))
            }
        };
        if first.input != T::zero() {
            return Err(KernelError::InvalidGradient(format!(
                "first keyframe input must be 0.0, got {:?}",
                first.input
            )));
        }
        if last.input != T::one() {
            return Err(KernelError::InvalidGradient(format!(
                "last keyframe input must be 1.0, got {:?}",
                last.input
            )));
        }
        for pair in keyframes.windows(2) {
            // Also rejects NaN inputs.
            if !(pair[0].input < pair[1].input) {
                return Err(KernelError::InvalidGradient(format!(
                    "keyframes must be strictly increasing: {:?} then {:?}",
                    pair[0].input, pair[1].input
                )));
            }
        }

        let queries = keyframes.iter().map(|k| k.input).collect();
        let values = keyframes.iter().map(|k| k.output).collect();

        Ok(Self {
            queries,
            values,
            interpolator,
        })
    }

    /// Evaluate the interpolant. The query is clamped onto [0,1] and then
    /// matched against the keyframe intervals from left to right; a query
    /// that sits exactly on an interior keyframe uses the lower interval.
    pub fn evaluate(&self, query: T) -> V {
        let query = query.max(T::zero()).min(T::one());
        match self.interval_index(query) {
            Some(idx_low) => {
                let idx_upp = idx_low + 1;
                let val_low = self.queries[idx_low];
                let alpha = (query - val_low) / (self.queries[idx_upp] - val_low);
                self.interpolator
                    .interpolate(alpha, &self.values[idx_low], &self.values[idx_upp])
            }
            None => panic!("no keyframe interval contains query {:?}", query),
        }
    }

    /// Index of the lower keyframe of the first interval containing `query`.
    pub fn interval_index(&self, query: T) -> Option<usize> {
        self.queries
            .windows(2)
            .position(|pair| pair[0] <= query && query <= pair[1])
    }

    pub fn keyframe_count(&self) -> usize {
        self.queries.len()
    }
}

/// Linear interpolation: a + (b - a) * alpha
#[derive(Default, Clone, Copy, Debug)]
pub struct LinearInterpolator;

impl<T, V> Interpolator<T, V> for LinearInterpolator
where
    T: Float + Copy,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
{
    fn interpolate(&self, alpha: T, a: &V, b: &V) -> V {
        *a + (*b - *a) * alpha
    }
}

/// Holds the lower keyframe's value until `alpha` passes `threshold`, then
/// jumps to the upper one. Gives hard color bands instead of blends.
#[derive(Default, Clone, Copy, Debug)]
pub struct StepInterpolator<T: Float + Copy> {
    pub threshold: T,
}

impl<T, V> Interpolator<T, V> for StepInterpolator<T>
where
    T: Float + Copy,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
{
    fn interpolate(&self, alpha: T, a: &V, b: &V) -> V {
        if alpha > self.threshold {
            *b
        } else {
            *a
        }
    }
}
