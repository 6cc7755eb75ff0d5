use std::io::{self, Write};

use crate::core::error::{KernelError, KernelResult};

/**
 * Histogram of escape-iteration counts. There is one bin per possible
 * iteration count on `[0, max_iter_count]`, but only the bins on
 * `[1, max_iter_count - 1]` are ever populated: slot zero cannot be reached by
 * an escaping point, and slot `max_iter_count` is reserved for points that are
 * presumed to be in the set, which are excluded from the color distribution.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationHistogram {
    bin_counts: Vec<u32>,
}

impl IterationHistogram {
    /// Constructor
    pub fn new(max_iter_count: u32) -> Self {
        assert!(max_iter_count > 0, "`max_iter_count` must be positive!");
        IterationHistogram {
            bin_counts: vec![0; (max_iter_count as usize) + 1],
        }
    }

    /// Resets the state of the histogram to be the same as it was
    /// after being initially constructed.
    pub fn reset(&mut self) {
        self.bin_counts.iter_mut().for_each(|count| *count = 0);
    }

    /// Record one escaped sample that left the bailout disk after `iter_count` steps.
    pub fn insert(&mut self, iter_count: u32) {
        let index = iter_count as usize;
        assert!(
            index >= 1 && index < self.max_iter_count() as usize,
            "escape count {} is outside of [1, {})",
            iter_count,
            self.max_iter_count()
        );
        self.bin_counts[index] += 1;
    }

    pub fn max_iter_count(&self) -> u32 {
        (self.bin_counts.len() - 1) as u32
    }

    pub fn bin_count(&self, index: usize) -> u32 {
        self.bin_counts[index]
    }

    pub fn bin_counts(&self) -> &[u32] {
        &self.bin_counts
    }

    pub fn num_bins(&self) -> usize {
        self.bin_counts.len()
    }

    /// @return: the number of samples that escaped, which is the sum over
    /// the bins on `[1, max_iter_count - 1]`.
    pub fn escaped_count(&self) -> u64 {
        self.escape_bins().iter().map(|&count| count as u64).sum()
    }

    fn escape_bins(&self) -> &[u32] {
        let upper = self.bin_counts.len() - 1;
        if upper <= 1 {
            &[]
        } else {
            &self.bin_counts[1..upper]
        }
    }

    /// Print the histogram stats to the writer
    pub fn display<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "Iteration Histogram:")?;
        let total = self.escaped_count();
        let percent_scale = if total == 0 {
            0.0
        } else {
            100.0 / (total as f64)
        };
        writeln!(writer, "  escaped count: {}", total)?;
        for (i, &count) in self.bin_counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let percent = (count as f64) * percent_scale;
            writeln!(writer, "  bins[{}] --> {}  ({:.2}%)", i, count, percent)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

/**
 * Cumulative distribution of the escape counts, used to spread the gradient
 * evenly over however many pixels share each iteration count.
 *
 * `value(i)` is the fraction of escaped samples that escaped within `i`
 * iterations. Entry zero is always `0.0`; it serves as the "previous" value
 * for samples that escape on the first step.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedColors {
    values: Vec<f64>,
    running_total: u64,
}

impl NormalizedColors {
    pub fn new(histogram: &IterationHistogram) -> KernelResult<NormalizedColors> {
        let total = histogram.escaped_count();
        if total == 0 {
            return Err(KernelError::DegenerateHistogram);
        }
        let max_iter_count = histogram.max_iter_count() as usize;
        let mut values = vec![0.0; max_iter_count + 1];

        let mut running_total: u64 = 0;
        for (i, value) in values.iter_mut().enumerate().take(max_iter_count).skip(1) {
            running_total += histogram.bin_count(i) as u64;
            *value = (running_total as f64) / (total as f64);
        }
        log::debug!(
            "normalized {} escaped samples over {} iteration bins",
            running_total,
            max_iter_count
        );

        Ok(NormalizedColors {
            values,
            running_total,
        })
    }

    pub fn value(&self, iter_count: usize) -> f64 {
        self.values[iter_count]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Total number of escaped samples accumulated while normalizing.
    pub fn running_total(&self) -> u64 {
        self.running_total
    }

    /**
     * Print the table to the writer for debug
     */
    pub fn display<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "Normalized Colors:")?;
        writeln!(
            writer,
            "  entries: {}, running total: {}",
            self.values.len(),
            self.running_total
        )?;
        for (i, value) in self.values.iter().enumerate() {
            writeln!(writer, "  {}  -->  {:.4}", i, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use approx::assert_relative_eq;

    use super::{IterationHistogram, NormalizedColors};
    use crate::core::error::KernelError;

    #[test]
    fn test_histogram_insert() {
        let mut hist = IterationHistogram::new(5);

        hist.insert(1);
        hist.insert(3);
        hist.insert(3);

        assert_eq!(hist.bin_counts(), &[0, 1, 0, 2, 0, 0]);
        assert_eq!(hist.escaped_count(), 3);
    }

    #[test]
    #[should_panic(expected = "outside of")]
    fn test_histogram_rejects_in_set_slot() {
        let mut hist = IterationHistogram::new(5);
        hist.insert(5);
    }

    #[test]
    #[should_panic(expected = "outside of")]
    fn test_histogram_rejects_slot_zero() {
        let mut hist = IterationHistogram::new(5);
        hist.insert(0);
    }

    #[test]
    fn test_histogram_with_zero_max_iter() {
        // This should panic due to the assertion in the constructor
        assert!(std::panic::catch_unwind(|| IterationHistogram::new(0)).is_err());
    }

    #[test]
    fn test_histogram_reset() {
        let mut hist = IterationHistogram::new(3);
        hist.insert(1);
        hist.insert(2);
        assert_eq!(hist.escaped_count(), 2);
        hist.reset();
        assert_eq!(hist.bin_counts(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_histogram_text_display() {
        let mut hist = IterationHistogram::new(4);
        hist.insert(1);
        hist.insert(2);
        hist.insert(2);
        hist.display(&mut io::stdout())
            .expect("Failed to display on screen");
        let normalized = NormalizedColors::new(&hist).unwrap();
        normalized
            .display(&mut io::stdout())
            .expect("Failed to display normalized colors on screen");
    }

    #[test]
    fn test_normalized_colors_uniform() {
        let mut hist = IterationHistogram::new(5);
        for i in 1..5 {
            hist.insert(i);
        }
        let normalized = NormalizedColors::new(&hist).unwrap();

        let tol = 1e-12;
        assert_eq!(normalized.value(0), 0.0);
        assert_relative_eq!(normalized.value(1), 0.25, epsilon = tol);
        assert_relative_eq!(normalized.value(2), 0.5, epsilon = tol);
        assert_relative_eq!(normalized.value(3), 0.75, epsilon = tol);
        assert_relative_eq!(normalized.value(4), 1.0, epsilon = tol);
        // in-set slot is never written
        assert_eq!(normalized.value(5), 0.0);
        assert_eq!(normalized.running_total(), 4);
    }

    #[test]
    fn test_normalized_colors_skewed() {
        let mut hist = IterationHistogram::new(6);
        for _ in 0..3 {
            hist.insert(2);
        }
        for _ in 0..9 {
            hist.insert(4);
        }
        let normalized = NormalizedColors::new(&hist).unwrap();

        // constant regions between populated bins
        assert_eq!(normalized.value(1), 0.0);
        assert_eq!(normalized.value(2), 0.25);
        assert_eq!(normalized.value(3), 0.25);
        assert_eq!(normalized.value(4), 1.0);
        assert_eq!(normalized.value(5), 1.0);
    }

    #[test]
    fn test_normalized_colors_last_escape_bin_is_exactly_one() {
        for total in [3, 49, 98, 1000] {
            let mut hist = IterationHistogram::new(2);
            for _ in 0..total {
                hist.insert(1);
            }
            let normalized = NormalizedColors::new(&hist).unwrap();
            assert_eq!(normalized.value(1), 1.0, "total = {}", total);
        }

        let mut hist = IterationHistogram::new(10);
        for i in 1..10u32 {
            for _ in 0..(i * 11 % 7 + 1) {
                hist.insert(i);
            }
        }
        let normalized = NormalizedColors::new(&hist).unwrap();
        assert_eq!(normalized.value(9), 1.0);
    }

    #[test]
    fn test_normalized_colors_monotonic() {
        let mut hist = IterationHistogram::new(50);
        for i in 1..50u32 {
            for _ in 0..((i * 7) % 5) {
                hist.insert(i);
            }
        }
        let normalized = NormalizedColors::new(&hist).unwrap();
        let values = &normalized.as_slice()[1..50];
        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert_relative_eq!(normalized.value(49), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalized_colors_empty() {
        let hist = IterationHistogram::new(10);
        assert!(matches!(
            NormalizedColors::new(&hist),
            Err(KernelError::DegenerateHistogram)
        ));
    }

    #[test]
    fn test_normalized_colors_single_iteration() {
        // With a single iteration there are no escape bins at all.
        let hist = IterationHistogram::new(1);
        assert_eq!(hist.escaped_count(), 0);
        assert!(matches!(
            NormalizedColors::new(&hist),
            Err(KernelError::DegenerateHistogram)
        ));
    }
}
