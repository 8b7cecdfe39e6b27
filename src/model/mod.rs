use std::fmt::Display;

use itertools_num::linspace;

pub mod curvefit;
pub mod lamp;
pub mod ohmic;
pub mod polynomial;

pub use self::curvefit::FitError;
pub use self::lamp::LampModel;
pub use self::ohmic::OhmicModel;
pub use self::polynomial::Polynomial;

pub trait IVModel: Display {
    /// Lowest voltage the model was fitted on.
    fn min_v(&self) -> f64;
    /// Highest voltage the model was fitted on.
    fn max_v(&self) -> f64;
    fn evaluate(&self, v: f64) -> f64;

    fn trend(&self, grid: &[f64]) -> Vec<(f64, f64)> {
        grid.iter().map(|&v| (v, self.evaluate(v))).collect()
    }
}

/// `n` evenly spaced samples over `[min, max]`, both ends included.
pub fn linspace_closed(min: f64, max: f64, n: usize) -> Vec<f64> {
    let mut grid: Vec<f64> = linspace(min, max, n).collect();
    // pin the last sample to the closed end of the range
    if let Some(last) = grid.last_mut() {
        if n > 1 {
            *last = max;
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_closed_includes_both_ends() {
        let grid = linspace_closed(0.0, 220.0, 300);
        assert_eq!(grid.len(), 300);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[299], 220.0);
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn linspace_closed_single_sample_is_the_start() {
        assert_eq!(linspace_closed(3.0, 7.0, 1), vec![3.0]);
        assert!(linspace_closed(3.0, 7.0, 0).is_empty());
    }
}
