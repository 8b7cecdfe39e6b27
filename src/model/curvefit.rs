use failure::Fail;
use itertools::Itertools;
use nalgebra::DMatrix;
use nalgebra::DVector;
use nalgebra::SVD;

use crate::measurements::Measurements;
use crate::model::polynomial::Polynomial;
use crate::model::IVModel;

#[derive(Clone, Debug, Fail, PartialEq)]
pub enum FitError {
    #[fail(display = "{} voltages but {} currents", voltages, currents)]
    LengthMismatch { voltages: usize, currents: usize },
    #[fail(
        display = "a degree {} fit needs at least {} points, got {}",
        degree, needed, got
    )]
    NotEnoughPoints {
        degree: usize,
        needed: usize,
        got: usize,
    },
    #[fail(display = "least-squares system is singular")]
    Singular,
}

/// Least-squares solution `β` of `x · β ≈ y` for an `n × k` design matrix.
///
/// Returns `None` for an empty or rank-deficient system.
pub fn linear_regression(x: DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    debug_time!("linear_regression");
    if x.is_empty() || x.nrows() != y.len() {
        return None;
    }
    let (rows, cols) = x.shape();

    let x_svd = {
        trace_time!("SVD");
        SVD::try_new(x, true, true, f64::EPSILON, 1000)?
    };
    let u = x_svd.u?;
    let s = x_svd.singular_values;
    let v_t = x_svd.v_t?;

    let tolerance = s.max() * rows.max(cols) as f64 * f64::EPSILON;
    if s.len() < cols || s.iter().any(|&s| s <= tolerance) {
        return None;
    }

    let alpha = {
        trace_time!("alpha");
        u.transpose() * y
    };
    let sinv = alpha.zip_map(&s, |a, s| a / s);

    trace_time!("linear_regression V * S^-1");
    Some(v_t.transpose() * sinv)
}

/// Fits a polynomial of the given degree, coefficients highest power first.
pub fn polyfit(xs: &[f64], ys: &[f64], degree: usize) -> Result<Polynomial, FitError> {
    if xs.len() != ys.len() {
        return Err(FitError::LengthMismatch {
            voltages: xs.len(),
            currents: ys.len(),
        });
    }
    let needed = degree + 1;
    if xs.len() < needed {
        return Err(FitError::NotEnoughPoints {
            degree,
            needed,
            got: xs.len(),
        });
    }
    // a Vandermonde matrix has full column rank iff it has that many distinct nodes
    let distinct = xs
        .iter()
        .cloned()
        .sorted_by(|a, b| a.total_cmp(b))
        .dedup()
        .count();
    if distinct < needed {
        return Err(FitError::Singular);
    }

    let design = DMatrix::from_fn(xs.len(), needed, |r, c| xs[r].powi((degree - c) as i32));
    let ys = DVector::from_column_slice(ys);
    let betas = linear_regression(design, &ys).ok_or(FitError::Singular)?;

    Ok(Polynomial::new(betas.iter().cloned().collect()))
}

pub fn polyfit_measurements(
    measurements: &Measurements,
    degree: usize,
) -> Result<Polynomial, FitError> {
    polyfit(&measurements.voltage, &measurements.current, degree)
}

pub fn sum_of_squared_residuals(model: &dyn IVModel, measurements: &Measurements) -> f64 {
    measurements
        .iter()
        .map(|(v, i)| {
            let r = i - model.evaluate(v);
            r * r
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn exact_line_is_recovered() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x - 1.0).collect();
        let p = polyfit(&xs, &ys, 1).unwrap();
        assert_abs_diff_eq!(p.coefficients()[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.coefficients()[1], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn exact_parabola_is_recovered() {
        let xs = [-2.0, -1.0, 0.0, 1.0, 2.0, 3.0];
        let ys: Vec<f64> = xs.iter().map(|x| 0.5 * x * x - 3.0 * x + 4.0).collect();
        let p = polyfit(&xs, &ys, 2).unwrap();
        assert_abs_diff_eq!(p.coefficients()[0], 0.5, epsilon = 1e-10);
        assert_abs_diff_eq!(p.coefficients()[1], -3.0, epsilon = 1e-10);
        assert_abs_diff_eq!(p.coefficients()[2], 4.0, epsilon = 1e-10);
    }

    #[test]
    fn noisy_line_matches_normal_equations() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.1, 0.9, 2.2, 2.8, 4.1];
        let p = polyfit(&xs, &ys, 1).unwrap();

        let n = xs.len() as f64;
        let sx: f64 = xs.iter().sum();
        let sy: f64 = ys.iter().sum();
        let sxx: f64 = xs.iter().map(|x| x * x).sum();
        let sxy: f64 = xs.iter().zip(ys.iter()).map(|(x, y)| x * y).sum();
        let slope = (n * sxy - sx * sy) / (n * sxx - sx * sx);
        let intercept = (sy - slope * sx) / n;

        assert_abs_diff_eq!(p.coefficients()[0], slope, epsilon = 1e-12);
        assert_abs_diff_eq!(p.coefficients()[1], intercept, epsilon = 1e-12);
    }

    #[test]
    fn identical_voltages_are_singular() {
        assert_eq!(
            polyfit(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0], 1),
            Err(FitError::Singular)
        );
    }

    #[test]
    fn too_few_points() {
        assert_eq!(
            polyfit(&[1.0, 2.0], &[1.0, 2.0], 2),
            Err(FitError::NotEnoughPoints {
                degree: 2,
                needed: 3,
                got: 2
            })
        );
    }

    #[test]
    fn length_mismatch() {
        assert_eq!(
            polyfit(&[1.0, 2.0, 3.0], &[1.0, 2.0], 1),
            Err(FitError::LengthMismatch {
                voltages: 3,
                currents: 2
            })
        );
    }

    #[test]
    fn empty_regression_is_none() {
        let x = DMatrix::<f64>::zeros(0, 2);
        let y = DVector::<f64>::zeros(0);
        assert!(linear_regression(x, &y).is_none());
    }
}
