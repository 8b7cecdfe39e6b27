use std::fmt::Display;

use crate::measurements::Measurements;
use crate::model::curvefit::polyfit_measurements;
use crate::model::curvefit::FitError;
use crate::model::IVModel;
use crate::util::Engineering;

/// Straight line `I = slope·V + intercept` through the readings of an ohmic load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OhmicModel {
    pub slope: f64,
    pub intercept: f64,
    min_v: f64,
    max_v: f64,
}

impl OhmicModel {
    /// Inverse of the fitted slope, in ohms.
    pub fn resistance(&self) -> f64 {
        1.0 / self.slope
    }

    /// Trend line equation and resistance, one line each.
    pub fn summary(&self) -> String {
        format!(
            "A equação da reta de tendência é: I = {:.4} * V + {:.4}\n\
             O valor da resistência calculado pela regressão é: {:.2} Ohms\n",
            self.slope,
            self.intercept,
            self.resistance()
        )
    }
}

impl IVModel for OhmicModel {
    fn min_v(&self) -> f64 {
        self.min_v
    }

    fn max_v(&self) -> f64 {
        self.max_v
    }

    fn evaluate(&self, v: f64) -> f64 {
        self.slope * v + self.intercept
    }
}

impl Display for OhmicModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "slope\t{}S", Engineering(self.slope))?;
        writeln!(f, "I₀\t{}A", Engineering(self.intercept))?;
        writeln!(f, "R\t{}Ω", Engineering(self.resistance()))?;
        Ok(())
    }
}

pub fn ohmic_model(measurements: &Measurements) -> Result<OhmicModel, FitError> {
    let line = polyfit_measurements(measurements, 1)?;
    let (min_v, max_v) = measurements.voltage_range().ok_or(FitError::NotEnoughPoints {
        degree: 1,
        needed: 2,
        got: 0,
    })?;
    Ok(OhmicModel {
        slope: line.coefficients()[0],
        intercept: line.coefficients()[1],
        min_v,
        max_v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurements::bench_load;
    use approx::assert_abs_diff_eq;

    fn normal_equations(m: &Measurements) -> (f64, f64) {
        let n = m.len() as f64;
        let mean_v = m.voltage.iter().sum::<f64>() / n;
        let mean_i = m.current.iter().sum::<f64>() / n;
        let s_vi: f64 = m.iter().map(|(v, i)| (v - mean_v) * (i - mean_i)).sum();
        let s_vv: f64 = m.voltage.iter().map(|v| (v - mean_v) * (v - mean_v)).sum();
        let slope = s_vi / s_vv;
        (slope, mean_i - slope * mean_v)
    }

    #[test]
    fn bench_load_matches_closed_form() {
        let m = bench_load();
        let model = ohmic_model(&m).unwrap();
        let (slope, intercept) = normal_equations(&m);
        assert_abs_diff_eq!(model.slope, slope, epsilon = 1e-9);
        assert_abs_diff_eq!(model.intercept, intercept, epsilon = 1e-6);
        assert_abs_diff_eq!(model.resistance(), 1.0 / slope, epsilon = 1e-6);
    }

    #[test]
    fn bench_load_resistance_is_about_137_ohms() {
        let model = ohmic_model(&bench_load()).unwrap();
        let r = model.resistance();
        assert!(r.is_finite() && r > 0.0);
        assert!(r > 136.0 && r < 138.0, "R = {}", r);
        assert_abs_diff_eq!(model.slope, 0.0074, epsilon = 2e-4);
    }

    #[test]
    fn summary_has_equation_and_resistance() {
        let model = ohmic_model(&bench_load()).unwrap();
        let summary = model.summary();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "A equação da reta de tendência é: I = 0.0073 * V + -0.0073"
        );
        assert_eq!(
            lines[1],
            "O valor da resistência calculado pela regressão é: 137.10 Ohms"
        );
    }

    #[test]
    fn refit_is_bit_identical() {
        let a = ohmic_model(&bench_load()).unwrap();
        let b = ohmic_model(&bench_load()).unwrap();
        assert_eq!(a.slope.to_bits(), b.slope.to_bits());
        assert_eq!(a.intercept.to_bits(), b.intercept.to_bits());
    }

    #[test]
    fn fitted_domain_is_the_voltage_range() {
        let model = ohmic_model(&bench_load()).unwrap();
        assert_eq!(model.min_v(), 0.0);
        assert_eq!(model.max_v(), 220.0);
    }
}
