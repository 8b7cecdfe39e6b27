use std::fmt::Display;

use crate::measurements::Measurements;
use crate::model::curvefit::polyfit_measurements;
use crate::model::curvefit::FitError;
use crate::model::polynomial::Polynomial;
use crate::model::IVModel;
use crate::util::Engineering;

/// `I = a·V² + b·V + c`. A filament is not ohmic, so there is no single resistance.
#[derive(Clone, Debug, PartialEq)]
pub struct LampModel {
    p: Polynomial,
    min_v: f64,
    max_v: f64,
}

impl LampModel {
    pub fn a(&self) -> f64 {
        self.p.coefficients()[0]
    }

    pub fn b(&self) -> f64 {
        self.p.coefficients()[1]
    }

    pub fn c(&self) -> f64 {
        self.p.coefficients()[2]
    }

    pub fn polynomial(&self) -> &Polynomial {
        &self.p
    }
}

impl IVModel for LampModel {
    fn min_v(&self) -> f64 {
        self.min_v
    }

    fn max_v(&self) -> f64 {
        self.max_v
    }

    fn evaluate(&self, v: f64) -> f64 {
        self.p.evaluate(v)
    }
}

impl Display for LampModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "I\t{}", self.p)?;
        writeln!(f, "a\t{}A/V²", Engineering(self.a()))?;
        writeln!(f, "b\t{}A/V", Engineering(self.b()))?;
        writeln!(f, "c\t{}A", Engineering(self.c()))?;
        Ok(())
    }
}

pub fn lamp_model(measurements: &Measurements) -> Result<LampModel, FitError> {
    let p = polyfit_measurements(measurements, 2)?;
    let (min_v, max_v) = measurements.voltage_range().ok_or(FitError::NotEnoughPoints {
        degree: 2,
        needed: 3,
        got: 0,
    })?;
    Ok(LampModel { p, min_v, max_v })
}
