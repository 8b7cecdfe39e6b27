use std::fmt::Display;
use std::fmt::Formatter;

/// Polynomial in `V`, coefficients stored highest power first.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<f64>) -> Self {
        Polynomial { coefficients }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, c| acc * x + c)
    }
}

impl Display for Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let degree = self.degree();
        for (ix, c) in self.coefficients.iter().enumerate() {
            let power = degree - ix;
            if ix == 0 {
                write!(f, "{:.4e}", c)?;
            } else if *c < 0.0 {
                write!(f, " - {:.4e}", -c)?;
            } else {
                write!(f, " + {:.4e}", c)?;
            }
            match power {
                0 => {}
                1 => f.write_str("·V")?,
                p => write!(f, "·V^{}", p)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horner_evaluation() {
        let p = Polynomial::new(vec![2.0, -3.0, 1.0]);
        assert_eq!(p.evaluate(0.0), 1.0);
        assert_eq!(p.evaluate(1.0), 0.0);
        assert_eq!(p.evaluate(3.0), 10.0);
        assert_eq!(p.degree(), 2);
    }

    #[test]
    fn empty_polynomial_is_zero() {
        let p = Polynomial::new(vec![]);
        assert_eq!(p.evaluate(12.0), 0.0);
        assert_eq!(p.degree(), 0);
    }

    #[test]
    fn display_shows_powers_and_signs() {
        let p = Polynomial::new(vec![1.0, -2.0, 0.5]);
        assert_eq!(p.to_string(), "1.0000e0·V^2 - 2.0000e0·V + 5.0000e-1");
    }
}
