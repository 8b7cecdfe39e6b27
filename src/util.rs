use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;
use std::fmt::Write;

/// Formats a value with an SI prefix, e.g. `0.0073` as `7.300m`.
pub struct Engineering(pub f64);

impl Display for Engineering {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        if self.0 == 0.0 || !self.0.is_finite() {
            write!(f, "{}", self.0)
        } else {
            let exp = (self.0.abs().log10() / 3.0).floor() as i32 * 3;
            let mantissa = self.0 / 10f64.powi(exp);
            write!(f, "{:.3}", mantissa)?;
            match exp {
                0 => {}
                -3 => f.write_char('m')?,
                -6 => f.write_char('µ')?,
                -9 => f.write_char('n')?,
                -12 => f.write_char('p')?,
                -15 => f.write_char('f')?,
                3 => f.write_char('k')?,
                6 => f.write_char('M')?,
                9 => f.write_char('G')?,
                12 => f.write_char('T')?,
                exp => write!(f, "e{}", exp)?,
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Engineering;

    #[test]
    fn prefixes() {
        assert_eq!(Engineering(0.0073).to_string(), "7.300m");
        assert_eq!(Engineering(137.1).to_string(), "137.100");
        assert_eq!(Engineering(-2200.0).to_string(), "-2.200k");
        assert_eq!(Engineering(0.0).to_string(), "0");
    }

    #[test]
    fn out_of_table_exponents() {
        assert_eq!(Engineering(4.7e-20).to_string(), "47.000e-21");
    }
}
