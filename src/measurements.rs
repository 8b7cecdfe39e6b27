const VOLTAGE: [f64; 12] = [
    0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0, 140.0, 160.0, 180.0, 200.0, 220.0,
];

const BENCH_LOAD_CURRENT: [f64; 12] = [
    0.0, 0.13, 0.27, 0.43, 0.58, 0.73, 0.9, 1.0, 1.15, 1.3, 1.45, 1.6,
];

const INCANDESCENT_LAMP_CURRENT: [f64; 12] = [
    0.0, 0.18, 0.26, 0.33, 0.39, 0.45, 0.51, 0.55, 0.59, 0.63, 0.67, 0.71,
];

/// Voltage/current pairs in the order they were taken.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurements {
    pub current: Vec<f64>,
    pub voltage: Vec<f64>,
}

impl Measurements {
    /// Takes the current readings first, then the voltages they were taken at.
    pub fn new(current: Vec<f64>, voltage: Vec<f64>) -> Self {
        assert_eq!(current.len(), voltage.len());
        Measurements { current, voltage }
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.voltage.iter().cloned().zip(self.current.iter().cloned())
    }

    pub fn len(&self) -> usize {
        self.voltage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }

    /// `(min, max)` of the voltage readings, `None` when empty.
    pub fn voltage_range(&self) -> Option<(f64, f64)> {
        range(&self.voltage)
    }

}

impl Default for Measurements {
    fn default() -> Self {
        Measurements::new(Vec::new(), Vec::new())
    }
}

fn range(xs: &[f64]) -> Option<(f64, f64)> {
    let first = *xs.first()?;
    Some(
        xs.iter()
            .fold((first, first), |(lo, hi), &x| (lo.min(x), hi.max(x))),
    )
}

/// Bench load (resistor) readings.
pub fn bench_load() -> Measurements {
    Measurements::new(BENCH_LOAD_CURRENT.to_vec(), VOLTAGE.to_vec())
}

/// Incandescent lamp readings, same voltage steps as the bench load.
pub fn incandescent_lamp() -> Measurements {
    Measurements::new(INCANDESCENT_LAMP_CURRENT.to_vec(), VOLTAGE.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datasets_have_twelve_ascending_points() {
        for m in &[bench_load(), incandescent_lamp()] {
            assert_eq!(m.len(), 12);
            assert!(m.voltage.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn iter_pairs_voltage_with_current() {
        let m = bench_load();
        let pairs: Vec<_> = m.iter().collect();
        assert_eq!(pairs[0], (0.0, 0.0));
        assert_eq!(pairs[11], (220.0, 1.6));
    }

    #[test]
    fn voltage_range_spans_the_readings() {
        assert_eq!(incandescent_lamp().voltage_range(), Some((0.0, 220.0)));
        assert_eq!(Measurements::default().voltage_range(), None);
    }

    #[test]
    fn new_takes_current_then_voltage() {
        let m = Measurements::new(vec![0.5, 1.0], vec![10.0, 20.0]);
        assert_eq!(m.voltage, vec![10.0, 20.0]);
        assert_eq!(m.current, vec![0.5, 1.0]);
        assert_eq!(m.iter().last(), Some((20.0, 1.0)));
        assert_eq!(bench_load().voltage.last(), Some(&220.0));
        assert_eq!(bench_load().current.last(), Some(&1.6));
    }

    #[test]
    #[should_panic]
    fn mismatched_lengths_are_rejected() {
        Measurements::new(vec![0.0, 1.0], vec![0.0]);
    }
}
