use super::PricePath;

/// A dense path with one price per simulation step, `prices[0]` being `S0`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPath {
    prices: Vec<f64>,
    /// step size in years
    dt: f64,
}

impl StepPath {
    pub fn new(prices: Vec<f64>, dt: f64) -> Self {
        Self { prices, dt }
    }

    /// Steps after the start, i.e. the index of the last price.
    pub fn nr_steps(&self) -> usize {
        self.prices.len().saturating_sub(1)
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }
}

impl PricePath for StepPath {
    type Offset = usize;

    fn start_price(&self) -> f64 {
        self.prices.first().copied().unwrap_or(f64::NAN)
    }

    fn price_at_or_before(&self, step: usize) -> Option<f64> {
        self.prices
            .get(step)
            .or_else(|| self.prices.last())
            .copied()
    }

    fn covers(&self, step: usize) -> bool {
        step < self.prices.len()
    }

    fn last_offset(&self) -> usize {
        self.nr_steps()
    }

    fn years_elapsed(&self, step: usize) -> f64 {
        step as f64 * self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_on_a_dense_grid() {
        let path = StepPath::new(vec![100.0, 101.0, 99.0], 0.5);

        assert_eq!(path.start_price(), 100.0);
        assert_eq!(path.price_at_or_before(1), Some(101.0));
        assert_eq!(path.price_at_or_before(2), Some(99.0));
        // beyond the end the last recorded value stands
        assert_eq!(path.price_at_or_before(7), Some(99.0));

        assert!(path.covers(2));
        assert!(!path.covers(3));
        assert_eq!(path.last_offset(), 2);
        assert_eq!(path.years_elapsed(2), 1.0);
    }

    #[test]
    fn empty_path() {
        let path = StepPath::new(vec![], 0.1);
        assert_eq!(path.price_at_or_before(0), None);
        assert!(!path.covers(0));
        assert_eq!(path.nr_steps(), 0);
    }
}
