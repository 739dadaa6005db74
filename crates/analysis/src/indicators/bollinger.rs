use super::sma::{rolling_std, sma};

/// Bollinger bands: SMA ± k standard deviations.
#[derive(Debug, Clone)]
pub struct BollingerIndicator {
    pub period: usize,
    pub k: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerIndicator {
    pub fn new(period: usize, k: f64) -> Self {
        assert!(period >= 2, "Bollinger period must be >= 2");
        Self { period, k }
    }

    pub fn compute(&self, closes: &[f64]) -> Option<BollingerBands> {
        let middle = sma(closes, self.period)?;
        let std = rolling_std(closes, self.period)?;
        Some(BollingerBands {
            upper: middle + self.k * std,
            middle,
            lower: middle - self.k * std,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_collapse_on_constant_series() {
        let bb = BollingerIndicator::new(20, 2.0);
        let closes = vec![1.1; 40];
        let bands = bb.compute(&closes).unwrap();
        assert_eq!(bands.upper, bands.middle);
        assert_eq!(bands.lower, bands.middle);
        assert!((bands.middle - 1.1).abs() < 1e-12);
    }

    #[test]
    fn bands_are_symmetric_around_the_mean() {
        let bb = BollingerIndicator::new(10, 2.0);
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
        let bands = bb.compute(&closes).unwrap();
        let up = bands.upper - bands.middle;
        let down = bands.middle - bands.lower;
        assert!((up - down).abs() < 1e-12);
        assert!(up > 0.0);
    }

    #[test]
    fn none_below_period() {
        let bb = BollingerIndicator::new(20, 2.0);
        assert!(bb.compute(&vec![1.0; 19]).is_none());
    }
}
