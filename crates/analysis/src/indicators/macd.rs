use super::ema::ema_series;

/// MACD (Moving Average Convergence/Divergence) indicator.
///
/// MACD line = EMA(fast) − EMA(slow); signal line = EMA(macd_line, signal);
/// histogram = MACD − signal. The condition scorer watches the histogram for
/// sign flips, so the full triple is returned instead of a crossover flag.
#[derive(Debug, Clone)]
pub struct MacdIndicator {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

/// The MACD values at the latest bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdOutput {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl MacdIndicator {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast < slow, "MACD fast period must be less than slow period");
        assert!(signal >= 1, "MACD signal period must be >= 1");
        Self { fast, slow, signal }
    }

    /// Candles required before a value exists.
    pub fn min_len(&self) -> usize {
        self.slow + self.signal - 1
    }

    /// Compute MACD at the last index of `closes` (oldest first).
    /// Returns `None` with fewer than `min_len()` values.
    pub fn compute(&self, closes: &[f64]) -> Option<MacdOutput> {
        if closes.len() < self.min_len() {
            return None;
        }

        let fast_ema = ema_series(closes, self.fast);
        let slow_ema = ema_series(closes, self.slow);

        // MACD line defined from index slow-1 onward; align the two EMA
        // vectors on the original close index.
        let offset = self.slow - self.fast;
        let macd_line: Vec<f64> = slow_ema
            .iter()
            .enumerate()
            .map(|(i, slow)| fast_ema[i + offset] - slow)
            .collect();

        let signal_line = ema_series(&macd_line, self.signal);
        let signal = *signal_line.last()?;
        let macd = *macd_line.last()?;

        Some(MacdOutput {
            macd,
            signal,
            histogram: macd - signal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macd_returns_none_with_insufficient_data() {
        let macd = MacdIndicator::new(12, 26, 9);
        let prices = vec![100.0; 33]; // need >= 34
        assert!(macd.compute(&prices).is_none());
    }

    #[test]
    fn macd_flat_series_is_zero() {
        let macd = MacdIndicator::new(12, 26, 9);
        let prices = vec![100.0; 60];
        let out = macd.compute(&prices).unwrap();
        assert!(out.macd.abs() < 1e-9);
        assert!(out.signal.abs() < 1e-9);
        assert!(out.histogram.abs() < 1e-9);
    }

    #[test]
    fn macd_positive_in_sustained_uptrend() {
        let macd = MacdIndicator::new(12, 26, 9);
        let prices: Vec<f64> = (0..80).map(|i| 100.0 + i as f64 * 0.5).collect();
        let out = macd.compute(&prices).unwrap();
        assert!(out.macd > 0.0, "macd {} not positive", out.macd);
    }

    #[test]
    fn macd_histogram_flips_after_reversal() {
        let macd = MacdIndicator::new(3, 6, 3);
        // Long decline keeps the histogram negative...
        let mut prices: Vec<f64> = (0..40).map(|i| 200.0 - i as f64).collect();
        let before = macd.compute(&prices).unwrap();
        assert!(before.histogram < 0.0);
        // ...then a sharp rally drives it positive.
        prices.extend((0..25).map(|i| 161.0 + i as f64 * 3.0));
        let after = macd.compute(&prices).unwrap();
        assert!(after.histogram > 0.0, "histogram {}", after.histogram);
    }
}
