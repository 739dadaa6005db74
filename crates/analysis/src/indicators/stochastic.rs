use common::Candle;

use super::sma::sma;

/// Stochastic oscillator (%K smoothed, %D signal line).
///
/// Raw %K compares the close against the high/low range of the lookback
/// window; it is then smoothed with an SMA, and %D is an SMA of the smoothed
/// %K. Defaults of 14/3/3 match the standard oscillator.
#[derive(Debug, Clone)]
pub struct StochasticIndicator {
    pub lookback: usize,
    pub smooth: usize,
    pub signal: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochasticOutput {
    pub k: f64,
    pub d: f64,
}

impl StochasticIndicator {
    pub fn new(lookback: usize, smooth: usize, signal: usize) -> Self {
        assert!(lookback >= 1 && smooth >= 1 && signal >= 1);
        Self { lookback, smooth, signal }
    }

    /// Candles required before a value exists.
    pub fn min_len(&self) -> usize {
        self.lookback + self.smooth + self.signal - 2
    }

    /// %K/%D at the last candle, or `None` below `min_len()` candles.
    pub fn compute(&self, candles: &[Candle]) -> Option<StochasticOutput> {
        if candles.len() < self.min_len() {
            return None;
        }

        // Raw %K for the most recent smooth + signal - 1 bars.
        let needed = self.smooth + self.signal - 1;
        let raw: Vec<f64> = (candles.len() - needed..candles.len())
            .map(|i| {
                let window = &candles[i + 1 - self.lookback..=i];
                let highest = window.iter().map(|c| c.high).fold(f64::MIN, f64::max);
                let lowest = window.iter().map(|c| c.low).fold(f64::MAX, f64::min);
                if highest == lowest {
                    // Flat range: conventionally mid-scale rather than a
                    // division by zero.
                    50.0
                } else {
                    100.0 * (candles[i].close - lowest) / (highest - lowest)
                }
            })
            .collect();

        let smoothed: Vec<f64> = (self.smooth - 1..raw.len())
            .map(|i| raw[i + 1 - self.smooth..=i].iter().sum::<f64>() / self.smooth as f64)
            .collect();

        let k = *smoothed.last()?;
        let d = sma(&smoothed, self.signal)?;
        Some(StochasticOutput { k, d })
    }
}
