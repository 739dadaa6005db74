use common::Candle;

/// ATR (Average True Range) with Wilder smoothing.
///
/// True range of bar i uses the previous close, so `period + 1` candles are
/// required for the first value.
#[derive(Debug, Clone)]
pub struct AtrIndicator {
    pub period: usize,
}

impl AtrIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self { period }
    }

    /// ATR at the last candle, or `None` below `period + 1` candles.
    pub fn compute(&self, candles: &[Candle]) -> Option<f64> {
        self.series(candles).last().copied()
    }

    /// Wilder-smoothed ATR per index, starting at index `period`
    /// (so `result[i]` corresponds to `candles[i + period]`).
    /// The volatility gate consumes this to rank the latest value.
    pub fn series(&self, candles: &[Candle]) -> Vec<f64> {
        if candles.len() < self.period + 1 {
            return Vec::new();
        }

        let true_ranges: Vec<f64> = candles
            .windows(2)
            .map(|w| {
                let prev_close = w[0].close;
                let c = &w[1];
                (c.high - c.low)
                    .max((c.high - prev_close).abs())
                    .max((c.low - prev_close).abs())
            })
            .collect();

        let mut atr = true_ranges[..self.period].iter().sum::<f64>() / self.period as f64;
        let mut result = Vec::with_capacity(true_ranges.len() - self.period + 1);
        result.push(atr);
        for &tr in &true_ranges[self.period..] {
            atr = (atr * (self.period - 1) as f64 + tr) / self.period as f64;
            result.push(atr);
        }
        result
    }
}
