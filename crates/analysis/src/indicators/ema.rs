/// Exponential moving average series.
///
/// Multiplier `k = 2 / (period + 1)`, seeded with the SMA of the first
/// `period` values. The returned vector holds one EMA per input index
/// starting at `period - 1`, so `result[i]` corresponds to
/// `values[i + period - 1]`. Empty when there is insufficient data.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed: f64 = values[..period].iter().sum::<f64>() / period as f64;

    let mut result = Vec::with_capacity(values.len() - period + 1);
    result.push(seed);
    for &value in &values[period..] {
        let prev = result[result.len() - 1];
        result.push(value * k + prev * (1.0 - k));
    }
    result
}
