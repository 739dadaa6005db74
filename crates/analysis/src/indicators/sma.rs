/// Simple moving average of the last `period` values.
/// Returns `None` if there are fewer than `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Sample standard deviation of the last `period` values.
pub fn rolling_std(values: &[f64], period: usize) -> Option<f64> {
    if period < 2 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;
    let variance =
        window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (period as f64 - 1.0);
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_of_constant_series_is_the_constant() {
        let values = vec![5.0; 30];
        assert_eq!(sma(&values, 10), Some(5.0));
    }

    #[test]
    fn sma_uses_only_the_tail_window() {
        let values = vec![100.0, 100.0, 1.0, 2.0, 3.0];
        assert_eq!(sma(&values, 3), Some(2.0));
    }

    #[test]
    fn sma_requires_full_window() {
        assert!(sma(&[1.0, 2.0], 3).is_none());
    }

    #[test]
    fn std_of_constant_series_is_zero() {
        let values = vec![7.0; 25];
        assert_eq!(rolling_std(&values, 20), Some(0.0));
    }

    #[test]
    fn std_known_value() {
        // Sample std of [2, 4, 4, 4, 5, 5, 7, 9] is ~2.138
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let std = rolling_std(&values, 8).unwrap();
        assert!((std - 2.13809).abs() < 1e-4, "got {std}");
    }
}
