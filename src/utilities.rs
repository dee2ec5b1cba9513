// Utility functions for grid construction and presentation
use crate::error::{SpectraError, SpectraResult};

/// Evenly spaced points between `start` and `stop`, both endpoints included.
///
/// Returns an empty vector for `n == 0` and `[start]` for `n == 1`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Log10-spaced points from `10^start` to `10^stop`, both endpoints included.
pub fn logspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    linspace(start, stop, n)
        .into_iter()
        .map(|x| 10f64.powf(x))
        .collect()
}

/// Expand a histogram into step-plot arrays.
///
/// Expects N+1 bounds for N bin values and returns two arrays, both of
/// length 2N, tracing the histogram as a piecewise-constant line.
pub fn step_points(bounds: &[f64], values: &[f64]) -> SpectraResult<(Vec<f64>, Vec<f64>)> {
    if values.len() + 1 != bounds.len() {
        return Err(SpectraError::Validation(format!(
            "expected {} bounds for {} bin values, got {}",
            values.len() + 1,
            values.len(),
            bounds.len()
        )));
    }

    let mut xs = Vec::with_capacity(2 * values.len());
    let mut ys = Vec::with_capacity(2 * values.len());
    for (i, &value) in values.iter().enumerate() {
        xs.extend_from_slice(&[bounds[i], bounds[i + 1]]);
        ys.extend_from_slice(&[value, value]);
    }

    Ok((xs, ys))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints_and_length() {
        let points = linspace(0.0, 10e6, 10000);
        assert_eq!(points.len(), 10000);
        assert_eq!(points[0], 0.0);
        assert!((points[9999] - 10e6).abs() < 1e-6);
        for i in 1..points.len() {
            assert!(points[i] > points[i - 1]);
        }
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(5.0, 1.0, 1), vec![5.0]);
    }

    #[test]
    fn test_logspace_endpoints() {
        let points = logspace(0.0, 6.0, 7);
        assert_eq!(points.len(), 7);
        assert!((points[0] - 1.0).abs() < 1e-9);
        assert!((points[6] - 1e6).abs() < 1e-3);
        assert!((points[3] - 1e3).abs() < 1e-6);
    }

    #[test]
    fn test_step_points_expansion() {
        let bounds = [0.0, 1.0, 2.0, 3.0];
        let values = [5.0, 0.0, 2.5];
        let (xs, ys) = step_points(&bounds, &values).unwrap();
        assert_eq!(xs, vec![0.0, 1.0, 1.0, 2.0, 2.0, 3.0]);
        assert_eq!(ys, vec![5.0, 5.0, 0.0, 0.0, 2.5, 2.5]);
    }

    #[test]
    fn test_step_points_length_mismatch() {
        let result = step_points(&[0.0, 1.0], &[1.0, 2.0]);
        assert!(matches!(result, Err(SpectraError::Validation(_))));
    }
}
