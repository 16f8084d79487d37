use argminmax::ArgMinMax;
use rustfft::FftPlanner;
use rustfft::num_complex::Complex;
use statrs::statistics::Statistics;
use std::f64::consts::PI;

/// Trailing simple moving average.
/// Returns only the fully-defined values: element `k` covers inputs `k..k + window`,
/// so the output is `window - 1` shorter than the input (empty if the input is too short).
pub fn trailing_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return Vec::new();
    }

    let mut averages = Vec::with_capacity(values.len() - window + 1);
    let mut running_sum: f64 = values[..window].iter().sum();
    averages.push(running_sum / window as f64);

    for i in window..values.len() {
        running_sum += values[i] - values[i - window];
        averages.push(running_sum / window as f64);
    }
    averages
}

/// Removes the least-squares line through `(index, value)`.
pub fn detrend_linear(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return values.iter().map(|_| 0.0).collect();
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = values.iter().mean();

    let mut covariance = 0.0;
    let mut x_variance = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        covariance += dx * (y - y_mean);
        x_variance += dx * dx;
    }
    let slope = covariance / x_variance;

    values
        .iter()
        .enumerate()
        .map(|(i, &y)| y - (y_mean + slope * (i as f64 - x_mean)))
        .collect()
}

/// Instantaneous phase angle of the analytic signal of `values`, in [-PI, PI].
///
/// FFT method: keep DC (and Nyquist for even lengths), double the positive
/// frequencies, zero the negative ones, inverse transform and take the argument.
pub fn analytic_signal_angles(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(n);
    let inverse = planner.plan_fft_inverse(n);

    let mut buffer: Vec<Complex<f64>> = values.iter().map(|&v| Complex::new(v, 0.0)).collect();
    forward.process(&mut buffer);

    let positive_end = n.div_ceil(2); // exclusive
    for (k, bin) in buffer.iter_mut().enumerate() {
        let h = if k == 0 || (n % 2 == 0 && k == n / 2) {
            1.0
        } else if k < positive_end {
            2.0
        } else {
            0.0
        };
        *bin *= h;
    }

    inverse.process(&mut buffer);

    // rustfft does not normalise; scaling does not change the argument but keeps
    // the magnitudes meaningful if anyone inspects them.
    let scale = 1.0 / n as f64;
    buffer
        .iter()
        .map(|c| (c.im * scale).atan2(c.re * scale))
        .collect()
}

/// Maps an angle in [-PI, PI] onto a cycle fraction in [0, 1).
pub fn angle_to_cycle_fraction(angle: f64) -> f64 {
    let fraction = (angle + PI) / (2.0 * PI);
    if fraction >= 1.0 {
        fraction - 1.0
    } else if fraction < 0.0 {
        0.0
    } else {
        fraction
    }
}

/// Index of the smallest value (first occurrence). `None` for an empty slice.
pub fn argmin(vec: &[f64]) -> Option<usize> {
    if vec.is_empty() {
        return None;
    }
    Some(vec.argmin())
}

/// Index of the largest value (first occurrence). `None` for an empty slice.
pub fn argmax(vec: &[f64]) -> Option<usize> {
    if vec.is_empty() {
        return None;
    }
    Some(vec.argmax())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn moving_average_drops_leading_points() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ma = trailing_moving_average(&values, 3);
        assert_eq!(ma.len(), 3);
        assert!(approx_eq(ma[0], 2.0, 1e-12));
        assert!(approx_eq(ma[1], 3.0, 1e-12));
        assert!(approx_eq(ma[2], 4.0, 1e-12));
    }

    #[test]
    fn moving_average_too_short_is_empty() {
        assert!(trailing_moving_average(&[1.0, 2.0], 3).is_empty());
        assert!(trailing_moving_average(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn detrend_removes_a_line_exactly() {
        let values: Vec<f64> = (0..20).map(|i| 5.0 + 0.75 * i as f64).collect();
        for v in detrend_linear(&values) {
            assert!(approx_eq(v, 0.0, 1e-9));
        }
    }

    #[test]
    fn analytic_angle_of_cosine_tracks_its_argument() {
        // cos(wt) has analytic signal e^{iwt}, so the angle follows wt (wrapped).
        // Use a whole number of cycles so the FFT sees no edge discontinuity.
        let n = 256;
        let period = 32.0;
        let values: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * i as f64 / period).cos())
            .collect();
        let angles = analytic_signal_angles(&values);
        assert_eq!(angles.len(), n);

        for (i, &angle) in angles.iter().enumerate() {
            let expected = 2.0 * PI * i as f64 / period;
            // Compare on the unit circle so wrapping at +-PI doesn't matter
            let mismatch = 1.0 - (angle - expected).cos();
            assert!(mismatch < 1e-9, "angle[{}] = {} expected {}", i, angle, expected);
        }
    }

    #[test]
    fn cycle_fraction_is_half_open() {
        assert!(approx_eq(angle_to_cycle_fraction(-PI), 0.0, 1e-12));
        assert!(approx_eq(angle_to_cycle_fraction(0.0), 0.5, 1e-12));
        assert_eq!(angle_to_cycle_fraction(PI), 0.0);
        let just_below = angle_to_cycle_fraction(PI - 1e-9);
        assert!(just_below < 1.0 && just_below > 0.99);
    }

    #[test]
    fn extrema_indices() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(argmin(&values), Some(1));
        assert_eq!(argmax(&values), Some(4));
        assert_eq!(argmin(&[]), None);
        assert_eq!(argmax(&[]), None);
    }
}
