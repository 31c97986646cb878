use ndarray::{Array2, Zip};

/// Elementwise multiplicative update in place: base *= numer / (denom + eps)
///
/// Non-negativity of `base` is preserved as long as `numer` and `denom` are
/// non-negative. Non-finite values are not scrubbed; `eps` is the only floor.
pub fn multiplicative_update(
    base: &mut Array2<f64>,
    numer: &Array2<f64>,
    denom: &Array2<f64>,
    eps: f64,
) {
    Zip::from(base)
        .and(numer)
        .and(denom)
        .for_each(|b, &n, &d| {
            *b *= n / (d + eps);
        });
}

/// Model estimate Λ = eps + W*H
pub fn model_estimate(w: &Array2<f64>, h: &Array2<f64>, eps: f64) -> Array2<f64> {
    let mut lambda = w.dot(h);
    lambda.mapv_inplace(|v| v + eps);
    lambda
}

/// Frobenius norm of the difference ||A - B||_F without materializing A - B
pub fn frobenius_distance(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    Zip::from(a)
        .and(b)
        .fold(0.0_f64, |acc, &x, &y| acc + (x - y) * (x - y))
        .sqrt()
}

/// Objective 0.5 * ||V - W*H||_F^2
pub fn objective(v: &Array2<f64>, w: &Array2<f64>, h: &Array2<f64>) -> f64 {
    let approx = w.dot(h);
    0.5 * frobenius_distance(v, &approx).powi(2)
}
