/// Shared test utilities for the update-rule atoms
use ndarray::Array2;

/// Synthetic 12 x 16 magnitude spectrogram built from two sources.
/// Source A has energy in bins 0-5, source B in bins 6-11 (with a weaker
/// overtone on bin 2). A is active on even frames, B on frames 8-15.
/// A 0.01 floor keeps every bin strictly positive.
pub fn make_two_source_spectrogram() -> Array2<f64> {
    let (bins, frames) = (12, 16);
    let mut template_a = vec![0.0; bins];
    let mut template_b = vec![0.0; bins];
    for k in 0..6 {
        template_a[k] = 1.0 / (k as f64 + 1.0);
    }
    for k in 6..12 {
        template_b[k] = 1.0 / (k as f64 - 5.0);
    }
    template_b[2] = 0.3;

    Array2::from_shape_fn((bins, frames), |(k, m)| {
        let a = if m % 2 == 0 { 2.0 } else { 0.0 };
        let b = if m >= 8 { 1.5 } else { 0.0 };
        0.01 + template_a[k] * a + template_b[k] * b
    })
}

/// Assert two matrices agree elementwise within `tol`
pub fn assert_close(a: &Array2<f64>, b: &Array2<f64>, tol: f64) {
    assert_eq!(a.dim(), b.dim(), "shape mismatch");
    for ((idx, x), y) in a.indexed_iter().zip(b.iter()) {
        assert!(
            (x - y).abs() <= tol,
            "entry {:?} differs: {} vs {} (tol {})",
            idx,
            x,
            y,
            tol
        );
    }
}
