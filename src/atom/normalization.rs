use ndarray::{Array2, Axis};

/// Template normalization:
///   W = W * diag(1 / (eps + W.sum(axis=0)))
///
/// Afterwards every column of W sums to 1 (up to eps), which pins down the
/// scale ambiguity between W and H.
pub fn normalize_unit_sum_columns(w: &mut Array2<f64>, eps: f64) {
    let col_sums = w.sum_axis(Axis(0));
    for (mut column, &sum) in w.axis_iter_mut(Axis(1)).zip(col_sums.iter()) {
        let scale = 1.0 / (eps + sum);
        column.mapv_inplace(|v| v * scale);
    }
}

/// V / (eps + sum(V)), so that V sums to one
pub fn normalize_unit_total(v: &Array2<f64>, eps: f64) -> Array2<f64> {
    let total = v.sum();
    v / (eps + total)
}
