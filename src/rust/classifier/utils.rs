use ndarray::Array1;

/// Numerically stable softmax: the maximum is subtracted before exponentiating.
pub(crate) fn softmax(values: &Array1<f64>) -> Array1<f64> {
    if values.is_empty() {
        return Array1::zeros(0);
    }
    let max = values.fold(f64::NEG_INFINITY, |acc, &x| acc.max(x));
    let exp = values.mapv(|x| (x - max).exp());
    let sum = exp.sum();
    exp / sum
}

pub(crate) fn sigmoid(values: &Array1<f64>) -> Array1<f64> {
    values.mapv(|x| 1.0 / (1.0 + (-x).exp()))
}

/// Rounds half away from zero to `precision` decimal digits.
pub(crate) fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}
