/// Largest f64 below 1.0.
const UPPER: f64 = 1.0 - f64::EPSILON / 2.0;

/// Logistic sigmoid, `1 / (1 + e^-x)`, kept strictly inside (0, 1) even
/// where f64 would round it to 0.0 or 1.0.
pub fn sigmoid(x: f64) -> f64 {
    (1.0 / (1.0 + (-x).exp())).clamp(f64::MIN_POSITIVE, UPPER)
}

/// Sigmoid derivative written in terms of the sigmoid's own output `y`,
/// so the pre-activation sum never has to be kept around.
pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}
