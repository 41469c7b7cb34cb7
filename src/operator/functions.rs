//! Elementwise binary functions over two equal-length value sequences.
//!
//! The sequences are zipped positionally; callers align them first.

/// Signature shared by the provided binary functions.
pub type BinaryFunction = fn(&[f64], &[f64]) -> Vec<f64>;

fn zip_with(values1: &[f64], values2: &[f64], op: impl Fn(f64, f64) -> f64) -> Vec<f64> {
    values1
        .iter()
        .zip(values2)
        .map(|(&x, &y)| op(x, y))
        .collect()
}

pub fn add(values1: &[f64], values2: &[f64]) -> Vec<f64> {
    zip_with(values1, values2, |x, y| x + y)
}

pub fn subtract(values1: &[f64], values2: &[f64]) -> Vec<f64> {
    zip_with(values1, values2, |x, y| x - y)
}

/// `values2 - values1`
pub fn right_subtract(values1: &[f64], values2: &[f64]) -> Vec<f64> {
    subtract(values2, values1)
}

pub fn multiply(values1: &[f64], values2: &[f64]) -> Vec<f64> {
    zip_with(values1, values2, |x, y| x * y)
}

pub fn divide(values1: &[f64], values2: &[f64]) -> Vec<f64> {
    zip_with(values1, values2, |x, y| x / y)
}

/// `values2 / values1`
pub fn right_divide(values1: &[f64], values2: &[f64]) -> Vec<f64> {
    divide(values2, values1)
}

pub fn power(values1: &[f64], values2: &[f64]) -> Vec<f64> {
    zip_with(values1, values2, f64::powf)
}

/// `values2 ^ values1`
pub fn right_power(values1: &[f64], values2: &[f64]) -> Vec<f64> {
    power(values2, values1)
}
