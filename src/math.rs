//! Numeric helpers for the blur kernel

use std::f32::consts::PI;

/// Standard normal density `a * exp(-x² / (2σ²))` with `a = 1/√(2πσ²)`.
pub fn gauss(x: f32, std_dev: f32) -> f32 {
    let variance = std_dev * std_dev;
    let a = 1.0 / (2.0 * PI * variance).sqrt();
    a * (-(x * x) / (2.0 * variance)).exp()
}

/// Per-tap blur weights for an outline of the given width.
///
/// One sample per pixel of stroke radius, `std_dev = width / 2`. The
/// weights are intentionally NOT normalized to sum to one: the composite
/// shader accounts for total energy through the intensity parameter, and
/// downstream blend strength depends on the raw values.
pub fn gauss_samples(width: usize) -> Vec<f32> {
    let std_dev = width as f32 * 0.5;
    (0..width).map(|i| gauss(i as f32, std_dev)).collect()
}
