//! Tent-weighted box blur.

use super::Heightmap;

/// Blur `map` with `iterations` passes of a tent-weighted kernel.
///
/// A sample at distance `d` from the centre has weight
/// `max(0, radius - d) / radius`; each output cell is the weighted mean of
/// its neighbourhood. Sampling clamps at the borders. Every pass reads the
/// full output of the previous pass. `radius` is clamped to at least 1, and
/// zero iterations return an unchanged copy.
pub fn smooth_heightmap(map: &Heightmap, radius: usize, iterations: usize) -> Heightmap {
    let radius = radius.max(1) as isize;
    let kernel = tent_kernel(radius);

    let mut current = map.clone();
    for _ in 0..iterations {
        let source = current;
        current = Heightmap::from_fn(source.width(), source.height(), |x, y| {
            let mut sum = 0.0;
            let mut weight_sum = 0.0;
            for &(kx, ky, w) in &kernel {
                sum += source.get_clamped(x as isize + kx, y as isize + ky) * w;
                weight_sum += w;
            }
            if weight_sum > 0.0 {
                sum / weight_sum
            } else {
                source.get(x, y)
            }
        });
    }
    current
}

/// Offsets with non-zero weight inside the `(2r+1)^2` window.
fn tent_kernel(radius: isize) -> Vec<(isize, isize, f32)> {
    let r = radius as f32;
    let mut kernel = Vec::new();
    for ky in -radius..=radius {
        for kx in -radius..=radius {
            let distance = ((kx * kx + ky * ky) as f32).sqrt();
            let weight = (r - distance).max(0.0) / r;
            if weight > 0.0 {
                kernel.push((kx, ky, weight));
            }
        }
    }
    kernel
}
