//! Final height curve, contrast boost and anti-flatness ripple.

use super::Heightmap;
use crate::curve::HeightCurve;

/// Exponent of the contrast boost applied after the curve.
pub const CONTRAST_EXPONENT: f32 = 0.9;
/// Output ranges below this trigger the ripple overlay.
pub const RIPPLE_RANGE_THRESHOLD: f32 = 0.05;

const RIPPLE_FREQUENCY: f32 = 10.0;
const RIPPLE_AMPLITUDE: f32 = 0.4;
const RIPPLE_BLEND: f32 = 0.8;

/// Whether [`apply_height_curve_with_repair`] overlaid the ripple pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveRepair {
    None,
    RippleOverlay,
}

/// Remap every cell through `curve`, then boost contrast. See
/// [`apply_height_curve_with_repair`].
pub fn apply_height_curve(map: &Heightmap, curve: &impl HeightCurve) -> Heightmap {
    apply_height_curve_with_repair(map, curve).0
}

/// Remap every cell through `curve` and raise it to [`CONTRAST_EXPONENT`].
///
/// Negative curve outputs are floored at zero before the power. If the
/// result spans less than [`RIPPLE_RANGE_THRESHOLD`], a deterministic
/// sine/cosine ripple is blended in at 80% ripple, 20% original.
pub fn apply_height_curve_with_repair(
    map: &Heightmap,
    curve: &impl HeightCurve,
) -> (Heightmap, CurveRepair) {
    let processed = map.map(|v| curve.evaluate(v).max(0.0).powf(CONTRAST_EXPONENT));

    let range = processed.range();
    if range >= RIPPLE_RANGE_THRESHOLD {
        return (processed, CurveRepair::None);
    }

    tracing::warn!(range, "final heightmap is too flat, adding ripple variation");
    let (width, height) = processed.dimensions();
    let rippled = Heightmap::from_fn(width, height, |x, y| {
        let original = processed.get(x, y);
        original * (1.0 - RIPPLE_BLEND) + ripple(x, y, width, height) * RIPPLE_BLEND
    });
    (rippled, CurveRepair::RippleOverlay)
}

/// Ripple value in `[0, 0.8]` at `(x, y)`.
fn ripple(x: usize, y: usize, width: usize, height: usize) -> f32 {
    let xf = x as f32 / width as f32 * RIPPLE_FREQUENCY;
    let yf = y as f32 / height as f32 * RIPPLE_FREQUENCY;
    (libm::sinf(xf) * libm::cosf(yf) + 1.0) * RIPPLE_AMPLITUDE
}
