//! Lagrange polynomial interpolation over a small ordered point set.
//!
//! The sample-rate converter estimates output amplitudes at fractional
//! input positions by fitting the unique polynomial through the nearest
//! input samples and evaluating it at the target position.

/// A single interpolation node: sample position on the x axis, amplitude on
/// the y axis.
#[derive(Clone, Copy, Debug, Default)]
pub struct Point {
    pub position: f32,
    pub amplitude: f32,
}

/// Evaluate the Lagrange interpolating polynomial through `points` at `x`.
///
/// Positions must be pairwise distinct. Two points degenerate to linear
/// interpolation, and evaluating exactly at a node position returns that
/// node's amplitude.
pub fn lagrange(points: &[Point], x: f32) -> f32 {
    let mut y = 0.0;

    for (i, point) in points.iter().enumerate() {
        let mut mu = point.amplitude;

        for (j, other) in points.iter().enumerate() {
            if i != j {
                mu *= (x - other.position) / (point.position - other.position);
            }
        }

        y += mu;
    }

    y
}
