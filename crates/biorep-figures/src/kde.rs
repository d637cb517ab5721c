//! Gaussian kernel density estimation.

use std::f64::consts::PI;

use rand::Rng;

use crate::stats::std_dev;

/// Magnitude of the jitter added to degenerate samples.
pub const JITTER: f64 = 1e-6;

const ZERO_SPREAD: f64 = 1e-8;

/// A fitted one-dimensional Gaussian KDE.
///
/// The kernel width is `bandwidth_factor` times the sample standard
/// deviation, matching a scalar bandwidth factor in the usual KDE APIs.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    points: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit a KDE to `samples`.
    ///
    /// Samples with fewer than two points or no spread are jittered by at
    /// most [`JITTER`] so the estimate is never singular. An empty sample is
    /// replaced by two jittered points around zero.
    pub fn fit<R: Rng + ?Sized>(samples: &[f64], bandwidth_factor: f64, rng: &mut R) -> Self {
        let mut points = samples.to_vec();
        if points.len() < 2 || std_dev(&points, 0) < ZERO_SPREAD {
            points = match points.len() {
                0 => vec![0.0, 0.0],
                1 => vec![points[0], points[0]],
                _ => points,
            };
            for p in &mut points {
                *p += rng.gen_range(-JITTER..=JITTER);
            }
            // Two draws can coincide in principle; force a non-zero spread.
            if std_dev(&points, 0) < f64::EPSILON {
                points[0] -= JITTER;
                points[1] += JITTER;
            }
            tracing::debug!(n = samples.len(), "degenerate sample jittered");
        }

        let bandwidth = bandwidth_factor * std_dev(&points, 1);
        Self { points, bandwidth }
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let norm = 1.0 / (self.points.len() as f64 * h * (2.0 * PI).sqrt());
        let sum: f64 = self
            .points
            .iter()
            .map(|p| {
                let z = (x - p) / h;
                (-0.5 * z * z).exp()
            })
            .sum();
        norm * sum
    }

    pub fn evaluate_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|x| self.evaluate(*x)).collect()
    }
}
