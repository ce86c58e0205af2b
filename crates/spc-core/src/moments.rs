//! Shared moment computations
//!
//! Small numerically careful helpers used by the descriptive, capability and
//! cumulative crates. Slices passed here are expected to hold finite values;
//! use [`finite_sorted`] to clean raw input first.

use serde::{Deserialize, Serialize};

/// Copy the finite values of a slice and sort them ascending
pub fn finite_sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Check if every value in the slice is identical
///
/// Summing identical decimals such as 0.1 drifts by an ulp, so a constant
/// slice is detected up front and its spread reported as exactly zero.
pub fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    let &first = values.first()?;
    if is_constant(values) {
        return Some(first);
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sum of squared deviations from `center`
pub fn sum_sq_dev(values: &[f64], center: f64) -> f64 {
    values.iter().map(|&x| (x - center) * (x - center)).sum()
}

/// Population variance Σ(x−mean)²/n, `None` for an empty slice
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    if is_constant(values) {
        return Some(0.0);
    }
    Some(sum_sq_dev(values, m) / values.len() as f64)
}

/// Sample variance Σ(x−mean)²/(n−1), `None` when fewer than two values
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    if is_constant(values) {
        return Some(0.0);
    }
    Some(sum_sq_dev(values, m) / (values.len() - 1) as f64)
}

/// Median of an ascending slice
pub fn median_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 0 {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Some(sorted[n / 2])
    }
}

/// Mergeable first and second moments of a batch
///
/// `m2` is the sum of squared deviations from the mean, so two summaries can
/// be combined without revisiting the raw values (Chan, Golub & LeVeque).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    pub count: usize,
    pub mean: f64,
    pub m2: f64,
    pub min: f64,
    pub max: f64,
}

impl Moments {
    /// Summarise a slice of finite values, `None` when empty
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let m = mean(values)?;
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
        Some(Self {
            count: values.len(),
            mean: m,
            m2: if min == max { 0.0 } else { sum_sq_dev(values, m) },
            min,
            max,
        })
    }

    /// Population variance m2/n
    pub fn population_variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Population standard deviation
    pub fn population_std_dev(&self) -> f64 {
        self.population_variance().sqrt()
    }

    /// Sample standard deviation, zero below two observations
    pub fn sample_std_dev(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            (self.m2 / (self.count - 1) as f64).sqrt()
        }
    }

    /// Combine two summaries as if their values had been pooled
    pub fn merge(&self, other: &Moments) -> Moments {
        if self.count == 0 {
            return *other;
        }
        if other.count == 0 {
            return *self;
        }
        let count = self.count + other.count;
        let (na, nb, n) = (self.count as f64, other.count as f64, count as f64);
        let (min, max) = (self.min.min(other.min), self.max.max(other.max));
        if min == max {
            return Moments {
                count,
                mean: min,
                m2: 0.0,
                min,
                max,
            };
        }
        let delta = other.mean - self.mean;
        Moments {
            count,
            mean: self.mean + delta * nb / n,
            m2: self.m2 + other.m2 + delta * delta * na * nb / n,
            min,
            max,
        }
    }
}
