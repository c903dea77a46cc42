// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Percentile and statistical calculations over metric samples.

use serde::{Deserialize, Serialize};

/// Summary statistics of one sample set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    /// Number of samples.
    pub count: usize,

    /// Sum of all samples.
    pub sum: f64,

    /// Arithmetic mean.
    pub mean: f64,

    /// Smallest sample.
    pub min: f64,

    /// Largest sample.
    pub max: f64,

    /// Population standard deviation.
    pub stddev: f64,

    /// Median.
    pub p50: f64,

    /// 95th percentile.
    pub p95: f64,

    /// 99th percentile.
    pub p99: f64,
}

/// Compute the full summary; `None` for an empty sample set.
pub fn calculate_stats(values: &[f64]) -> Option<MetricStats> {
    if values.is_empty() {
        return None;
    }
    Some(MetricStats {
        count: values.len(),
        sum: values.iter().sum(),
        mean: mean(values),
        min: min(values),
        max: max(values),
        stddev: stddev(values),
        p50: p50(values),
        p95: p95(values),
        p99: p99(values),
    })
}

/// Linearly interpolated percentile, `pct` in [0, 100].
pub fn percentile(values: &[f64], pct: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = (pct / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = rank - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

/// Median.
pub fn p50(values: &[f64]) -> f64 {
    percentile(values, 50.0)
}

/// 95th percentile.
pub fn p95(values: &[f64]) -> f64 {
    percentile(values, 95.0)
}

/// 99th percentile.
pub fn p99(values: &[f64]) -> f64 {
    percentile(values, 99.0)
}

/// Arithmetic mean, 0 for an empty set.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation, 0 for an empty set.
pub fn stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Smallest sample, 0 for an empty set.
pub fn min(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Largest sample, 0 for an empty set.
pub fn max(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
