// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Metric values and units.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unit a metric value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricUnit {
    /// Nanoseconds (time base unit).
    Nanoseconds,

    /// Microseconds.
    Microseconds,

    /// Milliseconds.
    Milliseconds,

    /// Bytes (size base unit).
    Bytes,

    /// Kilobytes (1024 bytes).
    Kilobytes,

    /// Megabytes (1024 kilobytes).
    Megabytes,

    /// Dimensionless count.
    Count,

    /// Percentage (0-100).
    Percent,
}

impl MetricUnit {
    /// Display suffix for formatted values.
    pub fn suffix(&self) -> &'static str {
        match self {
            MetricUnit::Nanoseconds => "ns",
            MetricUnit::Microseconds => "μs",
            MetricUnit::Milliseconds => "ms",
            MetricUnit::Bytes => "B",
            MetricUnit::Kilobytes => "KB",
            MetricUnit::Megabytes => "MB",
            MetricUnit::Count => "",
            MetricUnit::Percent => "%",
        }
    }

    /// Convert a value to the base unit of its dimension
    /// (nanoseconds for time, bytes for size, identity otherwise).
    pub fn to_base_unit(&self, value: f64) -> f64 {
        match self {
            MetricUnit::Nanoseconds => value,
            MetricUnit::Microseconds => value * 1_000.0,
            MetricUnit::Milliseconds => value * 1_000_000.0,
            MetricUnit::Bytes => value,
            MetricUnit::Kilobytes => value * 1_024.0,
            MetricUnit::Megabytes => value * 1_048_576.0,
            MetricUnit::Count => value,
            MetricUnit::Percent => value,
        }
    }
}

/// One recorded measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    /// Metric name (e.g. "bptree_optimize").
    pub name: String,

    /// Measured value.
    pub value: f64,

    /// Unit of the value.
    pub unit: MetricUnit,

    /// Free-form dimension tags.
    pub tags: HashMap<String, String>,

    /// Unix timestamp in nanoseconds at creation.
    pub timestamp: u64,
}

impl Metric {
    /// Create a metric stamped with the current time.
    pub fn new(name: impl Into<String>, value: f64, unit: MetricUnit) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self {
            name: name.into(),
            value,
            unit,
            tags: HashMap::new(),
            timestamp,
        }
    }

    /// Attach a tag (builder style).
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Value formatted with its unit suffix (e.g. "1250.50μs").
    pub fn format_value(&self) -> String {
        format!("{:.2}{}", self.value, self.unit.suffix())
    }
}
