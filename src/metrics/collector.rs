// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Global metric collector.

use crate::metrics::types::Metric;
use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};

static GLOBAL: Lazy<Arc<MetricsCollector>> = Lazy::new(|| {
    Arc::new(MetricsCollector {
        buffer: RwLock::new(Vec::new()),
    })
});

/// Process-wide metric buffer.
///
/// Library operations record into the singleton; the embedding
/// application decides when to [`drain`](Self::drain) and where the batch
/// goes. Recording never blocks longer than the buffer push.
pub struct MetricsCollector {
    buffer: RwLock<Vec<Metric>>,
}

impl MetricsCollector {
    /// The process-wide collector.
    pub fn global() -> Arc<MetricsCollector> {
        Arc::clone(&GLOBAL)
    }

    /// Record one metric.
    pub fn record(&self, metric: Metric) {
        if let Ok(mut buffer) = self.buffer.write() {
            buffer.push(metric);
        }
    }

    /// Record a batch of metrics.
    pub fn record_batch(&self, metrics: Vec<Metric>) {
        if let Ok(mut buffer) = self.buffer.write() {
            buffer.extend(metrics);
        }
    }

    /// Number of buffered metrics.
    pub fn buffer_size(&self) -> usize {
        self.buffer.read().map(|buffer| buffer.len()).unwrap_or(0)
    }

    /// Move the buffered metrics out, leaving the buffer empty.
    pub fn drain(&self) -> Vec<Metric> {
        match self.buffer.write() {
            Ok(mut buffer) => std::mem::take(&mut *buffer),
            Err(_) => Vec::new(),
        }
    }

    /// Discard the buffered metrics.
    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.write() {
            buffer.clear();
        }
    }
}
