// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Metrics infrastructure for ReedMem observability.
//!
//! Provides lightweight performance monitoring and observability:
//! - **Types**: Metric values and units
//! - **Collector**: Global singleton for recording metrics
//! - **Aggregator**: Percentile and statistical calculations
//!
//! Coarse library operations (`BPlusMap::optimize`, the allocator's
//! `load`/`clear`) record timings here; hot paths record nothing. The
//! buffer is in-memory only and is handed to the caller via `drain`;
//! this crate has no storage backend.
//!
//! ## Quick Start
//!
//! ```rust
//! use reedmem::metrics::{MetricsCollector, Metric, MetricUnit};
//!
//! // Record a metric
//! let metric = Metric::new("alloc_duration", 12.5, MetricUnit::Microseconds)
//!     .with_tag("operation", "best_fit");
//!
//! MetricsCollector::global().record(metric);
//!
//! // Hand the buffered metrics to the caller periodically
//! let batch = MetricsCollector::global().drain();
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          Library Code (optimize, load, clear)           │
//! └────────────────────┬────────────────────────────────────┘
//!                      │
//!                      ▼
//!            ┌─────────────────────┐
//!            │  MetricsCollector   │ ◄── Singleton
//!            │    (In-memory)      │
//!            └──────────┬──────────┘
//!                       │ drain()
//!                       ▼
//!            ┌─────────────────────┐
//!            │    Caller's sink    │
//!            └─────────────────────┘
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Record**: O(1) - lock + push to buffer
//! - **Drain**: O(n) - moves the batched metrics out
//! - **Aggregation**: O(n log n) - sorting for percentiles
//!
//! ## Thread Safety
//!
//! - `MetricsCollector` uses `RwLock` for thread-safe access
//! - Multiple threads can record metrics concurrently

pub mod aggregator;
pub mod collector;
pub mod types;

#[cfg(test)]
mod aggregator_test;

// Re-export commonly used types for convenience
pub use aggregator::{calculate_stats, p50, p95, p99, MetricStats};
pub use collector::MetricsCollector;
pub use types::{Metric, MetricUnit};
