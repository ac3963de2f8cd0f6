//! Stats Module - Ledger Activity Counters
//!
//! Cumulative counters for allocation and collection activity, kept for
//! tuning and test assertions. Reading stats never mutates the graph.

use crate::collector::{CollectReason, SweepReport};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Cumulative activity counters for one ledger instance
pub struct LedgerStats {
    /// Successful allocations
    allocations: AtomicU64,
    /// Collection cycles run (any reason)
    collections: AtomicU64,
    /// Cycles triggered by the lazy exhaustion policy
    exhaustion_collections: AtomicU64,
    /// Objects freed across all sweeps
    objects_freed: AtomicU64,
    /// Bytes freed across all sweeps
    bytes_freed: AtomicU64,
    /// High-water mark of allocated bytes
    peak_allocated: AtomicUsize,
}

impl LedgerStats {
    /// Create a zeroed stats collector
    pub fn new() -> Self {
        Self {
            allocations: AtomicU64::new(0),
            collections: AtomicU64::new(0),
            exhaustion_collections: AtomicU64::new(0),
            objects_freed: AtomicU64::new(0),
            bytes_freed: AtomicU64::new(0),
            peak_allocated: AtomicUsize::new(0),
        }
    }

    /// Record a successful allocation and the resulting heap usage
    pub fn record_allocation(&self, allocated_now: usize) {
        self.allocations.fetch_add(1, Ordering::Relaxed);
        self.peak_allocated.fetch_max(allocated_now, Ordering::Relaxed);
    }

    /// Record a finished collection cycle
    pub fn record_collection(&self, reason: CollectReason, report: &SweepReport) {
        self.collections.fetch_add(1, Ordering::Relaxed);
        if reason == CollectReason::Exhaustion {
            self.exhaustion_collections.fetch_add(1, Ordering::Relaxed);
        }
        self.objects_freed
            .fetch_add(report.objects_freed as u64, Ordering::Relaxed);
        self.bytes_freed
            .fetch_add(report.bytes_freed as u64, Ordering::Relaxed);
    }

    /// Get summary statistics
    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            allocations: self.allocations.load(Ordering::Relaxed),
            collections: self.collections.load(Ordering::Relaxed),
            exhaustion_collections: self.exhaustion_collections.load(Ordering::Relaxed),
            objects_freed: self.objects_freed.load(Ordering::Relaxed),
            bytes_freed: self.bytes_freed.load(Ordering::Relaxed),
            peak_allocated_bytes: self.peak_allocated.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.allocations.store(0, Ordering::Relaxed);
        self.collections.store(0, Ordering::Relaxed);
        self.exhaustion_collections.store(0, Ordering::Relaxed);
        self.objects_freed.store(0, Ordering::Relaxed);
        self.bytes_freed.store(0, Ordering::Relaxed);
        self.peak_allocated.store(0, Ordering::Relaxed);
    }
}

impl Default for LedgerStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics
#[derive(Debug, Default, Clone, Serialize)]
pub struct StatsSummary {
    /// Successful allocations
    pub allocations: u64,
    /// Collection cycles run
    pub collections: u64,
    /// Cycles triggered by allocation failure
    pub exhaustion_collections: u64,
    /// Objects freed across all sweeps
    pub objects_freed: u64,
    /// Bytes freed across all sweeps
    pub bytes_freed: u64,
    /// High-water mark of allocated bytes
    pub peak_allocated_bytes: usize,
}
