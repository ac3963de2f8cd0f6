//! # alloc-ledger - Allocation Ledger
//!
//! A library that models how a language runtime sizes and pools small
//! fixed-size allocations, tracks live object references to compute
//! reachable memory, and simulates a mark-and-sweep collector with lazy
//! (allocation-failure-driven) triggering.
//!
//! This is a simulation: no real memory is allocated on behalf of tracked
//! objects, only byte accounting. It exists to make runtime memory
//! behavior observable and testable without a runtime.
//!
//! ## Overview
//!
//! - **Size classes**: every payload is rounded up to the smallest class
//!   that fits it plus a fixed header, or to an aligned large-object size
//! - **Object graph**: live objects with explicit reference edges and a
//!   rooted flag; reachability is the transitive closure from the roots
//! - **Lazy collection**: mark-and-sweep runs only when an allocation
//!   cannot be satisfied from the free-space budget, never on a schedule
//!   and never eagerly on unrooting
//! - **Usage reporting**: snapshots that never mutate, plus a delta
//!   measurement that collects in between so "not yet collected" is not
//!   confused with "still live"
//!
//! ## Quick Start
//!
//! ```rust
//! use alloc_ledger::{Ledger, LedgerConfig};
//!
//! fn main() -> Result<(), alloc_ledger::LedgerError> {
//!     let mut ledger = Ledger::new(LedgerConfig::default())?;
//!
//!     // Allocate a rooted object referencing an unrooted one
//!     let a = ledger.create(64, true)?;
//!     let b = ledger.create(16, false)?;
//!     ledger.set_references(a, &[b])?;
//!
//!     // b is reachable through a, so nothing is freed
//!     let report = ledger.collect()?;
//!     assert_eq!(report.objects_freed, 0);
//!
//!     // Dropping the root strands the whole chain
//!     ledger.set_rooted(a, false)?;
//!     let report = ledger.collect()?;
//!     assert_eq!(report.objects_freed, 2);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! Single-threaded, synchronous, cooperative: all operations complete
//! synchronously, bounded by graph size. One graph/collector pair per
//! `Ledger` instance, passed explicitly (no process-wide singleton), so
//! independent simulations can coexist and be tested in isolation. The
//! caller must not mutate a ledger from another thread during a
//! collection cycle; that is a documented precondition, not a lock the
//! library manages.
//!
//! ## Modules
//!
//! - [`config`]: size-class table, header overhead, alignment, capacity
//! - [`error`]: error taxonomy for all ledger operations
//! - [`sizeclass`]: payload-to-allocation-size classification
//! - [`object`]: tracked object records and ids
//! - [`graph`]: live object tracking and reachability
//! - [`collector`]: mark-and-sweep cycle management
//! - [`report`]: usage snapshots
//! - [`stats`]: cumulative activity counters

pub mod collector;
pub mod config;
pub mod error;
pub mod graph;
pub mod object;
pub mod report;
pub mod sizeclass;
pub mod stats;

pub use collector::{CollectReason, Collector, CollectorState, SweepReport};
pub use config::{ConfigError, LedgerConfig};
pub use error::{LedgerError, Result};
pub use graph::ObjectGraph;
pub use object::{Object, ObjectId};
pub use report::{snapshot, ClassCount, UsageSnapshot};
pub use sizeclass::SizeClassModel;
pub use stats::{LedgerStats, StatsSummary};

/// Crate version string from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Ledger - facade wiring the graph, collector, and stats together
///
/// Routes every mutation so the lazy-collection policy and the
/// free-space budget stay consistent: `create` is the only operation
/// that can trigger a collection, and only when its size class does not
/// fit the remaining budget.
pub struct Ledger {
    /// Sizing model (shared with the graph)
    model: SizeClassModel,
    /// Tracked objects and counters
    graph: ObjectGraph,
    /// Mark-and-sweep collector owning the free-space budget
    collector: Collector,
    /// Cumulative activity counters
    stats: LedgerStats,
}

impl Ledger {
    /// Create a ledger with the given configuration
    ///
    /// # Errors
    /// `Configuration` if the configuration fails validation.
    pub fn new(config: LedgerConfig) -> Result<Self> {
        config.validate()?;

        let model = SizeClassModel::new(&config);
        let graph = ObjectGraph::new(model.clone());
        let collector = Collector::new(config.heap_capacity);

        Ok(Self {
            model,
            graph,
            collector,
            stats: LedgerStats::new(),
        })
    }

    /// Create a ledger with the default configuration
    pub fn with_defaults() -> Self {
        Self::new(LedgerConfig::default()).expect("default configuration is valid")
    }

    /// Allocate a new object
    ///
    /// Classifies the payload, and if the classified size does not fit
    /// the free-space budget, runs a collection first (the lazy policy).
    ///
    /// # Errors
    /// - `InvalidSize` if the payload cannot be classified
    /// - `OutOfMemory` if the allocation still does not fit after
    ///   collection; the graph is left untouched
    pub fn create(&mut self, payload_bytes: usize, rooted: bool) -> Result<ObjectId> {
        let class_bytes = self.model.classify(payload_bytes)?;

        if !self.collector.can_satisfy(&self.graph, class_bytes) {
            log::debug!(
                "allocation of {} bytes exceeds free space, triggering collection",
                class_bytes
            );
            let report = self.collector.collect(&mut self.graph, CollectReason::Exhaustion)?;
            self.stats.record_collection(CollectReason::Exhaustion, &report);

            if !self.collector.can_satisfy(&self.graph, class_bytes) {
                let available = self.collector.free_bytes(&self.graph);
                log::warn!(
                    "allocation failure: requested {} bytes, {} available after collection",
                    class_bytes,
                    available
                );
                return Err(LedgerError::OutOfMemory {
                    requested: class_bytes,
                    available,
                });
            }
        }

        let id = self.graph.create(payload_bytes, rooted)?;
        self.stats.record_allocation(self.graph.allocated_bytes());
        Ok(id)
    }

    /// Replace an object's outgoing reference edges
    ///
    /// # Errors
    /// `UnknownObject` if `id` or any referenced id is absent; no partial
    /// mutation happens on failure.
    pub fn set_references(&mut self, id: ObjectId, refs: &[ObjectId]) -> Result<()> {
        self.graph.set_references(id, refs)
    }

    /// Toggle an object's direct reachability
    ///
    /// Never triggers a collection, even when unrooting strands objects.
    ///
    /// # Errors
    /// `UnknownObject` if `id` is absent.
    pub fn set_rooted(&mut self, id: ObjectId, rooted: bool) -> Result<()> {
        self.graph.set_rooted(id, rooted)
    }

    /// Run a collection cycle explicitly
    ///
    /// Always permitted; reports zero counts when there is nothing to
    /// free.
    pub fn collect(&mut self) -> Result<SweepReport> {
        let report = self.collector.collect(&mut self.graph, CollectReason::Explicit)?;
        self.stats.record_collection(CollectReason::Explicit, &report);
        Ok(report)
    }

    /// Take a usage snapshot
    ///
    /// Read-only: never triggers a collection.
    pub fn snapshot(&self) -> UsageSnapshot {
        report::snapshot(&self.graph)
    }

    /// Measure the live-byte effect of an operation
    ///
    /// Takes a snapshot, runs `op`, collects, takes a second snapshot,
    /// and returns the signed difference in live bytes. The intervening
    /// collection is the point: a naive before/after diff would conflate
    /// "not yet collected" with "still live" for operations that merely
    /// drop references.
    ///
    /// # Errors
    /// Propagates any error from `op` or from the collection.
    pub fn measure_delta<F>(&mut self, op: F) -> Result<i64>
    where
        F: FnOnce(&mut Ledger) -> Result<()>,
    {
        let before = self.snapshot();
        op(self)?;
        self.collect()?;
        let after = self.snapshot();
        Ok(after.live_bytes as i64 - before.live_bytes as i64)
    }

    /// Free space remaining before the heap budget is exhausted
    pub fn free_bytes(&self) -> usize {
        self.collector.free_bytes(&self.graph)
    }

    /// Tracked object graph (read-only)
    pub fn graph(&self) -> &ObjectGraph {
        &self.graph
    }

    /// Sizing model backing this ledger
    pub fn model(&self) -> &SizeClassModel {
        &self.model
    }

    /// Cumulative activity counters
    pub fn stats(&self) -> &LedgerStats {
        &self.stats
    }
}
