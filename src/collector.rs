//! Collector Module - Mark-and-Sweep Cycle Management
//!
//! Implements the simulated collector: a mark phase that computes the
//! reachable closure from the rooted set, and a sweep phase that removes
//! everything else and returns its bytes to free space.
//!
//! Triggering is lazy: the ledger invokes the collector only when an
//! allocation cannot be satisfied from the remaining free-space budget,
//! never on a schedule and never eagerly on unrooting. Manual `collect`
//! calls are always permitted and report zero counts when there is
//! nothing to free.

use crate::error::Result;
use crate::graph::ObjectGraph;
use crate::object::ObjectId;
use serde::Serialize;

/// Collector cycle state
///
/// Cyclic: every collection walks Idle -> Marking -> Sweeping -> Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
    /// Idle - no collection in progress
    Idle,
    /// Marking phase - computing the live set from roots
    Marking,
    /// Sweeping phase - removing unreachable objects
    Sweeping,
}

/// Reason a collection cycle was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectReason {
    /// Allocation could not be satisfied from free space (lazy policy)
    Exhaustion,
    /// Explicit request from the embedder
    Explicit,
}

/// Outcome of one collection cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Objects removed by the sweep
    pub objects_freed: usize,
    /// Classified bytes returned to free space
    pub bytes_freed: usize,
}

/// Mark-and-sweep collector over an ObjectGraph
///
/// Owns the free-space budget: no other component mutates it, and the
/// ledger consults it through `free_bytes`. Collection never fails under
/// normal operation; `CorruptGraph` is reserved for a broken internal
/// invariant and is fatal for the graph instance.
pub struct Collector {
    /// Current cycle state
    state: CollectorState,
    /// Simulated heap capacity in bytes
    capacity: usize,
}

impl Collector {
    /// Create a collector with the given heap capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            state: CollectorState::Idle,
            capacity,
        }
    }

    /// Current cycle state
    pub fn state(&self) -> CollectorState {
        self.state
    }

    /// Simulated heap capacity in bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Free space remaining before the heap budget is exhausted
    pub fn free_bytes(&self, graph: &ObjectGraph) -> usize {
        self.capacity.saturating_sub(graph.allocated_bytes())
    }

    /// Whether an allocation of `class_bytes` fits the current budget
    pub fn can_satisfy(&self, graph: &ObjectGraph, class_bytes: usize) -> bool {
        class_bytes <= self.free_bytes(graph)
    }

    /// Run one full mark-and-sweep cycle
    ///
    /// The caller must not mutate the graph while this runs (single
    /// logical thread of control; precondition, not a lock).
    ///
    /// # Errors
    /// `CorruptGraph` if the sweep leaves a surviving object with an edge
    /// to a swept id. That is a bug, not a recoverable condition.
    pub fn collect(&mut self, graph: &mut ObjectGraph, reason: CollectReason) -> Result<SweepReport> {
        log::debug!(
            "collection start: reason {:?}, {} objects, {} bytes allocated",
            reason,
            graph.len(),
            graph.allocated_bytes()
        );

        // Mark phase: the live set is everything reachable from roots.
        self.state = CollectorState::Marking;
        let live = graph.reachable_from(&[]);

        // Sweep phase: everything outside the live set is garbage.
        self.state = CollectorState::Sweeping;
        let dead: Vec<ObjectId> = graph.ids().filter(|id| !live.contains(id)).collect();

        let mut report = SweepReport::default();
        for id in dead {
            if let Some(obj) = graph.remove(id) {
                report.objects_freed += 1;
                report.bytes_freed += obj.class_bytes;
            }
        }

        // Survivors must not reference anything the sweep removed.
        graph.check_integrity()?;

        self.state = CollectorState::Idle;
        log::info!(
            "collection done: freed {} objects, {} bytes ({} bytes free)",
            report.objects_freed,
            report.bytes_freed,
            self.free_bytes(graph)
        );
        Ok(report)
    }
}
