//! Collection Correctness Tests - Reachability and Sweep Behavior
//!
//! These tests verify that the collector correctly:
//! - Frees unreachable objects and nothing else
//! - Preserves everything reachable from the rooted set
//! - Treats cycles as garbage when no root reaches them
//! - Reports freed counts accurately and idempotently

mod common;

use common::LedgerFixture;

/// Unrooted standalone objects are freed; rooted ones survive
///
/// **Bug this finds:** liveness tracking treating every object as live
#[test]
fn test_unrooted_standalone_collected() {
    // Arrange - A rooted, B unrooted and referenced by nothing
    let mut fx = LedgerFixture::with_defaults();
    let a = fx.alloc(10, true);
    let _b = fx.alloc(10, false);

    // Act
    let report = fx.ledger.collect().unwrap();

    // Assert - only B freed, only A's bytes remain live
    assert_eq!(report.objects_freed, 1);
    assert_eq!(report.bytes_freed, fx.classify(10));
    assert!(fx.ledger.graph().contains(a));
    assert_eq!(fx.ledger.snapshot().live_bytes, fx.classify(10));
}

/// Objects referenced by a root survive through the chain
///
/// **Bug this finds:** reachability not traversing outgoing edges
#[test]
fn test_referenced_object_survives() {
    let mut fx = LedgerFixture::with_defaults();
    let a = fx.alloc(10, true);
    let b = fx.alloc(10, false);
    fx.ledger.set_references(a, &[b]).unwrap();

    let report = fx.ledger.collect().unwrap();

    assert_eq!(report.objects_freed, 0);
    assert_eq!(report.bytes_freed, 0);
    assert!(fx.ledger.graph().contains(b));
}

/// Unrooting the head of a chain strands the whole chain
///
/// **Bug this finds:** stale root sets, eager collection on unroot
#[test]
fn test_unrooting_strands_chain() {
    let mut fx = LedgerFixture::with_defaults();
    let a = fx.alloc(10, true);
    let b = fx.alloc(10, false);
    fx.ledger.set_references(a, &[b]).unwrap();

    // Unrooting must not free anything by itself
    fx.ledger.set_rooted(a, false).unwrap();
    assert_eq!(fx.ledger.graph().len(), 2);

    let report = fx.ledger.collect().unwrap();

    assert_eq!(report.objects_freed, 2);
    assert_eq!(fx.ledger.snapshot().live_bytes, 0);
    assert!(fx.ledger.graph().is_empty());
}

/// An unrooted reference cycle is garbage, not live
///
/// **Bug this finds:** cycle mistaken for reachable, BFS infinite loop
#[test]
fn test_unrooted_cycle_collected() {
    let mut fx = LedgerFixture::with_defaults();
    let a = fx.alloc(10, false);
    let b = fx.alloc(10, false);
    fx.ledger.set_references(a, &[b]).unwrap();
    fx.ledger.set_references(b, &[a]).unwrap();

    let report = fx.ledger.collect().unwrap();

    assert_eq!(report.objects_freed, 2);
    assert_eq!(report.bytes_freed, 2 * fx.classify(10));
    assert!(fx.ledger.graph().is_empty());
}

/// A rooted cycle survives collection
#[test]
fn test_rooted_cycle_survives() {
    let mut fx = LedgerFixture::with_defaults();
    let a = fx.alloc(10, true);
    let b = fx.alloc(10, false);
    fx.ledger.set_references(a, &[b]).unwrap();
    fx.ledger.set_references(b, &[a]).unwrap();

    let report = fx.ledger.collect().unwrap();

    assert_eq!(report.objects_freed, 0);
    assert_eq!(fx.ledger.graph().len(), 2);
}

/// Back-to-back collections with no mutation free nothing the second time
///
/// **Bug this finds:** sweep freeing live objects, phantom free counts
#[test]
fn test_collect_idempotent() {
    let mut fx = LedgerFixture::with_defaults();
    fx.alloc(10, true);
    fx.alloc(10, false);

    fx.ledger.collect().unwrap();
    let second = fx.ledger.collect().unwrap();

    assert_eq!(second.objects_freed, 0);
    assert_eq!(second.bytes_freed, 0);
}

/// Self-referencing unrooted object is still garbage
#[test]
fn test_self_reference_collected() {
    let mut fx = LedgerFixture::with_defaults();
    let a = fx.alloc(10, false);
    fx.ledger.set_references(a, &[a]).unwrap();

    let report = fx.ledger.collect().unwrap();

    assert_eq!(report.objects_freed, 1);
}

/// Snapshot round-trip: rooted allocation raises live bytes by exactly
/// its classified size
#[test]
fn test_snapshot_roundtrip() {
    let mut fx = LedgerFixture::with_defaults();
    let before = fx.ledger.snapshot();

    fx.alloc(64, true);

    let after = fx.ledger.snapshot();
    assert_eq!(after.live_bytes - before.live_bytes, fx.classify(64));
    assert_eq!(
        after.total_allocated_bytes - before.total_allocated_bytes,
        fx.classify(64)
    );
}

/// Snapshots never collect: garbage stays allocated through reporting
#[test]
fn test_snapshot_does_not_collect() {
    let mut fx = LedgerFixture::with_defaults();
    fx.alloc(10, false);

    let snap = fx.ledger.snapshot();

    assert_eq!(snap.total_allocated_bytes, fx.classify(10));
    assert_eq!(snap.live_bytes, 0);
    assert_eq!(fx.ledger.graph().len(), 1, "snapshot must not sweep");
}

/// measure_delta reports growth for an operation that allocates
#[test]
fn test_measure_delta_growth() {
    let mut fx = LedgerFixture::with_defaults();
    let grew = fx
        .ledger
        .measure_delta(|ledger| {
            ledger.create(64, true)?;
            Ok(())
        })
        .unwrap();

    assert_eq!(grew, fx.classify(64) as i64);
}

/// measure_delta reports release for an operation that merely unroots
///
/// **Bug this finds:** the lazy-collection confound - without the
/// intervening collect, a dropped chain would be misreported
#[test]
fn test_measure_delta_release() {
    let mut fx = LedgerFixture::with_defaults();
    let a = fx.alloc(100, true);
    let b = fx.alloc(100, false);
    fx.ledger.set_references(a, &[b]).unwrap();

    let delta = fx
        .ledger
        .measure_delta(|ledger| ledger.set_rooted(a, false))
        .unwrap();

    assert_eq!(delta, -2 * fx.classify(100) as i64);
    assert!(fx.ledger.graph().is_empty(), "delta measurement collects");
}

/// measure_delta of a no-op is zero
#[test]
fn test_measure_delta_noop() {
    let mut fx = LedgerFixture::with_defaults();
    fx.alloc(10, true);

    let delta = fx.ledger.measure_delta(|_| Ok(())).unwrap();

    assert_eq!(delta, 0);
}

/// Stats accumulate across cycles
#[test]
fn test_stats_accumulate() {
    let mut fx = LedgerFixture::with_defaults();
    fx.alloc(10, false);
    fx.ledger.collect().unwrap();
    fx.alloc(10, false);
    fx.ledger.collect().unwrap();

    let summary = fx.ledger.stats().summary();
    assert_eq!(summary.allocations, 2);
    assert_eq!(summary.collections, 2);
    assert_eq!(summary.objects_freed, 2);
    assert_eq!(summary.bytes_freed as usize, 2 * fx.classify(10));
}
