//! Report Module - Usage Snapshots
//!
//! Read-only aggregation over the graph: total allocated bytes, bytes
//! reachable from the rooted set, and live-object counts per size class.
//! Taking a snapshot never triggers a collection; measuring must not
//! change what is measured.

use crate::graph::ObjectGraph;
use serde::Serialize;

/// Live-object count for one size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassCount {
    /// Classified allocation size in bytes
    pub class_bytes: usize,
    /// Objects of that size currently in the graph
    pub count: usize,
}

/// Point-in-time usage measurement
///
/// `live_bytes` can be below `total_allocated_bytes` when unreachable
/// objects are still awaiting a sweep; the gap is exactly the garbage a
/// collection would reclaim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageSnapshot {
    /// Classified bytes of every object in the graph, reachable or not
    pub total_allocated_bytes: usize,
    /// Classified bytes of objects reachable from the rooted set
    pub live_bytes: usize,
    /// Per-size-class object counts, ascending by class size
    pub per_class_counts: Vec<ClassCount>,
}

/// Take a usage snapshot of the graph
///
/// Computes reachability over current graph state only; no sweep runs as
/// a side effect of reporting.
pub fn snapshot(graph: &ObjectGraph) -> UsageSnapshot {
    let live = graph.reachable_from(&[]);
    let live_bytes = live
        .iter()
        .filter_map(|&id| graph.get(id))
        .map(|obj| obj.class_bytes)
        .sum();

    let mut per_class_counts: Vec<ClassCount> = graph
        .per_class_counts()
        .iter()
        .map(|(&class_bytes, &count)| ClassCount { class_bytes, count })
        .collect();
    per_class_counts.sort_by_key(|c| c.class_bytes);

    UsageSnapshot {
        total_allocated_bytes: graph.allocated_bytes(),
        live_bytes,
        per_class_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::sizeclass::SizeClassModel;

    fn graph() -> ObjectGraph {
        ObjectGraph::new(SizeClassModel::new(&LedgerConfig::default()))
    }

    #[test]
    fn test_snapshot_of_empty_graph() {
        let snap = snapshot(&graph());
        assert_eq!(snap.total_allocated_bytes, 0);
        assert_eq!(snap.live_bytes, 0);
        assert!(snap.per_class_counts.is_empty());
    }

    #[test]
    fn test_live_bytes_excludes_garbage() {
        let mut g = graph();
        g.create(10, true).unwrap(); // 32 bytes, live
        g.create(10, false).unwrap(); // 32 bytes, garbage

        let snap = snapshot(&g);
        assert_eq!(snap.total_allocated_bytes, 64);
        assert_eq!(snap.live_bytes, 32);
    }

    #[test]
    fn test_per_class_counts_sorted() {
        let mut g = graph();
        g.create(100, true).unwrap(); // class 128
        g.create(0, true).unwrap(); // class 16
        g.create(0, true).unwrap();

        let snap = snapshot(&g);
        assert_eq!(
            snap.per_class_counts,
            vec![
                ClassCount {
                    class_bytes: 16,
                    count: 2
                },
                ClassCount {
                    class_bytes: 128,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut g = graph();
        g.create(10, true).unwrap();
        let json = serde_json::to_string(&snapshot(&g)).unwrap();
        assert!(json.contains("\"live_bytes\":32"));
    }
}
