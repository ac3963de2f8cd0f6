//! Object Module - Tracked Object Records
//!
//! Every tracked object carries the metadata the collector needs:
//! its classified size for byte accounting, its outgoing references for
//! reachability, and a rooted flag marking direct reachability from the
//! active scope.

use indexmap::IndexSet;
use serde::Serialize;

/// Opaque identity of a tracked object
///
/// Ids are unique per graph and never reused, so a stale id held after
/// collection fails with `UnknownObject` instead of silently aliasing a
/// newer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ObjectId(pub(crate) u64);

impl ObjectId {
    /// Raw id value, for display and embedder bookkeeping
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A tracked object record
///
/// The graph is the single source of truth for reachability: any
/// "capturing" construct in an embedding language must be translated into
/// an explicit reference edge here at the point of capture.
#[derive(Debug, Clone)]
pub struct Object {
    /// Requested payload size in bytes (pre-rounding)
    pub payload_bytes: usize,
    /// Classified allocation size in bytes (payload + header, rounded)
    pub class_bytes: usize,
    /// Outgoing reference edges
    pub refs: IndexSet<ObjectId>,
    /// Directly reachable from the active scope
    pub rooted: bool,
}

impl Object {
    pub(crate) fn new(payload_bytes: usize, class_bytes: usize, rooted: bool) -> Self {
        Self {
            payload_bytes,
            class_bytes,
            refs: IndexSet::new(),
            rooted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_display() {
        assert_eq!(ObjectId(7).to_string(), "#7");
    }

    #[test]
    fn test_new_object_has_no_edges() {
        let obj = Object::new(10, 32, true);
        assert!(obj.refs.is_empty());
        assert!(obj.rooted);
        assert_eq!(obj.class_bytes, 32);
    }
}
