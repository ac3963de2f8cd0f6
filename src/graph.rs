//! Graph Module - Live Object Tracking
//!
//! The ObjectGraph is the full mapping of live object ids to their
//! records, plus the aggregate byte counters derived from it. All
//! mutations are synchronous and all-or-nothing: a failing operation
//! leaves the graph and counters untouched.
//!
//! Reachability is the transitive closure of reference edges starting
//! from the rooted set. Objects that fall out of that closure stay in
//! the graph (and keep their bytes allocated) until a sweep removes
//! them; unrooting is never an eager free.

use crate::error::{LedgerError, Result};
use crate::object::{Object, ObjectId};
use crate::sizeclass::SizeClassModel;
use indexmap::{IndexMap, IndexSet};
use std::collections::VecDeque;

/// Mapping of live object ids to objects, with allocation accounting
///
/// One instance per simulation; never a process-wide singleton. The
/// caller must not mutate the graph while a collection cycle is running
/// (single logical thread of control, documented precondition).
pub struct ObjectGraph {
    /// Live objects in insertion order
    objects: IndexMap<ObjectId, Object>,
    /// Sizing model used by `create`
    model: SizeClassModel,
    /// Next fresh id, never reused
    next_id: u64,
    /// Total classified bytes currently allocated
    allocated_bytes: usize,
    /// Live object count per classified size
    per_class: IndexMap<usize, usize>,
}

impl ObjectGraph {
    /// Create an empty graph using the given sizing model
    pub fn new(model: SizeClassModel) -> Self {
        Self {
            objects: IndexMap::new(),
            model,
            next_id: 0,
            allocated_bytes: 0,
            per_class: IndexMap::new(),
        }
    }

    /// Allocate a new object and insert it with an empty reference set
    ///
    /// The payload is classified through the size-class model; the
    /// classified size is what the allocation counters track.
    ///
    /// # Errors
    /// `InvalidSize` if the payload cannot be classified.
    pub fn create(&mut self, payload_bytes: usize, rooted: bool) -> Result<ObjectId> {
        let class_bytes = self.model.classify(payload_bytes)?;

        let id = ObjectId(self.next_id);
        self.next_id += 1;

        self.objects
            .insert(id, Object::new(payload_bytes, class_bytes, rooted));
        self.allocated_bytes += class_bytes;
        *self.per_class.entry(class_bytes).or_insert(0) += 1;

        log::trace!("created {} ({} bytes as {})", id, payload_bytes, class_bytes);
        Ok(id)
    }

    /// Replace an object's outgoing reference edges
    ///
    /// # Errors
    /// `UnknownObject` if `id` or any id in `new_refs` is absent. The
    /// whole set is validated before anything is written.
    pub fn set_references(&mut self, id: ObjectId, new_refs: &[ObjectId]) -> Result<()> {
        if !self.objects.contains_key(&id) {
            return Err(LedgerError::UnknownObject { id });
        }
        for &target in new_refs {
            if !self.objects.contains_key(&target) {
                return Err(LedgerError::UnknownObject { id: target });
            }
        }

        let obj = self.objects.get_mut(&id).expect("presence checked above");
        obj.refs = new_refs.iter().copied().collect();
        Ok(())
    }

    /// Toggle an object's direct reachability
    ///
    /// Unrooting never frees anything by itself; the object's bytes stay
    /// allocated until the next sweep.
    ///
    /// # Errors
    /// `UnknownObject` if `id` is absent.
    pub fn set_rooted(&mut self, id: ObjectId, rooted: bool) -> Result<()> {
        match self.objects.get_mut(&id) {
            Some(obj) => {
                obj.rooted = rooted;
                Ok(())
            }
            None => Err(LedgerError::UnknownObject { id }),
        }
    }

    /// Compute the set of objects reachable from the rooted set plus
    /// `extra_roots`
    ///
    /// Breadth-first over outgoing edges; read-only. Reachability is
    /// reflexive (every start id is in the result) and cycle-safe via
    /// the visited set. Ids in `extra_roots` that are absent from the
    /// graph are treated as already collected and skipped.
    pub fn reachable_from(&self, extra_roots: &[ObjectId]) -> IndexSet<ObjectId> {
        let mut visited: IndexSet<ObjectId> = IndexSet::new();
        let mut queue: VecDeque<ObjectId> = VecDeque::new();

        for (&id, obj) in &self.objects {
            if obj.rooted {
                visited.insert(id);
                queue.push_back(id);
            }
        }
        for &id in extra_roots {
            if self.objects.contains_key(&id) && visited.insert(id) {
                queue.push_back(id);
            }
        }

        while let Some(id) = queue.pop_front() {
            let obj = &self.objects[&id];
            for &target in &obj.refs {
                if visited.insert(target) {
                    queue.push_back(target);
                }
            }
        }

        visited
    }

    /// Remove an object and return its bytes to the counters
    ///
    /// Collector-internal; the public surface only frees through sweeps.
    pub(crate) fn remove(&mut self, id: ObjectId) -> Option<Object> {
        let obj = self.objects.shift_remove(&id)?;
        self.allocated_bytes -= obj.class_bytes;
        if let Some(count) = self.per_class.get_mut(&obj.class_bytes) {
            *count -= 1;
            if *count == 0 {
                self.per_class.shift_remove(&obj.class_bytes);
            }
        }
        Some(obj)
    }

    /// Look up an object record
    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    /// Whether `id` is currently live in the graph
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// All live ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys().copied()
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the graph holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Total classified bytes currently allocated
    pub fn allocated_bytes(&self) -> usize {
        self.allocated_bytes
    }

    /// Live object count per classified size, in first-seen order
    pub fn per_class_counts(&self) -> &IndexMap<usize, usize> {
        &self.per_class
    }

    /// Sizing model backing this graph
    pub fn model(&self) -> &SizeClassModel {
        &self.model
    }

    /// Verify that every reference edge points at a live object
    ///
    /// Used by the collector after a sweep; a dangling edge means the
    /// sweep removed an object that something still reachable references.
    pub(crate) fn check_integrity(&self) -> Result<()> {
        for (&id, obj) in &self.objects {
            for &target in &obj.refs {
                if !self.objects.contains_key(&target) {
                    return Err(LedgerError::CorruptGraph(format!(
                        "{} references swept object {}",
                        id, target
                    )));
                }
            }
        }
        Ok(())
    }
}
