//! Size Class Module - Allocation Size Rounding
//!
//! Maps a requested payload size to the rounded allocation size a pooling
//! allocator would actually hand out: the smallest fixed size class that
//! fits payload plus header, or an aligned large-object size when the
//! request exceeds the largest class.
//!
//! ## Size Classes
//!
//! - Small: payload + header fits a table entry (pooled allocation)
//! - Large: payload + header exceeds the largest entry (rounded up to the
//!   configured alignment)

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};

/// Pure sizing model shared by the graph and the ledger facade
///
/// Cheap to clone; holds only the class table and two constants.
/// `classify` is deterministic and has no side effects.
#[derive(Debug, Clone)]
pub struct SizeClassModel {
    /// Ordered size-class table
    classes: Vec<usize>,
    /// Fixed per-object header overhead in bytes
    header_size: usize,
    /// Large-object alignment in bytes (power of two)
    alignment: usize,
}

impl SizeClassModel {
    /// Build a model from a validated configuration
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            classes: config.size_classes.clone(),
            header_size: config.header_size,
            alignment: config.alignment,
        }
    }

    /// Classify a payload size into its allocated size
    ///
    /// Binary search over the ordered table for the smallest class that
    /// holds payload + header; falls back to alignment rounding for
    /// large objects.
    ///
    /// # Errors
    /// `InvalidSize` if payload + header overflows `usize`.
    ///
    /// # Examples
    /// ```rust
    /// use alloc_ledger::{LedgerConfig, SizeClassModel};
    ///
    /// let model = SizeClassModel::new(&LedgerConfig::default());
    /// // 10 byte payload + 16 byte header = 26, smallest class >= 26 is 32
    /// assert_eq!(model.classify(10).unwrap(), 32);
    /// ```
    pub fn classify(&self, payload_bytes: usize) -> Result<usize> {
        let total = payload_bytes.checked_add(self.header_size).ok_or_else(|| {
            LedgerError::InvalidSize(format!(
                "payload {} bytes overflows with {} byte header",
                payload_bytes, self.header_size
            ))
        })?;

        // partition_point returns the index of the first class >= total
        let idx = self.classes.partition_point(|&class| class < total);
        if idx < self.classes.len() {
            return Ok(self.classes[idx]);
        }

        align_up(total, self.alignment).ok_or_else(|| {
            LedgerError::InvalidSize(format!(
                "large object of {} bytes overflows alignment rounding",
                total
            ))
        })
    }

    /// Fixed per-object header overhead in bytes
    pub fn header_size(&self) -> usize {
        self.header_size
    }

    /// Largest pooled size class
    pub fn largest_class(&self) -> usize {
        *self.classes.last().expect("validated non-empty")
    }
}

/// Align value up to boundary, None on overflow
///
/// `alignment` must be a power of two (enforced by config validation).
fn align_up(value: usize, alignment: usize) -> Option<usize> {
    let mask = alignment - 1;
    value.checked_add(mask).map(|v| v & !mask)
}
