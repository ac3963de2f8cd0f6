//! Shared test fixtures for ledger integration tests

use alloc_ledger::{Ledger, LedgerConfig, ObjectId};

/// Test fixture wrapping a ledger with convenience helpers
pub struct LedgerFixture {
    pub ledger: Ledger,
}

impl LedgerFixture {
    /// Fixture with default configuration (64MB capacity)
    pub fn with_defaults() -> Self {
        Self {
            ledger: Ledger::with_defaults(),
        }
    }

    /// Fixture with a small capacity, for exhaustion scenarios
    pub fn with_capacity(heap_capacity: usize) -> Self {
        let config = LedgerConfig {
            heap_capacity,
            ..Default::default()
        };
        Self {
            ledger: Ledger::new(config).expect("test configuration is valid"),
        }
    }

    /// Allocate or panic; for test setup where allocation must succeed
    pub fn alloc(&mut self, payload_bytes: usize, rooted: bool) -> ObjectId {
        self.ledger
            .create(payload_bytes, rooted)
            .expect("allocation failed during test setup")
    }

    /// Classified size for a payload, for byte-exact assertions
    pub fn classify(&self, payload_bytes: usize) -> usize {
        self.ledger
            .model()
            .classify(payload_bytes)
            .expect("classification failed during test setup")
    }
}
