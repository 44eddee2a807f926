//! Record identifier generation.
//!
//! Injected as a capability so the crawler gets fresh UUIDs while tests
//! supply deterministic sequences.

use std::sync::atomic::{AtomicU64, Ordering};

pub trait IdGen: Send + Sync {
    fn next_id(&self) -> String;
}

/// Production generator: one fresh UUID per record.
pub struct UuidGen;

impl IdGen for UuidGen {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic generator for tests: "1", "2", "3", ...
#[derive(Default)]
pub struct SequentialGen {
    counter: AtomicU64,
}

impl IdGen for SequentialGen {
    fn next_id(&self) -> String {
        (self.counter.fetch_add(1, Ordering::Relaxed) + 1).to_string()
    }
}
