//! In-memory sink
//!
//! Collects delivered events in a buffer for inspection. Doubles as the
//! crate's test sink and as a small audit buffer.

use crate::core::error::Result;
use crate::core::event::LogEvent;
use crate::core::sink::Sink;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
    emit_count: AtomicUsize,
    flush_count: AtomicUsize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of every event delivered so far.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    /// Number of emit calls received (batches, not events).
    pub fn emit_count(&self) -> usize {
        self.emit_count.load(Ordering::SeqCst)
    }

    /// Number of flush calls received.
    pub fn flush_count(&self) -> usize {
        self.flush_count.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

#[async_trait]
impl Sink for MemorySink {
    fn emit(&self, events: &[LogEvent]) {
        self.emit_count.fetch_add(1, Ordering::SeqCst);
        self.events.lock().extend_from_slice(events);
    }

    async fn flush(&self) -> Result<()> {
        self.flush_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
