//! Batching sink wrapper
//!
//! Buffers accepted events and forwards them to an inner sink in batches
//! of `max_batch_size`. Buffering is best-effort and in-process only;
//! `flush` drains the remainder and flushes the inner sink.

use crate::core::error::{LoggerError, Result};
use crate::core::event::LogEvent;
use crate::core::sink::Sink;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

pub struct BatchedSink {
    inner: Arc<dyn Sink>,
    max_batch_size: usize,
    queue: Mutex<Vec<LogEvent>>,
}

impl std::fmt::Debug for BatchedSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchedSink")
            .field("max_batch_size", &self.max_batch_size)
            .finish_non_exhaustive()
    }
}

impl BatchedSink {
    pub fn new(inner: Arc<dyn Sink>) -> Self {
        Self {
            inner,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            queue: Mutex::new(Vec::new()),
        }
    }

    /// Sets the batch size threshold. Zero is a misconfiguration and
    /// fails fast.
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Result<Self> {
        if max_batch_size == 0 {
            return Err(LoggerError::invalid_argument(
                "BatchedSink",
                "max_batch_size must be non-zero",
            ));
        }
        self.max_batch_size = max_batch_size;
        Ok(self)
    }

    /// Events currently buffered and not yet forwarded.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }
}

#[async_trait]
impl Sink for BatchedSink {
    fn emit(&self, events: &[LogEvent]) {
        let mut queue = self.queue.lock();
        queue.extend_from_slice(events);
        while queue.len() >= self.max_batch_size {
            let batch: Vec<LogEvent> = queue.drain(..self.max_batch_size).collect();
            self.inner.emit(&batch);
        }
    }

    async fn flush(&self) -> Result<()> {
        let remainder: Vec<LogEvent> = {
            let mut queue = self.queue.lock();
            queue.drain(..).collect()
        };
        if !remainder.is_empty() {
            self.inner.emit(&remainder);
        }
        self.inner.flush().await
    }

    fn name(&self) -> &str {
        "batched"
    }
}
