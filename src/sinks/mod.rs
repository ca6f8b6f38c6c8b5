//! Sink implementations

#[cfg(feature = "console")]
pub mod console;

pub mod batched;
pub mod memory;

#[cfg(feature = "console")]
pub use console::ConsoleSink;

pub use batched::BatchedSink;
pub use memory::MemorySink;

// Re-export the capability trait alongside its implementations
pub use crate::core::Sink;
