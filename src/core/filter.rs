//! Predicate filter stage

use crate::core::event::LogEvent;

pub type FilterPredicate = Box<dyn Fn(&LogEvent) -> bool + Send + Sync>;

/// Keeps the sub-sequence of a batch for which the predicate holds,
/// preserving relative order. Flush is a no-op.
pub struct FilterStage {
    predicate: FilterPredicate,
}

impl FilterStage {
    pub fn new(predicate: impl Fn(&LogEvent) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }

    pub fn emit(&self, events: Vec<LogEvent>) -> Vec<LogEvent> {
        events
            .into_iter()
            .filter(|event| (self.predicate)(event))
            .collect()
    }
}
