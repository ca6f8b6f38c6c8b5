//! Property enrichment stage

use crate::core::event::LogEvent;
use crate::core::template::PropertyMap;
use std::sync::Arc;

/// Source of enrichment properties: either a static map merged into every
/// event, or a factory that computes properties from the event's current
/// map (e.g. conditional redaction). Only the factory's returned map is
/// merged; the argument it receives is read-only.
#[derive(Clone)]
pub enum Enricher {
    Properties(PropertyMap),
    Factory(Arc<dyn Fn(&PropertyMap) -> PropertyMap + Send + Sync>),
}

impl Enricher {
    pub fn from_fn(f: impl Fn(&PropertyMap) -> PropertyMap + Send + Sync + 'static) -> Self {
        Enricher::Factory(Arc::new(f))
    }
}

impl From<PropertyMap> for Enricher {
    fn from(properties: PropertyMap) -> Self {
        Enricher::Properties(properties)
    }
}

/// Adds or overwrites properties on every event in the batch. Existing
/// keys are never removed. Flush is a no-op.
pub struct EnrichStage {
    enricher: Enricher,
}

impl EnrichStage {
    pub fn new(enricher: Enricher) -> Self {
        Self { enricher }
    }

    pub fn emit(&self, mut events: Vec<LogEvent>) -> Vec<LogEvent> {
        for event in &mut events {
            let extra = match &self.enricher {
                Enricher::Properties(properties) => properties.clone(),
                Enricher::Factory(factory) => factory(&event.properties),
            };
            for (key, value) in extra {
                event.properties.insert(key, value);
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::LogEventLevel;
    use crate::core::template::MessageTemplate;
    use serde_json::json;

    fn event_with(key: &str, value: serde_json::Value) -> LogEvent {
        let mut properties = PropertyMap::new();
        properties.insert(key.to_string(), value);
        LogEvent::new(
            LogEventLevel::Information,
            MessageTemplate::new("test"),
            properties,
        )
    }

    #[test]
    fn test_static_enrichment_adds_properties() {
        let mut extra = PropertyMap::new();
        extra.insert("service".into(), json!("api"));
        let stage = EnrichStage::new(Enricher::from(extra));

        let out = stage.emit(vec![event_with("user", json!("alice"))]);
        assert_eq!(out[0].properties.get("user"), Some(&json!("alice")));
        assert_eq!(out[0].properties.get("service"), Some(&json!("api")));
    }

    #[test]
    fn test_static_enrichment_overwrites_existing_key() {
        let mut extra = PropertyMap::new();
        extra.insert("user".into(), json!("system"));
        let stage = EnrichStage::new(Enricher::from(extra));

        let out = stage.emit(vec![event_with("user", json!("alice"))]);
        assert_eq!(out[0].properties.get("user"), Some(&json!("system")));
        assert_eq!(out[0].properties.len(), 1);
    }

    #[test]
    fn test_factory_sees_current_properties() {
        let stage = EnrichStage::new(Enricher::from_fn(|current| {
            let mut extra = PropertyMap::new();
            if current.contains_key("secret") {
                extra.insert("secret".into(), json!("[redacted]"));
            }
            extra
        }));

        let out = stage.emit(vec![
            event_with("secret", json!("hunter2")),
            event_with("user", json!("bob")),
        ]);
        assert_eq!(out[0].properties.get("secret"), Some(&json!("[redacted]")));
        assert_eq!(out[1].properties.get("user"), Some(&json!("bob")));
        assert!(!out[1].properties.contains_key("secret"));
    }

    #[test]
    fn test_enrichment_never_removes_keys() {
        let stage = EnrichStage::new(Enricher::from_fn(|_| PropertyMap::new()));
        let out = stage.emit(vec![event_with("kept", json!(1))]);
        assert_eq!(out[0].properties.get("kept"), Some(&json!(1)));
    }
}
