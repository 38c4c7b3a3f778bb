//! Ready-made schema declarations for the *incant* synthesis loop.
//!
//! Each module declares one family of process-model schemas as plain
//! [`incant_core::Schema`] values:
//!
//! | Module          | Schemas                                              |
//! |-----------------|------------------------------------------------------|
//! | [`gantt`]       | `GanttTask`, `GanttSection`, `GanttChart`            |
//! | [`bpmn`]        | `BpmnFlow`, `BpmnTask`, `BpmnProcess`, `Bpmn`        |
//! | [`event_storm`] | `EventStormingDomainSpecificationModel`              |
//!
//! Use a single family:
//!
//! ```rust
//! use incant_core::SchemaRegistry;
//!
//! let mut registry = SchemaRegistry::new();
//! registry.register_all(incant_types::gantt::schemas()).unwrap();
//! assert!(registry.describe(incant_types::gantt::GANTT_CHART).is_ok());
//! ```
//!
//! Or everything at once via [`registry`].

pub mod bpmn;
pub mod event_storm;
pub mod gantt;

use incant_core::{SchemaRegistry, error::SchemaDescriptionError};

/// A registry holding every schema family of this crate.
pub fn registry() -> Result<SchemaRegistry, SchemaDescriptionError> {
    let mut registry = SchemaRegistry::new();
    registry.register_all(gantt::schemas())?;
    registry.register_all(bpmn::schemas())?;
    registry.register_all(event_storm::schemas())?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_registry_has_no_name_collisions() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn every_root_schema_describes_cleanly() {
        let registry = registry().unwrap();
        for root in [
            gantt::GANTT_CHART,
            bpmn::BPMN,
            event_storm::EVENT_STORMING_MODEL,
        ] {
            registry.describe(root).unwrap();
        }
    }
}
