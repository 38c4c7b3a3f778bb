//! Event-storming vocabulary schema for reactive domain-driven design.
//!
//! One flat schema of fourteen classname lists, each requiring at least three
//! entries. The field descriptions double as few-shot examples for the
//! generator, so they are kept verbatim from the source model.

use incant_core::{Field, FieldType, Schema};

pub const EVENT_STORMING_MODEL: &str = "EventStormingDomainSpecificationModel";

/// The event-storming schema family (a single root schema).
pub fn schemas() -> Vec<Schema> {
    vec![model()]
}

fn classname_list(name: &str, description: &str) -> Field {
    Field::new(name, FieldType::List(Box::new(FieldType::String)))
        .with_description(description)
        .with_min_items(3)
}

fn model() -> Schema {
    Schema::new(EVENT_STORMING_MODEL)
        .with_doc(
            "Integrates Event Storming with RDDDY and DFLSS to capture and analyze domain \
             complexities through events, commands, and queries, using Hoare logic for \
             correctness. CamelCase only.",
        )
        .with_field(classname_list(
            "domain_event_classnames",
            "List of domain event names triggering system reactions. Examples: 'OrderPlaced', \
             'PaymentProcessed', 'InventoryUpdated'.",
        ))
        .with_field(classname_list(
            "external_event_classnames",
            "List of external event names that originate from outside the system but affect its \
             behavior. Examples: 'WeatherChanged', 'ExternalSystemUpdated', 'RegulationAmended'.",
        ))
        .with_field(classname_list(
            "command_classnames",
            "List of command names driving state transitions. Examples: 'CreateOrder', \
             'ProcessPayment', 'UpdateInventory'.",
        ))
        .with_field(classname_list(
            "query_classnames",
            "List of query names for information retrieval without altering the system state. \
             Examples: 'GetOrderDetails', 'ListAvailableProducts', 'CheckCustomerCredit'.",
        ))
        .with_field(classname_list(
            "aggregate_classnames",
            "List of aggregate names, clusters of domain objects treated as a single unit. \
             Examples: 'OrderAggregate', 'CustomerAggregate', 'ProductAggregate'.",
        ))
        .with_field(classname_list(
            "policy_classnames",
            "List of policy names governing system behavior. Examples: 'OrderFulfillmentPolicy', \
             'ReturnPolicy', 'DiscountPolicy'.",
        ))
        .with_field(classname_list(
            "read_model_classnames",
            "List of read model names optimized for querying. Examples: 'OrderSummaryReadModel', \
             'ProductCatalogReadModel', 'CustomerProfileReadModel'.",
        ))
        .with_field(classname_list(
            "view_classnames",
            "List of view names representing user interface components. Examples: \
             'OrderDetailsView', 'ProductListView', 'CustomerDashboardView'.",
        ))
        .with_field(classname_list(
            "ui_event_classnames",
            "List of UI event names triggered by user interactions. Examples: 'ButtonClick', \
             'FormSubmitted', 'PageLoaded'.",
        ))
        .with_field(classname_list(
            "saga_classnames",
            "List of saga names representing long-running processes. Examples: \
             'OrderProcessingSaga', 'CustomerOnboardingSaga', 'InventoryRestockSaga'.",
        ))
        .with_field(classname_list(
            "integration_event_classnames",
            "List of integration event names exchanged between different parts of a distributed \
             system. Examples: 'OrderCreatedIntegrationEvent', 'PaymentConfirmedIntegrationEvent', \
             'InventoryCheckIntegrationEvent'.",
        ))
        .with_field(classname_list(
            "exception_classnames",
            "List of exception names representing error conditions. Examples: \
             'OrderNotFoundException', 'PaymentFailedException', 'InventoryShortageException'.",
        ))
        .with_field(classname_list(
            "value_object_classnames",
            "List of immutable value object names within the domain model. Examples: \
             'AddressValueObject', 'MoneyValueObject', 'QuantityValueObject'.",
        ))
        .with_field(classname_list(
            "task_classnames",
            "List of task names needed to complete a process or workflow. Examples: \
             'ValidateOrderTask', 'AllocateInventoryTask', 'NotifyCustomerTask'.",
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use incant_core::{SchemaRegistry, validate::validate};
    use serde_json::{Map, Value, json};

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry.register_all(schemas()).unwrap();
        registry
    }

    fn full_mapping() -> Map<String, Value> {
        let mut map = Map::new();
        for field in &model().fields {
            map.insert(field.name.clone(), json!(["AlphaA", "BravoB", "CharlieC"]));
        }
        map
    }

    #[test]
    fn all_fourteen_lists_are_required() {
        assert_eq!(model().fields.len(), 14);

        let registry = registry();
        assert!(validate(&registry, EVENT_STORMING_MODEL, &full_mapping()).is_ok());

        let mut missing = full_mapping();
        missing.remove("saga_classnames");
        let err = validate(&registry, EVENT_STORMING_MODEL, &missing).unwrap_err();
        assert_eq!(err.path, "$.saga_classnames");
    }

    #[test]
    fn short_lists_are_rejected() {
        let mut map = full_mapping();
        map.insert("command_classnames".into(), json!(["CreateOrder"]));
        let err = validate(&registry(), EVENT_STORMING_MODEL, &map).unwrap_err();
        assert!(err.message.contains("at least 3 items"));
    }
}
