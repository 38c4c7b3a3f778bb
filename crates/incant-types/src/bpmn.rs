//! BPMN process model schemas.
//!
//! The original model's free-form per-task `properties` dictionary is not
//! expressible in the restricted field type set and is omitted.

use incant_core::{Field, FieldType, Schema};

pub const BPMN_FLOW: &str = "BpmnFlow";
pub const BPMN_TASK: &str = "BpmnTask";
pub const BPMN_PROCESS: &str = "BpmnProcess";
pub const BPMN: &str = "Bpmn";

/// The BPMN schema family, root last.
pub fn schemas() -> Vec<Schema> {
    vec![flow(), task(), process(), bpmn()]
}

fn flow() -> Schema {
    Schema::new(BPMN_FLOW)
        .with_doc(
            "A flow within a BPMN process, defining the sequence or message flow between elements.",
        )
        .with_field(
            Field::new("id", FieldType::String)
                .with_description("The unique identifier for the flow."),
        )
        .with_field(
            Field::new("source_ref", FieldType::String)
                .with_description("The source element of the flow."),
        )
        .with_field(
            Field::new("target_ref", FieldType::String)
                .with_description("The target element the flow points to."),
        )
        .with_field(
            Field::new("condition", FieldType::String)
                .optional()
                .with_description("The condition that determines whether the flow is taken."),
        )
}

fn task() -> Schema {
    Schema::new(BPMN_TASK)
        .with_doc("A task within a BPMN process. A task is a unit of work within a process.")
        .with_field(
            Field::new("id", FieldType::String)
                .with_description("The unique identifier for the task."),
        )
        .with_field(Field::new("name", FieldType::String).with_description("The name of the task."))
        .with_field(
            Field::new("type", FieldType::String)
                .with_description("The type of the task, e.g., 'serviceTask', 'userTask'."),
        )
}

fn process() -> Schema {
    Schema::new(BPMN_PROCESS)
        .with_doc(
            "A BPMN process, a collection of tasks and flows that define the workflow.",
        )
        .with_field(
            Field::new("id", FieldType::String)
                .with_description("The unique identifier for the process."),
        )
        .with_field(
            Field::new("name", FieldType::String).with_description("The name of the process."),
        )
        .with_field(
            Field::new("tasks", FieldType::list_of(BPMN_TASK))
                .with_description("A list of tasks within the process."),
        )
        .with_field(
            Field::new("flows", FieldType::list_of(BPMN_FLOW)).with_description(
                "A list of flows that define the sequence and message flows within the process.",
            ),
        )
}

fn bpmn() -> Schema {
    Schema::new(BPMN)
        .with_doc("A BPMN model, which may contain one or more processes.")
        .with_field(
            Field::new("processes", FieldType::list_of(BPMN_PROCESS))
                .with_description("A list of processes defined in the BPMN model."),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use incant_core::{SchemaRegistry, literal::parse_mapping, validate::validate};

    #[test]
    fn a_minimal_model_validates() {
        let mut registry = SchemaRegistry::new();
        registry.register_all(schemas()).unwrap();

        let candidate = "{'processes': [{'id': 'p1', 'name': 'Shipping', 'tasks': [{'id': 't1', 'name': 'Print label', 'type': 'serviceTask'}], 'flows': [{'id': 'f1', 'source_ref': 't1', 'target_ref': 't2'}]}]}";
        let mapping = parse_mapping(candidate).unwrap();
        assert!(validate(&registry, BPMN, &mapping).is_ok());
    }

    #[test]
    fn flow_condition_is_optional_but_typed() {
        let mut registry = SchemaRegistry::new();
        registry.register_all(schemas()).unwrap();

        let candidate =
            "{'processes': [{'id': 'p1', 'name': 'S', 'tasks': [], 'flows': [{'id': 'f1', 'source_ref': 'a', 'target_ref': 'b', 'condition': 7}]}]}";
        let mapping = parse_mapping(candidate).unwrap();
        let err = validate(&registry, BPMN, &mapping).unwrap_err();
        assert_eq!(err.path, "$.processes[0].flows[0].condition");
    }
}
