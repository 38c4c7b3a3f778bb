//! Closed-world validation of a parsed candidate mapping against a schema.
//!
//! Validation is all-or-nothing: either every field checks out and a complete
//! [`Instance`] is returned, or a [`CandidateValidationError`] pinpoints the
//! first offending field by path. Unknown keys are always rejected, field
//! order in the mapping is irrelevant, and optional fields with a declared
//! default are materialized when absent.

use serde_json::{Map, Value};

use crate::{
    error::CandidateValidationError,
    instance::Instance,
    registry::SchemaRegistry,
    schema::{Field, FieldType},
};

/// Validate `mapping` against the named schema and produce an [`Instance`].
pub fn validate(
    registry: &SchemaRegistry,
    schema: &str,
    mapping: &Map<String, Value>,
) -> Result<Instance, CandidateValidationError> {
    let values = validate_object(registry, schema, mapping, "$")?;
    Ok(Instance::new(schema, values))
}

fn validate_object(
    registry: &SchemaRegistry,
    schema_name: &str,
    mapping: &Map<String, Value>,
    path: &str,
) -> Result<Map<String, Value>, CandidateValidationError> {
    let schema = registry.get(schema_name).ok_or_else(|| {
        CandidateValidationError::new(path, format!("schema `{schema_name}` is not registered"))
    })?;
    let fields = registry.effective_fields(schema);

    for key in mapping.keys() {
        if !fields.iter().any(|field| field.name == *key) {
            return Err(CandidateValidationError::new(
                format!("{path}.{key}"),
                format!("unknown field `{key}` for schema `{schema_name}`"),
            ));
        }
    }

    let mut out = Map::new();
    for field in fields {
        let field_path = format!("{path}.{}", field.name);
        match mapping.get(&field.name) {
            Some(value) => {
                check_min_items(field, value, &field_path)?;
                let validated = validate_value(registry, &field.ty, value, &field_path)?;
                out.insert(field.name.clone(), validated);
            }
            None if field.default.is_some() => {
                out.insert(field.name.clone(), field.default.clone().unwrap());
            }
            None if field.required => {
                return Err(CandidateValidationError::new(
                    field_path,
                    "required field is missing",
                ));
            }
            None => {}
        }
    }
    Ok(out)
}

fn check_min_items(
    field: &Field,
    value: &Value,
    path: &str,
) -> Result<(), CandidateValidationError> {
    let Some(min) = field.min_items else {
        return Ok(());
    };
    if let Some(items) = value.as_array() {
        if items.len() < min {
            return Err(CandidateValidationError::new(
                path,
                format!("expected at least {min} items, got {}", items.len()),
            ));
        }
    }
    Ok(())
}

fn validate_value(
    registry: &SchemaRegistry,
    ty: &FieldType,
    value: &Value,
    path: &str,
) -> Result<Value, CandidateValidationError> {
    match ty {
        FieldType::String => match value.as_str() {
            Some(_) => Ok(value.clone()),
            None => Err(type_error(path, "string", value)),
        },
        FieldType::Integer => match value.as_i64() {
            Some(_) => Ok(value.clone()),
            None => Err(type_error(path, "integer", value)),
        },
        FieldType::Float => match value.as_f64() {
            // Integer literals are acceptable where a float is expected.
            Some(_) => Ok(value.clone()),
            None => Err(type_error(path, "float", value)),
        },
        FieldType::Boolean => match value.as_bool() {
            Some(_) => Ok(value.clone()),
            None => Err(type_error(path, "boolean", value)),
        },
        FieldType::Enum(allowed) => {
            let Some(text) = value.as_str() else {
                return Err(type_error(path, "string", value));
            };
            if allowed.iter().any(|candidate| candidate == text) {
                Ok(value.clone())
            } else {
                Err(CandidateValidationError::new(
                    path,
                    format!("`{text}` is not one of {}", allowed.join(", ")),
                ))
            }
        }
        FieldType::Nested(schema) => {
            let Some(object) = value.as_object() else {
                return Err(type_error(path, "mapping", value));
            };
            validate_object(registry, schema, object, path).map(Value::Object)
        }
        FieldType::List(inner) => {
            let Some(items) = value.as_array() else {
                return Err(type_error(path, "list", value));
            };
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                out.push(validate_value(
                    registry,
                    inner,
                    item,
                    &format!("{path}[{index}]"),
                )?);
            }
            Ok(Value::Array(out))
        }
    }
}

fn type_error(path: &str, expected: &str, value: &Value) -> CandidateValidationError {
    CandidateValidationError::new(
        path,
        format!("expected {expected}, got {}", kind_name(value)),
    )
}

/// Human-readable name for a value's shape, shared with the literal parser.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
