//! The validated result of a synthesis call.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A value that passed validation against its target schema.
///
/// Instances are immutable and owned solely by the caller; the synthesis loop
/// keeps no state across calls. Serialization delegates to the underlying
/// mapping, so an `Instance` serializes exactly like the JSON object it
/// carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    schema: String,
    values: Map<String, Value>,
}

impl Instance {
    pub(crate) fn new(schema: impl Into<String>, values: Map<String, Value>) -> Self {
        Self {
            schema: schema.into(),
            values,
        }
    }

    /// Name of the schema this instance conforms to.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Look up a top-level field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn into_values(self) -> Map<String, Value> {
        self.values
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Object(instance.values)
    }
}

impl Serialize for Instance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}
