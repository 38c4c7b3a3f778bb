//! Explicit schema declarations.
//!
//! A [`Schema`] is a named, ordered set of [`Field`]s. Schemas reference each
//! other **by name** through [`FieldType::Nested`] and [`FieldType::List`],
//! resolved at use-time through the [`crate::registry::SchemaRegistry`].
//! Nothing here reflects over live Rust types: a schema is plain data,
//! declared once at startup (or loaded from YAML/JSON via the serde derives)
//! and immutable afterwards.
//!
//! ```rust
//! use incant_core::schema::{Field, FieldType, Schema};
//!
//! let widget = Schema::new("Widget")
//!     .with_doc("A thing on a shelf.")
//!     .with_field(Field::new("name", FieldType::String).with_description("Display name."))
//!     .with_field(Field::new("count", FieldType::Integer));
//!
//! assert_eq!(widget.fields.len(), 2);
//! ```

use std::fmt::{self, Display, Write as _};

use serde::de::{self, MapAccess};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Declared type of a single field.
///
/// Serialized as a plain scalar for primitives (`string`, `integer`, `float`,
/// `boolean`) and as a single-key map for compound types (`list: <type>`,
/// `enum: [..]`, `nested: <SchemaName>`), so declarations stay readable in
/// YAML and JSON alike.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    /// A string restricted to a fixed set of values.
    Enum(Vec<String>),
    /// A value conforming to the named schema.
    Nested(String),
    /// A list whose elements all share one declared type.
    List(Box<FieldType>),
}

impl FieldType {
    /// Convenience constructor for `List(Nested(name))`, the most common
    /// compound shape.
    pub fn list_of(schema: impl Into<String>) -> Self {
        FieldType::List(Box::new(FieldType::Nested(schema.into())))
    }

    /// Append every schema name this type refers to, in declaration order.
    pub(crate) fn collect_schema_refs<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            FieldType::Nested(name) => out.push(name),
            FieldType::List(inner) => inner.collect_schema_refs(out),
            _ => {}
        }
    }
}

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldType::String => serializer.serialize_str("string"),
            FieldType::Integer => serializer.serialize_str("integer"),
            FieldType::Float => serializer.serialize_str("float"),
            FieldType::Boolean => serializer.serialize_str("boolean"),
            FieldType::Enum(values) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("enum", values)?;
                map.end()
            }
            FieldType::Nested(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("nested", name)?;
                map.end()
            }
            FieldType::List(inner) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("list", inner)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldTypeVisitor;

        impl<'de> de::Visitor<'de> for FieldTypeVisitor {
            type Value = FieldType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(
                    "a primitive type name or a single-key `list`/`enum`/`nested` map",
                )
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<FieldType, E>
            where
                E: de::Error,
            {
                match value {
                    "string" => Ok(FieldType::String),
                    "integer" => Ok(FieldType::Integer),
                    "float" => Ok(FieldType::Float),
                    "boolean" => Ok(FieldType::Boolean),
                    other => Err(E::unknown_variant(
                        other,
                        &["string", "integer", "float", "boolean"],
                    )),
                }
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<FieldType, A::Error>
            where
                A: MapAccess<'de>,
            {
                let Some(key) = map.next_key::<String>()? else {
                    return Err(de::Error::custom("empty map is not a field type"));
                };
                let ty = match key.as_str() {
                    "enum" => FieldType::Enum(map.next_value()?),
                    "nested" => FieldType::Nested(map.next_value()?),
                    "list" => FieldType::List(map.next_value()?),
                    other => {
                        return Err(de::Error::unknown_variant(
                            other,
                            &["list", "enum", "nested"],
                        ));
                    }
                };
                if map.next_key::<String>()?.is_some() {
                    return Err(de::Error::custom("field type maps carry exactly one key"));
                }
                Ok(ty)
            }
        }

        deserializer.deserialize_any(FieldTypeVisitor)
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Integer => write!(f, "integer"),
            FieldType::Float => write!(f, "float"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Enum(values) => {
                write!(f, "one of ")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "'{value}'")?;
                }
                Ok(())
            }
            FieldType::Nested(name) => write!(f, "{name}"),
            FieldType::List(inner) => write!(f, "list of {inner}"),
        }
    }
}

/// A single named, typed, described field of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_required")]
    pub required: bool,
    /// Materialized when the candidate omits the field. Implies optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Minimum element count for list-typed fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
}

fn default_required() -> bool {
    true
}

impl Field {
    /// A required field with no description.
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            description: None,
            required: true,
            default: None,
            min_items: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set a default value; the field becomes optional.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self.required = false;
        self
    }

    pub fn with_min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    /// One deterministic description line, consumed by the introspector.
    pub(crate) fn render_line(&self) -> String {
        let mut line = format!("`{}` ({}", self.name, self.ty);
        if self.required {
            line.push_str(", required)");
        } else {
            line.push_str(", optional)");
        }
        if let Some(description) = &self.description {
            line.push_str(": ");
            line.push_str(description);
        }
        if let Some(default) = &self.default {
            write!(line, " [default: {default}]").expect("failed to write buffer");
        }
        if let Some(min) = self.min_items {
            write!(line, " [at least {min} items]").expect("failed to write buffer");
        }
        line
    }
}

/// A named, ordered set of fields, optionally extending a base schema.
///
/// The effective field list of a schema is its base chain's fields (outermost
/// base first) followed by its own, matching the inheritance semantics of the
/// model classes these declarations replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    /// Schema-level description injected into generation requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Name of the base schema whose fields this one inherits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            extends: None,
            fields: Vec::new(),
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.extends = Some(base.into());
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SchemaRegistry;

    #[test]
    fn field_type_display_is_stable() {
        assert_eq!(FieldType::String.to_string(), "string");
        assert_eq!(FieldType::list_of("Task").to_string(), "list of Task");
        assert_eq!(
            FieldType::Enum(vec!["done".into(), "active".into()]).to_string(),
            "one of 'done' | 'active'"
        );
    }

    #[test]
    fn default_implies_optional() {
        let field = Field::new("excludes", FieldType::String)
            .with_default(Value::String("weekends".into()));
        assert!(!field.required);
        assert_eq!(field.default, Some(Value::String("weekends".into())));
    }

    #[test]
    fn schemas_load_from_yaml() {
        let yaml = r#"
- name: Widget
  doc: A thing on a shelf.
  fields:
    - name: name
      type: string
      description: Display name.
    - name: tags
      type:
        list: string
      required: false
    - name: status
      type:
        enum: [new, used]
      required: false
"#;
        let schemas: Vec<Schema> = serde_yaml::from_str(yaml).unwrap();
        let mut registry = SchemaRegistry::new();
        registry.register_all(schemas).unwrap();

        let description = registry.describe("Widget").unwrap();
        assert!(description.contains("`tags` (list of string, optional)"));
        assert!(description.contains("one of 'new' | 'used'"));
    }

    #[test]
    fn schema_yaml_round_trips() {
        let schema = Schema::new("Widget")
            .with_field(Field::new("count", FieldType::Integer))
            .with_field(
                Field::new("tags", FieldType::List(Box::new(FieldType::String)))
                    .with_min_items(3),
            )
            .with_field(
                Field::new("condition", FieldType::Enum(vec!["new".into(), "used".into()]))
                    .optional(),
            )
            .with_field(Field::new("parts", FieldType::list_of("Part")).optional());
        let yaml = serde_yaml::to_string(&schema).unwrap();
        let back: Schema = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(schema, back);
    }

    #[test]
    fn compound_types_use_single_key_maps() {
        let yaml = serde_yaml::to_string(&FieldType::list_of("Task")).unwrap();
        assert_eq!(yaml.trim(), "list:\n  nested: Task");
        assert_eq!(
            serde_yaml::to_string(&FieldType::Boolean).unwrap().trim(),
            "boolean"
        );

        let err = serde_yaml::from_str::<FieldType>("tuple: [string]").unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }
}
