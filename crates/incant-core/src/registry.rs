//! Name-keyed store of schema declarations.
//!
//! The registry is the single lookup point for schema references: nested
//! fields, list elements and `extends` clauses all carry schema **names** and
//! are resolved here. Registering the same name twice is rejected on the spot,
//! so a malformed configuration surfaces at startup rather than mid-request.

use std::collections::BTreeMap;

use crate::{
    describe,
    error::SchemaDescriptionError,
    schema::{Field, Schema},
};

/// Immutable-after-setup collection of [`Schema`]s, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one schema.
    ///
    /// # Errors
    ///
    /// [`SchemaDescriptionError::DuplicateSchema`] if a schema with the same
    /// name is already present.
    pub fn register(&mut self, schema: Schema) -> Result<(), SchemaDescriptionError> {
        if self.schemas.contains_key(&schema.name) {
            return Err(SchemaDescriptionError::DuplicateSchema(schema.name));
        }
        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Add every schema of an iterator, stopping at the first duplicate.
    pub fn register_all(
        &mut self,
        schemas: impl IntoIterator<Item = Schema>,
    ) -> Result<(), SchemaDescriptionError> {
        for schema in schemas {
            self.register(schema)?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Iterate registered schema names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Render the named schema and everything it transitively references.
    /// See [`crate::describe::describe`].
    pub fn describe(&self, name: &str) -> Result<String, SchemaDescriptionError> {
        describe::describe(self, name)
    }

    /// Effective fields of a schema: base-chain fields first (outermost base
    /// leading), then the schema's own, in declaration order.
    ///
    /// A cyclic `extends` chain is broken by skipping already-visited names,
    /// mirroring the cycle handling of the introspector.
    pub(crate) fn effective_fields<'a>(&'a self, schema: &'a Schema) -> Vec<&'a Field> {
        let mut chain = Vec::new();
        let mut visited = Vec::new();
        let mut current = Some(schema);
        while let Some(schema) = current {
            if visited.contains(&schema.name.as_str()) {
                break;
            }
            visited.push(schema.name.as_str());
            chain.push(schema);
            current = schema.extends.as_deref().and_then(|base| self.get(base));
        }

        chain
            .iter()
            .rev()
            .flat_map(|schema| schema.fields.iter())
            .collect()
    }
}
