//! Schema introspection: render a schema graph as deterministic text.
//!
//! The output is injected verbatim into generation requests, so it must be
//! byte-identical across calls for the same registry. Rendering walks the
//! graph depth-first in declaration order:
//!
//! * the base (`extends`) schema is rendered before the schema that extends
//!   it,
//! * schemas referenced by nested or list-element fields are appended after
//!   the referencing schema's own section,
//! * every schema appears exactly once; a visited set of names breaks cycles.
//!
//! Introspection over a well-formed graph cannot fail. A dangling reference is
//! a configuration error and is reported immediately as
//! [`SchemaDescriptionError`].

use std::collections::BTreeSet;

use incant_prompt::MarkdownBuilder;

use crate::{error::SchemaDescriptionError, registry::SchemaRegistry, schema::Schema};

/// Render `root` and every schema it transitively references, deduplicated.
pub fn describe(registry: &SchemaRegistry, root: &str) -> Result<String, SchemaDescriptionError> {
    let mut visited = BTreeSet::new();
    let mut out = String::new();
    render_into(registry, root, None, &mut visited, &mut out)?;
    Ok(out)
}

fn render_into(
    registry: &SchemaRegistry,
    name: &str,
    referrer: Option<&str>,
    visited: &mut BTreeSet<String>,
    out: &mut String,
) -> Result<(), SchemaDescriptionError> {
    if !visited.insert(name.to_owned()) {
        return Ok(());
    }

    let schema = registry.get(name).ok_or_else(|| match referrer {
        None => SchemaDescriptionError::NotRegistered(name.to_owned()),
        Some(referrer) => SchemaDescriptionError::DanglingReference {
            referrer: referrer.to_owned(),
            referenced: name.to_owned(),
        },
    })?;

    if let Some(base) = &schema.extends {
        render_into(registry, base, Some(name), visited, out)?;
    }

    out.push_str(&render_schema(schema));

    let mut referenced = Vec::new();
    for field in &schema.fields {
        field.ty.collect_schema_refs(&mut referenced);
    }
    for nested in referenced {
        render_into(registry, nested, Some(name), visited, out)?;
    }

    Ok(())
}

fn render_schema(schema: &Schema) -> String {
    let mut builder = MarkdownBuilder::new().subheading(format_args!("Schema: {}", schema.name));
    if let Some(base) = &schema.extends {
        builder = builder.line(format_args!("Extends `{base}`."));
    }
    if let Some(doc) = &schema.doc {
        builder = builder.line(doc);
    }
    for field in &schema.fields {
        builder = builder.bullet(field.render_line());
    }
    builder.blank_line().finish()
}
