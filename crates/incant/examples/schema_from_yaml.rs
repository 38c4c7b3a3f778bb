use std::sync::Arc;

use incant::generate::{FnGenerator, GenerationRequest};
use incant::{Schema, SchemaRegistry, Synthesizer};

/// # Caller-defined schemas from YAML
///
/// Schemas are plain data, so they don't have to live in Rust source: this
/// example declares a small order-intake schema in YAML, loads it into a
/// registry and synthesizes an instance from a one-line prompt.
///
/// ## How to run
///
/// ```bash
/// cargo run -p incant --example schema_from_yaml
/// ```
////////////////////////////////////////////////////////////////////////////////

const SCHEMAS: &str = r#"
- name: OrderItem
  fields:
    - name: sku
      type: string
      description: Stock keeping unit.
    - name: quantity
      type: integer
- name: Order
  doc: A customer order ready for fulfilment.
  fields:
    - name: customer
      type: string
    - name: priority
      type:
        enum: [standard, express]
      default: standard
    - name: items
      type:
        nested: OrderItem
      required: false
    - name: notes
      type: string
      required: false
"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let schemas: Vec<Schema> = serde_yaml::from_str(SCHEMAS)?;
    let registry = Arc::new({
        let mut registry = SchemaRegistry::new();
        registry.register_all(schemas)?;
        registry
    });

    println!("{}", registry.describe("Order")?);

    let generator = FnGenerator::new(|_request: &GenerationRequest| {
        Ok("{'customer': 'ACME Corp', 'priority': 'express', 'items': {'sku': 'WIDGET-3', 'quantity': 3}}".to_owned())
    });

    let synthesizer = Synthesizer::new(registry, generator);
    let order = synthesizer
        .synthesize("Order", "express order of three widgets for ACME Corp")
        .await?;

    println!("{}", serde_json::to_string_pretty(&order)?);
    Ok(())
}
