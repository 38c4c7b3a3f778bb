//! Core of the **incant** workspace: schema declarations and the
//! generate → validate → correct synthesis loop.
//!
//! The crate has two halves, used in sequence:
//!
//! * **Schema introspection** — [`schema`], [`registry`] and [`describe`]
//!   declare a target shape as plain data and render it as deterministic text
//!   for injection into generation requests.
//! * **The synthesis loop** — [`generate`], [`literal`], [`validate`] and
//!   [`synthesize`] orchestrate one generation attempt against a caller-
//!   supplied [`generate::Generator`], strict parsing of the candidate text,
//!   schema validation and a bounded number of corrective retries.
//!
//! ```rust
//! use std::sync::Arc;
//! use incant_core::{
//!     generate::FnGenerator,
//!     schema::{Field, FieldType, Schema},
//!     SchemaRegistry, Synthesizer,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> incant_core::Result<()> {
//! let mut registry = SchemaRegistry::new();
//! registry.register(
//!     Schema::new("Widget")
//!         .with_field(Field::new("name", FieldType::String))
//!         .with_field(Field::new("count", FieldType::Integer)),
//! )?;
//!
//! // Stands in for a real LLM call.
//! let generator = FnGenerator::new(|_req| Ok("{'name': 'widgets', 'count': 3}".to_owned()));
//!
//! let synthesizer = Synthesizer::new(Arc::new(registry), generator);
//! let instance = synthesizer.synthesize("Widget", "three widgets").await?;
//! assert_eq!(instance.get("count").unwrap(), 3);
//! # Ok(())
//! # }
//! ```

pub mod describe;
pub mod error;
pub mod generate;
pub mod instance;
pub mod literal;
pub mod registry;
pub mod schema;
pub mod synthesize;
pub mod validate;

pub use error::{IncantError, Result, SynthesisFailure};
pub use instance::Instance;
pub use registry::SchemaRegistry;
pub use schema::{Field, FieldType, Schema};
pub use synthesize::{SynthesisOptions, Synthesizer};
