//! # `incant` – The umbrella crate
//!
//! A *one-stop import* that glues together the building-block crates of the
//! workspace:
//!
//! | Crate             | What it provides                                                        |
//! |-------------------|-------------------------------------------------------------------------|
//! | **`incant-core`** | Schema registry + introspector, strict candidate parsing, validation, the synthesis loop, errors |
//! | **`incant-prompt`** | The markdown builder behind request and schema rendering              |
//! | **`incant-types`** | Ready-made schema families (Gantt, BPMN, event storming)               |
//!
//! ## What it does
//!
//! Given a target schema and a free-text prompt, the [`Synthesizer`] asks a
//! caller-supplied [`generate::Generator`] (your LLM call) for a dictionary
//! literal, parses it with a strict bounded parser, validates it against the
//! schema and — when validation fails — retries once with the error fed back.
//! Either a fully validated [`Instance`] comes out, or a
//! [`SynthesisFailure`] carrying every raw attempt and error.
//!
//! ## Quick example
//!
//! ```rust
//! use std::sync::Arc;
//! use incant::{
//!     generate::FnGenerator,
//!     types::gantt,
//!     Synthesizer,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let registry = Arc::new({
//!     let mut r = incant::SchemaRegistry::new();
//!     r.register_all(gantt::schemas())?;
//!     r
//! });
//!
//! // Stands in for a real LLM backend.
//! let generator = FnGenerator::new(|_req| {
//!     Ok("{'date_format': 'YYYY-MM-DD', 'sections': []}".to_owned())
//! });
//!
//! let synthesizer = Synthesizer::new(registry, generator);
//! let chart = synthesizer.synthesize(gantt::GANTT_CHART, "an empty chart").await?;
//! assert_eq!(*chart.get("date_format").unwrap(), "YYYY-MM-DD");
//! # Ok(())
//! # }
//! ```
//!
//! ## Design philosophy
//!
//! * **No reflection** – Schemas are plain data declared once at startup (or
//!   loaded from YAML), not derived from live type graphs.
//! * **No evaluation of model output** – Candidates pass through a strict,
//!   depth- and size-bounded literal parser; anything outside closed
//!   dict/list/primitive literals is rejected.
//! * **Bounded cost** – The retry budget is an explicit, testable option
//!   (`max_corrections`, default 1), and correction requests cap the embedded
//!   error text.

pub use incant_core::*;
pub use incant_prompt as prompt;
pub use incant_types as types;
