//! The external text-generation collaborator and the request it receives.
//!
//! The synthesis loop knows nothing about transports: callers supply any
//! [`Generator`], which turns a rendered [`GenerationRequest`] into raw
//! candidate text (or a [`GenerationTransportError`]). The trait returns a
//! [`Pin<Box<dyn Future>>`] so it stays object-safe without `async_trait`,
//! and implementations are trivially mockable in tests.

use std::future::Future;
use std::pin::Pin;

use incant_prompt::MarkdownBuilder;

use crate::error::GenerationTransportError;

/// Everything one generation attempt needs: target schema, its rendered
/// description, the user prompt and, on a retry, the context of the failed
/// prior attempt.
///
/// The schema description is rendered once per synthesis call and reused for
/// the correction request, so [`Self::render`] is deterministic for a given
/// request value.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub schema_name: String,
    pub schema_description: String,
    pub prompt: String,
    pub correction: Option<CorrectionContext>,
}

/// Feedback embedded into a correction request.
#[derive(Debug, Clone)]
pub struct CorrectionContext {
    /// Raw text of the rejected attempt. Absent when the generation call
    /// itself failed and produced no text.
    pub prior_output: Option<String>,
    /// Human-readable reason the attempt was rejected, already truncated to
    /// the configured cap.
    pub error: String,
}

impl GenerationRequest {
    pub fn new(
        schema_name: impl Into<String>,
        schema_description: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            schema_name: schema_name.into(),
            schema_description: schema_description.into(),
            prompt: prompt.into(),
            correction: None,
        }
    }

    /// Render the full request text handed to the generator.
    pub fn render(&self) -> String {
        let mut builder = MarkdownBuilder::new()
            .heading("Task")
            .line(
                "Synthesize the prompt into a single dictionary literal whose keys and values \
                 fit the target schema. Do not duplicate the field descriptions.",
            )
            .blank_line()
            .key_value("Target Schema", &self.schema_name)
            .blank_line()
            .subheading("Schema Definitions")
            .fenced("markdown", &self.schema_description)
            .subheading("Prompt")
            .fenced("markdown", &self.prompt);

        if let Some(correction) = &self.correction {
            if let Some(prior) = &correction.prior_output {
                builder = builder.subheading("Previous Attempt").fenced("", prior);
            }
            builder = builder
                .subheading("Validation Error")
                .fenced("", &correction.error)
                .line("Fix the error and return a corrected dictionary.");
        }

        builder
            .delimiter()
            .line(
                "Answer with the dictionary literal only, minimized whitespace, \
                 no surrounding commentary.",
            )
            .finish()
    }
}

/// The black-box text generation call.
///
/// `generate` may take seconds; it is the sole suspension point of a
/// synthesis call. Implementations must be shareable across tasks.
pub trait Generator: Send + Sync {
    fn generate<'p>(
        &'p self,
        request: &'p GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationTransportError>> + Send + 'p>>;
}

/// Adapter turning a plain closure into a [`Generator`], handy for demos and
/// tests that don't need real I/O.
///
/// ```rust
/// use incant_core::generate::{FnGenerator, GenerationRequest, Generator};
///
/// let generator = FnGenerator::new(|_req: &GenerationRequest| Ok("{'a': 1}".to_owned()));
/// # let _ = generator;
/// ```
pub struct FnGenerator<F>(F);

impl<F> FnGenerator<F>
where
    F: Fn(&GenerationRequest) -> Result<String, GenerationTransportError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Generator for FnGenerator<F>
where
    F: Fn(&GenerationRequest) -> Result<String, GenerationTransportError> + Send + Sync,
{
    fn generate<'p>(
        &'p self,
        request: &'p GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationTransportError>> + Send + 'p>> {
        let outcome = (self.0)(request);
        Box::pin(async move { outcome })
    }
}
