//! Unified error types exposed by **`incant-core`**.
//!
//! The taxonomy mirrors the phases of a synthesis call: describing the target
//! schema, transporting the generation request, parsing the candidate text and
//! validating the parsed value. The first kind is fatal and never retried; the
//! other three each consume one attempt of the correction budget and are
//! recorded in the [`SynthesisFailure`] history when the budget runs out.
//!
//! Only [`IncantError`] (wrapping [`SchemaDescriptionError`] and
//! [`SynthesisFailure`]) crosses the component boundary to callers.

use std::time::Duration;

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, IncantError>;

/// The only error type returned by [`crate::synthesize::Synthesizer`].
#[derive(Debug, Error)]
pub enum IncantError {
    /// The target schema graph is malformed. Fatal, never retried.
    #[error(transparent)]
    Schema(#[from] SchemaDescriptionError),

    /// Every attempt of the synthesis loop was consumed without producing a
    /// valid instance.
    #[error(transparent)]
    Synthesis(#[from] SynthesisFailure),
}

/// A schema graph problem surfaced while registering or describing schemas.
///
/// These are configuration errors: they are raised the moment the malformed
/// graph is touched, before any generation call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaDescriptionError {
    /// Two schemas with the same name were registered.
    #[error("schema `{0}` is already registered")]
    DuplicateSchema(String),

    /// The requested root schema does not exist in the registry.
    #[error("schema `{0}` is not registered")]
    NotRegistered(String),

    /// A field or `extends` clause points at a schema that was never
    /// registered.
    #[error("schema `{referrer}` references unregistered schema `{referenced}`")]
    DanglingReference {
        referrer: String,
        referenced: String,
    },
}

/// The external generation call failed before any text was produced.
#[derive(Debug, Error)]
pub enum GenerationTransportError {
    /// Whatever the caller-supplied generator reported (network failure, API
    /// error, …).
    #[error("generation backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The caller-configured per-call timeout elapsed.
    #[error("generation call exceeded the {0:?} timeout")]
    Timeout(Duration),
}

impl GenerationTransportError {
    /// Wrap an arbitrary backend error.
    pub fn backend(error: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self::Backend(error.into())
    }
}

/// The candidate text is not a well-formed literal mapping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid candidate literal at byte {offset}: {message}")]
pub struct CandidateParseError {
    /// Byte offset into the (fence-stripped) candidate where parsing stopped.
    pub offset: usize,
    pub message: String,
}

/// The candidate parsed but violates the target schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid candidate value at `{path}`: {message}")]
pub struct CandidateValidationError {
    /// Dotted/indexed path to the offending field, rooted at `$`
    /// (e.g. `$.sections[2].name`).
    pub path: String,
    pub message: String,
}

impl CandidateValidationError {
    pub(crate) fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Union of the failure kinds that consume one attempt of the budget.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Transport(#[from] GenerationTransportError),

    #[error(transparent)]
    Parse(#[from] CandidateParseError),

    #[error(transparent)]
    Validation(#[from] CandidateValidationError),
}

/// One consumed attempt: the raw candidate (absent when the generation call
/// itself failed) plus the error that rejected it.
#[derive(Debug)]
pub struct Attempt {
    pub raw: Option<String>,
    pub error: AttemptError,
}

/// Terminal failure of a synthesis call: every attempt was consumed.
///
/// Carries the full history so callers can log or inspect each raw candidate
/// alongside the error that rejected it.
#[derive(Debug, Error)]
#[error(
    "synthesis of `{schema}` exhausted {} attempt(s); last error: {}",
    .attempts.len(),
    .attempts.last().map(|a| a.error.to_string()).unwrap_or_default()
)]
pub struct SynthesisFailure {
    /// Name of the target schema.
    pub schema: String,
    /// Every consumed attempt, in order.
    pub attempts: Vec<Attempt>,
}
