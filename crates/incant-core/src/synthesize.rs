//! The generate → validate → correct → validate control flow.
//!
//! [`Synthesizer`] is a lightweight client bound to one [`Generator`] and one
//! [`SchemaRegistry`]. A call to [`Synthesizer::synthesize`] is a pure
//! function of its inputs plus the external generation call: no state is kept
//! between calls, so any number of calls may run concurrently on clones of the
//! same synthesizer.
//!
//! One call walks a small state machine:
//!
//! 1. Describe the target schema (fatal on a malformed graph, never retried).
//! 2. Invoke the generator, parse the candidate as a literal mapping and
//!    validate it against the schema.
//! 3. On success, return the [`Instance`]. On failure, record the attempt and
//!    retry with the error embedded in a correction request, up to
//!    [`SynthesisOptions::max_corrections`] times (default: one correction).
//! 4. When the budget is exhausted, return a [`SynthesisFailure`] carrying
//!    every raw candidate and error.
//!
//! Transport failures and timeouts consume an attempt exactly like a rejected
//! candidate does; callers needing more resilience compose their own retry of
//! the whole loop.

use std::sync::Arc;
use std::time::Duration;

use crate::{
    error::{Attempt, AttemptError, GenerationTransportError, Result, SynthesisFailure},
    generate::{CorrectionContext, GenerationRequest, Generator},
    instance::Instance,
    literal::parse_mapping,
    registry::SchemaRegistry,
    validate::validate,
};

/// Tunables of the synthesis loop.
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    /// Correction attempts after the initial generation. The total number of
    /// generator invocations is at most `max_corrections + 1`.
    pub max_corrections: usize,
    /// Upper bound on a single generation call. Elapsing counts as a
    /// transport failure and consumes one attempt.
    pub timeout: Option<Duration>,
    /// Byte cap on the error text embedded into a correction request, so a
    /// pathological validation error cannot grow requests without bound.
    pub max_error_len: usize,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            max_corrections: 1,
            timeout: None,
            max_error_len: 2048,
        }
    }
}

impl SynthesisOptions {
    pub fn with_max_corrections(mut self, max_corrections: usize) -> Self {
        self.max_corrections = max_corrections;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_error_len(mut self, max_error_len: usize) -> Self {
        self.max_error_len = max_error_len;
        self
    }
}

/// A client bound to a single generator and schema registry.
///
/// Clone freely; both halves sit behind an `Arc`.
pub struct Synthesizer<G> {
    registry: Arc<SchemaRegistry>,
    generator: Arc<G>,
    options: SynthesisOptions,
}

impl<G> Clone for Synthesizer<G> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            generator: Arc::clone(&self.generator),
            options: self.options.clone(),
        }
    }
}

impl<G> Synthesizer<G>
where
    G: Generator,
{
    pub fn new(registry: Arc<SchemaRegistry>, generator: G) -> Self {
        Self {
            registry,
            generator: Arc::new(generator),
            options: SynthesisOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SynthesisOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Access the underlying generator (e.g. to tweak backend settings).
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Produce a validated instance of `schema` from a natural-language
    /// prompt.
    ///
    /// An empty prompt is passed through unchanged; schema plus empty prompt
    /// is a valid, if low-information, request.
    ///
    /// # Errors
    ///
    /// * [`crate::error::IncantError::Schema`] if the schema graph is
    ///   malformed — surfaced before any generation call.
    /// * [`crate::error::IncantError::Synthesis`] when every attempt was
    ///   consumed without a valid candidate.
    pub async fn synthesize(&self, schema: &str, prompt: &str) -> Result<Instance> {
        let description = self.registry.describe(schema)?;
        let mut request = GenerationRequest::new(schema, description, prompt);
        let mut attempts: Vec<Attempt> = Vec::new();

        for attempt in 0..=self.options.max_corrections {
            tracing::debug!(schema, attempt, "requesting candidate");

            let raw = match self.invoke(&request).await {
                Ok(raw) => raw,
                Err(transport) => {
                    tracing::warn!(schema, attempt, error = %transport, "generation call failed");
                    request.correction = Some(CorrectionContext {
                        prior_output: None,
                        error: self.clip(transport.to_string()),
                    });
                    attempts.push(Attempt {
                        raw: None,
                        error: transport.into(),
                    });
                    continue;
                }
            };

            match self.check(schema, &raw) {
                Ok(instance) => {
                    tracing::debug!(schema, attempt, "candidate validated");
                    return Ok(instance);
                }
                Err(error) => {
                    tracing::warn!(schema, attempt, error = %error, "candidate rejected");
                    request.correction = Some(CorrectionContext {
                        prior_output: Some(raw.clone()),
                        error: self.clip(error.to_string()),
                    });
                    attempts.push(Attempt {
                        raw: Some(raw),
                        error,
                    });
                }
            }
        }

        Err(SynthesisFailure {
            schema: schema.to_owned(),
            attempts,
        }
        .into())
    }

    async fn invoke(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<String, GenerationTransportError> {
        match self.options.timeout {
            Some(limit) => tokio::time::timeout(limit, self.generator.generate(request))
                .await
                .map_err(|_| GenerationTransportError::Timeout(limit))?,
            None => self.generator.generate(request).await,
        }
    }

    fn check(&self, schema: &str, raw: &str) -> std::result::Result<Instance, AttemptError> {
        let mapping = parse_mapping(raw)?;
        let instance = validate(&self.registry, schema, &mapping)?;
        Ok(instance)
    }

    fn clip(&self, mut reason: String) -> String {
        let cap = self.options.max_error_len;
        if reason.len() <= cap {
            return reason;
        }
        let mut end = cap;
        while !reason.is_char_boundary(end) {
            end -= 1;
        }
        reason.truncate(end);
        reason.push_str(" [truncated]");
        reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::IncantError,
        schema::{Field, FieldType, Schema},
    };
    use serde_json::json;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    enum Script {
        Reply(&'static str),
        Fail(&'static str),
        Hang,
    }

    /// Generator that plays back a fixed script and records every request.
    struct Scripted {
        script: Mutex<VecDeque<Script>>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl Scripted {
        fn new(script: impl IntoIterator<Item = Script>) -> Self {
            Self {
                script: Mutex::new(script.into_iter().collect()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn request(&self, index: usize) -> GenerationRequest {
            self.requests.lock().unwrap()[index].clone()
        }
    }

    impl Generator for Scripted {
        fn generate<'p>(
            &'p self,
            request: &'p GenerationRequest,
        ) -> Pin<Box<dyn Future<Output = std::result::Result<String, GenerationTransportError>> + Send + 'p>>
        {
            self.requests.lock().unwrap().push(request.clone());
            let step = self.script.lock().unwrap().pop_front();
            Box::pin(async move {
                match step {
                    Some(Script::Reply(text)) => Ok(text.to_owned()),
                    Some(Script::Fail(message)) => {
                        Err(GenerationTransportError::backend(message))
                    }
                    Some(Script::Hang) | None => std::future::pending().await,
                }
            })
        }
    }

    fn widget_registry() -> Arc<SchemaRegistry> {
        let mut registry = SchemaRegistry::new();
        registry
            .register(
                Schema::new("Widget")
                    .with_field(Field::new("name", FieldType::String))
                    .with_field(Field::new("count", FieldType::Integer)),
            )
            .unwrap();
        Arc::new(registry)
    }

    fn synthesizer(script: impl IntoIterator<Item = Script>) -> Synthesizer<Scripted> {
        Synthesizer::new(widget_registry(), Scripted::new(script))
    }

    fn failure(error: IncantError) -> SynthesisFailure {
        match error {
            IncantError::Synthesis(failure) => failure,
            other => panic!("expected SynthesisFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn first_valid_candidate_needs_one_call() {
        let synth = synthesizer([Script::Reply("{'name': 'widgets', 'count': 3}")]);
        let instance = synth.synthesize("Widget", "three widgets").await.unwrap();

        assert_eq!(instance.get("name"), Some(&json!("widgets")));
        assert_eq!(instance.get("count"), Some(&json!(3)));
        assert_eq!(synth.generator().calls(), 1);
    }

    #[tokio::test]
    async fn correction_request_carries_the_first_error() {
        let synth = synthesizer([
            Script::Reply("{'name': 'widgets'}"),
            Script::Reply("{'name':'widgets','count':3}"),
        ]);
        let instance = synth.synthesize("Widget", "three widgets").await.unwrap();

        assert_eq!(instance.get("count"), Some(&json!(3)));
        assert_eq!(synth.generator().calls(), 2);

        let second = synth.generator().request(1);
        let correction = second
            .correction
            .as_ref()
            .expect("second request is a correction");
        assert_eq!(correction.prior_output.as_deref(), Some("{'name': 'widgets'}"));
        assert!(correction.error.contains("$.count"));
        assert!(correction.error.contains("required field is missing"));
        assert!(second.render().contains("required field is missing"));
    }

    #[tokio::test]
    async fn two_bad_candidates_exhaust_the_budget() {
        let synth = synthesizer([
            Script::Reply("not a mapping at all"),
            Script::Reply("{'name': 'widgets', 'count': 'three'}"),
            Script::Reply("{'name': 'widgets', 'count': 3}"),
        ]);
        let error = synth.synthesize("Widget", "three widgets").await.unwrap_err();

        // The third (valid) reply must never be requested.
        assert_eq!(synth.generator().calls(), 2);

        let failure = failure(error);
        assert_eq!(failure.schema, "Widget");
        assert_eq!(failure.attempts.len(), 2);
        assert_eq!(
            failure.attempts[0].raw.as_deref(),
            Some("not a mapping at all")
        );
        assert!(matches!(failure.attempts[0].error, AttemptError::Parse(_)));
        assert_eq!(
            failure.attempts[1].raw.as_deref(),
            Some("{'name': 'widgets', 'count': 'three'}")
        );
        assert!(matches!(failure.attempts[1].error, AttemptError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_key_fails_validation_even_with_correct_fields() {
        let synth = synthesizer([
            Script::Reply("{'name': 'w', 'count': 3, 'color': 'red'}"),
            Script::Reply("{'name': 'w', 'count': 3, 'color': 'red'}"),
        ]);
        let error = synth.synthesize("Widget", "").await.unwrap_err();
        let failure = failure(error);
        assert!(failure.attempts[1].error.to_string().contains("unknown field `color`"));
    }

    #[tokio::test]
    async fn transport_failure_consumes_an_attempt_then_recovers() {
        let synth = synthesizer([
            Script::Fail("connection reset"),
            Script::Reply("{'name': 'widgets', 'count': 3}"),
        ]);
        let instance = synth.synthesize("Widget", "three widgets").await.unwrap();

        assert_eq!(instance.get("count"), Some(&json!(3)));
        assert_eq!(synth.generator().calls(), 2);

        let correction = synth.generator().request(1).correction.unwrap();
        assert!(correction.prior_output.is_none());
        assert!(correction.error.contains("connection reset"));
    }

    #[tokio::test(start_paused = true)]
    async fn timeouts_exhaust_the_budget_without_hanging() {
        let synth = synthesizer([Script::Hang, Script::Hang]).with_options(
            SynthesisOptions::default().with_timeout(Duration::from_secs(5)),
        );
        let error = synth.synthesize("Widget", "three widgets").await.unwrap_err();

        let failure = failure(error);
        assert_eq!(failure.attempts.len(), 2);
        for attempt in &failure.attempts {
            assert!(attempt.raw.is_none());
            assert!(matches!(
                attempt.error,
                AttemptError::Transport(GenerationTransportError::Timeout(_))
            ));
        }
    }

    #[tokio::test]
    async fn zero_corrections_means_a_single_call() {
        let synth = synthesizer([
            Script::Reply("{'name': 'widgets'}"),
            Script::Reply("{'name': 'widgets', 'count': 3}"),
        ])
        .with_options(SynthesisOptions::default().with_max_corrections(0));

        let error = synth.synthesize("Widget", "three widgets").await.unwrap_err();
        assert_eq!(synth.generator().calls(), 1);
        assert_eq!(failure(error).attempts.len(), 1);
    }

    #[tokio::test]
    async fn two_corrections_allow_a_third_call_to_succeed() {
        let synth = synthesizer([
            Script::Reply("{'name': 'widgets'}"),
            Script::Reply("{'count': 3}"),
            Script::Reply("{'name': 'widgets', 'count': 3}"),
        ])
        .with_options(SynthesisOptions::default().with_max_corrections(2));

        let instance = synth.synthesize("Widget", "three widgets").await.unwrap();
        assert_eq!(instance.get("count"), Some(&json!(3)));
        assert_eq!(synth.generator().calls(), 3);

        // Each correction carries the immediately preceding failure.
        let third = synth.generator().request(2);
        let correction = third.correction.as_ref().unwrap();
        assert_eq!(correction.prior_output.as_deref(), Some("{'count': 3}"));
        assert!(correction.error.contains("$.name"));
    }

    #[tokio::test]
    async fn malformed_schema_is_fatal_before_any_generation() {
        let synth = synthesizer([Script::Reply("{}")]);
        let error = synth.synthesize("Missing", "anything").await.unwrap_err();

        assert!(matches!(error, IncantError::Schema(_)));
        assert_eq!(synth.generator().calls(), 0);
    }

    #[tokio::test]
    async fn embedded_error_text_is_capped() {
        let mut registry = SchemaRegistry::new();
        registry
            .register(
                Schema::new("Pick").with_field(Field::new(
                    "choice",
                    FieldType::Enum((0..400).map(|i| format!("option_{i}")).collect()),
                )),
            )
            .unwrap();

        let generator = Scripted::new([
            Script::Reply("{'choice': 'nope'}"),
            Script::Reply("{'choice': 'nope'}"),
        ]);
        let synth = Synthesizer::new(Arc::new(registry), generator).with_options(
            SynthesisOptions::default().with_max_error_len(200),
        );

        let _ = synth.synthesize("Pick", "pick one").await.unwrap_err();
        let correction = synth.generator().request(1).correction.unwrap();
        assert!(correction.error.len() <= 200 + " [truncated]".len());
        assert!(correction.error.ends_with(" [truncated]"));
    }

    #[tokio::test]
    async fn empty_prompt_passes_through() {
        let synth = synthesizer([Script::Reply("{'name': 'w', 'count': 0}")]);
        let instance = synth.synthesize("Widget", "").await.unwrap();
        assert_eq!(instance.get("count"), Some(&json!(0)));

        let request = synth.generator().request(0);
        assert!(request.prompt.is_empty());
    }
}
