use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use incant::Synthesizer;
use incant::generate::{FnGenerator, GenerationRequest};
use incant::types::gantt;

/// # Gantt chart synthesis – the correction loop at work
///
/// This example runs the full generate → validate → correct → validate flow
/// without any network access: the "model" is a scripted closure whose first
/// answer omits the required `date_format` field. The loop feeds the
/// validation error back and the second answer fixes it.
///
/// ## How to run
///
/// ```bash
/// cargo run -p incant --example gantt_from_prompt
/// ```
///
/// Swap the closure for your actual LLM call (anything implementing
/// `incant::generate::Generator`) to do the same against a live backend.
////////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Declare the target shape: the Gantt schema family ships with
    //    `incant-types`.
    let registry = Arc::new({
        let mut registry = incant::SchemaRegistry::new();
        registry.register_all(gantt::schemas())?;
        registry
    });

    // 2. A stand-in generator. The request text printed below is exactly what
    //    a real backend would receive.
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let generator = FnGenerator::new(move |request: &GenerationRequest| {
        let call = counter.fetch_add(1, Ordering::SeqCst);
        println!("--- request #{} ---\n{}", call + 1, request.render());
        if call == 0 {
            // First try: forgets the required `date_format`.
            Ok("{'title': 'Adding GANTT diagram functionality to mermaid', 'sections': [{'name': 'A section', 'tasks': [{'name': 'Completed task', 'status': 'done', 'start_date': '2014-01-06', 'end_date': '2014-01-08'}]}]}".to_owned())
        } else {
            Ok("{'date_format': 'YYYY-MM-DD', 'title': 'Adding GANTT diagram functionality to mermaid', 'excludes': 'weekends', 'sections': [{'name': 'A section', 'tasks': [{'name': 'Completed task', 'status': 'done', 'start_date': '2014-01-06', 'end_date': '2014-01-08'}]}]}".to_owned())
        }
    });

    // 3. Run the loop.
    let synthesizer = Synthesizer::new(registry, generator);
    let chart = synthesizer
        .synthesize(
            gantt::GANTT_CHART,
            "A chart for adding GANTT diagram functionality to mermaid, \
             one section with a completed task in early January 2014.",
        )
        .await?;

    // 4. A fully validated instance, after one correction.
    println!(
        "synthesized after {} call(s):\n{}",
        calls.load(Ordering::SeqCst),
        serde_json::to_string_pretty(&chart)?
    );

    Ok(())
}
