use async_trait::async_trait;
use scenecraft_core::{GenerationKind, GenerationOutput, GenerationRequest, GenerationResponse};
use scenecraft_error::GenerationErrorKind;
use scenecraft_interface::GenerationInvoker;
use scenecraft_invoke::{FailureClass, RetryExecutor, RetryPolicy};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Invoker that replays canned responses and records every request.
#[derive(Default)]
struct ScriptedInvoker {
    responses: Mutex<VecDeque<GenerationResponse>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedInvoker {
    fn new(responses: Vec<GenerationResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationInvoker for ScriptedInvoker {
    async fn invoke(&self, request: &GenerationRequest) -> GenerationResponse {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| GenerationResponse::failure("HTTP 503: script exhausted"))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

const INPUT_FAILURE: &str = "INVALID_ARGUMENT: could not fetch reference image";
const TRANSIENT_FAILURE: &str = "HTTP 503: Service Unavailable";

fn policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::builder()
        .max_attempts(max_attempts)
        .backoff_step(Duration::from_secs(2))
        .max_delay(Duration::from_secs(60))
        .strip_delay(Duration::from_millis(500))
        .jitter(false)
        .build()
        .unwrap()
}

fn image_request_with_reference() -> GenerationRequest {
    GenerationRequest::new(GenerationKind::Image, "image-standard", "A lighthouse at dusk")
        .with_reference_images(vec!["https://cdn/keeper-1.png".to_string()])
}

#[tokio::test(start_paused = true)]
async fn strips_reference_once_then_retries_normally() {
    let invoker = ScriptedInvoker::new(vec![
        GenerationResponse::failure(INPUT_FAILURE),
        GenerationResponse::failure(TRANSIENT_FAILURE),
        GenerationResponse::Success(GenerationOutput::url("https://cdn/frame.png")),
    ]);
    let executor = RetryExecutor::new(invoker.clone(), policy(3));

    let outcome = executor
        .invoke_with_retry(image_request_with_reference(), 3)
        .await;

    assert!(outcome.is_success());
    assert_eq!(
        outcome.output().and_then(|o| o.url.as_deref()),
        Some("https://cdn/frame.png")
    );

    let requests = invoker.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].has_reference_images());
    assert_eq!(requests[1].reference_images, None);
    assert_eq!(requests[2].reference_images, None);

    let attempts = outcome.attempts();
    assert_eq!(attempts.len(), 3);
    assert_eq!(*attempts[0].class(), Some(FailureClass::InputWithReference));
    assert_eq!(*attempts[0].delay(), Some(Duration::from_millis(500)));
    assert_eq!(*attempts[1].class(), Some(FailureClass::Transient));
    assert_eq!(*attempts[1].delay(), Some(Duration::from_secs(4)));
    assert_eq!(*attempts[2].class(), None);
}

#[tokio::test(start_paused = true)]
async fn permanent_transient_failure_exhausts_budget_exactly() {
    let invoker = ScriptedInvoker::new(vec![
        GenerationResponse::failure(TRANSIENT_FAILURE),
        GenerationResponse::failure(TRANSIENT_FAILURE),
        GenerationResponse::failure(TRANSIENT_FAILURE),
    ]);
    let executor = RetryExecutor::new(invoker.clone(), policy(3));

    let outcome = executor
        .invoke_with_retry(
            GenerationRequest::new(GenerationKind::Video, "video-standard", "Waves"),
            2,
        )
        .await;

    assert_eq!(invoker.requests().len(), 2);
    let error = outcome.error().expect("failure");
    assert_eq!(
        error.kind,
        GenerationErrorKind::ExhaustedRetries {
            attempts: 2,
            message: TRANSIENT_FAILURE.to_string(),
        }
    );
}

#[tokio::test(start_paused = true)]
async fn fatal_failure_is_not_retried() {
    let invoker = ScriptedInvoker::new(vec![
        GenerationResponse::failure("HTTP 401: invalid credentials"),
        GenerationResponse::Success(GenerationOutput::url("never")),
    ]);
    let executor = RetryExecutor::new(invoker.clone(), policy(5));

    let outcome = executor
        .invoke(GenerationRequest::new(GenerationKind::Text, "script-standard", "Hi"))
        .await;

    assert_eq!(invoker.requests().len(), 1);
    assert!(matches!(
        outcome.error().map(|e| &e.kind),
        Some(GenerationErrorKind::Validation(_))
    ));
    assert_eq!(outcome.attempts().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn second_input_failure_is_treated_as_transient() {
    let invoker = ScriptedInvoker::new(vec![
        GenerationResponse::failure(INPUT_FAILURE),
        GenerationResponse::failure(INPUT_FAILURE),
        GenerationResponse::Success(GenerationOutput::url("https://cdn/ok.png")),
    ]);
    let executor = RetryExecutor::new(invoker.clone(), policy(3));

    let outcome = executor.invoke(image_request_with_reference()).await;

    assert!(outcome.is_success());
    let attempts = outcome.attempts();
    assert_eq!(*attempts[0].class(), Some(FailureClass::InputWithReference));
    assert_eq!(*attempts[1].class(), Some(FailureClass::Transient));
    assert!(!*attempts[1].had_reference_images());
}

#[tokio::test(start_paused = true)]
async fn input_failure_without_references_uses_backoff() {
    let invoker = ScriptedInvoker::new(vec![
        GenerationResponse::failure(INPUT_FAILURE),
        GenerationResponse::Success(GenerationOutput::url("https://cdn/ok.png")),
    ]);
    let executor = RetryExecutor::new(invoker.clone(), policy(3));

    let outcome = executor
        .invoke(GenerationRequest::new(GenerationKind::Image, "image-standard", "Sea"))
        .await;

    assert!(outcome.is_success());
    assert_eq!(*outcome.attempts()[0].class(), Some(FailureClass::Transient));
    assert_eq!(*outcome.attempts()[0].delay(), Some(Duration::from_secs(2)));
}

#[tokio::test(start_paused = true)]
async fn backoff_grows_linearly() {
    let invoker = ScriptedInvoker::new(vec![
        GenerationResponse::failure(TRANSIENT_FAILURE),
        GenerationResponse::failure(TRANSIENT_FAILURE),
        GenerationResponse::failure(TRANSIENT_FAILURE),
        GenerationResponse::Success(GenerationOutput::text("[]")),
    ]);
    let executor = RetryExecutor::new(invoker.clone(), policy(4));
    let start = tokio::time::Instant::now();

    let outcome = executor
        .invoke(GenerationRequest::new(GenerationKind::Text, "script-standard", "Plan"))
        .await;

    assert!(outcome.is_success());
    let delays: Vec<_> = outcome
        .attempts()
        .iter()
        .filter_map(|a| *a.delay())
        .collect();
    assert_eq!(
        delays,
        vec![
            Duration::from_secs(2),
            Duration::from_secs(4),
            Duration::from_secs(6)
        ]
    );
    assert!(start.elapsed() >= Duration::from_secs(12));
}

#[tokio::test(start_paused = true)]
async fn zero_budget_still_attempts_once() {
    let invoker = ScriptedInvoker::new(vec![GenerationResponse::failure(TRANSIENT_FAILURE)]);
    let executor = RetryExecutor::new(invoker.clone(), policy(3));

    let outcome = executor
        .invoke_with_retry(
            GenerationRequest::new(GenerationKind::Music, "music-standard", "Calm"),
            0,
        )
        .await;

    assert_eq!(invoker.requests().len(), 1);
    assert!(matches!(
        outcome.error().map(|e| &e.kind),
        Some(GenerationErrorKind::ExhaustedRetries { attempts: 1, .. })
    ));
}
