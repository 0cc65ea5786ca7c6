//! Bounded-retry execution of generation calls.
//!
//! Each invocation is a small state machine. [`AttemptState`] carries the
//! attempt counter and whether the reference-stripped retry has been used;
//! the strip can only happen while that flag is false, so it runs at most
//! once per invocation.

use crate::{ClassificationTable, FailureClass, RetryConfig};
use scenecraft_core::{GenerationOutput, GenerationRequest, GenerationResponse};
use scenecraft_error::{GenerationError, GenerationErrorKind, RetryableError};
use scenecraft_interface::GenerationInvoker;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Retry schedule for one executor.
///
/// # Examples
///
/// ```
/// use scenecraft_invoke::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::builder()
///     .max_attempts(4u32)
///     .backoff_step(Duration::from_secs(1))
///     .jitter(false)
///     .build()
///     .unwrap();
///
/// assert_eq!(policy.backoff_for(3), Duration::from_secs(3));
/// ```
#[derive(Debug, Clone, PartialEq, derive_builder::Builder, derive_getters::Getters)]
#[builder(default)]
pub struct RetryPolicy {
    /// Attempts per invocation, including the first and the stripped retry
    max_attempts: u32,
    /// Delay before attempt `n + 1` is `backoff_step * n`
    backoff_step: Duration,
    /// Upper bound for a single backoff delay
    max_delay: Duration,
    /// Fixed delay before the reference-stripped retry
    strip_delay: Duration,
    /// Randomize backoff delays
    jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            backoff_step: Duration::from_millis(config.backoff_step_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            strip_delay: Duration::from_millis(config.strip_delay_ms),
            jitter: config.jitter,
        }
    }
}

impl RetryPolicy {
    /// Creates a new policy builder.
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// Backoff after failed attempt `attempt` (1-based), before jitter.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_step
            .saturating_mul(attempt.max(1))
            .min(self.max_delay)
    }

    fn delay_after(&self, attempt: u32) -> Duration {
        let delay = self.backoff_for(attempt);
        if self.jitter {
            tokio_retry2::strategy::jitter(delay)
        } else {
            delay
        }
    }
}

/// Progress of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttemptState {
    /// Attempts issued so far
    pub attempt: u32,
    /// Whether the reference-stripped retry has been issued
    pub attempted_without_reference: bool,
}

impl AttemptState {
    /// Class to act on for a failure, given the request that produced it.
    ///
    /// An input failure only earns the stripped retry when the request still
    /// carries reference images and the strip has not been used yet;
    /// otherwise it is handled like any transient failure.
    pub fn effective_class(&self, class: FailureClass, request: &GenerationRequest) -> FailureClass {
        match class {
            FailureClass::InputWithReference
                if self.attempted_without_reference || !request.has_reference_images() =>
            {
                FailureClass::Transient
            }
            other => other,
        }
    }
}

/// Diagnostics for one attempt.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct AttemptRecord {
    /// 1-based attempt number
    attempt: u32,
    /// Whether the request carried reference images
    had_reference_images: bool,
    /// Class of the failure, `None` on success
    class: Option<FailureClass>,
    /// Provider failure message, `None` on success
    message: Option<String>,
    /// Delay slept before the next attempt
    delay: Option<Duration>,
}

/// Result of [`RetryExecutor::invoke_with_retry`].
#[derive(Debug, Clone)]
pub struct InvocationOutcome {
    result: Result<GenerationOutput, GenerationError>,
    attempts: Vec<AttemptRecord>,
    final_request: GenerationRequest,
}

impl InvocationOutcome {
    /// True when an attempt succeeded.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Successful output.
    pub fn output(&self) -> Option<&GenerationOutput> {
        self.result.as_ref().ok()
    }

    /// Terminal failure.
    pub fn error(&self) -> Option<&GenerationError> {
        self.result.as_ref().err()
    }

    /// Every attempt in order.
    pub fn attempts(&self) -> &[AttemptRecord] {
        &self.attempts
    }

    /// Request as sent on the last attempt.
    pub fn final_request(&self) -> &GenerationRequest {
        &self.final_request
    }

    /// Consume into the success/failure value.
    pub fn into_result(self) -> Result<GenerationOutput, GenerationError> {
        self.result
    }
}

/// Wraps a [`GenerationInvoker`] with classification and bounded retries.
///
/// The executor never returns an error from `invoke_with_retry` itself: every
/// path ends in an [`InvocationOutcome`] holding either the output or a
/// [`GenerationError`].
#[derive(Clone)]
pub struct RetryExecutor {
    invoker: Arc<dyn GenerationInvoker>,
    policy: RetryPolicy,
    table: ClassificationTable,
}

impl std::fmt::Debug for RetryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryExecutor")
            .field("invoker", &self.invoker.name())
            .field("policy", &self.policy)
            .field("table_version", &self.table.version())
            .finish()
    }
}

impl RetryExecutor {
    /// Executor with the built-in classification table.
    pub fn new(invoker: Arc<dyn GenerationInvoker>, policy: RetryPolicy) -> Self {
        Self {
            invoker,
            policy,
            table: ClassificationTable::builtin(),
        }
    }

    /// Replace the classification table.
    pub fn with_table(mut self, table: ClassificationTable) -> Self {
        self.table = table;
        self
    }

    /// Retry policy in use.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Invoke with the policy's attempt budget.
    pub async fn invoke(&self, request: GenerationRequest) -> InvocationOutcome {
        self.invoke_with_retry(request, self.policy.max_attempts).await
    }

    /// Invoke with an explicit attempt budget (at least one attempt).
    #[instrument(
        skip(self, request),
        fields(kind = %request.kind, model = %request.model_key, invoker = self.invoker.name())
    )]
    pub async fn invoke_with_retry(
        &self,
        request: GenerationRequest,
        max_attempts: u32,
    ) -> InvocationOutcome {
        let max_attempts = max_attempts.max(1);
        let mut state = AttemptState::default();
        let mut attempts = Vec::new();
        let mut current = request;

        loop {
            state.attempt += 1;
            let had_reference_images = current.has_reference_images();
            debug!(
                attempt = state.attempt,
                max_attempts,
                had_reference_images,
                "Issuing generation call"
            );

            let message = match self.invoker.invoke(&current).await {
                GenerationResponse::Success(output) => {
                    attempts.push(AttemptRecord {
                        attempt: state.attempt,
                        had_reference_images,
                        class: None,
                        message: None,
                        delay: None,
                    });
                    info!(attempt = state.attempt, "Generation call succeeded");
                    return InvocationOutcome {
                        result: Ok(output),
                        attempts,
                        final_request: current,
                    };
                }
                GenerationResponse::Failure { error_message } => error_message,
            };

            let class = state.effective_class(self.table.classify(&message), &current);
            let error = GenerationError::new(class.error_kind(message.as_str()));
            warn!(
                attempt = state.attempt,
                class = %class,
                message = %message,
                "Generation call failed"
            );

            let mut record = AttemptRecord {
                attempt: state.attempt,
                had_reference_images,
                class: Some(class),
                message: Some(message.clone()),
                delay: None,
            };

            if !error.is_retryable() {
                attempts.push(record);
                error!(attempt = state.attempt, error = %error, "Fatal generation failure");
                return InvocationOutcome {
                    result: Err(error),
                    attempts,
                    final_request: current,
                };
            }

            if state.attempt >= max_attempts {
                attempts.push(record);
                let exhausted = GenerationError::new(GenerationErrorKind::ExhaustedRetries {
                    attempts: state.attempt,
                    message,
                });
                error!(error = %exhausted, "Generation retries exhausted");
                return InvocationOutcome {
                    result: Err(exhausted),
                    attempts,
                    final_request: current,
                };
            }

            let delay = if class == FailureClass::InputWithReference {
                state.attempted_without_reference = true;
                current = current.without_reference_images();
                info!(
                    attempt = state.attempt,
                    "Retrying without reference images"
                );
                self.policy.strip_delay
            } else {
                self.policy.delay_after(state.attempt)
            };

            record.delay = Some(delay);
            attempts.push(record);
            tokio::time::sleep(delay).await;
        }
    }
}
