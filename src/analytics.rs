use std::time::Duration;
use tracing::info;

use crate::evaluation::{EvaluationContext, EvaluationResult};

/// One finished evaluation, handed to the sink after the result is computed.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationEvent<'a> {
    pub result: &'a EvaluationResult,
    pub context: &'a EvaluationContext,
    pub environment: Option<&'a str>,
    pub elapsed: Duration,
}

/// Receives evaluation events. Implementations must not block the caller.
pub trait EvaluationSink: Send + Sync {
    fn record(&self, event: &EvaluationEvent<'_>);
}

/// Emits every evaluation as a structured event on the `flag_evaluator::analytics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EvaluationSink for TracingSink {
    fn record(&self, event: &EvaluationEvent<'_>) {
        info!(
            target: "flag_evaluator::analytics",
            flag_key = %event.result.flag_key,
            variation_id = %event.result.variation_id,
            reason = %event.result.reason,
            user_id = event.context.user_id.as_deref(),
            session_id = event.context.session_id.as_deref(),
            environment = event.environment,
            elapsed_us = event.elapsed.as_micros() as u64,
            "flag evaluated"
        );
    }
}
