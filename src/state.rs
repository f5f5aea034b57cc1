use std::sync::Arc;

use crate::analytics::{EvaluationSink, TracingSink};
use crate::repository::{
    EnvironmentRepository, FlagRepository, InMemoryEnvironmentRepository, InMemoryFlagRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub flags: Arc<dyn FlagRepository>,
    pub environments: Arc<dyn EnvironmentRepository>,
    pub sink: Arc<dyn EvaluationSink>,
    pub api_key: Arc<str>,
}

impl AppState {
    /// Empty in-memory stores with evaluations reported through `tracing`.
    pub fn in_memory(api_key: impl Into<Arc<str>>) -> Self {
        Self {
            flags: Arc::new(InMemoryFlagRepository::new()),
            environments: Arc::new(InMemoryEnvironmentRepository::new()),
            sink: Arc::new(TracingSink),
            api_key: api_key.into(),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn EvaluationSink>) -> Self {
        self.sink = sink;
        self
    }
}
