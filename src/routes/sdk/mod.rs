pub mod routes;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::evaluation::{EvaluationContext, EvaluationResult};
use crate::repository::FlagRecord;

#[derive(Debug, Default, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub context: EvaluationContext,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub flags: BTreeMap<String, EvaluationResult>,
}

#[derive(Debug, Serialize)]
pub struct ClientFlagsResponse {
    pub flags: Vec<Arc<FlagRecord>>,
}
