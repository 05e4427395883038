//! HTTP surface for the aggregation service
//!
//! One query endpoint plus a health check:
//! - `GET /toxicity?drug=<name>&disease=<name>&retmax=<n>`: the toxicity
//!   report for a (drug, disease) pair
//! - `GET /health`: liveness probe

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::MedToxError;
use crate::models::{ToxicityQuery, ToxicityReport, DEFAULT_MAX_RESULTS};
use crate::MedToxClient;

/// Query string parameters of `GET /toxicity`.
#[derive(Debug, Deserialize)]
pub struct ToxicityParams {
    pub drug: String,
    pub disease: String,
    #[serde(default = "default_retmax")]
    pub retmax: usize,
}

fn default_retmax() -> usize {
    DEFAULT_MAX_RESULTS
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Error wrapper mapping upstream failures onto HTTP statuses.
///
/// Validation problems are the caller's fault (400); everything else is a
/// failed upstream conversation (502) whose status and truncated body are
/// carried in the message.
struct ApiFailure(MedToxError);

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            MedToxError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<MedToxError> for ApiFailure {
    fn from(err: MedToxError) -> Self {
        Self(err)
    }
}

/// Build the application router around a shared client.
pub fn create_router(client: MedToxClient) -> Router {
    Router::new()
        .route("/toxicity", get(get_toxicity))
        .route("/health", get(health_check))
        .with_state(client)
}

async fn get_toxicity(
    State(client): State<MedToxClient>,
    Query(params): Query<ToxicityParams>,
) -> Result<Json<ToxicityReport>, ApiFailure> {
    info!(
        drug = %params.drug,
        disease = %params.disease,
        retmax = params.retmax,
        "Toxicity query received"
    );

    let query = ToxicityQuery::new(params.drug, params.disease).with_max_results(params.retmax);

    let report = client.toxicity_report(&query).await.map_err(|err| {
        warn!(error = %err, "Toxicity query failed");
        ApiFailure(err)
    })?;

    Ok(Json(report))
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
