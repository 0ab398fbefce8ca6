use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::{
    chain::{Chain, UnsupportedChain},
    receipt::BlockQuery,
    state::AppState,
};

pub const BLOCK_INSIGHTS_PATH: &str = "/api/blockInsights";

const METHOD_NOT_ALLOWED_MESSAGE: &str = "Only POST requests allowed";
const INTERNAL_ERROR_MESSAGE: &str = "something went wrong, check the log in your terminal";

pub fn routes(ctx: Arc<AppState>) -> Router {
    Router::new()
        .route(
            BLOCK_INSIGHTS_PATH,
            post(block_insights).fallback(method_not_allowed),
        )
        .route("/info", get(info))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Request body as sent by browsers, which post it without a JSON content
/// type, so it is parsed from raw bytes.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockQueryRequest {
    block_hash: String,
    chain: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Block hash must not be empty")]
    EmptyBlockHash,
    #[error(transparent)]
    UnsupportedChain(#[from] UnsupportedChain),
}

fn parse_query(body: &[u8]) -> Result<BlockQuery, RequestError> {
    let request: BlockQueryRequest =
        serde_json::from_slice(body).map_err(|err| RequestError::MalformedBody(err.to_string()))?;

    let block_hash = request.block_hash.trim();
    if block_hash.is_empty() {
        return Err(RequestError::EmptyBlockHash);
    }

    let chain = match request.chain {
        Some(chain) => chain.parse::<Chain>()?,
        None => Chain::default(),
    };

    Ok(BlockQuery::new(block_hash, chain))
}

/// Receipts are returned exactly as the provider reported them.
#[instrument(skip_all)]
async fn block_insights(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<Vec<Value>>> {
    let body = body.map_err(AppError::BodyRejected)?;
    let query = parse_query(&body).map_err(AppError::BadRequest)?;

    tracing::info!(
        "Looking up receipts of block {} on {}",
        query.block_hash,
        query.chain
    );

    let receipts = tokio::time::timeout(
        state.provider_timeout,
        state
            .provider
            .get_transaction_receipts(query.chain, &query.block_hash),
    )
    .await
    .map_err(|_| anyhow!("Provider call timed out after {:?}", state.provider_timeout))??;

    Ok(Json(receipts))
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

#[instrument]
async fn info() -> impl IntoResponse {
    #[derive(Serialize)]
    struct InfoResponse {
        name: String,
        version: String,
    }

    Json(InfoResponse {
        name: "block-insights".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

type AppResult<T> = Result<T, AppError>;

enum AppError {
    MethodNotAllowed,
    BodyRejected(BytesRejection),
    BadRequest(RequestError),
    ProviderFailure(anyhow::Error),
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::ProviderFailure(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "POST")],
                Json(json!({ "message": METHOD_NOT_ALLOWED_MESSAGE })),
            )
                .into_response(),
            Self::BodyRejected(rejection) => {
                tracing::warn!("Rejected request body: {rejection}");
                (
                    rejection.status(),
                    Json(json!({ "message": rejection.body_text() })),
                )
                    .into_response()
            }
            Self::BadRequest(err) => {
                tracing::warn!("Bad request: {err}");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": err.to_string() })),
                )
                    .into_response()
            }
            Self::ProviderFailure(err) => {
                tracing::warn!("Provider failure: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": INTERNAL_ERROR_MESSAGE })),
                )
                    .into_response()
            }
        }
    }
}
