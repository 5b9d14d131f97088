use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::{
    controller::IntegrationController,
    models::{ConfigRequest, InstanceRef, IntegrationResponse, IntegrationView},
    relay::WebhookRelay,
    traits::IntegrationError,
};

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<IntegrationController>,
    pub relay: Arc<WebhookRelay>,
}

impl AppState {
    pub fn new(controller: IntegrationController, relay: WebhookRelay) -> Self {
        Self {
            controller: Arc::new(controller),
            relay: Arc::new(relay),
        }
    }
}

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    message: String,
}

type ApiErrorReply = (StatusCode, Json<ApiErrorBody>);

type ApiResult<T> = Result<Json<T>, ApiErrorReply>;

/// Mounts set/find/webhook under the configured provider path, plus `/healthz`.
pub fn integration_router(state: AppState) -> Router {
    let prefix = state.controller.settings().provider_path().to_string();

    Router::new()
        .route(&format!("/{prefix}/set/{{instance}}"), post(create_integration))
        .route(&format!("/{prefix}/find/{{instance}}"), get(find_integration))
        .route(
            &state.controller.settings().webhook_route(),
            post(receive_webhook),
        )
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn create_integration(
    Path(instance): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<ConfigRequest>,
) -> ApiResult<IntegrationResponse> {
    let instance = instance_ref(instance)?;
    let response = state
        .controller
        .create(&instance, &request)
        .await
        .map_err(map_error)?;
    Ok(Json(response))
}

async fn find_integration(
    Path(instance): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<IntegrationView> {
    let instance = instance_ref(instance)?;
    let view = state.controller.find(&instance).await.map_err(map_error)?;
    Ok(Json(view))
}

async fn receive_webhook(
    Path(instance): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Value> {
    let instance = instance_ref(instance)?;
    let result = state
        .relay
        .receive(&instance, payload)
        .await
        .map_err(map_error)?;
    Ok(Json(result))
}

async fn healthz() -> &'static str {
    "ok"
}

fn instance_ref(name: String) -> Result<InstanceRef, ApiErrorReply> {
    InstanceRef::new(name).map_err(|err| map_error(err.into()))
}

fn map_error(err: IntegrationError) -> ApiErrorReply {
    let (status, error, message) = match err {
        IntegrationError::Validation(err) => {
            (StatusCode::BAD_REQUEST, "validation_error", err.to_string())
        }
        IntegrationError::Persistence(err) => {
            error!(error = %err, "integration store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "persistence_error",
                "persistence failure".to_string(),
            )
        }
        IntegrationError::Processing(err) => (
            StatusCode::BAD_GATEWAY,
            "processing_error",
            format!("{err:#}"),
        ),
    };

    (
        status,
        Json(ApiErrorBody {
            error: error.into(),
            message,
        }),
    )
}
