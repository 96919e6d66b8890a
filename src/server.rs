//! HTTP transport for the pricing operations.

use crate::error::PricingError;
use crate::model::{
    MonthlyCostRequest, MonthlyCostResponse, ProductsRequest, ProductsResponse,
    ServiceFamiliesResponse, ServiceNamesRequest, ServiceNamesResponse,
};
use crate::workflow::PricingWorkflow;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

type AppState = Arc<PricingWorkflow>;

impl PricingError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::ServiceFamilyNotFound { .. } | Self::ProductNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            Self::CurrencyMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::UpstreamRequest { .. } | Self::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for PricingError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(code = self.code(), status = status.as_u16(), "{}", self);

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

impl From<QueryRejection> for PricingError {
    fn from(rejection: QueryRejection) -> Self {
        PricingError::invalid_input("query", rejection.body_text())
    }
}

/// Builds the router over a shared workflow.
pub fn router(workflow: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tools", get(tools))
        .route("/api/service-families", get(service_families))
        .route("/api/service-names", get(service_names))
        .route("/api/products", get(products))
        .route("/api/monthly-cost", get(monthly_cost))
        .with_state(workflow)
}

/// Serves `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, workflow: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(workflow))
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn service_families(State(workflow): State<AppState>) -> Json<ServiceFamiliesResponse> {
    Json(workflow.list_service_families())
}

async fn service_names(
    State(workflow): State<AppState>,
    query: Result<Query<ServiceNamesRequest>, QueryRejection>,
) -> Result<Json<ServiceNamesResponse>, PricingError> {
    let Query(request) = query?;
    Ok(Json(workflow.get_service_names(request).await?))
}

async fn products(
    State(workflow): State<AppState>,
    query: Result<Query<ProductsRequest>, QueryRejection>,
) -> Result<Json<ProductsResponse>, PricingError> {
    let Query(request) = query?;
    Ok(Json(workflow.get_products(request).await?))
}

async fn monthly_cost(
    State(workflow): State<AppState>,
    query: Result<Query<MonthlyCostRequest>, QueryRejection>,
) -> Result<Json<MonthlyCostResponse>, PricingError> {
    let Query(request) = query?;
    Ok(Json(workflow.get_monthly_cost(request).await?))
}

fn param(name: &str, required: bool, description: &str) -> Value {
    json!({ "name": name, "required": required, "description": description })
}

/// Describes the operations in the order a caller is expected to use them.
async fn tools() -> Json<Value> {
    Json(json!([
        {
            "name": "list_service_families",
            "step": 1,
            "path": "/api/service-families",
            "description": "List the official Azure service families.",
            "parameters": []
        },
        {
            "name": "get_service_names",
            "step": 2,
            "path": "/api/service-names",
            "description": "List the service names within a service family.",
            "parameters": [
                param("service_family", true, "Service family, e.g. 'Compute'"),
                param("region", false, "Azure region, defaults to the configured region"),
                param("max_results", false, "Maximum number of names to return")
            ]
        },
        {
            "name": "get_products",
            "step": 3,
            "path": "/api/products",
            "description": "List product names within a service family.",
            "parameters": [
                param("service_family", true, "Service family, e.g. 'Web'"),
                param("region", false, "Azure region, defaults to the configured region"),
                param("type", false, "Price type, e.g. 'Consumption' or 'Reservation'"),
                param("service_name", false, "Exact service name, e.g. 'Azure App Service'"),
                param("product_name_contains", false, "Case-insensitive product name substring"),
                param("limit", false, "Maximum number of products to return")
            ]
        },
        {
            "name": "get_monthly_cost",
            "step": 4,
            "path": "/api/monthly-cost",
            "description": "Compute the monthly cost of a product from its meters. Use the exact product name returned by get_products.",
            "parameters": [
                param("product_name", true, "Exact product name"),
                param("region", false, "Azure region, defaults to the configured region"),
                param("monthly_hours", false, "Hours per month, defaults to 730"),
                param("type", false, "Price type, defaults to 'Consumption'")
            ]
        }
    ]))
}
