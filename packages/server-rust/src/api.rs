//! Transport boundary: runs a request through the pipeline and maps the
//! outcome to a status code and JSON body.
//!
//! [`ProductApi`] is a `tower::Service<Request>` so it composes with
//! [`MetricsLayer`](crate::service::middleware::MetricsLayer) and is driven
//! by the axum handler in [`network::handlers`](crate::network::handlers).

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use products_core::{ProductDto, Request};
use serde::Serialize;
use tower::Service;

use crate::service::operation::{OperationError, OperationResponse};
use crate::service::resolver::OperationResolver;

// ---------------------------------------------------------------------------
// ApiResponse
// ---------------------------------------------------------------------------

/// Error payload nested under `"error"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
}

/// JSON body of an [`ApiResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Product(ProductDto),
    Error { error: ErrorBody },
}

/// Transport-neutral response: a status code and a serializable body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

impl ApiResponse {
    /// Maps a pipeline outcome to its response.
    ///
    /// The match is exhaustive over [`OperationError`]; adding a variant
    /// without a mapping does not compile.
    #[must_use]
    pub fn from_result(result: Result<OperationResponse, OperationError>) -> Self {
        match result {
            Ok(OperationResponse::Created(product)) => Self {
                status: StatusCode::CREATED,
                body: ResponseBody::Product(product),
            },
            Err(err) => {
                let status = match &err {
                    OperationError::InvalidOperation(_) => StatusCode::METHOD_NOT_ALLOWED,
                    OperationError::Validation(_) => StatusCode::BAD_REQUEST,
                    OperationError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                Self::error(status, err.kind(), err.to_string())
            }
        }
    }

    /// Generic 500 for faults that never reached the mapping, such as a
    /// panicking handler.
    #[must_use]
    pub fn internal_fault() -> Self {
        Self::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "InternalError",
            "internal server error".to_string(),
        )
    }

    /// 503 for product requests arriving after draining has begun.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::error(
            StatusCode::SERVICE_UNAVAILABLE,
            "UnavailableError",
            "server is shutting down".to_string(),
        )
    }

    fn error(status: StatusCode, kind: &'static str, message: String) -> Self {
        Self {
            status,
            body: ResponseBody::Error {
                error: ErrorBody { kind, message },
            },
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// ProductApi
// ---------------------------------------------------------------------------

/// Resolves and executes one operation per request.
#[derive(Clone)]
pub struct ProductApi {
    resolver: Arc<OperationResolver>,
}

impl ProductApi {
    #[must_use]
    pub fn new(resolver: Arc<OperationResolver>) -> Self {
        Self { resolver }
    }

    /// Runs `request` through resolve, exec and response mapping.
    pub async fn handle(&self, request: Request) -> ApiResponse {
        let operation = self.resolver.resolve(&request);
        ApiResponse::from_result(operation.exec(&request).await)
    }
}

impl Service<Request> for ProductApi {
    type Response = ApiResponse;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<ApiResponse, Infallible>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let api = self.clone();
        Box::pin(async move { Ok(api.handle(request).await) })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use products_core::{ManualClock, MapConfigProvider, PRODUCTS_TABLE_NAME};
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::service::operation::{InvalidOperationError, ServiceError};
    use crate::service::resolver::CreateProductGraph;
    use crate::service::validation::{ValidationCause, ValidationError};
    use crate::storage::engines::MemoryStorageClient;
    use crate::test_support::RecordingProbe;

    fn api(config: MapConfigProvider) -> (ProductApi, Arc<MemoryStorageClient>) {
        let client = Arc::new(MemoryStorageClient::new());
        let probe = Arc::new(RecordingProbe::default());
        let graph = CreateProductGraph::wire(
            client.clone(),
            Arc::new(config),
            Arc::new(ManualClock::new(1_700_000_000_000)),
            probe.clone(),
        );
        let resolver = Arc::new(OperationResolver::new(graph, probe));
        (ProductApi::new(resolver), client)
    }

    fn configured() -> MapConfigProvider {
        MapConfigProvider::new().with(PRODUCTS_TABLE_NAME, "products")
    }

    fn body_json(response: &ApiResponse) -> serde_json::Value {
        serde_json::to_value(&response.body).unwrap()
    }

    #[test]
    fn invalid_operation_maps_to_405() {
        let response =
            ApiResponse::from_result(Err(InvalidOperationError::new("GET").into()));
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_json(&response),
            json!({ "error": { "kind": "InvalidOperationError", "message": "Invalid operation" } })
        );
    }

    #[test]
    fn validation_error_maps_to_400() {
        let err = ValidationError::from(ValidationCause::MissingField { field: "name" });
        let response = ApiResponse::from_result(Err(err.into()));
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(body_json(&response)["error"]["kind"], "ValidationError");
    }

    #[test]
    fn service_error_maps_to_500() {
        let err = ServiceError::new(anyhow::anyhow!("boom"));
        let response = ApiResponse::from_result(Err(err.into()));
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(&response)["error"]["kind"], "ServiceError");
    }

    #[test]
    fn internal_fault_is_generic_500() {
        let response = ApiResponse::internal_fault();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(&response)["error"]["kind"], "InternalError");
    }

    #[test]
    fn unavailable_is_503() {
        let response = ApiResponse::unavailable();
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(&response)["error"]["kind"], "UnavailableError");
    }

    #[tokio::test]
    async fn post_creates_product() {
        let (api, client) = api(configured());
        let request = Request::new(
            r#"{"name":"baz","description":"bar","price":"9.99"}"#,
            "POST",
        );

        let response = api.oneshot(request).await.unwrap();

        assert_eq!(response.status, StatusCode::CREATED);
        let body = body_json(&response);
        assert_eq!(body["attributes"]["name"], "baz");
        assert_eq!(body["attributes"]["description"], "bar");
        assert_eq!(body["attributes"]["price"], "9.99");
        assert_eq!(body["createdAt"], 1_700_000_000_000_u64);
        assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert_eq!(client.item_count(), 1);
    }

    #[tokio::test]
    async fn get_is_method_not_allowed() {
        let (api, client) = api(configured());

        let response = api.handle(Request::new("foo", "GET")).await;

        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_json(&response)["error"]["kind"], "InvalidOperationError");
        assert_eq!(client.item_count(), 0);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let (api, client) = api(configured());

        let response = api.handle(Request::new("not json", "POST")).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(client.item_count(), 0);
    }

    #[tokio::test]
    async fn missing_table_name_is_internal_error() {
        let (api, _client) = api(MapConfigProvider::new());
        let request = Request::new(
            r#"{"name":"baz","description":"bar","price":"9.99"}"#,
            "POST",
        );

        let response = api.handle(request).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(&response)["error"]["kind"], "ServiceError");
    }
}
