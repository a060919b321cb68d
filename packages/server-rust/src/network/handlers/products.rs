//! `/products` handler: the HTTP side of the transport boundary.

use axum::extract::State;
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use products_core::Request;
use tower::ServiceExt;
use tracing::{debug, warn};

use super::AppState;
use crate::api::ApiResponse;
use crate::service::validation::{ValidationCause, ValidationError};

/// Accepts any method; the resolver decides which ones are supported.
///
/// Requests arriving after draining has begun get a 503. A body that is not
/// valid UTF-8 is a validation failure (400) and never reaches the resolver.
pub async fn products_handler(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Response {
    if state.shutdown.is_draining() {
        debug!(%method, "Rejected product request while draining");
        return ApiResponse::unavailable().into_response();
    }
    let _guard = state.shutdown.track_request();

    let text = match std::str::from_utf8(&body) {
        Ok(text) => text,
        Err(err) => {
            warn!(%method, error = %err, "Rejected non UTF-8 request body");
            let err = ValidationError::from(ValidationCause::InvalidEncoding(err));
            return ApiResponse::from_result(Err(err.into())).into_response();
        }
    };

    let request = Request::new(text, method.as_str());
    match state.api.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
