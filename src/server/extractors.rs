//! Custom extractors for the HTTP server.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

/// Rejection type for `JsonBody`
pub struct JsonBodyRejection {
    status: StatusCode,
    message: String,
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        let body = crate::error::ErrorResponse {
            error: crate::error::ErrorDetail {
                code: "INVALID_BODY",
                message: self.message,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for JsonBodyRejection {
    fn from(rejection: JsonRejection) -> Self {
        // Oversized bodies keep their 413; everything else is a client error
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };

        Self {
            status,
            message: rejection.body_text(),
        }
    }
}

/// Extractor for JSON request bodies.
///
/// Same as `axum::Json`, but failures are reported with the gateway's
/// `{ "error": { "code", "message" } }` shape instead of plain text.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}
