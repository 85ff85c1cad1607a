use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(
        "both downPaymentAmount and downPaymentPercent were given; set downPaymentEdited to \"amount\" or \"percent\""
    )]
    AmbiguousDownPayment,

    #[error("downPaymentEdited is \"{edited}\" but {field} was not given")]
    MissingDownPayment {
        edited: &'static str,
        field: &'static str,
    },

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::AmbiguousDownPayment | ApiError::MissingDownPayment { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Render(_) | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            tracing::warn!(error = %self, "rejected calculation request");
        } else {
            tracing::error!(error = %self, "calculation request failed");
        }
        let mut response = (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response();
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            header::HeaderValue::from_static("no-store"),
        );
        response
    }
}
