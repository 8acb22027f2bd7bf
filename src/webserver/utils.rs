/// Response helpers shared by all route handlers
///
/// Every API response carries a `success` flag and a `timestamp`, matching
/// the envelope the dashboard expects.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::PantheonError;
use crate::logger::{self, LogTag};

#[derive(Serialize)]
struct ApiEnvelope<T: Serialize> {
    success: bool,
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    data: T,
}

#[derive(Serialize)]
struct ApiError {
    success: bool,
    timestamp: DateTime<Utc>,
    error: String,
}

/// 200 response wrapping `data` in the standard envelope
pub fn success_response<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(ApiEnvelope {
            success: true,
            timestamp: Utc::now(),
            data,
        }),
    )
        .into_response()
}

/// Error response with an explicit status code
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ApiError {
            success: false,
            timestamp: Utc::now(),
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Map a crate error to an HTTP response, logging it with context
pub fn failure_response(context: &str, err: &PantheonError) -> Response {
    logger::error(LogTag::Webserver, &format!("{}: {}", context, err));

    let status = match err {
        PantheonError::Network(_) => StatusCode::BAD_GATEWAY,
        PantheonError::Data(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    error_response(status, &format!("{}: {}", context, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{DataError, NetworkError};

    #[test]
    fn upstream_errors_map_to_bad_gateway() {
        let err = PantheonError::Network(NetworkError::Generic {
            message: "timeout".to_string(),
        });
        let response = failure_response("Ticker fetch failed", &err);
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn data_errors_map_to_bad_request() {
        let err = PantheonError::Data(DataError::UnknownTimeframe {
            value: "2h".to_string(),
        });
        let response = failure_response("Candles fetch failed", &err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
