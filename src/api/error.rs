use crate::application_port::{AuthError, GatewayError, ResolveError};
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

/// Every client-visible failure. The display string is exactly what lands in
/// the response's `error` field.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Invalid state parameter")]
    InvalidState,
    #[error("{0}")]
    Provider(String),
    #[error("No code received")]
    MissingCode,
    #[error("No token provided")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,
    #[error("Token expired")]
    SessionExpired,
    #[error("{0}")]
    Upstream(String),
    #[error("Internal error")]
    Internal,
}

impl ApiError {
    /// Log the real cause, hand the client an opaque error.
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiError {
        warn!("Internal error: {}", error);
        ApiError::Internal
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::InvalidState => StatusCode::BAD_REQUEST,
            ApiError::Provider(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingCode => StatusCode::BAD_REQUEST,
            ApiError::MissingToken => StatusCode::BAD_REQUEST,
            ApiError::InvalidOrExpiredToken => StatusCode::UNAUTHORIZED,
            ApiError::SessionExpired => StatusCode::UNAUTHORIZED,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl reject::Reject for ApiError {}

impl From<ResolveError> for ApiError {
    fn from(error: ResolveError) -> Self {
        match error {
            ResolveError::Unauthenticated => ApiError::Unauthenticated,
            ResolveError::Store(e) => ApiError::internal(e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidState => ApiError::InvalidState,
            AuthError::Provider(message) => ApiError::Provider(message),
            AuthError::MissingCode => ApiError::MissingCode,
            AuthError::InvalidOrExpiredToken => ApiError::InvalidOrExpiredToken,
            AuthError::Store(e) => ApiError::internal(e),
            AuthError::InternalError(e) => ApiError::internal(e),
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::SessionExpired => ApiError::SessionExpired,
            GatewayError::Store(e) => ApiError::internal(e),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (status, message) = if let Some(err) = err.find::<ApiError>() {
        (err.status(), err.to_string())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if err
        .find::<warp::filters::body::BodyDeserializeError>()
        .is_some()
    {
        // The only JSON body in the API is the exchange-token request.
        (StatusCode::BAD_REQUEST, "No token provided".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed".to_string(),
        )
    } else if err.find::<warp::cors::CorsForbidden>().is_some() {
        (StatusCode::FORBIDDEN, "CORS request forbidden".to_string())
    } else {
        warn!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
    };

    let json = warp::reply::json(&ErrorBody { error: message });
    Ok(warp::reply::with_status(json, status))
}
