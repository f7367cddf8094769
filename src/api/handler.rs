use super::error::ApiError;
use super::session_cookie::{clear_session_cookie, session_cookie};
use crate::application_port::{
    AuthService, CallbackInput, ContactsService, ResolvedCredential,
};
use crate::domain_model::{DomainGroup, Profile, SessionId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::Uri;
use warp::http::header::SET_COOKIE;
use warp::{self, reject};

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn index() -> Result<impl warp::Reply, warp::Rejection> {
    Ok(warp::reply::json(&IndexResponse {
        message: "rolodex API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    }))
}

pub async fn login(
    session_id: Option<SessionId>,
    secure_cookies: bool,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let redirect = auth_service
        .begin_login(session_id)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    let uri: Uri = redirect
        .authorize_url
        .parse()
        .map_err(ApiError::internal)
        .map_err(reject::custom)?;
    Ok(warp::reply::with_header(
        warp::redirect::found(uri),
        SET_COOKIE,
        session_cookie(&redirect.session_id, secure_cookies),
    ))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

pub async fn callback(
    query: CallbackQuery,
    session_id: Option<SessionId>,
    secure_cookies: bool,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let callback = CallbackInput {
        state: query.state,
        code: query.code,
        error: query.error,
        error_description: query.error_description,
    };
    let outcome = auth_service
        .complete_login(session_id, callback)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    let uri: Uri = outcome
        .redirect_url
        .parse()
        .map_err(ApiError::internal)
        .map_err(reject::custom)?;
    Ok(warp::reply::with_header(
        warp::redirect::found(uri),
        SET_COOKIE,
        session_cookie(&outcome.session_id, secure_cookies),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ExchangeTokenRequest {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExchangeTokenResponse {
    pub success: bool,
}

pub async fn exchange_token(
    body: ExchangeTokenRequest,
    session_id: Option<SessionId>,
    secure_cookies: bool,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    // An absent and an empty token read the same.
    let token = body
        .token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| reject::custom(ApiError::MissingToken))?;

    let session_id = auth_service
        .exchange_temp_token(session_id, &token)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::with_header(
        warp::reply::json(&ExchangeTokenResponse { success: true }),
        SET_COOKIE,
        session_cookie(&session_id, secure_cookies),
    ))
}

#[derive(Debug, Serialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

pub async fn status(
    authorization: Option<String>,
    session_id: Option<SessionId>,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let status = auth_service
        .status(authorization.as_deref(), session_id)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&AuthStatusResponse {
        authenticated: status.authenticated,
        user_id: status.user_id,
        access_token: status.access_token,
    }))
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: &'static str,
}

pub async fn logout(
    session_id: Option<SessionId>,
    secure_cookies: bool,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    auth_service
        .logout(session_id)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::with_header(
        warp::reply::json(&LogoutResponse {
            message: "Logged out successfully",
        }),
        SET_COOKIE,
        clear_session_cookie(secure_cookies),
    ))
}

#[derive(Debug, Serialize)]
pub struct ContactsResponse {
    pub success: bool,
    pub total_domains: usize,
    pub total_contacts: usize,
    pub data: Vec<DomainGroup>,
}

pub async fn contacts(
    credential: ResolvedCredential,
    session_id: Option<SessionId>,
    contacts_service: Arc<dyn ContactsService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let grouped = contacts_service
        .fetch_contacts(&credential, session_id)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ContactsResponse {
        success: true,
        total_domains: grouped.total_domains,
        total_contacts: grouped.total_contacts,
        data: grouped.data,
    }))
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: Profile,
}

pub async fn profile(
    credential: ResolvedCredential,
    _session_id: Option<SessionId>,
    contacts_service: Arc<dyn ContactsService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = contacts_service
        .fetch_profile(&credential)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ProfileResponse {
        success: true,
        user,
    }))
}
