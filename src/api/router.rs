use super::error::ApiError;
use super::handler;
use super::handler::CallbackQuery;
use super::session_cookie::SESSION_COOKIE_NAME;
use crate::application_port::{CredentialResolver, ResolvedCredential};
use crate::domain_model::SessionId;
use crate::server::Server;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, reject};

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let index = warp::get()
        .and(warp::path::end())
        .and_then(handler::index);

    let login = warp::get()
        .and(warp::path("auth"))
        .and(warp::path("login"))
        .and(warp::path::end())
        .and(session_id())
        .and(with_flag(server.secure_cookies))
        .and(with(server.auth_service.clone()))
        .and_then(handler::login);

    let callback = warp::get()
        .and(warp::path("auth"))
        .and(warp::path("callback"))
        .and(warp::path::end())
        .and(warp::query::<CallbackQuery>())
        .and(session_id())
        .and(with_flag(server.secure_cookies))
        .and(with(server.auth_service.clone()))
        .and_then(handler::callback);

    let exchange_token = warp::post()
        .and(warp::path("auth"))
        .and(warp::path("exchange-token"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(session_id())
        .and(with_flag(server.secure_cookies))
        .and(with(server.auth_service.clone()))
        .and_then(handler::exchange_token);

    let status = warp::get()
        .and(warp::path("auth"))
        .and(warp::path("status"))
        .and(warp::path::end())
        .and(warp::header::optional::<String>("authorization"))
        .and(session_id())
        .and(with(server.auth_service.clone()))
        .and_then(handler::status);

    let logout = warp::get()
        .and(warp::path("auth"))
        .and(warp::path("logout"))
        .and(warp::path::end())
        .and(session_id())
        .and(with_flag(server.secure_cookies))
        .and(with(server.auth_service.clone()))
        .and_then(handler::logout);

    let contacts = warp::get()
        .and(warp::path("api"))
        .and(warp::path("contacts"))
        .and(warp::path::end())
        .and(with_credential(server.credential_resolver.clone()))
        .and(with(server.contacts_service.clone()))
        .and_then(handler::contacts);

    let profile = warp::get()
        .and(warp::path("api"))
        .and(warp::path("user"))
        .and(warp::path("profile"))
        .and(warp::path::end())
        .and(with_credential(server.credential_resolver.clone()))
        .and(with(server.contacts_service.clone()))
        .and_then(handler::profile);

    index
        .or(login)
        .or(callback)
        .or(exchange_token)
        .or(status)
        .or(logout)
        .or(contacts)
        .or(profile)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

fn with_flag(flag: bool) -> impl Filter<Extract = (bool,), Error = Infallible> + Clone {
    warp::any().map(move || flag)
}

/// The session cookie, read leniently: a malformed id reads as no session.
fn session_id() -> impl Filter<Extract = (Option<SessionId>,), Error = Infallible> + Clone {
    warp::cookie::optional::<String>(SESSION_COOKIE_NAME)
        .map(|cookie: Option<String>| cookie.and_then(|value| value.parse::<SessionId>().ok()))
}

/// Guard for the `/api` routes: resolves the request's credential or rejects
/// with 401 before the handler runs.
fn with_credential(
    resolver: Arc<dyn CredentialResolver>,
) -> impl Filter<Extract = (ResolvedCredential, Option<SessionId>), Error = warp::Rejection> + Clone
{
    warp::header::optional::<String>("authorization")
        .and(session_id())
        .and_then(
            move |authorization: Option<String>, session_id: Option<SessionId>| {
                let resolver = resolver.clone();
                async move {
                    let credential = resolver
                        .resolve(authorization.as_deref(), session_id)
                        .await
                        .map_err(ApiError::from)
                        .map_err(reject::custom)?;
                    Ok::<_, warp::Rejection>((credential, session_id))
                }
            },
        )
        .untuple_one()
}
