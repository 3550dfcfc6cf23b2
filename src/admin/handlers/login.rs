use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    admin::{views, AdminState},
    api::{dispatch, ApiRequest, FailureKind, RequestResult, UNKNOWN_ERROR_MESSAGE},
    guard::{DEFAULT_SECTION_PATH, LOGIN_PATH},
    session::{RequestSession, Session, SessionStore, UserLogged},
};

pub const LOGIN_ENDPOINT: &str = "/login";

// No Debug: the password must never reach the logs.
#[derive(Deserialize, Serialize)]
pub struct Credentials {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    user: UserLogged,
    access_token: String,
}

pub async fn form() -> Html<String> {
    Html(views::login_page("", None))
}

/// Exchange credentials for a session and store it in the cookie.
pub async fn submit(
    Extension(state): Extension<Arc<AdminState>>,
    jar: CookieJar,
    Form(credentials): Form<Credentials>,
) -> Response {
    let email = credentials.email.trim().to_string();

    let request = match ApiRequest::post(LOGIN_ENDPOINT).json(&credentials) {
        Ok(request) => request,
        Err(err) => {
            error!("Failed to encode login request: {err}");
            return failed_login(StatusCode::INTERNAL_SERVER_ERROR, &email, UNKNOWN_ERROR_MESSAGE);
        }
    };

    // Login never carries a previous token.
    let result =
        dispatch::<LoginResponse>(state.primary(), &RequestSession::anonymous(), request).await;

    match result {
        RequestResult::Success { data, .. } => {
            let session = Session::new(data.user, data.access_token);
            match session.to_cookie(&state.session_cookie()) {
                Ok(cookie) => {
                    info!(user_id = %session.user.id, "User signed in");
                    (jar.add(cookie), Redirect::to(DEFAULT_SECTION_PATH)).into_response()
                }
                Err(err) => {
                    error!("Failed to encode session cookie: {err}");
                    failed_login(StatusCode::INTERNAL_SERVER_ERROR, &email, UNKNOWN_ERROR_MESSAGE)
                }
            }
        }
        RequestResult::Failure(failure) => {
            let status = if failure.kind == FailureKind::Transport {
                StatusCode::BAD_GATEWAY
            } else {
                StatusCode::UNAUTHORIZED
            };
            failed_login(status, &email, &failure.message)
        }
    }
}

pub async fn logout(Extension(session): Extension<RequestSession>) -> Redirect {
    if let Some(current) = session.read() {
        info!(user_id = %current.user.id, "User signed out");
    }
    session.clear();
    Redirect::to(LOGIN_PATH)
}

fn failed_login(status: StatusCode, email: &str, message: &str) -> Response {
    (status, Html(views::login_page(email, Some(message)))).into_response()
}
