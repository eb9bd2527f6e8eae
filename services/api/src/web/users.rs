//! services/api/src/web/users.rs
//!
//! Account signup, email verification and login. The front-end matches on
//! token strings (`SIGNUP_SUCCESS`, `INVALID_EMAIL`, ...) rather than on
//! status codes alone, so messages here are part of the contract.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use regex::Regex;
use std::sync::{Arc, OnceLock};
use tracing::warn;
use utoipa::ToSchema;

use techpro_core::domain::{NewUser, PublicUser, VerifyOutcome};
use techpro_core::ports::PortError;

use crate::web::envelope::{fail, port_failure, Envelope, Failure};
use crate::web::state::AppState;

#[derive(serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(serde::Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Treats missing and empty strings the same way the old form handler did.
fn required(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

fn verification_email_body(app_url: &str, first_name: &str, token: &str) -> String {
    let link = format!("{}/api/users/verify/{}", app_url, token);
    format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
           <h2>Welcome to Tech-Pro AI, {first_name}!</h2>\
           <p>Thanks for signing up. Please confirm your email address to activate your account.</p>\
           <p style=\"margin: 24px 0;\">\
             <a href=\"{link}\" style=\"background: #4f46e5; color: #ffffff; padding: 12px 24px; \
                text-decoration: none; border-radius: 6px;\">Verify Email</a>\
           </p>\
           <p>If the button does not work, copy this link into your browser:</p>\
           <p>{link}</p>\
         </div>"
    )
}

/// Register a new account and send the verification email.
#[utoipa::path(
    post,
    path = "/api/users/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created, verification pending"),
        (status = 400, description = "MISSING_FIELDS, INVALID_EMAIL or ALREADY_REGISTERED"),
        (status = 500, description = "SERVER_ERROR")
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<Envelope<PublicUser>>), Failure> {
    let (first_name, last_name, email, password) = match (
        required(body.first_name),
        required(body.last_name),
        required(body.email),
        required(body.password),
    ) {
        (Some(f), Some(l), Some(e), Some(p)) => (f, l, e, p),
        _ => return Err(fail(StatusCode::BAD_REQUEST, "MISSING_FIELDS")),
    };

    if !email_regex().is_match(&email) {
        return Err(fail(StatusCode::BAD_REQUEST, "INVALID_EMAIL"));
    }

    let user = state
        .users
        .signup(NewUser {
            first_name,
            last_name,
            email,
            password,
        })
        .await
        .map_err(|e| match e {
            PortError::Conflict(_) => fail(StatusCode::BAD_REQUEST, "ALREADY_REGISTERED"),
            other => port_failure(other, "SERVER_ERROR"),
        })?;

    let mut message = "SIGNUP_SUCCESS";
    if let Some(token) = &user.verification_token {
        let html = verification_email_body(&state.config.app_url, &user.first_name, token);
        if state
            .mailer
            .send(&user.email, "Verify your Tech-Pro AI account", &html)
            .await
        {
            message = "SIGNUP_SUCCESS_EMAIL_SENT";
        } else {
            warn!("Signup completed but verification email was not sent");
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(PublicUser::from(user)).with_message(message)),
    ))
}

/// Verification link target; the user lands here from their inbox, so the
/// success path redirects to the login page instead of returning JSON.
#[utoipa::path(
    get,
    path = "/api/users/verify/{token}",
    params(("token" = String, Path, description = "Verification token from the signup email")),
    responses(
        (status = 303, description = "Verified; redirect to the login page"),
        (status = 200, description = "Token already consumed"),
        (status = 404, description = "Unknown token")
    )
)]
pub async fn verify_email_handler(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Response {
    match state.users.verify_token(&token).await {
        Ok(VerifyOutcome::Verified(_)) => {
            let target = format!("{}/A3Login.html?verified=true", state.config.app_url);
            Redirect::to(&target).into_response()
        }
        Ok(VerifyOutcome::AlreadyVerified) => Json(Envelope::message(
            "Email already verified. You can now log in.",
        ))
        .into_response(),
        Err(e) => port_failure(e, "Failed to verify email").into_response(),
    }
}

/// Authenticate with email and password.
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "LOGIN_SUCCESS with the public user record"),
        (status = 400, description = "MISSING_FIELDS"),
        (status = 401, description = "INVALID_CREDENTIALS")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Envelope<PublicUser>>, Failure> {
    let (email, password) = match (required(body.email), required(body.password)) {
        (Some(e), Some(p)) => (e, p),
        _ => return Err(fail(StatusCode::BAD_REQUEST, "MISSING_FIELDS")),
    };

    let user = state
        .users
        .login(&email, &password)
        .await
        .map_err(|e| port_failure(e, "SERVER_ERROR"))?;
    Ok(Json(Envelope::data(user).with_message("LOGIN_SUCCESS")))
}

/// List every account, passwords stripped.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All accounts with a count"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_users_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<PublicUser>>>, Failure> {
    let users = state
        .users
        .list()
        .await
        .map_err(|e| port_failure(e, "Failed to retrieve users"))?;
    let count = users.len();
    Ok(Json(Envelope::data(users).with_count(count)))
}
