//! Authentication endpoints: signup, login, logout.
//!
//! ```text
//! POST /api/v1/signup {"email":"a@b.it","password":"Passw0rd","firstName":"A"}
//! POST /api/v1/login  {"email":"a@b.it","password":"Passw0rd"}
//! POST /api/v1/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    ApiResult, Credentials, CredentialsValidationError, EmailAddress, Error, Password,
    SignupRequest,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Signup request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct SignupBody {
    /// Email address; normalised to lowercase.
    pub email: String,
    /// Password; must satisfy the strength policy.
    pub password: String,
    /// Optional given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Optional family name.
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct LoginBody {
    /// Registered email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

fn map_credentials_error(err: &CredentialsValidationError) -> Error {
    let field = match err {
        CredentialsValidationError::Email(_) => "email",
        CredentialsValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Create an account with email and password.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupBody,
    responses(
        (status = 200, description = "Account created"),
        (status = 400, description = "Invalid email or weak password", body = Error),
        (status = 409, description = "Email already in use", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let email = EmailAddress::new(&body.email).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "email" }))
    })?;
    let password = Password::new(body.password).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "password" }))
    })?;

    let request = SignupRequest::new(
        email,
        password,
        body.first_name.as_deref(),
        body.last_name.as_deref(),
    );
    let _user_id = state.signup.signup(request).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let credentials = Credentials::try_from_parts(&body.email, &body.password)
        .map_err(|err| map_credentials_error(&err))?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(user_id)?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// End the current session; safe to call when not logged in.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 200, description = "Session cleared")
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(json!({ "success": true }))
}
