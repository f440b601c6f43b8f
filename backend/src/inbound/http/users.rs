//! Authenticated profile endpoints.
//!
//! ```text
//! GET  /api/v1/me
//! PUT  /api/v1/me                  {"name":"...","firstName":"...","lastName":"..."}
//! POST /api/v1/me/password         {"password":"...","confirmPassword":"..."}
//! POST /api/v1/me/email            {"email":"new@example.com"}
//! GET  /api/v1/me/email/verify?token=...
//! GET  /api/v1/me/budget
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    ApiResult, EmailAddress, Error, Password, ProfileChanges, UserId, UserProfile,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Profile payload returned by the `/me` endpoints.
///
/// The password hash never appears here; only its presence does.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    /// Stable identifier.
    pub id: UserId,
    /// Normalised email address.
    pub email: String,
    /// Free-form display name.
    pub name: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// When the email address was verified, if ever.
    #[schema(value_type = Option<String>, format = DateTime)]
    pub email_verified: Option<DateTime<Utc>>,
    /// Account creation instant.
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    /// Whether a password is set.
    pub has_password: bool,
    /// Whether a Google account is linked.
    pub has_google_account: bool,
    /// Remaining draft budget in credits.
    pub budget: i32,
    /// Whether a team has been drafted.
    pub has_team: bool,
}

impl From<UserProfile> for ProfileBody {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email.into(),
            name: profile.display_name,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email_verified: profile.email_verified_at,
            created_at: profile.created_at,
            has_password: profile.has_password,
            has_google_account: profile.has_google_account,
            budget: profile.budget,
            has_team: profile.has_team,
        }
    }
}

/// Profile update body; only provided fields change, empty strings clear.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileBody {
    /// Display name change.
    #[serde(default)]
    pub name: Option<String>,
    /// Given name change.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name change.
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Password change body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ChangePasswordBody {
    /// The new password.
    pub password: String,
    /// Must match `password`.
    pub confirm_password: String,
}

/// Email change request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct EmailChangeBody {
    /// The address to switch to.
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct VerifyQuery {
    token: String,
}

/// Budget payload for the draft wizard.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBody {
    /// Remaining draft budget in credits.
    pub budget: i32,
}

/// Fetch the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Profile", body = ProfileBody),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "User no longer exists", body = Error)
    ),
    tags = ["me"],
    operation_id = "currentUser"
)]
#[get("/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileBody>> {
    let user_id = session.require_user_id()?;
    let profile = state.profile_query.fetch_profile(user_id).await?;
    Ok(web::Json(profile.into()))
}

/// Update profile fields; absent fields are left untouched.
#[utoipa::path(
    put,
    path = "/api/v1/me",
    request_body = UpdateProfileBody,
    responses(
        (status = 200, description = "Updated profile", body = ProfileBody),
        (status = 400, description = "No fields to update", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["me"],
    operation_id = "updateProfile"
)]
#[put("/me")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateProfileBody>,
) -> ApiResult<web::Json<ProfileBody>> {
    let user_id = session.require_user_id()?;
    let body = payload.into_inner();
    let changes = ProfileChanges::from_fields(
        body.name.as_deref(),
        body.first_name.as_deref(),
        body.last_name.as_deref(),
    );
    let profile = state.profile_command.update_profile(user_id, changes).await?;
    Ok(web::Json(profile.into()))
}

/// Set a new password for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/me/password",
    request_body = ChangePasswordBody,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Weak or mismatched password", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["me"],
    operation_id = "changePassword"
)]
#[post("/me/password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ChangePasswordBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let body = payload.into_inner();
    if body.password.is_empty() || body.confirm_password.is_empty() {
        return Err(
            Error::invalid_request("password and confirmation are required")
                .with_details(json!({ "field": "password" })),
        );
    }
    if body.password != body.confirm_password {
        return Err(Error::invalid_request("passwords do not match")
            .with_details(json!({ "field": "confirmPassword" })));
    }
    let password = Password::new(body.password).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "password" }))
    })?;
    state
        .profile_command
        .change_password(user_id, password)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Request an email change; a verification link is mailed to the new address.
#[utoipa::path(
    post,
    path = "/api/v1/me/email",
    request_body = EmailChangeBody,
    responses(
        (status = 200, description = "Verification email sent"),
        (status = 400, description = "Invalid or unavailable address", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Mail service unavailable", body = Error)
    ),
    tags = ["me"],
    operation_id = "requestEmailChange"
)]
#[post("/me/email")]
pub async fn request_email_change(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<EmailChangeBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let email = EmailAddress::new(&payload.email).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "email" }))
    })?;
    state.email_change.request_change(user_id, email).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Apply a pending email change; the token identifies the user.
#[utoipa::path(
    get,
    path = "/api/v1/me/email/verify",
    params(("token" = String, Query, description = "Verification token from the email link")),
    responses(
        (status = 200, description = "Email updated"),
        (status = 400, description = "Invalid or expired token", body = Error),
        (status = 409, description = "Address claimed meanwhile", body = Error)
    ),
    tags = ["me"],
    operation_id = "verifyEmailChange",
    security([])
)]
#[get("/me/email/verify")]
pub async fn verify_email_change(
    state: web::Data<HttpState>,
    query: web::Query<VerifyQuery>,
) -> ApiResult<HttpResponse> {
    state.email_change.confirm_change(&query.token).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Current draft budget for the authenticated user.
#[utoipa::path(
    get,
    path = "/api/v1/me/budget",
    responses(
        (status = 200, description = "Budget", body = BudgetBody),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["me"],
    operation_id = "userBudget"
)]
#[get("/me/budget")]
pub async fn user_budget(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<BudgetBody>> {
    let user_id = session.require_user_id()?;
    let budget = state.profile_query.fetch_budget(user_id).await?;
    Ok(web::Json(BudgetBody { budget }))
}
