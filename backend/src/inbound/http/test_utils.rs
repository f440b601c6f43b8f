//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, web};

use crate::domain::ports::{
    MockCatalogQuery, MockDraftCommand, MockEmailChangeCommand, MockLoginService,
    MockProfileCommand, MockProfileQuery, MockSignupCommand,
};
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// State whose ports all panic when touched; tests override the ones they
/// exercise so any unexpected call fails loudly.
pub fn stub_state() -> HttpState {
    HttpState {
        login: Arc::new(MockLoginService::new()),
        signup: Arc::new(MockSignupCommand::new()),
        profile_query: Arc::new(MockProfileQuery::new()),
        profile_command: Arc::new(MockProfileCommand::new()),
        email_change: Arc::new(MockEmailChangeCommand::new()),
        catalog: Arc::new(MockCatalogQuery::new()),
        draft: Arc::new(MockDraftCommand::new()),
    }
}

/// Assemble the full `/api/v1` surface over the given state, wrapped in the
/// test session middleware.
pub fn test_app_with(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(crate::inbound::http::auth::signup)
                .service(crate::inbound::http::auth::login)
                .service(crate::inbound::http::auth::logout)
                .service(crate::inbound::http::users::current_user)
                .service(crate::inbound::http::users::update_profile)
                .service(crate::inbound::http::users::change_password)
                .service(crate::inbound::http::users::request_email_change)
                .service(crate::inbound::http::users::verify_email_change)
                .service(crate::inbound::http::users::user_budget)
                .service(crate::inbound::http::draft::list_players)
                .service(crate::inbound::http::draft::create_team),
        )
}

/// Log in through the real login endpoint and return the session cookie.
///
/// The state's login port must be primed to accept the credentials.
pub async fn login_and_get_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> actix_web::cookie::Cookie<'static> {
    let login_req = actix_web::test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&crate::inbound::http::auth::LoginBody {
            email: "user@example.com".into(),
            password: "Passw0rd!".into(),
        })
        .to_request();
    let login_res = actix_web::test::call_service(app, login_req).await;
    assert!(login_res.status().is_success());
    login_res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}
