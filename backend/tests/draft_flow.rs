//! End-to-end draft flow over the real services and the in-memory store:
//! signup, login, catalog read, budget read, team creation, and the
//! rejection paths the wizard relies on.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use backend::domain::ports::{SeedPlayer, SeedRepository, SeedSchool};
use backend::domain::{
    CatalogService, DraftService, EmailChangeService, PasswordLoginService, ProfileService,
    Role, SignupService,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::email::LogMailer;
use backend::outbound::hashing::BcryptPasswordHasher;
use backend::outbound::memory::MemoryStore;

fn role_of(seed: seed_data::SeedRole) -> Role {
    match seed {
        seed_data::SeedRole::Goalkeeper => Role::Goalkeeper,
        seed_data::SeedRole::Defender => Role::Defender,
        seed_data::SeedRole::Midfielder => Role::Midfielder,
        seed_data::SeedRole::Attacker => Role::Attacker,
    }
}

fn shipped_catalog() -> Vec<SeedSchool> {
    seed_data::catalog()
        .iter()
        .map(|school| SeedSchool {
            name: school.name.to_owned(),
            players: school
                .players
                .iter()
                .map(|player| SeedPlayer {
                    name: player.name.to_owned(),
                    role: role_of(player.role),
                    value: player.value,
                })
                .collect(),
        })
        .collect()
}

async fn seeded_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
    store
        .apply(&shipped_catalog())
        .await
        .expect("catalog seeds");

    let hasher = Arc::new(BcryptPasswordHasher);
    let mailer = Arc::new(LogMailer);

    HttpState {
        login: Arc::new(PasswordLoginService::new(store.clone(), hasher.clone())),
        signup: Arc::new(SignupService::new(store.clone(), hasher.clone())),
        profile_query: Arc::new(ProfileService::new(store.clone(), hasher.clone())),
        profile_command: Arc::new(ProfileService::new(store.clone(), hasher)),
        email_change: Arc::new(EmailChangeService::new(
            store.clone(),
            store.clone(),
            mailer,
            "http://localhost:8080".to_owned(),
        )),
        catalog: Arc::new(CatalogService::new(store.clone())),
        draft: Arc::new(DraftService::new(store.clone(), store.clone(), store)),
    }
}

fn app_over(
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
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();

    App::new().app_data(web::Data::new(state)).wrap(session).service(
        web::scope("/api/v1")
            .service(backend::inbound::http::auth::signup)
            .service(backend::inbound::http::auth::login)
            .service(backend::inbound::http::auth::logout)
            .service(backend::inbound::http::users::current_user)
            .service(backend::inbound::http::users::user_budget)
            .service(backend::inbound::http::draft::list_players)
            .service(backend::inbound::http::draft::create_team),
    )
}

async fn signup_and_login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    email: &str,
) -> Cookie<'static> {
    let signup_res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/signup")
            .set_json(json!({
                "email": email,
                "password": "Passw0rd!",
                "firstName": "Test",
                "lastName": "User"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(signup_res.status(), StatusCode::OK);

    let login_res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": email, "password": "Passw0rd!" }))
            .to_request(),
    )
    .await;
    assert_eq!(login_res.status(), StatusCode::OK);
    login_res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}

#[derive(Debug, Clone)]
struct ListedPlayer {
    id: Uuid,
    role: String,
    value: i32,
}

async fn fetch_catalog(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    cookie: &Cookie<'static>,
) -> Vec<ListedPlayer> {
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri("/api/v1/players")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    body.as_array()
        .expect("player array")
        .iter()
        .map(|player| ListedPlayer {
            id: player
                .get("id")
                .and_then(Value::as_str)
                .and_then(|raw| raw.parse().ok())
                .expect("player id"),
            role: player
                .get("role")
                .and_then(Value::as_str)
                .expect("player role")
                .to_owned(),
            value: i32::try_from(
                player.get("value").and_then(Value::as_i64).expect("value"),
            )
            .expect("value fits"),
        })
        .collect()
}

/// Pick a quota-complete roster, taking the cheapest or priciest players of
/// each role first.
fn pick_roster(catalog: &[ListedPlayer], cheapest: bool) -> (Vec<Uuid>, i32) {
    let quotas = [("GK", 2), ("DEF", 5), ("MID", 5), ("ATT", 3)];
    let mut ids = Vec::with_capacity(15);
    let mut total = 0;
    for (role, quota) in quotas {
        let mut of_role: Vec<&ListedPlayer> =
            catalog.iter().filter(|p| p.role == role).collect();
        of_role.sort_by_key(|p| p.value);
        if !cheapest {
            of_role.reverse();
        }
        for player in of_role.into_iter().take(quota) {
            ids.push(player.id);
            total += player.value;
        }
    }
    (ids, total)
}

async fn budget_of(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    cookie: &Cookie<'static>,
) -> i64 {
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri("/api/v1/me/budget")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    body.get("budget").and_then(Value::as_i64).expect("budget")
}

#[actix_web::test]
async fn catalog_is_ordered_for_the_wizard() {
    let app = test::init_service(app_over(seeded_state().await)).await;
    let cookie = signup_and_login(&app, "reader@example.com").await;

    let catalog = fetch_catalog(&app, &cookie).await;
    assert_eq!(catalog.len(), 45);

    // Role ascending, value descending within each role.
    let role_rank = |role: &str| match role {
        "GK" => 0,
        "DEF" => 1,
        "MID" => 2,
        _ => 3,
    };
    for pair in catalog.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            role_rank(&a.role) < role_rank(&b.role)
                || (a.role == b.role && a.value >= b.value),
            "{a:?} before {b:?}"
        );
    }
}

#[actix_web::test]
async fn draft_happy_path_debits_the_budget_exactly_once() {
    let app = test::init_service(app_over(seeded_state().await)).await;
    let cookie = signup_and_login(&app, "drafter@example.com").await;

    assert_eq!(budget_of(&app, &cookie).await, 100);

    let catalog = fetch_catalog(&app, &cookie).await;
    let (ids, total) = pick_roster(&catalog, true);
    assert!(total <= 100, "cheapest roster must be affordable");

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/teams")
            .cookie(cookie.clone())
            .set_json(json!({ "name": "Gli Invincibili", "playerIds": ids }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    assert_eq!(budget_of(&app, &cookie).await, i64::from(100 - total));

    let me = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/me")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(me).await;
    assert_eq!(body.get("hasTeam").and_then(Value::as_bool), Some(true));

    // Resubmission is rejected and leaves the budget alone.
    let (ids, _) = pick_roster(&catalog, true);
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/teams")
            .cookie(cookie.clone())
            .set_json(json!({ "name": "Second Try", "playerIds": ids }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(budget_of(&app, &cookie).await, i64::from(100 - total));
}

#[actix_web::test]
async fn over_budget_roster_is_rejected_with_the_numbers() {
    let app = test::init_service(app_over(seeded_state().await)).await;
    let cookie = signup_and_login(&app, "bigspender@example.com").await;

    let catalog = fetch_catalog(&app, &cookie).await;
    let (ids, total) = pick_roster(&catalog, false);
    assert!(total > 100, "priciest roster must exceed the budget");

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/teams")
            .cookie(cookie.clone())
            .set_json(json!({ "name": "Galacticos", "playerIds": ids }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body.get("details")
            .and_then(|d| d.get("totalCost"))
            .and_then(Value::as_i64),
        Some(i64::from(total))
    );
    assert_eq!(
        body.get("details")
            .and_then(|d| d.get("budget"))
            .and_then(Value::as_i64),
        Some(100)
    );

    // Nothing was committed.
    assert_eq!(budget_of(&app, &cookie).await, 100);
}

#[actix_web::test]
async fn duplicate_player_fails_before_budget_is_considered() {
    let app = test::init_service(app_over(seeded_state().await)).await;
    let cookie = signup_and_login(&app, "doubler@example.com").await;

    let catalog = fetch_catalog(&app, &cookie).await;
    let (mut ids, _) = pick_roster(&catalog, true);
    ids[14] = ids[0];

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/teams")
            .cookie(cookie.clone())
            .set_json(json!({ "name": "Clones", "playerIds": ids }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert!(
        body.get("message")
            .and_then(Value::as_str)
            .expect("message")
            .contains("twice")
    );
}

#[actix_web::test]
async fn wrong_composition_reports_the_first_mismatching_role() {
    let app = test::init_service(app_over(seeded_state().await)).await;
    let cookie = signup_and_login(&app, "lopsided@example.com").await;

    let catalog = fetch_catalog(&app, &cookie).await;
    // Swap one attacker for a third goalkeeper.
    let (mut ids, _) = pick_roster(&catalog, true);
    let spare_gk = catalog
        .iter()
        .filter(|p| p.role == "GK")
        .find(|p| !ids.contains(&p.id))
        .expect("a third goalkeeper exists");
    let last = ids.len() - 1;
    ids[last] = spare_gk.id;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/teams")
            .cookie(cookie.clone())
            .set_json(json!({ "name": "All Hands", "playerIds": ids }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    let details = body.get("details").expect("details");
    assert_eq!(details.get("role").and_then(Value::as_str), Some("GK"));
    assert_eq!(details.get("required").and_then(Value::as_u64), Some(2));
    assert_eq!(details.get("actual").and_then(Value::as_u64), Some(3));
}

#[actix_web::test]
async fn unknown_player_ids_are_rejected() {
    let app = test::init_service(app_over(seeded_state().await)).await;
    let cookie = signup_and_login(&app, "phantom@example.com").await;

    let catalog = fetch_catalog(&app, &cookie).await;
    let (mut ids, _) = pick_roster(&catalog, true);
    ids[0] = Uuid::new_v4();

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/teams")
            .cookie(cookie.clone())
            .set_json(json!({ "name": "Ghosts", "playerIds": ids }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert!(
        body.get("message")
            .and_then(Value::as_str)
            .expect("message")
            .contains("do not exist")
    );
}
