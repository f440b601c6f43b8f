//! Draft endpoints: the player catalog and team creation.
//!
//! ```text
//! GET  /api/v1/players
//! POST /api/v1/teams   {"name":"...","playerIds":["..."]}
//! ```
//!
//! The wizard reads the catalog once, tracks the selection client-side, and
//! submits the full roster here; every rule is re-checked server-side.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{ApiResult, CatalogPlayer, Error, Role};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// One draftable player as shown in the wizard.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBody {
    /// Player identifier, submitted back in the roster.
    pub id: Uuid,
    /// Player display name.
    pub name: String,
    /// Roster position code.
    pub role: Role,
    /// Owning school's name.
    pub school_name: String,
    /// Draft cost in credits.
    pub value: i32,
}

impl From<CatalogPlayer> for PlayerBody {
    fn from(player: CatalogPlayer) -> Self {
        Self {
            id: player.id,
            name: player.name,
            role: player.role,
            school_name: player.school_name,
            value: player.value,
        }
    }
}

/// Team creation body: the wizard's final submission.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CreateTeamBody {
    /// Team name, 2 to 30 characters after trimming.
    pub name: String,
    /// Exactly fifteen distinct player ids matching the role quotas.
    pub player_ids: Vec<Uuid>,
}

/// Every draftable player, role ascending then value descending.
#[utoipa::path(
    get,
    path = "/api/v1/players",
    responses(
        (status = 200, description = "Draftable players", body = [PlayerBody]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Catalog unavailable", body = Error)
    ),
    tags = ["draft"],
    operation_id = "listPlayers"
)]
#[get("/players")]
pub async fn list_players(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<PlayerBody>>> {
    session.require_user_id()?;
    let players = state.catalog.list_players().await?;
    Ok(web::Json(players.into_iter().map(Into::into).collect()))
}

/// Validate the submitted roster and create the team atomically.
#[utoipa::path(
    post,
    path = "/api/v1/teams",
    request_body = CreateTeamBody,
    responses(
        (status = 200, description = "Team created"),
        (status = 400, description = "Roster violates a draft rule", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 409, description = "User already has a team", body = Error),
        (status = 500, description = "Commit failed; no partial state retained", body = Error)
    ),
    tags = ["draft"],
    operation_id = "createTeam"
)]
#[post("/teams")]
pub async fn create_team(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateTeamBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let body = payload.into_inner();
    state
        .draft
        .create_team(user_id, &body.name, &body.player_ids)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
