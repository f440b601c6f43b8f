//! Startup catalog seeding (behind the `seed-data` feature).
//!
//! Converts the fixed catalog shipped by the `seed-data` crate into domain
//! seed types and applies it through the [`SeedRepository`] port. The
//! repository makes re-runs a no-op, so enabling seeding on every boot is
//! safe.

use std::sync::Arc;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::info;

use crate::domain::Role;
use crate::domain::ports::{SeedPersistenceError, SeedPlayer, SeedRepository, SeedSchool};

/// Configuration controlling catalog seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SEED")]
pub struct SeedSettings {
    /// Enable catalog seeding on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
}

fn role_of(seed: seed_data::SeedRole) -> Role {
    match seed {
        seed_data::SeedRole::Goalkeeper => Role::Goalkeeper,
        seed_data::SeedRole::Defender => Role::Defender,
        seed_data::SeedRole::Midfielder => Role::Midfielder,
        seed_data::SeedRole::Attacker => Role::Attacker,
    }
}

/// The shipped catalog as domain seed types.
#[must_use]
pub fn shipped_catalog() -> Vec<SeedSchool> {
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

/// Apply the shipped catalog when seeding is enabled.
pub async fn seed_on_startup(
    settings: &SeedSettings,
    repository: Arc<dyn SeedRepository>,
) -> Result<(), SeedPersistenceError> {
    if !settings.enabled {
        info!(reason = "disabled", "catalog seeding skipped");
        return Ok(());
    }

    let catalog = shipped_catalog();
    let outcome = repository.apply(&catalog).await?;
    info!(
        schools_created = outcome.schools_created,
        players_created = outcome.players_created,
        "catalog seeding applied"
    );
    Ok(())
}
