//! Fixed seed catalog for the school fantasy league.
//!
//! The backend applies this catalog once at startup: schools are upserted by
//! name and players inserted only when absent, so re-running the seed is a
//! no-op. The catalog is deliberately static data rather than generated
//! fixtures; the league runs over a known set of schools.
//!
//! Every school carries a full draftable composition (2 GK, 5 DEF, 5 MID,
//! 3 ATT) so a roster drawn from a single school always satisfies the role
//! quota. [`validate_catalog`] checks that invariant and is exercised by this
//! crate's tests.

/// Player position within a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedRole {
    /// Goalkeeper.
    Goalkeeper,
    /// Defender.
    Defender,
    /// Midfielder.
    Midfielder,
    /// Attacker.
    Attacker,
}

impl SeedRole {
    /// Stable storage code for the role (`GK`, `DEF`, `MID`, `ATT`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Goalkeeper => "GK",
            Self::Defender => "DEF",
            Self::Midfielder => "MID",
            Self::Attacker => "ATT",
        }
    }
}

/// One draftable player belonging to a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSeed {
    /// Player display name, unique within the owning school.
    pub name: &'static str,
    /// Roster position.
    pub role: SeedRole,
    /// Draft cost in credits; strictly positive.
    pub value: i32,
}

/// One school and its full player roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchoolSeed {
    /// School name, unique across the catalog.
    pub name: &'static str,
    /// Players fielded by the school.
    pub players: &'static [PlayerSeed],
}

/// Number of players each school fields per role: (GK, DEF, MID, ATT).
pub const SCHOOL_COMPOSITION: (usize, usize, usize, usize) = (2, 5, 5, 3);

const fn gk(name: &'static str, value: i32) -> PlayerSeed {
    PlayerSeed {
        name,
        role: SeedRole::Goalkeeper,
        value,
    }
}

const fn def(name: &'static str, value: i32) -> PlayerSeed {
    PlayerSeed {
        name,
        role: SeedRole::Defender,
        value,
    }
}

const fn mid(name: &'static str, value: i32) -> PlayerSeed {
    PlayerSeed {
        name,
        role: SeedRole::Midfielder,
        value,
    }
}

const fn att(name: &'static str, value: i32) -> PlayerSeed {
    PlayerSeed {
        name,
        role: SeedRole::Attacker,
        value,
    }
}

const EINSTEIN: &[PlayerSeed] = &[
    gk("Marco Rossi", 8),
    gk("Luca Ferri", 5),
    def("Andrea Colombo", 10),
    def("Matteo Ricci", 8),
    def("Davide Moretti", 7),
    def("Tommaso Conti", 6),
    def("Simone Marino", 4),
    mid("Federico Greco", 12),
    mid("Alessandro Leone", 9),
    mid("Lorenzo Mancini", 7),
    mid("Nicola Barbieri", 6),
    mid("Emanuele Rinaldi", 5),
    att("Giovanni Pellegrini", 15),
    att("Cristian Marchetti", 11),
    att("Paolo Serra", 8),
];

const GALILEI: &[PlayerSeed] = &[
    gk("Riccardo Rame", 7),
    gk("Filippo Bassi", 4),
    def("Gabriele Costa", 9),
    def("Stefano Fontana", 8),
    def("Michele Gallo", 6),
    def("Antonio Longo", 5),
    def("Francesco Villa", 4),
    mid("Roberto Caruso", 11),
    mid("Daniele Martini", 9),
    mid("Giacomo Ferrara", 7),
    mid("Edoardo Vitale", 6),
    mid("Pietro Santoro", 5),
    att("Diego Lombardi", 14),
    att("Samuele Monti", 10),
    att("Alessio Parisi", 7),
];

const DANTE: &[PlayerSeed] = &[
    gk("Enrico Fabbri", 9),
    gk("Carlo Silvestri", 5),
    def("Vincenzo Bernardi", 10),
    def("Alberto Palmieri", 7),
    def("Claudio Testa", 6),
    def("Giorgio Benedetti", 5),
    def("Sergio Orlando", 3),
    mid("Massimo De Luca", 13),
    mid("Fabrizio Rizzi", 8),
    mid("Domenico Grasso", 7),
    mid("Mauro Cattaneo", 6),
    mid("Ivan Mariani", 4),
    att("Bruno D'Angelo", 16),
    att("Aldo Valentini", 12),
    att("Oscar Bianco", 9),
];

const CATALOG: &[SchoolSeed] = &[
    SchoolSeed {
        name: "Liceo Scientifico Einstein",
        players: EINSTEIN,
    },
    SchoolSeed {
        name: "ITIS Galilei",
        players: GALILEI,
    },
    SchoolSeed {
        name: "Liceo Classico Dante",
        players: DANTE,
    },
];

/// The full seed catalog: every school with its roster.
#[must_use]
pub const fn catalog() -> &'static [SchoolSeed] {
    CATALOG
}

/// Consistency failures detected in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Two schools share a name.
    #[error("duplicate school name: {name}")]
    DuplicateSchool {
        /// The repeated name.
        name: &'static str,
    },
    /// Two players within one school share a name.
    #[error("duplicate player {player} in {school}")]
    DuplicatePlayer {
        /// Owning school.
        school: &'static str,
        /// The repeated player name.
        player: &'static str,
    },
    /// A school's per-role counts do not match [`SCHOOL_COMPOSITION`].
    #[error("school {school} fields {actual} {role}, expected {expected}")]
    Composition {
        /// Offending school.
        school: &'static str,
        /// Role code with the wrong count.
        role: &'static str,
        /// Required count for the role.
        expected: usize,
        /// Count found in the catalog.
        actual: usize,
    },
    /// A player has a non-positive draft value.
    #[error("player {player} in {school} has non-positive value {value}")]
    Value {
        /// Owning school.
        school: &'static str,
        /// Offending player name.
        player: &'static str,
        /// The invalid value.
        value: i32,
    },
}

fn role_count(players: &[PlayerSeed], role: SeedRole) -> usize {
    players.iter().filter(|p| p.role == role).count()
}

/// Check catalog consistency: unique names, positive values, and a full
/// draftable composition per school.
///
/// # Errors
///
/// Returns the first [`CatalogError`] encountered, walking schools in catalog
/// order.
pub fn validate_catalog(schools: &[SchoolSeed]) -> Result<(), CatalogError> {
    for (index, school) in schools.iter().enumerate() {
        if schools
            .iter()
            .take(index)
            .any(|other| other.name == school.name)
        {
            return Err(CatalogError::DuplicateSchool { name: school.name });
        }

        for (player_index, player) in school.players.iter().enumerate() {
            if player.value <= 0 {
                return Err(CatalogError::Value {
                    school: school.name,
                    player: player.name,
                    value: player.value,
                });
            }
            if school
                .players
                .iter()
                .take(player_index)
                .any(|other| other.name == player.name)
            {
                return Err(CatalogError::DuplicatePlayer {
                    school: school.name,
                    player: player.name,
                });
            }
        }

        let (gk_quota, def_quota, mid_quota, att_quota) = SCHOOL_COMPOSITION;
        let checks = [
            (SeedRole::Goalkeeper, gk_quota),
            (SeedRole::Defender, def_quota),
            (SeedRole::Midfielder, mid_quota),
            (SeedRole::Attacker, att_quota),
        ];
        for (role, expected) in checks {
            let actual = role_count(school.players, role);
            if actual != expected {
                return Err(CatalogError::Composition {
                    school: school.name,
                    role: role.code(),
                    expected,
                    actual,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    //! Consistency checks over the shipped catalog.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn shipped_catalog_is_consistent() {
        validate_catalog(catalog()).expect("shipped catalog must validate");
    }

    #[rstest]
    fn catalog_has_three_schools_of_fifteen() {
        let schools = catalog();
        assert_eq!(schools.len(), 3);
        for school in schools {
            assert_eq!(school.players.len(), 15, "{}", school.name);
        }
    }

    #[rstest]
    #[case(SeedRole::Goalkeeper, "GK")]
    #[case(SeedRole::Defender, "DEF")]
    #[case(SeedRole::Midfielder, "MID")]
    #[case(SeedRole::Attacker, "ATT")]
    fn role_codes_are_stable(#[case] role: SeedRole, #[case] code: &str) {
        assert_eq!(role.code(), code);
    }

    #[rstest]
    fn duplicate_school_is_rejected() {
        let school = SchoolSeed {
            name: "Twice",
            players: EINSTEIN,
        };
        let err = validate_catalog(&[school, school]).expect_err("duplicate must fail");
        assert_eq!(err, CatalogError::DuplicateSchool { name: "Twice" });
    }

    #[rstest]
    fn short_roster_reports_first_mismatching_role() {
        static SHORT: &[PlayerSeed] = &[gk("Solo Keeper", 5)];
        let school = SchoolSeed {
            name: "Understaffed",
            players: SHORT,
        };
        let err = validate_catalog(&[school]).expect_err("composition must fail");
        assert_eq!(
            err,
            CatalogError::Composition {
                school: "Understaffed",
                role: "GK",
                expected: 2,
                actual: 1,
            }
        );
    }

    #[rstest]
    fn non_positive_value_is_rejected() {
        static FREE: &[PlayerSeed] = &[gk("Free Agent", 0)];
        let school = SchoolSeed {
            name: "Bargain",
            players: FREE,
        };
        let err = validate_catalog(&[school]).expect_err("zero value must fail");
        assert!(matches!(err, CatalogError::Value { value: 0, .. }));
    }
}
