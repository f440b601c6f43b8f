//! Fantasy team value types.

use std::fmt;

/// Minimum length of a team name after trimming.
pub const TEAM_NAME_MIN: usize = 2;
/// Maximum length of a team name after trimming.
pub const TEAM_NAME_MAX: usize = 30;

/// Validation errors raised by [`TeamName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamNameError {
    /// The trimmed name falls outside the allowed length range.
    Length,
}

impl fmt::Display for TeamNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length => write!(
                f,
                "team name must be between {TEAM_NAME_MIN} and {TEAM_NAME_MAX} characters"
            ),
        }
    }
}

impl std::error::Error for TeamNameError {}

/// Validated fantasy team name.
///
/// ## Invariants
/// - Surrounding whitespace removed.
/// - Trimmed length in `[TEAM_NAME_MIN, TEAM_NAME_MAX]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamName(String);

impl TeamName {
    /// Trim and validate a candidate team name.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TeamNameError> {
        let trimmed = input.as_ref().trim();
        let length = trimmed.chars().count();
        if !(TEAM_NAME_MIN..=TEAM_NAME_MAX).contains(&length) {
            return Err(TeamNameError::Length);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for TeamName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}
