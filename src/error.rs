use crate::EntityKind;
use thiserror::Error;

pub type ExtractResult<T> = Result<T, ExtractError>;
pub type BuildResult<T> = Result<T, BuildError>;

/// Which side of a matchup or game a competitor plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure raised by a field's extract function. Absence is never one of these.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no {side} competitor present")]
    MissingCompetitor { side: Side },
    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("nested record: {0}")]
    Nested(#[source] Box<MappingError>),
}

/// A schema field whose extract function failed.
#[derive(Debug, Error)]
#[error("field `{field}` of schema `{schema}`: {source}")]
pub struct MappingError {
    pub schema: &'static str,
    pub field: &'static str,
    #[source]
    pub source: ExtractError,
}

/// A record that could not become an entity. Distinct from absent fields, which are
/// silently defaulted.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("malformed {kind} record: {source}")]
    Mapping {
        kind: EntityKind,
        #[source]
        source: MappingError,
    },
    #[error("{kind} record does not fit its entity type: {source}")]
    Shape {
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },
}

impl BuildError {
    pub fn kind(&self) -> EntityKind {
        match self {
            BuildError::Mapping { kind, .. } | BuildError::Shape { kind, .. } => *kind,
        }
    }
}

/// Per-entity failure while deriving a team's schedule history.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("team {team_id}: matchup #{index} lists the team on the {side} side but has no {missing} side")]
    MissingOpponentSide {
        team_id: u32,
        index: usize,
        side: Side,
        missing: Side,
    },
    #[error("team {team_id}: matchup #{index} {side} side is {found}, expected an object")]
    MalformedSide {
        team_id: u32,
        index: usize,
        side: Side,
        found: &'static str,
    },
    #[error("team {team_id}: matchup #{index} {side} side has no team id")]
    MissingTeamId {
        team_id: u32,
        index: usize,
        side: Side,
    },
    #[error("team {team_id} appears more than once in the batch")]
    DuplicateTeam { team_id: u32 },
    #[error(transparent)]
    Build(#[from] BuildError),
}
