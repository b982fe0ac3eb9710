pub mod activity;
pub mod boxscore;
pub mod builder;
pub mod error;
pub mod espn;
pub mod extract;
pub mod game;
pub mod graph;
pub mod league;
pub mod payload;
pub mod player;
pub mod schema;
pub mod team;

use serde::Serialize;
use std::fmt;
use std::ops::Deref;

pub use builder::{Batch, EntityBuilder, Failure, build_all, build_batch};
pub use error::{BuildError, BuildResult, ExtractError, MappingError, ResolveError, Side};
pub use schema::{FieldSpec, MappedRecord, Schema};

// ---------------------------------------------------------------------------
// Entity envelope: kind tag and identity scope around a typed record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Game,
    Team,
    League,
    Player,
    Boxscore,
    Activity,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Game => "game",
            EntityKind::Team => "team",
            EntityKind::League => "league",
            EntityKind::Player => "player",
            EntityKind::Boxscore => "boxscore",
            EntityKind::Activity => "activity",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity scope a raw payload does not carry itself: which league and season the
/// request was made for. NFL games are global and use [`Context::global`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub league_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_id: Option<u16>,
}

impl Context {
    pub fn new(league_id: u32, season_id: u16) -> Self {
        Self { league_id: Some(league_id), season_id: Some(season_id) }
    }

    pub fn global() -> Self {
        Self::default()
    }
}

/// A typed record built from raw JSON, stamped with its kind and context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity<T> {
    pub kind: EntityKind,
    #[serde(flatten)]
    pub context: Context,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Entity<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T> Deref for Entity<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}
