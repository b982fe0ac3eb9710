use crate::builder::EntityBuilder;
use crate::error::{ExtractError, ExtractResult, Side};
use crate::espn::{nfl_team_abbreviation, nfl_team_name, safe_integer};
use crate::extract::{iso_timestamp, unexpected};
use crate::schema::{FieldSpec, Schema};
use crate::EntityKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// An NFL game between two pro teams, from the fantasy games feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NflGame {
    pub start_time: Option<DateTime<Utc>>,
    pub quarter: Option<u32>,
    pub clock: Option<String>,
    pub odds: Option<String>,
    pub broadcaster: Option<String>,
    pub game_status: Option<GameStatus>,
    pub home_team: NflTeam,
    pub away_team: NflTeam,
}

impl NflGame {
    pub fn is_final(&self) -> bool {
        self.game_status == Some(GameStatus::Final)
    }

    /// Winning side once the game is final. `None` while in progress or tied.
    pub fn winner(&self) -> Option<Side> {
        if !self.is_final() {
            return None;
        }
        match self.home_team.score.cmp(&self.away_team.score) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NflTeam {
    pub id: i64,
    pub team: Option<String>,
    pub team_abbrev: Option<String>,
    pub record: Option<String>,
    pub score: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Final")]
    Final,
}

impl GameStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::NotStarted => "Not Started",
            GameStatus::InProgress => "In Progress",
            GameStatus::Final => "Final",
        }
    }

    /// ESPN sends either the state name (`pre`/`in`/`post`) or the status type id.
    fn parse(raw: &Value) -> Option<Self> {
        match raw {
            Value::String(state) => match state.as_str() {
                "pre" => Some(GameStatus::NotStarted),
                "in" => Some(GameStatus::InProgress),
                "post" => Some(GameStatus::Final),
                _ => None,
            },
            Value::Number(id) => match id.as_i64() {
                Some(1) => Some(GameStatus::NotStarted),
                Some(2) => Some(GameStatus::InProgress),
                Some(3) => Some(GameStatus::Final),
                _ => None,
            },
            _ => None,
        }
    }
}

static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("nfl_game")
        .field("startTime", iso_timestamp("date"))
        .field("quarter", FieldSpec::key("period"))
        .field("clock", FieldSpec::key("clock"))
        .field("odds", FieldSpec::key("odds"))
        .field("broadcaster", FieldSpec::key("broadcast"))
        .field(
            "gameStatus",
            FieldSpec::extract("status", |status, _| {
                Ok(status.and_then(GameStatus::parse).map(|s| json!(s.label())))
            }),
        )
        .field("homeTeam", competitor(Side::Home))
        .field("awayTeam", competitor(Side::Away))
});

/// Pick the competitor playing on `side`. The game is meaningless without both
/// sides, so a missing (or doubled) side is an error rather than a default.
fn competitor(side: Side) -> FieldSpec {
    FieldSpec::extract("competitors", move |competitors, _| {
        let competitors = match competitors {
            Some(Value::Array(items)) => items.as_slice(),
            None | Some(Value::Null) => &[],
            Some(other) => return Err(unexpected("array", Some(other))),
        };
        let mut on_side = competitors
            .iter()
            .filter(|c| c.get("homeAway").and_then(Value::as_str) == Some(side.as_str()));
        let found = on_side.next().ok_or(ExtractError::MissingCompetitor { side })?;
        if on_side.next().is_some() {
            return Err(ExtractError::InvalidValue(format!("more than one {side} competitor")));
        }
        map_competitor(found).map(Some)
    })
}

fn map_competitor(competitor: &Value) -> ExtractResult<Value> {
    if !competitor.is_object() {
        return Err(unexpected("object", Some(competitor)));
    }
    let id = safe_integer(competitor.get("id"));
    Ok(json!({
        "id": id,
        "team": nfl_team_name(id),
        "teamAbbrev": nfl_team_abbreviation(id),
        "record": competitor.get("record"),
        "score": safe_integer(competitor.get("score")),
    }))
}

pub struct GameBuilder;

impl EntityBuilder for GameBuilder {
    type Output = NflGame;

    const KIND: EntityKind = EntityKind::Game;

    fn schema() -> &'static Schema {
        &SCHEMA
    }
}
