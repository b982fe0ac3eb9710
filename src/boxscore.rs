use crate::builder::EntityBuilder;
use crate::error::ExtractResult;
use crate::espn::{lookup, position_label, safe_integer, safe_number};
use crate::extract::{label, map_nested, nested, number, unexpected};
use crate::player::{self, Player};
use crate::schema::{FieldSpec, Schema};
use crate::EntityKind;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// One fantasy matchup of a week: both sides' scores and started lineups.
///
/// A bye week has no away side; the away fields are then absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boxscore {
    pub id: Option<u32>,
    pub matchup_period_id: Option<u32>,
    pub winner: Option<String>,
    pub home_team_id: Option<u32>,
    pub home_score: Option<f64>,
    #[serde(default)]
    pub home_roster: Vec<BoxscorePlayer>,
    pub away_team_id: Option<u32>,
    pub away_score: Option<f64>,
    pub away_roster: Option<Vec<BoxscorePlayer>>,
}

impl Boxscore {
    pub fn is_bye(&self) -> bool {
        self.away_team_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxscorePlayer {
    pub player: Option<Player>,
    pub position: Option<String>,
    pub total_points: f64,
}

static PLAYER_SLOT_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("boxscore_player")
        .field("player", nested("playerPoolEntry.player", &player::SCHEMA))
        .field("position", label("lineupSlotId", position_label))
        .field("totalPoints", number("playerPoolEntry.appliedStatTotal"))
});

static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("boxscore")
        .field("id", FieldSpec::key("id"))
        .field("matchupPeriodId", FieldSpec::key("matchupPeriodId"))
        .field("winner", FieldSpec::key("winner"))
        .field("homeTeamId", side_field("home", |side| json!(safe_integer(side.get("teamId")))))
        .field("homeScore", side_field("home", |side| json!(safe_number(side.get("totalPoints")))))
        .field("homeRoster", side_roster("home"))
        .field("awayTeamId", side_field("away", |side| json!(safe_integer(side.get("teamId")))))
        .field("awayScore", side_field("away", |side| json!(safe_number(side.get("totalPoints")))))
        .field("awayRoster", side_roster("away"))
});

/// Value derived from one side object of the matchup; absent when the side is.
fn side_field(side: &'static str, read: fn(&Value) -> Value) -> FieldSpec {
    FieldSpec::extract(side, move |value, _| {
        with_side(value, |object| Ok(read(object)))
    })
}

/// Started lineup of one side. Historical scoreboards carry no rosters, so a side
/// without `rosterForCurrentScoringPeriod` maps to an empty lineup.
fn side_roster(side: &'static str) -> FieldSpec {
    FieldSpec::extract(side, |value, _| {
        with_side(value, |object| {
            let entries = match lookup(object, "rosterForCurrentScoringPeriod.entries") {
                None | Some(Value::Null) => return Ok(json!([])),
                Some(Value::Array(entries)) => entries,
                Some(other) => return Err(unexpected("array", Some(other))),
            };
            entries
                .iter()
                .map(|entry| map_nested(&PLAYER_SLOT_SCHEMA, entry))
                .collect::<ExtractResult<Vec<_>>>()
                .map(Value::Array)
        })
    })
}

fn with_side(
    value: Option<&Value>,
    read: impl FnOnce(&Value) -> ExtractResult<Value>,
) -> ExtractResult<Option<Value>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(object @ Value::Object(_)) => read(object).map(Some),
        Some(other) => Err(unexpected("object", Some(other))),
    }
}

pub struct BoxscoreBuilder;

impl EntityBuilder for BoxscoreBuilder {
    type Output = Boxscore;

    const KIND: EntityKind = EntityKind::Boxscore;

    fn schema() -> &'static Schema {
        &SCHEMA
    }
}
