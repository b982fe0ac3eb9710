use crate::builder::EntityBuilder;
use crate::extract::{integer, nested_list};
use crate::player::{self, Player};
use crate::schema::{FieldSpec, Schema};
use crate::EntityKind;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// A fantasy team in a league, with its record splits and current roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: u32,
    pub abbreviation: Option<String>,
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub waiver_rank: Option<u32>,
    #[serde(default)]
    pub roster: Vec<Player>,

    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub ties: Option<u32>,
    pub division_wins: Option<u32>,
    pub division_losses: Option<u32>,
    pub division_ties: Option<u32>,
    pub home_wins: Option<u32>,
    pub home_losses: Option<u32>,
    pub home_ties: Option<u32>,
    pub away_wins: Option<u32>,
    pub away_losses: Option<u32>,
    pub away_ties: Option<u32>,

    pub total_points_scored: Option<f64>,
    pub regular_season_points_for: Option<f64>,
    pub regular_season_points_against: Option<f64>,
    pub winning_percentage: Option<f64>,
    pub playoff_seed: Option<u32>,
    pub final_standings_position: Option<u32>,
}

static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("team")
        .field("id", integer("id"))
        .field("abbreviation", FieldSpec::key("abbrev"))
        .field("name", FieldSpec::extract("name", team_name))
        .field("logoUrl", FieldSpec::key("logo"))
        .field("waiverRank", FieldSpec::key("waiverRank"))
        .field("roster", nested_list("roster.entries", "playerPoolEntry.player", &player::SCHEMA))
        .field("wins", FieldSpec::key("record.overall.wins"))
        .field("losses", FieldSpec::key("record.overall.losses"))
        .field("ties", FieldSpec::key("record.overall.ties"))
        .field("divisionWins", FieldSpec::key("record.division.wins"))
        .field("divisionLosses", FieldSpec::key("record.division.losses"))
        .field("divisionTies", FieldSpec::key("record.division.ties"))
        .field("homeWins", FieldSpec::key("record.home.wins"))
        .field("homeLosses", FieldSpec::key("record.home.losses"))
        .field("homeTies", FieldSpec::key("record.home.ties"))
        .field("awayWins", FieldSpec::key("record.away.wins"))
        .field("awayLosses", FieldSpec::key("record.away.losses"))
        .field("awayTies", FieldSpec::key("record.away.ties"))
        .field("totalPointsScored", FieldSpec::key("points"))
        .field("regularSeasonPointsFor", FieldSpec::key("record.overall.pointsFor"))
        .field("regularSeasonPointsAgainst", FieldSpec::key("record.overall.pointsAgainst"))
        .field(
            "winningPercentage",
            FieldSpec::extract("record.overall.percentage", |percentage, _| {
                Ok(percentage.and_then(Value::as_f64).map(|p| json!(p * 100.0)))
            }),
        )
        .field("playoffSeed", FieldSpec::key("playoffSeed"))
        .field("finalStandingsPosition", FieldSpec::key("rankCalculatedFinal"))
});

/// Newer payloads carry `name`; older ones split it into `location` + `nickname`.
fn team_name(name: Option<&Value>, raw: &Value) -> crate::error::ExtractResult<Option<Value>> {
    if let Some(name) = name {
        return Ok(Some(name.clone()));
    }
    let parts: Vec<&str> = ["location", "nickname"]
        .iter()
        .filter_map(|key| raw.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    Ok((!parts.is_empty()).then(|| json!(parts.join(" "))))
}

pub struct TeamBuilder;

impl EntityBuilder for TeamBuilder {
    type Output = Team;

    const KIND: EntityKind = EntityKind::Team;

    fn schema() -> &'static Schema {
        &SCHEMA
    }
}
