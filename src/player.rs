use crate::builder::EntityBuilder;
use crate::espn::{nfl_team_abbreviation, nfl_team_name, position_label};
use crate::extract::{epoch_millis, label, labels};
use crate::schema::{FieldSpec, Schema};
use crate::EntityKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// An NFL player as the fantasy universe sees them: pro team, positions, ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub jersey_number: Option<String>,
    pub pro_team: Option<String>,
    pub pro_team_abbreviation: Option<String>,
    pub default_position: Option<String>,
    #[serde(default)]
    pub eligible_positions: Vec<String>,
    pub average_draft_position: Option<f64>,
    pub auction_value_average: Option<f64>,
    pub percent_change: Option<f64>,
    pub percent_started: Option<f64>,
    pub percent_owned: Option<f64>,
    pub acquired_date: Option<DateTime<Utc>>,
    pub availability_status: Option<String>,
    pub is_droppable: Option<bool>,
    pub is_injured: Option<bool>,
    pub injury_status: Option<String>,
}

/// Shared with rosters and boxscores, which nest players without their own context.
pub(crate) static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("player")
        .field("id", FieldSpec::key("id"))
        .field("firstName", FieldSpec::key("firstName"))
        .field("lastName", FieldSpec::key("lastName"))
        .field("fullName", FieldSpec::key("fullName"))
        .field("jerseyNumber", FieldSpec::key("jersey"))
        .field("proTeam", label("proTeamId", nfl_team_name))
        .field("proTeamAbbreviation", label("proTeamId", nfl_team_abbreviation))
        .field("defaultPosition", label("defaultPositionId", position_label))
        .field("eligiblePositions", labels("eligibleSlots", position_label))
        .field("averageDraftPosition", FieldSpec::key("ownership.averageDraftPosition"))
        .field("auctionValueAverage", FieldSpec::key("ownership.auctionValueAverage"))
        .field("percentChange", FieldSpec::key("ownership.percentChange"))
        .field("percentStarted", FieldSpec::key("ownership.percentStarted"))
        .field("percentOwned", FieldSpec::key("ownership.percentOwned"))
        .field("acquiredDate", epoch_millis("acquisitionDate"))
        .field("availabilityStatus", FieldSpec::key("status"))
        .field("isDroppable", FieldSpec::key("droppable"))
        .field("isInjured", FieldSpec::key("injured"))
        .field("injuryStatus", FieldSpec::key("injuryStatus"))
});

pub struct PlayerBuilder;

impl EntityBuilder for PlayerBuilder {
    type Output = Player;

    const KIND: EntityKind = EntityKind::Player;

    fn schema() -> &'static Schema {
        &SCHEMA
    }
}
