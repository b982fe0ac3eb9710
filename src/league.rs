use crate::builder::EntityBuilder;
use crate::espn::position_label;
use crate::extract::{epoch_millis, nested, slot_counts};
use crate::schema::{FieldSpec, Schema};
use crate::EntityKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// League-wide settings, built from the `settings` object of the league payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub name: Option<String>,
    pub size: Option<u32>,
    pub is_public: Option<bool>,
    pub draft_settings: Option<DraftSettings>,
    pub roster_settings: Option<RosterSettings>,
    pub schedule_settings: Option<ScheduleSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSettings {
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub draft_type: Option<String>,
    pub time_per_selection: Option<u32>,
    pub can_trade_draft_picks: Option<bool>,
    pub keeper_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSettings {
    #[serde(default)]
    pub lineup_position_count: BTreeMap<String, u32>,
    #[serde(default)]
    pub position_limits: BTreeMap<String, u32>,
    pub locktime: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSettings {
    pub number_of_regular_season_matchups: Option<u32>,
    pub regular_season_matchup_length: Option<u32>,
    pub number_of_playoff_matchups: Option<u32>,
    pub playoff_matchup_length: Option<u32>,
    pub number_of_playoff_teams: Option<u32>,
}

static DRAFT_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("draft_settings")
        .field("date", epoch_millis("date"))
        .field("type", FieldSpec::key("type"))
        .field("timePerSelection", FieldSpec::key("timePerSelection"))
        .field("canTradeDraftPicks", FieldSpec::key("isTradingEnabled"))
        .field("keeperCount", FieldSpec::key("keeperCount"))
});

static ROSTER_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("roster_settings")
        .field("lineupPositionCount", slot_counts("lineupSlotCounts", position_label))
        .field("positionLimits", slot_counts("positionLimits", position_label))
        .field("locktime", FieldSpec::key("lockTime"))
});

static SCHEDULE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("schedule_settings")
        .field("numberOfRegularSeasonMatchups", FieldSpec::key("matchupPeriodCount"))
        .field("regularSeasonMatchupLength", FieldSpec::key("matchupPeriodLength"))
        .field("numberOfPlayoffMatchups", FieldSpec::key("playoffMatchupPeriodCount"))
        .field("playoffMatchupLength", FieldSpec::key("playoffMatchupPeriodLength"))
        .field("numberOfPlayoffTeams", FieldSpec::key("playoffTeamCount"))
});

static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("league")
        .field("name", FieldSpec::key("name"))
        .field("size", FieldSpec::key("size"))
        .field("isPublic", FieldSpec::key("isPublic"))
        .field("draftSettings", nested("draftSettings", &DRAFT_SCHEMA))
        .field("rosterSettings", nested("rosterSettings", &ROSTER_SCHEMA))
        .field("scheduleSettings", nested("scheduleSettings", &SCHEDULE_SCHEMA))
});

pub struct LeagueBuilder;

impl EntityBuilder for LeagueBuilder {
    type Output = League;

    const KIND: EntityKind = EntityKind::League;

    fn schema() -> &'static Schema {
        &SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Context;
    use serde_json::json;

    #[test]
    fn builds_league_settings() {
        let raw = json!({
            "name": "Sunday Scaries",
            "size": 10,
            "isPublic": false,
            "draftSettings": {
                "date": 1_725_645_600_000_i64,
                "type": "SNAKE",
                "timePerSelection": 90,
                "isTradingEnabled": true,
                "keeperCount": 0
            },
            "rosterSettings": {
                "lineupSlotCounts": { "0": 1, "2": 2, "4": 2, "6": 1, "16": 1, "17": 1, "20": 7, "23": 1 },
                "positionLimits": { "0": 4, "17": 3 },
                "lockTime": "INDIVIDUAL_GAME"
            },
            "scheduleSettings": {
                "matchupPeriodCount": 14,
                "matchupPeriodLength": 1,
                "playoffMatchupPeriodLength": 1,
                "playoffTeamCount": 4
            }
        });
        let league = LeagueBuilder::build(&raw, Context::new(336_358, 2024)).unwrap();

        assert_eq!(league.kind, EntityKind::League);
        assert_eq!(league.name.as_deref(), Some("Sunday Scaries"));
        assert_eq!(league.size, Some(10));

        let draft = league.draft_settings.as_ref().unwrap();
        assert_eq!(draft.draft_type.as_deref(), Some("SNAKE"));
        assert_eq!(draft.can_trade_draft_picks, Some(true));
        assert_eq!(draft.date.map(|d| d.timestamp()), Some(1_725_645_600));

        let roster = league.roster_settings.as_ref().unwrap();
        assert_eq!(roster.lineup_position_count.get("RB/WR/TE"), Some(&1));
        assert_eq!(roster.lineup_position_count.get("Bench"), Some(&7));
        assert_eq!(roster.position_limits.get("K"), Some(&3));
        assert_eq!(roster.locktime.as_deref(), Some("INDIVIDUAL_GAME"));

        let schedule = league.schedule_settings.as_ref().unwrap();
        assert_eq!(schedule.number_of_regular_season_matchups, Some(14));
        assert_eq!(schedule.number_of_playoff_matchups, None);
        assert_eq!(schedule.number_of_playoff_teams, Some(4));
    }

    #[test]
    fn missing_settings_blocks_stay_absent() {
        let league = LeagueBuilder::build(&json!({ "name": "Tiny" }), Context::new(1, 2023)).unwrap();
        assert_eq!(league.draft_settings, None);
        assert_eq!(league.roster_settings, None);
        assert_eq!(league.schedule_settings, None);
    }

    #[test]
    fn scalar_in_place_of_a_settings_block_is_malformed() {
        let err = LeagueBuilder::build(&json!({ "draftSettings": "SNAKE" }), Context::new(1, 2023))
            .unwrap_err();
        assert!(err.to_string().contains("draftSettings"));
    }
}
