//! Selectors for the parts of an ESPN response each builder consumes.
//!
//! The endpoints nest their collections differently; everything here is a plain
//! lookup, and a missing collection reads as empty rather than as an error.
use crate::boxscore::{Boxscore, BoxscoreBuilder};
use crate::builder::{Batch, build_batch};
use crate::espn::{lookup, safe_integer};
use crate::graph::{GraphResolver, Resolution};
use crate::Context;
use serde_json::Value;

fn array_at<'a>(payload: &'a Value, path: &str) -> &'a [Value] {
    lookup(payload, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// `teams` of a league payload.
pub fn teams(payload: &Value) -> &[Value] {
    array_at(payload, "teams")
}

/// `settings` of a league payload, the input of the league builder.
pub fn league_settings(payload: &Value) -> Option<&Value> {
    lookup(payload, "settings").filter(|settings| settings.is_object())
}

/// `players` of a player-info or player-card payload.
pub fn players(payload: &Value) -> &[Value] {
    array_at(payload, "players")
}

/// `events` of an NFL scoreboard payload.
pub fn events(payload: &Value) -> &[Value] {
    array_at(payload, "events")
}

/// `topics` of a league communication payload.
pub fn topics(payload: &Value) -> &[Value] {
    array_at(payload, "topics")
}

/// `schedule` of a league payload: every matchup of the season.
pub fn schedule(payload: &Value) -> &[Value] {
    array_at(payload, "schedule")
}

/// Matchups of one scoring week, in schedule order.
pub fn matchups_for_period(payload: &Value, matchup_period_id: u32) -> Vec<&Value> {
    let wanted = i64::from(matchup_period_id);
    schedule(payload)
        .iter()
        .filter(|matchup| safe_integer(matchup.get("matchupPeriodId")) == wanted)
        .collect()
}

/// League object of a payload. The league-history endpoint wraps it in an array.
pub fn history_root(payload: &Value) -> Option<&Value> {
    match payload {
        Value::Array(leagues) => leagues.first(),
        Value::Object(_) => Some(payload),
        _ => None,
    }
}

/// Boxscores of one scoring week.
pub fn boxscores_for_period(payload: &Value, matchup_period_id: u32, context: Context) -> Batch<Boxscore> {
    build_batch::<BoxscoreBuilder>(matchups_for_period(payload, matchup_period_id), context)
}

/// Teams of a league payload, resolved against the payload's own schedule.
pub fn resolve_league(payload: &Value, context: Context) -> Resolution {
    GraphResolver::new(schedule(payload)).resolve_raw(teams(payload), context)
}
