//! Recent league activity: adds, drops and trades from the league communication feed.
//!
//! A topic carries one or more messages. Each message names the acting team by id and
//! the player it concerns; both are looked up in the league payload and mapped through
//! the team and player schemas. Players no longer on any roster are filled in
//! afterwards from a player-card payload with [`fill_missing_players`].
use crate::builder::EntityBuilder;
use crate::error::{BuildError, BuildResult, MappingError};
use crate::espn::{lookup, safe_integer};
use crate::extract::{epoch_millis, integer};
use crate::player::{self, Player};
use crate::schema::{FieldSpec, Schema};
use crate::team::{Team, TeamBuilder};
use crate::{Context, EntityKind, payload};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::LazyLock;

pub const FREE_AGENT_ADDED: i64 = 178;
pub const FREE_AGENT_DROPPED: i64 = 179;
pub const WAIVER_ADDED: i64 = 180;
pub const WAIVER_DROPPED: i64 = 181;
pub const MOVED_OFF_ROSTER: i64 = 239;
pub const TRADE_ACCEPTED: i64 = 244;

/// Message types requested when no filter narrows the feed.
pub const ALL_MESSAGE_TYPES: [i64; 6] = [
    FREE_AGENT_ADDED,
    WAIVER_ADDED,
    FREE_AGENT_DROPPED,
    MOVED_OFF_ROSTER,
    WAIVER_DROPPED,
    TRADE_ACCEPTED,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityAction {
    #[serde(rename = "FA ADDED")]
    FreeAgentAdded,
    #[serde(rename = "WAIVER ADDED")]
    WaiverAdded,
    #[serde(rename = "DROPPED")]
    Dropped,
    #[serde(rename = "TRADED")]
    Traded,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl ActivityAction {
    pub fn from_message_type(id: i64) -> Self {
        match id {
            FREE_AGENT_ADDED => ActivityAction::FreeAgentAdded,
            WAIVER_ADDED => ActivityAction::WaiverAdded,
            FREE_AGENT_DROPPED | WAIVER_DROPPED | MOVED_OFF_ROSTER => ActivityAction::Dropped,
            TRADE_ACCEPTED => ActivityAction::Traded,
            _ => ActivityAction::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityAction::FreeAgentAdded => "FA ADDED",
            ActivityAction::WaiverAdded => "WAIVER ADDED",
            ActivityAction::Dropped => "DROPPED",
            ActivityAction::Traded => "TRADED",
            ActivityAction::Unknown => "UNKNOWN",
        }
    }
}

/// Which slice of the feed to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageFilter {
    FreeAgent,
    Waiver,
    Traded,
    #[default]
    All,
}

impl MessageFilter {
    /// `FA`, `WAIVER` and `TRADED` select one message type; anything else keeps all.
    pub fn parse(name: &str) -> Self {
        match name {
            "FA" => MessageFilter::FreeAgent,
            "WAIVER" => MessageFilter::Waiver,
            "TRADED" => MessageFilter::Traded,
            _ => MessageFilter::All,
        }
    }

    pub fn message_types(&self) -> &'static [i64] {
        match self {
            MessageFilter::FreeAgent => &[FREE_AGENT_ADDED],
            MessageFilter::Waiver => &[WAIVER_ADDED],
            MessageFilter::Traded => &[TRADE_ACCEPTED],
            MessageFilter::All => &ALL_MESSAGE_TYPES,
        }
    }

    pub fn includes(&self, message_type: i64) -> bool {
        self.message_types().contains(&message_type)
    }
}

/// Raw ids carried by a message. Their meaning depends on the message type: `from` is
/// the bid on a waiver claim and the sending team on a trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageIds {
    pub from: Option<i64>,
    #[serde(rename = "for")]
    pub for_team: Option<i64>,
    pub to: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub team: Option<Team>,
    pub action: ActivityAction,
    pub player: Option<Player>,
    pub bid_amount: i64,
    pub date: Option<DateTime<Utc>>,
    pub target_id: Option<i64>,
    pub ids: MessageIds,
}

impl Activity {
    /// Id of the team the message is about, picked the way the feed addresses it.
    pub fn acting_team_id(message_type: i64, ids: &MessageIds) -> Option<i64> {
        match message_type {
            TRADE_ACCEPTED => ids.from,
            MOVED_OFF_ROSTER => ids.for_team,
            _ => ids.to,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Message {
    message_type_id: i64,
    from: Option<i64>,
    #[serde(rename = "for")]
    for_team: Option<i64>,
    to: Option<i64>,
    target_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Topic {
    date: Option<DateTime<Utc>>,
}

static MESSAGE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("activity_message")
        .field("messageTypeId", integer("messageTypeId"))
        .field("from", optional_integer("from"))
        .field("for", optional_integer("for"))
        .field("to", optional_integer("to"))
        .field("targetId", optional_integer("targetId"))
});

static TOPIC_SCHEMA: LazyLock<Schema> =
    LazyLock::new(|| Schema::new("activity_topic").field("date", epoch_millis("date")));

/// Like [`integer`], but absence and `null` stay absent.
fn optional_integer(key: &'static str) -> FieldSpec {
    FieldSpec::extract(key, |value, _| match value {
        None | Some(Value::Null) => Ok(None),
        some => Ok(Some(json!(safe_integer(some)))),
    })
}

fn mapped<T: serde::de::DeserializeOwned>(schema: &Schema, raw: &Value) -> BuildResult<T> {
    let kind = EntityKind::Activity;
    schema
        .map(raw)
        .map_err(|source: MappingError| BuildError::Mapping { kind, source })?
        .deserialize()
        .map_err(|source| BuildError::Shape { kind, source })
}

fn find_by_id<'a>(items: &'a [Value], id: i64) -> Option<&'a Value> {
    items.iter().find(|item| safe_integer(item.get("id")) == id)
}

/// Player record of a roster or player-card entry, which wrap the player itself.
fn player_of(entry: &Value) -> BuildResult<Player> {
    let raw = lookup(entry, "playerPoolEntry.player")
        .or_else(|| entry.get("player"))
        .unwrap_or(entry);
    mapped(&player::SCHEMA, raw)
}

/// Build the activity of one topic against the raw teams of the same league.
pub fn build_activity(
    topic: &Value,
    teams: &[Value],
    filter: MessageFilter,
    context: Context,
) -> BuildResult<Vec<Activity>> {
    let Topic { date } = mapped(&TOPIC_SCHEMA, topic)?;
    let messages = lookup(topic, "messages")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut actions = Vec::with_capacity(messages.len());
    for raw in messages {
        let message: Message = mapped(&MESSAGE_SCHEMA, raw)?;
        if !filter.includes(message.message_type_id) {
            continue;
        }
        let ids = MessageIds { from: message.from, for_team: message.for_team, to: message.to };
        let action = ActivityAction::from_message_type(message.message_type_id);

        let raw_team = Activity::acting_team_id(message.message_type_id, &ids)
            .and_then(|id| find_by_id(teams, id));
        let player = match (raw_team, message.target_id) {
            (Some(team), Some(target)) => lookup(team, "roster.entries")
                .and_then(Value::as_array)
                .and_then(|entries| {
                    entries
                        .iter()
                        .find(|entry| safe_integer(entry.get("playerId")) == target)
                })
                .map(player_of)
                .transpose()?,
            _ => None,
        };
        let team = raw_team
            .map(|team| TeamBuilder::build(team, context).map(|entity| entity.into_inner()))
            .transpose()?;
        let bid_amount = match action {
            ActivityAction::WaiverAdded => ids.from.unwrap_or(0),
            _ => 0,
        };

        actions.push(Activity { team, action, player, bid_amount, date, target_id: message.target_id, ids });
    }
    Ok(actions)
}

/// Activity for every topic of a communication payload, one result per topic.
pub fn recent_activity(
    communication: &Value,
    league: &Value,
    filter: MessageFilter,
    context: Context,
) -> Vec<BuildResult<Vec<Activity>>> {
    let teams = payload::teams(league);
    payload::topics(communication)
        .iter()
        .enumerate()
        .map(|(index, topic)| {
            build_activity(topic, teams, filter, context).inspect_err(|error| {
                warn!("skipping activity topic #{index}: {error}");
            })
        })
        .collect()
}

/// Target ids of activity whose player was not found on the acting team's roster.
pub fn missing_player_ids(activity: &[Vec<Activity>]) -> Vec<i64> {
    let mut ids: Vec<i64> = activity
        .iter()
        .flatten()
        .filter(|action| action.player.is_none())
        .filter_map(|action| action.target_id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Fill players still missing from `players` of a player-card payload. Returns how
/// many were filled; targets the payload does not know stay empty. Every card is
/// mapped before any player is assigned, so on error `activity` is left as it was.
pub fn fill_missing_players(activity: &mut [Vec<Activity>], player_cards: &Value) -> BuildResult<usize> {
    let cards = payload::players(player_cards);
    let found = activity
        .iter()
        .flatten()
        .map(|action| match action.player {
            Some(_) => Ok(None),
            None => action
                .target_id
                .and_then(|id| find_by_id(cards, id))
                .map(player_of)
                .transpose(),
        })
        .collect::<BuildResult<Vec<Option<Player>>>>()?;

    let mut filled = 0;
    for (action, player) in activity.iter_mut().flatten().zip(found) {
        if let Some(player) = player {
            action.player = Some(player);
            filled += 1;
        }
    }
    debug!("filled {filled} players from {} player cards", cards.len());
    Ok(filled)
}
