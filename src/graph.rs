//! Cross-reference resolution over a batch of built teams.
//!
//! Teams reference each other through their schedules. Rather than owning each
//! other, resolved teams live in an arena ([`EntityGraph`]) keyed by [`EntityKey`];
//! schedule slots store keys, and [`EntityGraph::opponents`] hands out a borrowed
//! view with the referenced teams substituted in.
use crate::builder::{EntityBuilder, build_all};
use crate::error::{ResolveError, Side};
use crate::espn::{safe_integer, safe_number, shape_of};
use crate::team::{Team, TeamBuilder};
use crate::{Context, Entity};
use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Identity of a team within one league season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityKey {
    pub league_id: Option<u32>,
    pub season_id: Option<u16>,
    pub id: u32,
}

impl EntityKey {
    pub fn new(context: Context, id: u32) -> Self {
        Self { league_id: context.league_id, season_id: context.season_id, id }
    }

    pub fn of(team: &Entity<Team>) -> Self {
        Self::new(team.context, team.id)
    }

    fn scope(&self) -> Context {
        Context { league_id: self.league_id, season_id: self.season_id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "U")]
    Undecided,
}

impl Outcome {
    /// Classify a matchup result from the viewing team's side.
    ///
    /// `UNDECIDED` stays undecided; the team wins when the winner names its side;
    /// anything else (the other side, ties, unknown values, absence) is a loss.
    pub fn classify(winner: Option<&str>, side: Side) -> Self {
        match (winner, side) {
            (Some("UNDECIDED"), _) => Outcome::Undecided,
            (Some("AWAY"), Side::Away) | (Some("HOME"), Side::Home) => Outcome::Win,
            _ => Outcome::Loss,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
            Outcome::Undecided => "U",
        }
    }
}

/// A team's schedule as read from the raw matchups, one entry per period played.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamHistory {
    pub scores: Vec<f64>,
    pub outcomes: Vec<Outcome>,
    pub schedule: Vec<i64>,
}

/// Scan `matchups` in order for the periods `team_id` played. A side only counts
/// for the team whose id it names; an opponent side without a team id fails the team.
///
/// A matchup without an away side is read as a bye: the home side's score counts
/// and the team is scheduled against itself. This can also swallow a matchup whose
/// away side is merely missing from the payload.
pub fn team_history(team_id: u32, matchups: &[Value]) -> Result<TeamHistory, ResolveError> {
    let id = i64::from(team_id);
    let mut history = TeamHistory::default();

    for (index, matchup) in matchups.iter().enumerate() {
        let Some(matchup) = matchup.as_object() else {
            debug!("skipping matchup #{index}: {} is not a matchup", shape_of(Some(matchup)));
            continue;
        };
        let winner = matchup.get("winner").and_then(Value::as_str);
        let home = side_of(matchup, Side::Home);
        let away = side_of(matchup, Side::Away);

        let opponent_of = |object: &Map<String, Value>, side: Side| {
            side_team(object).ok_or(ResolveError::MissingTeamId { team_id, index, side })
        };

        let (side, own, opponent) = match (home, away) {
            (Ok(home), Ok(Some(away))) if side_team(away) == Some(id) => {
                let home = home.ok_or(ResolveError::MissingOpponentSide {
                    team_id,
                    index,
                    side: Side::Away,
                    missing: Side::Home,
                })?;
                (Side::Away, away, opponent_of(home, Side::Home)?)
            }
            (Ok(Some(home)), Ok(Some(away))) if side_team(home) == Some(id) => {
                (Side::Home, home, opponent_of(away, Side::Away)?)
            }
            (Ok(Some(home)), Ok(None)) if side_team(home) == Some(id) => (Side::Home, home, id),
            (Ok(Some(home)), Err(found)) if side_team(home) == Some(id) => {
                return Err(ResolveError::MalformedSide { team_id, index, side: Side::Away, found });
            }
            (Err(found), Ok(Some(away))) if side_team(away) == Some(id) => {
                return Err(ResolveError::MalformedSide { team_id, index, side: Side::Home, found });
            }
            _ => continue,
        };

        history.scores.push(safe_number(own.get("totalPoints")));
        history.schedule.push(opponent);
        history.outcomes.push(Outcome::classify(winner, side));
    }

    Ok(history)
}

/// The side object of a matchup. `Ok(None)` when the side is absent or `null`,
/// `Err(shape)` when it is something other than an object.
fn side_of(matchup: &Map<String, Value>, side: Side) -> Result<Option<&Map<String, Value>>, &'static str> {
    match matchup.get(side.as_str()) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(object)) => Ok(Some(object)),
        other => Err(shape_of(other)),
    }
}

/// Team id named by a side. `None` when `teamId` is absent, `null` or not numeric,
/// so an unnamed side never matches a team.
fn side_team(side: &Map<String, Value>) -> Option<i64> {
    match side.get("teamId") {
        Some(id @ Value::Number(_)) => Some(safe_integer(Some(id))),
        Some(id @ Value::String(text)) if text.trim().parse::<f64>().is_ok() => {
            Some(safe_integer(Some(id)))
        }
        _ => None,
    }
}

/// One slot of a resolved schedule: a reference into the graph, or the raw id when
/// the opponent is not part of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ScheduleSlot {
    Resolved(EntityKey),
    Unresolved(i64),
}

/// A team with its history and resolved schedule. Built once per batch; the
/// schedule and derived fields are not modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTeam {
    #[serde(flatten)]
    pub team: Entity<Team>,
    pub scores: Vec<f64>,
    pub outcomes: Vec<Outcome>,
    pub schedule: Vec<ScheduleSlot>,
    /// Margin of victory per period; `None` where the opponent is unresolved or has
    /// no score for that period.
    pub mov: Vec<Option<f64>>,
}

impl ResolvedTeam {
    pub fn key(&self) -> EntityKey {
        EntityKey::of(&self.team)
    }

    pub fn record(&self) -> (usize, usize, usize) {
        self.outcomes.iter().fold((0, 0, 0), |(w, l, u), outcome| match outcome {
            Outcome::Win => (w + 1, l, u),
            Outcome::Loss => (w, l + 1, u),
            Outcome::Undecided => (w, l, u + 1),
        })
    }
}

/// Borrowed view of a schedule slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Opponent<'g> {
    Team(&'g ResolvedTeam),
    Unresolved(i64),
}

/// Arena of resolved teams for one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityGraph {
    teams: BTreeMap<EntityKey, ResolvedTeam>,
    order: Vec<EntityKey>,
}

impl EntityGraph {
    pub fn get(&self, key: &EntityKey) -> Option<&ResolvedTeam> {
        self.teams.get(key)
    }

    pub fn team(&self, context: Context, id: u32) -> Option<&ResolvedTeam> {
        self.get(&EntityKey::new(context, id))
    }

    /// Teams in the order they were given to the resolver.
    pub fn teams(&self) -> impl Iterator<Item = &ResolvedTeam> + '_ {
        self.order.iter().filter_map(|key| self.teams.get(key))
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// The schedule of `key` with each resolved slot replaced by the opponent team.
    pub fn opponents(&self, key: &EntityKey) -> Option<Vec<Opponent<'_>>> {
        let team = self.teams.get(key)?;
        let view = team
            .schedule
            .iter()
            .map(|slot| match slot {
                ScheduleSlot::Resolved(opponent) => self
                    .teams
                    .get(opponent)
                    .map_or(Opponent::Unresolved(i64::from(opponent.id)), Opponent::Team),
                ScheduleSlot::Unresolved(id) => Opponent::Unresolved(*id),
            })
            .collect();
        Some(view)
    }

    pub fn into_teams(mut self) -> Vec<ResolvedTeam> {
        self.order
            .iter()
            .filter_map(|key| self.teams.remove(key))
            .collect()
    }
}

impl Serialize for EntityGraph {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.teams())
    }
}

/// A team left out of the graph, with its position in the input batch.
#[derive(Debug)]
pub struct TeamFailure {
    pub index: usize,
    pub team_id: Option<u32>,
    pub error: ResolveError,
}

#[derive(Debug)]
pub struct Resolution {
    pub graph: EntityGraph,
    pub failures: Vec<TeamFailure>,
}

/// Resolves teams against the matchup list of the same payload.
#[derive(Debug, Clone, Copy)]
pub struct GraphResolver<'a> {
    matchups: &'a [Value],
}

impl<'a> GraphResolver<'a> {
    pub fn new(matchups: &'a [Value]) -> Self {
        Self { matchups }
    }

    /// Build raw teams with [`TeamBuilder`] and resolve the ones that built.
    pub fn resolve_raw(&self, raw_teams: &[Value], context: Context) -> Resolution {
        let mut failures = Vec::new();
        let mut teams = Vec::with_capacity(raw_teams.len());
        let mut indices = Vec::with_capacity(raw_teams.len());

        for (index, result) in build_all::<TeamBuilder>(raw_teams, context).into_iter().enumerate() {
            match result {
                Ok(team) => {
                    teams.push(team);
                    indices.push(index);
                }
                Err(error) => {
                    warn!("skipping {} #{index}: {error}", TeamBuilder::KIND);
                    failures.push(TeamFailure { index, team_id: None, error: error.into() });
                }
            }
        }

        let mut resolution = self.resolve(teams);
        for failure in &mut resolution.failures {
            failure.index = indices[failure.index];
        }
        resolution.failures.extend(failures);
        resolution.failures.sort_by_key(|f| f.index);
        resolution
    }

    pub fn resolve(&self, teams: Vec<Entity<Team>>) -> Resolution {
        let mut failures = Vec::new();
        let mut staged: BTreeMap<EntityKey, (Entity<Team>, TeamHistory)> = BTreeMap::new();
        let mut order = Vec::with_capacity(teams.len());

        for (index, team) in teams.into_iter().enumerate() {
            let key = EntityKey::of(&team);
            if staged.contains_key(&key) {
                warn!("duplicate team {} in batch, keeping the first", key.id);
                failures.push(TeamFailure {
                    index,
                    team_id: Some(key.id),
                    error: ResolveError::DuplicateTeam { team_id: key.id },
                });
                continue;
            }
            match team_history(team.id, self.matchups) {
                Ok(history) => {
                    staged.insert(key, (team, history));
                    order.push(key);
                }
                Err(error) => {
                    warn!("leaving team {} out of the graph: {error}", key.id);
                    failures.push(TeamFailure { index, team_id: Some(key.id), error });
                }
            }
        }

        let teams = staged
            .iter()
            .map(|(key, (team, history))| {
                let schedule = resolve_schedule(key, &history.schedule, &staged);
                let mov = margins(&history.scores, &schedule, &staged);
                let resolved = ResolvedTeam {
                    team: team.clone(),
                    scores: history.scores.clone(),
                    outcomes: history.outcomes.clone(),
                    schedule,
                    mov,
                };
                (*key, resolved)
            })
            .collect();

        debug!("resolved {} teams against {} matchups", order.len(), self.matchups.len());
        Resolution { graph: EntityGraph { teams, order }, failures }
    }
}

type Staged = BTreeMap<EntityKey, (Entity<Team>, TeamHistory)>;

fn resolve_schedule(key: &EntityKey, schedule: &[i64], staged: &Staged) -> Vec<ScheduleSlot> {
    schedule
        .iter()
        .map(|&opponent| {
            let candidate = u32::try_from(opponent)
                .ok()
                .map(|id| EntityKey::new(key.scope(), id))
                .filter(|candidate| staged.contains_key(candidate));
            match candidate {
                Some(found) => ScheduleSlot::Resolved(found),
                None => {
                    warn!("team {}: opponent {opponent} is not in this batch", key.id);
                    ScheduleSlot::Unresolved(opponent)
                }
            }
        })
        .collect()
}

/// Own score minus the opponent's score at the same period index.
fn margins(scores: &[f64], schedule: &[ScheduleSlot], staged: &Staged) -> Vec<Option<f64>> {
    scores
        .iter()
        .zip(schedule)
        .enumerate()
        .map(|(period, (own, slot))| match slot {
            ScheduleSlot::Resolved(opponent) => staged
                .get(opponent)
                .and_then(|(_, history)| history.scores.get(period))
                .map(|theirs| own - theirs),
            ScheduleSlot::Unresolved(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use serde_json::json;

    const FIXTURE: &str = include_str!("../fixtures/extended_league.json");

    fn fixture() -> Value {
        serde_json::from_str(FIXTURE).expect("fixture should parse")
    }

    fn ctx() -> Context {
        Context::new(336_358, 2024)
    }

    fn resolve_fixture() -> Resolution {
        let payload = fixture();
        let teams = payload["teams"].as_array().unwrap();
        let schedule = payload["schedule"].as_array().unwrap();
        GraphResolver::new(schedule).resolve_raw(teams, ctx())
    }

    #[test]
    fn outcome_classification() {
        assert_eq!(Outcome::classify(Some("HOME"), Side::Home), Outcome::Win);
        assert_eq!(Outcome::classify(Some("HOME"), Side::Away), Outcome::Loss);
        assert_eq!(Outcome::classify(Some("AWAY"), Side::Away), Outcome::Win);
        assert_eq!(Outcome::classify(Some("AWAY"), Side::Home), Outcome::Loss);
        assert_eq!(Outcome::classify(Some("UNDECIDED"), Side::Home), Outcome::Undecided);
        assert_eq!(Outcome::classify(Some("UNDECIDED"), Side::Away), Outcome::Undecided);
        assert_eq!(Outcome::classify(Some("TIE"), Side::Home), Outcome::Loss);
        assert_eq!(Outcome::classify(None, Side::Away), Outcome::Loss);
        assert_eq!(Outcome::Undecided.code(), "U");
    }

    #[test]
    fn history_attributes_both_sides() {
        let matchups = vec![
            json!({ "winner": "HOME", "home": { "teamId": 1, "totalPoints": 50 }, "away": { "teamId": 2, "totalPoints": 45 } }),
            json!({ "winner": "HOME", "home": { "teamId": 2, "totalPoints": 70 }, "away": { "teamId": 1, "totalPoints": 60 } }),
        ];
        let history = team_history(1, &matchups).unwrap();
        assert_eq!(history.scores, vec![50.0, 60.0]);
        assert_eq!(history.schedule, vec![2, 2]);
        assert_eq!(history.outcomes, vec![Outcome::Win, Outcome::Loss]);

        let other = team_history(2, &matchups).unwrap();
        assert_eq!(other.scores, vec![45.0, 70.0]);
        assert_eq!(other.outcomes, vec![Outcome::Loss, Outcome::Win]);
    }

    #[test]
    fn string_ids_and_scores_still_match() {
        let matchups = vec![json!({
            "winner": "AWAY",
            "home": { "teamId": "4", "totalPoints": "99.5" },
            "away": { "teamId": "6", "totalPoints": "101.25" }
        })];
        let history = team_history(6, &matchups).unwrap();
        assert_eq!(history.scores, vec![101.25]);
        assert_eq!(history.schedule, vec![4]);
        assert_eq!(history.outcomes, vec![Outcome::Win]);
    }

    #[test]
    fn bye_week_schedules_the_team_against_itself() {
        let matchups = vec![json!({ "winner": "UNDECIDED", "home": { "teamId": 5, "totalPoints": 88.0 } })];
        let history = team_history(5, &matchups).unwrap();
        assert_eq!(history.schedule, vec![5]);
        assert_eq!(history.scores, vec![88.0]);
        assert_eq!(history.outcomes, vec![Outcome::Undecided]);

        let null_away = vec![json!({ "winner": "HOME", "home": { "teamId": 5, "totalPoints": 1 }, "away": null })];
        assert_eq!(team_history(5, &null_away).unwrap().schedule, vec![5]);
    }

    #[test]
    fn malformed_matchups_fail_only_the_team_involved() {
        let matchups = vec![
            json!({ "away": { "teamId": 3, "totalPoints": 10 } }),
            json!({ "home": { "teamId": 4, "totalPoints": 10 }, "away": "tbd" }),
            json!("not a matchup"),
            json!({ "home": { "teamId": 1, "totalPoints": 10 }, "away": { "teamId": 2, "totalPoints": 9 } }),
        ];
        assert!(matches!(
            team_history(3, &matchups),
            Err(ResolveError::MissingOpponentSide { team_id: 3, index: 0, .. })
        ));
        assert!(matches!(
            team_history(4, &matchups),
            Err(ResolveError::MalformedSide { team_id: 4, index: 1, side: Side::Away, found: "string" })
        ));
        assert_eq!(team_history(1, &matchups).unwrap().schedule, vec![2]);
    }

    #[test]
    fn side_without_team_id_belongs_to_nobody() {
        let teams = vec![json!({ "name": "No Id" }), json!({ "id": 1 })];
        let matchups = vec![json!({
            "winner": "AWAY",
            "home": { "teamId": 1, "totalPoints": 50 },
            "away": { "totalPoints": 60 }
        })];

        assert_eq!(team_history(0, &matchups).unwrap(), TeamHistory::default());
        assert!(matches!(
            team_history(1, &matchups),
            Err(ResolveError::MissingTeamId { team_id: 1, index: 0, side: Side::Away })
        ));

        let resolution = GraphResolver::new(&matchups).resolve_raw(&teams, ctx());
        let unnamed = resolution.graph.team(ctx(), 0).unwrap();
        assert!(unnamed.scores.is_empty());
        assert!(unnamed.mov.is_empty());
        assert_eq!(resolution.failures.len(), 1);
        assert_eq!(resolution.failures[0].index, 1);
        assert!(resolution.graph.team(ctx(), 1).is_none());
    }

    #[test]
    fn null_or_blank_team_ids_never_match_team_zero() {
        let matchups = vec![
            json!({ "home": { "teamId": null, "totalPoints": 10 } }),
            json!({ "home": { "teamId": "", "totalPoints": 10 }, "away": { "teamId": "x", "totalPoints": 3 } }),
        ];
        assert_eq!(team_history(0, &matchups).unwrap(), TeamHistory::default());
    }

    #[test]
    fn margin_of_victory_uses_the_resolved_opponent() {
        let resolution = resolve_fixture();
        assert!(resolution.failures.is_empty());

        let team_a = resolution.graph.team(ctx(), 1).unwrap();
        let team_b = resolution.graph.team(ctx(), 2).unwrap();
        assert_eq!(team_a.scores[..2], [50.0, 60.0]);
        assert_eq!(team_b.scores, vec![45.0, 70.0]);
        assert_eq!(team_a.mov[..2], [Some(5.0), Some(-10.0)]);
        assert_eq!(team_b.mov, vec![Some(-5.0), Some(10.0)]);
        assert_eq!(team_a.outcomes[..2], [Outcome::Win, Outcome::Loss]);
    }

    #[test]
    fn bye_week_margin_is_zero() {
        let resolution = resolve_fixture();
        let team_a = resolution.graph.team(ctx(), 1).unwrap();
        assert_eq!(team_a.schedule[2], ScheduleSlot::Resolved(EntityKey::new(ctx(), 1)));
        assert_eq!(team_a.mov[2], Some(0.0));
    }

    #[test]
    fn opponents_view_substitutes_teams() {
        let resolution = resolve_fixture();
        let key = EntityKey::new(ctx(), 3);
        let opponents = resolution.graph.opponents(&key).unwrap();
        assert_eq!(opponents.len(), 2);
        match opponents[0] {
            Opponent::Team(team) => {
                assert_eq!(team.team.id, 4);
                assert_eq!(team.team.name.as_deref(), Some("Metropolis Marvels"));
            }
            Opponent::Unresolved(id) => panic!("opponent {id} should resolve"),
        }
        assert_eq!(resolution.graph.teams().map(|t| t.team.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn unknown_opponent_stays_raw_and_siblings_resolve() {
        let payload = fixture();
        let teams: Vec<Value> = payload["teams"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|t| t["id"] != json!(4))
            .cloned()
            .collect();
        let schedule = payload["schedule"].as_array().unwrap();
        let resolution = GraphResolver::new(schedule).resolve_raw(&teams, ctx());

        assert!(resolution.failures.is_empty());
        let team_c = resolution.graph.team(ctx(), 3).unwrap();
        assert_eq!(team_c.schedule, vec![ScheduleSlot::Unresolved(4), ScheduleSlot::Unresolved(4)]);
        assert_eq!(team_c.mov, vec![None, None]);

        let team_a = resolution.graph.team(ctx(), 1).unwrap();
        assert_eq!(team_a.schedule[0], ScheduleSlot::Resolved(EntityKey::new(ctx(), 2)));
        assert_eq!(team_a.mov[0], Some(5.0));
    }

    #[test]
    fn references_do_not_cross_league_scopes() {
        let payload = fixture();
        let schedule = payload["schedule"].as_array().unwrap();
        let mut teams = crate::build_batch::<TeamBuilder>(payload["teams"].as_array().unwrap(), ctx()).entities;
        // Team 2 arrives from another league; team 1 must not link to it.
        teams[1].context = Context::new(99, 2024);

        let resolution = GraphResolver::new(schedule).resolve(teams);
        let team_a = resolution.graph.team(ctx(), 1).unwrap();
        assert_eq!(team_a.schedule[0], ScheduleSlot::Unresolved(2));
        assert!(resolution.graph.team(Context::new(99, 2024), 2).is_some());
    }

    #[test]
    fn resolving_twice_gives_equal_graphs() {
        let first = resolve_fixture();
        let second = resolve_fixture();
        assert_eq!(first.graph, second.graph);
        assert_eq!(
            serde_json::to_value(&first.graph).unwrap(),
            serde_json::to_value(&second.graph).unwrap()
        );
    }

    #[test]
    fn broken_team_is_isolated_from_the_batch() {
        let payload = fixture();
        let mut teams = payload["teams"].as_array().unwrap().clone();
        teams[2]["roster"] = json!({ "entries": [{ "playerPoolEntry": { "player": { "eligibleSlots": 7 } } }] });
        let mut schedule = payload["schedule"].as_array().unwrap().clone();
        schedule.push(json!({ "away": { "teamId": 4, "totalPoints": 1 } }));

        let resolution = GraphResolver::new(&schedule).resolve_raw(&teams, ctx());
        let failed: Vec<_> = resolution.failures.iter().map(|f| f.index).collect();
        assert_eq!(failed, vec![2, 3]);
        assert!(matches!(resolution.failures[0].error, ResolveError::Build(BuildError::Mapping { .. })));
        assert!(matches!(resolution.failures[1].error, ResolveError::MissingOpponentSide { team_id: 4, .. }));

        assert_eq!(resolution.graph.len(), 2);
        let team_a = resolution.graph.team(ctx(), 1).unwrap();
        assert_eq!(team_a.mov[..2], [Some(5.0), Some(-10.0)]);
    }

    #[test]
    fn duplicate_team_keeps_the_first() {
        let payload = fixture();
        let mut teams = payload["teams"].as_array().unwrap().clone();
        let mut twin = teams[0].clone();
        twin["name"] = json!("Impostors");
        teams.push(twin);
        let schedule = payload["schedule"].as_array().unwrap();

        let resolution = GraphResolver::new(schedule).resolve_raw(&teams, ctx());
        assert_eq!(resolution.failures.len(), 1);
        assert_eq!(resolution.failures[0].index, 4);
        assert_eq!(
            resolution.graph.team(ctx(), 1).unwrap().team.name.as_deref(),
            Some("Gotham Knights")
        );
    }

    #[test]
    fn serialized_team_exposes_history_codes() {
        let resolution = resolve_fixture();
        let team_a = resolution.graph.team(ctx(), 1).unwrap();
        let value = serde_json::to_value(team_a).unwrap();
        assert_eq!(value["outcomes"], json!(["W", "L", "U"]));
        assert_eq!(value["kind"], json!("team"));
        assert_eq!(value["schedule"][0]["id"], json!(2));
        assert_eq!(team_a.record(), (1, 1, 1));
    }
}
