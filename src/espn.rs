//! Helpers for reading ESPN's raw JSON contract: dotted-path lookups, the lenient
//! numeric coercion ESPN payloads need (scores arrive as strings, ids as numbers or
//! strings), and the static id → label tables the API never spells out.
use serde_json::Value;

/// Largest integer a JSON number can carry without losing precision.
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Resolve a dot-separated path (`record.overall.wins`) inside a raw record.
///
/// Numeric segments index into arrays. The empty path returns the record itself.
/// A `null` at the end of the path is a present value; a missing key anywhere along
/// the path is absence.
pub fn lookup<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(raw);
    }
    path.split('.').try_fold(raw, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Short name of a value's JSON shape, used in extraction error messages.
pub fn shape_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "absent",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "bool",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Numeric reading of a raw value. `NaN` when the value has no numeric meaning.
fn to_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                // Rust also accepts "inf"/"NaN" spellings; ESPN never sends them as scores.
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Null) => 0.0,
        _ => f64::NAN,
    }
}

/// Coerce any raw value into an integer: non-numeric or absent input becomes `0`,
/// fractions truncate toward zero and the result is clamped to the safe range.
pub fn safe_integer(value: Option<&Value>) -> i64 {
    let number = to_number(value);
    if number.is_nan() {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    let clamped = number
        .trunc()
        .clamp(-(MAX_SAFE_INTEGER as f64), MAX_SAFE_INTEGER as f64) as i64;
    clamped
}

/// Coerce any raw value into a finite float, `0.0` when it has no numeric meaning.
pub fn safe_number(value: Option<&Value>) -> f64 {
    let number = to_number(value);
    if number.is_finite() { number } else { 0.0 }
}

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

/// ESPN pro team id → (full name, abbreviation).
const NFL_TEAMS: &[(i64, &str, &str)] = &[
    (0, "Free Agent", "FA"),
    (1, "Atlanta Falcons", "ATL"),
    (2, "Buffalo Bills", "BUF"),
    (3, "Chicago Bears", "CHI"),
    (4, "Cincinnati Bengals", "CIN"),
    (5, "Cleveland Browns", "CLE"),
    (6, "Dallas Cowboys", "DAL"),
    (7, "Denver Broncos", "DEN"),
    (8, "Detroit Lions", "DET"),
    (9, "Green Bay Packers", "GB"),
    (10, "Tennessee Titans", "TEN"),
    (11, "Indianapolis Colts", "IND"),
    (12, "Kansas City Chiefs", "KC"),
    (13, "Las Vegas Raiders", "LV"),
    (14, "Los Angeles Rams", "LAR"),
    (15, "Miami Dolphins", "MIA"),
    (16, "Minnesota Vikings", "MIN"),
    (17, "New England Patriots", "NE"),
    (18, "New Orleans Saints", "NO"),
    (19, "New York Giants", "NYG"),
    (20, "New York Jets", "NYJ"),
    (21, "Philadelphia Eagles", "PHI"),
    (22, "Arizona Cardinals", "ARI"),
    (23, "Pittsburgh Steelers", "PIT"),
    (24, "Los Angeles Chargers", "LAC"),
    (25, "San Francisco 49ers", "SF"),
    (26, "Seattle Seahawks", "SEA"),
    (27, "Tampa Bay Buccaneers", "TB"),
    (28, "Washington Commanders", "WSH"),
    (29, "Carolina Panthers", "CAR"),
    (30, "Jacksonville Jaguars", "JAX"),
    (33, "Baltimore Ravens", "BAL"),
    (34, "Houston Texans", "HOU"),
];

/// ESPN lineup slot / position id → label.
const LINEUP_SLOTS: &[(i64, &str)] = &[
    (0, "QB"),
    (1, "TQB"),
    (2, "RB"),
    (3, "RB/WR"),
    (4, "WR"),
    (5, "WR/TE"),
    (6, "TE"),
    (7, "OP"),
    (8, "DT"),
    (9, "DE"),
    (10, "LB"),
    (11, "DL"),
    (12, "CB"),
    (13, "S"),
    (14, "DB"),
    (15, "DP"),
    (16, "D/ST"),
    (17, "K"),
    (18, "P"),
    (19, "HC"),
    (20, "Bench"),
    (21, "IR"),
    (23, "RB/WR/TE"),
    (24, "ER"),
];

pub fn nfl_team_name(id: i64) -> Option<&'static str> {
    NFL_TEAMS.iter().find(|(team_id, _, _)| *team_id == id).map(|(_, name, _)| *name)
}

pub fn nfl_team_abbreviation(id: i64) -> Option<&'static str> {
    NFL_TEAMS.iter().find(|(team_id, _, _)| *team_id == id).map(|(_, _, abbrev)| *abbrev)
}

pub fn position_label(slot_id: i64) -> Option<&'static str> {
    LINEUP_SLOTS.iter().find(|(id, _)| *id == slot_id).map(|(_, label)| *label)
}
