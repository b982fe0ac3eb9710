//! Reusable field specs for the shapes ESPN payloads keep repeating.
//!
//! Everything here is an ordinary [`FieldSpec::extract`]; the mapper has no special
//! cases for numbers, timestamps or nested records.
use crate::error::{ExtractError, ExtractResult};
use crate::espn::{lookup, safe_integer, safe_number, shape_of};
use crate::schema::{FieldSpec, Schema};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// Integer coerced from whatever sits at `key`; `0` when absent or non-numeric.
pub fn integer(key: &'static str) -> FieldSpec {
    FieldSpec::extract(key, |value, _| Ok(Some(json!(safe_integer(value)))))
}

/// Float coerced from whatever sits at `key`; `0.0` when absent or non-numeric.
pub fn number(key: &'static str) -> FieldSpec {
    FieldSpec::extract(key, |value, _| Ok(Some(json!(safe_number(value)))))
}

/// Integer id at `key` translated through a lookup table. Absent when the id is
/// absent or unknown to the table.
pub fn label(key: &'static str, table: fn(i64) -> Option<&'static str>) -> FieldSpec {
    FieldSpec::extract(key, move |value, _| {
        Ok(value.and_then(|v| table(safe_integer(Some(v)))).map(Value::from))
    })
}

/// Array of integer ids at `key` translated through a lookup table. Unknown ids are
/// dropped; an absent array maps to an empty one.
pub fn labels(key: &'static str, table: fn(i64) -> Option<&'static str>) -> FieldSpec {
    FieldSpec::extract(key, move |value, _| {
        let ids = match value {
            None | Some(Value::Null) => return Ok(Some(json!([]))),
            Some(Value::Array(ids)) => ids,
            Some(other) => return Err(unexpected("array", Some(other))),
        };
        let labels: Vec<&str> = ids
            .iter()
            .filter_map(|id| table(safe_integer(Some(id))))
            .collect();
        Ok(Some(json!(labels)))
    })
}

/// Epoch milliseconds at `key` as an RFC 3339 UTC timestamp. `null` and absence pass
/// through unchanged.
pub fn epoch_millis(key: &'static str) -> FieldSpec {
    FieldSpec::extract(key, |value, _| match value {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(Value::Null)),
        Some(Value::Number(n)) => {
            let millis = n
                .as_i64()
                .ok_or_else(|| ExtractError::InvalidValue(format!("timestamp {n} is not whole milliseconds")))?;
            let at = DateTime::<Utc>::from_timestamp_millis(millis)
                .ok_or_else(|| ExtractError::InvalidValue(format!("timestamp {millis} out of range")))?;
            Ok(Some(json!(format_timestamp(at))))
        }
        Some(other) => Err(unexpected("epoch milliseconds", Some(other))),
    })
}

/// ISO 8601 date string at `key` as an RFC 3339 UTC timestamp. ESPN's scoreboard
/// omits seconds (`2024-09-08T17:00Z`), so that form is accepted too.
pub fn iso_timestamp(key: &'static str) -> FieldSpec {
    FieldSpec::extract(key, |value, _| match value {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(Value::Null)),
        Some(Value::String(text)) => parse_iso(text)
            .map(|at| Some(json!(format_timestamp(at))))
            .ok_or_else(|| ExtractError::InvalidValue(format!("unparseable date `{text}`"))),
        Some(other) => Err(unexpected("date string", Some(other))),
    })
}

/// Object at `key` mapped through `schema`. Absent stays absent, `null` stays `null`.
pub fn nested(key: &'static str, schema: &'static LazyLock<Schema>) -> FieldSpec {
    FieldSpec::extract(key, move |value, _| match value {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(Value::Null)),
        Some(object @ Value::Object(_)) => map_nested(schema, object).map(Some),
        Some(other) => Err(unexpected("object", Some(other))),
    })
}

/// Array at `key` whose elements hold, at `item_path`, objects to map through
/// `schema`. An absent array maps to an empty list; elements missing the item are
/// skipped.
pub fn nested_list(
    key: &'static str,
    item_path: &'static str,
    schema: &'static LazyLock<Schema>,
) -> FieldSpec {
    FieldSpec::extract(key, move |value, _| {
        let items = match value {
            None | Some(Value::Null) => return Ok(Some(json!([]))),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(unexpected("array", Some(other))),
        };
        let mapped = items
            .iter()
            .filter_map(|item| lookup(item, item_path))
            .map(|item| match item {
                Value::Object(_) => map_nested(schema, item),
                other => Err(unexpected("object", Some(other))),
            })
            .collect::<ExtractResult<Vec<_>>>()?;
        Ok(Some(Value::Array(mapped)))
    })
}

/// Object of `{ "<slot id>": count }` re-keyed by position label. Unknown slot ids
/// are dropped.
pub fn slot_counts(key: &'static str, table: fn(i64) -> Option<&'static str>) -> FieldSpec {
    FieldSpec::extract(key, move |value, _| {
        let counts = match value {
            None | Some(Value::Null) => return Ok(Some(json!({}))),
            Some(Value::Object(counts)) => counts,
            Some(other) => return Err(unexpected("object", Some(other))),
        };
        let relabeled: serde_json::Map<String, Value> = counts
            .iter()
            .filter_map(|(slot, count)| {
                let slot = slot.parse::<i64>().ok()?;
                table(slot).map(|label| (label.to_owned(), json!(safe_integer(Some(count)))))
            })
            .collect();
        Ok(Some(Value::Object(relabeled)))
    })
}

pub(crate) fn map_nested(schema: &Schema, raw: &Value) -> ExtractResult<Value> {
    schema
        .map(raw)
        .map(|mapped| mapped.into_value())
        .map_err(|e| ExtractError::Nested(Box::new(e)))
}

pub(crate) fn unexpected(expected: &'static str, found: Option<&Value>) -> ExtractError {
    ExtractError::UnexpectedShape { expected, found: shape_of(found) }
}

fn parse_iso(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::espn::{nfl_team_name, position_label};

    fn resolve(spec: &FieldSpec, raw: Value) -> ExtractResult<Option<Value>> {
        spec.resolve(&raw)
    }

    #[test]
    fn integer_and_number_default_to_zero() {
        assert_eq!(resolve(&integer("score"), json!({ "score": "24" })).unwrap(), Some(json!(24)));
        assert_eq!(resolve(&integer("score"), json!({})).unwrap(), Some(json!(0)));
        assert_eq!(resolve(&number("pts"), json!({ "pts": "101.5" })).unwrap(), Some(json!(101.5)));
        assert_eq!(resolve(&number("pts"), json!({ "pts": "n/a" })).unwrap(), Some(json!(0.0)));
    }

    #[test]
    fn label_is_absent_for_unknown_ids() {
        let spec = label("proTeamId", nfl_team_name);
        assert_eq!(resolve(&spec, json!({ "proTeamId": 9 })).unwrap(), Some(json!("Green Bay Packers")));
        assert_eq!(resolve(&spec, json!({ "proTeamId": 99 })).unwrap(), None);
        assert_eq!(resolve(&spec, json!({})).unwrap(), None);
    }

    #[test]
    fn labels_drop_unknown_slots_and_reject_non_arrays() {
        let spec = labels("eligibleSlots", position_label);
        assert_eq!(
            resolve(&spec, json!({ "eligibleSlots": [2, 3, 22, 20] })).unwrap(),
            Some(json!(["RB", "RB/WR", "Bench"]))
        );
        assert_eq!(resolve(&spec, json!({})).unwrap(), Some(json!([])));
        assert!(matches!(
            resolve(&spec, json!({ "eligibleSlots": "RB" })),
            Err(ExtractError::UnexpectedShape { expected: "array", found: "string" })
        ));
    }

    #[test]
    fn epoch_millis_formats_utc() {
        let spec = epoch_millis("date");
        assert_eq!(
            resolve(&spec, json!({ "date": 1_725_645_600_000_i64 })).unwrap(),
            Some(json!("2024-09-06T18:00:00Z"))
        );
        assert_eq!(resolve(&spec, json!({ "date": null })).unwrap(), Some(Value::Null));
        assert!(resolve(&spec, json!({ "date": "yesterday" })).is_err());
    }

    #[test]
    fn iso_timestamp_accepts_minute_precision() {
        let spec = iso_timestamp("date");
        assert_eq!(
            resolve(&spec, json!({ "date": "2024-09-08T17:00Z" })).unwrap(),
            Some(json!("2024-09-08T17:00:00Z"))
        );
        assert_eq!(
            resolve(&spec, json!({ "date": "2024-09-08T13:00:00-04:00" })).unwrap(),
            Some(json!("2024-09-08T17:00:00Z"))
        );
        assert!(matches!(
            resolve(&spec, json!({ "date": "Sunday" })),
            Err(ExtractError::InvalidValue(_))
        ));
    }

    #[test]
    fn slot_counts_relabel_keys() {
        let spec = slot_counts("lineupSlotCounts", position_label);
        assert_eq!(
            resolve(&spec, json!({ "lineupSlotCounts": { "0": 1, "2": 2, "22": 0, "20": "7" } })).unwrap(),
            Some(json!({ "QB": 1, "RB": 2, "Bench": 7 }))
        );
    }

    static INNER: LazyLock<Schema> =
        LazyLock::new(|| Schema::new("inner").field("id", integer("id")));

    #[test]
    fn nested_list_maps_items_and_defaults_to_empty() {
        let spec = nested_list("entries", "playerPoolEntry.player", &INNER);
        let raw = json!({ "entries": [
            { "playerPoolEntry": { "player": { "id": "15" } } },
            { "playerPoolEntry": {} },
            { "playerPoolEntry": { "player": { "id": 7 } } },
        ] });
        assert_eq!(resolve(&spec, raw).unwrap(), Some(json!([{ "id": 15 }, { "id": 7 }])));
        assert_eq!(resolve(&spec, json!({})).unwrap(), Some(json!([])));
    }

    #[test]
    fn nested_errors_carry_the_inner_field() {
        static STRICT: LazyLock<Schema> =
            LazyLock::new(|| Schema::new("strict").field("when", epoch_millis("when")));
        let err = resolve(&nested("draft", &STRICT), json!({ "draft": { "when": "soon" } })).unwrap_err();
        match err {
            ExtractError::Nested(inner) => assert_eq!(inner.field, "when"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
