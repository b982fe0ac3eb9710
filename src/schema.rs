//! The declarative mapping engine.
//!
//! A [`Schema`] is a table of output field name → [`FieldSpec`]. Applying it to a raw
//! record with [`map`] yields a [`MappedRecord`] holding exactly the schema's fields,
//! each either present (any JSON value, `null` included) or absent.
use crate::error::{ExtractResult, MappingError};
use crate::espn::lookup;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Custom extraction: receives the value at the spec's source key (if any) and the
/// whole raw container. `Ok(None)` means absent, `Ok(Some(Value::Null))` means null.
pub type Extract = Box<dyn Fn(Option<&Value>, &Value) -> ExtractResult<Option<Value>> + Send + Sync>;

/// How one output field is obtained from a raw record.
pub struct FieldSpec {
    source_key: &'static str,
    extract: Option<Extract>,
    default: Option<Value>,
}

impl FieldSpec {
    /// Copy the value found at `source_key` as-is.
    pub fn key(source_key: &'static str) -> Self {
        Self { source_key, extract: None, default: None }
    }

    /// Compute the value with `extract`, which fully determines the output.
    pub fn extract<F>(source_key: &'static str, extract: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> ExtractResult<Option<Value>> + Send + Sync + 'static,
    {
        Self { source_key, extract: Some(Box::new(extract)), default: None }
    }

    /// Fallback used when `source_key` is absent. Ignored when an extract is set.
    pub fn or_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn source_key(&self) -> &'static str {
        self.source_key
    }

    pub fn has_extract(&self) -> bool {
        self.extract.is_some()
    }

    pub fn resolve(&self, raw: &Value) -> ExtractResult<Option<Value>> {
        let value = lookup(raw, self.source_key);
        match &self.extract {
            Some(extract) => extract(value, raw),
            None => Ok(value.cloned().or_else(|| self.default.clone())),
        }
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("source_key", &self.source_key)
            .field("extract", &self.extract.as_ref().map(|_| "<fn>"))
            .field("default", &self.default)
            .finish()
    }
}

/// Named set of field specs for one record shape.
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    fields: BTreeMap<&'static str, FieldSpec>,
}

impl Schema {
    pub fn new(name: &'static str) -> Self {
        Self { name, fields: BTreeMap::new() }
    }

    pub fn field(mut self, name: &'static str, spec: FieldSpec) -> Self {
        let previous = self.fields.insert(name, spec);
        assert!(previous.is_none(), "duplicate field `{name}` in schema `{}`", self.name);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    pub fn get(&self, field: &str) -> Option<&FieldSpec> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn map(&self, raw: &Value) -> Result<MappedRecord, MappingError> {
        map(self, raw)
    }
}

/// Apply every field spec of `schema` to the same raw record.
///
/// Pure: the raw record is only read, and fields do not see each other's output.
pub fn map(schema: &Schema, raw: &Value) -> Result<MappedRecord, MappingError> {
    let fields = schema
        .fields
        .iter()
        .map(|(&field, spec)| {
            spec.resolve(raw)
                .map(|value| (field, value))
                .map_err(|source| MappingError { schema: schema.name, field, source })
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;
    Ok(MappedRecord { fields })
}

/// Flat output of a schema application.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRecord {
    fields: BTreeMap<&'static str, Option<Value>>,
}

impl MappedRecord {
    /// Present value of `field`; `None` for absent or undeclared fields.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).and_then(Option::as_ref)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_absent(&self, field: &str) -> bool {
        matches!(self.fields.get(field), Some(None))
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// JSON object of the present fields. Absent fields are omitted.
    pub fn into_value(self) -> Value {
        let object: Map<String, Value> = self
            .fields
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field.to_owned(), v)))
            .collect();
        Value::Object(object)
    }

    pub fn deserialize<T: DeserializeOwned>(self) -> serde_json::Result<T> {
        serde_json::from_value(self.into_value())
    }
}
