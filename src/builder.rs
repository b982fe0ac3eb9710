use crate::error::{BuildError, BuildResult};
use crate::schema::{MappedRecord, Schema};
use crate::{Context, Entity, EntityKind};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Builds one entity kind from raw JSON through that kind's static schema.
///
/// Implementors only name their schema and output type; mapping, typing and
/// stamping are shared. Builders hold no state, so independent records can be
/// built from any number of threads.
pub trait EntityBuilder {
    type Output: DeserializeOwned;

    const KIND: EntityKind;

    fn schema() -> &'static Schema;

    /// Flat mapped record, before typing. Useful to inspect what the schema produced.
    fn map(raw: &Value) -> BuildResult<MappedRecord> {
        Self::schema()
            .map(raw)
            .map_err(|source| BuildError::Mapping { kind: Self::KIND, source })
    }

    fn build(raw: &Value, context: Context) -> BuildResult<Entity<Self::Output>> {
        let data = Self::map(raw)?
            .deserialize()
            .map_err(|source| BuildError::Shape { kind: Self::KIND, source })?;
        Ok(Entity { kind: Self::KIND, context, data })
    }
}

/// Build every item independently. One result per item, in input order.
pub fn build_all<'a, B: EntityBuilder>(
    items: impl IntoIterator<Item = &'a Value>,
    context: Context,
) -> Vec<BuildResult<Entity<B::Output>>> {
    items.into_iter().map(|raw| B::build(raw, context)).collect()
}

/// A record that failed to build, with its position in the input batch.
#[derive(Debug)]
pub struct Failure {
    pub index: usize,
    pub error: BuildError,
}

/// Successfully built entities plus the records that could not be built.
#[derive(Debug)]
pub struct Batch<T> {
    pub entities: Vec<Entity<T>>,
    pub failures: Vec<Failure>,
}

impl<T> Batch<T> {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Build a batch, keeping failures out of the way of the records that did build.
pub fn build_batch<'a, B: EntityBuilder>(
    items: impl IntoIterator<Item = &'a Value>,
    context: Context,
) -> Batch<B::Output> {
    let mut entities = Vec::new();
    let mut failures = Vec::new();

    for (index, result) in build_all::<B>(items, context).into_iter().enumerate() {
        match result {
            Ok(entity) => entities.push(entity),
            Err(error) => {
                warn!("skipping {} #{index}: {error}", B::KIND);
                failures.push(Failure { index, error });
            }
        }
    }

    debug!(
        "built {} of {} {} records",
        entities.len(),
        entities.len() + failures.len(),
        B::KIND
    );
    Batch { entities, failures }
}
