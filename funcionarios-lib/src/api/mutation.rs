//! Create, update, delete, restore and activation toggles
//!
//! Mutations can be executed one at a time or as a batch. Either way, a
//! successful write marks the entity's cached collections stale so the next
//! [`FuncionariosClient::list`] refetches.
//!
//! # Example
//!
//! ```ignore
//! use funcionarios_lib::api::Mutation;
//!
//! // Typed call
//! client.delete::<Sancion>(4).await?;
//!
//! // Or as a value, e.g. returned by the table store for a confirmed dialog
//! if let Some(mutation) = store.confirm_dialog(Dialog::Delete) {
//!     client.execute(mutation).await?;
//! }
//! ```

use std::collections::BTreeSet;

use futures::StreamExt;
use futures::stream;
use log::info;
use log::warn;
use reqwest::Method;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::FuncionariosClient;
use crate::error::Error;
use crate::model::EntityKind;
use crate::model::Record;

// =============================================================================
// Mutation enum
// =============================================================================

/// A write against one entity collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// `POST /{path}`
    Create { kind: EntityKind, body: Value },

    /// `PUT /{path}/{id}`
    Update { kind: EntityKind, id: i64, body: Value },

    /// `DELETE /{path}/{id}`, a soft delete.
    Delete { kind: EntityKind, id: i64 },

    /// `PATCH /{path}/{id}/restore`
    Restore { kind: EntityKind, id: i64 },

    /// `PATCH /{path}/{id}` with `{ field: value }`.
    SetActive {
        kind: EntityKind,
        id: i64,
        field: &'static str,
        value: bool,
    },
}

impl Mutation {
    /// Creates a record of `R` from any serializable payload.
    pub fn create<R: Record>(payload: &impl Serialize) -> Result<Self, Error> {
        Ok(Self::Create {
            kind: R::KIND,
            body: serde_json::to_value(payload)?,
        })
    }

    /// Replaces record `id` of `R`.
    pub fn update<R: Record>(id: i64, payload: &impl Serialize) -> Result<Self, Error> {
        Ok(Self::Update {
            kind: R::KIND,
            id,
            body: serde_json::to_value(payload)?,
        })
    }

    pub fn delete<R: Record>(id: i64) -> Self {
        Self::Delete { kind: R::KIND, id }
    }

    pub fn restore<R: Record>(id: i64) -> Self {
        Self::Restore { kind: R::KIND, id }
    }

    /// Sets the active flag of record `id`.
    ///
    /// Returns `None` for entities without an active flag.
    pub fn set_active<R: Record>(id: i64, value: bool) -> Option<Self> {
        R::ACTIVE_FIELD.map(|field| Self::SetActive {
            kind: R::KIND,
            id,
            field,
            value,
        })
    }

    /// The entity this mutation writes to.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Create { kind, .. }
            | Self::Update { kind, .. }
            | Self::Delete { kind, .. }
            | Self::Restore { kind, .. }
            | Self::SetActive { kind, .. } => *kind,
        }
    }

    /// The target record, `None` for creates.
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Create { .. } => None,
            Self::Update { id, .. }
            | Self::Delete { id, .. }
            | Self::Restore { id, .. }
            | Self::SetActive { id, .. } => Some(*id),
        }
    }

    /// HTTP method used to send this mutation.
    pub fn method(&self) -> Method {
        match self {
            Self::Create { .. } => Method::POST,
            Self::Update { .. } => Method::PUT,
            Self::Delete { .. } => Method::DELETE,
            Self::Restore { .. } | Self::SetActive { .. } => Method::PATCH,
        }
    }

    /// Resource path, relative to the API prefix.
    pub fn path(&self) -> String {
        match self {
            Self::Create { kind, .. } => kind.path().to_string(),
            Self::Update { kind, id, .. }
            | Self::Delete { kind, id }
            | Self::SetActive { kind, id, .. } => kind.record_path(*id),
            Self::Restore { kind, id } => format!("{}/restore", kind.record_path(*id)),
        }
    }

    /// JSON body to send, if any.
    pub fn body(&self) -> Option<Value> {
        match self {
            Self::Create { body, .. } | Self::Update { body, .. } => Some(body.clone()),
            Self::SetActive { field, value, .. } => {
                let mut map = serde_json::Map::new();
                map.insert((*field).to_string(), Value::Bool(*value));
                Some(Value::Object(map))
            }
            Self::Delete { .. } | Self::Restore { .. } => None,
        }
    }
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

// =============================================================================
// Batch outcome
// =============================================================================

/// Result of [`FuncionariosClient::execute_batch`].
///
/// Mutations are independent: a failure never rolls back the others.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Mutations the backend accepted, in input order.
    pub succeeded: Vec<Mutation>,
    /// Mutations that failed, in input order, with their errors.
    pub failed: Vec<(Mutation, Error)>,
}

impl BatchOutcome {
    /// Returns `true` if every mutation succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Returns `true` if some but not all mutations succeeded.
    pub fn is_partial(&self) -> bool {
        !self.succeeded.is_empty() && !self.failed.is_empty()
    }

    /// Total number of mutations attempted.
    pub fn len(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Body of a write endpoint: the record itself or wrapped in `data`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Single<R> {
    Bare(R),
    Wrapped { data: R },
}

impl<R> Single<R> {
    fn into_record(self) -> R {
        match self {
            Self::Bare(record) | Self::Wrapped { data: record } => record,
        }
    }
}

// =============================================================================
// Client methods
// =============================================================================

impl FuncionariosClient {
    /// Creates a record and returns it as stored by the backend.
    ///
    /// # Errors
    ///
    /// A rejected payload comes back as
    /// [`ApiError::Validation`](crate::error::ApiError::Validation) with the
    /// per-field messages.
    pub async fn create<R: Record>(&self, payload: &impl Serialize) -> Result<R, Error> {
        self.write_returning(Mutation::create::<R>(payload)?).await
    }

    /// Replaces record `id` and returns it as stored by the backend.
    pub async fn update<R: Record>(&self, id: i64, payload: &impl Serialize) -> Result<R, Error> {
        self.write_returning(Mutation::update::<R>(id, payload)?).await
    }

    /// Soft-deletes record `id`.
    pub async fn delete<R: Record>(&self, id: i64) -> Result<(), Error> {
        self.execute(Mutation::delete::<R>(id)).await
    }

    /// Restores soft-deleted record `id`.
    pub async fn restore<R: Record>(&self, id: i64) -> Result<(), Error> {
        self.execute(Mutation::restore::<R>(id)).await
    }

    /// Sets the active flag of record `id`.
    ///
    /// Entities without an active flag are left untouched.
    pub async fn set_active<R: Record>(&self, id: i64, value: bool) -> Result<(), Error> {
        match Mutation::set_active::<R>(id, value) {
            Some(mutation) => self.execute(mutation).await,
            None => {
                warn!("{} has no active flag, ignoring set_active({})", R::KIND, id);
                Ok(())
            }
        }
    }

    /// Executes one mutation and invalidates the entity's collections.
    pub async fn execute(&self, mutation: Mutation) -> Result<(), Error> {
        self.perform(&mutation).await?;
        info!("{} succeeded", mutation);
        self.invalidate_kind(mutation.kind()).await;
        Ok(())
    }

    /// Executes mutations with bounded concurrency.
    ///
    /// Every mutation is attempted. Each entity that saw at least one
    /// success is invalidated once, after the whole batch.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let outcome = client.execute_batch(store.bulk(BulkAction::Delete)).await;
    /// for (mutation, error) in &outcome.failed {
    ///     eprintln!("{}: {}", mutation, error);
    /// }
    /// ```
    pub async fn execute_batch(&self, mutations: Vec<Mutation>) -> BatchOutcome {
        let results: Vec<(Mutation, Result<(), Error>)> = stream::iter(mutations)
            .map(|mutation| async move {
                let result = self.perform(&mutation).await.map(|_| ());
                (mutation, result)
            })
            .buffered(self.inner.batch_concurrency)
            .collect()
            .await;

        let mut outcome = BatchOutcome::default();
        for (mutation, result) in results {
            match result {
                Ok(()) => outcome.succeeded.push(mutation),
                Err(error) => outcome.failed.push((mutation, error)),
            }
        }

        let touched: BTreeSet<EntityKind> = outcome.succeeded.iter().map(Mutation::kind).collect();
        for kind in touched {
            self.invalidate_kind(kind).await;
        }

        if outcome.is_complete() {
            info!("Batch of {} mutations succeeded", outcome.len());
        } else {
            warn!(
                "Batch finished with {} of {} mutations failed",
                outcome.failed.len(),
                outcome.len()
            );
        }

        outcome
    }

    async fn write_returning<R: Record>(&self, mutation: Mutation) -> Result<R, Error> {
        let response = self.perform(&mutation).await?;
        info!("{} succeeded", mutation);
        self.invalidate_kind(mutation.kind()).await;
        let single: Single<R> = self.read_json(response).await?;
        Ok(single.into_record())
    }

    async fn perform(&self, mutation: &Mutation) -> Result<reqwest::Response, Error> {
        let body = mutation.body();
        self.send(mutation.method(), &mutation.path(), &[], body.as_ref())
            .await
    }
}
