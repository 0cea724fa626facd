//! The contract every listed entity fulfils

use std::fmt::Debug;

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::EntityKind;
use super::FuncionarioRef;

/// Server-assigned lifecycle timestamps shared by all entities.
///
/// Timestamps are kept as the raw strings the backend sent. They are parsed
/// lazily by the table engine, so a malformed value never fails the
/// deserialization of a whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifecycle {
    /// Soft-delete marker. `Some` means the record sits in the trash.
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Lifecycle {
    /// Returns `true` if the soft-delete marker is set.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at
            .as_deref()
            .is_some_and(|deleted_at| !deleted_at.trim().is_empty())
    }
}

/// A domain item shown in a list view.
///
/// Records are never created or mutated client-side; they arrive in complete
/// collections from the backend and are replaced wholesale after a refetch.
pub trait Record: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The collection this record belongs to.
    const KIND: EntityKind;

    /// Wire name of the domain-specific active/approved flag, if the entity
    /// has one (`activa`, `aprobado`, `activo`).
    const ACTIVE_FIELD: Option<&'static str> = None;

    /// Server-assigned identifier.
    fn id(&self) -> i64;

    fn lifecycle(&self) -> &Lifecycle;

    /// The referenced funcionario summary, if the backend embedded it.
    fn funcionario(&self) -> Option<&FuncionarioRef> {
        None
    }

    /// Current value of [`Record::ACTIVE_FIELD`].
    fn is_active(&self) -> Option<bool> {
        None
    }

    fn deleted_at(&self) -> Option<&str> {
        self.lifecycle().deleted_at.as_deref()
    }

    fn is_deleted(&self) -> bool {
        self.lifecycle().is_deleted()
    }
}
