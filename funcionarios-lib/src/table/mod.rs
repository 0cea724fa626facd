//! Client-side tabular engine
//!
//! A list view derives what it shows from three independent axes of state
//! held in an [`EntityStore`]: filters, sort and pagination. Each render runs
//! the same pure pipeline over the complete collection:
//!
//! ```text
//! collection -> filter_records -> sort_records -> paginate -> TableView rows
//! ```
//!
//! None of the stages mutate the collection or fail. Malformed input fails
//! open, out-of-range pages clamp, and an absent (still loading) collection
//! is treated as empty.
//!
//! # Example
//!
//! ```ignore
//! use funcionarios_lib::model::{Sancion, SancionFilter};
//! use funcionarios_lib::table::{EntityStore, TableView};
//!
//! let mut store = EntityStore::<Sancion>::default();
//! store.set_search("garcía");
//! store.set_enum_filter(SancionFilter::TipoSancion, "suspension");
//!
//! let view = TableView::<Sancion>::new();
//! let state = view.derive(&store, Some(&collection));
//! println!("showing {} to {} of {}", state.page.start_index, state.page.end_index, state.page.total_items);
//! ```

mod config;
mod date;
mod filter;
mod page;
mod sort;
mod store;
mod view;

pub use config::*;
pub use date::*;
pub use filter::*;
pub use page::*;
pub use sort::*;
pub use store::*;
pub use view::*;

use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::Hash;

use crate::model::Record;

/// A compile-time key naming one filter or sort axis of an entity.
pub trait FieldKey: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> FieldKey for T where T: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

/// A record that can be listed by the tabular engine.
///
/// Every entity declares its filter and sort axes as enums, so an unknown
/// field is a compile error rather than a silently ignored string.
pub trait TableRecord: Record {
    /// Exact-match filter axes (status, type, funcionario, flags).
    type EnumFilter: FieldKey;
    /// Date-range filter axes.
    type DateFilter: FieldKey;
    /// Sortable columns.
    type SortField: FieldKey;

    /// Values the free-text search looks into.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    /// Value compared by an enum filter. `None` never matches.
    fn enum_value(&self, key: Self::EnumFilter) -> Option<Cow<'_, str>>;

    /// Raw date compared by a range filter. `None` always passes.
    fn date_value(&self, key: Self::DateFilter) -> Option<&str>;

    /// Comparable key for a sort field.
    fn sort_key(&self, field: Self::SortField) -> SortKey<'_>;

    /// Table columns, in display order.
    fn columns() -> Vec<Column<Self>>;
}

/// Search values every entity with a funcionario reference shares: the
/// numeric id, the funcionario's full name and document number.
pub fn base_search_fields<R: Record>(record: &R) -> Vec<Cow<'_, str>> {
    let mut fields = vec![Cow::Owned(record.id().to_string())];
    if let Some(funcionario) = record.funcionario() {
        fields.push(Cow::Borrowed(funcionario.nombre_completo.as_str()));
        fields.push(Cow::Borrowed(funcionario.numero_documento.as_str()));
    }
    fields
}

/// Enum-filter value for a boolean flag.
pub fn flag_value(flag: bool) -> Cow<'static, str> {
    Cow::Borrowed(if flag { "true" } else { "false" })
}
