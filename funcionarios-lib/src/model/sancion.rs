//! Sanciones

use std::borrow::Cow;

use serde::Deserialize;
use serde::Serialize;

use super::EntityKind;
use super::FuncionarioRef;
use super::Lifecycle;
use super::Record;
use super::wire;
use crate::table::Column;
use crate::table::SortKey;
use crate::table::TableRecord;
use crate::table::base_search_fields;
use crate::table::date_cell;
use crate::table::flag_cell;
use crate::table::flag_value;
use crate::table::funcionario_cell;
use crate::table::text_cell;

/// A sanction imposed on a funcionario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sancion {
    pub id: i64,
    pub funcionario_id: i64,
    #[serde(default)]
    pub funcionario: Option<FuncionarioRef>,
    #[serde(default)]
    pub tipo_sancion: String,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub fecha_inicio: Option<String>,
    #[serde(default)]
    pub fecha_fin: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default, deserialize_with = "wire::flag")]
    pub activa: bool,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

impl Record for Sancion {
    const KIND: EntityKind = EntityKind::Sancion;
    const ACTIVE_FIELD: Option<&'static str> = Some("activa");

    fn id(&self) -> i64 {
        self.id
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn funcionario(&self) -> Option<&FuncionarioRef> {
        self.funcionario.as_ref()
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.activa)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SancionFilter {
    TipoSancion,
    Estado,
    Activa,
    /// Funcionario id.
    Funcionario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SancionDateFilter {
    FechaInicio,
    FechaFin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SancionSort {
    Id,
    Funcionario,
    TipoSancion,
    Estado,
    FechaInicio,
    FechaFin,
    Activa,
}

impl TableRecord for Sancion {
    type EnumFilter = SancionFilter;
    type DateFilter = SancionDateFilter;
    type SortField = SancionSort;

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = base_search_fields(self);
        fields.push(Cow::Borrowed(self.tipo_sancion.as_str()));
        fields.extend(
            [&self.estado, &self.descripcion]
                .into_iter()
                .flatten()
                .map(|value| Cow::Borrowed(value.as_str())),
        );
        fields
    }

    fn enum_value(&self, key: SancionFilter) -> Option<Cow<'_, str>> {
        match key {
            SancionFilter::TipoSancion => Some(Cow::Borrowed(self.tipo_sancion.as_str())),
            SancionFilter::Estado => self.estado.as_deref().map(Cow::Borrowed),
            SancionFilter::Activa => Some(flag_value(self.activa)),
            SancionFilter::Funcionario => Some(Cow::Owned(self.funcionario_id.to_string())),
        }
    }

    fn date_value(&self, key: SancionDateFilter) -> Option<&str> {
        match key {
            SancionDateFilter::FechaInicio => self.fecha_inicio.as_deref(),
            SancionDateFilter::FechaFin => self.fecha_fin.as_deref(),
        }
    }

    fn sort_key(&self, field: SancionSort) -> SortKey<'_> {
        match field {
            SancionSort::Id => SortKey::Number(self.id),
            SancionSort::Funcionario => SortKey::funcionario(self.funcionario.as_ref()),
            SancionSort::TipoSancion => SortKey::text(Some(self.tipo_sancion.as_str())),
            SancionSort::Estado => SortKey::text(self.estado.as_deref()),
            SancionSort::FechaInicio => SortKey::timestamp(self.fecha_inicio.as_deref()),
            SancionSort::FechaFin => SortKey::timestamp(self.fecha_fin.as_deref()),
            SancionSort::Activa => SortKey::Flag(self.activa),
        }
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |s: &Self| s.id.to_string()).sortable(SancionSort::Id),
            Column::new("Funcionario", |s: &Self| funcionario_cell(s.funcionario.as_ref()))
                .sortable(SancionSort::Funcionario),
            Column::new("Tipo", |s: &Self| s.tipo_sancion.clone()).sortable(SancionSort::TipoSancion),
            Column::new("Estado", |s: &Self| text_cell(s.estado.as_deref())).sortable(SancionSort::Estado),
            Column::new("Inicio", |s: &Self| date_cell(s.fecha_inicio.as_deref()))
                .sortable(SancionSort::FechaInicio),
            Column::new("Fin", |s: &Self| date_cell(s.fecha_fin.as_deref())).sortable(SancionSort::FechaFin),
            Column::new("Activa", |s: &Self| flag_cell(s.activa)).sortable(SancionSort::Activa),
        ]
    }
}
