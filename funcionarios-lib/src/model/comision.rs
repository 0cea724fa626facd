//! Comisiones de servicio

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

/// An assignment of a funcionario away from their usual post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comision {
    pub id: i64,
    pub funcionario_id: i64,
    #[serde(default)]
    pub funcionario: Option<FuncionarioRef>,
    #[serde(default)]
    pub tipo_comision: String,
    #[serde(default)]
    pub destino: Option<String>,
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

impl Record for Comision {
    const KIND: EntityKind = EntityKind::Comision;
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
pub enum ComisionFilter {
    TipoComision,
    Activa,
    Funcionario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComisionDateFilter {
    FechaInicio,
    FechaFin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComisionSort {
    Id,
    Funcionario,
    TipoComision,
    Destino,
    FechaInicio,
    FechaFin,
    Activa,
}

impl TableRecord for Comision {
    type EnumFilter = ComisionFilter;
    type DateFilter = ComisionDateFilter;
    type SortField = ComisionSort;

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = base_search_fields(self);
        fields.push(Cow::Borrowed(self.tipo_comision.as_str()));
        fields.extend(
            [&self.destino, &self.descripcion]
                .into_iter()
                .flatten()
                .map(|value| Cow::Borrowed(value.as_str())),
        );
        fields
    }

    fn enum_value(&self, key: ComisionFilter) -> Option<Cow<'_, str>> {
        match key {
            ComisionFilter::TipoComision => Some(Cow::Borrowed(self.tipo_comision.as_str())),
            ComisionFilter::Activa => Some(flag_value(self.activa)),
            ComisionFilter::Funcionario => Some(Cow::Owned(self.funcionario_id.to_string())),
        }
    }

    fn date_value(&self, key: ComisionDateFilter) -> Option<&str> {
        match key {
            ComisionDateFilter::FechaInicio => self.fecha_inicio.as_deref(),
            ComisionDateFilter::FechaFin => self.fecha_fin.as_deref(),
        }
    }

    fn sort_key(&self, field: ComisionSort) -> SortKey<'_> {
        match field {
            ComisionSort::Id => SortKey::Number(self.id),
            ComisionSort::Funcionario => SortKey::funcionario(self.funcionario.as_ref()),
            ComisionSort::TipoComision => SortKey::text(Some(self.tipo_comision.as_str())),
            ComisionSort::Destino => SortKey::text(self.destino.as_deref()),
            ComisionSort::FechaInicio => SortKey::timestamp(self.fecha_inicio.as_deref()),
            ComisionSort::FechaFin => SortKey::timestamp(self.fecha_fin.as_deref()),
            ComisionSort::Activa => SortKey::Flag(self.activa),
        }
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |c: &Self| c.id.to_string()).sortable(ComisionSort::Id),
            Column::new("Funcionario", |c: &Self| funcionario_cell(c.funcionario.as_ref()))
                .sortable(ComisionSort::Funcionario),
            Column::new("Tipo", |c: &Self| c.tipo_comision.clone()).sortable(ComisionSort::TipoComision),
            Column::new("Destino", |c: &Self| text_cell(c.destino.as_deref())).sortable(ComisionSort::Destino),
            Column::new("Inicio", |c: &Self| date_cell(c.fecha_inicio.as_deref()))
                .sortable(ComisionSort::FechaInicio),
            Column::new("Fin", |c: &Self| date_cell(c.fecha_fin.as_deref())).sortable(ComisionSort::FechaFin),
            Column::new("Activa", |c: &Self| flag_cell(c.activa)).sortable(ComisionSort::Activa),
        ]
    }
}
