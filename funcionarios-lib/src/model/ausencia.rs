//! Ausencias (leave and absences)

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

/// A period a funcionario is away from work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ausencia {
    pub id: i64,
    pub funcionario_id: i64,
    #[serde(default)]
    pub funcionario: Option<FuncionarioRef>,
    #[serde(default)]
    pub tipo_ausencia: String,
    #[serde(default)]
    pub fecha_inicio: Option<String>,
    #[serde(default)]
    pub fecha_fin: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default, deserialize_with = "wire::flag")]
    pub aprobado: bool,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

impl Record for Ausencia {
    const KIND: EntityKind = EntityKind::Ausencia;
    const ACTIVE_FIELD: Option<&'static str> = Some("aprobado");

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
        Some(self.aprobado)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AusenciaFilter {
    TipoAusencia,
    Aprobado,
    Funcionario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AusenciaDateFilter {
    FechaInicio,
    FechaFin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AusenciaSort {
    Id,
    Funcionario,
    TipoAusencia,
    FechaInicio,
    FechaFin,
    Aprobado,
}

impl TableRecord for Ausencia {
    type EnumFilter = AusenciaFilter;
    type DateFilter = AusenciaDateFilter;
    type SortField = AusenciaSort;

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = base_search_fields(self);
        fields.push(Cow::Borrowed(self.tipo_ausencia.as_str()));
        if let Some(descripcion) = &self.descripcion {
            fields.push(Cow::Borrowed(descripcion.as_str()));
        }
        fields
    }

    fn enum_value(&self, key: AusenciaFilter) -> Option<Cow<'_, str>> {
        match key {
            AusenciaFilter::TipoAusencia => Some(Cow::Borrowed(self.tipo_ausencia.as_str())),
            AusenciaFilter::Aprobado => Some(flag_value(self.aprobado)),
            AusenciaFilter::Funcionario => Some(Cow::Owned(self.funcionario_id.to_string())),
        }
    }

    fn date_value(&self, key: AusenciaDateFilter) -> Option<&str> {
        match key {
            AusenciaDateFilter::FechaInicio => self.fecha_inicio.as_deref(),
            AusenciaDateFilter::FechaFin => self.fecha_fin.as_deref(),
        }
    }

    fn sort_key(&self, field: AusenciaSort) -> SortKey<'_> {
        match field {
            AusenciaSort::Id => SortKey::Number(self.id),
            AusenciaSort::Funcionario => SortKey::funcionario(self.funcionario.as_ref()),
            AusenciaSort::TipoAusencia => SortKey::text(Some(self.tipo_ausencia.as_str())),
            AusenciaSort::FechaInicio => SortKey::timestamp(self.fecha_inicio.as_deref()),
            AusenciaSort::FechaFin => SortKey::timestamp(self.fecha_fin.as_deref()),
            AusenciaSort::Aprobado => SortKey::Flag(self.aprobado),
        }
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |a: &Self| a.id.to_string()).sortable(AusenciaSort::Id),
            Column::new("Funcionario", |a: &Self| funcionario_cell(a.funcionario.as_ref()))
                .sortable(AusenciaSort::Funcionario),
            Column::new("Tipo", |a: &Self| a.tipo_ausencia.clone()).sortable(AusenciaSort::TipoAusencia),
            Column::new("Inicio", |a: &Self| date_cell(a.fecha_inicio.as_deref()))
                .sortable(AusenciaSort::FechaInicio),
            Column::new("Fin", |a: &Self| date_cell(a.fecha_fin.as_deref())).sortable(AusenciaSort::FechaFin),
            Column::new("Aprobado", |a: &Self| flag_cell(a.aprobado)).sortable(AusenciaSort::Aprobado),
        ]
    }
}
