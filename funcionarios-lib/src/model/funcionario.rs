//! Funcionarios (staff members)

use std::borrow::Cow;

use serde::Deserialize;
use serde::Serialize;

use super::EntityKind;
use super::Lifecycle;
use super::Record;
use super::wire;
use crate::table::Column;
use crate::table::SortKey;
use crate::table::TableRecord;
use crate::table::date_cell;
use crate::table::flag_cell;
use crate::table::flag_value;
use crate::table::text_cell;

/// Summary of a funcionario embedded in other records.
///
/// Used for display, search and sorting only; list views never modify it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncionarioRef {
    pub id: i64,
    #[serde(default, alias = "nombre")]
    pub nombre_completo: String,
    #[serde(default)]
    pub numero_documento: String,
    #[serde(default)]
    pub estado: Option<String>,
}

/// A staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Funcionario {
    pub id: i64,
    #[serde(default)]
    pub nombres: String,
    #[serde(default)]
    pub apellidos: String,
    #[serde(default)]
    pub tipo_documento: Option<String>,
    #[serde(default)]
    pub numero_documento: String,
    #[serde(default)]
    pub cargo: Option<String>,
    #[serde(default)]
    pub dependencia: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub fecha_ingreso: Option<String>,
    #[serde(default, deserialize_with = "wire::flag")]
    pub activo: bool,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

impl Funcionario {
    /// `nombres apellidos`, skipping blank parts.
    pub fn nombre_completo(&self) -> String {
        [self.nombres.trim(), self.apellidos.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The summary other records embed.
    pub fn to_ref(&self) -> FuncionarioRef {
        FuncionarioRef {
            id: self.id,
            nombre_completo: self.nombre_completo(),
            numero_documento: self.numero_documento.clone(),
            estado: self.estado.clone(),
        }
    }
}

impl Record for Funcionario {
    const KIND: EntityKind = EntityKind::Funcionario;
    const ACTIVE_FIELD: Option<&'static str> = Some("activo");

    fn id(&self) -> i64 {
        self.id
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.activo)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuncionarioFilter {
    Estado,
    Cargo,
    Dependencia,
    Activo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuncionarioDateFilter {
    FechaIngreso,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuncionarioSort {
    Id,
    NombreCompleto,
    NumeroDocumento,
    Cargo,
    Dependencia,
    FechaIngreso,
    Activo,
}

impl TableRecord for Funcionario {
    type EnumFilter = FuncionarioFilter;
    type DateFilter = FuncionarioDateFilter;
    type SortField = FuncionarioSort;

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![
            Cow::Owned(self.id.to_string()),
            Cow::Owned(self.nombre_completo()),
            Cow::Borrowed(self.numero_documento.as_str()),
        ];
        fields.extend(
            [&self.cargo, &self.dependencia, &self.email]
                .into_iter()
                .flatten()
                .map(|value| Cow::Borrowed(value.as_str())),
        );
        fields
    }

    fn enum_value(&self, key: FuncionarioFilter) -> Option<Cow<'_, str>> {
        match key {
            FuncionarioFilter::Estado => self.estado.as_deref().map(Cow::Borrowed),
            FuncionarioFilter::Cargo => self.cargo.as_deref().map(Cow::Borrowed),
            FuncionarioFilter::Dependencia => self.dependencia.as_deref().map(Cow::Borrowed),
            FuncionarioFilter::Activo => Some(flag_value(self.activo)),
        }
    }

    fn date_value(&self, key: FuncionarioDateFilter) -> Option<&str> {
        match key {
            FuncionarioDateFilter::FechaIngreso => self.fecha_ingreso.as_deref(),
        }
    }

    fn sort_key(&self, field: FuncionarioSort) -> SortKey<'_> {
        match field {
            FuncionarioSort::Id => SortKey::Number(self.id),
            FuncionarioSort::NombreCompleto => SortKey::Text(Cow::Owned(self.nombre_completo().to_lowercase())),
            FuncionarioSort::NumeroDocumento => SortKey::text(Some(self.numero_documento.as_str())),
            FuncionarioSort::Cargo => SortKey::text(self.cargo.as_deref()),
            FuncionarioSort::Dependencia => SortKey::text(self.dependencia.as_deref()),
            FuncionarioSort::FechaIngreso => SortKey::timestamp(self.fecha_ingreso.as_deref()),
            FuncionarioSort::Activo => SortKey::Flag(self.activo),
        }
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |f: &Self| f.id.to_string()).sortable(FuncionarioSort::Id),
            Column::new("Nombre", |f: &Self| f.nombre_completo()).sortable(FuncionarioSort::NombreCompleto),
            Column::new("Documento", |f: &Self| f.numero_documento.clone())
                .sortable(FuncionarioSort::NumeroDocumento),
            Column::new("Cargo", |f: &Self| text_cell(f.cargo.as_deref())).sortable(FuncionarioSort::Cargo),
            Column::new("Dependencia", |f: &Self| text_cell(f.dependencia.as_deref()))
                .sortable(FuncionarioSort::Dependencia),
            Column::new("Estado", |f: &Self| text_cell(f.estado.as_deref())),
            Column::new("Ingreso", |f: &Self| date_cell(f.fecha_ingreso.as_deref()))
                .sortable(FuncionarioSort::FechaIngreso),
            Column::new("Activo", |f: &Self| flag_cell(f.activo)).sortable(FuncionarioSort::Activo),
        ]
    }
}
