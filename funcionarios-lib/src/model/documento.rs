//! Documentos attached to a funcionario's file

use std::borrow::Cow;

use serde::Deserialize;
use serde::Serialize;

use super::EntityKind;
use super::FuncionarioRef;
use super::Lifecycle;
use super::Record;
use crate::table::Column;
use crate::table::SortKey;
use crate::table::TableRecord;
use crate::table::base_search_fields;
use crate::table::date_cell;
use crate::table::funcionario_cell;
use crate::table::text_cell;

/// An uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documento {
    pub id: i64,
    pub funcionario_id: i64,
    #[serde(default)]
    pub funcionario: Option<FuncionarioRef>,
    #[serde(default)]
    pub tipo_documento: String,
    #[serde(default)]
    pub nombre_archivo: String,
    #[serde(default)]
    pub ruta_archivo: Option<String>,
    #[serde(default)]
    pub fecha_emision: Option<String>,
    #[serde(default)]
    pub fecha_vencimiento: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

impl Documento {
    /// API path serving the file contents, for [`crate::FuncionariosClient::download`].
    pub fn download_path(&self) -> String {
        format!("{}/download", Self::KIND.record_path(self.id))
    }
}

impl Record for Documento {
    const KIND: EntityKind = EntityKind::Documento;

    fn id(&self) -> i64 {
        self.id
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn funcionario(&self) -> Option<&FuncionarioRef> {
        self.funcionario.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentoFilter {
    TipoDocumento,
    Funcionario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentoDateFilter {
    FechaEmision,
    FechaVencimiento,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentoSort {
    Id,
    Funcionario,
    TipoDocumento,
    NombreArchivo,
    FechaEmision,
    FechaVencimiento,
}

impl TableRecord for Documento {
    type EnumFilter = DocumentoFilter;
    type DateFilter = DocumentoDateFilter;
    type SortField = DocumentoSort;

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = base_search_fields(self);
        fields.push(Cow::Borrowed(self.tipo_documento.as_str()));
        fields.push(Cow::Borrowed(self.nombre_archivo.as_str()));
        if let Some(descripcion) = &self.descripcion {
            fields.push(Cow::Borrowed(descripcion.as_str()));
        }
        fields
    }

    fn enum_value(&self, key: DocumentoFilter) -> Option<Cow<'_, str>> {
        match key {
            DocumentoFilter::TipoDocumento => Some(Cow::Borrowed(self.tipo_documento.as_str())),
            DocumentoFilter::Funcionario => Some(Cow::Owned(self.funcionario_id.to_string())),
        }
    }

    fn date_value(&self, key: DocumentoDateFilter) -> Option<&str> {
        match key {
            DocumentoDateFilter::FechaEmision => self.fecha_emision.as_deref(),
            DocumentoDateFilter::FechaVencimiento => self.fecha_vencimiento.as_deref(),
        }
    }

    fn sort_key(&self, field: DocumentoSort) -> SortKey<'_> {
        match field {
            DocumentoSort::Id => SortKey::Number(self.id),
            DocumentoSort::Funcionario => SortKey::funcionario(self.funcionario.as_ref()),
            DocumentoSort::TipoDocumento => SortKey::text(Some(self.tipo_documento.as_str())),
            DocumentoSort::NombreArchivo => SortKey::text(Some(self.nombre_archivo.as_str())),
            DocumentoSort::FechaEmision => SortKey::timestamp(self.fecha_emision.as_deref()),
            DocumentoSort::FechaVencimiento => SortKey::timestamp(self.fecha_vencimiento.as_deref()),
        }
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |d: &Self| d.id.to_string()).sortable(DocumentoSort::Id),
            Column::new("Funcionario", |d: &Self| funcionario_cell(d.funcionario.as_ref()))
                .sortable(DocumentoSort::Funcionario),
            Column::new("Tipo", |d: &Self| d.tipo_documento.clone()).sortable(DocumentoSort::TipoDocumento),
            Column::new("Archivo", |d: &Self| d.nombre_archivo.clone()).sortable(DocumentoSort::NombreArchivo),
            Column::new("Emisión", |d: &Self| date_cell(d.fecha_emision.as_deref()))
                .sortable(DocumentoSort::FechaEmision),
            Column::new("Vencimiento", |d: &Self| date_cell(d.fecha_vencimiento.as_deref()))
                .sortable(DocumentoSort::FechaVencimiento),
            Column::new("Descripción", |d: &Self| text_cell(d.descripcion.as_deref())),
        ]
    }
}
