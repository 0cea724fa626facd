//! Faltas disciplinarias

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

/// A recorded disciplinary fault.
///
/// Faults have no active flag; their progress is tracked by `estado`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaltaDisciplinaria {
    pub id: i64,
    pub funcionario_id: i64,
    #[serde(default)]
    pub funcionario: Option<FuncionarioRef>,
    #[serde(default)]
    pub tipo_falta: String,
    /// `leve`, `grave` or `gravisima`.
    #[serde(default)]
    pub gravedad: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub fecha_falta: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

impl Record for FaltaDisciplinaria {
    const KIND: EntityKind = EntityKind::FaltaDisciplinaria;

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
pub enum FaltaFilter {
    TipoFalta,
    Gravedad,
    Estado,
    Funcionario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaltaDateFilter {
    FechaFalta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaltaSort {
    Id,
    Funcionario,
    TipoFalta,
    Gravedad,
    Estado,
    FechaFalta,
}

impl TableRecord for FaltaDisciplinaria {
    type EnumFilter = FaltaFilter;
    type DateFilter = FaltaDateFilter;
    type SortField = FaltaSort;

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = base_search_fields(self);
        fields.push(Cow::Borrowed(self.tipo_falta.as_str()));
        fields.extend(
            [&self.gravedad, &self.estado, &self.descripcion]
                .into_iter()
                .flatten()
                .map(|value| Cow::Borrowed(value.as_str())),
        );
        fields
    }

    fn enum_value(&self, key: FaltaFilter) -> Option<Cow<'_, str>> {
        match key {
            FaltaFilter::TipoFalta => Some(Cow::Borrowed(self.tipo_falta.as_str())),
            FaltaFilter::Gravedad => self.gravedad.as_deref().map(Cow::Borrowed),
            FaltaFilter::Estado => self.estado.as_deref().map(Cow::Borrowed),
            FaltaFilter::Funcionario => Some(Cow::Owned(self.funcionario_id.to_string())),
        }
    }

    fn date_value(&self, key: FaltaDateFilter) -> Option<&str> {
        match key {
            FaltaDateFilter::FechaFalta => self.fecha_falta.as_deref(),
        }
    }

    fn sort_key(&self, field: FaltaSort) -> SortKey<'_> {
        match field {
            FaltaSort::Id => SortKey::Number(self.id),
            FaltaSort::Funcionario => SortKey::funcionario(self.funcionario.as_ref()),
            FaltaSort::TipoFalta => SortKey::text(Some(self.tipo_falta.as_str())),
            FaltaSort::Gravedad => SortKey::Number(severity_rank(self.gravedad.as_deref())),
            FaltaSort::Estado => SortKey::text(self.estado.as_deref()),
            FaltaSort::FechaFalta => SortKey::timestamp(self.fecha_falta.as_deref()),
        }
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |f: &Self| f.id.to_string()).sortable(FaltaSort::Id),
            Column::new("Funcionario", |f: &Self| funcionario_cell(f.funcionario.as_ref()))
                .sortable(FaltaSort::Funcionario),
            Column::new("Tipo", |f: &Self| f.tipo_falta.clone()).sortable(FaltaSort::TipoFalta),
            Column::new("Gravedad", |f: &Self| text_cell(f.gravedad.as_deref())).sortable(FaltaSort::Gravedad),
            Column::new("Estado", |f: &Self| text_cell(f.estado.as_deref())).sortable(FaltaSort::Estado),
            Column::new("Fecha", |f: &Self| date_cell(f.fecha_falta.as_deref())).sortable(FaltaSort::FechaFalta),
        ]
    }
}

/// Severity ordering: unknown < leve < grave < gravisima.
fn severity_rank(gravedad: Option<&str>) -> i64 {
    match gravedad.map(|g| g.trim().to_lowercase()).as_deref() {
        Some("leve") => 1,
        Some("grave") => 2,
        Some("gravisima" | "gravísima") => 3,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Direction;
    use crate::table::SortState;
    use crate::table::sort_records;

    fn falta(id: i64, gravedad: &str) -> FaltaDisciplinaria {
        FaltaDisciplinaria {
            id,
            funcionario_id: 1,
            funcionario: None,
            tipo_falta: "inasistencia".into(),
            gravedad: Some(gravedad.into()),
            estado: None,
            fecha_falta: None,
            descripcion: None,
            lifecycle: Lifecycle::default(),
        }
    }

    #[test]
    fn test_gravedad_sorts_by_severity() {
        let records = vec![falta(1, "Grave"), falta(2, "leve"), falta(3, "Gravísima"), falta(4, "?")];
        let sorted = sort_records(
            records.iter().collect(),
            &SortState::new(FaltaSort::Gravedad, Direction::Desc),
        );
        assert_eq!(sorted.iter().map(|f| f.id).collect::<Vec<_>>(), vec![3, 1, 2, 4]);
    }
}
