//! Entity kinds served by the backend

use std::fmt;

/// The REST collections the dashboard lists.
///
/// Each kind maps to one collection path under the API prefix, and to the
/// cache keys its list views share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Funcionario,
    Ausencia,
    Sancion,
    Comision,
    FaltaDisciplinaria,
    Documento,
}

impl EntityKind {
    /// All kinds, in menu order.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Funcionario,
        EntityKind::Ausencia,
        EntityKind::Sancion,
        EntityKind::Comision,
        EntityKind::FaltaDisciplinaria,
        EntityKind::Documento,
    ];

    /// Collection path relative to the API prefix (e.g. `sanciones`).
    pub fn path(self) -> &'static str {
        match self {
            Self::Funcionario => "funcionarios",
            Self::Ausencia => "ausencias",
            Self::Sancion => "sanciones",
            Self::Comision => "comisiones",
            Self::FaltaDisciplinaria => "faltas-disciplinarias",
            Self::Documento => "documentos",
        }
    }

    /// Human-readable plural label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Funcionario => "Funcionarios",
            Self::Ausencia => "Ausencias",
            Self::Sancion => "Sanciones",
            Self::Comision => "Comisiones",
            Self::FaltaDisciplinaria => "Faltas disciplinarias",
            Self::Documento => "Documentos",
        }
    }

    /// Path of a single record (e.g. `sanciones/12`).
    pub fn record_path(self, id: i64) -> String {
        format!("{}/{}", self.path(), id)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_unique() {
        let mut paths: Vec<_> = EntityKind::ALL.iter().map(|k| k.path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), EntityKind::ALL.len());
    }

    #[test]
    fn test_record_path() {
        assert_eq!(
            EntityKind::FaltaDisciplinaria.record_path(7),
            "faltas-disciplinarias/7"
        );
    }
}
