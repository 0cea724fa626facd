//! Record builders for unit tests

use super::FuncionarioRef;
use super::Lifecycle;
use super::Sancion;

pub(crate) fn sancion(
    id: i64,
    nombre: &str,
    tipo: &str,
    fecha_inicio: Option<&str>,
    fecha_fin: Option<&str>,
) -> Sancion {
    Sancion {
        id,
        funcionario_id: 100 + id,
        funcionario: Some(FuncionarioRef {
            id: 100 + id,
            nombre_completo: nombre.to_string(),
            numero_documento: format!("10{id}"),
            estado: None,
        }),
        tipo_sancion: tipo.to_string(),
        estado: Some("vigente".to_string()),
        fecha_inicio: fecha_inicio.map(str::to_string),
        fecha_fin: fecha_fin.map(str::to_string),
        descripcion: None,
        activa: false,
        lifecycle: Lifecycle::default(),
    }
}
