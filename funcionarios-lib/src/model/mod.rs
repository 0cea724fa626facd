//! Typed models

mod ausencia;
mod comision;
mod documento;
mod falta;
mod funcionario;
mod kind;
mod record;
mod sancion;
mod wire;

pub use ausencia::*;
pub use comision::*;
pub use documento::*;
pub use falta::*;
pub use funcionario::*;
pub use kind::*;
pub use record::*;
pub use sancion::*;

#[cfg(test)]
pub(crate) mod test_support;
