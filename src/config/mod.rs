//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno y la configuración
//! del proveedor de rutas.

pub mod environment;

pub use environment::*;
