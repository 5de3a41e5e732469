//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio del motor de rutas.

pub mod routing;
