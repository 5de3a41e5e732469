//! Controlador de equipos
//!
//! Emisión de códigos de acceso únicos para los equipos.

use axum::{extract::State, http::StatusCode, response::Json};

use crate::dto::team_dto::AccessCodeResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Generar un código de acceso nuevo
pub async fn generate_access_code(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<AccessCodeResponse>), AppError> {
    let mut rng = state.rng.lock().await;
    let access_code = state.team_codes.generate_unique_code(&mut *rng).await?;

    Ok((StatusCode::CREATED, Json(AccessCodeResponse { access_code })))
}
