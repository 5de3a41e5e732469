use serde::{Deserialize, Serialize};

// Response con el código de acceso de un equipo
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCodeResponse {
    pub access_code: String,
}
