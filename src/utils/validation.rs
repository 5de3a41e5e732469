//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de coordenadas
//! y otros datos de entrada de las rutas.

use validator::ValidationError;

/// Validar formato de coordenadas GPS
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    validate_latitude(lat)?;
    validate_longitude(lng)
}

/// Validar latitud (-90..90, finita)
pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &lat);
        error.add_param("range".into(), &"-90.0 to 90.0".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar longitud (-180..180, finita)
pub fn validate_longitude(lng: f64) -> Result<(), ValidationError> {
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &lng);
        error.add_param("range".into(), &"-180.0 to 180.0".to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(47.0379, 21.9386)]
    #[case(-90.0, 180.0)]
    #[case(90.0, -180.0)]
    #[case(0.0, 0.0)]
    fn accepts_valid_coordinates(#[case] lat: f64, #[case] lng: f64) {
        assert!(validate_coordinates(lat, lng).is_ok());
    }

    #[rstest]
    #[case(90.0001, 0.0, "latitude")]
    #[case(-91.0, 0.0, "latitude")]
    #[case(0.0, 180.5, "longitude")]
    #[case(f64::NAN, 0.0, "latitude")]
    #[case(0.0, f64::INFINITY, "longitude")]
    fn rejects_out_of_range_coordinates(#[case] lat: f64, #[case] lng: f64, #[case] code: &str) {
        let error = validate_coordinates(lat, lng).unwrap_err();
        assert_eq!(error.code, code);
    }
}
