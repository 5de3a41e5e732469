use axum::{routing::post, Router};

use crate::controllers::team_controller;
use crate::state::AppState;

pub fn create_team_router() -> Router<AppState> {
    Router::new().route("/access-code", post(team_controller::generate_access_code))
}
