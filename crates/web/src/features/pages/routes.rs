use axum::{Router, routing::get};

use super::handlers::{competition, competitions, index, sport, sports, stage, stages};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/competitions/", get(competitions))
        .route("/sports/", get(sports))
        .route("/stages/", get(stages))
        .route("/competition/", get(competition))
        .route("/sport/", get(sport))
        .route("/stage/", get(stage))
}
