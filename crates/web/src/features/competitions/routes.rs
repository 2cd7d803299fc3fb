use axum::{Router, routing::get};

use super::handlers::{
    create_competition, delete_competition, get_competition, list_competitions,
    update_competition,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let collection = get(list_competitions).post(create_competition);
    let item = get(get_competition)
        .put(update_competition)
        .delete(delete_competition);

    Router::new()
        .route("/api/competitions", collection.clone())
        .route("/api/competitions/", collection)
        .route("/api/competitions/:id", item.clone())
        .route("/api/competitions/:id/", item)
}
