use axum::{Router, routing::get};

use super::handlers::{create_sport, delete_sport, get_sport, list_sports, update_sport};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let collection = get(list_sports).post(create_sport);
    let item = get(get_sport).put(update_sport).delete(delete_sport);

    Router::new()
        .route("/api/sports", collection.clone())
        .route("/api/sports/", collection)
        .route("/api/sports/:id", item.clone())
        .route("/api/sports/:id/", item)
}
