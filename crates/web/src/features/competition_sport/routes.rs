use axum::{Router, routing::get};

use super::handlers::{create_link, delete_link, get_link, list_links, update_link};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let collection = get(list_links).post(create_link);
    let item = get(get_link).put(update_link).delete(delete_link);

    Router::new()
        .route("/api/competition_sport", collection.clone())
        .route("/api/competition_sport/", collection)
        .route("/api/competition_sport/:id", item.clone())
        .route("/api/competition_sport/:id/", item)
}
