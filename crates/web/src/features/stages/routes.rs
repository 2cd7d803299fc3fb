use axum::{Router, routing::get};

use super::handlers::{create_stage, delete_stage, get_stage, list_stages, update_stage};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let collection = get(list_stages).post(create_stage);
    let item = get(get_stage).put(update_stage).delete(delete_stage);

    Router::new()
        .route("/api/stages", collection.clone())
        .route("/api/stages/", collection)
        .route("/api/stages/:id", item.clone())
        .route("/api/stages/:id/", item)
}
