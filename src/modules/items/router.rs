use axum::{Router, routing::get};

use crate::modules::items::controller::{
    create_item, delete_item, get_available_items, get_item, get_items, update_item,
};
use crate::state::AppState;

pub fn init_items_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_items).post(create_item))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
}

pub fn init_available_items_router() -> Router<AppState> {
    Router::new().route("/available", get(get_available_items))
}
