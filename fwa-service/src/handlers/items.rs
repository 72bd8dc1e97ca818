use axum::{
    extract::{Path, Query},
    Json,
};

use crate::models::{ItemQuery, ItemResponse};

/// `GET /items/:item_id?q=` echoes its inputs.
pub async fn read_item(
    Path(item_id): Path<i64>,
    Query(query): Query<ItemQuery>,
) -> Json<ItemResponse> {
    Json(ItemResponse {
        item_id,
        q: query.q,
    })
}
