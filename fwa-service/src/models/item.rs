use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ItemQuery {
    pub q: Option<String>,
}

/// Echo of the path id and optional `q` parameter.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub item_id: i64,
    pub q: Option<String>,
}
