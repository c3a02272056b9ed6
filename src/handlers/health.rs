use axum::response::Json;
use serde_json::Value;

use crate::models::responses::DefaultResponse;

pub async fn check() -> Json<Value> {
    DefaultResponse::ok().into_json()
}
