use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::Value;

use crate::errors::Errors;
use crate::models::requests::review::ReviewPayload;
use crate::models::responses::DefaultResponse;
use crate::AppState;

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let raw = match payload {
        Ok(Json(raw)) => raw,
        Err(rejection) => {
            return Errors::new(&[("body", rejection.body_text().as_str())]).into_response();
        }
    };

    let review = match ReviewPayload::parse(raw) {
        Ok(review) => review,
        Err(errors) => {
            tracing::debug!(fields = ?errors.errors.keys().collect::<Vec<_>>(), "review rejected");

            return errors.into_response();
        }
    };

    let text = review.format_message();

    if let Err(err) = state.telegram.send_message(&state.chat_id, &text).await {
        tracing::warn!(kind = err.kind(), error = %err, room = %review.room, "unable to relay review");

        return err.into_response();
    }

    tracing::info!(room = %review.room, rating = review.rating, lang = %review.lang, "review relayed");

    (StatusCode::OK, DefaultResponse::ok().into_json()).into_response()
}
