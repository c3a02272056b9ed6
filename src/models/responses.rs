use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Serialize, Debug)]
pub struct DefaultResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl DefaultResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            detail: None,
            errors: None,
        }
    }

    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            ok: false,
            detail: Some(detail.into()),
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: BTreeMap<String, Vec<String>>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn into_json(self) -> Json<Value> {
        Json(json!(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_serializes_to_bare_flag() {
        let Json(body) = DefaultResponse::ok().into_json();

        assert_eq!(body, json!({ "ok": true }));
    }

    #[test]
    fn error_carries_detail_and_errors() {
        let mut errors = BTreeMap::new();
        errors.insert("room".to_string(), vec!["too long".to_string()]);

        let Json(body) = DefaultResponse::error("validation failed")
            .with_errors(errors)
            .into_json();

        assert_eq!(
            body,
            json!({
                "ok": false,
                "detail": "validation failed",
                "errors": { "room": ["too long"] }
            })
        );
    }
}
