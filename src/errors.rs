use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

use crate::models::responses::DefaultResponse;

/// Field level validation failures, rendered as a 422 response.
#[derive(Debug, Default, PartialEq)]
pub struct Errors {
    pub errors: BTreeMap<String, Vec<String>>,
}

impl Errors {
    pub fn new(errs: &[(&str, &str)]) -> Errors {
        let mut errors = Errors::default();
        for (key, value) in errs {
            errors.push(key, value);
        }
        errors
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    #[cfg(test)]
    pub fn messages(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

impl From<ValidationErrors> for Errors {
    fn from(validation_errors: ValidationErrors) -> Self {
        let mut errors = Errors::default();

        for (field, field_errors) in validation_errors.field_errors() {
            for err in field_errors {
                errors.push(field, &describe(err));
            }
        }

        errors
    }
}

impl IntoResponse for Errors {
    fn into_response(self) -> Response {
        let body = DefaultResponse::error("validation failed")
            .with_errors(self.errors)
            .into_json();

        (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}

fn describe(err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }

    let min = err.params.get("min").map(param_to_string);
    let max = err.params.get("max").map(param_to_string);

    match (err.code.as_ref(), min, max) {
        ("length", Some(min), Some(max)) => {
            format!("length must be between {} and {} characters", min, max)
        }
        ("length", None, Some(max)) => format!("length must be at most {} characters", max),
        ("length", Some(min), None) => format!("length must be at least {} characters", min),
        ("range", Some(min), Some(max)) => format!("must be between {} and {}", min, max),
        (code, _, _) => format!("invalid value ({})", code),
    }
}

// range bounds arrive as floats, length bounds as integers
fn param_to_string(value: &Value) -> String {
    match value.as_f64() {
        Some(number) if number.fract() == 0.0 => format!("{}", number as i64),
        _ => value.to_string(),
    }
}

/// Failure of the single outbound call to the Telegram Bot API.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum NotifyError {
    #[error("Telegram request failed: {0}")]
    Transport(String),
    #[error("{0}")]
    Rejected(String),
}

impl NotifyError {
    pub fn kind(&self) -> &'static str {
        match self {
            NotifyError::Transport(_) => "transport",
            NotifyError::Rejected(_) => "rejected",
        }
    }
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        let body = DefaultResponse::error(self.to_string()).into_json();

        (StatusCode::BAD_GATEWAY, body).into_response()
    }
}

/// Fatal errors raised while bringing the server up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("unable to build telegram client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("invalid bind address: {0}")]
    Address(#[from] std::net::AddrParseError),
    #[error("server error: {0}")]
    Server(#[from] hyper::Error),
}
