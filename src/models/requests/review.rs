use serde::Deserialize;
use serde_json::Value;
use serde_path_to_error::Segment;
use validator::Validate;
use validator_derive::Validate;

use crate::errors::Errors;
use crate::utils::whole_number;

pub const REVIEW_TITLE: &str = "🟦 Kamilovs’ Hotel — Review";

const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';
const MAX_RATING: i64 = 5;

#[derive(Deserialize, Validate, Debug, Clone, PartialEq)]
pub struct ReviewPayload {
    #[serde(default = "default_lang")]
    #[validate(length(max = 8))]
    pub lang: String,
    #[validate(length(min = 1, max = 32))]
    pub room: String,
    #[serde(deserialize_with = "whole_number::deserialize")]
    #[validate(range(min = 1, max = 5))]
    pub rating: i64,
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 1200))]
    pub text: String,
    #[serde(default)]
    pub client_ts: Option<String>,
}

fn default_lang() -> String {
    "ru".to_string()
}

impl ReviewPayload {
    /// Deserializes and validates a raw request body.
    ///
    /// Shape errors (missing fields, wrong JSON types) are reported under the
    /// offending field, or under `body` when the body itself is not an object.
    pub fn parse(raw: Value) -> Result<ReviewPayload, Errors> {
        let payload = match serde_path_to_error::deserialize::<_, ReviewPayload>(raw) {
            Ok(payload) => payload,
            Err(err) => {
                let message = err.inner().to_string();
                let field = match err.path().iter().next() {
                    Some(Segment::Map { key }) => key.clone(),
                    _ => offending_field(&message).unwrap_or("body").to_string(),
                };

                return Err(Errors::new(&[(field.as_str(), message.as_str())]));
            }
        };

        payload.validate()?;

        Ok(payload)
    }

    /// Renders the review as the plain-text Telegram message.
    pub fn format_message(&self) -> String {
        let rating = self.rating.clamp(0, MAX_RATING) as usize;
        let stars = format!(
            "{}{}",
            FILLED_STAR.to_string().repeat(rating),
            EMPTY_STAR.to_string().repeat(MAX_RATING as usize - rating)
        );

        let mut lines = vec![
            REVIEW_TITLE.to_string(),
            format!("Room: {}", self.room),
            format!("Rating: {} ({}/5)", stars, self.rating),
            format!("Name: {}", self.name),
        ];

        if let Some(phone) = self.phone.as_deref().filter(|phone| !phone.is_empty()) {
            lines.push(format!("Phone: {}", phone));
        }

        if let Some(client_ts) = self.client_ts.as_deref().filter(|ts| !ts.is_empty()) {
            lines.push(format!("Time: {}", client_ts));
        }

        lines.push(String::new());
        lines.push(self.text.clone());

        lines.join("\n")
    }
}

// A missing field fails at the object itself, so its name is only in the message.
fn offending_field(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    let end = rest.find('`')?;

    Some(&rest[..end])
}
