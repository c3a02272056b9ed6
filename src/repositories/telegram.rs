use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::errors::NotifyError;

#[derive(Deserialize, Debug)]
struct TelegramResponse {
    #[serde(default)]
    ok: bool,
    description: Option<String>,
}

/// Client for the Bot API `sendMessage` method.
///
/// Cloning is cheap; all clones share the same connection pool.
#[derive(Clone, Debug)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    send_message_url: String,
}

impl TelegramNotifier {
    pub fn new(base_url: &str, bot_token: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            send_message_url: format!(
                "{}/bot{}/sendMessage",
                base_url.trim_end_matches('/'),
                bot_token
            ),
        })
    }

    /// Sends `text` to `chat_id` in a single attempt.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), NotifyError> {
        let body = json!({
            "chat_id": chat_id,
            "text": text,
            "disable_web_page_preview": true,
        });

        let response = match self
            .client
            .post(&self.send_message_url)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return Err(transport_error(err)),
        };

        // Telegram answers rejections with a 4xx status and an `ok: false` body,
        // so the body decides rather than the status.
        let result = match response.json::<TelegramResponse>().await {
            Ok(result) => result,
            Err(err) => return Err(transport_error(err)),
        };

        if !result.ok {
            return Err(NotifyError::Rejected(
                result
                    .description
                    .unwrap_or_else(|| "Telegram error".to_string()),
            ));
        }

        Ok(())
    }
}

// The url embeds the bot token and must never reach a response or a log line.
fn transport_error(err: reqwest::Error) -> NotifyError {
    let err = err.without_url();
    let mut message = err.to_string();

    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    NotifyError::Transport(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "123:secret";

    fn notifier(server: &MockServer, timeout: Duration) -> TelegramNotifier {
        TelegramNotifier::new(&server.uri(), TOKEN, timeout).unwrap()
    }

    #[tokio::test]
    async fn sends_expected_body_and_accepts_ok() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/bot123:secret/sendMessage"))
            .and(body_json(json!({
                "chat_id": "-100500",
                "text": "hello",
                "disable_web_page_preview": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": { "message_id": 1 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = notifier(&server, Duration::from_secs(5))
            .send_message("-100500", "hello")
            .await;

        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn rejection_carries_description() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let result = notifier(&server, Duration::from_secs(5))
            .send_message("1", "hello")
            .await;

        assert_eq!(
            result,
            Err(NotifyError::Rejected("Bad Request: chat not found".to_string()))
        );
    }

    #[tokio::test]
    async fn rejection_without_description_is_generic() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let result = notifier(&server, Duration::from_secs(5))
            .send_message("1", "hello")
            .await;

        assert_eq!(
            result,
            Err(NotifyError::Rejected("Telegram error".to_string()))
        );
    }

    #[tokio::test]
    async fn timeout_is_a_transport_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "ok": true }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = notifier(&server, Duration::from_millis(200))
            .send_message("1", "hello")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "transport");
        assert!(err.to_string().starts_with("Telegram request failed: "));
        assert!(err.to_string().contains("timed out"));
        assert!(!err.to_string().contains(TOKEN));
    }

    #[tokio::test]
    async fn malformed_body_is_a_transport_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let err = notifier(&server, Duration::from_secs(5))
            .send_message("1", "hello")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "transport");
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = TelegramNotifier::new(&uri, TOKEN, Duration::from_secs(1))
            .unwrap()
            .send_message("1", "hello")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "transport");
        assert!(!err.to_string().contains(TOKEN));
    }
}
