use crate::domain::model::Secret;
use crate::utils::error::Result;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BroadcastRequest<'a> {
    pub messages: Vec<TextMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TextMessage<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: &'a str,
}

impl<'a> BroadcastRequest<'a> {
    /// 單一文字訊息，內容不截斷
    pub fn text(text: &'a str) -> Self {
        Self {
            messages: vec![TextMessage { kind: "text", text }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastResponse {
    pub status: u16,
    pub body: String,
}

impl BroadcastResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// LINE Messaging API broadcast：送達所有好友，不重試
pub struct BroadcastClient {
    client: Client,
    endpoint: String,
    token: Secret,
}

impl BroadcastClient {
    pub fn new(client: Client, endpoint: impl Into<String>, token: Secret) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            token,
        }
    }

    pub async fn broadcast(&self, text: &str) -> Result<BroadcastResponse> {
        tracing::debug!(chars = text.chars().count(), "Posting broadcast message");

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.token.expose()))
            .header(CONTENT_TYPE, "application/json")
            .json(&BroadcastRequest::text(text))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::info!(status, body = %body, "LINE response");

        Ok(BroadcastResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let report = "📊【今日の経済ニュースまとめ】\n\"quoted\" \\ backslash";
        let value = serde_json::to_value(BroadcastRequest::text(report)).unwrap();

        assert_eq!(
            value,
            json!({"messages": [{"type": "text", "text": report}]})
        );
    }

    #[tokio::test]
    async fn test_broadcast_posts_exact_body() {
        let server = MockServer::start();
        let report = "line one\nline two 🌍";

        let line_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v2/bot/message/broadcast")
                .header("Authorization", "Bearer line-token")
                .header("Content-Type", "application/json")
                .json_body(json!({"messages": [{"type": "text", "text": report}]}));
            then.status(200).json_body(json!({}));
        });

        let client = BroadcastClient::new(
            Client::new(),
            server.url("/v2/bot/message/broadcast"),
            Secret::new("line-token"),
        );

        let response = client.broadcast(report).await.unwrap();

        line_mock.assert();
        assert!(response.is_success());
        assert_eq!(response.body, "{}");
    }

    #[tokio::test]
    async fn test_broadcast_rejected_is_not_error() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/v2/bot/message/broadcast");
            then.status(401)
                .json_body(json!({"message": "Authentication failed"}));
        });

        let client = BroadcastClient::new(
            Client::new(),
            server.url("/v2/bot/message/broadcast"),
            Secret::new("bad-token"),
        );

        let response = client.broadcast("report").await.unwrap();

        assert_eq!(response.status, 401);
        assert!(!response.is_success());
        assert!(response.body.contains("Authentication failed"));
    }
}
