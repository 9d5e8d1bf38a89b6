//! Slack adapter - Chat capability over the Slack Web API

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::errors::{CapabilityError, CapabilityResult};
use crate::domain::traits::ChatCapability;

/// Page size for `conversations.members`
const MEMBERS_PAGE_SIZE: u32 = 200;

/// Slack Web API adapter
pub struct SlackAdapter {
    token: String,
    client: Client,
    api_base: String,
}

/// Common envelope of every Web API reply
#[derive(Debug, Deserialize)]
struct ApiReply<T> {
    ok: bool,
    error: Option<String>,
    #[serde(flatten)]
    body: Option<T>,
}

#[derive(Debug, Deserialize)]
struct PostMessageBody {
    ts: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MembersBody {
    #[serde(default)]
    members: Vec<String>,
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
struct ResponseMetadata {
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Empty {}

#[derive(Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Serialize)]
struct DeleteMessage<'a> {
    channel: &'a str,
    ts: &'a str,
}

/// Map a Slack `error` code to a capability error.
///
/// Auth and lookup failures get the status Slack would have used had it
/// not answered 200, so they classify as auth/not-found.
fn api_error(method: &str, code: &str) -> CapabilityError {
    let err = CapabilityError::new("SlackApiError", format!("{} failed: {}", method, code));
    match code {
        "not_authed" | "invalid_auth" | "account_inactive" | "token_revoked" | "token_expired"
        | "missing_scope" | "not_allowed_token_type" | "cant_delete_message" => err.with_status(403),
        "channel_not_found" | "message_not_found" | "user_not_found" => err.with_status(404),
        "internal_error" | "fatal_error" | "service_unavailable" | "request_timeout" => {
            err.with_status(503)
        }
        _ => err,
    }
}

impl SlackAdapter {
    pub fn new(token: impl Into<String>, api_base: impl Into<String>, client: Client) -> Self {
        Self {
            token: token.into(),
            client,
            api_base: api_base.into(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), method)
    }

    /// Check HTTP status and the `ok` flag, returning the method body
    async fn read_reply<T: DeserializeOwned>(
        method: &str,
        response: reqwest::Response,
    ) -> CapabilityResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CapabilityError::http_status(
                status.as_u16(),
                format!("{} returned {}: {}", method, status, body),
            ));
        }

        let reply: ApiReply<T> = response.json().await?;
        if !reply.ok {
            let code = reply.error.unwrap_or_else(|| "unknown_error".to_string());
            return Err(api_error(method, &code));
        }

        reply
            .body
            .ok_or_else(|| CapabilityError::new("DecodeError", format!("{} reply has no body", method)))
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, method: &str, body: &B) -> CapabilityResult<T> {
        let response = self.client
            .post(self.api_url(method))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        Self::read_reply(method, response).await
    }
}

#[async_trait]
impl ChatCapability for SlackAdapter {
    async fn send(&self, channel_id: &str, text: &str) -> CapabilityResult<bool> {
        let body: PostMessageBody = self
            .post("chat.postMessage", &PostMessage { channel: channel_id, text })
            .await?;
        tracing::debug!(channel = channel_id, ts = ?body.ts, "Slack message sent");
        Ok(true)
    }

    async fn get_channel_members(&self, channel_id: &str) -> CapabilityResult<Vec<String>> {
        let mut members = Vec::new();
        let mut cursor: Option<String> = None;
        let limit = MEMBERS_PAGE_SIZE.to_string();

        loop {
            let mut query = vec![("channel", channel_id), ("limit", limit.as_str())];
            if let Some(c) = cursor.as_deref() {
                query.push(("cursor", c));
            }

            let response = self.client
                .get(self.api_url("conversations.members"))
                .bearer_auth(&self.token)
                .query(&query)
                .send()
                .await?;
            let page: MembersBody = Self::read_reply("conversations.members", response).await?;
            members.extend(page.members);

            cursor = page
                .response_metadata
                .and_then(|m| m.next_cursor)
                .filter(|c| !c.is_empty());
            if cursor.is_none() {
                break;
            }
        }

        Ok(members)
    }

    async fn delete_message(&self, channel_id: &str, message_id: &str) -> CapabilityResult<bool> {
        let _: Empty = self
            .post("chat.delete", &DeleteMessage { channel: channel_id, ts: message_id })
            .await?;
        Ok(true)
    }

    fn name(&self) -> &str {
        "slack"
    }
}
