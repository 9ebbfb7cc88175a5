//! Published-bot conversation operations
//!
//! The transport handed to [`PublishedBotApi`] should point at the
//! publication's `endpoint` and authenticate with one of its API keys.

use botpub_domain::{ChatInput, ChatOutput, MessageRequestedResponse};

use crate::http::paths::{self, present};
use crate::http::ports::{FetchTarget, HttpTransport};

#[derive(Debug, Clone)]
pub struct PublishedBotApi<T> {
    http: T,
}

impl<T: HttpTransport> PublishedBotApi<T> {
    pub fn new(http: T) -> Self {
        Self { http }
    }

    pub fn transport(&self) -> &T {
        &self.http
    }

    /// `POST /conversation`. The reply is produced asynchronously; poll
    /// [`Self::get_message`] with the returned ids.
    pub async fn post_message(
        &self,
        input: &ChatInput,
    ) -> Result<MessageRequestedResponse, T::Error> {
        self.http.post(paths::CONVERSATION, input).await
    }

    /// `GET /conversation/{conversationId}/{messageId}`, skipped unless both
    /// ids are present
    pub async fn get_message(
        &self,
        conversation_id: Option<&str>,
        message_id: Option<&str>,
    ) -> Result<Option<ChatOutput>, T::Error> {
        let target = match (present(conversation_id), present(message_id)) {
            (Some(conversation_id), Some(message_id)) => {
                FetchTarget::path(paths::conversation_message(conversation_id, message_id))
            }
            _ => FetchTarget::Inactive,
        };
        self.http.get(target).await
    }
}

#[cfg(test)]
mod tests {
    use botpub_domain::{Content, MessageInput};
    use serde_json::json;

    use super::*;
    use crate::http::testing::RecordingTransport;

    #[tokio::test]
    async fn post_message_sends_chat_input() {
        let transport = RecordingTransport::default()
            .reply(json!({ "conversationId": "c1", "messageId": "m1" }));
        let api = PublishedBotApi::new(transport);
        let input = ChatInput {
            conversation_id: None,
            message: MessageInput { content: vec![Content::text("hi")], model: "claude-v3-haiku".into() },
        };

        let queued = api.post_message(&input).await.unwrap();

        assert_eq!(queued.conversation_id, "c1");
        assert_eq!(queued.message_id, "m1");
        let calls = api.transport().calls();
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].path, "/conversation");
        assert_eq!(calls[0].body, Some(serde_json::to_value(&input).unwrap()));
    }

    #[tokio::test]
    async fn get_message_waits_for_both_ids() {
        let api = PublishedBotApi::new(RecordingTransport::default());

        assert_eq!(api.get_message(Some("c1"), None).await.unwrap(), None);
        assert_eq!(api.get_message(None, Some("m1")).await.unwrap(), None);
        assert!(api.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn get_message_targets_conversation_path() {
        let transport = RecordingTransport::default().reply(json!({
            "conversationId": "c1",
            "message": {
                "role": "assistant",
                "content": [{ "contentType": "text", "body": "hello" }],
                "model": "claude-v3-haiku",
                "children": [],
                "parent": "m0"
            },
            "createTime": 1_700_000_000.5
        }));
        let api = PublishedBotApi::new(transport);

        let output = api.get_message(Some("c1"), Some("m1")).await.unwrap().unwrap();

        assert_eq!(output.message.role, "assistant");
        assert_eq!(output.message.parent.as_deref(), Some("m0"));
        assert_eq!(api.transport().calls()[0].path, "/conversation/c1/m1");
    }
}
