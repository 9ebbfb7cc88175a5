//! Endpoint path builders
//!
//! Identifiers are percent-encoded per segment. Ids made only of unreserved
//! characters (ULIDs, UUIDs, slugs) come out unchanged. Any other id is not
//! interpolated raw: `a/b` becomes `a%2Fb`, so it cannot add a path segment
//! or start a query string.

use urlencoding::encode;

pub const PUBLIC_BOTS: &str = "/admin/public-bots";
pub const CONVERSATION: &str = "/conversation";

/// `/bot/{botId}/publication`
pub fn bot_publication(bot_id: &str) -> String {
    format!("/bot/{}/publication", encode(bot_id))
}

/// `/bot/{botId}/publication/api-key`
pub fn bot_publication_api_keys(bot_id: &str) -> String {
    format!("{}/api-key", bot_publication(bot_id))
}

/// `/bot/{botId}/publication/api-key/{apiKeyId}`
pub fn bot_publication_api_key(bot_id: &str, api_key_id: &str) -> String {
    format!("{}/{}", bot_publication_api_keys(bot_id), encode(api_key_id))
}

/// `/conversation/{conversationId}/{messageId}`
pub fn conversation_message(conversation_id: &str, message_id: &str) -> String {
    format!("{CONVERSATION}/{}/{}", encode(conversation_id), encode(message_id))
}

/// An identifier that is missing or empty counts as absent.
pub fn present(id: Option<&str>) -> Option<&str> {
    id.filter(|id| !id.is_empty())
}
