//! Publication operations

use botpub_domain::{
    CreateBotPublicationApiKeyResponse, DeleteBotPublicationApiKeyResponse,
    DeleteBotPublicationRequest, DeleteBotPublicationResponse, GetBotPublicationApiKeyResponse,
    GetBotPublicationRequest, GetBotPublicationResponse, ListPublicBotsRequest,
    ListPublicBotsResponse, PublishBotRequest, PublishBotResponse,
};
use serde_json::{Map, Value};

use crate::http::paths::{self, present};
use crate::http::ports::{FetchTarget, HttpTransport};

/// Typed binding for the bot publication endpoints.
///
/// Stateless: each method shapes one request and hands it to the transport.
/// Reads whose path depends on an optional id resolve to
/// [`FetchTarget::Inactive`] (and `Ok(None)`) while the id is missing.
/// Mutations take their ids as required arguments and do not check them.
#[derive(Debug, Clone)]
pub struct PublicationApi<T> {
    http: T,
}

impl<T: HttpTransport> PublicationApi<T> {
    pub fn new(http: T) -> Self {
        Self { http }
    }

    pub fn transport(&self) -> &T {
        &self.http
    }

    /// `GET /admin/public-bots`, filters passed through as query parameters
    pub async fn list_public_bots(
        &self,
        req: &ListPublicBotsRequest,
    ) -> Result<Option<ListPublicBotsResponse>, T::Error> {
        self.http.get(FetchTarget::with_query(paths::PUBLIC_BOTS, Some(req))).await
    }

    /// `GET /bot/{botId}/publication`, skipped while `bot_id` is absent
    pub async fn get_bot_publication(
        &self,
        bot_id: Option<&str>,
        req: Option<&GetBotPublicationRequest>,
    ) -> Result<Option<GetBotPublicationResponse>, T::Error> {
        let target = match present(bot_id) {
            Some(bot_id) => FetchTarget::with_query(paths::bot_publication(bot_id), req),
            None => FetchTarget::Inactive,
        };
        self.http.get(target).await
    }

    /// `POST /bot/{botId}/publication`
    pub async fn publish_bot(
        &self,
        bot_id: &str,
        req: &PublishBotRequest,
    ) -> Result<PublishBotResponse, T::Error> {
        self.http.post(&paths::bot_publication(bot_id), req).await
    }

    /// `DELETE /bot/{botId}/publication`
    pub async fn delete_bot_publication(
        &self,
        bot_id: &str,
        req: Option<&DeleteBotPublicationRequest>,
    ) -> Result<DeleteBotPublicationResponse, T::Error> {
        self.http.delete(&paths::bot_publication(bot_id), req).await
    }

    /// `GET /bot/{botId}/publication/api-key/{apiKeyId}`, skipped unless
    /// both ids are present
    pub async fn get_bot_publication_api_key(
        &self,
        bot_id: Option<&str>,
        api_key_id: Option<&str>,
    ) -> Result<Option<GetBotPublicationApiKeyResponse>, T::Error> {
        let target = match (present(bot_id), present(api_key_id)) {
            (Some(bot_id), Some(api_key_id)) => {
                FetchTarget::path(paths::bot_publication_api_key(bot_id, api_key_id))
            }
            _ => FetchTarget::Inactive,
        };
        self.http.get(target).await
    }

    /// `DELETE /bot/{botId}/publication/api-key/{apiKeyId}`, no body
    pub async fn delete_bot_publication_api_key(
        &self,
        bot_id: &str,
        api_key_id: &str,
    ) -> Result<DeleteBotPublicationApiKeyResponse, T::Error> {
        self.http.delete(&paths::bot_publication_api_key(bot_id, api_key_id), None::<&()>).await
    }

    /// `POST /bot/{botId}/publication/api-key` with an empty `{}` body
    pub async fn create_bot_publication_api_key(
        &self,
        bot_id: &str,
    ) -> Result<CreateBotPublicationApiKeyResponse, T::Error> {
        let empty = Value::Object(Map::new());
        self.http.post(&paths::bot_publication_api_keys(bot_id), &empty).await
    }
}
