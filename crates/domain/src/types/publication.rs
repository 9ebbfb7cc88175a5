//! Bot publication records
//!
//! Request and response shapes for the publication endpoints. Field names
//! are camelCase on the wire; `None` fields are left out of the payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// Query filters for `GET /admin/public-bots`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ListPublicBotsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Inclusive lower bound, `YYYYMMDDHH`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Inclusive upper bound, `YYYYMMDDHH`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// A published bot as seen by an administrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PublicBot {
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_published: bool,
    #[cfg_attr(feature = "ts-gen", ts(type = "number | null"))]
    #[serde(default)]
    pub published_datetime: Option<i64>,
    pub owner_user_id: String,
    pub total_price: f64,
}

pub type ListPublicBotsResponse = Vec<PublicBot>;

/// Free-form parameters forwarded verbatim as a query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GetBotPublicationRequest(pub BTreeMap<String, String>);

impl GetBotPublicationRequest {
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

/// Free-form parameters forwarded verbatim as the DELETE body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeleteBotPublicationRequest(pub BTreeMap<String, String>);

impl DeleteBotPublicationRequest {
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

/// Quota window of a published API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "UPPERCASE")]
pub enum QuotaPeriod {
    Day,
    Week,
    Month,
}

crate::impl_wire_enum_conversions!(QuotaPeriod {
    Day => "DAY",
    Week => "WEEK",
    Month => "MONTH",
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PublishedApiQuota {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub period: Option<QuotaPeriod>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PublishedApiThrottle {
    /// Steady-state requests per second
    #[serde(default)]
    pub rate_limit: Option<f64>,
    #[serde(default)]
    pub burst_limit: Option<u32>,
}

/// Body of `POST /bot/{botId}/publication`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PublishBotRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    pub quota: PublishedApiQuota,
    pub throttle: PublishedApiThrottle,
    pub allowed_origins: Vec<String>,
}

/// Publishing only starts the deployment; the server replies without content.
pub type PublishBotResponse = ();

/// Publication state of a bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct BotPublication {
    #[serde(default)]
    pub stage: Option<String>,
    pub quota: PublishedApiQuota,
    pub throttle: PublishedApiThrottle,
    pub allowed_origins: Vec<String>,
    pub cfn_status: String,
    pub codebuild_id: String,
    pub codebuild_status: String,
    pub endpoint: String,
    #[serde(default)]
    pub api_key_ids: Vec<String>,
}

pub type GetBotPublicationResponse = BotPublication;

pub type DeleteBotPublicationResponse = ();

/// API key of a publication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub value: String,
    pub enabled: bool,
    /// Epoch milliseconds
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub created_date: i64,
}

pub type GetBotPublicationApiKeyResponse = ApiKey;

pub type CreateBotPublicationApiKeyResponse = ApiKey;

pub type DeleteBotPublicationApiKeyResponse = ();

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn publish_request_uses_camel_case() {
        let request = PublishBotRequest {
            stage: None,
            quota: PublishedApiQuota {
                limit: Some(1000),
                offset: Some(0),
                period: Some(QuotaPeriod::Month),
            },
            throttle: PublishedApiThrottle { rate_limit: Some(10.0), burst_limit: Some(20) },
            allowed_origins: vec!["*".into()],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "quota": { "limit": 1000, "offset": 0, "period": "MONTH" },
                "throttle": { "rateLimit": 10.0, "burstLimit": 20 },
                "allowedOrigins": ["*"]
            })
        );
    }

    #[test]
    fn list_request_omits_unset_filters() {
        let request = ListPublicBotsRequest { limit: Some(5), ..Default::default() };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({ "limit": 5 }));
    }

    #[test]
    fn publication_parses_server_payload() {
        let payload = json!({
            "stage": "api",
            "quota": { "limit": null, "offset": null, "period": null },
            "throttle": { "rateLimit": null, "burstLimit": null },
            "allowedOrigins": ["https://example.com"],
            "cfnStatus": "CREATE_COMPLETE",
            "codebuildId": "build-1",
            "codebuildStatus": "SUCCEEDED",
            "endpoint": "https://abc.execute-api.us-east-1.amazonaws.com/api",
            "apiKeyIds": ["k1", "k2"]
        });

        let publication: BotPublication = serde_json::from_value(payload).unwrap();
        assert_eq!(publication.stage.as_deref(), Some("api"));
        assert_eq!(publication.quota, PublishedApiQuota::default());
        assert_eq!(publication.api_key_ids, vec!["k1", "k2"]);
    }

    #[test]
    fn free_form_params_serialize_flat() {
        let request = DeleteBotPublicationRequest::default().param("reason", "retired");
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({ "reason": "retired" }));
    }

    #[test]
    fn quota_period_round_trips_wire_string() {
        assert_eq!("week".parse::<QuotaPeriod>().unwrap(), QuotaPeriod::Week);
        assert_eq!(serde_json::to_value(QuotaPeriod::Day).unwrap(), json!("DAY"));
    }
}
