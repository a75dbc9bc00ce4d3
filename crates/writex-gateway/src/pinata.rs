//! Pinata / IPFS storage gateway.
//!
//! Uploads go through Pinata's `pinJSONToIPFS` endpoint with the document
//! as a JSON string and the title as pin metadata. Downloads go through a
//! public or dedicated IPFS HTTP gateway.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use writex_core::Locator;

use crate::error::{GatewayError, Result};
use crate::traits::StorageGateway;

const PIN_JSON_PATH: &str = "/pinning/pinJSONToIPFS";

fn default_api_url() -> String {
    "https://api.pinata.cloud".into()
}

fn default_gateway_url() -> String {
    "https://gateway.pinata.cloud".into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_cid_version() -> u8 {
    1
}

/// Connection settings for [`PinataGateway`].
#[derive(Clone, Serialize, Deserialize)]
pub struct PinataConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    /// Base URL of the pinning API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Base URL of the IPFS HTTP gateway used for reads.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// Whole-request timeout, applied to both uploads and reads.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cid_version")]
    pub cid_version: u8,
}

impl PinataConfig {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_url: default_api_url(),
            gateway_url: default_gateway_url(),
            timeout_secs: default_timeout_secs(),
            cid_version: default_cid_version(),
        }
    }
}

impl fmt::Debug for PinataConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinataConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("api_url", &self.api_url)
            .field("gateway_url", &self.gateway_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("cid_version", &self.cid_version)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PinPayload<'a> {
    pinata_content: &'a str,
    pinata_metadata: PinMetadata<'a>,
    pinata_options: PinOptions,
}

#[derive(Serialize)]
struct PinMetadata<'a> {
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PinOptions {
    cid_version: u8,
}

#[derive(Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

/// Storage gateway backed by Pinata.
pub struct PinataGateway {
    client: reqwest::Client,
    config: PinataConfig,
}

impl PinataGateway {
    /// Build a gateway. Fails if either credential is empty.
    pub fn new(config: PinataConfig) -> Result<Self> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(GatewayError::MissingCredentials(
                "Pinata API key and secret are required".into(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn pin_url(&self) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), PIN_JSON_PATH)
    }

    fn content_url(&self, locator: &Locator) -> String {
        format!(
            "{}/ipfs/{}",
            self.config.gateway_url.trim_end_matches('/'),
            locator
        )
    }
}

/// Documents are pinned as JSON strings, so the gateway serves them back
/// quoted. Unwrap that layer; anything that isn't a JSON string was pinned
/// some other way and is returned as-is.
fn unwrap_json_string(body: String) -> String {
    serde_json::from_str::<String>(&body).unwrap_or(body)
}

#[async_trait]
impl StorageGateway for PinataGateway {
    async fn put(&self, content: &str, title: &str) -> Result<Locator> {
        let payload = PinPayload {
            pinata_content: content,
            pinata_metadata: PinMetadata { name: title },
            pinata_options: PinOptions {
                cid_version: self.config.cid_version,
            },
        };

        let response = self
            .client
            .post(self.pin_url())
            .header("pinata_api_key", &self.config.api_key)
            .header("pinata_secret_api_key", &self.config.api_secret)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let pinned: PinResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        let locator = Locator::parse(&pinned.ipfs_hash)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        tracing::info!(%locator, title, "pinned document to IPFS");
        Ok(locator)
    }

    async fn get(&self, locator: &Locator) -> Result<String> {
        let response = self.client.get(self.content_url(locator)).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(locator.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        tracing::debug!(%locator, bytes = body.len(), "fetched document from IPFS gateway");
        Ok(unwrap_json_string(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CID: &str = "bafkreifzjut3te2nhyekklss27nh3k72ysco7y32koao5eei66wof36n5e";

    fn gateway_for(server: &MockServer) -> PinataGateway {
        let mut config = PinataConfig::new("key", "secret");
        config.api_url = server.uri();
        config.gateway_url = server.uri();
        PinataGateway::new(config).unwrap()
    }

    #[test]
    fn test_missing_credentials() {
        let err = PinataGateway::new(PinataConfig::new("", "secret")).err().unwrap();
        assert!(matches!(err, GatewayError::MissingCredentials(_)));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let debug = format!("{:?}", PinataConfig::new("my-key", "my-secret"));
        assert!(!debug.contains("my-key"));
        assert!(!debug.contains("my-secret"));
    }

    #[test]
    fn test_unwrap_json_string() {
        assert_eq!(unwrap_json_string("\"hello world\"".into()), "hello world");
        assert_eq!(unwrap_json_string("\"\\\"quoted\\\"\"".into()), "\"quoted\"");
        assert_eq!(unwrap_json_string("plain text".into()), "plain text");
    }

    #[tokio::test]
    async fn test_put_posts_pin_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PIN_JSON_PATH))
            .and(header("pinata_api_key", "key"))
            .and(header("pinata_secret_api_key", "secret"))
            .and(body_json(json!({
                "pinataContent": "hello world",
                "pinataMetadata": { "name": "My Post" },
                "pinataOptions": { "cidVersion": 1 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "IpfsHash": CID,
                "PinSize": 13,
                "Timestamp": "2024-01-01T00:00:00.000Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let locator = gateway_for(&server).put("hello world", "My Post").await.unwrap();
        assert_eq!(locator.as_str(), CID);
    }

    #[tokio::test]
    async fn test_put_surfaces_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PIN_JSON_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let err = gateway_for(&server).put("x", "y").await.unwrap_err();
        assert!(matches!(err, GatewayError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_put_rejects_bad_hash() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PIN_JSON_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "IpfsHash": "../x" })))
            .mount(&server)
            .await;

        let err = gateway_for(&server).put("x", "y").await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_get_unwraps_pinned_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/ipfs/{CID}")))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"hello world\""))
            .mount(&server)
            .await;

        let locator = Locator::parse(CID).unwrap();
        let content = gateway_for(&server).get(&locator).await.unwrap();
        assert_eq!(content, "hello world");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let locator = Locator::parse(CID).unwrap();
        let err = gateway_for(&server).get(&locator).await.unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_server_error_is_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let locator = Locator::parse(CID).unwrap();
        let err = gateway_for(&server).get(&locator).await.unwrap_err();
        assert!(matches!(err, GatewayError::Status { status: 502, .. }));
    }
}
