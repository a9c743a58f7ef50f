use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::core::{error::FetchError, source::BlockSource, types::RewardRecord};

/// Response envelope shared by every Etherscan endpoint.
#[derive(Deserialize, Debug)]
struct ApiResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: String,
    result: Value,
}

/// Etherscan `block/getblockreward` client.
pub struct EtherscanClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl EtherscanClient {
    pub fn new(endpoint_url: &str, api_key: &str, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = endpoint_url
            .parse::<Url>()
            .with_context(|| format!("Invalid Etherscan endpoint url: {endpoint_url}"))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint,
            api_key: api_key.to_string(),
        })
    }

    pub async fn get_block_reward(&self, block_number: u64) -> Result<RewardRecord, FetchError> {
        debug!("🖨️ Fetching block reward for block {}", block_number);
        let blockno = block_number.to_string();

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("module", "block"),
                ("action", "getblockreward"),
                ("blockno", blockno.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| FetchError::Http {
                block: block_number,
                source,
            })?;

        let body = response.text().await.map_err(|source| FetchError::Http {
            block: block_number,
            source,
        })?;

        let envelope: ApiResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Malformed {
                block: block_number,
                reason: e.to_string(),
            })?;

        if envelope.status.as_deref() == Some("0") {
            let detail = match &envelope.result {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Err(FetchError::Rejected {
                block: block_number,
                message: format!("{}: {}", envelope.message, detail),
            });
        }

        match envelope.result {
            Value::Object(fields) => Ok(RewardRecord::from_fields(fields)),
            other => Err(FetchError::Malformed {
                block: block_number,
                reason: format!("expected an object result, got {other}"),
            }),
        }
    }
}

#[async_trait]
impl BlockSource for EtherscanClient {
    type Record = RewardRecord;

    fn name(&self) -> &str {
        "etherscan"
    }

    async fn fetch(&self, block_number: u64) -> Result<RewardRecord, FetchError> {
        self.get_block_reward(block_number).await
    }
}
