use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field Etherscan attaches to every reward record; it is never persisted.
pub const TIMESTAMP_FIELD: &str = "timeStamp";

/// A value that can be written as one line of an output file.
pub trait Record {
    /// Serialized form of the record, without the trailing newline.
    fn to_line(&self) -> Result<String>;
}

/// Block reward record as returned by Etherscan, minus its timestamp.
///
/// The record is kept opaque: every field other than `timeStamp` is written
/// back exactly as received, in the order the API sent it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct RewardRecord(Map<String, Value>);

impl RewardRecord {
    pub fn from_fields(mut fields: Map<String, Value>) -> Self {
        // Keeps the remaining fields in the order the API sent them
        fields.shift_remove(TIMESTAMP_FIELD);
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// `blockNumber` as reported by the API, if it is present and numeric.
    pub fn block_number(&self) -> Option<u64> {
        match self.0.get("blockNumber")? {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl Record for RewardRecord {
    fn to_line(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

/// Block hash as a `0x`-prefixed hex string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct BlockHash(pub String);

impl BlockHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlockHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Record for BlockHash {
    fn to_line(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
