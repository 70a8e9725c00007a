//! JSON-RPC chain client
//!
//! Talks to a node/archive endpoint that serves decoded block and
//! event JSON. Responses are parsed as raw `serde_json::Value`s so a
//! field the endpoint omits degrades to a default instead of failing
//! the whole search.

use serde_json::{json, Value};

use crate::domain::block::{Block, Extrinsic, Header};
use crate::domain::event::{EventRecord, Phase};
use crate::infrastructure::chain::client::{ChainClient, ChainError};

/// Chain client over HTTP JSON-RPC 2.0
pub struct RpcChain {
    http: reqwest::Client,
    url: String,
}

impl RpcChain {
    pub fn new(url: impl Into<String>) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|err| ChainError::Network(err.to_string()))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.url
    }

    /// Issue one JSON-RPC call. A `null` result is reported by the
    /// caller-supplied identifier, since the node answers `null` for
    /// unknown blocks instead of an error object.
    async fn call(&self, method: &str, params: Value, ident: &str) -> Result<Value, ChainError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|err| ChainError::Network(err.to_string()))?;
        let envelope: Value = response
            .json()
            .await
            .map_err(|err| ChainError::Network(err.to_string()))?;

        if let Some(error) = envelope.get("error") {
            let message = error
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("unspecified RPC error");
            return Err(ChainError::Network(format!("{method}: {message}")));
        }
        match envelope.get("result") {
            Some(Value::Null) | None => Err(ChainError::NotFound(format!(
                "no block for {ident}"
            ))),
            Some(result) => Ok(result.clone()),
        }
    }
}

#[async_trait::async_trait]
impl ChainClient for RpcChain {
    async fn chain_name(&self) -> Result<String, ChainError> {
        let result = self.call("system_chain", json!([]), "chain").await?;
        Ok(result.as_str().unwrap_or("unknown").to_string())
    }

    async fn resolve_hash(&self, height: u64) -> Result<String, ChainError> {
        let ident = format!("height {height}");
        let result = self
            .call("chain_getBlockHash", json!([height]), &ident)
            .await?;
        result
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ChainError::NotFound(ident))
    }

    async fn get_header(&self, hash: &str) -> Result<Header, ChainError> {
        let result = self.call("chain_getHeader", json!([hash]), hash).await?;
        parse_header(&result, hash)
    }

    async fn get_block(&self, hash: &str) -> Result<Block, ChainError> {
        let result = self.call("chain_getBlock", json!([hash]), hash).await?;
        parse_block(&result, hash)
    }

    async fn get_event_log(&self, hash: &str) -> Result<Vec<EventRecord>, ChainError> {
        let result = self.call("chain_getEvents", json!([hash]), hash).await?;
        Ok(parse_events(&result))
    }

    async fn latest_header(&self) -> Result<Header, ChainError> {
        let head = self
            .call("chain_getFinalizedHead", json!([]), "finalized head")
            .await?;
        let hash = head
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ChainError::Network("malformed finalized head".to_string()))?;
        self.get_header(&hash).await
    }

    async fn accounts(&self) -> Result<Vec<String>, ChainError> {
        let result = self.call("system_accounts", json!([]), "accounts").await?;
        Ok(result
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Parse a header response. Nodes don't echo the hash back, so the
/// requested hash is the canonical one.
fn parse_header(json: &Value, hash: &str) -> Result<Header, ChainError> {
    let number = json
        .get("number")
        .and_then(parse_block_number)
        .ok_or_else(|| ChainError::Network("header without a number".to_string()))?;
    Ok(Header {
        number,
        hash: json
            .get("hash")
            .and_then(|v| v.as_str())
            .unwrap_or(hash)
            .to_string(),
    })
}

/// Parse a decoded block response: `{"block": {"header", "extrinsics"}}`
fn parse_block(json: &Value, hash: &str) -> Result<Block, ChainError> {
    let inner = json.get("block").unwrap_or(json);
    let header_json = inner
        .get("header")
        .ok_or_else(|| ChainError::Network("block without a header".to_string()))?;
    let header = parse_header(header_json, hash)?;

    let mut extrinsics = Vec::new();
    if let Some(items) = inner.get("extrinsics").and_then(|v| v.as_array()) {
        for item in items {
            extrinsics.push(parse_extrinsic(item));
        }
    }

    Ok(Block { header, extrinsics })
}

fn parse_extrinsic(json: &Value) -> Extrinsic {
    Extrinsic {
        signed: json.get("signed").and_then(|v| v.as_bool()).unwrap_or(false),
        section: string_field(json, "section"),
        method: string_field(json, "method"),
        args: string_list(json.get("args")),
        docs: string_list(json.get("docs")),
    }
}

/// Parse the event log: entries carry a phase plus an event body,
/// either nested under `"event"` or flattened.
fn parse_events(json: &Value) -> Vec<EventRecord> {
    let Some(items) = json.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| {
            let body = item.get("event").unwrap_or(item);
            EventRecord {
                phase: parse_phase(item.get("phase")),
                section: string_field(body, "section"),
                method: string_field(body, "method"),
            }
        })
        .collect()
}

/// Phase is `{"applyExtrinsic": <index>}` for extrinsic-applied
/// events; every other shape ("finalization", "initialization", …)
/// collapses to `Other`.
fn parse_phase(json: Option<&Value>) -> Phase {
    json.and_then(|v| v.get("applyExtrinsic"))
        .and_then(parse_block_number)
        .map(|index| Phase::ApplyExtrinsic(index as u32))
        .unwrap_or(Phase::Other)
}

/// Numbers arrive either as JSON integers or hex strings like "0x64"
fn parse_block_number(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let s = value.as_str()?;
    let payload = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(payload, 16).ok()
}

fn string_field(json: &Value, key: &str) -> String {
    json.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Stringify a JSON list the way the report shows arguments: strings
/// verbatim, everything else in its compact JSON form.
fn string_list(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(|v| v.as_array()) else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}
