//! Client library for interacting with argon nodes.
//!
//! This crate provides a small JSON-RPC client for fetching an account's
//! current on-chain key, the network collaborator the validator depends
//! on. The node serves a key either as a typed JSON object or as the raw
//! hex-encoded wire form; both are decoded into [`AccountKey`].

use argon_accounts::{AccountKey, AccountKeyError};
use argon_types::Address;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use argon_log::debug;
use thiserror::Error;
use url::Url;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request error
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("json parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// RPC error returned by the node
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The node served an undecodable account key
    #[error("invalid account key in response: {0}")]
    AccountKey(#[from] AccountKeyError),

    /// Structurally invalid RPC response
    #[error("malformed rpc response: {0}")]
    InvalidResponse(String),
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// JSON-RPC client for an argon node
pub struct Client {
    http: HttpClient,
    url: Url,
}

impl Client {
    /// Connect to a node endpoint with the default 30 second timeout
    pub fn new(url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(url, Duration::from_secs(30))
    }

    /// Connect with an explicit request timeout
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: Url::parse(url)?,
        })
    }

    /// Fetch an account's current key in its typed JSON form.
    /// Returns `None` for accounts the node has never seen.
    pub async fn get_account_key(
        &self,
        address: &Address,
    ) -> Result<Option<AccountKey>, ClientError> {
        let result = self
            .call("argon_getAccountKey", json!([address.to_string(), "latest"]))
            .await?;
        parse_account_key(result)
    }

    /// Fetch an account's current key in its raw wire encoding and decode
    /// it. Returns `None` for accounts the node has never seen.
    pub async fn get_account_key_rlp(
        &self,
        address: &Address,
    ) -> Result<Option<AccountKey>, ClientError> {
        let result = self
            .call(
                "argon_getAccountKeyRlp",
                json!([address.to_string(), "latest"]),
            )
            .await?;
        parse_encoded_account_key(result)
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, ClientError> {
        debug!(method, url = %self.url, "sending rpc request");
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        };
        let response: RpcResponse = self
            .http
            .post(self.url.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if let Some(error) = response.error {
            return Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        response
            .result
            .ok_or_else(|| ClientError::InvalidResponse("missing result".to_string()))
    }
}

fn parse_account_key(result: Value) -> Result<Option<AccountKey>, ClientError> {
    match result {
        Value::Null => Ok(None),
        value => Ok(Some(serde_json::from_value(value)?)),
    }
}

fn parse_encoded_account_key(result: Value) -> Result<Option<AccountKey>, ClientError> {
    match result {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(AccountKey::decode_hex(&text)?)),
        other => Err(ClientError::InvalidResponse(format!(
            "expected hex string, got {other}"
        ))),
    }
}
