//! Provider JSON-RPC client.
//!
//! Talks to the wallet provider / node facade over JSON-RPC 2.0 on HTTP.
//! The provider holds the signing key and exposes the group wallet
//! contract's operations as RPC methods; writes come back as transaction
//! ids whose finality is queried with `gettransactionstatus`.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone)]
pub struct ContractClient {
    rpc_endpoint: String,
    contract_address: String,
    client: Client,
}

/// JSON-RPC 2.0 request
#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: &'static str,
    id: String,
    method: String,
    params: serde_json::Value,
}

/// JSON-RPC 2.0 response
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: Option<String>,
    #[allow(dead_code)]
    id: Option<serde_json::Value>,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Terminal status of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatus {
    Confirmed,
    Reverted { reason: String },
}

impl ContractClient {
    pub fn new(endpoint: String, contract_address: String) -> Self {
        // Ensure the endpoint is an HTTP URL
        let rpc_endpoint = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint
        } else {
            format!("http://{}", endpoint)
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        log::info!("provider client initialized: {}", rpc_endpoint);

        Self {
            rpc_endpoint,
            contract_address,
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.rpc_endpoint
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    /// Send a JSON-RPC 2.0 request and return the result.
    ///
    /// A `null` result is a valid payload here (a pending transaction has
    /// no status yet), so it comes back as `Value::Null` rather than an
    /// error.
    async fn rpc_call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ClientError> {
        let id = REQUEST_ID.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: id.to_string(),
            method: method.to_string(),
            params,
        };

        log::debug!("→ RPC {}: {:?}", method, request.params);

        let response = self
            .client
            .post(&self.rpc_endpoint)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::http(response.status().as_u16()));
        }

        let rpc_response: JsonRpcResponse = response.json().await.map_err(|e| {
            ClientError::InvalidResponse(format!("Failed to parse JSON-RPC response: {}", e))
        })?;

        if let Some(error) = rpc_response.error {
            return Err(ClientError::RpcError(error.code, error.message));
        }

        Ok(rpc_response.result.unwrap_or(serde_json::Value::Null))
    }

    /// Contract balance in base units.
    pub async fn get_balance(&self) -> Result<u128, ClientError> {
        let result = self
            .rpc_call("getbalance", serde_json::json!([self.contract_address]))
            .await?;

        let balance = parse_base_units(result.get("balance"))?;
        log::debug!("balance: {} base units", balance);
        Ok(balance)
    }

    /// Contract owner address, or `None` when unset.
    pub async fn owner(&self) -> Result<Option<String>, ClientError> {
        let result = self
            .rpc_call("owner", serde_json::json!([self.contract_address]))
            .await?;

        Ok(result
            .get("owner")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()))
    }

    /// Whether `address` is a member of the group wallet.
    /// Absent or malformed responses default to false.
    pub async fn is_member(&self, address: &str) -> Result<bool, ClientError> {
        let result = self
            .rpc_call(
                "ismember",
                serde_json::json!([self.contract_address, address]),
            )
            .await?;

        Ok(result
            .get("member")
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }

    /// Submit a value-carrying deposit. The provider signs on behalf of
    /// `from`; the attached value is the base-unit amount.
    pub async fn deposit(&self, from: &str, value: u128) -> Result<String, ClientError> {
        let result = self
            .rpc_call(
                "deposit",
                serde_json::json!([{
                    "contract": self.contract_address,
                    "from": from,
                    "value": value.to_string(),
                }]),
            )
            .await?;

        let txid = extract_txid(result)?;
        log::info!("deposit submitted: {}", txid);
        Ok(txid)
    }

    /// Submit a withdrawal. The base-unit amount is a call argument, not
    /// attached value.
    pub async fn withdraw(&self, from: &str, amount: u128) -> Result<String, ClientError> {
        let result = self
            .rpc_call(
                "withdraw",
                serde_json::json!([{
                    "contract": self.contract_address,
                    "from": from,
                    "amount": amount.to_string(),
                }]),
            )
            .await?;

        let txid = extract_txid(result)?;
        log::info!("withdraw submitted: {}", txid);
        Ok(txid)
    }

    /// Accounts the provider is willing to sign for.
    pub async fn accounts(&self) -> Result<Vec<String>, ClientError> {
        let result = self.rpc_call("accounts", serde_json::json!([])).await?;

        let accounts: Vec<String> = serde_json::from_value(result)
            .map_err(|e| ClientError::InvalidResponse(format!("Bad accounts list: {}", e)))?;
        Ok(accounts)
    }

    /// Query the status of a submitted transaction.
    /// `None` while it is still pending.
    pub async fn transaction_status(&self, txid: &str) -> Result<Option<TxStatus>, ClientError> {
        let result = self
            .rpc_call("gettransactionstatus", serde_json::json!([txid]))
            .await?;

        if result.is_null() {
            return Ok(None);
        }

        match result.get("status").and_then(|v| v.as_str()) {
            Some("confirmed") => Ok(Some(TxStatus::Confirmed)),
            Some("reverted") => {
                let reason = result
                    .get("reason")
                    .and_then(|v| v.as_str())
                    .unwrap_or("execution reverted")
                    .to_string();
                Ok(Some(TxStatus::Reverted { reason }))
            }
            other => Err(ClientError::InvalidResponse(format!(
                "Unknown transaction status: {:?}",
                other
            ))),
        }
    }
}

/// Parse a base-unit amount carried as a decimal string (the facade never
/// sends them as JSON numbers, which would truncate past 2^53).
fn parse_base_units(val: Option<&serde_json::Value>) -> Result<u128, ClientError> {
    let raw = match val {
        Some(serde_json::Value::String(s)) => s.as_str(),
        Some(serde_json::Value::Number(n)) => {
            return n
                .as_u64()
                .map(u128::from)
                .ok_or_else(|| ClientError::InvalidResponse("Bad balance number".into()));
        }
        None | Some(serde_json::Value::Null) => return Ok(0),
        _ => return Err(ClientError::InvalidResponse("Bad balance field".into())),
    };
    raw.trim()
        .parse()
        .map_err(|_| ClientError::InvalidResponse(format!("Bad balance string: {:?}", raw)))
}

fn extract_txid(result: serde_json::Value) -> Result<String, ClientError> {
    result
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| ClientError::InvalidResponse("No transaction id in response".into()))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    #[error("RPC error {0}: {1}")]
    RpcError(i64, String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    pub fn http(status: u16) -> Self {
        let message = match status {
            400 => "Bad Request",
            404 => "Not Found",
            500 => "Internal Server Error",
            503 => "Service Unavailable",
            _ => "Unknown Error",
        };
        Self::Http(status, message.to_string())
    }
}
