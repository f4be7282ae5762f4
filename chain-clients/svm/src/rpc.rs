//! Solana RPC Snapshot Reader
//!
//! Read-only JSON-RPC access to the intent program's accounts. Supplies the
//! Config snapshot the resolver works from and lets callers check receipts
//! and finished markers before submitting anything.

use std::time::Duration;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;
use swap_intents_common::{ReplayKey, SwapOrder};

use crate::config::SvmIntentConfig;
use crate::pda;
use crate::state::{
    ConfigAccount, ConfigSnapshot, OrderAccount, OrderFinishedAccount, ProgramAccount,
    ReceiptAccount,
};

// ============================================================================
// JSON-RPC TYPES
// ============================================================================

#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcAccount {
    data: (String, String),
}

#[derive(Debug, Deserialize)]
struct AccountInfoResult {
    value: Option<RpcAccount>,
}

// ============================================================================
// READER
// ============================================================================

pub struct SvmIntentReader {
    client: Client,
    rpc_url: String,
    program_id: Pubkey,
}

impl SvmIntentReader {
    pub fn new(rpc_url: &str, program_id: Pubkey, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            rpc_url: rpc_url.to_string(),
            program_id,
        })
    }

    pub fn from_config(config: &SvmIntentConfig) -> Result<Self> {
        Self::new(
            &config.rpc_url,
            config.program_pubkey()?,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Reads the Config account.
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigSnapshot)` - Current Config values
    /// * `Err(anyhow::Error)` - RPC failure, missing or malformed account
    pub async fn get_config_snapshot(&self) -> Result<ConfigSnapshot> {
        let (config_pda, _) = pda::config(&self.program_id)?;
        let data = self
            .get_raw_account_data(&config_pda)
            .await?
            .with_context(|| format!("Config account {} not found", config_pda))?;
        let account = ConfigAccount::from_account_data(&data)?;

        tracing::info!(
            network_id = %account.network_id,
            deposit_id = account.deposit_id,
            conn_sn = account.conn_sn,
            protocol_fee = account.protocol_fee,
            "Read config snapshot"
        );
        let snapshot = ConfigSnapshot::from(account);
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Returns true when the receipt for `key` exists and is set.
    pub async fn is_message_received(&self, key: &ReplayKey) -> Result<bool> {
        let (receipt_pda, _) = pda::receipt(&self.program_id, &key.src_nid, key.conn_sn)?;
        let Some(data) = self.get_raw_account_data(&receipt_pda).await? else {
            return Ok(false);
        };
        Ok(ReceiptAccount::from_account_data(&data)?.received)
    }

    /// Returns true when the order-finished marker of `order` exists and is set.
    pub async fn is_order_finished(&self, order: &SwapOrder) -> Result<bool> {
        let (finished_pda, _) = pda::order_finished(&self.program_id, &order.hash())?;
        let Some(data) = self.get_raw_account_data(&finished_pda).await? else {
            return Ok(false);
        };
        Ok(OrderFinishedAccount::from_account_data(&data)?.finished)
    }

    /// Reads the escrowed order at `order_pda`, `None` once it is closed.
    pub async fn get_order(&self, order_pda: &Pubkey) -> Result<Option<SwapOrder>> {
        let Some(data) = self.get_raw_account_data(order_pda).await? else {
            return Ok(None);
        };
        Ok(Some(OrderAccount::from_account_data(&data)?.order()))
    }

    /// Reads raw account data (base64-decoded), `None` if the account doesn't exist.
    pub async fn get_raw_account_data(&self, pubkey: &Pubkey) -> Result<Option<Vec<u8>>> {
        let params = serde_json::json!([
            pubkey.to_string(),
            { "encoding": "base64" }
        ]);

        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: "getAccountInfo".to_string(),
            params,
            id: 1,
        };

        let response: JsonRpcResponse<AccountInfoResult> = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .context("Failed to call getAccountInfo")?
            .json()
            .await
            .context("Failed to parse getAccountInfo response")?;

        if let Some(error) = response.error {
            return Err(anyhow::anyhow!("SVM RPC error: {}", error.message));
        }

        let Some(account) = response.result.and_then(|result| result.value) else {
            return Ok(None);
        };

        let data = STANDARD
            .decode(&account.data.0)
            .context("Failed to decode base64 account data")?;
        Ok(Some(data))
    }
}
