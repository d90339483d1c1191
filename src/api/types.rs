use alloy::primitives::U256;
use serde::Deserialize;

// ============================================================================
// Response Records
// ============================================================================
//
// Fields are kept as the strings the explorer returns. Missing fields
// default to empty so one record type serves every variant of a listing.

/// Explorer envelope shared by all actions
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub result: T,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccountBalance {
    pub account: String,
    pub balance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalTx {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub nonce: String,
    pub block_hash: String,
    pub transaction_index: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub gas: String,
    pub gas_price: String,
    pub is_error: String,
    #[serde(rename = "txreceipt_status")]
    pub tx_receipt_status: String,
    pub input: String,
    pub contract_address: String,
    pub cumulative_gas_used: String,
    pub gas_used: String,
    pub confirmations: String,
    pub method_id: String,
    pub function_name: String,
}

impl NormalTx {
    /// Method name without its argument list, e.g. `transfer`
    pub fn method(&self) -> Option<&str> {
        let name = self.function_name.split('(').next().unwrap_or("").trim();
        if !name.is_empty() {
            Some(name)
        } else if !self.method_id.is_empty() && self.method_id != "0x" {
            Some(&self.method_id)
        } else {
            None
        }
    }
}

/// Internal transaction, by address, by block range or by tx hash.
/// Listings by hash carry no `hash` or `traceId`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InternalTx {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub contract_address: String,
    pub input: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub gas: String,
    pub gas_used: String,
    pub trace_id: String,
    pub is_error: String,
    pub err_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Erc20Transfer {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub nonce: String,
    pub block_hash: String,
    pub from: String,
    pub contract_address: String,
    pub to: String,
    pub value: String,
    pub token_name: String,
    pub token_symbol: String,
    pub token_decimal: String,
    pub transaction_index: String,
    pub gas: String,
    pub gas_price: String,
    pub gas_used: String,
    pub cumulative_gas_used: String,
    pub input: String,
    pub confirmations: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Erc721Transfer {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub nonce: String,
    pub block_hash: String,
    pub from: String,
    pub contract_address: String,
    pub to: String,
    #[serde(rename = "tokenID")]
    pub token_id: String,
    pub token_name: String,
    pub token_symbol: String,
    pub token_decimal: String,
    pub transaction_index: String,
    pub gas: String,
    pub gas_price: String,
    pub gas_used: String,
    pub cumulative_gas_used: String,
    pub input: String,
    pub confirmations: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Erc1155Transfer {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub nonce: String,
    pub block_hash: String,
    pub transaction_index: String,
    pub gas: String,
    pub gas_price: String,
    pub gas_used: String,
    pub cumulative_gas_used: String,
    pub input: String,
    pub contract_address: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "tokenID")]
    pub token_id: String,
    pub token_value: String,
    pub token_name: String,
    pub token_symbol: String,
    pub confirmations: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MinedBlock {
    pub block_number: String,
    pub time_stamp: String,
    pub block_reward: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BeaconWithdrawal {
    pub withdrawal_index: String,
    pub validator_index: String,
    pub address: String,
    /// Denominated in gwei
    pub amount: String,
    pub block_number: String,
    pub timestamp: String,
}

// ============================================================================
// Field Parsing
// ============================================================================

/// Parse a decimal amount string, zero when malformed or empty
pub fn parse_u256(value: &str) -> U256 {
    U256::from_str_radix(value.trim(), 10).unwrap_or(U256::ZERO)
}

/// Parse a decimal integer field such as a block number or timestamp
pub fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}

/// The explorer flags failures with `isError == "1"`
pub fn is_error_flag(value: &str) -> bool {
    value.trim() == "1"
}
