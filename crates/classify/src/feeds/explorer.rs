use alloy::primitives::{Address, U256};
use chrono::{DateTime, Utc};
use radar_core::modes::FeedKind;
use radar_core::utils::{parse_address, parse_u256_decimal};
use radar_decode::parse_inner_calls;
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::record::{RawTx, TransferLog};
use crate::tables::ProtocolTables;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExplorerPage {
    #[serde(default)]
    pub items: Vec<Value>,
    /// Opaque cursor for the next page, passed back to the API unchanged.
    #[serde(default)]
    pub next_page_params: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerItem {
    pub hash: String,
    #[serde(default)]
    pub chain: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub from: Option<AddressRef>,
    #[serde(default)]
    pub to: Option<AddressRef>,
    #[serde(default)]
    pub decoded_input: Option<DecodedInput>,
    #[serde(default)]
    pub token_transfers: Option<Vec<TokenTransfer>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub has_error_in_internal_transactions: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressRef {
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecodedInput {
    #[serde(default)]
    pub method_call: Option<String>,
    #[serde(default)]
    pub method_id: Option<String>,
    #[serde(default)]
    pub parameters: Option<Vec<DecodedParam>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecodedParam {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenTransfer {
    #[serde(default)]
    pub from: Option<AddressRef>,
    #[serde(default)]
    pub to: Option<AddressRef>,
    #[serde(default)]
    pub token: Option<TransferToken>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub total: Option<TransferTotal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferToken {
    #[serde(default, alias = "address")]
    pub hash: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferTotal {
    #[serde(default)]
    pub value: Option<String>,
}

impl ExplorerPage {
    pub fn items(&self) -> Vec<ExplorerItem> {
        super::parse_items(FeedKind::Explorer, &self.items)
    }

    pub fn has_next_page(&self) -> bool {
        self.next_page_params
            .as_ref()
            .is_some_and(|cursor| !cursor.is_null())
    }
}

impl AddressRef {
    fn address(&self) -> Option<Address> {
        self.hash.as_deref().and_then(|hash| parse_address(hash).ok())
    }
}

impl ExplorerItem {
    pub fn is_successful(&self) -> bool {
        if self.status.as_deref() != Some("ok") {
            return false;
        }
        if self.result.as_deref().is_some_and(|result| result != "success") {
            return false;
        }
        !self.has_error_in_internal_transactions.unwrap_or(false)
    }

    pub fn inner_call_hex(&self) -> Vec<&str> {
        let Some(first) = self
            .decoded_input
            .as_ref()
            .and_then(|input| input.parameters.as_deref())
            .and_then(<[DecodedParam]>::first)
        else {
            return Vec::new();
        };
        if first.kind != "bytes[]" {
            return Vec::new();
        }
        match &first.value {
            Value::Array(calls) => calls.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    fn transfer_logs(&self) -> Vec<TransferLog> {
        let Some(transfers) = &self.token_transfers else {
            return Vec::new();
        };
        transfers
            .iter()
            .filter_map(|transfer| {
                let token = transfer
                    .token
                    .as_ref()
                    .and_then(|token| token.hash.as_deref())
                    .and_then(|hash| parse_address(hash).ok())?;
                let raw = transfer
                    .value
                    .as_deref()
                    .or_else(|| transfer.total.as_ref().and_then(|t| t.value.as_deref()))?;
                let value = match parse_u256_decimal(raw) {
                    Ok(value) => value,
                    Err(err) => {
                        trace!(hash = %self.hash, %err, "skipping transfer with bad value");
                        return None;
                    }
                };
                Some(TransferLog {
                    token,
                    from: transfer.from.as_ref().and_then(AddressRef::address),
                    to: transfer.to.as_ref().and_then(AddressRef::address),
                    value,
                })
            })
            .collect()
    }

    pub fn into_raw(self, tables: &ProtocolTables) -> RawTx {
        let to = self.to.as_ref().and_then(AddressRef::address);
        let manager = tables.position_manager(to.as_ref());
        let chain = self
            .chain
            .clone()
            .or_else(|| manager.and_then(|pm| pm.chain.clone()))
            .unwrap_or_else(|| tables.default_chain.clone());

        let mut raw = RawTx::new(FeedKind::Explorer, self.hash.clone(), chain);
        raw.project_id = manager.map(|pm| pm.project_id.clone());
        raw.time = self.timestamp;
        raw.success = self.is_successful();
        raw.transfers = self.transfer_logs();
        raw.native_value = self
            .value
            .as_deref()
            .and_then(|value| parse_u256_decimal(value).ok())
            .is_some_and(|value| value > U256::ZERO);
        raw.inner_calls = parse_inner_calls(self.inner_call_hex());
        raw.to = to;
        raw.method = self.method;
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use serde_json::json;

    fn item(extra: Value) -> ExplorerItem {
        let mut base = json!({
            "hash": "0xclaim",
            "timestamp": "2024-11-02T10:15:00.000000Z",
            "method": "multicall",
            "value": "0",
            "from": { "hash": "0x7f02609ccfb440aa98a95b5ec6814bfe7f6cd406" },
            "to": { "hash": "0xeaD19AE861c29bBb2101E834922B2FEee69B9091", "name": "NonfungiblePositionManager" },
            "status": "ok",
            "result": "success",
            "has_error_in_internal_transactions": false
        });
        if let (Value::Object(base), Value::Object(extra)) = (&mut base, extra) {
            base.extend(extra);
        }
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn failure_flags_filter_items() {
        assert!(item(json!({})).is_successful());
        assert!(!item(json!({ "status": "error" })).is_successful());
        assert!(!item(json!({ "status": null })).is_successful());
        assert!(!item(json!({ "result": "Reverted" })).is_successful());
        assert!(item(json!({ "result": null })).is_successful());
        assert!(!item(json!({ "has_error_in_internal_transactions": true })).is_successful());

        let tables = ProtocolTables::hyperevm();
        assert!(item(json!({})).into_raw(&tables).success);
        assert!(!item(json!({ "result": "Reverted" })).into_raw(&tables).success);
    }

    #[test]
    fn inner_calls_require_bytes_array() {
        let batched = item(json!({
            "decoded_input": {
                "method_call": "multicall(bytes[] data)",
                "method_id": "ac9650d8",
                "parameters": [{ "name": "data", "type": "bytes[]", "value": ["0xfc6f7865", "0x12210e8a"] }]
            }
        }));
        assert_eq!(batched.inner_call_hex(), vec!["0xfc6f7865", "0x12210e8a"]);

        let other = item(json!({
            "decoded_input": {
                "parameters": [{ "name": "spender", "type": "address", "value": "0x01" }]
            }
        }));
        assert!(other.inner_call_hex().is_empty());
        assert!(item(json!({})).inner_call_hex().is_empty());
    }

    #[test]
    fn adapts_to_raw_with_manager_project() {
        let tables = ProtocolTables::hyperevm();
        let raw = item(json!({
            "value": "1000",
            "token_transfers": [
                {
                    "from": { "hash": "0xeaD19AE861c29bBb2101E834922B2FEee69B9091" },
                    "to": { "hash": "0x7f02609ccfb440aa98a95b5ec6814bfe7f6cd406" },
                    "token": { "hash": "0xb8ce59fc3717ada4c02eadf9682a9e934f625ebb" },
                    "total": { "value": "2500000" }
                },
                {
                    "from": { "hash": "0x01" },
                    "token": { "hash": "0x5555555555555555555555555555555555555555" },
                    "value": "not-a-number"
                }
            ]
        }))
        .into_raw(&tables);

        assert_eq!(raw.chain, "hyper");
        assert_eq!(raw.project_id.as_deref(), Some("hyper_prjx"));
        assert!(raw.native_value);
        assert_eq!(raw.transfers.len(), 1);
        assert_eq!(raw.transfers[0].value, U256::from(2_500_000u64));
        assert_eq!(
            raw.transfers[0].to,
            Some(address!("0x7f02609ccfb440aa98a95b5ec6814bfe7f6cd406"))
        );
        assert_eq!(raw.time.timestamp(), 1_730_542_500);
    }

    #[test]
    fn unknown_destination_has_no_project() {
        let tables = ProtocolTables::hyperevm();
        let raw = item(json!({
            "chain": "hyperliquid",
            "to": { "hash": "0x5555555555555555555555555555555555555555", "name": null }
        }))
        .into_raw(&tables);
        assert_eq!(raw.chain, "hyperliquid");
        assert!(raw.project_id.is_none());
    }

    #[test]
    fn page_cursor_and_bad_items() {
        let page: ExplorerPage = serde_json::from_value(json!({
            "items": [
                { "hash": "0x1", "timestamp": "2024-11-02T10:15:00Z", "status": "ok" },
                { "hash": "0x2", "timestamp": "yesterday" }
            ],
            "next_page_params": { "block_number": 1, "index": 0 }
        }))
        .unwrap();
        assert_eq!(page.items().len(), 1);
        assert!(page.has_next_page());
        let last: ExplorerPage = serde_json::from_value(json!({ "items": [], "next_page_params": null })).unwrap();
        assert!(!last.has_next_page());
    }
}
