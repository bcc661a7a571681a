use chrono::{DateTime, Utc};
use radar_core::modes::FeedKind;
use radar_core::utils::parse_address;
use radar_decode::{parse_inner_calls, InnerCall};
use serde::Deserialize;
use serde_json::Value;

use crate::record::{RawTx, TokenMove};
use crate::tokens::TokenDict;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioPage {
    #[serde(default)]
    pub history_list: Vec<Value>,
    #[serde(default)]
    pub token_dict: TokenDict,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub chain: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub cate_id: Option<String>,
    #[serde(default)]
    pub sends: Vec<Movement>,
    #[serde(default)]
    pub receives: Vec<Movement>,
    pub time_at: f64,
    #[serde(default)]
    pub is_scam: bool,
    #[serde(default)]
    pub token_approve: Option<Value>,
    #[serde(default)]
    pub tx: Option<HistoryTx>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Movement {
    pub token_id: String,
    pub amount: f64,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryTx {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub to_addr: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub usd_gas_fee: Option<f64>,
    #[serde(default)]
    pub params: Vec<Value>,
}

impl PortfolioPage {
    pub fn items(&self) -> Vec<HistoryItem> {
        super::parse_items(FeedKind::Portfolio, &self.history_list)
    }
}

impl HistoryTx {
    fn inner_calls(&self) -> Vec<InnerCall> {
        match self.params.first() {
            Some(Value::Array(calls)) => parse_inner_calls(calls.iter().filter_map(Value::as_str)),
            _ => Vec::new(),
        }
    }
}

impl HistoryItem {
    pub fn into_raw(self) -> RawTx {
        let tx = self.tx.unwrap_or_default();
        let mut raw = RawTx::new(FeedKind::Portfolio, self.id, self.chain);
        raw.project_id = self.project_id;
        raw.time = unix_seconds(self.time_at);
        raw.success = tx.status.map_or(true, |status| status == 1);
        raw.scam = self.is_scam;
        raw.sends = self.sends.into_iter().map(Movement::into_move).collect();
        raw.receives = self.receives.into_iter().map(Movement::into_move).collect();
        raw.native_value = tx.value.is_some_and(|value| value > 0.0);
        raw.category_hint = self.cate_id;
        raw.token_approve = self.token_approve.is_some_and(|approve| !approve.is_null());
        raw.inner_calls = tx.inner_calls();
        raw.to = tx.to_addr.as_deref().and_then(|to| parse_address(to).ok());
        raw.gas_usd = tx.usd_gas_fee;
        raw.method = tx.name;
        raw
    }
}

impl Movement {
    fn into_move(self) -> TokenMove {
        TokenMove {
            token_id: self.token_id,
            amount: self.amount,
            price: self.price,
        }
    }
}

fn unix_seconds(time_at: f64) -> DateTime<Utc> {
    if !time_at.is_finite() {
        return DateTime::<Utc>::default();
    }
    let secs = time_at.trunc() as i64;
    let nanos = ((time_at.fract() * 1e9).round() as u32).min(999_999_999);
    DateTime::from_timestamp(secs, nanos).unwrap_or_default()
}
