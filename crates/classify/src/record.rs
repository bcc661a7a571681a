use alloy::primitives::{Address, Selector, U256};
use chrono::{DateTime, Utc};
use radar_core::modes::FeedKind;
use radar_decode::{selectors_of, InnerCall};

#[derive(Debug, Clone, PartialEq)]
pub struct TokenMove {
    pub token_id: String,
    pub amount: f64,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferLog {
    pub token: Address,
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub value: U256,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawTx {
    pub feed: FeedKind,
    pub hash: String,
    pub chain: String,
    pub project_id: Option<String>,
    pub time: DateTime<Utc>,
    pub success: bool,
    pub scam: bool,
    pub sends: Vec<TokenMove>,
    pub receives: Vec<TokenMove>,
    pub transfers: Vec<TransferLog>,
    pub native_value: bool,
    pub method: Option<String>,
    pub category_hint: Option<String>,
    pub token_approve: bool,
    pub inner_calls: Vec<InnerCall>,
    pub to: Option<Address>,
    pub gas_usd: Option<f64>,
}

impl RawTx {
    pub fn new(feed: FeedKind, hash: impl Into<String>, chain: impl Into<String>) -> Self {
        Self {
            feed,
            hash: hash.into(),
            chain: chain.into(),
            project_id: None,
            time: DateTime::<Utc>::default(),
            success: true,
            scam: false,
            sends: Vec::new(),
            receives: Vec::new(),
            transfers: Vec::new(),
            native_value: false,
            method: None,
            category_hint: None,
            token_approve: false,
            inner_calls: Vec::new(),
            to: None,
            gas_usd: None,
        }
    }

    pub fn selectors(&self) -> Vec<Selector> {
        selectors_of(&self.inner_calls)
    }

    pub fn method_is(&self, name: &str) -> bool {
        self.method
            .as_deref()
            .is_some_and(|method| method.trim().eq_ignore_ascii_case(name))
    }

    pub fn hint_is(&self, hint: &str) -> bool {
        self.category_hint
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case(hint))
    }
}

pub fn extract_selectors(tx: &RawTx) -> Vec<Selector> {
    tx.selectors()
}
