use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxCategory {
    AddLiquidity,
    RemoveLiquidity,
    ClaimFees,
    Swap,
    Approve,
    Send,
    Receive,
    Other,
}

impl TxCategory {
    pub const ALL: [TxCategory; 8] = [
        TxCategory::AddLiquidity,
        TxCategory::RemoveLiquidity,
        TxCategory::ClaimFees,
        TxCategory::Swap,
        TxCategory::Approve,
        TxCategory::Send,
        TxCategory::Receive,
        TxCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TxCategory::AddLiquidity => "Add liquidity",
            TxCategory::RemoveLiquidity => "Remove liquidity",
            TxCategory::ClaimFees => "Claim fees",
            TxCategory::Swap => "Swap",
            TxCategory::Approve => "Approve token",
            TxCategory::Send => "Send",
            TxCategory::Receive => "Receive",
            TxCategory::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TxCategory::AddLiquidity => "ADD_LIQUIDITY",
            TxCategory::RemoveLiquidity => "REMOVE_LIQUIDITY",
            TxCategory::ClaimFees => "CLAIM_FEES",
            TxCategory::Swap => "SWAP",
            TxCategory::Approve => "APPROVE",
            TxCategory::Send => "SEND",
            TxCategory::Receive => "RECEIVE",
            TxCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for TxCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenAmount {
    pub symbol: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd_value: Option<f64>,
}

impl TokenAmount {
    pub fn new(symbol: impl Into<String>, amount: f64, usd_value: Option<f64>) -> Self {
        Self {
            symbol: symbol.into(),
            amount,
            usd_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedTx {
    pub hash: String,
    pub chain: String,
    pub project_id: Option<String>,
    pub category: TxCategory,
    pub label: &'static str,
    pub time: DateTime<Utc>,
    pub scam: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_usd: Option<f64>,
    pub tokens_in: Vec<TokenAmount>,
    pub tokens_out: Vec<TokenAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LpGroup {
    pub id: String,
    pub chain: String,
    pub project_id: Option<String>,
    pub opened_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    pub add_tx: ClassifiedTx,
    pub claim_txs: Vec<ClassifiedTx>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_tx: Option<ClassifiedTx>,
}

impl LpGroup {
    pub fn open(add_tx: ClassifiedTx) -> Self {
        Self {
            id: format!(
                "{}-{}-{}",
                add_tx.chain,
                add_tx.project_id.as_deref().unwrap_or("unknown"),
                add_tx.hash
            ),
            chain: add_tx.chain.clone(),
            project_id: add_tx.project_id.clone(),
            opened_at: add_tx.time,
            closed_at: None,
            add_tx,
            claim_txs: Vec::new(),
            remove_tx: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remove_tx.is_none()
    }

    pub fn matches(&self, tx: &ClassifiedTx) -> bool {
        self.chain == tx.chain && self.project_id == tx.project_id
    }
}
