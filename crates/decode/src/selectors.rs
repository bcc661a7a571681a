use crate::abi::INonfungiblePositionManager::{
    collectCall, decreaseLiquidityCall, increaseLiquidityCall, mintCall, refundETHCall,
    sweepTokenCall, unwrapWETH9Call,
};
use alloy::primitives::Selector;
use alloy::sol_types::SolCall;
use anyhow::{anyhow, bail, Result};
use radar_core::config::SelectorConfig;
use std::collections::HashSet;

pub fn parse_selector(raw: &str) -> Result<Selector> {
    let raw = raw.trim();
    let stripped = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(stripped).map_err(|e| anyhow!("invalid selector {raw}: {e}"))?;
    if bytes.len() != 4 {
        bail!("selector {raw} must be 4 bytes, got {}", bytes.len());
    }
    Ok(Selector::from_slice(&bytes))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LpAction {
    Add,
    Remove,
    FeeOnly,
}

#[derive(Debug, Clone)]
pub struct SelectorTables {
    pub add: HashSet<Selector>,
    pub remove: HashSet<Selector>,
    pub fee_only: HashSet<Selector>,
    pub unwrap: Selector,
    pub sweep: Selector,
}

impl SelectorTables {
    pub fn uniswap_v3() -> Self {
        Self {
            add: HashSet::from([mintCall::SELECTOR.into(), increaseLiquidityCall::SELECTOR.into()]),
            remove: HashSet::from([decreaseLiquidityCall::SELECTOR.into()]),
            fee_only: HashSet::from([
                collectCall::SELECTOR.into(),
                unwrapWETH9Call::SELECTOR.into(),
                sweepTokenCall::SELECTOR.into(),
                refundETHCall::SELECTOR.into(),
            ]),
            unwrap: unwrapWETH9Call::SELECTOR.into(),
            sweep: sweepTokenCall::SELECTOR.into(),
        }
    }

    pub fn from_config(cfg: &SelectorConfig) -> Result<Self> {
        let mut tables = Self::uniswap_v3();
        if let Some(add) = &cfg.add {
            tables.add = parse_set(add)?;
        }
        if let Some(remove) = &cfg.remove {
            tables.remove = parse_set(remove)?;
        }
        if let Some(fee_only) = &cfg.fee_only {
            tables.fee_only = parse_set(fee_only)?;
        }
        if let Some(unwrap) = &cfg.unwrap {
            tables.unwrap = parse_selector(unwrap)?;
        }
        if let Some(sweep) = &cfg.sweep {
            tables.sweep = parse_selector(sweep)?;
        }
        Ok(tables)
    }

    pub fn is_add(&self, selector: &Selector) -> bool {
        self.add.contains(selector)
    }

    pub fn is_remove(&self, selector: &Selector) -> bool {
        self.remove.contains(selector)
    }

    /// Add wins over remove, remove over fee-only. Fee-only needs every
    /// selector to be in the fee set.
    pub fn classify(&self, selectors: &[Selector]) -> Option<LpAction> {
        if selectors.is_empty() {
            return None;
        }
        if selectors.iter().any(|s| self.is_add(s)) {
            return Some(LpAction::Add);
        }
        if selectors.iter().any(|s| self.is_remove(s)) {
            return Some(LpAction::Remove);
        }
        if selectors.iter().all(|s| self.fee_only.contains(s)) {
            return Some(LpAction::FeeOnly);
        }
        None
    }
}

impl Default for SelectorTables {
    fn default() -> Self {
        Self::uniswap_v3()
    }
}

fn parse_set(raw: &[String]) -> Result<HashSet<Selector>> {
    raw.iter().map(|s| parse_selector(s)).collect()
}
