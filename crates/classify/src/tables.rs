use alloy::primitives::{address, Address};
use anyhow::{bail, Result};
use radar_core::config::AppConfig;
use radar_core::utils::parse_address;
use radar_decode::SelectorTables;

use crate::tokens::TokenRegistry;

#[derive(Debug, Clone)]
pub struct PositionManager {
    pub address: Address,
    pub project_id: String,
    pub chain: Option<String>,
    pub wrapped_native: Address,
    pub default_pair: Option<(Address, Address)>,
}

#[derive(Debug, Clone)]
pub struct ProtocolTables {
    pub position_managers: Vec<PositionManager>,
    pub selectors: SelectorTables,
    pub tokens: TokenRegistry,
    pub batched_method: String,
    pub swap_methods: Vec<String>,
    pub default_chain: String,
}

const PRJX_POSITION_MANAGER: Address = address!("0xeaD19AE861c29bBb2101E834922B2FEee69B9091");
const WHYPE: Address = address!("0x5555555555555555555555555555555555555555");
const USDT0: Address = address!("0xb8ce59fc3717ada4c02eadf9682a9e934f625ebb");
const UBTC: Address = address!("0x9fdbda0a5e284c32744d2f17ee5c74b284993463");
const USDT0_LEGACY: Address = address!("0x8bd19e19ef8d5ecbe6bbeeab59c51fdda0c74023");

impl ProtocolTables {
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let mut position_managers = Vec::with_capacity(cfg.position_managers.len());
        for pm in &cfg.position_managers {
            let default_pair = match pm.default_pair.as_deref() {
                None => None,
                Some([token0, token1]) => Some((parse_address(token0)?, parse_address(token1)?)),
                Some(other) => bail!(
                    "default_pair for {} must list two tokens, got {}",
                    pm.address,
                    other.len()
                ),
            };
            position_managers.push(PositionManager {
                address: parse_address(&pm.address)?,
                project_id: pm.project_id.clone(),
                chain: pm.chain.clone(),
                wrapped_native: parse_address(&pm.wrapped_native)?,
                default_pair,
            });
        }

        Ok(Self {
            position_managers,
            selectors: SelectorTables::from_config(&cfg.selectors)?,
            tokens: TokenRegistry::from_config(&cfg.tokens)?,
            batched_method: cfg.classify.batched_method.clone(),
            swap_methods: cfg.classify.swap_methods.clone(),
            default_chain: cfg.explorer.default_chain.clone(),
        })
    }

    pub fn hyperevm() -> Self {
        let mut tokens = TokenRegistry::default();
        tokens.insert(WHYPE, "WHYPE", 18);
        tokens.insert(USDT0, "USD₮0", 6);
        tokens.insert(UBTC, "UBTC", 8);
        tokens.insert(USDT0_LEGACY, "USD₮0", 6);

        Self {
            position_managers: vec![PositionManager {
                address: PRJX_POSITION_MANAGER,
                project_id: "hyper_prjx".to_string(),
                chain: Some("hyper".to_string()),
                wrapped_native: WHYPE,
                default_pair: Some((WHYPE, USDT0)),
            }],
            selectors: SelectorTables::uniswap_v3(),
            tokens,
            batched_method: "multicall".to_string(),
            swap_methods: vec!["exactInputSingle".to_string()],
            default_chain: "hyper".to_string(),
        }
    }

    pub fn position_manager(&self, address: Option<&Address>) -> Option<&PositionManager> {
        let address = address?;
        self.position_managers
            .iter()
            .find(|pm| &pm.address == address)
    }

    pub fn is_swap_method(&self, method: &str) -> bool {
        let method = method.trim();
        self.swap_methods
            .iter()
            .any(|swap| swap.eq_ignore_ascii_case(method))
    }
}
