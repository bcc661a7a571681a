use alloy::primitives::Address;
use anyhow::{bail, Result};
use radar_core::config::TokenConfig;
use radar_core::utils::{parse_address, short_id, MAX_DECIMALS};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Any entry carrying a `collection` key is a position, whatever its value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenMeta {
    Position(PositionToken),
    Fungible(FungibleToken),
}

impl<'de> Deserialize<'de> for TokenMeta {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let is_position = value
            .as_object()
            .is_some_and(|entry| entry.contains_key("collection"));
        if is_position {
            PositionToken::deserialize(value)
                .map(TokenMeta::Position)
                .map_err(D::Error::custom)
        } else {
            FungibleToken::deserialize(value)
                .map(TokenMeta::Fungible)
                .map_err(D::Error::custom)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PositionToken {
    #[serde(default)]
    pub collection: Value,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub inner_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FungibleToken {
    #[serde(default)]
    pub display_symbol: Option<String>,
    #[serde(default)]
    pub optimized_symbol: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub decimals: Option<u32>,
}

impl TokenMeta {
    pub fn is_position(&self) -> bool {
        matches!(self, TokenMeta::Position(_))
    }

    fn symbol(&self) -> Option<&str> {
        match self {
            TokenMeta::Fungible(token) => first_non_blank(&[
                &token.display_symbol,
                &token.optimized_symbol,
                &token.symbol,
                &token.name,
            ]),
            TokenMeta::Position(token) => {
                first_non_blank(&[&token.symbol, &token.name]).or(Some("NFT"))
            }
        }
    }
}

fn first_non_blank<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|value| value.as_deref())
        .map(str::trim)
        .find(|value| !value.is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct TokenDict {
    entries: HashMap<String, TokenMeta>,
}

impl<'de> Deserialize<'de> for TokenDict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<HashMap<String, Value>>::deserialize(deserializer)?;
        Ok(Self::from_entries(raw.unwrap_or_default()))
    }
}

impl TokenDict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(raw: HashMap<String, Value>) -> Self {
        let mut dict = Self::new();
        for (id, entry) in raw {
            match TokenMeta::deserialize(entry) {
                Ok(meta) => dict.insert(id, meta),
                Err(err) => warn!(token_id = %id, %err, "skipping malformed token entry"),
            }
        }
        dict
    }

    pub fn insert(&mut self, id: impl Into<String>, meta: TokenMeta) {
        self.entries.insert(id.into(), meta);
    }

    /// Exact id first, then its lowercase form for checksummed addresses.
    pub fn get(&self, id: &str) -> Option<&TokenMeta> {
        self.entries
            .get(id)
            .or_else(|| self.entries.get(&id.to_ascii_lowercase()))
    }

    pub fn is_position(&self, id: &str) -> bool {
        self.get(id).is_some_and(TokenMeta::is_position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn resolve_symbol(token_id: &str, dict: &TokenDict) -> String {
    dict.get(token_id)
        .and_then(TokenMeta::symbol)
        .map(str::to_string)
        .unwrap_or_else(|| short_id(token_id))
}

pub fn resolve_usd_value(amount: f64, token_id: &str, dict: &TokenDict) -> Option<f64> {
    match dict.get(token_id)? {
        TokenMeta::Fungible(token) => priced(amount, token.price),
        TokenMeta::Position(_) => None,
    }
}

pub fn movement_usd_value(
    amount: f64,
    token_id: &str,
    dict: &TokenDict,
    reported_price: Option<f64>,
) -> Option<f64> {
    if dict.get(token_id).is_some() {
        resolve_usd_value(amount, token_id, dict)
    } else {
        priced(amount, reported_price)
    }
}

fn priced(amount: f64, price: Option<f64>) -> Option<f64> {
    let price = price?;
    if price.is_finite() && price > 0.0 {
        Some(amount * price)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownToken {
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: HashMap<Address, KnownToken>,
}

impl TokenRegistry {
    pub fn from_config(tokens: &[TokenConfig]) -> Result<Self> {
        let mut registry = Self::default();
        for token in tokens {
            if token.decimals > MAX_DECIMALS {
                bail!(
                    "token {} has {} decimals, at most {MAX_DECIMALS} supported",
                    token.symbol,
                    token.decimals
                );
            }
            registry.insert(parse_address(&token.address)?, &token.symbol, token.decimals);
        }
        Ok(registry)
    }

    pub fn insert(&mut self, address: Address, symbol: impl Into<String>, decimals: u8) {
        self.tokens.insert(
            address,
            KnownToken {
                symbol: symbol.into(),
                decimals,
            },
        );
    }

    pub fn get(&self, address: &Address) -> Option<&KnownToken> {
        self.tokens.get(address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.tokens.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn to_dict(&self) -> TokenDict {
        let mut dict = TokenDict::new();
        for (address, token) in &self.tokens {
            dict.insert(
                token_key(address),
                TokenMeta::Fungible(FungibleToken {
                    symbol: Some(token.symbol.clone()),
                    decimals: Some(u32::from(token.decimals)),
                    ..FungibleToken::default()
                }),
            );
        }
        dict
    }
}

pub fn token_key(address: &Address) -> String {
    address.to_string().to_ascii_lowercase()
}
