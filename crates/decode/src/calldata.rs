use crate::abi::INonfungiblePositionManager;
use alloy::primitives::{Address, Bytes, Selector, B256, U256};
use alloy::sol_types::SolCall;
use anyhow::Result;
use tracing::trace;

pub const WORD_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerCall {
    pub selector: Selector,
    pub args: Bytes,
}

impl InnerCall {
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }
        Some(Self {
            selector: Selector::from_slice(&data[..4]),
            args: Bytes::copy_from_slice(&data[4..]),
        })
    }

    pub fn from_hex(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let stripped = raw.strip_prefix("0x").unwrap_or(raw);
        let data = hex::decode(stripped).ok()?;
        Self::from_bytes(&data)
    }

    pub fn words(&self) -> Vec<B256> {
        split_words(&self.args)
    }

    pub fn selector_hex(&self) -> String {
        self.selector.to_string()
    }
}

pub fn parse_inner_calls<'a, I>(raw: I) -> Vec<InnerCall>
where
    I: IntoIterator<Item = &'a str>,
{
    raw.into_iter()
        .filter_map(|call| {
            let parsed = InnerCall::from_hex(call);
            if parsed.is_none() {
                trace!(len = call.len(), "skipping undecodable inner call");
            }
            parsed
        })
        .collect()
}

pub fn selectors_of(calls: &[InnerCall]) -> Vec<Selector> {
    calls.iter().map(|call| call.selector).collect()
}

/// Splits an argument payload into 32-byte words, right-padding the last one.
pub fn split_words(payload: &[u8]) -> Vec<B256> {
    payload
        .chunks(WORD_SIZE)
        .map(|chunk| {
            let mut word = [0u8; WORD_SIZE];
            word[..chunk.len()].copy_from_slice(chunk);
            B256::from(word)
        })
        .collect()
}

pub fn address_from_word(word: &B256) -> Address {
    Address::from_word(*word)
}

pub fn word_to_u256(word: &B256) -> U256 {
    U256::from_be_bytes(word.0)
}

pub fn decode_multicall(input: &[u8]) -> Result<Option<Vec<InnerCall>>> {
    if input.len() < 4 {
        return Ok(None);
    }

    if input[..4] != INonfungiblePositionManager::multicallCall::SELECTOR {
        return Ok(None);
    }

    let call = INonfungiblePositionManager::multicallCall::abi_decode(input)?;
    Ok(Some(
        call.data
            .iter()
            .filter_map(|data| InnerCall::from_bytes(data))
            .collect(),
    ))
}
