use alloy::primitives::{Address, U256};
use anyhow::{anyhow, bail};
use std::fmt;
use std::str::FromStr;

pub fn parse_address(s: &str) -> anyhow::Result<Address> {
    Address::from_str(s.trim()).map_err(|e| anyhow!("invalid address {s}: {e}"))
}

pub fn parse_u256_decimal(s: &str) -> anyhow::Result<U256> {
    let s = s.trim();
    if let Some(stripped) = s.strip_prefix("0x") {
        Ok(U256::from_str_radix(stripped, 16)?)
    } else {
        Ok(U256::from_str_radix(s, 10)?)
    }
}

pub fn short_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() < 10 {
        return id.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

/// Largest precision whose scale factor fits in a U256.
pub const MAX_DECIMALS: u8 = 77;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalAmount {
    raw: U256,
    decimals: u8,
}

impl DecimalAmount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    pub fn parse(s: &str, decimals: u8) -> anyhow::Result<Self> {
        if decimals > MAX_DECIMALS {
            bail!("{decimals} decimals exceeds the supported {MAX_DECIMALS}");
        }
        let s = s.trim();
        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };
        if frac.len() > decimals as usize {
            bail!("{s} has more than {decimals} fractional digits");
        }
        let whole = if whole.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(whole, 10)?
        };
        let padded = format!("{frac:0<width$}", width = decimals as usize);
        let frac = if padded.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(&padded, 10)?
        };
        let raw = whole
            .checked_mul(scale(decimals))
            .and_then(|scaled| scaled.checked_add(frac))
            .ok_or_else(|| anyhow!("{s} overflows a 256-bit amount"))?;
        Ok(Self { raw, decimals })
    }

    pub fn raw(&self) -> U256 {
        self.raw
    }

    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.decimals == 0 {
            return write!(f, "{}", self.raw);
        }
        let factor = scale(self.decimals);
        let whole = self.raw / factor;
        let frac = (self.raw % factor).to_string();
        let frac = format!("{frac:0>width$}", width = self.decimals as usize);
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.{frac}")
        }
    }
}

pub fn to_decimal(raw: U256, decimals: u8) -> DecimalAmount {
    DecimalAmount::new(raw, decimals)
}

fn scale(decimals: u8) -> U256 {
    U256::from(10u64).pow(U256::from(decimals))
}
