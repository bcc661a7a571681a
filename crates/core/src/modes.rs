use anyhow::anyhow;

use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Portfolio,
    Explorer,
}

impl FeedKind {
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "portfolio" | "history" | "rabby" => Ok(Self::Portfolio),
            "explorer" | "blockscout" | "hyperscan" => Ok(Self::Explorer),
            _ => Err(anyhow!("unsupported feed: {raw}").into()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Portfolio => "portfolio",
            Self::Explorer => "explorer",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Pretty,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "json" | "compact" => Ok(Self::Json),
            "pretty" | "json-pretty" | "json_pretty" => Ok(Self::Pretty),
            _ => Err(anyhow!("unsupported output format: {raw}").into()),
        }
    }
}
