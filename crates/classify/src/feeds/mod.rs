pub mod explorer;
pub mod portfolio;

pub use explorer::{ExplorerItem, ExplorerPage};
pub use portfolio::{HistoryItem, PortfolioPage};

use radar_core::modes::FeedKind;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

pub(crate) fn parse_items<T: DeserializeOwned>(feed: FeedKind, raw: &[Value]) -> Vec<T> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                let hash = item
                    .get("hash")
                    .or_else(|| item.get("id"))
                    .and_then(Value::as_str)
                    .unwrap_or("<missing>");
                warn!(feed = feed.as_str(), index, hash, %err, "skipping malformed page item");
                None
            }
        })
        .collect()
}
