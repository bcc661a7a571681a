pub mod classifier;
pub mod engine;
pub mod extractor;
pub mod feeds;
pub mod metrics;
pub mod record;
pub mod tables;
pub mod tokens;

#[cfg(test)]
mod abi_fixtures;

pub use classifier::{classifier_for, Classifier, ClassifyContext, ExplorerClassifier, PortfolioClassifier};
pub use engine::Pipeline;
pub use extractor::{extract_flows, FlowSource, TokenFlows};
pub use feeds::{ExplorerPage, PortfolioPage};
pub use metrics::PipelineMetrics;
pub use record::{extract_selectors, RawTx};
pub use tables::ProtocolTables;
pub use tokens::{resolve_symbol, resolve_usd_value, TokenDict, TokenMeta, TokenRegistry};
