use alloy::primitives::Address;
use anyhow::Result;
use radar_core::dedupe::TxLedger;
use radar_core::modes::FeedKind;
use radar_core::ClassifiedTx;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::classifier::{classifier_for, ClassifyContext};
use crate::extractor::{extract_flows, FlowSource};
use crate::feeds::{ExplorerPage, PortfolioPage};
use crate::metrics::PipelineMetrics;
use crate::record::RawTx;
use crate::tables::ProtocolTables;
use crate::tokens::TokenDict;

pub struct Pipeline {
    tables: ProtocolTables,
    wallet: Option<Address>,
    registry_dict: TokenDict,
    metrics: Option<Arc<PipelineMetrics>>,
}

impl Pipeline {
    pub fn new(tables: ProtocolTables) -> Self {
        let registry_dict = tables.tokens.to_dict();
        Self {
            tables,
            wallet: None,
            registry_dict,
            metrics: None,
        }
    }

    pub fn with_wallet(mut self, wallet: Address) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<PipelineMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn classify_record(&self, tx: &RawTx, tokens: &TokenDict) -> ClassifiedTx {
        let ctx = ClassifyContext {
            tokens,
            tables: &self.tables,
            wallet: self.wallet,
        };
        let category = classifier_for(tx.feed).classify(tx, &ctx);
        let (flows, source) = extract_flows(tx, category, &ctx);
        debug!(
            hash = %tx.hash,
            feed = tx.feed.as_str(),
            %category,
            tokens_in = flows.tokens_in.len(),
            tokens_out = flows.tokens_out.len(),
            "classified"
        );

        if let Some(metrics) = &self.metrics {
            metrics
                .classified_total
                .with_label_values(&[category.as_str()])
                .inc();
            if source == FlowSource::Calldata {
                metrics.calldata_fallback_total.inc();
            }
        }

        ClassifiedTx {
            hash: tx.hash.clone(),
            chain: tx.chain.clone(),
            project_id: tx.project_id.clone(),
            category,
            label: category.label(),
            time: tx.time,
            scam: tx.scam,
            gas_usd: tx.gas_usd,
            tokens_in: flows.tokens_in,
            tokens_out: flows.tokens_out,
        }
    }

    pub fn classify_portfolio(&self, page: &PortfolioPage) -> Vec<ClassifiedTx> {
        let items = page.items();
        self.count_records(FeedKind::Portfolio, items.len());
        items
            .into_iter()
            .map(|item| self.classify_record(&item.into_raw(), &page.token_dict))
            .collect()
    }

    pub fn classify_explorer(&self, page: &ExplorerPage) -> Vec<ClassifiedTx> {
        let items = page.items();
        self.count_records(FeedKind::Explorer, items.len());
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let raw = item.into_raw(&self.tables);
            if !raw.success {
                debug!(hash = %raw.hash, "dropping failed transaction");
                if let Some(metrics) = &self.metrics {
                    metrics.filtered_failed_total.inc();
                }
                continue;
            }
            out.push(self.classify_record(&raw, &self.registry_dict));
        }
        out
    }

    pub fn classify_page(&self, feed: FeedKind, page: Value) -> Result<Vec<ClassifiedTx>> {
        let txs = match feed {
            FeedKind::Portfolio => self.classify_portfolio(&serde_json::from_value(page)?),
            FeedKind::Explorer => self.classify_explorer(&serde_json::from_value(page)?),
        };
        info!(feed = feed.as_str(), classified = txs.len(), "page classified");
        Ok(txs)
    }

    pub fn merge(&self, ledger: &mut TxLedger, page: Vec<ClassifiedTx>) -> usize {
        let duplicates = ledger.merge(page);
        if duplicates > 0 {
            debug!(duplicates, total = ledger.len(), "merged overlapping page");
            if let Some(metrics) = &self.metrics {
                metrics.merge_duplicates_total.inc_by(duplicates as u64);
            }
        }
        duplicates
    }

    fn count_records(&self, feed: FeedKind, count: usize) {
        if let Some(metrics) = &self.metrics {
            metrics
                .records_total
                .with_label_values(&[feed.as_str()])
                .inc_by(count as u64);
        }
    }
}
