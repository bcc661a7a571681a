use alloy::primitives::Address;
use radar_core::modes::FeedKind;
use radar_core::TxCategory;
use radar_decode::LpAction;
use std::collections::HashSet;

use crate::record::RawTx;
use crate::tables::ProtocolTables;
use crate::tokens::TokenDict;

pub struct ClassifyContext<'a> {
    pub tokens: &'a TokenDict,
    pub tables: &'a ProtocolTables,
    pub wallet: Option<Address>,
}

pub trait Classifier {
    fn classify(&self, tx: &RawTx, ctx: &ClassifyContext<'_>) -> TxCategory;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PortfolioClassifier;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExplorerClassifier;

pub fn classifier_for(feed: FeedKind) -> &'static dyn Classifier {
    match feed {
        FeedKind::Portfolio => &PortfolioClassifier,
        FeedKind::Explorer => &ExplorerClassifier,
    }
}

fn is_batched_lp_call(tx: &RawTx, tables: &ProtocolTables) -> bool {
    tables.position_manager(tx.to.as_ref()).is_some()
        && tx.method_is(&tables.batched_method)
        && !tx.inner_calls.is_empty()
}

impl Classifier for PortfolioClassifier {
    fn classify(&self, tx: &RawTx, ctx: &ClassifyContext<'_>) -> TxCategory {
        if is_batched_lp_call(tx, ctx.tables) {
            if let Some(category) = classify_lp_movements(tx, ctx.tokens) {
                return category;
            }
        }

        if tx.hint_is("approve") || tx.method_is("approve") || tx.token_approve {
            return TxCategory::Approve;
        }
        if tx.hint_is("send") {
            return TxCategory::Send;
        }
        if tx.hint_is("receive") {
            return TxCategory::Receive;
        }
        if tx
            .method
            .as_deref()
            .is_some_and(|method| ctx.tables.is_swap_method(method))
        {
            return TxCategory::Swap;
        }

        TxCategory::Other
    }
}

fn classify_lp_movements(tx: &RawTx, tokens: &TokenDict) -> Option<TxCategory> {
    let native = format!("native:{}", tx.chain);
    let sends_position = tx.sends.iter().any(|m| tokens.is_position(&m.token_id));
    let receives_position = tx.receives.iter().any(|m| tokens.is_position(&m.token_id));

    let mut sent_fungible: HashSet<&str> = tx
        .sends
        .iter()
        .filter(|m| !tokens.is_position(&m.token_id))
        .map(|m| m.token_id.as_str())
        .collect();
    let received_fungible: HashSet<&str> = tx
        .receives
        .iter()
        .filter(|m| !tokens.is_position(&m.token_id))
        .map(|m| m.token_id.as_str())
        .collect();

    let sends_any = !tx.sends.is_empty();
    let receives_any = !tx.receives.is_empty();

    if tx.native_value {
        sent_fungible.insert(native.as_str());
    }

    if !receives_position && !sends_position && receives_any && !sends_any {
        return Some(TxCategory::ClaimFees);
    }
    if receives_position && sends_any {
        return Some(TxCategory::AddLiquidity);
    }
    if sends_position && receives_any {
        return Some(TxCategory::RemoveLiquidity);
    }
    if sent_fungible.len() >= 2 {
        return Some(TxCategory::AddLiquidity);
    }
    if sends_any && received_fungible.len() >= 2 {
        return Some(TxCategory::RemoveLiquidity);
    }
    None
}

impl Classifier for ExplorerClassifier {
    fn classify(&self, tx: &RawTx, ctx: &ClassifyContext<'_>) -> TxCategory {
        if !is_batched_lp_call(tx, ctx.tables) {
            return TxCategory::Other;
        }
        match ctx.tables.selectors.classify(&tx.selectors()) {
            Some(LpAction::Add) => TxCategory::AddLiquidity,
            Some(LpAction::Remove) => TxCategory::RemoveLiquidity,
            Some(LpAction::FeeOnly) => TxCategory::ClaimFees,
            None => TxCategory::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TokenMove;
    use crate::tokens::TokenMeta;
    use alloy::primitives::address;
    use radar_decode::parse_inner_calls;
    use serde_json::json;

    const PM: Address = address!("0xeaD19AE861c29bBb2101E834922B2FEee69B9091");
    const WHYPE: &str = "0x5555555555555555555555555555555555555555";
    const USDT0: &str = "0xb8ce59fc3717ada4c02eadf9682a9e934f625ebb";

    fn dict() -> TokenDict {
        let mut dict = TokenDict::new();
        let position: TokenMeta =
            serde_json::from_value(json!({ "collection": { "name": "PRJX" }, "name": "PRJX #1" }))
                .unwrap();
        dict.insert("nft", position);
        let bare: TokenMeta =
            serde_json::from_value(json!({ "collection": null, "name": "PRJX #2" })).unwrap();
        dict.insert("nft_no_collection", bare);
        dict
    }

    fn mv(token_id: &str) -> TokenMove {
        TokenMove {
            token_id: token_id.to_string(),
            amount: 1.0,
            price: None,
        }
    }

    fn lp_tx(feed: FeedKind, selectors: &[&str]) -> RawTx {
        let mut tx = RawTx::new(feed, "0xabc", "hyper");
        tx.to = Some(PM);
        tx.method = Some("multicall".to_string());
        tx.inner_calls = parse_inner_calls(selectors.iter().copied());
        tx
    }

    fn portfolio(tx: &RawTx) -> TxCategory {
        let tables = ProtocolTables::hyperevm();
        let tokens = dict();
        let ctx = ClassifyContext {
            tokens: &tokens,
            tables: &tables,
            wallet: None,
        };
        PortfolioClassifier.classify(tx, &ctx)
    }

    fn explorer(tx: &RawTx) -> TxCategory {
        let tables = ProtocolTables::hyperevm();
        let tokens = TokenDict::new();
        let ctx = ClassifyContext {
            tokens: &tokens,
            tables: &tables,
            wallet: None,
        };
        ExplorerClassifier.classify(tx, &ctx)
    }

    #[test]
    fn pure_inflow_is_a_claim() {
        let mut tx = lp_tx(FeedKind::Portfolio, &["0xfc6f7865"]);
        tx.receives = vec![mv(WHYPE), mv(USDT0)];
        assert_eq!(portfolio(&tx), TxCategory::ClaimFees);
    }

    #[test]
    fn position_legs_decide_add_and_remove() {
        let mut add = lp_tx(FeedKind::Portfolio, &["0x88316456"]);
        add.sends = vec![mv(USDT0)];
        add.receives = vec![mv("nft")];
        assert_eq!(portfolio(&add), TxCategory::AddLiquidity);

        let mut remove = lp_tx(FeedKind::Portfolio, &["0x0c49ccbe"]);
        remove.sends = vec![mv("nft")];
        remove.receives = vec![mv(WHYPE)];
        assert_eq!(portfolio(&remove), TxCategory::RemoveLiquidity);
    }

    #[test]
    fn null_collection_still_marks_the_position_leg() {
        let mut add = lp_tx(FeedKind::Portfolio, &["0x88316456"]);
        add.sends = vec![mv(USDT0)];
        add.receives = vec![mv("nft_no_collection")];
        assert_eq!(portfolio(&add), TxCategory::AddLiquidity);
    }

    #[test]
    fn native_value_counts_as_a_distinct_send() {
        let mut tx = lp_tx(FeedKind::Portfolio, &["0x219f5d17"]);
        tx.sends = vec![mv(USDT0)];
        assert_eq!(portfolio(&tx), TxCategory::Other);
        tx.native_value = true;
        assert_eq!(portfolio(&tx), TxCategory::AddLiquidity);
    }

    #[test]
    fn cardinality_fallback_for_removals() {
        let mut tx = lp_tx(FeedKind::Portfolio, &["0x0c49ccbe"]);
        tx.sends = vec![mv(USDT0)];
        tx.receives = vec![mv(WHYPE), mv("0x9fdbda0a5e284c32744d2f17ee5c74b284993463")];
        assert_eq!(portfolio(&tx), TxCategory::RemoveLiquidity);
    }

    #[test]
    fn lp_rules_need_a_known_manager_and_inner_calls() {
        let mut tx = lp_tx(FeedKind::Portfolio, &[]);
        tx.receives = vec![mv(WHYPE)];
        assert_eq!(portfolio(&tx), TxCategory::Other);

        let mut elsewhere = lp_tx(FeedKind::Portfolio, &["0xfc6f7865"]);
        elsewhere.to = Some(address!("0x0000000000000000000000000000000000000001"));
        elsewhere.receives = vec![mv(WHYPE)];
        assert_eq!(portfolio(&elsewhere), TxCategory::Other);
    }

    #[test]
    fn generic_fallbacks_in_order() {
        let mut tx = RawTx::new(FeedKind::Portfolio, "0x1", "hyper");
        tx.category_hint = Some("send".to_string());
        assert_eq!(portfolio(&tx), TxCategory::Send);

        tx.token_approve = true;
        assert_eq!(portfolio(&tx), TxCategory::Approve);

        let mut receive = RawTx::new(FeedKind::Portfolio, "0x2", "hyper");
        receive.category_hint = Some("receive".to_string());
        assert_eq!(portfolio(&receive), TxCategory::Receive);

        let mut swap = RawTx::new(FeedKind::Portfolio, "0x3", "hyper");
        swap.method = Some("exactInputSingle".to_string());
        assert_eq!(portfolio(&swap), TxCategory::Swap);

        let mut approve = RawTx::new(FeedKind::Portfolio, "0x4", "hyper");
        approve.method = Some("approve".to_string());
        assert_eq!(portfolio(&approve), TxCategory::Approve);
    }

    #[test]
    fn lp_shape_that_matches_nothing_falls_through_to_hints() {
        let mut tx = lp_tx(FeedKind::Portfolio, &["0xfc6f7865"]);
        tx.category_hint = Some("receive".to_string());
        assert_eq!(portfolio(&tx), TxCategory::Receive);
    }

    #[test]
    fn explorer_selector_priority() {
        assert_eq!(
            explorer(&lp_tx(FeedKind::Explorer, &["0x0c49ccbe", "0x88316456"])),
            TxCategory::AddLiquidity
        );
        assert_eq!(
            explorer(&lp_tx(FeedKind::Explorer, &["0x0c49ccbe", "0xfc6f7865"])),
            TxCategory::RemoveLiquidity
        );
        assert_eq!(
            explorer(&lp_tx(FeedKind::Explorer, &["0xfc6f7865", "0x49404b7c", "0xdf2ab5bb"])),
            TxCategory::ClaimFees
        );
        assert_eq!(
            explorer(&lp_tx(FeedKind::Explorer, &["0xfc6f7865", "0xa9059cbb"])),
            TxCategory::Other
        );
    }

    #[test]
    fn explorer_ignores_hints_and_other_destinations() {
        let mut tx = lp_tx(FeedKind::Explorer, &["0x88316456"]);
        tx.method = Some("mint".to_string());
        assert_eq!(explorer(&tx), TxCategory::Other);

        let mut swap = RawTx::new(FeedKind::Explorer, "0x5", "hyper");
        swap.method = Some("exactInputSingle".to_string());
        assert_eq!(explorer(&swap), TxCategory::Other);
    }

    #[test]
    fn classifier_selected_by_feed() {
        let mut tx = lp_tx(FeedKind::Explorer, &["0x88316456"]);
        tx.sends = vec![mv(USDT0)];
        let tables = ProtocolTables::hyperevm();
        let tokens = TokenDict::new();
        let ctx = ClassifyContext {
            tokens: &tokens,
            tables: &tables,
            wallet: None,
        };
        assert_eq!(
            classifier_for(FeedKind::Explorer).classify(&tx, &ctx),
            TxCategory::AddLiquidity
        );
        assert_eq!(
            classifier_for(FeedKind::Portfolio).classify(&tx, &ctx),
            TxCategory::Other
        );
    }
}
