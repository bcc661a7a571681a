use radar_core::{ClassifiedTx, LpGroup, TxCategory};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub groups: usize,
    pub active: usize,
    pub closed: usize,
    pub orphan_claims: usize,
    pub orphan_removes: usize,
}

impl GroupSummary {
    pub fn of(groups: &[LpGroup]) -> Self {
        let active = groups.iter().filter(|group| group.is_active()).count();
        Self {
            groups: groups.len(),
            active,
            closed: groups.len() - active,
            ..Self::default()
        }
    }
}

/// Stitches LP transactions into lifecycles, newest first.
///
/// Claims and removes attach to the most recently opened group that is still
/// open on the same chain and project. Ones with no such group are dropped.
pub fn group_lp_history(txs: Vec<ClassifiedTx>) -> Vec<LpGroup> {
    group_with_summary(txs).0
}

pub fn group_with_summary(mut txs: Vec<ClassifiedTx>) -> (Vec<LpGroup>, GroupSummary) {
    txs.sort_by_key(|tx| tx.time);

    let mut groups: Vec<LpGroup> = Vec::new();
    // Indices into `groups`, in opening order.
    let mut open: Vec<usize> = Vec::new();
    let mut orphan_claims = 0;
    let mut orphan_removes = 0;

    for tx in txs {
        match tx.category {
            TxCategory::AddLiquidity => {
                open.push(groups.len());
                groups.push(LpGroup::open(tx));
            }
            TxCategory::ClaimFees => match latest_open(&groups, &open, &tx) {
                Some(slot) => groups[open[slot]].claim_txs.push(tx),
                None => {
                    debug!(hash = %tx.hash, chain = %tx.chain, "claim without open position");
                    orphan_claims += 1;
                }
            },
            TxCategory::RemoveLiquidity => match latest_open(&groups, &open, &tx) {
                Some(slot) => {
                    let group = &mut groups[open.remove(slot)];
                    group.closed_at = Some(tx.time);
                    group.remove_tx = Some(tx);
                }
                None => {
                    debug!(hash = %tx.hash, chain = %tx.chain, "remove without open position");
                    orphan_removes += 1;
                }
            },
            _ => {}
        }
    }

    groups.sort_by(|a, b| b.opened_at.cmp(&a.opened_at));

    let summary = GroupSummary {
        orphan_claims,
        orphan_removes,
        ..GroupSummary::of(&groups)
    };
    info!(
        groups = summary.groups,
        active = summary.active,
        closed = summary.closed,
        orphan_claims,
        orphan_removes,
        "lp history grouped"
    );
    (groups, summary)
}

fn latest_open(groups: &[LpGroup], open: &[usize], tx: &ClassifiedTx) -> Option<usize> {
    open.iter().rposition(|&index| groups[index].matches(tx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn tx(hash: &str, category: TxCategory, secs: i64) -> ClassifiedTx {
        tx_on(hash, category, secs, "hyper", Some("hyper_prjx"))
    }

    fn tx_on(
        hash: &str,
        category: TxCategory,
        secs: i64,
        chain: &str,
        project: Option<&str>,
    ) -> ClassifiedTx {
        ClassifiedTx {
            hash: hash.to_string(),
            chain: chain.to_string(),
            project_id: project.map(str::to_string),
            category,
            label: category.label(),
            time: DateTime::from_timestamp(secs, 0).unwrap(),
            scam: false,
            gas_usd: None,
            tokens_in: Vec::new(),
            tokens_out: Vec::new(),
        }
    }

    fn hashes(txs: &[ClassifiedTx]) -> Vec<&str> {
        txs.iter().map(|tx| tx.hash.as_str()).collect()
    }

    #[test]
    fn claim_attaches_to_latest_open_group() {
        let groups = group_lp_history(vec![
            tx("0xc", TxCategory::ClaimFees, 30),
            tx("0xa", TxCategory::AddLiquidity, 10),
            tx("0xb", TxCategory::AddLiquidity, 20),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].add_tx.hash, "0xb");
        assert_eq!(hashes(&groups[0].claim_txs), vec!["0xc"]);
        assert!(groups[1].claim_txs.is_empty());
    }

    #[test]
    fn remove_closes_latest_and_next_claim_falls_back() {
        let (groups, summary) = group_with_summary(vec![
            tx("0xa", TxCategory::AddLiquidity, 10),
            tx("0xb", TxCategory::AddLiquidity, 20),
            tx("0xr", TxCategory::RemoveLiquidity, 30),
            tx("0xc", TxCategory::ClaimFees, 40),
        ]);
        let newest = &groups[0];
        assert_eq!(newest.add_tx.hash, "0xb");
        assert_eq!(newest.remove_tx.as_ref().map(|tx| tx.hash.as_str()), Some("0xr"));
        assert_eq!(newest.closed_at, DateTime::from_timestamp(30, 0));
        assert!(!newest.is_active());

        let oldest = &groups[1];
        assert!(oldest.is_active());
        assert_eq!(hashes(&oldest.claim_txs), vec!["0xc"]);

        assert_eq!(
            summary,
            GroupSummary {
                groups: 2,
                active: 1,
                closed: 1,
                orphan_claims: 0,
                orphan_removes: 0,
            }
        );
    }

    #[test]
    fn orphans_do_not_create_groups() {
        let (groups, summary) = group_with_summary(vec![
            tx("0xc", TxCategory::ClaimFees, 5),
            tx("0xr", TxCategory::RemoveLiquidity, 6),
            tx("0xa", TxCategory::AddLiquidity, 10),
            tx("0xr2", TxCategory::RemoveLiquidity, 11),
            tx("0xr3", TxCategory::RemoveLiquidity, 12),
        ]);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].claim_txs.is_empty());
        assert_eq!(groups[0].remove_tx.as_ref().map(|tx| tx.hash.as_str()), Some("0xr2"));
        assert_eq!(summary.orphan_claims, 1);
        assert_eq!(summary.orphan_removes, 2);
    }

    #[test]
    fn matching_is_scoped_to_chain_and_project() {
        let groups = group_lp_history(vec![
            tx_on("0xa", TxCategory::AddLiquidity, 10, "hyper", Some("hyper_prjx")),
            tx_on("0xb", TxCategory::AddLiquidity, 20, "arb", Some("uniswap3")),
            tx_on("0xc", TxCategory::ClaimFees, 30, "hyper", Some("hyper_prjx")),
            tx_on("0xd", TxCategory::ClaimFees, 40, "hyper", None),
        ]);
        let prjx = groups.iter().find(|g| g.add_tx.hash == "0xa").unwrap();
        let arb = groups.iter().find(|g| g.add_tx.hash == "0xb").unwrap();
        assert_eq!(hashes(&prjx.claim_txs), vec!["0xc"]);
        assert!(arb.claim_txs.is_empty());
        assert_eq!(prjx.id, "hyper-hyper_prjx-0xa");
    }

    #[test]
    fn output_is_newest_first_and_ignores_other_categories() {
        let groups = group_lp_history(vec![
            tx("0x1", TxCategory::AddLiquidity, 100),
            tx("0xs", TxCategory::Swap, 150),
            tx("0x2", TxCategory::AddLiquidity, 300),
            tx("0x3", TxCategory::AddLiquidity, 200),
            tx("0xo", TxCategory::Other, 400),
        ]);
        let opened: Vec<i64> = groups.iter().map(|g| g.opened_at.timestamp()).collect();
        assert_eq!(opened, vec![300, 200, 100]);
        assert!(groups.windows(2).all(|w| w[0].opened_at > w[1].opened_at));
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let (groups, summary) = group_with_summary(Vec::new());
        assert!(groups.is_empty());
        assert_eq!(summary, GroupSummary::default());
    }
}
