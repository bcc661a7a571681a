use std::collections::HashSet;
use std::hash::Hash;

use crate::types::ClassifiedTx;

#[derive(Debug, Default)]
pub struct SeenSet<K> {
    seen: HashSet<K>,
}

impl<K> SeenSet<K>
where
    K: Hash + Eq,
{
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    pub fn check_and_insert(&mut self, key: K) -> bool {
        self.seen.insert(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct TxLedger {
    seen: SeenSet<String>,
    txs: Vec<ClassifiedTx>,
}

impl TxLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of duplicates that were dropped.
    pub fn merge(&mut self, page: impl IntoIterator<Item = ClassifiedTx>) -> usize {
        let mut duplicates = 0;
        for tx in page {
            if self.seen.check_and_insert(tx.hash.clone()) {
                self.txs.push(tx);
            } else {
                duplicates += 1;
            }
        }
        duplicates
    }

    pub fn len(&self) -> usize {
        self.txs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }

    pub fn txs(&self) -> &[ClassifiedTx] {
        &self.txs
    }

    pub fn into_txs(self) -> Vec<ClassifiedTx> {
        self.txs
    }
}

pub fn merge_by_hash(
    existing: Vec<ClassifiedTx>,
    incoming: impl IntoIterator<Item = ClassifiedTx>,
) -> Vec<ClassifiedTx> {
    let mut ledger = TxLedger::new();
    ledger.merge(existing);
    ledger.merge(incoming);
    ledger.into_txs()
}
