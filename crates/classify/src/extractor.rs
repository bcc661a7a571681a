use alloy::primitives::{Address, B256, U256};
use radar_core::modes::FeedKind;
use radar_core::utils::to_decimal;
use radar_core::{TokenAmount, TxCategory};
use radar_decode::{address_from_word, word_to_u256, InnerCall};
use tracing::trace;

use crate::classifier::ClassifyContext;
use crate::record::{RawTx, TokenMove};
use crate::tables::PositionManager;
use crate::tokens::{movement_usd_value, resolve_symbol, resolve_usd_value, token_key};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenFlows {
    pub tokens_in: Vec<TokenAmount>,
    pub tokens_out: Vec<TokenAmount>,
}

impl TokenFlows {
    pub fn is_empty(&self) -> bool {
        self.tokens_in.is_empty() && self.tokens_out.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowSource {
    TransferLog,
    Calldata,
    None,
}

pub trait FlowStrategy {
    fn name(&self) -> &'static str;
    fn extract(&self, tx: &RawTx, category: TxCategory, ctx: &ClassifyContext<'_>) -> TokenFlows;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransferLogStrategy;

#[derive(Debug, Clone, Copy, Default)]
pub struct CalldataStrategy;

impl FlowStrategy for TransferLogStrategy {
    fn name(&self) -> &'static str {
        "transfer_log"
    }

    fn extract(&self, tx: &RawTx, _category: TxCategory, ctx: &ClassifyContext<'_>) -> TokenFlows {
        match tx.feed {
            FeedKind::Portfolio => TokenFlows {
                tokens_in: movement_amounts(&tx.receives, ctx),
                tokens_out: movement_amounts(&tx.sends, ctx),
            },
            FeedKind::Explorer => transfer_amounts(tx, ctx),
        }
    }
}

fn movement_amounts(moves: &[TokenMove], ctx: &ClassifyContext<'_>) -> Vec<TokenAmount> {
    moves
        .iter()
        .filter(|m| !ctx.tokens.is_position(&m.token_id))
        .map(|m| {
            TokenAmount::new(
                resolve_symbol(&m.token_id, ctx.tokens),
                m.amount,
                movement_usd_value(m.amount, &m.token_id, ctx.tokens, m.price),
            )
        })
        .collect()
}

fn transfer_amounts(tx: &RawTx, ctx: &ClassifyContext<'_>) -> TokenFlows {
    let mut flows = TokenFlows::default();
    let Some(wallet) = ctx.wallet else {
        return flows;
    };
    for transfer in &tx.transfers {
        let Some(amount) = registered_amount(ctx, &transfer.token, transfer.value) else {
            continue;
        };
        if transfer.to == Some(wallet) {
            flows.tokens_in.push(amount.clone());
        }
        if transfer.from == Some(wallet) {
            flows.tokens_out.push(amount);
        }
    }
    flows
}

fn registered_amount(ctx: &ClassifyContext<'_>, token: &Address, raw: U256) -> Option<TokenAmount> {
    let known = ctx.tables.tokens.get(token)?;
    let amount = to_decimal(raw, known.decimals).to_f64();
    let usd_value = resolve_usd_value(amount, &token_key(token), ctx.tokens);
    Some(TokenAmount::new(known.symbol.clone(), amount, usd_value))
}

impl FlowStrategy for CalldataStrategy {
    fn name(&self) -> &'static str {
        "calldata"
    }

    fn extract(&self, tx: &RawTx, category: TxCategory, ctx: &ClassifyContext<'_>) -> TokenFlows {
        let mut flows = TokenFlows::default();
        let Some(manager) = ctx.tables.position_manager(tx.to.as_ref()) else {
            return flows;
        };

        match category {
            TxCategory::AddLiquidity => {
                flows.tokens_out = decode_deposit(tx, manager, ctx);
            }
            TxCategory::ClaimFees | TxCategory::RemoveLiquidity => {
                flows.tokens_in = decode_withdrawals(tx, manager, ctx);
            }
            _ => {}
        }
        flows
    }
}

fn decode_deposit(tx: &RawTx, manager: &PositionManager, ctx: &ClassifyContext<'_>) -> Vec<TokenAmount> {
    let Some(call) = tx
        .inner_calls
        .iter()
        .find(|call| ctx.tables.selectors.is_add(&call.selector))
    else {
        return Vec::new();
    };
    let words = call.words();
    if words.len() <= 6 {
        trace!(hash = %tx.hash, words = words.len(), "add call too short to decode");
        return Vec::new();
    }

    let named = (address_from_word(&words[0]), address_from_word(&words[1]));
    let pair = if ctx.tables.tokens.contains(&named.0) && ctx.tables.tokens.contains(&named.1) {
        Some(named)
    } else {
        manager.default_pair
    };
    let Some((token0, token1)) = pair else {
        return Vec::new();
    };

    [(token0, &words[5]), (token1, &words[6])]
        .into_iter()
        .filter_map(|(token, word)| registered_amount(ctx, &token, word_to_u256(word)))
        .collect()
}

fn decode_withdrawals(
    tx: &RawTx,
    manager: &PositionManager,
    ctx: &ClassifyContext<'_>,
) -> Vec<TokenAmount> {
    let selectors = &ctx.tables.selectors;
    let mut tokens_in = Vec::new();

    if let Some(words) = first_call_words(&tx.inner_calls, |call| call.selector == selectors.unwrap) {
        match words.first() {
            Some(word) => tokens_in.extend(registered_amount(
                ctx,
                &manager.wrapped_native,
                word_to_u256(word),
            )),
            None => trace!(hash = %tx.hash, "unwrap call has no arguments"),
        }
    }

    if let Some(words) = first_call_words(&tx.inner_calls, |call| call.selector == selectors.sweep) {
        if words.len() > 1 {
            let token = address_from_word(&words[0]);
            tokens_in.extend(registered_amount(ctx, &token, word_to_u256(&words[1])));
        } else {
            trace!(hash = %tx.hash, words = words.len(), "sweep call too short to decode");
        }
    }

    tokens_in
}

fn first_call_words(
    calls: &[InnerCall],
    matches: impl Fn(&InnerCall) -> bool,
) -> Option<Vec<B256>> {
    calls.iter().find(|call| matches(*call)).map(InnerCall::words)
}

pub fn extract_flows(
    tx: &RawTx,
    category: TxCategory,
    ctx: &ClassifyContext<'_>,
) -> (TokenFlows, FlowSource) {
    let logged = TransferLogStrategy.extract(tx, category, ctx);
    if !logged.is_empty() {
        return (logged, FlowSource::TransferLog);
    }
    let decoded = CalldataStrategy.extract(tx, category, ctx);
    if !decoded.is_empty() {
        trace!(hash = %tx.hash, strategy = CalldataStrategy.name(), "flows recovered from calldata");
        return (decoded, FlowSource::Calldata);
    }
    (TokenFlows::default(), FlowSource::None)
}
