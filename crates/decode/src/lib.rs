pub mod abi;
pub mod calldata;
pub mod selectors;

pub use calldata::{
    address_from_word,
    decode_multicall,
    parse_inner_calls,
    selectors_of,
    split_words,
    word_to_u256,
    InnerCall,
};
pub use selectors::{parse_selector, LpAction, SelectorTables};
