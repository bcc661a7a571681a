pub mod grouper;

pub use grouper::{group_lp_history, group_with_summary, GroupSummary};
