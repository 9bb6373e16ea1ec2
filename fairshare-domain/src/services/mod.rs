pub mod allocation_engine;
pub mod modifier_resolver;
pub mod payer_policy;
pub mod penny_correction;
pub mod settlement_resolver;

pub use allocation_engine::{AllocationEngine, AllocationError, STANDARD_SHARE_REASONING};
pub use modifier_resolver::{ModifierResolver, ResolvedWeight};
pub use payer_policy::PayerPolicy;
pub use penny_correction::{WeightedSplit, split_by_weight, split_even};
pub use settlement_resolver::{SettlementError, SettlementResolver};
