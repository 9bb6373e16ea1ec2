#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Allocation, AllocationReport, CURRENCY_SCALE, CostItem, EqualSplitComparison, ItemBreakdown,
    ItemShare, Modifier, ModifierKind, Money, MoneyError, NetBalance, Participant, ParticipantId,
    Settlement, Weight,
};
pub use services::{
    AllocationEngine, AllocationError, ModifierResolver, PayerPolicy, STANDARD_SHARE_REASONING,
    SettlementError, SettlementResolver,
};
