use crate::{
    error::InferenceError,
    model::{InferredModifier, ParticipantProfile},
};
use fairshare_domain::{Allocation, CostItem, Money, Settlement};

/// What an inference collaborator may look at when proposing modifiers.
#[derive(Clone, Copy, Debug)]
pub struct InferenceContext<'r, 'a> {
    pub title: Option<&'a str>,
    pub category: Option<&'a str>,
    pub items: &'r [CostItem<'a>],
    /// Only participants without explicit modifiers.
    pub participants: &'r [&'r ParticipantProfile<'a>],
}

/// Proposes weighting modifiers for participants, e.g. from their tags.
pub trait ModifierInference: Send + Sync {
    fn infer(
        &self,
        context: &InferenceContext<'_, '_>,
    ) -> Result<Vec<InferredModifier>, InferenceError>;
}

/// Computed result handed to an audit sink after every successful split.
#[derive(Clone, Copy, Debug)]
pub struct AuditRecord<'r, 'a> {
    pub title: Option<&'a str>,
    pub total: Money,
    pub item_count: usize,
    pub modifier_count: usize,
    pub inferred_modifier_count: usize,
    pub fallback_item_count: usize,
    pub allocations: &'r [Allocation<'a>],
    pub settlements: &'r [Settlement<'a>],
}

/// Records computed splits. Sinks handle their own failures.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: &AuditRecord<'_, '_>);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _record: &AuditRecord<'_, '_>) {}
}
