use fairshare_domain::{
    Allocation, CostItem, ItemBreakdown, Modifier, ModifierKind, Money, NetBalance, Participant,
    ParticipantId, PayerPolicy, Settlement,
};
use rust_decimal::Decimal;
use serde::Serialize;

/// A participant together with the free-form tags describing them
/// (e.g. "Student", "Arrived late").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantProfile<'a> {
    pub participant: Participant<'a>,
    pub tags: Vec<&'a str>,
}

/// One decoded split request. Every string borrows from the caller's buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SplitRequest<'a> {
    pub title: Option<&'a str>,
    pub currency: Option<&'a str>,
    /// Plan category such as "dinner" or "trip"; only used for inference.
    pub category: Option<&'a str>,
    /// Overrides the processor's default payer policy for this request.
    pub payer_policy: Option<PayerPolicy>,
    pub items: Vec<CostItem<'a>>,
    pub participants: Vec<ParticipantProfile<'a>>,
    /// Explicit modifiers, in input order.
    pub modifiers: Vec<Modifier<'a>>,
}

impl<'a> SplitRequest<'a> {
    pub fn participants(&self) -> Vec<Participant<'a>> {
        self.participants
            .iter()
            .map(|profile| profile.participant)
            .collect()
    }

    pub fn has_explicit_modifiers(&self, participant: ParticipantId<'_>) -> bool {
        self.modifiers
            .iter()
            .any(|modifier| modifier.participant.0 == participant.0)
    }
}

/// Modifier produced by an inference collaborator. Owns its strings because
/// they do not come from the request buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InferredModifier {
    pub participant: String,
    pub kind: ModifierKind,
    pub value: Option<Decimal>,
    pub targets: Vec<String>,
    pub reason: String,
}

impl InferredModifier {
    pub fn as_modifier(&self) -> Modifier<'_> {
        Modifier {
            participant: ParticipantId(&self.participant),
            kind: self.kind,
            value: self.value,
            targets: self.targets.iter().map(String::as_str).collect(),
            reason: &self.reason,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitOutcome<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<&'a str>,
    pub total_amount: Money,
    #[serde(rename = "split")]
    pub allocations: Vec<Allocation<'a>>,
    pub settlements: Vec<Settlement<'a>>,
    pub balances: Vec<NetBalance<'a>>,
    pub breakdowns: Vec<ItemBreakdown<'a>>,
    /// Number of modifiers supplied by inference rather than the request.
    pub inferred_modifiers: usize,
}
