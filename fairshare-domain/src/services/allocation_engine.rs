use crate::{
    model::{
        Allocation, AllocationReport, CostItem, EqualSplitComparison, ItemBreakdown, ItemShare,
        Modifier, Money, Participant, Weight,
    },
    services::{
        modifier_resolver::{ModifierResolver, ResolvedWeight},
        penny_correction::{split_by_weight, split_even},
    },
};
use indexmap::IndexSet;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

pub const STANDARD_SHARE_REASONING: &str = "Standard share.";
const REASON_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("at least one participant is required")]
    NoParticipants,
}

/// Weighted, item-by-item cost allocation service
pub struct AllocationEngine;

impl AllocationEngine {
    /// Allocate every item across the participants and total the shares.
    ///
    /// Each item is split independently using the weight of each
    /// participant's active modifier for that item, so a participant can be
    /// excluded from one item and still pay a standard share of the rest.
    ///
    /// # Returns
    /// One [`Allocation`] per participant, in participant order, whose shares
    /// sum exactly to the total of all items.
    pub fn allocate<'a>(
        &self,
        items: &[CostItem<'a>],
        participants: &[Participant<'a>],
        modifiers: &[Modifier<'_>],
    ) -> Result<AllocationReport<'a>, AllocationError> {
        if participants.is_empty() {
            return Err(AllocationError::NoParticipants);
        }

        let resolver = ModifierResolver::new(modifiers);
        let mut totals = vec![Money::ZERO; participants.len()];
        let mut ever_active = vec![false; participants.len()];
        let mut breakdowns = Vec::with_capacity(items.len());

        for item in items {
            let label_lower = item.label.to_lowercase();
            let resolved: Vec<ResolvedWeight<'_, '_>> = participants
                .iter()
                .map(|participant| resolver.resolve(participant.id, &label_lower))
                .collect();
            let weights: Vec<Weight> = resolved.iter().map(|entry| entry.weight).collect();
            let split = split_by_weight(item.amount, &weights);

            let distributed: Money = split.shares.iter().sum();
            if distributed != item.amount {
                tracing::error!(
                    item = item.id,
                    amount = %item.amount,
                    distributed = %distributed,
                    "Item shares do not sum to the item amount"
                );
            }
            assert_eq!(
                distributed, item.amount,
                "shares of item '{}' must sum to its amount",
                item.id
            );

            let mut shares = Vec::with_capacity(participants.len());
            for (idx, (participant, (entry, share))) in participants
                .iter()
                .zip(resolved.iter().zip(split.shares.iter().copied()))
                .enumerate()
            {
                totals[idx] += share;
                ever_active[idx] |= entry.modifier.is_some();
                shares.push(ItemShare {
                    participant: participant.id,
                    weight: entry.weight,
                    share,
                    modifier: entry.modifier.map(|modifier| modifier.kind),
                });
            }

            tracing::trace!(
                item = item.id,
                amount = %item.amount,
                equal_split_fallback = split.equal_split_fallback,
                "Item allocated"
            );

            breakdowns.push(ItemBreakdown {
                item: item.id,
                label: item.label,
                amount: item.amount,
                equal_split_fallback: split.equal_split_fallback,
                shares,
            });
        }

        let total: Money = items.iter().map(|item| item.amount).sum();
        let equal_shares = split_even(total, participants.len());

        let allocations: Vec<Allocation<'a>> = participants
            .iter()
            .zip(totals)
            .zip(ever_active)
            .zip(equal_shares)
            .map(|(((participant, share), active), equal_share)| Allocation {
                participant: participant.id,
                name: participant.name,
                share,
                share_percentage: share_percentage(share, total),
                reasoning: if active {
                    reasoning_text(participant, modifiers)
                } else {
                    STANDARD_SHARE_REASONING.to_string()
                },
                comparison: EqualSplitComparison {
                    equal_share,
                    savings: equal_share - share,
                },
            })
            .collect();

        tracing::debug!(
            item_count = items.len(),
            participant_count = participants.len(),
            modifier_count = modifiers.len(),
            total = %total,
            fallback_items = breakdowns
                .iter()
                .filter(|breakdown| breakdown.equal_split_fallback)
                .count(),
            "Allocation computed"
        );

        Ok(AllocationReport {
            total,
            allocations,
            breakdowns,
        })
    }
}

fn share_percentage(share: Money, total: Money) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (Decimal::from(share.minor_units()) * Decimal::ONE_HUNDRED
        / Decimal::from(total.minor_units()))
    .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Reasons of every modifier the participant holds, in input order and
/// without repeats.
fn reasoning_text(participant: &Participant<'_>, modifiers: &[Modifier<'_>]) -> String {
    let reasons: IndexSet<&str> = modifiers
        .iter()
        .filter(|modifier| modifier.participant.0 == participant.id.0)
        .map(|modifier| modifier.reason.trim())
        .filter(|reason| !reason.is_empty())
        .collect();
    if reasons.is_empty() {
        return STANDARD_SHARE_REASONING.to_string();
    }
    reasons.into_iter().collect::<Vec<_>>().join(REASON_SEPARATOR)
}
