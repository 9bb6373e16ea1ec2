use crate::{
    model::{Allocation, CostItem, Money, NetBalance, Participant, ParticipantId, Settlement},
    services::PayerPolicy,
};
use fxhash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError<'a> {
    #[error("item '{item}' has no payer among the participants")]
    UnattributedItem { item: &'a str },
}

/// Greedy debtor/creditor matching over net balances
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettlementResolver {
    payer_policy: PayerPolicy,
    tolerance: Money,
}

struct OpenPosition<'a> {
    participant: ParticipantId<'a>,
    name: &'a str,
    // magnitude still to be paid or received
    remaining: Money,
}

impl SettlementResolver {
    pub fn new(payer_policy: PayerPolicy) -> Self {
        Self {
            payer_policy,
            tolerance: Money::ZERO,
        }
    }

    /// Balances whose magnitude is at most `tolerance` count as settled.
    pub fn with_tolerance(mut self, tolerance: Money) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    pub fn payer_policy(&self) -> PayerPolicy {
        self.payer_policy
    }

    pub fn tolerance(&self) -> Money {
        self.tolerance
    }

    /// Net position of every participant: what they paid up front minus
    /// their allocated share.
    pub fn net_balances<'a>(
        &self,
        items: &[CostItem<'a>],
        allocations: &[Allocation<'a>],
        participants: &[Participant<'a>],
    ) -> Result<Vec<NetBalance<'a>>, SettlementError<'a>> {
        let mut paid = vec![Money::ZERO; participants.len()];
        for item in items {
            let payer = self
                .payer_policy
                .resolve_payer(item, participants)
                .ok_or(SettlementError::UnattributedItem { item: item.id })?;
            paid[payer] += item.amount;
        }

        let mut owed: FxHashMap<ParticipantId<'a>, Money> = FxHashMap::default();
        for allocation in allocations {
            *owed.entry(allocation.participant).or_default() += allocation.share;
        }

        Ok(participants
            .iter()
            .zip(paid)
            .map(|(participant, paid)| {
                let owed = owed.get(&participant.id).copied().unwrap_or_default();
                NetBalance {
                    participant: participant.id,
                    name: participant.name,
                    paid,
                    owed,
                    balance: paid - owed,
                }
            })
            .collect())
    }

    /// Compute the transfers that bring every participant back to zero.
    ///
    /// # Panics
    /// If the balances do not sum to zero within the tolerance. That can only
    /// happen when the allocation does not cover the item total, which is a
    /// defect upstream rather than bad input.
    pub fn settle<'a>(
        &self,
        items: &[CostItem<'a>],
        allocations: &[Allocation<'a>],
        participants: &[Participant<'a>],
    ) -> Result<Vec<Settlement<'a>>, SettlementError<'a>> {
        let balances = self.net_balances(items, allocations, participants)?;
        Ok(self.match_balances(&balances))
    }

    /// Greedy matching: the largest debtor pays the largest creditor until
    /// one side is exhausted. Produces at most `debtors + creditors - 1`
    /// transfers.
    pub fn match_balances<'a>(&self, balances: &[NetBalance<'a>]) -> Vec<Settlement<'a>> {
        let total_credit: Money = balances
            .iter()
            .filter(|entry| entry.balance > Money::ZERO)
            .map(|entry| entry.balance)
            .sum();
        let total_debit: Money = balances
            .iter()
            .filter(|entry| entry.balance.is_negative())
            .map(|entry| entry.balance.abs())
            .sum();
        let imbalance = (total_credit - total_debit).abs();
        if imbalance > self.tolerance {
            tracing::error!(
                total_credit = %total_credit,
                total_debit = %total_debit,
                tolerance = %self.tolerance,
                member_count = balances.len(),
                "Net balances do not conserve; allocation does not match the item total"
            );
        }
        assert!(
            imbalance <= self.tolerance,
            "net balances must sum to zero (credit {total_credit}, debit {total_debit})"
        );

        // Positions within the tolerance stay in the lists, behind the larger
        // ones, so a residue above the tolerance can still be absorbed by them.
        let mut debtors: Vec<OpenPosition<'a>> = balances
            .iter()
            .filter(|entry| entry.balance.is_negative())
            .map(|entry| OpenPosition {
                participant: entry.participant,
                name: entry.name,
                remaining: entry.balance.abs(),
            })
            .collect();
        let mut creditors: Vec<OpenPosition<'a>> = balances
            .iter()
            .filter(|entry| entry.balance > Money::ZERO)
            .map(|entry| OpenPosition {
                participant: entry.participant,
                name: entry.name,
                remaining: entry.balance,
            })
            .collect();

        // stable sorts: equal balances keep participant order
        debtors.sort_by(|lhs, rhs| rhs.remaining.cmp(&lhs.remaining));
        creditors.sort_by(|lhs, rhs| rhs.remaining.cmp(&lhs.remaining));

        let mut settlements = Vec::new();
        let (mut debtor_idx, mut creditor_idx) = (0, 0);
        while debtor_idx < debtors.len() && creditor_idx < creditors.len() {
            let debtor = &mut debtors[debtor_idx];
            let creditor = &mut creditors[creditor_idx];
            if debtor.remaining <= self.tolerance && creditor.remaining <= self.tolerance {
                break;
            }
            let amount = debtor.remaining.min(creditor.remaining);

            settlements.push(Settlement {
                debtor: debtor.participant,
                creditor: creditor.participant,
                from: debtor.name,
                to: creditor.name,
                amount,
            });

            debtor.remaining -= amount;
            creditor.remaining -= amount;

            if debtor.remaining <= self.tolerance {
                debtor_idx += 1;
            }
            if creditor.remaining <= self.tolerance {
                creditor_idx += 1;
            }
        }

        debug_assert!(
            settlements.len() <= (debtors.len() + creditors.len()).saturating_sub(1),
            "greedy matching exceeded its transfer bound"
        );
        tracing::debug!(
            debtor_count = debtors.len(),
            creditor_count = creditors.len(),
            transfer_count = settlements.len(),
            "Settlements resolved"
        );

        settlements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EqualSplitComparison;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    #[fixture]
    fn resolver() -> SettlementResolver {
        SettlementResolver::default()
    }

    fn participants(ids: &[&'static str]) -> Vec<Participant<'static>> {
        ids.iter()
            .map(|id| Participant {
                id: ParticipantId(id),
                name: id,
            })
            .collect()
    }

    fn allocation(id: &'static str, minor: i64) -> Allocation<'static> {
        Allocation {
            participant: ParticipantId(id),
            name: id,
            share: Money::from_minor(minor),
            share_percentage: Decimal::ZERO,
            reasoning: String::new(),
            comparison: EqualSplitComparison {
                equal_share: Money::ZERO,
                savings: Money::ZERO,
            },
        }
    }

    fn paid_item(
        id: &'static str,
        minor: i64,
        payer: Option<&'static str>,
    ) -> CostItem<'static> {
        CostItem {
            id,
            label: id,
            amount: Money::from_minor(minor),
            payer: payer.map(ParticipantId),
        }
    }

    fn transfers(settlements: &[Settlement<'_>]) -> Vec<(String, String, i64)> {
        settlements
            .iter()
            .map(|settlement| {
                (
                    settlement.from.to_string(),
                    settlement.to.to_string(),
                    settlement.amount.minor_units(),
                )
            })
            .collect()
    }

    fn balance(id: &'static str, minor: i64) -> NetBalance<'static> {
        NetBalance {
            participant: ParticipantId(id),
            name: id,
            paid: Money::ZERO,
            owed: Money::ZERO,
            balance: Money::from_minor(minor),
        }
    }

    #[rstest]
    fn single_payer_is_reimbursed_by_everyone(resolver: SettlementResolver) {
        let settlements = resolver
            .settle(
                &[paid_item("dinner", 9_000, Some("A"))],
                &[
                    allocation("A", 3_000),
                    allocation("B", 3_000),
                    allocation("C", 3_000),
                ],
                &participants(&["A", "B", "C"]),
            )
            .expect("settlement should succeed");

        assert_eq!(
            transfers(&settlements),
            vec![
                ("B".to_string(), "A".to_string(), 3_000),
                ("C".to_string(), "A".to_string(), 3_000),
            ]
        );
    }

    #[rstest]
    #[case::simple_pair(
        vec![balance("A", 100), balance("B", -100)],
        vec![("B", "A", 100)]
    )]
    #[case::all_settled(vec![balance("A", 0), balance("B", 0)], vec![])]
    #[case::largest_first(
        vec![balance("A", 50), balance("B", 150), balance("C", -120), balance("D", -80)],
        vec![("C", "B", 120), ("D", "B", 30), ("D", "A", 50)]
    )]
    #[case::one_creditor_many_debtors(
        vec![balance("A", -50), balance("B", 100), balance("C", -50)],
        vec![("A", "B", 50), ("C", "B", 50)]
    )]
    #[case::chain_is_collapsed(
        vec![balance("A", -30), balance("B", 0), balance("C", 30)],
        vec![("A", "C", 30)]
    )]
    fn match_balances_cases(
        resolver: SettlementResolver,
        #[case] balances: Vec<NetBalance<'static>>,
        #[case] expected: Vec<(&str, &str, i64)>,
    ) {
        let settlements = resolver.match_balances(&balances);
        let expected: Vec<(String, String, i64)> = expected
            .into_iter()
            .map(|(from, to, amount)| (from.to_string(), to.to_string(), amount))
            .collect();
        assert_eq!(transfers(&settlements), expected);
    }

    #[rstest]
    fn missing_payer_credits_first_participant(resolver: SettlementResolver) {
        let balances = resolver
            .net_balances(
                &[paid_item("taxi", 2_000, None)],
                &[allocation("A", 1_000), allocation("B", 1_000)],
                &participants(&["A", "B"]),
            )
            .expect("balances should resolve");

        assert_eq!(balances[0].paid, Money::from_minor(2_000));
        assert_eq!(balances[0].balance, Money::from_minor(1_000));
        assert_eq!(balances[1].balance, Money::from_minor(-1_000));
    }

    #[test]
    fn require_explicit_rejects_missing_payer() {
        let resolver = SettlementResolver::new(PayerPolicy::RequireExplicit);
        let result = resolver.settle(
            &[paid_item("taxi", 2_000, None)],
            &[allocation("A", 1_000), allocation("B", 1_000)],
            &participants(&["A", "B"]),
        );

        assert_eq!(result, Err(SettlementError::UnattributedItem { item: "taxi" }));
    }

    #[test]
    fn tolerance_skips_single_cent_balances() {
        let resolver = SettlementResolver::default().with_tolerance(Money::from_minor(1));
        let settlements = resolver.match_balances(&[
            balance("A", 1),
            balance("B", -1),
            balance("C", 500),
            balance("D", -500),
        ]);

        assert_eq!(
            transfers(&settlements),
            vec![("D".to_string(), "C".to_string(), 500)]
        );
    }

    #[rstest]
    #[case::creditors_all_within_tolerance(
        vec![balance("A", 1), balance("B", 1), balance("C", -2)],
        vec![("C", "A", 1)]
    )]
    #[case::debtors_all_within_tolerance(
        vec![balance("A", -1), balance("B", -1), balance("C", -1), balance("D", 3)],
        vec![("A", "D", 1), ("B", "D", 1)]
    )]
    #[case::residue_after_large_transfer(
        vec![balance("A", 300), balance("B", -298), balance("C", -1), balance("D", -1)],
        vec![("B", "A", 298), ("C", "A", 1)]
    )]
    fn tolerance_keeps_every_participant_within_one_cent(
        #[case] balances: Vec<NetBalance<'static>>,
        #[case] expected: Vec<(&str, &str, i64)>,
    ) {
        let resolver = SettlementResolver::default().with_tolerance(Money::from_minor(1));
        let settlements = resolver.match_balances(&balances);

        let expected: Vec<(String, String, i64)> = expected
            .into_iter()
            .map(|(from, to, amount)| (from.to_string(), to.to_string(), amount))
            .collect();
        assert_eq!(transfers(&settlements), expected);

        for entry in &balances {
            let received: i64 = settlements
                .iter()
                .filter(|settlement| settlement.creditor == entry.participant)
                .map(|settlement| settlement.amount.minor_units())
                .sum();
            let paid: i64 = settlements
                .iter()
                .filter(|settlement| settlement.debtor == entry.participant)
                .map(|settlement| settlement.amount.minor_units())
                .sum();
            let unreconciled = entry.balance.minor_units() - (received - paid);
            assert!(
                unreconciled.abs() <= 1,
                "{} is off by {unreconciled}",
                entry.name
            );
        }
    }

    #[rstest]
    #[should_panic(expected = "net balances must sum to zero")]
    fn imbalanced_allocation_panics(resolver: SettlementResolver) {
        let _ = resolver.settle(
            &[paid_item("dinner", 9_000, Some("A"))],
            &[allocation("A", 3_000), allocation("B", 3_000)],
            &participants(&["A", "B"]),
        );
    }
}
