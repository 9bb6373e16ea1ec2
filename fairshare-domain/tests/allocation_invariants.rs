use fairshare_domain::{
    AllocationEngine, CostItem, Modifier, ModifierKind, Money, Participant, ParticipantId,
    SettlementResolver,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

const IDS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];
const LABELS: [&str; 5] = ["Steak", "Salad", "Hotel Night 1", "Hotel Night 2", "Wine"];
const TARGETS: [&str; 4] = ["steak", "hotel", "WINE", "night 2"];

fn participants(count: usize) -> Vec<Participant<'static>> {
    IDS[..count]
        .iter()
        .map(|id| Participant {
            id: ParticipantId(id),
            name: id,
        })
        .collect()
}

fn items(amounts: &[i64], payers: &[usize], count: usize) -> Vec<CostItem<'static>> {
    amounts
        .iter()
        .enumerate()
        .map(|(idx, amount)| CostItem {
            id: LABELS[idx % LABELS.len()],
            label: LABELS[idx % LABELS.len()],
            amount: Money::from_minor(*amount),
            payer: payers
                .get(idx)
                .map(|payer| ParticipantId(IDS[payer % count])),
        })
        .collect()
}

fn kind(tag: u8) -> ModifierKind {
    match tag % 4 {
        0 => ModifierKind::Standard,
        1 => ModifierKind::Exclude,
        2 => ModifierKind::Partial,
        _ => ModifierKind::Premium,
    }
}

fn modifiers(
    specs: &[(usize, u8, Option<i64>, Option<usize>)],
    count: usize,
) -> Vec<Modifier<'static>> {
    specs
        .iter()
        .map(|(participant, tag, value, target)| Modifier {
            participant: ParticipantId(IDS[participant % count]),
            kind: kind(*tag),
            value: value.map(|value| Decimal::new(value, 2)),
            targets: target
                .map(|target| vec![TARGETS[target % TARGETS.len()]])
                .unwrap_or_default(),
            reason: "generated",
        })
        .collect()
}

proptest! {
    #[test]
    fn shares_sum_to_total_and_are_non_negative(
        count in 1usize..=6,
        amounts in prop::collection::vec(0i64..=1_000_000, 0..=8),
        specs in prop::collection::vec(
            (0usize..6, any::<u8>(), prop::option::of(-500i64..=500), prop::option::of(0usize..4)),
            0..=10,
        ),
    ) {
        let people = participants(count);
        let items = items(&amounts, &[], count);
        let modifiers = modifiers(&specs, count);

        let report = AllocationEngine
            .allocate(&items, &people, &modifiers)
            .expect("allocation should succeed");

        let total: i64 = amounts.iter().sum();
        prop_assert_eq!(report.allocated_total().minor_units(), total);
        for allocation in &report.allocations {
            prop_assert!(!allocation.share.is_negative());
        }
        for breakdown in &report.breakdowns {
            let item_total: Money = breakdown.shares.iter().map(|share| share.share).sum();
            prop_assert_eq!(item_total, breakdown.amount);
            for share in &breakdown.shares {
                prop_assert!(share.weight.value() >= Decimal::ZERO);
            }
        }
    }

    #[test]
    fn no_modifiers_split_each_item_evenly(
        count in 1usize..=6,
        amounts in prop::collection::vec(0i64..=1_000_000, 1..=8),
    ) {
        let people = participants(count);
        let items = items(&amounts, &[], count);

        let report = AllocationEngine
            .allocate(&items, &people, &[])
            .expect("allocation should succeed");

        for breakdown in &report.breakdowns {
            let shares: Vec<i64> = breakdown
                .shares
                .iter()
                .map(|share| share.share.minor_units())
                .collect();
            let max = shares.iter().copied().max().unwrap_or(0);
            let min = shares.iter().copied().min().unwrap_or(0);
            prop_assert!(max - min <= 1);
        }
    }

    #[test]
    fn allocation_is_deterministic(
        count in 1usize..=6,
        amounts in prop::collection::vec(0i64..=1_000_000, 0..=8),
        specs in prop::collection::vec(
            (0usize..6, any::<u8>(), prop::option::of(0i64..=500), prop::option::of(0usize..4)),
            0..=10,
        ),
    ) {
        let people = participants(count);
        let items = items(&amounts, &[], count);
        let modifiers = modifiers(&specs, count);

        let first = AllocationEngine.allocate(&items, &people, &modifiers);
        let second = AllocationEngine.allocate(&items, &people, &modifiers);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn settlements_conserve_balances(
        count in 1usize..=6,
        amounts in prop::collection::vec(0i64..=1_000_000, 0..=8),
        payers in prop::collection::vec(0usize..6, 0..=8),
        specs in prop::collection::vec(
            (0usize..6, any::<u8>(), prop::option::of(0i64..=500), prop::option::of(0usize..4)),
            0..=10,
        ),
    ) {
        let people = participants(count);
        let items = items(&amounts, &payers, count);
        let modifiers = modifiers(&specs, count);
        let resolver = SettlementResolver::default();

        let report = AllocationEngine
            .allocate(&items, &people, &modifiers)
            .expect("allocation should succeed");
        let balances = resolver
            .net_balances(&items, &report.allocations, &people)
            .expect("balances should resolve");
        let settlements = resolver.match_balances(&balances);

        let mut received: HashMap<&str, i64> = HashMap::new();
        for settlement in &settlements {
            prop_assert!(settlement.amount > Money::ZERO);
            prop_assert_ne!(settlement.debtor, settlement.creditor);
            // net amount received per participant
            *received.entry(settlement.debtor.0).or_default() -= settlement.amount.minor_units();
            *received.entry(settlement.creditor.0).or_default() += settlement.amount.minor_units();
        }

        let open_positions = balances.iter().filter(|entry| !entry.balance.is_zero()).count();
        prop_assert!(settlements.len() <= open_positions.saturating_sub(1));

        for entry in &balances {
            let transferred = received.get(entry.participant.0).copied().unwrap_or(0);
            prop_assert_eq!(entry.balance.minor_units(), transferred);
        }
    }
}
