use crate::text_table::{Alignment, TextTableBuilder};
use fairshare_application::SplitOutcome;
use fairshare_domain::{Allocation, ItemBreakdown, Money};
use fairshare_i18n as i18n;
use rust_decimal::Decimal;
use std::borrow::Cow;

pub struct AllocationPresenter;

pub struct AllocationView {
    pub allocation_table: String,
    pub breakdown_table: String,
    pub summary: String,
}

impl AllocationPresenter {
    pub fn render(outcome: &SplitOutcome<'_>) -> AllocationView {
        AllocationView {
            allocation_table: Self::build_allocation_table(
                &outcome.allocations,
                outcome.total_amount,
            ),
            breakdown_table: Self::build_breakdown_table(
                &outcome.breakdowns,
                &outcome.allocations,
            ),
            summary: summary_line(outcome),
        }
    }

    pub fn build_allocation_table(allocations: &[Allocation<'_>], total: Money) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
                Alignment::Left,
            ])
            .headers(&[
                Cow::Borrowed(i18n::PARTICIPANT),
                Cow::Borrowed(i18n::SHARE),
                Cow::Borrowed(i18n::PERCENTAGE),
                Cow::Borrowed(i18n::EQUAL_SHARE),
                Cow::Borrowed(i18n::SAVINGS),
                Cow::Borrowed(i18n::REASONING),
            ]);

        for allocation in allocations {
            builder = builder.row([
                Cow::Borrowed(allocation.name),
                Cow::Owned(allocation.share.to_string()),
                Cow::Owned(format_percentage(allocation.share_percentage)),
                Cow::Owned(allocation.comparison.equal_share.to_string()),
                Cow::Owned(format_signed(allocation.comparison.savings)),
                Cow::Borrowed(allocation.reasoning.as_str()),
            ]);
        }

        builder
            .row([
                Cow::Borrowed(i18n::TOTAL),
                Cow::Owned(total.to_string()),
                Cow::Borrowed("100%"),
                Cow::Borrowed(""),
                Cow::Borrowed(""),
                Cow::Borrowed(""),
            ])
            .build()
    }

    /// One row per item and participant with the resolved weight.
    pub fn build_breakdown_table(
        breakdowns: &[ItemBreakdown<'_>],
        allocations: &[Allocation<'_>],
    ) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(i18n::ITEM),
                Cow::Borrowed(i18n::PARTICIPANT),
                Cow::Borrowed(i18n::WEIGHT),
                Cow::Borrowed(i18n::SHARE),
            ]);

        for breakdown in breakdowns {
            let item_label = if breakdown.equal_split_fallback {
                Cow::Owned(format!("{} {}", breakdown.label, i18n::EQUAL_SPLIT_FALLBACK))
            } else {
                Cow::Borrowed(breakdown.label)
            };
            for (idx, share) in breakdown.shares.iter().enumerate() {
                let name = allocations
                    .iter()
                    .find(|allocation| allocation.participant == share.participant)
                    .map_or(share.participant.0, |allocation| allocation.name);
                builder = builder.row([
                    if idx == 0 {
                        item_label.clone()
                    } else {
                        Cow::Borrowed("")
                    },
                    Cow::Borrowed(name),
                    Cow::Owned(share.weight.to_string()),
                    Cow::Owned(share.share.to_string()),
                ]);
            }
        }

        builder.build()
    }
}

pub fn summary_line(outcome: &SplitOutcome<'_>) -> String {
    i18n::split_summary(
        outcome.title.unwrap_or(i18n::ALLOCATION_HEADING),
        outcome.total_amount,
        outcome.allocations.len(),
        outcome.settlements.len(),
    )
}

/// `33.3` becomes `33.3%`, `100.0` becomes `100%`.
pub fn format_percentage(percentage: Decimal) -> String {
    format!("{}%", percentage.normalize())
}

pub fn format_signed(amount: Money) -> String {
    if amount.is_negative() {
        amount.to_string()
    } else {
        format!("+{amount}")
    }
}
