use crate::{
    allocation_presenter::format_signed,
    text_table::{Alignment, TextTableBuilder},
};
use fairshare_application::SplitOutcome;
use fairshare_domain::{NetBalance, Settlement};
use fairshare_i18n as i18n;
use std::borrow::Cow;

pub struct SettlementPresenter;

pub struct SettlementView {
    pub balance_table: String,
    /// `None` when nobody owes anybody.
    pub transfer_table: Option<String>,
}

impl SettlementPresenter {
    pub fn render(outcome: &SplitOutcome<'_>) -> SettlementView {
        let balance_table = Self::build_balance_table(&outcome.balances);
        let transfer_table = if outcome.settlements.is_empty() {
            None
        } else {
            Some(Self::build_transfer_table(&outcome.settlements))
        };

        SettlementView {
            balance_table,
            transfer_table,
        }
    }

    pub fn build_balance_table(balances: &[NetBalance<'_>]) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(i18n::PARTICIPANT),
                Cow::Borrowed(i18n::PAID),
                Cow::Borrowed(i18n::OWED),
                Cow::Borrowed(i18n::BALANCE),
            ]);

        for entry in balances {
            builder = builder.row([
                Cow::Borrowed(entry.name),
                Cow::Owned(entry.paid.to_string()),
                Cow::Owned(entry.owed.to_string()),
                Cow::Owned(format_signed(entry.balance)),
            ]);
        }

        builder.build()
    }

    pub fn build_transfer_table(settlements: &[Settlement<'_>]) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&[
                Cow::Borrowed(i18n::FROM),
                Cow::Borrowed(i18n::TO),
                Cow::Borrowed(i18n::AMOUNT),
            ]);

        for settlement in settlements {
            builder = builder.row([
                Cow::Borrowed(settlement.from),
                Cow::Borrowed(settlement.to),
                Cow::Owned(settlement.amount.to_string()),
            ]);
        }

        builder.build()
    }
}
