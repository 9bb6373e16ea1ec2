use fairshare_application::{SplitError, SplitValidationError};
use fairshare_domain::{AllocationError, SettlementError};
use fairshare_infrastructure::DecodeError;

pub fn format_split_error(error: &SplitError<'_>) -> String {
    match error {
        SplitError::Validation(error) => format_validation_error(error),
        SplitError::Allocation(AllocationError::NoParticipants) => {
            fairshare_i18n::NO_PARTICIPANTS.to_string()
        }
        SplitError::Settlement(SettlementError::UnattributedItem { item }) => {
            fairshare_i18n::unattributed_item(item)
        }
    }
}

pub fn format_validation_error(error: &SplitValidationError<'_>) -> String {
    match error {
        SplitValidationError::NoParticipants => fairshare_i18n::NO_PARTICIPANTS.to_string(),
        SplitValidationError::DuplicateParticipant { id } => {
            fairshare_i18n::duplicate_participant(id)
        }
        SplitValidationError::NegativeAmount { item, amount } => {
            fairshare_i18n::negative_amount(item, amount)
        }
        SplitValidationError::UnattributedItem { item } => fairshare_i18n::unattributed_item(item),
        SplitValidationError::TotalOverflow => fairshare_i18n::TOTAL_OVERFLOW.to_string(),
    }
}

pub fn format_decode_error(error: &DecodeError) -> String {
    fairshare_i18n::invalid_request(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairshare_domain::Money;
    use fairshare_infrastructure::SplitRequestDto;
    use rstest::rstest;

    #[rstest]
    #[case::duplicate(SplitValidationError::DuplicateParticipant { id: "A" }, "'A'")]
    #[case::negative(
        SplitValidationError::NegativeAmount { item: "refund", amount: Money::from_minor(-150) },
        "-1.50"
    )]
    #[case::unattributed(SplitValidationError::UnattributedItem { item: "taxi" }, "'taxi'")]
    fn validation_messages_name_the_offender(
        #[case] error: SplitValidationError<'static>,
        #[case] fragment: &str,
    ) {
        let message = format_split_error(&SplitError::Validation(error));
        assert!(message.contains(fragment), "{message}");
    }

    #[rstest]
    #[case::validation(SplitError::Validation(SplitValidationError::NoParticipants))]
    #[case::allocation(SplitError::Allocation(AllocationError::NoParticipants))]
    fn no_participants_reads_the_same_from_every_layer(#[case] error: SplitError<'static>) {
        assert_eq!(format_split_error(&error), fairshare_i18n::NO_PARTICIPANTS);
    }

    #[test]
    fn decode_errors_carry_detail() {
        let error = SplitRequestDto::from_json("[").expect_err("invalid json");
        let message = format_decode_error(&error);
        assert!(message.contains("invalid request JSON"), "{message}");
    }
}
