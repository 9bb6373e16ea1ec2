use crate::{error::SplitValidationError, model::SplitRequest};
use fairshare_domain::{Money, PayerPolicy};
use fxhash::FxHashSet;

/// Checks a request before any computation and returns the item total.
pub fn validate_request<'a>(
    request: &SplitRequest<'a>,
    payer_policy: PayerPolicy,
) -> Result<Money, SplitValidationError<'a>> {
    if request.participants.is_empty() {
        return Err(SplitValidationError::NoParticipants);
    }

    let mut seen = FxHashSet::default();
    for profile in &request.participants {
        let id = profile.participant.id.0;
        if !seen.insert(id) {
            return Err(SplitValidationError::DuplicateParticipant { id });
        }
    }

    let participants = request.participants();
    let mut total = Money::ZERO;
    for item in &request.items {
        if item.amount.is_negative() {
            return Err(SplitValidationError::NegativeAmount {
                item: item.id,
                amount: item.amount,
            });
        }
        if payer_policy.resolve_payer(item, &participants).is_none() {
            return Err(SplitValidationError::UnattributedItem { item: item.id });
        }
        total = total
            .checked_add(item.amount)
            .ok_or(SplitValidationError::TotalOverflow)?;
    }

    Ok(total)
}
