use fairshare_domain::{AllocationError, Money, SettlementError};
use thiserror::Error;

/// Rejections raised before any allocation work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitValidationError<'a> {
    #[error("at least one participant is required")]
    NoParticipants,
    #[error("participant id '{id}' appears more than once")]
    DuplicateParticipant { id: &'a str },
    #[error("item '{item}' has a negative amount ({amount})")]
    NegativeAmount { item: &'a str, amount: Money },
    #[error("item '{item}' does not name a participant as its payer")]
    UnattributedItem { item: &'a str },
    #[error("the item total does not fit in the supported range")]
    TotalOverflow,
}

/// Failure of the external modifier inference collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    #[error("inference is unavailable: {0}")]
    Unavailable(String),
    #[error("inference returned an unusable response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError<'a> {
    #[error(transparent)]
    Validation(SplitValidationError<'a>),
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error(transparent)]
    Settlement(SettlementError<'a>),
}

impl<'a> From<SplitValidationError<'a>> for SplitError<'a> {
    fn from(error: SplitValidationError<'a>) -> Self {
        SplitError::Validation(error)
    }
}

impl<'a> From<SettlementError<'a>> for SplitError<'a> {
    fn from(error: SettlementError<'a>) -> Self {
        SplitError::Settlement(error)
    }
}
