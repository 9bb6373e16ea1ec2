//! JSON request decoding.
//!
//! The wire format carries decimal amounts (`12.34` or `"12.34"`). They are
//! converted to minor units here and nowhere else; past this module every
//! amount is a [`Money`].

use fairshare_application::{ParticipantProfile, SplitRequest};
use fairshare_domain::{
    CostItem, Modifier, ModifierKind, Money, MoneyError, Participant, ParticipantId, PayerPolicy,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expense '{item}' has a non-numeric amount '{value}'")]
    InvalidAmount { item: String, value: String },
    #[error("expense '{item}' has an unusable amount: {source}")]
    Amount {
        item: String,
        #[source]
        source: MoneyError,
    },
    #[error("modifier for '{participant}' has unknown type '{kind}'")]
    UnknownModifierType { participant: String, kind: String },
    #[error("modifier for '{participant}' has a non-numeric value '{value}'")]
    InvalidModifierValue { participant: String, value: String },
}

/// A JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumericDto {
    Number(serde_json::Number),
    Text(String),
}

impl NumericDto {
    fn to_decimal(&self) -> Option<Decimal> {
        let text = match self {
            NumericDto::Number(number) => number.to_string(),
            NumericDto::Text(text) => text.trim().to_string(),
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }

    fn raw(&self) -> String {
        match self {
            NumericDto::Number(number) => number.to_string(),
            NumericDto::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayerPolicyDto {
    FirstParticipant,
    RequireExplicit,
}

impl From<PayerPolicyDto> for PayerPolicy {
    fn from(value: PayerPolicyDto) -> Self {
        match value {
            PayerPolicyDto::FirstParticipant => PayerPolicy::FirstParticipant,
            PayerPolicyDto::RequireExplicit => PayerPolicy::RequireExplicit,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDto {
    pub id: String,
    pub description: String,
    pub amount: NumericDto,
    #[serde(default)]
    pub payer_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierDto {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: Option<NumericDto>,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default)]
    pub reason: String,
}

/// Top-level modifier entry that names its participant.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatModifierDto {
    pub participant_id: String,
    #[serde(flatten)]
    pub modifier: ModifierDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub modifiers: Vec<ModifierDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitRequestDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub payer_policy: Option<PayerPolicyDto>,
    #[serde(default)]
    pub expenses: Vec<ExpenseDto>,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
    #[serde(default)]
    pub modifiers: Vec<FlatModifierDto>,
}

impl SplitRequestDto {
    pub fn from_json(input: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Borrowing view of this request in domain terms.
    ///
    /// Modifiers nested under a participant come first, in participant
    /// order, followed by the top-level `modifiers` list.
    pub fn to_request(&self) -> Result<SplitRequest<'_>, DecodeError> {
        let items = self
            .expenses
            .iter()
            .map(to_cost_item)
            .collect::<Result<Vec<_>, DecodeError>>()?;

        let participants = self
            .participants
            .iter()
            .map(|participant| ParticipantProfile {
                participant: Participant {
                    id: ParticipantId(&participant.id),
                    name: &participant.name,
                },
                tags: participant.tags.iter().map(String::as_str).collect(),
            })
            .collect();

        let nested = self.participants.iter().flat_map(|participant| {
            participant
                .modifiers
                .iter()
                .map(move |modifier| (participant.id.as_str(), modifier))
        });
        let flat = self
            .modifiers
            .iter()
            .map(|entry| (entry.participant_id.as_str(), &entry.modifier));
        let modifiers = nested
            .chain(flat)
            .map(|(participant, modifier)| to_modifier(participant, modifier))
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(SplitRequest {
            title: self.title.as_deref(),
            currency: self.currency.as_deref(),
            category: self.category.as_deref(),
            payer_policy: self.payer_policy.map(PayerPolicy::from),
            items,
            participants,
            modifiers,
        })
    }
}

fn to_cost_item(expense: &ExpenseDto) -> Result<CostItem<'_>, DecodeError> {
    let value = expense
        .amount
        .to_decimal()
        .ok_or_else(|| DecodeError::InvalidAmount {
            item: expense.id.clone(),
            value: expense.amount.raw(),
        })?;
    let amount = Money::from_decimal(value).map_err(|source| DecodeError::Amount {
        item: expense.id.clone(),
        source,
    })?;

    Ok(CostItem {
        id: &expense.id,
        label: &expense.description,
        amount,
        payer: expense
            .payer_id
            .as_deref()
            .filter(|payer| !payer.is_empty())
            .map(ParticipantId),
    })
}

fn to_modifier<'a>(
    participant: &'a str,
    modifier: &'a ModifierDto,
) -> Result<Modifier<'a>, DecodeError> {
    let kind = parse_modifier_kind(&modifier.kind).ok_or_else(|| {
        DecodeError::UnknownModifierType {
            participant: participant.to_string(),
            kind: modifier.kind.clone(),
        }
    })?;
    let value = modifier
        .value
        .as_ref()
        .map(|value| {
            value
                .to_decimal()
                .ok_or_else(|| DecodeError::InvalidModifierValue {
                    participant: participant.to_string(),
                    value: value.raw(),
                })
        })
        .transpose()?;

    Ok(Modifier {
        participant: ParticipantId(participant),
        kind,
        value,
        targets: modifier
            .targets
            .iter()
            .map(|target| target.trim())
            .filter(|target| !target.is_empty())
            .collect(),
        reason: &modifier.reason,
    })
}

pub fn parse_modifier_kind(kind: &str) -> Option<ModifierKind> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "standard" => Some(ModifierKind::Standard),
        "exclude" => Some(ModifierKind::Exclude),
        "partial" => Some(ModifierKind::Partial),
        "premium" => Some(ModifierKind::Premium),
        _ => None,
    }
}
