use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Serialize, Serializer};
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};
use thiserror::Error;

/// Number of fractional digits in one minor unit (cents).
pub const CURRENCY_SCALE: u32 = 2;

const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Monetary amount in integer minor units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("amount {0} has more than two decimal places")]
    Fractional(Decimal),
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),
}

impl Money {
    pub const ZERO: Self = Self(0);

    pub const fn from_minor(units: i64) -> Self {
        Self(units)
    }

    /// Converts a decimal currency value (e.g. `12.34`) into minor units.
    ///
    /// Values that are not exactly representable at [`CURRENCY_SCALE`] are
    /// rejected rather than rounded.
    pub fn from_decimal(value: Decimal) -> Result<Self, MoneyError> {
        let units = value
            .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
            .ok_or(MoneyError::OutOfRange(value))?;
        if !units.fract().is_zero() {
            return Err(MoneyError::Fractional(value));
        }
        units
            .to_i64()
            .map(Self)
            .ok_or(MoneyError::OutOfRange(value))
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, CURRENCY_SCALE)
    }

    pub fn minor_units(self) -> i64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn signum(self) -> i64 {
        self.0.signum()
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ParticipantId<'a>(pub &'a str);

impl fmt::Display for ParticipantId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Participant<'a> {
    pub id: ParticipantId<'a>,
    pub name: &'a str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CostItem<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub amount: Money,
    pub payer: Option<ParticipantId<'a>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKind {
    Standard,
    Exclude,
    Partial,
    Premium,
}

impl ModifierKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ModifierKind::Standard => "standard",
            ModifierKind::Exclude => "exclude",
            ModifierKind::Partial => "partial",
            ModifierKind::Premium => "premium",
        }
    }

    /// Resolves the per-item weight for this kind, falling back to the
    /// kind's default when no value was supplied.
    pub fn weight(self, value: Option<Decimal>) -> Weight {
        match self {
            ModifierKind::Standard => Weight::ONE,
            ModifierKind::Exclude => Weight::ZERO,
            ModifierKind::Partial => value.map_or(Weight::DEFAULT_PARTIAL, Weight::new),
            ModifierKind::Premium => value.map_or(Weight::DEFAULT_PREMIUM, Weight::new),
        }
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Modifier<'a> {
    pub participant: ParticipantId<'a>,
    pub kind: ModifierKind,
    pub value: Option<Decimal>,
    /// Case-insensitive label fragments. Empty means the modifier is global.
    pub targets: Vec<&'a str>,
    pub reason: &'a str,
}

impl Modifier<'_> {
    pub fn is_global(&self) -> bool {
        self.targets.is_empty()
    }

    /// `label_lower` must already be lowercased.
    pub fn targets_label(&self, label_lower: &str) -> bool {
        self.targets
            .iter()
            .any(|target| label_lower.contains(target.to_lowercase().as_str()))
    }

    pub fn weight(&self) -> Weight {
        self.kind.weight(self.value)
    }
}

/// Relative cost multiplier of one participant for one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Weight(Decimal);

impl Weight {
    pub const ZERO: Self = Self(Decimal::ZERO);
    pub const ONE: Self = Self(Decimal::ONE);
    pub const DEFAULT_PARTIAL: Self = Self(Decimal::from_parts(5, 0, 0, false, 1));
    pub const DEFAULT_PREMIUM: Self = Self(Decimal::from_parts(15, 0, 0, false, 1));
    pub const MAX: Self = Self(Decimal::from_parts(1_000_000_000, 0, 0, false, 0));

    /// Clamps into `[0, MAX]`; a weight is never negative.
    pub fn new(value: Decimal) -> Self {
        Self(value.clamp(Self::ZERO.0, Self::MAX.0))
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(Weight::value).sum())
    }
}

/// What a participant would owe under a plain equal split, next to what the
/// weighted allocation asks of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EqualSplitComparison {
    pub equal_share: Money,
    /// `equal_share - share`; positive when the participant pays less than equal.
    pub savings: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation<'a> {
    pub participant: ParticipantId<'a>,
    pub name: &'a str,
    pub share: Money,
    /// Share of the grand total in percent, rounded to one decimal place.
    pub share_percentage: Decimal,
    pub reasoning: String,
    pub comparison: EqualSplitComparison,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemShare<'a> {
    pub participant: ParticipantId<'a>,
    pub weight: Weight,
    pub share: Money,
    pub modifier: Option<ModifierKind>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBreakdown<'a> {
    pub item: &'a str,
    pub label: &'a str,
    pub amount: Money,
    /// Set when every weight was zero and the item fell back to an equal split.
    pub equal_split_fallback: bool,
    pub shares: Vec<ItemShare<'a>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AllocationReport<'a> {
    pub total: Money,
    pub allocations: Vec<Allocation<'a>>,
    pub breakdowns: Vec<ItemBreakdown<'a>>,
}

impl AllocationReport<'_> {
    pub fn allocated_total(&self) -> Money {
        self.allocations.iter().map(|allocation| allocation.share).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetBalance<'a> {
    pub participant: ParticipantId<'a>,
    pub name: &'a str,
    pub paid: Money,
    pub owed: Money,
    /// `paid - owed`: positive is owed money, negative owes money.
    pub balance: Money,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement<'a> {
    #[serde(skip)]
    pub debtor: ParticipantId<'a>,
    #[serde(skip)]
    pub creditor: ParticipantId<'a>,
    pub from: &'a str,
    pub to: &'a str,
    pub amount: Money,
}
