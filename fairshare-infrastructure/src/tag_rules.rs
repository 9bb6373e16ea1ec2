//! Rule-based modifier inference from participant tags.
//!
//! Each matching tag multiplies the participant's weight. Category rules only
//! apply to plans of that category; financial rules apply everywhere.

use fairshare_application::{
    InferenceContext, InferenceError, InferredModifier, ModifierInference, ParticipantProfile,
};
use fairshare_domain::ModifierKind;
use fxhash::FxHashMap;
use rust_decimal::Decimal;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagRule {
    pub tag: &'static str,
    pub multiplier: Decimal,
}

impl TagRule {
    const fn new(tag: &'static str, multiplier: Decimal) -> Self {
        Self { tag, multiplier }
    }
}

#[derive(Clone, Debug)]
pub struct TagRuleInference {
    category_rules: FxHashMap<&'static str, Vec<TagRule>>,
    financial_rules: Vec<TagRule>,
}

impl Default for TagRuleInference {
    fn default() -> Self {
        let mut category_rules = FxHashMap::default();
        category_rules.insert(
            "rent",
            vec![
                TagRule::new("Organizer", Decimal::ONE),
                TagRule::new("Non-drinker", Decimal::ONE),
            ],
        );
        category_rules.insert(
            "trip",
            vec![
                TagRule::new("Organizer", Decimal::from_parts(9, 0, 0, false, 1)),
                TagRule::new("Arrived late", Decimal::from_parts(8, 0, 0, false, 1)),
            ],
        );
        category_rules.insert(
            "dinner",
            vec![
                TagRule::new("Non-drinker", Decimal::from_parts(8, 0, 0, false, 1)),
                TagRule::new("Left early", Decimal::from_parts(5, 0, 0, false, 1)),
            ],
        );

        Self {
            category_rules,
            financial_rules: vec![
                TagRule::new("Student", Decimal::from_parts(7, 0, 0, false, 1)),
                TagRule::new("Intern", Decimal::from_parts(8, 0, 0, false, 1)),
                TagRule::new("Unemployed", Decimal::from_parts(7, 0, 0, false, 1)),
                TagRule::new("High Earner", Decimal::from_parts(125, 0, 0, false, 2)),
            ],
        }
    }
}

impl TagRuleInference {
    pub fn with_category_rule(
        mut self,
        category: &'static str,
        tag: &'static str,
        multiplier: Decimal,
    ) -> Self {
        self.category_rules
            .entry(category)
            .or_default()
            .push(TagRule::new(tag, multiplier));
        self
    }

    fn infer_one(
        &self,
        category_rules: &[TagRule],
        profile: &ParticipantProfile<'_>,
    ) -> Option<InferredModifier> {
        let mut weight = Decimal::ONE;
        let mut reasons = Vec::new();

        for tag in &profile.tags {
            if let Some(rule) = find_rule(category_rules, tag) {
                weight *= rule.multiplier;
                reasons.push(format!(
                    "Context: {} ({}x)",
                    rule.tag,
                    rule.multiplier.normalize()
                ));
            }
            if let Some(rule) = find_rule(&self.financial_rules, tag) {
                weight *= rule.multiplier;
                reasons.push(format!(
                    "Financial: {} ({}x)",
                    rule.tag,
                    rule.multiplier.normalize()
                ));
            }
        }

        if reasons.is_empty() {
            return None;
        }

        let kind = match weight.cmp(&Decimal::ONE) {
            std::cmp::Ordering::Less => ModifierKind::Partial,
            std::cmp::Ordering::Equal => ModifierKind::Standard,
            std::cmp::Ordering::Greater => ModifierKind::Premium,
        };
        Some(InferredModifier {
            participant: profile.participant.id.0.to_string(),
            kind,
            value: (kind != ModifierKind::Standard).then(|| weight.normalize()),
            targets: Vec::new(),
            reason: reasons.join(", "),
        })
    }
}

fn find_rule<'r>(rules: &'r [TagRule], tag: &str) -> Option<&'r TagRule> {
    let tag = tag.trim();
    rules.iter().find(|rule| rule.tag.eq_ignore_ascii_case(tag))
}

impl ModifierInference for TagRuleInference {
    fn infer(
        &self,
        context: &InferenceContext<'_, '_>,
    ) -> Result<Vec<InferredModifier>, InferenceError> {
        let category_rules = context
            .category
            .map(|category| category.trim().to_ascii_lowercase())
            .and_then(|category| self.category_rules.get(category.as_str()))
            .map(Vec::as_slice)
            .unwrap_or_default();

        Ok(context
            .participants
            .iter()
            .filter_map(|profile| self.infer_one(category_rules, profile))
            .collect())
    }
}
