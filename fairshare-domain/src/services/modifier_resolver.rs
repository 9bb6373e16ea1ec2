use crate::model::{Modifier, ParticipantId, Weight};
use fxhash::FxHashMap;

/// Resolves which modifier governs a participant for a given cost item.
pub struct ModifierResolver<'m, 'a> {
    // Modifiers per participant id, in input order
    by_participant: FxHashMap<&'a str, Vec<&'m Modifier<'a>>>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedWeight<'m, 'a> {
    pub weight: Weight,
    pub modifier: Option<&'m Modifier<'a>>,
}

impl<'m, 'a> ModifierResolver<'m, 'a> {
    pub fn new(modifiers: &'m [Modifier<'a>]) -> Self {
        let mut by_participant: FxHashMap<&'a str, Vec<&'m Modifier<'a>>> = FxHashMap::default();
        for modifier in modifiers {
            by_participant
                .entry(modifier.participant.0)
                .or_default()
                .push(modifier);
        }
        Self { by_participant }
    }

    /// Targeted modifiers matching the label win over global ones; the first
    /// match in input order is used. `label_lower` must already be lowercased.
    pub fn active_modifier(
        &self,
        participant: ParticipantId<'_>,
        label_lower: &str,
    ) -> Option<&'m Modifier<'a>> {
        let candidates = self.by_participant.get(participant.0)?;
        candidates
            .iter()
            .copied()
            .find(|modifier| !modifier.is_global() && modifier.targets_label(label_lower))
            .or_else(|| candidates.iter().copied().find(|modifier| modifier.is_global()))
    }

    pub fn resolve(
        &self,
        participant: ParticipantId<'_>,
        label_lower: &str,
    ) -> ResolvedWeight<'m, 'a> {
        match self.active_modifier(participant, label_lower) {
            Some(modifier) => ResolvedWeight {
                weight: modifier.weight(),
                modifier: Some(modifier),
            },
            None => ResolvedWeight {
                weight: Weight::ONE,
                modifier: None,
            },
        }
    }

    pub fn has_modifiers(&self, participant: ParticipantId<'_>) -> bool {
        self.by_participant.contains_key(participant.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModifierKind;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    fn modifier(
        participant: &'static str,
        kind: ModifierKind,
        targets: Vec<&'static str>,
        reason: &'static str,
    ) -> Modifier<'static> {
        Modifier {
            participant: ParticipantId(participant),
            kind,
            value: None,
            targets,
            reason,
        }
    }

    #[fixture]
    fn modifiers() -> Vec<Modifier<'static>> {
        vec![
            modifier("B", ModifierKind::Partial, vec![], "Left early"),
            modifier("B", ModifierKind::Exclude, vec!["steak", "wine"], "Vegetarian"),
            modifier("B", ModifierKind::Premium, vec!["steak"], "Second steak"),
            modifier("C", ModifierKind::Exclude, vec!["hotel night 1"], "Arrived late"),
        ]
    }

    #[rstest]
    #[case::targeted_beats_global("B", "Steak dinner", Some("Vegetarian"))]
    #[case::second_target_matches("B", "House WINE", Some("Vegetarian"))]
    #[case::global_fallback("B", "Salad", Some("Left early"))]
    #[case::targeted_only_no_match("C", "Hotel Night 2", None)]
    #[case::targeted_only_match("C", "Hotel Night 1", Some("Arrived late"))]
    #[case::no_modifiers("A", "Steak", None)]
    fn active_modifier_prefers_targeted_then_global(
        modifiers: Vec<Modifier<'static>>,
        #[case] participant: &'static str,
        #[case] label: &str,
        #[case] expected_reason: Option<&str>,
    ) {
        let resolver = ModifierResolver::new(&modifiers);
        let active = resolver.active_modifier(ParticipantId(participant), &label.to_lowercase());
        assert_eq!(active.map(|modifier| modifier.reason), expected_reason);
    }

    #[rstest]
    fn resolve_defaults_to_standard_weight(modifiers: Vec<Modifier<'static>>) {
        let resolver = ModifierResolver::new(&modifiers);

        let standard = resolver.resolve(ParticipantId("A"), "anything");
        assert_eq!(standard.weight, Weight::ONE);
        assert!(standard.modifier.is_none());

        let excluded = resolver.resolve(ParticipantId("B"), "steak");
        assert_eq!(excluded.weight.value(), Decimal::ZERO);
        assert!(resolver.has_modifiers(ParticipantId("B")));
        assert!(!resolver.has_modifiers(ParticipantId("A")));
    }
}
