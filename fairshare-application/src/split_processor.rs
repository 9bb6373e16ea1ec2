use crate::{
    error::SplitError,
    model::{InferredModifier, ParticipantProfile, SplitOutcome, SplitRequest},
    ports::{AuditRecord, AuditSink, InferenceContext, ModifierInference},
    validation::validate_request,
};
use fairshare_domain::{AllocationEngine, Modifier, Money, PayerPolicy, SettlementResolver};

/// Runs one split request: validate, allocate, settle, then audit.
#[derive(Clone, Copy)]
pub struct SplitProcessor<'a> {
    audit: &'a dyn AuditSink,
    inference: Option<&'a dyn ModifierInference>,
    payer_policy: PayerPolicy,
    tolerance: Money,
}

impl<'a> SplitProcessor<'a> {
    pub fn new(audit: &'a dyn AuditSink) -> Self {
        Self {
            audit,
            inference: None,
            payer_policy: PayerPolicy::default(),
            tolerance: Money::ZERO,
        }
    }

    /// Consult `inference` for participants that carry tags but no explicit
    /// modifiers.
    pub fn with_inference(mut self, inference: &'a dyn ModifierInference) -> Self {
        self.inference = Some(inference);
        self
    }

    /// Default policy for requests that do not choose one.
    pub fn with_payer_policy(mut self, payer_policy: PayerPolicy) -> Self {
        self.payer_policy = payer_policy;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Money) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn process<'r>(
        &self,
        request: &SplitRequest<'r>,
    ) -> Result<SplitOutcome<'r>, SplitError<'r>> {
        let payer_policy = request.payer_policy.unwrap_or(self.payer_policy);
        let total = validate_request(request, payer_policy)?;
        let participants = request.participants();

        let inferred = self.infer_modifiers(request);
        let mut modifiers: Vec<Modifier<'_>> =
            Vec::with_capacity(request.modifiers.len() + inferred.len());
        for modifier in &request.modifiers {
            modifiers.push(modifier.clone());
        }
        for modifier in &inferred {
            modifiers.push(modifier.as_modifier());
        }

        let orphaned = modifiers
            .iter()
            .filter(|modifier| {
                !participants
                    .iter()
                    .any(|participant| participant.id.0 == modifier.participant.0)
            })
            .count();
        if orphaned > 0 {
            tracing::debug!(
                orphaned,
                "Ignoring modifiers that name no known participant"
            );
        }

        let report = AllocationEngine.allocate(&request.items, &participants, &modifiers)?;
        debug_assert_eq!(report.total, total);

        let resolver = SettlementResolver::new(payer_policy).with_tolerance(self.tolerance);
        let balances = resolver.net_balances(&request.items, &report.allocations, &participants)?;
        let settlements = resolver.match_balances(&balances);

        let fallback_item_count = report
            .breakdowns
            .iter()
            .filter(|breakdown| breakdown.equal_split_fallback)
            .count();
        self.audit.record(&AuditRecord {
            title: request.title,
            total,
            item_count: request.items.len(),
            modifier_count: modifiers.len(),
            inferred_modifier_count: inferred.len(),
            fallback_item_count,
            allocations: &report.allocations,
            settlements: &settlements,
        });

        tracing::info!(
            title = request.title.unwrap_or_default(),
            total = %total,
            participant_count = participants.len(),
            settlement_count = settlements.len(),
            "Split computed"
        );

        Ok(SplitOutcome {
            title: request.title,
            currency: request.currency,
            total_amount: total,
            allocations: report.allocations,
            settlements,
            balances,
            breakdowns: report.breakdowns,
            inferred_modifiers: inferred.len(),
        })
    }

    fn infer_modifiers(&self, request: &SplitRequest<'_>) -> Vec<InferredModifier> {
        let Some(inference) = self.inference else {
            return Vec::new();
        };

        let candidates: Vec<&ParticipantProfile<'_>> = request
            .participants
            .iter()
            .filter(|profile| {
                !profile.tags.is_empty()
                    && !request.has_explicit_modifiers(profile.participant.id)
            })
            .collect();
        if candidates.is_empty() {
            return Vec::new();
        }

        let context = InferenceContext {
            title: request.title,
            category: request.category,
            items: &request.items,
            participants: &candidates,
        };
        match inference.infer(&context) {
            Ok(proposed) => {
                let proposed_count = proposed.len();
                let accepted: Vec<InferredModifier> = proposed
                    .into_iter()
                    .filter(|modifier| {
                        candidates
                            .iter()
                            .any(|profile| profile.participant.id.0 == modifier.participant)
                    })
                    .collect();
                tracing::debug!(
                    proposed = proposed_count,
                    accepted = accepted.len(),
                    "Modifiers inferred"
                );
                accepted
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Modifier inference failed; continuing with standard shares"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{InferenceError, SplitValidationError},
        ports::NoopAuditSink,
    };
    use fairshare_domain::{
        CostItem, ModifierKind, Participant, ParticipantId, STANDARD_SHARE_REASONING,
    };
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    static NOOP_AUDIT: NoopAuditSink = NoopAuditSink;

    #[derive(Default)]
    struct RecordingAuditSink {
        totals: Mutex<Vec<(Money, usize, usize)>>,
    }

    impl AuditSink for RecordingAuditSink {
        fn record(&self, record: &AuditRecord<'_, '_>) {
            if let Ok(mut totals) = self.totals.lock() {
                totals.push((
                    record.total,
                    record.settlements.len(),
                    record.inferred_modifier_count,
                ));
            }
        }
    }

    struct StubInference(Vec<InferredModifier>);

    impl ModifierInference for StubInference {
        fn infer(
            &self,
            _context: &InferenceContext<'_, '_>,
        ) -> Result<Vec<InferredModifier>, InferenceError> {
            Ok(self.0.clone())
        }
    }

    struct FailingInference;

    impl ModifierInference for FailingInference {
        fn infer(
            &self,
            _context: &InferenceContext<'_, '_>,
        ) -> Result<Vec<InferredModifier>, InferenceError> {
            Err(InferenceError::Unavailable("offline".to_string()))
        }
    }

    fn profile(id: &'static str, tags: Vec<&'static str>) -> ParticipantProfile<'static> {
        ParticipantProfile {
            participant: Participant {
                id: ParticipantId(id),
                name: id,
            },
            tags,
        }
    }

    fn item(id: &'static str, minor: i64, payer: Option<&'static str>) -> CostItem<'static> {
        CostItem {
            id,
            label: id,
            amount: Money::from_minor(minor),
            payer: payer.map(ParticipantId),
        }
    }

    fn student_discount(participant: &str) -> InferredModifier {
        InferredModifier {
            participant: participant.to_string(),
            kind: ModifierKind::Partial,
            value: Some(Decimal::new(5, 1)),
            targets: Vec::new(),
            reason: "Financial: Student (0.5x)".to_string(),
        }
    }

    #[fixture]
    fn request() -> SplitRequest<'static> {
        SplitRequest {
            title: Some("Dinner"),
            participants: vec![
                profile("A", Vec::new()),
                profile("B", vec!["Student"]),
                profile("C", Vec::new()),
            ],
            items: vec![item("Dinner", 9_000, Some("A"))],
            ..SplitRequest::default()
        }
    }

    fn shares(outcome: &SplitOutcome<'_>) -> Vec<i64> {
        outcome
            .allocations
            .iter()
            .map(|allocation| allocation.share.minor_units())
            .collect()
    }

    #[rstest]
    fn equal_split_settles_with_payer(request: SplitRequest<'static>) {
        let outcome = SplitProcessor::new(&NOOP_AUDIT)
            .process(&request)
            .expect("split should succeed");

        assert_eq!(outcome.total_amount, Money::from_minor(9_000));
        assert_eq!(shares(&outcome), vec![3_000, 3_000, 3_000]);
        assert_eq!(outcome.settlements.len(), 2);
        assert!(
            outcome
                .settlements
                .iter()
                .all(|settlement| settlement.to == "A" && settlement.amount.minor_units() == 3_000)
        );
        assert_eq!(outcome.inferred_modifiers, 0);
    }

    #[rstest]
    fn inferred_modifiers_apply_to_tagged_participants(request: SplitRequest<'static>) {
        let inference = StubInference(vec![student_discount("B")]);
        let outcome = SplitProcessor::new(&NOOP_AUDIT)
            .with_inference(&inference)
            .process(&request)
            .expect("split should succeed");

        assert_eq!(shares(&outcome), vec![3_600, 1_800, 3_600]);
        assert_eq!(outcome.inferred_modifiers, 1);
        assert_eq!(outcome.allocations[1].reasoning, "Financial: Student (0.5x)");
    }

    #[rstest]
    fn explicit_modifiers_take_precedence_over_inference(mut request: SplitRequest<'static>) {
        request.modifiers.push(Modifier {
            participant: ParticipantId("B"),
            kind: ModifierKind::Standard,
            value: None,
            targets: Vec::new(),
            reason: "Insists on paying",
        });
        let inference = StubInference(vec![student_discount("B")]);
        let outcome = SplitProcessor::new(&NOOP_AUDIT)
            .with_inference(&inference)
            .process(&request)
            .expect("split should succeed");

        assert_eq!(shares(&outcome), vec![3_000, 3_000, 3_000]);
        assert_eq!(outcome.inferred_modifiers, 0);
    }

    #[rstest]
    fn failed_inference_degrades_to_standard_shares(request: SplitRequest<'static>) {
        let outcome = SplitProcessor::new(&NOOP_AUDIT)
            .with_inference(&FailingInference)
            .process(&request)
            .expect("split should succeed");

        assert_eq!(shares(&outcome), vec![3_000, 3_000, 3_000]);
        assert_eq!(outcome.allocations[1].reasoning, STANDARD_SHARE_REASONING);
    }

    #[rstest]
    fn audit_sink_receives_every_split(request: SplitRequest<'static>) {
        let audit = RecordingAuditSink::default();
        SplitProcessor::new(&audit)
            .process(&request)
            .expect("split should succeed");

        let totals = audit.totals.lock().expect("lock poisoned");
        assert_eq!(totals.as_slice(), &[(Money::from_minor(9_000), 2, 0)]);
    }

    #[rstest]
    fn request_policy_overrides_processor_default(mut request: SplitRequest<'static>) {
        request.items.push(item("Taxi", 3_000, None));
        let processor = SplitProcessor::new(&NOOP_AUDIT);

        assert!(processor.process(&request).is_ok());

        request.payer_policy = Some(PayerPolicy::RequireExplicit);
        assert_eq!(
            processor.process(&request),
            Err(SplitError::Validation(
                SplitValidationError::UnattributedItem { item: "Taxi" }
            ))
        );
    }

    #[rstest]
    fn validation_errors_stop_processing(mut request: SplitRequest<'static>) {
        let audit = RecordingAuditSink::default();
        request.participants.clear();

        assert_eq!(
            SplitProcessor::new(&audit).process(&request),
            Err(SplitError::Validation(SplitValidationError::NoParticipants))
        );
        assert!(audit.totals.lock().expect("lock poisoned").is_empty());
    }
}
